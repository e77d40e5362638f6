//! Optional observability for the relay's three upstream operations and the quiz engine.
//!
//! Every call to [`Relay::issue_token`](crate::relay::Relay::issue_token),
//! [`Relay::reset_token`](crate::relay::Relay::reset_token), and
//! [`Relay::fetch_questions`](crate::relay::Relay::fetch_questions) records one `attempt`
//! followed by exactly one of `success`, `failure`, or `denied`. Only fetches can be `denied`,
//! meaning the rate gate refused the call before the question bank was contacted. Gate
//! decisions are also counted, with no feature enabled, by
//! [`GateMetrics`](crate::gate::GateMetrics).
//!
//! Tokens never reach a span or event; [`trace_token_stored`] logs the token fingerprint only.
//!
//! # Feature Flags
//!
//! - `tracing`: a `trivia_relay.op` span (fields `op`, `stage`) around each operation, a
//!   `trivia_relay.relay` debug event when a session is bound to a token, and a
//!   `trivia_relay.quiz` debug event on every quiz phase change.
//! - `metrics`: the `trivia_relay_op_total{op, outcome}` counter.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Relay operations observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpKind {
	/// Session token issuance.
	IssueToken,
	/// Question batch fetch.
	FetchQuestions,
	/// Session token reset.
	ResetToken,
}
impl OpKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OpKind::IssueToken => "issue_token",
			OpKind::FetchQuestions => "fetch_questions",
			OpKind::ResetToken => "reset_token",
		}
	}
}
impl Display for OpKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpOutcome {
	/// Entry to a relay operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
	/// Refused by the rate gate before any upstream call.
	Denied,
}
impl OpOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OpOutcome::Attempt => "attempt",
			OpOutcome::Success => "success",
			OpOutcome::Failure => "failure",
			OpOutcome::Denied => "denied",
		}
	}
}
impl Display for OpOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
