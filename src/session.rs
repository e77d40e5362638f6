//! Session domain types: relay-issued identifiers and the upstream tokens they map to.

pub mod id;
pub mod token;

pub use id::*;
pub use token::*;

// self
use crate::_prelude::*;

/// Pairing of a relay session identifier with the question bank's session token.
///
/// This is also the payload the relay hands back from `issue_token` and `reset_token`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
	/// Relay-generated opaque identifier.
	pub session_id: SessionId,
	/// Token supplied by the question bank.
	pub token: UpstreamToken,
}
impl Session {
	/// Pairs an identifier with a token.
	pub fn new(session_id: SessionId, token: UpstreamToken) -> Self {
		Self { session_id, token }
	}
}
