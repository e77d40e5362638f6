//! `trivia_relay_op_total` counter.

// self
use crate::obs::{OpKind, OpOutcome};

/// Counts one outcome of a relay operation; a no-op without the `metrics` feature.
///
/// `attempt` is recorded before the rate gate is consulted, so for fetches
/// `attempt = success + failure + denied`.
pub fn record_op_outcome(kind: OpKind, outcome: OpOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"trivia_relay_op_total",
			"op" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}
