//! Global minimum-interval gate in front of upstream question fetches.
//!
//! The question bank counts call attempts, not successes, so an accepted acquisition is
//! consumed even when the fetch that follows fails. A single gate serializes fetches across
//! every session; a caller arriving early is refused, never queued.

mod metrics;

pub use metrics::GateMetrics;

// self
use crate::_prelude::*;

/// Minimum spacing between accepted fetches, dictated by the question bank's policy.
pub const MIN_INTERVAL: Duration = Duration::milliseconds(5_000);

/// Source of "now" for the gate; injected so tests can drive time by hand.
pub trait Clock
where
	Self: Send + Sync,
{
	/// Current instant.
	fn now(&self) -> OffsetDateTime;
}

/// Wall clock backed by [`OffsetDateTime::now_utc`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;
impl Clock for SystemClock {
	fn now(&self) -> OffsetDateTime {
		OffsetDateTime::now_utc()
	}
}

/// Result emitted by [`RateGate::try_acquire`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateDecision {
	/// The call may proceed; the gate has recorded it.
	Allow,
	/// The call must not proceed.
	Deny(RetryDirective),
}
impl GateDecision {
	/// Returns true for [`GateDecision::Allow`].
	pub fn is_allowed(&self) -> bool {
		matches!(self, Self::Allow)
	}
}

/// Advises callers when to retry after a [`GateDecision::Deny`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryDirective {
	/// Instant when the gate reopens.
	pub earliest_retry_at: OffsetDateTime,
	/// Time remaining until then, measured from the refused attempt.
	pub retry_in: Duration,
}

/// Single process-wide timestamp gate.
#[derive(Debug)]
pub struct RateGate {
	min_interval: Duration,
	last_call: Mutex<Option<OffsetDateTime>>,
	metrics: GateMetrics,
}
impl RateGate {
	/// Creates a gate that enforces `min_interval` between accepted calls.
	///
	/// Negative intervals are clamped to zero.
	pub fn new(min_interval: Duration) -> Self {
		let min_interval = if min_interval.is_negative() { Duration::ZERO } else { min_interval };

		Self { min_interval, last_call: Mutex::new(None), metrics: GateMetrics::default() }
	}

	/// Configured minimum interval.
	pub fn min_interval(&self) -> Duration {
		self.min_interval
	}

	/// Timestamp of the last accepted call, if any.
	pub fn last_call(&self) -> Option<OffsetDateTime> {
		*self.last_call.lock()
	}

	/// Acceptance/denial counters.
	pub fn metrics(&self) -> &GateMetrics {
		&self.metrics
	}

	/// Checks the gate at `now` and, when allowed, records `now` as the last call.
	///
	/// Check and set happen under one lock so concurrent callers cannot both pass. A denied
	/// attempt leaves the stored timestamp untouched.
	pub fn try_acquire(&self, now: OffsetDateTime) -> GateDecision {
		let mut last_call = self.last_call.lock();

		if let Some(last) = *last_call {
			let elapsed = now - last;

			if elapsed < self.min_interval {
				let earliest_retry_at = last + self.min_interval;

				self.metrics.record_denied();

				return GateDecision::Deny(RetryDirective {
					earliest_retry_at,
					retry_in: earliest_retry_at - now,
				});
			}
		}

		*last_call = Some(now);

		self.metrics.record_accepted();

		GateDecision::Allow
	}
}
impl Default for RateGate {
	fn default() -> Self {
		Self::new(MIN_INTERVAL)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn at(millis: i64) -> OffsetDateTime {
		OffsetDateTime::UNIX_EPOCH + Duration::milliseconds(millis)
	}

	#[test]
	fn first_call_is_always_allowed() {
		let gate = RateGate::default();

		assert!(gate.last_call().is_none());
		assert!(gate.try_acquire(at(0)).is_allowed());
		assert_eq!(gate.last_call(), Some(at(0)));
	}

	#[test]
	fn early_call_is_denied_without_moving_the_timestamp() {
		let gate = RateGate::default();

		assert!(gate.try_acquire(at(1_000)).is_allowed());

		let decision = gate.try_acquire(at(5_999));

		assert_eq!(
			decision,
			GateDecision::Deny(RetryDirective {
				earliest_retry_at: at(6_000),
				retry_in: Duration::milliseconds(1),
			})
		);
		assert_eq!(gate.last_call(), Some(at(1_000)));
		assert_eq!(gate.metrics().denied(), 1);
		assert_eq!(gate.metrics().accepted(), 1);
	}

	#[test]
	fn call_exactly_one_interval_later_is_allowed() {
		let gate = RateGate::default();

		assert!(gate.try_acquire(at(0)).is_allowed());
		assert!(gate.try_acquire(at(5_000)).is_allowed());
		assert_eq!(gate.last_call(), Some(at(5_000)));
	}

	#[test]
	fn accepted_calls_never_closer_than_the_interval() {
		let gate = RateGate::new(Duration::milliseconds(5_000));
		let mut accepted = Vec::new();

		for step in 0..200 {
			let now = at(step * 700);

			if gate.try_acquire(now).is_allowed() {
				accepted.push(now);
			}
		}

		assert!(accepted.len() > 1);

		for pair in accepted.windows(2) {
			assert!(pair[1] - pair[0] >= MIN_INTERVAL);
		}
	}

	#[test]
	fn backwards_clock_is_denied() {
		let gate = RateGate::default();

		assert!(gate.try_acquire(at(10_000)).is_allowed());
		assert!(!gate.try_acquire(at(2_000)).is_allowed());
		assert_eq!(gate.last_call(), Some(at(10_000)));
	}

	#[test]
	fn negative_interval_is_clamped() {
		let gate = RateGate::new(Duration::seconds(-1));

		assert_eq!(gate.min_interval(), Duration::ZERO);
		assert!(gate.try_acquire(at(0)).is_allowed());
		assert!(gate.try_acquire(at(0)).is_allowed());
	}
}
