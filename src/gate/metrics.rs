// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for gate decisions.
#[derive(Debug, Default)]
pub struct GateMetrics {
	accepted: AtomicU64,
	denied: AtomicU64,
}
impl GateMetrics {
	/// Returns the number of acquisitions the gate let through.
	pub fn accepted(&self) -> u64 {
		self.accepted.load(Ordering::Relaxed)
	}

	/// Returns the number of acquisitions the gate refused.
	pub fn denied(&self) -> u64 {
		self.denied.load(Ordering::Relaxed)
	}

	pub(crate) fn record_accepted(&self) {
		self.accepted.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_denied(&self) {
		self.denied.fetch_add(1, Ordering::Relaxed);
	}
}
