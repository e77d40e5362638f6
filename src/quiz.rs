//! Client-side quiz state machine.
//!
//! [`QuizEngine`] turns a raw question batch from a [`QuizBackend`] into a one-question-at-a-time
//! game: `Loading → Answering → Feedback → (Answering | Result)`, with a terminal `Error` phase
//! and a `restart` that goes back through `Loading` with a brand-new session.

pub mod backend;
pub mod display;
pub mod engine;
pub mod question;
pub mod state;

pub use backend::*;
pub use engine::*;
pub use question::*;
pub use state::*;

// self
use crate::{_prelude::*, upstream::QuestionFilters};

/// Tunables for a [`QuizEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuizConfig {
	/// Questions requested per round.
	pub amount: u32,
	/// How long feedback stays on screen before the engine moves on.
	pub feedback_delay: Duration,
	/// Filters forwarded with every fetch.
	pub filters: QuestionFilters,
}
impl QuizConfig {
	/// Questions requested per round by default.
	pub const DEFAULT_AMOUNT: u32 = 5;
	/// Default feedback delay.
	pub const DEFAULT_FEEDBACK_DELAY: Duration = Duration::milliseconds(1_000);

	/// Overrides the feedback delay.
	pub fn with_feedback_delay(mut self, delay: Duration) -> Self {
		self.feedback_delay = delay;

		self
	}

	/// Overrides the filters.
	pub fn with_filters(mut self, filters: QuestionFilters) -> Self {
		self.filters = filters;

		self
	}
}
impl Default for QuizConfig {
	fn default() -> Self {
		Self {
			amount: Self::DEFAULT_AMOUNT,
			feedback_delay: Self::DEFAULT_FEEDBACK_DELAY,
			filters: QuestionFilters::default(),
		}
	}
}

/// Misuse of the engine API.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum QuizError {
	/// The action is not valid in the current phase.
	#[error("Cannot {action} while the quiz is {phase}.")]
	InvalidPhase {
		/// Attempted action.
		action: &'static str,
		/// Phase label at the time of the attempt.
		phase: &'static str,
	},
	/// Scheduling the feedback timer requires a Tokio runtime.
	#[error("No Tokio runtime is available to schedule the feedback timer.")]
	NoRuntime,
}
