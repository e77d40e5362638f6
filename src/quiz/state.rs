//! Observable quiz state.

// self
use crate::{_prelude::*, quiz::AnsweredQuestion, session::SessionId};

/// Why the quiz stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailureKind {
	/// The first session could not be created.
	Init,
	/// A restart could not create a new session.
	Restart,
	/// The batch could not be fetched or carried an unusable response code.
	Load,
	/// The batch succeeded but held no questions.
	NoQuestions,
	/// The session token had served every question; it has been reset.
	TokenExhausted,
	/// The relay's rate gate refused the fetch.
	RateLimited,
}
impl FailureKind {
	/// Message shown to the player.
	pub const fn message(self) -> &'static str {
		match self {
			Self::Init => "Failed to initialize quiz. Please try again.",
			Self::Restart => "Failed to restart quiz. Please try again.",
			Self::Load => "Failed to load questions. Please try again.",
			Self::NoQuestions => "Could not load any questions. Please try again.",
			Self::TokenExhausted => "Need to reset session. Please restart the quiz.",
			Self::RateLimited => "Too many requests. Please wait a moment and try again.",
		}
	}

	/// Whether restarting is expected to help without outside intervention.
	pub const fn is_recoverable(self) -> bool {
		matches!(self, Self::TokenExhausted | Self::RateLimited)
	}
}
impl Display for FailureKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.message())
	}
}

/// Phase of the quiz state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	/// Waiting for a session and a batch.
	Loading,
	/// A question is shown and open for an answer.
	Answering,
	/// An answer was picked; input is locked until the feedback delay passes.
	Feedback,
	/// Every question has been answered.
	Result,
	/// The quiz stopped; see the failure for the message.
	Error(FailureKind),
}
impl Phase {
	/// Stable label suitable for logs and error messages.
	pub const fn label(self) -> &'static str {
		match self {
			Self::Loading => "loading",
			Self::Answering => "answering",
			Self::Feedback => "feedback",
			Self::Result => "result",
			Self::Error(_) => "error",
		}
	}
}

/// Closing remark for a finished quiz.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
	/// Every answer was correct.
	Perfect,
	/// At least half the answers were correct.
	Good,
	/// Fewer than half were correct.
	KeepPracticing,
}
impl Verdict {
	/// Grades `score` out of `total`.
	pub fn grade(score: u32, total: usize) -> Self {
		let score = score as usize;

		if score == total {
			Self::Perfect
		} else if score * 2 >= total {
			Self::Good
		} else {
			Self::KeepPracticing
		}
	}

	/// Message shown to the player.
	pub const fn message(self) -> &'static str {
		match self {
			Self::Perfect => "Perfect score!",
			Self::Good => "Good job!",
			Self::KeepPracticing => "Keep practicing!",
		}
	}
}

/// Snapshot of a quiz.
///
/// While the phase is `Answering` or `Feedback`, `current_index` points into `questions`.
/// `score` never exceeds the number of questions answered so far.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizState {
	/// Questions for the current round.
	pub questions: Vec<AnsweredQuestion>,
	/// Position of the question on screen.
	pub current_index: usize,
	/// Answer picked for the current question, if any.
	pub selected_answer: Option<String>,
	/// Correct answers so far.
	pub score: u32,
	/// State machine phase.
	pub phase: Phase,
	/// Session the current round was loaded with.
	pub session_id: Option<SessionId>,
	pub(crate) round: u64,
}
impl QuizState {
	/// The question on screen, while playing.
	pub fn current_question(&self) -> Option<&AnsweredQuestion> {
		match self.phase {
			Phase::Answering | Phase::Feedback => self.questions.get(self.current_index),
			_ => None,
		}
	}

	/// 1-based position and total, while playing.
	pub fn progress(&self) -> Option<(usize, usize)> {
		self.current_question().map(|_| (self.current_index + 1, self.questions.len()))
	}

	/// Closing remark, once the quiz is over.
	pub fn verdict(&self) -> Option<Verdict> {
		matches!(self.phase, Phase::Result).then(|| Verdict::grade(self.score, self.questions.len()))
	}

	/// Whether the selected answer (if any) is correct.
	pub fn selection_correct(&self) -> Option<bool> {
		let question = self.current_question()?;

		self.selected_answer.as_deref().map(|answer| question.is_correct(answer))
	}

	pub(crate) fn set_phase(&mut self, phase: Phase) {
		obs_transition(self.phase, phase);

		self.phase = phase;
	}

	pub(crate) fn begin(&mut self, questions: Vec<AnsweredQuestion>) {
		self.questions = questions;
		self.current_index = 0;
		self.selected_answer = None;
		self.score = 0;
		self.set_phase(Phase::Answering);
	}

	pub(crate) fn fail(&mut self, kind: FailureKind) {
		self.questions.clear();
		self.current_index = 0;
		self.selected_answer = None;
		self.score = 0;
		self.set_phase(Phase::Error(kind));
	}

	/// Clears play data and bumps the round so stale timers cannot touch the new round.
	pub(crate) fn reset_for_restart(&mut self) {
		self.questions.clear();
		self.current_index = 0;
		self.selected_answer = None;
		self.score = 0;
		self.session_id = None;
		self.round += 1;
		self.set_phase(Phase::Loading);
	}

	/// Feedback → Answering (next question) or Result; no-op in any other phase or round.
	pub(crate) fn advance(&mut self, round: u64, index: usize) {
		if self.phase != Phase::Feedback || self.round != round || self.current_index != index {
			return;
		}

		if self.current_index + 1 < self.questions.len() {
			self.current_index += 1;
			self.selected_answer = None;
			self.set_phase(Phase::Answering);
		} else {
			self.set_phase(Phase::Result);
		}
	}
}
impl Default for QuizState {
	fn default() -> Self {
		Self {
			questions: Vec::new(),
			current_index: 0,
			selected_answer: None,
			score: 0,
			phase: Phase::Loading,
			session_id: None,
			round: 0,
		}
	}
}

fn obs_transition(from: Phase, to: Phase) {
	crate::obs::trace_quiz_transition(from.label(), to.label());
}
