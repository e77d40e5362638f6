//! The quiz driver.
//!
//! The engine runs at most one backend call at a time. Picking an answer schedules the
//! Feedback → next transition on the Tokio runtime; that task only holds a weak reference to the
//! engine state, is aborted when the engine is dropped or restarted, and ignores rounds and
//! questions that are no longer current.

// crates.io
use tokio::{runtime::Handle, task::JoinHandle};
// self
use crate::{
	_prelude::*,
	quiz::{AnsweredQuestion, FailureKind, Phase, QuizBackend, QuizConfig, QuizError, QuizState},
	session::SessionId,
	upstream::{Question, QuestionBatch, QuestionQuery, ResponseCode},
};

/// Outcome of [`QuizEngine::select_answer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
	/// The answer was recorded and is correct.
	Correct,
	/// The answer was recorded and is wrong.
	Incorrect,
	/// An answer was already recorded for this question; nothing changed.
	Ignored,
}

/// Drives one player's quiz against a [`QuizBackend`].
pub struct QuizEngine<B>
where
	B: ?Sized + QuizBackend,
{
	backend: Arc<B>,
	config: QuizConfig,
	state: Arc<Mutex<QuizState>>,
	feedback_task: Mutex<Option<JoinHandle<()>>>,
	op_guard: AsyncMutex<()>,
}
impl<B> QuizEngine<B>
where
	B: ?Sized + QuizBackend,
{
	/// Creates an engine in the `Loading` phase; call [`start`](Self::start) next.
	pub fn new(backend: impl Into<Arc<B>>, config: QuizConfig) -> Self {
		Self {
			backend: backend.into(),
			config,
			state: Default::default(),
			feedback_task: Mutex::new(None),
			op_guard: AsyncMutex::new(()),
		}
	}

	/// Engine configuration.
	pub fn config(&self) -> &QuizConfig {
		&self.config
	}

	/// Snapshot of the current state.
	pub fn state(&self) -> QuizState {
		self.state.lock().clone()
	}

	/// Current phase.
	pub fn phase(&self) -> Phase {
		self.state.lock().phase
	}

	/// Creates a session and loads the first round.
	///
	/// Valid once, from the initial `Loading` phase. Backend failures never surface as `Err`;
	/// they move the engine to `Error` and the returned phase says so.
	pub async fn start(&self) -> Result<Phase, QuizError> {
		let _op = self.op_guard.lock().await;

		{
			let state = self.state.lock();

			if state.phase != Phase::Loading || state.session_id.is_some() {
				return Err(QuizError::InvalidPhase { action: "start", phase: state.phase.label() });
			}
		}

		self.open_session(FailureKind::Init).await;

		Ok(self.phase())
	}

	/// Records `answer` for the current question and schedules the move to the next one.
	///
	/// Only the first pick per question counts; later picks return [`Selection::Ignored`].
	/// Must be called from within a Tokio runtime.
	pub fn select_answer(&self, answer: &str) -> Result<Selection, QuizError> {
		let runtime = Handle::try_current().map_err(|_| QuizError::NoRuntime)?;
		let (selection, round, index) = {
			let mut state = self.state.lock();

			match state.phase {
				Phase::Answering if state.selected_answer.is_none() => {},
				Phase::Answering | Phase::Feedback => return Ok(Selection::Ignored),
				phase =>
					return Err(QuizError::InvalidPhase {
						action: "select an answer",
						phase: phase.label(),
					}),
			}

			let correct = state
				.current_question()
				.map(|question| question.is_correct(answer))
				.unwrap_or(false);

			state.selected_answer = Some(answer.to_owned());

			if correct {
				state.score += 1;
			}

			state.set_phase(Phase::Feedback);

			let selection = if correct { Selection::Correct } else { Selection::Incorrect };

			(selection, state.round, state.current_index)
		};
		let state = Arc::downgrade(&self.state);
		let delay = std::time::Duration::try_from(self.config.feedback_delay).unwrap_or_default();
		let task = runtime.spawn(async move {
			tokio::time::sleep(delay).await;

			if let Some(state) = Weak::upgrade(&state) {
				state.lock().advance(round, index);
			}
		});

		if let Some(previous) = self.feedback_task.lock().replace(task) {
			previous.abort();
		}

		Ok(selection)
	}

	/// Waits for a pending feedback delay, if any, to run its transition.
	pub async fn settle_feedback(&self) {
		let task = self.feedback_task.lock().take();

		if let Some(task) = task {
			let _ = task.await;
		}
	}

	/// Discards the finished or failed round and starts over with a brand-new session.
	///
	/// Valid from `Result` and `Error`.
	pub async fn restart(&self) -> Result<Phase, QuizError> {
		let _op = self.op_guard.lock().await;

		{
			let mut state = self.state.lock();

			match state.phase {
				Phase::Result | Phase::Error(_) => state.reset_for_restart(),
				phase =>
					return Err(QuizError::InvalidPhase { action: "restart", phase: phase.label() }),
			}
		}

		self.cancel_feedback();
		self.open_session(FailureKind::Restart).await;

		Ok(self.phase())
	}

	async fn open_session(&self, failure: FailureKind) {
		let session = match self.backend.create_session().await {
			Ok(session) => session,
			Err(_) => {
				self.state.lock().fail(failure);

				return;
			},
		};

		self.state.lock().session_id = Some(session.session_id.clone());
		self.load(&session.session_id).await;
	}

	async fn load(&self, session_id: &SessionId) {
		let query = QuestionQuery::new(self.config.amount).with_filters(self.config.filters);
		let outcome = self.backend.load_questions(&query, Some(session_id)).await;
		let next = match outcome {
			Ok(QuestionBatch { response_code: ResponseCode::Success, results }) =>
				if results.is_empty() {
					Err(FailureKind::NoQuestions)
				} else {
					Ok(shuffle_all(results))
				},
			Ok(QuestionBatch { response_code: ResponseCode::TokenEmpty, .. }) =>
				match self.backend.reset_session(session_id).await {
					Ok(_) => Err(FailureKind::TokenExhausted),
					Err(_) => Err(FailureKind::Load),
				},
			Ok(_) => Err(FailureKind::Load),
			Err(Error::RateLimited { .. }) => Err(FailureKind::RateLimited),
			Err(_) => Err(FailureKind::Load),
		};
		let mut state = self.state.lock();

		match next {
			Ok(questions) => state.begin(questions),
			Err(kind) => state.fail(kind),
		}
	}

	fn cancel_feedback(&self) {
		if let Some(task) = self.feedback_task.lock().take() {
			task.abort();
		}
	}
}
impl<B> Drop for QuizEngine<B>
where
	B: ?Sized + QuizBackend,
{
	fn drop(&mut self) {
		self.cancel_feedback();
	}
}
impl<B> Debug for QuizEngine<B>
where
	B: ?Sized + QuizBackend,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("QuizEngine")
			.field("config", &self.config)
			.field("phase", &self.phase())
			.finish()
	}
}

fn shuffle_all(questions: Vec<Question>) -> Vec<AnsweredQuestion> {
	let mut rng = rand::rng();

	questions
		.into_iter()
		.map(|question| AnsweredQuestion::shuffled_with(question, &mut rng))
		.collect()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		quiz::BackendFuture,
		session::{Session, UpstreamToken},
	};

	struct FixedBackend;
	impl QuizBackend for FixedBackend {
		fn create_session(&self) -> BackendFuture<'_, Session> {
			Box::pin(async {
				Ok(Session::new(SessionId::generate(), UpstreamToken::new("fixed-token")))
			})
		}

		fn reset_session<'a>(&'a self, session_id: &'a SessionId) -> BackendFuture<'a, Session> {
			Box::pin(async move {
				Ok(Session::new(session_id.clone(), UpstreamToken::new("fixed-token")))
			})
		}

		fn load_questions<'a>(
			&'a self,
			_: &'a QuestionQuery,
			_: Option<&'a SessionId>,
		) -> BackendFuture<'a, QuestionBatch> {
			let results = (0..2)
				.map(|n| Question {
					category: "General".into(),
					kind: "boolean".into(),
					difficulty: "easy".into(),
					prompt: format!("Statement {n}."),
					correct_answer: "True".into(),
					incorrect_answers: vec!["False".into()],
				})
				.collect();

			Box::pin(async move {
				Ok(QuestionBatch { response_code: ResponseCode::Success, results })
			})
		}
	}

	async fn engine_in_feedback() -> QuizEngine<FixedBackend> {
		let engine = QuizEngine::new(FixedBackend, QuizConfig::default());

		engine.start().await.expect("Starting should be allowed.");
		engine.select_answer("True").expect("Selecting should succeed.");

		assert_eq!(engine.phase(), Phase::Feedback);

		engine
	}

	#[tokio::test(start_paused = true)]
	async fn drop_aborts_the_pending_transition() {
		let engine = engine_in_feedback().await;
		let state = engine.state.clone();

		drop(engine);
		tokio::time::sleep(std::time::Duration::from_secs(5)).await;

		let state = state.lock();

		assert_eq!(state.phase, Phase::Feedback);
		assert_eq!(state.current_index, 0);
	}

	#[tokio::test(start_paused = true)]
	async fn timer_does_not_keep_state_alive() {
		let engine = engine_in_feedback().await;
		let task = engine.feedback_task.lock().take().expect("A feedback timer should be pending.");
		let state = Arc::downgrade(&engine.state);

		drop(engine);

		assert!(state.upgrade().is_none());

		tokio::time::sleep(std::time::Duration::from_secs(5)).await;

		task.await.expect("A timer outliving its engine should finish without panicking.");
	}

	#[tokio::test(start_paused = true)]
	async fn restart_supersedes_a_stale_timer() {
		let engine = engine_in_feedback().await;
		let stale_round = engine.state.lock().round;

		engine.settle_feedback().await;
		engine.select_answer("False").expect("Selecting should succeed.");
		engine.settle_feedback().await;

		assert_eq!(engine.phase(), Phase::Result);

		engine.restart().await.expect("Restarting from Result should be allowed.");
		engine.select_answer("True").expect("Selecting should succeed.");

		let mut state = engine.state.lock();

		state.advance(stale_round, 0);

		assert_eq!(state.phase, Phase::Feedback);
		assert_eq!(state.round, stale_round + 1);
	}
}
