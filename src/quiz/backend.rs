//! The engine's only path to questions and sessions.

// self
use crate::{
	_prelude::*,
	http::UpstreamHttpClient,
	relay::Relay,
	session::{Session, SessionId},
	upstream::{QuestionBatch, QuestionQuery},
};

/// Boxed future returned by [`QuizBackend`] operations.
pub type BackendFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Relay boundary as seen by a quiz client.
///
/// Mirrors the relay's three endpoints: create a session, reset a session, and fetch a batch.
/// [`Relay`] implements it in-process; remote clients can implement it over HTTP.
pub trait QuizBackend
where
	Self: Send + Sync,
{
	/// Issues a new session (`POST session`).
	fn create_session(&self) -> BackendFuture<'_, Session>;

	/// Resets a session's token (`PUT session/reset`).
	fn reset_session<'a>(&'a self, session_id: &'a SessionId) -> BackendFuture<'a, Session>;

	/// Fetches a question batch (`GET questions`).
	fn load_questions<'a>(
		&'a self,
		query: &'a QuestionQuery,
		session_id: Option<&'a SessionId>,
	) -> BackendFuture<'a, QuestionBatch>;
}

impl<C> QuizBackend for Relay<C>
where
	C: ?Sized + UpstreamHttpClient,
{
	fn create_session(&self) -> BackendFuture<'_, Session> {
		Box::pin(self.issue_token())
	}

	fn reset_session<'a>(&'a self, session_id: &'a SessionId) -> BackendFuture<'a, Session> {
		Box::pin(self.reset_token(session_id))
	}

	fn load_questions<'a>(
		&'a self,
		query: &'a QuestionQuery,
		session_id: Option<&'a SessionId>,
	) -> BackendFuture<'a, QuestionBatch> {
		Box::pin(self.fetch_questions(query, session_id))
	}
}
