// self
use crate::{
	_prelude::*,
	obs::OpKind,
	session::{SessionId, UpstreamToken},
};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedOp<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOp<F> = F;

/// A span builder used by relay operations.
#[derive(Clone, Debug)]
pub struct OpSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OpSpan {
	/// Creates a new span tagged with the provided operation + stage.
	pub fn new(kind: OpKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("trivia_relay.op", op = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOp<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a debug event for a quiz phase change.
pub fn trace_quiz_transition(from: &'static str, to: &'static str) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(target: "trivia_relay.quiz", from, to, "quiz phase changed");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (from, to);
	}
}

/// Emits a debug event when a session is bound to a token. Only the token fingerprint is
/// logged.
pub fn trace_token_stored(kind: OpKind, session_id: &SessionId, token: &UpstreamToken) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(
			target: "trivia_relay.relay",
			op = kind.as_str(),
			session_id = %session_id,
			token = %token.fingerprint(),
			"session token stored"
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, session_id, token);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn transition_trace_is_callable_without_subscriber() {
		trace_quiz_transition("answering", "feedback");
	}

	#[test]
	fn token_trace_is_callable_without_subscriber() {
		let session_id = SessionId::new("traced").expect("Session fixture should be valid.");

		trace_token_stored(OpKind::IssueToken, &session_id, &UpstreamToken::new("secret"));
	}

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = OpSpan::new(OpKind::FetchQuestions, "instrument_wraps_future");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
