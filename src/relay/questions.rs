//! Rate-gated question fetches.

// self
use crate::{
	_prelude::*,
	gate::GateDecision,
	http::UpstreamHttpClient,
	obs::{self, OpKind, OpOutcome, OpSpan},
	relay::Relay,
	session::SessionId,
	store::SessionStore,
	upstream::{QuestionBatch, QuestionQuery},
};

impl<C> Relay<C>
where
	C: ?Sized + UpstreamHttpClient,
{
	/// Fetches a question batch, consuming a slot on the global rate gate.
	///
	/// A denied gate fails with [`Error::RateLimited`] and makes no upstream call. An accepted
	/// slot stays consumed even if the fetch then fails. A missing or unknown session simply
	/// means the fetch goes out without a token. The batch, response code included, is
	/// returned as the question bank sent it.
	pub async fn fetch_questions(
		&self,
		query: &QuestionQuery,
		session_id: Option<&SessionId>,
	) -> Result<QuestionBatch> {
		const KIND: OpKind = OpKind::FetchQuestions;

		let span = OpSpan::new(KIND, "fetch_questions");

		obs::record_op_outcome(KIND, OpOutcome::Attempt);

		if let GateDecision::Deny(directive) = self.gate().try_acquire(self.clock.now()) {
			obs::record_op_outcome(KIND, OpOutcome::Denied);

			return Err(Error::RateLimited { retry_in: directive.retry_in });
		}

		let result = span
			.instrument(async move {
				let token = match session_id {
					Some(id) => <dyn SessionStore>::get(self.store.as_ref(), id).await?,
					None => None,
				};
				let url = self.descriptor.questions_url(query, token.as_ref());
				let response = self.http_client.get(url).await?;

				Ok(response.json::<QuestionBatch>("questions")?)
			})
			.await;

		match &result {
			Ok(_) => obs::record_op_outcome(KIND, OpOutcome::Success),
			Err(_) => obs::record_op_outcome(KIND, OpOutcome::Failure),
		}

		result
	}
}
