//! Session token issuance and reset.
//!
//! A reset that the question bank answers with "token not found" means the token expired on
//! the upstream side. The relay then requests a brand-new token and stores it under the same
//! session identifier, so the client never notices.

// self
use crate::{
	_prelude::*,
	error::UpstreamError,
	http::UpstreamHttpClient,
	obs::{self, OpKind, OpOutcome, OpSpan},
	relay::Relay,
	session::{Session, SessionId, UpstreamToken},
	store::SessionStore,
	upstream::{ResponseCode, TokenGrant, TokenReset},
};

const TOKEN_ENDPOINT: &str = "token";

impl<C> Relay<C>
where
	C: ?Sized + UpstreamHttpClient,
{
	/// Requests a token from the question bank and stores it under a fresh session identifier.
	pub async fn issue_token(&self) -> Result<Session> {
		const KIND: OpKind = OpKind::IssueToken;

		let span = OpSpan::new(KIND, "issue_token");

		obs::record_op_outcome(KIND, OpOutcome::Attempt);

		let result = span
			.instrument(async move {
				let token = self.request_token().await?;
				let session_id = SessionId::generate();

				<dyn SessionStore>::put(self.store.as_ref(), session_id.clone(), token.clone())
					.await?;
				obs::trace_token_stored(KIND, &session_id, &token);

				Ok(Session::new(session_id, token))
			})
			.await;

		record_result(KIND, &result);

		result
	}

	/// Resets the upstream token for `session_id`, re-issuing one if it expired upstream.
	///
	/// Unknown sessions fail with [`Error::SessionNotFound`] before any upstream call.
	pub async fn reset_token(&self, session_id: &SessionId) -> Result<Session> {
		const KIND: OpKind = OpKind::ResetToken;

		let span = OpSpan::new(KIND, "reset_token");

		obs::record_op_outcome(KIND, OpOutcome::Attempt);

		let result = span
			.instrument(async move {
				let current = <dyn SessionStore>::get(self.store.as_ref(), session_id)
					.await?
					.ok_or_else(|| Error::SessionNotFound { session_id: session_id.clone() })?;
				let response =
					self.http_client.get(self.descriptor.token_reset_url(&current)).await?;
				let reset: TokenReset = response.json(TOKEN_ENDPOINT)?;

				if reset.response_code != ResponseCode::TokenNotFound {
					return Ok(Session::new(session_id.clone(), current));
				}

				let replacement = self.request_token().await?;

				<dyn SessionStore>::put(
					self.store.as_ref(),
					session_id.clone(),
					replacement.clone(),
				)
				.await?;
				obs::trace_token_stored(KIND, session_id, &replacement);

				Ok(Session::new(session_id.clone(), replacement))
			})
			.await;

		record_result(KIND, &result);

		result
	}

	async fn request_token(&self) -> Result<UpstreamToken> {
		let response = self.http_client.get(self.descriptor.token_request_url()).await?;
		let grant: TokenGrant = response.json(TOKEN_ENDPOINT)?;

		if let Some(code) = grant.response_code.filter(|code| !code.is_success()) {
			return Err(UpstreamError::Rejected { endpoint: TOKEN_ENDPOINT, code }.into());
		}

		match grant.token {
			Some(token) if !token.is_empty() => Ok(UpstreamToken::new(token)),
			_ => Err(UpstreamError::MissingToken.into()),
		}
	}
}

fn record_result<T>(kind: OpKind, result: &Result<T>) {
	match result {
		Ok(_) => obs::record_op_outcome(kind, OpOutcome::Success),
		Err(_) => obs::record_op_outcome(kind, OpOutcome::Failure),
	}
}
