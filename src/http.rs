//! Transport primitives for question-bank calls.
//!
//! The relay only ever issues `GET` requests and reads back a status plus a JSON body, so the
//! transport contract is a single method. [`UpstreamHttpClient`] is the relay's only dependency
//! on an HTTP stack; tests substitute scripted implementations, production uses
//! [`ReqwestHttpClient`].

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	error::{TransportError, UpstreamError},
};

/// Boxed future returned by [`UpstreamHttpClient::get`].
pub type HttpFuture<'a> =
	Pin<Box<dyn Future<Output = Result<UpstreamResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports able to reach the question bank.
///
/// Implementations must be `Send + Sync + 'static` so one transport can be shared by every
/// clone of a relay. A returned response means the exchange completed; interpreting the status
/// is the relay's job.
pub trait UpstreamHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Issues a `GET` for `url` and returns the raw response.
	fn get(&self, url: Url) -> HttpFuture<'_>;
}

/// Status and body of a completed upstream exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpstreamResponse {
	/// HTTP status code.
	pub status: u16,
	/// Raw response body.
	pub body: Vec<u8>,
}
impl UpstreamResponse {
	/// Creates a response from parts.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, body: body.into() }
	}

	/// Returns true for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Rejects non-2xx statuses, then decodes the body as JSON.
	pub fn json<T>(&self, endpoint: &'static str) -> Result<T, UpstreamError>
	where
		T: DeserializeOwned,
	{
		if !self.is_success() {
			return Err(UpstreamError::Status { endpoint, status: self.status });
		}

		let mut de = serde_json::Deserializer::from_slice(&self.body);

		serde_path_to_error::deserialize(&mut de)
			.map_err(|source| UpstreamError::Parse { endpoint, source })
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl UpstreamHttpClient for ReqwestHttpClient {
	fn get(&self, url: Url) -> HttpFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let response = client.get(url).send().await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok(UpstreamResponse { status, body })
		})
	}
}
