//! Storage contract and the built-in in-memory store for session tokens.

pub mod memory;

pub use memory::MemoryStore;

// self
use crate::{
	_prelude::*,
	session::{SessionId, UpstreamToken},
};

/// Boxed future returned by [`SessionStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Mapping from relay session identifiers to question-bank tokens.
///
/// Writes are last-write-wins per key. There is no eviction or expiry; entries live as long as
/// the store does.
pub trait SessionStore
where
	Self: Send + Sync,
{
	/// Inserts or overwrites the token stored under `session_id`.
	fn put(&self, session_id: SessionId, token: UpstreamToken) -> StoreFuture<'_, ()>;

	/// Fetches the token stored under `session_id`, if any.
	fn get<'a>(&'a self, session_id: &'a SessionId) -> StoreFuture<'a, Option<UpstreamToken>>;
}

/// Error type produced by [`SessionStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

#[cfg(test)]
mod tests {
	// std
	use std::error::Error as StdError;
	// self
	use super::*;

	#[test]
	fn store_error_converts_into_relay_error_with_source() {
		let store_error = StoreError::Backend { message: "map poisoned".into() };
		let relay_error: Error = store_error.clone().into();

		assert!(matches!(relay_error, Error::Storage(_)));
		assert!(relay_error.to_string().contains("map poisoned"));
		assert_eq!(relay_error.status_code(), 500);

		let source = StdError::source(&relay_error)
			.expect("Relay error should expose the original store error as its source.");

		assert_eq!(source.to_string(), store_error.to_string());
	}
}
