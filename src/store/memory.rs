//! Thread-safe in-memory [`SessionStore`] implementation.

// self
use crate::{
	_prelude::*,
	session::{SessionId, UpstreamToken},
	store::{SessionStore, StoreFuture},
};

type StoreMap = Arc<RwLock<HashMap<SessionId, UpstreamToken>>>;

/// Process-lifetime store that keeps session tokens in a shared map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreMap);
impl MemoryStore {
	/// Number of sessions currently stored.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns true when no session has been stored yet.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}

	fn put_now(map: StoreMap, session_id: SessionId, token: UpstreamToken) {
		map.write().insert(session_id, token);
	}

	fn get_now(map: StoreMap, session_id: &str) -> Option<UpstreamToken> {
		map.read().get(session_id).cloned()
	}
}
impl SessionStore for MemoryStore {
	fn put(&self, session_id: SessionId, token: UpstreamToken) -> StoreFuture<'_, ()> {
		let map = self.0.clone();

		Box::pin(async move {
			Self::put_now(map, session_id, token);

			Ok(())
		})
	}

	fn get<'a>(&'a self, session_id: &'a SessionId) -> StoreFuture<'a, Option<UpstreamToken>> {
		let map = self.0.clone();

		Box::pin(async move { Ok(Self::get_now(map, session_id)) })
	}
}
