//! Relay between quiz clients and the question bank.
//!
//! The relay owns the session store, the global [`RateGate`], and the clock that feeds it, so
//! every piece of process-wide mutable state lives on one instance instead of in globals.
//! Clones share all of it. Each upstream call is attempted exactly once; retry decisions belong
//! to the caller.

mod questions;
mod token;

// self
use crate::{
	_prelude::*,
	gate::{Clock, MIN_INTERVAL, RateGate, SystemClock},
	http::UpstreamHttpClient,
	store::SessionStore,
	upstream::UpstreamDescriptor,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Relay specialized for the crate's default reqwest transport.
pub type ReqwestRelay = Relay<ReqwestHttpClient>;

/// Tunables for a [`Relay`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RelayConfig {
	/// Minimum spacing between accepted question fetches.
	pub min_interval: Duration,
}
impl Default for RelayConfig {
	fn default() -> Self {
		Self { min_interval: MIN_INTERVAL }
	}
}

/// Mediates token issuance, token reset, and question fetches against one question bank.
pub struct Relay<C>
where
	C: ?Sized + UpstreamHttpClient,
{
	/// HTTP client used for every upstream request.
	pub http_client: Arc<C>,
	/// Session-to-token mapping.
	pub store: Arc<dyn SessionStore>,
	/// Question-bank endpoints.
	pub descriptor: UpstreamDescriptor,
	/// Time source for the rate gate.
	pub clock: Arc<dyn Clock>,
	gate: Arc<RateGate>,
}
impl<C> Relay<C>
where
	C: ?Sized + UpstreamHttpClient,
{
	/// Creates a relay that reuses the caller-provided transport.
	pub fn with_http_client(
		store: Arc<dyn SessionStore>,
		descriptor: UpstreamDescriptor,
		config: RelayConfig,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			store,
			descriptor,
			clock: Arc::new(SystemClock),
			gate: Arc::new(RateGate::new(config.min_interval)),
		}
	}

	/// Creates a relay for a question bank served from `base_url` with the default endpoint
	/// paths.
	///
	/// A base URL the descriptor rejects fails with [`Error::Config`].
	pub fn at_base_url(
		store: Arc<dyn SessionStore>,
		base_url: Url,
		config: RelayConfig,
		http_client: impl Into<Arc<C>>,
	) -> Result<Self> {
		let descriptor = UpstreamDescriptor::builder().base_url(base_url).build()?;

		Ok(Self::with_http_client(store, descriptor, config, http_client))
	}

	/// Replaces the clock feeding the rate gate.
	pub fn with_clock<K>(mut self, clock: Arc<K>) -> Self
	where
		K: 'static + Clock,
	{
		self.clock = clock;

		self
	}

	/// The shared gate guarding question fetches.
	pub fn gate(&self) -> &RateGate {
		&self.gate
	}
}
#[cfg(feature = "reqwest")]
impl Relay<ReqwestHttpClient> {
	/// Creates a relay that provisions its own reqwest-backed transport.
	pub fn new(
		store: Arc<dyn SessionStore>,
		descriptor: UpstreamDescriptor,
		config: RelayConfig,
	) -> Self {
		Self::with_http_client(store, descriptor, config, ReqwestHttpClient::default())
	}
}
impl<C> Clone for Relay<C>
where
	C: ?Sized + UpstreamHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			store: self.store.clone(),
			descriptor: self.descriptor.clone(),
			clock: self.clock.clone(),
			gate: self.gate.clone(),
		}
	}
}
impl<C> Debug for Relay<C>
where
	C: ?Sized + UpstreamHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Relay")
			.field("descriptor", &self.descriptor)
			.field("gate", &self.gate)
			.finish()
	}
}
