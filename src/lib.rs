//! Trivia relay with a session-token lifecycle, a global upstream rate gate, and a shuffled,
//! scored quiz state machine on top of a third-party question bank.

#![deny(clippy::all, missing_docs)]
#![cfg_attr(not(test), deny(unused_crate_dependencies))]

pub mod error;
pub mod gate;
pub mod http;
pub mod obs;
pub mod quiz;
pub mod relay;
pub mod session;
pub mod store;
pub mod upstream;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// std
	use std::{
		collections::VecDeque,
		io,
		sync::atomic::{AtomicI64, Ordering},
	};
	// self
	use crate::{
		error::TransportError,
		gate::Clock,
		http::{HttpFuture, ReqwestHttpClient, UpstreamHttpClient, UpstreamResponse},
		relay::{Relay, RelayConfig},
		store::{MemoryStore, SessionStore},
		upstream::UpstreamDescriptor,
	};

	/// Relay type alias used by reqwest-backed integration tests.
	pub type ReqwestTestRelay = Relay<ReqwestHttpClient>;

	/// Clock that only moves when a test tells it to.
	///
	/// Time is tracked in whole milliseconds since the Unix epoch so tests can reason about
	/// gate intervals with plain integers.
	#[derive(Debug, Default)]
	pub struct ManualClock(AtomicI64);
	impl ManualClock {
		/// Creates a clock frozen at `millis` since the Unix epoch.
		pub fn at_millis(millis: i64) -> Self {
			Self(AtomicI64::new(millis))
		}

		/// Moves the clock forward by `millis`.
		pub fn advance_millis(&self, millis: i64) {
			self.0.fetch_add(millis, Ordering::SeqCst);
		}

		/// Current reading in milliseconds since the Unix epoch.
		pub fn millis(&self) -> i64 {
			self.0.load(Ordering::SeqCst)
		}
	}
	impl Clock for ManualClock {
		fn now(&self) -> OffsetDateTime {
			OffsetDateTime::UNIX_EPOCH + Duration::milliseconds(self.millis())
		}
	}

	/// Transport that replays queued responses and records every requested URL.
	#[derive(Debug, Default)]
	pub struct ScriptedHttpClient {
		responses: Mutex<VecDeque<Result<UpstreamResponse, String>>>,
		requests: Mutex<Vec<Url>>,
	}
	impl ScriptedHttpClient {
		/// Queues a response with `status` and `body`.
		pub fn respond(&self, status: u16, body: &str) -> &Self {
			self.responses.lock().push_back(Ok(UpstreamResponse::new(status, body)));

			self
		}

		/// Queues a transport failure.
		pub fn fail(&self, message: &str) -> &Self {
			self.responses.lock().push_back(Err(message.to_owned()));

			self
		}

		/// Every URL requested so far, in order.
		pub fn requests(&self) -> Vec<Url> {
			self.requests.lock().clone()
		}
	}
	impl UpstreamHttpClient for ScriptedHttpClient {
		fn get(&self, url: Url) -> HttpFuture<'_> {
			self.requests.lock().push(url);

			let next = self.responses.lock().pop_front();

			Box::pin(async move {
				match next {
					Some(Ok(response)) => Ok(response),
					Some(Err(message)) => Err(TransportError::Io(io::Error::other(message))),
					None => Err(TransportError::Io(io::Error::other("No scripted response left."))),
				}
			})
		}
	}

	/// Constructs a [`Relay`] over a [`ScriptedHttpClient`], returning the transport and store
	/// handles alongside it.
	pub fn build_scripted_relay(
		clock: Arc<ManualClock>,
	) -> (Relay<ScriptedHttpClient>, Arc<ScriptedHttpClient>, Arc<MemoryStore>) {
		let descriptor =
			UpstreamDescriptor::builder().build().expect("Default upstream descriptor should build.");
		let http_client = Arc::new(ScriptedHttpClient::default());
		let store_backend = Arc::new(MemoryStore::default());
		let store: Arc<dyn SessionStore> = store_backend.clone();
		let relay =
			Relay::with_http_client(store, descriptor, RelayConfig::default(), http_client.clone())
				.with_clock(clock);

		(relay, http_client, store_backend)
	}

	/// Builds a reqwest HTTP client that accepts the self-signed certificates `httpmock`
	/// serves over https.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Constructs a [`Relay`] pointed at `base_url` (usually an `httpmock` server), backed by an
	/// in-memory store and driven by the provided clock.
	pub fn build_reqwest_test_relay(
		base_url: &str,
		clock: Arc<ManualClock>,
	) -> (ReqwestTestRelay, Arc<MemoryStore>) {
		let base_url = Url::parse(base_url).expect("Mock upstream base URL should parse.");
		let store_backend = Arc::new(MemoryStore::default());
		let store: Arc<dyn SessionStore> = store_backend.clone();
		let relay = Relay::at_base_url(
			store,
			base_url,
			RelayConfig::default(),
			test_reqwest_http_client(),
		)
		.expect("Mock upstream base URL should be accepted.")
		.with_clock(clock);

		(relay, store_backend)
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::{Arc, Weak},
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
