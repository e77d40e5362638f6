//! Relay-level error types shared across the gate, store, upstream transport, and quiz engine.

// self
use crate::{_prelude::*, session::SessionId, upstream::ResponseCode};

/// Relay-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical relay error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// The question bank answered, but not with something the relay can use.
	#[error(transparent)]
	Upstream(#[from] UpstreamError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// The global rate gate refused the fetch; no upstream call was made.
	#[error("Rate limit exceeded; retry in {retry_in}.")]
	RateLimited {
		/// Time remaining until the gate reopens.
		retry_in: Duration,
	},
	/// No upstream token is stored for the session.
	#[error("Session `{session_id}` was not found.")]
	SessionNotFound {
		/// Session identifier supplied by the caller.
		session_id: SessionId,
	},
}
impl Error {
	/// HTTP-equivalent status for the relay boundary.
	pub fn status_code(&self) -> u16 {
		match self {
			Self::RateLimited { .. } => 429,
			Self::SessionNotFound { .. } => 404,
			Self::Config(_) => 400,
			Self::Storage(_) | Self::Upstream(_) | Self::Transport(_) => 500,
		}
	}

	/// Whether a caller may reasonably retry the same request later.
	///
	/// The relay itself never retries.
	pub fn is_retryable(&self) -> bool {
		matches!(self, Self::RateLimited { .. } | Self::Transport(_))
	}
}

/// Configuration failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Upstream endpoint configuration is invalid.
	#[error(transparent)]
	Descriptor(#[from] crate::upstream::UpstreamDescriptorError),
}
impl From<crate::upstream::UpstreamDescriptorError> for Error {
	fn from(e: crate::upstream::UpstreamDescriptorError) -> Self {
		Self::Config(e.into())
	}
}

/// Question-bank failures other than the transport itself.
#[derive(Debug, ThisError)]
pub enum UpstreamError {
	/// The question bank replied with a non-2xx status.
	#[error("The {endpoint} endpoint returned HTTP {status}.")]
	Status {
		/// Endpoint label (`questions` or `token`).
		endpoint: &'static str,
		/// HTTP status code.
		status: u16,
	},
	/// The question bank replied with JSON the relay could not parse.
	#[error("The {endpoint} endpoint returned malformed JSON.")]
	Parse {
		/// Endpoint label (`questions` or `token`).
		endpoint: &'static str,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// A token command answered with a non-success response code.
	#[error("The {endpoint} endpoint rejected the request with code {code}.")]
	Rejected {
		/// Endpoint label.
		endpoint: &'static str,
		/// Response code reported by the question bank.
		code: ResponseCode,
	},
	/// A token request succeeded but carried no token.
	#[error("The token endpoint did not return a token.")]
	MissingToken,
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the question bank.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the question bank.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn boundary_status_codes_follow_the_taxonomy() {
		let limited = Error::RateLimited { retry_in: Duration::seconds(3) };
		let missing = Error::SessionNotFound {
			session_id: SessionId::new("abc").expect("Session fixture should be valid."),
		};
		let upstream: Error = UpstreamError::Status { endpoint: "questions", status: 503 }.into();

		assert_eq!(limited.status_code(), 429);
		assert_eq!(missing.status_code(), 404);
		assert_eq!(upstream.status_code(), 500);
		assert!(limited.is_retryable());
		assert!(!missing.is_retryable());
		assert!(!upstream.is_retryable());
	}

	#[test]
	fn session_not_found_names_the_session() {
		let err = Error::SessionNotFound {
			session_id: SessionId::new("lost-session").expect("Session fixture should be valid."),
		};

		assert_eq!(err.to_string(), "Session `lost-session` was not found.");
	}
}
