//! Endpoint configuration for the question bank.

// self
use crate::{_prelude::*, session::UpstreamToken, upstream::QuestionQuery};

/// Public question bank the relay talks to by default.
pub const DEFAULT_BASE_URL: &str = "https://opentdb.com/";
/// Default path of the questions endpoint.
pub const DEFAULT_QUESTIONS_PATH: &str = "api.php";
/// Default path of the token endpoint.
pub const DEFAULT_TOKEN_PATH: &str = "api_token.php";

/// Errors raised while building an [`UpstreamDescriptor`].
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum UpstreamDescriptorError {
	/// Only HTTP(S) upstreams are supported.
	#[error("The base URL must use http or https: {url}.")]
	UnsupportedScheme {
		/// Base URL that failed validation.
		url: String,
	},
	/// The base URL cannot have paths joined onto it.
	#[error("The base URL cannot be used as a base: {url}.")]
	NotABase {
		/// Base URL that failed validation.
		url: String,
	},
	/// An endpoint path could not be joined onto the base URL.
	#[error("The {endpoint} path `{path}` is invalid.")]
	InvalidPath {
		/// Which endpoint failed.
		endpoint: &'static str,
		/// Path that failed to join.
		path: String,
	},
}

/// Resolved question-bank endpoints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpstreamDescriptor {
	/// Questions endpoint.
	pub questions: Url,
	/// Token endpoint (request and reset commands).
	pub token: Url,
}
impl UpstreamDescriptor {
	/// Creates a builder seeded with the public question bank's defaults.
	pub fn builder() -> UpstreamDescriptorBuilder {
		UpstreamDescriptorBuilder::default()
	}

	/// URL for a question fetch, with the token appended when present.
	pub fn questions_url(&self, query: &QuestionQuery, token: Option<&UpstreamToken>) -> Url {
		let mut url = self.questions.clone();

		{
			let mut pairs = url.query_pairs_mut();

			for (key, value) in query.pairs() {
				pairs.append_pair(key, &value);
			}
			if let Some(token) = token {
				pairs.append_pair("token", token.expose());
			}
		}

		url
	}

	/// URL that asks the question bank for a new session token.
	pub fn token_request_url(&self) -> Url {
		let mut url = self.token.clone();

		url.query_pairs_mut().append_pair("command", "request");

		url
	}

	/// URL that asks the question bank to reset `token`.
	pub fn token_reset_url(&self, token: &UpstreamToken) -> Url {
		let mut url = self.token.clone();

		url.query_pairs_mut().append_pair("command", "reset").append_pair("token", token.expose());

		url
	}
}

/// Builder for [`UpstreamDescriptor`] values.
#[derive(Clone, Debug)]
pub struct UpstreamDescriptorBuilder {
	/// Base URL the endpoint paths are joined onto.
	pub base_url: Option<Url>,
	/// Questions endpoint path.
	pub questions_path: String,
	/// Token endpoint path.
	pub token_path: String,
}
impl UpstreamDescriptorBuilder {
	/// Overrides the base URL (defaults to [`DEFAULT_BASE_URL`]).
	pub fn base_url(mut self, url: Url) -> Self {
		self.base_url = Some(url);

		self
	}

	/// Overrides the questions endpoint path.
	pub fn questions_path(mut self, path: impl Into<String>) -> Self {
		self.questions_path = path.into();

		self
	}

	/// Overrides the token endpoint path.
	pub fn token_path(mut self, path: impl Into<String>) -> Self {
		self.token_path = path.into();

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<UpstreamDescriptor, UpstreamDescriptorError> {
		let mut base = match self.base_url {
			Some(url) => url,
			None => Url::parse(DEFAULT_BASE_URL)
				.map_err(|_| UpstreamDescriptorError::NotABase { url: DEFAULT_BASE_URL.into() })?,
		};

		if !matches!(base.scheme(), "http" | "https") {
			return Err(UpstreamDescriptorError::UnsupportedScheme { url: base.to_string() });
		}
		if base.cannot_be_a_base() {
			return Err(UpstreamDescriptorError::NotABase { url: base.to_string() });
		}
		// Without a trailing slash `join` would replace the last path segment.
		if !base.path().ends_with('/') {
			let path = format!("{}/", base.path());

			base.set_path(&path);
		}

		let questions = join(&base, "questions", &self.questions_path)?;
		let token = join(&base, "token", &self.token_path)?;

		Ok(UpstreamDescriptor { questions, token })
	}
}
impl Default for UpstreamDescriptorBuilder {
	fn default() -> Self {
		Self {
			base_url: None,
			questions_path: DEFAULT_QUESTIONS_PATH.into(),
			token_path: DEFAULT_TOKEN_PATH.into(),
		}
	}
}

fn join(base: &Url, endpoint: &'static str, path: &str) -> Result<Url, UpstreamDescriptorError> {
	base.join(path.trim_start_matches('/'))
		.map_err(|_| UpstreamDescriptorError::InvalidPath { endpoint, path: path.into() })
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::upstream::{Difficulty, QuestionKind};

	#[test]
	fn defaults_point_at_the_public_question_bank() {
		let descriptor =
			UpstreamDescriptor::builder().build().expect("Default descriptor should build.");

		assert_eq!(descriptor.questions.as_str(), "https://opentdb.com/api.php");
		assert_eq!(descriptor.token.as_str(), "https://opentdb.com/api_token.php");
	}

	#[test]
	fn base_paths_are_preserved() {
		let descriptor = UpstreamDescriptor::builder()
			.base_url(Url::parse("http://127.0.0.1:9000/mock").expect("Mock URL should parse."))
			.questions_path("/questions")
			.token_path("token")
			.build()
			.expect("Descriptor with a nested base should build.");

		assert_eq!(descriptor.questions.as_str(), "http://127.0.0.1:9000/mock/questions");
		assert_eq!(descriptor.token.as_str(), "http://127.0.0.1:9000/mock/token");
	}

	#[test]
	fn rejects_non_http_schemes() {
		let err = UpstreamDescriptor::builder()
			.base_url(Url::parse("ftp://example.com/").expect("FTP URL should parse."))
			.build()
			.expect_err("FTP upstreams should be rejected.");

		assert!(matches!(err, UpstreamDescriptorError::UnsupportedScheme { .. }));
	}

	#[test]
	fn builds_query_urls() {
		let descriptor =
			UpstreamDescriptor::builder().build().expect("Default descriptor should build.");
		let token = UpstreamToken::new("abc123");
		let query = QuestionQuery::new(5)
			.with_category(9)
			.with_difficulty(Difficulty::Easy)
			.with_kind(QuestionKind::Multiple);

		assert_eq!(
			descriptor.questions_url(&query, Some(&token)).as_str(),
			"https://opentdb.com/api.php?amount=5&category=9&difficulty=easy&type=multiple&token=abc123"
		);
		assert_eq!(
			descriptor.questions_url(&QuestionQuery::new(5), None).as_str(),
			"https://opentdb.com/api.php?amount=5"
		);
		assert_eq!(
			descriptor.token_request_url().as_str(),
			"https://opentdb.com/api_token.php?command=request"
		);
		assert_eq!(
			descriptor.token_reset_url(&token).as_str(),
			"https://opentdb.com/api_token.php?command=reset&token=abc123"
		);
	}
}
