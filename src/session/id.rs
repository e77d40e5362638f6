//! Opaque relay session identifiers.

// std
use std::{borrow::Borrow, ops::Deref};
// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
// self
use crate::_prelude::*;

const IDENTIFIER_MAX_LEN: usize = 128;
const GENERATED_ID_BYTES: usize = 16;

/// Error returned when session identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("Session identifier cannot be empty.")]
	Empty,
	/// The identifier contains whitespace characters.
	#[error("Session identifier contains whitespace.")]
	ContainsWhitespace,
	/// The identifier exceeded the allowed character count.
	#[error("Session identifier exceeds {max} characters.")]
	TooLong {
		/// Maximum permitted character count.
		max: usize,
	},
}

/// Opaque identifier the relay hands to clients in place of the upstream token.
///
/// Generated identifiers carry 128 random bits, encoded as unpadded URL-safe base64. No
/// uniqueness check is performed on insert; the identifier space makes collisions negligible.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionId(String);
impl SessionId {
	/// Creates an identifier from caller-supplied text after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
		let view = value.as_ref();

		validate_view(view)?;

		Ok(Self(view.to_owned()))
	}

	/// Generates a fresh random identifier.
	pub fn generate() -> Self {
		let bytes: [u8; GENERATED_ID_BYTES] = rand::random();

		Self(URL_SAFE_NO_PAD.encode(bytes))
	}
}
impl Deref for SessionId {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for SessionId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl From<SessionId> for String {
	fn from(value: SessionId) -> Self {
		value.0
	}
}
impl TryFrom<String> for SessionId {
	type Error = IdentifierError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate_view(&value)?;

		Ok(Self(value))
	}
}
impl Borrow<str> for SessionId {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl Debug for SessionId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Session({})", self.0)
	}
}
impl Display for SessionId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl FromStr for SessionId {
	type Err = IdentifierError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}

fn validate_view(view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty);
	}
	if view.chars().any(char::is_whitespace) {
		return Err(IdentifierError::ContainsWhitespace);
	}
	if view.len() > IDENTIFIER_MAX_LEN {
		return Err(IdentifierError::TooLong { max: IDENTIFIER_MAX_LEN });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// std
	use std::collections::HashSet;
	// self
	use super::*;

	#[test]
	fn identifiers_validate() {
		assert!(SessionId::new(" session").is_err(), "Leading whitespace must be rejected.");
		assert!(SessionId::new("").is_err());
		assert!(SessionId::new("a".repeat(IDENTIFIER_MAX_LEN + 1)).is_err());

		let id = SessionId::new("session-123").expect("Session fixture should be valid.");

		assert_eq!(id.as_ref(), "session-123");
	}

	#[test]
	fn generated_identifiers_are_url_safe_and_distinct() {
		let ids: HashSet<SessionId> = (0..256).map(|_| SessionId::generate()).collect();

		assert_eq!(ids.len(), 256);

		for id in &ids {
			assert_eq!(id.len(), 22, "16 bytes encode to 22 unpadded base64 characters.");
			assert!(id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
		}
	}

	#[test]
	fn serde_round_trip_enforces_validation() {
		let id: SessionId =
			serde_json::from_str("\"abc\"").expect("Session identifier should deserialize.");

		assert_eq!(id.as_ref(), "abc");
		assert!(serde_json::from_str::<SessionId>("\"with space\"").is_err());
	}
}
