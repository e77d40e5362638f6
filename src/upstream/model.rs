//! Response shapes returned by the question bank.

// self
use crate::_prelude::*;

/// Status code carried in every question-bank response body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum ResponseCode {
	/// `0`: request served.
	Success,
	/// `1`: not enough questions match the filters.
	NoResults,
	/// `2`: an argument was invalid.
	InvalidParameter,
	/// `3`: the session token does not exist.
	TokenNotFound,
	/// `4`: the token has already served every matching question.
	TokenEmpty,
	/// `5`: the question bank's own rate limit tripped.
	RateLimit,
	/// Any code not listed above.
	Other(i64),
}
impl ResponseCode {
	/// Returns true for [`ResponseCode::Success`].
	pub fn is_success(self) -> bool {
		matches!(self, Self::Success)
	}
}
impl From<i64> for ResponseCode {
	fn from(value: i64) -> Self {
		match value {
			0 => Self::Success,
			1 => Self::NoResults,
			2 => Self::InvalidParameter,
			3 => Self::TokenNotFound,
			4 => Self::TokenEmpty,
			5 => Self::RateLimit,
			other => Self::Other(other),
		}
	}
}
impl From<ResponseCode> for i64 {
	fn from(value: ResponseCode) -> Self {
		match value {
			ResponseCode::Success => 0,
			ResponseCode::NoResults => 1,
			ResponseCode::InvalidParameter => 2,
			ResponseCode::TokenNotFound => 3,
			ResponseCode::TokenEmpty => 4,
			ResponseCode::RateLimit => 5,
			ResponseCode::Other(other) => other,
		}
	}
}
impl Display for ResponseCode {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{}", i64::from(*self))
	}
}

/// One multiple-choice question exactly as the question bank sent it.
///
/// Strings stay in their upstream (possibly HTML- or percent-escaped) form; answer comparisons
/// run against these raw values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
	/// Category label.
	pub category: String,
	/// Question type label (`multiple` or `boolean`).
	#[serde(rename = "type")]
	pub kind: String,
	/// Difficulty label.
	pub difficulty: String,
	/// Prompt text.
	#[serde(rename = "question")]
	pub prompt: String,
	/// The one correct answer.
	pub correct_answer: String,
	/// Every wrong answer.
	pub incorrect_answers: Vec<String>,
}

/// Batch returned by the questions endpoint and relayed verbatim to callers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBatch {
	/// Upstream status code; interpretation is left to the caller.
	pub response_code: ResponseCode,
	/// Questions served, empty unless the code is a success.
	#[serde(default)]
	pub results: Vec<Question>,
}

/// Body returned by `command=request` on the token endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TokenGrant {
	/// Present on current question-bank versions; absent means success.
	#[serde(default)]
	pub response_code: Option<ResponseCode>,
	/// Human-readable status line.
	#[serde(default)]
	pub response_message: Option<String>,
	/// Newly issued token.
	#[serde(default)]
	pub token: Option<String>,
}

/// Body returned by `command=reset` on the token endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TokenReset {
	/// Upstream status code; `3` means the token expired server-side.
	pub response_code: ResponseCode,
	/// Echo of the reset token, when the question bank includes it.
	#[serde(default)]
	pub token: Option<String>,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn response_codes_map_both_ways() {
		for raw in [0, 1, 2, 3, 4, 5, 42] {
			assert_eq!(i64::from(ResponseCode::from(raw)), raw);
		}

		assert_eq!(ResponseCode::from(4), ResponseCode::TokenEmpty);
		assert_eq!(ResponseCode::from(42), ResponseCode::Other(42));
	}

	#[test]
	fn batch_parses_upstream_field_names() {
		let body = r#"{
			"response_code": 0,
			"results": [{
				"category": "Science: Computers",
				"type": "multiple",
				"difficulty": "easy",
				"question": "What does &quot;CPU&quot; stand for?",
				"correct_answer": "Central Processing Unit",
				"incorrect_answers": ["Central Process Unit", "Computer Personal Unit", "Central Processor Unit"]
			}]
		}"#;
		let batch: QuestionBatch =
			serde_json::from_str(body).expect("Upstream batch should deserialize.");

		assert!(batch.response_code.is_success());
		assert_eq!(batch.results.len(), 1);
		assert_eq!(batch.results[0].kind, "multiple");
		assert_eq!(batch.results[0].prompt, "What does &quot;CPU&quot; stand for?");
		assert_eq!(batch.results[0].incorrect_answers.len(), 3);
	}

	#[test]
	fn batch_without_results_defaults_to_empty() {
		let batch: QuestionBatch = serde_json::from_str(r#"{"response_code":4}"#)
			.expect("Batch without results should deserialize.");

		assert_eq!(batch.response_code, ResponseCode::TokenEmpty);
		assert!(batch.results.is_empty());
	}

	#[test]
	fn batch_serializes_code_as_integer() {
		let batch = QuestionBatch { response_code: ResponseCode::NoResults, results: Vec::new() };
		let value = serde_json::to_value(&batch).expect("Batch should serialize.");

		assert_eq!(value, serde_json::json!({ "response_code": 1, "results": [] }));
	}
}
