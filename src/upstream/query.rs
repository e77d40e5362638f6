//! Typed filters for question fetches.

// self
use crate::_prelude::*;

/// Difficulty filter accepted by the question bank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
	/// `easy`
	Easy,
	/// `medium`
	Medium,
	/// `hard`
	Hard,
}
impl Difficulty {
	/// Wire name of the filter value.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Easy => "easy",
			Self::Medium => "medium",
			Self::Hard => "hard",
		}
	}
}

/// Question type filter accepted by the question bank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
	/// Four-option questions.
	Multiple,
	/// True/false questions.
	Boolean,
}
impl QuestionKind {
	/// Wire name of the filter value.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Multiple => "multiple",
			Self::Boolean => "boolean",
		}
	}
}

/// Optional filters narrowing a fetch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionFilters {
	/// Numeric category identifier.
	pub category: Option<u32>,
	/// Difficulty filter.
	pub difficulty: Option<Difficulty>,
	/// Question type filter, sent as `type`.
	#[serde(rename = "type")]
	pub kind: Option<QuestionKind>,
}

/// Parameters for one question fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionQuery {
	/// Number of questions requested.
	pub amount: u32,
	/// Optional filters.
	#[serde(flatten)]
	pub filters: QuestionFilters,
}
impl QuestionQuery {
	/// Amount used when the caller does not supply one.
	pub const DEFAULT_AMOUNT: u32 = 10;

	/// Creates a query for `amount` questions with no filters.
	pub fn new(amount: u32) -> Self {
		Self { amount, filters: QuestionFilters::default() }
	}

	/// Replaces the filters.
	pub fn with_filters(mut self, filters: QuestionFilters) -> Self {
		self.filters = filters;

		self
	}

	/// Restricts the fetch to a category.
	pub fn with_category(mut self, category: u32) -> Self {
		self.filters.category = Some(category);

		self
	}

	/// Restricts the fetch to a difficulty.
	pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
		self.filters.difficulty = Some(difficulty);

		self
	}

	/// Restricts the fetch to a question type.
	pub fn with_kind(mut self, kind: QuestionKind) -> Self {
		self.filters.kind = Some(kind);

		self
	}

	/// Query pairs in the order the question bank documents them.
	pub(crate) fn pairs(&self) -> Vec<(&'static str, String)> {
		let mut pairs = vec![("amount", self.amount.to_string())];

		if let Some(category) = self.filters.category {
			pairs.push(("category", category.to_string()));
		}
		if let Some(difficulty) = self.filters.difficulty {
			pairs.push(("difficulty", difficulty.as_str().into()));
		}
		if let Some(kind) = self.filters.kind {
			pairs.push(("type", kind.as_str().into()));
		}

		pairs
	}
}
impl Default for QuestionQuery {
	fn default() -> Self {
		Self::new(Self::DEFAULT_AMOUNT)
	}
}
