//! Questions paired with their fixed answer order.

// crates.io
use rand::{Rng, seq::SliceRandom};
// self
use crate::{quiz::display, upstream::Question};

/// A question plus the answer order shown to the player.
///
/// The order is drawn once, when the value is built, and never changes afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnsweredQuestion {
	question: Question,
	shuffled_answers: Vec<String>,
}
impl AnsweredQuestion {
	/// Shuffles the answers with the thread-local RNG.
	pub fn new(question: Question) -> Self {
		Self::shuffled_with(question, &mut rand::rng())
	}

	/// Shuffles the answers with `rng` (Fisher–Yates).
	pub fn shuffled_with<R>(question: Question, rng: &mut R) -> Self
	where
		R: ?Sized + Rng,
	{
		let mut shuffled_answers = Vec::with_capacity(question.incorrect_answers.len() + 1);

		shuffled_answers.extend(question.incorrect_answers.iter().cloned());
		shuffled_answers.push(question.correct_answer.clone());
		shuffled_answers.shuffle(rng);

		Self { question, shuffled_answers }
	}

	/// The question as received.
	pub fn question(&self) -> &Question {
		&self.question
	}

	/// Every answer, correct one included, in display order.
	pub fn shuffled_answers(&self) -> &[String] {
		&self.shuffled_answers
	}

	/// Exact comparison against the raw correct answer.
	pub fn is_correct(&self, answer: &str) -> bool {
		self.question.correct_answer == answer
	}

	/// Prompt decoded for display.
	pub fn display_prompt(&self) -> String {
		display::decode_text(&self.question.prompt)
	}

	/// Answers decoded for display, in display order.
	pub fn display_answers(&self) -> Vec<String> {
		self.shuffled_answers.iter().map(|answer| display::decode_text(answer)).collect()
	}
}
