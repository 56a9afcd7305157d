//! The quiz question bank.

use serde::Serialize;

/// A multiple-choice question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    /// The question text.
    pub prompt: &'static str,
    /// Answer options, in display order.
    pub options: &'static [&'static str],
    /// The correct option's text.
    pub answer: &'static str,
}

impl Question {
    /// Whether the option at `index` is the correct answer.
    pub fn is_correct(&self, index: usize) -> bool {
        self.options.get(index) == Some(&self.answer)
    }
}

/// Fixed bank, always served in this order.
pub const QUESTION_BANK: &[Question] = &[
    Question {
        prompt: "What is the capital of France?",
        options: &["Berlin", "Madrid", "Paris", "Rome"],
        answer: "Paris",
    },
    Question {
        prompt: "Which planet is known as the Red Planet?",
        options: &["Earth", "Mars", "Jupiter", "Saturn"],
        answer: "Mars",
    },
    Question {
        prompt: "What is the largest mammal?",
        options: &["Elephant", "Blue Whale", "Shark", "Giraffe"],
        answer: "Blue Whale",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_answer_is_an_option() {
        for q in QUESTION_BANK {
            assert_eq!(q.options.iter().filter(|o| **o == q.answer).count(), 1);
        }
    }

    #[test]
    fn test_is_correct() {
        let q = &QUESTION_BANK[0];
        assert!(q.is_correct(2));
        assert!(!q.is_correct(0));
        assert!(!q.is_correct(10));
    }
}
