use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerLetter {
    #[default]
    A,
    B,
    C,
    D,
}

impl AnswerLetter {
    pub const ALL: [AnswerLetter; 4] = [AnswerLetter::A, AnswerLetter::B, AnswerLetter::C, AnswerLetter::D];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_char(self) -> char {
        match self {
            AnswerLetter::A => 'A',
            AnswerLetter::B => 'B',
            AnswerLetter::C => 'C',
            AnswerLetter::D => 'D',
        }
    }

    /// Accepts a single letter, any case, surrounding whitespace ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "A" => Some(AnswerLetter::A),
            "B" => Some(AnswerLetter::B),
            "C" => Some(AnswerLetter::C),
            "D" => Some(AnswerLetter::D),
            _ => None,
        }
    }
}

impl fmt::Display for AnswerLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A four-option multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question_text: String,
    pub options: [String; 4],
    pub correct_answer: AnswerLetter,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub difficulty: String,
}

impl QuizQuestion {
    pub fn new(
        question_text: impl Into<String>,
        options: [String; 4],
        correct_answer: AnswerLetter,
    ) -> Self {
        Self {
            question_text: question_text.into(),
            options,
            correct_answer,
            explanation: None,
            hint: None,
            category: String::new(),
            difficulty: String::new(),
        }
    }

    pub fn correct_index(&self) -> usize {
        self.correct_answer.index()
    }

    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index()]
    }

    /// Canonical block text, the same line format the parser reads.
    pub fn to_block(&self) -> String {
        let mut out = format!("Question: {}\n", self.question_text);
        for (letter, option) in AnswerLetter::ALL.iter().zip(self.options.iter()) {
            out.push_str(&format!("{}) {}\n", letter, option));
        }
        out.push_str(&format!("Correct Answer: {}\n", self.correct_answer));
        if let Some(explanation) = &self.explanation {
            out.push_str(&format!("Explanation: {}\n", explanation));
        }
        if let Some(hint) = &self.hint {
            out.push_str(&format!("Hint: {}\n", hint));
        }
        out
    }
}
