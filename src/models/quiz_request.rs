use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_QUESTION_COUNT: u32 = 1;
pub const MAX_QUESTION_COUNT: u32 = 10;
pub const DEFAULT_QUESTION_COUNT: u32 = 5;
pub const DEFAULT_TOPIC: &str = "general knowledge";
pub const MULTIPLE_CHOICE: &str = "multiple-choice";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizGenerationRequest {
    pub topic: String,
    pub question_count: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default = "default_question_type")]
    pub question_type: String,
}

fn default_question_type() -> String {
    MULTIPLE_CHOICE.to_string()
}

impl QuizGenerationRequest {
    pub fn new(topic: impl Into<String>, question_count: u32, difficulty: Difficulty) -> Self {
        Self {
            topic: topic.into(),
            question_count: question_count.clamp(MIN_QUESTION_COUNT, MAX_QUESTION_COUNT),
            difficulty,
            question_type: default_question_type(),
        }
    }
}

impl Default for QuizGenerationRequest {
    fn default() -> Self {
        Self::new(DEFAULT_TOPIC, DEFAULT_QUESTION_COUNT, Difficulty::Medium)
    }
}
