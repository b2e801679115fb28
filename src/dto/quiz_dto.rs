use crate::models::quiz_request::{
    Difficulty, QuizGenerationRequest, DEFAULT_QUESTION_COUNT, DEFAULT_TOPIC,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ClassifyPayload {
    #[validate(length(min = 1))]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateQuizPayload {
    #[serde(default = "default_topic")]
    #[validate(length(min = 1, max = 200))]
    pub topic: String,
    #[serde(default = "default_count")]
    #[validate(range(min = 1, max = 10))]
    pub question_count: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Store the generated questions in a new section and the flashcard deck.
    #[serde(default)]
    pub save: bool,
}

fn default_topic() -> String {
    DEFAULT_TOPIC.to_string()
}

fn default_count() -> u32 {
    DEFAULT_QUESTION_COUNT
}

impl GenerateQuizPayload {
    pub fn to_request(&self) -> QuizGenerationRequest {
        QuizGenerationRequest::new(self.topic.trim(), self.question_count, self.difficulty)
    }
}
