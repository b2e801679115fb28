use crate::models::quiz_question::QuizQuestion;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSection {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub color: String,
    pub difficulty: String,
    pub question_count: usize,
    #[serde(default)]
    pub questions: Vec<QuizQuestion>,
}
