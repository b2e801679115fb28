use serde::{Deserialize, Serialize};

pub const RECENT_QUIZ_LIMIT: usize = 10;

/// One quiz-completion (or progress) event as reported by the quiz UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizStats {
    pub section_name: String,
    pub score: u32,
    pub total_questions: u32,
    #[serde(default)]
    pub total_quizzes: u32,
    pub accuracy: f64,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default = "default_completed")]
    pub is_completed: bool,
    #[serde(default)]
    pub current_question_index: u32,
}

fn default_completed() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub total_quizzes_completed: u32,
    pub total_questions_answered: u32,
    pub total_points: u64,
    pub current_streak: u32,
    pub total_subjects: u32,
    pub average_accuracy: f64,
    pub daily_progress: f64,
    pub last_quiz_result: String,
    pub last_quiz_score: Option<String>,
    pub last_quiz_accuracy: Option<String>,
    pub recent_quizzes: Vec<QuizStats>,
}

impl Default for StatsSummary {
    fn default() -> Self {
        Self {
            total_quizzes_completed: 0,
            total_questions_answered: 0,
            total_points: 0,
            current_streak: 0,
            total_subjects: 0,
            average_accuracy: 0.0,
            daily_progress: 0.0,
            last_quiz_result: "No quizzes completed yet".to_string(),
            last_quiz_score: None,
            last_quiz_accuracy: None,
            recent_quizzes: Vec::new(),
        }
    }
}
