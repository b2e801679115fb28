use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: Uuid,
    pub front: String,
    pub back: String,
    pub is_known: bool,
    pub needs_practice: bool,
    pub last_reviewed: Option<DateTime<Utc>>,
    pub review_count: u32,
}

impl Flashcard {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            front: front.into(),
            back: back.into(),
            is_known: false,
            needs_practice: false,
            last_reviewed: None,
            review_count: 0,
        }
    }
}
