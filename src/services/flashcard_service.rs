use crate::error::{Error, Result};
use crate::models::flashcard::Flashcard;
use crate::models::quiz_question::QuizQuestion;
use chrono::Utc;
use rand::seq::SliceRandom;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct FlashcardService {
    cards: Arc<RwLock<Vec<Flashcard>>>,
}

impl FlashcardService {
    pub fn new() -> Self {
        Self::default()
    }

    /// One card per question: the question on the front, the correct answer on the back.
    pub async fn add_from_questions(&self, questions: &[QuizQuestion]) -> usize {
        let mut cards = self.cards.write().await;
        cards.extend(questions.iter().map(|q| {
            Flashcard::new(
                q.question_text.clone(),
                format!("{}) {}", q.correct_answer, q.correct_option()),
            )
        }));
        questions.len()
    }

    pub async fn list(&self) -> Vec<Flashcard> {
        self.cards.read().await.clone()
    }

    pub async fn mark_known(&self, id: Uuid) -> Result<Flashcard> {
        self.review(id, |card| {
            card.is_known = true;
            card.needs_practice = false;
        })
        .await
    }

    pub async fn mark_for_practice(&self, id: Uuid) -> Result<Flashcard> {
        self.review(id, |card| {
            card.is_known = false;
            card.needs_practice = true;
        })
        .await
    }

    pub async fn shuffle(&self) -> Vec<Flashcard> {
        let mut cards = self.cards.write().await;
        cards.shuffle(&mut rand::thread_rng());
        cards.clone()
    }

    async fn review<F>(&self, id: Uuid, apply: F) -> Result<Flashcard>
    where
        F: FnOnce(&mut Flashcard),
    {
        let mut cards = self.cards.write().await;
        let card = cards
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::NotFound(format!("Flashcard {} not found", id)))?;
        apply(card);
        card.review_count += 1;
        card.last_reviewed = Some(Utc::now());
        Ok(card.clone())
    }
}
