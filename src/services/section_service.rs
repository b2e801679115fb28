use crate::error::{Error, Result};
use crate::models::quiz_question::QuizQuestion;
use crate::models::quiz_section::QuizSection;
use chrono::Local;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

const SECTION_COLOR: &str = "#006F8D";

/// In-memory library of quiz sections built from generated questions.
#[derive(Clone, Default)]
pub struct SectionService {
    sections: Arc<RwLock<Vec<QuizSection>>>,
}

impl SectionService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_section(&self, topic: &str, difficulty: &str) -> QuizSection {
        let mut sections = self.sections.write().await;
        let existing: HashSet<&str> = sections.iter().map(|s| s.name.as_str()).collect();
        let name = section_name(topic, &existing);

        let section = QuizSection {
            id: Uuid::new_v4(),
            name,
            description: format!("Quiz about {}", topic.trim()),
            color: SECTION_COLOR.to_string(),
            difficulty: difficulty.to_string(),
            question_count: 0,
            questions: Vec::new(),
        };
        tracing::info!(id = %section.id, name = %section.name, "created quiz section");
        sections.push(section.clone());
        section
    }

    pub async fn add_questions(&self, id: Uuid, questions: &[QuizQuestion]) -> Result<QuizSection> {
        let mut sections = self.sections.write().await;
        let section = sections
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| Error::NotFound(format!("Quiz section {} not found", id)))?;

        section.questions.extend_from_slice(questions);
        section.question_count = section.questions.len();
        Ok(section.clone())
    }

    /// Removes the question at `index`; the remaining questions keep their order.
    pub async fn remove_question(&self, id: Uuid, index: usize) -> Result<QuizSection> {
        let mut sections = self.sections.write().await;
        let section = sections
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| Error::NotFound(format!("Quiz section {} not found", id)))?;

        if index >= section.questions.len() {
            return Err(Error::NotFound(format!(
                "Question {} not found in section {}",
                index, id
            )));
        }
        section.questions.remove(index);
        section.question_count = section.questions.len();
        tracing::info!(section = %id, index, "removed question");
        Ok(section.clone())
    }

    pub async fn clear_questions(&self, id: Uuid) -> Result<QuizSection> {
        let mut sections = self.sections.write().await;
        let section = sections
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| Error::NotFound(format!("Quiz section {} not found", id)))?;

        section.questions.clear();
        section.question_count = 0;
        tracing::info!(section = %id, "cleared questions");
        Ok(section.clone())
    }

    pub async fn list(&self) -> Vec<QuizSection> {
        self.sections.read().await.clone()
    }

    pub async fn get(&self, id: Uuid) -> Result<QuizSection> {
        self.sections
            .read()
            .await
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Quiz section {} not found", id)))
    }

    pub async fn export_json(&self) -> Result<String> {
        let sections = self.sections.read().await;
        Ok(serde_json::to_string_pretty(&*sections)?)
    }

    /// Appends questions from a JSON array into an existing section.
    pub async fn import_questions(&self, id: Uuid, json: &str) -> Result<QuizSection> {
        let imported: Vec<QuizQuestion> = serde_json::from_str(json)
            .map_err(|e| Error::BadRequest(format!("Failed to import questions: {}", e)))?;
        if let Some(pos) = imported.iter().position(|q| q.question_text.trim().is_empty()) {
            return Err(Error::BadRequest(format!(
                "Failed to import questions: question {} has no text",
                pos
            )));
        }
        tracing::info!(section = %id, count = imported.len(), "importing questions");
        self.add_questions(id, &imported).await
    }
}

/// Display name for a new section: capitalised topic with a "Quiz" suffix,
/// numbered when the name is already taken.
fn section_name(topic: &str, existing: &HashSet<&str>) -> String {
    let topic = topic.trim();
    if topic.is_empty() {
        return format!("Quiz {}", Local::now().format("%m%d-%H%M"));
    }

    let mut chars = topic.chars();
    let mut base: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    if !base.to_lowercase().contains("quiz") {
        base.push_str(" Quiz");
    }

    let mut name = base.clone();
    let mut counter = 1;
    while existing.contains(name.as_str()) {
        name = format!("{} ({})", base, counter);
        counter += 1;
    }
    name
}
