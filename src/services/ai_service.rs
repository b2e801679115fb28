use crate::error::Result;
use crate::models::chat_message::ChatMessage;
use crate::models::quiz_question::QuizQuestion;
use crate::models::quiz_request::QuizGenerationRequest;
use crate::models::quiz_section::QuizSection;
use crate::services::chat_client::ChatClient;
use crate::services::flashcard_service::FlashcardService;
use crate::services::section_service::SectionService;
use crate::services::{quiz_extractor, quiz_intent, quiz_parser};
use serde::Serialize;

pub const GENERATED_CATEGORY: &str = "AI Generated";
const PREVIEW_LIMIT: usize = 2;

/// Everything the assistant said in one turn, plus what it created.
#[derive(Debug, Default, Serialize)]
pub struct ChatTurn {
    pub replies: Vec<ChatMessage>,
    pub request: Option<QuizGenerationRequest>,
    pub section: Option<QuizSection>,
}

impl ChatTurn {
    fn say(&mut self, content: impl Into<String>) {
        self.replies.push(ChatMessage::assistant(content));
    }
}

#[derive(Clone)]
pub struct AIService {
    chat: ChatClient,
}

impl AIService {
    pub fn new(chat: ChatClient) -> Self {
        Self { chat }
    }

    pub fn profile_name(&self) -> &'static str {
        self.chat.profile().name()
    }

    /// `Some(request)` when `text` asks for a quiz, `None` for ordinary chat.
    pub fn classify_and_extract(&self, text: &str) -> Option<QuizGenerationRequest> {
        if quiz_intent::is_quiz_request(text) {
            Some(quiz_extractor::extract_request(text))
        } else {
            None
        }
    }

    pub async fn send_chat(&self, text: &str, history: &[ChatMessage]) -> Result<String> {
        self.chat.send_message(text, history).await
    }

    pub async fn generate_quiz(&self, request: &QuizGenerationRequest) -> Result<Vec<QuizQuestion>> {
        tracing::info!(
            topic = %request.topic,
            count = request.question_count,
            difficulty = %request.difficulty,
            "generating quiz"
        );

        let prompt = build_quiz_prompt(request);
        let completion = self.chat.send_message(&prompt, &[]).await?;

        let mut questions = quiz_parser::parse(&completion);
        if questions.len() > request.question_count as usize {
            questions.truncate(request.question_count as usize);
        }
        for q in &mut questions {
            if q.category.is_empty() {
                q.category = GENERATED_CATEGORY.to_string();
            }
            if q.difficulty.is_empty() {
                q.difficulty = request.difficulty.to_string();
            }
        }

        tracing::info!(parsed = questions.len(), "quiz generation finished");
        Ok(questions)
    }

    /// Answers one user message: quiz requests become a new section and
    /// flashcards, anything else goes to the chat model. Errors are turned
    /// into assistant replies.
    pub async fn chat_turn(
        &self,
        message: &str,
        history: &[ChatMessage],
        sections: &SectionService,
        deck: &FlashcardService,
    ) -> ChatTurn {
        let mut turn = ChatTurn::default();
        let message = message.trim();
        if message.is_empty() {
            return turn;
        }

        let Some(request) = self.classify_and_extract(message) else {
            match self.send_chat(message, history).await {
                Ok(reply) if reply.is_empty() => {
                    turn.say("I received an empty response. Please try again.")
                }
                Ok(reply) => turn.say(reply),
                Err(e) => {
                    tracing::error!(error = ?e, "chat request failed");
                    turn.say(format!("Sorry, I encountered an error: {}", e.user_message()));
                }
            }
            return turn;
        };

        turn.say(format!(
            "I'll generate {} {} quiz questions about {}. This may take a moment...",
            request.question_count, request.difficulty, request.topic
        ));

        match self.generate_quiz(&request).await {
            Ok(questions) if !questions.is_empty() => {
                deck.add_from_questions(&questions).await;

                let section = sections
                    .add_section(&request.topic, request.difficulty.as_str())
                    .await;
                let section = match sections.add_questions(section.id, &questions).await {
                    Ok(updated) => updated,
                    Err(e) => {
                        tracing::error!(error = ?e, "could not attach questions to section");
                        section
                    }
                };

                turn.say(format!(
                    "Great! I've generated {} quiz questions about {} and added them to your quiz. You can now use them in your quiz!",
                    questions.len(),
                    request.topic
                ));
                turn.say(preview(&questions));
                turn.section = Some(section);
            }
            Ok(_) => turn.say(
                "I couldn't generate quiz questions from that request. Could you try rephrasing it? For example: 'Create 3 questions about biology'",
            ),
            Err(e) => {
                tracing::error!(error = ?e, "quiz generation failed");
                turn.say(format!("Sorry, I encountered an error: {}", e.user_message()));
            }
        }

        turn.request = Some(request);
        turn
    }
}

pub fn build_quiz_prompt(request: &QuizGenerationRequest) -> String {
    format!(
        "Create {} multiple-choice quiz questions about {} at {} difficulty level.

Format each question exactly like this:
Question: [question text]
A) [option A]
B) [option B]
C) [option C]
D) [option D]
Correct Answer: [A/B/C/D]
Explanation: [brief explanation]
---

Important: Make sure each question is well-formatted and separated by '---'. Begin:",
        request.question_count, request.topic, request.difficulty
    )
}

fn preview(questions: &[QuizQuestion]) -> String {
    let mut text = questions
        .iter()
        .take(PREVIEW_LIMIT)
        .enumerate()
        .map(|(i, q)| {
            format!(
                "Preview {}: {}\nA) {}\nB) {}\nC) {}\nD) {}",
                i + 1,
                q.question_text,
                q.options[0],
                q.options[1],
                q.options[2],
                q.options[3]
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    if questions.len() > PREVIEW_LIMIT {
        text.push_str(&format!(
            "\n\n... and {} more questions!",
            questions.len() - PREVIEW_LIMIT
        ));
    }
    text
}
