use crate::models::quiz_request::{
    Difficulty, QuizGenerationRequest, DEFAULT_QUESTION_COUNT, DEFAULT_TOPIC, MAX_QUESTION_COUNT,
    MIN_QUESTION_COUNT,
};
use regex::Regex;
use std::sync::OnceLock;

const TOPIC_KEYWORDS: &[&str] = &["about", "on", "regarding", "concerning"];
const STOPWORDS: &[&str] = &[
    "create", "generate", "make", "quiz", "questions", "test", "some", "a", "an", "the",
];
const EASY_WORDS: &[&str] = &["easy", "beginner"];
const HARD_WORDS: &[&str] = &["hard", "difficult", "advanced"];

fn number_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| match Regex::new(r"\b(\d+)\b") {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::error!(error = %e, "question count pattern failed to compile");
                None
            }
        })
        .as_ref()
}

/// Turns a free-text quiz request into a structured one. Never fails: anything
/// that cannot be understood falls back to the defaults.
pub fn extract_request(text: &str) -> QuizGenerationRequest {
    match try_extract(text) {
        Some(request) => request,
        None => {
            tracing::debug!("quiz request not understood, using defaults");
            QuizGenerationRequest::default()
        }
    }
}

fn try_extract(text: &str) -> Option<QuizGenerationRequest> {
    if text.trim().is_empty() {
        return None;
    }

    let request = QuizGenerationRequest::new(
        extract_topic(text),
        extract_count(text),
        extract_difficulty(text),
    );
    tracing::debug!(
        topic = %request.topic,
        count = request.question_count,
        difficulty = %request.difficulty,
        "parsed quiz request"
    );
    Some(request)
}

fn extract_count(text: &str) -> u32 {
    // Only the first literal counts; one that does not fit keeps the default.
    number_pattern()
        .and_then(|re| re.captures(text))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u64>().ok())
        .map(|n| n.clamp(MIN_QUESTION_COUNT as u64, MAX_QUESTION_COUNT as u64) as u32)
        .unwrap_or(DEFAULT_QUESTION_COUNT)
}

fn extract_difficulty(text: &str) -> Difficulty {
    let lower = text.to_lowercase();
    if EASY_WORDS.iter().any(|w| lower.contains(w)) {
        Difficulty::Easy
    } else if HARD_WORDS.iter().any(|w| lower.contains(w)) {
        Difficulty::Hard
    } else {
        Difficulty::Medium
    }
}

fn extract_topic(text: &str) -> String {
    // ASCII lowercasing keeps byte offsets aligned with `text`.
    let lower = text.to_ascii_lowercase();

    let mut topic = String::new();
    for keyword in TOPIC_KEYWORDS {
        if let Some(idx) = lower.find(keyword) {
            let start = idx + keyword.len();
            if start < text.len() {
                topic = text[start..].trim().to_string();
                break;
            }
        }
    }

    if topic.is_empty() {
        topic = text
            .split_whitespace()
            .filter(|w| !STOPWORDS.iter().any(|s| s.eq_ignore_ascii_case(w)))
            .collect::<Vec<_>>()
            .join(" ");
    }

    if topic.is_empty() {
        DEFAULT_TOPIC.to_string()
    } else {
        topic
    }
}
