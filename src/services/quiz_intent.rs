const ACTION_KEYWORDS: &[&str] = &["create", "generate", "make", "quiz", "questions", "test"];
const SUBJECT_KEYWORDS: &[&str] = &["question", "quiz"];

/// True when the utterance reads like a request to generate quiz questions.
///
/// Plain substring containment on a lowercased copy: at least one action
/// keyword and at least one of `question` / `quiz` must appear.
pub fn is_quiz_request(text: &str) -> bool {
    if text.trim().is_empty() {
        return false;
    }

    let lower = text.to_lowercase();
    ACTION_KEYWORDS.iter().any(|k| lower.contains(k))
        && SUBJECT_KEYWORDS.iter().any(|k| lower.contains(k))
}
