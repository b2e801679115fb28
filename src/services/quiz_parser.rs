use crate::models::quiz_question::{AnswerLetter, QuizQuestion};
use crate::utils::text::strip_prefix_ignore_case;

pub const BLOCK_DELIMITER: &str = "---";
const MIN_BLOCK_LINES: usize = 6;

const QUESTION_PREFIX: &str = "Question:";
const OPTION_PREFIXES: [&str; 4] = ["A)", "B)", "C)", "D)"];
const CORRECT_PREFIX: &str = "Correct Answer:";
const EXPLANATION_PREFIX: &str = "Explanation:";
const HINT_PREFIX: &str = "Hint:";

/// Parses a completion made of `---`-separated question blocks.
///
/// Blocks that do not hold a question line and exactly four options are
/// dropped; the rest of the text is still parsed.
pub fn parse(raw: &str) -> Vec<QuizQuestion> {
    if raw.trim().is_empty() {
        tracing::warn!("chat response is empty, no questions to parse");
        return Vec::new();
    }

    let mut questions = Vec::new();
    for (idx, block) in raw
        .split(BLOCK_DELIMITER)
        .filter(|b| !b.is_empty())
        .enumerate()
    {
        match parse_block(block.trim()) {
            Ok(question) => questions.push(question),
            Err(reason) => tracing::debug!(block = idx, reason, "discarding question block"),
        }
    }
    questions
}

/// Canonical text for a question set; `parse(&render(qs))` gives `qs` back.
pub fn render(questions: &[QuizQuestion]) -> String {
    questions
        .iter()
        .map(|q| format!("{}{}\n", q.to_block(), BLOCK_DELIMITER))
        .collect::<Vec<_>>()
        .join("")
}

#[derive(Default)]
struct BlockFields {
    question: Option<String>,
    options: Vec<String>,
    correct: AnswerLetter,
    explanation: Option<String>,
    hint: Option<String>,
}

fn parse_block(block: &str) -> Result<QuizQuestion, &'static str> {
    let lines: Vec<&str> = block
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.len() < MIN_BLOCK_LINES {
        return Err("too few lines");
    }

    let mut fields = BlockFields::default();
    for line in lines {
        classify_line(line, &mut fields);
    }

    let question = fields
        .question
        .filter(|q| !q.is_empty())
        .ok_or("missing question text")?;
    let options: [String; 4] = fields
        .options
        .try_into()
        .map_err(|_| "expected exactly four options")?;

    let mut parsed = QuizQuestion::new(question, options, fields.correct);
    parsed.explanation = fields.explanation;
    parsed.hint = fields.hint;
    Ok(parsed)
}

fn classify_line(line: &str, fields: &mut BlockFields) {
    if let Some(rest) = strip_prefix_ignore_case(line, QUESTION_PREFIX) {
        fields.question = Some(rest.trim().to_string());
    } else if let Some(rest) = OPTION_PREFIXES
        .iter()
        .find_map(|p| strip_prefix_ignore_case(line, p))
    {
        let option = rest.trim();
        if !option.is_empty() {
            fields.options.push(option.to_string());
        }
    } else if let Some(rest) = strip_prefix_ignore_case(line, CORRECT_PREFIX) {
        // Unknown letters fall back to A rather than dropping the block.
        fields.correct = AnswerLetter::parse(rest).unwrap_or_else(|| {
            tracing::warn!(value = rest.trim(), "unrecognised correct answer, defaulting to A");
            AnswerLetter::A
        });
    } else if let Some(rest) = strip_prefix_ignore_case(line, EXPLANATION_PREFIX) {
        fields.explanation = Some(rest.trim().to_string());
    } else if let Some(rest) = strip_prefix_ignore_case(line, HINT_PREFIX) {
        fields.hint = Some(rest.trim().to_string());
    }
}
