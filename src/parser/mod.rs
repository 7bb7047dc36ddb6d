//! Turns a model completion into questions.
//!
//! The expected layout of one question is:
//!
//! ````text
//! 1. What does this print?
//! ```python
//! print(1 + 1)
//! ```
//! A) 1
//! B) 2
//! Answer: B
//! ````
//!
//! Every line starting with `<number>. ` opens a new block. Blocks without a
//! question line or with fewer than two options are skipped; the parser never
//! fails.

use crate::error::{Error, Result};
use crate::models::Question;

/// Sentence the model is instructed to answer with when a request is not
/// about generating a QCM.
pub const DEFAULT_REFUSAL_PHRASE: &str = "Sorry, I can only generate multiple-choice questions.";

/// Fewest options a block needs to become a question.
pub const MIN_OPTIONS: usize = 2;

const CODE_FENCE: &str = "```";
const ANSWER_PREFIX: &str = "Answer";

/// Result of parsing one completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The model declined the request.
    Refused,
    /// No block produced a valid question.
    Empty,
    Parsed(Vec<Question>),
}

impl ParseOutcome {
    pub fn questions(&self) -> &[Question] {
        match self {
            ParseOutcome::Parsed(questions) => questions,
            ParseOutcome::Refused | ParseOutcome::Empty => &[],
        }
    }

    /// Converts the outcome into a result for callers that report the two
    /// failure cases to a user. `refusal_message` is shown verbatim.
    pub fn into_result(self, refusal_message: &str) -> Result<Vec<Question>> {
        match self {
            ParseOutcome::Parsed(questions) => Ok(questions),
            ParseOutcome::Refused => Err(Error::Refused(refusal_message.to_string())),
            ParseOutcome::Empty => Err(Error::Unparseable),
        }
    }
}

#[derive(Debug, Clone)]
pub struct QcmParser {
    refusal_phrase: String,
}

impl Default for QcmParser {
    fn default() -> Self {
        Self::new(DEFAULT_REFUSAL_PHRASE)
    }
}

impl QcmParser {
    pub fn new(refusal_phrase: impl Into<String>) -> Self {
        Self {
            refusal_phrase: refusal_phrase.into(),
        }
    }

    pub fn refusal_phrase(&self) -> &str {
        &self.refusal_phrase
    }

    pub fn parse(&self, text: &str) -> ParseOutcome {
        if self.is_refusal(text) {
            tracing::debug!("Completion is a refusal");
            return ParseOutcome::Refused;
        }

        let questions: Vec<Question> = split_blocks(text)
            .into_iter()
            .enumerate()
            .filter_map(|(index, block)| {
                let question = parse_block(&block);
                if question.is_none() {
                    tracing::debug!(block = index + 1, "Skipping malformed question block");
                }
                question
            })
            .collect();

        if questions.is_empty() {
            ParseOutcome::Empty
        } else {
            ParseOutcome::Parsed(questions)
        }
    }

    fn is_refusal(&self, text: &str) -> bool {
        let phrase = self.refusal_phrase.trim().to_lowercase();
        !phrase.is_empty() && text.to_lowercase().contains(&phrase)
    }
}

/// Parses with the default refusal phrase.
pub fn parse_completion(text: &str) -> ParseOutcome {
    QcmParser::default().parse(text)
}

/// Groups lines into question blocks. Lines before the first numbered line
/// are dropped.
fn split_blocks(text: &str) -> Vec<Vec<&str>> {
    let mut blocks: Vec<Vec<&str>> = Vec::new();

    for line in text.lines() {
        if strip_number(line).is_some() {
            blocks.push(vec![line]);
        } else if let Some(block) = blocks.last_mut() {
            block.push(line);
        }
    }

    blocks
}

/// Returns the text after a leading `<digits>.<whitespace>`.
fn strip_number(line: &str) -> Option<&str> {
    let line = line.trim_start();
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }

    let rest = line[digits..].strip_prefix('.')?;
    if rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

fn parse_block(lines: &[&str]) -> Option<Question> {
    let (first, rest) = lines.split_first()?;
    let text = strip_number(first)?;
    if text.is_empty() {
        return None;
    }

    let mut options = Vec::new();
    let mut answer = None;
    let mut code_lines: Vec<&str> = Vec::new();
    let mut has_code = false;
    let mut in_code = false;

    for &line in rest {
        if is_fence(line) {
            in_code = !in_code;
            has_code = true;
            continue;
        }

        if in_code {
            code_lines.push(line);
            continue;
        }

        if line.trim().is_empty() {
            continue;
        }

        if let Some(option) = parse_option(line) {
            options.push(option.to_string());
        } else if let Some(value) = parse_answer(line) {
            answer = (!value.is_empty()).then(|| value.to_string());
        }
    }

    if options.len() < MIN_OPTIONS {
        return None;
    }

    let code = code_lines.join("\n");
    Some(Question {
        text: text.to_string(),
        code: (has_code && !code.is_empty()).then_some(code),
        options,
        answer,
    })
}

fn is_fence(line: &str) -> bool {
    line.trim().starts_with(CODE_FENCE)
}

/// Matches `X) text` for any single uppercase letter `X`.
fn parse_option(line: &str) -> Option<&str> {
    let line = line.trim_start();
    let mut chars = line.chars();
    let letter = chars.next()?;
    if !letter.is_ascii_uppercase() {
        return None;
    }

    chars.as_str().strip_prefix(')').map(str::trim)
}

/// Matches `Answer`, an optional ASCII or full-width colon, then the value.
fn parse_answer(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix(ANSWER_PREFIX)?;
    let rest = rest
        .strip_prefix(':')
        .or_else(|| rest.strip_prefix('：'))
        .unwrap_or(rest);
    Some(rest.trim())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parsed(text: &str) -> Vec<Question> {
        match parse_completion(text) {
            ParseOutcome::Parsed(questions) => questions,
            other => panic!("expected questions, got {:?}", other),
        }
    }

    #[test]
    fn test_single_question() {
        let text = "1. What is 2+2?\nA) 3\nB) 4\nC) 5\nAnswer: B";

        assert_eq!(
            parsed(text),
            vec![Question {
                text: "What is 2+2?".to_string(),
                code: None,
                options: vec!["3".to_string(), "4".to_string(), "5".to_string()],
                answer: Some("B".to_string()),
            }]
        );
    }

    #[test]
    fn test_refusal_wins_over_questions() {
        assert_eq!(parse_completion(DEFAULT_REFUSAL_PHRASE), ParseOutcome::Refused);

        let text = format!(
            "{}\n1. Q\nA) a\nB) b\nAnswer: A",
            DEFAULT_REFUSAL_PHRASE.to_uppercase()
        );
        assert_eq!(parse_completion(&text), ParseOutcome::Refused);
    }

    #[test]
    fn test_empty_is_distinct_from_refusal() {
        assert_eq!(parse_completion(""), ParseOutcome::Empty);
        assert_eq!(parse_completion("Here are some thoughts."), ParseOutcome::Empty);
        assert_eq!(parse_completion("1. Only a question\nA) one"), ParseOutcome::Empty);
    }

    #[test]
    fn test_minimum_options() {
        let text = "1. One option\nA) a\nAnswer: A\n2. Two options\nA) a\nB) b\nAnswer: B";
        let questions = parsed(text);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text, "Two options");
    }

    #[test]
    fn test_preamble_is_dropped() {
        let text = "Sure! Here is your quiz:\nA) not an option\n\n1. Q\nA) a\nB) b";
        let questions = parsed(text);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].options, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(questions[0].answer, None);
    }

    #[test]
    fn test_code_fence_keeps_blank_lines() {
        let text = "1. What does this print?\n```python\ndef f():\n\n    return 1\n```\nA) 1\nB) None\nAnswer: A";
        let questions = parsed(text);
        assert_eq!(questions[0].code.as_deref(), Some("def f():\n\n    return 1"));
        assert_eq!(questions[0].options.len(), 2);
    }

    #[test]
    fn test_option_lines_inside_code_are_code() {
        let text = "1. Q\n```\nA) inside\n```\nA) a\nB) b";
        let questions = parsed(text);
        assert_eq!(questions[0].code.as_deref(), Some("A) inside"));
        assert_eq!(questions[0].options, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_unclosed_fence_only_affects_its_block() {
        let text = "1. Broken\n```\nA) a\nB) b\n2. Fine\nA) a\nB) b\nAnswer: A";
        let questions = parsed(text);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text, "Fine");
    }

    #[test]
    fn test_more_than_four_options() {
        let text = "1. Q\nA) a\nB) b\nC) c\nD) d\nE) e\nAnswer: E";
        let questions = parsed(text);
        assert_eq!(questions[0].options.len(), 5);
        assert_eq!(questions[0].answer_index(), Some(4));
    }

    #[test]
    fn test_missing_letters_are_not_fabricated() {
        let text = "1. Q\nA) a\nC) c\nAnswer: C";
        let questions = parsed(text);
        assert_eq!(questions[0].options, vec!["a".to_string(), "c".to_string()]);
        assert_eq!(questions[0].answer_index(), None);
    }

    #[test]
    fn test_answer_variants() {
        assert_eq!(parse_answer("Answer: B"), Some("B"));
        assert_eq!(parse_answer("Answer：C "), Some("C"));
        assert_eq!(parse_answer("Answer D"), Some("D"));
        assert_eq!(parse_answer("  Answer:"), Some(""));
        assert_eq!(parse_answer("The answer is B"), None);

        let questions = parsed("1. Q\nA) a\nB) b\nAnswer:   \n");
        assert_eq!(questions[0].answer, None);
    }

    #[test]
    fn test_last_answer_line_wins() {
        let questions = parsed("1. Q\nA) a\nB) b\nAnswer: A\nAnswer: B");
        assert_eq!(questions[0].answer.as_deref(), Some("B"));

        // A later empty answer line clears the earlier one.
        let questions = parsed("1. Q\nA) a\nB) b\nAnswer: A\nAnswer:");
        assert_eq!(questions[0].answer, None);
    }

    #[test]
    fn test_answer_line_inside_code_is_code() {
        let text = "1. Q\n```\nAnswer: B\n```\nA) a\nB) b";
        let questions = parsed(text);
        assert_eq!(questions[0].answer, None);
        assert_eq!(questions[0].code.as_deref(), Some("Answer: B"));

        let text = "1. Q\n```\nAnswer: B\n```\nA) a\nB) b\nAnswer: A";
        assert_eq!(parsed(text)[0].answer.as_deref(), Some("A"));
    }

    #[test]
    fn test_option_variants() {
        assert_eq!(parse_option("A) text "), Some("text"));
        assert_eq!(parse_option("  B)text"), Some("text"));
        assert_eq!(parse_option("C)"), Some(""));
        assert_eq!(parse_option("a) lower"), None);
        assert_eq!(parse_option("AB) two"), None);
        assert_eq!(parse_option("A. dot"), None);
    }

    #[test]
    fn test_block_boundaries() {
        assert_eq!(strip_number("1. Q"), Some("Q"));
        assert_eq!(strip_number("  12.\tQ "), Some("Q"));
        assert_eq!(strip_number("1.5 is a number"), None);
        assert_eq!(strip_number("1.Q"), None);
        assert_eq!(strip_number("Q1. no"), None);
        assert_eq!(strip_number("3. "), Some(""));
    }

    #[test]
    fn test_multiple_questions_keep_order() {
        let text = "1. First\nA) a\nB) b\nAnswer: A\n\n2. Second\nA) c\nB) d\nAnswer: B\n\n3. Third\nA) e\nB) f\nAnswer: A\n";
        let texts: Vec<_> = parsed(text).into_iter().map(|q| q.text).collect();
        assert_eq!(texts, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_custom_refusal_phrase() {
        let parser = QcmParser::new("Je ne peux générer que des QCM");
        assert_eq!(parser.parse("je ne peux GÉNÉRER que des qcm."), ParseOutcome::Refused);
        assert_eq!(parser.parse(DEFAULT_REFUSAL_PHRASE), ParseOutcome::Empty);
    }

    #[test]
    fn test_into_result() {
        assert!(matches!(
            ParseOutcome::Refused.into_result("no"),
            Err(Error::Refused(message)) if message == "no"
        ));
        assert!(matches!(ParseOutcome::Empty.into_result("no"), Err(Error::Unparseable)));
        assert!(ParseOutcome::Parsed(vec![]).into_result("no").unwrap().is_empty());
        assert!(ParseOutcome::Empty.questions().is_empty());
    }
}
