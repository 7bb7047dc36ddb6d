//! Flattens questions into four parallel string columns and back.
//!
//! Column `i` of every array always describes question `i`. Decoding reads
//! only up to the shortest column and substitutes an empty option list for
//! unreadable option data, so a damaged record degrades instead of failing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::Question;

/// The four index-aligned columns a question list is stored as.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionColumns {
    pub texts: Vec<String>,
    /// Each entry is a JSON array of option strings.
    pub options: Vec<String>,
    pub answers: Vec<String>,
    pub codes: Vec<String>,
}

impl QuestionColumns {
    pub fn len(&self) -> usize {
        self.texts
            .len()
            .min(self.options.len())
            .min(self.answers.len())
            .min(self.codes.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn decode(&self) -> Vec<Question> {
        decode(&self.texts, &self.options, &self.answers, &self.codes)
    }
}

/// Splits questions into columns. Absent values become empty strings, never
/// nulls.
pub fn encode(questions: &[Question]) -> QuestionColumns {
    let mut columns = QuestionColumns {
        texts: Vec::with_capacity(questions.len()),
        options: Vec::with_capacity(questions.len()),
        answers: Vec::with_capacity(questions.len()),
        codes: Vec::with_capacity(questions.len()),
    };

    for question in questions {
        columns.texts.push(question.text.clone());
        columns.options.push(serialize_options(&question.options));
        columns.answers.push(question.answer.clone().unwrap_or_default());
        columns.codes.push(question.code.clone().unwrap_or_default());
    }

    columns
}

/// Rebuilds questions from stored columns.
pub fn decode<S: AsRef<str>>(
    texts: &[S],
    options: &[S],
    answers: &[S],
    codes: &[S],
) -> Vec<Question> {
    let count = texts
        .len()
        .min(options.len())
        .min(answers.len())
        .min(codes.len());

    if [texts.len(), options.len(), answers.len(), codes.len()]
        .iter()
        .any(|&len| len != count)
    {
        tracing::warn!(
            texts = texts.len(),
            options = options.len(),
            answers = answers.len(),
            codes = codes.len(),
            "Stored columns differ in length, keeping the first {} questions",
            count
        );
    }

    (0..count)
        .map(|i| Question {
            text: texts[i].as_ref().to_string(),
            options: deserialize_options(i, options[i].as_ref()),
            answer: non_empty(answers[i].as_ref()),
            code: non_empty(codes[i].as_ref()),
        })
        .collect()
}

fn serialize_options(options: &[String]) -> String {
    // A list of strings always serializes.
    serde_json::to_string(options).unwrap_or_else(|_| "[]".to_string())
}

fn deserialize_options(index: usize, raw: &str) -> Vec<String> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(text) => text,
                other => other.to_string(),
            })
            .collect(),
        Ok(other) => {
            tracing::warn!(index, value = %other, "Stored options are not a list, using none");
            Vec::new()
        }
        Err(e) => {
            tracing::warn!(index, error = %e, "Stored options are not valid JSON, using none");
            Vec::new()
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
