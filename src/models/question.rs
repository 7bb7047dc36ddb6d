use serde::{Deserialize, Serialize};

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
    /// Letter of the correct option as written by the model, e.g. `"B"`.
    #[serde(default)]
    pub answer: Option<String>,
}

impl Question {
    pub fn new(text: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            text: text.into(),
            code: None,
            options,
            answer: None,
        }
    }

    pub fn with_answer(mut self, answer: impl Into<String>) -> Self {
        self.answer = Some(answer.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Resolves the answer letter to an option index.
    ///
    /// Only the first character of the answer counts, so `"b"` and `"B) 4"`
    /// both resolve to `1`. Returns `None` when the letter falls outside
    /// the available options.
    pub fn answer_index(&self) -> Option<usize> {
        let letter = self.answer.as_deref()?.trim().chars().next()?;
        letter_index(letter).filter(|&index| index < self.options.len())
    }

    pub fn correct_option(&self) -> Option<&str> {
        self.answer_index()
            .and_then(|index| self.options.get(index))
            .map(String::as_str)
    }

    pub fn is_correct(&self, option_index: usize) -> bool {
        self.answer_index() == Some(option_index)
    }
}

/// Letter shown in front of the option at `index` (0 = `A`).
pub fn option_letter(index: usize) -> Option<char> {
    u8::try_from(index)
        .ok()
        .filter(|&i| i < 26)
        .map(|i| char::from(b'A' + i))
}

/// Inverse of [`option_letter`], case-insensitive.
pub fn letter_index(letter: char) -> Option<usize> {
    if !letter.is_ascii_alphabetic() {
        return None;
    }
    Some((letter.to_ascii_uppercase() as u8 - b'A') as usize)
}
