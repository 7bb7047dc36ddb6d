use serde::{Deserialize, Serialize};

use super::Question;

/// Highest value a practice score can take.
pub const MAX_SCORE: u8 = 100;

/// A multiple-choice quiz attached to a course module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Qcm {
    /// Empty until the user saves the quiz.
    #[serde(default)]
    pub name: String,
    pub questions: Vec<Question>,
    #[serde(default)]
    pub module_id: String,
    /// Percentage from the last practice attempt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
}

impl Qcm {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_module_id(mut self, module_id: impl Into<String>) -> Self {
        self.module_id = module_id.into();
        self
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Stores a practice score, capped at [`MAX_SCORE`].
    pub fn record_score(&mut self, percent: u8) {
        self.score = Some(percent.min(MAX_SCORE));
    }
}
