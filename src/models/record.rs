//! Persisted shape of a QCM in the document store.
//!
//! The store only accepts flat arrays of primitives, so the question list is
//! kept as four index-aligned columns (see [`crate::data::codec`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::data::codec::{self, QuestionColumns};

use super::{Qcm, MAX_SCORE};

/// A QCM document as stored and read back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QcmRecord {
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub module_id: String,
    /// Missing on documents written before timestamps were stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    /// Question texts.
    #[serde(default, deserialize_with = "nullable_strings")]
    pub questions: Vec<String>,
    /// JSON-serialized option lists.
    #[serde(default, deserialize_with = "nullable_strings")]
    pub options: Vec<String>,
    #[serde(default, deserialize_with = "nullable_strings")]
    pub answers: Vec<String>,
    #[serde(default, deserialize_with = "nullable_strings")]
    pub codes: Vec<String>,
}

impl QcmRecord {
    pub fn columns(&self) -> QuestionColumns {
        QuestionColumns {
            texts: self.questions.clone(),
            options: self.options.clone(),
            answers: self.answers.clone(),
            codes: self.codes.clone(),
        }
    }

    /// Rebuilds the in-memory QCM. Never fails; short or corrupt columns
    /// yield fewer or emptier questions.
    pub fn into_qcm(self) -> Qcm {
        let questions = codec::decode(&self.questions, &self.options, &self.answers, &self.codes);

        let score = self.score.map(|score| {
            if score > u32::from(MAX_SCORE) {
                tracing::warn!(score, "Stored score above {}, clamping", MAX_SCORE);
            }
            score.min(u32::from(MAX_SCORE)) as u8
        });

        Qcm {
            name: self.name,
            questions,
            module_id: self.module_id,
            score,
        }
    }
}

impl Qcm {
    pub fn to_record(&self, created_at: DateTime<Utc>) -> QcmRecord {
        let QuestionColumns {
            texts,
            options,
            answers,
            codes,
        } = codec::encode(&self.questions);

        QcmRecord {
            name: self.name.clone(),
            module_id: self.module_id.clone(),
            created_at: Some(created_at),
            score: self.score.map(u32::from),
            questions: texts,
            options,
            answers,
            codes,
        }
    }
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `null` array elements written by older clients as empty strings.
fn nullable_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Option<String>>>::deserialize(deserializer)?;
    Ok(values
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}
