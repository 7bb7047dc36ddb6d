use std::env;

use dotenvy::dotenv;

use crate::error::{Error, Result};
use crate::parser::{QcmParser, DEFAULT_REFUSAL_PHRASE};

pub const REFUSAL_PHRASE_VAR: &str = "PROMPTQCM_REFUSAL_PHRASE";
pub const LOG_VAR: &str = "PROMPTQCM_LOG";
pub const DEFAULT_LOG_FILTER: &str = "prompt_qcm=info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Sentence the model answers with when it declines a request.
    pub refusal_phrase: String,
    /// `tracing` filter directive, used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refusal_phrase: DEFAULT_REFUSAL_PHRASE.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Reads the environment, loading `.env` first if one exists.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            refusal_phrase: get_or(&lookup, REFUSAL_PHRASE_VAR, defaults.refusal_phrase)?,
            log_filter: get_or(&lookup, LOG_VAR, defaults.log_filter)?,
        })
    }

    /// Applies a command-line override of the refusal phrase.
    pub fn with_refusal_phrase(mut self, phrase: Option<String>) -> Result<Self> {
        if let Some(phrase) = phrase {
            self.refusal_phrase = non_empty(REFUSAL_PHRASE_VAR, phrase)?;
        }
        Ok(self)
    }

    pub fn parser(&self) -> QcmParser {
        QcmParser::new(self.refusal_phrase.clone())
    }
}

fn get_or<F>(lookup: &F, name: &str, default: String) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) => non_empty(name, value),
        None => Ok(default),
    }
}

fn non_empty(name: &str, value: String) -> Result<String> {
    if value.trim().is_empty() {
        Err(Error::Config(format!("{} must not be empty", name)))
    } else {
        Ok(value)
    }
}
