//! # prompt-qcm
//!
//! Multiple-choice quiz (QCM) handling for a study-aid application: turning
//! a language model's reply into questions, and storing those questions in a
//! document store that only accepts flat arrays.
//!
//! ## Usage
//!
//! ```rust
//! use chrono::Utc;
//! use prompt_qcm::{parse_completion, ParseOutcome, Qcm};
//!
//! let reply = "1. What is 2+2?\nA) 3\nB) 4\nC) 5\nAnswer: B";
//!
//! let ParseOutcome::Parsed(questions) = parse_completion(reply) else {
//!     panic!("no questions");
//! };
//! let qcm = Qcm::new(questions).with_name("Arithmetic");
//!
//! // Store, then read back.
//! let record = qcm.to_record(Utc::now());
//! assert_eq!(record.into_qcm(), qcm);
//! ```

pub mod config;
pub mod data;
mod error;
mod models;
pub mod parser;
pub mod practice;
pub mod protocol;
pub mod render;

pub use config::Config;
pub use data::{decode, encode, QuestionColumns};
pub use error::{Error, Result};
pub use models::{letter_index, option_letter, Qcm, QcmRecord, Question, MAX_SCORE};
pub use parser::{parse_completion, ParseOutcome, QcmParser, DEFAULT_REFUSAL_PHRASE};
pub use practice::{score_answers, PracticeSession, SKIP_TOKEN};
