mod qcm;
mod question;
mod record;

pub use qcm::{Qcm, MAX_SCORE};
pub use question::{letter_index, option_letter, Question};
pub use record::QcmRecord;
