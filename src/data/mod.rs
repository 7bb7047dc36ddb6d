pub mod codec;
mod loader;

pub use codec::{decode, encode, QuestionColumns};
pub use loader::{load_qcm, load_record, read_input, save_json, STDIN_PATH};
