use std::fs;
use std::io::{self, Read};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::models::{Qcm, QcmRecord};

/// Path argument that selects standard input instead of a file.
pub const STDIN_PATH: &str = "-";

/// Reads a whole text input from a file, or from stdin for `None` / `-`.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new(STDIN_PATH) => Ok(fs::read_to_string(path)?),
        _ => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

pub fn load_qcm(path: Option<&Path>) -> Result<Qcm> {
    load_json(path)
}

pub fn load_record(path: Option<&Path>) -> Result<QcmRecord> {
    load_json(path)
}

pub fn save_json<T: Serialize, P: AsRef<Path>>(path: P, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

fn load_json<T: DeserializeOwned>(path: Option<&Path>) -> Result<T> {
    let content = read_input(path)?;
    Ok(serde_json::from_str(&content)?)
}
