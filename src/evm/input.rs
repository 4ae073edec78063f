use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::log_debug;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read bytecode from '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid hex bytecode: {source}")]
    InvalidHex {
        #[from]
        source: hex::FromHexError,
    },
}

impl InputError {
    pub fn exit_code(&self) -> i32 {
        match self {
            InputError::InvalidHex { .. } => 65,
            InputError::Io { .. } => 66,
        }
    }
}

/// Turns the `--code` argument into bytes. An argument naming an existing
/// file is read as hex text; anything else is decoded as hex directly.
pub fn resolve_code(arg: &str) -> Result<Vec<u8>, InputError> {
    let path = Path::new(arg);
    if path.exists() {
        log_debug!("Reading bytecode from file", path = arg);
        let text = fs::read_to_string(path).map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse_hex(&text)
    } else {
        parse_hex(arg)
    }
}

/// Decodes a hex string with an optional leading `0x`. ASCII whitespace
/// anywhere in the text is ignored, so `60 01` and line-wrapped files decode.
pub fn parse_hex(text: &str) -> Result<Vec<u8>, InputError> {
    let trimmed = text.trim();
    let digits: String = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed)
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    Ok(hex::decode(digits)?)
}
