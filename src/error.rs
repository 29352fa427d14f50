//! Crate-level error type and `Result` alias.
//! Converts underlying I/O, XML and JSON errors, and provides semantic variants
//! for setup validation and external tool failures.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML write error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(
        "Can't create the output directory because there is a file with the same name. Remove: {}",
        .path.display()
    )]
    OutputPathConflict { path: PathBuf },

    #[error("No L2A products found !")]
    NoInputs,

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Failed to launch {tool}: {source}")]
    ToolSpawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("OTB application error: {tool} exited with {}", .code.map_or_else(|| "a signal".to_string(), |c| format!("code {c}")))]
    ToolFailed { tool: String, code: Option<i32> },
}

impl Error {
    pub fn invalid<V: std::fmt::Display>(arg: &'static str, value: V) -> Self {
        Error::InvalidArgument {
            arg,
            value: value.to_string(),
        }
    }
}
