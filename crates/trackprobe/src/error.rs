//! Extraction error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while extracting track attributes
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("failed to create temp directory for analyzer output")]
    TempDir(#[source] std::io::Error),

    #[error("failed to launch analyzer: {command}")]
    AnalyzerLaunch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "analyzer failed with exit code {code:?}\n\
         command: {command}\n\
         --- stdout ---\n{stdout}\n\
         --- stderr ---\n{stderr}"
    )]
    AnalyzerFailed {
        command: String,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("failed to read analyzer statistics file: {path}")]
    StatsUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("analyzer statistics file is not valid JSON: {path}")]
    StatsInvalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, ExtractError>;
