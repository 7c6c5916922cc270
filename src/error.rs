//! Error taxonomy for argument handling, option resolution and conversion.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no input file specified")]
    NoInput,

    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("cannot read input file {}: {source}", .path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("multiple input files: '{first}' and '{second}'")]
    MultipleInputs { first: String, second: String },

    #[error("--theme {theme} and --font '{font}' are mutually exclusive")]
    ThemeFontConflict { theme: String, font: String },

    #[error("option '{0}' requires a value")]
    MissingValue(String),

    #[error("unknown argument: '{0}'")]
    UnknownArgument(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("argument is not valid UTF-8: '{0}'")]
    NonUtf8Argument(String),

    #[error("conversion cancelled: '{}' already exists", .0.display())]
    Cancelled(PathBuf),

    #[error("conversion failed ({})", exit_description(.code))]
    ConversionFailed { code: Option<i32> },

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {code}"),
        None => "terminated by signal".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, Error>;
