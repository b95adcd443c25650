use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum DeptrailError {
    #[error("No analyzable path at {path}")]
    #[diagnostic(code(deptrail::no_files))]
    NoFiles { path: PathBuf },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(deptrail::config))]
    Config(String),

    #[error("Could not parse {path}: {message}")]
    #[diagnostic(
        code(deptrail::tsconfig),
        help("path aliases are ignored until the file parses as JSON or JSON5")
    )]
    TsConfig { path: PathBuf, message: String },

    #[error(transparent)]
    #[diagnostic(code(deptrail::io))]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    #[diagnostic(code(deptrail::json))]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(code(deptrail::glob))]
    Glob(#[from] globset::Error),
}

pub type Result<T> = std::result::Result<T, DeptrailError>;
