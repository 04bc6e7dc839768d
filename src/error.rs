use miette::Diagnostic;
use thiserror::Error;

/// Main error type for pxed operations
#[derive(Error, Diagnostic, Debug)]
pub enum PxedError {
    #[error("IO error: {0}")]
    #[diagnostic(code(pxed::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(pxed::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(pxed::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Buffer error: {message}")]
    #[diagnostic(code(pxed::buffer))]
    Buffer {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Palette error: {message}")]
    #[diagnostic(code(pxed::palette))]
    Palette {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Sync error: {message}")]
    #[diagnostic(code(pxed::sync))]
    Sync { message: String },
}

pub type Result<T> = std::result::Result<T, PxedError>;
