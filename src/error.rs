use std::io;
use thiserror::Error;

/// Error types for the docweave library.
///
/// Every failure the pipeline can produce maps to exactly one variant so the
/// command layer can turn it into a single user-visible message. None of these
/// are recoverable mid-pipeline; a failed generation requires the user to
/// re-invoke the command.
///
/// # Examples
///
/// ```
/// use docweave::Error;
///
/// let error = Error::Config("api_key is not set".to_string());
/// assert!(matches!(error, Error::Config(_)));
///
/// let error = Error::Backend { status: 429, message: "quota exceeded".to_string() };
/// assert!(error.to_string().contains("429"));
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Missing or invalid settings; the pipeline does not start
    #[error("configuration error: {0}")]
    Config(String),

    /// The buffer's language tag has no registered profile
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// No enclosing definition was found above the cursor
    #[error("no function or class definition found above the cursor")]
    DetectionFailed,

    /// The strict upward scan hit a line that is neither a definition nor a
    /// signature continuation (1-based line number)
    #[error("line {0} does not look like part of a definition; place the cursor on a signature")]
    MalformedContext(usize),

    /// The generation backend returned a non-success status or the call failed
    #[error("generation backend error (status {status}): {message}")]
    Backend {
        /// HTTP status of the failed call, or 0 when the request never completed
        status: u16,
        /// Error message from the backend, or the transport error text
        message: String,
    },

    /// The backend response parsed but contained no extractable text
    #[error("unexpected response shape from generation backend: {0}")]
    ResponseShape(String),
}

/// Result type alias for docweave operations.
///
/// # Examples
///
/// ```
/// use docweave::{Error, Result};
///
/// fn lookup(tag: &str) -> Result<()> {
///     Err(Error::UnsupportedLanguage(tag.to_string()))
/// }
///
/// assert!(lookup("cobol").is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;
