//! # docweave
//!
//! `docweave` generates documentation comments for source code. It detects the
//! documentable unit around a cursor (module, function, class, or an explicit
//! selection) using bounded line scans rather than a full parser, builds a
//! language-specific prompt, sends it to a generative text backend, and inserts
//! the cleaned response back into the buffer with correct indentation and
//! comment delimiters.
//!
//! ## Features
//!
//! - **Heuristic region detection**: module mode at the top of the file,
//!   byte-exact selection mode, and an upward/downward line scan for the
//!   enclosing definition — no grammar, explicit termination conditions.
//! - **Per-language profiles**: detection pattern, block-open marker, comment
//!   delimiters, and prompt phrasing registered as immutable data; adding a
//!   dialect is a pure data addition. Python and PowerShell ship built in.
//! - **Response cleanup**: a fixed, order-sensitive transform that strips
//!   code fences, duplicated delimiters, and echoed source from backend
//!   output.
//! - **Safe insertion**: comments are spliced in at a computed point; existing
//!   buffer content is never replaced or deleted.
//!
//! ## Quick Start
//!
//! ```rust
//! use docweave::{detect, profile_for, Buffer, Position, Target};
//!
//! let buffer = Buffer::new("def add(a, b):\n    return a + b\n");
//! let profile = profile_for("python").unwrap();
//!
//! let context = detect(&buffer, Target::Cursor(Position::new(1, 0)), profile)
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(context.definition_line, 0);
//! assert_eq!(context.code, "def add(a, b):\n    return a + b");
//! ```
//!
//! ## Running the pipeline
//!
//! [`Documenter`] drives the whole flow. The backend sits behind the
//! [`Generate`] trait, so anything that can turn a prompt into text plugs in:
//!
//! ```rust
//! use docweave::{Buffer, Documenter, Generate, Position, Result, Target};
//!
//! struct Canned;
//!
//! impl Generate for Canned {
//!     fn generate(&self, _prompt: &str) -> Result<String> {
//!         Ok("Add two numbers and return the sum.".to_string())
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let documenter = Documenter::new(Box::new(Canned));
//! let mut buffer = Buffer::new("def add(a, b):\n    return a + b\n");
//! documenter.document(&mut buffer, Target::Cursor(Position::new(1, 0)), "python")?;
//! assert!(buffer.text().contains("Add two numbers"));
//! # Ok(())
//! # }
//! ```
//!
//! Production use builds the documenter from persisted [`Settings`] with
//! [`Documenter::from_settings`], which talks to a Gemini-style
//! `generateContent` endpoint over HTTP.
//!
//! ## Error Handling
//!
//! Every failure maps to one [`Error`] variant — configuration, unsupported
//! language, detection failure, malformed context, backend error, or response
//! shape — so callers can surface a single message to the user.

mod buffer;
mod config;
mod detect;
mod error;
mod generate;
mod insert;
mod pipeline;
mod profile;
mod prompt;

pub use buffer::{Buffer, Position, Span, Target};
pub use config::{API_KEY_ENV, CONFIG_FILE, MODEL_CHOICES, Settings};
pub use detect::{CodeContext, detect};
pub use error::{Error, Result};
pub use generate::{Generate, GeminiClient, clean_response, parse_response};
pub use insert::insert_comment;
pub use pipeline::Documenter;
pub use profile::{
    CommentDelimiters, Language, LanguageProfile, PromptSettings, language_for_extension,
    profile_for,
};
pub use prompt::build_prompt;
