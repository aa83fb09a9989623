//! Error types for the paperscope CLI application.
//!
//! The variants are transparent so the underlying library, prompt, or IO error is shown to the
//! user unchanged. Citation lookups never produce an error; only searches, exports, prompts and
//! logging setup can fail.

use thiserror::Error;

/// Errors that can occur during CLI operations.
#[derive(Error, Debug)]
pub enum PaperscopeCliError {
  /// Errors from user interaction dialogs
  #[error(transparent)]
  Dialoguer(#[from] dialoguer::Error),

  /// Errors from the underlying paperscope library
  #[error(transparent)]
  Paperscope(#[from] paperscope::PaperscopeError),

  /// File system and IO operation errors
  #[error(transparent)]
  IO(#[from] std::io::Error),

  /// The log file appender could not be created
  #[error(transparent)]
  LogFile(#[from] tracing_appender::rolling::InitError),
}
