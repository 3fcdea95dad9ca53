//! Error types for TOML parsing and post-parse access.
//!
//! Every error detected while parsing carries the 1-based number of the input
//! line where the offending logical line began, so a multi-line value that
//! fails reports the line of its `key =`, not the line where scanning stopped.
//!
//! ## Error Categories
//!
//! - **Syntax**: a logical line is neither a table header nor a key/value
//!   binding
//! - **Key conflicts / duplicate keys**: a binding collides with an existing
//!   one in a way that would require overwriting or type confusion
//! - **Unterminated constructs**: a string, array, or inline table is still
//!   open at end of input
//! - **Decode**: a scalar literal or escape sequence is malformed
//! - **Type mismatch**: a typed accessor was used against a node of a
//!   different discriminant (post-parse, no line number)
//!
//! There is no warning tier: every detected inconsistency is a hard failure,
//! and the first error aborts the parse.

use crate::value::Kind;
use thiserror::Error;

/// Represents all possible errors from parsing or typed tree access.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// I/O failure while reading input
    #[error("toml: io error: {0}")]
    Io(String),

    /// A logical line that is neither a header nor a key/value binding
    #[error("toml:{line}: {msg}")]
    Syntax { line: usize, msg: String },

    /// A key path collides with an existing binding of the wrong shape
    #[error("toml:{line}: key {key:?} already defined and is not {expected}")]
    KeyConflict {
        line: usize,
        key: String,
        expected: &'static str,
    },

    /// The final segment of a key/value path is already bound
    #[error("toml:{line}: duplicate key {key:?}")]
    DuplicateKey { line: usize, key: String },

    /// A quoted string, array, or inline table did not close before EOF
    #[error("toml:{line}: unterminated {what}")]
    Unterminated { line: usize, what: &'static str },

    /// A malformed scalar literal or escape sequence
    #[error("toml:{line}: {msg}")]
    Decode { line: usize, msg: String },

    /// A typed accessor was applied to a node of a different discriminant
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: Kind, found: Kind },
}

impl Error {
    /// Creates a syntax error for the logical line starting at `line`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_ast::Error;
    ///
    /// let err = Error::syntax(10, "invalid syntax");
    /// assert_eq!(err.to_string(), "toml:10: invalid syntax");
    /// ```
    pub fn syntax(line: usize, msg: impl Into<String>) -> Self {
        Error::Syntax {
            line,
            msg: msg.into(),
        }
    }

    /// Creates a key-conflict error; `expected` names the shape the existing
    /// binding would need ("a table" or "an array").
    pub fn key_conflict(line: usize, key: &str, expected: &'static str) -> Self {
        Error::KeyConflict {
            line,
            key: key.to_string(),
            expected,
        }
    }

    /// Creates a duplicate-key error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_ast::Error;
    ///
    /// let err = Error::duplicate_key(3, "sku");
    /// assert_eq!(err.to_string(), "toml:3: duplicate key \"sku\"");
    /// ```
    pub fn duplicate_key(line: usize, key: &str) -> Self {
        Error::DuplicateKey {
            line,
            key: key.to_string(),
        }
    }

    /// Creates an unterminated-construct error (`what` names the construct,
    /// e.g. "multiline string" or "compound value").
    pub fn unterminated(line: usize, what: &'static str) -> Self {
        Error::Unterminated { line, what }
    }

    /// Creates a decode error for a malformed literal or escape.
    pub fn decode(line: usize, msg: impl Into<String>) -> Self {
        Error::Decode {
            line,
            msg: msg.into(),
        }
    }

    /// Creates a post-parse type-mismatch error.
    pub fn type_mismatch(expected: Kind, found: Kind) -> Self {
        Error::TypeMismatch { expected, found }
    }

    /// Creates an I/O error for reader failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// The 1-based line number attached to this error, if it has one.
    ///
    /// Parse-time errors always carry one; [`Error::Io`] and
    /// [`Error::TypeMismatch`] do not.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Syntax { line, .. }
            | Error::KeyConflict { line, .. }
            | Error::DuplicateKey { line, .. }
            | Error::Unterminated { line, .. }
            | Error::Decode { line, .. } => Some(*line),
            Error::Io(_) | Error::TypeMismatch { .. } => None,
        }
    }
}

/// Alias for `std::result::Result<T, toml_ast::Error>`.
pub type Result<T> = std::result::Result<T, Error>;
