//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout the engine. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Schema defects are never thrown across the public contract. They are
//!   recorded on the compiled node as the `Display` text of a
//!   [`SchemaError`], so the wording below is part of the observable output.
//! - Configuration errors name the offending variable and its raw value.

use thiserror::Error;

/// Top-level error type for fallible ancillary APIs.
#[derive(Error, Debug)]
pub enum JasonError {
    /// A schema failed to compile.
    #[error("invalid schema: {0}")]
    Schema(#[from] SchemaError),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An instance failed validation. Carries the pointer-prefixed messages.
    #[error("validation failed:\n{}", .0.join("\n"))]
    ValidationFailed(Vec<String>),
}

/// A structural defect in a schema document.
///
/// The `Display` strings are the diagnostics stored on a compiled schema
/// node, un-prefixed. The validator adds the `#: ` root prefix when it
/// surfaces them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The schema value is not a JSON object.
    #[error("schema is not an object")]
    NotAnObject,

    /// `type` (or `disallow`) is neither a string nor an array.
    #[error("type property is neither a string nor an array")]
    IllegalType,

    /// An element of a `type` (or `disallow`) array is neither a string nor
    /// an object.
    #[error("non string or schema element in type property array")]
    IllegalTypeArrayElement,

    /// A type name outside the recognized vocabulary.
    #[error("unknown type {0}")]
    UnknownType(String),

    /// The allowed set minus the disallowed set is empty.
    #[error("schema does not allow any type??")]
    EmptyTypeSet,

    /// `enum` is present but is not an array.
    #[error("enum property is not an array")]
    EnumNotArray,

    /// A structural keyword has a value of the wrong shape.
    #[error("{keyword} property must be {expected}")]
    InvalidKeyword {
        /// The offending keyword.
        keyword: &'static str,
        /// Description of the accepted shape.
        expected: &'static str,
    },

    /// `pattern` does not compile as a regular expression.
    #[error("invalid regex {pattern}: {reason}")]
    InvalidPattern {
        /// The pattern literal.
        pattern: String,
        /// Reason reported by the regex engine.
        reason: String,
    },
}

/// Error loading validator options from the environment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed.
    #[error("invalid value {value:?} for {variable}: expected {expected}")]
    InvalidValue {
        /// Environment variable name.
        variable: &'static str,
        /// Raw value found.
        value: String,
        /// Description of what is accepted.
        expected: &'static str,
    },
}
