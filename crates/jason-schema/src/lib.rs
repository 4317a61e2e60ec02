#![deny(missing_docs)]

//! # jason-schema — Schema Compilation & Instance Validation
//!
//! Two phases, each producing an ordered list of human-readable diagnostics:
//!
//! 1. **Compilation** ([`SchemaNodeFactory::get_schema_node`]) turns a raw
//!    schema value into an immutable [`SchemaNode`]. Structural defects
//!    (non-object schema, malformed `type`/`disallow`, unknown type names,
//!    an empty permitted type set, malformed keywords) mark the node
//!    invalid with exactly one un-prefixed message. The first defect wins.
//!
//! 2. **Validation** ([`Validator::validate`]) checks an instance against a
//!    compiled root node: type kind, `enum` membership, then the structural
//!    keyword validators, descending into `properties` and `items`. Every
//!    message is prefixed with the instance pointer (`#`, `#/a/0`, ...).
//!
//! ## Usage
//!
//! ```
//! use jason_schema::Validator;
//! use serde_json::json;
//!
//! let mut validator = Validator::new(&json!({"type": "string", "enum": ["a", "b"]}));
//! assert!(validator.validate(&json!("a")));
//! assert!(!validator.validate(&json!("c")));
//! assert_eq!(
//!     validator.messages(),
//!     vec!["#: node does not match any value in the enumeration".to_string()]
//! );
//! ```
//!
//! ## Crate Policy
//!
//! - Depends only on `jason-core` internally.
//! - Compilation and validation never return `Err` and never panic:
//!   failures are data on the node or in the report.
//! - Compiled nodes are immutable and `Send + Sync`; [`Validator::check`]
//!   takes `&self` and may run concurrently on a shared validator.

pub mod factory;
pub mod keywords;
pub mod node;
pub mod options;
pub mod report;
pub mod type_spec;
pub mod validator;

pub use factory::SchemaNodeFactory;
pub use keywords::{KeywordValidator, StructuralKeywords};
pub use node::SchemaNode;
pub use options::ValidatorOptions;
pub use report::{Diagnostic, DiagnosticKind, ValidationReport};
pub use type_spec::{ResolvedTypes, TypeSpec};
pub use validator::Validator;
