#![deny(missing_docs)]

//! # jason-core — Foundational Types for the Schema Engine
//!
//! This crate holds the small, exact vocabulary the schema compiler and the
//! instance validator share. It depends on nothing internal; `jason-schema`
//! builds on top of it.
//!
//! ## Key Design Principles
//!
//! 1. **One closed `TypeKind` enum.** The seven primitive kinds a schema can
//!    name. Every `match` on it is exhaustive.
//!
//! 2. **`TypeSet` is the only place the `integer ⊂ number` rule lives.**
//!    Subtracting `number` also subtracts `integer`, and an integral
//!    instance is admitted by either kind.
//!
//! 3. **Diagnostics are error values.** Each schema defect is a
//!    `SchemaError` variant whose `Display` text is the exact diagnostic
//!    recorded on a compiled schema node.
//!
//! 4. **Pointers are values.** `JsonPointer` is immutable; descending
//!    produces a new pointer, so sibling traversals never share state.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `jason-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod equality;
pub mod error;
pub mod kind;
pub mod pointer;
pub mod type_set;

// Re-export primary types for ergonomic imports.
pub use equality::json_equals;
pub use error::{ConfigError, JasonError, SchemaError};
pub use kind::{TypeKind, TypeName, TYPE_KIND_COUNT};
pub use pointer::JsonPointer;
pub use type_set::TypeSet;
