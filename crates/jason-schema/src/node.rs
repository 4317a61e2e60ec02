//! # Compiled Schema Nodes
//!
//! A [`SchemaNode`] is one compiled schema unit. It is built once by
//! [`SchemaNodeFactory`](crate::SchemaNodeFactory) and never mutated
//! afterwards: validity, messages, the allowed type set, the enum domain,
//! and the compiled keywords are all fixed at construction.
//!
//! An invalid node carries exactly one un-prefixed message and nothing
//! else meaningful; its allowed set is empty and must not be used.

use std::collections::BTreeMap;

use jason_core::{SchemaError, TypeSet};
use serde_json::Value;

use crate::keywords::Keywords;

/// One compiled schema.
#[derive(Debug, Clone)]
pub struct SchemaNode {
    pub(crate) raw: Value,
    pub(crate) valid: bool,
    pub(crate) messages: Vec<String>,
    pub(crate) allowed_types: TypeSet,
    pub(crate) named_types: TypeSet,
    pub(crate) enum_values: Option<Vec<Value>>,
    pub(crate) children: BTreeMap<usize, SchemaNode>,
    pub(crate) keywords: Keywords,
}

impl SchemaNode {
    /// A node recording a single structural defect.
    pub(crate) fn invalid(raw: &Value, error: &SchemaError) -> Self {
        Self {
            raw: raw.clone(),
            valid: false,
            messages: vec![error.to_string()],
            allowed_types: TypeSet::empty(),
            named_types: TypeSet::empty(),
            enum_values: None,
            children: BTreeMap::new(),
            keywords: Keywords::default(),
        }
    }

    /// The schema value this node was compiled from.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Whether the schema compiled without defects.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Compile-time diagnostics, un-prefixed. Empty for a valid node.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// The kinds an instance may have: `type` minus `disallow`.
    /// Only meaningful when [`is_valid`](Self::is_valid) is true.
    pub fn allowed_types(&self) -> TypeSet {
        self.allowed_types
    }

    /// The subset of [`allowed_types`](Self::allowed_types) granted by plain
    /// type names rather than by anonymous schemas in a `type` array.
    pub fn named_types(&self) -> TypeSet {
        self.named_types
    }

    /// The `enum` domain in declaration order, if the schema has one.
    pub fn enum_values(&self) -> Option<&[Value]> {
        self.enum_values.as_deref()
    }

    /// Anonymous schemas from the `type` array, keyed by array index.
    pub fn children(&self) -> &BTreeMap<usize, SchemaNode> {
        &self.children
    }

    /// The anonymous schema at `index` of the `type` array, if any.
    pub fn child(&self, index: usize) -> Option<&SchemaNode> {
        self.children.get(&index)
    }

    /// Structural keywords compiled from this schema.
    pub fn keywords(&self) -> &Keywords {
        &self.keywords
    }
}
