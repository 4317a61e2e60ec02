//! # Schema Node Factory
//!
//! Compiles raw schema values into [`SchemaNode`]s. All structural checks
//! happen here, in a fixed order, stopping at the first defect:
//!
//! 1. The schema must be an object.
//! 2. `type` resolves to a [`TypeSet`] (absent: every kind).
//! 3. `disallow` resolves with the same grammar (absent: nothing).
//! 4. Allowed = type minus disallow, with `number` removal taking `integer`.
//! 5. Allowed must not be empty.
//! 6. `enum`, if present, must be an array; its elements are kept in order.
//!    An empty enum compiles; no instance can then pass.
//! 7. Structural keywords compile (see [`crate::keywords`]).
//!
//! Compilation is a pure function of the raw value: compiling the same
//! schema twice yields nodes with identical validity, messages, and type
//! sets.

use jason_core::{SchemaError, TypeSet};
use serde_json::Value;

use crate::keywords::Keywords;
use crate::node::SchemaNode;
use crate::type_spec::{ResolvedTypes, TypeSpec};

/// Builds [`SchemaNode`]s from raw schema values.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaNodeFactory;

impl SchemaNodeFactory {
    /// Create a factory.
    pub fn new() -> Self {
        Self
    }

    /// Compile `raw` into a schema node.
    ///
    /// Never fails: a defective schema yields a node with
    /// `is_valid() == false` and exactly one message.
    pub fn get_schema_node(&self, raw: &Value) -> SchemaNode {
        match self.compile(raw) {
            Ok(node) => node,
            Err(error) => {
                tracing::debug!(%error, "schema failed to compile");
                SchemaNode::invalid(raw, &error)
            }
        }
    }

    /// Compile `raw`, surfacing the first structural defect as an error.
    ///
    /// Nested schemas (anonymous `type` elements, `properties`, `items`, ...)
    /// are compiled through here too, so a nested defect propagates to the
    /// parent unchanged.
    pub(crate) fn compile(&self, raw: &Value) -> Result<SchemaNode, SchemaError> {
        let Value::Object(schema) = raw else {
            return Err(SchemaError::NotAnObject);
        };

        let declared = match schema.get("type") {
            Some(value) => TypeSpec::parse(value)?.resolve(self)?,
            None => ResolvedTypes::universal(),
        };
        let disallowed = match schema.get("disallow") {
            Some(value) => TypeSpec::parse(value)?.resolve(self)?.types,
            None => TypeSet::empty(),
        };

        let allowed_types = declared.types.difference(disallowed);
        if allowed_types.is_empty() {
            return Err(SchemaError::EmptyTypeSet);
        }

        let enum_values = match schema.get("enum") {
            Some(Value::Array(values)) => Some(values.clone()),
            Some(_) => return Err(SchemaError::EnumNotArray),
            None => None,
        };

        let keywords = Keywords::compile(schema, self)?;

        tracing::trace!(allowed = %allowed_types, "compiled schema node");

        Ok(SchemaNode {
            raw: raw.clone(),
            valid: true,
            messages: Vec::new(),
            allowed_types,
            named_types: declared.named.difference(disallowed),
            enum_values,
            children: declared.anonymous,
            keywords,
        })
    }
}
