//! # Type Specifications
//!
//! The value of a `type` or `disallow` property is one of three shapes: a
//! type name, an array of names and anonymous schemas, or something
//! malformed. [`TypeSpec::parse`] turns the raw value into a tagged variant,
//! and [`TypeSpec::resolve`] folds it into a [`TypeSet`] in one recursive
//! pass, compiling anonymous schemas along the way.
//!
//! ## Grammar
//!
//! ```text
//! TypeSpec  := Name                     "string", "integer", ..., "any"
//!            | Union [ Element* ]       array of elements
//! Element   := Name | Anonymous         anonymous = nested schema object
//! ```
//!
//! Anything else is a [`SchemaError`]. Array elements are checked in order,
//! so the first bad element determines the message.

use std::collections::BTreeMap;

use jason_core::{SchemaError, TypeName, TypeSet};
use serde_json::Value;

use crate::factory::SchemaNodeFactory;
use crate::node::SchemaNode;

/// A parsed `type` or `disallow` property.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeSpec<'a> {
    /// A single type name, or `any`.
    Name(TypeName),
    /// An array of names and anonymous schemas.
    Union(Vec<TypeSpec<'a>>),
    /// A schema object appearing as a union element.
    Anonymous(&'a Value),
}

/// The outcome of resolving a [`TypeSpec`].
#[derive(Debug, Clone, Default)]
pub struct ResolvedTypes {
    /// Every kind the spec admits, including those contributed by
    /// anonymous schemas.
    pub types: TypeSet,
    /// Kinds admitted by plain type names only.
    pub named: TypeSet,
    /// Compiled anonymous schemas keyed by their index in the union array.
    pub anonymous: BTreeMap<usize, SchemaNode>,
}

impl ResolvedTypes {
    /// What an absent `type` property resolves to: every kind, by name.
    pub fn universal() -> Self {
        Self {
            types: TypeSet::all(),
            named: TypeSet::all(),
            anonymous: BTreeMap::new(),
        }
    }

    /// What an absent `disallow` property resolves to.
    pub fn nothing() -> Self {
        Self::default()
    }
}

impl<'a> TypeSpec<'a> {
    /// Parse the raw value of a `type` or `disallow` property.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::UnknownType`] for an unrecognized name.
    /// - [`SchemaError::IllegalTypeArrayElement`] for an array element that
    ///   is neither a string nor an object.
    /// - [`SchemaError::IllegalType`] when the value is neither a string nor
    ///   an array.
    pub fn parse(value: &'a Value) -> Result<Self, SchemaError> {
        match value {
            Value::String(name) => Ok(Self::Name(name.parse()?)),
            Value::Array(elements) => elements
                .iter()
                .map(Self::parse_element)
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Union),
            _ => Err(SchemaError::IllegalType),
        }
    }

    fn parse_element(value: &'a Value) -> Result<Self, SchemaError> {
        match value {
            Value::String(name) => Ok(Self::Name(name.parse()?)),
            Value::Object(_) => Ok(Self::Anonymous(value)),
            _ => Err(SchemaError::IllegalTypeArrayElement),
        }
    }

    /// Fold this spec into the set of kinds it admits.
    ///
    /// Anonymous schemas are compiled with `factory`; the first one that
    /// fails to compile fails the whole resolution with its own error.
    pub fn resolve(&self, factory: &SchemaNodeFactory) -> Result<ResolvedTypes, SchemaError> {
        let mut resolved = ResolvedTypes::nothing();
        match self {
            Self::Name(name) => {
                let set = TypeSet::from_name(*name);
                resolved.types = set;
                resolved.named = set;
            }
            Self::Anonymous(raw) => {
                let node = factory.compile(raw)?;
                resolved.types = node.allowed_types();
                resolved.anonymous.insert(0, node);
            }
            Self::Union(elements) => {
                for (index, element) in elements.iter().enumerate() {
                    let mut part = element.resolve(factory)?;
                    resolved.types = resolved.types.union(part.types);
                    resolved.named = resolved.named.union(part.named);
                    if let Some(node) = part.anonymous.remove(&0) {
                        resolved.anonymous.insert(index, node);
                    }
                }
            }
        }
        Ok(resolved)
    }
}
