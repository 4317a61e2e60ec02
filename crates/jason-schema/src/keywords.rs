//! # Structural Keywords
//!
//! Compiles the draft-03 structural keywords of a schema into [`Keywords`],
//! and checks instances against them through the [`KeywordValidator`]
//! collaborator contract.
//!
//! ## Vocabulary
//!
//! | Instance kind | Keywords |
//! |---------------|----------|
//! | number        | `minimum`, `maximum`, `exclusiveMinimum`, `exclusiveMaximum`, `divisibleBy` |
//! | string        | `minLength`, `maxLength`, `pattern` |
//! | array         | `minItems`, `maxItems`, `uniqueItems`, `items`, `additionalItems` |
//! | object        | `properties` (+ per-property `required`), `additionalProperties` |
//!
//! A keyword only constrains instances of its kind; a `minLength` on a
//! number is ignored.
//!
//! ## Division of Labour
//!
//! Keyword validators perform *leaf* checks on the current instance and
//! return un-prefixed descriptions. Descending into child schemas
//! (`properties`, `items`, ...) is the [`Validator`](crate::Validator)'s job,
//! since only it knows the pointer of each child.

use std::collections::BTreeMap;

use jason_core::{json_equals, JsonPointer, SchemaError};
use regex::Regex;
use serde_json::{Map, Number, Value};

use crate::factory::SchemaNodeFactory;
use crate::node::SchemaNode;

/// A check run on every visited instance location.
///
/// Implementations receive the compiled node, the instance value at the
/// current location, and that location's pointer, and return zero or more
/// diagnostic descriptions without any pointer prefix.
pub trait KeywordValidator: Send + Sync + std::fmt::Debug {
    /// Check `instance` against `node`.
    fn validate_keyword(
        &self,
        node: &SchemaNode,
        instance: &Value,
        pointer: &JsonPointer,
    ) -> Vec<String>;
}

/// A numeric bound from `minimum`/`maximum` and its `exclusive*` flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    /// The limit value.
    pub limit: f64,
    /// Whether the limit itself is excluded.
    pub exclusive: bool,
}

/// How `items` constrains array elements.
#[derive(Debug, Clone, Default)]
pub enum Items {
    /// No `items` keyword.
    #[default]
    Any,
    /// Every element validates against one schema.
    Uniform(Box<SchemaNode>),
    /// Element `i` validates against schema `i` (tuple typing).
    Tuple(Vec<SchemaNode>),
}

/// The value of `additionalItems` or `additionalProperties`.
#[derive(Debug, Clone, Default)]
pub enum Additional {
    /// Absent or `true`.
    #[default]
    Allowed,
    /// `false`.
    Forbidden,
    /// Extra members validate against this schema.
    Schema(Box<SchemaNode>),
}

impl Additional {
    /// The schema form, if this is one.
    pub fn schema(&self) -> Option<&SchemaNode> {
        match self {
            Self::Schema(schema) => Some(schema.as_ref()),
            Self::Allowed | Self::Forbidden => None,
        }
    }
}

/// Structural keywords compiled from one schema.
#[derive(Debug, Clone, Default)]
pub struct Keywords {
    pub(crate) minimum: Option<Bound>,
    pub(crate) maximum: Option<Bound>,
    pub(crate) divisible_by: Option<Number>,
    pub(crate) min_length: Option<u64>,
    pub(crate) max_length: Option<u64>,
    pub(crate) pattern: Option<Regex>,
    pub(crate) min_items: Option<u64>,
    pub(crate) max_items: Option<u64>,
    pub(crate) unique_items: bool,
    pub(crate) items: Items,
    pub(crate) additional_items: Additional,
    pub(crate) required: bool,
    pub(crate) properties: BTreeMap<String, SchemaNode>,
    pub(crate) additional_properties: Additional,
}

impl Keywords {
    /// Compile the structural keywords of `schema`.
    ///
    /// Keywords are checked in the order of the table in the module docs;
    /// the first malformed one is the error. Nested schemas are compiled
    /// with `factory`.
    pub(crate) fn compile(
        schema: &Map<String, Value>,
        factory: &SchemaNodeFactory,
    ) -> Result<Self, SchemaError> {
        let minimum = number_keyword(schema, "minimum")?;
        let exclusive_minimum = flag_keyword(schema, "exclusiveMinimum")?;
        let maximum = number_keyword(schema, "maximum")?;
        let exclusive_maximum = flag_keyword(schema, "exclusiveMaximum")?;

        let divisible_by = match number_keyword(schema, "divisibleBy")? {
            Some(d) if d <= 0.0 => {
                return Err(SchemaError::InvalidKeyword {
                    keyword: "divisibleBy",
                    expected: "a number greater than zero",
                })
            }
            Some(_) => match schema.get("divisibleBy") {
                Some(Value::Number(divisor)) => Some(divisor.clone()),
                _ => None,
            },
            None => None,
        };

        let min_length = count_keyword(schema, "minLength")?;
        let max_length = count_keyword(schema, "maxLength")?;
        let pattern = match schema.get("pattern") {
            None => None,
            Some(Value::String(pattern)) => Some(Regex::new(pattern).map_err(|e| {
                SchemaError::InvalidPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                }
            })?),
            Some(_) => {
                return Err(SchemaError::InvalidKeyword {
                    keyword: "pattern",
                    expected: "a string",
                })
            }
        };

        let min_items = count_keyword(schema, "minItems")?;
        let max_items = count_keyword(schema, "maxItems")?;
        let unique_items = flag_keyword(schema, "uniqueItems")?;
        let items = match schema.get("items") {
            None => Items::Any,
            Some(raw @ Value::Object(_)) => Items::Uniform(Box::new(factory.compile(raw)?)),
            Some(Value::Array(raws)) => Items::Tuple(
                raws.iter()
                    .map(|raw| factory.compile(raw))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Some(_) => {
                return Err(SchemaError::InvalidKeyword {
                    keyword: "items",
                    expected: "a schema or an array of schemas",
                })
            }
        };
        let additional_items = additional_keyword(schema, "additionalItems", factory)?;

        let required = flag_keyword(schema, "required")?;
        let properties = match schema.get("properties") {
            None => BTreeMap::new(),
            Some(Value::Object(members)) => members
                .iter()
                .map(|(name, raw)| factory.compile(raw).map(|node| (name.clone(), node)))
                .collect::<Result<BTreeMap<_, _>, _>>()?,
            Some(_) => {
                return Err(SchemaError::InvalidKeyword {
                    keyword: "properties",
                    expected: "an object of schemas",
                })
            }
        };
        let additional_properties = additional_keyword(schema, "additionalProperties", factory)?;

        Ok(Self {
            minimum: minimum.map(|limit| Bound {
                limit,
                exclusive: exclusive_minimum,
            }),
            maximum: maximum.map(|limit| Bound {
                limit,
                exclusive: exclusive_maximum,
            }),
            divisible_by,
            min_length,
            max_length,
            pattern,
            min_items,
            max_items,
            unique_items,
            items,
            additional_items,
            required,
            properties,
            additional_properties,
        })
    }

    /// The `items` constraint.
    pub fn items(&self) -> &Items {
        &self.items
    }

    /// The `additionalItems` constraint. Only consulted for tuple `items`.
    pub fn additional_items(&self) -> &Additional {
        &self.additional_items
    }

    /// Compiled `properties`, sorted by name.
    pub fn properties(&self) -> &BTreeMap<String, SchemaNode> {
        &self.properties
    }

    /// The `additionalProperties` constraint.
    pub fn additional_properties(&self) -> &Additional {
        &self.additional_properties
    }

    /// Whether this schema, used as a property schema, marks the property
    /// as required.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The schema an object member named `name` validates against:
    /// its `properties` entry, else an `additionalProperties` schema.
    pub fn property_schema(&self, name: &str) -> Option<&SchemaNode> {
        self.properties
            .get(name)
            .or_else(|| self.additional_properties.schema())
    }

    /// The schema array element `index` validates against, if any.
    pub fn item_schema(&self, index: usize) -> Option<&SchemaNode> {
        match &self.items {
            Items::Any => None,
            Items::Uniform(schema) => Some(schema.as_ref()),
            Items::Tuple(schemas) => schemas
                .get(index)
                .or_else(|| self.additional_items.schema()),
        }
    }
}

fn number_keyword(
    schema: &Map<String, Value>,
    keyword: &'static str,
) -> Result<Option<f64>, SchemaError> {
    match schema.get(keyword) {
        None => Ok(None),
        Some(Value::Number(n)) => n.as_f64().map(Some).ok_or(SchemaError::InvalidKeyword {
            keyword,
            expected: "a number",
        }),
        Some(_) => Err(SchemaError::InvalidKeyword {
            keyword,
            expected: "a number",
        }),
    }
}

fn count_keyword(
    schema: &Map<String, Value>,
    keyword: &'static str,
) -> Result<Option<u64>, SchemaError> {
    match schema.get(keyword) {
        None => Ok(None),
        Some(value) => value.as_u64().map(Some).ok_or(SchemaError::InvalidKeyword {
            keyword,
            expected: "a non-negative integer",
        }),
    }
}

fn flag_keyword(schema: &Map<String, Value>, keyword: &'static str) -> Result<bool, SchemaError> {
    match schema.get(keyword) {
        None => Ok(false),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(_) => Err(SchemaError::InvalidKeyword {
            keyword,
            expected: "a boolean",
        }),
    }
}

fn additional_keyword(
    schema: &Map<String, Value>,
    keyword: &'static str,
    factory: &SchemaNodeFactory,
) -> Result<Additional, SchemaError> {
    match schema.get(keyword) {
        None | Some(Value::Bool(true)) => Ok(Additional::Allowed),
        Some(Value::Bool(false)) => Ok(Additional::Forbidden),
        Some(raw @ Value::Object(_)) => Ok(Additional::Schema(Box::new(factory.compile(raw)?))),
        Some(_) => Err(SchemaError::InvalidKeyword {
            keyword,
            expected: "a boolean or a schema",
        }),
    }
}

/// The built-in leaf checks for the structural keyword vocabulary.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralKeywords;

impl KeywordValidator for StructuralKeywords {
    fn validate_keyword(
        &self,
        node: &SchemaNode,
        instance: &Value,
        _pointer: &JsonPointer,
    ) -> Vec<String> {
        let keywords = node.keywords();
        match instance {
            Value::Number(n) => check_number(keywords, n),
            Value::String(s) => check_string(keywords, s),
            Value::Array(elements) => check_array(keywords, elements),
            Value::Object(members) => check_object(keywords, members),
            Value::Null | Value::Bool(_) => Vec::new(),
        }
    }
}

fn check_number(keywords: &Keywords, n: &Number) -> Vec<String> {
    let mut messages = Vec::new();
    let Some(value) = n.as_f64() else {
        return messages;
    };
    let shown = n.to_string();
    if let Some(Bound { limit, exclusive }) = keywords.minimum {
        if exclusive && value <= limit {
            messages.push(format!(
                "number {shown} is not strictly greater than the required minimum {limit}"
            ));
        } else if value < limit {
            messages.push(format!("number {shown} is lower than the required minimum {limit}"));
        }
    }
    if let Some(Bound { limit, exclusive }) = keywords.maximum {
        if exclusive && value >= limit {
            messages.push(format!(
                "number {shown} is not strictly lower than the required maximum {limit}"
            ));
        } else if value > limit {
            messages.push(format!("number {shown} is greater than the required maximum {limit}"));
        }
    }
    if let Some(divisor) = &keywords.divisible_by {
        if !is_multiple(n, divisor) {
            messages.push(format!("number {shown} is not a multiple of {divisor}"));
        }
    }
    messages
}

/// Exact remainder for integer operands; the tolerance only applies once a
/// fractional number is involved. `divisor` is positive.
fn is_multiple(n: &Number, divisor: &Number) -> bool {
    if let Some(d) = divisor.as_u64() {
        if let Some(a) = n.as_u64() {
            return a % d == 0;
        }
        if let Some(a) = n.as_i64() {
            return a.unsigned_abs() % d == 0;
        }
    }
    match (n.as_f64(), divisor.as_f64()) {
        (Some(value), Some(divisor)) => {
            let quotient = value / divisor;
            (quotient - quotient.round()).abs() <= 1e-9
        }
        _ => true,
    }
}

fn check_string(keywords: &Keywords, s: &str) -> Vec<String> {
    let mut messages = Vec::new();
    let length = s.chars().count() as u64;
    if let Some(min) = keywords.min_length {
        if length < min {
            messages.push(format!("string is too short (length {length}, minimum {min})"));
        }
    }
    if let Some(max) = keywords.max_length {
        if length > max {
            messages.push(format!("string is too long (length {length}, maximum {max})"));
        }
    }
    if let Some(pattern) = &keywords.pattern {
        if !pattern.is_match(s) {
            messages.push(format!("string does not match regex {}", pattern.as_str()));
        }
    }
    messages
}

fn check_array(keywords: &Keywords, elements: &[Value]) -> Vec<String> {
    let mut messages = Vec::new();
    let length = elements.len() as u64;
    if let Some(min) = keywords.min_items {
        if length < min {
            messages.push(format!("array has too few elements ({length}, minimum {min})"));
        }
    }
    if let Some(max) = keywords.max_items {
        if length > max {
            messages.push(format!("array has too many elements ({length}, maximum {max})"));
        }
    }
    if keywords.unique_items {
        let duplicated = elements.iter().enumerate().any(|(i, a)| {
            elements[i + 1..].iter().any(|b| json_equals(a, b))
        });
        if duplicated {
            messages.push("array elements are not unique".to_string());
        }
    }
    if let (Items::Tuple(schemas), Additional::Forbidden) =
        (&keywords.items, &keywords.additional_items)
    {
        if elements.len() > schemas.len() {
            messages.push(format!(
                "additional items are not allowed (tuple of {}, found {})",
                schemas.len(),
                elements.len()
            ));
        }
    }
    messages
}

fn check_object(keywords: &Keywords, members: &Map<String, Value>) -> Vec<String> {
    let mut messages: Vec<String> = keywords
        .properties
        .iter()
        .filter(|(name, schema)| schema.keywords.required && !members.contains_key(*name))
        .map(|(name, _)| format!("required property {name} is missing"))
        .collect();
    if matches!(keywords.additional_properties, Additional::Forbidden) {
        messages.extend(
            members
                .keys()
                .filter(|name| !keywords.properties.contains_key(*name))
                .map(|name| format!("additional property {name} is not allowed")),
        );
    }
    messages
}
