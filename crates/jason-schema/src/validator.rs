//! # Instance Validator
//!
//! Wraps at most one compiled root [`SchemaNode`] and validates instances
//! against it.
//!
//! ## Outcomes
//!
//! - No schema: one diagnostic, `#: schema is null`.
//! - Invalid root schema: its compile-time messages, each prefixed `#: `.
//! - Otherwise a depth-first walk of the instance. At each location:
//!   1. type check (a mismatch ends the checks at that location);
//!   2. `enum` membership, by structural equality;
//!   3. keyword validators: the built-in structural checks, then any
//!      registered custom validators;
//!   4. descent into object members (instance key order) and array
//!      elements (index order) that have a child schema.
//!
//! ## Concurrency
//!
//! [`Validator::check`] takes `&self` and builds its diagnostics in a fresh
//! buffer, so one validator can be shared across threads.
//! [`Validator::validate`] additionally stores the report for
//! [`Validator::messages`], which requires exclusive access.

use jason_core::{json_equals, JsonPointer, TypeKind};
use serde_json::Value;

use crate::factory::SchemaNodeFactory;
use crate::keywords::{KeywordValidator, StructuralKeywords};
use crate::node::SchemaNode;
use crate::options::ValidatorOptions;
use crate::report::{Diagnostic, DiagnosticKind, ValidationReport};

/// Validates instances against a compiled schema.
#[derive(Debug)]
pub struct Validator {
    root: Option<SchemaNode>,
    options: ValidatorOptions,
    structural: StructuralKeywords,
    custom: Vec<Box<dyn KeywordValidator>>,
    last: ValidationReport,
}

impl Validator {
    /// Compile `schema` and wrap it.
    ///
    /// Compilation never fails here; an invalid schema makes every
    /// validation fail with the schema's own messages.
    pub fn new(schema: &Value) -> Self {
        Self::from_schema(Some(schema))
    }

    /// A validator with no schema. Every validation fails.
    pub fn null() -> Self {
        Self::from_schema(None)
    }

    /// Compile `schema` if present.
    pub fn from_schema(schema: Option<&Value>) -> Self {
        let factory = SchemaNodeFactory::new();
        Self {
            root: schema.map(|raw| factory.get_schema_node(raw)),
            options: ValidatorOptions::default(),
            structural: StructuralKeywords,
            custom: Vec::new(),
            last: ValidationReport::default(),
        }
    }

    /// Replace the options.
    #[must_use]
    pub fn with_options(mut self, options: ValidatorOptions) -> Self {
        self.options = options;
        self
    }

    /// Register a custom keyword validator. Custom validators run after the
    /// built-in checks, in registration order, at every visited location.
    #[must_use]
    pub fn with_keyword_validator<K>(mut self, validator: K) -> Self
    where
        K: KeywordValidator + 'static,
    {
        self.custom.push(Box::new(validator));
        self
    }

    /// The compiled root schema, if any.
    pub fn root_schema(&self) -> Option<&SchemaNode> {
        self.root.as_ref()
    }

    /// The active options.
    pub fn options(&self) -> ValidatorOptions {
        self.options
    }

    /// Validate `instance` without touching stored state.
    pub fn check(&self, instance: &Value) -> ValidationReport {
        let root = JsonPointer::root();
        let diagnostics = match &self.root {
            None => vec![Diagnostic::new(DiagnosticKind::NullSchema, &root, "schema is null")],
            Some(node) if !node.is_valid() => node
                .messages()
                .iter()
                .map(|message| {
                    Diagnostic::new(DiagnosticKind::SchemaStructure, &root, message.as_str())
                })
                .collect(),
            Some(node) => {
                let mut diagnostics = Vec::new();
                self.visit(node, instance, &root, &mut diagnostics);
                diagnostics
            }
        };
        tracing::debug!(
            diagnostics = diagnostics.len(),
            passed = diagnostics.is_empty(),
            "validation finished"
        );
        ValidationReport::from_diagnostics(diagnostics)
    }

    /// Validate `instance`, replacing the stored report.
    ///
    /// Returns true iff no diagnostics were produced.
    pub fn validate(&mut self, instance: &Value) -> bool {
        self.last = self.check(instance);
        self.last.passed()
    }

    /// Messages from the most recent [`validate`](Self::validate) call.
    pub fn messages(&self) -> Vec<String> {
        self.last.messages()
    }

    /// The report from the most recent [`validate`](Self::validate) call.
    pub fn report(&self) -> &ValidationReport {
        &self.last
    }

    fn visit(
        &self,
        node: &SchemaNode,
        instance: &Value,
        pointer: &JsonPointer,
        out: &mut Vec<Diagnostic>,
    ) {
        if pointer.depth() > self.options.max_depth {
            out.push(Diagnostic::new(
                DiagnosticKind::DepthExceeded,
                pointer,
                format!("maximum validation depth {} exceeded", self.options.max_depth),
            ));
            return;
        }
        tracing::trace!(%pointer, "visiting instance location");

        if let Some(mismatch) = self.check_type(node, instance, pointer) {
            out.push(mismatch);
            return;
        }

        if let Some(values) = node.enum_values() {
            if !values.iter().any(|value| json_equals(value, instance)) {
                out.push(Diagnostic::new(
                    DiagnosticKind::EnumMismatch,
                    pointer,
                    "node does not match any value in the enumeration",
                ));
            }
        }

        if self.options.structural_keywords {
            run_keyword(&self.structural, node, instance, pointer, out);
        }
        for validator in &self.custom {
            run_keyword(validator.as_ref(), node, instance, pointer, out);
        }

        if self.options.structural_keywords {
            self.descend(node, instance, pointer, out);
        }
    }

    fn check_type(
        &self,
        node: &SchemaNode,
        instance: &Value,
        pointer: &JsonPointer,
    ) -> Option<Diagnostic> {
        let kind = TypeKind::of(instance);
        if !node.allowed_types().admits_kind(kind) {
            return Some(Diagnostic::new(
                DiagnosticKind::TypeMismatch,
                pointer,
                format!("node is of type {kind}, expected one of {}", node.allowed_types()),
            ));
        }
        if node.named_types().admits_kind(kind) {
            return None;
        }

        // Admitted only through anonymous schemas of the type array.
        let matched = node
            .children()
            .values()
            .filter(|child| child.allowed_types().admits_kind(kind))
            .any(|child| {
                let mut scratch = Vec::new();
                self.visit(child, instance, pointer, &mut scratch);
                scratch.is_empty()
            });
        (!matched).then(|| {
            Diagnostic::new(
                DiagnosticKind::TypeMismatch,
                pointer,
                "node does not match any schema in the type property array",
            )
        })
    }

    fn descend(
        &self,
        node: &SchemaNode,
        instance: &Value,
        pointer: &JsonPointer,
        out: &mut Vec<Diagnostic>,
    ) {
        let keywords = node.keywords();
        match instance {
            Value::Object(members) => {
                for (key, value) in members {
                    if let Some(schema) = keywords.property_schema(key) {
                        self.visit(schema, value, &pointer.key(key), out);
                    }
                }
            }
            Value::Array(elements) => {
                for (index, value) in elements.iter().enumerate() {
                    if let Some(schema) = keywords.item_schema(index) {
                        self.visit(schema, value, &pointer.index(index), out);
                    }
                }
            }
            _ => {}
        }
    }
}

fn run_keyword(
    validator: &dyn KeywordValidator,
    node: &SchemaNode,
    instance: &Value,
    pointer: &JsonPointer,
    out: &mut Vec<Diagnostic>,
) {
    out.extend(
        validator
            .validate_keyword(node, instance, pointer)
            .into_iter()
            .map(|message| Diagnostic::new(DiagnosticKind::Keyword, pointer, message)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn messages(schema: Value, instance: Value) -> Vec<String> {
        let mut validator = Validator::new(&schema);
        let passed = validator.validate(&instance);
        assert_eq!(passed, validator.messages().is_empty());
        validator.messages()
    }

    #[test]
    fn test_null_schema() {
        let mut validator = Validator::null();
        assert!(!validator.validate(&json!("hello")));
        assert_eq!(validator.messages(), vec!["#: schema is null"]);
        assert_eq!(
            validator.report().diagnostics()[0].kind,
            DiagnosticKind::NullSchema
        );
    }

    #[test]
    fn test_invalid_root_is_prefixed() {
        assert_eq!(
            messages(json!({"type": "pwet"}), json!(1)),
            vec!["#: unknown type pwet"]
        );
        assert_eq!(
            messages(json!(17), json!(1)),
            vec!["#: schema is not an object"]
        );
    }

    #[test]
    fn test_void_enum_never_passes() {
        for instance in [json!("hello"), json!(null), json!([]), json!({})] {
            assert_eq!(
                messages(json!({"enum": []}), instance),
                vec!["#: node does not match any value in the enumeration"]
            );
        }
    }

    #[test]
    fn test_enum_structural_equality() {
        let schema = json!({"enum": [1, [1, 2], {"a": null}]});
        assert!(messages(schema.clone(), json!(1.0)).is_empty());
        assert!(messages(schema.clone(), json!([1, 2])).is_empty());
        assert!(messages(schema.clone(), json!({"a": null})).is_empty());
        assert_eq!(
            messages(schema, json!([2, 1])),
            vec!["#: node does not match any value in the enumeration"]
        );
    }

    #[test]
    fn test_enum_large_integer_is_exact() {
        let schema = json!({"enum": [9007199254740993u64]});
        assert!(messages(schema.clone(), json!(9007199254740993u64)).is_empty());
        assert_eq!(
            messages(schema, json!(9007199254740992.0)),
            vec!["#: node does not match any value in the enumeration"]
        );
    }

    #[test]
    fn test_type_mismatch() {
        assert_eq!(
            messages(json!({"type": ["string", "number"]}), json!(true)),
            vec!["#: node is of type boolean, expected one of [number, string]"]
        );
        assert_eq!(
            messages(json!({"type": "integer"}), json!(1.5)),
            vec!["#: node is of type number, expected one of [integer]"]
        );
        assert!(messages(json!({"type": "number"}), json!(3)).is_empty());
    }

    #[test]
    fn test_type_mismatch_stops_enum_check() {
        let report = Validator::new(&json!({"type": "string", "enum": ["a"]})).check(&json!(1));
        assert_eq!(report.len(), 1);
        assert_eq!(report.diagnostics()[0].kind, DiagnosticKind::TypeMismatch);
    }

    #[test]
    fn test_anonymous_union_member_is_applied() {
        let schema = json!({"type": ["null", {"type": "string", "maxLength": 2}]});
        assert!(messages(schema.clone(), json!(null)).is_empty());
        assert!(messages(schema.clone(), json!("ab")).is_empty());
        assert_eq!(
            messages(schema, json!("abc")),
            vec!["#: node does not match any schema in the type property array"]
        );
    }

    #[test]
    fn test_nested_pointers() {
        let schema = json!({
            "type": "object",
            "properties": {
                "name": {"type": "string", "required": true},
                "tags": {"items": {"type": "string", "minLength": 1}}
            },
            "additionalProperties": {"type": "integer"}
        });
        let instance = json!({"extra": "x", "tags": ["ok", "", 3]});
        assert_eq!(
            messages(schema, instance),
            vec![
                "#: required property name is missing",
                "#/extra: node is of type string, expected one of [integer]",
                "#/tags/1: string is too short (length 0, minimum 1)",
                "#/tags/2: node is of type integer, expected one of [string]",
            ]
        );
    }

    #[test]
    fn test_tuple_items_and_additional_items_schema() {
        let schema = json!({
            "items": [{"type": "string"}, {"type": "boolean"}],
            "additionalItems": {"type": "null"}
        });
        assert!(messages(schema.clone(), json!(["a", true, null, null])).is_empty());
        assert_eq!(
            messages(schema, json!([1, true, 0])),
            vec![
                "#/0: node is of type integer, expected one of [string]",
                "#/2: node is of type integer, expected one of [null]",
            ]
        );
    }

    #[test]
    fn test_structural_keywords_disabled() {
        let schema = json!({"type": "array", "minItems": 5, "items": {"type": "string"}});
        let validator = Validator::new(&schema)
            .with_options(ValidatorOptions::default().structural_keywords(false));
        assert!(validator.check(&json!([1])).passed());
        assert!(!validator.check(&json!("x")).passed());
    }

    #[test]
    fn test_max_depth() {
        let schema = json!({"items": {"items": {"type": "string"}}});
        let validator =
            Validator::new(&schema).with_options(ValidatorOptions::default().max_depth(1));
        assert_eq!(
            validator.check(&json!([[1]])).messages(),
            vec!["#/0/0: maximum validation depth 1 exceeded"]
        );
    }

    #[derive(Debug)]
    struct NoEmptyStrings;

    impl KeywordValidator for NoEmptyStrings {
        fn validate_keyword(
            &self,
            _node: &SchemaNode,
            instance: &Value,
            _pointer: &JsonPointer,
        ) -> Vec<String> {
            match instance {
                Value::String(s) if s.is_empty() => vec!["string is empty".to_string()],
                _ => Vec::new(),
            }
        }
    }

    #[test]
    fn test_custom_keyword_validator_runs_after_builtin() {
        let validator =
            Validator::new(&json!({"minLength": 1})).with_keyword_validator(NoEmptyStrings);
        assert_eq!(
            validator.check(&json!("")).messages(),
            vec!["#: string is too short (length 0, minimum 1)", "#: string is empty"]
        );
    }

    #[test]
    fn test_messages_reset_per_call() {
        let mut validator = Validator::new(&json!({"type": "string"}));
        assert!(!validator.validate(&json!(1)));
        assert_eq!(validator.messages().len(), 1);
        assert!(validator.validate(&json!("ok")));
        assert!(validator.messages().is_empty());
    }

    #[test]
    fn test_check_is_shareable_across_threads() {
        let validator = Validator::new(&json!({"type": "string", "maxLength": 3}));
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|i| {
                    let validator = &validator;
                    scope.spawn(move || validator.check(&json!("x".repeat(i + 2))).passed())
                })
                .collect();
            let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
            assert_eq!(results, vec![true, true, false, false]);
        });
    }
}
