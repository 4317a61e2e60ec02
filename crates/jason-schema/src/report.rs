//! # Validation Reports
//!
//! The outcome of one validation run: an ordered list of [`Diagnostic`]s,
//! each rendered as `<pointer>: <message>`. A run passes iff the list is
//! empty.

use std::fmt;

use jason_core::{JasonError, JsonPointer};
use serde::Serialize;

/// What class of defect a diagnostic reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticKind {
    /// The validator has no schema.
    NullSchema,
    /// The root schema failed to compile.
    SchemaStructure,
    /// The instance kind is outside the allowed type set.
    TypeMismatch,
    /// The instance equals no member of `enum`.
    EnumMismatch,
    /// A keyword validator rejected the instance.
    Keyword,
    /// Traversal went deeper than the configured maximum.
    DepthExceeded,
}

/// One diagnostic, addressed by instance pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Defect class.
    pub kind: DiagnosticKind,
    /// Location in the instance.
    pub pointer: JsonPointer,
    /// Un-prefixed description.
    pub message: String,
}

impl Diagnostic {
    pub(crate) fn new(
        kind: DiagnosticKind,
        pointer: &JsonPointer,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            pointer: pointer.clone(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.pointer, self.message)
    }
}

/// Diagnostics from a single validation run, in production order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    pub(crate) fn from_diagnostics(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Whether the run produced no diagnostics.
    pub fn passed(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Number of diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns true if there are no diagnostics.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// The diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Rendered `<pointer>: <message>` strings.
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(ToString::to_string).collect()
    }

    /// `Ok(())` on a pass, otherwise the rendered messages as an error.
    pub fn into_result(self) -> Result<(), JasonError> {
        if self.passed() {
            Ok(())
        } else {
            Err(JasonError::ValidationFailed(self.messages()))
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, d) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_diagnostic_display_root() {
        let d = Diagnostic::new(DiagnosticKind::NullSchema, &JsonPointer::root(), "schema is null");
        assert_eq!(d.to_string(), "#: schema is null");
    }

    #[test]
    fn test_diagnostic_display_nested() {
        let pointer = JsonPointer::root().key("tags").index(2);
        let d = Diagnostic::new(DiagnosticKind::Keyword, &pointer, "string is too long");
        assert_eq!(d.to_string(), "#/tags/2: string is too long");
    }

    #[test]
    fn test_empty_report_passes() {
        let report = ValidationReport::default();
        assert!(report.passed());
        assert!(report.messages().is_empty());
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn test_failed_report_into_result() {
        let report = ValidationReport::from_diagnostics(vec![Diagnostic::new(
            DiagnosticKind::EnumMismatch,
            &JsonPointer::root(),
            "node does not match any value in the enumeration",
        )]);
        assert!(!report.passed());
        match report.into_result() {
            Err(JasonError::ValidationFailed(messages)) => assert_eq!(
                messages,
                vec!["#: node does not match any value in the enumeration".to_string()]
            ),
            other => panic!("Expected ValidationFailed, got: {other:?}"),
        }
    }

    #[test]
    fn test_report_serializes() {
        let report = ValidationReport::from_diagnostics(vec![Diagnostic::new(
            DiagnosticKind::TypeMismatch,
            &JsonPointer::root().key("a"),
            "node is of type null, expected one of [string]",
        )]);
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({"diagnostics": [{
                "kind": "TYPE_MISMATCH",
                "pointer": "#/a",
                "message": "node is of type null, expected one of [string]"
            }]})
        );
    }
}
