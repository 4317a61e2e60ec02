//! # Instance Pointers
//!
//! A JSON-Pointer-like address into the instance document, used to prefix
//! validation diagnostics. The root is `#`; nested locations append
//! `/segment` per level (`#/items/0/name`). Array indices are decimal,
//! object keys are written literally with no escaping.

use serde::{Serialize, Serializer};

/// An immutable location within an instance document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct JsonPointer {
    segments: Vec<String>,
}

impl JsonPointer {
    /// The document root, `#`.
    pub fn root() -> Self {
        Self::default()
    }

    /// The pointer one level below `self`, at object member `key`.
    #[must_use]
    pub fn key(&self, key: &str) -> Self {
        self.child(key.to_string())
    }

    /// The pointer one level below `self`, at array element `index`.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        self.child(index.to_string())
    }

    fn child(&self, segment: String) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment);
        Self { segments }
    }

    /// Number of segments below the root.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Whether this is the document root.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The raw segments, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl std::fmt::Display for JsonPointer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("#")?;
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl Serialize for JsonPointer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
