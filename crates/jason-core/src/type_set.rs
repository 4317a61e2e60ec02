//! # Type Sets — Set Algebra over `TypeKind`
//!
//! A [`TypeSet`] is an immutable bitset over the seven [`TypeKind`]s. It is
//! the resolved value of a `type` or `disallow` property and the allowed set
//! a compiled schema checks instances against.
//!
//! ## Subtype Rule
//!
//! Every integer is a number. Two consequences:
//!
//! - [`TypeSet::difference`] removing `number` also removes `integer`;
//!   removing `integer` alone leaves `number` untouched.
//! - [`TypeSet::admits`] accepts an integral instance when the set holds
//!   either `integer` or `number`.
//!
//! An empty set is a terminal compile error; it is never used to validate.

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::kind::{TypeKind, TypeName};

/// An immutable set of [`TypeKind`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TypeSet(u8);

const ALL_BITS: u8 = (1u8 << crate::kind::TYPE_KIND_COUNT) - 1;

impl TypeSet {
    /// The empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// The universal set: all seven kinds.
    pub const fn all() -> Self {
        Self(ALL_BITS)
    }

    /// A set holding exactly one kind.
    pub fn of(kind: TypeKind) -> Self {
        Self(kind.bit())
    }

    /// The set a type name denotes: `any` is universal, a kind is a singleton.
    pub fn from_name(name: TypeName) -> Self {
        match name {
            TypeName::Any => Self::all(),
            TypeName::Kind(kind) => Self::of(kind),
        }
    }

    /// Set union.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Set intersection.
    #[must_use]
    pub fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// `self` minus `disallowed`, propagating `number` removal to `integer`.
    #[must_use]
    pub fn difference(self, disallowed: Self) -> Self {
        let mut removed = disallowed.0;
        if disallowed.contains(TypeKind::Number) {
            removed |= TypeKind::Integer.bit();
        }
        Self(self.0 & !removed)
    }

    /// Whether no kind is present.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of kinds present.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether `kind` is literally a member. Does not apply the subtype rule;
    /// see [`TypeSet::admits_kind`].
    pub fn contains(self, kind: TypeKind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// Whether an instance of `kind` satisfies this set.
    pub fn admits_kind(self, kind: TypeKind) -> bool {
        match kind {
            TypeKind::Integer => {
                self.contains(TypeKind::Integer) || self.contains(TypeKind::Number)
            }
            other => self.contains(other),
        }
    }

    /// Whether `instance` satisfies this set.
    pub fn admits(self, instance: &Value) -> bool {
        self.admits_kind(TypeKind::of(instance))
    }

    /// Members in canonical order.
    pub fn iter(self) -> impl Iterator<Item = TypeKind> {
        TypeKind::all_kinds()
            .iter()
            .copied()
            .filter(move |kind| self.contains(*kind))
    }
}

impl FromIterator<TypeKind> for TypeSet {
    fn from_iter<I: IntoIterator<Item = TypeKind>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, kind| set.union(Self::of(kind)))
    }
}

impl std::fmt::Display for TypeSet {
    /// Formats as `[integer, number]`, members in canonical order.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[")?;
        for (i, kind) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(kind.as_str())?;
        }
        f.write_str("]")
    }
}

impl Serialize for TypeSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn set(kinds: &[TypeKind]) -> TypeSet {
        kinds.iter().copied().collect()
    }

    #[test]
    fn test_all_has_seven_kinds() {
        assert_eq!(TypeSet::all().len(), 7);
        assert!(TypeSet::empty().is_empty());
        assert_eq!(TypeSet::from_name(TypeName::Any), TypeSet::all());
    }

    #[test]
    fn test_difference_number_removes_integer() {
        let allowed = set(&[TypeKind::Integer, TypeKind::String]);
        let result = allowed.difference(TypeSet::of(TypeKind::Number));
        assert_eq!(result, TypeSet::of(TypeKind::String));
    }

    #[test]
    fn test_difference_integer_keeps_number() {
        let allowed = set(&[TypeKind::Integer, TypeKind::Number]);
        let result = allowed.difference(TypeSet::of(TypeKind::Integer));
        assert_eq!(result, TypeSet::of(TypeKind::Number));
    }

    #[test]
    fn test_integer_vs_number_cancels() {
        let allowed = TypeSet::of(TypeKind::Integer);
        assert!(allowed.difference(TypeSet::of(TypeKind::Number)).is_empty());
    }

    #[test]
    fn test_difference_all_is_empty() {
        assert!(TypeSet::all().difference(TypeSet::all()).is_empty());
    }

    #[test]
    fn test_admits_integral_number_as_number() {
        let numbers = TypeSet::of(TypeKind::Number);
        assert!(numbers.admits(&json!(1)));
        assert!(numbers.admits(&json!(1.5)));

        let integers = TypeSet::of(TypeKind::Integer);
        assert!(integers.admits(&json!(1)));
        assert!(integers.admits(&json!(1.0)));
        assert!(!integers.admits(&json!(1.5)));
        assert!(!integers.admits(&json!("1")));
    }

    #[test]
    fn test_display_canonical_order() {
        let s = set(&[TypeKind::String, TypeKind::Number, TypeKind::Integer]);
        assert_eq!(s.to_string(), "[integer, number, string]");
        assert_eq!(TypeSet::empty().to_string(), "[]");
    }

    #[test]
    fn test_serialize_as_list() {
        let s = set(&[TypeKind::Null, TypeKind::Boolean]);
        assert_eq!(serde_json::to_value(s).unwrap(), json!(["boolean", "null"]));
    }
}
