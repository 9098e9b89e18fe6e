use alloc::boxed::Box;
use core::fmt;

/// The declared semantic kind of a field.
///
/// Exactly one kind applies per type. `Record` and `CustomScannable` are told
/// apart by capability: a record that also opts into [`Scan`](crate::Scan) is
/// always `CustomScannable`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// `String`
    String,
    /// A signed integer of the given bit width.
    Int {
        /// Width in bits (`isize` reports the pointer width).
        bits: u32,
    },
    /// An unsigned integer of the given bit width.
    Uint {
        /// Width in bits (`usize` reports the pointer width).
        bits: u32,
    },
    /// A float of the given bit width.
    Float {
        /// 32 or 64.
        bits: u32,
    },
    /// `bool`
    Bool,
    /// A point in time (`jiff::Zoned` and friends).
    Temporal,
    /// An ordered collection of elements of the inner kind.
    Sequence(Box<FieldKind>),
    /// A nested record with its own fields.
    Record,
    /// A type that decodes itself from the raw token.
    CustomScannable,
    /// A shape with no decoding rule, named for error reporting.
    Opaque(&'static str),
}

impl FieldKind {
    /// Shorthand for a sequence of `element`.
    pub fn sequence_of(element: FieldKind) -> Self {
        FieldKind::Sequence(Box::new(element))
    }

    /// The element kind, if this is a sequence.
    pub fn element(&self) -> Option<&FieldKind> {
        match self {
            FieldKind::Sequence(inner) => Some(inner),
            _ => None,
        }
    }

    /// Whether a value of this kind can be decoded from a flat token list.
    ///
    /// Opaque shapes never can, and neither can sequences of records.
    pub fn is_supported(&self) -> bool {
        match self {
            FieldKind::Opaque(_) => false,
            FieldKind::Sequence(inner) => {
                !matches!(**inner, FieldKind::Record) && inner.is_supported()
            }
            _ => true,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::String => write!(f, "string"),
            FieldKind::Int { bits } => write!(f, "i{bits}"),
            FieldKind::Uint { bits } => write!(f, "u{bits}"),
            FieldKind::Float { bits } => write!(f, "f{bits}"),
            FieldKind::Bool => write!(f, "bool"),
            FieldKind::Temporal => write!(f, "temporal"),
            FieldKind::Sequence(inner) => write!(f, "sequence of {inner}"),
            FieldKind::Record => write!(f, "record"),
            FieldKind::CustomScannable => write!(f, "custom"),
            FieldKind::Opaque(name) => write!(f, "unsupported type `{name}`"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Introspect;
    use alloc::{string::ToString, vec::Vec};

    #[test]
    fn wrappers_are_transparent() {
        assert_eq!(<Option<u16>>::kind(), FieldKind::Uint { bits: 16 });
        assert!(<Option<u16>>::pointer_like());
        assert_eq!(
            <Option<Vec<i8>>>::kind(),
            FieldKind::sequence_of(FieldKind::Int { bits: 8 })
        );
        assert!(!<Vec<i8>>::pointer_like());
    }

    #[test]
    fn supported_kinds() {
        assert!(FieldKind::sequence_of(FieldKind::Temporal).is_supported());
        assert!(!FieldKind::Opaque("()").is_supported());
        assert!(!FieldKind::sequence_of(FieldKind::Record).is_supported());
        assert!(!FieldKind::sequence_of(FieldKind::Opaque("()")).is_supported());
        assert_eq!(
            FieldKind::sequence_of(FieldKind::Float { bits: 32 }).to_string(),
            "sequence of f32"
        );
    }
}
