use alloc::string::String;

use crate::{Record, Scan, Sequence};

/// A typed, mutable handle to the storage a decoded value is written into.
///
/// The decoder dispatches on the variant; it never needs to know the
/// concrete Rust type behind a place.
pub enum Place<'a> {
    /// A `String`; tokens are copied verbatim.
    String(&'a mut String),
    /// A signed integer of a specific width.
    Int(IntPlace<'a>),
    /// An unsigned integer of a specific width.
    Uint(UintPlace<'a>),
    /// A float of a specific width.
    Float(FloatPlace<'a>),
    /// A `bool`.
    Bool(&'a mut bool),
    /// One of the supported temporal types.
    Temporal(TemporalPlace<'a>),
    /// A growable collection.
    Sequence(&'a mut dyn Sequence),
    /// A nested record.
    Record(&'a mut dyn Record),
    /// A value that decodes itself.
    Custom(&'a mut dyn Scan),
    /// Storage the decoder has no rule for.
    Opaque(&'static str),
}

impl Place<'_> {
    /// Short name of the variant, for diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            Place::String(_) => "string",
            Place::Int(_) => "signed integer",
            Place::Uint(_) => "unsigned integer",
            Place::Float(_) => "float",
            Place::Bool(_) => "bool",
            Place::Temporal(_) => "temporal",
            Place::Sequence(_) => "sequence",
            Place::Record(_) => "record",
            Place::Custom(_) => "custom",
            Place::Opaque(name) => name,
        }
    }
}

/// Signed integer storage, one variant per width.
#[allow(missing_docs)]
pub enum IntPlace<'a> {
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    I128(&'a mut i128),
    Isize(&'a mut isize),
}

/// Unsigned integer storage, one variant per width.
#[allow(missing_docs)]
pub enum UintPlace<'a> {
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    U128(&'a mut u128),
    Usize(&'a mut usize),
}

/// Float storage.
#[allow(missing_docs)]
pub enum FloatPlace<'a> {
    F32(&'a mut f32),
    F64(&'a mut f64),
}

/// Temporal storage.
///
/// Every variant is filled from a `jiff::Zoned` in the active time zone.
pub enum TemporalPlace<'a> {
    /// Stored as is.
    Zoned(&'a mut jiff::Zoned),
    /// The instant of the zoned value.
    Timestamp(&'a mut jiff::Timestamp),
    /// The civil date-time of the zoned value.
    DateTime(&'a mut jiff::civil::DateTime),
    /// The civil date of the zoned value.
    Date(&'a mut jiff::civil::Date),
}

impl TemporalPlace<'_> {
    /// Write `value`, projecting it onto the stored representation.
    pub fn put(self, value: jiff::Zoned) {
        match self {
            TemporalPlace::Zoned(slot) => *slot = value,
            TemporalPlace::Timestamp(slot) => *slot = value.timestamp(),
            TemporalPlace::DateTime(slot) => *slot = value.datetime(),
            TemporalPlace::Date(slot) => *slot = value.date(),
        }
    }
}
