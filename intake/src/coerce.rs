//! Conversion of a single string token into a typed place.

use alloc::string::String;
use core::fmt;

use intake_core::{FloatPlace, IntPlace, Place, UintPlace};
use jiff::tz::TimeZone;

use crate::{DecodeError, temporal::parse_time};

/// A token that is neither a canonical boolean nor a checkbox spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidBool {
    /// The offending token.
    pub token: String,
}

impl fmt::Display for InvalidBool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` is not a valid boolean", self.token)
    }
}

impl core::error::Error for InvalidBool {}

/// Parses a boolean.
///
/// Canonical spellings are tried first: `1`, `t`, `T`, `true`, `TRUE`,
/// `True` and their false counterparts `0`, `f`, `F`, `false`, `FALSE`,
/// `False`. Only if that fails are the checkbox spellings `on` and `off`
/// accepted.
pub fn parse_bool(token: &str) -> Result<bool, InvalidBool> {
    match token {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        _ => match token {
            "on" => Ok(true),
            "off" => Ok(false),
            _ => Err(InvalidBool {
                token: token.into(),
            }),
        },
    }
}

/// Writes `token` into a scalar or custom place.
///
/// Sequences and records are not scalars; callers route them elsewhere.
pub(crate) fn coerce(
    place: Place<'_>,
    token: &str,
    tz: &TimeZone,
    field: &str,
) -> Result<(), DecodeError> {
    let fail = |err: BoxError| DecodeError::parse_failure(Some(field), err);

    match place {
        Place::String(slot) => {
            slot.clear();
            slot.push_str(token);
        }
        Place::Int(slot) => coerce_int(slot, token).map_err(fail)?,
        Place::Uint(slot) => coerce_uint(slot, token).map_err(fail)?,
        Place::Float(slot) => coerce_float(slot, token).map_err(fail)?,
        Place::Bool(slot) => *slot = parse_bool(token).map_err(|err| fail(err.into()))?,
        Place::Temporal(slot) => slot.put(parse_time(token, tz).map_err(|err| fail(err.into()))?),
        Place::Custom(scan) => scan.scan(token).map_err(fail)?,
        other @ (Place::Sequence(_) | Place::Record(_) | Place::Opaque(_)) => {
            return Err(DecodeError::unsupported_field_type(field, other.describe()));
        }
    }
    Ok(())
}

type BoxError = alloc::boxed::Box<dyn core::error::Error + Send + Sync>;

fn coerce_int(slot: IntPlace<'_>, token: &str) -> Result<(), BoxError> {
    match slot {
        IntPlace::I8(v) => *v = token.parse()?,
        IntPlace::I16(v) => *v = token.parse()?,
        IntPlace::I32(v) => *v = token.parse()?,
        IntPlace::I64(v) => *v = token.parse()?,
        IntPlace::I128(v) => *v = token.parse()?,
        IntPlace::Isize(v) => *v = token.parse()?,
    }
    Ok(())
}

fn coerce_uint(slot: UintPlace<'_>, token: &str) -> Result<(), BoxError> {
    match slot {
        UintPlace::U8(v) => *v = token.parse()?,
        UintPlace::U16(v) => *v = token.parse()?,
        UintPlace::U32(v) => *v = token.parse()?,
        UintPlace::U64(v) => *v = token.parse()?,
        UintPlace::U128(v) => *v = token.parse()?,
        UintPlace::Usize(v) => *v = token.parse()?,
    }
    Ok(())
}

fn coerce_float(slot: FloatPlace<'_>, token: &str) -> Result<(), BoxError> {
    match slot {
        FloatPlace::F32(v) => *v = token.parse()?,
        FloatPlace::F64(v) => *v = token.parse()?,
    }
    Ok(())
}
