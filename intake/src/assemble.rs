//! Rebuilding typed collections from multi-valued or comma-joined input.

use alloc::{string::String, vec::Vec};

use intake_core::{Abort, Place, Sequence};
use jiff::tz::TimeZone;

use crate::{DecodeError, RawValue, coerce::coerce};

/// Splits a comma-joined value, trimming each token. An empty value is an
/// empty list.
fn split_list(value: &str) -> Vec<&str> {
    if value.is_empty() {
        return Vec::new();
    }
    value.split(',').map(str::trim).collect()
}

/// Replaces the contents of `seq` with the elements found in `raw`.
///
/// A native multi-value entry is used as is; a single value is split on
/// commas. Any element failure aborts the whole field and leaves `seq`
/// untouched.
pub(crate) fn assemble(
    seq: &mut dyn Sequence,
    raw: &RawValue,
    tz: &TimeZone,
    field: &str,
) -> Result<(), DecodeError> {
    let tokens: Vec<&str> = match raw {
        RawValue::Many(values) => values.iter().map(String::as_str).collect(),
        RawValue::Single(value) => split_list(value),
    };
    crate::trace!(field, elements = tokens.len(), "assembling sequence");

    let mut failure = None;
    let outcome = seq.assemble(
        tokens.len(),
        &mut |index: usize, place: Place<'_>| -> Result<(), Abort> {
            element(place, tokens[index], tz, field).map_err(|err| {
                failure = Some(err);
                Abort
            })
        },
    );

    match (outcome, failure) {
        (Ok(()), _) => Ok(()),
        (Err(Abort), Some(err)) => Err(err),
        (Err(Abort), None) => Err(DecodeError::parse_failure(
            Some(field),
            "collection assembly was aborted",
        )),
    }
}

fn element(place: Place<'_>, token: &str, tz: &TimeZone, field: &str) -> Result<(), DecodeError> {
    match place {
        // A nested list reads its elements from this one token.
        Place::Sequence(inner) => assemble(inner, &RawValue::Single(token.into()), tz, field),
        other => coerce(other, token, tz, field),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, Introspect};
    use alloc::vec;

    fn assemble_into<T: Introspect>(raw: RawValue) -> Result<T, DecodeError> {
        let mut value = T::zero();
        match value.place() {
            Place::Sequence(seq) => assemble(seq, &raw, &TimeZone::UTC, "list")?,
            _ => unreachable!("not a sequence"),
        }
        Ok(value)
    }

    #[test]
    fn multi_value_and_comma_joined_agree() {
        let native: Vec<i32> =
            assemble_into(RawValue::Many(vec!["1".into(), "2".into(), "3".into()])).unwrap();
        let joined: Vec<i32> = assemble_into(RawValue::Single("1, 2, 3".into())).unwrap();
        assert_eq!(native, vec![1, 2, 3]);
        assert_eq!(native, joined);
    }

    #[test]
    fn one_bad_element_fails_the_field_without_partial_result() {
        let mut value = vec![7u8];
        let raw = RawValue::Single("1,x,3".into());
        let Place::Sequence(seq) = value.place() else {
            unreachable!()
        };
        let err = assemble(seq, &raw, &TimeZone::UTC, "list").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseFailure);
        assert_eq!(err.field(), Some("list"));
        assert_eq!(value, vec![7]);
    }

    #[test]
    fn nested_lists_split_each_value() {
        let value: Vec<Vec<u8>> =
            assemble_into(RawValue::Many(vec!["1,2".into(), "3".into()])).unwrap();
        assert_eq!(value, vec![vec![1, 2], vec![3]]);
    }

    #[test]
    fn optional_elements_and_deques() {
        let value: Vec<Option<bool>> =
            assemble_into(RawValue::Single("on, off".into())).unwrap();
        assert_eq!(value, vec![Some(true), Some(false)]);

        let value: alloc::collections::VecDeque<String> =
            assemble_into(RawValue::Single(" a , b ".into())).unwrap();
        assert_eq!(value, ["a", "b"]);
    }

    #[test]
    fn temporal_elements_use_the_active_zone() {
        let tokyo = TimeZone::get("Asia/Tokyo").unwrap();
        let mut value: Vec<jiff::Zoned> = Vec::new();
        let raw = RawValue::Many(vec!["2024-01-01".into(), "2024-01-02 09:00:00".into()]);
        let Place::Sequence(seq) = value.place() else {
            unreachable!()
        };
        assemble(seq, &raw, &tokyo, "days").unwrap();
        assert_eq!(value.len(), 2);
        assert!(value.iter().all(|t| t.time_zone().iana_name() == Some("Asia/Tokyo")));
        assert_eq!(value[1].hour(), 9);
    }
}
