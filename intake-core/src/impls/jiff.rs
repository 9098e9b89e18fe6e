//! Temporal types. Only these exact types are classified as temporal.

use jiff::{
    Timestamp, Zoned,
    civil::{Date, DateTime},
    tz::TimeZone,
};

use crate::{FieldKind, Introspect, Place, TemporalPlace};

impl Introspect for Zoned {
    fn kind() -> FieldKind {
        FieldKind::Temporal
    }

    fn zero() -> Self {
        Zoned::new(Timestamp::UNIX_EPOCH, TimeZone::UTC)
    }

    fn place(&mut self) -> Place<'_> {
        Place::Temporal(TemporalPlace::Zoned(self))
    }
}

impl Introspect for Timestamp {
    fn kind() -> FieldKind {
        FieldKind::Temporal
    }

    fn zero() -> Self {
        Timestamp::UNIX_EPOCH
    }

    fn place(&mut self) -> Place<'_> {
        Place::Temporal(TemporalPlace::Timestamp(self))
    }
}

impl Introspect for DateTime {
    fn kind() -> FieldKind {
        FieldKind::Temporal
    }

    fn zero() -> Self {
        DateTime::default()
    }

    fn place(&mut self) -> Place<'_> {
        Place::Temporal(TemporalPlace::DateTime(self))
    }
}

impl Introspect for Date {
    fn kind() -> FieldKind {
        FieldKind::Temporal
    }

    fn zero() -> Self {
        Date::default()
    }

    fn place(&mut self) -> Place<'_> {
        Place::Temporal(TemporalPlace::Date(self))
    }
}
