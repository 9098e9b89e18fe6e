//! Temporal parsing: a fixed multi-layout trial, and single explicit layouts.

use alloc::string::String;
use core::fmt;

use jiff::{
    Zoned,
    civil::DateTime,
    fmt::strtime::{self, BrokenDownTime},
    tz::TimeZone,
};

/// Layouts tried in order by [`parse_time`]. The first that matches wins.
pub(crate) const LAYOUTS: &[&str] = &[
    // RFC 3339
    "%Y-%m-%dT%H:%M:%S%:z",
    // RFC 3339 with fractional seconds
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d",
    "%H:%M:%S",
];

/// Errors from temporal parsing.
#[derive(Debug)]
pub enum TemporalError {
    /// None of the built-in layouts matched the token.
    NoMatchingLayout(String),

    /// The zone name is not in the time zone database.
    UnknownZone(String, jiff::Error),

    /// The token does not match the explicit layout.
    Parse(jiff::Error),

    /// The token matched but does not denote a valid civil time, or that
    /// time cannot be placed in the zone.
    Civil(jiff::Error),
}

impl fmt::Display for TemporalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemporalError::NoMatchingLayout(token) => {
                write!(f, "`{token}` does not match any supported time layout")
            }
            TemporalError::UnknownZone(name, err) => {
                write!(f, "unknown time zone `{name}`: {err}")
            }
            TemporalError::Parse(err) => write!(f, "invalid time: {err}"),
            TemporalError::Civil(err) => write!(f, "invalid time: {err}"),
        }
    }
}

impl core::error::Error for TemporalError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            TemporalError::NoMatchingLayout(_) => None,
            TemporalError::UnknownZone(_, err)
            | TemporalError::Parse(err)
            | TemporalError::Civil(err) => Some(err),
        }
    }
}

/// Parses `token` by trying each supported layout in a fixed order:
///
/// 1. RFC 3339 (`2024-03-01T10:30:00+01:00`, `Z` allowed)
/// 2. RFC 3339 with fractional seconds
/// 3. date, hour and minute (`2024-03-01T10:30`)
/// 4. date and time without offset (`2024-03-01T10:30:00`)
/// 5. space-separated date and time (`2024-03-01 10:30:00`)
/// 6. date only (`2024-03-01`)
/// 7. time only (`10:30:00`, on 0000-01-01)
///
/// Tokens with an offset denote that instant; the others are civil times in
/// `tz`. Either way the result is expressed in `tz`.
pub fn parse_time(token: &str, tz: &TimeZone) -> Result<Zoned, TemporalError> {
    for layout in LAYOUTS {
        let Ok(parsed) = parse_layout(layout, token) else {
            continue;
        };
        crate::trace!(layout, token, "temporal layout matched");
        return to_zoned(&parsed, tz);
    }
    Err(TemporalError::NoMatchingLayout(token.into()))
}

/// Parses `token` with one explicit strftime-style `format`, in the IANA
/// zone named `zone`.
///
/// ```
/// let t = intake::parse_time_in("01/02/2024 15:04", "%m/%d/%Y %H:%M", "America/New_York")?;
/// assert_eq!(t.hour(), 15);
/// assert_eq!(t.time_zone().iana_name(), Some("America/New_York"));
/// # Ok::<(), intake::TemporalError>(())
/// ```
pub fn parse_time_in(token: &str, format: &str, zone: &str) -> Result<Zoned, TemporalError> {
    let tz = TimeZone::get(zone).map_err(|err| TemporalError::UnknownZone(zone.into(), err))?;
    let parsed = parse_layout(format, token).map_err(TemporalError::Parse)?;
    to_zoned(&parsed, &tz)
}

fn parse_layout(layout: &str, token: &str) -> Result<BrokenDownTime, jiff::Error> {
    // `%:z` wants a numeric offset; accept the RFC 3339 `Z` designator too.
    if layout.ends_with("%:z") {
        if let Some(stripped) = token.strip_suffix(['Z', 'z']) {
            let mut normalized = String::with_capacity(stripped.len() + 6);
            normalized.push_str(stripped);
            normalized.push_str("+00:00");
            return strtime::parse(layout, normalized);
        }
    }
    strtime::parse(layout, token)
}

/// Fills in missing components (year 0, January 1st, midnight) and places
/// the result in `tz`.
fn to_zoned(parsed: &BrokenDownTime, tz: &TimeZone) -> Result<Zoned, TemporalError> {
    let civil = DateTime::new(
        parsed.year().unwrap_or(0),
        parsed.month().unwrap_or(1),
        parsed.day().unwrap_or(1),
        parsed.hour().unwrap_or(0),
        parsed.minute().unwrap_or(0),
        parsed.second().unwrap_or(0),
        parsed.subsec_nanosecond().unwrap_or(0),
    )
    .map_err(TemporalError::Civil)?;

    match parsed.offset() {
        Some(offset) => {
            let instant = civil
                .to_zoned(TimeZone::fixed(offset))
                .map_err(TemporalError::Civil)?;
            Ok(instant.with_time_zone(tz.clone()))
        }
        None => civil.to_zoned(tz.clone()).map_err(TemporalError::Civil),
    }
}
