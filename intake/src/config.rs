use alloc::borrow::Cow;

use jiff::tz::TimeZone;

use crate::{DecodeError, temporal::TemporalError};

/// Per-call decoding settings.
///
/// There is no process-wide state: every [`Decoder`](crate::Decoder) owns
/// one of these, and [`Default`] gives the usual setup (`form` tag, `json`
/// fallback tag, UTC).
#[derive(Debug, Clone)]
pub struct DecodeConfig {
    /// Tag consulted first when resolving a field's key.
    pub tag: Cow<'static, str>,

    /// Tag consulted when the active tag is absent.
    pub fallback_tag: Cow<'static, str>,

    /// Zone temporal tokens without an explicit offset are interpreted in,
    /// and the zone every temporal value is expressed in.
    pub time_zone: TimeZone,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            tag: Cow::Borrowed(Self::FORM_TAG),
            fallback_tag: Cow::Borrowed(Self::FALLBACK_TAG),
            time_zone: TimeZone::UTC,
        }
    }
}

impl DecodeConfig {
    /// Tag used for request bodies.
    pub const FORM_TAG: &'static str = "form";

    /// Tag used for query strings.
    pub const QUERY_TAG: &'static str = "query";

    /// Default fallback tag.
    pub const FALLBACK_TAG: &'static str = "json";

    /// Sets the active tag name.
    pub fn with_tag(mut self, tag: impl Into<Cow<'static, str>>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Sets the fallback tag name.
    pub fn with_fallback_tag(mut self, tag: impl Into<Cow<'static, str>>) -> Self {
        self.fallback_tag = tag.into();
        self
    }

    /// Sets the time zone.
    pub fn with_time_zone(mut self, time_zone: TimeZone) -> Self {
        self.time_zone = time_zone;
        self
    }

    /// Sets the time zone from an IANA name such as `Europe/Paris`.
    pub fn with_time_zone_name(self, name: &str) -> Result<Self, DecodeError> {
        let time_zone = TimeZone::get(name).map_err(|err| {
            DecodeError::parse_failure(None, TemporalError::UnknownZone(name.into(), err))
        })?;
        Ok(self.with_time_zone(time_zone))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn defaults() {
        let config = DecodeConfig::default();
        assert_eq!(config.tag, "form");
        assert_eq!(config.fallback_tag, "json");
        assert_eq!(config.time_zone, TimeZone::UTC);
    }

    #[test]
    fn zone_by_name() {
        let config = DecodeConfig::default()
            .with_tag("query")
            .with_time_zone_name("America/Sao_Paulo")
            .unwrap();
        assert_eq!(config.tag, "query");
        assert_eq!(config.time_zone.iana_name(), Some("America/Sao_Paulo"));

        let err = DecodeConfig::default()
            .with_time_zone_name("Nowhere/Special")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseFailure);
        assert_eq!(err.field(), None);
    }
}
