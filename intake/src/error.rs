use alloc::{borrow::Cow, boxed::Box, string::String};
use core::fmt;

/// The closed set of ways a decode call can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The content type is not one of the supported formats. Nothing was decoded.
    InvalidContentType,

    /// The destination is not a record. Checked before any field is touched.
    InvalidTargetShape,

    /// A required field had no value, or only an empty one.
    RequiredFieldMissing,

    /// A field has no decoding rule and does not implement `Scan`.
    UnsupportedFieldType,

    /// A value was present but could not be converted.
    ParseFailure,
}

impl ErrorKind {
    /// Stable, machine-readable identifier.
    pub const fn code(self) -> &'static str {
        match self {
            ErrorKind::InvalidContentType => "intake::invalid_content_type",
            ErrorKind::InvalidTargetShape => "intake::invalid_target_shape",
            ErrorKind::RequiredFieldMissing => "intake::required_field_missing",
            ErrorKind::UnsupportedFieldType => "intake::unsupported_field_type",
            ErrorKind::ParseFailure => "intake::parse_failure",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidContentType => write!(f, "invalid content type"),
            ErrorKind::InvalidTargetShape => write!(f, "invalid target shape"),
            ErrorKind::RequiredFieldMissing => write!(f, "required field missing"),
            ErrorKind::UnsupportedFieldType => write!(f, "unsupported field type"),
            ErrorKind::ParseFailure => write!(f, "parse failure"),
        }
    }
}

/// A decoding error: what went wrong, on which field, and why.
///
/// The first failure of a decode call is returned as is; fields decoded
/// before it stay decoded.
pub struct DecodeError {
    kind: ErrorKind,
    field: Option<String>,
    source: Option<Box<dyn core::error::Error + Send + Sync>>,
}

impl DecodeError {
    /// Creates an error without field attribution.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            field: None,
            source: None,
        }
    }

    /// Attributes the error to `field` (its external key).
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Attaches the underlying cause.
    pub fn with_source(mut self, source: impl Into<Box<dyn core::error::Error + Send + Sync>>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub(crate) fn invalid_content_type(content_type: &str) -> Self {
        Self::new(ErrorKind::InvalidContentType).with_source(Reason::from(alloc::format!(
            "`{content_type}` is not a supported content type"
        )))
    }

    pub(crate) fn invalid_target_shape(found: &str) -> Self {
        Self::new(ErrorKind::InvalidTargetShape).with_source(Reason::from(alloc::format!(
            "expected a record, found {found}"
        )))
    }

    pub(crate) fn required_field_missing(field: &str) -> Self {
        Self::new(ErrorKind::RequiredFieldMissing).with_field(field)
    }

    pub(crate) fn unsupported_field_type(field: &str, found: &str) -> Self {
        Self::new(ErrorKind::UnsupportedFieldType)
            .with_field(field)
            .with_source(Reason::from(alloc::format!("no decoding rule for {found}")))
    }

    pub(crate) fn parse_failure(
        field: Option<&str>,
        source: impl Into<Box<dyn core::error::Error + Send + Sync>>,
    ) -> Self {
        let err = Self::new(ErrorKind::ParseFailure).with_source(source);
        match field {
            Some(field) => err.with_field(field),
            None => err,
        }
    }

    /// What went wrong.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The external key of the offending field, when the failure can be
    /// attributed to one.
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Consumes the error, returning the underlying cause.
    pub fn into_source(self) -> Option<Box<dyn core::error::Error + Send + Sync>> {
        self.source
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(field) = &self.field {
            write!(f, " for field `{field}`")?;
        }
        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodeError")
            .field("kind", &self.kind)
            .field("field", &self.field)
            .field("source", &self.source.as_ref().map(|s| alloc::string::ToString::to_string(s)))
            .finish()
    }
}

impl core::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn core::error::Error + 'static))
    }
}

#[cfg(feature = "miette")]
impl miette::Diagnostic for DecodeError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.kind.code()))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.kind {
            ErrorKind::InvalidContentType => {
                "expected JSON, XML, URL-encoded or multipart form data"
            }
            ErrorKind::InvalidTargetShape => "decode into a type that derives `Bind`",
            ErrorKind::RequiredFieldMissing => "send a non-empty value for this field",
            ErrorKind::UnsupportedFieldType => {
                "implement `Scan` for the field's type and register it with `scannable!`"
            }
            ErrorKind::ParseFailure => return None,
        };
        Some(Box::new(help))
    }
}

/// A plain-text cause.
#[derive(Debug)]
pub(crate) struct Reason(Cow<'static, str>);

impl From<String> for Reason {
    fn from(message: String) -> Self {
        Reason(Cow::Owned(message))
    }
}

impl From<&'static str> for Reason {
    fn from(message: &'static str) -> Self {
        Reason(Cow::Borrowed(message))
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl core::error::Error for Reason {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_field_and_cause() {
        let cause = "x".parse::<u8>().unwrap_err();
        let err = DecodeError::parse_failure(Some("age"), cause);
        assert_eq!(
            err.to_string(),
            "parse failure for field `age`: invalid digit found in string"
        );
        assert_eq!(err.kind(), ErrorKind::ParseFailure);
        assert_eq!(err.field(), Some("age"));
    }

    #[test]
    fn display_without_field() {
        let err = DecodeError::invalid_content_type("text/plain");
        assert_eq!(
            err.to_string(),
            "invalid content type: `text/plain` is not a supported content type"
        );
        assert_eq!(err.field(), None);
    }

    #[test]
    fn source_is_exposed() {
        let err = DecodeError::required_field_missing("name");
        assert!(core::error::Error::source(&err).is_none());

        let err = DecodeError::unsupported_field_type("meta", "HashMap");
        let source = core::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("no decoding rule for HashMap"));
    }
}
