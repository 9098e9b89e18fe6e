//! Request body formats and their adapters.

use alloc::vec::Vec;
use core::fmt;

use intake_core::{Introspect, Place};
use serde::de::DeserializeOwned;

use crate::{DecodeError, Decoder, FormInput};

/// A request body format, selected from a `Content-Type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// `application/json`
    Json,
    /// `application/xml` or `text/xml`
    Xml,
    /// `application/x-www-form-urlencoded`
    UrlEncoded,
    /// `multipart/form-data`
    Multipart,
}

impl Format {
    /// Classifies a `Content-Type` value by prefix, ignoring ASCII case, so
    /// parameters such as `; charset=utf-8` are tolerated.
    ///
    /// Formats whose cargo feature is disabled are not recognized.
    ///
    /// ```
    /// use intake::Format;
    ///
    /// assert_eq!(
    ///     Format::from_content_type("Application/X-WWW-Form-Urlencoded; charset=utf-8"),
    ///     Some(Format::UrlEncoded)
    /// );
    /// assert_eq!(Format::from_content_type("text/plain"), None);
    /// ```
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let content_type = content_type.trim_start();
        [
            #[cfg(feature = "json")]
            ("application/json", Format::Json),
            #[cfg(feature = "xml")]
            ("application/xml", Format::Xml),
            #[cfg(feature = "xml")]
            ("text/xml", Format::Xml),
            ("application/x-www-form-urlencoded", Format::UrlEncoded),
            ("multipart/form-data", Format::Multipart),
        ]
        .into_iter()
        .find(|(mime, _)| starts_with_ignore_ascii_case(content_type, mime))
        .map(|(_, format)| format)
    }

    /// The canonical media type.
    pub const fn mime(self) -> &'static str {
        match self {
            Format::Json => "application/json",
            Format::Xml => "application/xml",
            Format::UrlEncoded => "application/x-www-form-urlencoded",
            Format::Multipart => "multipart/form-data",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}

fn starts_with_ignore_ascii_case(haystack: &str, prefix: &str) -> bool {
    haystack
        .as_bytes()
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix.as_bytes()))
}

/// A request body, as handed to [`Decoder::decode_body`].
pub enum Body<'a> {
    /// The raw bytes of the body.
    Bytes(&'a [u8]),
    /// A reader yielding the body; it is read to the end.
    Reader(&'a mut dyn std::io::Read),
    /// Fields already extracted by the caller, e.g. from a multipart body.
    Fields(&'a FormInput),
}

impl fmt::Debug for Body<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            Body::Reader(_) => f.write_str("Reader"),
            Body::Fields(input) => f.debug_tuple("Fields").field(input).finish(),
        }
    }
}

impl<'a> From<&'a [u8]> for Body<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Body::Bytes(bytes)
    }
}

impl<'a> From<&'a str> for Body<'a> {
    fn from(text: &'a str) -> Self {
        Body::Bytes(text.as_bytes())
    }
}

impl<'a> From<&'a FormInput> for Body<'a> {
    fn from(input: &'a FormInput) -> Self {
        Body::Fields(input)
    }
}

impl Decoder {
    /// Decodes a request body into `dest`, choosing the format from
    /// `content_type`.
    ///
    /// Checks run in this order: `dest` must be a record, the content type
    /// must be recognized. JSON and XML bodies go through serde and replace
    /// `dest` as a whole, except that an empty JSON or XML body leaves `dest`
    /// untouched. URL-encoded and multipart bodies always go through the
    /// field walk with the configured tag, so an empty form still reports
    /// its required fields as missing. Multipart bodies must arrive as
    /// [`Body::Fields`].
    ///
    /// ```
    /// use intake::{Bind, Body, Decoder};
    ///
    /// #[derive(Bind, serde::Deserialize, Debug, Default)]
    /// struct Login {
    ///     #[bind(form = "user,required")]
    ///     user: String,
    ///     remember: bool,
    /// }
    ///
    /// let mut login = Login::default();
    /// Decoder::default().decode_body(
    ///     "application/x-www-form-urlencoded",
    ///     Body::from("user=ada&remember=on"),
    ///     &mut login,
    /// )?;
    /// assert_eq!(login.user, "ada");
    /// assert!(login.remember);
    /// # Ok::<(), intake::DecodeError>(())
    /// ```
    pub fn decode_body<T>(
        &self,
        content_type: &str,
        body: Body<'_>,
        dest: &mut T,
    ) -> Result<(), DecodeError>
    where
        T: Introspect + DeserializeOwned,
    {
        match dest.place() {
            Place::Record(_) => {}
            other => return Err(DecodeError::invalid_target_shape(other.describe())),
        }

        let format = Format::from_content_type(content_type)
            .ok_or_else(|| DecodeError::invalid_content_type(content_type))?;
        crate::debug!(content_type, %format, "selected body format");

        match (format, body) {
            (Format::UrlEncoded | Format::Multipart, Body::Fields(input)) => {
                self.decode_form(input, dest)
            }
            (Format::Multipart, _) => Err(DecodeError::parse_failure(
                None,
                "multipart bodies must be supplied as extracted fields",
            )),
            (_, Body::Fields(_)) => Err(DecodeError::parse_failure(
                None,
                alloc::format!("{format} bodies must be supplied as bytes"),
            )),
            (_, Body::Bytes(bytes)) => self.decode_bytes(format, bytes, dest),
            (_, Body::Reader(reader)) => {
                let mut bytes = Vec::new();
                reader
                    .read_to_end(&mut bytes)
                    .map_err(|err| DecodeError::parse_failure(None, err))?;
                self.decode_bytes(format, &bytes, dest)
            }
        }
    }

    fn decode_bytes<T>(&self, format: Format, bytes: &[u8], dest: &mut T) -> Result<(), DecodeError>
    where
        T: Introspect + DeserializeOwned,
    {
        if format == Format::UrlEncoded {
            return self.decode_form(&FormInput::parse_bytes(bytes), dest);
        }

        if bytes.is_empty() {
            crate::trace!(%format, "empty document body, nothing to decode");
            return Ok(());
        }

        match format {
            #[cfg(feature = "json")]
            Format::Json => {
                *dest = serde_json::from_slice(bytes)
                    .map_err(|err| DecodeError::parse_failure(None, err))?;
                Ok(())
            }
            #[cfg(feature = "xml")]
            Format::Xml => {
                *dest = quick_xml::de::from_reader(bytes)
                    .map_err(|err| DecodeError::parse_failure(None, err))?;
                Ok(())
            }
            #[allow(unreachable_patterns)]
            _ => Err(DecodeError::invalid_content_type(format.mime())),
        }
    }
}
