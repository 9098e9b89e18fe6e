//! The field walk: binding flat form input onto a record.

use intake_core::{FieldDef, FieldKind, Introspect, Place, Record};
use jiff::tz::TimeZone;

use crate::{
    DecodeConfig, DecodeError, DestinationDescriptor, FormInput, RawValue, assemble::assemble,
    coerce::coerce, tag::resolve_key,
};

/// Nested records deeper than this are rejected rather than walked.
const MAX_NESTING: usize = 32;

/// Decodes request input into records, under one [`DecodeConfig`].
///
/// A decoder holds no per-call state and can be shared freely between
/// threads.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecodeConfig,
}

impl Decoder {
    /// Creates a decoder with the given configuration.
    pub fn new(config: DecodeConfig) -> Self {
        Self { config }
    }

    /// The configuration this decoder uses.
    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    /// Binds `input` onto `dest` using the configured tag.
    pub fn decode_form<T: Introspect>(
        &self,
        input: &FormInput,
        dest: &mut T,
    ) -> Result<(), DecodeError> {
        self.decode_with_tag(&self.config.tag, input, dest)
    }

    /// Binds query parameters onto `dest`, reading keys from the `query` tag.
    pub fn decode_query<T: Introspect>(
        &self,
        input: &FormInput,
        dest: &mut T,
    ) -> Result<(), DecodeError> {
        self.decode_with_tag(DecodeConfig::QUERY_TAG, input, dest)
    }

    /// Parses a raw query string (without the leading `?`) and binds it onto
    /// `dest` with the `query` tag.
    ///
    /// ```
    /// use intake::{Bind, Decoder};
    ///
    /// #[derive(Bind, Debug, PartialEq)]
    /// struct Page {
    ///     #[bind(query = "page")]
    ///     number: u32,
    ///     #[bind(query = "tag")]
    ///     tags: Vec<String>,
    /// }
    ///
    /// let mut page = <Page as intake::Introspect>::zero();
    /// Decoder::default().decode_query_str("page=3&tag=a&tag=b", &mut page)?;
    /// assert_eq!(page, Page { number: 3, tags: vec!["a".into(), "b".into()] });
    /// # Ok::<(), intake::DecodeError>(())
    /// ```
    pub fn decode_query_str<T: Introspect>(
        &self,
        query: &str,
        dest: &mut T,
    ) -> Result<(), DecodeError> {
        self.decode_query(&FormInput::parse(query), dest)
    }

    /// Binds `input` onto `dest`, resolving keys from the tag named `tag`.
    ///
    /// Fields are visited in declaration order and the first failure stops
    /// the walk. Fields already bound keep their new values; the failing
    /// field and the ones after it are left as they were.
    pub fn decode_with_tag<T: Introspect>(
        &self,
        tag: &str,
        input: &FormInput,
        dest: &mut T,
    ) -> Result<(), DecodeError> {
        match dest.place() {
            Place::Record(record) => Walk {
                input,
                tag,
                fallback_tag: &self.config.fallback_tag,
                time_zone: &self.config.time_zone,
            }
            .record(record, 0),
            other => Err(DecodeError::invalid_target_shape(other.describe())),
        }
    }
}

struct Walk<'a> {
    input: &'a FormInput,
    tag: &'a str,
    fallback_tag: &'a str,
    time_zone: &'a TimeZone,
}

impl Walk<'_> {
    fn record(&self, record: &mut dyn Record, depth: usize) -> Result<(), DecodeError> {
        let defs = record.field_defs();
        let descriptor = DestinationDescriptor::of(record, self.tag, self.fallback_tag);
        crate::debug!(
            tag = self.tag,
            fields = descriptor.fields.len(),
            depth,
            "destination described"
        );

        for field in &descriptor.fields {
            let key = &*field.external_key;

            // Nested records read the same flat input with their own keys.
            if field.kind == FieldKind::Record {
                let present = self.binds_any((defs[field.index].fields)(), depth + 1);
                if !present && field.required {
                    crate::debug!(key, "required nested record is missing");
                    return Err(DecodeError::required_field_missing(key));
                }
                if !present && field.pointer_like {
                    crate::trace!(field = field.name, "nested record absent, left unallocated");
                    continue;
                }
                if depth >= MAX_NESTING {
                    return Err(DecodeError::unsupported_field_type(
                        key,
                        "records nested more than 32 levels deep",
                    ));
                }

                crate::trace!(field = field.name, "descending into nested record");
                match record.field_place(field.index) {
                    Place::Record(nested) => self.record(nested, depth + 1)?,
                    other => {
                        return Err(DecodeError::unsupported_field_type(key, other.describe()));
                    }
                }
                continue;
            }

            let raw = self.input.get(key).filter(|raw| !raw.is_blank());
            crate::trace!(
                field = field.name,
                key,
                present = raw.is_some(),
                "looked up field"
            );

            let Some(raw) = raw else {
                if field.required {
                    crate::debug!(key, "required field is missing");
                    return Err(DecodeError::required_field_missing(key));
                }
                continue;
            };

            if !field.kind.is_supported() {
                return Err(DecodeError::unsupported_field_type(
                    key,
                    &field.kind.to_string(),
                ));
            }

            self.bind(record.field_place(field.index), raw, key)
                .inspect_err(|_err| {
                    crate::debug!(key, error = %_err, "field failed to decode");
                })?;
        }
        Ok(())
    }

    /// Whether any of `fields`, or of the records nested in them, has a
    /// non-blank value in the input.
    fn binds_any(&self, fields: &'static [FieldDef], depth: usize) -> bool {
        if depth > MAX_NESTING {
            return false;
        }
        fields.iter().any(|def| {
            if (def.kind)() == FieldKind::Record {
                return self.binds_any((def.fields)(), depth + 1);
            }
            let key = resolve_key(def, self.tag, self.fallback_tag).key;
            self.input.get(&key).is_some_and(|raw| !raw.is_blank())
        })
    }

    fn bind(&self, place: Place<'_>, raw: &RawValue, key: &str) -> Result<(), DecodeError> {
        match place {
            Place::Sequence(seq) => assemble(seq, raw, self.time_zone, key),
            Place::Custom(scan) => match raw {
                RawValue::Single(token) => scan.scan(token),
                RawValue::Many(tokens) => scan.scan_all(tokens),
            }
            .map_err(|err| DecodeError::parse_failure(Some(key), err)),
            // A repeated scalar takes its first value.
            other => coerce(other, raw.first(), self.time_zone, key),
        }
    }
}
