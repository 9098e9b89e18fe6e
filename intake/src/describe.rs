//! Per-call descriptions of a destination record.

use alloc::{borrow::Cow, vec::Vec};

use intake_core::{FieldKind, Introspect, Place, Record};

use crate::{DecodeConfig, DecodeError, tag::resolve_key};

/// One field of a destination, with its key resolved for the active tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Index into the record's field list.
    pub index: usize,
    /// Declared name.
    pub name: &'static str,
    /// Semantic kind of the field's type.
    pub kind: FieldKind,
    /// Key the field is looked up by.
    pub external_key: Cow<'static, str>,
    /// Whether a value must be present.
    pub required: bool,
    /// Whether the field is `Option`/`Box` wrapped.
    pub pointer_like: bool,
    /// Element kind, for sequences.
    pub element_kind: Option<FieldKind>,
}

/// The fields of a destination record, in declaration order.
///
/// Built fresh for every decode call. Callers that decode the same type in a
/// hot loop may keep one around; the decoder never caches it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationDescriptor {
    /// The fields, in declaration order.
    pub fields: Vec<FieldDescriptor>,
}

impl DestinationDescriptor {
    pub(crate) fn of(record: &dyn Record, tag: &str, fallback_tag: &str) -> Self {
        let fields = record
            .field_defs()
            .iter()
            .enumerate()
            .map(|(index, def)| {
                let resolved = resolve_key(def, tag, fallback_tag);
                if resolved.key.is_empty() {
                    crate::debug!(field = def.name, "field has an explicit empty key");
                }
                let kind = (def.kind)();
                FieldDescriptor {
                    index,
                    name: def.name,
                    element_kind: kind.element().cloned(),
                    kind,
                    external_key: resolved.key,
                    required: resolved.required,
                    pointer_like: (def.pointer_like)(),
                }
            })
            .collect();
        Self { fields }
    }

    /// Looks up a field by its external key.
    pub fn field(&self, external_key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.external_key == external_key)
    }
}

/// Describes `dest` for the given configuration.
///
/// Fails with [`InvalidTargetShape`](crate::ErrorKind::InvalidTargetShape)
/// if `dest` is not a record.
///
/// ```
/// use intake::{Bind, DecodeConfig, FieldKind, describe};
///
/// #[derive(Bind)]
/// struct Signup {
///     #[bind(form = "email,required")]
///     email: String,
///     tags: Vec<String>,
///     age: Option<u8>,
/// }
///
/// let mut signup = <Signup as intake::Introspect>::zero();
/// let descriptor = describe(&mut signup, &DecodeConfig::default())?;
/// assert_eq!(descriptor.fields[0].external_key, "email");
/// assert!(descriptor.fields[0].required);
/// assert_eq!(descriptor.fields[1].element_kind, Some(FieldKind::String));
/// assert!(descriptor.fields[2].pointer_like);
/// # Ok::<(), intake::DecodeError>(())
/// ```
pub fn describe<T: Introspect>(
    dest: &mut T,
    config: &DecodeConfig,
) -> Result<DestinationDescriptor, DecodeError> {
    match dest.place() {
        Place::Record(record) => Ok(DestinationDescriptor::of(
            record,
            &config.tag,
            &config.fallback_tag,
        )),
        other => Err(DecodeError::invalid_target_shape(other.describe())),
    }
}
