use crate::{FieldKind, Place};

/// Static description of one declared field, emitted by `#[derive(Bind)]`.
#[derive(Clone, Copy)]
pub struct FieldDef {
    /// The field's declared name.
    pub name: &'static str,

    /// Raw tag entries from `#[bind(...)]`, in declaration order, e.g.
    /// `("form", "user_name,required")` or `("required", "true")`.
    pub tags: &'static [(&'static str, &'static str)],

    /// Classification of the field's type.
    pub kind: fn() -> FieldKind,

    /// Whether the field's type is `Option`/`Box`-wrapped.
    pub pointer_like: fn() -> bool,

    /// Declared fields of the field's type when it is a record, empty
    /// otherwise. Reachable without allocating an `Option`/`Box`.
    pub fields: fn() -> &'static [FieldDef],
}

impl FieldDef {
    /// Looks up a raw tag by name. `None` means the tag is absent, which is
    /// different from a tag whose value is empty.
    pub fn tag(&self, name: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(tag, _)| *tag == name)
            .map(|(_, value)| *value)
    }
}

impl core::fmt::Debug for FieldDef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FieldDef")
            .field("name", &self.name)
            .field("tags", &self.tags)
            .field("kind", &(self.kind)())
            .finish()
    }
}

/// A record: a type with named fields the decoder walks one by one.
///
/// This trait is object safe; the decoder only ever sees `&mut dyn Record`.
pub trait Record {
    /// The declared fields, in declaration order.
    fn field_defs(&self) -> &'static [FieldDef];

    /// A write handle to the field at `index` (an index into
    /// [`field_defs`](Record::field_defs)).
    fn field_place(&mut self, index: usize) -> Place<'_>;
}

/// A collection the decoder can rebuild element by element.
pub trait Sequence {
    /// Kind of the elements.
    fn element_kind(&self) -> FieldKind;

    /// Replace the contents with `len` fresh elements, each initialized by
    /// `fill(index, place)`.
    ///
    /// Elements are staged aside and only swapped in once every `fill` call
    /// succeeded, so a failure leaves the collection untouched.
    fn assemble(
        &mut self,
        len: usize,
        fill: &mut dyn FnMut(usize, Place<'_>) -> Result<(), Abort>,
    ) -> Result<(), Abort>;
}

/// Returned by a [`Sequence::assemble`] fill callback to abandon the whole
/// collection. The caller keeps whatever caused it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Abort;
