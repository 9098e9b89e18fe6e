//! Shapes with no decoding rule. They can sit in a record, but a value for
//! them is rejected.

use alloc::collections::BTreeMap;
use std::collections::HashMap;

use crate::{FieldKind, Introspect, Place};

impl<K, V, S> Introspect for HashMap<K, V, S>
where
    S: core::hash::BuildHasher + Default,
{
    fn kind() -> FieldKind {
        FieldKind::Opaque(core::any::type_name::<Self>())
    }

    fn zero() -> Self {
        HashMap::with_hasher(S::default())
    }

    fn place(&mut self) -> Place<'_> {
        Place::Opaque(core::any::type_name::<Self>())
    }
}

impl<K, V> Introspect for BTreeMap<K, V> {
    fn kind() -> FieldKind {
        FieldKind::Opaque(core::any::type_name::<Self>())
    }

    fn zero() -> Self {
        BTreeMap::new()
    }

    fn place(&mut self) -> Place<'_> {
        Place::Opaque(core::any::type_name::<Self>())
    }
}

impl Introspect for () {
    fn kind() -> FieldKind {
        FieldKind::Opaque("()")
    }

    fn zero() -> Self {}

    fn place(&mut self) -> Place<'_> {
        Place::Opaque("()")
    }
}
