//! Owned containers: `String`, `Vec`, `VecDeque`, and the pointer-like
//! wrappers `Option` and `Box`.

use alloc::{boxed::Box, collections::VecDeque, string::String, vec::Vec};

use crate::{Abort, FieldDef, FieldKind, Introspect, Place, Sequence};

impl Introspect for String {
    fn kind() -> FieldKind {
        FieldKind::String
    }

    fn zero() -> Self {
        String::new()
    }

    fn place(&mut self) -> Place<'_> {
        Place::String(self)
    }
}

impl<T: Introspect> Introspect for Option<T> {
    fn kind() -> FieldKind {
        T::kind()
    }

    fn pointer_like() -> bool {
        true
    }

    fn fields() -> &'static [FieldDef] {
        T::fields()
    }

    fn zero() -> Self {
        None
    }

    fn place(&mut self) -> Place<'_> {
        self.get_or_insert_with(T::zero).place()
    }
}

impl<T: Introspect> Introspect for Box<T> {
    fn kind() -> FieldKind {
        T::kind()
    }

    fn pointer_like() -> bool {
        true
    }

    fn fields() -> &'static [FieldDef] {
        T::fields()
    }

    fn zero() -> Self {
        Box::new(T::zero())
    }

    fn place(&mut self) -> Place<'_> {
        (**self).place()
    }
}

/// Build `len` elements into a staging vector.
fn stage<T: Introspect>(
    len: usize,
    fill: &mut dyn FnMut(usize, Place<'_>) -> Result<(), Abort>,
) -> Result<Vec<T>, Abort> {
    let mut staged = Vec::with_capacity(len);
    for index in 0..len {
        let mut element = T::zero();
        fill(index, element.place())?;
        staged.push(element);
    }
    Ok(staged)
}

impl<T: Introspect> Sequence for Vec<T> {
    fn element_kind(&self) -> FieldKind {
        T::kind()
    }

    fn assemble(
        &mut self,
        len: usize,
        fill: &mut dyn FnMut(usize, Place<'_>) -> Result<(), Abort>,
    ) -> Result<(), Abort> {
        *self = stage(len, fill)?;
        Ok(())
    }
}

impl<T: Introspect> Introspect for Vec<T> {
    fn kind() -> FieldKind {
        FieldKind::sequence_of(T::kind())
    }

    fn zero() -> Self {
        Vec::new()
    }

    fn place(&mut self) -> Place<'_> {
        Place::Sequence(self)
    }
}

impl<T: Introspect> Sequence for VecDeque<T> {
    fn element_kind(&self) -> FieldKind {
        T::kind()
    }

    fn assemble(
        &mut self,
        len: usize,
        fill: &mut dyn FnMut(usize, Place<'_>) -> Result<(), Abort>,
    ) -> Result<(), Abort> {
        *self = stage(len, fill)?.into();
        Ok(())
    }
}

impl<T: Introspect> Introspect for VecDeque<T> {
    fn kind() -> FieldKind {
        FieldKind::sequence_of(T::kind())
    }

    fn zero() -> Self {
        VecDeque::new()
    }

    fn place(&mut self) -> Place<'_> {
        Place::Sequence(self)
    }
}
