//! Scalar implementations: bool, integers, floats

use crate::{FieldKind, FloatPlace, IntPlace, Introspect, Place, UintPlace};

impl Introspect for bool {
    fn kind() -> FieldKind {
        FieldKind::Bool
    }

    fn zero() -> Self {
        false
    }

    fn place(&mut self) -> Place<'_> {
        Place::Bool(self)
    }
}

macro_rules! impl_introspect_for_integer {
    ($type:ty, $family:ident, $place:ident :: $variant:ident) => {
        impl Introspect for $type {
            fn kind() -> FieldKind {
                FieldKind::$family { bits: <$type>::BITS }
            }

            fn zero() -> Self {
                0
            }

            fn place(&mut self) -> Place<'_> {
                Place::$family($place::$variant(self))
            }
        }
    };
}

impl_introspect_for_integer!(i8, Int, IntPlace::I8);
impl_introspect_for_integer!(i16, Int, IntPlace::I16);
impl_introspect_for_integer!(i32, Int, IntPlace::I32);
impl_introspect_for_integer!(i64, Int, IntPlace::I64);
impl_introspect_for_integer!(i128, Int, IntPlace::I128);
impl_introspect_for_integer!(isize, Int, IntPlace::Isize);
impl_introspect_for_integer!(u8, Uint, UintPlace::U8);
impl_introspect_for_integer!(u16, Uint, UintPlace::U16);
impl_introspect_for_integer!(u32, Uint, UintPlace::U32);
impl_introspect_for_integer!(u64, Uint, UintPlace::U64);
impl_introspect_for_integer!(u128, Uint, UintPlace::U128);
impl_introspect_for_integer!(usize, Uint, UintPlace::Usize);

impl Introspect for f32 {
    fn kind() -> FieldKind {
        FieldKind::Float { bits: 32 }
    }

    fn zero() -> Self {
        0.0
    }

    fn place(&mut self) -> Place<'_> {
        Place::Float(FloatPlace::F32(self))
    }
}

impl Introspect for f64 {
    fn kind() -> FieldKind {
        FieldKind::Float { bits: 64 }
    }

    fn zero() -> Self {
        0.0
    }

    fn place(&mut self) -> Place<'_> {
        Place::Float(FloatPlace::F64(self))
    }
}
