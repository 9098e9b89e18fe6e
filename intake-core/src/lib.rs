#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

extern crate alloc;

mod kind;
pub use kind::*;

mod place;
pub use place::*;

mod record;
pub use record::*;

mod scan;
pub use scan::*;

mod impls;

/// A type that can be decoded from form-style input.
///
/// Implementations exist for strings, every primitive integer and float,
/// `bool`, the jiff temporal types, `Vec`/`VecDeque`, and the pointer-like
/// wrappers `Option` and `Box`. Records get one from `#[derive(Bind)]`,
/// custom value types from [`scannable!`].
pub trait Introspect: Sized {
    /// Structural classification of this type.
    fn kind() -> FieldKind;

    /// Whether this type is a transparent wrapper that may be unallocated
    /// (`Option<T>`, `Box<T>`).
    fn pointer_like() -> bool {
        false
    }

    /// Declared fields, for records. Wrappers forward their inner type's.
    fn fields() -> &'static [FieldDef] {
        &[]
    }

    /// The value a freshly allocated slot starts out with.
    fn zero() -> Self;

    /// A typed write handle into this value.
    ///
    /// Pointer-like wrappers allocate their inner value on demand, so only call
    /// this once you actually have something to write.
    fn place(&mut self) -> Place<'_>;
}
