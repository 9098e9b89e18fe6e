//! `Introspect` implementations for foreign types.

mod alloc;
mod jiff;
mod opaque;
mod scalar;
