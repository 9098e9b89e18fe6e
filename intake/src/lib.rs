#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

extern crate alloc;

// Lets `#[derive(Bind)]` output (which names `::intake`) resolve inside this crate's own tests.
extern crate self as intake;

/// Trace-level logging macro that forwards to `tracing::trace!` when the `tracing` feature is enabled.
#[cfg(any(test, feature = "tracing"))]
#[allow(unused_macros)]
macro_rules! trace {
    ($($arg:tt)*) => {
        ::tracing::trace!($($arg)*)
    };
}

/// Trace-level logging macro (no-op when `tracing` feature is disabled).
#[cfg(not(any(test, feature = "tracing")))]
#[allow(unused_macros)]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

/// Debug-level logging macro that forwards to `tracing::debug!` when the `tracing` feature is enabled.
#[cfg(any(test, feature = "tracing"))]
#[allow(unused_macros)]
macro_rules! debug {
    ($($arg:tt)*) => {
        ::tracing::debug!($($arg)*)
    };
}

/// Debug-level logging macro (no-op when `tracing` feature is disabled).
#[cfg(not(any(test, feature = "tracing")))]
#[allow(unused_macros)]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[allow(unused_imports)]
pub(crate) use debug;
#[allow(unused_imports)]
pub(crate) use trace;

mod assemble;
mod coerce;
mod config;
mod decode;
mod describe;
mod error;
mod format;
mod input;
mod tag;
mod temporal;

#[cfg(feature = "axum")]
mod axum;

pub use intake_core::*;
pub use intake_macros::Bind;

#[cfg(feature = "axum")]
pub use crate::axum::{Form, FormRejection, Query, QueryRejection};

pub use coerce::{InvalidBool, parse_bool};
pub use config::DecodeConfig;
pub use decode::Decoder;
pub use describe::{DestinationDescriptor, FieldDescriptor, describe};
pub use error::{DecodeError, ErrorKind};
pub use format::{Body, Format};
pub use input::{FormInput, RawValue};
pub use tag::{ResolvedKey, resolve_key, snake_case};
pub use temporal::{TemporalError, parse_time, parse_time_in};

/// Decode a request body, selecting the format from `content_type`, with the
/// default configuration.
///
/// See [`Decoder::decode_body`].
pub fn from_body<T>(content_type: &str, body: Body<'_>, dest: &mut T) -> Result<(), DecodeError>
where
    T: Introspect + serde::de::DeserializeOwned,
{
    Decoder::default().decode_body(content_type, body, dest)
}

/// Decode already-normalized form fields with the default configuration
/// (`form` tag).
pub fn from_form<T: Introspect>(input: &FormInput, dest: &mut T) -> Result<(), DecodeError> {
    Decoder::default().decode_form(input, dest)
}

/// Decode query parameters (`query` tag) with the default configuration.
pub fn from_query<T: Introspect>(input: &FormInput, dest: &mut T) -> Result<(), DecodeError> {
    Decoder::default().decode_query(input, dest)
}

/// Decode a raw query string such as `page=2&tags=a&tags=b` (`query` tag)
/// with the default configuration.
pub fn from_query_str<T: Introspect>(query: &str, dest: &mut T) -> Result<(), DecodeError> {
    Decoder::default().decode_query_str(query, dest)
}
