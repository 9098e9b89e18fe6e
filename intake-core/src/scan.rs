use alloc::{boxed::Box, string::String};

/// Error produced by a [`Scan`] implementation. The decoder wraps it verbatim.
pub type ScanError = Box<dyn core::error::Error + Send + Sync>;

/// The custom-scan capability.
///
/// A type implementing `Scan` receives the raw token and is fully responsible
/// for its own conversion; the decoder does not inspect the result. This is the
/// extension point for value types the decoder has no built-in rule for.
///
/// ```
/// use intake_core::{Scan, ScanError, scannable};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Rgb(u8, u8, u8);
///
/// impl Scan for Rgb {
///     fn scan(&mut self, token: &str) -> Result<(), ScanError> {
///         let hex = token.strip_prefix('#').ok_or("expected a leading `#`")?;
///         let value = u32::from_str_radix(hex, 16)?;
///         *self = Rgb((value >> 16) as u8, (value >> 8) as u8, value as u8);
///         Ok(())
///     }
/// }
///
/// scannable!(Rgb);
/// ```
pub trait Scan {
    /// Decode a single token into `self`.
    fn scan(&mut self, token: &str) -> Result<(), ScanError>;

    /// Decode a native multi-value entry.
    ///
    /// Defaults to scanning the first token and ignoring the rest; override it
    /// for types that consume every value at once.
    fn scan_all(&mut self, tokens: &[String]) -> Result<(), ScanError> {
        match tokens.first() {
            Some(token) => self.scan(token),
            None => Ok(()),
        }
    }
}

/// Implements [`Introspect`](crate::Introspect) for types that implement
/// [`Scan`] and `Default`, classifying them as
/// [`FieldKind::CustomScannable`](crate::FieldKind::CustomScannable).
#[macro_export]
macro_rules! scannable {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Introspect for $ty {
                fn kind() -> $crate::FieldKind {
                    $crate::FieldKind::CustomScannable
                }

                fn zero() -> Self {
                    <$ty as ::core::default::Default>::default()
                }

                fn place(&mut self) -> $crate::Place<'_> {
                    $crate::Place::Custom(self)
                }
            }
        )+
    };
}
