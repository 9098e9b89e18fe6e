#![doc = include_str!("../README.md")]

use proc_macro2::TokenStream;
use quote::quote;
use syn::{ItemFn, parse_macro_input, parse_quote};

/// Test attribute that sets up tracing before running the test.
///
/// Basic usage (uses `#[test]`):
/// ```ignore
/// #[intake_testhelpers::test]
/// fn my_test() {
///     // tracing is set up automatically
/// }
/// ```
///
/// With another test attribute, e.g. for async tests:
/// ```ignore
/// #[intake_testhelpers::test(tokio::test)]
/// async fn my_async_test() {}
/// ```
#[proc_macro_attribute]
pub fn test(
    attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let attr = TokenStream::from(attr);
    let mut function = parse_macro_input!(item as ItemFn);

    let test_attr = if attr.is_empty() {
        quote! { #[::core::prelude::rust_2024::test] }
    } else {
        quote! { #[#attr] }
    };

    function
        .block
        .stmts
        .insert(0, parse_quote! { ::intake_testhelpers::setup(); });

    quote! {
        #test_attr
        #function
    }
    .into()
}
