#![doc = include_str!("../README.md")]

mod emit;
mod parse;

/// Derives `intake::Record` and `intake::Introspect` for a struct with named
/// fields.
///
/// Field attributes, all inside `#[bind(...)]`:
///
/// - `tag = "key,modifier,..."`: any `name = "value"` pair is recorded as a raw
///   tag (`form`, `query`, `json`, `header`, ...). The decoder picks the tag
///   matching its active tag name.
/// - `required = "true"` (or bare `required`): marks the field required
///   regardless of which tag supplied the key.
/// - `skip`: the field is not decoded and starts out as `Default::default()`.
///
/// Container attributes:
///
/// - `scan`: the struct also implements `intake::Scan` and is decoded through
///   it whenever it appears as a field.
#[proc_macro_derive(Bind, attributes(bind))]
pub fn derive_bind(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);
    match parse::BindStruct::from_derive_input(&input) {
        Ok(parsed) => emit::emit(&parsed).into(),
        Err(err) => err.to_compile_error().into(),
    }
}
