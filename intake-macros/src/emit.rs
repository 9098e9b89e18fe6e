//! Code generation for `#[derive(Bind)]`.

use proc_macro2::{Literal, TokenStream};
use quote::quote;

use crate::parse::BindStruct;

pub(crate) fn emit(parsed: &BindStruct) -> TokenStream {
    let ident = &parsed.ident;
    let decoded: Vec<_> = parsed.fields.iter().filter(|f| !f.skip).collect();

    let defs = decoded.iter().map(|field| {
        let name = &field.name;
        let ty = &field.ty;
        let tags = field.tags.iter().map(|(tag, value)| quote! { (#tag, #value) });
        quote! {
            ::intake::FieldDef {
                name: #name,
                tags: &[#(#tags),*],
                kind: <#ty as ::intake::Introspect>::kind,
                pointer_like: <#ty as ::intake::Introspect>::pointer_like,
                fields: <#ty as ::intake::Introspect>::fields,
            }
        }
    });

    let places = decoded.iter().enumerate().map(|(index, field)| {
        let index = Literal::usize_unsuffixed(index);
        let member = &field.member;
        quote! { #index => ::intake::Introspect::place(&mut self.#member) }
    });

    let zeroes = parsed.fields.iter().map(|field| {
        let member = &field.member;
        let ty = &field.ty;
        if field.skip {
            quote! { #member: ::core::default::Default::default() }
        } else {
            quote! { #member: <#ty as ::intake::Introspect>::zero() }
        }
    });

    // A scannable struct decodes itself; it is never walked field by field.
    if parsed.scan {
        return quote! {
            #[automatically_derived]
            impl ::intake::Introspect for #ident {
                fn kind() -> ::intake::FieldKind {
                    ::intake::FieldKind::CustomScannable
                }

                fn zero() -> Self {
                    Self {
                        #(#zeroes,)*
                    }
                }

                fn place(&mut self) -> ::intake::Place<'_> {
                    ::intake::Place::Custom(self)
                }
            }
        };
    }

    quote! {
        #[automatically_derived]
        impl ::intake::Record for #ident {
            fn field_defs(&self) -> &'static [::intake::FieldDef] {
                <Self as ::intake::Introspect>::fields()
            }

            fn field_place(&mut self, index: usize) -> ::intake::Place<'_> {
                match index {
                    #(#places,)*
                    _ => ::intake::Place::Opaque("<field index out of range>"),
                }
            }
        }

        #[automatically_derived]
        impl ::intake::Introspect for #ident {
            fn kind() -> ::intake::FieldKind {
                ::intake::FieldKind::Record
            }

            fn fields() -> &'static [::intake::FieldDef] {
                const FIELDS: &[::intake::FieldDef] = &[#(#defs),*];
                FIELDS
            }

            fn zero() -> Self {
                Self {
                    #(#zeroes,)*
                }
            }

            fn place(&mut self) -> ::intake::Place<'_> {
                ::intake::Place::Record(self)
            }
        }
    }
}
