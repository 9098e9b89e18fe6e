//! Parsing of `#[derive(Bind)]` input into a small model.

use syn::{Data, DeriveInput, Fields, Ident, LitStr, Type, ext::IdentExt, spanned::Spanned};

/// A struct accepted by the derive.
pub(crate) struct BindStruct {
    pub ident: Ident,
    pub scan: bool,
    pub fields: Vec<BindField>,
}

/// One named field.
pub(crate) struct BindField {
    pub member: Ident,
    /// Declared name, `r#` stripped.
    pub name: String,
    pub ty: Type,
    pub tags: Vec<(String, String)>,
    pub skip: bool,
}

impl BindStruct {
    pub fn from_derive_input(input: &DeriveInput) -> syn::Result<Self> {
        if !input.generics.params.is_empty() {
            return Err(syn::Error::new(
                input.generics.span(),
                "`Bind` cannot be derived for generic types",
            ));
        }

        let named = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named,
                other => {
                    return Err(syn::Error::new(
                        other.span(),
                        "`Bind` requires a struct with named fields",
                    ));
                }
            },
            Data::Enum(data) => {
                return Err(syn::Error::new(
                    data.enum_token.span,
                    "`Bind` cannot be derived for enums; implement `Scan` and use `scannable!` instead",
                ));
            }
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span,
                    "`Bind` cannot be derived for unions",
                ));
            }
        };

        let mut scan = false;
        for attr in input.attrs.iter().filter(|a| a.path().is_ident("bind")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("scan") {
                    scan = true;
                    Ok(())
                } else {
                    Err(meta.error("unknown container attribute, expected `scan`"))
                }
            })?;
        }

        let mut fields = Vec::with_capacity(named.named.len());
        for field in &named.named {
            let member = field
                .ident
                .clone()
                .ok_or_else(|| syn::Error::new(field.span(), "expected a named field"))?;
            let mut tags = Vec::new();
            let mut skip = false;

            for attr in field.attrs.iter().filter(|a| a.path().is_ident("bind")) {
                attr.parse_nested_meta(|meta| {
                    let Some(tag) = meta.path.get_ident() else {
                        return Err(meta.error("expected a tag name"));
                    };
                    let tag = tag.unraw().to_string();

                    if meta.input.peek(syn::Token![=]) {
                        let value: LitStr = meta.value()?.parse()?;
                        tags.push((tag, value.value()));
                        return Ok(());
                    }

                    match tag.as_str() {
                        "skip" => skip = true,
                        "required" => tags.push((tag, "true".to_owned())),
                        _ => {
                            return Err(meta.error(format!(
                                "expected `{tag} = \"...\"`, `required` or `skip`"
                            )));
                        }
                    }
                    Ok(())
                })?;
            }

            fields.push(BindField {
                name: member.unraw().to_string(),
                member,
                ty: field.ty.clone(),
                tags,
                skip,
            });
        }

        Ok(BindStruct {
            ident: input.ident.clone(),
            scan,
            fields,
        })
    }
}
