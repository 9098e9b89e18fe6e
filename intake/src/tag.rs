//! Resolution of a field's external key from its tags.

use alloc::{borrow::Cow, string::String};

use intake_core::FieldDef;

/// Modifier token marking a field required.
const REQUIRED: &str = "required";

/// The outcome of key resolution for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedKey {
    /// Key the field is looked up by. May be empty if a tag says so.
    pub key: Cow<'static, str>,

    /// Whether a value must be present.
    pub required: bool,
}

/// Resolves the external key of `field`.
///
/// Precedence is fixed: the `tag` tag, then the `fallback` tag, then the
/// declared name in snake case. A tag value is a comma-separated list whose
/// first token is the key and whose other tokens are modifiers. Every token,
/// the key included, has surrounding whitespace trimmed; an explicit empty
/// key stays empty and is not replaced by the declared name. The field is
/// required if `required` is among the modifiers or if a `required` tag
/// equals `"true"`.
pub fn resolve_key(field: &FieldDef, tag: &str, fallback: &str) -> ResolvedKey {
    let marker = field.tag(REQUIRED) == Some("true");

    let Some(value) = field.tag(tag).or_else(|| field.tag(fallback)) else {
        return ResolvedKey {
            key: Cow::Owned(snake_case(field.name)),
            required: marker,
        };
    };

    let mut tokens = value.split(',');
    let key = tokens.next().unwrap_or_default().trim();
    let flagged = tokens.any(|token| token.trim() == REQUIRED);

    ResolvedKey {
        key: Cow::Borrowed(key),
        required: marker || flagged,
    }
}

/// Converts a declared name to lower snake case.
///
/// Every uppercase letter after the first character gets an `_` in front,
/// then everything is lowercased. Consecutive capitals are not grouped:
/// `UserID` becomes `user_i_d`.
pub fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (index, ch) in name.chars().enumerate() {
        if ch.is_uppercase() {
            if index > 0 {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
