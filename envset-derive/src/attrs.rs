//! Attribute parsing for `#[env(...)]` annotations.
//!
//! This module extracts and validates binding attributes from struct fields
//! during macro expansion.

use syn::{Field, LitStr};

/// Parsed `#[env(...)]` attributes from a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Environment variable the field binds to.
    ///
    /// `None` leaves the field untouched by both directions, unless it is
    /// nested.
    pub name: Option<LitStr>,

    /// The field is itself a record and is walked recursively.
    pub nested: bool,
}

impl FieldAttrs {
    /// Extract and parse `#[env(...)]` attributes from a struct field.
    ///
    /// Attributes spread over several `#[env]` lists are merged. Unknown
    /// options, an empty name and a repeated name are errors.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in &field.attrs {
            if !attr.path().is_ident("env") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                // name = "KEY"
                if meta.path.is_ident("name") {
                    let name: LitStr = meta.value()?.parse()?;
                    if name.value().is_empty() {
                        return Err(syn::Error::new_spanned(
                            &name,
                            "environment variable name must not be empty",
                        ));
                    }
                    if attrs.name.is_some() {
                        return Err(meta.error("duplicate `name` in env attribute"));
                    }
                    attrs.name = Some(name);
                    return Ok(());
                }

                // nested
                if meta.path.is_ident("nested") {
                    attrs.nested = true;
                    return Ok(());
                }

                Err(meta.error("unsupported env attribute, expected `name = \"...\"` or `nested`"))
            })?;
        }

        Ok(attrs)
    }

    /// The bound variable name, if any.
    pub fn key(&self) -> Option<String> {
        self.name.as_ref().map(LitStr::value)
    }
}
