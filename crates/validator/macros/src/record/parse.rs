//! Parsing of #[tag(...)] attributes

use syn::ext::IdentExt;
use syn::{Attribute, LitStr, Token};

/// Annotations attached to one field, in declaration order.
#[derive(Debug, Default, Clone)]
pub(super) struct FieldTags {
    pub pairs: Vec<(String, LitStr)>,
    /// `#[tag(skip)]`: the field is left out of the descriptor table.
    pub skip: bool,
}

impl FieldTags {
    /// Collects `key = "text"` pairs from every `#[tag(...)]` attribute.
    pub(super) fn from_attributes(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("tag") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                let Some(ident) = meta.path.get_ident() else {
                    return Err(meta.error("expected `key = \"annotation\"`"));
                };
                let key = ident.unraw().to_string();

                if key == "skip" && !meta.input.peek(Token![=]) {
                    result.skip = true;
                    return Ok(());
                }

                if result.pairs.iter().any(|(existing, _)| *existing == key) {
                    return Err(meta.error(format!("duplicate annotation key `{key}`")));
                }

                let text: LitStr = meta.value()?.parse()?;
                result.pairs.push((key, text));
                Ok(())
            })?;
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn field_attrs(field: syn::Field) -> Vec<Attribute> {
        field.attrs
    }

    #[test]
    fn collects_pairs_in_order() {
        let attrs = field_attrs(parse_quote! {
            #[tag(validate = "min=3", json = "name")]
            #[tag(r#type = "x")]
            #[doc = "ignored"]
            pub name: String
        });

        let tags = FieldTags::from_attributes(&attrs).unwrap();
        let keys: Vec<_> = tags.pairs.iter().map(|(k, v)| (k.as_str(), v.value())).collect();
        assert_eq!(
            keys,
            vec![
                ("validate", "min=3".to_owned()),
                ("json", "name".to_owned()),
                ("type", "x".to_owned()),
            ]
        );
    }

    #[test]
    fn skip_marker_is_a_flag() {
        let attrs = field_attrs(parse_quote! {
            #[tag(skip)]
            timeout: std::time::Duration
        });
        let tags = FieldTags::from_attributes(&attrs).unwrap();
        assert!(tags.skip);
        assert!(tags.pairs.is_empty());

        let keyed = field_attrs(parse_quote! { #[tag(skip = "x")] name: String });
        let tags = FieldTags::from_attributes(&keyed).unwrap();
        assert!(!tags.skip);
        assert_eq!(tags.pairs.len(), 1);
    }

    #[test]
    fn rejects_duplicate_keys() {
        let attrs = field_attrs(parse_quote! {
            #[tag(validate = "min=3")]
            #[tag(validate = "max=3")]
            name: String
        });
        assert!(FieldTags::from_attributes(&attrs).is_err());
    }

    #[test]
    fn rejects_flags_and_non_string_values() {
        let flag = field_attrs(parse_quote! { #[tag(validate)] name: String });
        assert!(FieldTags::from_attributes(&flag).is_err());

        let number = field_attrs(parse_quote! { #[tag(validate = 3)] name: String });
        assert!(FieldTags::from_attributes(&number).is_err());
    }
}
