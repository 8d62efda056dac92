use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, LitStr};

/// Derive macro that implements `tagvld::Record` and `tagvld::ToFieldValue`
/// for a struct with named fields.
///
/// # Usage
///
/// ```ignore
/// use tagvld::Validate;
///
/// #[derive(Validate)]
/// struct User {
///     #[validate("required,minlen=2")]
///     name: String,
///     #[validate(rules = "email", label = "E-mail")]
///     email: String,
///     // no attribute: never validated
///     internal_id: u64,
/// }
///
/// let errors = tagvld::validate(&user)?;
/// ```
///
/// Only fields carrying `#[validate(...)]` are presented to the validator,
/// in declaration order. The label defaults to the field name. Every tagged
/// field type must implement `tagvld::ToFieldValue`.
///
/// The struct itself becomes a `FieldValue::Record` when used as a field of
/// another validated struct; its own fields are not descended into.
#[proc_macro_derive(Validate, attributes(validate))]
pub fn derive_validate(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

struct TaggedField {
    ident: syn::Ident,
    ty: syn::Type,
    label: String,
    rules: String,
}

fn expand(input: DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Validate can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Validate can only be derived for structs",
            ))
        }
    };

    let mut tagged = Vec::new();
    for field in fields {
        let mut attrs = field
            .attrs
            .iter()
            .filter(|attr| attr.path().is_ident("validate"));
        let Some(attr) = attrs.next() else {
            continue;
        };
        if let Some(extra) = attrs.next() {
            return Err(syn::Error::new_spanned(
                extra,
                "only one #[validate(...)] attribute is allowed per field",
            ));
        }

        // Named fields always have an identifier.
        let ident = field.ident.clone().expect("named field");
        let (label, rules) = parse_validate_attr(attr)?;
        let label = label.unwrap_or_else(|| {
            let raw = ident.to_string();
            raw.strip_prefix("r#").map(str::to_string).unwrap_or(raw)
        });

        tagged.push(TaggedField {
            ident,
            ty: field.ty.clone(),
            label,
            rules,
        });
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let mut where_clause = where_clause
        .cloned()
        .unwrap_or_else(|| syn::parse_quote!(where));
    for field in &tagged {
        let ty = &field.ty;
        where_clause
            .predicates
            .push(syn::parse_quote!(#ty: ::tagvld::input::ToFieldValue));
    }

    let idents = tagged.iter().map(|f| &f.ident);
    let labels = tagged.iter().map(|f| &f.label);
    let rules = tagged.iter().map(|f| &f.rules);
    let plain_where = input.generics.where_clause.as_ref();

    Ok(quote! {
        impl #impl_generics ::tagvld::record::Record for #name #ty_generics #where_clause {
            fn fields(
                &self,
            ) -> ::std::result::Result<
                ::std::vec::Vec<::tagvld::record::Field<'_>>,
                ::tagvld::error::Unsupported,
            > {
                ::std::result::Result::Ok(::std::vec![
                    #(
                        ::tagvld::record::Field::new(#labels, &self.#idents, #rules),
                    )*
                ])
            }
        }

        impl #impl_generics ::tagvld::input::ToFieldValue for #name #ty_generics #plain_where {
            fn to_field_value(&self) -> ::tagvld::input::FieldValue {
                ::tagvld::input::FieldValue::Record
            }
        }
    })
}

/// Accepts `#[validate("rules")]` and
/// `#[validate(rules = "...", label = "...")]`.
fn parse_validate_attr(attr: &Attribute) -> syn::Result<(Option<String>, String)> {
    if let Ok(lit) = attr.parse_args::<LitStr>() {
        return Ok((None, lit.value()));
    }

    let mut rules = None;
    let mut label = None;
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("rules") {
            rules = Some(meta.value()?.parse::<LitStr>()?.value());
            Ok(())
        } else if meta.path.is_ident("label") {
            label = Some(meta.value()?.parse::<LitStr>()?.value());
            Ok(())
        } else {
            Err(meta.error("expected `rules = \"...\"` or `label = \"...\"`"))
        }
    })?;

    let rules = rules.ok_or_else(|| {
        syn::Error::new_spanned(attr, "missing `rules = \"...\"` in #[validate(...)]")
    })?;
    Ok((label, rules))
}
