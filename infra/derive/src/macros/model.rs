use proc_macro2::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Attribute, Data, DeriveInput, Expr, Field, Fields, LitStr, Meta, Path};

const ATTR: &str = "fixture";

struct FieldSpec {
    key: String,
    default: TokenStream,
    depends_on: Vec<String>,
    derivation: Option<Path>,
}

pub fn expand(input: DeriveInput) -> TokenStream {
    match expand_inner(&input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn expand_inner(input: &DeriveInput) -> syn::Result<TokenStream> {
    let ident = &input.ident;
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(ident, "Model can only be derived for structs"));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new_spanned(ident, "Model requires a struct with named fields"));
    };
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            ident,
            "Model cannot be derived for generic structs, implement `fixtura::Model` by hand",
        ));
    }

    let model_name = model_name(&input.attrs)?.unwrap_or_else(|| ident.to_string());
    let specs = fields
        .named
        .iter()
        .filter_map(|field| field_spec(field).transpose())
        .collect::<syn::Result<Vec<_>>>()?;

    let steps = specs.iter().map(|spec| {
        let key = &spec.key;
        let default = &spec.default;
        match &spec.derivation {
            Some(func) => {
                let refs = &spec.depends_on;
                quote! {
                    let blueprint = blueprint.try_derived(
                        #key,
                        #default,
                        ::fixtura::DependsOn::new((&[#(#refs),*] as &[&str]).iter().copied(), #func),
                    )?;
                }
            }
            None => quote! { let blueprint = blueprint.try_field(#key, #default)?; },
        }
    });

    Ok(quote! {
        #[automatically_derived]
        impl ::fixtura::Model for #ident {
            fn model_id() -> ::fixtura::ModelId {
                ::fixtura::ModelId::new(#model_name)
            }

            fn blueprint() -> ::core::result::Result<::fixtura::Blueprint, ::fixtura::FactoryError> {
                let blueprint = ::fixtura::Blueprint::new();
                #(#steps)*
                ::core::result::Result::Ok(blueprint)
            }

            fn construct(
                fields: ::fixtura::FieldSet,
            ) -> ::core::result::Result<Self, ::fixtura::FactoryError> {
                ::fixtura::construct_with_serde(fields)
            }
        }
    })
}

fn model_name(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut name = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident(ATTR)) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                name = Some(meta.value()?.parse::<LitStr>()?.value());
                Ok(())
            } else {
                Err(meta.error("unsupported model attribute, expected `name = \"...\"`"))
            }
        })?;
    }
    Ok(name)
}

fn field_spec(field: &Field) -> syn::Result<Option<FieldSpec>> {
    let attrs: Vec<_> = field.attrs.iter().filter(|attr| attr.path().is_ident(ATTR)).collect();
    if attrs.is_empty() {
        return Ok(None);
    }
    let Some(ident) = &field.ident else {
        return Err(syn::Error::new(field.span(), "Model fields must be named"));
    };

    let mut key = ident.to_string().trim_start_matches("r#").to_owned();
    let mut default: Option<Expr> = None;
    let mut depends_on = Vec::new();
    let mut derivation = None;
    let mut declared_refs = false;

    for attr in attrs {
        if matches!(attr.meta, Meta::Path(_)) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("default") {
                if meta.input.peek(syn::Token![=]) {
                    default = Some(meta.value()?.parse()?);
                }
                Ok(())
            } else if meta.path.is_ident("depends_on") {
                declared_refs = true;
                meta.parse_nested_meta(|inner| {
                    let Some(name) = inner.path.get_ident() else {
                        return Err(inner.error("expected a field name"));
                    };
                    depends_on.push(name.to_string().trim_start_matches("r#").to_owned());
                    Ok(())
                })
            } else if meta.path.is_ident("with") {
                derivation = Some(meta.value()?.parse::<Path>()?);
                Ok(())
            } else if meta.path.is_ident("key") {
                key = meta.value()?.parse::<LitStr>()?.value();
                Ok(())
            } else {
                Err(meta.error("unsupported field attribute, expected `default`, `depends_on`, `with` or `key`"))
            }
        })?;
    }

    if declared_refs && derivation.is_none() {
        return Err(syn::Error::new_spanned(
            ident,
            "`depends_on(...)` needs a derivation function: add `with = path::to::fn`",
        ));
    }

    let ty = &field.ty;
    let default = default.map_or_else(
        || quote! { <#ty as ::core::default::Default>::default() },
        |expr| quote! { #expr },
    );

    Ok(Some(FieldSpec { key, default, depends_on, derivation }))
}
