//! Derive macro for tagsql models.
//!
//! This crate provides `#[derive(Model)]`, which turns a struct with named
//! fields into a `tagsql_core::schema::Model`: a schema description the
//! mapper converts into a table, plus the row values used by the DML helpers.

use heck::ToSnakeCase;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{
    parse_macro_input, Attribute, Data, DeriveInput, Fields, GenericArgument, LitStr,
    PathArguments, Type,
};

/// Derives `Model` for a struct.
///
/// # Attributes
///
/// - `#[tagsql(table = "name")]` - Uses `name` verbatim as the table name
///   (optional, defaults to the snake case of the struct name)
///
/// # Field Attributes
///
/// - `#[tagsql("type:varchar(64);constraints:notnull,unique")]` - The field's
///   tag, in the usual `key:value;key:value` grammar. A `-` segment leaves
///   the field out of both the table and the row values.
///
/// The column kind is inferred from the field type: strings, integers,
/// floats, `bool`, `chrono` date-times and `uuid::Uuid` are recognized, and
/// `Option<T>` takes the kind of `T`. Every mapped field must implement
/// `ToSqlValue` and `Clone`.
#[proc_macro_derive(Model, attributes(tagsql))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive_model_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

fn derive_model_impl(input: DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let type_name = struct_name.unraw().to_string();
    let table_name = get_table_name(&input.attrs)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Model derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Model derive only supports structs",
            ));
        }
    };

    let mut schema_fields = Vec::new();
    let mut value_entries = Vec::new();
    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let name = ident.unraw().to_string();
        let tag = get_field_tag(&field.attrs)?.unwrap_or_default();
        let kind = field_kind(&field.ty);

        schema_fields.push(quote! {
            .field(
                ::tagsql_core::schema::Field::new(#name, #kind).tag(#tag)
            )
        });

        if !is_ignored(&tag) {
            let column = name.to_snake_case();
            value_entries.push(quote! {
                (
                    ::std::string::String::from(#column),
                    ::tagsql_core::value::ToSqlValue::to_sql_value(
                        ::core::clone::Clone::clone(&self.#ident),
                    ),
                )
            });
        }
    }

    let table_override = table_name.map(|table| quote! { .table(#table) });
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::tagsql_core::schema::Model for #struct_name #ty_generics #where_clause {
            fn schema() -> ::tagsql_core::schema::ModelSchema {
                ::tagsql_core::schema::ModelSchema::new(#type_name)
                    #table_override
                    #(#schema_fields)*
            }

            fn to_values(
                &self,
            ) -> ::std::vec::Vec<(::std::string::String, ::tagsql_core::value::SqlValue)> {
                ::std::vec![#(#value_entries),*]
            }
        }
    })
}

fn get_table_name(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut table_name = None;
    for attr in attrs {
        if attr.path().is_ident("tagsql") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("table") {
                    let value: LitStr = meta.value()?.parse()?;
                    table_name = Some(value.value());
                    Ok(())
                } else {
                    Err(meta.error("expected `table = \"...\"`"))
                }
            })?;
        }
    }
    Ok(table_name)
}

fn get_field_tag(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut tag = None;
    for attr in attrs {
        if attr.path().is_ident("tagsql") {
            if tag.is_some() {
                return Err(syn::Error::new_spanned(attr, "duplicate tagsql tag"));
            }
            let value: LitStr = attr.parse_args()?;
            tag = Some(value.value());
        }
    }
    Ok(tag)
}

fn is_ignored(tag: &str) -> bool {
    tag.split(';').any(|segment| segment.trim() == "-")
}

fn last_segment(ty: &Type) -> Option<&syn::PathSegment> {
    match ty {
        Type::Path(path) if path.qself.is_none() => path.path.segments.last(),
        _ => None,
    }
}

fn option_inner(ty: &Type) -> Option<&Type> {
    let segment = last_segment(ty)?;
    if segment.ident != "Option" {
        return None;
    }
    match &segment.arguments {
        PathArguments::AngleBracketed(args) => args.args.iter().find_map(|arg| match arg {
            GenericArgument::Type(inner) => Some(inner),
            _ => None,
        }),
        _ => None,
    }
}

fn field_kind(ty: &Type) -> TokenStream2 {
    if let Some(inner) = option_inner(ty) {
        if type_name(inner).as_deref().is_some_and(is_datetime) {
            return quote! { ::tagsql_core::schema::FieldKind::NullableDateTime };
        }
        return field_kind(inner);
    }

    let Some(name) = type_name(ty) else {
        let rendered = quote!(#ty).to_string();
        return quote! { ::tagsql_core::schema::FieldKind::Other(::std::string::String::from(#rendered)) };
    };

    match name.as_str() {
        "String" | "str" => quote! { ::tagsql_core::schema::FieldKind::String },
        "i8" | "i16" | "i32" | "u8" | "u16" | "u32" => {
            quote! { ::tagsql_core::schema::FieldKind::Int32 }
        }
        "i64" | "u64" | "isize" | "usize" => quote! { ::tagsql_core::schema::FieldKind::Int64 },
        "f32" => quote! { ::tagsql_core::schema::FieldKind::Float32 },
        "f64" => quote! { ::tagsql_core::schema::FieldKind::Float64 },
        "bool" => quote! { ::tagsql_core::schema::FieldKind::Bool },
        "Uuid" => quote! { ::tagsql_core::schema::FieldKind::Uuid },
        n if is_datetime(n) => quote! { ::tagsql_core::schema::FieldKind::DateTime },
        _ => quote! { ::tagsql_core::schema::FieldKind::Other(::std::string::String::from(#name)) },
    }
}

fn type_name(ty: &Type) -> Option<String> {
    match ty {
        Type::Reference(reference) => type_name(&reference.elem),
        _ => last_segment(ty).map(|segment| segment.ident.to_string()),
    }
}

fn is_datetime(name: &str) -> bool {
    matches!(name, "NaiveDateTime" | "DateTime")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(ty: &str) -> String {
        let ty: Type = syn::parse_str(ty).unwrap();
        field_kind(&ty).to_string().replace(' ', "")
    }

    #[test]
    fn test_field_kinds() {
        assert!(kind_of("String").ends_with("FieldKind::String"));
        assert!(kind_of("&'static str").ends_with("FieldKind::String"));
        assert!(kind_of("u16").ends_with("FieldKind::Int32"));
        assert!(kind_of("i64").ends_with("FieldKind::Int64"));
        assert!(kind_of("f32").ends_with("FieldKind::Float32"));
        assert!(kind_of("uuid::Uuid").ends_with("FieldKind::Uuid"));
        assert!(kind_of("chrono::NaiveDateTime").ends_with("FieldKind::DateTime"));
        assert!(kind_of("Option<DateTime<Utc>>").ends_with("FieldKind::NullableDateTime"));
        assert!(kind_of("Option<i32>").ends_with("FieldKind::Int32"));
        assert!(kind_of("Vec<u8>").contains("FieldKind::Other"));
    }

    #[test]
    fn test_ignored_tags() {
        assert!(is_ignored("-"));
        assert!(is_ignored("type:text; - "));
        assert!(!is_ignored("constraints:default(-1)"));
        assert!(!is_ignored(""));
    }

    #[test]
    fn test_table_attribute() {
        let input: DeriveInput = syn::parse_quote! {
            #[tagsql(table = "people")]
            struct Person {
                id: i64,
            }
        };
        assert_eq!(get_table_name(&input.attrs).unwrap().as_deref(), Some("people"));
    }

    #[test]
    fn test_rejects_tuple_structs() {
        let input: DeriveInput = syn::parse_quote! {
            struct Pair(i32, i32);
        };
        let err = derive_model_impl(input).unwrap_err();
        assert!(err.to_string().contains("named fields"));
    }
}
