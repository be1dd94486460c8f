use darling::ast::NestedMeta;
use darling::{Error, FromDeriveInput as _, FromMeta as _};
use proc_macro2::TokenStream;
use syn::ext::IdentExt as _;
use syn::{Data, DataEnum, DataStruct, Fields, Generics, Ident, Path, Type};

use crate::args::{FieldMeta, FieldRecordMeta, MemberArgs, RecordArgs};

pub fn entry_point(input: syn::DeriveInput) -> darling::Result<TokenStream> {
    let args = RecordArgs::from_derive_input(&input)?;
    let crate_ = args
        .crate_
        .unwrap_or_else(|| syn::parse_quote!(::row_schema));

    if let Some(lifetime) = input.generics.lifetimes().next() {
        let err = Error::custom("described types cannot have lifetime parameters");
        return Err(err.with_span(lifetime));
    }

    let mut generics = input.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(syn::parse_quote!(#crate_::Describe));
    }

    let target = Target {
        crate_: &crate_,
        ident: &input.ident,
        generics: &generics,
    };

    match &input.data {
        Data::Struct(data) => emit_record(&target, data, args.iterable.as_ref()),
        Data::Enum(data) => {
            if let Some(iterable) = &args.iterable {
                let err = Error::custom("only structs can be described as iterable");
                return Err(err.with_span(iterable));
            }

            emit_enum(&target, data)
        },
        Data::Union(_) => {
            let err = Error::custom("Describe must be applied to a struct or enum");
            Err(err.with_span(&input))
        },
    }
}

struct Target<'a> {
    crate_: &'a Path,
    ident: &'a Ident,
    generics: &'a Generics,
}

fn emit_record(
    target: &Target<'_>,
    data: &DataStruct,
    iterable: Option<&Type>,
) -> darling::Result<TokenStream> {
    let Fields::Named(fields) = &data.fields else {
        let err = Error::custom("records must have named fields");
        return Err(err.with_span(&data.fields));
    };

    let mut acc = Error::accumulator();
    let mut members = Vec::new();

    for field in &fields.named {
        let attrs: Vec<_> = field
            .attrs
            .iter()
            .map(|attr| NestedMeta::Meta(attr.meta.clone()))
            .collect();

        let Some(attrs) = acc.handle(FieldMeta::from_list(&attrs)) else {
            continue;
        };

        let attrs = FieldRecordMeta::merge(attrs.record);
        if attrs.skip {
            continue;
        }

        let Some(ident) = &field.ident else {
            acc.push(Error::custom("all fields must have a name").with_span(field));
            continue;
        };

        let name = attrs.rename.unwrap_or_else(|| ident.unraw().to_string());
        if name.is_empty() {
            acc.push(Error::custom("the member name must not be empty").with_span(ident));
            continue;
        }

        members.push(MemberArgs {
            name,
            ty: &field.ty,
        });
    }

    acc.finish()?;

    let Target {
        crate_,
        ident,
        generics,
    } = target;

    let (impl_gen, ty_gen, where_clause) = generics.split_for_impl();
    let names = members.iter().map(|m| &m.name);
    let tys = members.iter().map(|m| m.ty);

    let describe = match iterable {
        Some(elem) => quote::quote! {
            #crate_::TypeDesc::iterable::<Self, #elem>().with_members::<Self>()
        },
        None => quote::quote! {
            #crate_::TypeDesc::record::<Self>()
        },
    };

    Ok(quote::quote! {
        #[automatically_derived]
        impl #impl_gen #crate_::Record for #ident #ty_gen #where_clause {
            fn members() -> ::std::vec::Vec<#crate_::Member> {
                ::std::vec![
                    #(
                        #crate_::Member::new::<#tys>(#names),
                    )*
                ]
            }
        }

        #[automatically_derived]
        impl #impl_gen #crate_::Describe for #ident #ty_gen #where_clause {
            fn describe() -> #crate_::TypeDesc {
                #describe
            }
        }
    })
}

fn emit_enum(target: &Target<'_>, data: &DataEnum) -> darling::Result<TokenStream> {
    let mut acc = Error::accumulator();
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            let err = Error::custom("described enum variants cannot have fields");
            acc.push(err.with_span(variant));
        }
    }

    acc.finish()?;

    let Target {
        crate_,
        ident,
        generics,
    } = target;

    let (impl_gen, ty_gen, where_clause) = generics.split_for_impl();

    Ok(quote::quote! {
        #[automatically_derived]
        impl #impl_gen #crate_::Describe for #ident #ty_gen #where_clause {
            fn describe() -> #crate_::TypeDesc {
                #crate_::TypeDesc::enumeration::<Self>()
            }
        }
    })
}
