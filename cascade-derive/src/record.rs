use crate::attrs::*;
use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;

/////////////////////////////////////////////////////////////////////////////////////////

pub(crate) fn cascade_impl(input: syn::DeriveInput) -> syn::Result<TokenStream> {
    let syn::Data::Struct(item) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input,
            "#[derive(Cascade)] can only be applied to structs",
        ));
    };

    let syn::Fields::Named(fields) = &item.fields else {
        return Err(syn::Error::new_spanned(
            &input,
            "#[derive(Cascade)] requires a struct with named fields",
        ));
    };

    let mut infos = Vec::new();
    let mut arms = Vec::new();

    for field in &fields.named {
        let opts = CascadeFieldOpts::parse(field)?;
        if opts.skip {
            continue;
        }

        let ident = field.ident.as_ref().unwrap();
        let name = ident.unraw().to_string();
        let index = infos.len();

        let tags: Vec<_> = TAG_NAMES
            .iter()
            .map(|t| {
                let ident = quote::format_ident!("{}", t);
                let value = optional_str(opts.tag(t));
                quote! { #ident: #value }
            })
            .collect();

        infos.push(quote! {
            ::cascade::FieldInfo {
                name: #name,
                tags: ::cascade::Tags { #(#tags,)* },
            }
        });

        arms.push(quote! {
            #index => ::std::option::Option::Some(::cascade::Field::as_field_mut(&mut self.#ident)),
        });
    }

    let item_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::cascade::Cascade for #item_name #ty_generics #where_clause {
            fn fields(&self) -> &'static [::cascade::FieldInfo] {
                const FIELDS: &[::cascade::FieldInfo] = &[#(#infos,)*];
                FIELDS
            }

            #[allow(clippy::match_single_binding)]
            fn field_mut(&mut self, index: usize) -> ::std::option::Option<::cascade::FieldMut<'_>> {
                match index {
                    #(#arms)*
                    _ => ::std::option::Option::None,
                }
            }
        }

        impl #impl_generics ::cascade::Field for #item_name #ty_generics #where_clause {
            fn as_field_mut(&mut self) -> ::cascade::FieldMut<'_> {
                ::cascade::FieldMut::Nested(self)
            }
        }
    })
}

/////////////////////////////////////////////////////////////////////////////////////////

fn optional_str(value: Option<&str>) -> TokenStream {
    match value {
        Some(v) => quote! { ::std::option::Option::Some(#v) },
        None => quote! { ::std::option::Option::None },
    }
}

/////////////////////////////////////////////////////////////////////////////////////////
