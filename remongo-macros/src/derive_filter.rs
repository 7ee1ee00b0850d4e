use crate::prelude::*;
use crate::utils::{extract_named_fields, mongodb};

pub fn derive_filter(item: TokenStream) -> Result<TokenStream> {
    let input = parse2::<DeriveInput>(item)?;

    extract_named_fields(input.span(), input.data)?;

    build(&input.ident, &input.generics)
}

fn build(ident: &Ident, generics: &Generics) -> Result<TokenStream> {
    let krate = krate()?;
    let mongodb = mongodb()?;

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #krate::Filter for #ident #ty_generics #where_clause {
            fn to_document(&self) -> #krate::Result<#mongodb::bson::Document> {
                #krate::filter::normalize(self)
            }
        }
    })
}
