use crate::prelude::*;
use crate::utils::extract_named_fields;

#[derive(FromAttributes)]
#[darling(attributes(model))]
struct Attributes {
    #[darling(default)]
    collection: Option<String>,
}

pub fn derive_model(item: TokenStream) -> Result<TokenStream> {
    let input = parse2::<DeriveInput>(item)?;

    let attributes = Attributes::from_attributes(&input.attrs)?;

    extract_named_fields(input.span(), input.data)?;

    let collection_name = match attributes.collection {
        Some(collection) if collection.is_empty() => {
            return Err(Error::new(
                input.ident.span(),
                "collection name must not be empty",
            ));
        }
        Some(collection) => collection,
        None => default_collection_name(&input.ident),
    };

    build(&input.ident, &input.generics, &collection_name)
}

/// `UserProfile` maps to `user_profile`, `AuditLogModel` maps to `audit_log`.
fn default_collection_name(ident: &Ident) -> String {
    let snake_case = ident.to_string().to_snake_case();

    snake_case
        .strip_suffix("_model")
        .unwrap_or(&snake_case)
        .to_owned()
}

fn build(ident: &Ident, generics: &Generics, collection_name: &str) -> Result<TokenStream> {
    let krate = krate()?;

    let collection_name = LitStr::new(collection_name, Span::call_site());

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #krate::Model for #ident #ty_generics #where_clause {
            fn collection(&self) -> &str {
                #collection_name
            }
        }
    })
}
