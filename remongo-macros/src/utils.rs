use crate::prelude::*;
use proc_macro_crate::{FoundCrate, crate_name};

macro_rules! extract {
    ($val:expr, $pat:pat, $error_message: expr) => {
        let $pat = $val else {
            return Err(Error::new_spanned($val, $error_message));
        };
    };
}

/// Models and filters are serialized as documents, so only structs with named fields qualify.
pub fn extract_named_fields(span: Span, data: Data) -> Result<FieldsNamed> {
    let Data::Struct(data_struct) = data else {
        return Err(Error::new(span, "expected struct"));
    };

    extract!(
        data_struct.fields,
        Fields::Named(named_fields),
        "expected named fields"
    );

    Ok(named_fields)
}

pub fn krate() -> Result<TokenStream> {
    let found = crate_name("remongo").map_err(|err| Error::new(Span::call_site(), err))?;

    Ok(match found {
        FoundCrate::Itself => quote! { crate },
        FoundCrate::Name(name) => {
            let ident = Ident::new(&name, Span::call_site());
            quote! { ::#ident }
        }
    })
}

pub fn mongodb() -> Result<TokenStream> {
    let krate = krate()?;

    Ok(quote! { #krate::mongodb })
}
