pub(crate) use crate::utils::krate;
pub use darling::FromAttributes;
pub use heck::ToSnakeCase;
pub use proc_macro2::{Span, TokenStream};
pub use quote::quote;
pub use syn::{
    Data, DeriveInput, Error, Fields, FieldsNamed, Generics, Ident, LitStr, Result, parse2,
    spanned::Spanned,
};
