#![warn(clippy::pedantic)]

mod derive_filter;
mod derive_model;
mod prelude;
mod utils;

fn expand<F: FnOnce(proc_macro2::TokenStream) -> syn::Result<proc_macro2::TokenStream>>(
    fun: F,
    input: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    fun(input.into())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

#[proc_macro_derive(Model, attributes(model))]
pub fn model(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    expand(derive_model::derive_model, input)
}

#[proc_macro_derive(Filter)]
pub fn filter(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    expand(derive_filter::derive_filter, input)
}
