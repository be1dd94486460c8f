use proc_macro::TokenStream as StdTokenStream;
use syn::DeriveInput;

mod args;
mod describe_impl;

/// Derives `Describe` for a struct or fieldless enum, and `Record` for structs.
///
/// See the docs on the `row_schema` crate.
#[proc_macro_derive(Describe, attributes(record))]
pub fn derive_describe(input: StdTokenStream) -> StdTokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    describe_impl::entry_point(input)
        .unwrap_or_else(|e| e.write_errors())
        .into()
}
