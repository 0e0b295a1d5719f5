//! `#[derive(Ssz)]` for containers.
//!
//! Fields are encoded, decoded and hashed in declaration order.
//! Fields marked with `#[ssz(skip)]` are neither encoded nor hashed and are restored with
//! [`Default`] when decoding.

use darling::FromDeriveInput as _;
use proc_macro::TokenStream;
use syn::{Error, parse_macro_input};

use crate::ssz_type::SszType;

mod crate_path;
mod ssz_field;
mod ssz_type;

#[proc_macro_derive(Ssz, attributes(ssz))]
pub fn derive(input: TokenStream) -> TokenStream {
    match SszType::from_derive_input(&parse_macro_input!(input)) {
        Ok(ssz_type) => ssz_type.impls().unwrap_or_else(Error::into_compile_error),
        Err(error) => error.write_errors(),
    }
    .into()
}
