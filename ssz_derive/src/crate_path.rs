use proc_macro_crate::FoundCrate;
use proc_macro2::Span;
use syn::{Error, Ident, Path, parse_quote};

/// Resolves the path to the `ssz` crate, following renames in the dependent's manifest.
pub fn ssz_path() -> Result<Path, Error> {
    let call_site = Span::call_site();

    let ident = match proc_macro_crate::crate_name("ssz") {
        Ok(FoundCrate::Itself) => Ident::new("ssz", call_site),
        Ok(FoundCrate::Name(renamed)) => Ident::new(&renamed, call_site),
        Err(error) => return Err(Error::new(call_site, error)),
    };

    Ok(parse_quote! { ::#ident })
}
