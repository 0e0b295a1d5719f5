use darling::{ast::Data, FromDeriveInput};
use itertools::Itertools as _;
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{parse_quote, Error, FieldValue, Generics, Ident, Index, Member, Path};

use crate::{crate_path, ssz_field::SszField};

#[derive(FromDeriveInput)]
// Shapes are checked in `SszType::fields` to report errors that mention SSZ.
#[darling(attributes(ssz))]
pub struct SszType {
    ident: Ident,
    generics: Generics,
    data: Data<(), SszField>,
}

impl SszType {
    pub fn impls(&self) -> Result<TokenStream, Error> {
        let ssz = crate_path::ssz_path()?;
        let ident = &self.ident;
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();
        let read_generics = self.read_generics();
        let (read_impl_generics, _, read_where_clause) = read_generics.split_for_impl();

        let encoded = self.encoded_fields()?;
        let members = encoded.iter().map(|(member, _)| member).collect_vec();
        let sizes = encoded
            .iter()
            .map(|(_, ssz_field)| ssz_field.size_expr(&ssz))
            .collect_vec();

        let initializers = self.initializers(&ssz)?;

        Ok(quote! {
            impl #impl_generics #ssz::SszSize for #ident #ty_generics #where_clause {
                const SIZE: #ssz::Size = #ssz::Size::for_container(&[#(#sizes,)*]);
            }

            impl #read_impl_generics #ssz::SszRead<C> for #ident #ty_generics #read_where_clause {
                fn from_ssz_unchecked(
                    context: &C,
                    bytes: &[u8],
                ) -> ::core::result::Result<Self, #ssz::ReadError> {
                    let fields = #ssz::container_fields(bytes, &[#(#sizes,)*])?;
                    ::core::result::Result::Ok(Self { #(#initializers,)* })
                }
            }

            impl #impl_generics #ssz::SszWrite for #ident #ty_generics #where_clause {
                fn write_fixed(&self, bytes: &mut [u8]) {
                    let mut writer = #ssz::FixedFieldWriter::new(bytes);
                    #(writer.field(&self.#members);)*
                }

                fn write_variable(
                    &self,
                    bytes: &mut ::std::vec::Vec<u8>,
                ) -> ::core::result::Result<(), #ssz::WriteError> {
                    let fixed_part = 0 #(+ #sizes.fixed_part())*;
                    let mut writer = #ssz::ContainerWriter::new(bytes, fixed_part);
                    #(writer.field(&self.#members)?;)*
                    ::core::result::Result::Ok(())
                }

                fn encoded_size(&self) -> usize {
                    0 #(+ #ssz::field_encoded_size(&self.#members))*
                }
            }

            impl #impl_generics #ssz::SszHash for #ident #ty_generics #where_clause {
                type PackingFactor = #ssz::U1;

                fn hash_tree_root(
                    &self,
                ) -> ::core::result::Result<#ssz::H256, #ssz::MerkleError> {
                    #ssz::merkleize_padded(&[
                        #(#ssz::SszHash::hash_tree_root(&self.#members)?,)*
                    ])
                }
            }
        })
    }

    // `SszRead` is implemented for every context type `C`.
    // `C` is unhygienic because type parameters cannot have definition site hygiene.
    fn read_generics(&self) -> Generics {
        let mut generics = self.generics.clone();
        generics.params.insert(0, parse_quote! { C });
        generics
    }

    // Encoded fields are read from the subslice at their position among encoded fields.
    // Skipped fields are filled in with their default values.
    fn initializers(&self, ssz: &Path) -> Result<Vec<FieldValue>, Error> {
        let mut position = 0_usize;

        self.fields()?
            .map(|(member, ssz_field)| {
                if ssz_field.skip {
                    let ty = &ssz_field.ty;
                    return Ok(parse_quote! {
                        #member: <#ty as ::core::default::Default>::default()
                    });
                }

                let index = Index::from(position);
                position += 1;

                Ok(parse_quote! {
                    #member: #ssz::SszRead::from_ssz(context, fields[#index])?
                })
            })
            .collect()
    }

    fn encoded_fields(&self) -> Result<Vec<(Member, &SszField)>, Error> {
        let encoded = self
            .fields()?
            .filter(|(_, ssz_field)| !ssz_field.skip)
            .collect_vec();

        if encoded.is_empty() {
            return Err(Error::new(
                Span::call_site(),
                "every field of the struct is skipped",
            ));
        }

        Ok(encoded)
    }

    fn fields(&self) -> Result<impl Iterator<Item = (Member, &SszField)>, Error> {
        let fields = match &self.data {
            Data::Enum(_) => {
                return Err(Error::new(
                    Span::call_site(),
                    "SSZ unions are not supported",
                ))
            }
            Data::Struct(fields) if fields.is_empty() => {
                return Err(Error::new(
                    Span::call_site(),
                    "SSZ containers must have at least one field",
                ))
            }
            Data::Struct(fields) => fields,
        };

        Ok(fields.iter().enumerate().map(|(position, ssz_field)| {
            let member = ssz_field
                .ident
                .clone()
                .map_or_else(|| Member::Unnamed(position.into()), Member::Named);

            (member, ssz_field)
        }))
    }
}
