use core::{
    fmt::Debug,
    marker::PhantomData,
    ops::{Deref, DerefMut},
};

use derivative::Derivative;
use ethereum_types::H256;
use typenum::Unsigned;

use crate::{
    error::{MerkleError, PushError, ReadError, WriteError},
    merkleization::{merkleize_chunks, mix_in_length},
    porcelain::{SszHash, SszRead, SszSize, SszWrite},
    shared::{self, chunk_limit, chunks_of},
    size::Size,
};

/// SSZ list with at most `N` elements.
#[derive(Derivative)]
#[derivative(
    Clone(bound = "T: Clone"),
    PartialEq(bound = "T: PartialEq"),
    Eq(bound = "T: Eq"),
    Default(bound = ""),
    Debug(bound = "T: Debug")
)]
pub struct ContiguousList<T, N> {
    elements: Vec<T>,
    #[derivative(Debug = "ignore")]
    phantom: PhantomData<N>,
}

impl<T, N: Unsigned> TryFrom<Vec<T>> for ContiguousList<T, N> {
    type Error = ReadError;

    fn try_from(elements: Vec<T>) -> Result<Self, Self::Error> {
        Self::validate_length(elements.len())?;

        Ok(Self {
            elements,
            phantom: PhantomData,
        })
    }
}

impl<T, N> Deref for ContiguousList<T, N> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.elements
    }
}

// Element mutation is allowed. Length changes go through `push` and `clear`.
impl<T, N> DerefMut for ContiguousList<T, N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.elements
    }
}

impl<T, N: Unsigned> ContiguousList<T, N> {
    pub fn push(&mut self, element: T) -> Result<(), PushError> {
        if self.elements.len() >= N::USIZE {
            return Err(PushError::ListFull);
        }

        self.elements.push(element);

        Ok(())
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    const fn validate_length(actual: usize) -> Result<(), ReadError> {
        let maximum = N::USIZE;

        if actual > maximum {
            return Err(ReadError::ListTooLong { maximum, actual });
        }

        Ok(())
    }
}

impl<T, N> SszSize for ContiguousList<T, N> {
    const SIZE: Size = Size::Variable { minimum_size: 0 };
}

impl<C, T: SszRead<C>, N: Unsigned> SszRead<C> for ContiguousList<T, N> {
    fn from_ssz_unchecked(context: &C, bytes: &[u8]) -> Result<Self, ReadError> {
        shared::read_list(context, bytes)?
            .collect::<Result<Vec<_>, _>>()?
            .try_into()
    }
}

impl<T: SszWrite, N> SszWrite for ContiguousList<T, N> {
    fn write_variable(&self, bytes: &mut Vec<u8>) -> Result<(), WriteError> {
        shared::write_list(bytes, self.elements.iter())
    }

    fn encoded_size(&self) -> usize {
        shared::list_encoded_size(self.elements.iter())
    }
}

impl<T: SszHash + SszWrite, N: Unsigned> SszHash for ContiguousList<T, N> {
    type PackingFactor = typenum::U1;

    fn hash_tree_root(&self) -> Result<H256, MerkleError> {
        let chunks = chunks_of(self.elements.iter())?;
        let root = merkleize_chunks(&chunks, chunk_limit::<T>(N::USIZE))?;
        Ok(mix_in_length(root, self.elements.len()))
    }
}

#[cfg(test)]
mod tests {
    use hashing::ZERO_HASHES;
    use typenum::{U1099511627776, U2, U4};

    use crate::porcelain::SszReadDefault as _;

    use super::*;

    #[test]
    fn push_past_limit_fails() -> Result<(), PushError> {
        let mut list = ContiguousList::<u64, U2>::default();

        list.push(1)?;
        list.push(2)?;

        assert!(matches!(list.push(3), Err(PushError::ListFull)));
        assert_eq!(*list, [1, 2]);

        Ok(())
    }

    #[test]
    fn decoding_too_many_elements_fails() {
        assert_eq!(
            ContiguousList::<u64, U2>::from_ssz_default([0; 24]),
            Err(ReadError::ListTooLong {
                maximum: 2,
                actual: 3,
            }),
        );
    }

    #[test]
    fn empty_registry_root_mixes_zero_length_into_deepest_zero_hash() -> Result<(), MerkleError> {
        let list = ContiguousList::<H256, U1099511627776>::default();

        assert_eq!(
            list.hash_tree_root()?,
            mix_in_length(ZERO_HASHES[40], 0),
        );

        Ok(())
    }

    #[test]
    fn list_of_lists_uses_offsets() -> Result<(), ReadError> {
        let mut outer = ContiguousList::<ContiguousList<u64, U4>, U2>::default();
        outer
            .push(ContiguousList::try_from(vec![7])?)
            .expect("outer list has room");
        outer
            .push(ContiguousList::default())
            .expect("outer list has room");

        let bytes = outer.to_ssz().expect("offsets fit in 4 bytes");

        assert_eq!(outer.encoded_size(), bytes.len());
        assert_eq!(&bytes[..8], &[8, 0, 0, 0, 16, 0, 0, 0]);
        assert_eq!(
            ContiguousList::<ContiguousList<u64, U4>, U2>::from_ssz_default(&bytes)?,
            outer,
        );

        Ok(())
    }
}
