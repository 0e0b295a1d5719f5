use core::{
    fmt::Debug,
    marker::PhantomData,
    ops::{Deref, DerefMut},
};

use derivative::Derivative;
use ethereum_types::H256;
use typenum::{NonZero, Unsigned};

use crate::{
    consts::BYTES_PER_LENGTH_OFFSET,
    error::{IndexError, MerkleError, ReadError, WriteError},
    merkleization::merkleize_chunks,
    porcelain::{SszHash, SszRead, SszSize, SszWrite},
    shared::{self, chunk_limit, chunks_of},
    size::Size,
};

/// Fixed-length SSZ vector stored in a single heap allocation.
#[derive(Derivative)]
#[derivative(
    Clone(bound = "T: Clone"),
    PartialEq(bound = "T: PartialEq"),
    Eq(bound = "T: Eq"),
    Debug(bound = "T: Debug")
)]
pub struct ContiguousVector<T, N> {
    elements: Box<[T]>,
    #[derivative(Debug = "ignore")]
    phantom: PhantomData<N>,
}

impl<T: Default, N: Unsigned + NonZero> Default for ContiguousVector<T, N> {
    fn default() -> Self {
        Self {
            elements: core::iter::repeat_with(T::default).take(N::USIZE).collect(),
            phantom: PhantomData,
        }
    }
}

impl<T, N: Unsigned + NonZero> TryFrom<Vec<T>> for ContiguousVector<T, N> {
    type Error = ReadError;

    fn try_from(elements: Vec<T>) -> Result<Self, Self::Error> {
        if elements.len() != N::USIZE {
            return Err(ReadError::VectorSizeMismatch {
                expected: N::USIZE,
                actual: elements.len(),
            });
        }

        Ok(Self {
            elements: elements.into_boxed_slice(),
            phantom: PhantomData,
        })
    }
}

impl<T, N> Deref for ContiguousVector<T, N> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.elements
    }
}

impl<T, N> DerefMut for ContiguousVector<T, N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.elements
    }
}

impl<T, N: Unsigned + NonZero> ContiguousVector<T, N> {
    pub fn get(&self, index: u64) -> Result<&T, IndexError> {
        let index = shared::validate_index(self.elements.len(), index)?;
        Ok(&self.elements[index])
    }

    /// Indexes the vector as a ring buffer.
    #[must_use]
    pub fn mod_index(&self, index: u64) -> &T {
        &self.elements[Self::ring_position(index)]
    }

    pub fn mod_index_mut(&mut self, index: u64) -> &mut T {
        &mut self.elements[Self::ring_position(index)]
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "the remainder is less than N, which fits in usize"
    )]
    const fn ring_position(index: u64) -> usize {
        (index % N::U64) as usize
    }
}

impl<T: SszSize, N: Unsigned> SszSize for ContiguousVector<T, N> {
    const SIZE: Size = match T::SIZE {
        Size::Fixed { size } => Size::Fixed {
            size: size * N::USIZE,
        },
        Size::Variable { minimum_size } => Size::Variable {
            minimum_size: (BYTES_PER_LENGTH_OFFSET + minimum_size) * N::USIZE,
        },
    };
}

impl<C, T: SszRead<C>, N: Unsigned + NonZero> SszRead<C> for ContiguousVector<T, N> {
    fn from_ssz_unchecked(context: &C, bytes: &[u8]) -> Result<Self, ReadError> {
        shared::read_list(context, bytes)?
            .collect::<Result<Vec<_>, _>>()?
            .try_into()
    }
}

impl<T: SszWrite, N: Unsigned> SszWrite for ContiguousVector<T, N> {
    fn write_fixed(&self, bytes: &mut [u8]) {
        let size = T::SIZE.fixed_part();

        for (element, subslice) in self.elements.iter().zip(bytes.chunks_exact_mut(size)) {
            element.write_fixed(subslice);
        }
    }

    fn write_variable(&self, bytes: &mut Vec<u8>) -> Result<(), WriteError> {
        shared::write_list(bytes, self.elements.iter())
    }

    fn encoded_size(&self) -> usize {
        shared::list_encoded_size(self.elements.iter())
    }
}

impl<T: SszHash + SszWrite, N: Unsigned> SszHash for ContiguousVector<T, N> {
    type PackingFactor = typenum::U1;

    fn hash_tree_root(&self) -> Result<H256, MerkleError> {
        let chunks = chunks_of(self.elements.iter())?;
        merkleize_chunks(&chunks, chunk_limit::<T>(N::USIZE))
    }
}

#[cfg(test)]
mod tests {
    use typenum::{U4, U8};

    use crate::porcelain::SszReadDefault as _;

    use super::*;

    #[test]
    fn ring_buffer_indexing_wraps_around() {
        let mut vector = ContiguousVector::<u64, U4>::default();

        *vector.mod_index_mut(6) = 42;

        assert_eq!(vector[2], 42);
        assert_eq!(*vector.mod_index(10), 42);
    }

    #[test]
    fn out_of_bounds_get_is_an_error() {
        let vector = ContiguousVector::<u64, U4>::default();
        assert!(matches!(vector.get(4), Err(IndexError::OutOfBounds { .. })));
    }

    #[test]
    fn vector_of_wrong_length_is_rejected() {
        assert_eq!(
            ContiguousVector::<u64, U4>::from_ssz_default([0; 24]),
            Err(ReadError::BufferTooShort {
                expected: 32,
                actual: 24,
            }),
        );
    }

    #[test]
    fn u64s_are_packed_four_to_a_chunk() -> Result<(), MerkleError> {
        let vector = ContiguousVector::<u64, U8>::try_from((1..=8).collect::<Vec<_>>())
            .expect("length matches");

        let mut first = H256::zero();
        let mut second = H256::zero();

        for (index, value) in (1..=4_u64).enumerate() {
            first[index * 8..index * 8 + 8].copy_from_slice(&value.to_le_bytes());
        }

        for (index, value) in (5..=8_u64).enumerate() {
            second[index * 8..index * 8 + 8].copy_from_slice(&value.to_le_bytes());
        }

        assert_eq!(
            vector.hash_tree_root()?,
            hashing::hash_256_256(first, second),
        );

        Ok(())
    }

    #[test]
    fn vector_of_roots_hashes_each_element_as_a_chunk() -> Result<(), MerkleError> {
        let vector = ContiguousVector::<H256, U4>::default();
        assert_eq!(vector.hash_tree_root()?, hashing::ZERO_HASHES[2]);
        Ok(())
    }
}
