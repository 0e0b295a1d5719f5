use core::marker::PhantomData;

use bitvec::{order::Lsb0, vec::BitVec};
use derivative::Derivative;
use ethereum_types::H256;
use typenum::Unsigned;

use crate::{
    consts::{BITS_PER_BYTE, BITS_PER_CHUNK, BYTES_PER_CHUNK},
    error::{IndexError, MerkleError, ReadError},
    merkleization::merkleize_chunks,
    porcelain::{SszHash, SszRead, SszSize, SszWrite},
    size::Size,
};

/// SSZ bit vector of exactly `N` bits.
#[derive(Derivative)]
#[derivative(Clone(bound = ""), PartialEq(bound = ""), Eq(bound = ""), Debug(bound = ""))]
pub struct BitVector<N> {
    bits: BitVec<u8, Lsb0>,
    #[derivative(Debug = "ignore")]
    phantom: PhantomData<N>,
}

impl<N: Unsigned> Default for BitVector<N> {
    fn default() -> Self {
        Self {
            bits: BitVec::repeat(false, N::USIZE),
            phantom: PhantomData,
        }
    }
}

impl<N: Unsigned> BitVector<N> {
    #[must_use]
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).map(|bit| *bit)
    }

    pub fn set(&mut self, index: usize, value: bool) -> Result<(), IndexError> {
        let mut bit = self.bits.get_mut(index).ok_or(IndexError::OutOfBounds {
            length: N::USIZE,
            index,
        })?;

        *bit = value;

        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().by_vals()
    }

    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// Shifts every bit up by `count` positions, dropping the highest ones.
    pub fn shift_up(&mut self, count: usize) {
        self.bits.shift_right(count.min(N::USIZE));
    }

    fn packed_bits(&self) -> Vec<u8> {
        let mut bytes = vec![0; Self::byte_count()];

        for (index, bit) in self.iter().enumerate() {
            if bit {
                bytes[index / BITS_PER_BYTE] |= 1 << (index % BITS_PER_BYTE);
            }
        }

        bytes
    }

    const fn byte_count() -> usize {
        N::USIZE.div_ceil(BITS_PER_BYTE)
    }
}

impl<N: Unsigned> SszSize for BitVector<N> {
    const SIZE: Size = Size::Fixed {
        size: Self::byte_count(),
    };
}

impl<C, N: Unsigned> SszRead<C> for BitVector<N> {
    fn from_ssz_unchecked(_context: &C, bytes: &[u8]) -> Result<Self, ReadError> {
        let bytes = &bytes[..Self::byte_count()];
        let length = N::USIZE;

        let mut bits = BitVec::<u8, Lsb0>::from_slice(bytes);

        if bits[length..].any() {
            return Err(ReadError::BitVectorExcessBits { length });
        }

        bits.truncate(length);

        Ok(Self {
            bits,
            phantom: PhantomData,
        })
    }
}

impl<N: Unsigned> SszWrite for BitVector<N> {
    fn write_fixed(&self, bytes: &mut [u8]) {
        bytes.copy_from_slice(&self.packed_bits());
    }
}

impl<N: Unsigned> SszHash for BitVector<N> {
    type PackingFactor = typenum::U1;

    fn hash_tree_root(&self) -> Result<H256, MerkleError> {
        let mut bytes = self.packed_bits();
        bytes.resize(bytes.len().next_multiple_of(BYTES_PER_CHUNK), 0);

        let chunks = bytes
            .chunks_exact(BYTES_PER_CHUNK)
            .map(H256::from_slice)
            .collect::<Vec<_>>();

        merkleize_chunks(&chunks, N::USIZE.div_ceil(BITS_PER_CHUNK))
    }
}
