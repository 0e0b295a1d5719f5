use core::marker::PhantomData;

use bitvec::{order::Lsb0, vec::BitVec};
use derivative::Derivative;
use ethereum_types::H256;
use typenum::Unsigned;

use crate::{
    consts::{BITS_PER_BYTE, BITS_PER_CHUNK, BYTES_PER_CHUNK},
    error::{IndexError, MerkleError, ReadError, WriteError},
    merkleization::{merkleize_chunks, mix_in_length},
    porcelain::{SszHash, SszRead, SszSize, SszWrite},
    size::Size,
};

/// SSZ bit list with at most `N` bits.
#[derive(Derivative)]
#[derivative(
    Clone(bound = ""),
    PartialEq(bound = ""),
    Eq(bound = ""),
    Default(bound = ""),
    Debug(bound = "")
)]
pub struct BitList<N> {
    bits: BitVec<u8, Lsb0>,
    #[derivative(Debug = "ignore")]
    phantom: PhantomData<N>,
}

impl<N: Unsigned> BitList<N> {
    /// Creates a list of `length` unset bits. Returns `None` if `length` exceeds `N`.
    #[must_use]
    pub fn with_length(length: usize) -> Option<Self> {
        (length <= N::USIZE).then(|| Self {
            bits: BitVec::repeat(false, length),
            phantom: PhantomData,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).map(|bit| *bit)
    }

    /// Sets the bit at `index`. The list does not grow, so `index` must be less than its length.
    pub fn set(&mut self, index: usize, value: bool) -> Result<(), IndexError> {
        let length = self.len();

        let mut bit = self
            .bits
            .get_mut(index)
            .ok_or(IndexError::OutOfBounds { length, index })?;

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

    fn packed_bits(&self) -> Vec<u8> {
        let mut bytes = vec![0; self.len().div_ceil(BITS_PER_BYTE)];

        for (index, bit) in self.iter().enumerate() {
            if bit {
                bytes[index / BITS_PER_BYTE] |= 1 << (index % BITS_PER_BYTE);
            }
        }

        bytes
    }
}

impl<N> SszSize for BitList<N> {
    // The delimiting bit needs a byte even in an empty list.
    const SIZE: Size = Size::Variable { minimum_size: 1 };
}

impl<C, N: Unsigned> SszRead<C> for BitList<N> {
    fn from_ssz_unchecked(_context: &C, bytes: &[u8]) -> Result<Self, ReadError> {
        let Some(last_byte) = bytes.last().copied() else {
            return Err(ReadError::BitListEmptySlice);
        };

        if last_byte == 0 {
            return Err(ReadError::BitListNoDelimitingBit);
        }

        let delimiter_position = last_byte.ilog2() as usize;
        let length = (bytes.len() - 1) * BITS_PER_BYTE + delimiter_position;
        let maximum = N::USIZE;

        if length > maximum {
            return Err(ReadError::BitListTooLong {
                maximum,
                actual: length,
            });
        }

        let mut bits = BitVec::from_slice(bytes);
        bits.truncate(length);

        Ok(Self {
            bits,
            phantom: PhantomData,
        })
    }
}

impl<N: Unsigned> SszWrite for BitList<N> {
    fn write_variable(&self, bytes: &mut Vec<u8>) -> Result<(), WriteError> {
        let length = self.len();
        let start = bytes.len();

        bytes.extend(self.packed_bits());
        bytes.resize(start + length / BITS_PER_BYTE + 1, 0);
        bytes[start + length / BITS_PER_BYTE] |= 1 << (length % BITS_PER_BYTE);

        Ok(())
    }

    fn encoded_size(&self) -> usize {
        self.len() / BITS_PER_BYTE + 1
    }
}

impl<N: Unsigned> SszHash for BitList<N> {
    type PackingFactor = typenum::U1;

    fn hash_tree_root(&self) -> Result<H256, MerkleError> {
        let mut bytes = self.packed_bits();
        bytes.resize(bytes.len().next_multiple_of(BYTES_PER_CHUNK), 0);

        let chunks = bytes
            .chunks_exact(BYTES_PER_CHUNK)
            .map(H256::from_slice)
            .collect::<Vec<_>>();

        let limit = N::USIZE.div_ceil(BITS_PER_CHUNK);
        let root = merkleize_chunks(&chunks, limit)?;

        Ok(mix_in_length(root, self.len()))
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;
    use typenum::{U2048, U8};

    use crate::porcelain::SszReadDefault as _;

    use super::*;

    #[test_case(0, &[0b0000_0001])]
    #[test_case(3, &[0b0000_1000])]
    #[test_case(8, &[0b0000_0000, 0b0000_0001])]
    fn delimiting_bit_follows_data(length: usize, expected: &[u8]) {
        let bits = BitList::<U8>::with_length(length).expect("length is within limit");
        assert_eq!(bits.to_ssz(), Ok(expected.to_vec()));
        assert_eq!(bits.encoded_size(), expected.len());
    }

    #[test]
    fn set_bits_survive_decoding() -> Result<(), ReadError> {
        let mut bits = BitList::<U2048>::with_length(10).expect("length is within limit");
        bits.set(1, true).expect("index is within length");
        bits.set(9, true).expect("index is within length");

        let bytes = bits.to_ssz().expect("bit lists have no offsets");
        let decoded = BitList::<U2048>::from_ssz_default(bytes)?;

        assert_eq!(decoded.len(), 10);
        assert_eq!(decoded.count_ones(), 2);
        assert_eq!(decoded.get(9), Some(true));
        assert_eq!(decoded.get(10), None);

        Ok(())
    }

    #[test]
    fn setting_past_the_length_fails_even_below_the_limit() {
        let mut bits = BitList::<U8>::with_length(3).expect("length is within limit");

        assert!(matches!(
            bits.set(3, true),
            Err(IndexError::OutOfBounds {
                length: 3,
                index: 3,
            }),
        ));
        assert!(matches!(bits.set(2, true), Ok(())));
        assert_eq!(bits.len(), 3);
        assert_eq!(bits.count_ones(), 1);
    }

    #[test]
    fn missing_delimiter_is_rejected() {
        assert_eq!(
            BitList::<U8>::from_ssz_default([1, 0]),
            Err(ReadError::BitListNoDelimitingBit),
        );
    }

    #[test]
    fn overlong_list_is_rejected() {
        assert_eq!(
            BitList::<U8>::from_ssz_default([0xff, 0b10]),
            Err(ReadError::BitListTooLong {
                maximum: 8,
                actual: 9,
            }),
        );
    }
}
