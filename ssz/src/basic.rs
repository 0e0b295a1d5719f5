use byteorder::ByteOrder as _;
use ethereum_types::{H160, H256, H32, U256};
use typenum::{U1, U32, U4, U8};

use crate::{
    consts::Endianness,
    error::{MerkleError, ReadError},
    porcelain::{SszHash, SszRead, SszSize, SszWrite},
    primitives::{bool_root, short_bytes_root, uint64_root},
    size::Size,
};

impl SszSize for bool {
    const SIZE: Size = Size::Fixed {
        size: size_of::<Self>(),
    };
}

impl<C> SszRead<C> for bool {
    #[inline]
    fn from_ssz_unchecked(_context: &C, bytes: &[u8]) -> Result<Self, ReadError> {
        match bytes[0] {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(ReadError::BooleanInvalid { value }),
        }
    }
}

impl SszWrite for bool {
    #[inline]
    fn write_fixed(&self, bytes: &mut [u8]) {
        bytes[0] = (*self).into();
    }
}

impl SszHash for bool {
    type PackingFactor = U32;

    #[inline]
    fn hash_tree_root(&self) -> Result<H256, MerkleError> {
        Ok(bool_root(*self))
    }
}

impl SszSize for u8 {
    const SIZE: Size = Size::Fixed {
        size: size_of::<Self>(),
    };
}

impl<C> SszRead<C> for u8 {
    #[inline]
    fn from_ssz_unchecked(_context: &C, bytes: &[u8]) -> Result<Self, ReadError> {
        Ok(bytes[0])
    }
}

impl SszWrite for u8 {
    #[inline]
    fn write_fixed(&self, bytes: &mut [u8]) {
        bytes[0] = *self;
    }
}

impl SszHash for u8 {
    type PackingFactor = U32;

    #[inline]
    fn hash_tree_root(&self) -> Result<H256, MerkleError> {
        Ok(short_bytes_root(&[*self]))
    }
}

// Only used for offsets.
impl SszSize for u32 {
    const SIZE: Size = Size::Fixed {
        size: size_of::<Self>(),
    };
}

impl<C> SszRead<C> for u32 {
    #[inline]
    fn from_ssz_unchecked(_context: &C, bytes: &[u8]) -> Result<Self, ReadError> {
        Ok(Endianness::read_u32(bytes))
    }
}

impl SszWrite for u32 {
    #[inline]
    fn write_fixed(&self, bytes: &mut [u8]) {
        Endianness::write_u32(bytes, *self);
    }
}

impl SszHash for u32 {
    type PackingFactor = U8;

    #[inline]
    fn hash_tree_root(&self) -> Result<H256, MerkleError> {
        Ok(short_bytes_root(&self.to_le_bytes()))
    }
}

impl SszSize for u64 {
    const SIZE: Size = Size::Fixed {
        size: size_of::<Self>(),
    };
}

impl<C> SszRead<C> for u64 {
    #[inline]
    fn from_ssz_unchecked(_context: &C, bytes: &[u8]) -> Result<Self, ReadError> {
        Ok(Endianness::read_u64(bytes))
    }
}

impl SszWrite for u64 {
    #[inline]
    fn write_fixed(&self, bytes: &mut [u8]) {
        Endianness::write_u64(bytes, *self);
    }
}

impl SszHash for u64 {
    type PackingFactor = U4;

    #[inline]
    fn hash_tree_root(&self) -> Result<H256, MerkleError> {
        Ok(uint64_root(*self))
    }
}

// `Uint256` in consensus types. Stored little-endian like every other integer.
impl SszSize for U256 {
    const SIZE: Size = Size::Fixed { size: 32 };
}

impl<C> SszRead<C> for U256 {
    #[inline]
    fn from_ssz_unchecked(_context: &C, bytes: &[u8]) -> Result<Self, ReadError> {
        Ok(Self::from_little_endian(&bytes[..32]))
    }
}

impl SszWrite for U256 {
    #[inline]
    fn write_fixed(&self, bytes: &mut [u8]) {
        self.to_little_endian(&mut bytes[..32]);
    }
}

impl SszHash for U256 {
    type PackingFactor = U1;

    #[inline]
    fn hash_tree_root(&self) -> Result<H256, MerkleError> {
        let mut root = H256::zero();
        self.write_fixed(root.as_bytes_mut());
        Ok(root)
    }
}

macro_rules! impl_for_short_hash {
    ($hash: ty) => {
        impl SszSize for $hash {
            const SIZE: Size = Size::Fixed {
                size: <$hash>::len_bytes(),
            };
        }

        impl<C> SszRead<C> for $hash {
            #[inline]
            fn from_ssz_unchecked(_context: &C, bytes: &[u8]) -> Result<Self, ReadError> {
                Ok(Self::from_slice(&bytes[..Self::len_bytes()]))
            }
        }

        impl SszWrite for $hash {
            #[inline]
            fn write_fixed(&self, bytes: &mut [u8]) {
                bytes[..Self::len_bytes()].copy_from_slice(self.as_bytes());
            }
        }

        impl SszHash for $hash {
            type PackingFactor = U1;

            #[inline]
            fn hash_tree_root(&self) -> Result<H256, MerkleError> {
                Ok(short_bytes_root(self.as_bytes()))
            }
        }
    };
}

impl_for_short_hash!(H32);
impl_for_short_hash!(H160);
impl_for_short_hash!(H256);
