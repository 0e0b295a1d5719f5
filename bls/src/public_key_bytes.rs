use derive_more::derive::AsRef;
use fixed_hash::construct_fixed_hash;
use impl_serde::impl_fixed_hash_serde;
use ssz::{MerkleError, ReadError, Size, SszHash, SszRead, SszSize, SszWrite, H256};

pub const COMPRESSED_SIZE: usize = ssz::PUBLIC_KEY_SIZE;

construct_fixed_hash! {
    /// Compressed BLS public key exactly as it appears on the wire. Never decompressed here.
    #[derive(AsRef)]
    pub struct PublicKeyBytes(COMPRESSED_SIZE);
}

impl_fixed_hash_serde!(PublicKeyBytes, COMPRESSED_SIZE);

impl hex::FromHex for PublicKeyBytes {
    type Error = <[u8; COMPRESSED_SIZE] as hex::FromHex>::Error;

    fn from_hex<T: AsRef<[u8]>>(digits: T) -> Result<Self, Self::Error> {
        hex::FromHex::from_hex(digits).map(Self)
    }
}

impl SszSize for PublicKeyBytes {
    const SIZE: Size = Size::Fixed {
        size: COMPRESSED_SIZE,
    };
}

impl<C> SszRead<C> for PublicKeyBytes {
    #[inline]
    fn from_ssz_unchecked(_context: &C, bytes: &[u8]) -> Result<Self, ReadError> {
        Ok(Self::from_slice(&bytes[..COMPRESSED_SIZE]))
    }
}

impl SszWrite for PublicKeyBytes {
    #[inline]
    fn write_fixed(&self, bytes: &mut [u8]) {
        bytes[..COMPRESSED_SIZE].copy_from_slice(self.as_bytes());
    }
}

impl SszHash for PublicKeyBytes {
    type PackingFactor = typenum::U1;

    #[inline]
    fn hash_tree_root(&self) -> Result<H256, MerkleError> {
        ssz::public_key_root(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use hex::FromHex as _;

    use super::*;

    #[test]
    fn root_covers_all_48_bytes() -> Result<(), MerkleError> {
        let mut public_key = PublicKeyBytes::zero();
        let zero_root = public_key.hash_tree_root()?;

        public_key.as_bytes_mut()[47] = 1;

        assert_ne!(public_key.hash_tree_root()?, zero_root);

        Ok(())
    }

    #[test]
    fn parses_from_hex_without_prefix() -> Result<(), hex::FromHexError> {
        let public_key = PublicKeyBytes::from_hex("ab".repeat(COMPRESSED_SIZE))?;
        assert_eq!(public_key, PublicKeyBytes::repeat_byte(0xab));
        Ok(())
    }

    #[test]
    fn deserializes_from_prefixed_hex_string() -> Result<(), serde_yaml::Error> {
        let yaml = format!("'0x{}'", "01".repeat(COMPRESSED_SIZE));
        let public_key = serde_yaml::from_str::<PublicKeyBytes>(&yaml)?;
        assert_eq!(public_key, PublicKeyBytes::repeat_byte(1));
        Ok(())
    }
}
