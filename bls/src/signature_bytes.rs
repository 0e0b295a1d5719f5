use fixed_hash::construct_fixed_hash;
use impl_serde::impl_fixed_hash_serde;
use ssz::{MerkleError, ReadError, Size, SszHash, SszRead, SszSize, SszWrite, H256};

pub const SIGNATURE_SIZE: usize = ssz::SIGNATURE_SIZE;

construct_fixed_hash! {
    /// Compressed BLS signature. Verification happens outside this crate.
    #[derive(derive_more::AsRef)]
    pub struct SignatureBytes(SIGNATURE_SIZE);
}

impl_fixed_hash_serde!(SignatureBytes, SIGNATURE_SIZE);

impl SszSize for SignatureBytes {
    const SIZE: Size = Size::Fixed {
        size: SIGNATURE_SIZE,
    };
}

impl<C> SszRead<C> for SignatureBytes {
    #[inline]
    fn from_ssz_unchecked(_context: &C, bytes: &[u8]) -> Result<Self, ReadError> {
        Ok(Self::from_slice(&bytes[..SIGNATURE_SIZE]))
    }
}

impl SszWrite for SignatureBytes {
    #[inline]
    fn write_fixed(&self, bytes: &mut [u8]) {
        bytes[..SIGNATURE_SIZE].copy_from_slice(self.as_bytes());
    }
}

impl SszHash for SignatureBytes {
    type PackingFactor = typenum::U1;

    #[inline]
    fn hash_tree_root(&self) -> Result<H256, MerkleError> {
        ssz::signature_root(&self.0)
    }
}

impl SignatureBytes {
    /// The point at infinity in compressed form.
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        let mut bytes = Self::zero();
        bytes.as_mut()[0] = 0xc0;
        bytes
    }

    #[inline]
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Self::empty()
    }
}
