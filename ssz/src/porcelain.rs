use easy_ext::ext;
use ethereum_types::H256;
use typenum::{NonZero, Unsigned};

use crate::{
    error::{MerkleError, ReadError, WriteError},
    size::Size,
};

pub trait SszSize {
    const SIZE: Size;
}

pub trait SszRead<C>: SszSize + Sized {
    /// Deserializes `bytes` without checking their length against [`SszSize::SIZE`].
    ///
    /// This may panic if `bytes` is shorter than the fixed part of `Self`.
    /// Outside of [`SszRead`] impls, use [`SszRead::from_ssz`].
    fn from_ssz_unchecked(context: &C, bytes: &[u8]) -> Result<Self, ReadError>;

    fn from_ssz(context: &C, bytes: impl AsRef<[u8]>) -> Result<Self, ReadError> {
        let bytes = bytes.as_ref();
        let actual = bytes.len();
        let expected = Self::SIZE.minimum_size();

        if actual < expected {
            return Err(ReadError::BufferTooShort { expected, actual });
        }

        if !Self::SIZE.is_variable() && actual != expected {
            return Err(ReadError::FixedSizeMismatch { expected, actual });
        }

        Self::from_ssz_unchecked(context, bytes)
    }
}

#[ext(SszReadDefault)]
pub impl<T: SszRead<()>> T {
    fn from_ssz_default(bytes: impl AsRef<[u8]>) -> Result<Self, ReadError> {
        Self::from_ssz(&(), bytes)
    }
}

pub trait SszWrite: SszSize {
    /// Writes `self` into `bytes`, which must be exactly as long as the fixed size of `Self`.
    fn write_fixed(&self, _bytes: &mut [u8]) {
        panic!("SszWrite::write_fixed must be implemented for fixed-size types");
    }

    /// Appends `self` to `bytes`.
    ///
    /// Offsets written by this method are relative to the length of `bytes` at the time of
    /// the call.
    fn write_variable(&self, _bytes: &mut Vec<u8>) -> Result<(), WriteError> {
        panic!("SszWrite::write_variable must be implemented for variable-size types");
    }

    /// Length of the encoding of `self` in bytes.
    fn encoded_size(&self) -> usize {
        match Self::SIZE {
            Size::Fixed { size } => size,
            Size::Variable { .. } => {
                panic!("SszWrite::encoded_size must be implemented for variable-size types")
            }
        }
    }

    /// Appends the encoding of `self` to `bytes`. Existing contents of `bytes` are never modified.
    fn append_ssz(&self, bytes: &mut Vec<u8>) -> Result<(), WriteError> {
        match Self::SIZE {
            Size::Fixed { size } => {
                let start = bytes.len();
                bytes.resize(start + size, 0);
                self.write_fixed(&mut bytes[start..]);
                Ok(())
            }
            Size::Variable { .. } => self.write_variable(bytes),
        }
    }

    fn to_ssz(&self) -> Result<Vec<u8>, WriteError> {
        let mut bytes = Vec::with_capacity(self.encoded_size());
        self.append_ssz(&mut bytes)?;
        Ok(bytes)
    }
}

pub trait SszHash {
    /// Number of values packed into a single chunk when stored in a vector or list.
    ///
    /// Composite types use `U1` and contribute their own root as a single chunk.
    type PackingFactor: Unsigned + NonZero;

    fn hash_tree_root(&self) -> Result<H256, MerkleError>;
}
