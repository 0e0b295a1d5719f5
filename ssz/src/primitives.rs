//! Roots of scalar and fixed-width byte values.

use ethereum_types::H256;

use crate::{
    consts::{BYTES_PER_CHUNK, Endianness},
    error::MerkleError,
    merkleization::merkle_root,
};

pub const PUBLIC_KEY_SIZE: usize = 48;
pub const SIGNATURE_SIZE: usize = 96;

// `H256::from_low_u64_le` would place the value in the last 8 bytes.
#[must_use]
pub fn uint64_root(value: u64) -> H256 {
    use byteorder::ByteOrder as _;

    let mut root = H256::zero();
    Endianness::write_u64(&mut root.0[..size_of::<u64>()], value);
    root
}

#[must_use]
pub fn bool_root(value: bool) -> H256 {
    let mut root = H256::zero();
    root.0[0] = value.into();
    root
}

/// Root of a byte string that fits in one chunk, zero-padded on the right.
#[must_use]
pub fn short_bytes_root(bytes: &[u8]) -> H256 {
    assert!(bytes.len() <= BYTES_PER_CHUNK);

    let mut root = H256::zero();
    root.0[..bytes.len()].copy_from_slice(bytes);
    root
}

/// Root of a 96-byte signature: 3 chunks padded to 4.
pub fn signature_root(signature: &[u8; SIGNATURE_SIZE]) -> Result<H256, MerkleError> {
    let mut leaves = [0; 4 * BYTES_PER_CHUNK];
    leaves[..SIGNATURE_SIZE].copy_from_slice(signature);
    merkle_root(&leaves)
}

/// Root of a 48-byte public key: the key followed by 16 zero bytes, reduced as 2 chunks.
pub fn public_key_root(public_key: &[u8; PUBLIC_KEY_SIZE]) -> Result<H256, MerkleError> {
    let mut leaves = [0; 2 * BYTES_PER_CHUNK];
    leaves[..PUBLIC_KEY_SIZE].copy_from_slice(public_key);
    merkle_root(&leaves)
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn uint64_root_is_little_endian_and_left_aligned() {
        assert_eq!(
            uint64_root(0x0102),
            H256(hex!(
                "0201000000000000000000000000000000000000000000000000000000000000"
            )),
        );
    }

    #[test]
    fn bool_root_sets_first_byte() {
        assert_eq!(bool_root(false), H256::zero());
        assert_eq!(bool_root(true).as_bytes()[0], 1);
        assert!(bool_root(true).as_bytes()[1..].iter().all(|byte| *byte == 0));
    }

    #[test]
    fn signature_root_pads_to_four_chunks() {
        let signature = [0xaa; SIGNATURE_SIZE];
        let chunk = H256::repeat_byte(0xaa);

        let expected = hashing::hash_256_256(
            hashing::hash_256_256(chunk, chunk),
            hashing::hash_256_256(chunk, H256::zero()),
        );

        assert_eq!(signature_root(&signature), Ok(expected));
    }

    #[test]
    fn public_key_root_pads_second_chunk_with_zeros() {
        let public_key = [0x11; PUBLIC_KEY_SIZE];

        let mut second = H256::zero();
        second[..16].copy_from_slice(&[0x11; 16]);

        assert_eq!(
            public_key_root(&public_key),
            Ok(hashing::hash_256_256(H256::repeat_byte(0x11), second)),
        );
    }

    #[test]
    fn zero_signature_root_is_a_zero_subtree_root() {
        assert_eq!(
            signature_root(&[0; SIGNATURE_SIZE]),
            Ok(hashing::ZERO_HASHES[2]),
        );
    }
}
