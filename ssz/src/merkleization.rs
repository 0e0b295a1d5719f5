use ethereum_types::H256;
use hashing::ZERO_HASHES;
use itertools::Itertools as _;
use rayon::prelude::*;

use crate::{consts::BYTES_PER_CHUNK, error::MerkleError, primitives::uint64_root};

// Below this many nodes a layer is hashed on the calling thread.
const PARALLEL_LAYER_THRESHOLD: usize = 1024;

/// Computes the root of `leaves`, a concatenation of 32-byte chunks, with SHA-256.
pub fn merkle_root(leaves: &[u8]) -> Result<H256, MerkleError> {
    merkle_root_with(leaves, hashing::hash_256_256)
}

/// Computes the root of `leaves` with `hasher` as the pair hash.
///
/// The leaf count must be a power of two. Callers pad before calling this.
/// A single chunk is its own root.
pub fn merkle_root_with(
    leaves: &[u8],
    hasher: impl Fn(H256, H256) -> H256 + Sync,
) -> Result<H256, MerkleError> {
    match leaves.len() {
        0 => return Err(MerkleError::EmptyInput),
        BYTES_PER_CHUNK => return Ok(H256::from_slice(leaves)),
        length => ensure_power_of_two_layer(length)?,
    }

    let mut layer = leaves
        .chunks_exact(BYTES_PER_CHUNK)
        .map(H256::from_slice)
        .collect_vec();

    while layer.len() > 1 {
        ensure_power_of_two_layer(layer.len() * BYTES_PER_CHUNK)?;
        layer = hash_layer(&layer, &hasher);
    }

    Ok(layer[0])
}

/// Number of halvings needed to reduce `leaf_count` nodes to one. Zero for one node or fewer.
#[must_use]
pub const fn tree_depth(leaf_count: usize) -> usize {
    if leaf_count <= 1 {
        0
    } else {
        leaf_count.ilog2() as usize
    }
}

/// Merkleizes `chunks` as the first leaves of a tree sized for `limit` chunks.
///
/// The padding between `chunks.len().next_power_of_two()` and the limit is never materialized.
/// Roots of zero subtrees come from [`ZERO_HASHES`].
pub fn merkleize_chunks(chunks: &[H256], limit: usize) -> Result<H256, MerkleError> {
    assert!(chunks.len() <= limit.max(1));

    let full_depth = tree_depth(limit.max(1).next_power_of_two());

    if chunks.is_empty() {
        return Ok(ZERO_HASHES[full_depth]);
    }

    let padded_count = chunks.len().next_power_of_two();
    let mut leaves = Vec::with_capacity(padded_count * BYTES_PER_CHUNK);

    for chunk in chunks {
        leaves.extend_from_slice(chunk.as_bytes());
    }

    leaves.resize(padded_count * BYTES_PER_CHUNK, 0);

    let mut root = merkle_root(&leaves)?;

    for zero_hash in &ZERO_HASHES[tree_depth(padded_count)..full_depth] {
        root = hashing::hash_256_256(root, *zero_hash);
    }

    Ok(root)
}

/// Pads `leaves` with zero chunks to the next power of two and reduces them.
///
/// This is how fixed-size containers combine the roots of their fields.
pub fn merkleize_padded(leaves: &[H256]) -> Result<H256, MerkleError> {
    let padded_count = leaves.len().next_power_of_two();
    let mut bytes = Vec::with_capacity(padded_count * BYTES_PER_CHUNK);

    for leaf in leaves {
        bytes.extend_from_slice(leaf.as_bytes());
    }

    bytes.resize(padded_count * BYTES_PER_CHUNK, 0);

    merkle_root(&bytes)
}

#[must_use]
pub fn mix_in_length(root: H256, length: usize) -> H256 {
    hashing::hash_256_256(root, uint64_root(length as u64))
}

fn ensure_power_of_two_layer(length: usize) -> Result<(), MerkleError> {
    if length % BYTES_PER_CHUNK == 0 && (length / BYTES_PER_CHUNK).is_power_of_two() {
        Ok(())
    } else {
        Err(MerkleError::NonPowerOfTwoLayer { length })
    }
}

fn hash_layer(layer: &[H256], hasher: &(impl Fn(H256, H256) -> H256 + Sync)) -> Vec<H256> {
    let hash_pair = |pair: &[H256]| match *pair {
        [left, right] => hasher(left, right),
        _ => unreachable!("layers are split into chunks of exactly 2 nodes"),
    };

    if layer.len() < PARALLEL_LAYER_THRESHOLD {
        layer.chunks_exact(2).map(hash_pair).collect()
    } else {
        layer.par_chunks_exact(2).map(hash_pair).collect()
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn chunk(byte: u8) -> H256 {
        H256::repeat_byte(byte)
    }

    fn concat(chunks: &[H256]) -> Vec<u8> {
        chunks.iter().flat_map(|chunk| chunk.to_fixed_bytes()).collect()
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(merkle_root(&[]), Err(MerkleError::EmptyInput));
    }

    #[test]
    fn single_leaf_is_its_own_root() {
        assert_eq!(merkle_root(chunk(7).as_bytes()), Ok(chunk(7)));
    }

    #[test]
    fn three_leaves_are_rejected_until_padded() {
        let leaves = [chunk(1), chunk(2), chunk(3)];

        assert_eq!(
            merkle_root(&concat(&leaves)),
            Err(MerkleError::NonPowerOfTwoLayer { length: 96 }),
        );

        let padded = [chunk(1), chunk(2), chunk(3), H256::zero()];

        let expected = hashing::hash_256_256(
            hashing::hash_256_256(chunk(1), chunk(2)),
            hashing::hash_256_256(chunk(3), H256::zero()),
        );

        assert_eq!(merkle_root(&concat(&padded)), Ok(expected));
        assert_eq!(merkleize_padded(&leaves), Ok(expected));
    }

    #[test]
    fn partial_chunk_is_rejected() {
        assert_eq!(
            merkle_root(&[0; 40]),
            Err(MerkleError::NonPowerOfTwoLayer { length: 40 }),
        );
    }

    #[test]
    fn injected_hasher_is_used_for_every_pair() {
        let xor = |left: H256, right: H256| left ^ right;
        let leaves = concat(&[chunk(1), chunk(2), chunk(4), chunk(8)]);

        assert_eq!(merkle_root_with(&leaves, xor), Ok(chunk(15)));
    }

    #[test]
    fn large_layers_hashed_in_parallel_match_sequential_reduction() {
        let leaves = (0..4096_u32)
            .map(|index| H256::from_low_u64_le(index.into()))
            .collect_vec();

        let mut expected = leaves.clone();

        while expected.len() > 1 {
            expected = expected
                .chunks_exact(2)
                .map(|pair| hashing::hash_256_256(pair[0], pair[1]))
                .collect();
        }

        assert_eq!(merkle_root(&concat(&leaves)), Ok(expected[0]));
    }

    #[test_case(0 => 0)]
    #[test_case(1 => 0)]
    #[test_case(2 => 1)]
    #[test_case(3 => 1)]
    #[test_case(4 => 2)]
    #[test_case(1 << 40 => 40)]
    fn tree_depth_counts_halvings(leaf_count: usize) -> usize {
        tree_depth(leaf_count)
    }

    #[test]
    fn empty_list_root_is_zero_subtree_root() {
        assert_eq!(merkleize_chunks(&[], 1 << 40), Ok(ZERO_HASHES[40]));
        assert_eq!(merkleize_chunks(&[], 0), Ok(ZERO_HASHES[0]));
    }

    #[test]
    fn virtual_padding_matches_materialized_padding() {
        let chunks = [chunk(1), chunk(2), chunk(3)];
        let mut padded = chunks.to_vec();
        padded.resize(16, H256::zero());

        assert_eq!(merkleize_chunks(&chunks, 16), merkle_root(&concat(&padded)));
    }

    #[test]
    fn mix_in_length_hashes_little_endian_length() {
        let root = chunk(9);
        let mut length_chunk = H256::zero();
        length_chunk.0[0] = 3;

        assert_eq!(
            mix_in_length(root, 3),
            hashing::hash_256_256(root, length_chunk),
        );
    }
}
