//! Swap-or-not shuffling.
//!
//! A round picks a pivot and pairs every position `i` with `pivot - i` (mod length). A pair is
//! swapped when the bit of the round's source hash at the higher of the two positions is set.
//! Each round is an involution, so shuffling a whole slice applies the rounds in reverse.

use core::num::NonZeroU64;

use anyhow::Result;
use bit_field::BitArray as _;
use tap::TryConv as _;
use types::{phase0::primitives::H256, preset::Preset};

const POSITIONS_PER_SOURCE: u64 = H256::len_bytes() as u64 * 8;

/// Permutes `slice` so that `slice[i]` ends up holding the element that was at
/// `shuffle_single::<P>(i, len, seed)`.
pub fn shuffle_slice<P: Preset, T>(slice: &mut [T], seed: H256) -> Result<()> {
    let Some(length) = NonZeroU64::new(slice.len().try_into()?) else {
        return Ok(());
    };

    for round in (0..P::SHUFFLE_ROUND_COUNT).rev() {
        let pivot = compute_pivot(seed, round, length);
        let mut sources = SourceCache::new(seed, round);

        for index in 0..length.get() {
            let flip = (pivot + length.get() - index) % length;

            // Each pair is visited twice. Only act on it from its lower position.
            if index >= flip {
                continue;
            }

            if sources.bit_at(flip) {
                slice.swap(index.try_conv::<usize>()?, flip.try_conv::<usize>()?);
            }
        }
    }

    Ok(())
}

/// Computes the position `index` moves to in a shuffled list of `index_count` elements.
///
/// # Panics
///
/// Panics if `index` is not less than `index_count`.
#[must_use]
pub fn shuffle_single<P: Preset>(mut index: u64, index_count: NonZeroU64, seed: H256) -> u64 {
    assert!(index < index_count.get());

    for round in 0..P::SHUFFLE_ROUND_COUNT {
        let pivot = compute_pivot(seed, round, index_count);
        let flip = (pivot + index_count.get() - index) % index_count;
        let position = index.max(flip);

        if source_bit(compute_source(seed, round, position), position) {
            index = flip;
        }
    }

    index
}

struct SourceCache {
    seed: H256,
    round: u8,
    window: Option<(u64, H256)>,
}

impl SourceCache {
    const fn new(seed: H256, round: u8) -> Self {
        Self {
            seed,
            round,
            window: None,
        }
    }

    fn bit_at(&mut self, position: u64) -> bool {
        let window = position / POSITIONS_PER_SOURCE;

        let source = match self.window {
            Some((cached_window, source)) if cached_window == window => source,
            _ => {
                let source = compute_source(self.seed, self.round, position);
                self.window = Some((window, source));
                source
            }
        };

        source_bit(source, position)
    }
}

fn compute_pivot(seed: H256, round: u8, index_count: NonZeroU64) -> u64 {
    let mut bytes = [0; size_of::<u64>()];
    bytes.copy_from_slice(&hashing::hash_256_8(seed, round)[..size_of::<u64>()]);
    u64::from_le_bytes(bytes) % index_count
}

fn compute_source(seed: H256, round: u8, position: u64) -> H256 {
    // The window is hashed as 4 bytes. Lists long enough to overflow it cannot exist.
    #[expect(clippy::cast_possible_truncation)]
    let window = (position / POSITIONS_PER_SOURCE) as u32;

    hashing::hash_256_8_32(seed, round, window)
}

#[expect(clippy::cast_possible_truncation)]
fn source_bit(source: H256, position: u64) -> bool {
    source
        .as_bytes()
        .get_bit((position % POSITIONS_PER_SOURCE) as usize)
}

#[cfg(test)]
mod tests {
    use itertools::Itertools as _;
    use test_case::test_case;
    use types::preset::{Mainnet, Minimal};

    use super::*;

    fn seed() -> H256 {
        H256::repeat_byte(0x5a)
    }

    #[test_case(1)]
    #[test_case(2)]
    #[test_case(7)]
    #[test_case(100)]
    #[test_case(300)]
    fn slice_matches_single_index_shuffling(count: u64) -> Result<()> {
        let index_count = NonZeroU64::new(count).expect("test counts are positive");
        let mut shuffled = (0..count).collect_vec();

        shuffle_slice::<Minimal, _>(&mut shuffled, seed())?;

        let expected = (0..count)
            .map(|index| shuffle_single::<Minimal>(index, index_count, seed()))
            .collect_vec();

        assert_eq!(shuffled, expected);

        Ok(())
    }

    #[test]
    fn shuffling_is_a_permutation() -> Result<()> {
        let mut shuffled = (0..1000_u64).collect_vec();

        shuffle_slice::<Mainnet, _>(&mut shuffled, seed())?;

        assert_ne!(shuffled, (0..1000).collect_vec());
        assert_eq!(shuffled.iter().copied().sorted().collect_vec(), (0..1000).collect_vec());

        Ok(())
    }

    #[test]
    fn empty_slice_is_left_alone() -> Result<()> {
        let mut empty: [u64; 0] = [];
        shuffle_slice::<Mainnet, _>(&mut empty, seed())
    }

    #[test]
    fn single_element_stays_in_place() {
        assert_eq!(shuffle_single::<Mainnet>(0, NonZeroU64::MIN, seed()), 0);
    }

    #[test]
    fn different_seeds_give_different_orders() -> Result<()> {
        let mut first = (0..64_u64).collect_vec();
        let mut second = first.clone();

        shuffle_slice::<Minimal, _>(&mut first, H256::repeat_byte(1))?;
        shuffle_slice::<Minimal, _>(&mut second, H256::repeat_byte(2))?;

        assert_ne!(first, second);

        Ok(())
    }
}
