use core::{num::NonZeroU64, ops::Div as _};

use num_integer::Roots as _;
use tap::TryConv as _;
use typenum::Unsigned as _;
use types::{
    phase0::{
        consts::GENESIS_EPOCH,
        containers::Validator,
        primitives::{DomainType, Epoch, Gwei, Slot, ValidatorIndex, H256},
    },
    preset::Preset,
};

use crate::error::Error;

#[must_use]
pub fn compute_epoch_at_slot<P: Preset>(slot: Slot) -> Epoch {
    slot / P::SlotsPerEpoch::U64
}

#[must_use]
pub const fn compute_start_slot_at_epoch<P: Preset>(epoch: Epoch) -> Slot {
    epoch.saturating_mul(P::SlotsPerEpoch::U64)
}

#[must_use]
pub fn slots_since_epoch_start<P: Preset>(slot: Slot) -> u64 {
    slot % P::SlotsPerEpoch::U64
}

/// The epoch before `current_epoch`, or the genesis epoch if there is none.
#[must_use]
pub fn previous_epoch(current_epoch: Epoch) -> Epoch {
    current_epoch.saturating_sub(1).max(GENESIS_EPOCH)
}

/// Index into the RANDAO mix ring buffer that seeds shufflings for `epoch`.
///
/// The lookahead keeps seeds fixed long enough for validators to learn their duties in advance.
#[must_use]
pub fn seed_mix_epoch<P: Preset>(epoch: Epoch) -> Epoch {
    epoch + P::EpochsPerHistoricalVector::U64 - P::MIN_SEED_LOOKAHEAD - 1
}

#[must_use]
pub fn compute_seed(domain_type: DomainType, epoch: Epoch, mix: H256) -> H256 {
    hashing::hash_32_64_256(domain_type.to_fixed_bytes(), epoch, mix)
}

#[must_use]
pub fn committee_count_from_active_validator_count<P: Preset>(active_validator_count: u64) -> u64 {
    active_validator_count
        .div(P::SlotsPerEpoch::U64)
        .div(P::TARGET_COMMITTEE_SIZE)
        .clamp(1, P::MAX_COMMITTEES_PER_SLOT.get())
}

#[must_use]
pub fn integer_squareroot(value: u64) -> u64 {
    value.sqrt()
}

/// Shuffles active validator indices in place.
///
/// Committees are contiguous runs of the result, so `compute_committee` can slice it directly.
pub fn shuffle_validator_indices<P: Preset>(
    indices: &mut [ValidatorIndex],
    seed: H256,
) -> Result<(), Error> {
    shuffling::shuffle_slice::<P, _>(indices, seed)?;
    Ok(())
}

/// Slices committee `index` out of `count` committees from already shuffled indices.
pub fn compute_committee(
    shuffled_indices: &[ValidatorIndex],
    index: u64,
    count: u64,
) -> Result<&[ValidatorIndex], Error> {
    if index >= count {
        return Err(Error::CommitteeIndexOutOfBounds {
            index,
            committee_count: count,
        });
    }

    let length = shuffled_indices.len().try_conv::<u64>()?;
    let start = (length * index / count).try_conv::<usize>()?;
    let end = (length * (index + 1) / count).try_conv::<usize>()?;

    Ok(&shuffled_indices[start..end])
}

/// Samples a proposer from `indices`, weighting candidates by effective balance.
///
/// `seed` must already include the slot.
pub fn compute_proposer_index<P: Preset>(
    validators: &[Validator],
    indices: &[ValidatorIndex],
    seed: H256,
) -> Result<ValidatorIndex, Error> {
    let total = indices
        .len()
        .try_conv::<u64>()
        .map(NonZeroU64::new)?
        .ok_or(Error::NoActiveValidators)?;

    let max_random_byte = u64::from(u8::MAX);

    let random_bytes = (0..u64::MAX / H256::len_bytes() as u64)
        .flat_map(|quotient| hashing::hash_256_64(seed, quotient).to_fixed_bytes());

    for (attempt, random_byte) in (0_u64..).zip(random_bytes) {
        let position = shuffling::shuffle_single::<P>(attempt % total, total, seed);
        let candidate_index = indices[position.try_conv::<usize>()?];

        let effective_balance = validators
            .get(candidate_index.try_conv::<usize>()?)
            .ok_or(Error::ValidatorIndexOutOfBounds {
                index: candidate_index,
            })?
            .effective_balance;

        if effective_balance * max_random_byte
            >= P::MAX_EFFECTIVE_BALANCE * u64::from(random_byte)
        {
            return Ok(candidate_index);
        }
    }

    Err(Error::FailedToSelectProposer)
}

/// Sums `balances` and floors the total at `EFFECTIVE_BALANCE_INCREMENT`.
///
/// The floor keeps later divisions by the total well defined.
#[must_use]
pub fn total_balance<P: Preset>(balances: impl IntoIterator<Item = Gwei>) -> Gwei {
    balances
        .into_iter()
        .sum::<Gwei>()
        .max(P::EFFECTIVE_BALANCE_INCREMENT.get())
}

#[cfg(test)]
mod tests {
    use itertools::Itertools as _;
    use test_case::test_case;
    use types::preset::{Mainnet, Minimal};

    use super::*;

    fn validator_with_balance(effective_balance: Gwei) -> Validator {
        Validator {
            effective_balance,
            ..Validator::default()
        }
    }

    #[test_case(0, 0)]
    #[test_case(7, 0)]
    #[test_case(8, 1)]
    #[test_case(17, 2)]
    fn epoch_at_slot_uses_minimal_epoch_length(slot: Slot, expected: Epoch) {
        assert_eq!(compute_epoch_at_slot::<Minimal>(slot), expected);
    }

    #[test]
    fn start_slot_saturates() {
        assert_eq!(compute_start_slot_at_epoch::<Mainnet>(3), 96);
        assert_eq!(compute_start_slot_at_epoch::<Mainnet>(u64::MAX), u64::MAX);
    }

    #[test]
    fn previous_epoch_stops_at_genesis() {
        assert_eq!(previous_epoch(0), 0);
        assert_eq!(previous_epoch(5), 4);
    }

    #[test_case(0, 1)]
    #[test_case(64, 2)]
    #[test_case(1000, 4)]
    fn committee_count_is_clamped(active_validator_count: u64, expected: u64) {
        assert_eq!(
            committee_count_from_active_validator_count::<Minimal>(active_validator_count),
            expected,
        );
    }

    #[test_case(0, 0)]
    #[test_case(15, 3)]
    #[test_case(16, 4)]
    #[test_case(u64::MAX, 4_294_967_295)]
    fn integer_squareroot_rounds_down(value: u64, expected: u64) {
        assert_eq!(integer_squareroot(value), expected);
    }

    #[test]
    fn committees_partition_the_shuffled_indices() -> Result<(), Error> {
        let indices = (0..10).collect_vec();

        let committees = (0..3)
            .map(|index| compute_committee(&indices, index, 3))
            .collect::<Result<Vec<_>, _>>()?;

        assert_eq!(committees, [&[0, 1, 2][..], &[3, 4, 5], &[6, 7, 8, 9]]);

        Ok(())
    }

    #[test]
    fn committee_past_count_is_rejected() {
        assert!(matches!(
            compute_committee(&[0, 1, 2], 3, 3),
            Err(Error::CommitteeIndexOutOfBounds {
                index: 3,
                committee_count: 3,
            }),
        ));
    }

    #[test]
    fn proposer_with_maximum_balance_is_accepted_on_first_attempt() -> Result<(), Error> {
        let validators = vec![validator_with_balance(Mainnet::MAX_EFFECTIVE_BALANCE); 16];
        let indices = (0..16).collect_vec();
        let seed = H256::repeat_byte(3);
        let total = NonZeroU64::new(16).expect("16 is nonzero");

        assert_eq!(
            compute_proposer_index::<Mainnet>(&validators, &indices, seed)?,
            indices[usize::try_from(shuffling::shuffle_single::<Mainnet>(0, total, seed))?],
        );

        Ok(())
    }

    #[test]
    fn proposer_selection_without_active_validators_fails() {
        assert!(matches!(
            compute_proposer_index::<Mainnet>(&[], &[], H256::zero()),
            Err(Error::NoActiveValidators),
        ));
    }

    #[test]
    fn proposer_outside_registry_is_reported() {
        assert!(matches!(
            compute_proposer_index::<Mainnet>(&[], &[5], H256::zero()),
            Err(Error::ValidatorIndexOutOfBounds { index: 5 }),
        ));
    }

    #[test]
    fn total_balance_is_floored_at_one_increment() {
        assert_eq!(total_balance::<Mainnet>([]), 1_000_000_000);
        assert_eq!(total_balance::<Mainnet>([1, 2]), 1_000_000_000);
        assert_eq!(
            total_balance::<Mainnet>([32_000_000_000, 31_000_000_000]),
            63_000_000_000,
        );
    }

    #[test]
    fn shuffled_indices_form_a_permutation() -> Result<(), Error> {
        let mut indices = (0..50).collect_vec();

        shuffle_validator_indices::<Minimal>(&mut indices, H256::repeat_byte(9))?;

        assert_eq!(indices.iter().copied().sorted().collect_vec(), (0..50).collect_vec());

        Ok(())
    }
}
