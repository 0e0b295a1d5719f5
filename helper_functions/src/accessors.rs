use ssz::BitList;
use types::phase0::primitives::ValidatorIndex;

use crate::error::Error;

/// Committee members whose aggregation bit is set, in committee order.
pub fn get_attesting_indices<'all, N: typenum::Unsigned>(
    committee: &'all [ValidatorIndex],
    aggregation_bits: &'all BitList<N>,
) -> Result<impl Iterator<Item = ValidatorIndex> + 'all, Error> {
    if committee.len() != aggregation_bits.len() {
        return Err(Error::CommitteeLengthMismatch {
            aggregation_bitlist_length: aggregation_bits.len(),
            committee_length: committee.len(),
        });
    }

    Ok(aggregation_bits
        .iter()
        .zip(committee.iter().copied())
        .filter_map(|(present, validator_index)| present.then_some(validator_index)))
}

#[cfg(test)]
mod tests {
    use itertools::Itertools as _;
    use typenum::U16;

    use super::*;

    #[test]
    fn only_members_with_set_bits_attest() -> Result<(), Error> {
        let committee = [10, 20, 30, 40];
        let mut bits = BitList::<U16>::with_length(4).expect("4 bits fit in 16");
        bits.set(1, true).expect("index is within length");
        bits.set(3, true).expect("index is within length");

        assert_eq!(get_attesting_indices(&committee, &bits)?.collect_vec(), [20, 40]);

        Ok(())
    }

    #[test]
    fn bit_count_must_match_committee_size() {
        let bits = BitList::<U16>::with_length(3).expect("3 bits fit in 16");

        assert!(matches!(
            get_attesting_indices(&[1, 2], &bits),
            Err(Error::CommitteeLengthMismatch {
                aggregation_bitlist_length: 3,
                committee_length: 2,
            }),
        ));
    }
}
