use enumset::{EnumSet, EnumSetType};
use types::nonstandard::Phase;

/// Number of slots in the leaf array. Every phase pads its leaves to this many before hashing.
pub const STATE_LEAF_CAPACITY: usize = 32;

/// Position of a top-level field in the state's Merkle tree.
#[derive(EnumSetType, Debug)]
pub enum StateLeafIndex {
    GenesisTime = 0,
    GenesisValidatorsRoot = 1,
    Slot = 2,
    Fork = 3,
    LatestBlockHeader = 4,
    BlockRoots = 5,
    StateRoots = 6,
    HistoricalRoots = 7,
    Eth1Data = 8,
    Eth1DataVotes = 9,
    Eth1DepositIndex = 10,
    Validators = 11,
    Balances = 12,
    RandaoMixes = 13,
    Slashings = 14,
    /// Holds `previous_epoch_attestations` in phase 0.
    PreviousEpochParticipation = 15,
    /// Holds `current_epoch_attestations` in phase 0.
    CurrentEpochParticipation = 16,
    JustificationBits = 17,
    PreviousJustifiedCheckpoint = 18,
    CurrentJustifiedCheckpoint = 19,
    FinalizedCheckpoint = 20,
    InactivityScores = 21,
    CurrentSyncCommittee = 22,
    NextSyncCommittee = 23,
    LatestExecutionPayloadHeader = 24,
    NextWithdrawalIndex = 25,
    NextWithdrawalValidatorIndex = 26,
    HistoricalSummaries = 27,
}

impl StateLeafIndex {
    #[must_use]
    pub const fn position(self) -> usize {
        self as usize
    }

    /// Number of top-level fields a state of `phase` has.
    #[must_use]
    pub const fn count_in(phase: Phase) -> usize {
        match phase {
            Phase::Phase0 => 21,
            Phase::Altair => 24,
            Phase::Bellatrix => 25,
            Phase::Capella => 28,
        }
    }

    #[must_use]
    pub fn all_in(phase: Phase) -> EnumSet<Self> {
        EnumSet::<Self>::all()
            .iter()
            .filter(|leaf| leaf.position() < Self::count_in(phase))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(Phase::Phase0, StateLeafIndex::FinalizedCheckpoint)]
    #[test_case(Phase::Altair, StateLeafIndex::NextSyncCommittee)]
    #[test_case(Phase::Bellatrix, StateLeafIndex::LatestExecutionPayloadHeader)]
    #[test_case(Phase::Capella, StateLeafIndex::HistoricalSummaries)]
    fn last_leaf_of_each_phase(phase: Phase, last: StateLeafIndex) {
        let leaves = StateLeafIndex::all_in(phase);

        assert_eq!(leaves.len(), StateLeafIndex::count_in(phase));
        assert!(leaves.contains(last));
        assert_eq!(leaves.iter().last(), Some(last));
    }

    #[test]
    fn every_phase_fits_in_leaf_array() {
        assert!(StateLeafIndex::count_in(Phase::Capella) <= STATE_LEAF_CAPACITY);
        assert_eq!(EnumSet::<StateLeafIndex>::all().len(), 28);
    }
}
