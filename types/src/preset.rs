use core::{fmt::Debug, hash::Hash, num::NonZeroU64};

use nonzero_ext::nonzero;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use typenum::{
    NonZero, Prod, Unsigned, U1099511627776, U128, U16777216, U2048, U256, U32, U4, U512, U64,
    U65536, U8, U8192,
};

use crate::phase0::primitives::Gwei;

#[cfg(test)]
use enum_iterator::Sequence;

/// Compile-time configuration variables.
///
/// Sizes of SSZ collections are type-level numbers so that they are part of container types.
pub trait Preset: Copy + Eq + Ord + Hash + Default + Debug + Send + Sync + 'static {
    // Phase 0
    type EpochsPerEth1VotingPeriod: Unsigned + NonZero;
    type EpochsPerHistoricalRoot: Unsigned + NonZero;
    type EpochsPerHistoricalVector: Unsigned + NonZero + Debug + Send + Sync;
    type EpochsPerSlashingsVector: Unsigned + NonZero + Debug + Send + Sync;
    type HistoricalRootsLimit: Unsigned + Debug + Send + Sync;
    type MaxAttestations: Unsigned + Debug + Send + Sync;
    type MaxValidatorsPerCommittee: Unsigned + NonZero + Eq + Ord + Debug + Send + Sync;
    type SlotsPerEpoch: Unsigned + NonZero + Debug + Send + Sync;
    type ValidatorRegistryLimit: Unsigned + NonZero + Debug + Send + Sync;

    // Altair
    type SyncCommitteeSize: Unsigned + NonZero + Eq + Debug + Send + Sync;

    // Bellatrix
    type BytesPerLogsBloom: Unsigned + NonZero + Eq + Debug + Send + Sync;
    type MaxExtraDataBytes: Unsigned + Eq + Debug + Send + Sync;

    // Derived type-level variables
    type MaxAttestationsPerEpoch: Unsigned + Debug + Send + Sync;
    type SlotsPerEth1VotingPeriod: Unsigned + NonZero + Debug + Send + Sync;
    type SlotsPerHistoricalRoot: Unsigned + NonZero + Eq + Debug + Send + Sync;

    // Meta
    const NAME: PresetName;

    // Phase 0
    const EFFECTIVE_BALANCE_INCREMENT: NonZeroU64 = nonzero!(1_000_000_000_u64);
    const MAX_COMMITTEES_PER_SLOT: NonZeroU64 = nonzero!(64_u64);
    const MAX_EFFECTIVE_BALANCE: Gwei = 32_000_000_000;
    const MAX_SEED_LOOKAHEAD: u64 = 4;
    const MIN_ATTESTATION_INCLUSION_DELAY: NonZeroU64 = NonZeroU64::MIN;
    const MIN_SEED_LOOKAHEAD: u64 = 1;
    const SHUFFLE_ROUND_COUNT: u8 = 90;
    const TARGET_COMMITTEE_SIZE: NonZeroU64 = nonzero!(128_u64);

    // Altair
    const EPOCHS_PER_SYNC_COMMITTEE_PERIOD: NonZeroU64 = nonzero!(256_u64);
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug)]
pub struct Mainnet;

impl Preset for Mainnet {
    // Phase 0
    type EpochsPerEth1VotingPeriod = U64;
    type EpochsPerHistoricalRoot = U256;
    type EpochsPerHistoricalVector = U65536;
    type EpochsPerSlashingsVector = U8192;
    type HistoricalRootsLimit = U16777216;
    type MaxAttestations = U128;
    type MaxValidatorsPerCommittee = U2048;
    type SlotsPerEpoch = U32;
    type ValidatorRegistryLimit = U1099511627776;

    // Altair
    type SyncCommitteeSize = U512;

    // Bellatrix
    type BytesPerLogsBloom = U256;
    type MaxExtraDataBytes = U32;

    // Derived type-level variables
    type MaxAttestationsPerEpoch = Prod<Self::MaxAttestations, Self::SlotsPerEpoch>;
    type SlotsPerEth1VotingPeriod = Prod<Self::EpochsPerEth1VotingPeriod, Self::SlotsPerEpoch>;
    type SlotsPerHistoricalRoot = Prod<Self::EpochsPerHistoricalRoot, Self::SlotsPerEpoch>;

    // Meta
    const NAME: PresetName = PresetName::Mainnet;
}

macro_rules! delegate_preset_items {
    (
        super $base_preset: ident;
        $(type $associated_type: ident;)*
    ) => {
        $(type $associated_type = <$base_preset as Preset>::$associated_type;)*
    };
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug)]
pub struct Minimal;

impl Preset for Minimal {
    delegate_preset_items! {
        super Mainnet;

        // Phase 0
        type HistoricalRootsLimit;
        type MaxAttestations;
        type MaxValidatorsPerCommittee;
        type ValidatorRegistryLimit;

        // Bellatrix
        type BytesPerLogsBloom;
        type MaxExtraDataBytes;
    }

    // Phase 0
    type EpochsPerEth1VotingPeriod = U4;
    type EpochsPerHistoricalRoot = U8;
    type EpochsPerHistoricalVector = U64;
    type EpochsPerSlashingsVector = U64;
    type SlotsPerEpoch = U8;

    // Altair
    type SyncCommitteeSize = U32;

    // Derived type-level variables
    type MaxAttestationsPerEpoch = Prod<Self::MaxAttestations, Self::SlotsPerEpoch>;
    type SlotsPerEth1VotingPeriod = Prod<Self::EpochsPerEth1VotingPeriod, Self::SlotsPerEpoch>;
    type SlotsPerHistoricalRoot = Prod<Self::EpochsPerHistoricalRoot, Self::SlotsPerEpoch>;

    // Meta
    const NAME: PresetName = PresetName::Minimal;

    // Phase 0
    const MAX_COMMITTEES_PER_SLOT: NonZeroU64 = nonzero!(4_u64);
    const SHUFFLE_ROUND_COUNT: u8 = 10;
    const TARGET_COMMITTEE_SIZE: NonZeroU64 = nonzero!(4_u64);

    // Altair
    const EPOCHS_PER_SYNC_COMMITTEE_PERIOD: NonZeroU64 = nonzero!(8_u64);
}

#[derive(Clone, Copy, Debug, Display, EnumString, Deserialize, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[cfg_attr(test, derive(PartialEq, Eq, Sequence))]
pub enum PresetName {
    Mainnet,
    Minimal,
}
