//! Collections used in `BeaconState`.
//!
//! All of them are contiguous. Copying a state copies every element.

use ssz::{ContiguousList, ContiguousVector};

use crate::{
    altair::primitives::ParticipationFlags,
    capella::containers::HistoricalSummary,
    phase0::{
        containers::{Eth1Data, PendingAttestation, Validator},
        primitives::{Gwei, H256},
    },
    preset::Preset,
};

pub type RecentRoots<P> = ContiguousVector<H256, <P as Preset>::SlotsPerHistoricalRoot>;

pub type HistoricalRoots<P> = ContiguousList<H256, <P as Preset>::HistoricalRootsLimit>;

pub type Eth1DataVotes<P> = ContiguousList<Eth1Data, <P as Preset>::SlotsPerEth1VotingPeriod>;

pub type Validators<P> = ContiguousList<Validator, <P as Preset>::ValidatorRegistryLimit>;

pub type Balances<P> = ContiguousList<Gwei, <P as Preset>::ValidatorRegistryLimit>;

pub type RandaoMixes<P> = ContiguousVector<H256, <P as Preset>::EpochsPerHistoricalVector>;

pub type Slashings<P> = ContiguousVector<Gwei, <P as Preset>::EpochsPerSlashingsVector>;

pub type Attestations<P> =
    ContiguousList<PendingAttestation<P>, <P as Preset>::MaxAttestationsPerEpoch>;

pub type EpochParticipation<P> =
    ContiguousList<ParticipationFlags, <P as Preset>::ValidatorRegistryLimit>;

pub type InactivityScores<P> = ContiguousList<u64, <P as Preset>::ValidatorRegistryLimit>;

pub type HistoricalSummaries<P> =
    ContiguousList<HistoricalSummary, <P as Preset>::HistoricalRootsLimit>;
