use derive_more::From;
use ssz::{
    MerkleError, ReadError, Size, SszHash, SszRead, SszReadDefault as _, SszSize, SszWrite,
    WriteError, H256, U1,
};

use crate::{
    altair::beacon_state::BeaconState as AltairBeaconState,
    bellatrix::{
        beacon_state::BeaconState as BellatrixBeaconState,
        containers::ExecutionPayloadHeader as BellatrixExecutionPayloadHeader,
    },
    capella::{
        beacon_state::BeaconState as CapellaBeaconState,
        containers::ExecutionPayloadHeader as CapellaExecutionPayloadHeader,
    },
    config::Config,
    nonstandard::Phase,
    phase0::{
        beacon_state::BeaconState as Phase0BeaconState,
        primitives::{Slot, UnixSeconds},
    },
    preset::Preset,
};

/// Beacon state of any phase.
///
/// Decoding needs a [`Config`] because the layout depends on the phase the slot falls in.
#[derive(Clone, PartialEq, Eq, Debug, From)]
pub enum BeaconState<P: Preset> {
    Phase0(Phase0BeaconState<P>),
    Altair(AltairBeaconState<P>),
    Bellatrix(BellatrixBeaconState<P>),
    Capella(CapellaBeaconState<P>),
}

impl<P: Preset> SszSize for BeaconState<P> {
    // The phase 0 state has the smallest fixed part of all phases.
    const SIZE: Size = Phase0BeaconState::<P>::SIZE;
}

impl<P: Preset> SszRead<Config> for BeaconState<P> {
    fn from_ssz_unchecked(config: &Config, bytes: &[u8]) -> Result<Self, ReadError> {
        // `genesis_time` and `genesis_validators_root` come before `slot`.
        let slot_start = UnixSeconds::SIZE.fixed_part() + H256::SIZE.fixed_part();
        let slot_end = slot_start + Slot::SIZE.fixed_part();
        let slot = Slot::from_ssz_default(ssz::subslice(bytes, slot_start..slot_end)?)?;

        let state = match config.phase_at_slot::<P>(slot) {
            Phase::Phase0 => Self::Phase0(Phase0BeaconState::from_ssz_default(bytes)?),
            Phase::Altair => Self::Altair(AltairBeaconState::from_ssz_default(bytes)?),
            Phase::Bellatrix => Self::Bellatrix(BellatrixBeaconState::from_ssz_default(bytes)?),
            Phase::Capella => Self::Capella(CapellaBeaconState::from_ssz_default(bytes)?),
        };

        Ok(state)
    }
}

impl<P: Preset> SszWrite for BeaconState<P> {
    fn write_variable(&self, bytes: &mut Vec<u8>) -> Result<(), WriteError> {
        match self {
            Self::Phase0(state) => state.write_variable(bytes),
            Self::Altair(state) => state.write_variable(bytes),
            Self::Bellatrix(state) => state.write_variable(bytes),
            Self::Capella(state) => state.write_variable(bytes),
        }
    }

    fn encoded_size(&self) -> usize {
        match self {
            Self::Phase0(state) => state.encoded_size(),
            Self::Altair(state) => state.encoded_size(),
            Self::Bellatrix(state) => state.encoded_size(),
            Self::Capella(state) => state.encoded_size(),
        }
    }
}

impl<P: Preset> SszHash for BeaconState<P> {
    type PackingFactor = U1;

    fn hash_tree_root(&self) -> Result<H256, MerkleError> {
        match self {
            Self::Phase0(state) => state.hash_tree_root(),
            Self::Altair(state) => state.hash_tree_root(),
            Self::Bellatrix(state) => state.hash_tree_root(),
            Self::Capella(state) => state.hash_tree_root(),
        }
    }
}

impl<P: Preset> BeaconState<P> {
    #[must_use]
    pub const fn phase(&self) -> Phase {
        match self {
            Self::Phase0(_) => Phase::Phase0,
            Self::Altair(_) => Phase::Altair,
            Self::Bellatrix(_) => Phase::Bellatrix,
            Self::Capella(_) => Phase::Capella,
        }
    }

    #[must_use]
    pub const fn slot(&self) -> Slot {
        match self {
            Self::Phase0(state) => state.slot,
            Self::Altair(state) => state.slot,
            Self::Bellatrix(state) => state.slot,
            Self::Capella(state) => state.slot,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, From)]
pub enum ExecutionPayloadHeader<P: Preset> {
    Bellatrix(BellatrixExecutionPayloadHeader<P>),
    Capella(CapellaExecutionPayloadHeader<P>),
}

impl<P: Preset> ExecutionPayloadHeader<P> {
    #[must_use]
    pub const fn phase(&self) -> Phase {
        match self {
            Self::Bellatrix(_) => Phase::Bellatrix,
            Self::Capella(_) => Phase::Capella,
        }
    }

    pub fn hash_tree_root(&self) -> Result<H256, MerkleError> {
        match self {
            Self::Bellatrix(header) => header.hash_tree_root(),
            Self::Capella(header) => header.hash_tree_root(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::preset::Minimal;

    use super::*;

    #[test]
    fn decoding_picks_layout_from_slot() -> Result<(), ReadError> {
        let config = Config::minimal().upgrade_once(Phase::Altair, 1);

        let phase0 = BeaconState::<Minimal>::Phase0(Phase0BeaconState {
            slot: 7,
            ..Phase0BeaconState::default()
        });

        let altair = BeaconState::<Minimal>::Altair(AltairBeaconState {
            slot: 8,
            ..AltairBeaconState::default()
        });

        for state in [phase0, altair] {
            let bytes = state.to_ssz().expect("offsets fit in 4 bytes");
            let decoded = BeaconState::<Minimal>::from_ssz(&config, &bytes)?;

            assert_eq!(decoded.phase(), state.phase());
            assert_eq!(decoded, state);
        }

        Ok(())
    }

    #[test]
    fn slot_is_read_after_genesis_fields() {
        let state = BeaconState::<Minimal>::Phase0(Phase0BeaconState {
            genesis_time: 1,
            slot: 3,
            ..Phase0BeaconState::default()
        });

        let bytes = state.to_ssz().expect("offsets fit in 4 bytes");

        assert_eq!(&bytes[40..48], &3_u64.to_le_bytes());
        assert_eq!(state.encoded_size(), bytes.len());
    }

    #[test]
    fn truncated_state_is_rejected() {
        let config = Config::minimal();

        assert!(matches!(
            BeaconState::<Minimal>::from_ssz(&config, [0; 20]),
            Err(ReadError::OffsetsNotValidSubsliceBounds { .. } | ReadError::BufferTooShort { .. }),
        ));
    }
}
