use ssz::{MerkleError, PushError, ReadError, WriteError};
use thiserror::Error;
use types::{
    nonstandard::Phase,
    phase0::primitives::{Slot, ValidatorIndex},
};

#[derive(Debug, Error)]
pub enum Error {
    #[error("slot {slot} has not happened yet (state is at slot {state_slot})")]
    FutureSlot { slot: Slot, state_slot: Slot },
    #[error("slot {slot} is no longer in the history of a state at slot {state_slot}")]
    SlotOutOfRange { slot: Slot, state_slot: Slot },
    #[error("validator index {index} is out of bounds")]
    ValidatorIndexOutOfBounds { index: ValidatorIndex },
    #[error("{field} is not present in {phase} state")]
    FieldNotInPhase { field: &'static str, phase: Phase },
    #[error("{value_phase} value cannot be stored in {state_phase} state")]
    PhaseMismatch {
        state_phase: Phase,
        value_phase: Phase,
    },
    #[error(transparent)]
    Helper(#[from] helper_functions::error::Error),
    #[error(transparent)]
    Merkle(#[from] MerkleError),
    #[error(transparent)]
    Push(#[from] PushError),
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error(transparent)]
    Write(#[from] WriteError),
}
