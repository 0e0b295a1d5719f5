use bls::{PublicKeyBytes, SignatureBytes};
use ssz::{BitList, Ssz};

use crate::{
    phase0::primitives::{
        CommitteeIndex, DepositIndex, Epoch, ExecutionBlockHash, Gwei, Slot, ValidatorIndex,
        Version, H256,
    },
    preset::Preset,
};

// Signatures and public keys are kept compressed. Nothing in this crate verifies them.

#[derive(Clone, PartialEq, Eq, Debug, Ssz)]
pub struct AggregateAndProof<P: Preset> {
    pub aggregator_index: ValidatorIndex,
    pub aggregate: Attestation<P>,
    pub selection_proof: SignatureBytes,
}

#[derive(Clone, PartialEq, Eq, Default, Debug, Ssz)]
pub struct Attestation<P: Preset> {
    pub aggregation_bits: BitList<P::MaxValidatorsPerCommittee>,
    pub data: AttestationData,
    pub signature: SignatureBytes,
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug, Ssz)]
pub struct AttestationData {
    pub slot: Slot,
    pub index: CommitteeIndex,
    pub beacon_block_root: H256,
    pub source: Checkpoint,
    pub target: Checkpoint,
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Ssz)]
pub struct BeaconBlockHeader {
    pub slot: Slot,
    pub proposer_index: ValidatorIndex,
    pub parent_root: H256,
    pub state_root: H256,
    pub body_root: H256,
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug, Ssz)]
pub struct Checkpoint {
    pub epoch: Epoch,
    pub root: H256,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug, Ssz)]
pub struct Eth1Data {
    pub deposit_root: H256,
    pub deposit_count: DepositIndex,
    pub block_hash: ExecutionBlockHash,
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Ssz)]
pub struct Fork {
    pub previous_version: Version,
    pub current_version: Version,
    pub epoch: Epoch,
}

#[derive(Clone, PartialEq, Eq, Default, Debug, Ssz)]
pub struct PendingAttestation<P: Preset> {
    pub aggregation_bits: BitList<P::MaxValidatorsPerCommittee>,
    pub data: AttestationData,
    pub inclusion_delay: u64,
    pub proposer_index: ValidatorIndex,
}

#[derive(Clone, PartialEq, Eq, Debug, Ssz)]
pub struct SignedAggregateAndProof<P: Preset> {
    pub message: AggregateAndProof<P>,
    pub signature: SignatureBytes,
}

/// Registry entry of a validator.
///
/// The fields after `withdrawable_epoch` are bookkeeping for phase 0 reward computation.
/// They are derived from pending attestations and are neither encoded nor hashed.
#[derive(Clone, PartialEq, Eq, Default, Debug, Ssz)]
pub struct Validator {
    pub pubkey: PublicKeyBytes,
    pub withdrawal_credentials: H256,
    pub effective_balance: Gwei,
    pub slashed: bool,
    pub activation_eligibility_epoch: Epoch,
    pub activation_epoch: Epoch,
    pub exit_epoch: Epoch,
    pub withdrawable_epoch: Epoch,

    #[ssz(skip)]
    pub is_previous_matching_source_attester: bool,
    #[ssz(skip)]
    pub is_previous_matching_target_attester: bool,
    #[ssz(skip)]
    pub is_previous_matching_head_attester: bool,
    #[ssz(skip)]
    pub is_current_matching_source_attester: bool,
    #[ssz(skip)]
    pub is_current_matching_target_attester: bool,
    #[ssz(skip)]
    pub is_current_matching_head_attester: bool,
    #[ssz(skip)]
    pub min_previous_inclusion_delay_attestation: Option<IncludedAttestation>,
    #[ssz(skip)]
    pub min_current_inclusion_delay_attestation: Option<IncludedAttestation>,
}

/// The parts of a [`PendingAttestation`] needed after its aggregation bits have been resolved.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct IncludedAttestation {
    pub data: AttestationData,
    pub inclusion_delay: u64,
    pub proposer_index: ValidatorIndex,
}
