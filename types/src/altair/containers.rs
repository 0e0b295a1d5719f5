use bls::{PublicKeyBytes, SignatureBytes};
use ssz::{BitVector, ContiguousVector, Ssz};

use crate::preset::Preset;

#[derive(Clone, PartialEq, Eq, Default, Debug, Ssz)]
pub struct SyncAggregate<P: Preset> {
    pub sync_committee_bits: BitVector<P::SyncCommitteeSize>,
    pub sync_committee_signature: SignatureBytes,
}

#[derive(Clone, PartialEq, Eq, Default, Debug, Ssz)]
pub struct SyncCommittee<P: Preset> {
    pub pubkeys: ContiguousVector<PublicKeyBytes, P::SyncCommitteeSize>,
    pub aggregate_pubkey: PublicKeyBytes,
}
