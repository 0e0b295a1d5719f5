use crate::phase0::{
    containers::{BeaconBlockHeader, IncludedAttestation, PendingAttestation, Validator},
    primitives::{Epoch, H256},
};

impl Validator {
    /// Number of phase 0 duties (source, target, head) performed and missed in the previous
    /// epoch. Slashed validators are considered to have missed all of them.
    #[must_use]
    pub fn duties_attested(&self) -> (u64, u64) {
        if self.slashed {
            return (0, 3);
        }

        let attested = [
            self.is_previous_matching_source_attester,
            self.is_previous_matching_target_attester,
            self.is_previous_matching_head_attester,
        ]
        .into_iter()
        .map(u64::from)
        .sum::<u64>();

        (attested, 3 - attested)
    }

    #[must_use]
    pub const fn is_active_at(&self, epoch: Epoch) -> bool {
        self.activation_epoch <= epoch && epoch < self.exit_epoch
    }

    #[must_use]
    pub const fn is_slashable_at(&self, epoch: Epoch) -> bool {
        !self.slashed && self.activation_epoch <= epoch && epoch < self.withdrawable_epoch
    }
}

impl<P: crate::preset::Preset> From<&PendingAttestation<P>> for IncludedAttestation {
    fn from(attestation: &PendingAttestation<P>) -> Self {
        Self {
            data: attestation.data,
            inclusion_delay: attestation.inclusion_delay,
            proposer_index: attestation.proposer_index,
        }
    }
}

impl BeaconBlockHeader {
    #[inline]
    #[must_use]
    pub const fn with_state_root(self, state_root: H256) -> Self {
        Self { state_root, ..self }
    }
}

#[cfg(test)]
mod tests {
    use bls::{PublicKeyBytes, SignatureBytes};
    use hex_literal::hex;
    use ssz::{
        BitList, MerkleError, ReadError, Size, SszHash as _, SszReadDefault as _, SszSize as _,
        SszWrite as _,
    };
    use test_case::test_case;

    use crate::{
        phase0::{
            consts::FAR_FUTURE_EPOCH,
            containers::{
                AggregateAndProof, Attestation, AttestationData, Checkpoint,
                SignedAggregateAndProof,
            },
        },
        preset::{Mainnet, Minimal},
    };

    use super::*;

    fn validator_with_effective_balance() -> Validator {
        Validator {
            effective_balance: 32_000_000_000,
            slashed: false,
            ..Validator::default()
        }
    }

    #[test]
    fn validator_has_fixed_layout_of_121_bytes() -> Result<(), ReadError> {
        let validator = validator_with_effective_balance();
        let bytes = validator.to_ssz().expect("validators have no offsets");

        assert_eq!(Validator::SIZE, Size::Fixed { size: 121 });
        assert_eq!(validator.encoded_size(), 121);
        assert_eq!(bytes.len(), 121);
        assert_eq!(&bytes[80..88], &32_000_000_000_u64.to_le_bytes());
        assert_eq!(bytes[88], 0);

        let decoded = Validator::from_ssz_default(&bytes)?;

        assert_eq!(decoded, validator);
        assert_eq!(decoded.duties_attested(), (0, 3));

        Ok(())
    }

    #[test]
    fn validator_fields_are_laid_out_in_declaration_order() {
        let validator = Validator {
            pubkey: PublicKeyBytes::repeat_byte(0xaa),
            withdrawal_credentials: H256::repeat_byte(0xbb),
            effective_balance: 1,
            slashed: true,
            activation_eligibility_epoch: 2,
            activation_epoch: 3,
            exit_epoch: 4,
            withdrawable_epoch: 5,
            ..Validator::default()
        };

        let bytes = validator.to_ssz().expect("validators have no offsets");

        assert_eq!(&bytes[..48], &[0xaa; 48]);
        assert_eq!(&bytes[48..80], &[0xbb; 32]);
        assert_eq!(bytes[88], 1);
        assert_eq!(bytes[89], 2);
        assert_eq!(bytes[97], 3);
        assert_eq!(bytes[105], 4);
        assert_eq!(bytes[113], 5);
    }

    #[test]
    fn truncated_validator_is_rejected() {
        assert_eq!(
            Validator::from_ssz_default([0; 120]),
            Err(ReadError::BufferTooShort {
                expected: 121,
                actual: 120,
            }),
        );
    }

    #[test]
    fn validator_root_ignores_bookkeeping() -> Result<(), MerkleError> {
        let plain = validator_with_effective_balance();

        let annotated = Validator {
            is_previous_matching_source_attester: true,
            min_current_inclusion_delay_attestation: Some(IncludedAttestation {
                data: AttestationData::default(),
                inclusion_delay: 1,
                proposer_index: 7,
            }),
            ..plain.clone()
        };

        assert_eq!(plain.hash_tree_root()?, annotated.hash_tree_root()?);

        Ok(())
    }

    #[test]
    fn every_consensus_field_of_validator_affects_root() -> Result<(), MerkleError> {
        let base = validator_with_effective_balance();
        let root = base.hash_tree_root()?;

        let variants = [
            Validator {
                pubkey: PublicKeyBytes::repeat_byte(1),
                ..base.clone()
            },
            Validator {
                withdrawal_credentials: H256::repeat_byte(1),
                ..base.clone()
            },
            Validator {
                effective_balance: 1,
                ..base.clone()
            },
            Validator {
                slashed: true,
                ..base.clone()
            },
            Validator {
                activation_eligibility_epoch: 1,
                ..base.clone()
            },
            Validator {
                activation_epoch: 1,
                ..base.clone()
            },
            Validator {
                exit_epoch: 1,
                ..base.clone()
            },
            Validator {
                withdrawable_epoch: 1,
                ..base.clone()
            },
        ];

        for variant in variants {
            assert_ne!(variant.hash_tree_root()?, root);
        }

        Ok(())
    }

    #[test_case(false, false, false, false => (0, 3))]
    #[test_case(false, true, false, false => (1, 2))]
    #[test_case(false, true, true, true => (3, 0))]
    #[test_case(true, true, true, true => (0, 3))]
    fn duties_attested(slashed: bool, source: bool, target: bool, head: bool) -> (u64, u64) {
        Validator {
            slashed,
            is_previous_matching_source_attester: source,
            is_previous_matching_target_attester: target,
            is_previous_matching_head_attester: head,
            ..Validator::default()
        }
        .duties_attested()
    }

    #[test]
    fn activity_window_excludes_exit_epoch() {
        let validator = Validator {
            activation_epoch: 2,
            exit_epoch: 5,
            withdrawable_epoch: FAR_FUTURE_EPOCH,
            ..Validator::default()
        };

        assert!(!validator.is_active_at(1));
        assert!(validator.is_active_at(2));
        assert!(validator.is_active_at(4));
        assert!(!validator.is_active_at(5));
        assert!(validator.is_slashable_at(5));
    }

    fn attestation_with_bits(length: usize) -> Attestation<Minimal> {
        let mut aggregation_bits = BitList::with_length(length).expect("length is within limit");
        aggregation_bits.set(0, true).expect("length is at least 1");

        Attestation {
            aggregation_bits,
            data: AttestationData {
                slot: 9,
                index: 1,
                beacon_block_root: H256::repeat_byte(3),
                source: Checkpoint::default(),
                target: Checkpoint {
                    epoch: 1,
                    root: H256::repeat_byte(4),
                },
            },
            signature: SignatureBytes::repeat_byte(5),
        }
    }

    #[test]
    fn attestation_data_is_128_bytes() {
        assert_eq!(AttestationData::SIZE, Size::Fixed { size: 128 });
    }

    #[test]
    fn pending_attestation_places_bits_after_fixed_part() -> Result<(), ReadError> {
        let Attestation {
            aggregation_bits,
            data,
            ..
        } = attestation_with_bits(5);

        let pending = PendingAttestation {
            aggregation_bits,
            data,
            inclusion_delay: 2,
            proposer_index: 0x0304,
        };

        let bytes = pending.to_ssz().expect("offsets fit in 4 bytes");

        assert_eq!(
            PendingAttestation::<Minimal>::SIZE,
            Size::Variable { minimum_size: 149 },
        );
        assert_eq!(&bytes[..4], &148_u32.to_le_bytes());
        assert_eq!(&bytes[4..12], &9_u64.to_le_bytes());
        assert_eq!(&bytes[132..140], &2_u64.to_le_bytes());
        assert_eq!(&bytes[140..148], &hex!("0403000000000000"));
        assert_eq!(bytes[148..], [0b10_0001]);
        assert_eq!(pending.encoded_size(), bytes.len());
        assert_eq!(
            PendingAttestation::<Minimal>::from_ssz_default(&bytes)?,
            pending,
        );

        Ok(())
    }

    #[test]
    fn aggregate_and_proof_places_attestation_after_fixed_part() -> Result<(), ReadError> {
        let aggregate_and_proof = AggregateAndProof {
            aggregator_index: 0x0102,
            aggregate: attestation_with_bits(3),
            selection_proof: SignatureBytes::repeat_byte(6),
        };

        let bytes = aggregate_and_proof.to_ssz().expect("offsets fit in 4 bytes");
        let attestation_bytes = aggregate_and_proof
            .aggregate
            .to_ssz()
            .expect("offsets fit in 4 bytes");

        assert_eq!(&bytes[..8], &hex!("0201000000000000"));
        assert_eq!(&bytes[8..12], &108_u32.to_le_bytes());
        assert_eq!(&bytes[12..108], &[6; 96]);
        assert_eq!(&bytes[108..], attestation_bytes.as_slice());
        assert_eq!(aggregate_and_proof.encoded_size(), bytes.len());

        // The bit list follows the 228-byte fixed part of the attestation.
        assert_eq!(&attestation_bytes[..4], &228_u32.to_le_bytes());
        assert_eq!(attestation_bytes[228..], [0b1001]);

        assert_eq!(
            AggregateAndProof::<Minimal>::from_ssz_default(&bytes)?,
            aggregate_and_proof,
        );

        Ok(())
    }

    #[test]
    fn signed_aggregate_and_proof_offset_is_100() -> Result<(), ReadError> {
        let signed = SignedAggregateAndProof {
            message: AggregateAndProof {
                aggregator_index: 1,
                aggregate: attestation_with_bits(8),
                selection_proof: SignatureBytes::empty(),
            },
            signature: SignatureBytes::repeat_byte(7),
        };

        let bytes = signed.to_ssz().expect("offsets fit in 4 bytes");

        assert_eq!(&bytes[..4], &100_u32.to_le_bytes());
        assert_eq!(&bytes[4..100], &[7; 96]);
        assert_eq!(
            SignedAggregateAndProof::<Minimal>::from_ssz_default(&bytes)?,
            signed,
        );

        Ok(())
    }

    #[test]
    fn attestation_with_offset_past_fixed_part_is_rejected() {
        let attestation = attestation_with_bits(16);

        let mut bytes = attestation.to_ssz().expect("offsets fit in 4 bytes");
        assert_eq!(bytes.len(), 231);

        // The bytes after the new offset still form a valid bit list.
        bytes[..4].copy_from_slice(&229_u32.to_le_bytes());

        assert_eq!(
            Attestation::<Minimal>::from_ssz_default(&bytes),
            Err(ReadError::ContainerFirstOffsetMismatch {
                expected: 228,
                actual: 229,
            }),
        );
    }

    #[test]
    fn aggregate_and_proof_root_pads_three_fields_to_four_leaves() -> Result<(), MerkleError> {
        let aggregate_and_proof = AggregateAndProof {
            aggregator_index: 3,
            aggregate: attestation_with_bits(2),
            selection_proof: SignatureBytes::repeat_byte(1),
        };

        let leaves = [
            ssz::uint64_root(3),
            aggregate_and_proof.aggregate.hash_tree_root()?,
            aggregate_and_proof.selection_proof.hash_tree_root()?,
            H256::zero(),
        ]
        .into_iter()
        .flat_map(|leaf| leaf.0)
        .collect::<Vec<_>>();

        let expected = ssz::merkle_root(&leaves)?;

        assert_eq!(aggregate_and_proof.hash_tree_root()?, expected);

        Ok(())
    }

    #[test]
    fn signed_aggregate_and_proof_root_is_pair_of_child_roots() -> Result<(), MerkleError> {
        let signed = SignedAggregateAndProof::<Mainnet> {
            message: AggregateAndProof {
                aggregator_index: 0,
                aggregate: Attestation::default(),
                selection_proof: SignatureBytes::zero(),
            },
            signature: SignatureBytes::zero(),
        };

        assert_eq!(
            signed.hash_tree_root()?,
            ssz::hashing::hash_256_256(
                signed.message.hash_tree_root()?,
                signed.signature.hash_tree_root()?,
            ),
        );

        Ok(())
    }
}
