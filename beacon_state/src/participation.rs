use log::debug;
use types::{
    nonstandard::Phase,
    phase0::{
        consts::GENESIS_SLOT,
        containers::{IncludedAttestation, PendingAttestation},
    },
    preset::Preset,
};

use crate::{beacon_state::BeaconState, error::Error};

/// Sets the phase 0 attester flags of every validator from the pending attestations in `state`.
///
/// Only meaningful right after a state is loaded. Later epochs update the flags as attestations
/// are processed.
pub fn initialize_from_pending_attestations<P: Preset>(
    state: &mut BeaconState<P>,
) -> Result<(), Error> {
    if state.phase() != Phase::Phase0 || state.slot() == GENESIS_SLOT {
        return Ok(());
    }

    let previous_attestations = state.previous_epoch_attestations()?.clone();
    let current_attestations = state.current_epoch_attestations()?.clone();

    let previous_target_root = state.block_root_at_epoch(state.previous_epoch())?;

    for attestation in previous_attestations.iter() {
        let head_root = state.block_root_at_slot(attestation.data.slot)?;
        let target_matches = attestation.data.target.root == previous_target_root;
        let head_matches = target_matches && attestation.data.beacon_block_root == head_root;

        for index in state.attesting_indices(&attestation.data, &attestation.aggregation_bits)? {
            let validator = state.validator_bookkeeping_mut(index)?;

            validator.is_previous_matching_source_attester = true;
            validator.is_previous_matching_target_attester |= target_matches;
            validator.is_previous_matching_head_attester |= head_matches;

            keep_earliest_inclusion(
                &mut validator.min_previous_inclusion_delay_attestation,
                attestation,
            );
        }
    }

    // The start of the current epoch has no block root yet while the epoch has no attestations.
    if !current_attestations.is_empty() {
        let current_target_root = state.block_root_at_epoch(state.current_epoch())?;

        for attestation in current_attestations.iter() {
            let head_root = state.block_root_at_slot(attestation.data.slot)?;
            let target_matches = attestation.data.target.root == current_target_root;
            let head_matches = attestation.data.beacon_block_root == head_root;

            for index in
                state.attesting_indices(&attestation.data, &attestation.aggregation_bits)?
            {
                let validator = state.validator_bookkeeping_mut(index)?;

                validator.is_current_matching_source_attester = true;
                validator.is_current_matching_target_attester |= target_matches;
                validator.is_current_matching_head_attester |= head_matches;

                keep_earliest_inclusion(
                    &mut validator.min_current_inclusion_delay_attestation,
                    attestation,
                );
            }
        }
    }

    debug!(
        "initialized attester flags from {} previous and {} current epoch attestations",
        previous_attestations.len(),
        current_attestations.len(),
    );

    Ok(())
}

fn keep_earliest_inclusion<P: Preset>(
    earliest: &mut Option<IncludedAttestation>,
    attestation: &PendingAttestation<P>,
) {
    if earliest.is_none_or(|included| attestation.inclusion_delay < included.inclusion_delay) {
        *earliest = Some(attestation.into());
    }
}
