use std::sync::Arc;

use bls::PublicKeyBytes;
use enumset::EnumSet;
use helper_functions::{accessors, error::Error as HelperError, misc};
use log::debug;
use ssz::{BitList, BitVector, MerkleError, SszHash as _, SszRead as _, SszWrite as _};
use typenum::Unsigned as _;
use types::{
    altair::containers::SyncCommittee,
    capella::primitives::WithdrawalIndex,
    collections::{
        Attestations, Balances, EpochParticipation, Eth1DataVotes, HistoricalRoots,
        HistoricalSummaries, InactivityScores, RandaoMixes, RecentRoots, Slashings, Validators,
    },
    combined::{BeaconState as CombinedState, ExecutionPayloadHeader},
    config::Config,
    nonstandard::Phase,
    phase0::{
        consts::{JustificationBitsLength, DOMAIN_BEACON_ATTESTER, DOMAIN_BEACON_PROPOSER},
        containers::{AttestationData, BeaconBlockHeader, Checkpoint, Eth1Data, Fork, Validator},
        primitives::{
            DepositIndex, DomainType, Epoch, Gwei, Slot, UnixSeconds, ValidatorIndex, H256,
        },
    },
    preset::Preset,
};

use crate::{
    cache::{Caches, CommitteeKey, TotalActiveBalance},
    error::Error,
    leaf_index::{StateLeafIndex, STATE_LEAF_CAPACITY},
    participation,
};

macro_rules! any_phase {
    ($fields:expr, $state:ident => $body:expr) => {
        match $fields {
            CombinedState::Phase0($state) => $body,
            CombinedState::Altair($state) => $body,
            CombinedState::Bellatrix($state) => $body,
            CombinedState::Capella($state) => $body,
        }
    };
}

// Fields missing from a phase hash to a zero chunk, the same as padding.
macro_rules! leaf_in {
    ($fields:expr, [$($variant:ident),+], $state:ident => $body:expr) => {
        match $fields {
            $(CombinedState::$variant($state) => $body,)+
            _ => Ok(H256::zero()),
        }
    };
}

macro_rules! common_scalars {
    ($($field:ident, $setter:ident: $type:ty => $leaf:ident;)*) => {
        $(
            #[must_use]
            pub const fn $field(&self) -> $type {
                any_phase!(&self.fields, state => state.$field)
            }

            pub fn $setter(&mut self, value: $type) {
                self.dirty_leaves.insert(StateLeafIndex::$leaf);
                any_phase!(&mut self.fields, state => state.$field = value);
            }
        )*
    };
}

macro_rules! common_fields {
    ($($field:ident, $field_mut:ident: $type:ty => $leaf:ident;)*) => {
        $(
            #[must_use]
            pub const fn $field(&self) -> &$type {
                any_phase!(&self.fields, state => &state.$field)
            }

            pub fn $field_mut(&mut self) -> &mut $type {
                self.dirty_leaves.insert(StateLeafIndex::$leaf);
                any_phase!(&mut self.fields, state => &mut state.$field)
            }
        )*
    };
}

macro_rules! gated_fields {
    ($($field:ident, $field_mut:ident: $type:ty => $leaf:ident in [$($variant:ident),+];)*) => {
        $(
            pub fn $field(&self) -> Result<&$type, Error> {
                match &self.fields {
                    $(CombinedState::$variant(state) => Ok(&state.$field),)+
                    _ => Err(Error::FieldNotInPhase {
                        field: stringify!($field),
                        phase: self.phase(),
                    }),
                }
            }

            pub fn $field_mut(&mut self) -> Result<&mut $type, Error> {
                let phase = self.phase();

                match &mut self.fields {
                    $(
                        CombinedState::$variant(state) => {
                            self.dirty_leaves.insert(StateLeafIndex::$leaf);
                            Ok(&mut state.$field)
                        }
                    )+
                    _ => Err(Error::FieldNotInPhase {
                        field: stringify!($field),
                        phase,
                    }),
                }
            }
        )*
    };
}

/// Beacon state of any phase together with its cached Merkle leaves and derived values.
///
/// Every mutator marks the leaf of the field it hands out as dirty and drops the derived values
/// that depend on it. [`BeaconState::hash_tree_root`] only rehashes dirty leaves.
#[derive(Clone, Debug)]
pub struct BeaconState<P: Preset> {
    config: Arc<Config>,
    fields: CombinedState<P>,
    dirty_leaves: EnumSet<StateLeafIndex>,
    leaves: [H256; STATE_LEAF_CAPACITY],
    previous_state_root: Option<H256>,
    caches: Caches,
}

impl<P: Preset> BeaconState<P> {
    /// Wraps `fields` and initializes the derived values.
    ///
    /// All leaves start out dirty. Phase 0 states also get their attester bookkeeping
    /// rebuilt from pending attestations.
    pub fn new(config: Arc<Config>, fields: impl Into<CombinedState<P>>) -> Result<Self, Error> {
        let fields = fields.into();
        let phase = fields.phase();

        let mut state = Self {
            config,
            fields,
            dirty_leaves: StateLeafIndex::all_in(phase),
            leaves: [H256::zero(); STATE_LEAF_CAPACITY],
            previous_state_root: None,
            caches: Caches::default(),
        };

        state.refresh_proposer_index()?;
        state.initialize_participation_from_pending_attestations()?;

        debug!(
            "initialized beacon state (phase: {phase}, slot: {}, validators: {})",
            state.slot(),
            state.validators().len(),
        );

        Ok(state)
    }

    /// Decodes a state whose layout is determined by the phase its slot falls in.
    pub fn from_ssz(config: Arc<Config>, bytes: impl AsRef<[u8]>) -> Result<Self, Error> {
        let fields = CombinedState::from_ssz(&*config, bytes)?;
        Self::new(config, fields)
    }

    pub fn to_ssz(&self) -> Result<Vec<u8>, Error> {
        self.fields.to_ssz().map_err(Into::into)
    }

    /// Produces an independent state. Caches and dirty leaves are copied as they are.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Overwrites `target` with a copy of `self`, reusing its allocations where possible.
    pub fn copy_into(&self, target: &mut Self) {
        target.clone_from(self);
    }

    #[must_use]
    pub const fn config(&self) -> &Arc<Config> {
        &self.config
    }

    #[must_use]
    pub const fn fields(&self) -> &CombinedState<P> {
        &self.fields
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.fields.phase()
    }

    #[must_use]
    pub const fn dirty_leaves(&self) -> EnumSet<StateLeafIndex> {
        self.dirty_leaves
    }

    /// Root computed by the last call to [`BeaconState::hash_tree_root`].
    #[must_use]
    pub const fn previous_state_root(&self) -> Option<H256> {
        self.previous_state_root
    }

    // > Accessors and mutators

    common_scalars! {
        genesis_time, set_genesis_time: UnixSeconds => GenesisTime;
        genesis_validators_root, set_genesis_validators_root: H256 => GenesisValidatorsRoot;
        eth1_deposit_index, set_eth1_deposit_index: DepositIndex => Eth1DepositIndex;
    }

    common_fields! {
        fork, fork_mut:
            Fork => Fork;
        latest_block_header, latest_block_header_mut:
            BeaconBlockHeader => LatestBlockHeader;
        block_roots, block_roots_mut:
            RecentRoots<P> => BlockRoots;
        state_roots, state_roots_mut:
            RecentRoots<P> => StateRoots;
        historical_roots, historical_roots_mut:
            HistoricalRoots<P> => HistoricalRoots;
        eth1_data, eth1_data_mut:
            Eth1Data => Eth1Data;
        eth1_data_votes, eth1_data_votes_mut:
            Eth1DataVotes<P> => Eth1DataVotes;
        balances, balances_mut:
            Balances<P> => Balances;
        slashings, slashings_mut:
            Slashings<P> => Slashings;
        justification_bits, justification_bits_mut:
            BitVector<JustificationBitsLength> => JustificationBits;
        previous_justified_checkpoint, previous_justified_checkpoint_mut:
            Checkpoint => PreviousJustifiedCheckpoint;
        current_justified_checkpoint, current_justified_checkpoint_mut:
            Checkpoint => CurrentJustifiedCheckpoint;
        finalized_checkpoint, finalized_checkpoint_mut:
            Checkpoint => FinalizedCheckpoint;
    }

    gated_fields! {
        previous_epoch_attestations, previous_epoch_attestations_mut:
            Attestations<P> => PreviousEpochParticipation in [Phase0];
        current_epoch_attestations, current_epoch_attestations_mut:
            Attestations<P> => CurrentEpochParticipation in [Phase0];
        previous_epoch_participation, previous_epoch_participation_mut:
            EpochParticipation<P> => PreviousEpochParticipation in [Altair, Bellatrix, Capella];
        current_epoch_participation, current_epoch_participation_mut:
            EpochParticipation<P> => CurrentEpochParticipation in [Altair, Bellatrix, Capella];
        inactivity_scores, inactivity_scores_mut:
            InactivityScores<P> => InactivityScores in [Altair, Bellatrix, Capella];
        current_sync_committee, current_sync_committee_mut:
            SyncCommittee<P> => CurrentSyncCommittee in [Altair, Bellatrix, Capella];
        next_sync_committee, next_sync_committee_mut:
            SyncCommittee<P> => NextSyncCommittee in [Altair, Bellatrix, Capella];
        next_withdrawal_index, next_withdrawal_index_mut:
            WithdrawalIndex => NextWithdrawalIndex in [Capella];
        next_withdrawal_validator_index, next_withdrawal_validator_index_mut:
            ValidatorIndex => NextWithdrawalValidatorIndex in [Capella];
        historical_summaries, historical_summaries_mut:
            HistoricalSummaries<P> => HistoricalSummaries in [Capella];
    }

    #[must_use]
    pub const fn slot(&self) -> Slot {
        self.fields.slot()
    }

    /// Moves the state to `slot`. The proposer index has to be refreshed afterwards.
    pub fn set_slot(&mut self, slot: Slot) {
        self.dirty_leaves.insert(StateLeafIndex::Slot);
        self.caches.advance_slot();
        any_phase!(&mut self.fields, state => state.slot = slot);
    }

    #[must_use]
    pub const fn validators(&self) -> &Validators<P> {
        any_phase!(&self.fields, state => &state.validators)
    }

    /// Hands out the registry for modification and drops everything derived from it.
    pub fn validators_mut(&mut self) -> &mut Validators<P> {
        self.dirty_leaves.insert(StateLeafIndex::Validators);
        self.caches.invalidate_registry();
        any_phase!(&mut self.fields, state => &mut state.validators)
    }

    pub fn validator(&self, index: ValidatorIndex) -> Result<&Validator, Error> {
        usize::try_from(index)
            .ok()
            .and_then(|position| self.validators().get(position))
            .ok_or(Error::ValidatorIndexOutOfBounds { index })
    }

    // Bookkeeping flags are neither encoded nor hashed, so changing them touches no leaf or cache.
    pub(crate) fn validator_bookkeeping_mut(
        &mut self,
        index: ValidatorIndex,
    ) -> Result<&mut Validator, Error> {
        let validators = any_phase!(&mut self.fields, state => &mut state.validators);

        usize::try_from(index)
            .ok()
            .and_then(|position| validators.get_mut(position))
            .ok_or(Error::ValidatorIndexOutOfBounds { index })
    }

    #[must_use]
    pub const fn randao_mixes(&self) -> &RandaoMixes<P> {
        any_phase!(&self.fields, state => &state.randao_mixes)
    }

    pub fn randao_mixes_mut(&mut self) -> &mut RandaoMixes<P> {
        self.dirty_leaves.insert(StateLeafIndex::RandaoMixes);
        self.caches.invalidate_randomness();
        any_phase!(&mut self.fields, state => &mut state.randao_mixes)
    }

    pub fn latest_execution_payload_header(&self) -> Result<ExecutionPayloadHeader<P>, Error> {
        let header = match &self.fields {
            CombinedState::Bellatrix(state) => state.latest_execution_payload_header.clone().into(),
            CombinedState::Capella(state) => state.latest_execution_payload_header.clone().into(),
            CombinedState::Phase0(_) | CombinedState::Altair(_) => {
                return Err(Error::FieldNotInPhase {
                    field: "latest_execution_payload_header",
                    phase: self.phase(),
                })
            }
        };

        Ok(header)
    }

    pub fn set_latest_execution_payload_header(
        &mut self,
        header: impl Into<ExecutionPayloadHeader<P>>,
    ) -> Result<(), Error> {
        let state_phase = self.phase();

        match (&mut self.fields, header.into()) {
            (CombinedState::Bellatrix(state), ExecutionPayloadHeader::Bellatrix(header)) => {
                state.latest_execution_payload_header = header;
            }
            (CombinedState::Capella(state), ExecutionPayloadHeader::Capella(header)) => {
                state.latest_execution_payload_header = header;
            }
            (CombinedState::Phase0(_) | CombinedState::Altair(_), _) => {
                return Err(Error::FieldNotInPhase {
                    field: "latest_execution_payload_header",
                    phase: state_phase,
                });
            }
            (_, header) => {
                return Err(Error::PhaseMismatch {
                    state_phase,
                    value_phase: header.phase(),
                });
            }
        }

        self.dirty_leaves.insert(StateLeafIndex::LatestExecutionPayloadHeader);

        Ok(())
    }

    // > History

    pub fn block_root_at_slot(&self, slot: Slot) -> Result<H256, Error> {
        self.ensure_root_retained(slot)?;
        Ok(*self.block_roots().mod_index(slot))
    }

    pub fn state_root_at_slot(&self, slot: Slot) -> Result<H256, Error> {
        self.ensure_root_retained(slot)?;
        Ok(*self.state_roots().mod_index(slot))
    }

    pub fn block_root_at_epoch(&self, epoch: Epoch) -> Result<H256, Error> {
        self.block_root_at_slot(misc::compute_start_slot_at_epoch::<P>(epoch))
    }

    fn ensure_root_retained(&self, slot: Slot) -> Result<(), Error> {
        let state_slot = self.slot();

        if slot >= state_slot {
            return Err(Error::FutureSlot { slot, state_slot });
        }

        if state_slot - slot > P::SlotsPerHistoricalRoot::U64 {
            return Err(Error::SlotOutOfRange { slot, state_slot });
        }

        Ok(())
    }

    // > Randomness and committees

    #[must_use]
    pub fn current_epoch(&self) -> Epoch {
        misc::compute_epoch_at_slot::<P>(self.slot())
    }

    #[must_use]
    pub fn previous_epoch(&self) -> Epoch {
        misc::previous_epoch(self.current_epoch())
    }

    #[must_use]
    pub fn randao_mix(&self, epoch: Epoch) -> H256 {
        *self.randao_mixes().mod_index(epoch)
    }

    #[must_use]
    pub fn seed(&self, epoch: Epoch, domain_type: DomainType) -> H256 {
        let mix = self.randao_mix(misc::seed_mix_epoch::<P>(epoch));
        misc::compute_seed(domain_type, epoch, mix)
    }

    /// Indices of validators active at `epoch`, in registry order.
    pub fn active_validator_indices(&mut self, epoch: Epoch) -> Arc<[ValidatorIndex]> {
        if let Some(indices) = self.caches.active_indices.get(&epoch) {
            return Arc::clone(indices);
        }

        let indices = (0_u64..)
            .zip(self.validators().iter())
            .filter(|(_, validator)| validator.is_active_at(epoch))
            .map(|(index, _)| index)
            .collect::<Arc<[_]>>();

        self.caches
            .active_indices
            .insert(epoch, Arc::clone(&indices));

        indices
    }

    /// Active validator indices of `epoch` shuffled with the attester seed of `epoch`.
    pub fn shuffled_indices(&mut self, epoch: Epoch) -> Result<Arc<[ValidatorIndex]>, Error> {
        let seed = self.seed(epoch, DOMAIN_BEACON_ATTESTER);

        if let Some(indices) = self.caches.shuffled_indices.get(&seed) {
            return Ok(Arc::clone(indices));
        }

        let mut indices = self.active_validator_indices(epoch).to_vec();
        misc::shuffle_validator_indices::<P>(&mut indices, seed)?;

        let indices = Arc::<[ValidatorIndex]>::from(indices);

        self.caches
            .shuffled_indices
            .insert(seed, Arc::clone(&indices));

        Ok(indices)
    }

    /// Number of committees in each slot of `epoch`.
    pub fn committee_count(&mut self, epoch: Epoch) -> u64 {
        let active_validator_count = self.active_validator_indices(epoch).len() as u64;
        misc::committee_count_from_active_validator_count::<P>(active_validator_count)
    }

    pub fn beacon_committee(
        &mut self,
        slot: Slot,
        index: u64,
    ) -> Result<Arc<[ValidatorIndex]>, Error> {
        let epoch = misc::compute_epoch_at_slot::<P>(slot);
        let slot_in_epoch = misc::slots_since_epoch_start::<P>(slot);

        let key = CommitteeKey {
            epoch,
            slot_in_epoch,
            index,
        };

        if let Some(committee) = self.caches.committees.get(&key) {
            return Ok(Arc::clone(committee));
        }

        let committees_per_slot = self.committee_count(epoch);

        if index >= committees_per_slot {
            return Err(HelperError::CommitteeIndexOutOfBounds {
                index,
                committee_count: committees_per_slot,
            }
            .into());
        }

        let shuffled = self.shuffled_indices(epoch)?;

        let committee = misc::compute_committee(
            &shuffled,
            slot_in_epoch * committees_per_slot + index,
            committees_per_slot * P::SlotsPerEpoch::U64,
        )?;

        let committee = Arc::<[ValidatorIndex]>::from(committee);

        self.caches.committees.insert(key, Arc::clone(&committee));

        Ok(committee)
    }

    pub fn attesting_indices(
        &mut self,
        data: &AttestationData,
        aggregation_bits: &BitList<P::MaxValidatorsPerCommittee>,
    ) -> Result<Vec<ValidatorIndex>, Error> {
        let committee = self.beacon_committee(data.slot, data.index)?;
        let attesting_indices = accessors::get_attesting_indices(&committee, aggregation_bits)?;
        Ok(attesting_indices.collect())
    }

    /// Recomputes the proposer of the current slot.
    ///
    /// Returns `None` without failing if no validator is active.
    pub fn refresh_proposer_index(&mut self) -> Result<Option<ValidatorIndex>, Error> {
        let epoch = self.current_epoch();
        let slot = self.slot();
        let indices = self.active_validator_indices(epoch);

        if indices.is_empty() {
            debug!("no validators are active at slot {slot}; proposer index not computed");
            self.caches.proposer_index = None;
            return Ok(None);
        }

        let seed = hashing::hash_256_64(self.seed(epoch, DOMAIN_BEACON_PROPOSER), slot);
        let proposer_index = misc::compute_proposer_index::<P>(self.validators(), &indices, seed)?;

        self.caches.proposer_index = Some(proposer_index);

        Ok(Some(proposer_index))
    }

    pub fn proposer_index(&mut self) -> Result<ValidatorIndex, Error> {
        if let Some(proposer_index) = self.caches.proposer_index {
            return Ok(proposer_index);
        }

        self.refresh_proposer_index()?
            .ok_or(Error::Helper(HelperError::NoActiveValidators))
    }

    // > Balances

    /// Sums the effective balances of `indices`, flooring the result at one increment.
    ///
    /// # Panics
    ///
    /// Panics if any of `indices` is not in the registry.
    #[must_use]
    pub fn total_balance(&self, indices: impl IntoIterator<Item = ValidatorIndex>) -> Gwei {
        let validators = self.validators();

        misc::total_balance::<P>(indices.into_iter().map(|index| {
            let position = usize::try_from(index).expect("validator index should fit in usize");
            validators[position].effective_balance
        }))
    }

    pub fn total_active_balance(&mut self) -> Gwei {
        self.current_total_active_balance().total
    }

    pub fn total_active_balance_square_root(&mut self) -> u64 {
        self.current_total_active_balance().square_root
    }

    fn current_total_active_balance(&mut self) -> TotalActiveBalance {
        let epoch = self.current_epoch();

        if let Some(cached) = self
            .caches
            .total_active_balance
            .filter(|cached| cached.epoch == epoch)
        {
            return cached;
        }

        let total = misc::total_balance::<P>(
            self.validators()
                .iter()
                .filter(|validator| validator.is_active_at(epoch))
                .map(|validator| validator.effective_balance),
        );

        let entry = TotalActiveBalance {
            epoch,
            total,
            square_root: misc::integer_squareroot(total),
        };

        self.caches.total_active_balance = Some(entry);

        entry
    }

    /// Looks up a validator by public key. A miss is not an error.
    #[must_use]
    pub fn validator_index_by_pubkey(&self, pubkey: &PublicKeyBytes) -> Option<ValidatorIndex> {
        self.caches
            .validator_indices
            .get_or_init(|| {
                (0..)
                    .zip(self.validators().iter())
                    .map(|(index, validator)| (validator.pubkey, index))
                    .collect()
            })
            .get(pubkey)
            .copied()
    }

    pub fn initialize_participation_from_pending_attestations(&mut self) -> Result<(), Error> {
        participation::initialize_from_pending_attestations(self)
    }

    // > Merkleization

    /// Computes the state root, rehashing only the fields changed since the last call.
    pub fn hash_tree_root(&mut self) -> Result<H256, Error> {
        if self.dirty_leaves.is_empty() {
            if let Some(root) = self.previous_state_root {
                return Ok(root);
            }
        }

        for leaf in self.dirty_leaves {
            self.leaves[leaf.position()] = Self::leaf_root(&self.fields, leaf)?;
            self.dirty_leaves.remove(leaf);
        }

        let leaf_count = StateLeafIndex::count_in(self.phase());
        let root = ssz::merkleize_padded(&self.leaves[..leaf_count])?;

        self.previous_state_root = Some(root);

        Ok(root)
    }

    /// Root of the latest block header with its state root filled in.
    pub fn block_root(&mut self) -> Result<H256, Error> {
        let state_root = self.hash_tree_root()?;
        let header = self.latest_block_header().with_state_root(state_root);
        Ok(header.hash_tree_root()?)
    }

    fn leaf_root(fields: &CombinedState<P>, leaf: StateLeafIndex) -> Result<H256, MerkleError> {
        use crate::leaf_index::StateLeafIndex as Leaf;

        match leaf {
            Leaf::GenesisTime => any_phase!(fields, state => state.genesis_time.hash_tree_root()),
            Leaf::GenesisValidatorsRoot => {
                any_phase!(fields, state => state.genesis_validators_root.hash_tree_root())
            }
            Leaf::Slot => any_phase!(fields, state => state.slot.hash_tree_root()),
            Leaf::Fork => any_phase!(fields, state => state.fork.hash_tree_root()),
            Leaf::LatestBlockHeader => {
                any_phase!(fields, state => state.latest_block_header.hash_tree_root())
            }
            Leaf::BlockRoots => any_phase!(fields, state => state.block_roots.hash_tree_root()),
            Leaf::StateRoots => any_phase!(fields, state => state.state_roots.hash_tree_root()),
            Leaf::HistoricalRoots => {
                any_phase!(fields, state => state.historical_roots.hash_tree_root())
            }
            Leaf::Eth1Data => any_phase!(fields, state => state.eth1_data.hash_tree_root()),
            Leaf::Eth1DataVotes => {
                any_phase!(fields, state => state.eth1_data_votes.hash_tree_root())
            }
            Leaf::Eth1DepositIndex => {
                any_phase!(fields, state => state.eth1_deposit_index.hash_tree_root())
            }
            Leaf::Validators => any_phase!(fields, state => state.validators.hash_tree_root()),
            Leaf::Balances => any_phase!(fields, state => state.balances.hash_tree_root()),
            Leaf::RandaoMixes => any_phase!(fields, state => state.randao_mixes.hash_tree_root()),
            Leaf::Slashings => any_phase!(fields, state => state.slashings.hash_tree_root()),
            Leaf::PreviousEpochParticipation => match fields {
                CombinedState::Phase0(state) => state.previous_epoch_attestations.hash_tree_root(),
                CombinedState::Altair(state) => state.previous_epoch_participation.hash_tree_root(),
                CombinedState::Bellatrix(state) => {
                    state.previous_epoch_participation.hash_tree_root()
                }
                CombinedState::Capella(state) => {
                    state.previous_epoch_participation.hash_tree_root()
                }
            },
            Leaf::CurrentEpochParticipation => match fields {
                CombinedState::Phase0(state) => state.current_epoch_attestations.hash_tree_root(),
                CombinedState::Altair(state) => state.current_epoch_participation.hash_tree_root(),
                CombinedState::Bellatrix(state) => {
                    state.current_epoch_participation.hash_tree_root()
                }
                CombinedState::Capella(state) => {
                    state.current_epoch_participation.hash_tree_root()
                }
            },
            Leaf::JustificationBits => {
                any_phase!(fields, state => state.justification_bits.hash_tree_root())
            }
            Leaf::PreviousJustifiedCheckpoint => {
                any_phase!(fields, state => state.previous_justified_checkpoint.hash_tree_root())
            }
            Leaf::CurrentJustifiedCheckpoint => {
                any_phase!(fields, state => state.current_justified_checkpoint.hash_tree_root())
            }
            Leaf::FinalizedCheckpoint => {
                any_phase!(fields, state => state.finalized_checkpoint.hash_tree_root())
            }
            Leaf::InactivityScores => leaf_in!(
                fields,
                [Altair, Bellatrix, Capella],
                state => state.inactivity_scores.hash_tree_root()
            ),
            Leaf::CurrentSyncCommittee => leaf_in!(
                fields,
                [Altair, Bellatrix, Capella],
                state => state.current_sync_committee.hash_tree_root()
            ),
            Leaf::NextSyncCommittee => leaf_in!(
                fields,
                [Altair, Bellatrix, Capella],
                state => state.next_sync_committee.hash_tree_root()
            ),
            Leaf::LatestExecutionPayloadHeader => leaf_in!(
                fields,
                [Bellatrix, Capella],
                state => state.latest_execution_payload_header.hash_tree_root()
            ),
            Leaf::NextWithdrawalIndex => leaf_in!(
                fields,
                [Capella],
                state => state.next_withdrawal_index.hash_tree_root()
            ),
            Leaf::NextWithdrawalValidatorIndex => leaf_in!(
                fields,
                [Capella],
                state => state.next_withdrawal_validator_index.hash_tree_root()
            ),
            Leaf::HistoricalSummaries => leaf_in!(
                fields,
                [Capella],
                state => state.historical_summaries.hash_tree_root()
            ),
        }
    }
}
