use core::cmp::Ordering;
use std::{borrow::Cow, collections::BTreeMap, path::Path};

use anyhow::{Context as _, Result};
use enum_iterator::Sequence as _;
use hex_literal::hex;
use itertools::Itertools as _;
use log::warn;
use serde::{de::IgnoredAny, Deserialize, Serialize};
use thiserror::Error;
use typenum::Unsigned as _;

use crate::{
    nonstandard::{Phase, Toption},
    phase0::{
        consts::{FAR_FUTURE_EPOCH, GENESIS_EPOCH},
        primitives::{Epoch, Slot, Version, H32},
    },
    preset::{Preset, PresetName},
};

/// Configuration variables customizable at runtime.
///
/// The `*_fork_epoch` fields have type `Epoch` for compatibility with standard configurations.
/// A fork that is not scheduled has its epoch set to [`FAR_FUTURE_EPOCH`].
#[derive(Debug, Deserialize, Serialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Config {
    // Meta
    pub config_name: Cow<'static, str>,
    pub preset_base: PresetName,

    // Genesis
    pub genesis_fork_version: Version,

    // Forking
    pub altair_fork_epoch: Epoch,
    pub altair_fork_version: Version,
    pub bellatrix_fork_epoch: Epoch,
    pub bellatrix_fork_version: Version,
    pub capella_fork_epoch: Epoch,
    pub capella_fork_version: Version,

    // Variables of later phases and any others nothing here reads.
    //
    // They are collected so that a warning can be logged about them.
    #[expect(
        clippy::zero_sized_map_values,
        reason = "False positive. Serde can only flatten structs and maps."
    )]
    #[serde(flatten, skip_serializing)]
    pub unknown: BTreeMap<String, IgnoredAny>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Meta
            //
            // `config_name` is overridden by the built-in configurations so that custom ones
            // are never mistaken for them.
            config_name: Cow::Borrowed("default"),
            preset_base: PresetName::Mainnet,

            // Genesis
            genesis_fork_version: H32(hex!("00000000")),

            // Forking
            altair_fork_epoch: FAR_FUTURE_EPOCH,
            altair_fork_version: H32(hex!("01000000")),
            bellatrix_fork_epoch: FAR_FUTURE_EPOCH,
            bellatrix_fork_version: H32(hex!("02000000")),
            capella_fork_epoch: FAR_FUTURE_EPOCH,
            capella_fork_version: H32(hex!("03000000")),

            unknown: BTreeMap::new(),
        }
    }
}

impl Config {
    #[must_use]
    pub fn mainnet() -> Self {
        Self {
            // Meta
            config_name: Cow::Borrowed("mainnet"),

            // Forking
            altair_fork_epoch: 74240,
            bellatrix_fork_epoch: 144_896,
            capella_fork_epoch: 194_048,

            ..Self::default()
        }
    }

    #[must_use]
    pub fn minimal() -> Self {
        Self {
            // Meta
            config_name: Cow::Borrowed("minimal"),
            preset_base: PresetName::Minimal,

            // Genesis
            genesis_fork_version: H32(hex!("00000001")),

            // Forking
            altair_fork_version: H32(hex!("01000001")),
            bellatrix_fork_version: H32(hex!("02000001")),
            capella_fork_version: H32(hex!("03000001")),

            ..Self::default()
        }
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration from {}", path.display()))?;

        Self::from_yaml_str(&yaml)
            .with_context(|| format!("failed to load configuration from {}", path.display()))
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config = serde_yaml::from_str::<Self>(yaml).context("configuration is malformed")?;

        if !config.unknown.is_empty() {
            warn!(
                "configuration {} contains unknown variables: {}",
                config.config_name,
                config.unknown.keys().format(", "),
            );
        }

        config.validate()?;

        Ok(config)
    }

    /// Modifies the configuration so that every state is in `phase` from genesis onward.
    #[must_use]
    pub fn start_and_stay_in(mut self, phase: Phase) -> Self {
        self.config_name = Cow::Owned(format!("{phase}-{}", self.config_name));
        self.upgrade_once(phase, GENESIS_EPOCH)
    }

    #[must_use]
    pub fn upgrade_once(mut self, post_phase: Phase, fork_epoch: Epoch) -> Self {
        for (phase, field) in self.fork_epochs_mut() {
            *field = match phase.cmp(&post_phase) {
                Ordering::Less => GENESIS_EPOCH,
                Ordering::Equal => fork_epoch,
                Ordering::Greater => FAR_FUTURE_EPOCH,
            };
        }

        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.config_name.is_empty() {
            return Err(Error::NameEmpty);
        }

        for character in self.config_name.chars() {
            if !matches!(character, 'a'..='z' | '0'..='9' | '-') {
                return Err(Error::NameContainsIllegalCharacters);
            }
        }

        let scheduled = self.fork_epochs().map(|(_, epoch)| epoch).collect_vec();

        if scheduled.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(Error::ForksOutOfOrder);
        }

        Ok(())
    }

    #[inline]
    #[must_use]
    pub const fn version(&self, phase: Phase) -> Version {
        match phase {
            Phase::Phase0 => self.genesis_fork_version,
            Phase::Altair => self.altair_fork_version,
            Phase::Bellatrix => self.bellatrix_fork_version,
            Phase::Capella => self.capella_fork_version,
        }
    }

    #[inline]
    #[must_use]
    pub const fn fork_epoch(&self, phase: Phase) -> Epoch {
        match phase {
            Phase::Phase0 => GENESIS_EPOCH,
            Phase::Altair => self.altair_fork_epoch,
            Phase::Bellatrix => self.bellatrix_fork_epoch,
            Phase::Capella => self.capella_fork_epoch,
        }
    }

    #[must_use]
    pub fn fork_slot<P: Preset>(&self, phase: Phase) -> Toption<Slot> {
        self.fork_epoch(phase)
            .checked_mul(P::SlotsPerEpoch::U64)
            .map_or(Toption::None, Toption::Some)
    }

    #[must_use]
    pub fn phase_at_epoch(&self, epoch: Epoch) -> Phase {
        self.fork_epochs()
            .take_while(|(_, fork_epoch)| *fork_epoch <= epoch)
            .map(|(phase, _)| phase)
            .last()
            .unwrap_or(Phase::Phase0)
    }

    #[must_use]
    pub fn phase_at_slot<P: Preset>(&self, slot: Slot) -> Phase {
        enum_iterator::all()
            .map(|phase| (phase, self.fork_slot::<P>(phase)))
            .take_while(|(_, fork_slot)| *fork_slot <= Toption::Some(slot))
            .map(|(phase, _)| phase)
            .last()
            .unwrap_or(Phase::Phase0)
    }

    #[must_use]
    pub fn version_at_epoch(&self, epoch: Epoch) -> Version {
        self.version(self.phase_at_epoch(epoch))
    }

    fn fork_epochs(&self) -> impl Iterator<Item = (Phase, Epoch)> {
        // The array length keeps this in sync with `Phase`.
        let fields: [_; Phase::CARDINALITY - 1] = [
            self.altair_fork_epoch,
            self.bellatrix_fork_epoch,
            self.capella_fork_epoch,
        ];

        enum_iterator::all().skip(1).zip(fields)
    }

    fn fork_epochs_mut(&mut self) -> impl Iterator<Item = (Phase, &mut Epoch)> {
        let fields: [_; Phase::CARDINALITY - 1] = [
            &mut self.altair_fork_epoch,
            &mut self.bellatrix_fork_epoch,
            &mut self.capella_fork_epoch,
        ];

        enum_iterator::all().skip(1).zip(fields)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration name is empty")]
    NameEmpty,
    #[error("configuration name contains illegal characters")]
    NameContainsIllegalCharacters,
    #[error("fork epochs are not in activation order")]
    ForksOutOfOrder,
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Refactoring worsens readability, which is more important in tests."
)]
