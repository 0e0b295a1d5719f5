//! Beacon state container with cached Merkle leaves and derived values.

pub use crate::{
    beacon_state::BeaconState,
    cache::{BoundedCache, CommitteeKey},
    error::Error,
    leaf_index::StateLeafIndex,
};

mod beacon_state;
mod cache;
mod error;
mod leaf_index;
mod participation;
