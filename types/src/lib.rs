//! Consensus containers, chain configuration and compile-time presets.

pub mod collections;
pub mod combined;
pub mod config;
pub mod nonstandard;
pub mod preset;

pub mod phase0 {
    pub mod beacon_state;
    pub mod consts;
    pub mod containers;
    pub mod primitives;

    mod container_impls;
}

pub mod altair {
    pub mod beacon_state;
    pub mod containers;
    pub mod primitives;

    mod container_impls;
}

pub mod bellatrix {
    pub mod beacon_state;
    pub mod containers;
    pub mod primitives;
}

pub mod capella {
    pub mod beacon_state;
    pub mod containers;
    pub mod primitives;

    mod container_impls;
}
