use crate::phase0::primitives::Uint256;

pub type Gas = u64;
pub type Wei = Uint256;
