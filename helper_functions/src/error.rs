use core::num::TryFromIntError;

use thiserror::Error;
use types::phase0::primitives::{CommitteeIndex, ValidatorIndex};

#[derive(Debug, Error)]
pub enum Error {
    #[error("committee index {index} is out of bounds (committees: {committee_count})")]
    CommitteeIndexOutOfBounds {
        index: CommitteeIndex,
        committee_count: u64,
    },
    #[error(
        "aggregation bitlist length {aggregation_bitlist_length} \
         does not match committee length {committee_length}"
    )]
    CommitteeLengthMismatch {
        aggregation_bitlist_length: usize,
        committee_length: usize,
    },
    #[error("failed to select proposer")]
    FailedToSelectProposer,
    #[error("no validators are active")]
    NoActiveValidators,
    #[error("validator index {index} is out of bounds")]
    ValidatorIndexOutOfBounds { index: ValidatorIndex },
    #[error(transparent)]
    IndexConversion(#[from] TryFromIntError),
    #[error(transparent)]
    Shuffling(#[from] anyhow::Error),
}
