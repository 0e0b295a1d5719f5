use ssz::{ContiguousList, ContiguousVector, Ssz};

use crate::{
    bellatrix::primitives::{Gas, Wei},
    phase0::primitives::{
        ExecutionAddress, ExecutionBlockHash, ExecutionBlockNumber, UnixSeconds, H256,
    },
    preset::Preset,
};

#[derive(Clone, PartialEq, Eq, Default, Debug, Ssz)]
pub struct ExecutionPayloadHeader<P: Preset> {
    pub parent_hash: ExecutionBlockHash,
    pub fee_recipient: ExecutionAddress,
    pub state_root: H256,
    pub receipts_root: H256,
    pub logs_bloom: ContiguousVector<u8, P::BytesPerLogsBloom>,
    pub prev_randao: H256,
    pub block_number: ExecutionBlockNumber,
    pub gas_limit: Gas,
    pub gas_used: Gas,
    pub timestamp: UnixSeconds,
    pub extra_data: ContiguousList<u8, P::MaxExtraDataBytes>,
    pub base_fee_per_gas: Wei,
    pub block_hash: ExecutionBlockHash,
    pub transactions_root: H256,
    pub withdrawals_root: H256,
}

/// Same layout as the phase 0 `HistoricalBatch`, so the two have the same root.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Ssz)]
pub struct HistoricalSummary {
    pub block_summary_root: H256,
    pub state_summary_root: H256,
}
