use crate::{bellatrix, capella::containers::ExecutionPayloadHeader, preset::Preset};

impl<P: Preset> ExecutionPayloadHeader<P> {
    /// Extends a Bellatrix header with the root of its withdrawals.
    #[must_use]
    pub fn from_bellatrix(
        header: bellatrix::containers::ExecutionPayloadHeader<P>,
        withdrawals_root: ssz::H256,
    ) -> Self {
        let bellatrix::containers::ExecutionPayloadHeader {
            parent_hash,
            fee_recipient,
            state_root,
            receipts_root,
            logs_bloom,
            prev_randao,
            block_number,
            gas_limit,
            gas_used,
            timestamp,
            extra_data,
            base_fee_per_gas,
            block_hash,
            transactions_root,
        } = header;

        Self {
            parent_hash,
            fee_recipient,
            state_root,
            receipts_root,
            logs_bloom,
            prev_randao,
            block_number,
            gas_limit,
            gas_used,
            timestamp,
            extra_data,
            base_fee_per_gas,
            block_hash,
            transactions_root,
            withdrawals_root,
        }
    }
}
