use bls::SignatureBytes;

use crate::{altair::containers::SyncAggregate, preset::Preset};

impl<P: Preset> SyncAggregate<P> {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            sync_committee_signature: SignatureBytes::empty(),
            ..Self::default()
        }
    }

    /// Number of sync committee members that participated.
    #[must_use]
    pub fn participant_count(&self) -> usize {
        self.sync_committee_bits.count_ones()
    }
}
