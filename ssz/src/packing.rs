use crate::consts::BYTES_PER_CHUNK;

/// Packs `values` into chunks, 4 per chunk. The last chunk is zero-padded.
#[must_use]
pub fn pack_u64s(values: &[u64]) -> Vec<u8> {
    let mut bytes = values
        .iter()
        .flat_map(|value| value.to_le_bytes())
        .collect::<Vec<_>>();

    bytes.resize(bytes.len().div_ceil(BYTES_PER_CHUNK) * BYTES_PER_CHUNK, 0);

    bytes
}

/// Concatenates equally sized `records`.
///
/// Yields a single zero chunk if there are no records or all of them are empty.
#[must_use]
pub fn pack_records<R: AsRef<[u8]>>(records: &[R]) -> Vec<u8> {
    let mut bytes = records
        .iter()
        .flat_map(|record| record.as_ref().iter().copied())
        .collect::<Vec<_>>();

    pad_to_chunk(&mut bytes);

    bytes
}

/// Zero-pads `bytes` to a whole number of chunks, with at least one chunk.
pub fn pad_to_chunk(bytes: &mut Vec<u8>) {
    let chunk_count = bytes.len().div_ceil(BYTES_PER_CHUNK).max(1);
    bytes.resize(chunk_count * BYTES_PER_CHUNK, 0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_u64s_fill_two_chunks() {
        let bytes = pack_u64s(&[1, 2, 3, 4, 5]);

        assert_eq!(bytes.len(), 2 * BYTES_PER_CHUNK);
        assert_eq!(bytes[32], 5);
        assert!(bytes[33..].iter().all(|byte| *byte == 0));
    }

    #[test]
    fn no_u64s_yield_no_chunks() {
        assert!(pack_u64s(&[]).is_empty());
    }

    #[test]
    fn empty_records_yield_one_zero_chunk() {
        assert_eq!(pack_records::<[u8; 0]>(&[]), [0; BYTES_PER_CHUNK]);
        assert_eq!(pack_records(&[[0_u8; 0]; 3]), [0; BYTES_PER_CHUNK]);
    }

    #[test]
    fn records_are_concatenated_in_order() {
        let bytes = pack_records(&[[1_u8; 8], [2; 8]]);

        assert_eq!(&bytes[..8], &[1; 8]);
        assert_eq!(&bytes[8..16], &[2; 8]);
        assert_eq!(bytes.len(), BYTES_PER_CHUNK);
    }
}
