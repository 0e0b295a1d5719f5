// Helpers shared by hand-written container and collection impls.

use core::ops::Range;

use ethereum_types::H256;
use itertools::{Either, Itertools as _};
use typenum::Unsigned as _;

use crate::{
    consts::{Offset, BYTES_PER_CHUNK, BYTES_PER_LENGTH_OFFSET},
    error::{IndexError, MerkleError, ReadError, WriteError},
    porcelain::{SszHash, SszRead, SszReadDefault as _, SszWrite},
    size::Size,
};

#[inline]
pub fn subslice(bytes: &[u8], range: Range<usize>) -> Result<&[u8], ReadError> {
    let Range { start, end } = range;

    bytes
        .get(start..end)
        .ok_or(ReadError::OffsetsNotValidSubsliceBounds {
            start,
            end,
            length: bytes.len(),
        })
}

#[inline]
pub fn read_offset_unchecked(bytes: &[u8]) -> Result<usize, ReadError> {
    let offset = Offset::from_ssz_default(&bytes[..BYTES_PER_LENGTH_OFFSET])?;

    offset
        .try_into()
        .map_err(|_| ReadError::OffsetDoesNotFitInUsize { offset })
}

#[inline]
pub fn write_offset(bytes: &mut [u8], destination: usize, offset: usize) -> Result<(), WriteError> {
    let offset = Offset::try_from(offset).map_err(|_| WriteError::OffsetTooBig { offset })?;
    offset.write_fixed(&mut bytes[destination..destination + BYTES_PER_LENGTH_OFFSET]);
    Ok(())
}

#[inline]
pub fn read_list<'all, C, T: SszRead<C> + 'all>(
    context: &'all C,
    bytes: &'all [u8],
) -> Result<impl Iterator<Item = Result<T, ReadError>> + 'all, ReadError> {
    if let Size::Fixed { size } = T::SIZE {
        if bytes.len() % size != 0 {
            return Err(ReadError::FixedSizeMismatch {
                expected: bytes.len().next_multiple_of(size),
                actual: bytes.len(),
            });
        }

        let results = bytes
            .chunks_exact(size)
            .map(|chunk| T::from_ssz_unchecked(context, chunk));

        return Ok(Either::Left(results));
    }

    let first_offset = if bytes.is_empty() {
        0
    } else {
        let first_offset = read_offset_unchecked(subslice(bytes, 0..BYTES_PER_LENGTH_OFFSET)?)?;

        if first_offset % BYTES_PER_LENGTH_OFFSET != 0 {
            return Err(ReadError::ListFirstOffsetUnaligned { first_offset });
        }

        first_offset
    };

    let results = subslice(bytes, 0..first_offset)?
        .chunks_exact(BYTES_PER_LENGTH_OFFSET)
        .map(read_offset_unchecked)
        .chain(core::iter::once(Ok(bytes.len())))
        .tuple_windows()
        .map(move |(start_result, end_result)| {
            let start = start_result?;
            let end = end_result?;
            T::from_ssz(context, subslice(bytes, start..end)?)
        });

    Ok(Either::Right(results))
}

#[inline]
pub fn write_list<'all, T: SszWrite + 'all>(
    bytes: &mut Vec<u8>,
    elements: impl ExactSizeIterator<Item = &'all T>,
) -> Result<(), WriteError> {
    let element_count = elements.len();
    let length_before = bytes.len();

    if let Size::Fixed { size } = T::SIZE {
        bytes.resize(length_before + element_count * size, 0);

        let new_bytes = &mut bytes[length_before..];

        for (element, subslice) in elements.zip(new_bytes.chunks_exact_mut(size)) {
            element.write_fixed(subslice);
        }
    } else {
        bytes.resize(length_before + element_count * BYTES_PER_LENGTH_OFFSET, 0);

        for (index, element) in elements.enumerate() {
            let destination = length_before + index * BYTES_PER_LENGTH_OFFSET;
            let offset = bytes.len() - length_before;

            write_offset(bytes, destination, offset)?;

            element.write_variable(bytes)?;
        }
    }

    Ok(())
}

pub fn list_encoded_size<'all, T: SszWrite + 'all>(
    elements: impl Iterator<Item = &'all T>,
) -> usize {
    match T::SIZE {
        Size::Fixed { size } => elements.count() * size,
        Size::Variable { .. } => elements
            .map(|element| BYTES_PER_LENGTH_OFFSET + element.encoded_size())
            .sum(),
    }
}

/// Turns a sequence of elements into chunks.
///
/// Composite elements contribute their roots. Basic elements are packed.
pub fn chunks_of<'all, T: SszHash + SszWrite + 'all>(
    elements: impl ExactSizeIterator<Item = &'all T>,
) -> Result<Vec<H256>, MerkleError> {
    if T::PackingFactor::USIZE == 1 {
        return elements.map(SszHash::hash_tree_root).collect();
    }

    let size = T::SIZE.fixed_part();
    let mut bytes = vec![0; elements.len() * size];

    for (element, subslice) in elements.zip(bytes.chunks_exact_mut(size)) {
        element.write_fixed(subslice);
    }

    bytes.resize(bytes.len().next_multiple_of(BYTES_PER_CHUNK), 0);

    Ok(bytes.chunks_exact(BYTES_PER_CHUNK).map(H256::from_slice).collect())
}

/// Number of chunks a collection of `element_count` elements of type `T` may span.
#[must_use]
pub fn chunk_limit<T: SszHash>(element_count: usize) -> usize {
    element_count.div_ceil(T::PackingFactor::USIZE)
}

pub fn validate_index(length: usize, index: u64) -> Result<usize, IndexError> {
    let index = index
        .try_into()
        .map_err(|_| IndexError::DoesNotFitInUsize { index })?;

    if length <= index {
        return Err(IndexError::OutOfBounds { length, index });
    }

    Ok(index)
}
