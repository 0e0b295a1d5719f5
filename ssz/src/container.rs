// Runtime support for containers. `#[derive(Ssz)]` expands to calls to these.

use core::{iter, ops::Range};

use itertools::Itertools as _;

use crate::{
    consts::BYTES_PER_LENGTH_OFFSET,
    error::{ReadError, WriteError},
    porcelain::SszWrite,
    shared::{read_offset_unchecked, subslice, write_offset},
    size::Size,
};

enum Placement {
    Fixed(Range<usize>),
    Variable { start: usize },
}

/// Splits the encoding of a container into the encodings of its fields.
///
/// `sizes` lists the sizes of the fields in declaration order.
/// Variable-size fields extend up to the offset of the next variable-size field.
pub fn container_fields<'bytes>(
    bytes: &'bytes [u8],
    sizes: &[Size],
) -> Result<Vec<&'bytes [u8]>, ReadError> {
    let mut position = 0;

    let placements = sizes
        .iter()
        .map(|size| {
            let start = position;
            position += size.fixed_part();

            match *size {
                Size::Fixed { size } => Ok(Placement::Fixed(start..start + size)),
                Size::Variable { .. } => {
                    let start = read_offset_unchecked(subslice(bytes, start..position)?)?;
                    Ok(Placement::Variable { start })
                }
            }
        })
        .collect::<Result<Vec<_>, ReadError>>()?;

    let variable_starts = placements
        .iter()
        .filter_map(|placement| match placement {
            Placement::Fixed(_) => None,
            Placement::Variable { start } => Some(*start),
        })
        .collect_vec();

    let actual = variable_starts.first().copied().unwrap_or(bytes.len());

    if actual != position {
        return Err(ReadError::ContainerFirstOffsetMismatch {
            expected: position,
            actual,
        });
    }

    let mut variable_ends = variable_starts
        .into_iter()
        .skip(1)
        .chain(iter::once(bytes.len()));

    placements
        .into_iter()
        .map(|placement| {
            let range = match placement {
                Placement::Fixed(range) => range,
                Placement::Variable { start } => {
                    start..variable_ends.next().unwrap_or(bytes.len())
                }
            };

            subslice(bytes, range)
        })
        .collect()
}

/// Number of bytes `value` takes up when it is a field of a container.
#[inline]
#[must_use]
pub fn field_encoded_size<T: SszWrite>(value: &T) -> usize {
    match T::SIZE {
        Size::Fixed { size } => size,
        Size::Variable { .. } => BYTES_PER_LENGTH_OFFSET + value.encoded_size(),
    }
}

/// Writes the fields of a fixed-size container one after another.
pub struct FixedFieldWriter<'bytes> {
    bytes: &'bytes mut [u8],
    position: usize,
}

impl<'bytes> FixedFieldWriter<'bytes> {
    #[inline]
    pub fn new(bytes: &'bytes mut [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    #[inline]
    pub fn field<T: SszWrite>(&mut self, value: &T) {
        let end = self.position + T::SIZE.fixed_part();
        value.write_fixed(&mut self.bytes[self.position..end]);
        self.position = end;
    }
}

/// Appends a variable-size container to a buffer.
///
/// The fixed part is reserved up front. Variable-size fields are appended after it in the order
/// they are passed to [`ContainerWriter::field`].
pub struct ContainerWriter<'bytes> {
    bytes: &'bytes mut Vec<u8>,
    start: usize,
    position: usize,
}

impl<'bytes> ContainerWriter<'bytes> {
    #[inline]
    pub fn new(bytes: &'bytes mut Vec<u8>, fixed_part: usize) -> Self {
        let start = bytes.len();
        bytes.resize(start + fixed_part, 0);

        Self {
            bytes,
            start,
            position: start,
        }
    }

    #[inline]
    pub fn field<T: SszWrite>(&mut self, value: &T) -> Result<(), WriteError> {
        match T::SIZE {
            Size::Fixed { size } => {
                let end = self.position + size;
                value.write_fixed(&mut self.bytes[self.position..end]);
                self.position = end;
            }
            Size::Variable { .. } => {
                let offset = self.bytes.len() - self.start;
                write_offset(self.bytes, self.position, offset)?;
                self.position += BYTES_PER_LENGTH_OFFSET;
                value.write_variable(self.bytes)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use typenum::U4;

    use crate::{contiguous_list::ContiguousList, porcelain::SszSize};

    use super::*;

    type Bytes = ContiguousList<u8, U4>;

    const ENCODED: [u8; 23] = hex!("0100000000000000 14000000 02000000 16000000 0708 09");

    fn sizes() -> [Size; 4] {
        [u64::SIZE, Bytes::SIZE, u32::SIZE, Bytes::SIZE]
    }

    #[test]
    fn fields_are_split_at_offsets() -> Result<(), ReadError> {
        let fields = container_fields(&ENCODED, &sizes())?;

        assert_eq!(
            fields,
            [
                &hex!("0100000000000000")[..],
                &[7, 8],
                &hex!("02000000"),
                &[9],
            ],
        );

        Ok(())
    }

    #[test]
    fn writer_lays_out_fixed_part_before_variable_parts() -> Result<(), WriteError> {
        let first = Bytes::try_from(vec![7, 8]).expect("2 bytes fit in the list");
        let second = Bytes::try_from(vec![9]).expect("1 byte fits in the list");

        let mut bytes = vec![0xff];
        let fixed_part = sizes().into_iter().map(Size::fixed_part).sum();

        let mut writer = ContainerWriter::new(&mut bytes, fixed_part);
        writer.field(&1_u64)?;
        writer.field(&first)?;
        writer.field(&2_u32)?;
        writer.field(&second)?;

        assert_eq!(fixed_part, 20);
        assert_eq!(bytes[0], 0xff);
        assert_eq!(bytes[1..], ENCODED);
        assert_eq!(
            field_encoded_size(&1_u64) + field_encoded_size(&first),
            8 + BYTES_PER_LENGTH_OFFSET + 2,
        );

        Ok(())
    }

    #[test]
    fn first_offset_must_end_fixed_part() {
        let mut bytes = ENCODED;
        bytes[8] = 0x15;

        assert_eq!(
            container_fields(&bytes, &sizes()),
            Err(ReadError::ContainerFirstOffsetMismatch {
                expected: 20,
                actual: 21,
            }),
        );
    }

    #[test]
    fn offset_past_end_is_rejected() {
        let mut bytes = ENCODED;
        bytes[16] = 0x18;

        assert_eq!(
            container_fields(&bytes, &sizes()),
            Err(ReadError::OffsetsNotValidSubsliceBounds {
                start: 20,
                end: 24,
                length: 23,
            }),
        );
    }

    #[test]
    fn fixed_fields_are_written_in_order() {
        let mut bytes = [0; 12];

        let mut writer = FixedFieldWriter::new(&mut bytes);
        writer.field(&3_u64);
        writer.field(&4_u32);

        assert_eq!(bytes, hex!("0300000000000000 04000000"));
    }
}
