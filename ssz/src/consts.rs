//! Widths fixed by the encoding and by Merkleization.

use byteorder::LittleEndian;

/// Byte order of integers and offsets.
pub type Endianness = LittleEndian;

/// Position of a variable-size part, counted from the start of its container or list.
pub type Offset = u32;

pub const BYTES_PER_LENGTH_OFFSET: usize = size_of::<Offset>();

pub const BITS_PER_BYTE: usize = 8;

// Leaves and nodes of Merkle trees are SHA-256 digests.
pub const BYTES_PER_CHUNK: usize = 32;
pub const BITS_PER_CHUNK: usize = BYTES_PER_CHUNK * BITS_PER_BYTE;
