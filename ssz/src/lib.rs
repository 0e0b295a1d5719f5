// Re-exported for the code generated by `ssz_derive`.
pub use ethereum_types::H256;
pub use hashing;
pub use ssz_derive::Ssz;
pub use typenum::U1;

pub use crate::{
    bit_list::BitList,
    bit_vector::BitVector,
    container::{container_fields, field_encoded_size, ContainerWriter, FixedFieldWriter},
    consts::{Endianness, Offset, BYTES_PER_CHUNK, BYTES_PER_LENGTH_OFFSET},
    contiguous_list::ContiguousList,
    contiguous_vector::ContiguousVector,
    error::{IndexError, MerkleError, PushError, ReadError, WriteError},
    merkleization::{
        merkle_root, merkle_root_with, merkleize_chunks, merkleize_padded, mix_in_length,
        tree_depth,
    },
    packing::{pack_records, pack_u64s},
    porcelain::{SszHash, SszRead, SszReadDefault, SszSize, SszWrite},
    primitives::{
        bool_root, public_key_root, short_bytes_root, signature_root, uint64_root,
        PUBLIC_KEY_SIZE, SIGNATURE_SIZE,
    },
    shared::subslice,
    size::Size,
};

mod basic;
mod bit_list;
mod bit_vector;
mod consts;
mod container;
mod contiguous_list;
mod contiguous_vector;
mod error;
mod merkleization;
mod packing;
mod porcelain;
mod primitives;
mod shared;
mod size;
