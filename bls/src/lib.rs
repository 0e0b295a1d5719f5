//! Byte representations of BLS keys and signatures.
//!
//! Nothing here performs curve arithmetic. Values are carried and hashed as opaque bytes.

pub use crate::{
    public_key_bytes::{PublicKeyBytes, COMPRESSED_SIZE},
    signature_bytes::{SignatureBytes, SIGNATURE_SIZE},
};

mod public_key_bytes;
mod signature_bytes;
