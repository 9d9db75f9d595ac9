//! Key and block-cipher trait definitions.

mod encryption;
pub(crate) mod keys;

pub use encryption::{BlockDecryptor, BlockEncryptor};
pub use keys::{PrivateKeyParts, PublicKeyParts};
