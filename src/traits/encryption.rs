//! Block encryption traits.

use crate::block::Block;
use crate::errors::Result;

/// Encrypts single blocks.
pub trait BlockEncryptor {
    /// Encrypt the given block.
    fn encrypt_block(&self, block: &Block) -> Result<Block>;
}

/// Decrypts single blocks.
pub trait BlockDecryptor {
    /// Decrypt the given block.
    fn decrypt_block(&self, block: &Block) -> Result<Block>;
}
