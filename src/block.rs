//! Fixed-size blocks of big-endian integers.

use core::fmt;

use num_bigint::BigUint;
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, Zeroizing};

use crate::errors::{Error, Result};

/// Size in bytes of every block handled by the cipher (a 1024-bit modulus).
pub const BLOCK_SIZE: usize = 128;

/// A 128-byte big-endian unsigned integer, used for plaintext, ciphertext
/// and the exported modulus alike.
///
/// Integers shorter than the block are right-justified with zero fill on the
/// left. This is plain framing, not cryptographic padding.
#[derive(Clone)]
pub struct Block([u8; BLOCK_SIZE]);

impl Block {
    /// Wraps raw block bytes.
    pub const fn new(bytes: [u8; BLOCK_SIZE]) -> Self {
        Self(bytes)
    }

    /// The all-zero block.
    pub const fn zero() -> Self {
        Self([0; BLOCK_SIZE])
    }

    /// Encodes `x` big-endian, right-justified in the block.
    ///
    /// Fails with [`Error::BlockOverflow`] if `x` needs more than
    /// [`BLOCK_SIZE`] bytes.
    pub fn from_biguint(x: &BigUint) -> Result<Self> {
        let bytes = Zeroizing::new(x.to_bytes_be());
        if bytes.len() > BLOCK_SIZE {
            return Err(Error::BlockOverflow);
        }

        let mut block = Self::zero();
        block.0[BLOCK_SIZE - bytes.len()..].copy_from_slice(&bytes);
        Ok(block)
    }

    /// Decodes the block as a big-endian unsigned integer.
    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.0)
    }

    /// Borrows the raw bytes.
    pub fn as_bytes(&self) -> &[u8; BLOCK_SIZE] {
        &self.0
    }

    /// Consumes the block, returning the raw bytes.
    pub fn into_bytes(self) -> [u8; BLOCK_SIZE] {
        let mut this = self;
        core::mem::replace(&mut this.0, [0; BLOCK_SIZE])
    }
}

impl Default for Block {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<[u8; BLOCK_SIZE]> for Block {
    fn from(bytes: [u8; BLOCK_SIZE]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for Block {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; BLOCK_SIZE] = bytes
            .try_into()
            .map_err(|_| Error::InvalidBlockLength { len: bytes.len() })?;
        Ok(Self(bytes))
    }
}

impl AsRef<[u8]> for Block {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl ConstantTimeEq for Block {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[..].ct_eq(&other.0[..])
    }
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Block {}

impl fmt::LowerHex for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0.iter() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::UpperHex for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0.iter() {
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Block({:x})", self)
    }
}

impl Zeroize for Block {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Drop for Block {
    fn drop(&mut self) {
        self.zeroize();
    }
}
