//! The keyed block cipher shared between threads.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use num_bigint::BigUint;
use tracing::debug;

use crate::block::Block;
use crate::errors::{Error, Result};
use crate::key::{KeyMaterial, PublicKey};
use crate::raw;
use crate::traits::{BlockDecryptor, BlockEncryptor, PublicKeyParts};

/// How a block whose value is not below the modulus is handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RangePolicy {
    /// Reduce the value modulo `n` and carry on. This is the legacy
    /// behaviour: the output is well defined but will not round-trip.
    #[default]
    Wrap,
    /// Fail with [`Error::OutOfRange`].
    Reject,
}

/// Runtime options for a [`KeyedCipher`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CipherOptions {
    /// Handling of out-of-range block values.
    pub range_policy: RangePolicy,
    /// Re-encrypt every CRT decryption result and compare it with the input.
    pub check_crt: bool,
}

/// RSA over 128-byte blocks with a single, replaceable private key.
///
/// Every operation takes the same lock, so operations on one instance never
/// overlap and a key derivation is never observed half done. Use separate
/// instances for parallel work.
///
/// ```
/// use rsa_crt_block::{Block, KeyedCipher};
///
/// let cipher = KeyedCipher::new();
/// cipher.set_key("61", "53", "2753")?;
///
/// let mut bytes = [0u8; 128];
/// bytes[127] = 65;
/// let plaintext = Block::new(bytes);
///
/// let ciphertext = cipher.encrypt(&plaintext)?;
/// assert_eq!(ciphertext.as_bytes()[126..], [0x0a, 0xe6]); // 2790
/// assert_eq!(cipher.decrypt(&ciphertext)?, plaintext);
/// # Ok::<(), rsa_crt_block::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct KeyedCipher {
    key: Mutex<Option<KeyMaterial>>,
    options: CipherOptions,
}

impl KeyedCipher {
    /// Creates a cipher with no key and default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cipher with no key and the given options.
    pub fn with_options(options: CipherOptions) -> Self {
        Self {
            key: Mutex::new(None),
            options,
        }
    }

    /// Creates a cipher that starts out with `key`.
    pub fn from_key(key: KeyMaterial) -> Self {
        Self {
            key: Mutex::new(Some(key)),
            options: CipherOptions::default(),
        }
    }

    /// Returns the options this cipher was built with.
    pub fn options(&self) -> CipherOptions {
        self.options
    }

    // The key is only ever replaced wholesale, so a panic while the lock was
    // held cannot leave it half written.
    fn lock(&self) -> MutexGuard<'_, Option<KeyMaterial>> {
        self.key.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Derives a new key from base-10 `p`, `q` and `d` and makes it the
    /// active key. On failure the previous key stays active.
    pub fn set_key(&self, p: &str, q: &str, d: &str) -> Result<()> {
        let mut guard = self.lock();
        *guard = Some(KeyMaterial::from_decimal(p, q, d)?);
        Ok(())
    }

    /// Derives a new key from integer components and makes it the active
    /// key. On failure the previous key stays active.
    pub fn set_key_components(&self, p: BigUint, q: BigUint, d: BigUint) -> Result<()> {
        let mut guard = self.lock();
        *guard = Some(KeyMaterial::from_components(p, q, d)?);
        Ok(())
    }

    /// Replaces the active key with an already derived one.
    pub fn replace_key(&self, key: KeyMaterial) {
        *self.lock() = Some(key);
    }

    /// Loads `p`, `q` and `d` from a three-line key file and makes the
    /// derived key active. On failure the previous key stays active.
    ///
    /// The file is read while the lock is held, so other operations on this
    /// instance wait for the read to finish.
    pub fn load_key_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut guard = self.lock();

        let key = KeyMaterial::from_file(path)?;

        debug!(path = %path.display(), "loaded key file");
        *guard = Some(key);
        Ok(())
    }

    /// Whether a key has been derived.
    pub fn has_key(&self) -> bool {
        self.lock().is_some()
    }

    /// Encrypts `block` with the public exponent 65537.
    pub fn encrypt(&self, block: &Block) -> Result<Block> {
        let guard = self.lock();
        let key = guard.as_ref().ok_or(Error::KeyNotSet)?;
        raw::encrypt_block(key, self.options.range_policy, block)
    }

    /// Decrypts `block` using the CRT.
    pub fn decrypt(&self, block: &Block) -> Result<Block> {
        let guard = self.lock();
        let key = guard.as_ref().ok_or(Error::KeyNotSet)?;
        raw::decrypt_block(
            key,
            self.options.range_policy,
            self.options.check_crt,
            block,
        )
    }

    /// Exports the modulus `n` as a big-endian block.
    ///
    /// Fails with [`Error::BlockOverflow`] for moduli over 1024 bits.
    pub fn export_modulus(&self) -> Result<Block> {
        let guard = self.lock();
        let key = guard.as_ref().ok_or(Error::KeyNotSet)?;
        Block::from_biguint(key.n())
    }

    /// Returns a copy of the public half of the active key.
    pub fn public_key(&self) -> Result<PublicKey> {
        let guard = self.lock();
        let key = guard.as_ref().ok_or(Error::KeyNotSet)?;
        Ok(key.to_public_key().with_range_policy(self.options.range_policy))
    }

    /// Byte length of the modulus rounded down to a multiple of 128; see
    /// [`PublicKeyParts::block_size_hint`]. Returns 0 without a key.
    pub fn block_size_hint(&self) -> usize {
        self.lock().as_ref().map_or(0, |key| key.block_size_hint())
    }

    /// Byte length of the modulus. Returns 0 without a key.
    pub fn modulus_size(&self) -> usize {
        self.lock().as_ref().map_or(0, |key| key.size())
    }
}

impl BlockEncryptor for KeyedCipher {
    fn encrypt_block(&self, block: &Block) -> Result<Block> {
        self.encrypt(block)
    }
}

impl BlockDecryptor for KeyedCipher {
    fn decrypt_block(&self, block: &Block) -> Result<Block> {
        self.decrypt(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::FromPrimitive;

    fn toy_block(x: u32) -> Block {
        Block::from_biguint(&BigUint::from_u32(x).unwrap()).unwrap()
    }

    fn toy_cipher(options: CipherOptions) -> KeyedCipher {
        let cipher = KeyedCipher::with_options(options);
        cipher.set_key("61", "53", "2753").unwrap();
        cipher
    }

    #[test]
    fn operations_without_key_fail() {
        let cipher = KeyedCipher::new();

        assert!(!cipher.has_key());
        assert!(matches!(cipher.encrypt(&Block::zero()), Err(Error::KeyNotSet)));
        assert!(matches!(cipher.decrypt(&Block::zero()), Err(Error::KeyNotSet)));
        assert!(matches!(cipher.export_modulus(), Err(Error::KeyNotSet)));
        assert!(matches!(cipher.public_key(), Err(Error::KeyNotSet)));
        assert_eq!(cipher.block_size_hint(), 0);
        assert_eq!(cipher.modulus_size(), 0);
    }

    #[test]
    fn toy_values() {
        let cipher = toy_cipher(CipherOptions::default());

        for (m, c) in [(65, 2790), (42, 2557), (0, 0), (1, 1), (3232, 3232)] {
            assert_eq!(cipher.encrypt(&toy_block(m)).unwrap(), toy_block(c));
            assert_eq!(cipher.decrypt(&toy_block(c)).unwrap(), toy_block(m));
        }
    }

    #[test]
    fn toy_export() {
        let cipher = toy_cipher(CipherOptions::default());

        assert_eq!(cipher.export_modulus().unwrap(), toy_block(3233));
        assert_eq!(cipher.modulus_size(), 2);
        assert_eq!(cipher.block_size_hint(), 0);
    }

    #[test]
    fn failed_derivation_keeps_previous_key() {
        let cipher = toy_cipher(CipherOptions::default());

        assert!(cipher.set_key("61", "61", "7").is_err());
        assert!(cipher.set_key("61", "abc", "7").is_err());
        assert_eq!(cipher.export_modulus().unwrap(), toy_block(3233));
    }

    #[test]
    fn reject_policy() {
        let cipher = toy_cipher(CipherOptions {
            range_policy: RangePolicy::Reject,
            check_crt: true,
        });

        assert!(matches!(
            cipher.encrypt(&toy_block(3233)),
            Err(Error::OutOfRange)
        ));
        assert!(matches!(
            cipher.decrypt(&toy_block(4000)),
            Err(Error::OutOfRange)
        ));
        assert_eq!(cipher.decrypt(&toy_block(2790)).unwrap(), toy_block(65));
    }

    #[test]
    fn public_key_inherits_policy() {
        let cipher = toy_cipher(CipherOptions {
            range_policy: RangePolicy::Reject,
            check_crt: false,
        });

        let public_key = cipher.public_key().unwrap();
        assert!(matches!(
            public_key.encrypt(&toy_block(3233)),
            Err(Error::OutOfRange)
        ));
        assert_eq!(public_key.encrypt(&toy_block(65)).unwrap(), toy_block(2790));
    }

    #[test]
    fn replace_key_swaps_material() {
        let cipher = toy_cipher(CipherOptions::default());
        let other = KeyMaterial::from_decimal("53", "61", "2753").unwrap();

        cipher.replace_key(other);
        // Same modulus, p and q swapped: results must not change.
        assert_eq!(cipher.decrypt(&toy_block(2790)).unwrap(), toy_block(65));
    }

    #[test]
    fn cipher_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<KeyedCipher>();
    }
}
