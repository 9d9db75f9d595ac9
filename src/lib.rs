#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![doc(html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo_small.png")]
#![warn(missing_docs)]

//! # Usage
//!
//! ## Deriving a key and transforming blocks
//!
//! ```
//! use rsa_crt_block::{Block, KeyedCipher};
//!
//! let cipher = KeyedCipher::new();
//! cipher.set_key("61", "53", "2753")?;
//!
//! let mut bytes = [0u8; 128];
//! bytes[127] = 42;
//! let plaintext = Block::new(bytes);
//!
//! let ciphertext = cipher.encrypt(&plaintext)?;
//! assert_ne!(ciphertext, plaintext);
//! assert_eq!(cipher.decrypt(&ciphertext)?, plaintext);
//! # Ok::<(), rsa_crt_block::Error>(())
//! ```
//!
//! ## Loading a key file
//!
//! Key files hold `p`, `q` and `d` in base 10, one per line:
//!
//! ```text
//! 61
//! 53
//! 2753
//! ```
//!
//! ```no_run
//! use rsa_crt_block::KeyedCipher;
//!
//! let cipher = KeyedCipher::new();
//! cipher.load_key_file("server.key")?;
//! assert_eq!(cipher.block_size_hint(), 128);
//! # Ok::<(), rsa_crt_block::Error>(())
//! ```
//!
//! ## Encrypting with only the public modulus
//!
//! ```
//! use rsa_crt_block::{Block, KeyedCipher, PublicKey};
//!
//! let cipher = KeyedCipher::new();
//! cipher.set_key("61", "53", "2753")?;
//!
//! // Sent to the peer.
//! let modulus = cipher.export_modulus()?;
//!
//! let peer_key = PublicKey::from_modulus_block(&modulus)?;
//! let mut bytes = [0u8; 128];
//! bytes[127] = 7;
//! let ciphertext = peer_key.encrypt(&Block::new(bytes))?;
//! assert_eq!(cipher.decrypt(&ciphertext)?.as_bytes()[127], 7);
//! # Ok::<(), rsa_crt_block::Error>(())
//! ```

pub use num_bigint::BigUint;

mod algorithms;
pub mod block;
pub mod cipher;
pub mod errors;
mod keyfile;
pub mod traits;

mod key;
mod raw;

pub use crate::{
    block::{Block, BLOCK_SIZE},
    cipher::{CipherOptions, KeyedCipher, RangePolicy},
    errors::{Error, KeyComponent, Result},
    keyfile::MAX_LINE_LEN,
    key::{KeyMaterial, PublicKey},
    traits::{BlockDecryptor, BlockEncryptor, PrivateKeyParts, PublicKeyParts},
};

#[cfg(feature = "hazmat")]
pub mod hazmat;
