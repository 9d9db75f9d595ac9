//! Error types.

use core::fmt;

/// Alias for [`core::result::Result`] with the `rsa-crt-block` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The key file could not be opened or read.
    #[error("key file unavailable: {0}")]
    FileUnavailable(#[source] std::io::Error),

    /// A key component is missing or is not a base-10 unsigned integer.
    #[error("malformed key text for {component}")]
    MalformedKeyText {
        /// Component that failed to parse.
        component: KeyComponent,
    },

    /// `p` and `q` are not coprime, so `p⁻¹ mod q` does not exist.
    #[error("invalid key relationship: p has no inverse modulo q")]
    InvalidKeyRelationship,

    /// A prime factor is smaller than 2.
    #[error("invalid prime value")]
    InvalidPrime,

    /// The modulus is too small to encrypt with.
    #[error("invalid modulus")]
    InvalidModulus,

    /// No key has been derived yet.
    #[error("no key has been set")]
    KeyNotSet,

    /// The block value is not smaller than the modulus.
    #[error("block value out of range for modulus")]
    OutOfRange,

    /// An integer needs more bytes than a block holds.
    #[error("integer does not fit in a block")]
    BlockOverflow,

    /// A slice of the wrong length was used as a block.
    #[error("invalid block length {len}, expected {}", crate::block::BLOCK_SIZE)]
    InvalidBlockLength {
        /// Length of the rejected slice.
        len: usize,
    },

    /// Internal error, e.g. the CRT self-check failed.
    #[error("internal error")]
    Internal,
}

/// Names a component of the `(p, q, d)` key triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyComponent {
    /// First prime factor.
    P,
    /// Second prime factor.
    Q,
    /// Private exponent.
    D,
}

impl KeyComponent {
    /// Components in key file order.
    pub const ALL: [KeyComponent; 3] = [KeyComponent::P, KeyComponent::Q, KeyComponent::D];
}

impl fmt::Display for KeyComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KeyComponent::P => "p",
            KeyComponent::Q => "q",
            KeyComponent::D => "d",
        })
    }
}
