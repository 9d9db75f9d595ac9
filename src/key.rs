use core::fmt;
use std::path::Path;

use num_bigint::{BigUint, IntoBigUint, ModInverse};
use num_integer::Integer;
use num_traits::{One, Zero};
use tracing::{debug, warn};
use zeroize::Zeroize;

use crate::algorithms::EXP;
use crate::block::Block;
use crate::cipher::RangePolicy;
use crate::errors::{Error, KeyComponent, Result};
use crate::keyfile;
use crate::raw;
use crate::traits::{BlockEncryptor, PrivateKeyParts, PublicKeyParts};

/// Derived private key state: the `(p, q, d)` triple plus the CRT values
/// computed from it.
///
/// Every field is recomputed on derivation; the value is immutable
/// afterwards and zeroized on drop.
#[derive(Clone)]
pub struct KeyMaterial {
    /// Modulus, `p * q`
    n: BigUint,
    /// Public exponent
    e: BigUint,
    /// Private exponent
    d: BigUint,
    p: BigUint,
    q: BigUint,
    /// D mod (P-1)
    dp: BigUint,
    /// D mod (Q-1)
    dq: BigUint,
    /// P^-1 mod Q
    u: BigUint,
}

impl KeyMaterial {
    /// Derives key material from the two primes and the private exponent.
    ///
    /// Primality is not checked. Fails with [`Error::InvalidPrime`] if either
    /// factor is below 2 and with [`Error::InvalidKeyRelationship`] if `p`
    /// has no inverse modulo `q`.
    pub fn from_components(p: BigUint, q: BigUint, d: BigUint) -> Result<KeyMaterial> {
        if p.is_zero() || p.is_one() || q.is_zero() || q.is_one() {
            return Err(Error::InvalidPrime);
        }
        if !p.gcd(&q).is_one() {
            return Err(Error::InvalidKeyRelationship);
        }

        let u = (&p % &q)
            .mod_inverse(&q)
            .and_then(|u| u.into_biguint())
            .ok_or(Error::InvalidKeyRelationship)?;

        let dp = &d % (&p - BigUint::one());
        let dq = &d % (&q - BigUint::one());
        let n = &p * &q;

        debug!(bits = n.bits(), "derived RSA key material");

        Ok(KeyMaterial {
            n,
            e: BigUint::from(EXP),
            d,
            p,
            q,
            dp,
            dq,
            u,
        })
    }

    /// Derives key material from base-10 text for `p`, `q` and `d`.
    ///
    /// ASCII whitespace anywhere in a number is ignored; anything else that
    /// is not a decimal digit yields [`Error::MalformedKeyText`].
    pub fn from_decimal(p: &str, q: &str, d: &str) -> Result<KeyMaterial> {
        Self::from_decimal_bytes(p.as_bytes(), q.as_bytes(), d.as_bytes())
    }

    pub(crate) fn from_decimal_bytes(p: &[u8], q: &[u8], d: &[u8]) -> Result<KeyMaterial> {
        let p = parse_decimal(p, KeyComponent::P)?;
        let q = parse_decimal(q, KeyComponent::Q)?;
        let d = parse_decimal(d, KeyComponent::D)?;
        Self::from_components(p, q, d)
    }

    /// Reads a three-line key file (`p`, `q`, `d` in base 10) and derives
    /// key material from it.
    pub fn from_file(path: impl AsRef<Path>) -> Result<KeyMaterial> {
        let path = path.as_ref();
        keyfile::read_key_file(path)
            .and_then(|[p, q, d]| Self::from_decimal_bytes(&p, &q, &d))
            .inspect_err(|err| warn!(path = %path.display(), %err, "failed to load key file"))
    }

    /// Returns the public half of this key.
    pub fn to_public_key(&self) -> PublicKey {
        PublicKey::from(self)
    }
}

fn parse_decimal(text: &[u8], component: KeyComponent) -> Result<BigUint> {
    let mut digits: Vec<u8> = text
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();

    let parsed = if !digits.is_empty() && digits.iter().all(u8::is_ascii_digit) {
        BigUint::parse_bytes(&digits, 10)
    } else {
        None
    };
    digits.zeroize();

    parsed.ok_or(Error::MalformedKeyText { component })
}

impl PublicKeyParts for KeyMaterial {
    fn n(&self) -> &BigUint {
        &self.n
    }

    fn e(&self) -> &BigUint {
        &self.e
    }
}

impl PrivateKeyParts for KeyMaterial {
    fn d(&self) -> &BigUint {
        &self.d
    }

    fn p(&self) -> &BigUint {
        &self.p
    }

    fn q(&self) -> &BigUint {
        &self.q
    }

    fn dp(&self) -> &BigUint {
        &self.dp
    }

    fn dq(&self) -> &BigUint {
        &self.dq
    }

    fn u(&self) -> &BigUint {
        &self.u
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("bits", &self.n.bits())
            .finish_non_exhaustive()
    }
}

impl PartialEq for KeyMaterial {
    #[inline]
    fn eq(&self, other: &KeyMaterial) -> bool {
        self.n == other.n && self.d == other.d && self.p == other.p && self.q == other.q
    }
}

impl Eq for KeyMaterial {}

impl Zeroize for KeyMaterial {
    fn zeroize(&mut self) {
        self.d.zeroize();
        self.p.zeroize();
        self.q.zeroize();
        self.dp.zeroize();
        self.dq.zeroize();
        self.u.zeroize();
    }
}

impl Drop for KeyMaterial {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// The public half of a key, for peers that only encrypt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    n: BigUint,
    e: BigUint,
    range_policy: RangePolicy,
}

impl PublicKey {
    /// Builds a public key from a modulus.
    pub fn new(n: BigUint) -> Result<PublicKey> {
        if n <= BigUint::one() {
            return Err(Error::InvalidModulus);
        }

        Ok(PublicKey {
            n,
            e: BigUint::from(EXP),
            range_policy: RangePolicy::default(),
        })
    }

    /// Builds a public key from a modulus block produced by
    /// [`KeyedCipher::export_modulus`](crate::KeyedCipher::export_modulus).
    pub fn from_modulus_block(block: &Block) -> Result<PublicKey> {
        Self::new(block.to_biguint())
    }

    /// Sets how blocks whose value is not below the modulus are treated.
    pub fn with_range_policy(mut self, range_policy: RangePolicy) -> Self {
        self.range_policy = range_policy;
        self
    }

    /// Encodes the modulus as a block.
    pub fn to_modulus_block(&self) -> Result<Block> {
        Block::from_biguint(&self.n)
    }

    /// Encrypt the given block.
    pub fn encrypt(&self, block: &Block) -> Result<Block> {
        raw::encrypt_block(self, self.range_policy, block)
    }
}

impl PublicKeyParts for PublicKey {
    fn n(&self) -> &BigUint {
        &self.n
    }

    fn e(&self) -> &BigUint {
        &self.e
    }
}

impl BlockEncryptor for PublicKey {
    fn encrypt_block(&self, block: &Block) -> Result<Block> {
        self.encrypt(block)
    }
}

impl From<&KeyMaterial> for PublicKey {
    fn from(key: &KeyMaterial) -> Self {
        PublicKey {
            n: key.n.clone(),
            e: key.e.clone(),
            range_policy: RangePolicy::default(),
        }
    }
}
