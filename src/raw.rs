//! Block-level wrappers around the raw integer primitives.

use num_bigint::BigUint;
use tracing::trace;
use zeroize::Zeroizing;

use crate::algorithms::rsa::{rsa_decrypt, rsa_decrypt_and_check, rsa_encrypt};
use crate::block::Block;
use crate::cipher::RangePolicy;
use crate::errors::{Error, Result};
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// Decodes `block` and applies the range policy against the key's modulus.
fn decode_in_range<K: PublicKeyParts>(
    key: &K,
    range_policy: RangePolicy,
    block: &Block,
) -> Result<Zeroizing<BigUint>> {
    let x = Zeroizing::new(block.to_biguint());
    if range_policy == RangePolicy::Reject && &*x >= key.n() {
        return Err(Error::OutOfRange);
    }
    Ok(x)
}

pub(crate) fn encrypt_block<K: PublicKeyParts>(
    key: &K,
    range_policy: RangePolicy,
    block: &Block,
) -> Result<Block> {
    let m = decode_in_range(key, range_policy, block)?;
    let c = rsa_encrypt(key, &m);
    trace!(bits = c.bits(), "encrypted block");
    Block::from_biguint(&c)
}

pub(crate) fn decrypt_block<K: PrivateKeyParts>(
    key: &K,
    range_policy: RangePolicy,
    check_crt: bool,
    block: &Block,
) -> Result<Block> {
    let c = decode_in_range(key, range_policy, block)?;
    let m = Zeroizing::new(if check_crt {
        rsa_decrypt_and_check(key, &c)?
    } else {
        rsa_decrypt(key, &c)?
    });
    trace!(checked = check_crt, "decrypted block");
    Block::from_biguint(&m)
}
