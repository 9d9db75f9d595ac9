//! Generic RSA implementation

use num_bigint::{BigInt, BigUint, IntoBigUint, Sign::Plus};
use num_traits::Signed;
use tracing::error;
use zeroize::{Zeroize, Zeroizing};

use crate::errors::{Error, Result};
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// ⚠️ Raw RSA encryption of m with the public key. No padding is performed.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// Use this function with great care! Raw RSA should never be used without an appropriate padding
/// or signature scheme. See the [module-level documentation][crate::hazmat] for more information.
#[inline]
pub fn rsa_encrypt<K: PublicKeyParts>(key: &K, m: &BigUint) -> BigUint {
    m.modpow(key.e(), key.n())
}

/// ⚠️ Performs raw RSA decryption using the precomputed CRT values.
///
/// Uses Garner's recombination with `u = p^-1 mod q`:
///
/// ```text
/// v1 = (c mod p)^dp mod p
/// v2 = (c mod q)^dq mod q
/// h  = (v2 - v1) * u mod q
/// m  = v1 + h * p
/// ```
///
/// A `c` at or above the modulus is reduced silently, i.e. the result is
/// `(c mod n)^d mod n`.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// Use this function with great care! Raw RSA should never be used without an appropriate padding
/// or signature scheme. See the [module-level documentation][crate::hazmat] for more information.
pub fn rsa_decrypt(priv_key: &impl PrivateKeyParts, c: &BigUint) -> Result<BigUint> {
    let p = priv_key.p();
    let q = priv_key.q();

    let v1 = Zeroizing::new((c % p).modpow(priv_key.dp(), p));
    let v2 = Zeroizing::new((c % q).modpow(priv_key.dq(), q));

    let mut q_int = BigInt::from_biguint(Plus, q.clone());
    let mut u_int = BigInt::from_biguint(Plus, priv_key.u().clone());

    let mut h = BigInt::from_biguint(Plus, (*v2).clone());
    h -= BigInt::from_biguint(Plus, (*v1).clone());
    h *= &u_int;
    // `%` keeps the sign of the dividend.
    h %= &q_int;
    if h.is_negative() {
        h += &q_int;
    }

    q_int.zeroize();
    u_int.zeroize();

    let h = Zeroizing::new(h.into_biguint().ok_or(Error::Internal)?);
    Ok(&*v1 + &*h * p)
}

/// ⚠️ Performs raw RSA decryption and verifies the CRT result.
///
/// The recovered `m` is re-encrypted and compared against `c mod n`, which
/// catches faults in the CRT computation or inconsistent key components.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// Use this function with great care! Raw RSA should never be used without an appropriate padding
/// or signature scheme. See the [module-level documentation][crate::hazmat] for more information.
pub fn rsa_decrypt_and_check(priv_key: &impl PrivateKeyParts, c: &BigUint) -> Result<BigUint> {
    let m = Zeroizing::new(rsa_decrypt(priv_key, c)?);

    let check = rsa_encrypt(priv_key, &m);
    if check != c % priv_key.n() {
        error!("CRT decryption self-check failed");
        return Err(Error::Internal);
    }

    Ok((*m).clone())
}

/// ⚠️ Performs raw RSA decryption as a single `c^d mod n` exponentiation,
/// without the CRT speedup.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// Use this function with great care! Raw RSA should never be used without an appropriate padding
/// or signature scheme. See the [module-level documentation][crate::hazmat] for more information.
#[cfg_attr(not(feature = "hazmat"), allow(dead_code))]
#[inline]
pub fn rsa_decrypt_direct(priv_key: &impl PrivateKeyParts, c: &BigUint) -> BigUint {
    c.modpow(priv_key.d(), priv_key.n())
}
