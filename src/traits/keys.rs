//! Traits related to the key components

use num_bigint::BigUint;

use crate::block::BLOCK_SIZE;

/// Components of an RSA public key.
pub trait PublicKeyParts {
    /// Returns the modulus of the key.
    fn n(&self) -> &BigUint;

    /// Returns the public exponent of the key.
    fn e(&self) -> &BigUint;

    /// Returns the modulus size in bytes.
    fn size(&self) -> usize {
        (self.n().bits() + 7) / 8
    }

    /// Returns the modulus byte length rounded down to a multiple of
    /// [`BLOCK_SIZE`].
    ///
    /// A 1024-bit modulus reports 128, a 1016-bit one reports 0. Framing
    /// layers that consume this value depend on the rounding, so it is not
    /// the modulus size; use [`PublicKeyParts::size`] for that.
    fn block_size_hint(&self) -> usize {
        self.size() / BLOCK_SIZE * BLOCK_SIZE
    }
}

/// Components of an RSA private key with precomputed CRT values.
pub trait PrivateKeyParts: PublicKeyParts {
    /// Returns the private exponent of the key.
    fn d(&self) -> &BigUint;

    /// Returns the first prime factor.
    fn p(&self) -> &BigUint;

    /// Returns the second prime factor.
    fn q(&self) -> &BigUint;

    /// Returns the precomputed dp value, D mod (P-1)
    fn dp(&self) -> &BigUint;

    /// Returns the precomputed dq value, D mod (Q-1)
    fn dq(&self) -> &BigUint;

    /// Returns the precomputed CRT coefficient, P^-1 mod Q
    fn u(&self) -> &BigUint;
}
