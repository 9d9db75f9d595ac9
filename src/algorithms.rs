//! Useful algorithms related to RSA.

pub(crate) mod rsa;

/// Public exponent shared by every key.
pub(crate) const EXP: u32 = 65537;
