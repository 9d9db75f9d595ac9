//! ⚠️ Low-level "hazmat" RSA functions.
//!
//! # ☢️️ WARNING: HAZARDOUS API ☢️
//!
//! This module holds the raw integer primitives behind [`KeyedCipher`][crate::KeyedCipher].
//! They apply textbook RSA to arbitrary integers without any padding and
//! without the range checks the cipher can be configured to perform.
//!
//! We do NOT recommend using them outside of code that frames and validates
//! its own inputs.

pub use crate::algorithms::rsa::{
    rsa_decrypt, rsa_decrypt_and_check, rsa_decrypt_direct, rsa_encrypt,
};
