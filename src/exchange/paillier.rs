// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Paillier encryption of order amounts.
//!
//! Only the public half is needed here: `c = g^m * r^n mod n^2` with a
//! fresh random `r` per ciphertext.

use num_bigint::{BigUint, RandBigInt};

use crate::error::ClientError;

/// Modulus of the order book's public key.
const ORDER_BOOK_MODULUS: &str = "2110635290356708079658926219106600858277";

/// Paillier public key `(n, g)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaillierPublicKey {
    n: BigUint,
    g: BigUint,
    n_squared: BigUint,
}

impl PaillierPublicKey {
    /// Key with the usual generator `g = n + 1`.
    pub fn new(n: BigUint) -> Self {
        let g = &n + 1u32;
        let n_squared = &n * &n;
        Self { n, g, n_squared }
    }

    /// Public key the order intake decrypts with.
    pub fn order_book() -> Result<Self, ClientError> {
        let n = ORDER_BOOK_MODULUS
            .parse::<BigUint>()
            .map_err(|e| ClientError::Validation(format!("invalid modulus: {e}")))?;
        Ok(Self::new(n))
    }

    pub fn n(&self) -> &BigUint {
        &self.n
    }

    pub fn n_squared(&self) -> &BigUint {
        &self.n_squared
    }

    /// Encrypt `m` with a random nonce.
    pub fn encrypt(&self, m: &BigUint) -> Result<BigUint, ClientError> {
        let r = rand::thread_rng().gen_biguint_range(&BigUint::from(1u32), &self.n);
        self.encrypt_with_nonce(m, &r)
    }

    /// Encrypt `m` with a caller-chosen nonce `r`.
    pub fn encrypt_with_nonce(&self, m: &BigUint, r: &BigUint) -> Result<BigUint, ClientError> {
        if m >= &self.n {
            return Err(ClientError::Validation(
                "amount exceeds the encryption modulus".to_string(),
            ));
        }
        let gm = self.g.modpow(m, &self.n_squared);
        let rn = r.modpow(&self.n, &self.n_squared);
        Ok((gm * rn) % &self.n_squared)
    }
}

/// Convert an entered order amount into a plaintext.
///
/// Only plain decimal digits are accepted, so the value is taken exactly.
pub fn plaintext_from_amount(amount: &str) -> Result<BigUint, ClientError> {
    let digits = amount.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ClientError::Validation(format!(
            "amount must be a non-negative integer to encrypt, got {amount:?}"
        )));
    }
    digits
        .parse::<BigUint>()
        .map_err(|e| ClientError::Validation(format!("invalid amount {amount:?}: {e}")))
}
