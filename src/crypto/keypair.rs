//! secp256k1 keypairs and their derived addresses.

use std::fmt;

use secp256k1::{PublicKey, Secp256k1, SecretKey, Signing};
use zeroize::Zeroizing;

use super::Address;
use crate::error::{Error, Result};

/// A private key together with the address derived from it.
///
/// The secret is wiped when the keypair is dropped and never shows up in
/// `Debug` output.
pub struct Keypair {
    secret_key: Zeroizing<[u8; 32]>,
    address: Address,
}

impl Keypair {
    /// Builds a keypair from an already validated secret key.
    pub(crate) fn from_secret<C: Signing>(secp: &Secp256k1<C>, secret_key: &SecretKey) -> Self {
        let public_key = PublicKey::from_secret_key(secp, secret_key);
        Self {
            secret_key: Zeroizing::new(secret_key.secret_bytes()),
            address: Address::from_public_key(&public_key),
        }
    }

    /// Derives the keypair for raw secret bytes.
    ///
    /// Fails if the bytes are zero or not below the curve order.
    pub fn from_secret_key(secret_bytes: [u8; 32]) -> Result<Self> {
        let secret_bytes = Zeroizing::new(secret_bytes);
        let secret_key = SecretKey::from_slice(secret_bytes.as_slice())
            .map_err(|e| Error::InvalidKey(e.to_string()))?;
        Ok(Self::from_secret(&Secp256k1::signing_only(), &secret_key))
    }

    /// Parses a hex-encoded secret key, with or without a `0x` marker.
    pub fn from_hex(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let body = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        if body.len() != 64 {
            return Err(Error::InvalidKey(format!(
                "expected 64 hex characters, got {}",
                body.len()
            )));
        }

        let mut bytes = Zeroizing::new([0u8; 32]);
        hex::decode_to_slice(body, bytes.as_mut_slice())
            .map_err(|e| Error::InvalidKey(e.to_string()))?;
        Self::from_secret_key(*bytes)
    }

    /// Private key as lowercase hex with the `0x` marker.
    pub fn private_key_hex(&self) -> Zeroizing<String> {
        let body = Zeroizing::new(hex::encode(self.secret_key.as_slice()));
        Zeroizing::new(format!("0x{}", body.as_str()))
    }

    pub fn private_key_bytes(&self) -> &[u8; 32] {
        &self.secret_key
    }

    #[inline]
    pub fn address(&self) -> &Address {
        &self.address
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}
