//! Random keypair generation.

use rand::rngs::OsRng;
use rand::RngCore;
use secp256k1::{All, Secp256k1, SecretKey};
use zeroize::Zeroizing;

use super::Keypair;
use crate::error::Result;

/// Source of fresh candidate keypairs.
///
/// Each producer owns its own generator, so implementations may keep
/// mutable local state without synchronisation.
pub trait KeyGenerator: Send {
    /// Produces one new keypair.
    ///
    /// An error means the generator cannot continue and the search must
    /// be aborted.
    fn generate(&mut self) -> Result<Keypair>;
}

/// Generates keys from the operating system CSPRNG.
#[derive(Clone)]
pub struct Secp256k1Generator {
    secp: Secp256k1<All>,
}

impl Secp256k1Generator {
    pub fn new() -> Self {
        Self {
            secp: Secp256k1::new(),
        }
    }
}

impl Default for Secp256k1Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyGenerator for Secp256k1Generator {
    fn generate(&mut self) -> Result<Keypair> {
        let mut bytes = Zeroizing::new([0u8; 32]);
        loop {
            OsRng.try_fill_bytes(bytes.as_mut_slice())?;
            // Zero or out-of-range scalars are astronomically rare; draw again.
            if let Ok(secret_key) = SecretKey::from_slice(bytes.as_slice()) {
                return Ok(Keypair::from_secret(&self.secp, &secret_key));
            }
        }
    }
}
