//! Verify mode: derive the address of an existing private key.

use zeroize::Zeroizing;

use crate::crypto::{Address, Keypair};
use crate::error::Result;

const PROMPT: &str = "Enter private key hex (without 0x): ";

/// Where verify mode reads the private key from.
#[derive(Debug, Clone, Copy)]
pub enum KeySource<'a> {
    /// Read from the terminal without echo
    Prompt,
    /// Given on the command line
    Hex(&'a str),
}

impl<'a> KeySource<'a> {
    pub fn from_flag(priv_hex: Option<&'a str>) -> Self {
        priv_hex.map_or(KeySource::Prompt, KeySource::Hex)
    }

    /// Obtains the key material.
    pub fn read(self) -> Result<Zeroizing<String>> {
        match self {
            KeySource::Prompt => Ok(Zeroizing::new(rpassword::prompt_password(PROMPT)?)),
            KeySource::Hex(hex) => Ok(Zeroizing::new(hex.to_owned())),
        }
    }
}

/// Derives the address for a hex-encoded private key.
pub fn derive_address(priv_hex: &str) -> Result<Address> {
    Ok(*Keypair::from_hex(priv_hex)?.address())
}
