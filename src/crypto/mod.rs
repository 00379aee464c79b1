//! Cryptographic primitives for the search.
//!
//! - `generator`: fresh keypairs from the OS random source
//! - `keypair`: secret key handling and address derivation
//! - `address`: Ethereum address renderings (hex, EIP-55)

mod address;
mod generator;
mod keypair;

pub use address::{Address, ADDRESS_HEX_LEN};
pub use generator::{KeyGenerator, Secp256k1Generator};
pub use keypair::Keypair;
