//! Cryptographic primitives for seal verification: hashing, public-key
//! loading, and ECDSA / RSA signature checks.
#![deny(warnings, clippy::all, clippy::pedantic)]
#![warn(missing_docs)]

pub mod error;
pub mod hash;
pub mod key;
pub mod scheme;
pub mod verify;

pub use error::CryptoError;
pub use hash::{digest, sha256_hex, HashAlgorithm, Hasher};
pub use key::PublicKey;
pub use scheme::SignatureScheme;
pub use verify::{verify, SignatureBytes};
