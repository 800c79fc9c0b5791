//! Cryptographic primitives for the secure envelope.
//!
//! The algorithms here are part of the wire format and must not change:
//! RSA-2048 keypairs, AES-256-GCM for payload encryption (nonce prepended
//! to the ciphertext), RSA-OAEP-SHA256 for key wrapping, and detached
//! RSA-PKCS#1 v1.5 SHA-256 signatures.
//!
//! All operations are stateless free functions and safe for concurrent use.

mod hybrid;
mod keys;
mod signing;

pub use hybrid::{decrypt, encrypt, AES_KEY_SIZE, NONCE_SIZE};
pub use keys::{generate_keypair, RSA_KEY_BITS};
pub use signing::{sign, verify};

/// Errors that can occur during cryptographic operations.
///
/// Decryption and verification failures are collapsed into the single
/// opaque `Authentication` variant so callers cannot tell which step of
/// the pipeline rejected a tampered message.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    /// Malformed PEM, wrong key type, or bad ciphertext framing.
    #[error("malformed cryptographic material: {0}")]
    Format(String),
    /// Signature or AEAD verification failed. Deliberately opaque.
    #[error("message authentication failed")]
    Authentication,
    /// RNG or primitive failure outside the authenticated path.
    #[error("crypto internal error: {0}")]
    Internal(String),
}
