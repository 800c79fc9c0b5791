use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use rsa::Oaep;
use sha2::Sha256;

use super::keys::{parse_private_key, parse_public_key};
use super::CryptoError;

/// Size of the per-message AES key in bytes (256 bits).
pub const AES_KEY_SIZE: usize = 32;
/// Size of the AES-GCM nonce in bytes.
pub const NONCE_SIZE: usize = 12;

/// Hybrid-encrypt `plaintext` for the holder of `recipient_public_key_pem`.
///
/// A fresh 32-byte AES key is sampled per message, the plaintext is sealed
/// with AES-256-GCM binding `aad`, and the AES key is wrapped with
/// RSA-OAEP-SHA256. The output ciphertext is `nonce || ciphertext || tag`
/// with the 12-byte nonce prepended.
///
/// Returns `(encrypted_key, encrypted_data)`.
///
/// # Errors
///
/// Returns `CryptoError::Format` for unparseable key material and
/// `CryptoError::Internal` on RNG failure.
pub fn encrypt(
    plaintext: &[u8],
    aad: &[u8],
    recipient_public_key_pem: &[u8],
) -> Result<(Vec<u8>, Vec<u8>), CryptoError> {
    let public = parse_public_key(recipient_public_key_pem)?;

    let mut aes_key = [0u8; AES_KEY_SIZE];
    getrandom::getrandom(&mut aes_key)
        .map_err(|e| CryptoError::Internal(format!("failed to sample AES key: {e}")))?;

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    getrandom::getrandom(&mut nonce_bytes)
        .map_err(|e| CryptoError::Internal(format!("failed to sample nonce: {e}")))?;

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&aes_key));
    let sealed = cipher
        .encrypt(
            Nonce::from_slice(&nonce_bytes),
            Payload {
                msg: plaintext,
                aad,
            },
        )
        .map_err(|_| CryptoError::Internal("AES-GCM encryption failed".to_string()))?;

    let mut encrypted_data = Vec::with_capacity(NONCE_SIZE + sealed.len());
    encrypted_data.extend_from_slice(&nonce_bytes);
    encrypted_data.extend_from_slice(&sealed);

    let mut rng = rand::rngs::OsRng;
    let encrypted_key = public
        .encrypt(&mut rng, Oaep::new::<Sha256>(), &aes_key)
        .map_err(|e| CryptoError::Internal(format!("failed to wrap AES key: {e}")))?;

    Ok((encrypted_key, encrypted_data))
}

/// Invert [`encrypt`].
///
/// Splits the leading 12 bytes as the nonce, unwraps the AES key with the
/// private key, and opens the AEAD with the supplied `aad`.
///
/// # Errors
///
/// Every failure past private-key parsing (wrong wrapped key, truncated
/// ciphertext, tag mismatch, AAD mismatch) is reported as the single opaque
/// `CryptoError::Authentication` so a tampering attacker learns nothing
/// about which check rejected the message.
pub fn decrypt(
    encrypted_key: &[u8],
    encrypted_data: &[u8],
    aad: &[u8],
    private_key_pem: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let private = parse_private_key(private_key_pem)?;

    let aes_key = private
        .decrypt(Oaep::new::<Sha256>(), encrypted_key)
        .map_err(|_| CryptoError::Authentication)?;
    if aes_key.len() != AES_KEY_SIZE {
        return Err(CryptoError::Authentication);
    }

    if encrypted_data.len() < NONCE_SIZE {
        return Err(CryptoError::Authentication);
    }
    let (nonce_bytes, sealed) = encrypted_data.split_at(NONCE_SIZE);

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&aes_key));
    cipher
        .decrypt(Nonce::from_slice(nonce_bytes), Payload { msg: sealed, aad })
        .map_err(|_| CryptoError::Authentication)
}
