use serde::{Deserialize, Serialize};

use crate::crypto::{self, CryptoError};

use super::payload::SharedPayload;

/// The on-wire message: hybrid-encrypted payload, wrapped key, detached
/// signature, and the routing header.
///
/// No plaintext of the payload appears anywhere in the envelope. The
/// header ids are not separately signed, but they are bound to the
/// ciphertext through the AAD: swapping either id makes decryption fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecureEnvelope {
    #[serde(rename = "SenderID")]
    pub sender_id: String,
    #[serde(rename = "RecipientID")]
    pub recipient_id: String,
    /// RSA-OAEP-wrapped 256-bit AES key.
    #[serde(rename = "EncryptedSymmetricKey", with = "base64_bytes")]
    pub encrypted_symmetric_key: Vec<u8>,
    /// AES-256-GCM ciphertext with the nonce prepended.
    #[serde(rename = "EncryptedData", with = "base64_bytes")]
    pub encrypted_data: Vec<u8>,
    /// RSA-PKCS#1 v1.5 SHA-256 signature over `encrypted_data`.
    #[serde(rename = "Signature", with = "base64_bytes")]
    pub signature: Vec<u8>,
}

#[derive(thiserror::Error, Debug)]
pub enum EnvelopeError {
    #[error(transparent)]
    Crypto(#[from] CryptoError),
    #[error("payload serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The additional authenticated data binding an envelope to its routing
/// header: `utf8(sender_id ":" recipient_id)`.
pub fn routing_aad(sender_id: &str, recipient_id: &str) -> Vec<u8> {
    format!("{sender_id}:{recipient_id}").into_bytes()
}

/// Encrypt and sign a payload into a [`SecureEnvelope`].
///
/// The signature covers the ciphertext rather than the plaintext, so an
/// attacker cannot strip the encryption layer and leave a valid signature
/// behind.
pub fn seal(
    payload: &SharedPayload,
    sender_id: &str,
    recipient_id: &str,
    recipient_public_key_pem: &[u8],
    sender_private_key_pem: &[u8],
) -> Result<SecureEnvelope, EnvelopeError> {
    let payload_bytes = serde_json::to_vec(payload)?;
    let aad = routing_aad(sender_id, recipient_id);

    let (encrypted_symmetric_key, encrypted_data) =
        crypto::encrypt(&payload_bytes, &aad, recipient_public_key_pem)?;
    let signature = crypto::sign(&encrypted_data, sender_private_key_pem)?;

    Ok(SecureEnvelope {
        sender_id: sender_id.to_string(),
        recipient_id: recipient_id.to_string(),
        encrypted_symmetric_key,
        encrypted_data,
        signature,
    })
}

/// Verify, decrypt, and decode an incoming envelope.
///
/// The steps are strictly ordered: the signature over the ciphertext is
/// checked first, then the AAD is reconstructed from the envelope header
/// and the ciphertext opened, and only then is the payload parsed.
pub fn open(
    envelope: &SecureEnvelope,
    sender_public_key_pem: &[u8],
    recipient_private_key_pem: &[u8],
) -> Result<SharedPayload, EnvelopeError> {
    crypto::verify(
        &envelope.encrypted_data,
        &envelope.signature,
        sender_public_key_pem,
    )?;

    let aad = routing_aad(&envelope.sender_id, &envelope.recipient_id);
    let plaintext = crypto::decrypt(
        &envelope.encrypted_symmetric_key,
        &envelope.encrypted_data,
        &aad,
        recipient_private_key_pem,
    )?;

    Ok(serde_json::from_slice(&plaintext)?)
}

mod base64_bytes {
    //! Byte fields travel as base64 strings inside the JSON envelope.

    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        STANDARD.decode(text).map_err(serde::de::Error::custom)
    }
}
