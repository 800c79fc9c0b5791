use rsa::Pkcs1v15Sign;
use sha2::{Digest, Sha256};

use super::keys::{parse_private_key, parse_public_key};
use super::CryptoError;

/// Produce a detached RSA-PKCS#1 v1.5 signature over the SHA-256 digest
/// of `msg`.
///
/// # Errors
///
/// Returns `CryptoError::Format` if the private key PEM cannot be parsed.
pub fn sign(msg: &[u8], private_key_pem: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let private = parse_private_key(private_key_pem)?;
    let digest = Sha256::digest(msg);
    private
        .sign(Pkcs1v15Sign::new::<Sha256>(), &digest)
        .map_err(|e| CryptoError::Internal(format!("signing failed: {e}")))
}

/// Check a detached signature produced by [`sign`].
///
/// # Errors
///
/// Returns `CryptoError::Authentication` if the signature does not match;
/// the reason is not disclosed.
pub fn verify(msg: &[u8], signature: &[u8], public_key_pem: &[u8]) -> Result<(), CryptoError> {
    let public = parse_public_key(public_key_pem)?;
    let digest = Sha256::digest(msg);
    public
        .verify(Pkcs1v15Sign::new::<Sha256>(), &digest, signature)
        .map_err(|_| CryptoError::Authentication)
}
