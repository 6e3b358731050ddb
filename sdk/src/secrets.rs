//! Password-based encryption for secrets kept in configuration files.
//!
//! Values are AES-256-GCM encrypted under a key derived with
//! PBKDF2-HMAC-SHA256 from a master password and a per-value salt. The
//! stored form is `base64(nonce || ciphertext)` plus the base64 salt.

use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, AeadCore, KeyInit},
};
use base64::{Engine as _, engine::general_purpose};
use pbkdf2::pbkdf2_hmac;
use rand::{RngCore, rngs::OsRng};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;
use zeroize::{ZeroizeOnDrop, Zeroizing};

const PBKDF2_ITERATIONS: u32 = 100_000;
const SALT_LENGTH: usize = 32;
const KEY_LENGTH: usize = 32;
const NONCE_LENGTH: usize = 12;

#[derive(Debug, Error)]
pub enum EncryptionError {
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),
    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),
    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),
}

#[derive(ZeroizeOnDrop)]
struct SecureKey([u8; KEY_LENGTH]);

/// AES-256-GCM cipher bound to one salt.
pub struct SecretCipher {
    salt: [u8; SALT_LENGTH],
}

impl SecretCipher {
    /// Cipher with a fresh random salt.
    pub fn new() -> Self {
        let mut salt = [0u8; SALT_LENGTH];
        OsRng.fill_bytes(&mut salt);
        Self { salt }
    }

    pub fn with_salt(salt: [u8; SALT_LENGTH]) -> Self {
        Self { salt }
    }

    pub fn salt_base64(&self) -> String {
        general_purpose::STANDARD.encode(self.salt)
    }

    pub fn from_salt_base64(salt_b64: &str) -> Result<Self, EncryptionError> {
        let salt_bytes = general_purpose::STANDARD
            .decode(salt_b64.trim())
            .map_err(|e| EncryptionError::InvalidData(format!("Invalid salt base64: {e}")))?;

        let salt: [u8; SALT_LENGTH] = salt_bytes.as_slice().try_into().map_err(|_| {
            EncryptionError::InvalidData(format!(
                "Salt length must be {} bytes, got {}",
                SALT_LENGTH,
                salt_bytes.len()
            ))
        })?;
        Ok(Self::with_salt(salt))
    }

    fn cipher(&self, password: &str) -> Result<Aes256Gcm, EncryptionError> {
        let mut key = SecureKey([0u8; KEY_LENGTH]);
        pbkdf2_hmac::<Sha256>(password.as_bytes(), &self.salt, PBKDF2_ITERATIONS, &mut key.0);
        Aes256Gcm::new_from_slice(&key.0)
            .map_err(|e| EncryptionError::KeyDerivation(format!("Invalid key: {e}")))
    }

    pub fn encrypt(&self, plaintext: &str, password: &str) -> Result<String, EncryptionError> {
        if plaintext.trim().is_empty() {
            return Err(EncryptionError::InvalidData(
                "Secret cannot be empty".to_string(),
            ));
        }
        if password.trim().is_empty() {
            return Err(EncryptionError::InvalidData(
                "Password cannot be empty".to_string(),
            ));
        }

        let cipher = self.cipher(password)?;
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = cipher.encrypt(&nonce, plaintext.as_bytes()).map_err(|e| {
            EncryptionError::EncryptionFailed(format!("AES-GCM encryption failed: {e}"))
        })?;

        let mut combined = Vec::with_capacity(NONCE_LENGTH + ciphertext.len());
        combined.extend_from_slice(&nonce);
        combined.extend_from_slice(&ciphertext);
        Ok(general_purpose::STANDARD.encode(combined))
    }

    pub fn decrypt(
        &self,
        encrypted: &str,
        password: &str,
    ) -> Result<Zeroizing<String>, EncryptionError> {
        if encrypted.trim().is_empty() {
            return Err(EncryptionError::InvalidData(
                "Encrypted data cannot be empty".to_string(),
            ));
        }
        if password.trim().is_empty() {
            return Err(EncryptionError::InvalidData(
                "Password cannot be empty".to_string(),
            ));
        }

        let combined = general_purpose::STANDARD
            .decode(encrypted.trim())
            .map_err(|e| EncryptionError::InvalidData(format!("Invalid base64: {e}")))?;
        if combined.len() <= NONCE_LENGTH {
            return Err(EncryptionError::InvalidData(
                "Encrypted data too short".to_string(),
            ));
        }

        let (nonce_bytes, ciphertext) = combined.split_at(NONCE_LENGTH);
        let plaintext = self
            .cipher(password)?
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|_| {
                EncryptionError::DecryptionFailed(
                    "wrong password or corrupted data".to_string(),
                )
            })?;

        String::from_utf8(plaintext)
            .map(Zeroizing::new)
            .map_err(|e| EncryptionError::DecryptionFailed(format!("Invalid UTF-8: {e}")))
    }
}

impl Default for SecretCipher {
    fn default() -> Self {
        Self::new()
    }
}

/// An encrypted value as stored in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedSecret {
    pub value: String,
    pub salt: String,
}

impl EncryptedSecret {
    /// Encrypt `plaintext` under a fresh salt.
    pub fn seal(plaintext: &str, password: &str) -> Result<Self, EncryptionError> {
        let cipher = SecretCipher::new();
        Ok(Self {
            value: cipher.encrypt(plaintext, password)?,
            salt: cipher.salt_base64(),
        })
    }

    pub fn open(&self, password: &str) -> Result<Zeroizing<String>, EncryptionError> {
        SecretCipher::from_salt_base64(&self.salt)?.decrypt(&self.value, password)
    }
}
