//! AES-256-CBC encryption of token payloads.
//!
//! Blobs travel as `<iv_hex>:<ciphertext_hex>` so tokens issued by earlier
//! deployments keep decrypting.

use aes::Aes256;
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::RngCore;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

pub const KEY_LEN: usize = 32;
pub const IV_LEN: usize = 16;
const KEY_FILLER: u8 = b'0';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CipherError {
    #[error("blob is not in <iv>:<ciphertext> form")]
    MalformedBlob,

    #[error("blob is not valid hex")]
    InvalidHex,

    #[error("initialization vector must be {IV_LEN} bytes, got {0}")]
    InvalidIvLength(usize),

    #[error("ciphertext could not be decrypted")]
    Decrypt,
}

/// Fit an arbitrary configured key to the cipher's 32-byte key.
///
/// Short keys are right-padded with ASCII `'0'`, long keys lose their tail.
/// This is not a KDF; it exists so blobs from existing deployments keep
/// decrypting.
pub fn normalize_key(key: &str) -> [u8; KEY_LEN] {
    let mut out = [KEY_FILLER; KEY_LEN];
    let bytes = key.as_bytes();
    let n = bytes.len().min(KEY_LEN);
    out[..n].copy_from_slice(&bytes[..n]);
    out
}

/// Ciphertext plus the IV it was produced with.
#[derive(Clone, PartialEq, Eq)]
pub struct EncryptedBlob {
    pub iv: [u8; IV_LEN],
    pub ciphertext: Vec<u8>,
}

impl fmt::Display for EncryptedBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", hex::encode(self.iv), hex::encode(&self.ciphertext))
    }
}

impl fmt::Debug for EncryptedBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptedBlob")
            .field("iv", &hex::encode(self.iv))
            .field("ciphertext_len", &self.ciphertext.len())
            .finish()
    }
}

impl FromStr for EncryptedBlob {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (iv_hex, ct_hex) = s.split_once(':').ok_or(CipherError::MalformedBlob)?;

        let iv_bytes = hex::decode(iv_hex).map_err(|_| CipherError::InvalidHex)?;
        let iv: [u8; IV_LEN] = iv_bytes
            .as_slice()
            .try_into()
            .map_err(|_| CipherError::InvalidIvLength(iv_bytes.len()))?;
        let ciphertext = hex::decode(ct_hex).map_err(|_| CipherError::InvalidHex)?;

        Ok(Self { iv, ciphertext })
    }
}

/// Symmetric cipher bound to one normalized key.
#[derive(Clone)]
pub struct PayloadCipher {
    key: [u8; KEY_LEN],
}

impl fmt::Debug for PayloadCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PayloadCipher(<redacted>)")
    }
}

impl PayloadCipher {
    pub fn new(configured_key: &str) -> Self {
        Self {
            key: normalize_key(configured_key),
        }
    }

    /// Encrypt under a fresh random IV.
    pub fn encrypt(&self, plaintext: &[u8]) -> EncryptedBlob {
        let mut iv = [0u8; IV_LEN];
        rand::thread_rng().fill_bytes(&mut iv);

        let ciphertext = Aes256CbcEnc::new(&self.key.into(), &iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

        EncryptedBlob { iv, ciphertext }
    }

    pub fn decrypt(&self, blob: &EncryptedBlob) -> Result<Vec<u8>, CipherError> {
        if blob.ciphertext.is_empty() || blob.ciphertext.len() % IV_LEN != 0 {
            return Err(CipherError::Decrypt);
        }

        Aes256CbcDec::new(&self.key.into(), &blob.iv.into())
            .decrypt_padded_vec_mut::<Pkcs7>(&blob.ciphertext)
            .map_err(|_| CipherError::Decrypt)
    }

    pub fn decrypt_str(&self, blob: &str) -> Result<Vec<u8>, CipherError> {
        self.decrypt(&blob.parse()?)
    }
}
