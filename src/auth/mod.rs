//! Identity envelope: bcrypt passwords, encrypted identity snapshots and the
//! signed bearer tokens that carry them.

pub mod cipher;
pub mod envelope;
pub mod inspect;
pub mod password;

pub use cipher::{normalize_key, CipherError, EncryptedBlob, PayloadCipher};
pub use envelope::{AuthFailure, EnvelopeClaims, EnvelopeError, IdentityEnvelope, BEARER_PREFIX};
pub use password::{
    hash_password, hash_password_blocking, verify_password, verify_password_blocking, PasswordError,
};
