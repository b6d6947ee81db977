//! Non-verifying token inspection.
//!
//! Nothing here checks a signature. Results are attacker-controlled and must
//! never feed an access decision; use [`IdentityEnvelope::authenticate`] for
//! that.
//!
//! [`IdentityEnvelope::authenticate`]: super::IdentityEnvelope::authenticate

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use serde_json::Value;

const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);

/// Decode the claim set of a raw JWT (no `Bearer ` prefix) without verifying it.
pub fn decode_claims_unverified(token: &str) -> Option<Value> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_LENIENT
        .decode(payload)
        .or_else(|_| STANDARD_LENIENT.decode(payload))
        .ok()?;
    serde_json::from_slice(&bytes).ok()
}
