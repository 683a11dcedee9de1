//! Algorithm registry (spec §6.3) and its validator.
use crate::error::{Error, Result};
use crate::value::Value;

/// A validated algorithm identifier: an integer drawn from the fixed
/// registry below. Constructed only via [`Algorithm::try_from_value`] or
/// [`Algorithm::try_from_i64`], so that any `Algorithm` in hand is known to
/// be registry-valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Algorithm(i64);

// Signatures
pub const ES256: i64 = -7;
pub const ES384: i64 = -35;
pub const ES512: i64 = -36;
pub const ED_DSA: i64 = -8;
pub const RS256: i64 = -257;
pub const RS384: i64 = -258;
pub const RS512: i64 = -259;
pub const PS256: i64 = -37;
pub const PS384: i64 = -38;
pub const PS512: i64 = -39;

// MACs
pub const HMAC_256_64: i64 = 4;
pub const HMAC_256_256: i64 = 5;
pub const HMAC_384_384: i64 = 6;
pub const HMAC_512_512: i64 = 7;

// AEAD
pub const AES_GCM_128: i64 = 1;
pub const AES_GCM_192: i64 = 2;
pub const AES_GCM_256: i64 = 3;
pub const CHACHA20_POLY1305: i64 = 24;
pub const AES_CCM_16_64_128: i64 = 10;
pub const AES_CCM_64_64_128: i64 = 12;
pub const AES_CCM_64_64_256: i64 = 13;
// The registry this codec validates against (spec §6.3) lists 10, 12, 13,
// 14, 30, 31, 32, 33 for the AES_CCM group — it omits 11 and includes 14,
// diverging from the real-world COSE AES-CCM assignment. Matched exactly
// as specified, not as the familiar COSE set.
pub const AES_CCM_14: i64 = 14;
pub const AES_CCM_16_128_128: i64 = 30;
pub const AES_CCM_16_128_256: i64 = 31;
pub const AES_CCM_64_128_128: i64 = 32;
pub const AES_CCM_64_128_256: i64 = 33;

// Key agreement
pub const DIRECT: i64 = -6;

const REGISTRY: &[i64] = &[
    ES256,
    ES384,
    ES512,
    ED_DSA,
    RS256,
    RS384,
    RS512,
    PS256,
    PS384,
    PS512,
    HMAC_256_64,
    HMAC_256_256,
    HMAC_384_384,
    HMAC_512_512,
    AES_GCM_128,
    AES_GCM_192,
    AES_GCM_256,
    CHACHA20_POLY1305,
    AES_CCM_16_64_128,
    AES_CCM_64_64_128,
    AES_CCM_64_64_256,
    AES_CCM_14,
    AES_CCM_16_128_128,
    AES_CCM_16_128_256,
    AES_CCM_64_128_128,
    AES_CCM_64_128_256,
    DIRECT,
];

impl Algorithm {
    /// The algorithm's integer identifier.
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Validate a raw identifier against the registry.
    pub fn try_from_i64(v: i64) -> Result<Algorithm> {
        if REGISTRY.contains(&v) {
            Ok(Algorithm(v))
        } else {
            Err(Error::UnsupportedAlgorithm)
        }
    }

    /// Validate a decoded [`Value`]: it must be an integer (`UInt` or
    /// `NInt`) whose value is in the registry.
    pub fn try_from_value(v: &Value) -> Result<Algorithm> {
        let n = v.as_i64().ok_or(Error::UnsupportedAlgorithm)?;
        Algorithm::try_from_i64(n)
    }
}
