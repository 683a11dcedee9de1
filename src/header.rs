//! Header parameter registry (spec §6.2) and protected-header validation
//! (spec §4.2.1).
use crate::algorithm::Algorithm;
use crate::error::{Error, Result};
use crate::value::{MapKey, Value};

/// Algorithm (integer, algorithm registry).
pub const ALG: i64 = 1;
/// Critical parameters (array of integer).
pub const CRIT: i64 = 2;
/// Content type (text).
pub const CTYP: i64 = 3;
/// Key identifier (bytes).
pub const KID: i64 = 4;
/// Initialization vector (bytes).
pub const IV: i64 = 5;
/// Partial initialization vector (bytes).
pub const PARTIAL_IV: i64 = 6;
/// Counter signature (bytes).
pub const COUNTER_SIGNATURE: i64 = 7;
/// Salt (bytes).
pub const SALT: i64 = 8;
/// Counter signature, single-signer form (bytes).
pub const COUNTER_SIGNATURE0: i64 = 9;
/// X.509 certificate chain (bytes).
pub const X5CHAIN: i64 = 33;
/// X.509 certificate thumbprint (bytes).
pub const X5T: i64 = 34;

/// Validate a protected header map per spec §4.2.1: it must contain `alg`
/// (key 1) with a value from the algorithm registry. All other entries are
/// passed through unvalidated — this codec does not enforce value types
/// for header fields beyond `alg`.
pub fn validate_protected_header(header: &Value) -> Result<()> {
    let map = match header {
        Value::Map(m) => m,
        _ => return Err(Error::ExpectedMap("protected header")),
    };
    let alg_value = map
        .get(&MapKey::from(ALG))
        .ok_or(Error::MissingAlgorithm)?;
    Algorithm::try_from_value(alg_value).map_err(|_| Error::UnsupportedAlgorithm)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn missing_alg_fails_with_exact_message() {
        let header = Value::Map(BTreeMap::new());
        let err = validate_protected_header(&header).unwrap_err();
        assert_eq!(err.to_string(), "Protected header must contain 'alg' parameter");
    }

    #[test]
    fn unsupported_alg_fails_with_exact_message() {
        let mut map = BTreeMap::new();
        map.insert(MapKey::from(ALG), Value::uint(999));
        let header = Value::Map(map);
        let err = validate_protected_header(&header).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid or unsupported algorithm in protected header"
        );
    }

    #[test]
    fn es256_alg_validates() {
        let mut map = BTreeMap::new();
        map.insert(MapKey::from(ALG), Value::nint(6)); // -7 == ES256
        let header = Value::Map(map);
        assert!(validate_protected_header(&header).is_ok());
    }
}
