//! The key codec: a small structured key descriptor map, with shape
//! validation dispatched on key-type (spec §3.3, §4.3).
use std::collections::BTreeMap;

use crate::algorithm::Algorithm;
use crate::codec;
use crate::error::{Error, Result};
use crate::value::{MapKey, Value};

/// Key-type discriminant (map key 1).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyType {
    /// Elliptic curve key (kty = 2).
    Ec,
    /// RSA key (kty = 3).
    Rsa,
}

impl KeyType {
    fn to_i64(self) -> i64 {
        match self {
            KeyType::Ec => 2,
            KeyType::Rsa => 3,
        }
    }

    fn from_i64(v: i64) -> Result<KeyType> {
        match v {
            2 => Ok(KeyType::Ec),
            3 => Ok(KeyType::Rsa),
            _ => Err(Error::MalformedKeyStructure(format!(
                "unsupported key type {}",
                v
            ))),
        }
    }
}

/// A decoded and shape-validated key descriptor.
#[derive(Clone, Debug, PartialEq)]
pub enum Key {
    /// kty=2: requires curve (-1), x (-2), y (-3). Only curve-id 1 is
    /// accepted (spec §3.3).
    Ec {
        alg: Algorithm,
        curve: i64,
        x: Vec<u8>,
        y: Vec<u8>,
    },
    /// kty=3: requires n (-1), e (-2).
    Rsa {
        alg: Algorithm,
        n: Vec<u8>,
        e: Vec<u8>,
    },
}

const KTY: i64 = 1;
const ALG: i64 = 3;
const EC_CURVE: i64 = -1;
const EC_X: i64 = -2;
const EC_Y: i64 = -3;
const RSA_N: i64 = -1;
const RSA_E: i64 = -2;
const ACCEPTED_EC_CURVE: i64 = 1;

impl Key {
    /// Encode this key as an untagged map via the byte codec.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let value = self.to_value();
        codec::encode(&value)
    }

    fn to_value(&self) -> Value {
        let mut map = BTreeMap::new();
        match self {
            Key::Ec { alg, curve, x, y } => {
                map.insert(MapKey::from(KTY), Value::uint(KeyType::Ec.to_i64() as u64));
                map.insert(MapKey::from(ALG), Value::from_i64(alg.value()));
                map.insert(MapKey::from(EC_CURVE), Value::from_i64(*curve));
                map.insert(MapKey::from(EC_X), Value::Bytes(x.clone()));
                map.insert(MapKey::from(EC_Y), Value::Bytes(y.clone()));
            }
            Key::Rsa { alg, n, e } => {
                map.insert(MapKey::from(KTY), Value::uint(KeyType::Rsa.to_i64() as u64));
                map.insert(MapKey::from(ALG), Value::from_i64(alg.value()));
                map.insert(MapKey::from(RSA_N), Value::Bytes(n.clone()));
                map.insert(MapKey::from(RSA_E), Value::Bytes(e.clone()));
            }
        }
        Value::Map(map)
    }

    /// Decode and shape-validate a key descriptor from a byte buffer.
    pub fn decode(buffer: &[u8]) -> Result<Key> {
        let (value, _) = codec::decode_first_item(buffer, 0)?;
        let map = match value {
            Value::Map(m) => m,
            _ => return Err(Error::ExpectedMap("key")),
        };
        Key::from_map(&map)
    }

    fn from_map(map: &BTreeMap<MapKey, Value>) -> Result<Key> {
        let kty = require_int(map, KTY, "kty")?;
        let kty = KeyType::from_i64(kty)?;
        let alg_value = map
            .get(&MapKey::from(ALG))
            .ok_or_else(|| Error::MalformedKeyStructure("missing 'alg'".to_string()))?;
        let alg = Algorithm::try_from_value(alg_value)
            .map_err(|_| Error::MalformedKeyStructure("'alg' not in algorithm registry".to_string()))?;
        let allowed: &[i64] = match kty {
            KeyType::Ec => &[KTY, ALG, EC_CURVE, EC_X, EC_Y],
            KeyType::Rsa => &[KTY, ALG, RSA_N, RSA_E],
        };
        reject_unknown_keys(map, allowed)?;
        match kty {
            KeyType::Ec => {
                let curve = require_int(map, EC_CURVE, "curve (-1)")?;
                if curve != ACCEPTED_EC_CURVE {
                    return Err(Error::MalformedKeyStructure(format!(
                        "unsupported EC curve id {}",
                        curve
                    )));
                }
                let x = require_bytes(map, EC_X, "x (-2)")?;
                let y = require_bytes(map, EC_Y, "y (-3)")?;
                Ok(Key::Ec { alg, curve, x, y })
            }
            KeyType::Rsa => {
                let n = require_bytes(map, RSA_N, "n (-1)")?;
                let e = require_bytes(map, RSA_E, "e (-2)")?;
                Ok(Key::Rsa { alg, n, e })
            }
        }
    }
}

impl Value {
    fn from_i64(v: i64) -> Value {
        if v < 0 {
            Value::nint((-1 - v) as u64)
        } else {
            Value::uint(v as u64)
        }
    }
}

/// Reject any map key not in `allowed`, per spec §3.3 ("Other keys are
/// rejected by the validator").
fn reject_unknown_keys(map: &BTreeMap<MapKey, Value>, allowed: &[i64]) -> Result<()> {
    for key in map.keys() {
        let as_int = match key {
            MapKey::Int(i) => i.as_i64(),
            MapKey::Text(_) => None,
        };
        match as_int {
            Some(n) if allowed.contains(&n) => {}
            _ => {
                return Err(Error::MalformedKeyStructure(format!(
                    "unexpected key '{}' in key structure",
                    key
                )))
            }
        }
    }
    Ok(())
}

fn require_int(map: &BTreeMap<MapKey, Value>, key: i64, field: &'static str) -> Result<i64> {
    map.get(&MapKey::from(key))
        .and_then(Value::as_i64)
        .ok_or_else(|| Error::MalformedKeyStructure(format!("missing or non-integer '{}'", field)))
}

fn require_bytes(map: &BTreeMap<MapKey, Value>, key: i64, field: &'static str) -> Result<Vec<u8>> {
    match map.get(&MapKey::from(key)) {
        Some(Value::Bytes(b)) => Ok(b.clone()),
        _ => Err(Error::MalformedKeyStructure(format!(
            "missing or non-bytes '{}'",
            field
        ))),
    }
}
