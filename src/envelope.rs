//! The envelope codec: the six tagged composite structures of spec §3.2,
//! built on one shared scaffold rather than six copy-pasted routines
//! (spec §9, "Envelope-shape duplication").
use crate::codec;
use crate::error::{Error, Result};
use crate::header;
use crate::value::Value;

/// Tag numbers for the six envelopes (spec §6.4).
pub const TAG_ENCRYPT0: u64 = 16;
pub const TAG_MAC0: u64 = 17;
pub const TAG_SIGN1: u64 = 18;
pub const TAG_ENCRYPT: u64 = 96;
pub const TAG_MAC: u64 = 97;
pub const TAG_SIGN: u64 = 98;

/// A payload field that may be present as a byte string, or explicitly
/// absent (`null`), per the "payload (bytes ∨ null)" fields in spec §3.2.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
    Bytes(Vec<u8>),
    Null,
}

impl Payload {
    fn to_value(&self) -> Value {
        match self {
            Payload::Bytes(b) => Value::Bytes(b.clone()),
            Payload::Null => Value::Null,
        }
    }

    fn from_value(v: Value, field: &'static str) -> Result<Payload> {
        match v {
            Value::Bytes(b) => Ok(Payload::Bytes(b)),
            Value::Null => Ok(Payload::Null),
            _ => Err(Error::ExpectedBytes(field)),
        }
    }
}

/// One element of a `signatures` or `recipients` list: a nested
/// `[protected-bytes, unprotected-map, terminal]` array, independently
/// protected-header-validated (spec §4.2.2 step 4, §4.2.3 step 6).
#[derive(Clone, Debug, PartialEq)]
pub struct Triple {
    /// The serialised (and validated) protected header.
    pub protected: Vec<u8>,
    /// The unprotected header, accepted as-is.
    pub unprotected: Value,
    /// The terminal field: a signature, or a MAC tag / encrypted key.
    pub terminal: Value,
}

impl Triple {
    /// Build a `Triple` from an in-memory protected-header map, validating
    /// it and serialising it to bytes.
    pub fn new(protected: &Value, unprotected: Value, terminal: Value) -> Result<Triple> {
        header::validate_protected_header(protected)?;
        let protected_bytes = codec::encode(protected)?;
        Ok(Triple {
            protected: protected_bytes,
            unprotected,
            terminal,
        })
    }

    fn to_value(&self) -> Value {
        Value::Array(vec![
            Value::Bytes(self.protected.clone()),
            self.unprotected.clone(),
            self.terminal.clone(),
        ])
    }

    fn from_value(v: Value) -> Result<Triple> {
        let items = match v {
            Value::Array(items) => items,
            _ => return Err(Error::ExpectedArray("signature/recipient entry")),
        };
        if items.len() != 3 {
            return Err(Error::ArityMismatch {
                expected: 3,
                actual: items.len(),
            });
        }
        let mut it = items.into_iter();
        let protected_bytes = match it.next().unwrap() {
            Value::Bytes(b) => b,
            _ => return Err(Error::ExpectedBytes("signature/recipient protected header")),
        };
        let (protected_value, _) = codec::decode_first_item(&protected_bytes, 0)?;
        header::validate_protected_header(&protected_value)?;
        let unprotected = it.next().unwrap();
        if !matches!(unprotected, Value::Map(_)) {
            return Err(Error::ExpectedMap("signature/recipient unprotected header"));
        }
        let terminal = it.next().unwrap();
        if !matches!(terminal, Value::Bytes(_)) {
            return Err(Error::ExpectedBytes("signature/recipient terminal field"));
        }
        Ok(Triple {
            protected: protected_bytes,
            unprotected,
            terminal,
        })
    }

    /// Decode the protected header bytes back into a [`Value`] map.
    pub fn protected_header(&self) -> Result<Value> {
        let (v, _) = codec::decode_first_item(&self.protected, 0)?;
        Ok(v)
    }
}

/// Validate a protected header, serialise it to bytes, build the fixed-order
/// outer array, and wrap it in a [`Value::Tagged`] (spec §4.2.2).
fn encode_envelope(
    tag: u64,
    protected: &Value,
    unprotected: Value,
    rest: Vec<Value>,
) -> Result<Vec<u8>> {
    header::validate_protected_header(protected)?;
    let protected_bytes = codec::encode(protected)?;
    let mut fields = vec![Value::Bytes(protected_bytes), unprotected];
    fields.extend(rest);
    let tagged = Value::Tagged(tag, Box::new(Value::Array(fields)));
    codec::encode(&tagged)
}

/// Decode and tag-check an envelope buffer, returning its protected-header
/// bytes, its unprotected header, and the remaining envelope-specific
/// fields in order (spec §4.2.3 steps 1-5). The protected header is
/// decoded and validated as part of this call.
fn decode_envelope(
    buffer: &[u8],
    expected_tag: u64,
    expected_arity: usize,
) -> Result<(Vec<u8>, Value, Vec<Value>)> {
    let (value, _) = codec::decode_first_item(buffer, 0)?;
    let inner = match value {
        Value::Tagged(tag, inner) => {
            if tag != expected_tag {
                return Err(Error::TagMismatch {
                    expected: expected_tag,
                    actual: tag,
                });
            }
            *inner
        }
        _ => {
            return Err(Error::TagMismatch {
                expected: expected_tag,
                actual: 0,
            })
        }
    };
    let items = match inner {
        Value::Array(items) => items,
        _ => return Err(Error::ExpectedArray("envelope body")),
    };
    if items.len() != expected_arity {
        return Err(Error::ArityMismatch {
            expected: expected_arity,
            actual: items.len(),
        });
    }
    let mut it = items.into_iter();
    let protected_bytes = match it.next().unwrap() {
        Value::Bytes(b) => b,
        _ => return Err(Error::ExpectedBytes("protected header")),
    };
    let (protected_value, _) = codec::decode_first_item(&protected_bytes, 0)?;
    header::validate_protected_header(&protected_value)?;
    let unprotected = it.next().unwrap();
    if !matches!(unprotected, Value::Map(_)) {
        return Err(Error::ExpectedMap("unprotected header"));
    }
    let rest: Vec<Value> = it.collect();
    Ok((protected_bytes, unprotected, rest))
}

fn expect_bytes(v: Value, field: &'static str) -> Result<Vec<u8>> {
    match v {
        Value::Bytes(b) => Ok(b),
        _ => Err(Error::ExpectedBytes(field)),
    }
}

fn expect_array(v: Value, field: &'static str) -> Result<Vec<Value>> {
    match v {
        Value::Array(items) => Ok(items),
        _ => Err(Error::ExpectedArray(field)),
    }
}

macro_rules! envelope_common {
    ($ty:ty) => {
        impl $ty {
            /// Decode the protected header bytes back into a [`Value`] map.
            pub fn protected_header(&self) -> Result<Value> {
                let (v, _) = codec::decode_first_item(&self.protected, 0)?;
                Ok(v)
            }
        }
    };
}

/// Single-signer signature envelope (tag 18): payload, one signature.
#[derive(Clone, Debug, PartialEq)]
pub struct Sign1 {
    pub protected: Vec<u8>,
    pub unprotected: Value,
    pub payload: Payload,
    pub signature: Vec<u8>,
}

impl Sign1 {
    pub fn new(
        protected: &Value,
        unprotected: Value,
        payload: Payload,
        signature: Vec<u8>,
    ) -> Result<Sign1> {
        header::validate_protected_header(protected)?;
        Ok(Sign1 {
            protected: codec::encode(protected)?,
            unprotected,
            payload,
            signature,
        })
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let protected_value = self.protected_header()?;
        encode_envelope(
            TAG_SIGN1,
            &protected_value,
            self.unprotected.clone(),
            vec![self.payload.to_value(), Value::Bytes(self.signature.clone())],
        )
    }

    pub fn decode(buffer: &[u8]) -> Result<Sign1> {
        let (protected, unprotected, mut rest) = decode_envelope(buffer, TAG_SIGN1, 4)?;
        let signature = expect_bytes(rest.pop().unwrap(), "signature")?;
        let payload = Payload::from_value(rest.pop().unwrap(), "payload")?;
        Ok(Sign1 {
            protected,
            unprotected,
            payload,
            signature,
        })
    }
}
envelope_common!(Sign1);

/// Multi-signer signature envelope (tag 98): payload, list of signatures.
#[derive(Clone, Debug, PartialEq)]
pub struct Sign {
    pub protected: Vec<u8>,
    pub unprotected: Value,
    pub payload: Payload,
    pub signatures: Vec<Triple>,
}

impl Sign {
    pub fn new(
        protected: &Value,
        unprotected: Value,
        payload: Payload,
        signatures: Vec<Triple>,
    ) -> Result<Sign> {
        header::validate_protected_header(protected)?;
        Ok(Sign {
            protected: codec::encode(protected)?,
            unprotected,
            payload,
            signatures,
        })
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let protected_value = self.protected_header()?;
        let signatures = Value::Array(self.signatures.iter().map(Triple::to_value).collect());
        encode_envelope(
            TAG_SIGN,
            &protected_value,
            self.unprotected.clone(),
            vec![self.payload.to_value(), signatures],
        )
    }

    pub fn decode(buffer: &[u8]) -> Result<Sign> {
        let (protected, unprotected, mut rest) = decode_envelope(buffer, TAG_SIGN, 4)?;
        let signatures_value = rest.pop().unwrap();
        let payload = Payload::from_value(rest.pop().unwrap(), "payload")?;
        let signatures = expect_array(signatures_value, "signatures")?
            .into_iter()
            .map(Triple::from_value)
            .collect::<Result<Vec<_>>>()?;
        Ok(Sign {
            protected,
            unprotected,
            payload,
            signatures,
        })
    }
}
envelope_common!(Sign);

/// Single-recipient MAC envelope (tag 17): payload, one MAC tag.
#[derive(Clone, Debug, PartialEq)]
pub struct Mac0 {
    pub protected: Vec<u8>,
    pub unprotected: Value,
    pub payload: Payload,
    pub tag: Vec<u8>,
}

impl Mac0 {
    pub fn new(protected: &Value, unprotected: Value, payload: Payload, tag: Vec<u8>) -> Result<Mac0> {
        header::validate_protected_header(protected)?;
        Ok(Mac0 {
            protected: codec::encode(protected)?,
            unprotected,
            payload,
            tag,
        })
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let protected_value = self.protected_header()?;
        encode_envelope(
            TAG_MAC0,
            &protected_value,
            self.unprotected.clone(),
            vec![self.payload.to_value(), Value::Bytes(self.tag.clone())],
        )
    }

    pub fn decode(buffer: &[u8]) -> Result<Mac0> {
        let (protected, unprotected, mut rest) = decode_envelope(buffer, TAG_MAC0, 4)?;
        let tag = expect_bytes(rest.pop().unwrap(), "tag")?;
        let payload = Payload::from_value(rest.pop().unwrap(), "payload")?;
        Ok(Mac0 {
            protected,
            unprotected,
            payload,
            tag,
        })
    }
}
envelope_common!(Mac0);

/// Multi-recipient MAC envelope (tag 97): payload, list of recipients.
#[derive(Clone, Debug, PartialEq)]
pub struct Mac {
    pub protected: Vec<u8>,
    pub unprotected: Value,
    pub payload: Payload,
    pub recipients: Vec<Triple>,
}

impl Mac {
    pub fn new(
        protected: &Value,
        unprotected: Value,
        payload: Payload,
        recipients: Vec<Triple>,
    ) -> Result<Mac> {
        header::validate_protected_header(protected)?;
        Ok(Mac {
            protected: codec::encode(protected)?,
            unprotected,
            payload,
            recipients,
        })
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let protected_value = self.protected_header()?;
        let recipients = Value::Array(self.recipients.iter().map(Triple::to_value).collect());
        encode_envelope(
            TAG_MAC,
            &protected_value,
            self.unprotected.clone(),
            vec![self.payload.to_value(), recipients],
        )
    }

    pub fn decode(buffer: &[u8]) -> Result<Mac> {
        let (protected, unprotected, mut rest) = decode_envelope(buffer, TAG_MAC, 4)?;
        let recipients_value = rest.pop().unwrap();
        let payload = Payload::from_value(rest.pop().unwrap(), "payload")?;
        let recipients = expect_array(recipients_value, "recipients")?
            .into_iter()
            .map(Triple::from_value)
            .collect::<Result<Vec<_>>>()?;
        Ok(Mac {
            protected,
            unprotected,
            payload,
            recipients,
        })
    }
}
envelope_common!(Mac);

/// Single-recipient encryption envelope (tag 16): ciphertext only.
#[derive(Clone, Debug, PartialEq)]
pub struct Encrypt0 {
    pub protected: Vec<u8>,
    pub unprotected: Value,
    pub ciphertext: Vec<u8>,
}

impl Encrypt0 {
    pub fn new(protected: &Value, unprotected: Value, ciphertext: Vec<u8>) -> Result<Encrypt0> {
        header::validate_protected_header(protected)?;
        Ok(Encrypt0 {
            protected: codec::encode(protected)?,
            unprotected,
            ciphertext,
        })
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let protected_value = self.protected_header()?;
        encode_envelope(
            TAG_ENCRYPT0,
            &protected_value,
            self.unprotected.clone(),
            vec![Value::Bytes(self.ciphertext.clone())],
        )
    }

    pub fn decode(buffer: &[u8]) -> Result<Encrypt0> {
        let (protected, unprotected, mut rest) = decode_envelope(buffer, TAG_ENCRYPT0, 3)?;
        let ciphertext = expect_bytes(rest.pop().unwrap(), "ciphertext")?;
        Ok(Encrypt0 {
            protected,
            unprotected,
            ciphertext,
        })
    }
}
envelope_common!(Encrypt0);

/// Multi-recipient encryption envelope (tag 96): ciphertext, list of
/// recipients.
#[derive(Clone, Debug, PartialEq)]
pub struct Encrypt {
    pub protected: Vec<u8>,
    pub unprotected: Value,
    pub ciphertext: Vec<u8>,
    pub recipients: Vec<Triple>,
}

impl Encrypt {
    pub fn new(
        protected: &Value,
        unprotected: Value,
        ciphertext: Vec<u8>,
        recipients: Vec<Triple>,
    ) -> Result<Encrypt> {
        header::validate_protected_header(protected)?;
        Ok(Encrypt {
            protected: codec::encode(protected)?,
            unprotected,
            ciphertext,
            recipients,
        })
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let protected_value = self.protected_header()?;
        let recipients = Value::Array(self.recipients.iter().map(Triple::to_value).collect());
        encode_envelope(
            TAG_ENCRYPT,
            &protected_value,
            self.unprotected.clone(),
            vec![Value::Bytes(self.ciphertext.clone()), recipients],
        )
    }

    pub fn decode(buffer: &[u8]) -> Result<Encrypt> {
        let (protected, unprotected, mut rest) = decode_envelope(buffer, TAG_ENCRYPT, 4)?;
        let recipients_value = rest.pop().unwrap();
        let ciphertext = expect_bytes(rest.pop().unwrap(), "ciphertext")?;
        let recipients = expect_array(recipients_value, "recipients")?
            .into_iter()
            .map(Triple::from_value)
            .collect::<Result<Vec<_>>>()?;
        Ok(Encrypt {
            protected,
            unprotected,
            ciphertext,
            recipients,
        })
    }
}
envelope_common!(Encrypt);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::ALG;
    use crate::value::MapKey;
    use std::collections::BTreeMap;

    fn es256_protected() -> Value {
        let mut map = BTreeMap::new();
        map.insert(MapKey::from(ALG), Value::nint(6)); // -7 == ES256
        Value::Map(map)
    }

    fn empty_map() -> Value {
        Value::Map(BTreeMap::new())
    }

    #[test]
    fn sign1_roundtrip_matches_worked_example() {
        let sign1 = Sign1::new(
            &es256_protected(),
            empty_map(),
            Payload::Null,
            vec![1, 2, 3, 4],
        )
        .unwrap();
        let bytes = sign1.encode().unwrap();
        let (tagged, _) = codec::decode_first_item(&bytes, 0).unwrap();
        match tagged {
            Value::Tagged(18, inner) => match *inner {
                Value::Array(items) => {
                    assert_eq!(items.len(), 4);
                    assert!(matches!(items[0], Value::Bytes(_)));
                    assert_eq!(items[1], empty_map());
                    assert_eq!(items[2], Value::Null);
                    assert_eq!(items[3], Value::Bytes(vec![1, 2, 3, 4]));
                }
                _ => panic!("expected array"),
            },
            _ => panic!("expected tag 18"),
        }
        let decoded = Sign1::decode(&bytes).unwrap();
        assert_eq!(decoded, sign1);
    }

    #[test]
    fn sign1_missing_alg_fails_with_exact_message() {
        let err = Sign1::new(&empty_map(), empty_map(), Payload::Null, vec![]).unwrap_err();
        assert_eq!(err.to_string(), "Protected header must contain 'alg' parameter");
    }

    #[test]
    fn sign1_unsupported_alg_fails_with_exact_message() {
        let mut map = BTreeMap::new();
        map.insert(MapKey::from(ALG), Value::uint(999));
        let err = Sign1::new(&Value::Map(map), empty_map(), Payload::Null, vec![]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid or unsupported algorithm in protected header"
        );
    }

    #[test]
    fn decode_sign1_rejects_wrong_tag() {
        let mac0 = Mac0::new(&es256_protected(), empty_map(), Payload::Null, vec![9]).unwrap();
        let bytes = mac0.encode().unwrap();
        let err = Sign1::decode(&bytes).unwrap_err();
        assert_eq!(
            err,
            Error::TagMismatch {
                expected: TAG_SIGN1,
                actual: TAG_MAC0
            }
        );
    }

    #[test]
    fn mac_with_two_recipients_roundtrips_and_revalidates_each() {
        let r1 = Triple::new(&es256_protected(), empty_map(), Value::Bytes(vec![1])).unwrap();
        let mut protected2 = BTreeMap::new();
        protected2.insert(MapKey::from(ALG), Value::uint(5)); // HMAC_256_256
        let r2 = Triple::new(&Value::Map(protected2), empty_map(), Value::Bytes(vec![2])).unwrap();

        let mac = Mac::new(
            &es256_protected(),
            empty_map(),
            Payload::Bytes(vec![0xaa]),
            vec![r1, r2],
        )
        .unwrap();
        let bytes = mac.encode().unwrap();
        let decoded = Mac::decode(&bytes).unwrap();
        assert_eq!(decoded, mac);
        assert_eq!(decoded.recipients.len(), 2);
    }

    #[test]
    fn encrypt0_roundtrip() {
        let e = Encrypt0::new(&es256_protected(), empty_map(), vec![1, 2, 3]).unwrap();
        let bytes = e.encode().unwrap();
        assert_eq!(Encrypt0::decode(&bytes).unwrap(), e);
    }

    #[test]
    fn sign_roundtrip() {
        let sig = Triple::new(&es256_protected(), empty_map(), Value::Bytes(vec![7])).unwrap();
        let s = Sign::new(&es256_protected(), empty_map(), Payload::Null, vec![sig]).unwrap();
        let bytes = s.encode().unwrap();
        assert_eq!(Sign::decode(&bytes).unwrap(), s);
    }

    #[test]
    fn encrypt_roundtrip() {
        let r = Triple::new(&es256_protected(), empty_map(), Value::Bytes(vec![4])).unwrap();
        let e = Encrypt::new(&es256_protected(), empty_map(), vec![9, 9], vec![r]).unwrap();
        let bytes = e.encode().unwrap();
        assert_eq!(Encrypt::decode(&bytes).unwrap(), e);
    }

    #[test]
    fn decode_sign_rejects_non_bytes_signature_in_nested_triple() {
        // Triple::new doesn't validate the terminal field's shape at
        // construction time; a hand-built Sign buffer whose nested
        // signature is Value::Null (not bytes) must still be rejected on
        // decode.
        let bad_signature = Triple::new(&es256_protected(), empty_map(), Value::Null).unwrap();
        let s = Sign::new(&es256_protected(), empty_map(), Payload::Null, vec![bad_signature]).unwrap();
        let bytes = s.encode().unwrap();
        assert_eq!(
            Sign::decode(&bytes).unwrap_err(),
            Error::ExpectedBytes("signature/recipient terminal field")
        );
    }

    #[test]
    fn decode_sign1_rejects_non_map_unprotected_header() {
        let protected_bytes = codec::encode(&es256_protected()).unwrap();
        let tagged = Value::Tagged(
            TAG_SIGN1,
            Box::new(Value::Array(vec![
                Value::Bytes(protected_bytes),
                Value::uint(5), // unprotected header must be a map, not an integer
                Value::Null,
                Value::Bytes(vec![1, 2, 3, 4]),
            ])),
        );
        let bytes = codec::encode(&tagged).unwrap();
        assert_eq!(
            Sign1::decode(&bytes).unwrap_err(),
            Error::ExpectedMap("unprotected header")
        );
    }
}
