//! Builds a Sign1 envelope, encodes it, and decodes it back, the way
//! `Sign1::decode` re-validates every protected header it sees.
use std::collections::BTreeMap;

use cbor_cose_codec::algorithm::ES256;
use cbor_cose_codec::header::ALG;
use cbor_cose_codec::{MapKey, Payload, Sign1, Value};

fn main() {
    let mut protected = BTreeMap::new();
    protected.insert(MapKey::from(ALG), Value::nint((-1 - ES256) as u64));
    let protected = Value::Map(protected);

    let unprotected = Value::Map(BTreeMap::new());
    let signature = vec![1, 2, 3, 4];

    let sign1 = Sign1::new(&protected, unprotected, Payload::Null, signature)
        .expect("protected header carries a registered algorithm");

    let bytes = sign1.encode().expect("envelope encodes to a byte buffer");
    println!("encoded Sign1: {} bytes", bytes.len());

    let decoded = Sign1::decode(&bytes).expect("tag and header validate on decode");
    assert_eq!(decoded, sign1);
    println!("decoded Sign1 matches the original");
}
