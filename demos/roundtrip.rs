//! Walks through encoding a small nested value and decoding it back.
use std::collections::BTreeMap;

use cbor_cose_codec::{decode_first_item, encode, MapKey, Value};

fn main() {
    let mut map = BTreeMap::new();
    map.insert(MapKey::from("name"), Value::Text("fog".to_string()));
    map.insert(MapKey::from("count"), Value::uint(3));
    map.insert(
        MapKey::from("tags"),
        Value::Array(vec![Value::Text("a".to_string()), Value::Text("b".to_string())]),
    );
    let value = Value::Map(map);

    let bytes = encode(&value).expect("value fits within the resource bounds");
    println!("encoded {} bytes: {:02x?}", bytes.len(), bytes);

    let (decoded, consumed) = decode_first_item(&bytes, 0).expect("well-formed buffer");
    assert_eq!(consumed, bytes.len());
    assert_eq!(decoded, value);
    println!("decoded value round-tripped exactly");
}
