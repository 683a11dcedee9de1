//! The byte codec: encode/decode of the data-format value over a flat byte
//! buffer (spec §4.1).
use byteorder::{BigEndian, ByteOrder};
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::integer::Integer;
use crate::marker::{classify_arg, make_initial_byte, simple, split_initial_byte, ArgEncoding, MajorType};
use crate::value::{MapKey, Value};

/// Maximum size, in bytes, of any input buffer or encoded output (spec §5).
pub const MAX_BUFFER_SIZE: usize = 16 * 1024 * 1024;

/// Maximum element count of an array, and maximum pair count of a map
/// (spec §5, §9.1 Open Question 3 — fixed, not configurable).
pub const MAX_CONTAINER_LEN: usize = 10_000;

/// Maximum nesting depth of arrays, maps, and tags during decode. A 16 MiB
/// buffer can still encode millions of singly-nested containers (one
/// `0x81` byte per array level); without a depth cap, `parse_value`'s
/// recursion would exhaust the native call stack well before either the
/// buffer-size or container-length ceiling triggers. Not named in spec §5,
/// which bounds element/pair counts per container but not nesting depth;
/// this is additional hardening in the spirit of the teacher's
/// `DepthTracker`, fixed rather than configurable like `MAX_CONTAINER_LEN`.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Tracks the current container-nesting depth during decode, rejecting
/// recursion past [`MAX_NESTING_DEPTH`]. Adapted from the teacher's
/// `DepthTracker` push/pop model in `depth_tracking.rs`, simplified to a
/// bare counter: this codec bounds per-container length directly (see
/// `MAX_CONTAINER_LEN`), so only the *depth* of nesting, not the remaining
/// element count at each level, needs tracking here.
struct ContainerDepth {
    depth: usize,
}

impl ContainerDepth {
    fn new() -> Self {
        ContainerDepth { depth: 0 }
    }

    /// Enter one more level of nesting, failing if the cap is exceeded.
    fn push(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(Error::ResourceLimitExceeded {
                limit: MAX_NESTING_DEPTH,
                actual: self.depth,
            });
        }
        Ok(())
    }

    /// Leave one level of nesting.
    fn pop(&mut self) {
        self.depth -= 1;
    }
}

/// Decode exactly one item starting at `offset` in `buffer`.
///
/// Returns the decoded value and the offset of the first byte after it.
/// The caller must have already checked the 16 MiB buffer-size bound; this
/// function re-checks it defensively on entry.
pub fn decode_first_item(buffer: &[u8], offset: usize) -> Result<(Value, usize)> {
    check_buffer_size(buffer)?;
    let mut parser = Parser::new(buffer);
    parser.pos = offset;
    let value = parser.parse_value("decode_first_item")?;
    Ok((value, parser.pos))
}

/// Decode exactly one item starting at `start`, returning the number of
/// bytes consumed rather than the absolute next offset. Identical to
/// [`decode_first_item`] otherwise; lets a caller parse concatenated items
/// without tracking absolute offsets itself.
pub fn decode_with_offset(buffer: &[u8], start: usize) -> Result<(Value, usize)> {
    let (value, next) = decode_first_item(buffer, start)?;
    Ok((value, next - start))
}

/// Decode exactly one item starting at `start`; it must be a map. Keys
/// whose textual form is a valid decimal integer are coerced to integer
/// keys; `key_predicate` and `value_predicate` are applied to every entry,
/// failing on the first violation. Returns the resulting mapping (keyed on
/// the coerced [`MapKey`], iteration-order-insensitive since it is a
/// `BTreeMap`) and the number of bytes consumed.
pub fn decode_map_as_typed_mapping<K, V>(
    buffer: &[u8],
    start: usize,
    key_predicate: K,
    value_predicate: V,
) -> Result<(BTreeMap<MapKey, Value>, usize)>
where
    K: Fn(&MapKey) -> Result<()>,
    V: Fn(&Value) -> Result<()>,
{
    let (value, consumed) = decode_with_offset(buffer, start)?;
    let map = match value {
        Value::Map(m) => m,
        _ => return Err(Error::ExpectedMap("decode_map_as_typed_mapping")),
    };
    let mut out = BTreeMap::new();
    for (key, val) in map {
        let key = coerce_decimal_key(key);
        key_predicate(&key)?;
        value_predicate(&val)?;
        out.insert(key, val);
    }
    Ok((out, consumed))
}

/// If `key` is a text key whose contents parse as a bare decimal integer,
/// coerce it to an integer key; otherwise return it unchanged.
fn coerce_decimal_key(key: MapKey) -> MapKey {
    match &key {
        MapKey::Text(s) => match s.parse::<i64>() {
            Ok(n) if n.to_string() == *s => MapKey::Int(Integer::from(n)),
            _ => key,
        },
        MapKey::Int(_) => key,
    }
}

fn check_buffer_size(buffer: &[u8]) -> Result<()> {
    if buffer.len() > MAX_BUFFER_SIZE {
        return Err(Error::SizeLimitExceeded {
            max: MAX_BUFFER_SIZE,
            actual: buffer.len(),
        });
    }
    Ok(())
}

/// Encode a value to a freshly allocated byte buffer (spec §4.1.3).
///
/// Fails if the value contains an integer outside the safe-integer range,
/// an array/map exceeding [`MAX_CONTAINER_LEN`], or if the serialised
/// output would exceed [`MAX_BUFFER_SIZE`].
pub fn encode(value: &Value) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    encode_value(value, &mut buf)?;
    if buf.len() > MAX_BUFFER_SIZE {
        return Err(Error::SizeLimitExceeded {
            max: MAX_BUFFER_SIZE,
            actual: buf.len(),
        });
    }
    Ok(buf)
}

fn encode_length(major: MajorType, len: u64, buf: &mut Vec<u8>) {
    encode_uint_argument(major, len, buf);
}

/// Emit the shortest valid initial-byte + argument representation for
/// `argument` under major type `major` (spec §4.1.3's five buckets).
fn encode_uint_argument(major: MajorType, argument: u64, buf: &mut Vec<u8>) {
    if argument <= 23 {
        buf.push(make_initial_byte(major, argument as u8));
    } else if argument <= u8::MAX as u64 {
        buf.push(make_initial_byte(major, 24));
        buf.push(argument as u8);
    } else if argument <= u16::MAX as u64 {
        buf.push(make_initial_byte(major, 25));
        let mut tmp = [0u8; 2];
        BigEndian::write_u16(&mut tmp, argument as u16);
        buf.extend_from_slice(&tmp);
    } else if argument <= u32::MAX as u64 {
        buf.push(make_initial_byte(major, 26));
        let mut tmp = [0u8; 4];
        BigEndian::write_u32(&mut tmp, argument as u32);
        buf.extend_from_slice(&tmp);
    } else {
        buf.push(make_initial_byte(major, 27));
        let mut tmp = [0u8; 8];
        BigEndian::write_u64(&mut tmp, argument);
        buf.extend_from_slice(&tmp);
    }
}

fn encode_value(value: &Value, buf: &mut Vec<u8>) -> Result<()> {
    match value {
        Value::UInt(i) => {
            if !i.fits_safe_range() {
                return Err(Error::IntegerOutOfRange);
            }
            encode_uint_argument(MajorType::UInt, i.wire_magnitude(), buf);
        }
        Value::NInt(i) => {
            if !i.fits_safe_range() {
                return Err(Error::IntegerOutOfRange);
            }
            encode_uint_argument(MajorType::NInt, i.wire_magnitude(), buf);
        }
        Value::Bytes(b) => {
            encode_length(MajorType::Bytes, b.len() as u64, buf);
            buf.extend_from_slice(b);
        }
        Value::Text(s) => {
            let bytes = s.as_bytes();
            encode_length(MajorType::Text, bytes.len() as u64, buf);
            buf.extend_from_slice(bytes);
        }
        Value::Array(items) => {
            if items.len() > MAX_CONTAINER_LEN {
                return Err(Error::ResourceLimitExceeded {
                    limit: MAX_CONTAINER_LEN,
                    actual: items.len(),
                });
            }
            encode_length(MajorType::Array, items.len() as u64, buf);
            for item in items {
                encode_value(item, buf)?;
            }
        }
        Value::Map(map) => {
            if map.len() > MAX_CONTAINER_LEN {
                return Err(Error::ResourceLimitExceeded {
                    limit: MAX_CONTAINER_LEN,
                    actual: map.len(),
                });
            }
            encode_length(MajorType::Map, map.len() as u64, buf);
            // BTreeMap already iterates in MapKey's textual order (spec
            // §4.1.4); no separate sort step is needed.
            for (key, val) in map {
                encode_map_key(key, buf)?;
                encode_value(val, buf)?;
            }
        }
        Value::Tagged(tag, inner) => {
            encode_length(MajorType::Tag, *tag, buf);
            encode_value(inner, buf)?;
        }
        Value::Float(f) => {
            buf.push(make_initial_byte(MajorType::Simple, simple::DOUBLE_FLOAT));
            let mut tmp = [0u8; 8];
            BigEndian::write_f64(&mut tmp, *f);
            buf.extend_from_slice(&tmp);
        }
        Value::Bool(false) => buf.push(make_initial_byte(MajorType::Simple, simple::FALSE)),
        Value::Bool(true) => buf.push(make_initial_byte(MajorType::Simple, simple::TRUE)),
        Value::Null => buf.push(make_initial_byte(MajorType::Simple, simple::NULL)),
        Value::Undefined => buf.push(make_initial_byte(MajorType::Simple, simple::UNDEFINED)),
    }
    Ok(())
}

fn encode_map_key(key: &MapKey, buf: &mut Vec<u8>) -> Result<()> {
    match key {
        MapKey::Int(i) if i.is_negative() => encode_value(&Value::NInt(*i), buf),
        MapKey::Int(i) => encode_value(&Value::UInt(*i), buf),
        MapKey::Text(s) => encode_value(&Value::Text(s.clone()), buf),
    }
}

/// Recursive-descent reader over a byte slice, tracking the current read
/// position. Adapted from the teacher's `Parser`/`serialize_elem` split,
/// but recursive rather than iterator-driven, since this codec's values
/// nest arbitrarily (arrays of arrays, maps of tagged values, ...) and the
/// simplest faithful translation of the decode contract is a direct
/// recursive-descent function per major type.
struct Parser<'a> {
    data: &'a [u8],
    pos: usize,
    depth: ContainerDepth,
}

impl<'a> Parser<'a> {
    fn new(data: &'a [u8]) -> Self {
        Parser {
            data,
            pos: 0,
            depth: ContainerDepth::new(),
        }
    }

    fn need(&self, step: &'static str, n: usize) -> Result<()> {
        if self.data.len() - self.pos < n {
            Err(Error::Truncated {
                step,
                needed: n,
                available: self.data.len() - self.pos,
            })
        } else {
            Ok(())
        }
    }

    fn take(&mut self, step: &'static str, n: usize) -> Result<&'a [u8]> {
        self.need(step, n)?;
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_u8(&mut self, step: &'static str) -> Result<u8> {
        Ok(self.take(step, 1)?[0])
    }

    /// Read the argument following an initial byte whose additional-info
    /// field classified as `enc`. Every multi-byte read is bounds-checked
    /// before it is taken (spec §4.1.2's "every multi-byte read checks
    /// remaining buffer length").
    fn read_argument(&mut self, step: &'static str, enc: ArgEncoding) -> Result<u64> {
        match enc {
            ArgEncoding::Immediate(v) => Ok(v as u64),
            ArgEncoding::OneByte => Ok(self.take(step, 1)?[0] as u64),
            ArgEncoding::TwoByte => Ok(BigEndian::read_u16(self.take(step, 2)?) as u64),
            ArgEncoding::FourByte => Ok(BigEndian::read_u32(self.take(step, 4)?) as u64),
            ArgEncoding::EightByte => Ok(BigEndian::read_u64(self.take(step, 8)?)),
        }
    }

    fn parse_value(&mut self, step: &'static str) -> Result<Value> {
        let initial = self.read_u8(step)?;
        let (major, ai) = split_initial_byte(initial);
        match major {
            MajorType::UInt => {
                let enc = classify_arg(ai).ok_or(Error::InvalidAdditionalInfo(ai))?;
                let argument = self.read_argument("uint argument", enc)?;
                Ok(Value::UInt(wire_to_pos_integer(argument)))
            }
            MajorType::NInt => {
                let enc = classify_arg(ai).ok_or(Error::InvalidAdditionalInfo(ai))?;
                let argument = self.read_argument("nint argument", enc)?;
                Ok(Value::NInt(wire_to_neg_integer(argument)))
            }
            MajorType::Bytes => {
                let enc = classify_arg(ai).ok_or(Error::InvalidAdditionalInfo(ai))?;
                let len = self.read_argument("bytes length", enc)? as usize;
                let bytes = self.take("bytes payload", len)?;
                Ok(Value::Bytes(bytes.to_vec()))
            }
            MajorType::Text => {
                let enc = classify_arg(ai).ok_or(Error::InvalidAdditionalInfo(ai))?;
                let len = self.read_argument("text length", enc)? as usize;
                let bytes = self.take("text payload", len)?;
                let s = std::str::from_utf8(bytes).map_err(|_| Error::InvalidUtf8)?;
                Ok(Value::Text(s.to_owned()))
            }
            MajorType::Array => {
                let enc = classify_arg(ai).ok_or(Error::InvalidAdditionalInfo(ai))?;
                let len = self.read_argument("array length", enc)? as usize;
                if len > MAX_CONTAINER_LEN {
                    return Err(Error::ResourceLimitExceeded {
                        limit: MAX_CONTAINER_LEN,
                        actual: len,
                    });
                }
                self.depth.push()?;
                let mut items = Vec::with_capacity(len.min(1024));
                for _ in 0..len {
                    items.push(self.parse_value("array element")?);
                }
                self.depth.pop();
                Ok(Value::Array(items))
            }
            MajorType::Map => {
                let enc = classify_arg(ai).ok_or(Error::InvalidAdditionalInfo(ai))?;
                let len = self.read_argument("map pair count", enc)? as usize;
                if len > MAX_CONTAINER_LEN {
                    return Err(Error::ResourceLimitExceeded {
                        limit: MAX_CONTAINER_LEN,
                        actual: len,
                    });
                }
                self.depth.push()?;
                let mut map = BTreeMap::new();
                for _ in 0..len {
                    let key_value = self.parse_value("map key")?;
                    let key = match key_value {
                        Value::UInt(i) | Value::NInt(i) => MapKey::Int(i),
                        Value::Text(s) => MapKey::Text(s),
                        _ => return Err(Error::InvalidMapKeyType),
                    };
                    let val = self.parse_value("map value")?;
                    // Later duplicate keys overwrite earlier ones (spec
                    // §4.1.2, §9.1 Open Question 2).
                    map.insert(key, val);
                }
                self.depth.pop();
                Ok(Value::Map(map))
            }
            MajorType::Tag => {
                let enc = classify_arg(ai).ok_or(Error::InvalidAdditionalInfo(ai))?;
                let tag = self.read_argument("tag number", enc)?;
                self.depth.push()?;
                let inner = self.parse_value("tagged inner value")?;
                self.depth.pop();
                Ok(Value::Tagged(tag, Box::new(inner)))
            }
            MajorType::Simple => self.parse_simple(ai),
        }
    }

    fn parse_simple(&mut self, ai: u8) -> Result<Value> {
        match ai {
            simple::FALSE => Ok(Value::Bool(false)),
            simple::TRUE => Ok(Value::Bool(true)),
            simple::NULL => Ok(Value::Null),
            simple::UNDEFINED => Ok(Value::Undefined),
            simple::SINGLE_FLOAT => {
                let bytes = self.take("f32 payload", 4)?;
                Ok(Value::Float(BigEndian::read_f32(bytes) as f64))
            }
            simple::DOUBLE_FLOAT => {
                let bytes = self.take("f64 payload", 8)?;
                Ok(Value::Float(BigEndian::read_f64(bytes)))
            }
            // Half-precision is documented as accepted on input by the
            // reference, but the reference's own handling of it is
            // internally inconsistent (spec §9 Open Question 1); this
            // implementation takes the conservative option the spec text
            // itself offers and rejects it outright.
            simple::HALF_FLOAT => Err(Error::InvalidAdditionalInfo(ai)),
            _ => Err(Error::InvalidAdditionalInfo(ai)),
        }
    }
}

fn wire_to_pos_integer(argument: u64) -> Integer {
    Integer::from_pos_wire(argument)
}

fn wire_to_neg_integer(argument: u64) -> Integer {
    Integer::from_neg_wire(argument)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rt(v: Value) {
        let bytes = encode(&v).unwrap();
        let (decoded, consumed) = decode_first_item(&bytes, 0).unwrap();
        assert_eq!(consumed, bytes.len());
        assert_eq!(decoded, v);
    }

    #[test]
    fn scenario_zero() {
        assert_eq!(encode(&Value::uint(0)).unwrap(), vec![0x00]);
        let (v, _) = decode_first_item(&[0x00], 0).unwrap();
        assert_eq!(v, Value::uint(0));
    }

    #[test]
    fn scenario_minus_one() {
        assert_eq!(encode(&Value::nint(0)).unwrap(), vec![0x20]);
        let (v, _) = decode_first_item(&[0x20], 0).unwrap();
        assert_eq!(v.as_i64(), Some(-1));
    }

    #[test]
    fn scenario_empty_and_a_text() {
        assert_eq!(
            encode(&Value::Text(String::new())).unwrap(),
            vec![0x60]
        );
        assert_eq!(
            encode(&Value::Text("a".to_string())).unwrap(),
            vec![0x61, 0x61]
        );
    }

    #[test]
    fn integer_boundaries_roundtrip() {
        for n in [0u64, 23, 24, 255, 256, 65535, 65536, (1u64 << 32) - 1, (1u64 << 53) - 1] {
            rt(Value::uint(n));
            rt(Value::nint(n));
        }
    }

    #[test]
    fn integer_over_safe_range_refused_on_encode() {
        let v = Value::UInt(Integer::from_pos_wire((1u64 << 53)));
        assert_eq!(encode(&v), Err(Error::IntegerOutOfRange));
    }

    #[test]
    fn eight_byte_argument_is_lossy_beyond_safe_range() {
        // Raw bytes for major type 0, ai 27, argument = u64::MAX.
        let mut bytes = vec![0x1b];
        bytes.extend_from_slice(&u64::MAX.to_be_bytes());
        let (v, _) = decode_first_item(&bytes, 0).unwrap();
        match v {
            Value::UInt(i) => assert!(!i.fits_safe_range()),
            _ => panic!("expected UInt"),
        }
    }

    #[test]
    fn bytes_and_text_roundtrip() {
        rt(Value::Bytes(vec![]));
        rt(Value::Bytes(vec![0x00]));
        rt(Value::Bytes(vec![0xff]));
        rt(Value::Bytes(vec![0u8; 1000]));
        rt(Value::Text("\u{0000}".to_string()));
        rt(Value::Text("\u{ffff}".to_string()));
        rt(Value::Text("日本語".to_string()));
    }

    #[test]
    fn array_over_limit_fails_both_ways() {
        let items: Vec<Value> = (0..10_001).map(Value::uint).collect();
        let v = Value::Array(items);
        assert!(matches!(
            encode(&v),
            Err(Error::ResourceLimitExceeded { limit: 10_000, .. })
        ));

        // Decode side: a hand-built header declaring an array of 10001
        // elements must be rejected as soon as the length is read, before
        // any element is parsed.
        let mut buf = vec![0x99u8]; // major 4 (array), ai 25 (2-byte argument)
        buf.extend_from_slice(&10_001u16.to_be_bytes());
        assert!(matches!(
            decode_first_item(&buf, 0),
            Err(Error::ResourceLimitExceeded { limit: 10_000, .. })
        ));
    }

    #[test]
    fn buffer_over_16mib_fails_both_ways() {
        // Encode side: a byte string whose payload alone is one byte past
        // the 16 MiB ceiling must be refused once the header is added.
        let oversized = Value::Bytes(vec![0u8; MAX_BUFFER_SIZE + 1]);
        assert!(matches!(
            encode(&oversized),
            Err(Error::SizeLimitExceeded { max, .. }) if max == MAX_BUFFER_SIZE
        ));

        // Decode side: an over-sized buffer is rejected at entry, before
        // any parsing is attempted.
        let buf = vec![0u8; MAX_BUFFER_SIZE + 1];
        assert!(matches!(
            decode_first_item(&buf, 0),
            Err(Error::SizeLimitExceeded { max, .. }) if max == MAX_BUFFER_SIZE
        ));
    }

    #[test]
    fn deeply_nested_array_is_rejected_before_stack_overflow() {
        // One 0x81 byte per array level ([x]) nests MAX_NESTING_DEPTH + 1
        // arrays in under 200 bytes; decode must reject this via the depth
        // cap rather than recursing until the native stack overflows.
        let mut buf = vec![0x81u8; MAX_NESTING_DEPTH + 1];
        buf.push(0x00); // innermost element: UInt(0)
        assert!(matches!(
            decode_first_item(&buf, 0),
            Err(Error::ResourceLimitExceeded {
                limit: MAX_NESTING_DEPTH,
                ..
            })
        ));
    }

    #[test]
    fn array_nesting_at_the_depth_limit_still_decodes() {
        let mut buf = vec![0x81u8; MAX_NESTING_DEPTH];
        buf.push(0x00);
        assert!(decode_first_item(&buf, 0).is_ok());
    }

    #[test]
    fn map_roundtrip_and_deterministic_order() {
        let mut m1 = BTreeMap::new();
        m1.insert(MapKey::from("b"), Value::uint(1));
        m1.insert(MapKey::from("a"), Value::uint(2));
        let mut m2 = BTreeMap::new();
        m2.insert(MapKey::from("a"), Value::uint(2));
        m2.insert(MapKey::from("b"), Value::uint(1));
        assert_eq!(
            encode(&Value::Map(m1)).unwrap(),
            encode(&Value::Map(m2)).unwrap()
        );
    }

    #[test]
    fn tagged_roundtrip() {
        rt(Value::Tagged(18, Box::new(Value::Null)));
    }

    #[test]
    fn map_with_mixed_int_and_text_keys_matches_exact_bytes() {
        // {"a": 1, 2: 3} — textual ordering places "2" before "a".
        let mut m = BTreeMap::new();
        m.insert(MapKey::from("a"), Value::uint(1));
        m.insert(MapKey::from(2i64), Value::uint(3));
        let bytes = encode(&Value::Map(m)).unwrap();
        assert_eq!(hex::encode(&bytes), "a202036161 01".replace(' ', ""));
    }

    #[test]
    fn truncated_buffer_fails_cleanly() {
        // Bytes header claiming length 5, but no payload follows.
        let bytes = vec![0x45];
        assert!(matches!(
            decode_first_item(&bytes, 0),
            Err(Error::Truncated { .. })
        ));
    }

    #[test]
    fn invalid_utf8_fails() {
        let bytes = vec![0x61, 0xff];
        assert_eq!(decode_first_item(&bytes, 0), Err(Error::InvalidUtf8));
    }

    #[test]
    fn half_float_rejected() {
        let bytes = vec![0xf9, 0x00, 0x00];
        assert_eq!(
            decode_first_item(&bytes, 0),
            Err(Error::InvalidAdditionalInfo(25))
        );
    }

    #[test]
    fn decode_with_offset_reports_delta() {
        let bytes = encode(&Value::uint(5)).unwrap();
        let mut combined = vec![0xffu8]; // one leading junk byte we skip past
        combined.extend_from_slice(&bytes);
        let (v, consumed) = decode_with_offset(&combined, 1).unwrap();
        assert_eq!(v, Value::uint(5));
        assert_eq!(consumed, bytes.len());
    }

    mod random_bytes {
        use super::*;
        use rand::prelude::*;

        #[test]
        fn roundtrip() {
            // Boundary lengths that cross the 1-byte/2-byte/4-byte argument
            // buckets, the way the teacher's own `bin::roundtrip` walks
            // u8::MAX/u16::MAX boundaries.
            let mut test_cases: Vec<usize> = vec![0, 1];
            for i in 0..3 {
                test_cases.push(u8::MAX as usize - 1 + i);
                test_cases.push(u16::MAX as usize - 1 + i);
            }

            let mut rng = thread_rng();
            for len in test_cases {
                let mut bytes = vec![0u8; len];
                rng.fill_bytes(&mut bytes);
                rt(Value::Bytes(bytes));
            }
        }
    }

    mod random_text {
        use super::*;
        use rand::prelude::*;

        #[test]
        fn roundtrip() {
            let test_cases: Vec<usize> = vec![0, 1, 30, 31, 32, 33, 300, 70000];
            let mut rng = thread_rng();
            for len in test_cases {
                let s: String = rand::distributions::Alphanumeric
                    .sample_iter(&mut rng)
                    .take(len)
                    .map(char::from)
                    .collect();
                rt(Value::Text(s));
            }
        }
    }

    #[test]
    fn decode_map_as_typed_mapping_coerces_decimal_text_keys() {
        let mut m = BTreeMap::new();
        m.insert(MapKey::from("1"), Value::uint(7));
        let bytes = encode(&Value::Map(m)).unwrap();
        let (mapping, _) =
            decode_map_as_typed_mapping(&bytes, 0, |_| Ok(()), |_| Ok(())).unwrap();
        assert_eq!(mapping.get(&MapKey::from(1i64)), Some(&Value::uint(7)));
    }
}
