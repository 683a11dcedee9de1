//! A structural codec for a general binary data interchange format plus a
//! cryptographic message syntax envelope layered on top of it. Encodes and
//! decodes a canonical byte stream; validates envelope structure and
//! mandatory header parameters. Performs no cryptographic computation.

pub mod algorithm;
mod codec;
pub mod envelope;
mod error;
pub mod header;
mod integer;
mod key;
mod marker;
mod value;

pub use algorithm::Algorithm;
pub use codec::{decode_first_item, decode_map_as_typed_mapping, decode_with_offset, encode};
pub use envelope::{Encrypt, Encrypt0, Mac, Mac0, Payload, Sign, Sign1, Triple};
pub use error::{Error, Result};
pub use integer::Integer;
pub use key::{Key, KeyType};
pub use value::{MapKey, Value};
