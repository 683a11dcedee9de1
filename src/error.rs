//! Library error types.
//!
use std::fmt;

/// A codec [`Result`], normally returning a codec [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A codec error. Encompasses any issue that can happen while encoding or
/// decoding a value, an envelope, or a key.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// The buffer ended before a length-prefixed field could be fully read.
    Truncated {
        /// What was being read when the buffer ran out.
        step: &'static str,
        /// How many bytes were needed.
        needed: usize,
        /// How many bytes were actually left.
        available: usize,
    },
    /// An additional-info value appeared where it is not accepted.
    InvalidAdditionalInfo(u8),
    /// A text value's bytes were not well-formed UTF-8.
    InvalidUtf8,
    /// A map key decoded to something other than an integer or text value.
    InvalidMapKeyType,
    /// An array or map exceeded the maximum allowed element/pair count.
    ResourceLimitExceeded {
        /// The limit that was exceeded.
        limit: usize,
        /// The count actually encountered.
        actual: usize,
    },
    /// The buffer, or the encoded output, exceeded the maximum allowed size.
    SizeLimitExceeded {
        /// The maximum allowed size, in bytes.
        max: usize,
        /// The actual size, in bytes.
        actual: usize,
    },
    /// The initial byte named a major type this codec does not accept.
    UnsupportedMajorType(u8),
    /// An envelope's outer tag did not match the tag expected for the
    /// envelope kind being decoded.
    TagMismatch {
        /// The tag the envelope kind requires.
        expected: u64,
        /// The tag actually present.
        actual: u64,
    },
    /// An envelope's inner array did not have the arity its kind requires.
    ArityMismatch {
        /// The arity the envelope kind requires.
        expected: usize,
        /// The arity actually present.
        actual: usize,
    },
    /// A field required to be a byte string (or, where noted, null) was
    /// neither.
    ExpectedBytes(&'static str),
    /// A field required to be a map was not one.
    ExpectedMap(&'static str),
    /// A field required to be an array was not one.
    ExpectedArray(&'static str),
    /// A protected header was missing the mandatory `alg` parameter.
    MissingAlgorithm,
    /// A protected header's `alg` value was not in the algorithm registry.
    UnsupportedAlgorithm,
    /// A key descriptor's shape did not match its declared key type.
    MalformedKeyStructure(String),
    /// An integer magnitude fell outside the representable safe-integer
    /// range on encode.
    IntegerOutOfRange,
    /// The encoder refused to produce output for some other reason (e.g. a
    /// negative tag number).
    EncoderRefusal(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Truncated {
                step,
                needed,
                available,
            } => write!(
                f,
                "buffer truncated while reading [{}]: needed {} bytes, {} available",
                step, needed, available
            ),
            Error::InvalidAdditionalInfo(ai) => {
                write!(f, "invalid additional-info value: {}", ai)
            }
            Error::InvalidUtf8 => write!(f, "text value is not valid UTF-8"),
            Error::InvalidMapKeyType => {
                write!(f, "map key was not an integer or text value")
            }
            Error::ResourceLimitExceeded { limit, actual } => write!(
                f,
                "container has {} elements, exceeding the limit of {}",
                actual, limit
            ),
            Error::SizeLimitExceeded { max, actual } => write!(
                f,
                "buffer is {} bytes, exceeding the limit of {}",
                actual, max
            ),
            Error::UnsupportedMajorType(m) => write!(f, "unsupported major type: {}", m),
            Error::TagMismatch { expected, actual } => {
                write!(f, "expected tag {}, but decoded tag {}", expected, actual)
            }
            Error::ArityMismatch { expected, actual } => write!(
                f,
                "expected an array of {} elements, but decoded {}",
                expected, actual
            ),
            Error::ExpectedBytes(field) => write!(f, "expected a byte string for '{}'", field),
            Error::ExpectedMap(field) => write!(f, "expected a map for '{}'", field),
            Error::ExpectedArray(field) => write!(f, "expected an array for '{}'", field),
            Error::MissingAlgorithm => {
                write!(f, "Protected header must contain 'alg' parameter")
            }
            Error::UnsupportedAlgorithm => {
                write!(f, "Invalid or unsupported algorithm in protected header")
            }
            Error::MalformedKeyStructure(err) => write!(f, "malformed key structure: {}", err),
            Error::IntegerOutOfRange => {
                write!(f, "integer magnitude is outside the safe-integer range")
            }
            Error::EncoderRefusal(err) => write!(f, "encoder refused input: {}", err),
        }
    }
}

impl std::error::Error for Error {}
