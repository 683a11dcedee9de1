//! The safe-integer numeric model shared by [`crate::value::Value::UInt`]
//! and [`crate::value::Value::NInt`].
use std::cmp;
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, LowerHex, UpperHex};

use num_traits::NumCast;

/// The largest magnitude this codec will encode: 2^53 - 1, the bound of
/// exactly representable integers in an IEEE-754 double.
pub const MAX_SAFE_INTEGER: u64 = (1u64 << 53) - 1;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum IntPriv {
    /// Always non-negative. Wire major type 0.
    PosInt(u64),
    /// Always negative; represents the data-format value `-1 - argument`.
    NegInt(i64),
}

/// An integer carried through the codec's double-precision numeric model.
///
/// Values constructed directly (via `From`) may exceed the safe-integer
/// range; the range is enforced at encode time, not at construction time,
/// matching the decode contract's acceptance of the full 64-bit argument
/// space (see [`Integer::fits_safe_range`]).
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Integer {
    n: IntPriv,
}

impl Integer {
    /// Returns `true` if the integer can be represented as `i64`.
    #[inline]
    pub fn is_i64(&self) -> bool {
        match self.n {
            IntPriv::PosInt(n) => n <= i64::MAX as u64,
            IntPriv::NegInt(..) => true,
        }
    }

    /// Returns `true` if the integer can be represented as `u64`.
    #[inline]
    pub fn is_u64(&self) -> bool {
        matches!(self.n, IntPriv::PosInt(..))
    }

    /// Returns the integer represented as `i64` if possible, or else `None`.
    #[inline]
    pub fn as_i64(&self) -> Option<i64> {
        match self.n {
            IntPriv::PosInt(n) => NumCast::from(n),
            IntPriv::NegInt(n) => Some(n),
        }
    }

    /// Returns the integer represented as `u64` if possible, or else `None`.
    #[inline]
    pub fn as_u64(&self) -> Option<u64> {
        match self.n {
            IntPriv::PosInt(n) => Some(n),
            IntPriv::NegInt(n) => NumCast::from(n),
        }
    }

    /// Returns the integer represented as `f64`. Always succeeds, since the
    /// numeric model is double-precision throughout; may lose precision
    /// above 2^53 for values constructed outside the safe range.
    #[inline]
    pub fn as_f64(&self) -> f64 {
        match self.n {
            IntPriv::PosInt(n) => n as f64,
            IntPriv::NegInt(n) => n as f64,
        }
    }

    /// Forcibly casts the value to `u64` bit pattern without modification.
    #[inline]
    pub fn as_bits(&self) -> u64 {
        match self.n {
            IntPriv::PosInt(n) => n,
            IntPriv::NegInt(n) => n as u64,
        }
    }

    /// The magnitude of this integer, as carried on the wire: for a
    /// positive integer this is the value itself; for a negative integer
    /// this is `-1 - value`, i.e. the wire "argument".
    #[inline]
    pub(crate) fn wire_magnitude(&self) -> u64 {
        match self.n {
            IntPriv::PosInt(n) => n,
            IntPriv::NegInt(n) => (-1 - n) as u64,
        }
    }

    /// `true` if this integer's magnitude is within the safe-integer
    /// ceiling of 2^53 - 1 (spec §4.1.3, §9).
    pub fn fits_safe_range(&self) -> bool {
        self.wire_magnitude() <= MAX_SAFE_INTEGER
    }

    /// `true` if this integer is negative (major type 1 on the wire).
    #[inline]
    pub fn is_negative(&self) -> bool {
        matches!(self.n, IntPriv::NegInt(_))
    }

    pub(crate) fn from_pos_wire(argument: u64) -> Integer {
        Integer {
            n: IntPriv::PosInt(argument),
        }
    }

    /// Construct the negative integer whose wire argument is `argument`,
    /// i.e. the data-format value `-1 - argument`.
    ///
    /// Uses `i128` internally so that `argument` values near `u64::MAX`
    /// (decodable per §4.1.2's 8-byte bucket, even though they exceed the
    /// safe-integer range) do not overflow `i64` during negation; the
    /// result is then narrowed back with a wrapping cast, mirroring the
    /// same lossy-beyond-2^53 acceptance documented for positive integers.
    pub(crate) fn from_neg_wire(argument: u64) -> Integer {
        let wide = -1i128 - argument as i128;
        Integer {
            n: IntPriv::NegInt(wide as i64),
        }
    }
}

impl std::default::Default for Integer {
    fn default() -> Self {
        Self {
            n: IntPriv::PosInt(0),
        }
    }
}

impl cmp::Ord for Integer {
    fn cmp(&self, other: &Integer) -> Ordering {
        match (self.n, other.n) {
            (IntPriv::NegInt(lhs), IntPriv::NegInt(rhs)) => lhs.cmp(&rhs),
            (IntPriv::NegInt(_), IntPriv::PosInt(_)) => Ordering::Less,
            (IntPriv::PosInt(_), IntPriv::NegInt(_)) => Ordering::Greater,
            (IntPriv::PosInt(lhs), IntPriv::PosInt(rhs)) => lhs.cmp(&rhs),
        }
    }
}

impl cmp::PartialOrd for Integer {
    fn partial_cmp(&self, other: &Integer) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Debug for Integer {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        Debug::fmt(&self.n, fmt)
    }
}

impl Display for Integer {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self.n {
            IntPriv::PosInt(v) => Display::fmt(&v, fmt),
            IntPriv::NegInt(v) => Display::fmt(&v, fmt),
        }
    }
}

impl UpperHex for Integer {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        UpperHex::fmt(&self.as_bits(), fmt)
    }
}

impl LowerHex for Integer {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        LowerHex::fmt(&self.as_bits(), fmt)
    }
}

macro_rules! impl_from_unsigned {
    ($t: ty) => {
        impl From<$t> for Integer {
            fn from(n: $t) -> Self {
                Integer {
                    n: IntPriv::PosInt(n as u64),
                }
            }
        }
    };
}

macro_rules! impl_from_signed {
    ($t: ty) => {
        impl From<$t> for Integer {
            fn from(n: $t) -> Self {
                if n < 0 {
                    Integer {
                        n: IntPriv::NegInt(n as i64),
                    }
                } else {
                    Integer {
                        n: IntPriv::PosInt(n as u64),
                    }
                }
            }
        }
    };
}

impl_from_unsigned!(u8);
impl_from_unsigned!(u16);
impl_from_unsigned!(u32);
impl_from_unsigned!(u64);
impl_from_unsigned!(usize);
impl_from_signed!(i8);
impl_from_signed!(i16);
impl_from_signed!(i32);
impl_from_signed!(i64);
impl_from_signed!(isize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_magnitude_roundtrip() {
        assert_eq!(Integer::from_pos_wire(0).wire_magnitude(), 0);
        assert_eq!(Integer::from_neg_wire(0).wire_magnitude(), 0);
        assert_eq!(Integer::from_neg_wire(0).as_i64(), Some(-1));
        assert_eq!(Integer::from_pos_wire(23).as_i64(), Some(23));
    }

    #[test]
    fn negative_near_u64_max_does_not_panic() {
        let v = Integer::from_neg_wire(u64::MAX);
        // -1 - u64::MAX is far below i64::MIN; the lossy narrowing cast
        // must not panic, only wrap.
        let _ = v.as_bits();
    }

    #[test]
    fn safe_range_boundary() {
        assert!(Integer::from_pos_wire(MAX_SAFE_INTEGER).fits_safe_range());
        assert!(!Integer::from_pos_wire(MAX_SAFE_INTEGER + 1).fits_safe_range());
        assert!(Integer::from_neg_wire(MAX_SAFE_INTEGER).fits_safe_range());
        assert!(!Integer::from_neg_wire(MAX_SAFE_INTEGER + 1).fits_safe_range());
    }

    #[test]
    fn ordering() {
        assert!(Integer::from(-1i64) < Integer::from(0u64));
        assert!(Integer::from(-2i64) < Integer::from(-1i64));
        assert!(Integer::from(5u64) < Integer::from(6u64));
    }
}
