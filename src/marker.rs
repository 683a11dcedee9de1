//! Initial-byte framing: major type and additional-info dispatch.
//!
//! Each item begins with one initial byte: the high 3 bits are the major
//! type (0-7), the low 5 bits are the additional-info field (spec §4.1.1).

/// The eight major types packed into the high 3 bits of an initial byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MajorType {
    UInt = 0,
    NInt = 1,
    Bytes = 2,
    Text = 3,
    Array = 4,
    Map = 5,
    Tag = 6,
    Simple = 7,
}

impl MajorType {
    pub(crate) fn from_u8(n: u8) -> MajorType {
        match n {
            0 => MajorType::UInt,
            1 => MajorType::NInt,
            2 => MajorType::Bytes,
            3 => MajorType::Text,
            4 => MajorType::Array,
            5 => MajorType::Map,
            6 => MajorType::Tag,
            _ => MajorType::Simple,
        }
    }

    pub(crate) fn into_u8(self) -> u8 {
        self as u8
    }
}

/// How the argument following an initial byte is to be read, derived from
/// the additional-info field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgEncoding {
    /// The additional-info value itself *is* the argument (0-23).
    Immediate(u8),
    /// The argument follows as 1 big-endian byte (additional info 24).
    OneByte,
    /// The argument follows as 2 big-endian bytes (additional info 25).
    TwoByte,
    /// The argument follows as 4 big-endian bytes (additional info 26).
    FourByte,
    /// The argument follows as 8 big-endian bytes (additional info 27).
    EightByte,
}

/// Split a raw initial byte into its major type and additional-info field.
pub(crate) fn split_initial_byte(byte: u8) -> (MajorType, u8) {
    (MajorType::from_u8(byte >> 5), byte & 0x1f)
}

/// Combine a major type and an additional-info field into a raw initial
/// byte.
pub(crate) fn make_initial_byte(major: MajorType, additional_info: u8) -> u8 {
    debug_assert!(additional_info <= 0x1f);
    (major.into_u8() << 5) | additional_info
}

/// Classify an additional-info field for argument-reading purposes, in a
/// length/argument context (major types 0, 1, 2, 3, 4, 5, 6). Returns
/// `None` for additional-info values not accepted in this codec (28-31, and
/// the indefinite-length marker 31 in particular — indefinite-length items
/// are never produced or accepted, spec §6.1).
pub(crate) fn classify_arg(additional_info: u8) -> Option<ArgEncoding> {
    match additional_info {
        0..=23 => Some(ArgEncoding::Immediate(additional_info)),
        24 => Some(ArgEncoding::OneByte),
        25 => Some(ArgEncoding::TwoByte),
        26 => Some(ArgEncoding::FourByte),
        27 => Some(ArgEncoding::EightByte),
        _ => None,
    }
}

/// The additional-info values used under major type 7 (simple/float).
pub(crate) mod simple {
    pub const FALSE: u8 = 20;
    pub const TRUE: u8 = 21;
    pub const NULL: u8 = 22;
    pub const UNDEFINED: u8 = 23;
    /// Accepted on input only to be explicitly rejected; see spec §9 Open
    /// Question 1 and `SPEC_FULL.md` §4.1.7.
    pub const HALF_FLOAT: u8 = 25;
    pub const SINGLE_FLOAT: u8 = 26;
    pub const DOUBLE_FLOAT: u8 = 27;
}
