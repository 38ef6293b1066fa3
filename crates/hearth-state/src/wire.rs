//! The slice of the protobuf wire format needed to read a record's leading tag and varint.
//!
//! Full message decoding is left to `prost`; nothing here understands field layouts beyond
//! "tag byte, then value".

use crate::error::{Result, StateError};

/// Longest encoding of a 32-bit varint.
pub const MAX_VARINT32_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireType {
    Varint,
    Fixed64,
    LengthDelimited,
    StartGroup,
    EndGroup,
    Fixed32,
    /// Wire types 6 and 7 are not assigned.
    Invalid(u8),
}

impl WireType {
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0 => WireType::Varint,
            1 => WireType::Fixed64,
            2 => WireType::LengthDelimited,
            3 => WireType::StartGroup,
            4 => WireType::EndGroup,
            5 => WireType::Fixed32,
            other => WireType::Invalid(other),
        }
    }
}

/// A field key read from a single byte.
///
/// Only field numbers 1..=15 fit in one tag byte. For larger numbers the byte still carries the
/// wire type in its low bits, which is all the sniffer relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    pub field: u32,
    pub wire_type: WireType,
}

impl Tag {
    pub fn from_byte(byte: u8) -> Self {
        Self {
            field: u32::from((byte & 0x7f) >> 3),
            wire_type: WireType::from_bits(byte),
        }
    }

    /// Reads the tag at `buf[offset]`.
    pub fn read(buf: &[u8], offset: usize) -> Result<Self> {
        buf.get(offset)
            .map(|&byte| Self::from_byte(byte))
            .ok_or(StateError::Truncated { offset })
    }
}

/// Decodes one little-endian base-128 varint starting at `buf[offset]`.
///
/// Returns the value and the number of bytes consumed. Bits beyond the low 32 in the fifth byte
/// are discarded, matching how protobuf narrows `uint32`/`int32` fields.
pub fn decode_varint32(buf: &[u8], offset: usize) -> Result<(u32, usize)> {
    if offset >= buf.len() {
        return Err(StateError::Truncated { offset });
    }

    let mut value: u32 = 0;
    for i in 0..MAX_VARINT32_LEN {
        let pos = offset + i;
        let byte = *buf.get(pos).ok_or(StateError::Truncated { offset: pos })?;
        value |= u32::from(byte & 0x7f) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }
    Err(StateError::MalformedVarint { offset })
}
