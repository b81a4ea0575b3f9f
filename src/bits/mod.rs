//! Bit level codec: field extraction and insertion, checksums
//! and legacy navigation word parity.
//!
//! Bit positions are counted from the most significant bit of the
//! first byte, fields are read and written MSB first across byte boundaries.
use crate::error::Error;

mod crc;
mod navword;

pub use crc::{check_crc24q, crc16, crc24q, crc32};
pub use navword::decode_nav_word;

/// Largest field handled by this module
pub const MAX_FIELD_BITS: usize = 32;

fn check_field(buf: &[u8], pos: usize, len: usize) -> Result<(), Error> {
    if len > MAX_FIELD_BITS {
        return Err(Error::InvalidBitLength(len));
    }
    if pos + len > buf.len() * 8 {
        return Err(Error::NotEnoughBytes);
    }
    Ok(())
}

/// Extracts an unsigned field of `len` bits starting at bit `pos`.
/// ```
/// use rtkcore::bits::get_unsigned_bits;
/// assert_eq!(get_unsigned_bits(&[0xFF, 0xFF], 0, 8).unwrap(), 255);
/// assert_eq!(get_unsigned_bits(&[0x0F, 0xF0], 4, 8).unwrap(), 255);
/// ```
pub fn get_unsigned_bits(buf: &[u8], pos: usize, len: usize) -> Result<u32, Error> {
    check_field(buf, pos, len)?;
    let mut bits = 0_u32;
    for i in pos..pos + len {
        bits = (bits << 1) | ((buf[i / 8] >> (7 - i % 8)) & 0x01) as u32;
    }
    Ok(bits)
}

/// Extracts a signed field of `len` bits starting at bit `pos`.
/// The field is sign extended when its most significant bit is set.
pub fn get_signed_bits(buf: &[u8], pos: usize, len: usize) -> Result<i32, Error> {
    let bits = get_unsigned_bits(buf, pos, len)?;
    if len == 0 || len >= MAX_FIELD_BITS || bits & (1 << (len - 1)) == 0 {
        return Ok(bits as i32);
    }
    Ok((bits | (u32::MAX << len)) as i32)
}

/// Writes the `len` least significant bits of `data` at bit `pos`.
/// Surrounding bits are preserved.
pub fn set_unsigned_bits(buf: &mut [u8], pos: usize, len: usize, data: u32) -> Result<(), Error> {
    check_field(buf, pos, len)?;
    if len == 0 {
        return Ok(());
    }
    let mut mask = 1_u32 << (len - 1);
    for i in pos..pos + len {
        if data & mask > 0 {
            buf[i / 8] |= 1 << (7 - i % 8);
        } else {
            buf[i / 8] &= !(1 << (7 - i % 8));
        }
        mask >>= 1;
    }
    Ok(())
}

/// Writes a signed field of `len` bits at bit `pos`.
/// The field's top bit is forced to reflect the sign of `data`
/// and the remaining bits are truncated: values that do not fit
/// in `len` bits are not saturated.
pub fn set_signed_bits(buf: &mut [u8], pos: usize, len: usize, data: i32) -> Result<(), Error> {
    if len == 0 || len > MAX_FIELD_BITS {
        return set_unsigned_bits(buf, pos, len, data as u32);
    }
    let sign = 1_i32 << (len - 1);
    let data = if data < 0 { data | sign } else { data & !sign };
    set_unsigned_bits(buf, pos, len, data as u32)
}
