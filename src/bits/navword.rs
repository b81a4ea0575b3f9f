//! GPS LNAV 30 bit word parity (IS-GPS-200 20.3.5.2)
use crate::error::Error;

/// Parity equations for bits D25 to D30, applied over D29*, D30* and D1 to D24
const HAMMING: [u32; 6] = [
    0xBB1F3480, 0x5D8F9A40, 0xAEC7CD00, 0x5763E680, 0x6BB1F340, 0x8B7A89C0,
];

/// D30* of the previous word: data bits are transmitted complemented when set
const D30_STAR: u32 = 0x40000000;

/// Data bits D1 to D24
const DATA_MASK: u32 = 0x3FFFFFC0;

pub(crate) fn parity(word: u32) -> u32 {
    HAMMING.iter().fold(0, |parity, mask| {
        (parity << 1) | ((word & mask) >> 6).count_ones() & 0x01
    })
}

/// Verifies and decodes one legacy navigation word.
/// `word` holds D29* and D30* of the previous word in its two
/// most significant bits, followed by the current word D1 to D30.
/// Returns the 24 data bits as three bytes, or [Error::NavWordParity].
pub fn decode_nav_word(word: u32) -> Result<[u8; 3], Error> {
    let word = if word & D30_STAR > 0 {
        word ^ DATA_MASK
    } else {
        word
    };
    if parity(word) != word & 0x3F {
        return Err(Error::NavWordParity);
    }
    Ok([(word >> 22) as u8, (word >> 14) as u8, (word >> 6) as u8])
}
