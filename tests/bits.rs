use rand::{rngs::StdRng, Rng, SeedableRng};

use rtkcore::{
    bits::{
        check_crc24q, crc16, crc24q, crc32, get_signed_bits, get_unsigned_bits,
        set_signed_bits, set_unsigned_bits,
    },
    prelude::Error,
};

#[test]
fn empty_buffers() {
    assert_eq!(crc16(&[]), 0);
    assert_eq!(crc24q(&[]), 0);
    assert_eq!(crc32(&[]), 0);
}

#[test]
fn check_values() {
    let data = b"123456789";
    assert_eq!(crc24q(data), 0xCDE703);
    assert_eq!(crc16(data), 0x31C3);
}

#[test]
fn first_byte() {
    assert_eq!(get_unsigned_bits(&[0xFF, 0xFF], 0, 8).unwrap(), 255);
}

#[test]
fn unsigned_round_trip() {
    let mut rng = StdRng::seed_from_u64(0xD3);
    for _ in 0..10_000 {
        let len = rng.gen_range(1..=32_usize);
        let pos = rng.gen_range(0..64_usize);
        let value = rng.gen::<u32>() >> (32 - len);
        let mut buf = [0_u8; 12];
        rng.fill(&mut buf[..]);
        let before = buf;
        set_unsigned_bits(&mut buf, pos, len, value).unwrap();
        assert_eq!(get_unsigned_bits(&buf, pos, len).unwrap(), value);
        // surrounding bits are preserved
        if pos > 0 {
            assert_eq!(
                get_unsigned_bits(&buf, 0, pos.min(32)).unwrap(),
                get_unsigned_bits(&before, 0, pos.min(32)).unwrap()
            );
        }
        let end = pos + len;
        let tail = (96 - end).min(32);
        assert_eq!(
            get_unsigned_bits(&buf, end, tail).unwrap(),
            get_unsigned_bits(&before, end, tail).unwrap()
        );
    }
}

#[test]
fn signed_round_trip() {
    let mut rng = StdRng::seed_from_u64(0x1005);
    for _ in 0..10_000 {
        let len = rng.gen_range(2..=32_usize);
        let min = -(1_i64 << (len - 1));
        let max = (1_i64 << (len - 1)) - 1;
        let value = rng.gen_range(min..=max) as i32;
        let pos = rng.gen_range(0..64_usize);
        let mut buf = [0_u8; 12];
        set_signed_bits(&mut buf, pos, len, value).unwrap();
        assert_eq!(
            get_signed_bits(&buf, pos, len).unwrap(),
            value,
            "{} over {} bits",
            value,
            len
        );
    }
}

#[test]
fn parity_protected_frames() {
    let mut rng = StdRng::seed_from_u64(24);
    for _ in 0..100 {
        let len = rng.gen_range(1..200);
        let mut frame = (0..len).map(|_| rng.gen::<u8>()).collect::<Vec<_>>();
        let crc = crc24q(&frame);
        frame.extend_from_slice(&[(crc >> 16) as u8, (crc >> 8) as u8, crc as u8]);
        assert_eq!(check_crc24q(&frame).unwrap().len(), len);

        let bit = rng.gen_range(0..frame.len() * 8);
        frame[bit / 8] ^= 0x80 >> (bit % 8);
        assert!(matches!(
            check_crc24q(&frame),
            Err(Error::ChecksumMismatch { .. })
        ));
    }
}
