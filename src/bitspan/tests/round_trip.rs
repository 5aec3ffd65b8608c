use bitspan::{BitReader, BitWriter};

#[test]
fn unaligned_fields_survive_a_round_trip() {
    let mut data = [0u8; 24];
    let mut w = BitWriter::new(&mut data);

    assert!(w.try_write_u8(0x15, 5));
    assert!(w.try_write_u16(0x0DA5, 13));
    assert!(w.try_write_u32(0x075BCD15, 27));
    assert!(w.try_write_u64(0x00FB_74A1_8CC0_FFEE, 56));
    let written = w.bit_position();

    let mut r = BitReader::new(&data);
    assert_eq!(r.try_read_u8(5), Some(0x15));
    assert_eq!(r.try_read_u16(13), Some(0x0DA5));
    assert_eq!(r.try_read_u32(27), Some(0x075BCD15));
    assert_eq!(r.try_read_u64(56), Some(0x00FB_74A1_8CC0_FFEE));
    assert_eq!(r.bit_position(), written);
}

#[test]
fn every_offset_and_count_round_trips() {
    let pattern: [u8; 12] = [
        0xB6, 0x1C, 0xF0, 0x83, 0x5A, 0x2E, 0xD9, 0x47, 0x61, 0xBE, 0x05, 0xFA,
    ];
    let value: u64 = 0xA5C3_96F0_1E78_2D4B;

    for count in 1..=64u32 {
        for pos in 0..=(96 - count as usize) {
            let mut data = pattern;
            let mut w = BitWriter::with_offset(&mut data, pos);

            // Store through the narrowest family the count fits in.
            let stored = match count {
                1..=8 => w.try_write_u8(value as u8, count),
                9..=16 => w.try_write_u16(value as u16, count),
                17..=32 => w.try_write_u32(value as u32, count),
                _ => w.try_write_u64(value, count),
            };
            assert!(stored);
            assert_eq!(w.bit_position(), pos + count as usize);

            let mask = if count == 64 {
                u64::MAX
            } else {
                (1u64 << count) - 1
            };
            let mut r = BitReader::with_offset(&data, pos);
            let loaded = match count {
                1..=8 => r.try_read_u8(count).map(u64::from),
                9..=16 => r.try_read_u16(count).map(u64::from),
                17..=32 => r.try_read_u32(count).map(u64::from),
                _ => r.try_read_u64(count),
            };
            assert_eq!(loaded, Some(value & mask));
            assert_eq!(r.bit_position(), pos + count as usize);

            // Every bit outside the written field keeps its old value.
            let mut before = BitReader::new(&pattern);
            let mut after = BitReader::new(&data);
            for i in 0..96 {
                let orig = before.try_read_bit();
                let now = after.try_read_bit();
                if i < pos || i >= pos + count as usize {
                    assert_eq!(now, orig);
                }
            }
        }
    }
}

#[test]
fn writes_ignore_bits_above_the_count() {
    let mut data = [0u8; 2];
    let mut w = BitWriter::new(&mut data);

    assert!(w.try_write_u16(0xFFFF, 4));
    assert_eq!(w.view(), &[0xF0, 0x00]);

    w.set_bit_position(0);
    assert!(w.try_poke_u16(0xABCD, 4));
    assert_eq!(w.view(), &[0xD0, 0x00]);
}

#[test]
fn packs_nibbles_like_a_hex_decoder() {
    let mut data = [0u8; 4];
    let mut w = BitWriter::new(&mut data);

    for nibble in [0x2, 0x1, 0x4, 0x1, 0x8, 0x1, 0xF, 0x1] {
        assert!(w.try_write_u8(nibble, 4));
    }
    assert_eq!(w.view(), &[0x21, 0x41, 0x81, 0xF1]);

    let mut r = BitReader::new(&data);
    for expected in [0x2, 0x1, 0x4, 0x1, 0x8, 0x1, 0xF, 0x1] {
        assert_eq!(r.try_read_u8(4), Some(expected));
    }
}

#[test]
fn encodes_a_packed_header() {
    let mut data = [0u8; 6];
    let mut w = BitWriter::new(&mut data);

    assert_eq!(w.write_bit(true), Ok(()));
    assert_eq!(w.write_u8(0x11, 5), Ok(()));
    assert_eq!(w.write_u16(0x3FF, 10), Ok(()));
    assert_eq!(w.write_u32(0xABCDE, 20), Ok(()));
    assert_eq!(w.bit_position(), 36);

    let mut r = BitReader::new(&data);
    assert_eq!(r.read_bit(), Ok(true));
    assert_eq!(r.read_u8(5), Ok(0x11));
    assert_eq!(r.read_u16(10), Ok(0x3FF));
    assert_eq!(r.read_u32(20), Ok(0xABCDE));
}

#[test]
fn patches_fields_in_place() {
    let mut data = [0xBD, 0xA5, 0xCE, 0x75];
    let mut w = BitWriter::with_offset(&mut data, 12);

    assert_eq!(w.write_u16(0x0000, 12), Ok(()));
    assert_eq!(w.view(), &[0xBD, 0xA0, 0x00, 0x75]);

    let r = BitReader::with_offset(&data, 12);
    assert_eq!(r.try_peek_u16(12), Some(0x0000));
}
