use bitspan::{BitReader, BitWriter};

#[test]
fn reader_position_accessors_stay_in_sync() {
    let data = [0x21, 0x41, 0x81, 0xF1];
    for (pos, byte_pos, offset) in [
        (0, 0, 0),
        (1, 0, 1),
        (7, 0, 7),
        (8, 1, 0),
        (9, 1, 1),
        (15, 1, 7),
        (16, 2, 0),
        (17, 2, 1),
        (23, 2, 7),
        (24, 3, 0),
        (25, 3, 1),
        (31, 3, 7),
        (32, 4, 0),
    ] {
        let r = BitReader::with_offset(&data, pos);
        assert_eq!(r.bit_position(), pos);
        assert_eq!(r.byte_position(), byte_pos);
        assert_eq!(r.bit_offset(), offset);
        assert_eq!(r.remaining_bits(), 32 - pos);
    }
}

#[test]
fn writer_position_accessors_stay_in_sync() {
    let mut data = [0u8; 4];
    let mut w = BitWriter::new(&mut data);

    assert_eq!(w.bit_len(), 32);
    assert_eq!(w.remaining_bits(), 32);

    w.set_bit_position(9);
    assert_eq!(w.byte_position(), 1);
    assert_eq!(w.bit_offset(), 1);
    assert_eq!(w.remaining_bits(), 23);

    w.set_byte_position(3);
    assert_eq!(w.bit_position(), 24);
    assert_eq!(w.bit_offset(), 0);
    assert_eq!(w.remaining_bits(), 8);
}

#[test]
fn set_positions_move_the_cursor() {
    let data = [0xA7, 0x6B];
    let mut r = BitReader::new(&data);

    r.set_bit_position(9);
    assert_eq!(r.try_peek_u8(4), Some(0x0D));

    r.set_byte_position(1);
    assert_eq!(r.bit_position(), 8);
    assert_eq!(r.try_peek_u8(8), Some(0x6B));

    r.set_bit_position(16);
    assert_eq!(r.remaining_bits(), 0);
}

#[test]
fn cursor_may_rest_at_the_very_end() {
    let data = [0xA7];
    let r = BitReader::with_offset(&data, 8);

    assert_eq!(r.remaining_bits(), 0);
    assert_eq!(r.byte_position(), 1);
    assert_eq!(r.bit_offset(), 0);
    assert_eq!(r.try_peek_bit(), None);
}

#[test]
fn zero_length_buffers_are_valid() {
    let r = BitReader::with_offset(&[], 0);
    assert_eq!(r.bit_len(), 0);
    assert_eq!(r.try_peek_bit(), None);

    let mut data: [u8; 0] = [];
    let w = BitWriter::new(&mut data);
    assert_eq!(w.bit_len(), 0);
    assert_eq!(w.remaining_bits(), 0);
}

#[test]
fn into_inner_returns_the_buffer() {
    let data = [0xA7, 0x6B];
    let r = BitReader::with_offset(&data, 9);
    assert_eq!(r.into_inner(), &data);

    let mut data = [0u8; 2];
    let mut w = BitWriter::new(&mut data);
    assert!(w.try_write_u16(0xBDA5, 16));
    let inner = w.into_inner();
    inner[0] = 0xFF;
    assert_eq!(data, [0xFF, 0xA5]);
}

#[test]
#[should_panic(expected = "bit position must be in 0..=32, got 33")]
fn reader_rejects_offset_past_the_end() {
    let _ = BitReader::with_offset(&[0x21, 0x41, 0x81, 0xF1], 33);
}

#[test]
#[should_panic(expected = "bit position must be in 0..=32, got 40")]
fn reader_rejects_byte_position_past_the_end() {
    let data = [0x21, 0x41, 0x81, 0xF1];
    let mut r = BitReader::new(&data);
    r.set_byte_position(5);
}

#[test]
#[should_panic(expected = "bit position must be in 0..=16, got 17")]
fn writer_rejects_position_past_the_end() {
    let mut data = [0xA7, 0x6B];
    let mut w = BitWriter::new(&mut data);
    w.set_bit_position(17);
}

#[test]
#[should_panic(expected = "bit position must be in 0..=16, got 18")]
fn writer_rejects_offset_past_the_end() {
    let mut data = [0xA7, 0x6B];
    let _ = BitWriter::with_offset(&mut data, 18);
}
