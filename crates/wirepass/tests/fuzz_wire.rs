// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Property tests: round trip, truncation safety, byte-order symmetry.

use proptest::prelude::*;
use wirepass::{measure, pack_to_vec, unpack_from, Codec, Endian, Wire, WireError};

#[derive(Debug, Default, Clone, PartialEq)]
struct Record {
    a: i8,
    b: u16,
    c: i32,
    d: u64,
    e: f32,
    f: f64,
    tail: Vec<i16>,
}

impl Wire for Record {
    fn wire(&mut self, codec: &mut Codec<'_>) -> usize {
        codec.i8(&mut self.a);
        codec.u16(&mut self.b);
        codec.i32(&mut self.c);
        codec.u64(&mut self.d);
        codec.f32(&mut self.e);
        codec.f64(&mut self.f);
        self.tail.wire(codec);
        codec.len()
    }
}

fn endian() -> impl Strategy<Value = Endian> {
    prop_oneof![Just(Endian::Little), Just(Endian::Big)]
}

prop_compose! {
    fn record()(
        a in any::<i8>(),
        b in any::<u16>(),
        c in any::<i32>(),
        d in any::<u64>(),
        e in any::<f32>().prop_filter("NaN never compares equal", |v| !v.is_nan()),
        f in any::<f64>().prop_filter("NaN never compares equal", |v| !v.is_nan()),
        tail in prop::collection::vec(any::<i16>(), 0..16),
    ) -> Record {
        Record { a, b, c, d, e, f, tail }
    }
}

proptest! {
    #[test]
    fn round_trip_any_record(mut original in record(), endian in endian()) {
        let bytes = pack_to_vec(&mut original, endian);
        prop_assert_eq!(bytes.len(), 27 + 4 + 2 * original.tail.len());

        let mut back = Record::default();
        let read = back.wire(&mut Codec::reader(&bytes, endian));
        prop_assert_eq!(read, bytes.len());
        prop_assert_eq!(back, original);
    }

    #[test]
    fn truncated_write_stays_in_bounds(
        mut original in record(),
        endian in endian(),
        cut in 0usize..64,
    ) {
        let size = measure(&mut original, endian);
        let keep = cut.min(size);
        let mut buf = vec![0u8; keep];
        let mut codec = Codec::writer(&mut buf, endian);
        original.wire(&mut codec);
        prop_assert_eq!(codec.len(), size);

        // Whatever was written is a prefix of the full encoding.
        let full = pack_to_vec(&mut original, endian);
        for (i, (&got, &want)) in buf.iter().zip(full.iter()).enumerate() {
            prop_assert!(got == want || got == 0, "byte {} diverged", i);
        }
    }

    #[test]
    fn truncated_read_keeps_cursor_and_fitting_fields(
        mut original in record(),
        endian in endian(),
        cut in 0usize..64,
    ) {
        let full = pack_to_vec(&mut original, endian);
        let keep = cut.min(full.len());
        let mut back = Record::default();
        let read = back.wire(&mut Codec::reader(&full[..keep], endian));

        // Once the length prefix fits, the cursor covers every stored
        // element; before that the tail length is unknown and stays empty.
        prop_assert!(read >= keep);
        if keep >= 31 {
            prop_assert_eq!(read, full.len());
        } else {
            prop_assert_eq!(read, 31);
        }
        if keep < full.len() {
            let checked = unpack_from::<Record>(&full[..keep], endian);
            prop_assert_eq!(
                checked,
                Err(WireError::Truncated { needed: read, available: keep })
            );
        }
        if keep >= 1 { prop_assert_eq!(back.a, original.a); } else { prop_assert_eq!(back.a, 0); }
        if keep >= 3 { prop_assert_eq!(back.b, original.b); } else { prop_assert_eq!(back.b, 0); }
        if keep >= 7 { prop_assert_eq!(back.c, original.c); } else { prop_assert_eq!(back.c, 0); }
        if keep >= 15 { prop_assert_eq!(back.d, original.d); } else { prop_assert_eq!(back.d, 0); }
    }

    #[test]
    fn opposite_byte_order_swaps(value in any::<u32>()) {
        let mut buf = [0u8; 4];
        let mut written = value;
        Codec::writer(&mut buf, Endian::Little).u32(&mut written);
        let mut back = 0u32;
        Codec::reader(&buf, Endian::Big).u32(&mut back);
        prop_assert_eq!(back, value.swap_bytes());

        let palindromic = buf[0] == buf[3] && buf[1] == buf[2];
        prop_assert_eq!(back == value, palindromic);
    }

    #[test]
    fn garbage_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..256), endian in endian()) {
        let mut record = Record::default();
        let read = record.wire(&mut Codec::reader(&bytes, endian));
        prop_assert!(read >= 27 + 4);
        prop_assert!(record.tail.len() <= bytes.len());
    }
}

#[test]
fn palindromic_value_survives_byte_order_swap() {
    let mut value = 0x1234_3412u32;
    let mut buf = [0u8; 4];
    Codec::writer(&mut buf, Endian::Big).u32(&mut value);
    let mut back = 0u32;
    Codec::reader(&buf, Endian::Little).u32(&mut back);
    assert_eq!(back, value);
}
