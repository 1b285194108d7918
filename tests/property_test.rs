//! Property tests for value decoding and storage location.

mod common;

use abif_tools_rs::{AbifDate, AbifReader, AbifTime, AbifValue, Elements, Thumb};
use common::AbifFileBuilder;
use proptest::prelude::*;

fn read_one(builder: AbifFileBuilder, name: &str) -> AbifValue {
    let reader = AbifReader::from_bytes(builder.build().bytes).unwrap();
    reader.get(name, 1).unwrap().clone()
}

fn be_bytes<T, const N: usize>(values: &[T], to_bytes: impl Fn(&T) -> [u8; N]) -> Vec<u8> {
    values.iter().flat_map(|v| to_bytes(v)).collect()
}

proptest! {
    #[test]
    fn prop_shorts_round_trip(values in prop::collection::vec(any::<i16>(), 0..64)) {
        let builder = AbifFileBuilder::new().shorts(b"DATA", 1, &values);
        let value = read_one(builder, "DATA");
        prop_assert_eq!(value, AbifValue::Short(Elements::from_vec(values)));
    }

    #[test]
    fn prop_words_round_trip(values in prop::collection::vec(any::<u16>(), 1..32)) {
        let data = be_bytes(&values, |v| v.to_be_bytes());
        let builder = AbifFileBuilder::new().entry(b"Word", 1, 3, 2, values.len() as i32, data);
        prop_assert_eq!(read_one(builder, "Word"), AbifValue::Word(Elements::from_vec(values)));
    }

    #[test]
    fn prop_longs_round_trip(values in prop::collection::vec(any::<i32>(), 1..32)) {
        let builder = AbifFileBuilder::new().longs(b"Long", 1, &values);
        prop_assert_eq!(read_one(builder, "Long"), AbifValue::Long(Elements::from_vec(values)));
    }

    #[test]
    fn prop_bytes_round_trip(values in prop::collection::vec(any::<u8>(), 1..32)) {
        let builder = AbifFileBuilder::new()
            .entry(b"Byte", 1, 1, 1, values.len() as i32, values.clone());
        prop_assert_eq!(read_one(builder, "Byte"), AbifValue::Byte(Elements::from_vec(values)));
    }

    #[test]
    fn prop_floats_bit_exact(values in prop::collection::vec(any::<u32>(), 1..16)) {
        let data = be_bytes(&values, |v| v.to_be_bytes());
        let builder = AbifFileBuilder::new().entry(b"NOIS", 1, 7, 4, values.len() as i32, data);
        match read_one(builder, "NOIS") {
            AbifValue::Float(decoded) => {
                let bits: Vec<u32> = decoded.iter().map(|f| f.to_bits()).collect();
                prop_assert_eq!(bits, values);
            }
            other => prop_assert!(false, "unexpected value {:?}", other),
        }
    }

    #[test]
    fn prop_doubles_bit_exact(values in prop::collection::vec(any::<u64>(), 1..16)) {
        let data = be_bytes(&values, |v| v.to_be_bytes());
        let builder = AbifFileBuilder::new().entry(b"Dbl_", 1, 8, 8, values.len() as i32, data);
        match read_one(builder, "Dbl_") {
            AbifValue::Double(decoded) => {
                let bits: Vec<u64> = decoded.iter().map(|f| f.to_bits()).collect();
                prop_assert_eq!(bits, values);
            }
            other => prop_assert!(false, "unexpected value {:?}", other),
        }
    }

    #[test]
    fn prop_dates_round_trip(
        dates in prop::collection::vec((any::<i16>(), 1u8..=12, 1u8..=31), 1..8)
    ) {
        let data: Vec<u8> = dates
            .iter()
            .flat_map(|(y, m, d)| {
                let [hi, lo] = y.to_be_bytes();
                [hi, lo, *m, *d]
            })
            .collect();
        let builder = AbifFileBuilder::new().entry(b"RUND", 1, 10, 4, dates.len() as i32, data);
        let expected: Vec<AbifDate> =
            dates.iter().map(|&(y, m, d)| AbifDate::new(y, m, d)).collect();
        prop_assert_eq!(
            read_one(builder, "RUND"),
            AbifValue::Date(Elements::from_vec(expected))
        );
    }

    #[test]
    fn prop_times_round_trip(times in prop::collection::vec(any::<[u8; 4]>(), 1..8)) {
        let data: Vec<u8> = times.iter().flatten().copied().collect();
        let builder = AbifFileBuilder::new().entry(b"RUNT", 1, 11, 4, times.len() as i32, data);
        let expected: Vec<AbifTime> =
            times.iter().map(|t| AbifTime::new(t[0], t[1], t[2], t[3])).collect();
        prop_assert_eq!(
            read_one(builder, "RUNT"),
            AbifValue::Time(Elements::from_vec(expected))
        );
    }

    #[test]
    fn prop_thumbs_round_trip(
        thumbs in prop::collection::vec(
            (any::<i32>(), any::<i32>(), any::<u8>(), any::<u8>()),
            1..4,
        )
    ) {
        let data: Vec<u8> = thumbs
            .iter()
            .flat_map(|(d, u, c, n)| {
                let mut packed = d.to_be_bytes().to_vec();
                packed.extend_from_slice(&u.to_be_bytes());
                packed.push(*c);
                packed.push(*n);
                packed
            })
            .collect();
        let builder =
            AbifFileBuilder::new().entry(b"THUM", 1, 12, 10, thumbs.len() as i32, data);
        let expected: Vec<Thumb> =
            thumbs.iter().map(|&(d, u, c, n)| Thumb { d, u, c, n }).collect();
        prop_assert_eq!(
            read_one(builder, "THUM"),
            AbifValue::Thumb(Elements::from_vec(expected))
        );
    }

    #[test]
    fn prop_bools_round_trip(values in prop::collection::vec(any::<u8>(), 1..16)) {
        let builder = AbifFileBuilder::new()
            .entry(b"Bool", 1, 13, 1, values.len() as i32, values.clone());
        let expected: Vec<bool> = values.iter().map(|&b| b != 0).collect();
        prop_assert_eq!(
            read_one(builder, "Bool"),
            AbifValue::Bool(Elements::from_vec(expected))
        );
    }

    #[test]
    fn prop_strings_round_trip(text in "[ -~]{0,40}") {
        let builder = AbifFileBuilder::new()
            .pstring(b"SMPL", 1, &text)
            .cstring(b"CMNT", 1, &text);
        let reader = AbifReader::from_bytes(builder.build().bytes).unwrap();
        prop_assert_eq!(reader.get("SMPL", 1).unwrap(), &AbifValue::PString(text.clone()));
        prop_assert_eq!(reader.get("CMNT", 1).unwrap(), &AbifValue::CString(text));
    }

    #[test]
    fn prop_raw_round_trip(
        code in 1024i16..=i16::MAX,
        payload in prop::collection::vec(any::<u8>(), 0..32)
    ) {
        let builder = AbifFileBuilder::new()
            .entry(b"Usr_", 1, code, 1, payload.len() as i32, payload.clone());
        prop_assert_eq!(
            read_one(builder, "Usr_"),
            AbifValue::Raw { type_code: code, bytes: payload }
        );
    }

    /// An inline long whose bytes also name a valid file offset: changing the
    /// bytes at that offset must not change the decoded value.
    #[test]
    fn prop_inline_value_never_seeks(
        samples in prop::collection::vec(any::<i16>(), 3..32),
        flip in any::<u8>()
    ) {
        let layout = AbifFileBuilder::new()
            .shorts(b"DATA", 1, &samples)
            .longs(b"PTR_", 1, &[0])
            .build();
        let target = layout.data_offsets[0].unwrap() as i32;

        let built = AbifFileBuilder::new()
            .shorts(b"DATA", 1, &samples)
            .longs(b"PTR_", 1, &[target])
            .build();
        let mut bytes = built.bytes.clone();
        let at = target as usize;
        bytes[at] ^= flip | 1;

        let reader = AbifReader::from_bytes(bytes).unwrap();
        prop_assert_eq!(
            reader.get("PTR_", 1).unwrap(),
            &AbifValue::Long(Elements::Scalar(target))
        );
    }

    /// Offset-stored values follow the bytes they point at, not the field.
    #[test]
    fn prop_offset_value_follows_target(
        samples in prop::collection::vec(any::<i16>(), 3..32),
        flip in 1u8..=255
    ) {
        let built = AbifFileBuilder::new().shorts(b"DATA", 1, &samples).build();
        let data_at = built.data_offsets[0].unwrap();

        let mut changed = built.bytes.clone();
        changed[data_at + 1] ^= flip;
        let reader = AbifReader::from_bytes(changed).unwrap();
        prop_assert_ne!(
            reader.get("DATA", 1).unwrap(),
            &AbifValue::Short(Elements::from_vec(samples.clone()))
        );

        // Relocate the data and repoint the field: same value.
        let mut moved = built.bytes.clone();
        let len = samples.len() * 2;
        let new_at = moved.len();
        let copy = moved[data_at..data_at + len].to_vec();
        moved.extend_from_slice(&copy);
        moved[data_at..data_at + len].fill(0xEE);
        let field = built.data_field_offset(0);
        moved[field..field + 4].copy_from_slice(&(new_at as i32).to_be_bytes());
        let reader = AbifReader::from_bytes(moved).unwrap();
        prop_assert_eq!(
            reader.get("DATA", 1).unwrap(),
            &AbifValue::Short(Elements::from_vec(samples))
        );
    }
}

#[test]
fn test_pstring_cat() {
    let builder = AbifFileBuilder::new().entry(b"TEST", 1, 18, 1, 4, vec![0x03, b'c', b'a', b't']);
    assert_eq!(read_one(builder, "TEST"), AbifValue::PString("cat".into()));
}

#[test]
fn test_cstring_foo() {
    let builder = AbifFileBuilder::new().entry(b"TEST", 1, 19, 1, 4, vec![b'f', b'o', b'o', 0]);
    assert_eq!(read_one(builder, "TEST"), AbifValue::CString("foo".into()));
}

#[test]
fn test_type_9999_is_raw() {
    let builder = AbifFileBuilder::new().entry(b"TEST", 1, 9999, 1, 6, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(
        read_one(builder, "TEST"),
        AbifValue::Raw {
            type_code: 9999,
            bytes: vec![1, 2, 3, 4, 5, 6]
        }
    );
}
