//! Integration tests for typed values written through Ogawa archives.

use field3d_ogawa::og::{
    read_data, read_data_into, read_data_type, read_string, write_data, write_data_type,
    write_string, OgDataType, OgValue, OGAWA_THREAD,
};
use field3d_ogawa::ogawa::{IArchive, OArchive, OGroup, ReadOptions};
use field3d_ogawa::util::{f16, DVec3, Vec3, Vec3h};
use field3d_ogawa::Error;

use proptest::prelude::*;
use tempfile::NamedTempFile;

fn write_archive(f: impl FnOnce(&OGroup)) -> NamedTempFile {
    let temp = NamedTempFile::new().expect("Failed to create temp file");
    let archive = OArchive::create(temp.path()).expect("Failed to create archive");
    f(&archive.root());
    archive.close().expect("Failed to close archive");
    temp
}

#[test]
fn test_tagged_u32_scenario() {
    let temp = write_archive(|root| {
        let group = root.add_group().unwrap();
        assert_eq!(write_data_type::<u32>(&group).unwrap(), 0);
        assert_eq!(write_data(&group, &42u32).unwrap(), 1);
    });

    let archive = IArchive::open(temp.path()).expect("Failed to open archive");
    let group = archive.root().group(0, OGAWA_THREAD).unwrap();

    let ty = read_data_type(&group, 0).unwrap();
    assert_eq!(ty, OgDataType::Uint32);

    match ty {
        OgDataType::Uint32 => assert_eq!(read_data::<u32>(&group, 1).unwrap(), 42),
        other => panic!("unexpected tag {other}"),
    }

    let mut wide = 0i64;
    assert!(matches!(
        read_data_into(&group, 1, &mut wide),
        Err(Error::SizeMismatch { expected: 8, actual: 4 })
    ));
    assert_eq!(wide, 0);
}

#[test]
fn test_every_tag_roundtrips() {
    let temp = write_archive(|root| {
        write_data_type::<i8>(root).unwrap();
        write_data_type::<u8>(root).unwrap();
        write_data_type::<i16>(root).unwrap();
        write_data_type::<u16>(root).unwrap();
        write_data_type::<i32>(root).unwrap();
        write_data_type::<u32>(root).unwrap();
        write_data_type::<i64>(root).unwrap();
        write_data_type::<u64>(root).unwrap();
        write_data_type::<f16>(root).unwrap();
        write_data_type::<f32>(root).unwrap();
        write_data_type::<f64>(root).unwrap();
        write_data_type::<Vec3h>(root).unwrap();
        write_data_type::<Vec3>(root).unwrap();
        write_data_type::<DVec3>(root).unwrap();
    });

    let archive = IArchive::open(temp.path()).unwrap();
    let root = archive.root();
    assert_eq!(root.num_children(), OgDataType::ALL.len() as u64);
    for (i, expected) in OgDataType::ALL.iter().enumerate() {
        assert_eq!(read_data_type(root, i as u64).unwrap(), *expected);
    }
}

#[test]
fn test_values_are_bit_identical() {
    let nan = f32::from_bits(0x7fc0_1234);
    let temp = write_archive(|root| {
        write_data(root, &nan).unwrap();
        write_data(root, &-0.0f64).unwrap();
        write_data(root, &Vec3h::new(f16::MAX, f16::MIN_POSITIVE, f16::NEG_INFINITY)).unwrap();
        write_data(root, &DVec3::new(f64::EPSILON, -1.0, 1e300)).unwrap();
    });

    let archive = IArchive::open_opts(temp.path(), ReadOptions::buffered(2)).unwrap();
    let root = archive.root();
    assert_eq!(read_data::<f32>(root, 0).unwrap().to_bits(), nan.to_bits());
    assert_eq!(read_data::<f64>(root, 1).unwrap().to_bits(), (-0.0f64).to_bits());
    assert_eq!(
        read_data::<Vec3h>(root, 2).unwrap(),
        Vec3h::new(f16::MAX, f16::MIN_POSITIVE, f16::NEG_INFINITY)
    );
    assert_eq!(
        read_data::<DVec3>(root, 3).unwrap(),
        DVec3::new(f64::EPSILON, -1.0, 1e300)
    );
    assert!(read_data::<Vec3>(root, 3).is_err());
}

#[test]
fn test_value_index_follows_tag() {
    let temp = write_archive(|root| {
        write_string(root, "name").unwrap();
        assert_eq!(OgValue::from(-3i16).write(root).unwrap(), 2);
        assert_eq!(OgValue::from(Vec3::X).write(root).unwrap(), 4);
    });

    let archive = IArchive::open(temp.path()).unwrap();
    let root = archive.root();
    assert_eq!(read_string(root, 0).unwrap(), "name");
    assert_eq!(read_data_type(root, 1).unwrap(), OgDataType::Int16);
    assert_eq!(read_data::<i16>(root, 2).unwrap(), -3);
    assert_eq!(read_data_type(root, 3).unwrap(), OgDataType::Vec32);
    assert_eq!(read_data::<Vec3>(root, 4).unwrap(), Vec3::X);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_string_roundtrip(s in "\\PC*", with_nul in any::<bool>()) {
        let s = if with_nul { format!("{s}\0{s}") } else { s };
        let expected = s.clone();
        let temp = write_archive(move |root| {
            write_string(root, &s).unwrap();
        });

        let archive = IArchive::open(temp.path()).unwrap();
        prop_assert_eq!(read_string(archive.root(), 0).unwrap(), expected);
    }

    #[test]
    fn prop_truncated_string_fails(len in 1usize..64, missing in 1usize..64) {
        let missing = missing.min(len);
        let temp = write_archive(move |root| {
            let mut buf = (len as u64).to_le_bytes().to_vec();
            buf.extend(std::iter::repeat(b'x').take(len - missing));
            root.add_data(&buf).unwrap();
        });

        let archive = IArchive::open(temp.path()).unwrap();
        let is_invalid = matches!(read_string(archive.root(), 0), Err(Error::InvalidString(_)));
        prop_assert!(is_invalid);
    }

    #[test]
    fn prop_scalar_roundtrip(a in any::<i64>(), b in any::<u16>(), c in any::<f64>()) {
        let temp = write_archive(move |root| {
            write_data(root, &a).unwrap();
            write_data(root, &b).unwrap();
            write_data(root, &c).unwrap();
        });

        let archive = IArchive::open(temp.path()).unwrap();
        let root = archive.root();
        prop_assert_eq!(read_data::<i64>(root, 0).unwrap(), a);
        prop_assert_eq!(read_data::<u16>(root, 1).unwrap(), b);
        prop_assert_eq!(read_data::<f64>(root, 2).unwrap().to_bits(), c.to_bits());
    }
}
