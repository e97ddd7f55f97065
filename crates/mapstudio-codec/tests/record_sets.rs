// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs, clippy::unwrap_used)]
use proptest::prelude::*;

use mapstudio_codec::{
    decode_record_set, encode_record_set, CodecError, RecordSet, FORMAT_VERSION,
};
use mapstudio_dry_tests::{cycle_pair, gate_and_fog, spawner_scene};

fn scene() -> RecordSet {
    let mut records = gate_and_fog();
    records.extend(spawner_scene());
    records.extend(cycle_pair());
    RecordSet {
        scope: "m10_00_00_00".into(),
        records,
    }
}

#[test]
fn scenes_survive_the_wire() {
    let set = scene();
    let bytes = encode_record_set(&set).unwrap();
    assert_eq!(decode_record_set(&bytes).unwrap(), set);
}

#[test]
fn header_carries_version_and_label() {
    let bytes = encode_record_set(&RecordSet {
        scope: "m".into(),
        records: Vec::new(),
    })
    .unwrap();
    // [1, "m", []]
    assert_eq!(hex::encode(&bytes), "8301616d80");
    assert_eq!(FORMAT_VERSION, 1);
}

#[test]
fn other_versions_are_refused() {
    let mut bytes = encode_record_set(&scene()).unwrap();
    bytes[1] = 0x02;
    assert!(matches!(
        decode_record_set(&bytes),
        Err(CodecError::Version {
            found: 2,
            expected: 1
        })
    ));
}

proptest! {
    #[test]
    fn every_truncation_is_an_error(cut in 0usize..1000) {
        let bytes = encode_record_set(&scene()).unwrap();
        let cut = cut % bytes.len();
        prop_assert!(decode_record_set(&bytes[..cut]).is_err());
    }

    #[test]
    fn trailing_garbage_is_an_error(extra in prop::collection::vec(any::<u8>(), 1..8)) {
        let mut bytes = encode_record_set(&scene()).unwrap();
        bytes.extend(extra);
        prop_assert!(decode_record_set(&bytes).is_err());
    }
}
