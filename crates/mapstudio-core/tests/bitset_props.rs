// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs, clippy::unwrap_used)]
use std::collections::BTreeSet;

use proptest::prelude::*;

use mapstudio_core::GroupBitSet;

fn flags(width: u32) -> impl Strategy<Value = BTreeSet<u32>> {
    prop::collection::btree_set(0..width, 0..24)
}

proptest! {
    #[test]
    fn set_algebra_matches_btreeset(a in flags(256), b in flags(256)) {
        let (sa, sb) = (GroupBitSet::from_flags(a.clone()), GroupBitSet::from_flags(b.clone()));
        prop_assert_eq!((&sa | &sb).iter().collect::<BTreeSet<_>>(), &a | &b);
        prop_assert_eq!((&sa - &sb).iter().collect::<BTreeSet<_>>(), &a - &b);
        prop_assert_eq!((&sa & &sb).iter().collect::<BTreeSet<_>>(), &a & &b);
        prop_assert_eq!(sa.len(), a.len());
    }

    #[test]
    fn encode_decode_is_lossless_within_width(a in flags(128)) {
        let set = GroupBitSet::from_flags(a);
        let words = set.encode(128).unwrap();
        prop_assert_eq!(words.len(), 4);
        prop_assert_eq!(GroupBitSet::decode(&words, 128), set);
    }

    #[test]
    fn encode_rejects_flags_past_width(a in flags(128), extra in 128u32..512) {
        let mut set = GroupBitSet::from_flags(a);
        set.insert(extra);
        let err = set.encode(128).unwrap_err();
        prop_assert_eq!(err.flag, extra);
    }

    #[test]
    fn removing_everything_equals_empty(a in flags(256)) {
        let mut set = GroupBitSet::from_flags(a.iter().copied());
        for flag in &a {
            prop_assert!(set.remove(*flag));
        }
        prop_assert!(set.is_empty());
        prop_assert_eq!(set, GroupBitSet::new());
    }
}
