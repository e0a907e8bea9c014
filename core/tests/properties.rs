//! Property tests for indexing, truncation, case, and collection queries.

use proptest::prelude::*;
use sucre::prelude::*;

fn signed(n: usize) -> isize {
    isize::try_from(n).unwrap_or(isize::MAX)
}

proptest! {
    #[test]
    fn first_n_and_slice_from_rebuild_the_text(s in "\\PC{0,30}", n in 0usize..40) {
        let rebuilt = format!("{}{}", s.first_n(n), s.slice_from(signed(n)));
        prop_assert_eq!(rebuilt, s);
    }

    #[test]
    fn wrapped_at_is_euclidean(s in "\\PC{1,20}", i in -100isize..100) {
        let chars: Vec<char> = s.chars().collect();
        let expected = chars[i.rem_euclid(signed(chars.len())) as usize];
        prop_assert_eq!(s.at(i, true), Some(expected));
    }

    #[test]
    fn unwrapped_at_stays_in_bounds(s in "\\PC{0,20}", i in -100isize..100) {
        let len = signed(s.chars().count());
        prop_assert_eq!(s.at(i, false).is_some(), (-len..len).contains(&i));
    }

    #[test]
    fn truncate_never_exceeds_length(
        s in "[a-z ]{0,60}",
        length in 0usize..70,
        split in any::<bool>(),
        from in prop_oneof![Just(TruncateFrom::Right), Just(TruncateFrom::Left), Just(TruncateFrom::Middle)],
    ) {
        let out = s.truncate_text(length, &Truncate::default().split(split).from(from));
        prop_assert!(out.chars().count() <= length);
        if s.chars().count() <= length {
            prop_assert_eq!(out, s);
        }
    }

    #[test]
    fn camelize_is_idempotent(s in "[a-z]{2,8}([_-][a-z]{2,8}){0,4}") {
        let once = s.camelize(true);
        prop_assert_eq!(once.camelize(true), once);
    }

    #[test]
    fn underscore_inverts_camelize(s in "[a-z]{2,8}(_[a-z]{2,8}){0,4}") {
        prop_assert_eq!(s.camelize(false).underscore(), s);
    }

    #[test]
    fn group_by_partitions(v in prop::collection::vec(-5i64..5, 0..40)) {
        let groups = v.group_by(&Projector::Identity);
        prop_assert_eq!(groups.values().map(Vec::len).sum::<usize>(), v.len());
        for (key, members) in &groups {
            prop_assert!(members.iter().all(|m| &m.to_string() == key));
        }
    }

    #[test]
    fn remove_where_matches_exclude(v in prop::collection::vec(0i32..6, 0..30), x in 0i32..6) {
        let m = Matcher::from(x);
        let mut edited = v.clone();
        edited.remove_where(&m);
        prop_assert_eq!(&edited, &v.exclude(&m));
        prop_assert_eq!(edited.len() + v.count_by(&m), v.len());
    }

    #[test]
    fn sorted_by_identity_sorts(v in prop::collection::vec(any::<i64>(), 0..40)) {
        let mut expected = v.clone();
        expected.sort_unstable();
        prop_assert_eq!(v.sorted_by(&Projector::Identity, false), expected);
    }

    #[test]
    fn unique_keeps_first_occurrences(v in prop::collection::vec(0i64..8, 0..40)) {
        let mut expected: Vec<i64> = Vec::new();
        for x in &v {
            if !expected.contains(x) {
                expected.push(*x);
            }
        }
        prop_assert_eq!(v.unique(), expected);
    }

    #[test]
    fn base64_decodes_what_it_encodes(s in "\\PC{0,40}") {
        prop_assert_eq!(s.encode_base64().decode_base64().unwrap(), s);
    }
}
