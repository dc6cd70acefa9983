use proptest::prelude::*;
use wavefront_lcs::backtrack::is_subsequence;
use wavefront_lcs::reference::full_table_lcs;
use wavefront_lcs::{WavefrontBuilder, WavefrontEngine};

fn engine() -> WavefrontEngine {
    WavefrontBuilder::new()
        .with_threads(1)
        .with_cost_iterations(1)
        .build()
}

proptest! {
    #[test]
    fn wavefront_matches_full_dp(a in "[ACGT]{0,14}", b in "[ACGT]{0,14}") {
        let s = a.as_bytes();
        let t = b.as_bytes();
        let lcs = engine().solve(s, t).unwrap();
        prop_assert_eq!(lcs, full_table_lcs(s, t));
    }

    #[test]
    fn length_is_symmetric(a in "[ABC]{0,12}", b in "[ABC]{0,12}") {
        let s = a.as_bytes();
        let t = b.as_bytes();
        let ab = engine().solve(s, t).unwrap();
        let ba = engine().solve(t, s).unwrap();
        prop_assert_eq!(ab.length, ba.length);
    }

    #[test]
    fn witness_is_common_subsequence(a in "[ACGT]{0,16}", b in "[ACGT]{0,16}") {
        let s = a.as_bytes();
        let t = b.as_bytes();
        let lcs = engine().solve(s, t).unwrap();
        prop_assert_eq!(lcs.subsequence.len(), lcs.length);
        prop_assert!(is_subsequence(&lcs.subsequence, s));
        prop_assert!(is_subsequence(&lcs.subsequence, t));
    }

    #[test]
    fn identical_inputs_are_their_own_lcs(a in "[a-z]{0,20}") {
        let s = a.as_bytes();
        let lcs = engine().solve(s, s).unwrap();
        prop_assert_eq!(lcs.subsequence, s.to_vec());
    }
}
