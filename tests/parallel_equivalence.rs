use proptest::prelude::*;
use wavefront_lcs::reference::full_table_lcs;
use wavefront_lcs::{LocalGroup, SequencePair, SoloGroup, WavefrontBuilder, WavefrontEngine};

fn engine(threads: usize) -> WavefrontEngine {
    WavefrontBuilder::new()
        .with_threads(threads)
        .with_cost_iterations(1)
        .with_min_parallel_len(1)
        .build()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn any_group_matches_single_process(
        a in "[ACGT]{0,12}",
        b in "[ACGT]{0,12}",
        processes in 1usize..6,
        threads in 1usize..4,
    ) {
        let s = a.as_bytes();
        let t = b.as_bytes();
        let serial = engine(1).solve(s, t).unwrap();
        let distributed = engine(threads).solve_distributed(s, t, processes).unwrap();
        prop_assert_eq!(&serial, &distributed);
        prop_assert_eq!(serial, full_table_lcs(s, t));
    }
}

#[test]
fn folded_tables_agree_across_groups() {
    let pair = SequencePair::new(b"CTTGACGTAGGCTAACCGT", b"GATCCTAGTTGA");
    let solo = engine(1).compute_table(&SoloGroup, &pair).unwrap().unwrap();
    for processes in [2, 4, 7] {
        for threads in [1, 3] {
            let eng = engine(threads);
            let tables = LocalGroup::new(processes).run(|rank| eng.compute_table(rank, &pair).unwrap());
            let (coordinator, workers) = tables.split_first().unwrap();
            assert!(workers.iter().all(Option::is_none));
            let dist = coordinator.as_ref().unwrap();
            for line in 0..solo.num_lines() {
                assert_eq!(solo.line(line), dist.line(line), "p={processes} t={threads} line={line}");
            }
        }
    }
}

#[test]
fn group_larger_than_widest_line() {
    // Every line is shorter than the group, so nothing is distributed.
    let lcs = engine(2).solve_distributed(b"ABCA", b"BA", 6).unwrap();
    assert_eq!(lcs, full_table_lcs(b"ABCA", b"BA"));
}
