#![cfg(feature = "heavy")]
use rand::{rngs::StdRng, Rng, SeedableRng};
use wavefront_lcs::reference::full_table_lcs;
use wavefront_lcs::WavefrontBuilder;

fn random_dna(rng: &mut StdRng, len: usize) -> Vec<u8> {
    const ALPHABET: &[u8] = b"ACGT";
    (0..len)
        .map(|_| {
            let idx = rng.gen_range(0..ALPHABET.len());
            ALPHABET[idx]
        })
        .collect()
}

#[test]
fn heavy_stress_distributed_medium() {
    let mut rng = StdRng::seed_from_u64(123);
    let s = random_dna(&mut rng, 3_000);
    let t = random_dna(&mut rng, 2_000);
    let engine = WavefrontBuilder::new().with_threads(2).with_cost_iterations(1).build();
    let lcs = engine.solve_distributed(&s, &t, 4).unwrap();
    assert_eq!(lcs, full_table_lcs(&s, &t));
}
