use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};
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

fn rss_kib() -> u64 {
    let mut sys = System::new();
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    match get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        Some(p) => p.memory(),
        None => 0,
    }
}

fn bench_wavefront(c: &mut Criterion) {
    let mut group = c.benchmark_group("lcs_wavefront");
    group.sample_size(10);
    for &len in &[1_000usize, 4_000] {
        for &processes in &[1usize, 4] {
            let engine = WavefrontBuilder::new()
                .with_threads(2)
                .with_cost_iterations(1)
                .build();
            group.bench_function(format!("len_{len}_p{processes}"), |b| {
                b.iter_batched(
                    || {
                        let mut rng = StdRng::seed_from_u64(42);
                        let s = random_dna(&mut rng, len);
                        let t = random_dna(&mut rng, len * 3 / 4);
                        (s, t)
                    },
                    |(s, t)| {
                        let before = rss_kib();
                        let lcs = engine.solve_distributed(&s, &t, processes).unwrap();
                        let after = rss_kib();
                        criterion::black_box(lcs.length);
                        eprintln!(
                            "RSS KiB delta (len {len}, p {processes}): {}",
                            after.saturating_sub(before)
                        );
                    },
                    BatchSize::PerIteration,
                )
            });
        }
    }
    group.finish();
}

fn bench_match_cost(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let s = random_dna(&mut rng, 600);
    let t = random_dna(&mut rng, 600);
    let mut group = c.benchmark_group("lcs_match_cost");
    group.sample_size(10);
    for &iterations in &[1u32, 20] {
        let engine = WavefrontBuilder::new()
            .with_threads(1)
            .with_cost_iterations(iterations)
            .build();
        group.bench_function(format!("iterations_{iterations}"), |b| {
            b.iter(|| criterion::black_box(engine.solve(&s, &t).unwrap().length))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_wavefront, bench_match_cost);
criterion_main!(benches);
