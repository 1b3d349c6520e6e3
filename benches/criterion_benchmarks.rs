use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use seqdiff::close::{CloseOptions, get_close_matches};
use seqdiff::differ::ndiff;
use seqdiff::format::{FormatOptions, unified_diff};
use seqdiff::matcher::SequenceMatcher;
use seqdiff::pairs::mdiff;

const WORDS: [&str; 12] = [
    "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta", "iota", "kappa",
    "lambda", "mu",
];

fn gen_lines(count: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let words = rng.random_range(1..8);
            let mut line: Vec<&str> = (0..words)
                .map(|_| WORDS[rng.random_range(0..WORDS.len())])
                .collect();
            line.push("\n");
            line.join(" ")
        })
        .collect()
}

/// Replace, drop or insert roughly one line in `stride`.
fn mutate(base: &[String], stride: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(base.len());
    for line in base {
        if rng.random_range(0..stride.max(1)) != 0 {
            out.push(line.clone());
            continue;
        }
        match rng.random_range(0..3) {
            0 => out.push(line.replacen(' ', "  ", 1)),
            1 => {}
            _ => {
                out.push(line.clone());
                out.push("inserted line\n".to_string());
            }
        }
    }
    out
}

fn bench_matching_blocks(c: &mut Criterion) {
    let mut g = c.benchmark_group("matching_blocks_vs_lines");
    for count in [100usize, 1_000, 10_000] {
        let a = gen_lines(count, 1);
        let b = mutate(&a, 20, 2);
        g.throughput(Throughput::Elements(count as u64));
        g.bench_with_input(BenchmarkId::from_parameter(count), &count, |bench, _| {
            bench.iter(|| {
                let mut sm = SequenceMatcher::new(black_box(&a), black_box(&b));
                black_box(sm.matching_blocks().len());
            });
        });
    }
    g.finish();
}

fn bench_autojunk(c: &mut Criterion) {
    let mut g = c.benchmark_group("autojunk_on_repetitive_input");
    g.sample_size(10);
    for filler in [250usize, 1_000, 2_000] {
        let mut a = vec![1u32];
        a.extend(std::iter::repeat_n(0, filler));
        let mut b = vec![0u32; filler];
        b.push(1);

        for autojunk in [true, false] {
            let id = BenchmarkId::new(if autojunk { "on" } else { "off" }, filler);
            g.bench_with_input(id, &filler, |bench, _| {
                bench.iter(|| {
                    let mut sm = SequenceMatcher::new(&a, &b).with_autojunk(autojunk);
                    black_box(sm.matching_blocks().len());
                });
            });
        }
    }
    g.finish();
}

fn bench_ndiff(c: &mut Criterion) {
    let mut g = c.benchmark_group("ndiff_mutated_text");
    for stride in [5usize, 50] {
        let a = gen_lines(2_000, 3);
        let b = mutate(&a, stride, 4);
        g.bench_with_input(BenchmarkId::from_parameter(stride), &stride, |bench, _| {
            bench.iter(|| black_box(ndiff(black_box(&a), black_box(&b)).len()));
        });
    }
    g.finish();
}

fn bench_formatters(c: &mut Criterion) {
    let mut g = c.benchmark_group("formatters");
    let a = gen_lines(5_000, 5);
    let b = mutate(&a, 30, 6);
    let opts = FormatOptions::default();

    g.bench_function("unified_diff", |bench| {
        bench.iter(|| black_box(unified_diff(&a, &b, &opts).len()));
    });
    g.bench_function("side_by_side_context_3", |bench| {
        bench.iter(|| black_box(mdiff(&a, &b, Some(3)).count()));
    });
    g.finish();
}

fn bench_close_matches(c: &mut Criterion) {
    let mut g = c.benchmark_group("close_matches_vs_candidates");
    for count in [100usize, 10_000] {
        let mut rng = StdRng::seed_from_u64(7);
        let candidates: Vec<String> = (0..count)
            .map(|i| format!("{}{i}", WORDS[rng.random_range(0..WORDS.len())]))
            .collect();
        let opts = CloseOptions::default();
        g.throughput(Throughput::Elements(count as u64));
        g.bench_with_input(BenchmarkId::from_parameter(count), &count, |bench, _| {
            bench.iter(|| black_box(get_close_matches("lamda42", &candidates, &opts).unwrap()));
        });
    }
    g.finish();
}

criterion_group!(
    benches,
    bench_matching_blocks,
    bench_autojunk,
    bench_ndiff,
    bench_formatters,
    bench_close_matches
);
criterion_main!(benches);
