use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

use sort_test_tools::patterns;

fn bench_i32_patterns(c: &mut Criterion) {
    let len = 10_000;
    let inputs: Vec<(&str, Vec<i32>)> = vec![
        ("random", patterns::random(len)),
        ("random_dense", patterns::random_uniform(len, 0..64)),
        ("ascending", patterns::ascending(len)),
        ("descending", patterns::descending(len)),
        ("all_equal", patterns::all_equal(len)),
        ("saw_mixed", patterns::saw_mixed(len, 13)),
        ("pipe_organ", patterns::pipe_organ(len)),
    ];

    for (name, input) in &inputs {
        c.bench_function(&format!("sort_i32_{name}_{len}"), |b| {
            b.iter_batched_ref(
                || input.clone(),
                |v| tripsort::sort(v),
                BatchSize::LargeInput,
            )
        });

        c.bench_function(&format!("sort_stable_i32_{name}_{len}"), |b| {
            b.iter_batched_ref(
                || input.clone(),
                |v| tripsort::sort_stable(v),
                BatchSize::LargeInput,
            )
        });

        c.bench_function(&format!("sort_stable_alloc_i32_{name}_{len}"), |b| {
            b.iter_batched_ref(
                || input.clone(),
                |v| tripsort::sort_with_option_by(v, |a, b| a.cmp(b), true, false),
                BatchSize::LargeInput,
            )
        });
    }
}

fn bench_big_elements(c: &mut Criterion) {
    // Wide enough that the dispatch prefers sorting pointers over
    // shuffling the elements themselves.
    #[derive(Clone)]
    struct Big {
        key: i32,
        _pad: [u8; 196],
    }

    let od = tripsort::Order::<Big>::by_ref(|a, b| a.key < b.key);

    let input: Vec<Big> = patterns::random(1_000)
        .into_iter()
        .map(|key| Big { key, _pad: [0; 196] })
        .collect();

    c.bench_function("order_sort_big_1000", |b| {
        b.iter_batched_ref(|| input.clone(), |v| od.sort(v), BatchSize::LargeInput)
    });

    c.bench_function("order_sort_stable_big_1000", |b| {
        b.iter_batched_ref(
            || input.clone(),
            |v| od.sort_stable(v),
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_i32_patterns, bench_big_elements);
criterion_main!(benches);
