use criterion::{criterion_group, criterion_main, Criterion};
use stackmachine_lib::evaluate;
use std::hint::black_box;

fn long_command(pairs: usize) -> String {
    let mut command = String::from("1");
    for _ in 0..pairs {
        command.push_str(" 1 + DUP -");
    }
    command
}

fn benchmark_evaluate(c: &mut Criterion) {
    c.bench_function("short_mixed", |b| {
        b.iter(|| {
            let value = evaluate(black_box("5 9 DUP + + 43 - 3 *")).expect("valid command");
            black_box(value)
        });
    });

    c.bench_function("sum_after_clear", |b| {
        b.iter(|| {
            let value = evaluate(black_box("3 4 3 5 CLEAR 5 1 1 1 SUM")).expect("valid command");
            black_box(value)
        });
    });

    let long = long_command(1_000);
    c.bench_function("long_4000_tokens", |b| {
        b.iter(|| {
            let value = evaluate(black_box(&long)).expect("valid command");
            black_box(value)
        });
    });

    c.bench_function("early_failure", |b| {
        b.iter(|| black_box(evaluate(black_box("1 + 2 3 4 5 6 7 8 9"))).is_err());
    });
}

criterion_group!(benches, benchmark_evaluate);
criterion_main!(benches);
