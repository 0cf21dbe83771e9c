use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use ecgiga_core::parser::{parse_bank_str, validate_bank};
use ecgiga_core::ContentRegistry;

fn large_bank(n: usize) -> String {
    let mut s = String::from("[bank]\ntopic = \"bench\"\ntitle = \"Bench\"\n");
    for i in 0..n {
        s.push_str(&format!(
            "\n[[questions]]\nprompt = \"Question {i}\"\noptions = [\"a{i}\", \"b{i}\", \"c{i}\", \"d{i}\"]\ncorrect = {}\nexplanation = \"Because {i}.\"\n",
            i % 4
        ));
    }
    s
}

fn bench_parse_bank(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_bank");

    let small = large_bank(5);
    let large = large_bank(200);

    group.bench_function("5_questions", |b| {
        b.iter(|| parse_bank_str(black_box(&small), Path::new("bench.toml")))
    });

    group.bench_function("200_questions", |b| {
        b.iter(|| parse_bank_str(black_box(&large), Path::new("bench.toml")))
    });

    group.finish();
}

fn bench_validate_bank(c: &mut Criterion) {
    let bank = parse_bank_str(&large_bank(200), Path::new("bench.toml")).unwrap();
    c.bench_function("validate_bank/200_questions", |b| {
        b.iter(|| validate_bank(black_box(&bank)))
    });
}

fn bench_builtin_registry(c: &mut Criterion) {
    c.bench_function("content_registry/builtin", |b| {
        b.iter(ContentRegistry::builtin)
    });
}

criterion_group!(
    benches,
    bench_parse_bank,
    bench_validate_bank,
    bench_builtin_registry
);
criterion_main!(benches);
