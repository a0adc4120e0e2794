//! Criterion benchmarks for coursearch performance-critical paths.
//!
//! Run with: `cargo bench -p coursearch`
//!
//! Benchmark groups:
//! 1. Text analysis (field and query pipelines)
//! 2. BM25F search at various corpus sizes
//! 3. Fuzzy search at various corpus sizes
//! 4. Hybrid fusion end-to-end
//! 5. Autocomplete

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use coursearch::prelude::*;
use coursearch::{autocomplete, search_bm25, search_fuzzy, search_hybrid};
use coursearch_analyze::{analyze_field, analyze_query};

// ─── Helpers ────────────────────────────────────────────────────────────────

const PROGRAMMES: &[&str] = &["LOG", "MAT", "INF", "ELE", "MEC", "GPA", "GTI", "SYS"];

const TITLE_WORDS: &[&str] = &[
    "programmation", "algèbre", "structures", "données", "circuits", "calcul", "mécanique",
    "systèmes", "réseaux", "conception", "analyse", "automatisation",
];

const DESC_WORDS: &[&str] = &[
    "introduction", "avancée", "fondamentaux", "applications", "méthodes", "industrielle",
    "numérique", "logicielle", "orientée", "objet", "différentiel", "linéaire", "thermique",
    "électronique", "modélisation", "optimisation",
];

fn build_corpus(n: usize) -> Vec<Course> {
    (0..n)
        .map(|i| {
            let programme = PROGRAMMES[i % PROGRAMMES.len()];
            let code = format!("{programme}{:03}", 100 + i);
            let title = format!(
                "{code} - {} {}",
                TITLE_WORDS[i % TITLE_WORDS.len()],
                TITLE_WORDS[(i / 3 + 1) % TITLE_WORDS.len()],
            );
            let description = format!(
                "{} {} {} {} {}",
                DESC_WORDS[i % DESC_WORDS.len()],
                DESC_WORDS[(i + 3) % DESC_WORDS.len()],
                DESC_WORDS[(i + 7) % DESC_WORDS.len()],
                DESC_WORDS[(i + 11) % DESC_WORDS.len()],
                DESC_WORDS[(i / 5) % DESC_WORDS.len()],
            );
            let credits = u32::try_from(i % 4 + 1).unwrap_or(3);
            Course::new(code, title, description, Some(credits))
        })
        .collect()
}

// ─── Benchmarks ─────────────────────────────────────────────────────────────

fn bench_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis");
    let description = "Introduction à la programmation orientée objet et aux structures \
                       de données fondamentales pour l'ingénierie logicielle";

    group.bench_function("analyze_field/description", |b| {
        b.iter(|| analyze_field(black_box(description)));
    });
    group.bench_function("analyze_query/phrase", |b| {
        b.iter(|| analyze_query(black_box("structures de données algorithmes")));
    });
    group.bench_function("analyze_query/acronym", |b| {
        b.iter(|| analyze_query(black_box("POO")));
    });
    group.finish();
}

fn bench_bm25(c: &mut Criterion) {
    let mut group = c.benchmark_group("bm25f");
    for size in [100, 1_000, 10_000] {
        let corpus = build_corpus(size);
        group.bench_with_input(BenchmarkId::new("phrase", size), &corpus, |b, corpus| {
            b.iter(|| search_bm25(black_box(corpus), "structures de données", 10, None));
        });
        group.bench_with_input(BenchmarkId::new("code", size), &corpus, |b, corpus| {
            b.iter(|| search_bm25(black_box(corpus), "LOG100", 10, None));
        });
    }
    group.finish();
}

fn bench_fuzzy(c: &mut Criterion) {
    let mut group = c.benchmark_group("fuzzy");
    for size in [100, 1_000, 10_000] {
        let corpus = build_corpus(size);
        group.bench_with_input(BenchmarkId::new("typo_code", size), &corpus, |b, corpus| {
            b.iter(|| search_fuzzy(black_box(corpus), "LAG100", 10, None, None));
        });
        group.bench_with_input(BenchmarkId::new("word", size), &corpus, |b, corpus| {
            b.iter(|| search_fuzzy(black_box(corpus), "algebre", 10, None, None));
        });
    }
    group.finish();
}

fn bench_hybrid(c: &mut Criterion) {
    let mut group = c.benchmark_group("hybrid");
    for size in [100, 1_000] {
        let corpus = build_corpus(size);
        group.bench_with_input(BenchmarkId::new("fused", size), &corpus, |b, corpus| {
            b.iter(|| search_hybrid(black_box(corpus), "programmation avancée", 10, None, None));
        });
    }
    group.finish();
}

fn bench_autocomplete(c: &mut Criterion) {
    let mut group = c.benchmark_group("autocomplete");
    for size in [1_000, 10_000] {
        let corpus = build_corpus(size);
        group.bench_with_input(BenchmarkId::new("prefix", size), &corpus, |b, corpus| {
            b.iter(|| autocomplete(black_box(corpus), "LOG", 10, None));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_analysis,
    bench_bm25,
    bench_fuzzy,
    bench_hybrid,
    bench_autocomplete
);
criterion_main!(benches);
