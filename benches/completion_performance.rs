//! Benchmark suite for word completion
//!
//! This benchmark measures:
//! - Prefix enumeration with various prefix lengths
//! - Fuzzy matching with various dictionary sizes and edit budgets
//! - The full suggestion pipeline (exact + fuzzy + merge)
//! - Insert/remove churn

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use word_completer::{CompletionConfig, FuzzyMatcher, TrieStore, WordCompleter};

const SYLLABLES: &[&str] = &[
    "ka", "lo", "mi", "ne", "ru", "sa", "te", "vo", "bri", "dan", "gel", "phu",
];

/// Deterministic pseudo-words built from syllables, so neighbouring indices
/// share prefixes the way natural vocabulary does
fn generate_words(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let mut n = i;
            let mut word = String::new();
            loop {
                word.push_str(SYLLABLES[n % SYLLABLES.len()]);
                n /= SYLLABLES.len();
                if n == 0 {
                    break;
                }
            }
            // Keep short indices from collapsing into two-letter words
            if word.len() < 5 {
                word.push_str("ton");
            }
            word
        })
        .collect()
}

fn bench_prefix_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("prefix_matching");
    let store: TrieStore = generate_words(10_000).into_iter().collect();

    for prefix in ["k", "ka", "kalo", "kalomi"] {
        group.bench_with_input(BenchmarkId::new("prefix", prefix), &prefix, |b, p| {
            b.iter(|| store.search_prefix(black_box(p), 20))
        });
    }

    group.finish();
}

fn bench_fuzzy_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("fuzzy_matching");

    for dict_size in &[1_000, 10_000, 100_000] {
        let store: TrieStore = generate_words(*dict_size).into_iter().collect();
        group.throughput(Throughput::Elements(*dict_size as u64));

        for max_edits in [1, 2, 3] {
            group.bench_with_input(
                BenchmarkId::new(format!("distance_{}", max_edits), dict_size),
                &store,
                |b, s| {
                    // Transposed "lo" and a dropped letter
                    b.iter(|| {
                        FuzzyMatcher::new(s).search_fuzzy(black_box("kolmineru"), max_edits, 30)
                    })
                },
            );
        }
    }

    group.finish();
}

fn bench_suggestions(c: &mut Criterion) {
    let mut group = c.benchmark_group("suggestions");
    let mut completer = WordCompleter::new(CompletionConfig::default());
    completer.extend(generate_words(100_000));

    for prefix in ["Kalo", "kalmo", "VOSATE", "brigeldan"] {
        group.bench_with_input(BenchmarkId::new("get_suggestions", prefix), &prefix, |b, p| {
            b.iter(|| completer.get_suggestions(black_box(p), 10))
        });
    }

    group.finish();
}

fn bench_insert_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_remove");
    let words = generate_words(1_000);
    group.throughput(Throughput::Elements(words.len() as u64));

    group.bench_function("churn_1000", |b| {
        let mut store: TrieStore = generate_words(10_000).into_iter().collect();
        b.iter(|| {
            for word in &words {
                store.remove(word);
            }
            for word in &words {
                store.insert(word);
            }
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_prefix_matching,
    bench_fuzzy_matching,
    bench_suggestions,
    bench_insert_remove,
);

criterion_main!(benches);
