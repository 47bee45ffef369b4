//! Benchmarks for query parsing, scoring and fuzzy ranking.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use keepsake_search::{
    fuzzy_filter, fuzzy_score, parse_query, universal_search, ContentType, SearchableItem, Status,
};

const WORDS: [&str; 12] = [
    "dark", "knight", "heat", "coffee", "garden", "night", "river", "space", "ghost", "summer",
    "city", "blue",
];

fn create_test_items(count: usize) -> Vec<SearchableItem> {
    let types = [
        ContentType::Movie,
        ContentType::Tv,
        ContentType::Game,
        ContentType::Note,
        ContentType::Place,
    ];

    (0..count)
        .map(|i| {
            let title = format!("{} {} {}", WORDS[i % 12], WORDS[(i * 7) % 12], i);
            SearchableItem::new(i.to_string(), types[i % 5], title)
                .with_content(format!("{} and {}", WORDS[(i * 3) % 12], WORDS[(i * 5) % 12]))
                .with_tags([WORDS[(i * 11) % 12]])
                .with_genres(["drama"])
                .with_rating((i % 6) as i32)
                .with_year(1980 + (i % 45) as i32)
                .with_status(Status::Completed)
        })
        .collect()
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_query");

    group.bench_function("plain", |b| b.iter(|| parse_query(black_box("dark knight rises"))));
    group.bench_function("filters", |b| {
        b.iter(|| {
            parse_query(black_box(
                r#"@media status:done rating>=4 year>2000 "dark knight" -batman action OR drama"#,
            ))
        })
    });

    group.finish();
}

fn bench_fuzzy_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("fuzzy_score");

    group.bench_function("prefix", |b| {
        b.iter(|| fuzzy_score(black_box("break"), black_box("Breaking Bad")))
    });
    group.bench_function("subsequence", |b| {
        b.iter(|| fuzzy_score(black_box("brba"), black_box("Breaking Bad")))
    });
    group.bench_function("miss", |b| {
        b.iter(|| fuzzy_score(black_box("xyz"), black_box("Breaking Bad")))
    });

    group.finish();
}

fn bench_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranking");

    for size in [100, 1000, 10000].iter() {
        let items = create_test_items(*size);

        group.bench_with_input(BenchmarkId::new("universal", size), size, |b, _| {
            b.iter(|| universal_search(black_box(&items), black_box("@movie rating>=3 dark")))
        });

        group.bench_with_input(BenchmarkId::new("fuzzy_titles", size), size, |b, _| {
            b.iter(|| fuzzy_filter(black_box(&items), black_box("dkn"), |item| item.title.as_str()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_fuzzy_score, bench_ranking);
criterion_main!(benches);
