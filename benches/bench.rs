// Criterion benchmarks for neighborhood ranking

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use neighborhood_matcher::core::{apply_client_filter, apply_sort, Ranker, SortMode};
use neighborhood_matcher::models::{AttributeKey, NeighborhoodRecord, PreferenceSelection};

fn create_record(id: usize) -> NeighborhoodRecord {
    NeighborhoodRecord {
        id: id.to_string(),
        name: format!("Neighborhood {}", id),
        safety: (id % 10) as f64,
        cafes: (id % 7) as f64,
        parks: (id % 5) as f64,
        schools: (id % 3) as f64,
        public_transport: (id % 11) as f64,
    }
}

fn bench_ranking(c: &mut Criterion) {
    let ranker = Ranker::new();
    let selection: PreferenceSelection =
        [AttributeKey::Safety, AttributeKey::Parks, AttributeKey::PublicTransport]
            .into_iter()
            .collect();

    let mut group = c.benchmark_group("ranking");

    for record_count in [10, 100, 1000, 10000].iter() {
        let records: Vec<NeighborhoodRecord> = (0..*record_count).map(create_record).collect();

        group.bench_with_input(
            BenchmarkId::new("rank", record_count),
            record_count,
            |b, _| {
                b.iter(|| ranker.rank(black_box(&selection), black_box(&records)));
            },
        );
    }

    group.finish();
}

fn bench_client_view(c: &mut Criterion) {
    let selection: PreferenceSelection = AttributeKey::ALL.into_iter().collect();
    let records: Vec<NeighborhoodRecord> = (0..1000).map(create_record).collect();
    let ranked = Ranker::new().rank(&selection, &records);

    c.bench_function("filter_and_name_sort_1000", |b| {
        b.iter(|| {
            let filtered = apply_client_filter(black_box(&ranked), black_box("hood 1"));
            black_box(apply_sort(&filtered, SortMode::Name))
        });
    });
}

criterion_group!(benches, bench_ranking, bench_client_view);

criterion_main!(benches);
