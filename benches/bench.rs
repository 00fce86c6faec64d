// Criterion benchmarks for Pawmatch

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pawmatch::core::{extract, Matcher};
use pawmatch::models::{Breed, Constraint, PreferenceVector, ScoringMode, Size};

fn create_breed(id: usize) -> Breed {
    let step = |offset: usize| ((id + offset) % 5) as f64 / 4.0;
    Breed {
        breed: format!("Breed {}", id),
        grooming: step(0),
        shedding: step(1),
        energy: step(2),
        trainability: step(3),
        lifetime_cost: step(4),
        temperament: vec!["Loyal".to_string(), format!("Trait {}", id % 7)],
        size: Some(Size::ALL[id % 3]),
        group: Some(format!("Group {}", id % 4)),
        description: None,
        country_of_origin: None,
        intelligence: None,
    }
}

fn create_preferences() -> PreferenceVector {
    PreferenceVector {
        energy: 0.25,
        temperament: vec!["Loyal".to_string(), "Trait 3".to_string()],
        size: Constraint::Only(Size::Small),
        ..Default::default()
    }
}

fn bench_extract(c: &mut Criterion) {
    c.bench_function("extract_preset", |b| {
        b.iter(|| extract(black_box("A calm and loyal companion for a small apartment that doesn't shed")));
    });
}

fn bench_ranking(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let preferences = create_preferences();

    let mut group = c.benchmark_group("ranking");

    for breed_count in [50, 200, 1000].iter() {
        let breeds: Vec<Breed> = (0..*breed_count).map(create_breed).collect();

        for mode in [ScoringMode::Weighted, ScoringMode::Filtered] {
            group.bench_with_input(
                BenchmarkId::new(format!("rank_{}", mode), breed_count),
                breed_count,
                |b, _| {
                    b.iter(|| {
                        matcher.rank(
                            black_box(&breeds),
                            black_box(&preferences),
                            mode,
                            black_box(Some(1)),
                        )
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_extract, bench_ranking);

criterion_main!(benches);
