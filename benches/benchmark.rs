// Ranking benchmarks over synthetic catalogs
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use platewise_core::{Catalog, Query, RestaurantRecord};
use platewise_schema::{FeatureMatrix, FeatureVocabulary};
use platewise_similarity::SimilarityRanker;
use rand::prelude::*;

const CUISINES: [&str; 8] = [
    "Italian", "Mexican", "Thai", "Chinese", "American", "Indian", "Greek", "Japanese",
];
const CITIES: [&str; 6] = ["San Francisco", "Oakland", "Berkeley", "San Jose", "Palo Alto", "Fremont"];
const PRICES: [&str; 3] = ["Low", "Medium", "High"];
const ALCOHOL: [&str; 3] = ["No", "Wine & Beer", "Full Bar"];
const PARKING: [&str; 3] = ["Yes", "No", "Valet"];

fn random_catalog(size: usize) -> Catalog {
    let mut rng = rand::rng();
    let records = (0..size)
        .map(|i| RestaurantRecord {
            name: format!("Restaurant {}", i % (size / 2).max(1)),
            cuisine: CUISINES[rng.random_range(0..CUISINES.len())].to_string(),
            city: CITIES[rng.random_range(0..CITIES.len())].to_string(),
            price: PRICES[rng.random_range(0..PRICES.len())].to_string(),
            alcohol_service: ALCOHOL[rng.random_range(0..ALCOHOL.len())].to_string(),
            parking: PARKING[rng.random_range(0..PARKING.len())].to_string(),
            overall_rating: rng.random_range(1.0..=5.0),
            food_rating: rng.random_range(1.0..=5.0),
            service_rating: rng.random_range(1.0..=5.0),
        })
        .collect();
    Catalog::new(records).expect("generated records are valid")
}

fn benchmark_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit_and_build");

    for size in [100, 1000, 10000].iter() {
        let catalog = random_catalog(*size);
        group.bench_with_input(BenchmarkId::new("platewise", size), &catalog, |b, catalog| {
            b.iter(|| {
                let vocab = FeatureVocabulary::fit(black_box(catalog));
                FeatureMatrix::build(catalog, &vocab).unwrap()
            });
        });
    }

    group.finish();
}

fn benchmark_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");
    let query = Query::new("Thai", "Oakland", "Medium", "Full Bar", "Yes").with_weights(3.0, 2.0, 1.0);

    for size in [100, 1000, 10000].iter() {
        let catalog = random_catalog(*size);
        let vocab = FeatureVocabulary::fit(&catalog);
        let matrix = FeatureMatrix::build(&catalog, &vocab).unwrap();
        let ranker = SimilarityRanker::new(&catalog, &matrix, &vocab).unwrap();

        group.bench_with_input(BenchmarkId::new("top10", size), &ranker, |b, ranker| {
            b.iter(|| ranker.rank(black_box(&query), 10).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_fit, benchmark_rank);
criterion_main!(benches);
