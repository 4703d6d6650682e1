//! # Platewise Similarity
//!
//! Nearest-neighbour ranking of a restaurant catalog against user
//! preferences.
//!
//! ## Features
//!
//! - **Cosine Ranking**: every catalog row is scored against the encoded query
//! - **Stable Ordering**: equal scores keep catalog order, so results are
//!   reproducible run to run
//! - **Name Deduplication**: at most one entry per restaurant name
//! - **Explainability**: per-field contribution breakdown of each score
//!
//! ## Example
//!
//! ```rust
//! use platewise_core::{Catalog, Query, RestaurantRecord};
//! use platewise_similarity::{Recommender, RecommenderConfig};
//!
//! let record = |name: &str, rating: f64| RestaurantRecord {
//!     name: name.to_string(),
//!     cuisine: "Italian".to_string(),
//!     city: "X".to_string(),
//!     price: "$".to_string(),
//!     alcohol_service: "Yes".to_string(),
//!     parking: "Yes".to_string(),
//!     overall_rating: rating,
//!     food_rating: rating,
//!     service_rating: rating,
//! };
//! let catalog = Catalog::new(vec![record("A", 5.0), record("B", 1.0)]).unwrap();
//! let recommender = Recommender::build(catalog, RecommenderConfig::default()).unwrap();
//!
//! let query = Query::new("Italian", "X", "$", "Yes", "Yes").with_weights(3.0, 3.0, 3.0);
//! let results = recommender.recommend(&query, 2).unwrap();
//! assert_eq!(results.len(), 2);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Catalog   │────>│ Vocabulary  │────>│   Feature   │
//! │  (records)  │     │    (fit)    │     │   Matrix    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │                   │
//!                     ┌──────┴──────┐            │
//!       Query ───────>│   Encoder   │            │
//!                     └──────┬──────┘            │
//!                            │   ┌─────────────┐ │
//!                            └──>│   Ranker    │<┘
//!                                │cosine+dedup │
//!                                └─────────────┘
//! ```

pub mod config;
pub mod explain;
pub mod rank;
pub mod recommender;

pub use config::RecommenderConfig;
pub use explain::{
    field_contributions, ExplainedResult, FieldContribution, RankingStats, RecommendationView,
};
pub use rank::{rank, RankedResult, SimilarityRanker};
pub use recommender::Recommender;
