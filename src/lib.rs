//! # platewise
//!
//! A content-based restaurant recommender.
//!
//! platewise fits a feature vocabulary on a fixed restaurant catalog
//! (one-hot columns for cuisine, city, price, alcohol service and parking;
//! min-max normalized overall, food and service ratings), encodes every
//! restaurant once, and answers each query with the catalog rows closest to
//! it under cosine similarity, one entry per restaurant name.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! platewise serve --catalog data/recommendation_data.csv --http-port 8080
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use platewise::prelude::*;
//!
//! let catalog = CatalogLoader::from_path("data/recommendation_data.csv").unwrap();
//! let recommender = Recommender::build(catalog, RecommenderConfig::default()).unwrap();
//!
//! let query = Query::new("Italian", "San Francisco", "Medium", "Yes", "Yes")
//!     .with_weights(3.0, 2.0, 1.0);
//! for result in recommender.recommend(&query, 5).unwrap() {
//!     println!("{} ({:.3})", result.record.name, result.score);
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - `platewise-core` - Records, queries, catalog, vectors, errors
//! - `platewise-schema` - Vocabulary fitting, encoding, feature matrix
//! - `platewise-similarity` - Ranking, explanation, the `Recommender`
//! - `platewise-storage` - CSV / JSON catalog loading
//! - `platewise-api` - REST API

// Re-export core types
pub use platewise_core::{
    Catalog, CategoricalField, Error, FeatureSource, NumericField, Query, RestaurantRecord,
    Result, Vector,
};

pub use platewise_schema::{FeatureEncoder, FeatureMatrix, FeatureVocabulary, NumericRange};

pub use platewise_similarity::{
    rank, ExplainedResult, RankedResult, RecommendationView, Recommender, RecommenderConfig,
    SimilarityRanker,
};

// Re-export storage
pub use platewise_storage::CatalogLoader;

// Re-export API
pub use platewise_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Catalog, CatalogLoader, Error, FeatureMatrix, FeatureVocabulary, Query, RankedResult,
        Recommender, RecommenderConfig, RestaurantRecord, Result,
    };
}
