//! # Platewise Schema
//!
//! Feature encoding for restaurant catalogs.
//!
//! ## Lifecycle
//!
//! Encoding is split into two explicit phases:
//!
//! 1. **Fit**: [`FeatureVocabulary::fit`] reads the whole catalog once and
//!    records the sorted category list of every categorical field and the
//!    min/max of every numeric field.
//! 2. **Encode**: [`FeatureEncoder`] borrows that vocabulary and maps any
//!    record or query onto a fixed-length row. [`FeatureMatrix::build`] does
//!    this for every catalog record up front.
//!
//! The vocabulary is immutable after fitting, so it can be shared freely
//! between threads.
//!
//! ## Row Layout
//!
//! ```text
//! ┌──────────┬────────┬────────┬─────────┬─────────┬─────────┬──────┬─────────┐
//! │ Cuisine  │  City  │ Price  │ Alcohol │ Parking │ Overall │ Food │ Service │
//! │ one-hot  │one-hot │one-hot │ one-hot │ one-hot │ [0, 1]  │[0, 1]│ [0, 1]  │
//! └──────────┴────────┴────────┴─────────┴─────────┴─────────┴──────┴─────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use platewise_core::{Catalog, Query, RestaurantRecord};
//! use platewise_schema::{FeatureEncoder, FeatureMatrix, FeatureVocabulary};
//!
//! let catalog = Catalog::new(vec![RestaurantRecord {
//!     name: "Trattoria".to_string(),
//!     cuisine: "Italian".to_string(),
//!     city: "Austin".to_string(),
//!     price: "$$".to_string(),
//!     alcohol_service: "Full Bar".to_string(),
//!     parking: "Yes".to_string(),
//!     overall_rating: 4.5,
//!     food_rating: 4.0,
//!     service_rating: 5.0,
//! }])
//! .unwrap();
//!
//! let vocabulary = FeatureVocabulary::fit(&catalog);
//! let matrix = FeatureMatrix::build(&catalog, &vocabulary).unwrap();
//!
//! let query = Query::new("Italian", "Austin", "$$", "Full Bar", "Yes");
//! let row = FeatureEncoder::new(&vocabulary).encode_query(&query).unwrap();
//! assert_eq!(row.dim(), matrix.dimension());
//! ```

pub mod encoder;
pub mod matrix;
pub mod vocabulary;

pub use encoder::FeatureEncoder;
pub use matrix::FeatureMatrix;
pub use vocabulary::{CategoryBlock, FeatureVocabulary, NumericRange};
