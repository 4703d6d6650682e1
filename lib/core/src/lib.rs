//! # Platewise Core
//!
//! Core types for the platewise restaurant recommender.
//!
//! - [`RestaurantRecord`] - One catalog entry
//! - [`Query`] - User preferences plus rating importance weights
//! - [`Catalog`] - Ordered, immutable record set
//! - [`Vector`] - Dense feature vector with cosine similarity
//! - [`Error`] - Every failure the recommender can surface
//!
//! ## Example
//!
//! ```rust
//! use platewise_core::{Catalog, RestaurantRecord, Vector};
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
//! assert_eq!(catalog.len(), 1);
//!
//! let a = Vector::new(vec![1.0, 0.0, 1.0]);
//! let b = Vector::new(vec![1.0, 0.0, 0.0]);
//! assert!(a.cosine_similarity(&b) > 0.7);
//! ```

pub mod catalog;
pub mod error;
pub mod record;
pub mod vector;

/// Dot product and norm kernels
///
/// AVX2/FMA on x86_64 for wide vectors, scalar everywhere else.
pub mod simd;

pub use catalog::Catalog;
pub use error::{Error, Result};
pub use record::{
    CategoricalField, FeatureSource, NumericField, Query, RestaurantRecord, DEFAULT_WEIGHT,
};
pub use vector::Vector;
