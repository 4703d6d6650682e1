//! Catalog sources for platewise.
//!
//! The catalog is read once at startup and never written back.

pub mod loader;

pub use loader::CatalogLoader;
