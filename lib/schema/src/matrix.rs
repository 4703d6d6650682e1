//! Encoded catalog
//!
//! One row per catalog record, in catalog order. The matrix is built once
//! after the vocabulary is fit and never updated; adding a restaurant means
//! rebuilding it (and refitting the vocabulary if new categories appear).

use crate::encoder::FeatureEncoder;
use crate::vocabulary::FeatureVocabulary;
use platewise_core::{Catalog, Result, Vector};
use tracing::info;

#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    rows: Vec<Vector>,
    dimension: usize,
}

impl FeatureMatrix {
    /// Encode every record of `catalog` against `vocabulary`.
    ///
    /// Fails with `FitMismatch` only if the vocabulary was fit on a
    /// different catalog that lacks one of these records' categories.
    pub fn build(catalog: &Catalog, vocabulary: &FeatureVocabulary) -> Result<Self> {
        let encoder = FeatureEncoder::new(vocabulary);
        let rows = catalog
            .iter()
            .map(|record| encoder.encode_record(record))
            .collect::<Result<Vec<_>>>()?;

        info!(
            rows = rows.len(),
            dimension = vocabulary.dimension(),
            "Built feature matrix"
        );

        Ok(Self {
            rows,
            dimension: vocabulary.dimension(),
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width of every row
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn row(&self, index: usize) -> Option<&Vector> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[Vector] {
        &self.rows
    }
}
