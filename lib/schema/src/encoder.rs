//! Feature encoder
//!
//! Turns a record or query into an encoded row against a fitted
//! [`FeatureVocabulary`]. The encoder holds no state of its own: it borrows
//! the vocabulary, so one vocabulary can back any number of encoders on any
//! number of threads.

use crate::vocabulary::FeatureVocabulary;
use platewise_core::{
    CategoricalField, Error, FeatureSource, NumericField, Query, RestaurantRecord, Result, Vector,
};

/// Encodes records and queries against a fitted vocabulary
#[derive(Debug, Clone, Copy)]
pub struct FeatureEncoder<'v> {
    vocabulary: &'v FeatureVocabulary,
}

impl<'v> FeatureEncoder<'v> {
    pub fn new(vocabulary: &'v FeatureVocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &'v FeatureVocabulary {
        self.vocabulary
    }

    pub fn dimension(&self) -> usize {
        self.vocabulary.dimension()
    }

    /// Encode a catalog record's own ratings
    pub fn encode_record(&self, record: &RestaurantRecord) -> Result<Vector> {
        self.encode(record)
    }

    /// Encode a query, its weights normalized as if they were ratings
    pub fn encode_query(&self, query: &Query) -> Result<Vector> {
        self.encode(query)
    }

    /// Encode one record or query.
    ///
    /// The row is built by:
    /// 1. Writing a single 1.0 into each categorical field's one-hot block,
    ///    blocks laid out in [`CategoricalField::ALL`] order
    /// 2. Appending each numeric field min-max normalized against its
    ///    fitted range, in [`NumericField::ALL`] order
    ///
    /// A categorical value the vocabulary never saw fails with
    /// [`Error::FitMismatch`] instead of silently producing an all-zero block.
    pub fn encode<S: FeatureSource + ?Sized>(&self, source: &S) -> Result<Vector> {
        let mut row = Vector::zeros(self.dimension());
        let data = row.as_mut_slice();

        for field in CategoricalField::ALL {
            let value = source.categorical(field);
            let column = self
                .vocabulary
                .column_of(field, value)
                .ok_or_else(|| Error::FitMismatch {
                    field: field.name(),
                    value: value.to_string(),
                })?;
            data[column] = 1.0;
        }

        for field in NumericField::ALL {
            let x = source.numeric(field);
            if !x.is_finite() {
                return Err(Error::InvalidQuery(format!(
                    "{} must be a finite number, got {}",
                    field, x
                )));
            }
            let normalized = self
                .vocabulary
                .range(field)
                .map(|range| range.normalize(x))
                .unwrap_or(0.0);
            data[self.vocabulary.numeric_column(field)] = normalized as f32;
        }

        Ok(row)
    }
}
