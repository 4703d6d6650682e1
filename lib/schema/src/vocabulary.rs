//! Fitted feature vocabulary
//!
//! The vocabulary is the "fit" half of the encoder lifecycle: it is derived
//! once from the full catalog and then only read. It fixes the one-hot
//! column order of every categorical field and the min/max range of every
//! numeric field, so any two rows encoded against it are comparable.

use ahash::AHashMap;
use platewise_core::{Catalog, CategoricalField, FeatureSource, NumericField};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::info;

/// Observed range of a numeric field
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    /// Min-max normalize `x` against this range.
    ///
    /// A degenerate range (`max == min`) maps every input to 0.0. Values
    /// outside the fitted range land outside `[0, 1]`.
    pub fn normalize(&self, x: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        (x - self.min) / span
    }

    pub fn is_degenerate(&self) -> bool {
        self.max <= self.min
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.min && x <= self.max
    }
}

/// Sorted category list of one categorical field
#[derive(Debug, Clone, Serialize)]
pub struct CategoryBlock {
    pub field: CategoricalField,
    pub values: Vec<String>,
    #[serde(skip)]
    positions: AHashMap<String, usize>,
}

impl CategoryBlock {
    fn new(field: CategoricalField, values: BTreeSet<String>) -> Self {
        let values: Vec<String> = values.into_iter().collect();
        let positions = values
            .iter()
            .enumerate()
            .map(|(i, v)| (v.clone(), i))
            .collect();
        Self {
            field,
            values,
            positions,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Column of `value` inside this block (exact, case-sensitive match)
    pub fn position(&self, value: &str) -> Option<usize> {
        self.positions.get(value).copied()
    }
}

/// Per-field category orderings and numeric ranges, fit on a catalog
#[derive(Debug, Clone, Serialize)]
pub struct FeatureVocabulary {
    categories: Vec<CategoryBlock>,
    ranges: Vec<Option<NumericRange>>,
    #[serde(skip)]
    offsets: Vec<usize>,
    dimension: usize,
}

impl FeatureVocabulary {
    /// Fit a vocabulary on every record of `catalog`.
    ///
    /// Category values are ordered lexicographically, so the same catalog
    /// always produces the same column layout regardless of record order.
    /// An empty catalog yields empty blocks and no numeric ranges.
    pub fn fit(catalog: &Catalog) -> Self {
        let mut seen: Vec<BTreeSet<String>> =
            CategoricalField::ALL.iter().map(|_| BTreeSet::new()).collect();
        let mut ranges: Vec<Option<NumericRange>> = vec![None; NumericField::ALL.len()];

        for record in catalog {
            for field in CategoricalField::ALL {
                let value = record.categorical(field);
                if !seen[field.index()].contains(value) {
                    seen[field.index()].insert(value.to_string());
                }
            }
            for field in NumericField::ALL {
                let x = record.numeric(field);
                let slot = &mut ranges[field.index()];
                *slot = Some(match *slot {
                    Some(r) => NumericRange {
                        min: r.min.min(x),
                        max: r.max.max(x),
                    },
                    None => NumericRange { min: x, max: x },
                });
            }
        }

        let categories: Vec<CategoryBlock> = CategoricalField::ALL
            .iter()
            .zip(seen)
            .map(|(field, values)| CategoryBlock::new(*field, values))
            .collect();

        let mut offsets = Vec::with_capacity(categories.len());
        let mut running = 0;
        for block in &categories {
            offsets.push(running);
            running += block.len();
        }
        let dimension = running + NumericField::ALL.len();

        for field in NumericField::ALL {
            if let Some(range) = ranges[field.index()].filter(NumericRange::is_degenerate) {
                info!(
                    field = field.name(),
                    value = range.min,
                    "Numeric field has a degenerate range, it will encode as 0"
                );
            }
        }

        info!(
            records = catalog.len(),
            dimension,
            "Fitted feature vocabulary"
        );

        Self {
            categories,
            ranges,
            offsets,
            dimension,
        }
    }

    /// Length of every encoded row: total one-hot width plus one column
    /// per numeric field.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn block(&self, field: CategoricalField) -> &CategoryBlock {
        &self.categories[field.index()]
    }

    /// Sorted categories observed for `field`
    pub fn categories(&self, field: CategoricalField) -> &[String] {
        &self.block(field).values
    }

    pub fn range(&self, field: NumericField) -> Option<NumericRange> {
        self.ranges[field.index()]
    }

    /// First column of the one-hot block for `field`
    pub fn offset(&self, field: CategoricalField) -> usize {
        self.offsets[field.index()]
    }

    /// Column of a numeric field, after all one-hot blocks
    pub fn numeric_column(&self, field: NumericField) -> usize {
        self.dimension - NumericField::ALL.len() + field.index()
    }

    /// Absolute column of `value` in the encoded row, if it was seen at fit time
    pub fn column_of(&self, field: CategoricalField, value: &str) -> Option<usize> {
        self.block(field)
            .position(value)
            .map(|pos| self.offset(field) + pos)
    }

    /// Human-readable column labels, `Field_value` for one-hot columns and
    /// the bare field name for numeric columns.
    pub fn column_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.dimension);
        for block in &self.categories {
            for value in &block.values {
                names.push(format!("{}_{}", block.field.name(), value));
            }
        }
        names.extend(NumericField::ALL.iter().map(|f| f.name().to_string()));
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platewise_core::RestaurantRecord;

    fn record(name: &str, cuisine: &str, city: &str, overall: f64) -> RestaurantRecord {
        RestaurantRecord {
            name: name.to_string(),
            cuisine: cuisine.to_string(),
            city: city.to_string(),
            price: "$$".to_string(),
            alcohol_service: "No".to_string(),
            parking: "Yes".to_string(),
            overall_rating: overall,
            food_rating: 3.0,
            service_rating: overall,
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            record("a", "Thai", "Oslo", 4.0),
            record("b", "Italian", "Bergen", 2.0),
            record("c", "Thai", "Oslo", 5.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_categories_sorted_and_deduplicated() {
        let vocab = FeatureVocabulary::fit(&catalog());
        assert_eq!(vocab.categories(CategoricalField::Cuisine), ["Italian", "Thai"]);
        assert_eq!(vocab.categories(CategoricalField::City), ["Bergen", "Oslo"]);
        assert_eq!(vocab.categories(CategoricalField::Price), ["$$"]);
    }

    #[test]
    fn test_dimension() {
        let vocab = FeatureVocabulary::fit(&catalog());
        // cuisine(2) + city(2) + price(1) + alcohol(1) + parking(1) + 3 numeric
        assert_eq!(vocab.dimension(), 2 + 2 + 1 + 1 + 1 + 3);
        assert_eq!(vocab.column_names().len(), vocab.dimension());
    }

    #[test]
    fn test_ranges() {
        let vocab = FeatureVocabulary::fit(&catalog());
        let overall = vocab.range(NumericField::OverallRating).unwrap();
        assert_eq!(overall, NumericRange { min: 2.0, max: 5.0 });
        assert!(vocab.range(NumericField::FoodRating).unwrap().is_degenerate());
    }

    #[test]
    fn test_fit_is_independent_of_record_order() {
        let forward = catalog();
        let mut reversed: Vec<_> = forward.records().to_vec();
        reversed.reverse();
        let reversed = Catalog::new(reversed).unwrap();

        let a = FeatureVocabulary::fit(&forward);
        let b = FeatureVocabulary::fit(&reversed);
        assert_eq!(a.column_names(), b.column_names());
        assert_eq!(a.range(NumericField::OverallRating), b.range(NumericField::OverallRating));
    }

    #[test]
    fn test_column_layout() {
        let vocab = FeatureVocabulary::fit(&catalog());
        assert_eq!(vocab.column_of(CategoricalField::Cuisine, "Thai"), Some(1));
        assert_eq!(vocab.column_of(CategoricalField::City, "Bergen"), Some(2));
        assert_eq!(vocab.column_of(CategoricalField::City, "oslo"), None);
        assert_eq!(vocab.numeric_column(NumericField::OverallRating), 7);
        assert_eq!(vocab.column_names()[0], "Cuisine_Italian");
        assert_eq!(vocab.column_names()[9], "ServiceRating");
    }

    #[test]
    fn test_normalize() {
        let range = NumericRange { min: 1.0, max: 5.0 };
        assert_eq!(range.normalize(1.0), 0.0);
        assert_eq!(range.normalize(5.0), 1.0);
        assert_eq!(range.normalize(3.0), 0.5);
        assert_eq!(range.normalize(0.0), -0.25);
        assert_eq!(range.normalize(9.0), 2.0);
    }

    #[test]
    fn test_degenerate_range_normalizes_to_zero() {
        let range = NumericRange { min: 4.0, max: 4.0 };
        assert_eq!(range.normalize(4.0), 0.0);
        assert_eq!(range.normalize(1.0), 0.0);
    }

    #[test]
    fn test_empty_catalog() {
        let vocab = FeatureVocabulary::fit(&Catalog::empty());
        assert_eq!(vocab.dimension(), NumericField::ALL.len());
        assert!(vocab.range(NumericField::FoodRating).is_none());
        assert!(vocab.block(CategoricalField::Cuisine).is_empty());
    }
}
