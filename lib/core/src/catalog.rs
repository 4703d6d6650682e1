use crate::record::{CategoricalField, FeatureSource, NumericField, RestaurantRecord};
use crate::{Error, Result};
use ahash::AHashSet;

/// Ordered, immutable set of restaurant records.
///
/// Record order is significant: it is the tie-break order for ranking and
/// the row order of the feature matrix built from this catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    records: Vec<RestaurantRecord>,
}

impl Catalog {
    /// Build a catalog, rejecting records with blank text fields or
    /// non-finite ratings.
    pub fn new(records: Vec<RestaurantRecord>) -> Result<Self> {
        for (row, record) in records.iter().enumerate() {
            validate_record(row, record)?;
        }
        Ok(Self { records })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RestaurantRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RestaurantRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[RestaurantRecord] {
        &self.records
    }

    /// Number of distinct restaurant names (case-sensitive)
    pub fn distinct_names(&self) -> usize {
        self.records
            .iter()
            .map(|r| r.name.as_str())
            .collect::<AHashSet<_>>()
            .len()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a RestaurantRecord;
    type IntoIter = std::slice::Iter<'a, RestaurantRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn validate_record(row: usize, record: &RestaurantRecord) -> Result<()> {
    if record.name.trim().is_empty() {
        return Err(Error::InvalidRecord {
            row,
            reason: "name is empty".to_string(),
        });
    }

    for field in CategoricalField::ALL {
        if record.categorical(field).trim().is_empty() {
            return Err(Error::InvalidRecord {
                row,
                reason: format!("{} is empty", field),
            });
        }
    }

    for field in NumericField::ALL {
        let value = record.numeric(field);
        if !value.is_finite() {
            return Err(Error::InvalidRecord {
                row,
                reason: format!("{} is not a finite number ({})", field, value),
            });
        }
    }

    Ok(())
}
