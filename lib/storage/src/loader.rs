//! Catalog loader
//!
//! Reads the restaurant dataset into a [`Catalog`]. Missing or blank values
//! are load-time data-quality errors: they are reported with their line and
//! never reach the encoder.

use platewise_core::{Catalog, Error, RestaurantRecord, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// One row of the recommendation dataset, as laid out on disk
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Restaurant_Name")]
    name: Option<String>,
    #[serde(rename = "Cuisine")]
    cuisine: Option<String>,
    #[serde(rename = "Restaurant_City")]
    city: Option<String>,
    #[serde(rename = "Price")]
    price: Option<String>,
    #[serde(rename = "Alcohol_Service")]
    alcohol_service: Option<String>,
    #[serde(rename = "Parking")]
    parking: Option<String>,
    #[serde(rename = "Overall_Rating")]
    overall_rating: Option<f64>,
    #[serde(rename = "Food_Rating")]
    food_rating: Option<f64>,
    #[serde(rename = "Service_Rating")]
    service_rating: Option<f64>,
}

impl CsvRow {
    fn into_record(self, line: usize) -> Result<RestaurantRecord> {
        let text = |value: Option<String>, column: &str| -> Result<String> {
            match value {
                Some(v) if !v.trim().is_empty() => Ok(v),
                _ => Err(Error::Load(format!("line {}: {} is missing", line, column))),
            }
        };
        let number = |value: Option<f64>, column: &str| -> Result<f64> {
            value.ok_or_else(|| Error::Load(format!("line {}: {} is missing", line, column)))
        };

        Ok(RestaurantRecord {
            name: text(self.name, "Restaurant_Name")?,
            cuisine: text(self.cuisine, "Cuisine")?,
            city: text(self.city, "Restaurant_City")?,
            price: text(self.price, "Price")?,
            alcohol_service: text(self.alcohol_service, "Alcohol_Service")?,
            parking: text(self.parking, "Parking")?,
            overall_rating: number(self.overall_rating, "Overall_Rating")?,
            food_rating: number(self.food_rating, "Food_Rating")?,
            service_rating: number(self.service_rating, "Service_Rating")?,
        })
    }
}

/// Reads catalogs from CSV or JSON sources
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load a catalog from a file, picking the format from its extension
    /// (`.json` is JSON, anything else is CSV).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Catalog> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_path(path),
            _ => Self::from_csv_path(path),
        }
    }

    /// Load the CSV dataset at `path`
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Catalog> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let catalog = Self::from_csv_reader(file)?;
        info!(
            path = %path.display(),
            records = catalog.len(),
            "Loaded catalog from CSV"
        );
        Ok(catalog)
    }

    /// Parse CSV with a header row. Unknown columns are ignored.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Catalog> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        // Line 1 is the header
        for (i, row) in reader.deserialize::<CsvRow>().enumerate() {
            let line = i + 2;
            let row = row.map_err(|e| Error::Load(format!("line {}: {}", line, e)))?;
            records.push(row.into_record(line)?);
        }

        Catalog::new(records)
    }

    /// Load a JSON array of records from `path`
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Catalog> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&text)?;
        info!(
            path = %path.display(),
            records = catalog.len(),
            "Loaded catalog from JSON"
        );
        Ok(catalog)
    }

    pub fn from_json_str(text: &str) -> Result<Catalog> {
        let records: Vec<RestaurantRecord> =
            serde_json::from_str(text).map_err(|e| Error::Load(e.to_string()))?;
        Catalog::new(records)
    }
}
