use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical attributes, in one-hot block order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalField {
    Cuisine,
    City,
    Price,
    AlcoholService,
    Parking,
}

impl CategoricalField {
    /// Declared field order. Every encoded row lays its one-hot blocks out
    /// in exactly this sequence.
    pub const ALL: [CategoricalField; 5] = [
        CategoricalField::Cuisine,
        CategoricalField::City,
        CategoricalField::Price,
        CategoricalField::AlcoholService,
        CategoricalField::Parking,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CategoricalField::Cuisine => "Cuisine",
            CategoricalField::City => "City",
            CategoricalField::Price => "Price",
            CategoricalField::AlcoholService => "AlcoholService",
            CategoricalField::Parking => "Parking",
        }
    }

    /// Position of this field in [`CategoricalField::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for CategoricalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Numeric attributes, in the order they trail the one-hot blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    OverallRating,
    FoodRating,
    ServiceRating,
}

impl NumericField {
    pub const ALL: [NumericField; 3] = [
        NumericField::OverallRating,
        NumericField::FoodRating,
        NumericField::ServiceRating,
    ];

    pub fn name(self) -> &'static str {
        match self {
            NumericField::OverallRating => "OverallRating",
            NumericField::FoodRating => "FoodRating",
            NumericField::ServiceRating => "ServiceRating",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Anything that can be pushed through the feature encoder: a catalog
/// record or a user query.
pub trait FeatureSource {
    fn categorical(&self, field: CategoricalField) -> &str;
    fn numeric(&self, field: NumericField) -> f64;
}

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantRecord {
    pub name: String,
    pub cuisine: String,
    pub city: String,
    pub price: String,
    pub alcohol_service: String,
    pub parking: String,
    pub overall_rating: f64,
    pub food_rating: f64,
    pub service_rating: f64,
}

impl FeatureSource for RestaurantRecord {
    fn categorical(&self, field: CategoricalField) -> &str {
        match field {
            CategoricalField::Cuisine => &self.cuisine,
            CategoricalField::City => &self.city,
            CategoricalField::Price => &self.price,
            CategoricalField::AlcoholService => &self.alcohol_service,
            CategoricalField::Parking => &self.parking,
        }
    }

    fn numeric(&self, field: NumericField) -> f64 {
        match field {
            NumericField::OverallRating => self.overall_rating,
            NumericField::FoodRating => self.food_rating,
            NumericField::ServiceRating => self.service_rating,
        }
    }
}

/// Default importance for each rating weight (middle of the 1-3 scale)
pub const DEFAULT_WEIGHT: f64 = 2.0;

fn default_weight() -> f64 {
    DEFAULT_WEIGHT
}

/// User preferences.
///
/// The three weights express how much each rating matters to the user.
/// They are encoded through the same min-max normalizer that was fit on
/// the catalog ratings, so they must live on a scale that normalizer
/// understands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub cuisine: String,
    pub city: String,
    pub price: String,
    pub alcohol_service: String,
    pub parking: String,
    #[serde(default = "default_weight", alias = "overall_rating")]
    pub overall_weight: f64,
    #[serde(default = "default_weight", alias = "food_rating")]
    pub food_weight: f64,
    #[serde(default = "default_weight", alias = "service_rating")]
    pub service_weight: f64,
}

impl Query {
    /// Create a query with every weight at [`DEFAULT_WEIGHT`]
    pub fn new(
        cuisine: impl Into<String>,
        city: impl Into<String>,
        price: impl Into<String>,
        alcohol_service: impl Into<String>,
        parking: impl Into<String>,
    ) -> Self {
        Self {
            cuisine: cuisine.into(),
            city: city.into(),
            price: price.into(),
            alcohol_service: alcohol_service.into(),
            parking: parking.into(),
            overall_weight: DEFAULT_WEIGHT,
            food_weight: DEFAULT_WEIGHT,
            service_weight: DEFAULT_WEIGHT,
        }
    }

    pub fn with_weights(mut self, overall: f64, food: f64, service: f64) -> Self {
        self.overall_weight = overall;
        self.food_weight = food;
        self.service_weight = service;
        self
    }
}

impl FeatureSource for Query {
    fn categorical(&self, field: CategoricalField) -> &str {
        match field {
            CategoricalField::Cuisine => &self.cuisine,
            CategoricalField::City => &self.city,
            CategoricalField::Price => &self.price,
            CategoricalField::AlcoholService => &self.alcohol_service,
            CategoricalField::Parking => &self.parking,
        }
    }

    fn numeric(&self, field: NumericField) -> f64 {
        match field {
            NumericField::OverallRating => self.overall_weight,
            NumericField::FoodRating => self.food_weight,
            NumericField::ServiceRating => self.service_weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_order_matches_index() {
        for (i, field) in CategoricalField::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
        for (i, field) in NumericField::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
    }

    #[test]
    fn test_query_defaults_weights() {
        let json = r#"{
            "cuisine": "Italian",
            "city": "X",
            "price": "$",
            "alcohol_service": "Yes",
            "parking": "Yes",
            "food_weight": 3
        }"#;
        let query: Query = serde_json::from_str(json).unwrap();
        assert_eq!(query.overall_weight, DEFAULT_WEIGHT);
        assert_eq!(query.food_weight, 3.0);
        assert_eq!(query.numeric(NumericField::FoodRating), 3.0);
        assert_eq!(query.categorical(CategoricalField::AlcoholService), "Yes");
    }

    #[test]
    fn test_query_accepts_rating_aliases() {
        let json = r#"{
            "cuisine": "Thai", "city": "Y", "price": "$$",
            "alcohol_service": "No", "parking": "No",
            "overall_rating": 1, "food_rating": 2, "service_rating": 3
        }"#;
        let query: Query = serde_json::from_str(json).unwrap();
        assert_eq!(query.overall_weight, 1.0);
        assert_eq!(query.service_weight, 3.0);
    }
}
