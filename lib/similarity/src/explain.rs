//! Explainability for recommendation results
//!
//! Breaks a cosine score down into per-field contributions and provides the
//! serializable result shapes handed to the presentation layer.

use crate::rank::RankedResult;
use platewise_core::{CategoricalField, NumericField, Vector};
use platewise_schema::FeatureVocabulary;
use serde::Serialize;
use std::fmt;

/// Share of the cosine score contributed by one input field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldContribution {
    pub field: &'static str,
    pub contribution: f32,
}

/// Split `dot(query, row) / (|query| * |row|)` by field.
///
/// Each categorical field contributes the dot product over its one-hot
/// block, each numeric field the product of its single column. The
/// contributions sum to the cosine score (0 everywhere when either vector
/// has zero magnitude).
pub fn field_contributions(
    vocabulary: &FeatureVocabulary,
    query_row: &Vector,
    row: &Vector,
) -> Vec<FieldContribution> {
    let denom = query_row.norm() * row.norm();
    let q = query_row.as_slice();
    let r = row.as_slice();
    let share = |start: usize, end: usize| -> f32 {
        if denom == 0.0 || q.len() != r.len() {
            return 0.0;
        }
        q[start..end]
            .iter()
            .zip(&r[start..end])
            .map(|(a, b)| a * b)
            .sum::<f32>()
            / denom
    };

    let mut contributions = Vec::with_capacity(CategoricalField::ALL.len() + NumericField::ALL.len());
    for field in CategoricalField::ALL {
        let start = vocabulary.offset(field);
        let end = start + vocabulary.block(field).len();
        contributions.push(FieldContribution {
            field: field.name(),
            contribution: share(start, end),
        });
    }
    for field in NumericField::ALL {
        let column = vocabulary.numeric_column(field);
        contributions.push(FieldContribution {
            field: field.name(),
            contribution: share(column, column + 1),
        });
    }
    contributions
}

/// Result row as shown to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationView {
    pub rank: usize,
    pub name: String,
    pub cuisine: String,
    pub city: String,
    pub price: String,
    pub alcohol_service: String,
    pub parking: String,
    pub overall_rating: f64,
    pub score: f32,
}

impl From<&RankedResult> for RecommendationView {
    fn from(ranked: &RankedResult) -> Self {
        let r = &ranked.record;
        Self {
            rank: ranked.rank,
            name: r.name.clone(),
            cuisine: r.cuisine.clone(),
            city: r.city.clone(),
            price: r.price.clone(),
            alcohol_service: r.alcohol_service.clone(),
            parking: r.parking.clone(),
            overall_rating: r.overall_rating,
            score: ranked.score,
        }
    }
}

impl RecommendationView {
    pub fn from_ranked_list(ranked: &[RankedResult]) -> Vec<Self> {
        ranked.iter().map(Self::from).collect()
    }
}

impl fmt::Display for RecommendationView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}. {}", self.rank, self.name)?;
        writeln!(f, "   Cuisine:  {}", self.cuisine)?;
        writeln!(f, "   Location: {}", self.city)?;
        writeln!(f, "   Price:    {}", self.price)?;
        writeln!(f, "   Alcohol:  {}", self.alcohol_service)?;
        writeln!(f, "   Parking:  {}", self.parking)?;
        write!(f, "   Rating:   {:.1} (similarity {:.3})", self.overall_rating, self.score)
    }
}

/// A recommendation with its per-field score breakdown
#[derive(Debug, Clone, Serialize)]
pub struct ExplainedResult {
    #[serde(flatten)]
    pub view: RecommendationView,
    pub explain: Vec<FieldContribution>,
}

/// Summary of one ranking call
#[derive(Debug, Clone, Serialize)]
pub struct RankingStats {
    /// Catalog rows scored
    pub candidates: usize,
    /// Distinct names available for selection
    pub distinct_names: usize,
    pub returned: usize,
}
