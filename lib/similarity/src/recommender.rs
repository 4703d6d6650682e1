//! Built-once recommendation context
//!
//! [`Recommender::build`] runs the whole startup sequence (fit the
//! vocabulary, encode the catalog) before handing back a value, so a
//! `Recommender` that exists is always ready to rank. It is immutable
//! afterwards and is shared across request handlers behind an `Arc`.

use crate::config::RecommenderConfig;
use crate::explain::{field_contributions, ExplainedResult, RankingStats, RecommendationView};
use crate::rank::{RankedResult, SimilarityRanker};
use platewise_core::{Catalog, Error, FeatureSource, NumericField, Query, Result};
use platewise_schema::{FeatureMatrix, FeatureVocabulary};
use tracing::info;

#[derive(Debug, Clone)]
pub struct Recommender {
    catalog: Catalog,
    vocabulary: FeatureVocabulary,
    matrix: FeatureMatrix,
    config: RecommenderConfig,
}

impl Recommender {
    /// Fit the vocabulary on `catalog` and encode every record
    pub fn build(catalog: Catalog, config: RecommenderConfig) -> Result<Self> {
        config.validate()?;
        let vocabulary = FeatureVocabulary::fit(&catalog);
        let matrix = FeatureMatrix::build(&catalog, &vocabulary)?;

        info!(
            records = catalog.len(),
            distinct_names = catalog.distinct_names(),
            dimension = vocabulary.dimension(),
            "Recommender ready"
        );

        Ok(Self {
            catalog,
            vocabulary,
            matrix,
            config,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn vocabulary(&self) -> &FeatureVocabulary {
        &self.vocabulary
    }

    pub fn matrix(&self) -> &FeatureMatrix {
        &self.matrix
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    pub fn ranker(&self) -> SimilarityRanker<'_> {
        // build() derived the matrix from this catalog and vocabulary
        SimilarityRanker::from_parts(&self.catalog, &self.matrix, &self.vocabulary)
    }

    /// Check a request against the configured limits.
    ///
    /// `n` above `max_limit` is [`Error::InvalidN`]; a weight outside
    /// `[weight_min, weight_max]` is [`Error::InvalidQuery`]. `n == 0` is
    /// left to the ranker.
    pub fn validate_request(&self, query: &Query, n: usize) -> Result<()> {
        if n > self.config.max_limit {
            return Err(Error::InvalidN(format!(
                "at most {} recommendations can be requested, got {}",
                self.config.max_limit, n
            )));
        }
        for field in NumericField::ALL {
            let weight = query.numeric(field);
            if !(self.config.weight_min..=self.config.weight_max).contains(&weight) {
                return Err(Error::InvalidQuery(format!(
                    "{} weight must be between {} and {}, got {}",
                    field, self.config.weight_min, self.config.weight_max, weight
                )));
            }
        }
        Ok(())
    }

    /// Top `n` restaurants for `query`, one per name
    pub fn recommend(&self, query: &Query, n: usize) -> Result<Vec<RankedResult>> {
        self.validate_request(query, n)?;
        self.ranker().rank(query, n)
    }

    /// [`Recommender::recommend`] with the configured default limit
    pub fn recommend_default(&self, query: &Query) -> Result<Vec<RankedResult>> {
        self.recommend(query, self.config.default_limit)
    }

    /// Recommendations plus a per-field breakdown of each score
    pub fn explain(&self, query: &Query, n: usize) -> Result<Vec<ExplainedResult>> {
        let ranked = self.recommend(query, n)?;
        if ranked.is_empty() {
            return Ok(Vec::new());
        }

        let query_row = self.ranker().encode_query(query)?;
        Ok(ranked
            .iter()
            .filter_map(|result| {
                let row = self.matrix.row(result.catalog_index)?;
                Some(ExplainedResult {
                    view: RecommendationView::from(result),
                    explain: field_contributions(&self.vocabulary, &query_row, row),
                })
            })
            .collect())
    }

    pub fn stats(&self, returned: usize) -> RankingStats {
        RankingStats {
            candidates: self.catalog.len(),
            distinct_names: self.catalog.distinct_names(),
            returned,
        }
    }
}
