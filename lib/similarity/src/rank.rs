//! Similarity ranking
//!
//! Scores every catalog row against an encoded query with cosine
//! similarity, orders them, and keeps the best row per restaurant name.

use ahash::AHashSet;
use platewise_core::{Catalog, Error, Query, RestaurantRecord, Result, Vector};
use platewise_schema::{FeatureEncoder, FeatureMatrix, FeatureVocabulary};
use serde::Serialize;
use std::cmp::Ordering;
use tracing::debug;

/// One recommended restaurant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult {
    /// 1-based position in the result list
    pub rank: usize,
    /// Cosine similarity between the query row and this record's row
    pub score: f32,
    /// Position of the record in the catalog
    pub catalog_index: usize,
    pub record: RestaurantRecord,
}

/// Ranks a fitted catalog against queries.
///
/// Borrows the catalog, its feature matrix and the vocabulary both were
/// built with. Holds nothing mutable, so one ranker can serve concurrent
/// queries.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityRanker<'a> {
    catalog: &'a Catalog,
    matrix: &'a FeatureMatrix,
    vocabulary: &'a FeatureVocabulary,
}

impl<'a> SimilarityRanker<'a> {
    /// Create a ranker, checking that the matrix was built for this catalog
    /// and vocabulary.
    pub fn new(
        catalog: &'a Catalog,
        matrix: &'a FeatureMatrix,
        vocabulary: &'a FeatureVocabulary,
    ) -> Result<Self> {
        if matrix.len() != catalog.len() {
            return Err(Error::InvalidDimension {
                expected: catalog.len(),
                actual: matrix.len(),
            });
        }
        if matrix.dimension() != vocabulary.dimension() {
            return Err(Error::InvalidDimension {
                expected: vocabulary.dimension(),
                actual: matrix.dimension(),
            });
        }
        Ok(Self {
            catalog,
            matrix,
            vocabulary,
        })
    }

    pub(crate) fn from_parts(
        catalog: &'a Catalog,
        matrix: &'a FeatureMatrix,
        vocabulary: &'a FeatureVocabulary,
    ) -> Self {
        Self {
            catalog,
            matrix,
            vocabulary,
        }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn vocabulary(&self) -> &'a FeatureVocabulary {
        self.vocabulary
    }

    /// Encode a query against the ranker's vocabulary
    pub fn encode_query(&self, query: &Query) -> Result<Vector> {
        FeatureEncoder::new(self.vocabulary).encode_query(query)
    }

    /// Cosine score of every catalog row, in catalog order
    pub fn score_all(&self, query_row: &Vector) -> Vec<f32> {
        self.matrix
            .rows()
            .iter()
            .map(|row| query_row.cosine_similarity(row))
            .collect()
    }

    /// Return up to `n` restaurants most similar to `query`, at most one per
    /// name.
    ///
    /// # Errors
    /// * [`Error::InvalidN`] when `n` is 0
    /// * [`Error::FitMismatch`] when the query names a category the catalog
    ///   never contained
    ///
    /// An empty catalog yields an empty list. Fewer than `n` distinct names
    /// yields a short list.
    pub fn rank(&self, query: &Query, n: usize) -> Result<Vec<RankedResult>> {
        if n == 0 {
            return Err(Error::InvalidN(
                "at least one recommendation must be requested".to_string(),
            ));
        }

        if self.catalog.is_empty() {
            debug!("Catalog is empty, nothing to rank");
            return Ok(Vec::new());
        }

        let query_row = self.encode_query(query)?;
        let scores = self.score_all(&query_row);

        // sort_by is stable: equal scores keep catalog order
        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by(|&a, &b| {
            scores[b].partial_cmp(&scores[a]).unwrap_or(Ordering::Equal)
        });

        let records = self.catalog.records();
        let mut seen: AHashSet<&str> = AHashSet::with_capacity(n);
        let mut results = Vec::with_capacity(n.min(records.len()));

        for index in order {
            if results.len() == n {
                break;
            }
            let record = &records[index];
            if seen.insert(record.name.as_str()) {
                results.push(RankedResult {
                    rank: results.len() + 1,
                    score: scores[index],
                    catalog_index: index,
                    record: record.clone(),
                });
            }
        }

        debug!(
            requested = n,
            returned = results.len(),
            candidates = records.len(),
            "Ranked catalog"
        );

        Ok(results)
    }
}

/// Rank `catalog` against `query` in one call.
///
/// Shorthand for [`SimilarityRanker::new`] followed by
/// [`SimilarityRanker::rank`].
pub fn rank(
    query: &Query,
    catalog: &Catalog,
    matrix: &FeatureMatrix,
    vocabulary: &FeatureVocabulary,
    n: usize,
) -> Result<Vec<RankedResult>> {
    SimilarityRanker::new(catalog, matrix, vocabulary)?.rank(query, n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, cuisine: &str, city: &str, rating: f64) -> RestaurantRecord {
        RestaurantRecord {
            name: name.to_string(),
            cuisine: cuisine.to_string(),
            city: city.to_string(),
            price: "$".to_string(),
            alcohol_service: "Yes".to_string(),
            parking: "Yes".to_string(),
            overall_rating: rating,
            food_rating: rating,
            service_rating: rating,
        }
    }

    fn fitted(records: Vec<RestaurantRecord>) -> (Catalog, FeatureVocabulary, FeatureMatrix) {
        let catalog = Catalog::new(records).unwrap();
        let vocab = FeatureVocabulary::fit(&catalog);
        let matrix = FeatureMatrix::build(&catalog, &vocab).unwrap();
        (catalog, vocab, matrix)
    }

    fn names(results: &[RankedResult]) -> Vec<&str> {
        results.iter().map(|r| r.record.name.as_str()).collect()
    }

    #[test]
    fn test_closer_ratings_rank_first() {
        let (catalog, vocab, matrix) = fitted(vec![
            record("A", "Italian", "X", 5.0),
            record("B", "Italian", "X", 1.0),
        ]);
        let query = Query::new("Italian", "X", "$", "Yes", "Yes").with_weights(3.0, 3.0, 3.0);

        let results = rank(&query, &catalog, &matrix, &vocab, 2).unwrap();
        assert_eq!(names(&results), ["A", "B"]);

        // q = [1,1,1,1,1,.5,.5,.5]; A adds [1,1,1]; B adds [0,0,0]
        let q_norm = (5.0f32 + 0.75).sqrt();
        let expected_a = 6.5 / (q_norm * 8.0f32.sqrt());
        let expected_b = 5.0 / (q_norm * 5.0f32.sqrt());
        assert!((results[0].score - expected_a).abs() < 1e-5);
        assert!((results[1].score - expected_b).abs() < 1e-5);
        assert_eq!(results[0].rank, 1);
        assert_eq!(results[1].rank, 2);
    }

    #[test]
    fn test_category_match_dominates() {
        let (catalog, vocab, matrix) = fitted(vec![
            record("Pasta Place", "Italian", "Rome", 3.0),
            record("Taco Stand", "Mexican", "Rome", 3.0),
            record("Far Pasta", "Italian", "Milan", 3.0),
        ]);
        let query = Query::new("Mexican", "Rome", "$", "Yes", "Yes");
        let results = rank(&query, &catalog, &matrix, &vocab, 1).unwrap();
        assert_eq!(names(&results), ["Taco Stand"]);
    }

    #[test]
    fn test_deduplicates_by_name_keeping_best_row() {
        let (catalog, vocab, matrix) = fitted(vec![
            record("Chain", "Mexican", "Y", 3.0),
            record("Solo", "Italian", "Y", 3.0),
            record("Chain", "Italian", "X", 3.0),
        ]);
        let query = Query::new("Italian", "X", "$", "Yes", "Yes");
        let results = rank(&query, &catalog, &matrix, &vocab, 5).unwrap();

        assert_eq!(names(&results), ["Chain", "Solo"]);
        assert_eq!(results[0].catalog_index, 2);
    }

    #[test]
    fn test_names_are_case_sensitive_keys() {
        let (catalog, vocab, matrix) = fitted(vec![
            record("Cafe", "Italian", "X", 3.0),
            record("cafe", "Italian", "X", 3.0),
        ]);
        let query = Query::new("Italian", "X", "$", "Yes", "Yes");
        let results = rank(&query, &catalog, &matrix, &vocab, 5).unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let (catalog, vocab, matrix) = fitted(vec![
            record("first", "Thai", "X", 4.0),
            record("second", "Thai", "X", 4.0),
            record("third", "Thai", "X", 4.0),
        ]);
        let query = Query::new("Thai", "X", "$", "Yes", "Yes");
        let results = rank(&query, &catalog, &matrix, &vocab, 3).unwrap();
        assert_eq!(names(&results), ["first", "second", "third"]);
        assert_eq!(results[0].score, results[2].score);
    }

    #[test]
    fn test_truncates_to_n() {
        let (catalog, vocab, matrix) = fitted(
            (0..10)
                .map(|i| record(&format!("r{}", i), "Thai", "X", i as f64))
                .collect(),
        );
        let query = Query::new("Thai", "X", "$", "Yes", "Yes");
        assert_eq!(rank(&query, &catalog, &matrix, &vocab, 4).unwrap().len(), 4);
    }

    #[test]
    fn test_short_result_when_few_distinct_names() {
        let (catalog, vocab, matrix) = fitted(vec![
            record("same", "Thai", "X", 1.0),
            record("same", "Thai", "X", 2.0),
            record("other", "Thai", "X", 3.0),
        ]);
        let query = Query::new("Thai", "X", "$", "Yes", "Yes");
        let results = rank(&query, &catalog, &matrix, &vocab, 10).unwrap();
        assert_eq!(results.len(), catalog.distinct_names());
    }

    #[test]
    fn test_zero_n_is_invalid() {
        let (catalog, vocab, matrix) = fitted(vec![record("a", "Thai", "X", 1.0)]);
        let query = Query::new("Thai", "X", "$", "Yes", "Yes");
        assert!(matches!(
            rank(&query, &catalog, &matrix, &vocab, 0),
            Err(Error::InvalidN(_))
        ));
    }

    #[test]
    fn test_unseen_category_is_fit_mismatch() {
        let (catalog, vocab, matrix) = fitted(vec![record("a", "Thai", "X", 1.0)]);
        let query = Query::new("Klingon", "X", "$", "Yes", "Yes");
        assert!(matches!(
            rank(&query, &catalog, &matrix, &vocab, 3),
            Err(Error::FitMismatch { field: "Cuisine", .. })
        ));
    }

    #[test]
    fn test_empty_catalog_returns_empty() {
        let (catalog, vocab, matrix) = fitted(Vec::new());
        let query = Query::new("Anything", "At", "All", "Yes", "No");
        assert!(rank(&query, &catalog, &matrix, &vocab, 3).unwrap().is_empty());
    }

    #[test]
    fn test_mismatched_matrix_rejected() {
        let (catalog, vocab, _) = fitted(vec![record("a", "Thai", "X", 1.0)]);
        let (_, _, other_matrix) = fitted(vec![
            record("a", "Thai", "X", 1.0),
            record("b", "Thai", "X", 2.0),
        ]);
        assert!(matches!(
            SimilarityRanker::new(&catalog, &other_matrix, &vocab),
            Err(Error::InvalidDimension {
                expected: 1,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_scores_in_unit_interval() {
        let (catalog, vocab, matrix) = fitted(vec![
            record("a", "Thai", "X", 1.0),
            record("b", "Greek", "Y", 2.5),
            record("c", "Thai", "Y", 5.0),
        ]);
        let ranker = SimilarityRanker::new(&catalog, &matrix, &vocab).unwrap();
        let query = Query::new("Greek", "X", "$", "Yes", "Yes").with_weights(1.0, 3.0, 2.0);
        let row = ranker.encode_query(&query).unwrap();
        for score in ranker.score_all(&row) {
            assert!((0.0..=1.0).contains(&score), "score {} out of range", score);
        }
    }
}
