use serde::Serialize;

use crate::{
    error::AppResult,
    models::{Product, ScoredProduct, UserPreference},
};

use super::{
    scorer::{Scorer, ScoringContext},
    weights::ScoringConfig,
};

/// Knobs for one ranking call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendOptions {
    /// Maximum number of products returned; 0 yields an empty list
    pub limit: usize,
    /// Keep only listings whose status is ACTIVE
    pub active_only: bool,
}

impl RecommendOptions {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            active_only: false,
        }
    }

    pub fn active_only(mut self) -> Self {
        self.active_only = true;
        self
    }
}

/// Description of how the returned list was produced
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RankingSummary {
    /// Products that survived filtering and were scored
    pub candidates: usize,
    pub returned: usize,
    pub boosted_returned: usize,
    /// Share of boosted products in the returned list, 0-100
    pub boosted_percentage: f64,
    /// Average price of the scored population
    pub average_price: f64,
}

/// Ordered, size-bounded ranking result
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    pub products: Vec<ScoredProduct>,
    pub summary: RankingSummary,
}

/// Filters, scores and ranks a corpus, returning at most `limit` products
///
/// Products with equal scores keep their corpus order.
pub fn recommend(
    corpus: &[Product],
    preference: Option<&UserPreference>,
    limit: usize,
    config: &ScoringConfig,
) -> AppResult<Vec<ScoredProduct>> {
    rank(corpus, preference, RecommendOptions::new(limit), config).map(|r| r.products)
}

/// Full ranking pipeline
///
/// 1. reject malformed preferences or configuration before any work
/// 2. keep products matching every constrained dimension
/// 3. derive the scoring context from that filtered population
/// 4. score, stable-sort descending and truncate
pub fn rank(
    corpus: &[Product],
    preference: Option<&UserPreference>,
    options: RecommendOptions,
    config: &ScoringConfig,
) -> AppResult<Recommendations> {
    if let Some(preference) = preference {
        preference.validate()?;
    }
    config.validate()?;

    let population: Vec<&Product> = corpus
        .iter()
        .filter(|p| !options.active_only || p.is_active())
        .filter(|p| preference.map_or(true, |pref| pref.matches(p)))
        .collect();

    tracing::debug!(
        corpus = corpus.len(),
        candidates = population.len(),
        limit = options.limit,
        variant = ?config.variant,
        "Filtered corpus for ranking"
    );

    if population.is_empty() || options.limit == 0 {
        return Ok(Recommendations {
            products: Vec::new(),
            summary: RankingSummary {
                candidates: population.len(),
                ..Default::default()
            },
        });
    }

    let context = ScoringContext::from_population(population.iter().copied(), config);
    let scorer = Scorer::new(config, context);

    let mut scored: Vec<ScoredProduct> = population.iter().map(|p| scorer.score(p)).collect();

    // `sort_by` is stable, so ties keep corpus order
    scored.sort_by(|a, b| b.recommendation_score.total_cmp(&a.recommendation_score));
    scored.truncate(options.limit);

    let boosted_returned = scored.iter().filter(|s| s.product.is_boosted).count();
    let summary = RankingSummary {
        candidates: population.len(),
        returned: scored.len(),
        boosted_returned,
        boosted_percentage: boosted_returned as f64 / scored.len() as f64 * 100.0,
        average_price: scorer.context().average_price,
    };

    tracing::info!(
        candidates = summary.candidates,
        returned = summary.returned,
        boosted = summary.boosted_returned,
        "Ranking completed"
    );

    Ok(Recommendations {
        products: scored,
        summary,
    })
}
