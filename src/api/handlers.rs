use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    middleware::RequestId,
    models::{Corpus, ScoredProduct, UserPreference},
    services::{
        metrics::{compute_metrics, CorpusMetrics},
        ranking::{rank, RankingSummary, RecommendOptions},
        validation::{validate, ValidationReport},
        weights::{AlgorithmVariant, ScoringConfig},
    },
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    /// Array of products, or a catalog page with a `content` array
    pub products: Value,
    #[serde(default)]
    pub preference: Option<UserPreference>,
    /// Values of 0 or below produce an empty list
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub active_only: bool,
    #[serde(default)]
    pub variant: Option<AlgorithmVariant>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub recommendations: Vec<ScoredProduct>,
    pub summary: RankingSummary,
    pub metrics: CorpusMetrics,
    pub validation: ValidationReport,
}

#[derive(Debug, Deserialize)]
pub struct CorpusRequest {
    pub products: Value,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Active scoring configuration
pub async fn get_config(State(state): State<AppState>) -> Json<ScoringConfig> {
    Json(state.scoring.as_ref().clone())
}

/// Ranks the supplied corpus
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(body): Json<Value>,
) -> AppResult<Json<RecommendationResponse>> {
    let request: RecommendationRequest = serde_json::from_value(body)?;
    let corpus = Corpus::from_json(request.products)?;
    let scoring = state.scoring_for(request.variant);

    let limit = match request.limit {
        Some(limit) => usize::try_from(limit).unwrap_or(0),
        None => scoring.default_limit,
    };
    let mut options = RecommendOptions::new(limit);
    if request.active_only {
        options = options.active_only();
    }

    tracing::info!(
        request_id = %request_id,
        corpus = corpus.len(),
        limit,
        active_only = request.active_only,
        has_preference = request.preference.is_some(),
        "Processing recommendation request"
    );

    let ranked = rank(&corpus, request.preference.as_ref(), options, &scoring)?;
    let validation = validate(&corpus);
    let metrics = compute_metrics(corpus.iter(), &scoring.price_buckets);

    if !validation.is_clean() {
        tracing::warn!(
            request_id = %request_id,
            invalid = validation.invalid,
            "Corpus contains invalid products; they were still ranked"
        );
    }

    Ok(Json(RecommendationResponse {
        recommendations: ranked.products,
        summary: ranked.summary,
        metrics,
        validation,
    }))
}

/// Summarises the supplied corpus
pub async fn metrics(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<Json<CorpusMetrics>> {
    let request: CorpusRequest = serde_json::from_value(body)?;
    let corpus = Corpus::from_json(request.products)?;

    tracing::debug!(corpus = corpus.len(), "Computing corpus metrics");

    Ok(Json(compute_metrics(
        corpus.iter(),
        &state.scoring.price_buckets,
    )))
}

/// Reports data-quality problems in the supplied corpus
pub async fn validate_corpus(Json(body): Json<Value>) -> AppResult<Json<ValidationReport>> {
    let request: CorpusRequest = serde_json::from_value(body)?;
    let corpus = Corpus::from_json(request.products)?;
    Ok(Json(validate(&corpus)))
}
