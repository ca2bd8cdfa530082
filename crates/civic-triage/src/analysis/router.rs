use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::Timelike;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::classifier::Classifier;
use super::domain::{Category, CategoryScores, ClassifiedComplaint};
use super::report::ScoredComplaint;
use super::scoring::UrgencyTier;
use super::service::TriageService;
use crate::error::AppError;

/// Router builder exposing the triage endpoints.
pub fn analysis_router<C>(service: Arc<TriageService<C>>) -> Router
where
    C: Classifier + 'static,
{
    Router::new()
        .route("/api/v1/complaints/classify", post(classify_handler::<C>))
        .route("/api/v1/complaints/score", post(score_handler::<C>))
        .route("/api/v1/reports/summary", post(summary_handler::<C>))
        .route("/api/v1/reports/trends", post(trends_handler::<C>))
        .route(
            "/api/v1/reports/recommendations",
            post(recommendations_handler::<C>),
        )
        .route("/api/v1/reports/analysis", post(analysis_handler::<C>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub description: String,
    #[serde(default = "crate::analysis::domain::default_localisation")]
    pub localisation: String,
}

/// Legacy reporting envelope; field names are the French ones downstream
/// consumers already parse.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub categorie: Category,
    pub scores: CategoryScores,
    pub priorite: u32,
    pub niveau_urgence: UrgencyTier,
    pub details_calcul: CalculationDetails,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CalculationDetails {
    pub base: u32,
    pub mots_urgences: u32,
    pub localisation: u32,
    pub specifique_categorie: u32,
}

impl From<ScoredComplaint> for ClassifyResponse {
    fn from(scored: ScoredComplaint) -> Self {
        Self {
            categorie: scored.category,
            scores: scored.category_scores,
            priorite: scored.priority,
            niveau_urgence: scored.urgency,
            details_calcul: CalculationDetails {
                base: scored.breakdown.base,
                mots_urgences: scored.breakdown.urgent_keywords,
                localisation: scored.breakdown.location_bonus,
                specifique_categorie: scored.breakdown.category_specific,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    pub complaints: Vec<ClassifiedComplaint>,
    #[serde(default)]
    pub zone_filter: Option<String>,
    #[serde(default)]
    pub previous_period: Option<Vec<ClassifiedComplaint>>,
    /// Hour of day for the narrative wording; the server clock is used when
    /// absent.
    #[serde(default)]
    pub hour: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct TrendRequest {
    pub current_period_data: Vec<ClassifiedComplaint>,
    pub previous_period_data: Vec<ClassifiedComplaint>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationsRequest {
    pub complaints: Vec<ClassifiedComplaint>,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    pub complaints: Vec<AnalysisComplaint>,
    #[serde(default)]
    pub hour: Option<u32>,
}

/// Batch record with its upstream identifier carried through untouched.
#[derive(Debug, Deserialize)]
pub struct AnalysisComplaint {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(flatten)]
    pub record: ClassifiedComplaint,
}

pub(crate) async fn classify_handler<C>(
    State(service): State<Arc<TriageService<C>>>,
    axum::Json(request): axum::Json<ClassifyRequest>,
) -> Response
where
    C: Classifier + 'static,
{
    match service.classify(&request.description, &request.localisation) {
        Ok(scored) => {
            let view = ClassifyResponse::from(scored);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => AppError::from(error).into_response(),
    }
}

pub(crate) async fn score_handler<C>(
    State(service): State<Arc<TriageService<C>>>,
    axum::Json(complaint): axum::Json<ClassifiedComplaint>,
) -> Response
where
    C: Classifier + 'static,
{
    let outcome = service.score(&complaint);
    (StatusCode::OK, axum::Json(outcome)).into_response()
}

pub(crate) async fn summary_handler<C>(
    State(service): State<Arc<TriageService<C>>>,
    axum::Json(request): axum::Json<SummaryRequest>,
) -> Response
where
    C: Classifier + 'static,
{
    let report = service.situation_report(
        &request.complaints,
        request.zone_filter.as_deref(),
        request.previous_period.as_deref(),
        effective_hour(request.hour),
    );
    (StatusCode::OK, axum::Json(report)).into_response()
}

pub(crate) async fn trends_handler<C>(
    State(service): State<Arc<TriageService<C>>>,
    axum::Json(request): axum::Json<TrendRequest>,
) -> Response
where
    C: Classifier + 'static,
{
    let analysis =
        service.trend_analysis(&request.current_period_data, &request.previous_period_data);
    (StatusCode::OK, axum::Json(analysis)).into_response()
}

pub(crate) async fn recommendations_handler<C>(
    State(service): State<Arc<TriageService<C>>>,
    axum::Json(request): axum::Json<RecommendationsRequest>,
) -> Response
where
    C: Classifier + 'static,
{
    let payload = json!({
        "recommendations": service.recommendations(&request.complaints),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn analysis_handler<C>(
    State(service): State<Arc<TriageService<C>>>,
    axum::Json(request): axum::Json<AnalysisRequest>,
) -> Response
where
    C: Classifier + 'static,
{
    let records: Vec<ClassifiedComplaint> = request
        .complaints
        .iter()
        .map(|complaint| complaint.record.clone())
        .collect();

    match service.batch_analysis(&records, effective_hour(request.hour)) {
        Ok(analysis) => {
            let individual_classifications: Vec<serde_json::Value> = analysis
                .individual
                .iter()
                .zip(&request.complaints)
                .filter_map(|(outcome, complaint)| {
                    outcome.as_ref().map(|scored| {
                        json!({
                            "complaint_id": complaint.id,
                            "categorie": scored.category,
                            "priorite": scored.priority,
                            "niveau_urgence": scored.urgency,
                        })
                    })
                })
                .collect();
            let payload = json!({
                "individual_classifications": individual_classifications,
                "aggregate_summary": analysis.summary,
                "recommendations": analysis.recommendations,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => AppError::from(error).into_response(),
    }
}

fn effective_hour(hour: Option<u32>) -> u32 {
    hour.unwrap_or_else(|| chrono::Local::now().hour())
}
