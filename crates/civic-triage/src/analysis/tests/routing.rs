use super::common::*;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::analysis::router::{self, analysis_router, ClassifyRequest};
use crate::analysis::service::{TriageConfig, TriageService};

fn post_json(uri: &str, payload: serde_json::Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(&payload).expect("encode request"),
        ))
        .expect("build request")
}

#[tokio::test]
async fn classify_handler_returns_the_legacy_envelope() {
    let service = Arc::new(aggression_service());

    let response = router::classify_handler::<StaticClassifier>(
        State(service),
        axum::Json(ClassifyRequest {
            description: "Attaque à l'arme blanche".to_string(),
            localisation: "École Al Amal".to_string(),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["categorie"], json!("AGRESSION"));
    assert_eq!(payload["scores"]["AGRESSION"], json!(0.88));
    assert_eq!(payload["priorite"], json!(24));
    assert_eq!(payload["niveau_urgence"], json!("critical"));
    assert_eq!(payload["details_calcul"]["base"], json!(15));
    assert_eq!(payload["details_calcul"]["mots_urgences"], json!(0));
    assert_eq!(payload["details_calcul"]["localisation"], json!(5));
    assert_eq!(payload["details_calcul"]["specifique_categorie"], json!(4));
}

#[tokio::test]
async fn classify_handler_rejects_empty_confidence_mappings() {
    let service = Arc::new(service_with(StaticClassifier::empty()));

    let response = router::classify_handler::<StaticClassifier>(
        State(service),
        axum::Json(ClassifyRequest {
            description: "description quelconque".to_string(),
            localisation: "Inconnue".to_string(),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .unwrap_or_default()
        .contains("empty"));
}

#[tokio::test]
async fn classify_handler_reports_model_outages_as_bad_gateway() {
    let service = Arc::new(TriageService::new(
        Arc::new(FailingClassifier),
        TriageConfig::standard(),
    ));

    let response = router::classify_handler::<FailingClassifier>(
        State(service),
        axum::Json(ClassifyRequest {
            description: "description quelconque".to_string(),
            localisation: "Inconnue".to_string(),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn classify_route_defaults_the_location() {
    let router = analysis_router(Arc::new(aggression_service()));

    let response = router
        .oneshot(post_json(
            "/api/v1/complaints/classify",
            json!({ "description": "bagarre au marché" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    // Without a location there is no sensitive-site bonus.
    assert_eq!(payload["details_calcul"]["localisation"], json!(0));
    assert_eq!(payload["priorite"], json!(15));
}

#[tokio::test]
async fn score_route_grades_preclassified_complaints() {
    let router = analysis_router(Arc::new(aggression_service()));

    let response = router
        .oneshot(post_json(
            "/api/v1/complaints/score",
            json!({ "description": "tas d'ordures ménagères", "category": "DECHETS" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["breakdown"]["total"], json!(8));
    assert_eq!(payload["tier"], json!("low"));
}

#[tokio::test]
async fn summary_route_builds_a_situation_report() {
    let router = analysis_router(Arc::new(aggression_service()));

    let response = router
        .oneshot(post_json(
            "/api/v1/reports/summary",
            json!({
                "complaints": [
                    { "description": "bagarre", "category": "AGRESSION", "zone": "Agdal" },
                    { "description": "dépôt sauvage", "category": "DECHETS", "zone": "Agdal" },
                    { "description": "autre chose", "category": "AUTRES", "zone": "Océan" },
                ],
                "zone_filter": "Agdal",
                "previous_period": [
                    { "description": "bagarre", "category": "AGRESSION", "zone": "Agdal" },
                ],
                "hour": 9,
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload["natural_language_summary"],
        json!(
            "Ce matin à Agdal, 2 plaintes ont été signalées : \
             1 cas de violences et sécurité et 1 cas de problèmes environnementaux."
        )
    );
    assert_eq!(payload["complaint_count"], json!(2));
    assert_eq!(payload["trends"]["current_count"], json!(2));
    assert_eq!(payload["trends"]["previous_count"], json!(1));
    assert_eq!(payload["anomalies_detected"], json!(true));
    assert_eq!(payload["severity_level"], json!("LOW"));
}

#[tokio::test]
async fn summary_route_without_previous_period_omits_trends() {
    let router = analysis_router(Arc::new(aggression_service()));

    let response = router
        .oneshot(post_json(
            "/api/v1/reports/summary",
            json!({ "complaints": [], "hour": 12 }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload["natural_language_summary"],
        json!("Aucune plainte signalée pour cette période.")
    );
    assert!(payload.get("trends").is_none());
    assert_eq!(payload["severity_level"], json!("LOW"));
}

#[tokio::test]
async fn trends_route_reports_change_and_advice() {
    let router = analysis_router(Arc::new(aggression_service()));

    let current: Vec<_> = (0..6)
        .map(|i| json!({ "description": format!("signalement {i}"), "category": "AUTRES" }))
        .collect();
    let previous: Vec<_> = (0..4)
        .map(|i| json!({ "description": format!("signalement {i}"), "category": "AUTRES" }))
        .collect();

    let response = router
        .oneshot(post_json(
            "/api/v1/reports/trends",
            json!({ "current_period_data": current, "previous_period_data": previous }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["trends"]["percentage_change"], json!(50.0));
    assert_eq!(payload["trends"]["trend_direction"], json!("increase"));
    assert_eq!(
        payload["trend_message"],
        json!("Augmentation de 50.0% des signalements")
    );
    let advice = payload["recommendations"]
        .as_array()
        .expect("advice is a list");
    assert!(advice
        .iter()
        .any(|entry| entry.as_str().unwrap_or_default().contains("+50.0%")));
}

#[tokio::test]
async fn recommendations_route_wraps_the_advice_list() {
    let router = analysis_router(Arc::new(aggression_service()));

    let response = router
        .oneshot(post_json(
            "/api/v1/reports/recommendations",
            json!({
                "complaints": [
                    { "description": "pot-de-vin", "category": "CORRUPTION", "zone": "Agdal" },
                    { "description": "autre chose", "category": "AUTRES", "zone": "Océan" },
                ],
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload,
        json!({
            "recommendations": ["Enquête administrative et contrôle des services concernés"],
        })
    );
}

#[tokio::test]
async fn analysis_route_echoes_ids_and_skips_blank_descriptions() {
    let router = analysis_router(Arc::new(aggression_service()));

    let response = router
        .oneshot(post_json(
            "/api/v1/reports/analysis",
            json!({
                "complaints": [
                    {
                        "id": 7,
                        "description": "bagarre au marché",
                        "category": "AGRESSION",
                        "zone": "Agdal"
                    },
                    { "id": "c-12", "category": "DECHETS", "zone": "Agdal" },
                ],
                "hour": 10,
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;

    let individual = payload["individual_classifications"]
        .as_array()
        .expect("individual entries");
    assert_eq!(individual.len(), 1);
    assert_eq!(individual[0]["complaint_id"], json!(7));
    assert_eq!(individual[0]["categorie"], json!("AGRESSION"));
    assert_eq!(individual[0]["priorite"], json!(15));
    assert_eq!(individual[0]["niveau_urgence"], json!("medium"));

    assert_eq!(
        payload["aggregate_summary"],
        json!(
            "Ce matin, 2 plaintes ont été signalées : 1 cas de violences et sécurité \
             et 1 cas de problèmes environnementaux."
        )
    );
    assert_eq!(
        payload["recommendations"],
        json!([
            "Surveillance renforcée recommandée",
            "Planifier une intervention de nettoyage",
            "Concentrer les efforts sur la zone Agdal",
        ])
    );
}
