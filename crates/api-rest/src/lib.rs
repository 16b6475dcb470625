//! # API REST
//!
//! Reference gene-analysis service for TumorScope.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS)
//!
//! The analysis itself lives in `gene-analysis`; this crate maps it onto the wire types in
//! `api-shared`. MRI classification is an external service and has no endpoint here.

#![warn(rust_2018_idioms)]

use api_shared::{
    AnalyzeGeneSequenceReq, AnalyzeGeneSequenceRes, GeneAnalysisRes, HealthRes, HealthService,
    MutationIndicatorsRes, ShortSequenceAlertRes, TreatmentRes, ANALYZE_GENE_SEQUENCE_PATH,
    HEALTH_PATH,
};
use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use gene_analysis::{Analysis, GeneAnalyzer, GeneReport, MutationIndicators, Treatment};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared by the request handlers.
#[derive(Clone)]
pub struct AppState {
    analyzer: Arc<GeneAnalyzer>,
}

impl AppState {
    pub fn new(analyzer: GeneAnalyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, analyze_gene_sequence),
    components(schemas(
        HealthRes,
        AnalyzeGeneSequenceReq,
        AnalyzeGeneSequenceRes,
        GeneAnalysisRes,
        ShortSequenceAlertRes,
        TreatmentRes,
        MutationIndicatorsRes,
    ))
)]
pub struct ApiDoc;

/// Build the service router, including Swagger UI at `/swagger-ui`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(health))
        .route(ANALYZE_GENE_SEQUENCE_PATH, post(analyze_gene_sequence))
        .merge(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve the router until the process is stopped.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails while running.
pub async fn serve(addr: &str, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("-- Starting TumorScope REST API on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/analyze_gene_sequence/",
    request_body = AnalyzeGeneSequenceReq,
    responses(
        (status = 200, description = "Analysis result, or an alert when the sequence is too short", body = AnalyzeGeneSequenceRes),
        (status = 400, description = "Malformed request body"),
        (status = 422, description = "Request body does not match the schema")
    )
)]
/// Analyse a DNA sequence for a predicted tumor type
///
/// A sequence shorter than the configured minimum is answered with `200 OK` and an
/// `{"alert": ...}` body rather than an error status.
#[axum::debug_handler]
async fn analyze_gene_sequence(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeGeneSequenceReq>,
) -> Json<AnalyzeGeneSequenceRes> {
    tracing::info!(
        "Analysing {} characters for tumor type '{}'",
        req.dna_sequence.len(),
        req.tumor_type
    );

    let res = match state.analyzer.analyze(&req.tumor_type, &req.dna_sequence) {
        Analysis::Report(report) => AnalyzeGeneSequenceRes::Result(report_to_wire(report)),
        Analysis::TooShort { message } => {
            tracing::info!("Sequence rejected: {message}");
            AnalyzeGeneSequenceRes::Alert(ShortSequenceAlertRes { alert: message })
        }
    };
    Json(res)
}

fn report_to_wire(report: GeneReport) -> GeneAnalysisRes {
    GeneAnalysisRes {
        tumor_type: report.tumor_type,
        gc_content: report.gc_content,
        mutation_indicators: Some(indicators_to_wire(report.mutation_indicators)),
        standard_treatments: report
            .standard_treatments
            .into_iter()
            .map(treatment_to_wire)
            .collect(),
        personalized_treatments: report
            .personalized_treatments
            .into_iter()
            .map(treatment_to_wire)
            .collect(),
    }
}

fn treatment_to_wire(treatment: Treatment) -> TreatmentRes {
    TreatmentRes {
        name: treatment.name,
        mechanism: treatment.mechanism,
        reason: treatment.reason,
    }
}

fn indicators_to_wire(indicators: MutationIndicators) -> MutationIndicatorsRes {
    MutationIndicatorsRes {
        tp53_mutation: indicators.tp53_mutation,
        idh_mutation: indicators.idh_mutation,
        mgmt_methylated: indicators.mgmt_methylated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::time::Duration;
    use tower::ServiceExt;
    use tumorscope_core::{
        AnalysisOrchestrator, ClientConfig, GeneAnalysisClient, GeneAnalysisOutcome,
        HttpGeneAnalysisClient, PredictionClient, PredictionReceipt, UploadSelection,
        WorkflowState,
    };

    const LONG_SEQUENCE: &str = "ATGGTCGTAGCGCGATGATCCGGATCGATCGA";

    fn app() -> Router {
        router(AppState::new(GeneAnalyzer::default()))
    }

    async fn post_json(body: Value) -> (StatusCode, Value) {
        let response = app()
            .oneshot(
                Request::post(ANALYZE_GENE_SEQUENCE_PATH)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn health_reports_alive() {
        let response = app()
            .oneshot(Request::get(HEALTH_PATH).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["ok"], json!(true));
    }

    #[tokio::test]
    async fn short_sequence_is_answered_with_alert() {
        let (status, body) =
            post_json(json!({"tumor_type": "glioma", "dna_sequence": "ATCG"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"alert": "Sequence too short for reliable analysis (minimum 20 bases, got 4)"})
        );
    }

    #[tokio::test]
    async fn long_sequence_gets_full_result() {
        let (status, body) =
            post_json(json!({"tumor_type": "Glioma", "dna_sequence": LONG_SEQUENCE})).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.get("alert").is_none());
        assert_eq!(body["tumor_type"], json!("glioma"));
        assert!(body["gc_content"].is_number());
        assert_eq!(body["standard_treatments"][0]["name"], json!("Temozolomide"));
        assert_eq!(body["mutation_indicators"]["idh_mutation"], json!(true));
        assert_eq!(body["personalized_treatments"][0]["name"], json!("Vorasidenib"));
    }

    #[tokio::test]
    async fn unknown_tumor_type_has_no_standard_treatments() {
        let (_, body) =
            post_json(json!({"tumor_type": "no tumor", "dna_sequence": "A".repeat(25)})).await;
        assert_eq!(body["standard_treatments"], json!([]));
        assert_eq!(body["gc_content"], json!(0.0));
    }

    #[tokio::test]
    async fn missing_field_is_rejected() {
        let (status, _) = post_json(json!({"tumor_type": "glioma"})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    struct FixedPrediction;

    #[async_trait::async_trait]
    impl PredictionClient for FixedPrediction {
        async fn predict(
            &self,
            _image: &UploadSelection,
        ) -> Result<PredictionReceipt, tumorscope_core::ClientError> {
            Ok(PredictionReceipt {
                message: "MRI analysed".into(),
                prediction: tumorscope_core::TumorPrediction::new("meningioma").unwrap(),
                file_path: None,
            })
        }
    }

    #[tokio::test]
    async fn core_client_round_trip_against_service() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app()).await.unwrap();
        });

        let cfg = ClientConfig::new(&format!("http://{addr}"), Duration::from_secs(5)).unwrap();
        let analyzer = HttpGeneAnalysisClient::new(&cfg).unwrap();

        let outcome = analyzer.analyze("glioma", "ATCG").await.unwrap();
        assert!(matches!(outcome, GeneAnalysisOutcome::Alert(_)));

        let (tx, _rx) = tumorscope_core::notice_channel();
        let orch = AnalysisOrchestrator::new(FixedPrediction, analyzer, tx);
        orch.select_upload(UploadSelection::new("scan.png", vec![1, 2, 3]).unwrap());
        orch.upload().await.unwrap();
        orch.set_sequence(LONG_SEQUENCE);
        orch.analyze().await.unwrap();

        assert_eq!(orch.state(), WorkflowState::AnalysisReady);
        orch.with_workflow(|wf| {
            let result = wf.result().unwrap();
            assert_eq!(result.tumor_type, "meningioma");
            let names: Vec<_> = result
                .standard_treatments
                .iter()
                .map(|t| t.name.as_str())
                .collect();
            assert_eq!(names, vec!["Surgery", "Radiation Therapy"]);
        });
    }
}
