//! HTTP implementations of the service seams.
//!
//! Both clients share one request path: send, turn non-success statuses into
//! [`ClientError::RequestFailure`], download the body as text and hand it to
//! [`crate::classify`].

use crate::classify::{classify_analysis_response, classify_prediction_response};
use crate::client::{GeneAnalysisClient, PredictionClient};
use crate::config::ClientConfig;
use crate::model::{GeneAnalysisOutcome, PredictionReceipt};
use crate::selection::UploadSelection;
use crate::{ClientError, CoreError, CoreResult};
use api_shared::{AnalyzeGeneSequenceReq, UPLOAD_FILE_FIELD};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Url};

fn build_client(cfg: &ClientConfig) -> CoreResult<Client> {
    Client::builder()
        .timeout(cfg.request_timeout())
        .build()
        .map_err(CoreError::HttpClientBuild)
}

/// Sends a request and returns the body of a successful response.
async fn send_for_body(
    kind: &'static str,
    url: &Url,
    request: RequestBuilder,
) -> Result<String, ClientError> {
    let (client, request) = request.build_split();
    let request = request.map_err(|source| ClientError::RequestBuild {
        kind,
        url: url.to_string(),
        source,
    })?;

    tracing::debug!("Sending {kind}-request to '{url}'...");
    let res = client
        .execute(request)
        .await
        .map_err(|source| ClientError::RequestSend {
            kind,
            url: url.to_string(),
            source,
        })?;

    let status = res.status();
    if !status.is_success() {
        return Err(ClientError::RequestFailure {
            url: url.to_string(),
            status,
            response: res.text().await.ok().filter(|body| !body.is_empty()),
        });
    }

    let body = res
        .text()
        .await
        .map_err(|source| ClientError::ResponseDownload {
            url: url.to_string(),
            source,
        })?;
    tracing::debug!("Response from '{url}': {body}");
    Ok(body)
}

/// Uploads MRI images to the prediction service as multipart form data.
#[derive(Clone, Debug)]
pub struct HttpPredictionClient {
    client: Client,
    url: Url,
}

impl HttpPredictionClient {
    pub fn new(cfg: &ClientConfig) -> CoreResult<Self> {
        Ok(Self {
            client: build_client(cfg)?,
            url: cfg.upload_url().clone(),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl PredictionClient for HttpPredictionClient {
    async fn predict(&self, image: &UploadSelection) -> Result<PredictionReceipt, ClientError> {
        let part = Part::bytes(image.bytes().to_vec())
            .file_name(image.file_name().to_string())
            .mime_str(image.media_type())
            .map_err(|source| ClientError::RequestBuild {
                kind: "POST",
                url: self.url.to_string(),
                source,
            })?;
        let form = Form::new().part(UPLOAD_FILE_FIELD, part);

        tracing::info!(
            "Uploading '{}' ({} bytes) for tumor prediction",
            image.file_name(),
            image.len()
        );
        let body = send_for_body(
            "POST",
            &self.url,
            self.client.post(self.url.clone()).multipart(form),
        )
        .await?;
        classify_prediction_response(self.url.as_str(), &body)
    }
}

/// Sends DNA sequences to the gene-analysis service as JSON.
#[derive(Clone, Debug)]
pub struct HttpGeneAnalysisClient {
    client: Client,
    url: Url,
}

impl HttpGeneAnalysisClient {
    pub fn new(cfg: &ClientConfig) -> CoreResult<Self> {
        Ok(Self {
            client: build_client(cfg)?,
            url: cfg.analyze_url().clone(),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl GeneAnalysisClient for HttpGeneAnalysisClient {
    async fn analyze(
        &self,
        tumor_type: &str,
        dna_sequence: &str,
    ) -> Result<GeneAnalysisOutcome, ClientError> {
        let req = AnalyzeGeneSequenceReq {
            tumor_type: tumor_type.to_string(),
            dna_sequence: dna_sequence.to_string(),
        };

        tracing::info!(
            "Requesting gene analysis for '{tumor_type}' ({} bases)",
            dna_sequence.len()
        );
        let body = send_for_body(
            "POST",
            &self.url,
            self.client.post(self.url.clone()).json(&req),
        )
        .await?;
        classify_analysis_response(self.url.as_str(), tumor_type, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Multipart;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::time::Duration;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn config(base: &str) -> ClientConfig {
        ClientConfig::new(base, Duration::from_secs(5)).unwrap()
    }

    fn png() -> UploadSelection {
        let bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
        UploadSelection::new("brain.png", bytes).unwrap()
    }

    async fn fake_upload(mut multipart: Multipart) -> Json<Value> {
        let mut seen = None;
        while let Some(field) = multipart.next_field().await.unwrap() {
            if field.name() == Some("file") {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let len = field.bytes().await.unwrap().len();
                seen = Some((file_name, content_type, len));
            }
        }
        match seen {
            Some((file_name, content_type, len)) => Json(json!({
                "message": format!("{file_name} {content_type} {len}"),
                "predicted_class": "glioma",
                "file_path": format!("uploads/{file_name}"),
            })),
            None => Json(json!({ "error": "No file part" })),
        }
    }

    #[tokio::test]
    async fn prediction_uploads_file_field() {
        let base = serve(Router::new().route("/upload_mri/", post(fake_upload))).await;
        let client = HttpPredictionClient::new(&config(&base)).unwrap();

        let receipt = client.predict(&png()).await.unwrap();
        assert_eq!(receipt.prediction.as_str(), "glioma");
        assert_eq!(receipt.message, "brain.png image/png 12");
        assert_eq!(receipt.file_path.as_deref(), Some("uploads/brain.png"));
    }

    #[tokio::test]
    async fn analysis_posts_json_and_reads_result() {
        let app = Router::new().route(
            "/analyze_gene_sequence/",
            post(|Json(req): Json<Value>| async move {
                Json(json!({
                    "tumor_type": req["tumor_type"],
                    "gc_content": 0.5,
                    "standard_treatments": [{"name": "Surgery", "mechanism": "Resection"}],
                    "personalized_treatments": [],
                }))
            }),
        );
        let base = serve(app).await;
        let client = HttpGeneAnalysisClient::new(&config(&base)).unwrap();

        match client.analyze("glioma", "ATCG").await.unwrap() {
            GeneAnalysisOutcome::Result(result) => {
                assert_eq!(result.tumor_type, "glioma");
                assert_eq!(result.standard_treatments[0].name, "Surgery");
            }
            other => panic!("expected result, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn server_error_becomes_request_failure() {
        let app = Router::new().route(
            "/analyze_gene_sequence/",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base = serve(app).await;
        let client = HttpGeneAnalysisClient::new(&config(&base)).unwrap();

        match client.analyze("glioma", "ATCG").await {
            Err(ClientError::RequestFailure {
                status, response, ..
            }) => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(response.as_deref(), Some("boom"));
            }
            other => panic!("expected RequestFailure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_service_is_a_send_failure() {
        // Bind then drop to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpPredictionClient::new(&config(&format!("http://{addr}"))).unwrap();
        assert!(matches!(
            client.predict(&png()).await,
            Err(ClientError::RequestSend { .. })
        ));
    }
}
