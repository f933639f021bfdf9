//! Client for the remote OCR/layout processor.
//!
//! The processor is a black box: PDF bytes in, a [`Document`] out. Transient
//! faults (transport errors, HTTP 429/5xx) are retried with doubling backoff
//! under a fixed deadline; everything else is surfaced as a typed error.

use std::time::{Duration, Instant};

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::error::OcrError;
use crate::document::Document;
use crate::utils::AppConfig;

/// Total time budget for one processor call including retries.
const RETRY_DEADLINE: Duration = Duration::from_secs(60);

/// Pause before the first retry; doubles per attempt.
const INITIAL_BACKOFF: Duration = Duration::from_millis(500);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProcessRequest<'a> {
    raw_document: RawDocument<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument<'a> {
    content: String,
    mime_type: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ProcessResponse {
    document: Document,
}

enum AttemptError {
    Transient(String),
    Permanent(OcrError),
}

pub struct OcrClient {
    http: reqwest::Client,
    endpoint: String,
    processor_name: String,
    processor_id: String,
}

impl OcrClient {
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        Self::with_endpoint(
            config.ocr_endpoint.to_string(),
            config.processor_name(),
            config.processor_id.to_string(),
        )
    }

    #[must_use]
    pub fn with_endpoint(endpoint: String, processor_name: String, processor_id: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            processor_name,
            processor_id,
        }
    }

    #[must_use]
    pub fn processor_id(&self) -> &str {
        &self.processor_id
    }

    #[must_use]
    pub fn processor_name(&self) -> &str {
        &self.processor_name
    }

    /// Sends the PDF to the processor and returns the parsed document.
    ///
    /// # Errors
    ///
    /// Returns an [`OcrError`]: permanent service faults immediately,
    /// transient ones once the retry deadline is spent.
    pub async fn process(&self, pdf_bytes: &[u8]) -> Result<Document, OcrError> {
        let url = format!(
            "{}/{}:process",
            self.endpoint.trim_end_matches('/'),
            self.processor_name
        );
        let body = ProcessRequest {
            raw_document: RawDocument {
                content: STANDARD.encode(pdf_bytes),
                mime_type: "application/pdf",
            },
        };

        info!(
            "Sending {} bytes to processor {}",
            pdf_bytes.len(),
            self.processor_id
        );

        let started = Instant::now();
        let mut backoff = INITIAL_BACKOFF;
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;

            let message = match self.attempt(&url, &body).await {
                Ok(document) => {
                    info!("Processor returned {} pages", document.pages.len());
                    return Ok(document);
                }
                Err(AttemptError::Permanent(e)) => return Err(e),
                Err(AttemptError::Transient(message)) => message,
            };

            if started.elapsed() + backoff >= RETRY_DEADLINE {
                return Err(OcrError::RetriesExhausted { attempts, message });
            }

            warn!(
                "Transient OCR service failure (attempt {attempts}), retrying in {backoff:?}: {message}"
            );
            tokio::time::sleep(backoff).await;
            backoff *= 2;
        }
    }

    async fn attempt(
        &self,
        url: &str,
        body: &ProcessRequest<'_>,
    ) -> Result<Document, AttemptError> {
        let response = match self.http.post(url).json(body).send().await {
            Ok(response) => response,
            Err(e) => return Err(AttemptError::Transient(e.to_string())),
        };

        let status = response.status();

        if status.is_success() {
            return response
                .json::<ProcessResponse>()
                .await
                .map(|r| r.document)
                .map_err(|source| AttemptError::Permanent(OcrError::Decode { source }));
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AttemptError::Permanent(OcrError::ProcessorNotFound {
                name: self.processor_name.clone(),
            }));
        }

        let message = response.text().await.unwrap_or_default();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            return Err(AttemptError::Transient(format!("HTTP {status}: {message}")));
        }

        Err(AttemptError::Permanent(OcrError::Rejected {
            status: status.as_u16(),
            message,
        }))
    }
}
