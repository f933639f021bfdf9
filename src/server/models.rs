use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use crate::extraction::ParseResult;

/// Maximum allowed decoded document size in bytes (40 MB, the processor's
/// document limit)
const MAX_FILE_SIZE_BYTES: usize = 40 * 1024 * 1024;

/// Base64 encoding expands data by ~4/3, so we calculate the max encoded length
const MAX_BASE64_LENGTH: usize = (MAX_FILE_SIZE_BYTES / 3 + 1) * 4;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseRequest {
    /// Base64-encoded PDF data
    pub pdf_base64: String,

    /// Original filename, for reference in the response
    #[serde(default = "default_filename")]
    pub filename: String,
}

fn default_filename() -> String {
    "medical_report.pdf".to_string()
}

impl ParseRequest {
    pub fn validate_and_decode(&self) -> Result<Vec<u8>, ValidationError> {
        if self.pdf_base64.trim().is_empty() {
            return Err(ValidationError::EmptyPayload);
        }

        if self.pdf_base64.len() > MAX_BASE64_LENGTH {
            return Err(ValidationError::Base64DataTooLarge);
        }

        let decoded = STANDARD
            .decode(self.pdf_base64.trim())
            .map_err(|e| ValidationError::InvalidBase64(e.to_string()))?;

        if decoded.len() > MAX_FILE_SIZE_BYTES {
            return Err(ValidationError::FileSizeTooLarge);
        }

        Ok(decoded)
    }

    pub fn sanitized_filename(&self) -> String {
        let filename = self.filename.trim();
        if filename.is_empty() {
            default_filename()
        } else {
            filename.to_string()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingMetadata {
    /// Wall-clock seconds spent in the OCR call and extraction
    pub processing_time: f64,
    pub processor_id: String,
    pub document_pages: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResponse {
    pub status: String,
    pub message: String,
    pub filename: String,
    #[serde(flatten)]
    pub result: ParseResult,
    pub processing_metadata: ProcessingMetadata,
}

impl ParseResponse {
    pub fn success(filename: String, result: ParseResult, metadata: ProcessingMetadata) -> Self {
        Self {
            status: "success".to_string(),
            message: "Document processed successfully".to_string(),
            filename,
            result,
            processing_metadata: metadata,
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
