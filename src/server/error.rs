use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

use super::models::ErrorResponse;
use crate::ocr::OcrError;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Missing or empty pdf_base64 field")]
    EmptyPayload,

    #[error("Base64 payload exceeds the maximum allowed size")]
    Base64DataTooLarge,

    #[error("Invalid base64 PDF data: {0}")]
    InvalidBase64(String),

    #[error("Decoded document exceeds the maximum allowed size")]
    FileSizeTooLarge,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request")]
    Validation {
        #[from]
        source: ValidationError,
    },

    #[error("Document processing error")]
    Ocr {
        #[from]
        source: OcrError,
    },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, details) = match self {
            AppError::Validation { source } => (
                StatusCode::BAD_REQUEST,
                "Bad Request".to_string(),
                Some(source.to_string()),
            ),
            AppError::Ocr { source } => (
                StatusCode::BAD_GATEWAY,
                "Document Processing Error".to_string(),
                Some(source.to_string()),
            ),
        };

        let mut error_response = ErrorResponse::new(error_message);
        if let Some(details) = details {
            error_response = error_response.with_details(details);
        }

        (status, Json(error_response)).into_response()
    }
}
