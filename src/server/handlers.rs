use std::time::Instant;

use axum::extract::State;
use axum::response::Json;

use super::error::AppError;
use super::models::{HealthResponse, ParseRequest, ParseResponse, ProcessingMetadata};
use super::AppState;
use crate::extraction::ExtractionPipeline;

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Main report parsing endpoint
pub async fn parse_report(
    State(state): State<AppState>,
    Json(request): Json<ParseRequest>,
) -> Result<Json<ParseResponse>, AppError> {
    tracing::info!("Received parse request for filename: {}", request.filename);

    let pdf_bytes = request.validate_and_decode()?;

    tracing::info!("Decoded PDF: {} bytes", pdf_bytes.len());

    let started = Instant::now();
    let document = state.ocr.process(&pdf_bytes).await?;

    let pipeline = ExtractionPipeline::new(&state.catalog);
    let result = pipeline.extract(&document);
    let processing_time = started.elapsed().as_secs_f64();

    tracing::info!(
        "Processing successful: {} markers found in {processing_time:.2}s",
        result.extraction_stats.total_markers_found
    );

    let metadata = ProcessingMetadata {
        processing_time,
        processor_id: state.ocr.processor_id().to_string(),
        document_pages: document.pages.len(),
    };

    Ok(Json(ParseResponse::success(
        request.sanitized_filename(),
        result,
        metadata,
    )))
}
