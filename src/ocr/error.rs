use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("OCR processor not found: {name}")]
    ProcessorNotFound { name: String },

    #[error("OCR service rejected the request with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("OCR service unavailable after {attempts} attempts: {message}")]
    RetriesExhausted { attempts: u32, message: String },

    #[error("Failed to decode OCR service response")]
    Decode {
        #[source]
        source: reqwest::Error,
    },
}
