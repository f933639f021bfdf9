pub mod document;
pub mod extraction;
pub mod ocr;
pub mod server;
pub mod utils;

pub use document::{Document, FormField, Page, Table, TextAnchor};
pub use extraction::{
    Category, ExtractionError, ExtractionPipeline, FattyAcidClass, Marker, ParseResult,
    ReferenceCatalog,
};
pub use ocr::{OcrClient, OcrError};
pub use server::{create_app, start_server};
