use thiserror::Error;

/// Strategy-level degradations.
///
/// One narrow variant per extraction strategy, so callers and tests can tell
/// which stage produced nothing. The orchestrator logs these and moves on;
/// they never fail a request.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Document has no pages")]
    NoPages,

    #[error("Document has no text for pattern extraction")]
    EmptyText,

    #[error("Document has no typed entities")]
    NoEntities,

    #[error("Document has no form fields")]
    NoFormFields,
}
