use thiserror::Error;

/// Top-level error type for boundary data interchange.
///
/// The editing operations themselves never fail; they report "nothing to do"
/// through `Option`. Errors only arise when reading boundary data from an
/// external representation.
#[derive(Debug, Error)]
pub enum BoundaryError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Errors related to malformed GeoJSON input.
#[derive(Debug, Error, PartialEq)]
pub enum FormatError {
    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("expected {expected} for {field}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("invalid feature id: {0}")]
    InvalidId(String),

    #[error("unsupported geometry type: {0}")]
    UnsupportedGeometry(String),
}

/// Convenience type alias for results using [`BoundaryError`].
pub type Result<T> = std::result::Result<T, BoundaryError>;
