use thiserror::Error;

/// Client-caused problems with an asset declaration.
///
/// These are terminal for a request: the declaration is never evaluated, and
/// nothing is silently defaulted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),

    #[error("purity must be at least {min}k (BIS standards), got {actual}k")]
    PurityTooLow { min: u32, actual: i64 },

    #[error("{0} is out of range relative to the asset value")]
    OutOfRange(&'static str),

    #[error("unsupported asset type: {0}")]
    UnsupportedAssetType(String),

    #[error("unsupported location: {0} (expected urban or rural)")]
    UnsupportedLocation(String),
}

impl ValidationError {
    /// Name of the request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Missing(field)
            | ValidationError::NotPositive(field)
            | ValidationError::OutOfRange(field) => field,
            ValidationError::PurityTooLow { .. } => "purity",
            ValidationError::UnsupportedAssetType(_) => "assetType",
            ValidationError::UnsupportedLocation(_) => "location",
        }
    }
}

/// Failures of the live citation lookup. Never fatal to a verdict.
#[derive(Error, Debug)]
pub enum CitationError {
    #[error("citation lookup timed out after {0} ms")]
    Timeout(u128),

    #[error("citation provider error: {0}")]
    Provider(String),

    #[error("malformed citation response: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, ValidationError>;
