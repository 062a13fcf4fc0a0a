pub mod asset;
pub mod citation;
pub mod error;
pub mod format;
pub mod rates;
pub mod validator;
pub mod verdict;

// Re-export commonly used types
pub use asset::{AssetDeclaration, AssetType, CheckRequest, Location};
pub use citation::{Citation, CitationService, LiveCitations, citation_query};
pub use error::{CitationError, Result, ValidationError};
pub use rates::{AssetLimits, MinThreshold, RateTable};
pub use validator::evaluate;
pub use verdict::{CitationAnnotation, Verdict};
