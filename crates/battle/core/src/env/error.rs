//! Oracle access errors.

/// Raised when a required oracle is missing from the environment or a
/// catalog lookup fails.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    #[error("rng oracle not available")]
    RngNotAvailable,

    #[error("catalog oracle not available")]
    CatalogNotAvailable,

    #[error("buff oracle not available")]
    BuffsNotAvailable,

    #[error("unknown card '{0}'")]
    UnknownCard(String),
}
