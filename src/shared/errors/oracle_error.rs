use thiserror::Error;

/// Price oracle failures
///
/// The oracle is a pure external read; none of these variants imply anything
/// about local state.
#[derive(Error, Debug)]
pub enum OracleError {
    /// Transport failure, timeout, or non-2xx status from the price source
    #[error("Price source unavailable: {0}")]
    Unavailable(String),

    /// The price source has no listing for the asset id
    #[error("Currency not found: id={0}")]
    NotFound(u32),

    /// Response body did not match the expected shape
    #[error("Malformed price response: {0}")]
    Malformed(String),
}
