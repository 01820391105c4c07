use thiserror::Error;

/// The loading process itself could not proceed.
///
/// Individual fetch failures never surface here; they are logged and the
/// record is left out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("batch size must be at least 1")]
    InvalidBatchSize,
    #[error("identifier at position {index} is blank")]
    InvalidIdentifier { index: usize },
}
