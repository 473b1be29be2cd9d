use std::time::Duration;

use depro_domain::DateRangeError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),
    #[error("Lock acquisition timed out after {waited:?}")]
    LockTimeout { waited: Duration },
    #[error("Deadlock detected: {0}")]
    Deadlock(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Arithmetic overflow: {0}")]
    Overflow(String),
}

impl CoreError {
    /// Whether the failed operation may safely be retried by the caller.
    /// Contention failures leave the ledger untouched, so a backoff-and-retry
    /// is sound; everything else needs operator attention first.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CoreError::LockTimeout { .. } | CoreError::Deadlock(_)
        )
    }
}

impl From<DateRangeError> for CoreError {
    fn from(err: DateRangeError) -> Self {
        CoreError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_contention_errors_are_retryable() {
        assert!(CoreError::LockTimeout {
            waited: Duration::from_secs(1)
        }
        .is_retryable());
        assert!(CoreError::Deadlock("cycle".into()).is_retryable());
        assert!(!CoreError::Validation("bad range".into()).is_retryable());
        assert!(!CoreError::Storage("disk".into()).is_retryable());
        assert!(!CoreError::Overflow("carry".into()).is_retryable());
    }

    #[test]
    fn range_errors_become_validation_errors() {
        let err = CoreError::from(DateRangeError::InvalidRange);
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(!err.is_retryable());
    }
}
