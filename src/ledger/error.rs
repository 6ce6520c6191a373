use thiserror::Error;

/// User-correctable input problems. Nothing is mutated when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum ValidationError {
    #[error("Please fill all fields: description is empty")]
    EmptyText,
    #[error("Please fill all fields: amount is empty")]
    EmptyAmount,
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Please fill all fields: date is empty")]
    EmptyDate,
    #[error("Invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),
    #[error("Category is empty")]
    EmptyCategory,
    #[error("Enter valid amount: budget limit must be a positive number, got '{0}'")]
    NonPositiveLimit(String),
}

#[derive(Debug, Error)]
pub(crate) enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("Serialization error: {0}")]
    Encode(#[from] serde_json::Error),
}

impl LedgerError {
    pub(crate) fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(v) => Some(v),
            _ => None,
        }
    }
}

pub(crate) type Result<T> = std::result::Result<T, LedgerError>;
