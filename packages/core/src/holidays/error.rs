//! Error types for holiday resolution

use thiserror::Error;

/// Errors surfaced by [`HolidayResolver`](crate::holidays::HolidayResolver).
///
/// Provider failures during a holiday lookup never reach this type; they are
/// absorbed and degrade to "no holiday data". Only the country list, which
/// has no sensible fallback, propagates a provider failure.
#[derive(Error, Debug)]
pub enum ResolverError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Holiday store error: {0}")]
    Store(#[from] StoreError),

    #[error("Holiday provider error: {0}")]
    Provider(#[from] ProviderError),
}

/// Errors from holiday data providers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// The provider answered but reported a logical error (e.g. an
    /// unsupported country). Treated as "no data", not as a crash.
    #[error("Upstream error: {message}")]
    Upstream { message: String },

    #[error("Deserialization error: {message}")]
    Deserialization { message: String },
}

/// Errors from holiday stores
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Corrupt stored record: {message}")]
    Corrupt { message: String },
}

impl ResolverError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

impl ProviderError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    pub fn deserialization(message: impl Into<String>) -> Self {
        Self::Deserialization {
            message: message.into(),
        }
    }

    /// Short label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::Transport { .. } => "transport",
            ProviderError::Upstream { .. } => "upstream",
            ProviderError::Deserialization { .. } => "deserialization",
        }
    }
}

impl StoreError {
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::Corrupt {
            message: message.into(),
        }
    }
}
