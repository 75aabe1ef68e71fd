use thiserror::Error;

use crate::models::MediaType;

/// Errors surfaced by providers and the registry.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Non-success or malformed response from a third-party API,
    /// tagged with the provider and the operation that failed.
    #[error("{provider} {operation} failed: {message}")]
    Upstream {
        provider: &'static str,
        operation: &'static str,
        message: String,
    },

    /// The media-type tag is outside the enumerated set.
    #[error("No provider configured for media type: {0}")]
    UnsupportedMediaType(String),

    /// The resolved provider lacks the requested capability. This is a
    /// configuration-class error, not a runtime condition.
    #[error("Provider for {media_type} does not support {capability}")]
    UnsupportedCapability {
        media_type: MediaType,
        capability: &'static str,
    },

    /// A required call parameter was missing or malformed.
    #[error("{0}")]
    InvalidRequest(String),
}

impl ProviderError {
    pub fn upstream(
        provider: &'static str,
        operation: &'static str,
        source: impl std::fmt::Display,
    ) -> Self {
        Self::Upstream {
            provider,
            operation,
            message: source.to_string(),
        }
    }
}
