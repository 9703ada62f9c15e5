use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Validation failed for {field}: {details}")]
    ValidationError { field: String, details: String },

    #[error("Insight provider unavailable: {0}")]
    ProviderError(String),

    #[error("Date calculation error: {0}")]
    DateError(String),

    #[error("Calculation out of range: {0}")]
    CalculationError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[cfg(feature = "gemini")]
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
}

impl DashboardError {
    pub(crate) fn validation(field: &str, details: impl Into<String>) -> Self {
        DashboardError::ValidationError {
            field: field.to_string(),
            details: details.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, DashboardError::ValidationError { .. })
    }

    /// True for failures that originate at the insight provider boundary.
    /// These never reflect on ledger state.
    pub fn is_provider_failure(&self) -> bool {
        match self {
            DashboardError::ProviderError(_) | DashboardError::SerializationError(_) => true,
            #[cfg(feature = "gemini")]
            DashboardError::HttpError(_) => true,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
