use thiserror::Error;

/// Why a save request was not recorded. None of these are fatal to the session.
#[derive(Debug, Error)]
pub enum ReportError {
    /// No endpoint or credentials configured. Treated as a skip, not a failure.
    #[error("report destination not configured")]
    NotConfigured,

    #[error("failed to encode save request: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("transport failed: {0}")]
    Transport(String),

    #[error("endpoint responded with status {0}")]
    Status(u16),
}

impl ReportError {
    /// Skips are expected in unconfigured deployments and only worth a debug line.
    pub fn is_skip(&self) -> bool {
        matches!(self, ReportError::NotConfigured)
    }
}
