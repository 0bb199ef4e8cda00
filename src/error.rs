use thiserror::Error;

/// Errors produced by the roster, the queue engine and the backing store
#[derive(Debug, Error)]
pub enum MessError {
    #[error("Queue is full ({capacity} waiting). Please wait for space to become available.")]
    QueueFull { capacity: usize },
    #[error("No student registered for code '{code}'")]
    NotFound { code: String },
    #[error("Store IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Store JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MessError {
    /// Denials are shown to the person at the scanner; the caller may ask for a rescan.
    pub fn is_denial(&self) -> bool {
        matches!(self, MessError::QueueFull { .. } | MessError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, MessError>;
