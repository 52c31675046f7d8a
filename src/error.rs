use thiserror::Error;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Provider(#[from] crate::providers::ProviderError),

    #[error("failed to serialize inventory: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
