//! Harness error type.

use minilibc_loader::LoadError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("config: {0}")]
    Config(String),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}
