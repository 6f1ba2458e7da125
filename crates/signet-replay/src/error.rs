//! Replay error types.

use signet_core::SignatureError;
use signet_render::RenderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Invalid script: {0}")]
    Script(String),
    #[error(transparent)]
    Signature(#[from] SignatureError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ReplayResult<T> = Result<T, ReplayError>;
