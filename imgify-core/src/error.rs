//! Core error types for Emote Imgify.

use thiserror::Error;

/// Core error type for Emote Imgify models.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Channel id is not a numeric identifier.
    #[error("Invalid channel id: {0:?}")]
    InvalidChannelId(String),
}
