//! Crate-wide error type
//!
//! Only configuration loading and diagnostic output can fail. The per-tick
//! path absorbs degenerate inputs locally and never returns an error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    InvalidSettings { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
