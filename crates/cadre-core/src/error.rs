//! Error types for `cadre-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("malformed skill catalog: {0}")]
  Catalog(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
