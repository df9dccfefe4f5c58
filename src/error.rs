use crate::fetch::error::FetchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RainmapError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A newer request for the same logical query was issued before this
    /// one resolved. The stale result carries no data and must be
    /// discarded silently — it is not a failure of the upstream.
    #[error("Request superseded by a newer request for the same query")]
    Superseded,

    #[error("Invalid rainfall scale: {reason}")]
    InvalidScale { reason: String },
}
