//! Transport Error Types

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("transport channel is closed")]
    ChannelClosed,

    #[error("could not serialize outbound message: {cause}")]
    Serialize { cause: String },
}

/// Result type for transport operations
pub type TransportResult<T> = Result<T, TransportError>;
