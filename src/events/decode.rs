//! Per-call decode context
//!
//! Every handler callback receives its own freshly constructed `DecodeCtx`;
//! the context is stateless and never shared across calls, so concurrent
//! handlers cannot observe each other's decoding.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Stateless decode context handed to a single dispatch call.
#[derive(Debug, Default)]
pub struct DecodeCtx {
    _not_shared: (),
}

impl DecodeCtx {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a JSON value into a typed structure.
    pub fn decode<T: DeserializeOwned>(&self, value: &Value) -> Result<T, DecodeError> {
        Ok(T::deserialize(value)?)
    }

    /// Decode a raw JSON string into a typed structure.
    pub fn decode_str<T: DeserializeOwned>(&self, raw: &str) -> Result<T, DecodeError> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("could not decode payload: {0}")]
pub struct DecodeError(#[from] serde_json::Error);
