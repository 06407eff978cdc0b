//! Error types shared by the header decoders.

use std::fmt;

use thiserror::Error;

/// Protocol layer at which a decode failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Link,
    Network,
    Transport,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layer::Link => write!(f, "link"),
            Layer::Network => write!(f, "network"),
            Layer::Transport => write!(f, "transport"),
        }
    }
}

/// Errors that can occur while decoding a captured frame.
///
/// Both variants cause the frame to be dropped from analysis without
/// touching any counter; a malformed length field is treated exactly
/// like a short capture.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("truncated frame: {layer} layer needs {needed} bytes, {available} captured")]
    TruncatedFrame {
        layer: Layer,
        needed: usize,
        available: usize,
    },
    #[error("malformed {layer} header: {reason}")]
    MalformedHeader { layer: Layer, reason: &'static str },
}

impl DecodeError {
    pub(crate) fn truncated(layer: Layer, needed: usize, available: usize) -> Self {
        DecodeError::TruncatedFrame {
            layer,
            needed,
            available,
        }
    }

    pub(crate) fn malformed(layer: Layer, reason: &'static str) -> Self {
        DecodeError::MalformedHeader { layer, reason }
    }
}
