//! gtp5g Netlink Error Types

use thiserror::Error;

use crate::dispatch::RequestKind;
use crate::oid::Oid;

/// Boxed error produced by an external usage decoder
pub type DecodeSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// gtp5g netlink client error type
#[derive(Debug, Error)]
pub enum Gtp5gError {
    /// OID has no usable URR ID; raised before any I/O
    #[error("Invalid OID: {oid}")]
    InvalidIdentifier { oid: Oid },

    /// Attribute construction rejected a value
    #[error("Encoding error: {0}")]
    EncodingError(String),

    /// Socket or dispatch failure reported by the transport
    #[error("Transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// Transport answered with zero messages
    #[error("Empty response to {0} request")]
    EmptyResponse(RequestKind),

    /// Response body shorter than the generic netlink header
    #[error("Truncated response: needed {needed} bytes, available {available}")]
    TruncatedResponse { needed: usize, available: usize },

    /// Malformed netlink attribute in a parsed payload
    #[error("Invalid attribute: {0}")]
    InvalidAttribute(String),

    /// Unknown gtp5g attribute type
    #[error("Invalid attribute type: {0}")]
    InvalidAttributeType(u16),

    /// Unknown gtp5g command
    #[error("Invalid command: {0}")]
    InvalidCommand(u8),

    /// External decoder rejected the payload
    #[error("Decode error: {0}")]
    Decode(#[source] DecodeSource),
}

impl Gtp5gError {
    /// Wrap an external decoder error without altering it
    pub fn decode<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Decode(Box::new(err))
    }
}

/// gtp5g netlink client result type
pub type Gtp5gResult<T> = Result<T, Gtp5gError>;
