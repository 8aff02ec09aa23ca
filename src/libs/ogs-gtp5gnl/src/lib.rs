//! NextGCore gtp5g Netlink Report Library
//!
//! This crate retrieves usage reports and usage statistics from the gtp5g
//! kernel forwarding module over generic netlink.
//!
//! # Features
//!
//! - Object identifiers (URR ID with optional SEID)
//! - GET_REPORT / GET_MULTI_REPORTS / GET_USAGE_STATISTIC request encoding
//! - Request dispatch with single-reply correlation
//! - Attribute-tree and route-attribute encoding paths
//!
//! The netlink socket ([`Transport`]) and the report layout
//! ([`UsageDecoder`]) are supplied by the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use ogs_gtp5gnl::{Link, Oid, ReportClient};
//!
//! let client = ReportClient::new(socket, decoder);
//! let link = Link::new("upfgtp", 4);
//! let reports = client.get_report_oid(&link, Oid::new(1, 0x10))?;
//! ```

pub mod attr;
pub mod builder;
pub mod client;
pub mod config;
pub mod decode;
pub mod dispatch;
pub mod error;
pub mod message;
pub mod oid;
pub mod rtattr;
pub mod transport;
pub mod types;


pub use client::ReportClient;
pub use config::{ConfigError, ReportClientConfig};
pub use decode::UsageDecoder;
pub use dispatch::{AttrListDispatch, Dispatch, RequestKind, RtAttrDispatch};
pub use error::{Gtp5gError, Gtp5gResult};
pub use oid::Oid;
pub use transport::{Link, LinkRef, RawTransport, Transport};
pub use types::{Gtp5gAttr, Gtp5gCmd, GTP5G_GENL_NAME};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::attr::{Attr, AttrValue, RawAttr};
    pub use crate::client::ReportClient;
    pub use crate::decode::UsageDecoder;
    pub use crate::dispatch::RequestKind;
    pub use crate::error::{Gtp5gError, Gtp5gResult};
    pub use crate::message::{GenlHeader, GenlRequest, NlMessage, NlMsgHeader};
    pub use crate::oid::Oid;
    pub use crate::transport::{Link, LinkRef, RawTransport, Transport};
    pub use crate::types::{Gtp5gAttr, Gtp5gCmd};
}
