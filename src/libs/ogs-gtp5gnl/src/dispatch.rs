//! Request Dispatch
//!
//! Wraps a command and its attributes into one netlink request, performs the
//! round trip, and returns the first reply with the genl header stripped.
//!
//! Two interchangeable strategies are provided:
//! - [`AttrListDispatch`]: attribute tree over [`Transport::request`]
//! - [`RtAttrDispatch`]: flat route attributes over [`RawTransport::execute`]

use std::fmt;

use bytes::Bytes;

use crate::attr::Attr;
use crate::error::{Gtp5gError, Gtp5gResult};
use crate::message::{strip_genl_header, GenlHeader, GenlRequest};
use crate::rtattr::{NetlinkRequest, RequestData, RtAttr};
use crate::transport::{RawTransport, Transport};
use crate::types::{Gtp5gCmd, GTP5G_GENL_VERSION, NLM_F_ACK};

/// Logical request being dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Report,
    MultiReport,
    UsageStatistic,
}

impl RequestKind {
    pub fn command(&self) -> Gtp5gCmd {
        match self {
            Self::Report => Gtp5gCmd::GetReport,
            Self::MultiReport => Gtp5gCmd::GetMultiReports,
            Self::UsageStatistic => Gtp5gCmd::GetUsageStatistic,
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Report => "report",
            Self::MultiReport => "multi-report",
            Self::UsageStatistic => "usage statistic",
        };
        f.write_str(name)
    }
}

/// One request/response round trip
pub trait Dispatch {
    /// Returns the payload of the first reply, after the genl header
    fn dispatch(&self, kind: RequestKind, attrs: Vec<Attr>) -> Gtp5gResult<Bytes>;
}

fn first_reply<T>(kind: RequestKind, mut replies: Vec<T>, warn_on_extra: bool) -> Gtp5gResult<T> {
    if replies.is_empty() {
        return Err(Gtp5gError::EmptyResponse(kind));
    }
    let extra = replies.len() - 1;
    if extra > 0 {
        if warn_on_extra {
            log::warn!("Ignoring {} extra {} replies", extra, kind);
        } else {
            log::debug!("Ignoring {} extra {} replies", extra, kind);
        }
    }
    Ok(replies.swap_remove(0))
}

/// Attribute-tree strategy
#[derive(Debug)]
pub struct AttrListDispatch<T> {
    transport: T,
    genl_version: u8,
    warn_on_extra: bool,
}

impl<T: Transport> AttrListDispatch<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            genl_version: GTP5G_GENL_VERSION,
            warn_on_extra: false,
        }
    }

    pub fn genl_version(mut self, version: u8) -> Self {
        self.genl_version = version;
        self
    }

    pub fn warn_on_extra_responses(mut self, warn: bool) -> Self {
        self.warn_on_extra = warn;
        self
    }

    /// Build the request without sending it
    pub fn build(&self, kind: RequestKind, attrs: Vec<Attr>) -> GenlRequest {
        let mut req = GenlRequest::new(
            self.transport.family_id(),
            kind.command(),
            self.genl_version,
        );
        req.append_all(attrs);
        req
    }
}

impl<T: Transport> Dispatch for AttrListDispatch<T> {
    fn dispatch(&self, kind: RequestKind, attrs: Vec<Attr>) -> Gtp5gResult<Bytes> {
        let req = self.build(kind, attrs);
        log::debug!(
            "Sending {} with {} attributes",
            kind.command().name(),
            req.attrs().len()
        );

        let replies = self.transport.request(&req)?;
        log::debug!("{} answered with {} messages", kind.command().name(), replies.len());

        let reply = first_reply(kind, replies, self.warn_on_extra)?;
        reply.payload()
    }
}

/// Route-attribute strategy
#[derive(Debug)]
pub struct RtAttrDispatch<T> {
    transport: T,
    genl_version: u8,
    flags: u16,
    warn_on_extra: bool,
}

impl<T: RawTransport> RtAttrDispatch<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            genl_version: GTP5G_GENL_VERSION,
            flags: NLM_F_ACK,
            warn_on_extra: false,
        }
    }

    pub fn genl_version(mut self, version: u8) -> Self {
        self.genl_version = version;
        self
    }

    /// Flags passed to the request as given; NLM_F_REQUEST is always added
    pub fn flags(mut self, flags: u16) -> Self {
        self.flags = flags;
        self
    }

    pub fn warn_on_extra_responses(mut self, warn: bool) -> Self {
        self.warn_on_extra = warn;
        self
    }

    /// Build the request without sending it
    pub fn build(&self, kind: RequestKind, attrs: &[Attr]) -> NetlinkRequest {
        let mut req = NetlinkRequest::new(self.transport.family_id(), self.flags);
        req.add_data(RequestData::Genl(GenlHeader::new(
            kind.command(),
            self.genl_version,
        )));
        for attr in attrs {
            req.add_data(RequestData::Attr(RtAttr::from(attr)));
        }
        req
    }
}

impl<T: RawTransport> Dispatch for RtAttrDispatch<T> {
    fn dispatch(&self, kind: RequestKind, attrs: Vec<Attr>) -> Gtp5gResult<Bytes> {
        let frame = self.build(kind, &attrs).serialize()?;
        log::debug!(
            "Sending {} as {} byte frame",
            kind.command().name(),
            frame.len()
        );

        let replies = self.transport.execute(&frame)?;
        log::debug!("{} answered with {} messages", kind.command().name(), replies.len());

        let reply = first_reply(kind, replies, self.warn_on_extra)?;
        strip_genl_header(&reply)
    }
}
