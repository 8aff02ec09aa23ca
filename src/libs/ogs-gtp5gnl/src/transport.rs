//! Transport and Link Interfaces
//!
//! The netlink socket, its family resolution, and the kernel interface
//! handle are owned by the caller. The client only needs these seams.

use std::io;

use bytes::Bytes;

use crate::message::{GenlRequest, NlMessage};

/// Synchronous generic netlink request/response channel
pub trait Transport {
    /// Resolved family id of the gtp5g generic netlink family
    fn family_id(&self) -> u16;

    /// Send one request and collect its replies, in arrival order
    fn request(&self, req: &GenlRequest) -> io::Result<Vec<NlMessage>>;
}

/// Raw-bytes channel used by the route-attribute encoding path
pub trait RawTransport {
    fn family_id(&self) -> u16;

    /// Send an encoded netlink frame; each returned buffer is one reply
    /// with its nlmsghdr already removed
    fn execute(&self, frame: &[u8]) -> io::Result<Vec<Bytes>>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn family_id(&self) -> u16 {
        (**self).family_id()
    }

    fn request(&self, req: &GenlRequest) -> io::Result<Vec<NlMessage>> {
        (**self).request(req)
    }
}

impl<T: RawTransport + ?Sized> RawTransport for &T {
    fn family_id(&self) -> u16 {
        (**self).family_id()
    }

    fn execute(&self, frame: &[u8]) -> io::Result<Vec<Bytes>> {
        (**self).execute(frame)
    }
}

/// Anything exposing a kernel interface index
pub trait LinkRef {
    fn index(&self) -> i32;
}

/// gtp5g link device
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link {
    pub name: String,
    pub index: i32,
}

impl Link {
    pub fn new(name: impl Into<String>, index: i32) -> Self {
        Self {
            name: name.into(),
            index,
        }
    }
}

impl LinkRef for Link {
    fn index(&self) -> i32 {
        self.index
    }
}

impl<L: LinkRef + ?Sized> LinkRef for &L {
    fn index(&self) -> i32 {
        (**self).index()
    }
}
