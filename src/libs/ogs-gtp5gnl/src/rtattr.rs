//! Route-Attribute Serializer
//!
//! Second attribute primitive: raw-data attributes that may carry child
//! attributes, appended one by one to a flat request. Produces the same
//! bytes as the [`Attr`](crate::attr::Attr) tree for the same logical
//! attributes.

use bytes::{BufMut, Bytes, BytesMut};

use crate::attr::{Attr, AttrValue};
use crate::error::{Gtp5gError, Gtp5gResult};
use crate::message::{GenlHeader, NlMsgHeader};
use crate::types::{nla_align, NLA_F_NESTED, NLA_HDRLEN, NLM_F_REQUEST, NLMSG_HDRLEN};

pub fn uint32_attr(value: u32) -> Bytes {
    Bytes::copy_from_slice(&value.to_ne_bytes())
}

pub fn uint64_attr(value: u64) -> Bytes {
    Bytes::copy_from_slice(&value.to_ne_bytes())
}

/// Attribute with raw data and optional children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtAttr {
    pub rta_type: u16,
    pub data: Bytes,
    children: Vec<RtAttr>,
}

impl RtAttr {
    pub fn new(rta_type: u16, data: Bytes) -> Self {
        Self {
            rta_type,
            data,
            children: Vec::new(),
        }
    }

    pub fn add_child(&mut self, child: RtAttr) -> &mut Self {
        self.children.push(child);
        self
    }

    pub fn children(&self) -> &[RtAttr] {
        &self.children
    }

    /// rta_len: header plus data, children counted at their aligned size
    pub fn len(&self) -> usize {
        if self.children.is_empty() {
            return NLA_HDRLEN + self.data.len();
        }
        let children: usize = self.children.iter().map(|c| nla_align(c.len())).sum();
        nla_align(NLA_HDRLEN + children + self.data.len())
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty() && self.children.is_empty()
    }

    pub fn serialize(&self, buf: &mut BytesMut) -> Gtp5gResult<()> {
        let len = self.len();
        let rta_len = u16::try_from(len).map_err(|_| {
            Gtp5gError::EncodingError(format!(
                "rtattr {} too long: {} bytes",
                self.rta_type & !NLA_F_NESTED,
                len
            ))
        })?;

        buf.put_u16_ne(rta_len);
        buf.put_u16_ne(self.rta_type);
        for child in &self.children {
            child.serialize(buf)?;
        }
        buf.put_slice(&self.data);
        let written = NLA_HDRLEN
            + self.children.iter().map(|c| nla_align(c.len())).sum::<usize>()
            + self.data.len();
        buf.put_bytes(0, nla_align(written) - written);
        Ok(())
    }
}

impl From<&Attr> for RtAttr {
    fn from(attr: &Attr) -> Self {
        match &attr.value {
            AttrValue::U32(v) => RtAttr::new(attr.attr_type, uint32_attr(*v)),
            AttrValue::U64(v) => RtAttr::new(attr.attr_type, uint64_attr(*v)),
            AttrValue::Nested(children) => {
                let mut nested = RtAttr::new(attr.attr_type | NLA_F_NESTED, Bytes::new());
                for child in children {
                    nested.add_child(RtAttr::from(child));
                }
                nested
            }
        }
    }
}

/// One piece of a flat netlink request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestData {
    Genl(GenlHeader),
    Attr(RtAttr),
}

/// Netlink request assembled from flat pieces
#[derive(Debug, Clone)]
pub struct NetlinkRequest {
    pub msg_type: u16,
    pub flags: u16,
    data: Vec<RequestData>,
}

impl NetlinkRequest {
    /// NLM_F_REQUEST is always added to `flags`
    pub fn new(msg_type: u16, flags: u16) -> Self {
        Self {
            msg_type,
            flags: NLM_F_REQUEST | flags,
            data: Vec::new(),
        }
    }

    pub fn add_data(&mut self, data: RequestData) -> &mut Self {
        self.data.push(data);
        self
    }

    pub fn data(&self) -> &[RequestData] {
        &self.data
    }

    pub fn serialize(&self) -> Gtp5gResult<Bytes> {
        let mut body = BytesMut::new();
        for part in &self.data {
            match part {
                RequestData::Genl(header) => header.encode(&mut body),
                RequestData::Attr(attr) => attr.serialize(&mut body)?,
            }
        }

        let total = NLMSG_HDRLEN + body.len();
        let len = u32::try_from(total).map_err(|_| {
            Gtp5gError::EncodingError(format!("netlink request too long: {total} bytes"))
        })?;
        let header = NlMsgHeader {
            len,
            msg_type: self.msg_type,
            flags: self.flags,
            seq: 0,
            pid: 0,
        };

        let mut buf = BytesMut::with_capacity(total);
        header.encode(&mut buf);
        buf.put_slice(&body);
        Ok(buf.freeze())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Gtp5gAttr, Gtp5gCmd};

    #[test]
    fn test_leaf_len_is_unpadded() {
        let attr = RtAttr::new(3, Bytes::from_static(&[1, 2, 3]));
        assert_eq!(attr.len(), 7);

        let mut buf = BytesMut::new();
        attr.serialize(&mut buf).unwrap();
        assert_eq!(buf.len(), 8);
        assert_eq!(&buf[0..2], &7u16.to_ne_bytes());
        assert_eq!(buf[7], 0);
    }

    #[test]
    fn test_nested_len() {
        let mut entry = RtAttr::new(
            Gtp5gAttr::UrrMultiSeidUrrid as u16 | NLA_F_NESTED,
            Bytes::new(),
        );
        entry.add_child(RtAttr::new(Gtp5gAttr::UrrId as u16, uint32_attr(1)));
        entry.add_child(RtAttr::new(Gtp5gAttr::UrrSeid as u16, uint64_attr(2)));
        assert_eq!(entry.len(), 24);
        assert_eq!(entry.children().len(), 2);
    }

    #[test]
    fn test_matches_attr_tree_bytes() {
        let attr = Attr::nested(
            Gtp5gAttr::UrrMultiSeidUrrid,
            vec![
                Attr::u32(Gtp5gAttr::UrrId, 10),
                Attr::u64(Gtp5gAttr::UrrSeid, 20),
            ],
        );
        let mut tree = BytesMut::new();
        attr.encode(&mut tree).unwrap();

        let mut flat = BytesMut::new();
        RtAttr::from(&attr).serialize(&mut flat).unwrap();

        assert_eq!(tree, flat);
    }

    #[test]
    fn test_request_header() {
        let mut req = NetlinkRequest::new(0x1c, crate::types::NLM_F_ACK);
        req.add_data(RequestData::Genl(GenlHeader::new(Gtp5gCmd::GetUsageStatistic, 0)));
        req.add_data(RequestData::Attr(RtAttr::new(
            Gtp5gAttr::Link as u16,
            uint32_attr(4),
        )));

        let bytes = req.serialize().unwrap();
        assert_eq!(bytes.len(), NLMSG_HDRLEN + 4 + 8);

        let header = NlMsgHeader::decode(&mut bytes.clone()).unwrap();
        assert_eq!(header.len as usize, bytes.len());
        assert_eq!(header.msg_type, 0x1c);
        assert_eq!(header.flags, 0x0005);
        assert_eq!(bytes[NLMSG_HDRLEN], Gtp5gCmd::GetUsageStatistic as u8);
    }
}
