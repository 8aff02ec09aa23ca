//! Generic Netlink Messages
//!
//! Request and response framing for the gtp5g family.
//!
//! ```text
//! +----------------------+------------------+---------------------+
//! | nlmsghdr (16 bytes)  | genlmsghdr (4)   | attributes ...      |
//! +----------------------+------------------+---------------------+
//! ```

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::attr::{encode_attrs, Attr};
use crate::error::{Gtp5gError, Gtp5gResult};
use crate::types::{Gtp5gCmd, GENL_HDRLEN, NLMSG_HDRLEN, NLM_F_ACK, NLM_F_REQUEST};

/// struct nlmsghdr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NlMsgHeader {
    pub len: u32,
    pub msg_type: u16,
    pub flags: u16,
    pub seq: u32,
    pub pid: u32,
}

impl NlMsgHeader {
    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_u32_ne(self.len);
        buf.put_u16_ne(self.msg_type);
        buf.put_u16_ne(self.flags);
        buf.put_u32_ne(self.seq);
        buf.put_u32_ne(self.pid);
    }

    pub fn decode(buf: &mut Bytes) -> Gtp5gResult<Self> {
        if buf.remaining() < NLMSG_HDRLEN {
            return Err(Gtp5gError::TruncatedResponse {
                needed: NLMSG_HDRLEN,
                available: buf.remaining(),
            });
        }
        Ok(Self {
            len: buf.get_u32_ne(),
            msg_type: buf.get_u16_ne(),
            flags: buf.get_u16_ne(),
            seq: buf.get_u32_ne(),
            pid: buf.get_u32_ne(),
        })
    }
}

/// struct genlmsghdr
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenlHeader {
    pub cmd: u8,
    pub version: u8,
}

impl GenlHeader {
    pub fn new(cmd: Gtp5gCmd, version: u8) -> Self {
        Self {
            cmd: cmd as u8,
            version,
        }
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_u8(self.cmd);
        buf.put_u8(self.version);
        buf.put_u16_ne(0);
    }

    pub fn decode(buf: &mut Bytes) -> Gtp5gResult<Self> {
        if buf.remaining() < GENL_HDRLEN {
            return Err(Gtp5gError::TruncatedResponse {
                needed: GENL_HDRLEN,
                available: buf.remaining(),
            });
        }
        let cmd = buf.get_u8();
        let version = buf.get_u8();
        buf.advance(2);
        Ok(Self { cmd, version })
    }
}

/// Outbound gtp5g request: one command plus its attribute tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenlRequest {
    pub family_id: u16,
    pub flags: u16,
    pub header: GenlHeader,
    attrs: Vec<Attr>,
}

impl GenlRequest {
    /// New request with NLM_F_REQUEST | NLM_F_ACK
    pub fn new(family_id: u16, cmd: Gtp5gCmd, version: u8) -> Self {
        Self {
            family_id,
            flags: NLM_F_REQUEST | NLM_F_ACK,
            header: GenlHeader::new(cmd, version),
            attrs: Vec::new(),
        }
    }

    pub fn append(&mut self, attr: Attr) -> &mut Self {
        self.attrs.push(attr);
        self
    }

    pub fn append_all(&mut self, attrs: impl IntoIterator<Item = Attr>) -> &mut Self {
        self.attrs.extend(attrs);
        self
    }

    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }

    pub fn command(&self) -> Gtp5gResult<Gtp5gCmd> {
        Gtp5gCmd::try_from(self.header.cmd)
    }

    /// Encode the full netlink frame; seq and pid stay 0 for the transport
    pub fn encode(&self) -> Gtp5gResult<Bytes> {
        let mut body = BytesMut::new();
        self.header.encode(&mut body);
        encode_attrs(&self.attrs, &mut body)?;

        let total = NLMSG_HDRLEN + body.len();
        let len = u32::try_from(total).map_err(|_| {
            Gtp5gError::EncodingError(format!("netlink request too long: {total} bytes"))
        })?;
        let header = NlMsgHeader {
            len,
            msg_type: self.family_id,
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

/// Inbound netlink message: header plus body (genl header included)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NlMessage {
    pub header: NlMsgHeader,
    pub body: Bytes,
}

impl NlMessage {
    pub fn new(header: NlMsgHeader, body: Bytes) -> Self {
        Self { header, body }
    }

    /// Parse one complete netlink frame
    pub fn decode(mut buf: Bytes) -> Gtp5gResult<Self> {
        let header = NlMsgHeader::decode(&mut buf)?;
        let body_len = (header.len as usize).saturating_sub(NLMSG_HDRLEN);
        if buf.remaining() < body_len {
            return Err(Gtp5gError::TruncatedResponse {
                needed: body_len,
                available: buf.remaining(),
            });
        }
        let body = buf.split_to(body_len);
        Ok(Self { header, body })
    }

    /// Body with the generic netlink header stripped
    pub fn payload(&self) -> Gtp5gResult<Bytes> {
        strip_genl_header(&self.body)
    }
}

/// Drop the fixed-size genlmsghdr from a response body
pub fn strip_genl_header(body: &Bytes) -> Gtp5gResult<Bytes> {
    if body.len() < GENL_HDRLEN {
        return Err(Gtp5gError::TruncatedResponse {
            needed: GENL_HDRLEN,
            available: body.len(),
        });
    }
    Ok(body.slice(GENL_HDRLEN..))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::parse_attrs;
    use crate::types::Gtp5gAttr;

    #[test]
    fn test_nlmsg_header_encode_decode() {
        let header = NlMsgHeader {
            len: 40,
            msg_type: 0x1c,
            flags: NLM_F_REQUEST | NLM_F_ACK,
            seq: 12,
            pid: 99,
        };
        let mut buf = BytesMut::new();
        header.encode(&mut buf);
        assert_eq!(buf.len(), NLMSG_HDRLEN);

        let decoded = NlMsgHeader::decode(&mut buf.freeze()).unwrap();
        assert_eq!(decoded, header);
    }

    #[test]
    fn test_genl_header_encode_decode() {
        let header = GenlHeader::new(Gtp5gCmd::GetMultiReports, 0);
        let mut buf = BytesMut::new();
        header.encode(&mut buf);
        assert_eq!(buf.len(), GENL_HDRLEN);

        let decoded = GenlHeader::decode(&mut buf.freeze()).unwrap();
        assert_eq!(decoded.cmd, Gtp5gCmd::GetMultiReports as u8);
    }

    #[test]
    fn test_request_sets_ack() {
        let req = GenlRequest::new(0x1c, Gtp5gCmd::GetReport, 0);
        assert_eq!(req.flags & NLM_F_ACK, NLM_F_ACK);
        assert_eq!(req.flags & NLM_F_REQUEST, NLM_F_REQUEST);
        assert_eq!(req.command().unwrap(), Gtp5gCmd::GetReport);
    }

    #[test]
    fn test_request_encode() {
        let mut req = GenlRequest::new(0x1c, Gtp5gCmd::GetReport, 0);
        req.append(Attr::u32(Gtp5gAttr::Link, 3))
            .append(Attr::u32(Gtp5gAttr::UrrId, 1));

        let mut bytes = req.encode().unwrap();
        assert_eq!(bytes.len(), NLMSG_HDRLEN + GENL_HDRLEN + 16);

        let header = NlMsgHeader::decode(&mut bytes).unwrap();
        assert_eq!(header.len as usize, NLMSG_HDRLEN + GENL_HDRLEN + 16);
        assert_eq!(header.msg_type, 0x1c);

        let genl = GenlHeader::decode(&mut bytes).unwrap();
        assert_eq!(genl.cmd, Gtp5gCmd::GetReport as u8);

        let attrs = parse_attrs(bytes).unwrap();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs[0].as_u32().unwrap(), 3);
        assert_eq!(attrs[1].as_u32().unwrap(), 1);
    }

    #[test]
    fn test_strip_genl_header() {
        let body = Bytes::from_static(&[16, 0, 0, 0, 0xaa, 0xbb]);
        assert_eq!(strip_genl_header(&body).unwrap(), Bytes::from_static(&[0xaa, 0xbb]));

        let short = Bytes::from_static(&[16, 0]);
        assert!(matches!(
            strip_genl_header(&short),
            Err(Gtp5gError::TruncatedResponse { needed: 4, available: 2 })
        ));
    }

    #[test]
    fn test_message_decode() {
        let mut buf = BytesMut::new();
        NlMsgHeader {
            len: (NLMSG_HDRLEN + 6) as u32,
            ..Default::default()
        }
        .encode(&mut buf);
        buf.put_slice(&[19, 0, 0, 0, 1, 2]);

        let msg = NlMessage::decode(buf.freeze()).unwrap();
        assert_eq!(msg.body.len(), 6);
        assert_eq!(msg.payload().unwrap(), Bytes::from_static(&[1, 2]));
    }
}
