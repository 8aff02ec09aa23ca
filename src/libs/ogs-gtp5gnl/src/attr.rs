//! Netlink Attributes
//!
//! Typed attribute tree used to build gtp5g requests, plus a flat parser for
//! attribute streams found in request and response payloads.
//!
//! Wire format of one attribute (host byte order):
//! ```text
//! +---------------+---------------+------------------------------+
//! |  nla_len (16) | nla_type (16) | payload ... (pad to 4 bytes) |
//! +---------------+---------------+------------------------------+
//! ```
//! `nla_len` covers the header and the unpadded payload.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{Gtp5gError, Gtp5gResult};
use crate::types::{nla_align, Gtp5gAttr, NLA_F_NESTED, NLA_HDRLEN, NLA_TYPE_MASK};

/// Attribute payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    U32(u32),
    U64(u64),
    Nested(Vec<Attr>),
}

/// One node of an attribute tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub attr_type: u16,
    pub value: AttrValue,
}

impl Attr {
    pub fn u32(attr: Gtp5gAttr, value: u32) -> Self {
        Self {
            attr_type: attr.into(),
            value: AttrValue::U32(value),
        }
    }

    pub fn u64(attr: Gtp5gAttr, value: u64) -> Self {
        Self {
            attr_type: attr.into(),
            value: AttrValue::U64(value),
        }
    }

    pub fn nested(attr: Gtp5gAttr, children: Vec<Attr>) -> Self {
        Self {
            attr_type: attr.into(),
            value: AttrValue::Nested(children),
        }
    }

    pub fn is_nested(&self) -> bool {
        matches!(self.value, AttrValue::Nested(_))
    }

    /// nla_type as written on the wire, NLA_F_NESTED included
    pub fn wire_type(&self) -> u16 {
        if self.is_nested() {
            self.attr_type | NLA_F_NESTED
        } else {
            self.attr_type
        }
    }

    /// Children of a nested attribute
    pub fn children(&self) -> &[Attr] {
        match &self.value {
            AttrValue::Nested(children) => children,
            _ => &[],
        }
    }

    fn payload_len(&self) -> usize {
        match &self.value {
            AttrValue::U32(_) => 4,
            AttrValue::U64(_) => 8,
            AttrValue::Nested(children) => children.iter().map(Attr::encoded_len).sum(),
        }
    }

    /// Encoded length including header and trailing padding
    pub fn encoded_len(&self) -> usize {
        nla_align(NLA_HDRLEN + self.payload_len())
    }

    pub fn encode(&self, buf: &mut BytesMut) -> Gtp5gResult<()> {
        let len = NLA_HDRLEN + self.payload_len();
        let nla_len = u16::try_from(len).map_err(|_| {
            Gtp5gError::EncodingError(format!(
                "attribute {} too long: {} bytes",
                self.attr_type, len
            ))
        })?;

        buf.put_u16_ne(nla_len);
        buf.put_u16_ne(self.wire_type());
        match &self.value {
            AttrValue::U32(v) => buf.put_u32_ne(*v),
            AttrValue::U64(v) => buf.put_u64_ne(*v),
            AttrValue::Nested(children) => encode_attrs(children, buf)?,
        }
        buf.put_bytes(0, nla_align(len) - len);
        Ok(())
    }
}

/// Encode a list of attributes back to back
pub fn encode_attrs(attrs: &[Attr], buf: &mut BytesMut) -> Gtp5gResult<()> {
    for attr in attrs {
        attr.encode(buf)?;
    }
    Ok(())
}

/// Attribute read back from a payload, flags split out of the type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAttr {
    pub attr_type: u16,
    pub nested: bool,
    pub data: Bytes,
}

impl RawAttr {
    pub fn as_u32(&self) -> Gtp5gResult<u32> {
        if self.data.len() != 4 {
            return Err(Gtp5gError::InvalidAttribute(format!(
                "attribute {} expected 4 bytes, got {}",
                self.attr_type,
                self.data.len()
            )));
        }
        Ok(self.data.clone().get_u32_ne())
    }

    pub fn as_u64(&self) -> Gtp5gResult<u64> {
        if self.data.len() != 8 {
            return Err(Gtp5gError::InvalidAttribute(format!(
                "attribute {} expected 8 bytes, got {}",
                self.attr_type,
                self.data.len()
            )));
        }
        Ok(self.data.clone().get_u64_ne())
    }

    /// Parse the payload as a nested attribute stream
    pub fn children(&self) -> Gtp5gResult<Vec<RawAttr>> {
        parse_attrs(self.data.clone())
    }
}

/// Split a payload into its top-level attributes
pub fn parse_attrs(mut buf: Bytes) -> Gtp5gResult<Vec<RawAttr>> {
    let mut attrs = Vec::new();

    while buf.remaining() >= NLA_HDRLEN {
        let nla_len = buf.get_u16_ne() as usize;
        let nla_type = buf.get_u16_ne();

        if nla_len < NLA_HDRLEN {
            return Err(Gtp5gError::InvalidAttribute(format!(
                "nla_len {nla_len} shorter than header"
            )));
        }
        let payload_len = nla_len - NLA_HDRLEN;
        if buf.remaining() < payload_len {
            return Err(Gtp5gError::InvalidAttribute(format!(
                "attribute {} needs {} bytes, {} available",
                nla_type & NLA_TYPE_MASK,
                payload_len,
                buf.remaining()
            )));
        }

        let data = buf.split_to(payload_len);
        // Last attribute may omit its padding
        let pad = (nla_align(nla_len) - nla_len).min(buf.remaining());
        buf.advance(pad);

        attrs.push(RawAttr {
            attr_type: nla_type & NLA_TYPE_MASK,
            nested: nla_type & NLA_F_NESTED != 0,
            data,
        });
    }

    if buf.has_remaining() {
        return Err(Gtp5gError::InvalidAttribute(format!(
            "{} trailing bytes",
            buf.remaining()
        )));
    }

    Ok(attrs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(attr: &Attr) -> Bytes {
        let mut buf = BytesMut::new();
        attr.encode(&mut buf).unwrap();
        buf.freeze()
    }

    #[test]
    fn test_u32_attr_layout() {
        let bytes = encode(&Attr::u32(Gtp5gAttr::Link, 7));
        assert_eq!(bytes.len(), 8);
        assert_eq!(&bytes[0..2], &8u16.to_ne_bytes());
        assert_eq!(&bytes[2..4], &(Gtp5gAttr::Link as u16).to_ne_bytes());
        assert_eq!(&bytes[4..8], &7u32.to_ne_bytes());
    }

    #[test]
    fn test_u64_attr_layout() {
        let bytes = encode(&Attr::u64(Gtp5gAttr::UrrSeid, 0x0102_0304_0506_0708));
        assert_eq!(bytes.len(), 12);
        assert_eq!(&bytes[0..2], &12u16.to_ne_bytes());
        assert_eq!(&bytes[4..12], &0x0102_0304_0506_0708u64.to_ne_bytes());
    }

    #[test]
    fn test_nested_attr_sets_flag() {
        let attr = Attr::nested(
            Gtp5gAttr::UrrMultiSeidUrrid,
            vec![
                Attr::u32(Gtp5gAttr::UrrId, 1),
                Attr::u64(Gtp5gAttr::UrrSeid, 2),
            ],
        );
        assert_eq!(attr.encoded_len(), 4 + 8 + 12);

        let bytes = encode(&attr);
        assert_eq!(bytes.len(), 24);
        let parsed = parse_attrs(bytes).unwrap();
        assert_eq!(parsed.len(), 1);
        assert!(parsed[0].nested);
        assert_eq!(parsed[0].attr_type, Gtp5gAttr::UrrMultiSeidUrrid as u16);

        let children = parsed[0].children().unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].attr_type, Gtp5gAttr::UrrId as u16);
        assert_eq!(children[0].as_u32().unwrap(), 1);
        assert_eq!(children[1].attr_type, Gtp5gAttr::UrrSeid as u16);
        assert_eq!(children[1].as_u64().unwrap(), 2);
    }

    #[test]
    fn test_parse_rejects_short_len() {
        let mut buf = BytesMut::new();
        buf.put_u16_ne(2);
        buf.put_u16_ne(1);
        assert!(matches!(
            parse_attrs(buf.freeze()),
            Err(Gtp5gError::InvalidAttribute(_))
        ));
    }

    #[test]
    fn test_parse_rejects_overrun() {
        let mut buf = BytesMut::new();
        buf.put_u16_ne(12);
        buf.put_u16_ne(1);
        buf.put_u32_ne(0);
        assert!(parse_attrs(buf.freeze()).is_err());
    }

    #[test]
    fn test_parse_rejects_trailing_bytes() {
        let mut bytes = BytesMut::from(&encode(&Attr::u32(Gtp5gAttr::Link, 1))[..]);
        bytes.put_u8(0);
        assert!(parse_attrs(bytes.freeze()).is_err());
    }

    #[test]
    fn test_as_u32_wrong_width() {
        let raw = RawAttr {
            attr_type: 3,
            nested: false,
            data: Bytes::from_static(&[0; 8]),
        };
        assert!(raw.as_u32().is_err());
        assert_eq!(raw.as_u64().unwrap(), 0);
    }
}
