//! gtp5g Generic Netlink Constants
//!
//! Netlink framing constants and the gtp5g command/attribute numbering
//! shared by the request builders and the response parsers.

use crate::error::Gtp5gError;

/// Generic netlink family name registered by the gtp5g module
pub const GTP5G_GENL_NAME: &str = "gtp5g";

/// Generic netlink family version used by gtp5g
pub const GTP5G_GENL_VERSION: u8 = 0;

/// struct nlmsghdr length (16 bytes)
pub const NLMSG_HDRLEN: usize = 16;

/// struct genlmsghdr length (4 bytes)
pub const GENL_HDRLEN: usize = 4;

/// struct nlattr length (4 bytes)
pub const NLA_HDRLEN: usize = 4;

/// Netlink attribute alignment
pub const NLA_ALIGNTO: usize = 4;

/// NLM_F_REQUEST - it is a request message
pub const NLM_F_REQUEST: u16 = 0x0001;

/// NLM_F_ACK - reply with an acknowledgment
pub const NLM_F_ACK: u16 = 0x0004;

/// NLA_F_NESTED - attribute carries nested attributes
pub const NLA_F_NESTED: u16 = 0x8000;

/// NLA_F_NET_BYTEORDER - attribute payload is in network byte order
pub const NLA_F_NET_BYTEORDER: u16 = 0x4000;

/// Mask stripping both attribute flags from nla_type
pub const NLA_TYPE_MASK: u16 = !(NLA_F_NESTED | NLA_F_NET_BYTEORDER);

/// Round `len` up to the netlink attribute alignment.
pub const fn nla_align(len: usize) -> usize {
    (len + NLA_ALIGNTO - 1) & !(NLA_ALIGNTO - 1)
}

/// gtp5g generic netlink commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Gtp5gCmd {
    AddPdr = 1,
    AddFar = 2,
    AddQer = 3,
    DelPdr = 4,
    DelFar = 5,
    DelQer = 6,
    GetPdr = 7,
    GetFar = 8,
    GetQer = 9,
    AddUrr = 10,
    AddBar = 11,
    DelUrr = 12,
    DelBar = 13,
    GetUrr = 14,
    GetBar = 15,
    GetReport = 16,
    BufferGtpu = 17,
    GetMultiReports = 18,
    GetUsageStatistic = 19,
}

impl TryFrom<u8> for Gtp5gCmd {
    type Error = Gtp5gError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::AddPdr),
            2 => Ok(Self::AddFar),
            3 => Ok(Self::AddQer),
            4 => Ok(Self::DelPdr),
            5 => Ok(Self::DelFar),
            6 => Ok(Self::DelQer),
            7 => Ok(Self::GetPdr),
            8 => Ok(Self::GetFar),
            9 => Ok(Self::GetQer),
            10 => Ok(Self::AddUrr),
            11 => Ok(Self::AddBar),
            12 => Ok(Self::DelUrr),
            13 => Ok(Self::DelBar),
            14 => Ok(Self::GetUrr),
            15 => Ok(Self::GetBar),
            16 => Ok(Self::GetReport),
            17 => Ok(Self::BufferGtpu),
            18 => Ok(Self::GetMultiReports),
            19 => Ok(Self::GetUsageStatistic),
            _ => Err(Gtp5gError::InvalidCommand(value)),
        }
    }
}

impl Gtp5gCmd {
    /// Get the name of the command
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddPdr => "ADD_PDR",
            Self::AddFar => "ADD_FAR",
            Self::AddQer => "ADD_QER",
            Self::DelPdr => "DEL_PDR",
            Self::DelFar => "DEL_FAR",
            Self::DelQer => "DEL_QER",
            Self::GetPdr => "GET_PDR",
            Self::GetFar => "GET_FAR",
            Self::GetQer => "GET_QER",
            Self::AddUrr => "ADD_URR",
            Self::AddBar => "ADD_BAR",
            Self::DelUrr => "DEL_URR",
            Self::DelBar => "DEL_BAR",
            Self::GetUrr => "GET_URR",
            Self::GetBar => "GET_BAR",
            Self::GetReport => "GET_REPORT",
            Self::BufferGtpu => "BUFFER_GTPU",
            Self::GetMultiReports => "GET_MULTI_REPORTS",
            Self::GetUsageStatistic => "GET_USAGE_STATISTIC",
        }
    }
}

/// gtp5g attribute types used by report retrieval
///
/// The URR attribute space continues the top-level numbering, so `UrrId`
/// starts right after `NetNsFd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Gtp5gAttr {
    Link = 1,
    NetNsFd = 2,
    UrrId = 3,
    UrrMeasurementMethod = 4,
    UrrReportingTrigger = 5,
    UrrMeasurementPeriod = 6,
    UrrMeasurementInfo = 7,
    UrrSeq = 8,
    UrrSeid = 9,
    UrrVolumeThreshold = 10,
    UrrVolumeQuota = 11,
    UrrMultiSeidUrrid = 12,
    UrrNum = 13,
}

impl TryFrom<u16> for Gtp5gAttr {
    type Error = Gtp5gError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value & NLA_TYPE_MASK {
            1 => Ok(Self::Link),
            2 => Ok(Self::NetNsFd),
            3 => Ok(Self::UrrId),
            4 => Ok(Self::UrrMeasurementMethod),
            5 => Ok(Self::UrrReportingTrigger),
            6 => Ok(Self::UrrMeasurementPeriod),
            7 => Ok(Self::UrrMeasurementInfo),
            8 => Ok(Self::UrrSeq),
            9 => Ok(Self::UrrSeid),
            10 => Ok(Self::UrrVolumeThreshold),
            11 => Ok(Self::UrrVolumeQuota),
            12 => Ok(Self::UrrMultiSeidUrrid),
            13 => Ok(Self::UrrNum),
            _ => Err(Gtp5gError::InvalidAttributeType(value)),
        }
    }
}

impl From<Gtp5gAttr> for u16 {
    fn from(attr: Gtp5gAttr) -> Self {
        attr as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nla_align() {
        assert_eq!(nla_align(0), 0);
        assert_eq!(nla_align(1), 4);
        assert_eq!(nla_align(4), 4);
        assert_eq!(nla_align(8), 8);
        assert_eq!(nla_align(12), 12);
        assert_eq!(nla_align(13), 16);
    }

    #[test]
    fn test_cmd_try_from() {
        assert_eq!(Gtp5gCmd::try_from(16).unwrap(), Gtp5gCmd::GetReport);
        assert_eq!(Gtp5gCmd::try_from(18).unwrap(), Gtp5gCmd::GetMultiReports);
        assert_eq!(Gtp5gCmd::try_from(19).unwrap(), Gtp5gCmd::GetUsageStatistic);
        assert!(matches!(
            Gtp5gCmd::try_from(0),
            Err(Gtp5gError::InvalidCommand(0))
        ));
    }

    #[test]
    fn test_attr_try_from_strips_flags() {
        let nested = Gtp5gAttr::UrrMultiSeidUrrid as u16 | NLA_F_NESTED;
        assert_eq!(Gtp5gAttr::try_from(nested).unwrap(), Gtp5gAttr::UrrMultiSeidUrrid);
        assert!(Gtp5gAttr::try_from(200).is_err());
    }

    #[test]
    fn test_flags() {
        assert_eq!(NLM_F_REQUEST | NLM_F_ACK, 0x0005);
        assert_eq!(NLA_TYPE_MASK, 0x3fff);
    }
}
