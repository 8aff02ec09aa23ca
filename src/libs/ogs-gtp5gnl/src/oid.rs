//! Usage Report Object Identifier
//!
//! An OID names one URR: the rule id plus, optionally, the SEID of the
//! session that owns it. Presence of each part is explicit, so SEID 0 is a
//! valid session and not a stand-in for "no session".

use std::fmt;

/// Composite URR identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Oid {
    urr_id: Option<u32>,
    seid: Option<u64>,
}

impl Oid {
    /// OID for a URR scoped to a session
    pub const fn new(urr_id: u32, seid: u64) -> Self {
        Self {
            urr_id: Some(urr_id),
            seid: Some(seid),
        }
    }

    /// OID for a URR without session scope
    pub const fn urr(urr_id: u32) -> Self {
        Self {
            urr_id: Some(urr_id),
            seid: None,
        }
    }

    pub const fn from_parts(urr_id: Option<u32>, seid: Option<u64>) -> Self {
        Self { urr_id, seid }
    }

    /// URR ID, if present
    pub const fn id(&self) -> Option<u32> {
        self.urr_id
    }

    /// SEID, if present
    pub const fn seid(&self) -> Option<u64> {
        self.seid
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.urr_id {
            Some(id) => write!(f, "urr_id={id}")?,
            None => write!(f, "urr_id=<none>")?,
        }
        match self.seid {
            Some(seid) => write!(f, ",seid={seid}"),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_seid_is_present() {
        let oid = Oid::new(1, 0);
        assert_eq!(oid.id(), Some(1));
        assert_eq!(oid.seid(), Some(0));
    }

    #[test]
    fn test_urr_only() {
        let oid = Oid::urr(5);
        assert_eq!(oid.id(), Some(5));
        assert_eq!(oid.seid(), None);
    }

    #[test]
    fn test_default_is_empty() {
        let oid = Oid::default();
        assert_eq!(oid.id(), None);
        assert_eq!(oid.seid(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Oid::new(3, 9).to_string(), "urr_id=3,seid=9");
        assert_eq!(Oid::urr(3).to_string(), "urr_id=3");
        assert_eq!(Oid::from_parts(None, Some(1)).to_string(), "urr_id=<none>,seid=1");
    }
}
