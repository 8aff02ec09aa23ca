//! Report Request Attribute Builders
//!
//! Turns a link and one or more OIDs into the ordered attribute list of a
//! gtp5g report request.

use std::collections::HashMap;

use crate::attr::Attr;
use crate::error::{Gtp5gError, Gtp5gResult};
use crate::oid::Oid;
use crate::transport::LinkRef;
use crate::types::Gtp5gAttr;

/// LINK attribute; negative interface indexes are rejected
pub fn link_attr<L: LinkRef + ?Sized>(link: &L) -> Gtp5gResult<Attr> {
    let index = link.index();
    let index = u32::try_from(index).map_err(|_| {
        log::warn!("Rejecting negative link index {}", index);
        Gtp5gError::EncodingError(format!("invalid link index: {index}"))
    })?;
    Ok(Attr::u32(Gtp5gAttr::Link, index))
}

fn require_id(oid: &Oid) -> Gtp5gResult<u32> {
    oid.id().ok_or(Gtp5gError::InvalidIdentifier { oid: *oid })
}

/// GET_REPORT attributes: LINK, URR_ID and, when the OID has one, URR_SEID
pub fn build_report_attrs<L: LinkRef + ?Sized>(link: &L, oid: &Oid) -> Gtp5gResult<Vec<Attr>> {
    let urr_id = require_id(oid)?;

    let mut attrs = vec![link_attr(link)?, Attr::u32(Gtp5gAttr::UrrId, urr_id)];
    if let Some(seid) = oid.seid() {
        attrs.push(Attr::u64(Gtp5gAttr::UrrSeid, seid));
    }
    Ok(attrs)
}

/// One URR_MULTI_SEID_URRID entry
pub fn multi_entry_attr(urr_id: u32, seid: u64) -> Attr {
    Attr::nested(
        Gtp5gAttr::UrrMultiSeidUrrid,
        vec![
            Attr::u32(Gtp5gAttr::UrrId, urr_id),
            Attr::u64(Gtp5gAttr::UrrSeid, seid),
        ],
    )
}

/// GET_MULTI_REPORTS attributes
///
/// URR_NUM carries `oids.len()`. OIDs without a SEID are counted there but
/// produce no entry, so URR_NUM may exceed the number of entries.
pub fn build_multi_report_attrs<L: LinkRef + ?Sized>(
    link: &L,
    oids: &[Oid],
) -> Gtp5gResult<Vec<Attr>> {
    let mut entries = Vec::with_capacity(oids.len());
    for oid in oids {
        let urr_id = require_id(oid)?;
        match oid.seid() {
            Some(seid) => entries.push(multi_entry_attr(urr_id, seid)),
            None => log::trace!("OID {} has no SEID, not encoded", oid),
        }
    }

    let num = u32::try_from(oids.len()).map_err(|_| {
        Gtp5gError::EncodingError(format!("too many OIDs: {}", oids.len()))
    })?;

    let mut attrs = Vec::with_capacity(entries.len() + 2);
    attrs.push(link_attr(link)?);
    attrs.push(Attr::u32(Gtp5gAttr::UrrNum, num));
    attrs.extend(entries);
    Ok(attrs)
}

/// GET_USAGE_STATISTIC attributes: LINK only
pub fn build_usage_statistic_attrs<L: LinkRef + ?Sized>(link: &L) -> Gtp5gResult<Vec<Attr>> {
    Ok(vec![link_attr(link)?])
}

/// Expand SEID -> URR IDs into one OID per pair (map order is unspecified)
pub fn oids_from_session_map(seid_urr_ids: &HashMap<u64, Vec<u32>>) -> Vec<Oid> {
    seid_urr_ids
        .iter()
        .flat_map(|(&seid, urr_ids)| urr_ids.iter().map(move |&urr_id| Oid::new(urr_id, seid)))
        .collect()
}
