//! gtp5g Usage Report Client
//!
//! Each call performs one synchronous round trip: build attributes, dispatch,
//! then hand the reply payload to the decoder. Nothing is cached between
//! calls, so the client is as thread-safe as its transport and decoder.

use std::collections::HashMap;

use crate::builder::{
    build_multi_report_attrs, build_report_attrs, build_usage_statistic_attrs,
    oids_from_session_map,
};
use crate::config::ReportClientConfig;
use crate::decode::UsageDecoder;
use crate::dispatch::{AttrListDispatch, Dispatch, RequestKind, RtAttrDispatch};
use crate::error::{Gtp5gError, Gtp5gResult};
use crate::oid::Oid;
use crate::transport::{LinkRef, RawTransport, Transport};

/// Usage report client over a gtp5g netlink transport
#[derive(Debug)]
pub struct ReportClient<T, D> {
    transport: T,
    decoder: D,
    config: ReportClientConfig,
}

impl<T, D> ReportClient<T, D> {
    pub fn new(transport: T, decoder: D) -> Self {
        Self::with_config(transport, decoder, ReportClientConfig::default())
    }

    pub fn with_config(transport: T, decoder: D, config: ReportClientConfig) -> Self {
        Self {
            transport,
            decoder,
            config,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    pub fn config(&self) -> &ReportClientConfig {
        &self.config
    }

    fn decode_reports(&self, payload: &[u8]) -> Gtp5gResult<Vec<D::Report>>
    where
        D: UsageDecoder,
    {
        self.decoder
            .decode_all_usa_reports(payload)
            .map_err(Gtp5gError::decode)
    }
}

impl<T: Transport, D: UsageDecoder> ReportClient<T, D> {
    fn dispatcher(&self) -> AttrListDispatch<&T> {
        AttrListDispatch::new(&self.transport)
            .genl_version(self.config.genl_version)
            .warn_on_extra_responses(self.config.warn_on_extra_responses)
    }

    /// Reports of one URR in one session
    pub fn get_report<L: LinkRef + ?Sized>(
        &self,
        link: &L,
        urr_id: u32,
        seid: u64,
    ) -> Gtp5gResult<Vec<D::Report>> {
        self.get_report_oid(link, Oid::new(urr_id, seid))
    }

    /// Reports of the URR named by `oid`
    ///
    /// The reply uses the multi-report layout even for a single URR.
    pub fn get_report_oid<L: LinkRef + ?Sized>(
        &self,
        link: &L,
        oid: Oid,
    ) -> Gtp5gResult<Vec<D::Report>> {
        let attrs = build_report_attrs(link, &oid)?;
        let payload = self.dispatcher().dispatch(RequestKind::Report, attrs)?;
        self.decode_reports(&payload)
    }

    /// Reports for every (SEID, URR ID) pair of the map
    pub fn get_multi_reports<L: LinkRef + ?Sized>(
        &self,
        link: &L,
        seid_urr_ids: &HashMap<u64, Vec<u32>>,
    ) -> Gtp5gResult<Vec<D::Report>> {
        let oids = oids_from_session_map(seid_urr_ids);
        self.get_multi_reports_oid(link, &oids)
    }

    /// Reports for a batch of OIDs, in the order the kernel emits them
    ///
    /// OIDs without a SEID are counted in URR_NUM but not sent.
    pub fn get_multi_reports_oid<L: LinkRef + ?Sized>(
        &self,
        link: &L,
        oids: &[Oid],
    ) -> Gtp5gResult<Vec<D::Report>> {
        let attrs = build_multi_report_attrs(link, oids)?;
        let payload = self.dispatcher().dispatch(RequestKind::MultiReport, attrs)?;
        self.decode_reports(&payload)
    }

    /// Aggregate usage statistic of the link
    pub fn get_usage_statistic<L: LinkRef + ?Sized>(&self, link: &L) -> Gtp5gResult<D::Statistic> {
        let attrs = build_usage_statistic_attrs(link)?;
        let payload = self
            .dispatcher()
            .dispatch(RequestKind::UsageStatistic, attrs)?;
        self.decoder
            .decode_usage_statistic(&payload)
            .map_err(Gtp5gError::decode)
    }
}

impl<T: RawTransport, D: UsageDecoder> ReportClient<T, D> {
    /// Same request as [`get_multi_reports_oid`](Self::get_multi_reports_oid),
    /// serialized as flat route attributes over the raw transport
    pub fn get_multi_reports_oid_v2<L: LinkRef + ?Sized>(
        &self,
        link: &L,
        oids: &[Oid],
    ) -> Gtp5gResult<Vec<D::Report>> {
        let attrs = build_multi_report_attrs(link, oids)?;
        let payload = RtAttrDispatch::new(&self.transport)
            .genl_version(self.config.genl_version)
            .warn_on_extra_responses(self.config.warn_on_extra_responses)
            .dispatch(RequestKind::MultiReport, attrs)?;
        self.decode_reports(&payload)
    }
}
