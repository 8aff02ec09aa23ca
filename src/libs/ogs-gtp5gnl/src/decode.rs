//! Usage Record Decoding Interface
//!
//! Usage report and usage statistic layouts belong to the decoder; the
//! client only hands over the payload that follows the genl header.

/// Decoder for gtp5g report and statistic payloads
pub trait UsageDecoder {
    type Report;
    type Statistic;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Decode every usage report carried in one reply payload
    fn decode_all_usa_reports(&self, payload: &[u8]) -> Result<Vec<Self::Report>, Self::Error>;

    /// Decode the usage statistic carried in one reply payload
    fn decode_usage_statistic(&self, payload: &[u8]) -> Result<Self::Statistic, Self::Error>;
}

impl<D: UsageDecoder + ?Sized> UsageDecoder for &D {
    type Report = D::Report;
    type Statistic = D::Statistic;
    type Error = D::Error;

    fn decode_all_usa_reports(&self, payload: &[u8]) -> Result<Vec<Self::Report>, Self::Error> {
        (**self).decode_all_usa_reports(payload)
    }

    fn decode_usage_statistic(&self, payload: &[u8]) -> Result<Self::Statistic, Self::Error> {
        (**self).decode_usage_statistic(payload)
    }
}
