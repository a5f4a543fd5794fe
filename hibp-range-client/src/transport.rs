//! The narrow capability the checker needs from an HTTP client.
//!
//! Base address, headers, connection pooling, TLS and retry policy all belong to
//! the transport. The checker only asks for the body of `/range/{prefix}`.

use std::future::Future;

use crate::digest::Prefix;
use crate::error::Result;

/// Header asking the range API to pad its response with decoy entries.
pub const ADD_PADDING_HEADER: &str = "Add-Padding";

/// Raw reply to a range request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeResponse {
    pub status: u16,
    pub body: String,
}

impl RangeResponse {
    /// A `200 OK` response carrying `body`.
    pub fn ok(body: impl Into<String>) -> Self {
        Self { status: 200, body: body.into() }
    }

    /// The range API answers `200 OK`. Any other status, including other 2xx
    /// codes from proxies or caches, is a failed lookup.
    #[inline]
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Issues `GET {base}/range/{prefix}` requests.
///
/// Implementations must be safe to call concurrently; the checker shares one
/// transport across all checks. Connection failures and timeouts are returned
/// as errors. Statuses other than 200 may be returned as a [`RangeResponse`]
/// and are rejected by the checker.
pub trait RangeTransport {
    fn fetch_range(
        &self,
        prefix: &Prefix,
        add_padding: bool,
    ) -> impl Future<Output = Result<RangeResponse>> + Send;
}

impl<T: RangeTransport> RangeTransport for &T {
    fn fetch_range(
        &self,
        prefix: &Prefix,
        add_padding: bool,
    ) -> impl Future<Output = Result<RangeResponse>> + Send {
        (**self).fetch_range(prefix, add_padding)
    }
}
