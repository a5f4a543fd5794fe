use tracing::{debug, warn};

use crate::digest::{self, Prefix, Suffix};
use crate::error::{Error, Result};
use crate::options::{LookupOptions, Verdict};
use crate::range;
use crate::transport::RangeTransport;

#[cfg(feature = "reqwest")]
use crate::http::{HttpTransport, HttpTransportBuilder};

/// Checks passwords against the range API through a caller-supplied transport.
///
/// Holds no per-check state, so one checker can serve concurrent checks as long
/// as the transport can.
#[derive(Debug, Clone)]
pub struct RangeChecker<T> {
    transport: T,
    options: LookupOptions,
}

impl<T: RangeTransport> RangeChecker<T> {
    pub fn new(transport: T, options: LookupOptions) -> Self {
        Self { transport, options }
    }

    pub fn options(&self) -> &LookupOptions {
        &self.options
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Checks if the given password has been found in a data breach.
    ///
    /// Only the first five hex characters of the password's SHA-1 are sent.
    /// Returns an error if the range request failed; that is never reported as
    /// "not pwned".
    pub async fn check(&self, password: &str) -> Result<Verdict> {
        let (prefix, suffix) = digest::split(password);
        check_range(&prefix, &suffix, &self.options, &self.transport).await
    }

    /// Same as [`check`](Self::check) for passwords that are not valid UTF-8.
    pub async fn check_bytes(&self, password: &[u8]) -> Result<Verdict> {
        let (prefix, suffix) = digest::split_bytes(password);
        check_range(&prefix, &suffix, &self.options, &self.transport).await
    }

    /// Checks a precomputed SHA-1 given as 40 hex characters.
    pub async fn check_sha1_hex(&self, sha1_hex: &str) -> Result<Verdict> {
        let (prefix, suffix) = digest::split_hex(sha1_hex).ok_or_else(|| {
            Error::InvalidHash(format!(
                "expected {} hex characters, got {} characters",
                digest::DIGEST_HEX_LEN,
                sha1_hex.len()
            ))
        })?;
        check_range(&prefix, &suffix, &self.options, &self.transport).await
    }

    pub async fn is_pwned(&self, password: &str) -> Result<bool> {
        Ok(self.check(password).await?.is_pwned)
    }

    /// Number of times the password appears in the corpus, regardless of the
    /// configured threshold.
    pub async fn occurrence_count(&self, password: &str) -> Result<u64> {
        Ok(self.check(password).await?.occurrence_count)
    }
}

#[cfg(feature = "reqwest")]
impl RangeChecker<HttpTransport> {
    /// Checker for the public API with default options.
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::new(HttpTransport::new()?, LookupOptions::default()))
    }

    /// Checker for the public API that only reports passwords seen at least
    /// `minimum_frequency` times. For example, 20 ignores passwords seen fewer
    /// than 20 times.
    pub fn with_minimum_frequency(minimum_frequency: u64) -> Result<Self> {
        Self::with_minimum_frequency_and_padding(minimum_frequency, false)
    }

    pub fn with_minimum_frequency_and_padding(
        minimum_frequency: u64,
        add_padding: bool,
    ) -> Result<Self> {
        let options = LookupOptions::new(minimum_frequency, add_padding)?;
        Ok(Self::new(HttpTransport::new()?, options))
    }

    /// Builds both the transport and the options from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let options = LookupOptions::from_lookup(&lookup)?;
        Ok(Self::new(HttpTransportBuilder::from_lookup(&lookup).build()?, options))
    }
}

/// Runs one range lookup for an already split digest.
///
/// Requests the range for `prefix`, scans the body for `suffix` and applies the
/// threshold from `options`.
#[tracing::instrument(level = "debug", skip_all, fields(prefix = %prefix))]
pub async fn check_range<T: RangeTransport>(
    prefix: &Prefix,
    suffix: &Suffix,
    options: &LookupOptions,
    transport: &T,
) -> Result<Verdict> {
    let response = transport.fetch_range(prefix, options.add_padding()).await?;
    if !response.is_ok() {
        warn!(status = response.status, "range lookup failed");
        return Err(Error::HttpStatus { prefix: *prefix, status: response.status });
    }

    let summary = range::scan(&response.body, suffix);
    if summary.malformed > 0 {
        debug!(malformed = summary.malformed, "skipped malformed range lines");
    }

    let verdict = options.verdict(summary.occurrence_count());
    debug!(lines = summary.lines_scanned, is_pwned = verdict.is_pwned, "range check complete");

    Ok(verdict)
}
