//! Breached password checking against the Have I Been Pwned range API.
//!
//! Passwords are checked with the k-anonymity range query: the password is
//! hashed with SHA-1, only the first 5 hex characters of the digest are sent to
//! `GET /range/{prefix}`, and the remaining 35 characters are matched locally
//! against the `SUFFIX:COUNT` lines the server returns. The server sees one of
//! 16^5 buckets, each shared by hundreds of corpus entries, and never learns
//! which one was checked.
//!
//! # Usage
//!
//! ```no_run
//! use hibp_range_client::RangeChecker;
//!
//! # async fn run() -> hibp_range_client::Result<()> {
//! let checker = RangeChecker::with_minimum_frequency_and_padding(1, true)?;
//! let verdict = checker.check("password").await?;
//! assert!(verdict.is_pwned);
//! # Ok(())
//! # }
//! ```
//!
//! # Failures
//!
//! A check yields either a [`Verdict`] or an [`Error`]. Transport failures (a
//! status other than 200, connection failure or timeout) are never reported as
//! "not pwned"; see [`Error::is_transport_failure`]. Malformed lines inside a
//! successful response are skipped, since padded responses legitimately carry
//! decoy entries.
//!
//! # Transports
//!
//! [`RangeChecker`] works over any [`RangeTransport`]. With the default
//! `reqwest` feature, [`HttpTransport`] talks to the public API at
//! `https://api.pwnedpasswords.com`. Retries, if wanted, belong in the
//! transport; the checker issues exactly one request per check.
//!
//! # Configuration
//!
//! [`RangeChecker::from_env`] reads:
//!
//! - `HIBP_MIN_FREQUENCY`: minimum occurrence count to consider a password pwned (default 1)
//! - `HIBP_ADD_PADDING`: request padded responses (default false)
//! - `HIBP_API_BASE_URL`: API base address (default `https://api.pwnedpasswords.com`)

pub mod checker;
pub mod digest;
pub mod error;
#[cfg(feature = "reqwest")]
pub mod http;
pub mod options;
pub mod range;
pub mod transport;

pub use checker::{RangeChecker, check_range};
pub use digest::{PREFIX_LEN, Prefix, SUFFIX_LEN, Suffix, split, split_bytes};
pub use error::{Error, Result};
#[cfg(feature = "reqwest")]
pub use http::{DEFAULT_BASE_URL, HttpTransport, HttpTransportBuilder};
pub use options::{LookupOptions, Verdict};
pub use range::{Candidate, ParsedLine};
pub use transport::{RangeResponse, RangeTransport};
