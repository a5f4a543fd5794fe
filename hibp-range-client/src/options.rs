//! Lookup options and the occurrence threshold policy.

use std::num::NonZeroU64;

use crate::error::{Error, Result};

/// Environment variable overriding the minimum occurrence count.
pub const MIN_FREQUENCY_ENV: &str = "HIBP_MIN_FREQUENCY";

/// Environment variable enabling response padding (`true`/`false`, `1`/`0`).
pub const ADD_PADDING_ENV: &str = "HIBP_ADD_PADDING";

/// Any appearance in the corpus counts as pwned by default.
pub const DEFAULT_MINIMUM_FREQUENCY: u64 = 1;

/// The outcome of a range check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub is_pwned: bool,
    /// How many times the digest appears in the corpus (0 when absent).
    pub occurrence_count: u64,
}

/// Immutable per-check configuration, validated on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupOptions {
    minimum_frequency: NonZeroU64,
    add_padding: bool,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self { minimum_frequency: NonZeroU64::MIN, add_padding: false }
    }
}

impl LookupOptions {
    /// Creates options with the given threshold and padding setting.
    ///
    /// A threshold of 0 would classify every password as pwned and is rejected.
    pub fn new(minimum_frequency_to_consider_pwned: u64, add_padding: bool) -> Result<Self> {
        let minimum_frequency = NonZeroU64::new(minimum_frequency_to_consider_pwned)
            .ok_or_else(|| {
                Error::InvalidConfiguration(
                    "minimum frequency to consider pwned must be at least 1".to_string(),
                )
            })?;

        Ok(Self { minimum_frequency, add_padding })
    }

    /// Reads options from `HIBP_MIN_FREQUENCY` and `HIBP_ADD_PADDING`,
    /// falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let minimum_frequency = match lookup(MIN_FREQUENCY_ENV) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                Error::InvalidConfiguration(format!("{MIN_FREQUENCY_ENV}={raw:?} is not an integer"))
            })?,
            None => DEFAULT_MINIMUM_FREQUENCY,
        };

        let add_padding = match lookup(ADD_PADDING_ENV) {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                Error::InvalidConfiguration(format!("{ADD_PADDING_ENV}={raw:?} is not a boolean"))
            })?,
            None => false,
        };

        Self::new(minimum_frequency, add_padding)
    }

    pub fn with_padding(mut self, add_padding: bool) -> Self {
        self.add_padding = add_padding;
        self
    }

    #[inline]
    pub fn minimum_frequency_to_consider_pwned(&self) -> u64 {
        self.minimum_frequency.get()
    }

    #[inline]
    pub fn add_padding(&self) -> bool {
        self.add_padding
    }

    /// Applies the threshold to an occurrence count.
    #[inline]
    pub fn verdict(&self, occurrence_count: u64) -> Verdict {
        Verdict {
            is_pwned: occurrence_count >= self.minimum_frequency.get(),
            occurrence_count,
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
