//! Parsing and matching of range API response bodies.
//!
//! A body is a newline-delimited list of `SUFFIX:COUNT` lines where `SUFFIX` is
//! 35 hex characters in any case and `COUNT` is a decimal occurrence count. When
//! padding is requested the server mixes in decoy lines with a count of 0.
//! Lines that do not have this shape are skipped rather than treated as errors.

use crate::digest::{SUFFIX_LEN, Suffix};

/// One `SUFFIX:COUNT` entry from a range response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub suffix: &'a str,
    pub count: u64,
}

/// Result of parsing a single response line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedLine<'a> {
    Candidate(Candidate<'a>),
    Malformed,
}

/// Totals from scanning a response body for one suffix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Count of the first matching candidate, if any.
    pub matched: Option<u64>,
    /// Non-blank lines looked at before the scan finished.
    pub lines_scanned: usize,
    pub malformed: usize,
}

impl ScanSummary {
    #[inline]
    pub fn occurrence_count(&self) -> u64 {
        self.matched.unwrap_or(0)
    }
}

/// Parses one line of a range response.
pub fn parse_line(line: &str) -> ParsedLine<'_> {
    let Some((suffix, count)) = line.trim().split_once(':') else {
        return ParsedLine::Malformed;
    };

    if suffix.len() != SUFFIX_LEN || !suffix.bytes().all(|c| c.is_ascii_hexdigit()) {
        return ParsedLine::Malformed;
    }

    // u64::from_str accepts a leading '+', the wire format does not
    if count.is_empty() || !count.bytes().all(|c| c.is_ascii_digit()) {
        return ParsedLine::Malformed;
    }

    match count.parse::<u64>() {
        Ok(count) => ParsedLine::Candidate(Candidate { suffix, count }),
        Err(_) => ParsedLine::Malformed,
    }
}

/// Iterates over the parsed non-blank lines of a response body.
///
/// A leading UTF-8 byte order mark is dropped; `trim` does not remove it.
pub fn parse_body(body: &str) -> impl Iterator<Item = ParsedLine<'_>> {
    let body = body.strip_prefix('\u{feff}').unwrap_or(body);
    body.lines().filter(|line| !line.trim().is_empty()).map(parse_line)
}

/// Scans a response body for `suffix`.
///
/// The first matching candidate wins. A well-formed corpus holds at most one
/// entry per digest, so a later duplicate is padding noise or a data anomaly.
pub fn scan(body: &str, suffix: &Suffix) -> ScanSummary {
    let mut summary = ScanSummary::default();

    for parsed in parse_body(body) {
        summary.lines_scanned += 1;
        match parsed {
            ParsedLine::Candidate(candidate) if suffix.matches(candidate.suffix) => {
                summary.matched = Some(candidate.count);
                break;
            }
            ParsedLine::Candidate(_) => {}
            ParsedLine::Malformed => summary.malformed += 1,
        }
    }

    summary
}
