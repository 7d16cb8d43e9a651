use std::ops::RangeInclusive;

use crate::error::ValidationError;

use super::Outcome;

const MIN_STATUS: u16 = 100;
const MAX_STATUS: u16 = 999;

/// Status codes that count as a successful attempt.
///
/// Anything outside the configured ranges is a server error; transport
/// failures never reach the policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPolicy {
    ranges: Vec<RangeInclusive<u16>>,
}

impl StatusPolicy {
    /// Build a policy from inclusive ranges.
    ///
    /// # Errors
    ///
    /// Returns an error when no ranges are given, a bound lies outside
    /// 100-999, or a range is reversed.
    pub fn new(ranges: Vec<RangeInclusive<u16>>) -> Result<Self, ValidationError> {
        if ranges.is_empty() {
            return Err(ValidationError::StatusPolicyEmpty);
        }
        for range in &ranges {
            for code in [*range.start(), *range.end()] {
                if !(MIN_STATUS..=MAX_STATUS).contains(&code) {
                    return Err(ValidationError::StatusCodeOutOfRange { code });
                }
            }
            if range.start() > range.end() {
                return Err(ValidationError::StatusRangeStartAfterEnd {
                    value: format!("{}-{}", range.start(), range.end()),
                });
            }
        }
        Ok(Self { ranges })
    }

    #[must_use]
    pub fn is_success(&self, status: u16) -> bool {
        self.ranges.iter().any(|range| range.contains(&status))
    }

    #[must_use]
    pub fn classify(&self, status: u16) -> Outcome {
        if self.is_success(status) {
            Outcome::Success
        } else {
            Outcome::ServerError
        }
    }
}

impl Default for StatusPolicy {
    fn default() -> Self {
        Self {
            ranges: vec![200..=399],
        }
    }
}

impl std::str::FromStr for StatusPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut ranges = Vec::new();
        for entry in s.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
            ranges.push(parse_range(entry)?);
        }
        Self::new(ranges)
    }
}

fn parse_range(entry: &str) -> Result<RangeInclusive<u16>, ValidationError> {
    let (start, end) = match entry.split_once('-') {
        Some((start, end)) => (start.trim(), end.trim()),
        None => (entry, entry),
    };
    if start.is_empty() || end.is_empty() {
        return Err(ValidationError::InvalidStatusRange {
            value: entry.to_owned(),
        });
    }
    let parse = |value: &str| {
        value
            .parse::<u16>()
            .map_err(|err| ValidationError::InvalidStatusCode {
                value: entry.to_owned(),
                source: err,
            })
    };
    Ok(parse(start)?..=parse(end)?)
}

impl std::fmt::Display for StatusPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (idx, range) in self.ranges.iter().enumerate() {
            if idx > 0 {
                f.write_str(",")?;
            }
            if range.start() == range.end() {
                write!(f, "{}", range.start())?;
            } else {
                write!(f, "{}-{}", range.start(), range.end())?;
            }
        }
        Ok(())
    }
}
