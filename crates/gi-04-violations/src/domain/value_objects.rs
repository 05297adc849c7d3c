//! Value objects for the violation store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Violation identifier: `NONGI` followed by a zero-padded sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ViolationId(u32);

impl ViolationId {
    pub const PREFIX: &'static str = "NONGI";

    pub fn new(sequence: u32) -> Self {
        Self(sequence)
    }

    pub fn sequence(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ViolationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", Self::PREFIX, self.0)
    }
}

impl FromStr for ViolationId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix(Self::PREFIX)
            .filter(|d| d.len() >= 3 && d.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|d| d.parse::<u32>().ok())
            .filter(|seq| *seq > 0)
            .map(Self)
            .ok_or_else(|| format!("malformed violation id '{}'", s))
    }
}

impl TryFrom<String> for ViolationId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ViolationId> for String {
    fn from(id: ViolationId) -> Self {
        id.to_string()
    }
}

/// Kind of misuse being reported. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationType {
    TrademarkInfringement,
    GeographicalMisuse,
    QualityViolation,
    UnauthorizedUse,
    FalseAdvertising,
    CounterfeitProducts,
}

impl ViolationType {
    pub const ALL: [ViolationType; 6] = [
        ViolationType::TrademarkInfringement,
        ViolationType::GeographicalMisuse,
        ViolationType::QualityViolation,
        ViolationType::UnauthorizedUse,
        ViolationType::FalseAdvertising,
        ViolationType::CounterfeitProducts,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationType::TrademarkInfringement => "trademark_infringement",
            ViolationType::GeographicalMisuse => "geographical_misuse",
            ViolationType::QualityViolation => "quality_violation",
            ViolationType::UnauthorizedUse => "unauthorized_use",
            ViolationType::FalseAdvertising => "false_advertising",
            ViolationType::CounterfeitProducts => "counterfeit_products",
        }
    }

    /// Upper-case label, e.g. `TRADEMARK INFRINGEMENT`.
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ").to_uppercase()
    }
}

impl fmt::Display for ViolationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViolationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| format!("unknown violation type '{}'", wanted))
    }
}
