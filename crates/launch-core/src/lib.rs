pub mod charts;
pub mod controller;
pub mod engine;
pub mod error;
pub mod layout;
pub mod store;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use error::{DashError, Result};
pub use store::{LaunchRecord, Outcome, RecordStore};

/// Selector value meaning "every launch site".
pub const ALL_SITES: &str = "ALL";

// ---------------------------------------------------------------------------
// Shared interface types: both front ends build against these
// ---------------------------------------------------------------------------

/// Value of the launch-site dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SiteSelector {
    /// Every site in the store.
    #[default]
    All,
    /// A single site, matched by exact name. Unknown names match nothing.
    Site(String),
}

impl SiteSelector {
    pub fn site(name: impl Into<String>) -> Self {
        Self::from(name.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Whether a record launched from `site` passes this selector.
    pub fn matches(&self, site: &str) -> bool {
        match self {
            Self::All => true,
            Self::Site(name) => name == site,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_SITES,
            Self::Site(name) => name,
        }
    }
}

impl From<String> for SiteSelector {
    fn from(value: String) -> Self {
        if value == ALL_SITES {
            Self::All
        } else {
            Self::Site(value)
        }
    }
}

impl From<SiteSelector> for String {
    fn from(value: SiteSelector) -> Self {
        match value {
            SiteSelector::All => ALL_SITES.to_string(),
            SiteSelector::Site(name) => name,
        }
    }
}

impl FromStr for SiteSelector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl fmt::Display for SiteSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed payload-mass interval in kilograms. Always `low <= high`, both finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct PayloadRange {
    low: f64,
    high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Result<Self> {
        if !low.is_finite() || !high.is_finite() {
            return Err(DashError::InvalidRange {
                low,
                high,
                reason: "bounds must be finite",
            });
        }
        if low > high {
            return Err(DashError::InvalidRange {
                low,
                high,
                reason: "low bound exceeds high bound",
            });
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    /// Inclusive on both ends.
    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        payload_mass_kg >= self.low && payload_mass_kg <= self.high
    }

    /// Clamp both bounds into `domain`. The result still satisfies `low <= high`.
    pub fn clamp_to(&self, domain: &PayloadRange) -> PayloadRange {
        PayloadRange {
            low: self.low.clamp(domain.low, domain.high),
            high: self.high.clamp(domain.low, domain.high),
        }
    }
}

impl TryFrom<[f64; 2]> for PayloadRange {
    type Error = DashError;

    fn try_from([low, high]: [f64; 2]) -> Result<Self> {
        Self::new(low, high)
    }
}

impl From<PayloadRange> for [f64; 2] {
    fn from(range: PayloadRange) -> Self {
        [range.low, range.high]
    }
}

impl fmt::Display for PayloadRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}] kg", self.low, self.high)
    }
}

/// Current (site, payload range) pair chosen by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorState {
    pub site: SiteSelector,
    pub payload: PayloadRange,
}
