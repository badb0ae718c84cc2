use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{DashError, Result};
use crate::{PayloadRange, SelectorState, SiteSelector, ALL_SITES};

/// Binary launch outcome, stored as the `class` column (`0` or `1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    pub fn from_indicator(class: u8) -> Option<Self> {
        match class {
            0 => Some(Self::Failure),
            1 => Some(Self::Success),
            _ => None,
        }
    }

    /// `1` for success, `0` for failure.
    pub fn indicator(self) -> u8 {
        match self {
            Self::Failure => 0,
            Self::Success => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Failure => "failure",
            Self::Success => "success",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the launch table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchRecord {
    pub flight_number: Option<u32>,
    pub launch_site: String,
    /// Payload mass in kilograms. Finite and non-negative.
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_version: Option<String>,
    pub booster_version_category: String,
}

impl LaunchRecord {
    pub fn new(
        launch_site: impl Into<String>,
        payload_mass_kg: f64,
        outcome: Outcome,
        booster_version_category: impl Into<String>,
    ) -> Self {
        Self {
            flight_number: None,
            launch_site: launch_site.into(),
            payload_mass_kg,
            outcome,
            booster_version: None,
            booster_version_category: booster_version_category.into(),
        }
    }

    fn check(&self, row: usize) -> Result<()> {
        let invalid = |reason: String| DashError::InvalidRecord { row, reason };

        if self.launch_site.trim().is_empty() {
            return Err(invalid("launch site is empty".into()));
        }
        if self.launch_site == ALL_SITES {
            return Err(invalid(format!(
                "launch site `{ALL_SITES}` collides with the all-sites selector"
            )));
        }
        if !self.payload_mass_kg.is_finite() || self.payload_mass_kg < 0.0 {
            return Err(invalid(format!(
                "payload mass {} kg is not a finite non-negative number",
                self.payload_mass_kg
            )));
        }
        Ok(())
    }
}

/// Column layout of the launch CSV. Columns not named here are ignored.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Flight Number", default)]
    flight_number: Option<u32>,
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    class: u8,
    #[serde(rename = "Booster Version", default)]
    booster_version: Option<String>,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: String,
}

impl CsvRow {
    fn into_record(self, row: usize) -> Result<LaunchRecord> {
        let outcome = Outcome::from_indicator(self.class).ok_or_else(|| DashError::InvalidRecord {
            row,
            reason: format!("class must be 0 or 1, got {}", self.class),
        })?;
        Ok(LaunchRecord {
            flight_number: self.flight_number,
            launch_site: self.launch_site,
            payload_mass_kg: self.payload_mass_kg,
            outcome,
            booster_version: self.booster_version.filter(|v| !v.is_empty()),
            booster_version_category: self.booster_version_category,
        })
    }
}

/// Immutable launch table, loaded once and then shared read-only.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Vec<LaunchRecord>,
    /// Distinct sites in first-appearance order.
    sites: Vec<String>,
    payload_bounds: PayloadRange,
}

impl RecordStore {
    /// Load the launch CSV at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DashError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            records = store.len(),
            sites = store.sites.len(),
            "loaded launch records"
        );
        Ok(store)
    }

    /// Parse launch records from any CSV source with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut records = Vec::new();
        for (idx, row) in csv.deserialize::<CsvRow>().enumerate() {
            records.push(row?.into_record(idx + 1)?);
        }
        Self::from_records(records)
    }

    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self> {
        let first = records.first().ok_or(DashError::EmptyStore)?;
        let mut min = first.payload_mass_kg;
        let mut max = first.payload_mass_kg;
        let mut sites: Vec<String> = Vec::new();

        for (idx, record) in records.iter().enumerate() {
            record.check(idx + 1)?;
            min = min.min(record.payload_mass_kg);
            max = max.max(record.payload_mass_kg);
            if !sites.iter().any(|s| *s == record.launch_site) {
                sites.push(record.launch_site.clone());
            }
        }
        debug!(min, max, ?sites, "indexed launch records");

        Ok(Self {
            records,
            sites,
            payload_bounds: PayloadRange::new(min, max)?,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    /// Observed minimum and maximum payload mass.
    pub fn payload_bounds(&self) -> PayloadRange {
        self.payload_bounds
    }

    /// Every site, full observed payload range.
    pub fn default_selection(&self) -> SelectorState {
        SelectorState {
            site: SiteSelector::All,
            payload: self.payload_bounds,
        }
    }
}
