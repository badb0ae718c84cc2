//! Filter and group-by over the record store.
//!
//! Everything here is a pure function of the store and the selector inputs.

use serde::Serialize;
use tracing::debug;

use crate::store::{LaunchRecord, Outcome, RecordStore};
use crate::{PayloadRange, SiteSelector};

/// One named slice of a proportion chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    /// Site name, or outcome label when a single site is selected.
    pub label: String,
    /// Number of records in the slice.
    pub value: u64,
    /// Successful launches among those records.
    pub successes: u64,
    /// `value` divided by the total over all slices.
    pub share: f64,
}

/// Launch counts per site (for [`SiteSelector::All`]) or per outcome (for a
/// single site). An unknown site yields no slices.
pub fn outcome_proportions(store: &RecordStore, site: &SiteSelector) -> Vec<Slice> {
    // (label, value, successes)
    let mut groups: Vec<(String, u64, u64)> = Vec::new();

    match site {
        SiteSelector::All => {
            groups.extend(store.sites().iter().map(|s| (s.clone(), 0, 0)));
            for record in store.records() {
                if let Some(group) = groups.iter_mut().find(|g| g.0 == record.launch_site) {
                    group.1 += 1;
                    group.2 += u64::from(record.outcome.indicator());
                }
            }
        }
        SiteSelector::Site(name) => {
            let mut failures = 0;
            let mut successes = 0;
            for record in store.records().iter().filter(|r| r.launch_site == *name) {
                match record.outcome {
                    Outcome::Failure => failures += 1,
                    Outcome::Success => successes += 1,
                }
            }
            if failures > 0 {
                groups.push((Outcome::Failure.label().to_string(), failures, 0));
            }
            if successes > 0 {
                groups.push((Outcome::Success.label().to_string(), successes, successes));
            }
        }
    }

    let total: u64 = groups.iter().map(|g| g.1).sum();
    debug!(%site, slices = groups.len(), total, "grouped outcomes");

    groups
        .into_iter()
        .map(|(label, value, successes)| Slice {
            label,
            value,
            successes,
            share: value as f64 / total as f64,
        })
        .collect()
}

/// Row-level scatter data, coloured by booster version category.
#[derive(Debug, Clone, PartialEq)]
pub struct PayloadSeries<'a> {
    /// Matching records in store order.
    pub records: Vec<&'a LaunchRecord>,
}

impl<'a> PayloadSeries<'a> {
    /// Colouring key of a record.
    pub fn color_key(record: &LaunchRecord) -> &str {
        &record.booster_version_category
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Records grouped by colouring key, groups in first-appearance order.
    pub fn by_color(&self) -> Vec<(&'a str, Vec<&'a LaunchRecord>)> {
        let mut groups: Vec<(&'a str, Vec<&'a LaunchRecord>)> = Vec::new();
        for &record in &self.records {
            let key = record.booster_version_category.as_str();
            match groups.iter_mut().find(|(k, _)| *k == key) {
                Some((_, members)) => members.push(record),
                None => groups.push((key, vec![record])),
            }
        }
        groups
    }
}

/// Records with payload mass in `range` (inclusive), restricted to `site`
/// unless it is [`SiteSelector::All`].
pub fn payload_outcome_series<'a>(
    store: &'a RecordStore,
    site: &SiteSelector,
    range: &PayloadRange,
) -> PayloadSeries<'a> {
    let records: Vec<&LaunchRecord> = store
        .records()
        .iter()
        .filter(|r| range.contains(r.payload_mass_kg))
        .filter(|r| site.matches(&r.launch_site))
        .collect();
    debug!(%site, %range, matched = records.len(), "filtered payload series");
    PayloadSeries { records }
}
