//! Static page description: heading, controls and chart regions.

use serde::Serialize;

use crate::controller::{ChartId, ControlId};
use crate::store::RecordStore;
use crate::{PayloadRange, SiteSelector};

pub const DASHBOARD_TITLE: &str = "SpaceX Launch Records Dashboard";
pub const SITE_PLACEHOLDER: &str = "Select a Launch Site here";
pub const PAYLOAD_LABEL: &str = "Payload range (Kg):";

/// Slider step in kilograms.
pub const PAYLOAD_STEP: f64 = 1000.0;
/// Spacing of labelled slider marks in kilograms.
pub const PAYLOAD_MARK_INTERVAL: f64 = 2500.0;
/// Upper end of the slider domain unless the data goes beyond it.
pub const PAYLOAD_DOMAIN_MAX: f64 = 10_000.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteOption {
    pub label: String,
    pub value: SiteSelector,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropdownSpec {
    pub id: ControlId,
    pub options: Vec<SiteOption>,
    pub value: SiteSelector,
    pub placeholder: String,
    pub searchable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderSpec {
    pub id: ControlId,
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub marks: Vec<f64>,
    /// Initial selection, the observed payload bounds.
    pub value: PayloadRange,
}

impl SliderSpec {
    pub fn domain(&self) -> PayloadRange {
        PayloadRange { low: self.min, high: self.max }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardLayout {
    pub title: String,
    pub site_dropdown: DropdownSpec,
    pub payload_slider: SliderSpec,
    /// Chart regions in page order.
    pub charts: Vec<ChartId>,
}

impl DashboardLayout {
    /// Build the layout for `store`. Site options come from the data.
    pub fn from_store(store: &RecordStore) -> Self {
        let mut options = vec![SiteOption {
            label: "All Sites".to_string(),
            value: SiteSelector::All,
        }];
        options.extend(store.sites().iter().map(|site| SiteOption {
            label: site.clone(),
            value: SiteSelector::site(site.as_str()),
        }));

        let domain = slider_domain(store);
        let marks = mark_positions(domain.high());

        Self {
            title: DASHBOARD_TITLE.to_string(),
            site_dropdown: DropdownSpec {
                id: ControlId::SiteDropdown,
                options,
                value: SiteSelector::All,
                placeholder: SITE_PLACEHOLDER.to_string(),
                searchable: true,
            },
            payload_slider: SliderSpec {
                id: ControlId::PayloadSlider,
                label: PAYLOAD_LABEL.to_string(),
                min: domain.low(),
                max: domain.high(),
                step: PAYLOAD_STEP,
                marks,
                value: store.payload_bounds(),
            },
            charts: vec![ChartId::SuccessPieChart, ChartId::SuccessPayloadScatterChart],
        }
    }
}

/// Selectable payload domain: `0..=10000` kg, widened to the next step when
/// the heaviest observed payload exceeds it.
pub fn slider_domain(store: &RecordStore) -> PayloadRange {
    let observed_max = store.payload_bounds().high();
    let max = if observed_max > PAYLOAD_DOMAIN_MAX {
        (observed_max / PAYLOAD_STEP).ceil() * PAYLOAD_STEP
    } else {
        PAYLOAD_DOMAIN_MAX
    };
    PayloadRange { low: 0.0, high: max }
}

fn mark_positions(max: f64) -> Vec<f64> {
    let count = (max / PAYLOAD_MARK_INTERVAL).floor() as usize;
    (0..=count).map(|i| i as f64 * PAYLOAD_MARK_INTERVAL).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{LaunchRecord, Outcome};
    use pretty_assertions::assert_eq;

    fn store_with_max(max: f64) -> RecordStore {
        RecordStore::from_records(vec![
            LaunchRecord::new("CCAFS LC-40", 0.0, Outcome::Failure, "v1.0"),
            LaunchRecord::new("KSC LC-39A", max, Outcome::Success, "FT"),
        ])
        .unwrap()
    }

    #[test]
    fn test_site_options_follow_data() {
        let layout = DashboardLayout::from_store(&store_with_max(9600.0));
        let labels: Vec<&str> = layout
            .site_dropdown
            .options
            .iter()
            .map(|o| o.label.as_str())
            .collect();
        assert_eq!(labels, vec!["All Sites", "CCAFS LC-40", "KSC LC-39A"]);
        assert_eq!(layout.site_dropdown.options[0].value, SiteSelector::All);
        assert_eq!(layout.site_dropdown.value, SiteSelector::All);
    }

    #[test]
    fn test_slider_keeps_historical_domain() {
        let layout = DashboardLayout::from_store(&store_with_max(9600.0));
        let slider = &layout.payload_slider;
        assert_eq!((slider.min, slider.max, slider.step), (0.0, 10_000.0, 1000.0));
        assert_eq!(slider.marks, vec![0.0, 2500.0, 5000.0, 7500.0, 10_000.0]);
        assert_eq!(slider.value, PayloadRange::new(0.0, 9600.0).unwrap());
    }

    #[test]
    fn test_slider_domain_widens_for_heavy_payloads() {
        let store = store_with_max(15_600.0);
        assert_eq!(slider_domain(&store).high(), 16_000.0);
        let layout = DashboardLayout::from_store(&store);
        assert!(layout.payload_slider.domain().contains(15_600.0));
        assert_eq!(layout.payload_slider.marks.last(), Some(&15_000.0));
    }
}
