//! Chart specifications produced from engine output.
//!
//! These are plain data: the web front end converts them into Plotly figures,
//! the native front end paints them with egui.

use serde::Serialize;

use crate::engine::{self, PayloadSeries, Slice};
use crate::store::{LaunchRecord, RecordStore};
use crate::{PayloadRange, SiteSelector};

pub const PAYLOAD_AXIS_LABEL: &str = "Payload Mass (kg)";
pub const OUTCOME_AXIS_LABEL: &str = "class";
pub const COLOR_LEGEND_TITLE: &str = "Booster Version Category";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Pie(PieChart),
    Scatter(ScatterChart),
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Pie(chart) => &chart.title,
            ChartSpec::Scatter(chart) => &chart.title,
        }
    }
}

/// Proportion chart of launch outcomes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<Slice>,
}

impl PieChart {
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

/// Payload vs. outcome scatter, one series per booster version category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend_title: String,
    pub series: Vec<ScatterSeries>,
}

impl ScatterChart {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    /// Booster version category.
    pub name: String,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    /// Outcome indicator, `0` or `1`.
    pub class: u8,
    /// Hover text.
    pub label: String,
}

impl ScatterPoint {
    fn from_record(record: &LaunchRecord) -> Self {
        let mut label = record.launch_site.clone();
        if let Some(flight) = record.flight_number {
            label = format!("Flight {flight}, {label}");
        }
        if let Some(booster) = &record.booster_version {
            label.push_str(" (");
            label.push_str(booster);
            label.push(')');
        }
        Self {
            payload_mass_kg: record.payload_mass_kg,
            class: record.outcome.indicator(),
            label,
        }
    }
}

pub fn outcome_chart_title(site: &SiteSelector) -> String {
    match site {
        SiteSelector::All => "Total Success Launches By Site".to_string(),
        SiteSelector::Site(name) => format!("Total Success Launches for site {name}"),
    }
}

pub fn payload_chart_title(site: &SiteSelector) -> String {
    match site {
        SiteSelector::All => "Correlation between Payload and Success for all Sites".to_string(),
        SiteSelector::Site(name) => {
            format!("Correlation between Payload and Success for site {name}")
        }
    }
}

/// Outcome proportions for `site` as a pie chart.
pub fn render_outcome_chart(store: &RecordStore, site: &SiteSelector) -> PieChart {
    PieChart {
        title: outcome_chart_title(site),
        slices: engine::outcome_proportions(store, site),
    }
}

/// Payload/outcome scatter for `site` within `range`. An empty selection
/// produces a chart with no series.
pub fn render_payload_chart(
    store: &RecordStore,
    site: &SiteSelector,
    range: &PayloadRange,
) -> ScatterChart {
    let series = engine::payload_outcome_series(store, site, range);
    ScatterChart {
        title: payload_chart_title(site),
        x_label: PAYLOAD_AXIS_LABEL.to_string(),
        y_label: OUTCOME_AXIS_LABEL.to_string(),
        legend_title: COLOR_LEGEND_TITLE.to_string(),
        series: scatter_series(&series),
    }
}

fn scatter_series(series: &PayloadSeries<'_>) -> Vec<ScatterSeries> {
    series
        .by_color()
        .into_iter()
        .map(|(name, records)| ScatterSeries {
            name: name.to_string(),
            points: records.into_iter().map(ScatterPoint::from_record).collect(),
        })
        .collect()
}
