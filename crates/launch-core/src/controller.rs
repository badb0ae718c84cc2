//! Reactive bindings between controls and charts.
//!
//! The dispatch table maps each chart to the controls it reads. A control
//! change updates the selector state and synchronously re-renders every chart
//! bound to that control, nothing else.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::charts::{self, ChartSpec};
use crate::layout;
use crate::store::RecordStore;
use crate::{PayloadRange, SelectorState, SiteSelector};

/// User-facing controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlId {
    SiteDropdown,
    PayloadSlider,
}

impl ControlId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SiteDropdown => "site-dropdown",
            Self::PayloadSlider => "payload-slider",
        }
    }
}

/// Chart regions on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartId {
    SuccessPieChart,
    SuccessPayloadScatterChart,
}

impl ChartId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SuccessPieChart => "success-pie-chart",
            Self::SuccessPayloadScatterChart => "success-payload-scatter-chart",
        }
    }
}

/// A single user input.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    SiteSelected(SiteSelector),
    PayloadRangeChanged(PayloadRange),
}

impl ControlEvent {
    pub fn source(&self) -> ControlId {
        match self {
            Self::SiteSelected(_) => ControlId::SiteDropdown,
            Self::PayloadRangeChanged(_) => ControlId::PayloadSlider,
        }
    }
}

type RenderFn = fn(&RecordStore, &SelectorState) -> ChartSpec;

/// One row of the dispatch table.
#[derive(Debug, Clone, Copy)]
pub struct Binding {
    pub output: ChartId,
    pub inputs: &'static [ControlId],
    render: RenderFn,
}

impl Binding {
    pub fn reads(&self, control: ControlId) -> bool {
        self.inputs.contains(&control)
    }
}

fn render_outcome(store: &RecordStore, state: &SelectorState) -> ChartSpec {
    ChartSpec::Pie(charts::render_outcome_chart(store, &state.site))
}

fn render_payload(store: &RecordStore, state: &SelectorState) -> ChartSpec {
    ChartSpec::Scatter(charts::render_payload_chart(
        store,
        &state.site,
        &state.payload,
    ))
}

const BINDINGS: [Binding; 2] = [
    Binding {
        output: ChartId::SuccessPieChart,
        inputs: &[ControlId::SiteDropdown],
        render: render_outcome,
    },
    Binding {
        output: ChartId::SuccessPayloadScatterChart,
        inputs: &[ControlId::SiteDropdown, ControlId::PayloadSlider],
        render: render_payload,
    },
];

/// A freshly rendered chart that replaces whatever the region showed before.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartUpdate {
    pub chart: ChartId,
    pub spec: ChartSpec,
}

/// Owns the selector state of one dashboard session.
#[derive(Debug, Clone)]
pub struct Controller {
    store: Arc<RecordStore>,
    state: SelectorState,
    domain: PayloadRange,
}

impl Controller {
    /// Session in the default state: every site, full observed payload range.
    pub fn new(store: Arc<RecordStore>) -> Self {
        let state = store.default_selection();
        Self::restore(store, state)
    }

    /// Session resumed from a state held elsewhere (e.g. by a web page).
    /// The payload range is clamped into the slider domain.
    pub fn restore(store: Arc<RecordStore>, mut state: SelectorState) -> Self {
        let domain = layout::slider_domain(&store);
        state.payload = state.payload.clamp_to(&domain);
        Self { store, state, domain }
    }

    pub fn bindings() -> &'static [Binding] {
        &BINDINGS
    }

    pub fn state(&self) -> &SelectorState {
        &self.state
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Every chart, rendered from the current state.
    pub fn initial_render(&self) -> Vec<ChartUpdate> {
        BINDINGS.iter().map(|b| self.run(b)).collect()
    }

    /// Charts that read `control`, rendered from the current state.
    pub fn render_bound(&self, control: ControlId) -> Vec<ChartUpdate> {
        BINDINGS
            .iter()
            .filter(|b| b.reads(control))
            .map(|b| self.run(b))
            .collect()
    }

    /// Apply a control change and re-render the charts bound to it.
    pub fn handle(&mut self, event: ControlEvent) -> Vec<ChartUpdate> {
        let source = event.source();
        match event {
            ControlEvent::SiteSelected(site) => self.state.site = site,
            ControlEvent::PayloadRangeChanged(range) => {
                self.state.payload = range.clamp_to(&self.domain);
            }
        }
        debug!(
            control = source.as_str(),
            site = %self.state.site,
            payload = %self.state.payload,
            "control changed"
        );
        self.render_bound(source)
    }

    fn run(&self, binding: &Binding) -> ChartUpdate {
        ChartUpdate {
            chart: binding.output,
            spec: (binding.render)(&self.store, &self.state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{LaunchRecord, Outcome};
    use pretty_assertions::assert_eq;

    fn controller() -> Controller {
        let store = RecordStore::from_records(vec![
            LaunchRecord::new("SiteA", 500.0, Outcome::Success, "v1.0"),
            LaunchRecord::new("SiteA", 2000.0, Outcome::Failure, "v1.0"),
            LaunchRecord::new("SiteB", 1500.0, Outcome::Success, "v1.1"),
            LaunchRecord::new("SiteB", 3000.0, Outcome::Success, "v1.1"),
        ])
        .unwrap();
        Controller::new(Arc::new(store))
    }

    fn charts(updates: &[ChartUpdate]) -> Vec<ChartId> {
        updates.iter().map(|u| u.chart).collect()
    }

    #[test]
    fn test_initial_render_covers_every_chart() {
        let controller = controller();
        let updates = controller.initial_render();
        assert_eq!(
            charts(&updates),
            vec![ChartId::SuccessPieChart, ChartId::SuccessPayloadScatterChart]
        );
        assert_eq!(updates[0].spec.title(), "Total Success Launches By Site");
    }

    #[test]
    fn test_site_change_rerenders_both_charts() {
        let mut controller = controller();
        let updates = controller.handle(ControlEvent::SiteSelected(SiteSelector::site("SiteB")));
        assert_eq!(
            charts(&updates),
            vec![ChartId::SuccessPieChart, ChartId::SuccessPayloadScatterChart]
        );
        assert_eq!(controller.state().site, SiteSelector::site("SiteB"));
        assert_eq!(updates[0].spec.title(), "Total Success Launches for site SiteB");
    }

    #[test]
    fn test_range_change_rerenders_scatter_only() {
        let mut controller = controller();
        let range = PayloadRange::new(1000.0, 3000.0).unwrap();
        let updates = controller.handle(ControlEvent::PayloadRangeChanged(range));
        assert_eq!(charts(&updates), vec![ChartId::SuccessPayloadScatterChart]);
        match &updates[0].spec {
            ChartSpec::Scatter(chart) => assert_eq!(chart.point_count(), 3),
            other => panic!("unexpected chart {other:?}"),
        }
    }

    #[test]
    fn test_range_is_clamped_to_slider_domain() {
        let mut controller = controller();
        let range = PayloadRange::new(-100.0, 50_000.0).unwrap();
        controller.handle(ControlEvent::PayloadRangeChanged(range));
        assert_eq!(
            controller.state().payload,
            PayloadRange::new(0.0, 10_000.0).unwrap()
        );
    }

    #[test]
    fn test_restore_renders_like_live_session() {
        let mut live = controller();
        live.handle(ControlEvent::SiteSelected(SiteSelector::site("SiteA")));
        let restored = Controller::restore(Arc::new(live.store().clone()), live.state().clone());
        assert_eq!(restored.initial_render(), live.initial_render());
    }

    #[test]
    fn test_dispatch_table_shape() {
        let table = Controller::bindings();
        assert!(table[0].reads(ControlId::SiteDropdown));
        assert!(!table[0].reads(ControlId::PayloadSlider));
        assert!(table[1].reads(ControlId::SiteDropdown));
        assert!(table[1].reads(ControlId::PayloadSlider));
    }
}
