//! Chart specifications as Plotly.js figures (`{ data, layout }`).

use launch_core::charts::{ChartSpec, PieChart, ScatterChart};
use serde_json::{json, Value};

pub fn figure(spec: &ChartSpec) -> Value {
    match spec {
        ChartSpec::Pie(chart) => pie_figure(chart),
        ChartSpec::Scatter(chart) => scatter_figure(chart),
    }
}

fn pie_figure(chart: &PieChart) -> Value {
    let data = if chart.is_empty() {
        Vec::new()
    } else {
        let labels: Vec<&str> = chart.slices.iter().map(|s| s.label.as_str()).collect();
        let values: Vec<u64> = chart.slices.iter().map(|s| s.value).collect();
        let successes: Vec<u64> = chart.slices.iter().map(|s| s.successes).collect();
        vec![json!({
            "type": "pie",
            "labels": labels,
            "values": values,
            "customdata": successes,
            "hovertemplate": "%{label}<br>%{value} launches (%{percent})<br>%{customdata} successful<extra></extra>",
            "sort": false,
        })]
    };
    json!({
        "data": data,
        "layout": {
            "title": { "text": chart.title },
            "legend": { "tracegroupgap": 0 },
        },
    })
}

fn scatter_figure(chart: &ScatterChart) -> Value {
    let data: Vec<Value> = chart
        .series
        .iter()
        .map(|series| {
            let x: Vec<f64> = series.points.iter().map(|p| p.payload_mass_kg).collect();
            let y: Vec<u8> = series.points.iter().map(|p| p.class).collect();
            let text: Vec<&str> = series.points.iter().map(|p| p.label.as_str()).collect();
            json!({
                "type": "scatter",
                "mode": "markers",
                "name": series.name,
                "x": x,
                "y": y,
                "text": text,
                "hovertemplate": "%{text}<br>payload=%{x} kg<br>class=%{y}<extra>%{fullData.name}</extra>",
            })
        })
        .collect();
    json!({
        "data": data,
        "layout": {
            "title": { "text": chart.title },
            "xaxis": { "title": { "text": chart.x_label } },
            "yaxis": { "title": { "text": chart.y_label }, "tickvals": [0, 1] },
            "legend": { "title": { "text": chart.legend_title } },
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use launch_core::charts::{render_outcome_chart, render_payload_chart};
    use launch_core::{LaunchRecord, Outcome, PayloadRange, RecordStore, SiteSelector};

    fn store() -> RecordStore {
        RecordStore::from_records(vec![
            LaunchRecord::new("SiteA", 500.0, Outcome::Success, "v1.0"),
            LaunchRecord::new("SiteA", 2000.0, Outcome::Failure, "v1.0"),
            LaunchRecord::new("SiteB", 1500.0, Outcome::Success, "v1.1"),
        ])
        .unwrap()
    }

    #[test]
    fn test_pie_trace_mirrors_slices() {
        let chart = render_outcome_chart(&store(), &SiteSelector::All);
        let fig = figure(&ChartSpec::Pie(chart));
        assert_eq!(fig["data"][0]["type"], "pie");
        assert_eq!(fig["data"][0]["labels"], json!(["SiteA", "SiteB"]));
        assert_eq!(fig["data"][0]["values"], json!([2, 1]));
        assert_eq!(fig["layout"]["title"]["text"], "Total Success Launches By Site");
    }

    #[test]
    fn test_scatter_has_one_trace_per_category() {
        let store = store();
        let chart = render_payload_chart(&store, &SiteSelector::All, &store.payload_bounds());
        let fig = figure(&ChartSpec::Scatter(chart));
        let traces = fig["data"].as_array().unwrap();
        assert_eq!(traces.len(), 2);
        assert_eq!(traces[0]["name"], "v1.0");
        assert_eq!(traces[0]["x"], json!([500.0, 2000.0]));
        assert_eq!(traces[0]["y"], json!([1, 0]));
        assert_eq!(fig["layout"]["xaxis"]["title"]["text"], "Payload Mass (kg)");
    }

    #[test]
    fn test_empty_charts_have_no_traces() {
        let store = store();
        let pie = render_outcome_chart(&store, &SiteSelector::site("Nowhere"));
        assert_eq!(figure(&ChartSpec::Pie(pie))["data"], json!([]));

        let range = PayloadRange::new(8000.0, 9000.0).unwrap();
        let scatter = render_payload_chart(&store, &SiteSelector::All, &range);
        let fig = figure(&ChartSpec::Scatter(scatter));
        assert_eq!(fig["data"], json!([]));
        assert_eq!(
            fig["layout"]["title"]["text"],
            "Correlation between Payload and Success for all Sites"
        );
    }
}
