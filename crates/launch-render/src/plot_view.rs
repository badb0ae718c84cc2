// Payload vs. outcome scatter via egui_plot.

use egui_plot::{Legend, Plot, Points};
use launch_core::charts::ScatterChart;
use launch_core::controller::ChartId;

use crate::palette;

/// Draw the payload scatter in the central panel.
pub fn draw_payload_chart(ctx: &egui::Context, chart: &ScatterChart) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading(&chart.title);
        if chart.is_empty() {
            ui.label("No launches match the current selection.");
        }

        Plot::new(ChartId::SuccessPayloadScatterChart.as_str())
            .x_axis_label(chart.x_label.as_str())
            .y_axis_label(chart.y_label.as_str())
            .include_x(0.0)
            .include_y(-0.25)
            .include_y(1.25)
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                for (i, series) in chart.series.iter().enumerate() {
                    let points: Vec<[f64; 2]> = series
                        .points
                        .iter()
                        .map(|p| [p.payload_mass_kg, f64::from(p.class)])
                        .collect();
                    plot_ui.points(
                        Points::new(points)
                            .name(&series.name)
                            .color(palette::color(i))
                            .radius(4.0),
                    );
                }
            });
    });
}
