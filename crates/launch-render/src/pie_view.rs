// Outcome proportions drawn as a pie with the egui painter.

use std::f32::consts::{FRAC_PI_2, TAU};

use launch_core::charts::PieChart;
use launch_core::controller::ChartId;

use crate::palette;

/// Draw the outcome pie in a resizable top panel.
pub fn draw_outcome_chart(ctx: &egui::Context, chart: &PieChart) {
    egui::TopBottomPanel::top(ChartId::SuccessPieChart.as_str())
        .resizable(true)
        .default_height(340.0)
        .min_height(200.0)
        .show(ctx, |ui| {
            ui.heading(&chart.title);

            if chart.is_empty() {
                ui.label("No launches recorded for this site.");
                return;
            }

            ui.horizontal(|ui| {
                let size = ui.available_height().min(ui.available_width() * 0.6);
                let (response, painter) =
                    ui.allocate_painter(egui::vec2(size, size), egui::Sense::hover());
                let center = response.rect.center();
                let radius = size / 2.0 - 10.0;
                if radius <= 0.0 {
                    return;
                }

                let mut start = -FRAC_PI_2;
                for (i, slice) in chart.slices.iter().enumerate() {
                    let sweep = TAU * slice.share as f32;
                    paint_wedge(&painter, center, radius, start, sweep, palette::color(i));

                    let mid = start + sweep / 2.0;
                    painter.text(
                        center + 0.65 * radius * egui::vec2(mid.cos(), mid.sin()),
                        egui::Align2::CENTER_CENTER,
                        format!("{:.1}%", slice.share * 100.0),
                        egui::FontId::proportional(13.0),
                        egui::Color32::WHITE,
                    );
                    start += sweep;
                }

                let hovered = response.hover_pos().and_then(|pos| {
                    let offset = pos - center;
                    if offset.length() > radius {
                        return None;
                    }
                    slice_at(chart, offset.angle())
                });
                if let Some(i) = hovered {
                    let slice = &chart.slices[i];
                    response.on_hover_text(format!(
                        "{}: {} launches, {} successful",
                        slice.label, slice.value, slice.successes
                    ));
                }

                ui.vertical(|ui| {
                    for (i, slice) in chart.slices.iter().enumerate() {
                        ui.horizontal(|ui| {
                            ui.colored_label(palette::color(i), "■");
                            ui.label(format!("{} ({})", slice.label, slice.value));
                        });
                    }
                });
            });
        });
}

/// Filled circular sector from `start` spanning `sweep` radians.
fn paint_wedge(
    painter: &egui::Painter,
    center: egui::Pos2,
    radius: f32,
    start: f32,
    sweep: f32,
    color: egui::Color32,
) {
    let segments = ((sweep / TAU) * 96.0).ceil().max(2.0) as u32;
    let mut mesh = egui::Mesh::default();
    mesh.colored_vertex(center, color);
    for k in 0..=segments {
        let angle = start + sweep * k as f32 / segments as f32;
        mesh.colored_vertex(center + radius * egui::vec2(angle.cos(), angle.sin()), color);
    }
    for k in 1..=segments {
        mesh.add_triangle(0, k, k + 1);
    }
    painter.add(egui::Shape::mesh(mesh));
}

/// Index of the slice under screen-space `angle` (radians, as returned by
/// `Vec2::angle`). Slices start at twelve o'clock and run clockwise on screen.
fn slice_at(chart: &PieChart, angle: f32) -> Option<usize> {
    let from_top = (angle + FRAC_PI_2).rem_euclid(TAU);
    let mut end = 0.0;
    for (i, slice) in chart.slices.iter().enumerate() {
        end += TAU * slice.share as f32;
        if from_top < end {
            return Some(i);
        }
    }
    chart.slices.len().checked_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use launch_core::engine::Slice;

    fn chart(shares: &[f64]) -> PieChart {
        PieChart {
            title: "test".into(),
            slices: shares
                .iter()
                .map(|&share| Slice {
                    label: format!("{share}"),
                    value: 1,
                    successes: 0,
                    share,
                })
                .collect(),
        }
    }

    #[test]
    fn test_hit_testing_follows_slice_order() {
        let chart = chart(&[0.25, 0.75]);
        // Screen y points down, so +x is a quarter turn past twelve o'clock.
        assert_eq!(slice_at(&chart, -FRAC_PI_2 + 0.1), Some(0));
        assert_eq!(slice_at(&chart, 0.1), Some(1));
        assert_eq!(slice_at(&chart, std::f32::consts::PI), Some(1));
    }

    #[test]
    fn test_hit_testing_on_empty_chart() {
        assert_eq!(slice_at(&chart(&[]), 0.0), None);
    }
}
