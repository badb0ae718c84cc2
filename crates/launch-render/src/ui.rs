// egui control panel: site dropdown and payload range.

use launch_core::controller::{ControlEvent, ControlId};
use launch_core::layout::DashboardLayout;
use launch_core::{PayloadRange, SelectorState};

/// Draw the right-side control panel. Returns the control changes made this
/// frame, in the order the user made them.
pub fn draw_controls(
    ctx: &egui::Context,
    layout: &DashboardLayout,
    state: &SelectorState,
) -> Vec<ControlEvent> {
    let mut events = Vec::new();

    egui::SidePanel::right("controls")
        .min_width(260.0)
        .show(ctx, |ui| {
            ui.heading(&layout.title);
            ui.separator();

            // --- Launch site ---
            let dropdown = &layout.site_dropdown;
            let mut site = state.site.clone();
            let selected = dropdown
                .options
                .iter()
                .find(|o| o.value == site)
                .map_or_else(|| site.to_string(), |o| o.label.clone());
            egui::ComboBox::from_id_salt(ControlId::SiteDropdown.as_str())
                .selected_text(selected)
                .width(240.0)
                .show_ui(ui, |ui| {
                    for option in &dropdown.options {
                        ui.selectable_value(&mut site, option.value.clone(), &option.label);
                    }
                });
            if site != state.site {
                events.push(ControlEvent::SiteSelected(site));
            }

            ui.separator();

            // --- Payload range ---
            let slider = &layout.payload_slider;
            ui.label(&slider.label);
            let mut low = state.payload.low();
            let mut high = state.payload.high();
            let low_changed = ui
                .add(
                    egui::Slider::new(&mut low, slider.min..=slider.max)
                        .step_by(slider.step)
                        .text("min")
                        .suffix(" kg"),
                )
                .changed();
            let high_changed = ui
                .add(
                    egui::Slider::new(&mut high, slider.min..=slider.max)
                        .step_by(slider.step)
                        .text("max")
                        .suffix(" kg"),
                )
                .changed();
            ui.horizontal(|ui| {
                for mark in &slider.marks {
                    ui.small(format!("{mark:.0}"));
                }
            });

            if low_changed || high_changed {
                // The handle being dragged pushes the other one along.
                if low > high {
                    if low_changed {
                        high = low;
                    } else {
                        low = high;
                    }
                }
                if let Ok(range) = PayloadRange::new(low, high) {
                    events.push(ControlEvent::PayloadRangeChanged(range));
                }
            }
        });

    events
}
