// ApplicationHandler, event loop, dashboard session.

use std::sync::Arc;

use egui_winit_vulkano::{Gui, GuiConfig};
use launch_core::charts::{ChartSpec, PieChart, ScatterChart};
use launch_core::controller::{ChartUpdate, Controller};
use launch_core::layout::DashboardLayout;
use launch_core::RecordStore;
use tracing::{debug, error};
use vulkano::sync::GpuFuture;
use winit::{
    application::ApplicationHandler, event::WindowEvent, event_loop::ActiveEventLoop,
    window::WindowId,
};

use crate::{pie_view, plot_view, renderer::Renderer, ui, RenderError};

pub struct App {
    renderer: Option<Renderer>,
    gui: Option<Gui>,
    controller: Controller,
    layout: DashboardLayout,
    pie: Option<PieChart>,
    scatter: Option<ScatterChart>,
    /// Set when window or Vulkan setup fails; returned once the loop exits.
    failure: Option<RenderError>,
}

impl App {
    pub fn new(store: Arc<RecordStore>) -> Self {
        let controller = Controller::new(store);
        let layout = DashboardLayout::from_store(controller.store());
        let initial = controller.initial_render();

        let mut app = Self {
            renderer: None,
            gui: None,
            controller,
            layout,
            pie: None,
            scatter: None,
            failure: None,
        };
        app.apply(initial);
        app
    }

    /// Outcome of the session once the event loop has returned.
    pub fn finish(self) -> Result<(), RenderError> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn apply(&mut self, updates: Vec<ChartUpdate>) {
        for update in updates {
            debug!(chart = update.chart.as_str(), title = update.spec.title(), "chart replaced");
            match update.spec {
                ChartSpec::Pie(chart) => self.pie = Some(chart),
                ChartSpec::Scatter(chart) => self.scatter = Some(chart),
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() {
            return;
        }
        let renderer = match Renderer::new(event_loop) {
            Ok(renderer) => renderer,
            Err(err) => {
                error!(error = %err, "could not open the dashboard window");
                self.failure = Some(err);
                event_loop.exit();
                return;
            }
        };

        let gui = Gui::new(
            event_loop,
            renderer.surface.clone(),
            renderer.queue.clone(),
            renderer.swapchain_format(),
            GuiConfig {
                is_overlay: false,
                ..Default::default()
            },
        );

        // Request the very first frame.
        renderer.window.request_redraw();
        self.renderer = Some(renderer);
        self.gui = Some(gui);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui process the event first.
        if let Some(gui) = self.gui.as_mut() {
            gui.update(&event);
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(_) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.recreate_swapchain = true;
                }
            }
            WindowEvent::RedrawRequested => {
                self.render_frame();
                return;
            }
            _ => {}
        }

        // Any input or resize may have changed egui state.
        if let Some(renderer) = self.renderer.as_ref() {
            renderer.window.request_redraw();
        }
    }
}

impl App {
    fn render_frame(&mut self) {
        let renderer = match self.renderer.as_mut() {
            Some(r) => r,
            None => return,
        };

        let (image_index, acquire_future) = match renderer.begin_frame() {
            Some(r) => r,
            None => {
                renderer.window.request_redraw();
                return;
            }
        };

        let before_future = renderer.take_previous_frame_end().join(acquire_future);

        // Run the egui immediate-mode UI.
        let mut events = Vec::new();
        {
            let gui = match self.gui.as_mut() {
                Some(g) => g,
                None => return,
            };
            let layout = &self.layout;
            let state = self.controller.state();
            let pie = self.pie.as_ref();
            let scatter = self.scatter.as_ref();

            gui.immediate_ui(|gui| {
                let ctx = gui.context();
                events = ui::draw_controls(&ctx, layout, state);
                if let Some(chart) = pie {
                    pie_view::draw_outcome_chart(&ctx, chart);
                }
                if let Some(chart) = scatter {
                    plot_view::draw_payload_chart(&ctx, chart);
                }
            });
        }

        // Dispatch control changes; each one re-renders its bound charts.
        if !events.is_empty() {
            for event in events {
                let updates = self.controller.handle(event);
                self.apply(updates);
            }
            // This frame was drawn with the old charts; show the new ones
            // without waiting for more input.
            if let Some(r) = self.renderer.as_ref() {
                r.window.request_redraw();
            }
        }

        // Draw egui onto the swapchain image.
        let renderer = match self.renderer.as_ref() {
            Some(r) => r,
            None => return,
        };
        let image_view = renderer.image_views[image_index as usize].clone();
        let gui = match self.gui.as_mut() {
            Some(g) => g,
            None => return,
        };
        let after_future = gui.draw_on_image(before_future, image_view);

        // Present.
        let renderer = match self.renderer.as_mut() {
            Some(r) => r,
            None => return,
        };
        let final_future = renderer.present(after_future, image_index);
        renderer.end_frame(final_future);
    }
}
