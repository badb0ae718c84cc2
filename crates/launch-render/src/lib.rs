pub mod app;
pub mod error;
pub mod palette;
pub mod pie_view;
pub mod plot_view;
pub mod renderer;
pub mod ui;

use std::sync::Arc;

use launch_core::RecordStore;
use winit::event_loop::{ControlFlow, EventLoop};

use app::App;
pub use error::RenderError;

/// Open the dashboard window and block until it is closed.
pub fn run(store: Arc<RecordStore>) -> Result<(), RenderError> {
    let event_loop = EventLoop::new().map_err(error::setup("creating the event loop"))?;
    event_loop.set_control_flow(ControlFlow::Wait);
    let mut app = App::new(store);
    event_loop
        .run_app(&mut app)
        .map_err(error::setup("running the event loop"))?;
    app.finish()
}
