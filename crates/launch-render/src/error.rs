use std::fmt::Display;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Event loop, window or Vulkan setup failed.
    #[error("{stage} failed: {reason}")]
    Setup { stage: &'static str, reason: String },

    /// No physical device can present to the window surface.
    #[error("no Vulkan device can present to the dashboard window")]
    NoSuitableDevice,
}

/// Adapter for `map_err` on setup calls whose error types only share `Display`.
pub(crate) fn setup<E: Display>(stage: &'static str) -> impl FnOnce(E) -> RenderError {
    move |err| RenderError::Setup {
        stage,
        reason: err.to_string(),
    }
}
