//! Renderer crate for trishade.
//!
//! The crate draws one perspective-projected triangle: a rendering context
//! is bound to a window surface, a fixed vertex/fragment shader pair is
//! resolved from a source document and linked, a nine-float vertex buffer
//! is uploaded once, and each redraw clears the surface and issues a single
//! draw call. The overall flow is:
//!
//! ```text
//!   CLI / trishade
//!          │ SessionConfig
//!          ▼
//!   Renderer::run ──▶ winit event loop ──▶ GpuState::render()
//!                            │                    │
//!                            │                    ├─▶ perspective + model-view ─▶ uniform buffers
//!                            └─▶ resize           └─▶ draw(0..3)
//! ```
//!
//! `GpuState` owns every GPU resource (surface, device, program, geometry);
//! `Renderer` is the thin entry point that hands the configuration to the
//! windowed runner. Setup failures abort the session with a typed error
//! instead of rendering with a broken program.

mod compile;
pub mod document;
mod gpu;
mod window;

use anyhow::Result;

pub use document::{
    ShaderDocument, ShaderEntry, ShaderError, ShaderKind, BUILTIN_FRAGMENT_ID, BUILTIN_VERTEX_ID,
    FRAGMENT_TYPE_TAG, VERTEX_TYPE_TAG,
};

/// Everything the renderer needs for one session.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Source document the shader stages are resolved from.
    pub document: ShaderDocument,
    /// Document id of the vertex stage.
    pub vertex_shader: String,
    /// Document id of the fragment stage.
    pub fragment_shader: String,
    /// Initial surface size in pixels (width, height).
    pub surface_size: (u32, u32),
    /// Title of the host window.
    pub window_title: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            document: ShaderDocument::builtin(),
            vertex_shader: BUILTIN_VERTEX_ID.to_string(),
            fragment_shader: BUILTIN_FRAGMENT_ID.to_string(),
            surface_size: (800, 600),
            window_title: "Trishade".to_string(),
        }
    }
}

/// High-level entry point that owns the chosen configuration.
///
/// The heavy lifting lives in the windowed runner and `GpuState`;
/// `Renderer` simply forwards the request.
pub struct Renderer {
    config: SessionConfig,
}

impl Renderer {
    /// Builds a renderer for the supplied configuration.
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    /// Opens the window and runs the setup-then-draw sequence.
    ///
    /// Returns an error when the context cannot be acquired or the shader
    /// program cannot be assembled.
    pub fn run(&self) -> Result<()> {
        window::run_windowed(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_the_builtin_pair() {
        let config = SessionConfig::default();
        assert_eq!(config.surface_size, (800, 600));
        assert!(config.document.element(&config.vertex_shader).is_some());
        assert!(config.document.element(&config.fragment_shader).is_some());
    }
}
