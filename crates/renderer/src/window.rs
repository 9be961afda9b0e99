use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use tracing::{error, warn};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowBuilder};

use crate::gpu::GpuState;
use crate::SessionConfig;

/// Window plus the GPU state bound to its surface.
struct WindowState {
    window: Arc<Window>,
    gpu: GpuState,
}

impl WindowState {
    fn new(window: Arc<Window>, config: &SessionConfig) -> Result<Self> {
        let size = window.inner_size();
        let gpu = GpuState::new(
            window.as_ref(),
            size,
            &config.document,
            &config.vertex_shader,
            &config.fragment_shader,
        )?;
        Ok(Self { window, gpu })
    }

    fn window(&self) -> &Window {
        self.window.as_ref()
    }

    fn size(&self) -> PhysicalSize<u32> {
        self.gpu.size()
    }
}

/// Opens the window and drives the `winit` event loop.
///
/// The scene is static, so the loop waits between events and only redraws
/// when the windowing system asks for one; the first redraw request renders
/// the frame.
pub(crate) fn run_windowed(config: &SessionConfig) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to initialize event loop")?;
    let window_size = PhysicalSize::new(config.surface_size.0, config.surface_size.1);
    let window = WindowBuilder::new()
        .with_title(config.window_title.as_str())
        .with_inner_size(window_size)
        .build(&event_loop)
        .context("failed to create window")?;
    let window = Arc::new(window);

    let mut state = WindowState::new(window.clone(), config)?;
    state.window().request_redraw();

    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Wait);

            if let Event::WindowEvent { window_id, event } = event {
                if window_id != state.window().id() {
                    return;
                }
                match event {
                    WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                        elwt.exit();
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        if event.state == ElementState::Pressed
                            && event.logical_key == Key::Named(NamedKey::Escape)
                        {
                            elwt.exit();
                        }
                    }
                    WindowEvent::Resized(new_size) => {
                        state.gpu.resize(new_size);
                    }
                    WindowEvent::ScaleFactorChanged {
                        mut inner_size_writer,
                        ..
                    } => {
                        // Keep the current logical size when the scale factor changes.
                        let _ = inner_size_writer.request_inner_size(state.size());
                    }
                    WindowEvent::RedrawRequested => match state.gpu.render() {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            state.gpu.resize(state.size());
                            state.window().request_redraw();
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            error!("surface out of memory; exiting");
                            elwt.exit();
                        }
                        Err(wgpu::SurfaceError::Timeout) => {
                            warn!("surface timeout; retrying on next redraw");
                        }
                        Err(other) => {
                            warn!("surface error: {other:?}; retrying on next redraw");
                        }
                    },
                    _ => {}
                }
            }
        })
        .map_err(|err| anyhow!("event loop error: {err}"))
}
