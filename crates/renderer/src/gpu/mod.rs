//! GPU orchestration for the triangle demo.
//!
//! The setup-then-draw flow is split along its phases:
//! - `context` owns wgpu instance/device/surface wiring and knows how to
//!   reconfigure swapchain state when the surface resizes.
//! - `pipeline` resolves and compiles both shader stages from the source
//!   document and links them into the one render pipeline, with the two
//!   matrix uniform slots it feeds.
//! - `geometry` uploads the fixed vertex buffer and describes its layout.
//! - `uniforms` computes the perspective and model-view matrices fresh each
//!   frame from fixed constants and the live surface size.
//! - `state` glues everything together and exposes the `GpuState` API used
//!   by `window`.

mod context;
mod geometry;
mod pipeline;
mod state;
mod uniforms;

pub(crate) use state::GpuState;
