use anyhow::{Context as AnyhowContext, Result};
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use tracing::debug;
use winit::dpi::PhysicalSize;

use crate::document::ShaderDocument;

use super::context::GpuContext;
use super::geometry::TriangleGeometry;
use super::pipeline::{TriangleProgram, DEPTH_FORMAT};
use super::uniforms::{model_view_matrix, perspective_matrix, MatrixUniform};

/// Aggregates every GPU resource needed to present the scene: the bound
/// context, the linked program, the uploaded geometry, and the depth
/// target. Constructed once; each phase is a field rather than ambient
/// global state.
pub(crate) struct GpuState {
    context: GpuContext,
    program: TriangleProgram,
    geometry: TriangleGeometry,
    depth_target: DepthTarget,
}

impl GpuState {
    /// Runs the setup phases in order: context acquisition, shader program
    /// assembly, geometry upload. Any failure aborts construction.
    pub(crate) fn new<T>(
        target: &T,
        initial_size: PhysicalSize<u32>,
        document: &ShaderDocument,
        vertex_shader: &str,
        fragment_shader: &str,
    ) -> Result<Self>
    where
        T: HasDisplayHandle + HasWindowHandle,
    {
        let context = GpuContext::new(target, initial_size)
            .context("failed to acquire a rendering context")?;

        let program = TriangleProgram::link(
            &context.device,
            document,
            vertex_shader,
            fragment_shader,
            context.surface_format,
        )
        .context("failed to assemble the shader program")?;

        let geometry = TriangleGeometry::upload(&context.device);
        let depth_target = DepthTarget::new(&context.device, context.size);

        debug!(
            vertices = geometry.vertex_count(),
            "uploaded triangle geometry"
        );

        Ok(Self {
            context,
            program,
            geometry,
            depth_target,
        })
    }

    pub(crate) fn size(&self) -> PhysicalSize<u32> {
        self.context.size
    }

    /// Reconfigures the surface and rebuilds the depth target. The next
    /// render picks up the new aspect ratio when it recomputes the
    /// projection.
    pub(crate) fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }

        self.context.resize(new_size);
        self.depth_target = DepthTarget::new(&self.context.device, new_size);
    }

    /// Redraws the entire surface from current static state.
    ///
    /// Each call recomputes both matrices from fixed constants and the live
    /// surface size, uploads them, and issues the one triangle-list draw.
    /// Nothing carries over between calls, so repeated invocations with an
    /// unchanged surface produce identical frames.
    pub(crate) fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.context.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let perspective = perspective_matrix(self.context.size);
        let model_view = model_view_matrix();
        debug!(
            aspect = self.context.aspect_ratio(),
            "recomputed frame matrices"
        );
        Self::write_matrix(
            &self.context.queue,
            &self.program.perspective_buffer,
            &perspective,
        );
        Self::write_matrix(
            &self.context.queue,
            &self.program.model_view_buffer,
            &model_view,
        );

        let mut encoder =
            self.context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("render encoder"),
                });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_target.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_viewport(
                0.0,
                0.0,
                self.context.size.width as f32,
                self.context.size.height as f32,
                0.0,
                1.0,
            );
            render_pass.set_pipeline(&self.program.pipeline);
            render_pass.set_bind_group(0, &self.program.uniform_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.geometry.buffer.slice(..));
            render_pass.draw(0..self.geometry.vertex_count(), 0..1);
        }

        self.context.queue.submit(std::iter::once(encoder.finish()));
        frame.present();

        Ok(())
    }

    fn write_matrix(queue: &wgpu::Queue, buffer: &wgpu::Buffer, matrix: &MatrixUniform) {
        queue.write_buffer(buffer, 0, bytemuck::bytes_of(matrix));
    }
}

/// Depth attachment sized to the surface, rebuilt on resize.
struct DepthTarget {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl DepthTarget {
    fn new(device: &wgpu::Device, size: PhysicalSize<u32>) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth target"),
            size: wgpu::Extent3d {
                width: size.width.max(1),
                height: size.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            _texture: texture,
            view,
        }
    }
}
