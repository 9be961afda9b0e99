use crate::compile::compile_shader;
use crate::document::{ResolvedShader, ShaderDocument, ShaderError, ShaderKind};

use super::geometry::TriangleGeometry;
use super::uniforms::MatrixUniform;

/// Uniform slot of the perspective matrix, matching the vertex GLSL.
pub(crate) const PERSPECTIVE_BINDING: u32 = 0;
/// Uniform slot of the model-view matrix, matching the vertex GLSL.
pub(crate) const MODEL_VIEW_BINDING: u32 = 1;

/// Depth attachment format shared by the pipeline and the depth target.
pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// The linked pairing of one vertex and one fragment stage, plus the
/// resolved uniform slots feeding it. Built once and never relinked.
pub(crate) struct TriangleProgram {
    pub pipeline: wgpu::RenderPipeline,
    pub uniform_bind_group: wgpu::BindGroup,
    pub perspective_buffer: wgpu::Buffer,
    pub model_view_buffer: wgpu::Buffer,
}

impl TriangleProgram {
    /// Resolves, compiles, and links both stages.
    ///
    /// Refuses to link unless both stages resolved to the expected kinds and
    /// compiled cleanly; link-time validation failures are captured through
    /// an error scope and surfaced as [`ShaderError::Link`].
    pub(crate) fn link(
        device: &wgpu::Device,
        document: &ShaderDocument,
        vertex_id: &str,
        fragment_id: &str,
        surface_format: wgpu::TextureFormat,
    ) -> Result<Self, ShaderError> {
        let vertex = resolve_stage(document, vertex_id, ShaderKind::Vertex)?;
        let fragment = resolve_stage(document, fragment_id, ShaderKind::Fragment)?;

        let vertex_module = compile_shader(device, &vertex)?;
        let fragment_module = compile_shader(device, &fragment)?;
        tracing::debug!(
            vertex = %vertex.id,
            fragment = %fragment.id,
            "compiled shader stages"
        );

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("matrix uniform layout"),
            entries: &[
                matrix_layout_entry(PERSPECTIVE_BINDING),
                matrix_layout_entry(MODEL_VIEW_BINDING),
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("triangle pipeline layout"),
            bind_group_layouts: &[&uniform_layout],
            push_constant_ranges: &[],
        });

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("triangle pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: Some("main"),
                buffers: &[TriangleGeometry::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &fragment_module,
                entry_point: Some("main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview: None,
            cache: None,
        });
        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            return Err(ShaderError::Link {
                log: error.to_string(),
            });
        }

        let perspective_buffer = matrix_buffer(device, "perspective matrix");
        let model_view_buffer = matrix_buffer(device, "model-view matrix");

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("matrix bind group"),
            layout: &uniform_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: PERSPECTIVE_BINDING,
                    resource: perspective_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: MODEL_VIEW_BINDING,
                    resource: model_view_buffer.as_entire_binding(),
                },
            ],
        });

        Ok(Self {
            pipeline,
            uniform_bind_group,
            perspective_buffer,
            model_view_buffer,
        })
    }
}

/// Looks up a stage and insists on the kind the program slot requires.
fn resolve_stage(
    document: &ShaderDocument,
    id: &str,
    expected: ShaderKind,
) -> Result<ResolvedShader, ShaderError> {
    let resolved = document.resolve(id)?;
    if resolved.kind != expected {
        return Err(ShaderError::StageMismatch {
            id: resolved.id,
            expected,
            found: resolved.kind,
        });
    }
    Ok(resolved)
}

fn matrix_layout_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

fn matrix_buffer(device: &wgpu::Device, label: &str) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: std::mem::size_of::<MatrixUniform>() as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
