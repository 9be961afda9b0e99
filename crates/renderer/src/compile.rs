use std::borrow::Cow;

use crate::document::{ResolvedShader, ShaderError};

/// Compiles one resolved stage into a GPU shader module.
///
/// `wgpu` reports GLSL front-end failures as validation errors, so the call
/// is wrapped in an error scope and the compiler's diagnostic text is
/// surfaced through [`ShaderError::Compile`] instead of the default
/// uncaptured-error path.
pub(crate) fn compile_shader(
    device: &wgpu::Device,
    shader: &ResolvedShader,
) -> Result<wgpu::ShaderModule, ShaderError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(shader.id.as_str()),
        source: wgpu::ShaderSource::Glsl {
            shader: Cow::Borrowed(shader.source.as_str()),
            stage: shader.kind.naga_stage(),
            defines: &[],
        },
    });

    match pollster::block_on(device.pop_error_scope()) {
        None => Ok(module),
        Some(error) => Err(ShaderError::Compile {
            id: shader.id.clone(),
            kind: shader.kind,
            log: error.to_string(),
        }),
    }
}
