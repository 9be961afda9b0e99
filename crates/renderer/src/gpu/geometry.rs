use wgpu::util::DeviceExt;

/// Hardcoded (x, y, z) coordinates for each corner of the triangle.
pub(crate) const TRIANGLE_VERTICES: [f32; 9] = [
    0.0, 1.0, 0.0, //
    -1.0, -1.0, 0.0, //
    1.0, -1.0, 0.0,
];

/// Floats per vertex in [`TRIANGLE_VERTICES`].
pub(crate) const COMPONENTS_PER_VERTEX: u32 = 3;

/// Position attribute slot consumed by the vertex stage.
pub(crate) const POSITION_LOCATION: u32 = 0;

const POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![POSITION_LOCATION => Float32x3];

/// The one GPU-resident vertex buffer, uploaded once and immutable after.
pub(crate) struct TriangleGeometry {
    pub buffer: wgpu::Buffer,
    vertex_count: u32,
}

impl TriangleGeometry {
    pub(crate) fn upload(device: &wgpu::Device) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("triangle vertices"),
            contents: bytemuck::cast_slice(&TRIANGLE_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            buffer,
            vertex_count: TRIANGLE_VERTICES.len() as u32 / COMPONENTS_PER_VERTEX,
        }
    }

    pub(crate) fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Describes the buffer to the pipeline: three floats per vertex,
    /// unnormalized, tightly packed, zero offset.
    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: (COMPONENTS_PER_VERTEX as usize * std::mem::size_of::<f32>())
                as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &POSITION_ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_array_is_the_fixed_triangle() {
        assert_eq!(
            TRIANGLE_VERTICES,
            [0.0, 1.0, 0.0, -1.0, -1.0, 0.0, 1.0, -1.0, 0.0]
        );
        assert_eq!(COMPONENTS_PER_VERTEX, 3);
        assert_eq!(
            TRIANGLE_VERTICES.len() as u32 / COMPONENTS_PER_VERTEX,
            3,
            "triangle must describe exactly three vertices"
        );
    }

    #[test]
    fn attribute_layout_is_tightly_packed_positions() {
        let layout = TriangleGeometry::layout();
        assert_eq!(layout.array_stride, 12);
        assert_eq!(layout.attributes.len(), 1);
        assert_eq!(layout.attributes[0].shader_location, POSITION_LOCATION);
        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x3);
    }
}
