use bytemuck::{Pod, Zeroable};
use nalgebra_glm as glm;
use winit::dpi::PhysicalSize;

/// Vertical field of view of the projection, in degrees.
const FIELD_OF_VIEW_DEG: f32 = 45.0;
/// Near clip plane distance.
const NEAR_PLANE: f32 = 0.1;
/// Far clip plane distance.
const FAR_PLANE: f32 = 100.0;
/// Fixed camera pull-back applied to the model-view matrix, placing the
/// triangle inside the frustum.
const CAMERA_OFFSET: [f32; 3] = [0.0, 0.0, -7.0];

/// Column-major 4x4 matrix in the layout the uniform blocks expect.
#[repr(C, align(16))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct MatrixUniform {
    columns: [[f32; 4]; 4],
}

unsafe impl Zeroable for MatrixUniform {}
unsafe impl Pod for MatrixUniform {}

impl From<glm::Mat4> for MatrixUniform {
    fn from(matrix: glm::Mat4) -> Self {
        Self {
            columns: matrix.into(),
        }
    }
}

/// Projection for the current surface size: fixed field of view and clip
/// planes, aspect ratio taken from the live dimensions. Pure, so the same
/// size always yields bit-identical output.
///
/// Uses the right-handed zero-to-one depth convention wgpu's clip space
/// expects.
pub(crate) fn perspective_matrix(size: PhysicalSize<u32>) -> MatrixUniform {
    let aspect = size.width as f32 / size.height as f32;
    glm::perspective_rh_zo(
        aspect,
        FIELD_OF_VIEW_DEG.to_radians(),
        NEAR_PLANE,
        FAR_PLANE,
    )
    .into()
}

/// Model-view for the static scene: identity pushed back by
/// [`CAMERA_OFFSET`]. Recomputed from scratch every frame; translation
/// never accumulates across calls.
pub(crate) fn model_view_matrix() -> MatrixUniform {
    let identity: glm::Mat4 = glm::identity();
    glm::translate(
        &identity,
        &glm::vec3(CAMERA_OFFSET[0], CAMERA_OFFSET[1], CAMERA_OFFSET[2]),
    )
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(width: u32, height: u32) -> PhysicalSize<u32> {
        PhysicalSize::new(width, height)
    }

    #[test]
    fn matrices_are_pure_functions_of_surface_size() {
        let first = perspective_matrix(size(800, 600));
        let second = perspective_matrix(size(800, 600));
        assert_eq!(first, second);

        assert_eq!(model_view_matrix(), model_view_matrix());
    }

    #[test]
    fn aspect_ratio_changes_the_projection_scale_terms() {
        let wide = perspective_matrix(size(800, 600));
        let square = perspective_matrix(size(600, 600));

        assert_ne!(wide.columns[0][0], square.columns[0][0]);
        // The vertical scale depends only on the field of view, so it must
        // survive the aspect change while the horizontal scale does not.
        assert_eq!(wide.columns[1][1], square.columns[1][1]);

        let tall = perspective_matrix(size(600, 800));
        assert_ne!(wide.columns[0][0], tall.columns[0][0]);
    }

    #[test]
    fn projection_bakes_in_the_800x600_aspect() {
        let projection = perspective_matrix(size(800, 600));
        let focal = 1.0 / (FIELD_OF_VIEW_DEG.to_radians() / 2.0).tan();
        let aspect = 800.0 / 600.0;

        assert!((projection.columns[0][0] - focal / aspect).abs() < 1e-6);
        assert!((projection.columns[1][1] - focal).abs() < 1e-6);
    }

    #[test]
    fn model_view_is_a_pure_camera_translation() {
        let matrix = model_view_matrix();
        let columns = matrix.columns;

        assert_eq!(columns[0], [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(columns[1], [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(columns[2], [0.0, 0.0, 1.0, 0.0]);
        assert_eq!(columns[3], [0.0, 0.0, -7.0, 1.0]);
    }
}
