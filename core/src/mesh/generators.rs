//! Mesh-source generators for common shapes.
//!
//! These generators produce [`MeshSource`] values ready to be placed and
//! handed to [`merge`](super::merge). Output is a non-indexed triangle soup
//! with one array per attribute, since the merge consumes deinterleaved
//! attribute buffers.

use super::attribute::AttributeBuffer;
use super::merge::{MeshSource, POSITION_ATTRIBUTE};

/// Face table for an axis-aligned cuboid: outward normal and the two
/// in-plane tangent axes spanning the face.
const BRICK_FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
    ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]), // +X
    ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]), // -X
    ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]), // +Y
    ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]), // -Y
    ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),  // +Z
    ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]), // -Z
];

/// Corner offsets of one face in (u, v) tangent space, two CCW triangles.
const FACE_CORNERS: [(f32, f32); 6] = [
    (-1.0, -1.0),
    (1.0, -1.0),
    (1.0, 1.0),
    (1.0, 1.0),
    (-1.0, 1.0),
    (-1.0, -1.0),
];

/// Generate an axis-aligned brick (cuboid) centered at the origin.
///
/// Produces a 36-vertex triangle soup with `position`, `normal`, and `uv`
/// attributes.
///
/// # Arguments
///
/// * `half_extents` - Half the brick size along each axis `[x, y, z]`
pub fn generate_brick(half_extents: [f32; 3]) -> MeshSource {
    let [hx, hy, hz] = half_extents;
    let mut positions = Vec::with_capacity(36 * 3);
    let mut normals = Vec::with_capacity(36 * 3);
    let mut uvs = Vec::with_capacity(36 * 2);

    for (normal, u_axis, v_axis) in BRICK_FACES {
        for (u, v) in FACE_CORNERS {
            let p = [
                (normal[0] + u * u_axis[0] + v * v_axis[0]) * hx,
                (normal[1] + u * u_axis[1] + v * v_axis[1]) * hy,
                (normal[2] + u * u_axis[2] + v * v_axis[2]) * hz,
            ];
            positions.extend_from_slice(&p);
            normals.extend_from_slice(&normal);
            uvs.extend_from_slice(&[(u + 1.0) * 0.5, (v + 1.0) * 0.5]);
        }
    }

    MeshSource::new()
        .with_attribute(POSITION_ATTRIBUTE, AttributeBuffer::position(positions))
        .with_attribute("normal", AttributeBuffer::normal(normals))
        .with_attribute("uv", AttributeBuffer::uv(uvs))
}

/// Generate a quad on the XY plane centered at the origin.
///
/// Produces a 6-vertex triangle soup with `position` and `uv` attributes.
/// UV coordinates go from (0,0) at bottom-left to (1,1) at top-right.
///
/// # Arguments
///
/// * `half_width` - Half the width along the X axis
/// * `half_height` - Half the height along the Y axis
pub fn generate_quad(half_width: f32, half_height: f32) -> MeshSource {
    let mut positions = Vec::with_capacity(6 * 3);
    let mut uvs = Vec::with_capacity(6 * 2);

    for (u, v) in FACE_CORNERS {
        positions.extend_from_slice(&[u * half_width, v * half_height, 0.0]);
        uvs.extend_from_slice(&[(u + 1.0) * 0.5, (v + 1.0) * 0.5]);
    }

    MeshSource::new()
        .with_attribute(POSITION_ATTRIBUTE, AttributeBuffer::position(positions))
        .with_attribute("uv", AttributeBuffer::uv(uvs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_brick() {
        let brick = generate_brick([0.5, 0.5, 0.5]);
        assert_eq!(brick.vertex_count(), Some(36));
        assert_eq!(brick.attribute_count(), 3);
        // 36 vertices * 3 components
        assert_eq!(brick.get("position").unwrap().data().len(), 108);
        assert_eq!(brick.get("normal").unwrap().data().len(), 108);
        // 36 vertices * 2 components
        assert_eq!(brick.get("uv").unwrap().data().len(), 72);
    }

    #[test]
    fn test_brick_stays_in_extents() {
        let brick = generate_brick([1.0, 2.0, 3.0]);
        let positions = brick.get("position").unwrap().data().as_f32().unwrap();
        for p in positions.chunks_exact(3) {
            assert!(p[0].abs() <= 1.0 + 1e-6);
            assert!(p[1].abs() <= 2.0 + 1e-6);
            assert!(p[2].abs() <= 3.0 + 1e-6);
        }
    }

    #[test]
    fn test_brick_normals_are_unit_axes() {
        let brick = generate_brick([0.5, 0.5, 0.5]);
        let normals = brick.get("normal").unwrap().data().as_f32().unwrap();
        for n in normals.chunks_exact(3) {
            let norm = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((norm - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_generate_quad() {
        let quad = generate_quad(0.5, 1.0);
        assert_eq!(quad.vertex_count(), Some(6));
        assert_eq!(quad.attribute_count(), 2);
        let positions = quad.get("position").unwrap().data().as_f32().unwrap();
        for p in positions.chunks_exact(3) {
            assert!(p[0].abs() <= 0.5 && p[1].abs() <= 1.0);
            assert_eq!(p[2], 0.0);
        }
    }
}
