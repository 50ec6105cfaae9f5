//! Per-corner ambient occlusion for voxel faces.
//!
//! A visible face looks into a void neighbour cell. The eight cells ringing that
//! neighbour in the face's plane decide how much light reaches each of the four
//! quad corners: every corner counts the open cells among the two edge cells and
//! one diagonal cell touching it.

use cgmath::{Point3, Vector3};

use crate::voxels::{block::block_side::FacePlane, grids::WorldGrids};

/// Ring of samples around the neighbour cell of a TOP or BOTTOM face, in the order
/// `a b c d e f g h`.
const Y_PLANE_RING: [Vector3<i32>; 8] = [
    Vector3::new(0, 0, -1),
    Vector3::new(-1, 0, -1),
    Vector3::new(-1, 0, 0),
    Vector3::new(-1, 0, 1),
    Vector3::new(0, 0, 1),
    Vector3::new(1, 0, 1),
    Vector3::new(1, 0, 0),
    Vector3::new(1, 0, -1),
];

/// Ring of samples for RIGHT and LEFT faces.
const X_PLANE_RING: [Vector3<i32>; 8] = [
    Vector3::new(0, 0, -1),
    Vector3::new(0, -1, -1),
    Vector3::new(0, -1, 0),
    Vector3::new(0, -1, 1),
    Vector3::new(0, 0, 1),
    Vector3::new(0, 1, 1),
    Vector3::new(0, 1, 0),
    Vector3::new(0, 1, -1),
];

/// Ring of samples for BACK and FRONT faces.
const Z_PLANE_RING: [Vector3<i32>; 8] = [
    Vector3::new(-1, 0, 0),
    Vector3::new(-1, -1, 0),
    Vector3::new(0, -1, 0),
    Vector3::new(1, -1, 0),
    Vector3::new(1, 0, 0),
    Vector3::new(1, 1, 0),
    Vector3::new(0, 1, 0),
    Vector3::new(-1, 1, 0),
];

/// Occlusion values for the four corners of one face.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CornerOcclusion {
    /// Open-cell count per corner `v0..v3`, each in `0..=3`.
    pub ao: [u8; 4],
    /// Split the quad along the `v1-v3` diagonal instead of `v0-v2`.
    pub flipped: bool,
}

fn ring(plane: FacePlane) -> [Vector3<i32>; 8] {
    match plane {
        FacePlane::X => X_PLANE_RING,
        FacePlane::Y => Y_PLANE_RING,
        FacePlane::Z => Z_PLANE_RING,
    }
}

/// Samples the occlusion around `neighbour`, the void cell a face looks into.
///
/// Samples outside the world count as open, like every other void lookup.
pub fn corner_occlusion(
    grids: &WorldGrids,
    neighbour: Point3<i32>,
    plane: FacePlane,
) -> CornerOcclusion {
    let open = ring(plane).map(|offset| grids.is_void(neighbour + offset) as u8);
    let [a, b, c, d, e, f, g, h] = open;
    let ao = [a + b + c, g + h + a, e + f + g, c + d + e];

    CornerOcclusion {
        ao,
        flipped: ao[1] + ao[3] > ao[0] + ao[2],
    }
}
