//! # Block Side Module
//!
//! This module defines the six faces of a voxel. The discriminants are the face ids
//! written into packed vertices, so their order is part of the renderer contract.

use cgmath::Vector3;

/// The axis-aligned plane a face lies in, which selects the ring of eight
/// ambient occlusion samples around it.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum FacePlane {
    /// Faces perpendicular to the X axis (left, right).
    X,
    /// Faces perpendicular to the Y axis (top, bottom).
    Y,
    /// Faces perpendicular to the Z axis (back, front).
    Z,
}

/// Represents the six possible faces of a voxel block.
///
/// The order is: [TOP, BOTTOM, RIGHT, LEFT, BACK, FRONT], which is also the order
/// faces are emitted in for each voxel during meshing.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The top face (facing positive Y)
    TOP = 0,

    /// The bottom face (facing negative Y)
    BOTTOM = 1,

    /// The right face (facing positive X)
    RIGHT = 2,

    /// The left face (facing negative X)
    LEFT = 3,

    /// The back face (facing negative Z)
    BACK = 4,

    /// The front face (facing positive Z)
    FRONT = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in emission order.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::TOP,
            BlockSide::BOTTOM,
            BlockSide::RIGHT,
            BlockSide::LEFT,
            BlockSide::BACK,
            BlockSide::FRONT,
        ]
    }

    /// Converts a packed face id back into a side.
    pub fn from_id(id: u8) -> Option<Self> {
        Self::all().get(id as usize).copied()
    }

    /// Finds the side whose outward normal equals `normal`.
    ///
    /// # Returns
    /// `None` unless `normal` is one of the six axis-aligned unit vectors.
    pub fn from_normal(normal: Vector3<i32>) -> Option<Self> {
        Self::all().into_iter().find(|side| side.normal() == normal)
    }

    /// The face id stored in the 3-bit field of a packed vertex.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// The outward unit normal of this face.
    pub fn normal(self) -> Vector3<i32> {
        match self {
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
            BlockSide::BACK => Vector3::new(0, 0, -1),
            BlockSide::FRONT => Vector3::new(0, 0, 1),
        }
    }

    /// The plane this face lies in.
    pub fn plane(self) -> FacePlane {
        match self {
            BlockSide::TOP | BlockSide::BOTTOM => FacePlane::Y,
            BlockSide::RIGHT | BlockSide::LEFT => FacePlane::X,
            BlockSide::BACK | BlockSide::FRONT => FacePlane::Z,
        }
    }
}
