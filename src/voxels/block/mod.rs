//! # Block Module
//!
//! This module provides the voxel id type shared by every grid, the catalogue of
//! known materials, and the face directions used by meshing and ray picking.

use num_derive::FromPrimitive;
use phf::phf_map;

pub mod block_side;

/// The underlying integer type used to store a voxel's material in a grid.
///
/// `0` is always air: it produces no faces and is treated as void by ambient
/// occlusion and ray casting. The packed vertex reserves 8 bits for this value.
pub type VoxelId = u8;

/// The id of an empty cell.
pub const AIR: VoxelId = 0;

/// Enumerates the materials the terrain generators and the voxel handler know about.
///
/// Any id in `1..=255` is a valid solid voxel; this enum only names the ones with
/// textures in the default atlas.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
#[repr(u8)]
pub enum VoxelKind {
    /// Empty space.
    AIR = 0,
    /// Beach sand, found below the grass line.
    SAND = 1,
    /// Grass-topped soil.
    GRASS = 2,
    /// Plain dirt, the default building material.
    DIRT = 3,
    /// Bedrock and mountain faces.
    STONE = 4,
    /// Mountain caps.
    SNOW = 5,
    /// Tree foliage.
    LEAVES = 6,
    /// Tree trunks.
    WOOD = 7,
}

/// Maps lowercase material names to their kind, used when reading settings.
static MATERIAL_NAMES: phf::Map<&'static str, VoxelKind> = phf_map! {
    "air" => VoxelKind::AIR,
    "sand" => VoxelKind::SAND,
    "grass" => VoxelKind::GRASS,
    "dirt" => VoxelKind::DIRT,
    "stone" => VoxelKind::STONE,
    "snow" => VoxelKind::SNOW,
    "leaves" => VoxelKind::LEAVES,
    "wood" => VoxelKind::WOOD,
};

impl VoxelKind {
    /// Converts a stored voxel id back into a named material.
    ///
    /// # Returns
    /// `None` for ids that have no entry in the catalogue.
    pub fn from_id(id: VoxelId) -> Option<Self> {
        num::FromPrimitive::from_u8(id)
    }

    /// Looks up a material by its lowercase name (`"dirt"`, `"stone"`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        MATERIAL_NAMES.get(name).copied()
    }

    /// The id written into voxel grids for this material.
    pub fn id(self) -> VoxelId {
        self as VoxelId
    }
}
