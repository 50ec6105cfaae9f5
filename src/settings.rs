//! # Settings Module
//!
//! Startup configuration for the voxel world. Settings are read once (usually from a
//! JSON file), validated, and never change while a world is alive.
//!
//! ## Validation
//!
//! The packed vertex format leaves 6 bits per coordinate and 8 bits for the voxel
//! id, so chunk sizes above 63 and material ids above 255 are rejected here, before
//! any chunk is built.
//!
//! ```
//! use voxel_world_core::settings::WorldSettings;
//!
//! let settings = WorldSettings::from_json(r#"{ "chunk_size": 16, "world_width": 4 }"#).unwrap();
//! assert_eq!(settings.chunk_size, 16);
//! assert_eq!(settings.world_height, 2);
//! ```

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::voxels::{
    block::{VoxelId, VoxelKind, AIR},
    chunk::chunk_index::WorldLayout,
};

/// Default chunk edge length in voxels.
pub const DEFAULT_CHUNK_SIZE: u32 = 48;
/// Default world width and depth in chunks.
pub const DEFAULT_WORLD_WIDTH: u32 = 2;
/// Default world height in chunks.
pub const DEFAULT_WORLD_HEIGHT: u32 = 2;
/// Default reach of the voxel picking ray, in voxels.
pub const DEFAULT_MAX_RAY_DISTANCE: f32 = 6.0;
/// Longest accepted picking ray, in voxels.
pub const MAX_RAY_DISTANCE: f32 = 1024.0;

/// Fatal configuration problems, reported before any chunk is built.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The chunk edge does not fit the 6-bit packed vertex coordinates.
    #[error("chunk size {0} is outside the supported range 1..=63")]
    ChunkSizeOutOfRange(u32),

    /// At least one world dimension is zero.
    #[error("world dimensions {width}x{height}x{depth} must all be non-zero")]
    EmptyWorld {
        /// Requested width in chunks.
        width: u32,
        /// Requested height in chunks.
        height: u32,
        /// Requested depth in chunks.
        depth: u32,
    },

    /// The world cannot be addressed with `i32` voxel coordinates.
    #[error("world dimensions {width}x{height}x{depth} are too large")]
    WorldTooLarge {
        /// Requested width in chunks.
        width: u32,
        /// Requested height in chunks.
        height: u32,
        /// Requested depth in chunks.
        depth: u32,
    },

    /// The ray reach is not in `(0, MAX_RAY_DISTANCE]`.
    #[error("max ray distance {0} is outside the supported range (0, 1024]")]
    InvalidRayDistance(f32),

    /// The material is neither a known name nor a number.
    #[error("unknown material `{0}`")]
    UnknownMaterial(String),

    /// The material id does not fit the 8-bit packed voxel field.
    #[error("material id {0} does not fit in 8 bits")]
    MaterialOutOfRange(u32),

    /// Air cannot be selected as a building material.
    #[error("air cannot be used as a placeable material")]
    AirMaterial,

    /// The settings document could not be parsed.
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Startup configuration for the world and the voxel handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    /// Edge length of a chunk in voxels, `1..=63`.
    pub chunk_size: u32,
    /// World width (X) in chunks.
    pub world_width: u32,
    /// World height (Y) in chunks.
    pub world_height: u32,
    /// World depth (Z) in chunks.
    pub world_depth: u32,
    /// How far the picking ray reaches, in voxels.
    pub max_ray_distance: f32,
    /// Material placed by the voxel handler: a name such as `"dirt"` or a numeric id.
    pub default_material: String,
}

impl Default for WorldSettings {
    fn default() -> Self {
        WorldSettings {
            chunk_size: DEFAULT_CHUNK_SIZE,
            world_width: DEFAULT_WORLD_WIDTH,
            world_height: DEFAULT_WORLD_HEIGHT,
            world_depth: DEFAULT_WORLD_WIDTH,
            max_ray_distance: DEFAULT_MAX_RAY_DISTANCE,
            default_material: "dirt".to_string(),
        }
    }
}

impl WorldSettings {
    /// Parses and validates settings from a JSON document.
    ///
    /// Missing fields take their default values.
    ///
    /// # Errors
    /// Returns [`SettingsError::Parse`] for malformed JSON, or the first
    /// validation failure.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: WorldSettings = serde_json::from_str(json)?;
        let layout = settings.validate()?;
        info!(
            "Loaded world settings: {}x{}x{} chunks of {} voxels",
            settings.world_width, settings.world_height, settings.world_depth, layout.chunk_size()
        );
        Ok(settings)
    }

    /// Checks every field and returns the resulting world layout.
    ///
    /// # Errors
    /// Returns the first [`SettingsError`] encountered.
    pub fn validate(&self) -> Result<WorldLayout, SettingsError> {
        let layout = WorldLayout::new(
            self.chunk_size,
            self.world_width,
            self.world_height,
            self.world_depth,
        )?;
        if !(self.max_ray_distance > 0.0 && self.max_ray_distance <= MAX_RAY_DISTANCE) {
            return Err(SettingsError::InvalidRayDistance(self.max_ray_distance));
        }
        self.default_material_id()?;
        Ok(layout)
    }

    /// Resolves `default_material` to a voxel id.
    ///
    /// # Errors
    /// Fails for unknown names, ids above 255, and air.
    pub fn default_material_id(&self) -> Result<VoxelId, SettingsError> {
        resolve_material(&self.default_material)
    }
}

/// Resolves a material given by name or by decimal id.
///
/// # Errors
/// Returns [`SettingsError::UnknownMaterial`] if the value is neither,
/// [`SettingsError::MaterialOutOfRange`] for ids above 255, and
/// [`SettingsError::AirMaterial`] for air.
pub fn resolve_material(material: &str) -> Result<VoxelId, SettingsError> {
    let trimmed = material.trim();
    let id = match VoxelKind::from_name(&trimmed.to_ascii_lowercase()) {
        Some(kind) => kind.id(),
        None => {
            let raw: u32 = trimmed
                .parse()
                .map_err(|_| SettingsError::UnknownMaterial(material.to_string()))?;
            VoxelId::try_from(raw).map_err(|_| SettingsError::MaterialOutOfRange(raw))?
        }
    };

    if id == AIR {
        return Err(SettingsError::AirMaterial);
    }
    Ok(id)
}
