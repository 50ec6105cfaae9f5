#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World Core
//!
//! The CPU side of a chunked voxel world: voxel storage, chunk addressing, mesh
//! generation with per-corner ambient occlusion, and ray picking with add/remove
//! edits that keep chunk meshes up to date.
//!
//! The crate produces vertex buffers but does not own a GPU device or a window.
//! Terrain, frustum tests and drawing are supplied by the caller through the
//! [`voxels::terrain::TerrainGenerator`], [`rendering::Frustum`] and
//! [`rendering::ChunkRenderer`] traits.
//!
//! ## Key Modules
//!
//! * `settings` - Startup configuration and its validation
//! * `voxels` - Voxel grids, chunks, the world and the voxel handler
//! * `rendering` - Packed vertex format and chunk meshing
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::{Point3, Vector3};
//! use voxel_world_core::settings::WorldSettings;
//! use voxel_world_core::voxels::{
//!     terrain::HeightmapTerrain,
//!     voxel_handler::{Ray, VoxelHandler},
//!     world::World,
//! };
//!
//! voxel_world_core::init_logger();
//!
//! let settings = WorldSettings::from_json(r#"{ "chunk_size": 16 }"#).unwrap();
//! let layout = settings.validate().unwrap();
//! let mut world = World::build(&settings, &HeightmapTerrain::new(42, &layout)).unwrap();
//! let mut handler = VoxelHandler::new(&settings).unwrap();
//!
//! let eye = Ray { origin: Point3::new(8.5, 30.5, 8.5), direction: Vector3::new(0.0, -1.0, 0.0) };
//! if handler.update(&world, &eye).is_some() {
//!     handler.set_voxel(&mut world);
//! }
//! ```

use log::info;

pub mod rendering;
pub mod settings;
pub mod voxels;

// Re-export commonly used types
pub use rendering::{vertex::PackedVertex, ChunkRenderer, Frustum};
pub use settings::{SettingsError, WorldSettings};
pub use voxels::{voxel_handler::VoxelHandler, world::World};

/// Installs a stdout logger configured from `RUST_LOG`.
///
/// Safe to call more than once; later calls leave the first logger in place.
pub fn init_logger() {
    let mut log_builder = env_logger::Builder::new();
    let installed = log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .try_init()
        .is_ok();

    if installed {
        info!("Logger initialized");
    }
}
