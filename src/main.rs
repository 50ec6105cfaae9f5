//! # Voxel World Demo
//!
//! Builds a height-field world, picks the voxel below a fixed eye position and
//! removes it, logging what happens along the way.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=debug cargo run --release -- settings.json
//! ```
//!
//! Without an argument the default settings are used.

use std::process::ExitCode;

use cgmath::{Point3, Vector3};
use log::{error, info};
use voxel_world_core::{
    voxels::{
        terrain::HeightmapTerrain,
        voxel_handler::{Ray, VoxelHandler},
    },
    SettingsError, World, WorldSettings,
};

const TERRAIN_SEED: u32 = 42;

fn run() -> Result<(), SettingsError> {
    let settings = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => WorldSettings::from_json(&json)?,
            Err(err) => {
                error!("Can't read {}: {}, using defaults", path, err);
                WorldSettings::default()
            }
        },
        None => WorldSettings::default(),
    };

    let layout = settings.validate()?;
    let terrain = HeightmapTerrain::new(TERRAIN_SEED, &layout);
    let mut world = World::build(&settings, &terrain)?;
    let mut handler = VoxelHandler::new(&settings)?;

    let x = layout.chunk_size() / 2;
    let surface = terrain.height_at(x, x);
    let eye = Ray {
        origin: Point3::new(x as f32 + 0.5, surface as f32 + 2.5, x as f32 + 0.5),
        direction: Vector3::new(0.0, -1.0, 0.0),
    };

    match handler.update(&world, &eye).copied() {
        Some(hit) => {
            info!("Looking at voxel {} at {:?}", hit.voxel_id, hit.world_position);
            if handler.set_voxel(&mut world) {
                info!(
                    "Removed it; voxel is now {}",
                    world.voxel_id(hit.world_position)
                );
            }
        }
        None => info!("Nothing within reach"),
    }
    Ok(())
}

fn main() -> ExitCode {
    voxel_world_core::init_logger();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
