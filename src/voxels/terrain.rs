//! # Terrain Module
//!
//! The terrain generator is an external collaborator: the world only needs a pure
//! function from world coordinates (plus a fixed seed) to voxel ids. This module
//! defines that seam and a handful of simple generators.
//!
//! Multiple generation strategies are provided:
//! - Height field from Perlin noise for natural-looking terrain
//! - Checkerboard pattern, the worst case for meshing
//! - Solid chunks (all blocks filled)
//! - Empty chunks (all blocks air)

use cgmath::Point3;
use noise::{NoiseFn, Perlin};

use super::{
    block::{VoxelId, VoxelKind, AIR},
    chunk::{chunk_index::WorldLayout, voxel_grid::VoxelGrid},
};

/// Produces the voxel id of any world coordinate.
///
/// Implementations must be deterministic: the same coordinate always yields the
/// same id.
pub trait TerrainGenerator {
    /// The voxel id at a world coordinate.
    fn voxel_at(&self, world_position: Point3<i32>) -> VoxelId;

    /// Fills the grid of the chunk at `chunk_position`.
    ///
    /// The default evaluates [`TerrainGenerator::voxel_at`] once per cell;
    /// generators with per-column work can override it.
    fn fill_chunk(&self, chunk_position: Point3<i32>, layout: &WorldLayout) -> VoxelGrid {
        let origin = layout.chunk_origin(chunk_position);
        VoxelGrid::from_fn(layout, |local| {
            self.voxel_at(Point3::new(
                origin.x + local.x,
                origin.y + local.y,
                origin.z + local.z,
            ))
        })
    }
}

/// Generates nothing but air.
#[derive(Copy, Clone, Debug, Default)]
pub struct EmptyTerrain;

impl TerrainGenerator for EmptyTerrain {
    fn voxel_at(&self, _world_position: Point3<i32>) -> VoxelId {
        AIR
    }

    fn fill_chunk(&self, _chunk_position: Point3<i32>, layout: &WorldLayout) -> VoxelGrid {
        VoxelGrid::empty(layout)
    }
}

/// Fills every cell with one material.
#[derive(Copy, Clone, Debug)]
pub struct SolidTerrain(pub VoxelId);

impl TerrainGenerator for SolidTerrain {
    fn voxel_at(&self, _world_position: Point3<i32>) -> VoxelId {
        self.0
    }
}

/// Alternates solid and air cells in all three directions.
///
/// Every solid cell exposes all six faces, which makes this the largest possible
/// mesh for a chunk.
#[derive(Copy, Clone, Debug)]
pub struct CheckerboardTerrain(pub VoxelId);

impl TerrainGenerator for CheckerboardTerrain {
    fn voxel_at(&self, world_position: Point3<i32>) -> VoxelId {
        let Point3 { x, y, z } = world_position;
        if (x + y + z).rem_euclid(2) == 0 {
            self.0
        } else {
            AIR
        }
    }
}

/// Scaling factor applied to world coordinates when sampling the base octave.
pub const HEIGHTMAP_FREQUENCY: f64 = 0.005;

/// Rolling hills from four octaves of 2D Perlin noise, layered by altitude.
///
/// Columns are stone below the surface; the surface voxel is sand, grass, dirt,
/// stone or snow depending on how high it sits relative to the world.
#[derive(Clone, Debug)]
pub struct HeightmapTerrain {
    perlin: Perlin,
    /// Mean surface height in voxels.
    base_height: f64,
    /// Top of the world in voxels.
    world_top: i32,
}

impl HeightmapTerrain {
    /// Creates a height field for a world of the given layout.
    ///
    /// # Arguments
    /// * `seed` - Noise seed; equal seeds give identical worlds
    /// * `layout` - The world the terrain will fill; the surface oscillates around
    ///   half its height
    pub fn new(seed: u32, layout: &WorldLayout) -> Self {
        let world_top = layout.dimensions().1 * layout.chunk_size();
        HeightmapTerrain {
            perlin: Perlin::new(seed),
            base_height: world_top as f64 * 0.5,
            world_top,
        }
    }

    /// The surface height of the column at `(x, z)`, clamped to `1..=world_top`.
    pub fn height_at(&self, x: i32, z: i32) -> i32 {
        let (x, z) = (x as f64, z as f64);
        let amplitude = self.base_height;
        let mut height = 0.0;
        let mut frequency = HEIGHTMAP_FREQUENCY;
        let mut octave_amplitude = amplitude;
        for _ in 0..4 {
            height += self.perlin.get([x * frequency, z * frequency]) * octave_amplitude;
            frequency *= 2.0;
            octave_amplitude *= 0.5;
        }

        ((height + amplitude) as i32).clamp(1, self.world_top)
    }

    fn surface_material(&self, y: i32) -> VoxelId {
        let level = y as f64 / self.world_top as f64;
        let kind = if level >= 0.56 {
            VoxelKind::SNOW
        } else if level >= 0.51 {
            VoxelKind::STONE
        } else if level >= 0.42 {
            VoxelKind::DIRT
        } else if level >= 0.08 {
            VoxelKind::GRASS
        } else {
            VoxelKind::SAND
        };
        kind.id()
    }

    fn column_voxel(&self, y: i32, surface: i32) -> VoxelId {
        if y >= surface {
            AIR
        } else if y < surface - 1 {
            VoxelKind::STONE.id()
        } else {
            self.surface_material(y)
        }
    }
}

impl TerrainGenerator for HeightmapTerrain {
    fn voxel_at(&self, world_position: Point3<i32>) -> VoxelId {
        let surface = self.height_at(world_position.x, world_position.z);
        self.column_voxel(world_position.y, surface)
    }

    fn fill_chunk(&self, chunk_position: Point3<i32>, layout: &WorldLayout) -> VoxelGrid {
        let size = layout.chunk_size();
        let origin = layout.chunk_origin(chunk_position);
        let mut voxels = vec![AIR; layout.chunk_volume()];

        for x in 0..size {
            for z in 0..size {
                let surface = self.height_at(origin.x + x, origin.z + z);
                let local_top = (surface - origin.y).min(size);
                for y in 0..local_top.max(0) {
                    let index = layout.local_index(Point3::new(x, y, z));
                    voxels[index] = self.column_voxel(origin.y + y, surface);
                }
            }
        }

        VoxelGrid::from_voxels(layout, voxels).unwrap_or_else(|| VoxelGrid::empty(layout))
    }
}
