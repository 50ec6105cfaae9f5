//! # World Module
//!
//! This module provides the `World` struct, which owns every chunk of a fixed-size
//! voxel world and answers voxel queries by world coordinate.
//!
//! ## Architecture
//!
//! Voxel ids and chunk bookkeeping are kept in two parallel arenas indexed by the
//! same chunk index:
//! - `grids`: the voxel grid of every chunk, read by meshing and ray casting
//! - `chunks`: meshes, transforms and flags
//!
//! Meshing one chunk borrows `grids` immutably while that chunk in `chunks` is
//! borrowed mutably, so neighbour lookups never alias the mesh being written.
//!
//! ## Rebuilds
//!
//! Edits mark chunks dirty in a bit vector; [`World::rebuild_dirty`] re-meshes
//! exactly the marked chunks, each once, before the next render.

use bitvec::prelude::BitVec;
use cgmath::Point3;
use log::{debug, info, warn};
use web_time::Instant;

use crate::{
    rendering::{ChunkRenderer, Frustum},
    settings::{SettingsError, WorldSettings},
};

use super::{
    block::{VoxelId, AIR},
    bounds::Aabb,
    chunk::{
        chunk_index::{ChunkLocation, WorldLayout},
        Chunk,
    },
    grids::WorldGrids,
    terrain::TerrainGenerator,
};

/// A voxel world made of a fixed 3D grid of chunks.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_world_core::settings::WorldSettings;
/// use voxel_world_core::voxels::{terrain::SolidTerrain, world::World};
///
/// let settings = WorldSettings {
///     chunk_size: 8,
///     world_width: 2,
///     world_height: 1,
///     world_depth: 1,
///     ..WorldSettings::default()
/// };
/// let world = World::build(&settings, &SolidTerrain(3)).unwrap();
///
/// assert_eq!(world.voxel_id(Point3::new(12, 4, 4)), 3);
/// assert_eq!(world.voxel_id(Point3::new(16, 4, 4)), 0);
/// ```
#[derive(Clone, Debug)]
pub struct World {
    /// Voxel ids of every chunk.
    grids: WorldGrids,
    /// Per-chunk meshes and flags, indexed like `grids`.
    chunks: Vec<Chunk>,
    /// One bit per chunk: set while the chunk's mesh is stale.
    dirty: BitVec,
}

impl World {
    /// Creates a world of empty, unmeshed chunks.
    pub fn new(layout: WorldLayout) -> Self {
        let chunk_count = layout.world_volume();
        let chunks = (0..chunk_count)
            .map(|index| Chunk::new(layout.chunk_position(index), index, &layout))
            .collect();

        World {
            grids: WorldGrids::new(layout),
            chunks,
            dirty: BitVec::repeat(false, chunk_count),
        }
    }

    /// Validates `settings`, then generates and meshes the whole world.
    ///
    /// # Errors
    /// Returns the first problem found in `settings`; no chunk is built then.
    pub fn build(settings: &WorldSettings, terrain: &dyn TerrainGenerator) -> Result<Self, SettingsError> {
        let layout = settings.validate()?;
        let mut world = World::new(layout);
        world.build_all(terrain);
        Ok(world)
    }

    /// Fills every chunk from `terrain` and meshes the world.
    ///
    /// Chunks are visited in nested `x`, `y`, `z` order. All grids are generated
    /// before the first mesh is built, so boundary faces see their final
    /// neighbours.
    pub fn build_all(&mut self, terrain: &dyn TerrainGenerator) {
        let start = Instant::now();
        let layout = *self.grids.layout();
        let (width, height, depth) = layout.dimensions();

        for x in 0..width {
            for y in 0..height {
                for z in 0..depth {
                    let Some(index) = layout.chunk_index(Point3::new(x, y, z)) else {
                        continue;
                    };
                    let Some(chunk) = self.chunks.get_mut(index) else {
                        continue;
                    };
                    let grid = chunk.build_voxels(terrain, &layout);
                    if !self.grids.replace(index, grid) {
                        warn!("Generated grid does not fit chunk {}, keeping it empty", index);
                        chunk.set_empty(true);
                    }
                }
            }
        }
        let generated = start.elapsed();

        for chunk in self.chunks.iter_mut() {
            chunk.build_mesh(&self.grids);
        }
        self.dirty.fill(false);

        let vertex_count: usize = self.chunks.iter().map(|chunk| chunk.mesh().vertex_count()).sum();
        info!(
            "Built {} chunks ({} vertices): voxels in {:?}, meshes in {:?}",
            self.chunks.len(),
            vertex_count,
            generated,
            start.elapsed() - generated
        );
    }

    /// The layout of this world.
    pub fn layout(&self) -> &WorldLayout {
        self.grids.layout()
    }

    /// Read-only access to the voxel grids of all chunks.
    pub fn grids(&self) -> &WorldGrids {
        &self.grids
    }

    /// All chunks, indexed by chunk index.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// The chunk at `chunk_index`.
    pub fn chunk(&self, chunk_index: usize) -> Option<&Chunk> {
        self.chunks.get(chunk_index)
    }

    /// The chunk containing the voxel at `world_position`.
    pub fn chunk_at_world(&self, world_position: Point3<i32>) -> Option<&Chunk> {
        self.locate(world_position)
            .and_then(|location| self.chunks.get(location.chunk_index))
    }

    /// Resolves a world coordinate to its chunk and cell.
    pub fn locate(&self, world_position: Point3<i32>) -> Option<ChunkLocation> {
        self.grids.locate(world_position)
    }

    /// The voxel id at a world coordinate; `0` outside the world.
    pub fn voxel_id(&self, world_position: Point3<i32>) -> VoxelId {
        self.grids.voxel_id(world_position)
    }

    /// The voxel id of the cell containing a continuous world position.
    pub fn voxel_id_at(&self, position: Point3<f32>) -> VoxelId {
        self.voxel_id(floor(position))
    }

    /// The unit box of the cell containing a continuous world position, for
    /// collision queries.
    pub fn voxel_bounds(&self, position: Point3<f32>) -> Aabb {
        Aabb::voxel(floor(position))
    }

    /// Writes a voxel and marks its chunk dirty.
    ///
    /// Keeps the chunk's empty flag in sync. Boundary neighbours are not marked;
    /// see [`World::mark_boundary_neighbours_dirty`].
    ///
    /// # Returns
    /// The previous id, or `None` if `location` is not part of this world.
    pub(crate) fn set_voxel(&mut self, location: &ChunkLocation, voxel_id: VoxelId) -> Option<VoxelId> {
        let previous = self.grids.write(location, voxel_id)?;
        let index = location.chunk_index;

        if let Some(chunk) = self.chunks.get_mut(index) {
            if voxel_id != AIR {
                chunk.set_empty(false);
            } else if let Some(grid) = self.grids.grid(index) {
                chunk.set_empty(grid.is_all_air());
            }
        }
        self.mark_dirty(index);
        debug!(
            "Voxel {:?} in chunk {} set {} -> {}",
            location.local_position, index, previous, voxel_id
        );
        Some(previous)
    }

    /// Schedules the chunk at `chunk_index` for a rebuild.
    ///
    /// # Returns
    /// `false` if no such chunk exists.
    pub fn mark_dirty(&mut self, chunk_index: usize) -> bool {
        if chunk_index >= self.dirty.len() {
            return false;
        }
        self.dirty.set(chunk_index, true);
        true
    }

    /// Schedules the chunk at `chunk_position` for a rebuild.
    ///
    /// # Returns
    /// `false` if the position lies outside the world.
    pub fn mark_dirty_at(&mut self, chunk_position: Point3<i32>) -> bool {
        match self.layout().chunk_index(chunk_position) {
            Some(index) => self.mark_dirty(index),
            None => false,
        }
    }

    /// Marks every other chunk whose mesh can depend on the voxel at `location`.
    ///
    /// Faces and their ambient occlusion read cells up to one step away on each
    /// axis, so a voxel on a chunk face marks that neighbour, a voxel on a chunk
    /// edge also marks the chunk across the edge, and a corner voxel marks all
    /// seven chunks around the corner. Neighbours outside the world are skipped.
    ///
    /// # Returns
    /// How many neighbour chunks were marked.
    pub fn mark_boundary_neighbours_dirty(&mut self, location: &ChunkLocation) -> usize {
        let last = self.layout().chunk_size() - 1;
        let reach = |coordinate: i32| {
            let low = if coordinate == 0 { -1 } else { 0 };
            let high = if coordinate == last { 1 } else { 0 };
            low..=high
        };
        let local = location.local_position;
        let chunk = location.chunk_position;
        let mut marked = 0;

        for dx in reach(local.x) {
            for dy in reach(local.y) {
                for dz in reach(local.z) {
                    if (dx, dy, dz) == (0, 0, 0) {
                        continue;
                    }
                    let neighbour = Point3::new(chunk.x + dx, chunk.y + dy, chunk.z + dz);
                    marked += self.mark_dirty_at(neighbour) as usize;
                }
            }
        }
        marked
    }

    /// Whether the chunk at `chunk_index` awaits a rebuild.
    pub fn is_dirty(&self, chunk_index: usize) -> bool {
        self.dirty.get(chunk_index).map_or(false, |bit| *bit)
    }

    /// Re-meshes every dirty chunk once and clears the marks.
    ///
    /// # Returns
    /// The number of chunks rebuilt.
    pub fn rebuild_dirty(&mut self) -> usize {
        let dirty: Vec<usize> = self.dirty.iter_ones().collect();
        for &index in &dirty {
            if let Some(chunk) = self.chunks.get_mut(index) {
                chunk.rebuild(&self.grids);
            }
        }
        self.dirty.fill(false);

        if !dirty.is_empty() {
            debug!("Rebuilt chunks {:?}", dirty);
        }
        dirty.len()
    }

    /// Draws every visible, non-empty chunk.
    ///
    /// # Returns
    /// The number of chunks drawn.
    pub fn render<F, R>(&self, frustum: &F, renderer: &mut R) -> usize
    where
        F: Frustum + ?Sized,
        R: ChunkRenderer + ?Sized,
    {
        self.chunks
            .iter()
            .filter(|chunk| chunk.render(frustum, renderer))
            .count()
    }
}

fn floor(position: Point3<f32>) -> Point3<i32> {
    Point3::new(
        position.x.floor() as i32,
        position.y.floor() as i32,
        position.z.floor() as i32,
    )
}
