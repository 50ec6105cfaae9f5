//! # World Grids Module
//!
//! The arena holding the voxel grid of every chunk, indexed by chunk index.
//!
//! This is the read-only view meshing needs to look across chunk boundaries: it
//! resolves any world coordinate to a voxel id, answering "void" for everything
//! outside the world so the outer shell of the world is always drawn.

use cgmath::Point3;

use super::{
    block::{VoxelId, AIR},
    chunk::{
        chunk_index::{ChunkLocation, WorldLayout},
        voxel_grid::VoxelGrid,
    },
};

/// The voxel grids of all chunks plus the layout needed to address them.
#[derive(Clone, Debug)]
pub struct WorldGrids {
    layout: WorldLayout,
    grids: Vec<VoxelGrid>,
}

impl WorldGrids {
    /// Creates an arena of all-air grids, one per chunk.
    pub fn new(layout: WorldLayout) -> Self {
        WorldGrids {
            layout,
            grids: vec![VoxelGrid::empty(&layout); layout.world_volume()],
        }
    }

    /// The layout shared by every grid.
    pub fn layout(&self) -> &WorldLayout {
        &self.layout
    }

    /// Number of grids, equal to the number of chunks.
    pub fn len(&self) -> usize {
        self.grids.len()
    }

    /// Whether the arena holds no grids.
    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    /// The grid of the chunk at `chunk_index`.
    pub fn grid(&self, chunk_index: usize) -> Option<&VoxelGrid> {
        self.grids.get(chunk_index)
    }

    /// Replaces the grid of the chunk at `chunk_index`.
    ///
    /// # Returns
    /// `false` if the index is out of range or the grid was built for another
    /// chunk size.
    pub fn replace(&mut self, chunk_index: usize, grid: VoxelGrid) -> bool {
        if grid.chunk_size() != self.layout.chunk_size() {
            return false;
        }
        match self.grids.get_mut(chunk_index) {
            Some(slot) => {
                *slot = grid;
                true
            }
            None => false,
        }
    }

    /// Resolves a world coordinate to its chunk and cell.
    pub fn locate(&self, world_position: Point3<i32>) -> Option<ChunkLocation> {
        self.layout.world_to_chunk(world_position)
    }

    /// Reads the voxel at a resolved location.
    pub fn voxel_at(&self, location: &ChunkLocation) -> VoxelId {
        self.grids
            .get(location.chunk_index)
            .and_then(|grid| grid.get_index(location.voxel_index))
            .unwrap_or(AIR)
    }

    /// Reads the voxel at a world coordinate, `0` outside the world.
    pub fn voxel_id(&self, world_position: Point3<i32>) -> VoxelId {
        self.locate(world_position)
            .map_or(AIR, |location| self.voxel_at(&location))
    }

    /// Whether the cell at `world_position` counts as open space.
    ///
    /// Coordinates outside the world are void so that boundary faces of the world
    /// are drawn; inside the world a cell is void iff its id is `0`. Every lookup
    /// is bounds-checked.
    pub fn is_void(&self, world_position: Point3<i32>) -> bool {
        self.voxel_id(world_position) == AIR
    }

    /// Overwrites the voxel at a resolved location.
    ///
    /// # Returns
    /// The previous id, or `None` if the location does not belong to this arena.
    pub(crate) fn write(&mut self, location: &ChunkLocation, voxel_id: VoxelId) -> Option<VoxelId> {
        self.grids
            .get_mut(location.chunk_index)?
            .set_index(location.voxel_index, voxel_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grids() -> WorldGrids {
        WorldGrids::new(WorldLayout::new(4, 2, 1, 1).unwrap())
    }

    #[test]
    fn outside_the_world_is_void() {
        let grids = grids();
        assert!(grids.is_void(Point3::new(-1, 0, 0)));
        assert!(grids.is_void(Point3::new(8, 0, 0)));
        assert!(grids.is_void(Point3::new(0, 4, 0)));
        assert!(grids.is_void(Point3::new(0, 0, -1)));
        assert_eq!(grids.voxel_id(Point3::new(i32::MIN, i32::MAX, 0)), AIR);
    }

    #[test]
    fn writes_are_visible_across_chunks() {
        let mut grids = grids();
        let location = grids.locate(Point3::new(5, 1, 2)).unwrap();
        assert_eq!(location.chunk_index, 1);

        assert_eq!(grids.write(&location, 4), Some(AIR));
        assert_eq!(grids.voxel_id(Point3::new(5, 1, 2)), 4);
        assert!(!grids.is_void(Point3::new(5, 1, 2)));
        assert!(grids.grid(0).unwrap().is_all_air());
    }

    #[test]
    fn replace_checks_index_and_size() {
        let mut grids = grids();
        let layout = *grids.layout();
        let other = WorldLayout::new(8, 1, 1, 1).unwrap();

        assert!(grids.replace(1, VoxelGrid::from_fn(&layout, |_| 3)));
        assert!(!grids.replace(2, VoxelGrid::empty(&layout)));
        assert!(!grids.replace(0, VoxelGrid::empty(&other)));
        assert_eq!(grids.voxel_id(Point3::new(7, 3, 3)), 3);
        assert_eq!(grids.voxel_id(Point3::new(3, 3, 3)), AIR);
    }
}
