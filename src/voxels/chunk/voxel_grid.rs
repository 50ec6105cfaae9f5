//! # Voxel Grid Module
//!
//! Flat storage of the voxel ids of one chunk.
//!
//! The grid holds `chunk_size³` ids in a single contiguous allocation, indexed by
//! `x + z * chunk_size + y * chunk_size²`. It is never resized after creation;
//! mutation only overwrites cells in place.

use cgmath::Point3;

use crate::voxels::block::{VoxelId, AIR};

use super::chunk_index::WorldLayout;

/// The voxel ids of one chunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelGrid {
    /// Edge length of the chunk.
    chunk_size: i32,
    /// `chunk_size³` voxel ids in `x`, then `z`, then `y` order.
    voxels: Box<[VoxelId]>,
}

impl VoxelGrid {
    /// Creates a grid where every cell is air.
    pub fn empty(layout: &WorldLayout) -> Self {
        VoxelGrid {
            chunk_size: layout.chunk_size(),
            voxels: vec![AIR; layout.chunk_volume()].into_boxed_slice(),
        }
    }

    /// Creates a grid by evaluating `voxel_at` for every local position, in
    /// storage order.
    pub fn from_fn<F>(layout: &WorldLayout, mut voxel_at: F) -> Self
    where
        F: FnMut(Point3<i32>) -> VoxelId,
    {
        let voxels = (0..layout.chunk_volume())
            .map(|index| voxel_at(layout.local_position(index)))
            .collect::<Vec<VoxelId>>();

        VoxelGrid {
            chunk_size: layout.chunk_size(),
            voxels: voxels.into_boxed_slice(),
        }
    }

    /// Wraps an existing buffer of ids.
    ///
    /// # Returns
    /// `None` unless `voxels` holds exactly one id per cell of the layout's chunks.
    pub fn from_voxels(layout: &WorldLayout, voxels: Vec<VoxelId>) -> Option<Self> {
        if voxels.len() != layout.chunk_volume() {
            return None;
        }
        Some(VoxelGrid {
            chunk_size: layout.chunk_size(),
            voxels: voxels.into_boxed_slice(),
        })
    }

    /// Edge length of the chunk this grid belongs to.
    pub fn chunk_size(&self) -> i32 {
        self.chunk_size
    }

    /// Number of cells in the grid.
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    /// Always `false`: a grid has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Reads the cell at `index`, or `None` if the index is out of range.
    pub fn get_index(&self, index: usize) -> Option<VoxelId> {
        self.voxels.get(index).copied()
    }

    /// Reads the cell at a chunk-local position.
    ///
    /// # Returns
    /// `None` if any axis lies outside `0..chunk_size`.
    pub fn get(&self, local_position: Point3<i32>) -> Option<VoxelId> {
        self.index_of(local_position)
            .map(|index| self.voxels[index])
    }

    /// Overwrites the cell at `index`.
    ///
    /// # Returns
    /// The previous id, or `None` if the index is out of range.
    pub fn set_index(&mut self, index: usize, voxel_id: VoxelId) -> Option<VoxelId> {
        let cell = self.voxels.get_mut(index)?;
        Some(std::mem::replace(cell, voxel_id))
    }

    /// Overwrites the cell at a chunk-local position.
    ///
    /// # Returns
    /// The previous id, or `None` if the position is out of range.
    pub fn set(&mut self, local_position: Point3<i32>, voxel_id: VoxelId) -> Option<VoxelId> {
        let index = self.index_of(local_position)?;
        self.set_index(index, voxel_id)
    }

    /// Whether every cell is air.
    pub fn is_all_air(&self) -> bool {
        self.voxels.iter().all(|&voxel_id| voxel_id == AIR)
    }

    /// Number of non-air cells.
    pub fn solid_count(&self) -> usize {
        self.voxels.iter().filter(|&&voxel_id| voxel_id != AIR).count()
    }

    /// Iterates over the non-air cells in storage order.
    pub fn solid_voxels(&self) -> SolidVoxelIterator<'_> {
        SolidVoxelIterator {
            grid: self,
            index: 0,
        }
    }

    fn index_of(&self, local_position: Point3<i32>) -> Option<usize> {
        let size = self.chunk_size;
        let Point3 { x, y, z } = local_position;
        if !(0..size).contains(&x) || !(0..size).contains(&y) || !(0..size).contains(&z) {
            return None;
        }
        Some((x + z * size + y * size * size) as usize)
    }
}

/// An iterator over all non-air cells in a voxel grid.
///
/// Yields `(local_position, voxel_id)` pairs with `x` varying fastest, then `z`,
/// then `y`, which is the order meshing emits faces in.
pub struct SolidVoxelIterator<'a> {
    /// Reference to the grid being iterated over
    grid: &'a VoxelGrid,
    /// Next storage index to inspect
    index: usize,
}

impl Iterator for SolidVoxelIterator<'_> {
    type Item = (Point3<i32>, VoxelId);

    fn next(&mut self) -> Option<Self::Item> {
        let voxels = &self.grid.voxels;
        while self.index < voxels.len() {
            let index = self.index;
            self.index += 1;

            let voxel_id = voxels[index];
            if voxel_id == AIR {
                continue;
            }

            let size = self.grid.chunk_size as usize;
            let area = size * size;
            let position = Point3::new(
                (index % size) as i32,
                (index / area) as i32,
                ((index % area) / size) as i32,
            );
            return Some((position, voxel_id));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> WorldLayout {
        WorldLayout::new(4, 1, 1, 1).unwrap()
    }

    #[test]
    fn empty_grid_is_all_air() {
        let grid = VoxelGrid::empty(&layout());
        assert_eq!(grid.len(), 64);
        assert!(grid.is_all_air());
        assert_eq!(grid.solid_count(), 0);
        assert_eq!(grid.solid_voxels().count(), 0);
    }

    #[test]
    fn positions_and_indices_address_the_same_cell() {
        let layout = layout();
        let mut grid = VoxelGrid::empty(&layout);
        let position = Point3::new(1, 2, 3);

        assert_eq!(grid.set(position, 9), Some(AIR));
        assert_eq!(grid.get_index(layout.local_index(position)), Some(9));
        assert_eq!(grid.get(position), Some(9));
        assert_eq!(grid.get_index(1 + 3 * 4 + 2 * 16).unwrap(), 9);
        assert!(!grid.is_all_air());
    }

    #[test]
    fn out_of_range_access_is_rejected() {
        let mut grid = VoxelGrid::empty(&layout());
        assert_eq!(grid.get(Point3::new(4, 0, 0)), None);
        assert_eq!(grid.get(Point3::new(0, -1, 0)), None);
        assert_eq!(grid.set(Point3::new(0, 0, 4), 1), None);
        assert_eq!(grid.set_index(64, 1), None);
        assert!(grid.is_all_air());
    }

    #[test]
    fn from_voxels_requires_exact_volume() {
        let layout = layout();
        assert!(VoxelGrid::from_voxels(&layout, vec![0; 63]).is_none());
        assert!(VoxelGrid::from_voxels(&layout, vec![1; 64]).is_some());
    }

    #[test]
    fn solid_voxels_follow_storage_order() {
        let layout = layout();
        let grid = VoxelGrid::from_fn(&layout, |p| if p.x == 3 { 2 } else { AIR });
        let visited: Vec<_> = grid.solid_voxels().collect();

        assert_eq!(visited.len(), 16);
        assert!(visited.iter().all(|(p, id)| p.x == 3 && *id == 2));
        let indices: Vec<_> = visited.iter().map(|(p, _)| layout.local_index(*p)).collect();
        let mut sorted = indices.clone();
        sorted.sort_unstable();
        assert_eq!(indices, sorted);
    }
}
