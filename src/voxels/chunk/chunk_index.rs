//! # Chunk Index Module
//!
//! Maps world voxel coordinates onto the flat chunk arena and the flat voxel grid
//! inside each chunk.
//!
//! ## Index layouts
//!
//! - Chunks: `cx + width * cz + width * depth * cy`
//! - Voxels: `x + z * chunk_size + y * chunk_size²` (x fastest, then z, then y)
//!
//! Both mappings are bijections over their ranges, and every world coordinate
//! resolves to exactly one `(chunk, voxel)` pair or to nothing at all.

use cgmath::Point3;

use crate::settings::SettingsError;

/// The largest chunk edge whose quad corners (`0..=chunk_size`) still fit the
/// 6-bit coordinate fields of a packed vertex.
pub const MAX_CHUNK_SIZE: u32 = 63;

/// Validated chunk and world dimensions.
///
/// A `WorldLayout` can only be obtained through [`WorldLayout::new`] (or
/// `WorldSettings::validate`), so every layout in circulation satisfies the packed
/// vertex limits.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WorldLayout {
    chunk_size: i32,
    width: i32,
    height: i32,
    depth: i32,
}

/// Where a world voxel lives: its chunk and its cell inside that chunk.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChunkLocation {
    /// Position of the owning chunk in chunk coordinates.
    pub chunk_position: Point3<i32>,
    /// Index of the owning chunk in the world's chunk arena.
    pub chunk_index: usize,
    /// Position of the voxel inside the chunk, each axis in `0..chunk_size`.
    pub local_position: Point3<i32>,
    /// Index of the voxel in the chunk's voxel grid.
    pub voxel_index: usize,
}

impl WorldLayout {
    /// Validates and creates a layout.
    ///
    /// # Arguments
    /// * `chunk_size` - Edge length of a chunk in voxels, `1..=63`
    /// * `width`, `height`, `depth` - World dimensions in chunks, all non-zero
    ///
    /// # Errors
    /// Returns a [`SettingsError`] if the chunk size overflows the packed vertex
    /// coordinate field, a dimension is zero, or the world is too large for `i32`
    /// voxel coordinates.
    pub fn new(chunk_size: u32, width: u32, height: u32, depth: u32) -> Result<Self, SettingsError> {
        if chunk_size == 0 || chunk_size > MAX_CHUNK_SIZE {
            return Err(SettingsError::ChunkSizeOutOfRange(chunk_size));
        }
        if width == 0 || height == 0 || depth == 0 {
            return Err(SettingsError::EmptyWorld { width, height, depth });
        }
        let extent = width.max(height).max(depth) as u64 * chunk_size as u64;
        let chunk_count = width as u64 * height as u64 * depth as u64;
        if extent > i32::MAX as u64 || chunk_count > i32::MAX as u64 {
            return Err(SettingsError::WorldTooLarge { width, height, depth });
        }

        Ok(WorldLayout {
            chunk_size: chunk_size as i32,
            width: width as i32,
            height: height as i32,
            depth: depth as i32,
        })
    }

    /// Edge length of a chunk in voxels.
    pub fn chunk_size(&self) -> i32 {
        self.chunk_size
    }

    /// Number of voxels in one horizontal layer of a chunk.
    pub fn chunk_area(&self) -> usize {
        (self.chunk_size * self.chunk_size) as usize
    }

    /// Number of voxels in a chunk.
    pub fn chunk_volume(&self) -> usize {
        self.chunk_area() * self.chunk_size as usize
    }

    /// World dimensions in chunks as `(width, height, depth)`.
    pub fn dimensions(&self) -> (i32, i32, i32) {
        (self.width, self.height, self.depth)
    }

    /// Number of chunks in the world.
    pub fn world_volume(&self) -> usize {
        (self.width as usize) * (self.height as usize) * (self.depth as usize)
    }

    /// Radius of the sphere enclosing a chunk, used for frustum culling.
    pub fn chunk_sphere_radius(&self) -> f32 {
        self.chunk_size as f32 * 0.5 * 3f32.sqrt()
    }

    /// Whether `chunk_position` lies inside the world.
    pub fn contains_chunk(&self, chunk_position: Point3<i32>) -> bool {
        (0..self.width).contains(&chunk_position.x)
            && (0..self.height).contains(&chunk_position.y)
            && (0..self.depth).contains(&chunk_position.z)
    }

    /// Whether `local_position` is a valid cell of a chunk.
    pub fn contains_local(&self, local_position: Point3<i32>) -> bool {
        let range = 0..self.chunk_size;
        range.contains(&local_position.x)
            && range.contains(&local_position.y)
            && range.contains(&local_position.z)
    }

    /// Index of the chunk at `chunk_position` in the chunk arena.
    ///
    /// # Returns
    /// `None` when the position lies outside the world.
    pub fn chunk_index(&self, chunk_position: Point3<i32>) -> Option<usize> {
        if !self.contains_chunk(chunk_position) {
            return None;
        }
        let Point3 { x, y, z } = chunk_position;
        Some((x + self.width * z + self.width * self.depth * y) as usize)
    }

    /// Inverse of [`WorldLayout::chunk_index`].
    pub fn chunk_position(&self, chunk_index: usize) -> Point3<i32> {
        let index = chunk_index as i32;
        let layer = self.width * self.depth;
        Point3::new(index % self.width, index / layer, (index % layer) / self.width)
    }

    /// World coordinate of the chunk's minimum corner voxel.
    pub fn chunk_origin(&self, chunk_position: Point3<i32>) -> Point3<i32> {
        Point3::new(
            chunk_position.x * self.chunk_size,
            chunk_position.y * self.chunk_size,
            chunk_position.z * self.chunk_size,
        )
    }

    /// Index of a chunk-local cell in a voxel grid. The position must be in range.
    pub fn local_index(&self, local_position: Point3<i32>) -> usize {
        let Point3 { x, y, z } = local_position;
        (x + z * self.chunk_size + y * self.chunk_size * self.chunk_size) as usize
    }

    /// Inverse of [`WorldLayout::local_index`].
    pub fn local_position(&self, voxel_index: usize) -> Point3<i32> {
        let index = voxel_index as i32;
        let area = self.chunk_size * self.chunk_size;
        Point3::new(
            index % self.chunk_size,
            index / area,
            (index % area) / self.chunk_size,
        )
    }

    /// Resolves a world voxel coordinate to its chunk and cell.
    ///
    /// Uses floor division, so negative coordinates fall into negative chunk
    /// positions and are rejected as outside the world instead of aliasing chunk 0.
    ///
    /// # Returns
    /// `None` if the owning chunk lies outside the world.
    pub fn world_to_chunk(&self, world_position: Point3<i32>) -> Option<ChunkLocation> {
        let size = self.chunk_size;
        let chunk_position = Point3::new(
            world_position.x.div_euclid(size),
            world_position.y.div_euclid(size),
            world_position.z.div_euclid(size),
        );
        let chunk_index = self.chunk_index(chunk_position)?;
        let local_position = Point3::new(
            world_position.x.rem_euclid(size),
            world_position.y.rem_euclid(size),
            world_position.z.rem_euclid(size),
        );

        Some(ChunkLocation {
            chunk_position,
            chunk_index,
            local_position,
            voxel_index: self.local_index(local_position),
        })
    }
}

impl ChunkLocation {
    /// Reconstructs the world coordinate this location was resolved from.
    pub fn world_position(&self, layout: &WorldLayout) -> Point3<i32> {
        let origin = layout.chunk_origin(self.chunk_position);
        Point3::new(
            origin.x + self.local_position.x,
            origin.y + self.local_position.y,
            origin.z + self.local_position.z,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn layout() -> WorldLayout {
        WorldLayout::new(4, 3, 2, 2).unwrap()
    }

    #[test]
    fn rejects_chunk_sizes_outside_the_packed_field() {
        assert!(matches!(
            WorldLayout::new(0, 1, 1, 1),
            Err(SettingsError::ChunkSizeOutOfRange(0))
        ));
        assert!(matches!(
            WorldLayout::new(64, 1, 1, 1),
            Err(SettingsError::ChunkSizeOutOfRange(64))
        ));
        assert!(WorldLayout::new(MAX_CHUNK_SIZE, 1, 1, 1).is_ok());
    }

    #[test]
    fn rejects_empty_and_oversized_worlds() {
        assert!(matches!(
            WorldLayout::new(16, 0, 1, 1),
            Err(SettingsError::EmptyWorld { .. })
        ));
        assert!(matches!(
            WorldLayout::new(63, u32::MAX / 2, 1, 1),
            Err(SettingsError::WorldTooLarge { .. })
        ));
    }

    #[test]
    fn chunk_index_matches_documented_layout() {
        let layout = layout();
        assert_eq!(layout.chunk_index(Point3::new(0, 0, 0)), Some(0));
        assert_eq!(layout.chunk_index(Point3::new(1, 0, 0)), Some(1));
        assert_eq!(layout.chunk_index(Point3::new(0, 0, 1)), Some(3));
        assert_eq!(layout.chunk_index(Point3::new(0, 1, 0)), Some(6));
        assert_eq!(layout.chunk_index(Point3::new(2, 1, 1)), Some(11));
        assert_eq!(layout.chunk_index(Point3::new(3, 0, 0)), None);
        assert_eq!(layout.chunk_index(Point3::new(0, -1, 0)), None);
    }

    #[test]
    fn chunk_positions_invert_chunk_indices() {
        let layout = layout();
        for index in 0..layout.world_volume() {
            let position = layout.chunk_position(index);
            assert_eq!(layout.chunk_index(position), Some(index));
        }
    }

    #[test]
    fn local_index_is_a_bijection() {
        let layout = layout();
        assert_eq!(layout.local_index(Point3::new(1, 0, 0)), 1);
        assert_eq!(layout.local_index(Point3::new(0, 0, 1)), 4);
        assert_eq!(layout.local_index(Point3::new(0, 1, 0)), 16);
        for index in 0..layout.chunk_volume() {
            let local = layout.local_position(index);
            assert!(layout.contains_local(local));
            assert_eq!(layout.local_index(local), index);
        }
    }

    #[test]
    fn world_to_chunk_covers_the_world_exactly_once() {
        let layout = layout();
        let size = layout.chunk_size();
        let (width, height, depth) = layout.dimensions();
        let mut seen = HashSet::new();

        for x in 0..width * size {
            for y in 0..height * size {
                for z in 0..depth * size {
                    let world = Point3::new(x, y, z);
                    let location = layout.world_to_chunk(world).unwrap();
                    assert_eq!(location.world_position(&layout), world);
                    assert!(seen.insert((location.chunk_index, location.voxel_index)));
                }
            }
        }
        assert_eq!(seen.len(), layout.world_volume() * layout.chunk_volume());
    }

    #[test]
    fn coordinates_outside_the_world_have_no_chunk() {
        let layout = layout();
        assert_eq!(layout.world_to_chunk(Point3::new(-1, 0, 0)), None);
        assert_eq!(layout.world_to_chunk(Point3::new(0, 0, -1)), None);
        assert_eq!(layout.world_to_chunk(Point3::new(12, 0, 0)), None);
        assert_eq!(layout.world_to_chunk(Point3::new(0, 8, 0)), None);

        let edge = layout.world_to_chunk(Point3::new(11, 7, 7)).unwrap();
        assert_eq!(edge.chunk_position, Point3::new(2, 1, 1));
        assert_eq!(edge.local_position, Point3::new(3, 3, 3));
    }
}
