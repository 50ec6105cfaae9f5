//! # Chunk Module
//!
//! This module provides the `Chunk` struct: the per-chunk bookkeeping that sits
//! next to the chunk's voxel grid. A chunk owns its position, its mesh and the
//! model matrix used to draw it; the voxel ids themselves live in the world's
//! grid arena so that meshing can read neighbouring chunks while a chunk's mesh
//! is being replaced.
//!
//! ## Lifecycle
//!
//! 1. [`Chunk::new`] places the chunk and computes its culling sphere
//! 2. [`Chunk::build_voxels`] fills a grid from a terrain generator
//! 3. [`Chunk::build_mesh`] meshes the chunk once all grids exist
//! 4. [`Chunk::rebuild`] re-meshes after a voxel edit

use cgmath::{Matrix4, Point3, Vector3};

use crate::rendering::{
    meshing::{build_chunk_mesh, ChunkMesh},
    ChunkRenderer, Frustum,
};

use super::{grids::WorldGrids, terrain::TerrainGenerator};
use chunk_index::WorldLayout;
use voxel_grid::VoxelGrid;

pub mod chunk_index;
pub mod voxel_grid;

/// One cubic region of the world.
#[derive(Clone, Debug)]
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not voxel coordinates).
    position: Point3<i32>,
    /// Index of this chunk in the world's chunk and grid arenas.
    index: usize,
    /// The current mesh; replaced wholesale on every build.
    mesh: ChunkMesh,
    /// Translation from chunk-local to world space.
    model: Matrix4<f32>,
    /// Centre of the culling sphere in world space.
    center: Point3<f32>,
    /// Radius of the culling sphere.
    radius: f32,
    /// Whether the chunk holds no solid voxel.
    is_empty: bool,
    /// Number of times the mesh has been built.
    rebuild_count: u32,
}

impl Chunk {
    /// Creates an empty, unmeshed chunk.
    ///
    /// # Arguments
    /// * `position` - The chunk coordinates of the new chunk
    /// * `index` - Its index in the world's arenas
    /// * `layout` - The world layout, for the chunk size
    pub fn new(position: Point3<i32>, index: usize, layout: &WorldLayout) -> Self {
        let size = layout.chunk_size() as f32;
        let origin = Vector3::new(
            position.x as f32 * size,
            position.y as f32 * size,
            position.z as f32 * size,
        );

        Chunk {
            position,
            index,
            mesh: ChunkMesh::default(),
            model: Matrix4::from_translation(origin),
            center: Point3::new(
                origin.x + size * 0.5,
                origin.y + size * 0.5,
                origin.z + size * 0.5,
            ),
            radius: layout.chunk_sphere_radius(),
            is_empty: true,
            rebuild_count: 0,
        }
    }

    /// Generates the voxel grid of this chunk.
    ///
    /// Records whether the chunk ended up empty; the caller stores the grid in
    /// the world's arena.
    pub fn build_voxels(&mut self, terrain: &dyn TerrainGenerator, layout: &WorldLayout) -> VoxelGrid {
        let grid = terrain.fill_chunk(self.position, layout);
        self.is_empty = grid.is_all_air();
        grid
    }

    /// Meshes this chunk against the current grids.
    pub fn build_mesh(&mut self, grids: &WorldGrids) {
        self.mesh = build_chunk_mesh(grids, self.index);
        self.rebuild_count += 1;
    }

    /// Re-meshes this chunk after one of the voxels it depends on changed.
    pub fn rebuild(&mut self, grids: &WorldGrids) {
        self.build_mesh(grids);
    }

    /// Submits the mesh to `renderer` if the chunk has something to draw and its
    /// bounding sphere passes the frustum test.
    ///
    /// # Returns
    /// Whether a draw call was issued.
    pub fn render<F, R>(&self, frustum: &F, renderer: &mut R) -> bool
    where
        F: Frustum + ?Sized,
        R: ChunkRenderer + ?Sized,
    {
        if self.is_empty || self.mesh.is_empty() {
            return false;
        }
        if !frustum.is_on_frustum(self.center, self.radius) {
            return false;
        }
        renderer.draw_chunk(&self.model, self.mesh.vertices());
        true
    }

    /// The position of this chunk in chunk coordinates.
    pub fn position(&self) -> Point3<i32> {
        self.position
    }

    /// Index of this chunk in the world's arenas.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The current mesh.
    pub fn mesh(&self) -> &ChunkMesh {
        &self.mesh
    }

    /// Translation from chunk-local to world space.
    pub fn model(&self) -> &Matrix4<f32> {
        &self.model
    }

    /// Centre of the chunk's culling sphere.
    pub fn center(&self) -> Point3<f32> {
        self.center
    }

    /// Radius of the chunk's culling sphere.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Whether the chunk holds no solid voxel.
    pub fn is_empty(&self) -> bool {
        self.is_empty
    }

    pub(crate) fn set_empty(&mut self, is_empty: bool) {
        self.is_empty = is_empty;
    }

    /// How many times the mesh has been built.
    pub fn rebuild_count(&self) -> u32 {
        self.rebuild_count
    }
}
