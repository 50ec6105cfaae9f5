//! Rendering seams for the voxel world.
//!
//! This crate stops at the vertex buffer: meshing produces packed vertices and the
//! drawing itself is delegated to a [`ChunkRenderer`] supplied by the caller. Chunk
//! visibility is decided by a caller-supplied [`Frustum`].

use cgmath::{Matrix4, Point3};

pub mod meshing;
pub mod vertex;

// Re-export commonly used types
pub use meshing::{build_chunk_mesh, ChunkMesh};
pub use vertex::{PackedVertex, VertexFields};

/// Decides whether a bounding sphere is visible.
///
/// Any `Fn(Point3<f32>, f32) -> bool` closure is a frustum, which keeps tests and
/// headless callers free of camera code.
pub trait Frustum {
    /// Whether the sphere at `center` with `radius` intersects the view volume.
    fn is_on_frustum(&self, center: Point3<f32>, radius: f32) -> bool;
}

impl<F> Frustum for F
where
    F: Fn(Point3<f32>, f32) -> bool,
{
    fn is_on_frustum(&self, center: Point3<f32>, radius: f32) -> bool {
        self(center, radius)
    }
}

/// Receives the draw calls of visible chunks.
pub trait ChunkRenderer {
    /// Draws one chunk mesh.
    ///
    /// # Arguments
    /// * `model` - Translation from chunk-local to world space
    /// * `vertices` - The chunk's packed vertices, six per face
    fn draw_chunk(&mut self, model: &Matrix4<f32>, vertices: &[PackedVertex]);
}
