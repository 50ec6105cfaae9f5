//! Chunk mesh storage.
//!
//! A chunk mesh is a flat list of packed vertices, six per visible face (two
//! triangles, no index buffer). Rebuilding a chunk replaces its mesh wholesale.

use crate::rendering::vertex::PackedVertex;

/// Number of vertices emitted per visible face.
pub const VERTICES_PER_FACE: usize = 6;

/// The vertex buffer of one chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkMesh {
    /// Packed vertices, six per face, in emission order.
    vertices: Vec<PackedVertex>,
}

impl ChunkMesh {
    /// Wraps a finished vertex buffer.
    pub fn new(vertices: Vec<PackedVertex>) -> Self {
        ChunkMesh { vertices }
    }

    /// The packed vertices in emission order.
    pub fn vertices(&self) -> &[PackedVertex] {
        &self.vertices
    }

    /// Number of vertices in the buffer.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of visible faces.
    pub fn face_count(&self) -> usize {
        self.vertices.len() / VERTICES_PER_FACE
    }

    /// Whether the mesh has nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The vertex buffer as raw bytes, ready for a GPU upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}
