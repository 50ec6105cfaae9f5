//! Mesh generation for voxel chunks.
//!
//! # Architecture
//! - `builder`: visits the solid voxels of a chunk and emits visible faces
//! - `ambient_occlusion`: per-corner lighting of a face from its surroundings
//! - `mesh`: the finished vertex buffer of a chunk
//!
//! Meshes are plain vertex lists with six vertices per visible face; faces shared
//! by two solid voxels, including across chunk boundaries, are never emitted.

pub mod ambient_occlusion;
pub mod builder;
pub mod mesh;

pub use builder::build_chunk_mesh;
pub use mesh::ChunkMesh;
