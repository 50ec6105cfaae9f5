//! # Chunk Mesh Builder
//!
//! Turns the voxel grid of one chunk into a list of packed vertices.
//!
//! Every solid voxel is visited in storage order and each of its six faces is
//! tested against the neighbouring cell, looked up in world coordinates so that
//! faces between chunks are culled and faces on the world's outer shell are kept.
//! A visible face becomes two triangles whose corners carry ambient occlusion.

use cgmath::{EuclideanSpace, Point3, Vector3};
use log::trace;

use crate::{
    rendering::vertex::{PackedVertex, VertexFields},
    voxels::{block::block_side::BlockSide, grids::WorldGrids},
};

use super::{
    ambient_occlusion::{corner_occlusion, CornerOcclusion},
    mesh::{ChunkMesh, VERTICES_PER_FACE},
};

/// Upper bound on vertices a chunk can emit per voxel: three exposed faces on
/// average in the checkerboard worst case, six vertices each.
const VERTICES_PER_VOXEL_BOUND: usize = 18;

/// Quad corners `v0..v3` of each face as offsets from the voxel's minimum corner,
/// indexed by face id.
const FACE_CORNERS: [[Vector3<i32>; 4]; 6] = [
    // TOP
    [
        Vector3::new(0, 1, 0),
        Vector3::new(1, 1, 0),
        Vector3::new(1, 1, 1),
        Vector3::new(0, 1, 1),
    ],
    // BOTTOM
    [
        Vector3::new(0, 0, 0),
        Vector3::new(1, 0, 0),
        Vector3::new(1, 0, 1),
        Vector3::new(0, 0, 1),
    ],
    // RIGHT
    [
        Vector3::new(1, 0, 0),
        Vector3::new(1, 1, 0),
        Vector3::new(1, 1, 1),
        Vector3::new(1, 0, 1),
    ],
    // LEFT
    [
        Vector3::new(0, 0, 0),
        Vector3::new(0, 1, 0),
        Vector3::new(0, 1, 1),
        Vector3::new(0, 0, 1),
    ],
    // BACK
    [
        Vector3::new(0, 0, 0),
        Vector3::new(0, 1, 0),
        Vector3::new(1, 1, 0),
        Vector3::new(1, 0, 0),
    ],
    // FRONT
    [
        Vector3::new(0, 0, 1),
        Vector3::new(0, 1, 1),
        Vector3::new(1, 1, 1),
        Vector3::new(1, 0, 1),
    ],
];

/// Triangle order over `v0..v3` per face id, as `[regular, flipped]`.
///
/// Both orders wind counter-clockwise when viewed from outside the voxel.
const FACE_WINDINGS: [[[usize; VERTICES_PER_FACE]; 2]; 6] = [
    [[0, 3, 2, 0, 2, 1], [1, 0, 3, 1, 3, 2]],
    [[0, 2, 3, 0, 1, 2], [1, 3, 0, 1, 2, 3]],
    [[0, 1, 2, 0, 2, 3], [3, 0, 1, 3, 1, 2]],
    [[0, 2, 1, 0, 3, 2], [3, 1, 0, 3, 2, 1]],
    [[0, 1, 2, 0, 2, 3], [3, 0, 1, 3, 1, 2]],
    [[0, 2, 1, 0, 3, 2], [3, 1, 0, 3, 2, 1]],
];

/// Builds the mesh of the chunk at `chunk_index`.
///
/// Neighbour lookups go through `grids`, so the result depends on adjacent chunks
/// too. The output is deterministic: voxels in storage order, faces in
/// [`BlockSide::all`] order, six vertices per face.
///
/// # Returns
/// An empty mesh if the index does not name a chunk of the world.
pub fn build_chunk_mesh(grids: &WorldGrids, chunk_index: usize) -> ChunkMesh {
    let Some(grid) = grids.grid(chunk_index) else {
        return ChunkMesh::default();
    };
    if grid.is_all_air() {
        return ChunkMesh::default();
    }

    let layout = grids.layout();
    let origin = layout.chunk_origin(layout.chunk_position(chunk_index)).to_vec();
    let mut vertices = Vec::with_capacity(layout.chunk_volume() * VERTICES_PER_VOXEL_BOUND);

    for (local, voxel_id) in grid.solid_voxels() {
        let world = local + origin;
        for side in BlockSide::all() {
            let neighbour = world + side.normal();
            if !grids.is_void(neighbour) {
                continue;
            }
            let occlusion = corner_occlusion(grids, neighbour, side.plane());
            push_face(&mut vertices, local, voxel_id, side, occlusion);
        }
    }

    vertices.shrink_to_fit();
    trace!(
        "Chunk {} meshed into {} vertices",
        chunk_index,
        vertices.len()
    );
    ChunkMesh::new(vertices)
}

fn push_face(
    vertices: &mut Vec<PackedVertex>,
    local: Point3<i32>,
    voxel_id: u8,
    side: BlockSide,
    occlusion: CornerOcclusion,
) {
    let face = side.id() as usize;
    let corners = FACE_CORNERS[face];
    let winding = &FACE_WINDINGS[face][occlusion.flipped as usize];

    for &corner in winding {
        let position = local + corners[corner];
        vertices.push(PackedVertex::pack(VertexFields {
            x: position.x as u8,
            y: position.y as u8,
            z: position.z as u8,
            voxel_id,
            face_id: side.id(),
            ao: occlusion.ao[corner],
            flipped: occlusion.flipped,
        }));
    }
}
