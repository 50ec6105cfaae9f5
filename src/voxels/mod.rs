//! Voxel data and the operations on it.
//!
//! * `block` - voxel ids, the material catalogue and face directions
//! * `chunk` - chunk bookkeeping, chunk addressing and per-chunk voxel grids
//! * `grids` - the arena of all voxel grids with world-coordinate lookups
//! * `world` - the chunk grid as a whole
//! * `voxel_handler` - ray picking and voxel edits
//! * `terrain` - the terrain generator seam and simple generators
//! * `bounds` - voxel bounding boxes for collision queries

pub mod block;
pub mod bounds;
pub mod chunk;
pub mod grids;
pub mod terrain;
pub mod voxel_handler;
pub mod world;
