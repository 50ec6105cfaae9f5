//! Packed vertex format for chunk meshes.
//!
//! Every mesh vertex is a single `u32`. From the most significant bit down:
//!
//! | field    | bits | range  |
//! |----------|------|--------|
//! | x        | 6    | 0..=63 |
//! | y        | 6    | 0..=63 |
//! | z        | 6    | 0..=63 |
//! | voxel id | 8    | 0..=255|
//! | face id  | 3    | 0..=5  |
//! | ao       | 2    | 0..=3  |
//! | flipped  | 1    | 0..=1  |
//!
//! The vertex shader must decode the fields with the same shifts and masks.

/// Width of each coordinate field.
pub const COORDINATE_BITS: u32 = 6;
/// Width of the voxel id field.
pub const VOXEL_ID_BITS: u32 = 8;
/// Width of the face id field.
pub const FACE_ID_BITS: u32 = 3;
/// Width of the ambient occlusion field.
pub const AO_BITS: u32 = 2;
/// Width of the flipped-quad flag.
pub const FLIPPED_BITS: u32 = 1;

const FLIPPED_SHIFT: u32 = 0;
const AO_SHIFT: u32 = FLIPPED_SHIFT + FLIPPED_BITS;
const FACE_ID_SHIFT: u32 = AO_SHIFT + AO_BITS;
const VOXEL_ID_SHIFT: u32 = FACE_ID_SHIFT + FACE_ID_BITS;
const Z_SHIFT: u32 = VOXEL_ID_SHIFT + VOXEL_ID_BITS;
const Y_SHIFT: u32 = Z_SHIFT + COORDINATE_BITS;
const X_SHIFT: u32 = Y_SHIFT + COORDINATE_BITS;

const fn mask(bits: u32) -> u32 {
    (1 << bits) - 1
}

/// The unpacked contents of a [`PackedVertex`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct VertexFields {
    /// Chunk-local X of the quad corner, `0..=63`.
    pub x: u8,
    /// Chunk-local Y of the quad corner, `0..=63`.
    pub y: u8,
    /// Chunk-local Z of the quad corner, `0..=63`.
    pub z: u8,
    /// Material of the voxel the face belongs to.
    pub voxel_id: u8,
    /// Which of the six faces this vertex belongs to, `0..=5`.
    pub face_id: u8,
    /// Number of open cells around this corner, `0..=3`; `3` is fully lit.
    pub ao: u8,
    /// Whether the quad was split along its other diagonal.
    pub flipped: bool,
}

/// A mesh vertex packed into one 32-bit word.
///
/// # Memory Layout
/// `#[repr(transparent)]` over a `u32`, so a slice of vertices can be uploaded to the
/// GPU as-is.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PackedVertex(pub u32);

impl PackedVertex {
    /// Packs the fields into a vertex.
    ///
    /// Values wider than their field are truncated to the field width; callers are
    /// expected to stay inside the documented ranges.
    pub fn pack(fields: VertexFields) -> Self {
        let coordinate = mask(COORDINATE_BITS);
        PackedVertex(
            (fields.x as u32 & coordinate) << X_SHIFT
                | (fields.y as u32 & coordinate) << Y_SHIFT
                | (fields.z as u32 & coordinate) << Z_SHIFT
                | (fields.voxel_id as u32 & mask(VOXEL_ID_BITS)) << VOXEL_ID_SHIFT
                | (fields.face_id as u32 & mask(FACE_ID_BITS)) << FACE_ID_SHIFT
                | (fields.ao as u32 & mask(AO_BITS)) << AO_SHIFT
                | (fields.flipped as u32) << FLIPPED_SHIFT,
        )
    }

    /// Splits the vertex back into its fields.
    pub fn unpack(self) -> VertexFields {
        let coordinate = mask(COORDINATE_BITS);
        VertexFields {
            x: ((self.0 >> X_SHIFT) & coordinate) as u8,
            y: ((self.0 >> Y_SHIFT) & coordinate) as u8,
            z: ((self.0 >> Z_SHIFT) & coordinate) as u8,
            voxel_id: ((self.0 >> VOXEL_ID_SHIFT) & mask(VOXEL_ID_BITS)) as u8,
            face_id: ((self.0 >> FACE_ID_SHIFT) & mask(FACE_ID_BITS)) as u8,
            ao: ((self.0 >> AO_SHIFT) & mask(AO_BITS)) as u8,
            flipped: (self.0 >> FLIPPED_SHIFT) & mask(FLIPPED_BITS) == 1,
        }
    }

    /// Returns the vertex buffer layout description for the chunk shader pipeline.
    ///
    /// # Shader Attributes
    /// - `location = 0`: packed_data (u32)
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PackedVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Uint32,
            }],
        }
    }
}
