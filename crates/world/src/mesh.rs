//! Boundary-aware surface extraction for chunk voxel grids.
//!
//! Emits one quad (two triangles) per exposed voxel face. Coplanar quads of
//! the same material are not merged; occlusion culling happens per face via
//! a global-coordinate solidity oracle, so faces against loaded neighbor
//! chunks are skipped.

use crate::block::Block;
use crate::chunk::{Chunk, CHUNK_HEIGHT, CHUNK_SIZE};

/// Number of f32 lanes per vertex record (position + normal + color).
pub const FLOATS_PER_VERTEX: usize = 9;
/// Vertices emitted per quad face (two triangles, no index buffer).
pub const VERTICES_PER_FACE: usize = 6;

/// Offset along the face normal applied to every face vertex, keeping
/// coplanar faces of touching chunks from z-fighting.
const FACE_EPSILON: f32 = 0.001;

/// Vertex layout produced by the mesher, consumable as a raw triangle list.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Position in chunk-local coordinates.
    pub position: [f32; 3],
    /// Face normal (unit length, axis aligned).
    pub normal: [f32; 3],
    /// Flat material color.
    pub color: [f32; 3],
}

/// Output mesh geometry per chunk.
#[derive(Debug, Clone, Default)]
pub struct MeshBuffers {
    /// Triangle-list vertex stream, `VERTICES_PER_FACE` records per face.
    pub vertices: Vec<MeshVertex>,
}

impl MeshBuffers {
    /// Construct an empty mesh (useful for initialization).
    pub fn empty() -> Self {
        Self {
            vertices: Vec::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Number of emitted quad faces.
    pub fn face_count(&self) -> usize {
        self.vertices.len() / VERTICES_PER_FACE
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

struct FaceDef {
    /// Direction to the neighbor this face looks at.
    dir: [i32; 3],
    normal: [f32; 3],
    /// Quad corners (A, B, C, D), wound counter-clockwise as seen from
    /// outside the block.
    corners: [[f32; 3]; 4],
}

const FACES: [FaceDef; 6] = [
    FaceDef {
        dir: [1, 0, 0],
        normal: [1.0, 0.0, 0.0],
        corners: [
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [1.0, 1.0, 1.0],
            [1.0, 0.0, 1.0],
        ],
    },
    FaceDef {
        dir: [-1, 0, 0],
        normal: [-1.0, 0.0, 0.0],
        corners: [
            [0.0, 0.0, 1.0],
            [0.0, 1.0, 1.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0],
        ],
    },
    FaceDef {
        dir: [0, 1, 0],
        normal: [0.0, 1.0, 0.0],
        corners: [
            [0.0, 1.0, 1.0],
            [1.0, 1.0, 1.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ],
    },
    FaceDef {
        dir: [0, -1, 0],
        normal: [0.0, -1.0, 0.0],
        corners: [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 0.0, 1.0],
            [0.0, 0.0, 1.0],
        ],
    },
    FaceDef {
        dir: [0, 0, 1],
        normal: [0.0, 0.0, 1.0],
        corners: [
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 1.0],
            [1.0, 1.0, 1.0],
            [0.0, 1.0, 1.0],
        ],
    },
    FaceDef {
        dir: [0, 0, -1],
        normal: [0.0, 0.0, -1.0],
        corners: [
            [0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [1.0, 1.0, 0.0],
            [1.0, 0.0, 0.0],
        ],
    },
];

/// Rebuild the geometry list for `chunk` from scratch.
///
/// `solid_at` resolves solidity at *global* voxel coordinates, which lets
/// face culling see across chunk borders. A vertical coordinate outside
/// [0, CHUNK_HEIGHT) is treated as open air before the oracle is consulted;
/// callers report unloaded neighbor chunks as non-solid, so boundary faces
/// against missing neighbors are emitted and corrected once the neighbor
/// loads.
pub fn build_chunk_mesh<F>(chunk: &Chunk, solid_at: F) -> MeshBuffers
where
    F: Fn(i32, i32, i32) -> bool,
{
    let mut vertices = Vec::new();
    let (base_x, base_z) = chunk.position().origin();

    let open_at = |gx: i32, gy: i32, gz: i32| -> bool {
        if !(0..CHUNK_HEIGHT).contains(&gy) {
            return true;
        }
        !solid_at(gx, gy, gz)
    };

    for y in 0..CHUNK_HEIGHT {
        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                let block = chunk.get(x, y, z);
                if !block.is_solid() {
                    continue;
                }

                let gx = base_x + x;
                let gz = base_z + z;
                for face in &FACES {
                    if open_at(gx + face.dir[0], y + face.dir[1], gz + face.dir[2]) {
                        push_face(&mut vertices, [x, y, z], face, block);
                    }
                }
            }
        }
    }

    MeshBuffers { vertices }
}

fn push_face(vertices: &mut Vec<MeshVertex>, local: [i32; 3], face: &FaceDef, block: Block) {
    let color = block.color();
    let normal = face.normal;

    let base = [
        local[0] as f32 + normal[0] * FACE_EPSILON,
        local[1] as f32 + normal[1] * FACE_EPSILON,
        local[2] as f32 + normal[2] * FACE_EPSILON,
    ];

    // Two triangles (A, B, C) and (A, C, D).
    for i in [0usize, 1, 2, 0, 2, 3] {
        let corner = face.corners[i];
        vertices.push(MeshVertex {
            position: [
                base[0] + corner[0],
                base[1] + corner[1],
                base[2] + corner[2],
            ],
            normal,
            color,
        });
    }
}
