use std::fmt;

use crate::block::Block;
use crate::mesh::{build_chunk_mesh, MeshBuffers};

/// Chunk width and depth (X and Z axes) in voxels.
pub const CHUNK_SIZE: i32 = 16;
/// Chunk height (Y axis) in voxels.
pub const CHUNK_HEIGHT: i32 = 16;
/// Total voxel count per chunk.
pub const CHUNK_VOLUME: usize = (CHUNK_SIZE * CHUNK_HEIGHT * CHUNK_SIZE) as usize;

/// Chunk coordinate (X, Z) in chunk space.
/// Implements Ord for deterministic iteration in BTreeMap/BTreeSet (sorts by x, then z).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// World-space origin of this chunk (chunk coordinate times chunk size).
    pub const fn origin(self) -> (i32, i32) {
        (self.x * CHUNK_SIZE, self.z * CHUNK_SIZE)
    }

    /// Chunk owning the given global (x, z) column.
    ///
    /// Floor division, so negative coordinates resolve correctly: global
    /// x = -1 belongs to chunk -1 at local 15, not chunk 0 at local -1.
    pub const fn containing(gx: i32, gz: i32) -> Self {
        Self {
            x: gx.div_euclid(CHUNK_SIZE),
            z: gz.div_euclid(CHUNK_SIZE),
        }
    }
}

impl fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// A 16x16x16 voxel grid plus its derived render geometry.
///
/// The chunk coordinate is fixed at construction. The grid and the vertex
/// list are plain data; any GPU-side resource for this chunk is owned by the
/// external renderer, keyed by `ChunkPos`.
pub struct Chunk {
    position: ChunkPos,
    blocks: Vec<Block>,
    mesh: MeshBuffers,
    dirty: bool,
}

impl Chunk {
    /// Allocate a fresh chunk filled with air. New chunks start dirty.
    pub fn new(position: ChunkPos) -> Self {
        Self {
            position,
            blocks: vec![Block::AIR; CHUNK_VOLUME],
            mesh: MeshBuffers::empty(),
            dirty: true,
        }
    }

    #[inline]
    pub fn position(&self) -> ChunkPos {
        self.position
    }

    fn index(x: i32, y: i32, z: i32) -> usize {
        ((y * CHUNK_SIZE + z) * CHUNK_SIZE + x) as usize
    }

    fn in_bounds(x: i32, y: i32, z: i32) -> bool {
        (0..CHUNK_SIZE).contains(&x)
            && (0..CHUNK_HEIGHT).contains(&y)
            && (0..CHUNK_SIZE).contains(&z)
    }

    /// Fetch the voxel at chunk-local coordinates.
    ///
    /// Out-of-range coordinates read as air; there is no error case.
    pub fn get(&self, x: i32, y: i32, z: i32) -> Block {
        if !Self::in_bounds(x, y, z) {
            return Block::AIR;
        }
        self.blocks[Self::index(x, y, z)]
    }

    /// Overwrite the voxel at chunk-local coordinates and mark the mesh stale.
    ///
    /// Out-of-range writes are silently ignored.
    pub fn set(&mut self, x: i32, y: i32, z: i32, block: Block) {
        if !Self::in_bounds(x, y, z) {
            return;
        }
        self.blocks[Self::index(x, y, z)] = block;
        self.dirty = true;
    }

    /// True when the voxel grid has changed since the last mesh build.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Current render geometry (stale while `is_dirty` is set).
    pub fn mesh(&self) -> &MeshBuffers {
        &self.mesh
    }

    /// Rebuild the geometry list from scratch and mark the chunk clean.
    ///
    /// `solid_at` resolves solidity at global voxel coordinates so boundary
    /// faces against loaded neighbor chunks are culled.
    pub fn rebuild_mesh<F>(&mut self, solid_at: F)
    where
        F: Fn(i32, i32, i32) -> bool,
    {
        let mesh = build_chunk_mesh(self, solid_at);
        self.install_mesh(mesh);
    }

    /// Replace the derived geometry and mark the chunk clean.
    pub(crate) fn install_mesh(&mut self, mesh: MeshBuffers) {
        self.mesh = mesh;
        self.dirty = false;
    }
}
