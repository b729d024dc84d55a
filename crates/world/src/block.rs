//! Block taxonomy and per-type visual attributes.

use serde::{Deserialize, Serialize};

/// Closed set of voxel materials.
///
/// `Air` is the canonical empty value and the `Default`, so bulk-zeroed
/// storage reads as empty space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BlockType {
    /// Empty space; never meshed.
    #[default]
    Air,
    /// Subsurface soil band below the topsoil.
    Dirt,
    /// Topsoil layer.
    Grass,
    /// Underground filler and the unconditional bedrock layer.
    Stone,
}

impl BlockType {
    /// Flat RGB color carried by every vertex of this material.
    pub fn color(self) -> [f32; 3] {
        match self {
            BlockType::Dirt => [0.545, 0.271, 0.075],
            BlockType::Grass => [0.2, 0.8, 0.2],
            BlockType::Stone => [0.6, 0.6, 0.6],
            BlockType::Air => [0.0, 0.0, 0.0],
        }
    }
}

/// A single voxel cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Block {
    /// Material of this voxel.
    pub kind: BlockType,
}

impl Block {
    /// An empty voxel.
    pub const AIR: Block = Block {
        kind: BlockType::Air,
    };

    /// Construct a block of the given material.
    pub const fn new(kind: BlockType) -> Self {
        Self { kind }
    }

    /// Everything except air occludes neighbors and gets meshed.
    #[inline]
    pub fn is_solid(&self) -> bool {
        self.kind != BlockType::Air
    }

    /// Flat color for this voxel's faces.
    #[inline]
    pub fn color(&self) -> [f32; 3] {
        self.kind.color()
    }
}
