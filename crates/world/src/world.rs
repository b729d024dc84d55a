//! Streaming world: owns the loaded chunk set and drives load/unload around
//! a moving viewer.

use std::collections::BTreeMap;

use tracing::debug;

use crate::block::Block;
use crate::chunk::{Chunk, ChunkPos, CHUNK_HEIGHT, CHUNK_SIZE};
use crate::mesh::build_chunk_mesh;
use crate::terrain::TerrainGenerator;

/// Chunk turnover produced by one `World::update` call.
///
/// The external renderer owns GPU buffers keyed by chunk coordinate; these
/// lists tell it which buffers to create and which to drop.
#[derive(Debug, Default)]
pub struct StreamEvents {
    pub loaded: Vec<ChunkPos>,
    pub unloaded: Vec<ChunkPos>,
}

/// The streaming voxel world.
///
/// Chunks are owned exclusively by the coordinate-keyed map. Chunks never
/// hold references to each other; every neighbor lookup routes back through
/// the map by key, so unloading can never dangle a neighbor.
pub struct World {
    chunks: BTreeMap<ChunkPos, Chunk>,
    generator: TerrainGenerator,
    render_distance: i32,
}

impl World {
    /// Create an empty world around the given generator.
    pub fn new(generator: TerrainGenerator, render_distance: i32) -> Self {
        Self {
            chunks: BTreeMap::new(),
            generator,
            render_distance,
        }
    }

    /// Chebyshev radius, in chunks, kept loaded around the viewer.
    pub fn render_distance(&self) -> i32 {
        self.render_distance
    }

    /// Number of loaded chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Iterate loaded chunks in deterministic coordinate order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// Fetch a loaded chunk.
    pub fn chunk_at(&self, pos: ChunkPos) -> Option<&Chunk> {
        self.chunks.get(&pos)
    }

    /// Fetch a loaded chunk for editing.
    ///
    /// The borrow must not be held across an `update` call: unloading may
    /// destroy the chunk at that boundary.
    pub fn chunk_at_mut(&mut self, pos: ChunkPos) -> Option<&mut Chunk> {
        self.chunks.get_mut(&pos)
    }

    /// The terrain generator owned by this world.
    pub fn generator(&self) -> &TerrainGenerator {
        &self.generator
    }

    /// Chunk coordinate containing the given world-space position.
    pub fn viewer_chunk(position: [f32; 3]) -> ChunkPos {
        ChunkPos::new(
            (position[0] / CHUNK_SIZE as f32).floor() as i32,
            (position[2] / CHUNK_SIZE as f32).floor() as i32,
        )
    }

    /// Load every chunk within the render distance of the viewer, then
    /// unload every chunk beyond it.
    ///
    /// Both passes use the single center computed at entry, so one call is
    /// atomic with respect to the viewer position.
    pub fn update(&mut self, viewer: [f32; 3]) -> StreamEvents {
        let center = Self::viewer_chunk(viewer);
        let mut events = StreamEvents::default();

        for x in (center.x - self.render_distance)..=(center.x + self.render_distance) {
            for z in (center.z - self.render_distance)..=(center.z + self.render_distance) {
                let pos = ChunkPos::new(x, z);
                if !self.chunks.contains_key(&pos) {
                    self.load_chunk(pos);
                    events.loaded.push(pos);
                }
            }
        }

        events.unloaded = self.unload_distant(center);
        events
    }

    /// Generate, insert, and mesh a chunk, then refresh the meshes of its
    /// four orthogonal neighbors: the new chunk may occlude boundary faces
    /// they emitted while this coordinate was missing.
    fn load_chunk(&mut self, pos: ChunkPos) {
        debug!(chunk_pos = %pos, "loading chunk");
        let mut chunk = Chunk::new(pos);
        self.generator.generate(&mut chunk);
        // Insert before meshing so map lookups already resolve this chunk.
        self.chunks.insert(pos, chunk);

        self.remesh(pos);
        for neighbor in [
            ChunkPos::new(pos.x - 1, pos.z),
            ChunkPos::new(pos.x + 1, pos.z),
            ChunkPos::new(pos.x, pos.z - 1),
            ChunkPos::new(pos.x, pos.z + 1),
        ] {
            self.remesh(neighbor);
        }
    }

    /// Drop every chunk outside the render distance around `center`.
    ///
    /// Remaining neighbors are not remeshed: boundary faces they culled
    /// against a departing chunk stay absent until something else rebuilds
    /// them, at which point they re-emerge as exposed.
    fn unload_distant(&mut self, center: ChunkPos) -> Vec<ChunkPos> {
        let rd = self.render_distance;
        let evicted: Vec<ChunkPos> = self
            .chunks
            .keys()
            .copied()
            .filter(|pos| (pos.x - center.x).abs() > rd || (pos.z - center.z).abs() > rd)
            .collect();
        for pos in &evicted {
            debug!(chunk_pos = %pos, "unloading chunk");
            self.chunks.remove(pos);
        }
        evicted
    }

    /// Rebuild one chunk's mesh with world-aware neighbor lookups.
    /// Missing coordinates are skipped.
    fn remesh(&mut self, pos: ChunkPos) {
        let Some(chunk) = self.chunks.get(&pos) else {
            return;
        };
        let mesh = build_chunk_mesh(chunk, |gx, gy, gz| self.block_at(gx, gy, gz).is_solid());
        if let Some(chunk) = self.chunks.get_mut(&pos) {
            chunk.install_mesh(mesh);
        }
    }

    /// Fetch the block at global coordinates.
    ///
    /// Vertical coordinates outside [0, CHUNK_HEIGHT), and columns whose
    /// owning chunk is not loaded, read as air.
    pub fn block_at(&self, gx: i32, gy: i32, gz: i32) -> Block {
        if !(0..CHUNK_HEIGHT).contains(&gy) {
            return Block::AIR;
        }
        match self.chunks.get(&ChunkPos::containing(gx, gz)) {
            Some(chunk) => chunk.get(gx.rem_euclid(CHUNK_SIZE), gy, gz.rem_euclid(CHUNK_SIZE)),
            None => Block::AIR,
        }
    }

    /// Set the generator's animation time (typically right before
    /// `regenerate_all`).
    pub fn set_time(&mut self, time: f64) {
        self.generator.set_time(time);
    }

    /// Re-run terrain generation over every loaded chunk, then rebuild every
    /// mesh against the updated neighbors.
    ///
    /// Synchronous and proportional to the total loaded voxel count;
    /// intended for infrequent, user-triggered invocation.
    pub fn regenerate_all(&mut self) {
        debug!(chunks = self.chunks.len(), "regenerating all loaded chunks");
        let positions: Vec<ChunkPos> = self.chunks.keys().copied().collect();
        for &pos in &positions {
            if let Some(chunk) = self.chunks.get_mut(&pos) {
                self.generator.generate(chunk);
            }
        }
        for &pos in &positions {
            self.remesh(pos);
        }
    }
}
