//! Streaming Validation Worldtest
//!
//! Walks a viewer across many chunk borders and validates the streaming
//! contract end to end:
//! - Loaded set always equals the Chebyshev neighborhood of the viewer
//! - Global lookups agree with chunk-local reads everywhere
//! - Every loaded chunk carries a clean, non-stale mesh
//! - Regeneration with an evolved time keeps the world consistent

use voxelstream_world::{ChunkPos, TerrainGenerator, World, CHUNK_HEIGHT, CHUNK_SIZE};

const WORLD_SEED: u32 = 1122334455;
const RENDER_DISTANCE: i32 = 2;
const WALK_STEPS: usize = 48;
const STEP_BLOCKS: f32 = 7.0; // crosses a chunk border every few steps

fn assert_streaming_invariant(world: &World, viewer: [f32; 3]) {
    let center = World::viewer_chunk(viewer);

    let expected = ((RENDER_DISTANCE * 2 + 1) * (RENDER_DISTANCE * 2 + 1)) as usize;
    assert_eq!(world.len(), expected, "loaded chunk count at {:?}", viewer);

    for chunk in world.chunks() {
        let pos = chunk.position();
        assert!(
            (pos.x - center.x).abs() <= RENDER_DISTANCE
                && (pos.z - center.z).abs() <= RENDER_DISTANCE,
            "chunk {} outside radius of center {}",
            pos,
            center
        );
        assert!(!chunk.is_dirty(), "chunk {} has a stale mesh", pos);
    }

    for x in (center.x - RENDER_DISTANCE)..=(center.x + RENDER_DISTANCE) {
        for z in (center.z - RENDER_DISTANCE)..=(center.z + RENDER_DISTANCE) {
            assert!(
                world.chunk_at(ChunkPos::new(x, z)).is_some(),
                "chunk ({}, {}) missing inside radius",
                x,
                z
            );
        }
    }
}

fn assert_global_local_agreement(world: &World, pos: ChunkPos) {
    let chunk = world.chunk_at(pos).expect("chunk loaded");
    for y in 0..CHUNK_HEIGHT {
        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                assert_eq!(
                    world.block_at(pos.x * CHUNK_SIZE + x, y, pos.z * CHUNK_SIZE + z),
                    chunk.get(x, y, z),
                    "global/local mismatch in chunk {} at ({}, {}, {})",
                    pos,
                    x,
                    y,
                    z
                );
            }
        }
    }
}

#[test]
fn streaming_worldtest() {
    println!("\n=== Streaming Validation Worldtest ===");
    println!("  World seed: {}", WORLD_SEED);
    println!("  Render distance: {}", RENDER_DISTANCE);
    println!("  Walk: {} steps x {} blocks", WALK_STEPS, STEP_BLOCKS);

    let mut world = World::new(TerrainGenerator::new(WORLD_SEED), RENDER_DISTANCE);

    // Phase 1: walk a diagonal path, checking the invariant at every step.
    println!("Phase 1: diagonal walk...");
    let mut viewer = [0.0f32, CHUNK_HEIGHT as f32, 0.0f32];
    let mut total_loaded = 0;
    let mut total_unloaded = 0;

    for step in 0..WALK_STEPS {
        viewer[0] += STEP_BLOCKS;
        if step % 2 == 0 {
            viewer[2] += STEP_BLOCKS;
        }

        let events = world.update(viewer);
        total_loaded += events.loaded.len();
        total_unloaded += events.unloaded.len();

        assert_streaming_invariant(&world, viewer);
    }
    println!("  Loaded {} chunks, unloaded {}", total_loaded, total_unloaded);
    assert!(total_loaded > world.len(), "the walk must turn chunks over");

    // Phase 2: global/local agreement around the final viewer position.
    println!("Phase 2: global/local agreement...");
    let center = World::viewer_chunk(viewer);
    assert_global_local_agreement(&world, center);
    assert_global_local_agreement(
        &world,
        ChunkPos::new(center.x - RENDER_DISTANCE, center.z - RENDER_DISTANCE),
    );

    // Phase 3: regenerate with an evolved time and re-validate everything.
    println!("Phase 3: regeneration with evolved time...");
    world.set_time(4.2);
    world.regenerate_all();

    assert_streaming_invariant(&world, viewer);
    assert_global_local_agreement(&world, center);

    // The regenerated world equals a fresh world generated at that time.
    let mut fresh = World::new(TerrainGenerator::new(WORLD_SEED), RENDER_DISTANCE);
    fresh.set_time(4.2);
    fresh.update(viewer);
    for (a, b) in world.chunks().zip(fresh.chunks()) {
        assert_eq!(a.position(), b.position());
        assert_eq!(
            a.mesh().face_count(),
            b.mesh().face_count(),
            "mesh mismatch for chunk {}",
            a.position()
        );
    }

    println!("=== Streaming worldtest passed ===");
}
