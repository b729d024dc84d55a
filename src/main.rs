//! voxelstream - a deterministic streaming voxel world core
//!
//! Headless demo driver: walks a viewer through the streaming world,
//! reports chunk and geometry statistics, and regenerates the terrain once
//! mid-run with an evolved noise time. Window, input, and GPU submission are
//! external collaborators; this binary exercises everything below them.

mod config;

use anyhow::Result;
use glam::Vec3;
use tracing::info;

use voxelstream_camera::Camera;
use voxelstream_world::{TerrainGenerator, World, CHUNK_HEIGHT, CHUNK_SIZE};

use config::EngineConfig;

const TICK_SECONDS: f64 = 1.0 / 60.0;

fn main() -> Result<()> {
    // WARN/INFO by default, overridable via RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting voxelstream v{}", env!("CARGO_PKG_VERSION"));

    let cfg = EngineConfig::load();
    let render_distance = cfg.clamped_render_distance();
    info!(seed = cfg.seed, render_distance, "configuration loaded");

    let generator = TerrainGenerator::new(cfg.seed);
    let mut world = World::new(generator, render_distance);

    let mut camera = Camera::new(Vec3::new(8.0, CHUNK_HEIGHT as f32, 8.0));
    camera.fov = cfg.fov_degrees.to_radians();

    let mut noise_time = 0.0f64;
    let regen_tick = cfg.ticks / 2;

    for tick in 0..cfg.ticks {
        camera.move_forward(cfg.walk_speed * TICK_SECONDS as f32);
        noise_time += cfg.time_scale * TICK_SECONDS;

        let events = world.update(camera.position.to_array());

        // Edge-triggered regenerate: adopt the evolved noise time, then
        // rebuild every loaded chunk.
        if tick == regen_tick {
            info!(time = noise_time, "regenerating terrain with evolved noise");
            world.set_time(noise_time);
            world.regenerate_all();
        }

        // Frustum statistics only; the culling query is not wired into any
        // draw path.
        let frustum = camera.frustum();
        let visible = world
            .chunks()
            .filter(|chunk| {
                let (ox, oz) = chunk.position().origin();
                let min = Vec3::new(ox as f32, 0.0, oz as f32);
                let max =
                    min + Vec3::new(CHUNK_SIZE as f32, CHUNK_HEIGHT as f32, CHUNK_SIZE as f32);
                frustum.is_box_visible(min, max)
            })
            .count();

        if !events.loaded.is_empty() || !events.unloaded.is_empty() || tick % 30 == 0 {
            let vertices: usize = world.chunks().map(|c| c.mesh().vertex_count()).sum();
            info!(
                tick,
                loaded = events.loaded.len(),
                unloaded = events.unloaded.len(),
                chunks = world.len(),
                visible,
                vertices,
                "streamed"
            );
        }
    }

    info!("demo complete");
    Ok(())
}
