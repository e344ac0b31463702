//! Headless world walker - drives the streamer along a scripted path.
//!
//! Usage: cargo run --release -- [OPTIONS]
//!
//! Options:
//!   --config <PATH>   World config JSON (default: built-in config)
//!   --steps <N>       Number of ticks to simulate (default: 600)
//!   --speed <UNITS>   Observer distance travelled per tick (default: 0.5)
//!   --radius <R>      Override the window radius

use std::time::Instant;

use gridstream::core::logging;
use gridstream::core::types::Vec3;
use gridstream::streaming::{HeadlessHost, StreamingController};
use gridstream::world::WorldConfig;

fn main() {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let steps = parse_usize_arg(&args, "--steps").unwrap_or(600);
    let speed = parse_f32_arg(&args, "--speed").unwrap_or(0.5);

    let mut config = match parse_str_arg(&args, "--config") {
        Some(path) => match WorldConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load config {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => WorldConfig::default(),
    };
    if let Some(radius) = parse_i32_arg(&args, "--radius") {
        config.window_radius = radius;
    }

    let mut controller = StreamingController::new(config, HeadlessHost::new());

    let start = Instant::now();
    let mut observer = Vec3::new(0.5, 0.0, 0.5);
    for step in 0..steps {
        // Walk east for the first half, then north-west
        let heading = if step < steps / 2 {
            Vec3::X
        } else {
            Vec3::new(-1.0, 0.0, 1.0).normalize()
        };
        observer += heading * speed;

        if let Some(report) = controller.tick(observer) {
            log::info!(
                "tick {}: chunk {} (+{} -{} chunks, {} generated, {} live objects)",
                step,
                report.to,
                report.entered,
                report.evicted,
                report.generated,
                controller.host().live_count()
            );
            let config = controller.config();
            let cell = report.to.local_cell(observer, config.chunk_size, config.cell_size);
            let under = controller
                .slot_for(report.to)
                .and_then(|slot| slot.content())
                .and_then(|content| content.get(cell).copied());
            log::debug!("observer at ({:.1}, {:.1}) on cell ({}, {}): {:?}", observer.x, observer.z, cell.x, cell.z, under);
        }
    }
    let elapsed = start.elapsed();

    let stats = controller.stats();
    log::info!(
        "{} ticks in {:.2?}: {} transitions, {} rebinds, {} slots",
        stats.ticks, elapsed, stats.transitions, stats.rebinds, stats.slots_allocated
    );
    log::info!(
        "Cache: {} chunks, {} hits, {} misses; {} placements skipped",
        controller.cache().len(),
        stats.cache_hits,
        stats.cache_misses,
        stats.skipped_placements
    );
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn parse_usize_arg(args: &[String], flag: &str) -> Option<usize> {
    parse_str_arg(args, flag).and_then(|v| v.parse().ok())
}

fn parse_i32_arg(args: &[String], flag: &str) -> Option<i32> {
    parse_str_arg(args, flag).and_then(|v| v.parse().ok())
}

fn parse_f32_arg(args: &[String], flag: &str) -> Option<f32> {
    parse_str_arg(args, flag).and_then(|v| v.parse().ok())
}
