use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use aerohud_core::config::YARDS_PER_STATUTE_MILE;
use aerohud_core::traffic::{heading_bug_x, onscreen_traffic_projection};
use aerohud_core::{FrameStats, HudEngine, Primitive, SymbologyLayout};
use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use serde::Serialize;

mod config;
mod simulation;

use config::load_config;
use simulation::{AhrsSimulation, SimulatedTraffic};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,

    /// JSON config file; defaults to the per-user config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the frame loop with simulated AHRS and traffic
    Run {
        #[arg(long, default_value_t = 800)]
        width: i32,

        #[arg(long, default_value_t = 480)]
        height: i32,

        /// Frames per second
        #[arg(long, default_value_t = 60)]
        fps: u32,

        /// Number of frames to lay out
        #[arg(long, default_value_t = 600)]
        frames: u64,

        /// Number of simulated traffic targets
        #[arg(long, default_value_t = 3)]
        traffic: usize,

        /// Drop the heading every N frames
        #[arg(long)]
        dropout_every: Option<u64>,

        /// Print every frame's primitives as one JSON line
        #[arg(long)]
        json: bool,
    },
    /// Print reticle scale and heading bug diagnostic tables
    Tables,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FrameRecord<'a> {
    frame: u64,
    reticles: usize,
    dropped: usize,
    traffic_skipped: bool,
    primitives: &'a [Primitive],
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Run {
            width,
            height,
            fps,
            frames,
            traffic,
            dropout_every,
            json,
        } => {
            let engine = Arc::new(HudEngine::new(width, height, config)?);
            run(engine, fps, frames, traffic, dropout_every, json)
        }
        Command::Tables => {
            let engine = HudEngine::new(800, 480, config)?;
            print_tables(&engine);
            Ok(())
        }
    }
}

fn run(
    engine: Arc<HudEngine>,
    fps: u32,
    frames: u64,
    traffic_count: usize,
    dropout_every: Option<u64>,
    json: bool,
) -> Result<()> {
    let frame_time = Duration::from_secs(1) / fps.max(1);
    let mut layout = SymbologyLayout::new(engine);
    let mut aircraft = AhrsSimulation::new(0.0, dropout_every);
    let mut fleet = SimulatedTraffic::fleet(traffic_count);
    let mut reports = Vec::with_capacity(traffic_count);
    let mut slow_frames = 0u64;

    log::info!(
        "Running {} frames at {} fps with {} targets",
        frames,
        fps,
        traffic_count
    );

    for frame in 0..frames {
        let started = Instant::now();
        let orientation = aircraft.orientation();

        reports.clear();
        reports.extend(fleet.iter().map(|target| target.report(orientation.altitude)));

        layout.layout(&orientation, &reports);
        let FrameStats {
            reticles,
            dropped,
            traffic_skipped,
        } = layout.stats();
        let primitives = layout.primitives();

        if json {
            let record = FrameRecord {
                frame,
                reticles,
                dropped,
                traffic_skipped,
                primitives,
            };
            println!("{}", serde_json::to_string(&record)?);
        } else {
            println!(
                "frame {:5}: {:3} primitives, {:2} reticles, {} dropped{}",
                frame,
                primitives.len(),
                reticles,
                dropped,
                if traffic_skipped {
                    ", heading unavailable"
                } else {
                    ""
                }
            );
        }

        aircraft.simulate();
        fleet.iter_mut().for_each(SimulatedTraffic::simulate);

        let elapsed = started.elapsed();
        if elapsed < frame_time {
            std::thread::sleep(frame_time - elapsed);
        } else {
            slow_frames += 1;
            log::trace!("Frame {} took {:?}", frame, elapsed);
        }
    }

    if slow_frames > 0 {
        log::warn!("{} of {} frames overran {:?}", slow_frames, frames, frame_time);
    }
    Ok(())
}

fn print_tables(engine: &HudEngine) {
    let scaler = engine.traffic().scaler();
    let angles = engine.angles();

    let step = YARDS_PER_STATUTE_MILE / 10.0;
    let mut distance = 0.0;
    while distance < 2.5 * YARDS_PER_STATUTE_MILE {
        println!("{}' -> {}", distance, scaler.reticle_size(distance));
        distance += step;
    }

    let heading = 327.0;
    let pixels_per_degree = 10.0;
    for bearing in (0..360).step_by(10) {
        let bearing = bearing as f64;
        println!(
            "Bearing {} -> {}px",
            bearing,
            heading_bug_x(heading, bearing, 2.2222222)
        );
        let offset =
            onscreen_traffic_projection(heading, 0.0, bearing, 1000.0, 1000.0, pixels_per_degree);
        println!("    {}, {}", offset.x + 400.0, offset.y + 240.0);
        println!("TRUE: {} -> {} MAG", bearing, angles.apply_declination(bearing));
    }
}
