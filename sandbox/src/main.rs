// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


//! Sandbox driving a process scheduler from a fixed-step clock.

mod config;
mod demo;

use anyhow::Result;
use cadence_core::Scheduler;
use clap::Parser;
use config::SandboxConfig;
use demo::{FlakyLoader, Frame, Sentinel, Timer, WaveSpawner};
use std::path::PathBuf;
use std::time::Duration;

/// Command-line arguments of the sandbox.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the sandbox configuration file.
    #[arg(long, default_value = "Sandbox.toml")]
    config: PathBuf,
    /// Overrides the number of simulated ticks.
    #[arg(long)]
    ticks: Option<u32>,
    /// Overrides the fixed time step, in seconds.
    #[arg(long)]
    delta: Option<f32>,
    /// Sleeps for `delta` between ticks instead of running flat out.
    #[arg(long)]
    realtime: bool,
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = SandboxConfig::load(&args.config)?;
    if let Some(ticks) = args.ticks {
        config.ticks = ticks;
    }
    if let Some(delta) = args.delta {
        config.delta = delta;
    }

    let mut scheduler = Scheduler::<f32, Frame>::with_config(config.scheduler.clone());

    // Intro sequence: each step waits for the previous one.
    scheduler
        .attach(Timer::new("fade-in", 0.5))
        .then(Timer::new("title-card", 1.0))
        .then_fn(|_, frame: &mut Frame, succeed, _| {
            log::info!("[Intro] finished at tick {}", frame.index);
            succeed();
        });

    // Fails on its third attempt; the follow-up never runs.
    scheduler
        .attach(FlakyLoader::new("music/theme.ogg", 3))
        .then(Timer::new("play-theme", 2.0));

    let sentinel = scheduler.attach(Sentinel::default()).id();
    scheduler.attach(WaveSpawner::new(1.0, 3));

    let mut frame = Frame::default();
    for tick in 1..=config.ticks {
        if scheduler.is_empty() {
            break;
        }

        frame.index = u64::from(tick);
        frame.elapsed += config.delta;

        if tick == config.resume_sentinel_at {
            if let Err(e) = scheduler.unpause(sentinel) {
                log::warn!("Could not resume sentinel: {e}");
            }
        }
        if config.abort_after == Some(tick) {
            scheduler.abort(false);
        }

        scheduler.update(config.delta, &mut frame);

        if args.realtime {
            std::thread::sleep(Duration::from_secs_f32(config.delta));
        }
    }

    log::info!(
        "Sandbox finished after {} tick(s), {} chain(s) still registered",
        frame.index,
        scheduler.len()
    );
    log::info!("Stats: {:?}", scheduler.stats());

    // Anything still running is shut down cleanly.
    scheduler.abort(true);
    Ok(())
}
