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


//! Sandbox configuration, loaded from `Sandbox.toml`.

use anyhow::{Context, Result};
use cadence_core::SchedulerConfig;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Represents the structure of the `Sandbox.toml` file.
#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct SandboxConfig {
    /// Number of ticks to simulate.
    pub ticks: u32,
    /// Fixed time step, in seconds.
    pub delta: f32,
    /// Issue a deferred abort after this many ticks.
    pub abort_after: Option<u32>,
    /// Tick after which the paused sentinel is resumed.
    pub resume_sentinel_at: u32,
    /// Settings forwarded to the scheduler.
    pub scheduler: SchedulerConfig,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            ticks: 240,
            delta: 1.0 / 60.0,
            abort_after: None,
            resume_sentinel_at: 90,
            scheduler: SchedulerConfig::labeled("sandbox"),
        }
    }
}

impl SandboxConfig {
    /// Loads the configuration at `path`.
    /// If the file does not exist, it returns the default configuration.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!(
                "No '{}' found. Using default configuration.",
                path.display()
            );
            return Ok(Self::default());
        }

        log::info!("Found '{}'. Loading configuration.", path.display());
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at '{}'", path.display()))?;
        toml::from_str(&source)
            .with_context(|| format!("Failed to parse TOML from '{}'", path.display()))
    }
}
