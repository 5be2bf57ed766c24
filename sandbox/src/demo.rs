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


//! Demo processes driven by the sandbox loop.

use cadence_core::{Process, ProcessChain, ProcessControl, ProcessError};

/// Per-tick data lent to every process.
#[derive(Debug, Default)]
pub struct Frame {
    /// Index of the current tick, starting at 1.
    pub index: u64,
    /// Simulated seconds since the loop started.
    pub elapsed: f32,
    /// Enemies spawned so far.
    pub enemies: u32,
}

/// Succeeds once `duration` seconds have elapsed.
pub struct Timer {
    label: &'static str,
    duration: f32,
    elapsed: f32,
}

impl Timer {
    pub fn new(label: &'static str, duration: f32) -> Self {
        Self {
            label,
            duration,
            elapsed: 0.0,
        }
    }
}

impl Process<f32, Frame> for Timer {
    fn name(&self) -> &str {
        self.label
    }

    fn update(
        &mut self,
        delta: f32,
        _frame: &mut Frame,
        control: &mut ProcessControl<'_, f32, Frame>,
    ) -> Result<(), ProcessError> {
        self.elapsed += delta;
        if self.elapsed >= self.duration {
            control.succeed();
        }
        Ok(())
    }

    fn succeeded(&mut self) {
        log::info!("[{}] done after {:.2}s", self.label, self.elapsed);
    }

    fn aborted(&mut self) {
        log::info!("[{}] aborted at {:.2}s", self.label, self.elapsed);
    }
}

/// Retries a load a few times, then gives up with an error.
pub struct FlakyLoader {
    asset: &'static str,
    attempts: u32,
    max_attempts: u32,
}

impl FlakyLoader {
    pub fn new(asset: &'static str, max_attempts: u32) -> Self {
        Self {
            asset,
            attempts: 0,
            max_attempts,
        }
    }
}

impl Process<f32, Frame> for FlakyLoader {
    fn name(&self) -> &str {
        "FlakyLoader"
    }

    fn update(
        &mut self,
        _delta: f32,
        _frame: &mut Frame,
        _control: &mut ProcessControl<'_, f32, Frame>,
    ) -> Result<(), ProcessError> {
        self.attempts += 1;
        log::debug!("[FlakyLoader] loading '{}' (attempt {})", self.asset, self.attempts);
        if self.attempts >= self.max_attempts {
            return Err(ProcessError::failed(format!(
                "'{}' unavailable after {} attempts",
                self.asset, self.attempts
            )));
        }
        Ok(())
    }

    fn failed(&mut self) {
        log::warn!("[FlakyLoader] giving up on '{}'", self.asset);
    }
}

/// Pauses itself on its first tick and keeps watch once resumed.
#[derive(Default)]
pub struct Sentinel {
    watched: u32,
}

impl Process<f32, Frame> for Sentinel {
    fn name(&self) -> &str {
        "Sentinel"
    }

    fn update(
        &mut self,
        _delta: f32,
        frame: &mut Frame,
        control: &mut ProcessControl<'_, f32, Frame>,
    ) -> Result<(), ProcessError> {
        if self.watched == 0 {
            log::info!("[Sentinel] standing by at tick {}", frame.index);
            control.pause();
        }
        self.watched += 1;
        if self.watched > 30 {
            control.succeed();
        }
        Ok(())
    }

    fn succeeded(&mut self) {
        log::info!("[Sentinel] watch over");
    }

    fn aborted(&mut self) {
        log::info!("[Sentinel] relieved early");
    }
}

/// Spawns a short enemy chain every `interval` seconds, `waves` times.
pub struct WaveSpawner {
    interval: f32,
    waves: u32,
    until_next: f32,
}

impl WaveSpawner {
    pub fn new(interval: f32, waves: u32) -> Self {
        Self {
            interval,
            waves,
            until_next: 0.0,
        }
    }
}

impl Process<f32, Frame> for WaveSpawner {
    fn name(&self) -> &str {
        "WaveSpawner"
    }

    fn update(
        &mut self,
        delta: f32,
        frame: &mut Frame,
        control: &mut ProcessControl<'_, f32, Frame>,
    ) -> Result<(), ProcessError> {
        self.until_next -= delta;
        if self.until_next > 0.0 {
            return Ok(());
        }

        self.until_next = self.interval;
        self.waves = self.waves.saturating_sub(1);
        frame.enemies += 3;
        log::info!(
            "[WaveSpawner] wave spawned at {:.2}s ({} left)",
            frame.elapsed,
            self.waves
        );
        control.spawn(ProcessChain::new(Timer::new("enemy-approach", 0.5)).then_fn(
            |_, frame: &mut Frame, succeed, _| {
                log::info!("[Enemy] wave reached the gate ({} enemies)", frame.enemies);
                succeed();
            },
        ));

        if self.waves == 0 {
            control.succeed();
        }
        Ok(())
    }
}
