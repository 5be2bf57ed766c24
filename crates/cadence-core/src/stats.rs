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


//! Counters describing what a scheduler has done so far.

use serde::Serialize;

/// Running totals collected by a [`Scheduler`](crate::Scheduler).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SchedulerStats {
    /// Calls to `update`.
    pub ticks: u64,
    /// Process `update` invocations across all chains.
    pub updates: u64,
    /// Processes that succeeded.
    pub succeeded: u64,
    /// Processes that failed.
    pub failed: u64,
    /// Processes that were aborted.
    pub aborted: u64,
    /// Successors promoted to head.
    pub promoted: u64,
    /// Chains attached through [`ProcessControl::spawn`](crate::ProcessControl::spawn).
    pub spawned: u64,
}

impl SchedulerStats {
    /// Processes that reached a terminal state.
    pub fn terminated(&self) -> u64 {
        self.succeeded + self.failed + self.aborted
    }
}
