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


//! Scheduler configuration.

use log::Level;
use serde::{Deserialize, Serialize};

/// Configuration for a [`Scheduler`](crate::Scheduler).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Identifies the scheduler in log output.
    pub label: String,
    /// Number of chain slots reserved up front.
    pub initial_capacity: usize,
    /// Logs life-cycle transitions (attach, promotion, termination) at
    /// `debug` level instead of `trace`.
    pub trace_transitions: bool,
}

impl SchedulerConfig {
    /// Creates a default configuration with the given label.
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub(crate) fn transition_level(&self) -> Level {
        if self.trace_transitions {
            Level::Debug
        } else {
            Level::Trace
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            label: "scheduler".to_owned(),
            initial_capacity: 16,
            trace_transitions: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: SchedulerConfig =
            toml::from_str("label = \"gameplay\"").expect("valid scheduler config");
        assert_eq!(config.label, "gameplay");
        assert_eq!(config.initial_capacity, 16);
        assert!(config.trace_transitions);
    }

    #[test]
    fn transition_level_follows_flag() {
        let mut config = SchedulerConfig::labeled("ui");
        assert_eq!(config.transition_level(), Level::Debug);
        config.trace_transitions = false;
        assert_eq!(config.transition_level(), Level::Trace);
    }
}
