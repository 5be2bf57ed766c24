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


//! Life-cycle states of a single process.

use serde::Serialize;
use std::fmt;

/// The life-cycle state of a process.
///
/// ```text
/// Uninitialized ──update──► Running ──succeed()──► Succeeded
///                              │   ──fail()─────► Failed
///                              │   ──abort──────► Aborted
///                   pause() ◄──┴──► unpause()
///                           Paused
/// ```
///
/// `Succeeded`, `Failed` and `Aborted` are terminal: once entered, no hook of
/// the process is invoked again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ProcessState {
    /// Attached but never updated.
    #[default]
    Uninitialized,
    /// Updated at most once per scheduler tick.
    Running,
    /// Suspended; the scheduler skips it until it is unpaused.
    Paused,
    /// Terminated successfully. The successor (if any) takes over.
    Succeeded,
    /// Terminated with a failure. Remaining successors are discarded.
    Failed,
    /// Terminated by the scheduler's `abort`.
    Aborted,
}

impl ProcessState {
    /// Returns `true` for `Succeeded`, `Failed` and `Aborted`.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ProcessState::Succeeded | ProcessState::Failed | ProcessState::Aborted
        )
    }

    /// Returns `true` while the process can still be ticked or resumed.
    pub fn is_alive(self) -> bool {
        !self.is_terminal()
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessState::Uninitialized => write!(f, "Uninitialized"),
            ProcessState::Running => write!(f, "Running"),
            ProcessState::Paused => write!(f, "Paused"),
            ProcessState::Succeeded => write!(f, "Succeeded"),
            ProcessState::Failed => write!(f, "Failed"),
            ProcessState::Aborted => write!(f, "Aborted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_uninitialized() {
        assert_eq!(ProcessState::default(), ProcessState::Uninitialized);
    }

    #[test]
    fn terminal_states() {
        assert!(ProcessState::Succeeded.is_terminal());
        assert!(ProcessState::Failed.is_terminal());
        assert!(ProcessState::Aborted.is_terminal());

        assert!(ProcessState::Uninitialized.is_alive());
        assert!(ProcessState::Running.is_alive());
        assert!(ProcessState::Paused.is_alive());
    }
}
