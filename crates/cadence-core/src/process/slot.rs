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


//! The state machine wrapped around every attached process.

use super::state::ProcessState;
use super::{Outcome, Process, ProcessControl, Signal};
use crate::chain::ProcessChain;

/// What a single tick did to a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tick {
    /// Paused, `update` was not called.
    Suspended,
    /// `update` ran and the process keeps running.
    Continued,
    /// `update` ran and the process paused itself.
    Paused,
    /// `update` ran and the process succeeded; `succeeded()` has been invoked.
    Succeeded,
    /// `update` ran and the process failed; `failed()` has been invoked.
    Failed,
    /// A pending abort was applied; `aborted()` has been invoked.
    Aborted,
}

/// A boxed process together with its life-cycle bookkeeping.
pub(crate) struct ProcessSlot<D, C: ?Sized> {
    process: Box<dyn Process<D, C>>,
    state: ProcessState,
    started: bool,
    abort_requested: bool,
}

impl<D, C: ?Sized> ProcessSlot<D, C> {
    pub(crate) fn new(process: Box<dyn Process<D, C>>) -> Self {
        Self {
            process,
            state: ProcessState::Uninitialized,
            started: false,
            abort_requested: false,
        }
    }

    pub(crate) fn name(&self) -> &str {
        self.process.name()
    }

    pub(crate) fn state(&self) -> ProcessState {
        self.state
    }

    pub(crate) fn is_abort_requested(&self) -> bool {
        self.abort_requested
    }

    /// Runs one tick of the state machine.
    pub(crate) fn tick(
        &mut self,
        delta: D,
        context: &mut C,
        spawned: &mut Vec<ProcessChain<D, C>>,
    ) -> Tick {
        if self.abort_requested {
            self.abort_requested = false;
            self.enter_aborted();
            return Tick::Aborted;
        }

        match self.state {
            ProcessState::Paused => return Tick::Suspended,
            // A terminal head never stays registered; nothing left to do.
            state if state.is_terminal() => return Tick::Suspended,
            _ => {}
        }

        if !self.started {
            self.started = true;
            self.state = ProcessState::Running;
            self.process.init();
        }

        let mut signal = Signal::default();
        let result = {
            let mut control = ProcessControl::new(&mut signal, spawned);
            self.process.update(delta, context, &mut control)
        };
        if let Err(e) = result {
            log::warn!("Process '{}' returned an error: {e}", self.process.name());
            signal.fail();
        }

        match signal.outcome {
            Some(Outcome::Failed) => {
                self.state = ProcessState::Failed;
                self.process.failed();
                Tick::Failed
            }
            Some(Outcome::Succeeded) => {
                self.state = ProcessState::Succeeded;
                self.process.succeeded();
                Tick::Succeeded
            }
            None if signal.pause => {
                self.state = ProcessState::Paused;
                Tick::Paused
            }
            None => Tick::Continued,
        }
    }

    /// Marks the process for abortion at the start of its next tick.
    pub(crate) fn request_abort(&mut self) {
        if self.state.is_alive() {
            self.abort_requested = true;
        }
    }

    /// Aborts right away. Returns `false` if the process had already terminated.
    pub(crate) fn abort_now(&mut self) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        self.abort_requested = false;
        self.enter_aborted();
        true
    }

    /// Returns `true` if the state changed.
    pub(crate) fn pause(&mut self) -> bool {
        match self.state {
            ProcessState::Uninitialized | ProcessState::Running => {
                self.state = ProcessState::Paused;
                true
            }
            _ => false,
        }
    }

    /// Returns `true` if the state changed.
    pub(crate) fn unpause(&mut self) -> bool {
        if self.state != ProcessState::Paused {
            return false;
        }
        self.state = if self.started {
            ProcessState::Running
        } else {
            ProcessState::Uninitialized
        };
        true
    }

    fn enter_aborted(&mut self) {
        self.state = ProcessState::Aborted;
        self.process.aborted();
    }
}
