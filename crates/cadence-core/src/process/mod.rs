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


//! # Process Abstraction
//!
//! A **process** is a stateful unit of work ticked by a
//! [`Scheduler`](crate::Scheduler). It implements the [`Process`] trait and
//! drives its own life-cycle through the [`ProcessControl`] handle it receives
//! in [`Process::update`].
//!
//! ## Lifecycle
//!
//! ```text
//! init()  →  [ update(delta, ctx, control) ]*  →  succeeded() | failed() | aborted()
//! ```
//!
//! - **`init`** runs once, right before the first `update`.
//! - **`update`** runs at most once per tick while the process is alive and not paused.
//! - Exactly one of the terminal hooks runs, once, in the tick that terminates the process
//!   (or inside `abort(true)`).

pub mod adaptor;
pub mod state;

pub(crate) mod slot;

use crate::chain::ProcessChain;
use thiserror::Error;

/// Error a process may return from [`Process::update`].
///
/// The scheduler treats an error exactly like a call to
/// [`ProcessControl::fail`]: the `failed` hook runs and the chain is discarded.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The process gave up with a message.
    #[error("process failed: {0}")]
    Failed(String),
    /// Any other error escaping the process.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ProcessError {
    /// Convenience constructor for [`ProcessError::Failed`].
    pub fn failed(message: impl Into<String>) -> Self {
        ProcessError::Failed(message.into())
    }
}

/// Terminal outcome requested by a process during one `update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Succeeded,
    Failed,
}

/// Requests collected while a process runs its `update`.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Signal {
    pub(crate) outcome: Option<Outcome>,
    pub(crate) pause: bool,
}

impl Signal {
    // A failure is never overridden by a later `succeed`.
    pub(crate) fn succeed(&mut self) {
        if self.outcome.is_none() {
            self.outcome = Some(Outcome::Succeeded);
        }
    }

    pub(crate) fn fail(&mut self) {
        self.outcome = Some(Outcome::Failed);
    }
}

/// The restricted handle a process uses to steer its own life-cycle.
///
/// Only reachable from inside [`Process::update`]. Every request takes effect
/// when `update` returns.
pub struct ProcessControl<'a, D, C: ?Sized = ()> {
    signal: &'a mut Signal,
    spawned: &'a mut Vec<ProcessChain<D, C>>,
}

impl<'a, D, C: ?Sized> ProcessControl<'a, D, C> {
    pub(crate) fn new(signal: &'a mut Signal, spawned: &'a mut Vec<ProcessChain<D, C>>) -> Self {
        Self { signal, spawned }
    }

    /// Terminates the process successfully once `update` returns.
    ///
    /// Ignored if [`fail`](Self::fail) is also called during the same `update`.
    pub fn succeed(&mut self) {
        self.signal.succeed();
    }

    /// Terminates the process with a failure once `update` returns.
    ///
    /// Takes precedence over [`succeed`](Self::succeed), whatever the call order.
    pub fn fail(&mut self) {
        self.signal.fail();
    }

    /// Suspends the process. The scheduler stops calling `update` until the
    /// chain is unpaused through [`Scheduler::unpause`](crate::Scheduler::unpause).
    ///
    /// A terminal outcome requested in the same `update` wins over the pause.
    pub fn pause(&mut self) {
        self.signal.pause = true;
    }

    /// Withdraws a [`pause`](Self::pause) requested earlier in the same `update`.
    pub fn unpause(&mut self) {
        self.signal.pause = false;
    }

    /// Returns `true` if [`succeed`](Self::succeed) or [`fail`](Self::fail)
    /// was called during this `update`.
    pub fn is_resolved(&self) -> bool {
        self.signal.outcome.is_some()
    }

    /// Hands a new chain to the scheduler.
    ///
    /// The chain is attached after the current tick completes and is first
    /// ticked on the next `update`.
    pub fn spawn(&mut self, chain: ProcessChain<D, C>) {
        self.spawned.push(chain);
    }
}

/// A schedulable, stateful task.
///
/// `D` is the elapsed-time type handed to every tick, `C` the per-tick
/// context supplied by the caller of [`Scheduler::update`](crate::Scheduler::update).
/// `C` may be unsized, e.g. `dyn std::any::Any` for an opaque blob.
///
/// Every method has a no-op default, so a process only implements the hooks
/// it cares about.
pub trait Process<D, C: ?Sized = ()> {
    /// Human-readable name used in log output.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Called once, right before the first `update`.
    fn init(&mut self) {}

    /// Advances the process by one tick.
    ///
    /// `context` is only borrowed for the duration of the call.
    fn update(
        &mut self,
        _delta: D,
        _context: &mut C,
        _control: &mut ProcessControl<'_, D, C>,
    ) -> Result<(), ProcessError> {
        Ok(())
    }

    /// Called once when the process terminates successfully.
    fn succeeded(&mut self) {}

    /// Called once when the process terminates with a failure.
    fn failed(&mut self) {}

    /// Called once when the process is aborted by the scheduler.
    fn aborted(&mut self) {}
}
