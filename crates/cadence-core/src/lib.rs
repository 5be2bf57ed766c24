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


//! # Cadence Core
//!
//! A cooperative, tick-driven process scheduler.
//!
//! A [`Scheduler`] owns an ordered collection of process chains. Each call to
//! [`Scheduler::update`] ticks the current head of every chain once, in
//! attachment order. A head that succeeds hands over to its successor on the
//! next tick; a head that fails discards the whole chain.
//!
//! ```
//! use cadence_core::{Process, ProcessControl, ProcessError, Scheduler};
//!
//! struct Countdown(f32);
//!
//! impl Process<f32> for Countdown {
//!     fn update(
//!         &mut self,
//!         delta: f32,
//!         _ctx: &mut (),
//!         control: &mut ProcessControl<'_, f32>,
//!     ) -> Result<(), ProcessError> {
//!         self.0 -= delta;
//!         if self.0 <= 0.0 {
//!             control.succeed();
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let mut scheduler = Scheduler::<f32>::new();
//! scheduler
//!     .attach(Countdown(1.0))
//!     .then_fn(|_: f32, _: &mut (), succeed: &dyn Fn(), _: &dyn Fn()| succeed());
//!
//! let mut ticks = 0;
//! while !scheduler.empty() {
//!     scheduler.tick(0.25);
//!     ticks += 1;
//! }
//! assert_eq!(ticks, 5);
//! assert_eq!(scheduler.stats().succeeded, 2);
//! ```

#![warn(missing_docs)]

pub mod chain;
pub mod config;
pub mod error;
pub mod process;
pub mod scheduler;
pub mod stats;

pub use chain::ProcessChain;
pub use config::SchedulerConfig;
pub use error::SchedulerError;
pub use process::adaptor::FnProcess;
pub use process::state::ProcessState;
pub use process::{Process, ProcessControl, ProcessError};
pub use scheduler::{ChainHandle, ChainId, Scheduler};
pub use stats::SchedulerStats;
