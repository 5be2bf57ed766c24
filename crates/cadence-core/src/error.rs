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


//! Errors reported by the scheduler's id-addressed operations.

use crate::scheduler::ChainId;
use thiserror::Error;

/// An error returned by [`Scheduler`](crate::Scheduler) operations that
/// address a chain by its [`ChainId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// The chain terminated, was cleared, or never belonged to this scheduler.
    #[error("no chain registered under {0}")]
    UnknownChain(ChainId),
}
