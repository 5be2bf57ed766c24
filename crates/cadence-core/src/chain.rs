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


//! Owning sequences of processes.

use crate::process::adaptor::FnProcess;
use crate::process::slot::ProcessSlot;
use crate::process::Process;
use std::collections::VecDeque;
use std::fmt;

/// A sequence of processes that run one after another.
///
/// Only the head is live. When the head succeeds its successor is promoted;
/// when it fails or is aborted the successors are dropped without any hook
/// being invoked on them.
///
/// Chains are usually built through [`Scheduler::attach`](crate::Scheduler::attach)
/// and [`ChainHandle::then`](crate::ChainHandle::then). A detached chain can
/// be built up front and registered later with
/// [`Scheduler::attach_chain`](crate::Scheduler::attach_chain) or
/// [`ProcessControl::spawn`](crate::ProcessControl::spawn):
///
/// ```
/// use cadence_core::{ProcessChain, Scheduler};
///
/// let chain: ProcessChain<f32> =
///     ProcessChain::from_fn(|_: f32, _: &mut (), succeed: &dyn Fn(), _: &dyn Fn()| succeed())
///         .then_fn(|_: f32, _: &mut (), succeed: &dyn Fn(), _: &dyn Fn()| succeed());
/// assert_eq!(chain.remaining(), 2);
///
/// let mut scheduler = Scheduler::<f32>::new();
/// scheduler.attach_chain(chain);
/// assert_eq!(scheduler.size(), 1);
/// ```
pub struct ProcessChain<D, C: ?Sized = ()> {
    head: ProcessSlot<D, C>,
    // Not yet started, in run order.
    successors: VecDeque<ProcessSlot<D, C>>,
}

impl<D, C: ?Sized> ProcessChain<D, C> {
    /// Creates a single-element chain.
    pub fn new<P>(process: P) -> Self
    where
        P: Process<D, C> + 'static,
    {
        Self::from_boxed(Box::new(process))
    }

    /// Creates a single-element chain from a `(delta, context, succeed, fail)` callable.
    pub fn from_fn<F>(func: F) -> Self
    where
        F: FnMut(D, &mut C, &dyn Fn(), &dyn Fn()) + 'static,
    {
        Self::new(FnProcess::new(func))
    }

    /// Creates a single-element chain from an already boxed process.
    pub fn from_boxed(process: Box<dyn Process<D, C>>) -> Self {
        Self {
            head: ProcessSlot::new(process),
            successors: VecDeque::new(),
        }
    }

    /// Appends a successor and returns the chain.
    pub fn then<P>(mut self, process: P) -> Self
    where
        P: Process<D, C> + 'static,
    {
        self.push(Box::new(process));
        self
    }

    /// Appends a callable successor and returns the chain.
    pub fn then_fn<F>(self, func: F) -> Self
    where
        F: FnMut(D, &mut C, &dyn Fn(), &dyn Fn()) + 'static,
    {
        self.then(FnProcess::new(func))
    }

    /// Number of processes left in the chain, head included.
    pub fn remaining(&self) -> usize {
        self.successors.len() + 1
    }

    /// Appends a process at the tail. The head is left untouched.
    pub(crate) fn push(&mut self, process: Box<dyn Process<D, C>>) {
        self.successors.push_back(ProcessSlot::new(process));
    }

    pub(crate) fn head(&self) -> &ProcessSlot<D, C> {
        &self.head
    }

    pub(crate) fn head_mut(&mut self) -> &mut ProcessSlot<D, C> {
        &mut self.head
    }

    /// Drops the head and makes its successor the new head.
    ///
    /// Returns `false` (and leaves the chain untouched) when there is no successor.
    pub(crate) fn promote(&mut self) -> bool {
        match self.successors.pop_front() {
            Some(next) => {
                self.head = next;
                true
            }
            None => false,
        }
    }
}

impl<D, C: ?Sized> fmt::Debug for ProcessChain<D, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessChain")
            .field("head", &self.head.name())
            .field("state", &self.head.state())
            .field("abort_pending", &self.head.is_abort_requested())
            .field("remaining", &self.remaining())
            .finish()
    }
}
