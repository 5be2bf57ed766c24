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


//! # Scheduler
//!
//! Owns an ordered collection of [`ProcessChain`]s and ticks the head of each
//! one per [`Scheduler::update`].
//!
//! ## Tick algorithm
//!
//! For every chain, in attachment order:
//!
//! 1. A head with a pending abort runs `aborted()` and the chain is dropped.
//! 2. A paused head is skipped; the chain stays registered.
//! 3. Otherwise the head is updated once:
//!    - no outcome: nothing changes;
//!    - success: `succeeded()` runs, then the successor is promoted (it first
//!      runs on the *next* tick) or the chain is dropped if there is none;
//!    - failure: `failed()` runs and the whole chain is dropped.
//!
//! Chains spawned by processes during the tick are attached once it completes.

use crate::chain::ProcessChain;
use crate::config::SchedulerConfig;
use crate::error::SchedulerError;
use crate::process::adaptor::FnProcess;
use crate::process::slot::Tick;
use crate::process::state::ProcessState;
use crate::process::Process;
use crate::stats::SchedulerStats;
use serde::Serialize;
use std::fmt;

/// Identifies a chain registered with a [`Scheduler`].
///
/// Ids grow monotonically and are never reused by the same scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ChainId(u64);

impl ChainId {
    /// Returns the raw id value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Chain({})", self.0)
    }
}

struct ChainEntry<D, C: ?Sized> {
    id: ChainId,
    chain: ProcessChain<D, C>,
}

/// A handle to a registered chain, used to append successors.
///
/// Appending never touches the chain's live head.
pub struct ChainHandle<'a, D, C: ?Sized = ()> {
    id: ChainId,
    chain: &'a mut ProcessChain<D, C>,
}

impl<'a, D, C: ?Sized> ChainHandle<'a, D, C> {
    /// The id of the chain this handle refers to.
    pub fn id(&self) -> ChainId {
        self.id
    }

    /// Appends a successor that starts once every process before it succeeded.
    pub fn then<P>(self, process: P) -> Self
    where
        P: Process<D, C> + 'static,
    {
        self.chain.push(Box::new(process));
        log::trace!(
            "{}: appended '{}' ({} queued)",
            self.id,
            std::any::type_name::<P>(),
            self.chain.remaining()
        );
        self
    }

    /// Appends a `(delta, context, succeed, fail)` callable as a successor.
    pub fn then_fn<F>(self, func: F) -> Self
    where
        F: FnMut(D, &mut C, &dyn Fn(), &dyn Fn()) + 'static,
    {
        self.then(FnProcess::new(func))
    }

    /// Number of processes left in the chain, head included.
    pub fn remaining(&self) -> usize {
        self.chain.remaining()
    }
}

/// A cooperative, tick-driven process scheduler.
///
/// `D` is the elapsed-time type passed to every tick, `C` the context type
/// lent to processes during [`update`](Self::update).
///
/// Processes never get access to the scheduler itself, so `attach`, `update`,
/// `abort` and `clear` cannot be re-entered from a hook. New work discovered
/// while ticking goes through [`ProcessControl::spawn`](crate::ProcessControl::spawn).
pub struct Scheduler<D, C: ?Sized = ()> {
    config: SchedulerConfig,
    // Sorted by id: chains are only ever appended, with increasing ids.
    entries: Vec<ChainEntry<D, C>>,
    next_id: u64,
    stats: SchedulerStats,
}

impl<D, C: ?Sized> Scheduler<D, C> {
    /// Creates an empty scheduler with the default configuration.
    pub fn new() -> Self {
        Self::with_config(SchedulerConfig::default())
    }

    /// Creates an empty scheduler with the given configuration.
    pub fn with_config(config: SchedulerConfig) -> Self {
        log::info!(
            "Scheduler '{}' created (capacity={})",
            config.label,
            config.initial_capacity
        );
        Self {
            entries: Vec::with_capacity(config.initial_capacity),
            config,
            next_id: 0,
            stats: SchedulerStats::default(),
        }
    }

    /// The configuration this scheduler was created with.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Counters accumulated since construction or the last [`clear`](Self::clear).
    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    /// Registers a new chain whose head is `process`.
    ///
    /// The chain is first ticked on the next [`update`](Self::update).
    pub fn attach<P>(&mut self, process: P) -> ChainHandle<'_, D, C>
    where
        P: Process<D, C> + 'static,
    {
        self.attach_chain(ProcessChain::new(process))
    }

    /// Registers a new chain whose head is a `(delta, context, succeed, fail)` callable.
    pub fn attach_fn<F>(&mut self, func: F) -> ChainHandle<'_, D, C>
    where
        F: FnMut(D, &mut C, &dyn Fn(), &dyn Fn()) + 'static,
    {
        self.attach(FnProcess::new(func))
    }

    /// Registers an already built chain.
    pub fn attach_chain(&mut self, chain: ProcessChain<D, C>) -> ChainHandle<'_, D, C> {
        let index = self.entries.len();
        let id = Self::register(&mut self.entries, &mut self.next_id, &self.config, chain);
        ChainHandle {
            id,
            chain: &mut self.entries[index].chain,
        }
    }

    /// Returns a handle to a registered chain, e.g. to append more successors.
    pub fn chain(&mut self, id: ChainId) -> Result<ChainHandle<'_, D, C>, SchedulerError> {
        let entry = self.entry_mut(id)?;
        Ok(ChainHandle {
            id,
            chain: &mut entry.chain,
        })
    }

    /// Returns `true` if `id` refers to a registered chain.
    pub fn contains(&self, id: ChainId) -> bool {
        self.index_of(id).is_ok()
    }

    /// State of the current head of the chain `id`, if it is registered.
    ///
    /// A deferred [`abort`](Self::abort) does not change this value: the head
    /// keeps reporting `Running`, `Paused` or `Uninitialized` until the next
    /// [`update`](Self::update) delivers the abort. Use
    /// [`is_abort_pending`](Self::is_abort_pending) to tell the two apart.
    pub fn state(&self, id: ChainId) -> Option<ProcessState> {
        self.index_of(id)
            .ok()
            .map(|index| self.entries[index].chain.head().state())
    }

    /// Whether a deferred abort has been requested for the head of chain `id`
    /// and not delivered yet. `false` for unknown chains.
    pub fn is_abort_pending(&self, id: ChainId) -> bool {
        self.index_of(id)
            .map(|index| self.entries[index].chain.head().is_abort_requested())
            .unwrap_or(false)
    }

    /// Pauses the current head of chain `id`. No-op if it is already paused.
    pub fn pause(&mut self, id: ChainId) -> Result<(), SchedulerError> {
        let level = self.config.transition_level();
        let entry = self.entry_mut(id)?;
        if entry.chain.head_mut().pause() {
            log::log!(level, "{id}: '{}' paused", entry.chain.head().name());
        }
        Ok(())
    }

    /// Resumes the current head of chain `id`. No-op unless it is paused.
    pub fn unpause(&mut self, id: ChainId) -> Result<(), SchedulerError> {
        let level = self.config.transition_level();
        let entry = self.entry_mut(id)?;
        if entry.chain.head_mut().unpause() {
            log::log!(level, "{id}: '{}' resumed", entry.chain.head().name());
        }
        Ok(())
    }

    /// Aborts the head of every registered chain.
    ///
    /// With `immediate` set, `aborted()` runs on every head before this call
    /// returns and the scheduler is left empty. Otherwise the heads are only
    /// marked; `aborted()` runs and the chains are dropped at the start of the
    /// next [`update`](Self::update), before any process is updated.
    ///
    /// Successors of aborted heads are dropped without any hook.
    pub fn abort(&mut self, immediate: bool) {
        let Self {
            config,
            entries,
            stats,
            ..
        } = self;
        log::info!(
            "Scheduler '{}': aborting {} chain(s){}",
            config.label,
            entries.len(),
            if immediate { " immediately" } else { "" }
        );

        if immediate {
            let level = config.transition_level();
            for mut entry in entries.drain(..) {
                let head = entry.chain.head_mut();
                if head.abort_now() {
                    stats.aborted += 1;
                    log::log!(level, "{}: '{}' aborted", entry.id, head.name());
                }
            }
        } else {
            for entry in entries.iter_mut() {
                entry.chain.head_mut().request_abort();
            }
        }
    }

    /// Drops every chain without invoking any life-cycle hook and resets the
    /// statistics. Chain ids keep increasing.
    pub fn clear(&mut self) {
        log::info!(
            "Scheduler '{}': clearing {} chain(s)",
            self.config.label,
            self.entries.len()
        );
        self.entries.clear();
        self.stats = SchedulerStats::default();
    }

    /// Number of registered chains. A chain counts once, however many
    /// successors it still holds.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no chain is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Alias of [`len`](Self::len).
    pub fn size(&self) -> usize {
        self.len()
    }

    /// Alias of [`is_empty`](Self::is_empty).
    pub fn empty(&self) -> bool {
        self.is_empty()
    }

    fn register(
        entries: &mut Vec<ChainEntry<D, C>>,
        next_id: &mut u64,
        config: &SchedulerConfig,
        chain: ProcessChain<D, C>,
    ) -> ChainId {
        let id = ChainId(*next_id);
        *next_id += 1;
        log::log!(
            config.transition_level(),
            "{id}: attached '{}' ({} queued)",
            chain.head().name(),
            chain.remaining()
        );
        entries.push(ChainEntry { id, chain });
        id
    }

    fn index_of(&self, id: ChainId) -> Result<usize, SchedulerError> {
        self.entries
            .binary_search_by_key(&id, |entry| entry.id)
            .map_err(|_| SchedulerError::UnknownChain(id))
    }

    fn entry_mut(&mut self, id: ChainId) -> Result<&mut ChainEntry<D, C>, SchedulerError> {
        let index = self.index_of(id)?;
        Ok(&mut self.entries[index])
    }
}

impl<D: Copy, C: ?Sized> Scheduler<D, C> {
    /// Runs one tick over every registered chain, in attachment order.
    ///
    /// `context` is lent to each process for the duration of its `update`.
    pub fn update(&mut self, delta: D, context: &mut C) {
        let Self {
            config,
            entries,
            next_id,
            stats,
        } = self;
        let level = config.transition_level();
        let visited = entries.len();
        let mut spawned = Vec::new();
        stats.ticks += 1;

        entries.retain_mut(|entry| {
            let id = entry.id;
            let tick = entry
                .chain
                .head_mut()
                .tick(delta, &mut *context, &mut spawned);
            let head = entry.chain.head();
            match tick {
                Tick::Suspended => true,
                Tick::Continued => {
                    stats.updates += 1;
                    true
                }
                Tick::Paused => {
                    stats.updates += 1;
                    log::log!(level, "{id}: '{}' paused", head.name());
                    true
                }
                Tick::Aborted => {
                    stats.aborted += 1;
                    log::log!(level, "{id}: '{}' aborted", head.name());
                    false
                }
                Tick::Failed => {
                    stats.updates += 1;
                    stats.failed += 1;
                    log::log!(
                        level,
                        "{id}: '{}' failed, discarding {} successor(s)",
                        head.name(),
                        entry.chain.remaining() - 1
                    );
                    false
                }
                Tick::Succeeded => {
                    stats.updates += 1;
                    stats.succeeded += 1;
                    log::log!(level, "{id}: '{}' succeeded", head.name());
                    if entry.chain.promote() {
                        stats.promoted += 1;
                        log::log!(level, "{id}: promoted '{}'", entry.chain.head().name());
                        true
                    } else {
                        false
                    }
                }
            }
        });

        let removed = visited - entries.len();
        stats.spawned += spawned.len() as u64;
        for chain in spawned {
            Self::register(entries, next_id, config, chain);
        }

        log::trace!(
            "Scheduler '{}': tick {} visited {} chain(s), removed {}",
            config.label,
            stats.ticks,
            visited,
            removed
        );
    }
}

impl<D: Copy> Scheduler<D, ()> {
    /// Runs one tick without a context.
    pub fn tick(&mut self, delta: D) {
        self.update(delta, &mut ());
    }
}

impl<D, C: ?Sized> Default for Scheduler<D, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D, C: ?Sized> fmt::Debug for Scheduler<D, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("label", &self.config.label)
            .field("chains", &self.entries.len())
            .field("stats", &self.stats)
            .finish()
    }
}
