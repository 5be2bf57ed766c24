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


use cadence_core::{
    Process, ProcessChain, ProcessControl, ProcessError, ProcessState, Scheduler,
    SchedulerStats,
};
use std::cell::RefCell;
use std::rc::Rc;

// --- TEST PROCESS ---

/// Shared, ordered record of every hook invocation.
type Journal = Rc<RefCell<Vec<String>>>;

/// How a `Scripted` process ends.
#[derive(Clone, Copy)]
enum Ending {
    Never,
    SucceedAt(u32),
    FailAt(u32),
    PauseAt(u32),
}

/// A process that follows a fixed script and journals what happens to it.
struct Scripted {
    name: &'static str,
    ending: Ending,
    updates: u32,
    journal: Journal,
}

impl Scripted {
    fn new(name: &'static str, ending: Ending, journal: &Journal) -> Self {
        Self {
            name,
            ending,
            updates: 0,
            journal: journal.clone(),
        }
    }

    fn record(&self, event: &str) {
        self.journal
            .borrow_mut()
            .push(format!("{}:{}", self.name, event));
    }
}

impl Process<u32, u32> for Scripted {
    fn name(&self) -> &str {
        self.name
    }

    fn update(
        &mut self,
        delta: u32,
        tick: &mut u32,
        control: &mut ProcessControl<'_, u32, u32>,
    ) -> Result<(), ProcessError> {
        self.updates += delta;
        self.record(&format!("update@{tick}"));
        match self.ending {
            Ending::SucceedAt(n) if self.updates >= n => control.succeed(),
            Ending::FailAt(n) if self.updates >= n => control.fail(),
            Ending::PauseAt(n) if self.updates == n => control.pause(),
            _ => {}
        }
        Ok(())
    }

    fn succeeded(&mut self) {
        self.record("succeeded");
    }

    fn failed(&mut self) {
        self.record("failed");
    }

    fn aborted(&mut self) {
        self.record("aborted");
    }
}

fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

fn count(journal: &Journal, needle: &str) -> usize {
    journal.borrow().iter().filter(|e| e.contains(needle)).count()
}

/// Runs `n` ticks with delta 1, passing the 1-based tick number as context.
fn run(scheduler: &mut Scheduler<u32, u32>, clock: &mut u32, n: u32) {
    for _ in 0..n {
        *clock += 1;
        let mut tick = *clock;
        scheduler.update(1, &mut tick);
    }
}

// --- PROPERTIES ---

#[test]
fn each_head_is_updated_at_most_once_per_tick() {
    let journal = journal();
    let mut scheduler = Scheduler::<u32, u32>::new();
    for name in ["a", "b", "c"] {
        scheduler.attach(Scripted::new(name, Ending::Never, &journal));
    }

    let mut clock = 0;
    run(&mut scheduler, &mut clock, 5);

    for name in ["a", "b", "c"] {
        for tick in 1..=5 {
            assert_eq!(count(&journal, &format!("{name}:update@{tick}")), 1);
        }
    }
    assert_eq!(scheduler.stats().updates, 15);
}

#[test]
fn chains_tick_in_attachment_order() {
    let journal = journal();
    let mut scheduler = Scheduler::<u32, u32>::new();
    scheduler.attach(Scripted::new("first", Ending::Never, &journal));
    scheduler.attach(Scripted::new("second", Ending::SucceedAt(1), &journal));
    scheduler.attach(Scripted::new("third", Ending::Never, &journal));

    let mut clock = 0;
    run(&mut scheduler, &mut clock, 1);

    assert_eq!(
        *journal.borrow(),
        vec![
            "first:update@1",
            "second:update@1",
            "second:succeeded",
            "third:update@1",
        ]
    );
    assert_eq!(scheduler.size(), 2);
}

#[test]
fn terminated_process_is_never_invoked_again() {
    let journal = journal();
    let mut scheduler = Scheduler::<u32, u32>::new();
    let id = scheduler
        .attach(Scripted::new("once", Ending::SucceedAt(1), &journal))
        .id();

    let mut clock = 0;
    run(&mut scheduler, &mut clock, 1);
    assert_eq!(scheduler.size(), 0);
    assert!(!scheduler.contains(id));

    run(&mut scheduler, &mut clock, 3);
    assert_eq!(*journal.borrow(), vec!["once:update@1", "once:succeeded"]);
}

#[test]
fn successor_starts_on_the_tick_after_its_predecessor_succeeds() {
    // --- 1. ARRANGE ---
    let journal = journal();
    let mut scheduler = Scheduler::<u32, u32>::new();
    let id = scheduler
        .attach(Scripted::new("A", Ending::SucceedAt(3), &journal))
        .then(Scripted::new("B", Ending::Never, &journal))
        .id();
    let mut clock = 0;

    // --- 2. ACT ---
    run(&mut scheduler, &mut clock, 3);

    // --- 3. ASSERT ---
    assert_eq!(count(&journal, "A:succeeded"), 1);
    assert_eq!(count(&journal, "B:"), 0, "B must not run in A's final tick");
    assert_eq!(scheduler.size(), 1, "the chain persists with B as head");
    assert_eq!(scheduler.state(id), Some(ProcessState::Uninitialized));

    run(&mut scheduler, &mut clock, 1);
    assert_eq!(count(&journal, "B:update@4"), 1);
    assert_eq!(scheduler.state(id), Some(ProcessState::Running));
    assert_eq!(scheduler.stats().promoted, 1);
}

#[test]
fn failure_discards_the_rest_of_the_chain() {
    let journal = journal();
    let mut scheduler = Scheduler::<u32, u32>::new();
    scheduler
        .attach(Scripted::new("A", Ending::FailAt(1), &journal))
        .then(Scripted::new("B", Ending::Never, &journal))
        .then(Scripted::new("C", Ending::Never, &journal));

    let mut clock = 0;
    run(&mut scheduler, &mut clock, 1);

    assert_eq!(*journal.borrow(), vec!["A:update@1", "A:failed"]);
    assert_eq!(scheduler.size(), 0);

    run(&mut scheduler, &mut clock, 2);
    assert_eq!(count(&journal, "B:"), 0);
    assert_eq!(count(&journal, "C:"), 0);
}

#[test]
fn immediate_abort_fires_synchronously_and_empties_the_scheduler() {
    let journal = journal();
    let mut scheduler = Scheduler::<u32, u32>::new();
    scheduler
        .attach(Scripted::new("A", Ending::Never, &journal))
        .then(Scripted::new("B", Ending::Never, &journal));
    let mut clock = 0;
    run(&mut scheduler, &mut clock, 1);

    scheduler.abort(true);

    assert_eq!(count(&journal, "A:aborted"), 1);
    assert_eq!(count(&journal, "B:"), 0);
    assert_eq!(scheduler.size(), 0);
    assert!(scheduler.empty());
}

#[test]
fn immediate_abort_covers_never_ticked_chains() {
    let journal = journal();
    let mut scheduler = Scheduler::<u32, u32>::new();
    scheduler.attach(Scripted::new("fresh", Ending::Never, &journal));

    scheduler.abort(true);

    assert_eq!(*journal.borrow(), vec!["fresh:aborted"]);
    assert_eq!(scheduler.stats().aborted, 1);
}

#[test]
fn deferred_abort_fires_on_next_tick_before_any_update() {
    // --- 1. ARRANGE ---
    let journal = journal();
    let mut scheduler = Scheduler::<u32, u32>::new();
    scheduler.attach(Scripted::new("A", Ending::Never, &journal));
    let mut clock = 0;
    run(&mut scheduler, &mut clock, 1);

    // --- 2. ACT ---
    scheduler.abort(false);
    scheduler.abort(false);

    // --- 3. ASSERT ---
    assert_eq!(scheduler.size(), 1, "deferred abort keeps the chain for now");
    assert_eq!(count(&journal, "A:aborted"), 0);

    run(&mut scheduler, &mut clock, 1);
    assert_eq!(count(&journal, "A:aborted"), 1);
    assert_eq!(count(&journal, "A:update@2"), 0);
    assert_eq!(scheduler.size(), 0);
}

#[test]
fn deferred_abort_reaches_paused_heads() {
    let journal = journal();
    let mut scheduler = Scheduler::<u32, u32>::new();
    scheduler.attach(Scripted::new("A", Ending::PauseAt(1), &journal));
    let mut clock = 0;
    run(&mut scheduler, &mut clock, 1);

    scheduler.abort(false);
    run(&mut scheduler, &mut clock, 1);

    assert_eq!(*journal.borrow(), vec!["A:update@1", "A:aborted"]);
    assert!(scheduler.is_empty());
}

#[test]
fn immediate_abort_reaches_paused_heads() {
    let journal = journal();
    let mut scheduler = Scheduler::<u32, u32>::new();
    let id = scheduler
        .attach(Scripted::new("A", Ending::PauseAt(1), &journal))
        .then(Scripted::new("B", Ending::Never, &journal))
        .id();
    let mut clock = 0;
    run(&mut scheduler, &mut clock, 1);
    assert_eq!(scheduler.state(id), Some(ProcessState::Paused));

    scheduler.abort(true);

    assert_eq!(*journal.borrow(), vec!["A:update@1", "A:aborted"]);
    assert_eq!(scheduler.size(), 0);
    assert_eq!(scheduler.stats().aborted, 1);
}

#[test]
fn deferred_abort_never_starts_successors() {
    // --- 1. ARRANGE ---
    let journal = journal();
    let mut scheduler = Scheduler::<u32, u32>::new();
    scheduler
        .attach(Scripted::new("A", Ending::Never, &journal))
        .then(Scripted::new("B", Ending::SucceedAt(1), &journal))
        .then(Scripted::new("C", Ending::Never, &journal));
    let mut clock = 0;
    run(&mut scheduler, &mut clock, 1);

    // --- 2. ACT ---
    scheduler.abort(false);
    run(&mut scheduler, &mut clock, 3);

    // --- 3. ASSERT ---
    assert_eq!(*journal.borrow(), vec!["A:update@1", "A:aborted"]);
    assert_eq!(count(&journal, "B:"), 0);
    assert_eq!(count(&journal, "C:"), 0);
    assert!(scheduler.is_empty());
    assert_eq!(scheduler.stats().promoted, 0);
}

#[test]
fn pending_abort_is_visible_until_delivered() {
    let journal = journal();
    let mut scheduler = Scheduler::<u32, u32>::new();
    let running = scheduler
        .attach(Scripted::new("A", Ending::Never, &journal))
        .id();
    let paused = scheduler
        .attach(Scripted::new("B", Ending::PauseAt(1), &journal))
        .id();
    let mut clock = 0;
    run(&mut scheduler, &mut clock, 1);
    assert!(!scheduler.is_abort_pending(running));
    assert!(!scheduler.is_abort_pending(paused));

    scheduler.abort(false);

    assert_eq!(scheduler.state(running), Some(ProcessState::Running));
    assert_eq!(scheduler.state(paused), Some(ProcessState::Paused));
    assert!(scheduler.is_abort_pending(running));
    assert!(scheduler.is_abort_pending(paused));

    run(&mut scheduler, &mut clock, 1);
    assert!(!scheduler.is_abort_pending(running));
    assert!(!scheduler.contains(running));
    assert_eq!(count(&journal, "aborted"), 2);
}

#[test]
fn paused_process_is_skipped_until_unpaused() {
    // --- 1. ARRANGE ---
    let journal = journal();
    let mut scheduler = Scheduler::<u32, u32>::new();
    let id = scheduler
        .attach(Scripted::new("A", Ending::PauseAt(1), &journal))
        .id();
    let mut clock = 0;

    // --- 2. ACT ---
    run(&mut scheduler, &mut clock, 1);
    assert_eq!(scheduler.state(id), Some(ProcessState::Paused));
    run(&mut scheduler, &mut clock, 4);

    // --- 3. ASSERT ---
    assert_eq!(count(&journal, "A:update"), 1);
    assert_eq!(scheduler.size(), 1);

    scheduler.unpause(id).expect("chain is registered");
    assert_eq!(scheduler.state(id), Some(ProcessState::Running));
    run(&mut scheduler, &mut clock, 1);
    assert_eq!(count(&journal, "A:update@6"), 1);
}

#[test]
fn external_pause_and_redundant_unpause() {
    let journal = journal();
    let mut scheduler = Scheduler::<u32, u32>::new();
    let id = scheduler
        .attach(Scripted::new("A", Ending::Never, &journal))
        .id();
    let mut clock = 0;

    scheduler.unpause(id).expect("chain is registered");
    assert_eq!(scheduler.state(id), Some(ProcessState::Uninitialized));

    run(&mut scheduler, &mut clock, 1);
    scheduler.pause(id).expect("chain is registered");
    scheduler.pause(id).expect("chain is registered");
    run(&mut scheduler, &mut clock, 2);
    assert_eq!(count(&journal, "A:update"), 1);

    scheduler.unpause(id).expect("chain is registered");
    run(&mut scheduler, &mut clock, 1);
    assert_eq!(count(&journal, "A:update@4"), 1);
}

#[test]
fn clear_drops_everything_silently() {
    let journal = journal();
    let mut scheduler = Scheduler::<u32, u32>::new();
    scheduler
        .attach(Scripted::new("A", Ending::Never, &journal))
        .then(Scripted::new("B", Ending::Never, &journal));
    scheduler.attach(Scripted::new("C", Ending::SucceedAt(5), &journal));
    scheduler.attach(Scripted::new("D", Ending::FailAt(5), &journal));
    let mut clock = 0;
    run(&mut scheduler, &mut clock, 1);

    scheduler.clear();

    assert_eq!(scheduler.size(), 0);
    assert!(scheduler.empty());
    assert_eq!(count(&journal, "succeeded"), 0);
    assert_eq!(count(&journal, "failed"), 0);
    assert_eq!(count(&journal, "aborted"), 0);
    assert_eq!(scheduler.stats(), SchedulerStats::default());

    run(&mut scheduler, &mut clock, 1);
    assert_eq!(count(&journal, "update@2"), 0);
}

#[test]
fn long_chain_runs_sequentially() {
    let journal = journal();
    let mut scheduler = Scheduler::<u32, u32>::new();
    scheduler
        .attach(Scripted::new("A", Ending::SucceedAt(1), &journal))
        .then(Scripted::new("B", Ending::SucceedAt(2), &journal))
        .then(Scripted::new("C", Ending::SucceedAt(1), &journal));

    let mut clock = 0;
    run(&mut scheduler, &mut clock, 5);

    assert_eq!(
        *journal.borrow(),
        vec![
            "A:update@1",
            "A:succeeded",
            "B:update@2",
            "B:update@3",
            "B:succeeded",
            "C:update@4",
            "C:succeeded",
        ]
    );
    assert!(scheduler.is_empty());
    let stats = scheduler.stats();
    assert_eq!(stats.succeeded, 3);
    assert_eq!(stats.promoted, 2);
    assert_eq!(stats.ticks, 5);
}

#[test]
fn terminated_counts_every_outcome() {
    let journal = journal();
    let mut scheduler = Scheduler::<u32, u32>::new();
    scheduler.attach(Scripted::new("ok", Ending::SucceedAt(1), &journal));
    scheduler.attach(Scripted::new("bad", Ending::FailAt(1), &journal));
    scheduler.attach(Scripted::new("idle", Ending::Never, &journal));
    let mut clock = 0;
    run(&mut scheduler, &mut clock, 1);

    scheduler.abort(true);

    let stats = scheduler.stats();
    assert_eq!(stats.succeeded, 1);
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.aborted, 1);
    assert_eq!(stats.terminated(), 3);
}

// --- LONG CHAINS ---

const LONG_CHAIN: usize = 100_000;

fn long_chain(head: Ending, journal: &Journal) -> ProcessChain<u32, u32> {
    (0..LONG_CHAIN).fold(
        ProcessChain::new(Scripted::new("head", head, journal)),
        |chain, _| chain.then(Scripted::new("link", Ending::Never, journal)),
    )
}

#[test]
fn failing_head_drops_a_long_chain() {
    let journal = journal();
    let mut scheduler = Scheduler::<u32, u32>::new();
    let id = scheduler
        .attach_chain(long_chain(Ending::FailAt(1), &journal))
        .id();
    assert_eq!(scheduler.chain(id).map(|c| c.remaining()).ok(), Some(LONG_CHAIN + 1));

    let mut clock = 0;
    run(&mut scheduler, &mut clock, 1);

    assert_eq!(*journal.borrow(), vec!["head:update@1", "head:failed"]);
    assert!(scheduler.is_empty());
}

#[test]
fn clearing_and_aborting_long_chains() {
    let journal = journal();
    let mut scheduler = Scheduler::<u32, u32>::new();
    scheduler.attach_chain(long_chain(Ending::Never, &journal));
    scheduler.clear();
    assert!(scheduler.is_empty());

    scheduler.attach_chain(long_chain(Ending::Never, &journal));
    let mut clock = 0;
    run(&mut scheduler, &mut clock, 1);
    scheduler.abort(true);

    assert_eq!(*journal.borrow(), vec!["head:update@1", "head:aborted"]);
    assert!(scheduler.is_empty());
}

#[test]
fn handle_appends_scale_to_long_chains() {
    let journal = journal();
    let mut scheduler = Scheduler::<u32, u32>::new();
    let mut handle = scheduler.attach(Scripted::new("head", Ending::SucceedAt(1), &journal));
    for _ in 0..LONG_CHAIN {
        handle = handle.then(Scripted::new("link", Ending::FailAt(1), &journal));
    }
    assert_eq!(handle.remaining(), LONG_CHAIN + 1);

    let mut clock = 0;
    run(&mut scheduler, &mut clock, 2);

    assert_eq!(
        *journal.borrow(),
        vec!["head:update@1", "head:succeeded", "link:update@2", "link:failed"]
    );
    assert!(scheduler.is_empty());
}
