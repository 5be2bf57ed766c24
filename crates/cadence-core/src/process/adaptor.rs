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


//! Adapts plain callables to the [`Process`] contract.

use super::{Outcome, Process, ProcessControl, ProcessError};
use std::cell::Cell;
use std::fmt;

/// A [`Process`] backed by a closure.
///
/// The closure has the shape `(delta, context, succeed, fail)`. Calling
/// `succeed()` or `fail()` has the same effect as
/// [`ProcessControl::succeed`] / [`ProcessControl::fail`] on a native process
/// (and `fail` wins if both are called).
///
/// The terminal hooks keep their no-op defaults.
///
/// ```
/// use cadence_core::{FnProcess, Scheduler};
///
/// let mut elapsed = 0.0;
/// let blink = FnProcess::new(
///     move |delta: f32, _ctx: &mut (), succeed: &dyn Fn(), _fail: &dyn Fn()| {
///         elapsed += delta;
///         if elapsed >= 1.0 {
///             succeed();
///         }
///     },
/// );
///
/// let mut scheduler = Scheduler::<f32>::new();
/// scheduler.attach(blink);
/// scheduler.tick(0.5);
/// assert_eq!(scheduler.size(), 1);
/// scheduler.tick(0.5);
/// assert!(scheduler.empty());
/// ```
pub struct FnProcess<F> {
    func: F,
}

impl<F> FnProcess<F> {
    /// Wraps `func`.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> fmt::Debug for FnProcess<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnProcess")
            .field("func", &std::any::type_name::<F>())
            .finish()
    }
}

impl<D, C, F> Process<D, C> for FnProcess<F>
where
    C: ?Sized,
    F: FnMut(D, &mut C, &dyn Fn(), &dyn Fn()),
{
    fn name(&self) -> &str {
        std::any::type_name::<F>()
    }

    fn update(
        &mut self,
        delta: D,
        context: &mut C,
        control: &mut ProcessControl<'_, D, C>,
    ) -> Result<(), ProcessError> {
        let outcome: Cell<Option<Outcome>> = Cell::new(None);
        let succeed = || {
            if outcome.get().is_none() {
                outcome.set(Some(Outcome::Succeeded));
            }
        };
        let fail = || outcome.set(Some(Outcome::Failed));

        (self.func)(delta, context, &succeed, &fail);

        match outcome.get() {
            Some(Outcome::Succeeded) => control.succeed(),
            Some(Outcome::Failed) => control.fail(),
            None => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::Signal;

    fn run<F>(process: &mut FnProcess<F>, delta: f32) -> Signal
    where
        F: FnMut(f32, &mut u32, &dyn Fn(), &dyn Fn()),
    {
        let mut signal = Signal::default();
        let mut spawned = Vec::new();
        let mut context = 0u32;
        let mut control = ProcessControl::<f32, u32>::new(&mut signal, &mut spawned);
        process
            .update(delta, &mut context, &mut control)
            .expect("adaptor never errors");
        signal
    }

    #[test]
    fn callbacks_map_to_outcomes() {
        let mut total = 0.0;
        let mut process = FnProcess::new(
            move |delta: f32, _ctx: &mut u32, succeed: &dyn Fn(), _fail: &dyn Fn()| {
                total += delta;
                if total >= 2.0 {
                    succeed();
                }
            },
        );

        assert_eq!(run(&mut process, 1.0).outcome, None);
        assert_eq!(run(&mut process, 1.0).outcome, Some(Outcome::Succeeded));
    }

    #[test]
    fn fail_wins_when_both_are_called() {
        let mut process =
            FnProcess::new(|_: f32, _: &mut u32, succeed: &dyn Fn(), fail: &dyn Fn()| {
                succeed();
                fail();
                succeed();
            });
        assert_eq!(run(&mut process, 1.0).outcome, Some(Outcome::Failed));
    }

    #[test]
    fn context_is_forwarded() {
        let mut signal = Signal::default();
        let mut spawned = Vec::new();
        let mut context = 41u32;
        let mut process = FnProcess::new(|_: f32, ctx: &mut u32, _: &dyn Fn(), _: &dyn Fn()| {
            *ctx += 1;
        });
        let mut control = ProcessControl::<f32, u32>::new(&mut signal, &mut spawned);
        process
            .update(0.0, &mut context, &mut control)
            .expect("adaptor never errors");
        assert_eq!(context, 42);
    }
}
