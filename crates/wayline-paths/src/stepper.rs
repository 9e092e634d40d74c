//! Incremental, tick-driven access to a [`PathFinder`].
//!
//! A [`Stepper`] caches the last path it computed and hands it out one node
//! per call. Full searches draw from a [`SearchBudget`] shared by every
//! stepper of a simulation; when the budget for the current tick is spent
//! the stepper answers [`StepStatus::Pending`] and the caller asks again on a
//! later tick.

use std::cell::Cell;
use std::rc::Rc;

use wayline_core::TileRef;

use crate::config::SearchConfig;
use crate::traits::PathFinder;

/// Outcome of a single [`Stepper::next`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// No answer this tick; `node` is the current tile.
    Pending,
    /// Move to `node`.
    Next,
    /// The destination has been reached; `node` is the destination.
    Complete,
    /// The destination cannot be reached; `node` is the current tile.
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub status: StepStatus,
    pub node: TileRef,
}

impl Step {
    fn new(status: StepStatus, node: TileRef) -> Self {
        Self { status, node }
    }
}

/// Per-tick allowance of full searches. Clones share the same counter.
#[derive(Debug, Clone)]
pub struct SearchBudget {
    per_tick: u32,
    remaining: Rc<Cell<u32>>,
}

impl SearchBudget {
    /// Budget allowing `per_tick` searches per tick; 0 means unlimited.
    pub fn new(per_tick: u32) -> Self {
        Self {
            per_tick,
            remaining: Rc::new(Cell::new(per_tick)),
        }
    }

    pub fn unlimited() -> Self {
        Self::new(0)
    }

    /// Budget of `config.searches_per_tick` searches per tick.
    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.searches_per_tick)
    }

    pub fn is_unlimited(&self) -> bool {
        self.per_tick == 0
    }

    /// Searches left this tick, `None` when unlimited.
    pub fn remaining(&self) -> Option<u32> {
        (!self.is_unlimited()).then(|| self.remaining.get())
    }

    /// Refill the allowance. Called once per tick by the simulation loop.
    pub fn reset(&self) {
        self.remaining.set(self.per_tick);
    }

    /// Take one search from the allowance.
    pub fn try_consume(&self) -> bool {
        if self.is_unlimited() {
            return true;
        }
        match self.remaining.get() {
            0 => false,
            n => {
                self.remaining.set(n - 1);
                true
            }
        }
    }
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self::unlimited()
    }
}

/// Stepping adapter over any [`PathFinder`].
pub struct Stepper<F> {
    finder: F,
    budget: SearchBudget,
    path: Vec<TileRef>,
    dest: Option<TileRef>,
    cursor: usize,
}

impl<F: PathFinder> Stepper<F> {
    pub fn new(finder: F, budget: SearchBudget) -> Self {
        Self {
            finder,
            budget,
            path: Vec::new(),
            dest: None,
            cursor: 0,
        }
    }

    /// Stepper whose searches are never deferred.
    pub fn unbudgeted(finder: F) -> Self {
        Self::new(finder, SearchBudget::unlimited())
    }

    pub fn finder(&self) -> &F {
        &self.finder
    }

    pub fn budget(&self) -> &SearchBudget {
        &self.budget
    }

    /// Forget the cached path; the next call searches again.
    pub fn invalidate(&mut self) {
        self.path.clear();
        self.dest = None;
        self.cursor = 0;
    }

    /// Next move from `current` towards `dest`.
    pub fn next(&mut self, current: TileRef, dest: TileRef) -> Step {
        if current == dest {
            return Step::new(StepStatus::Complete, dest);
        }
        if self.dest == Some(dest) {
            if let Some(step) = self.advance(current) {
                return step;
            }
        }
        if !self.budget.try_consume() {
            log::trace!("search budget spent, deferring {current} -> {dest}");
            return Step::new(StepStatus::Pending, current);
        }

        self.invalidate();
        let Some(path) = self.finder.find_path(&[current], dest) else {
            log::debug!("no path {current} -> {dest}");
            return Step::new(StepStatus::NotFound, current);
        };
        self.path = path;
        self.dest = Some(dest);
        self.advance(current).unwrap_or_else(|| {
            self.invalidate();
            Step::new(StepStatus::NotFound, current)
        })
    }

    fn advance(&mut self, current: TileRef) -> Option<Step> {
        let offset = self.path.get(self.cursor..)?.iter().position(|&t| t == current)?;
        let i = self.cursor + offset;
        let &node = self.path.get(i + 1)?;
        self.cursor = i + 1;
        Some(Step::new(StepStatus::Next, node))
    }
}
