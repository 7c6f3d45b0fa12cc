//! One-shot deferred continuations
//!
//! Animations are driven by continuations that fire at a due instant. Any
//! continuation can be cancelled before it fires; a cancelled continuation is
//! never returned from [`Scheduler::poll`].

use std::time::Instant;

/// Work to resume later
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// Reveal one more body row of the given open card
    RevealStep { card: usize },
    /// Move the viewport one step closer to `target`
    ScrollStep { target: usize },
}

/// Identifies a scheduled continuation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone)]
struct Pending {
    handle: TaskHandle,
    due: Instant,
    continuation: Continuation,
}

/// Queue of pending continuations
#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    pending: Vec<Pending>,
}

impl Scheduler {
    /// Schedule `continuation` to fire at `due`
    pub fn schedule(&mut self, due: Instant, continuation: Continuation) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending { handle, due, continuation });
        handle
    }

    /// Cancel one continuation, returns false if it already fired or was cancelled
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.handle != handle);
        self.pending.len() < before
    }

    /// Cancel every continuation matching `predicate`
    pub fn cancel_matching(&mut self, predicate: impl Fn(&Continuation) -> bool) -> usize {
        let before = self.pending.len();
        self.pending.retain(|p| !predicate(&p.continuation));
        before - self.pending.len()
    }

    /// Cancel everything
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.pending.len();
        self.pending.clear();
        cancelled
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest due instant
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.iter().map(|p| p.due).min()
    }

    /// Remove and return every continuation due at or before `now`, earliest first
    pub fn poll(&mut self, now: Instant) -> Vec<Continuation> {
        let (mut due, rest): (Vec<Pending>, Vec<Pending>) =
            std::mem::take(&mut self.pending).into_iter().partition(|p| p.due <= now);
        self.pending = rest;

        due.sort_by_key(|p| (p.due, p.handle));
        due.into_iter().map(|p| p.continuation).collect()
    }
}
