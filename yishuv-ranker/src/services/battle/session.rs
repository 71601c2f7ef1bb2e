//! Interactive merge sort
//!
//! A `BattleSession` runs a top-down merge sort whose comparisons are answered
//! from outside, one at a time. After every answer the session advances until
//! it needs the next decision or the order is complete, then waits. Nothing
//! is compared by value: the caller's decision is the only ordering input.

use rand::Rng;
use std::collections::VecDeque;

use super::error::BattleError;
use super::plan::{MergeRange, estimated_comparisons, plan_merges};

/// Which side of the pending pair won
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Uniform coin flip, used when the user skips a comparison
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.random_bool(0.5) {
            Side::Left
        } else {
            Side::Right
        }
    }
}

/// The two items awaiting a decision, as indices into the session's items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Matchup {
    pub left: usize,
    pub right: usize,
}

/// What the session needs next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progression {
    Compare(Matchup),
    Finished,
}

/// Comparison progress for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub estimated_total: usize,
}

impl Progress {
    /// Completion percentage, capped at 100 since the total is an estimate
    pub fn percent(&self) -> f64 {
        if self.estimated_total == 0 {
            return 100.0;
        }
        (self.completed as f64 / self.estimated_total as f64 * 100.0).min(100.0)
    }
}

/// Cursor over the merge step currently in progress
#[derive(Debug)]
struct MergeCursor {
    start: usize,
    left_run: Vec<usize>,
    right_run: Vec<usize>,
    li: usize,
    ri: usize,
    merged: Vec<usize>,
}

impl MergeCursor {
    /// Runs are copied from the working order so earlier merges are reflected
    fn new(range: MergeRange, order: &[usize]) -> Self {
        Self {
            start: range.left,
            left_run: order[range.left..=range.mid].to_vec(),
            right_run: order[range.mid + 1..=range.right].to_vec(),
            li: 0,
            ri: 0,
            merged: Vec::with_capacity(range.len()),
        }
    }

    fn pending(&self) -> Option<Matchup> {
        if self.li < self.left_run.len() && self.ri < self.right_run.len() {
            Some(Matchup {
                left: self.left_run[self.li],
                right: self.right_run[self.ri],
            })
        } else {
            None
        }
    }

    fn take(&mut self, winner: Side) {
        match winner {
            Side::Left => {
                self.merged.push(self.left_run[self.li]);
                self.li += 1;
            }
            Side::Right => {
                self.merged.push(self.right_run[self.ri]);
                self.ri += 1;
            }
        }
    }

    /// Append whatever remains once one run is exhausted
    fn drain(&mut self) {
        self.merged.extend_from_slice(&self.left_run[self.li..]);
        self.merged.extend_from_slice(&self.right_run[self.ri..]);
        self.li = self.left_run.len();
        self.ri = self.right_run.len();
    }
}

/// One battle: an interactive merge sort over `items`
#[derive(Debug)]
pub struct BattleSession<T> {
    items: Vec<T>,
    order: Vec<usize>,
    plan: VecDeque<MergeRange>,
    current: Option<MergeCursor>,
    completed: usize,
    estimated_total: usize,
}

impl<T> BattleSession<T> {
    /// Start a battle. The session immediately advances to its first pending
    /// comparison; fewer than two items is rejected.
    pub fn start(items: Vec<T>) -> Result<Self, BattleError> {
        let n = items.len();
        if n < 2 {
            return Err(BattleError::NotEnoughItems { count: n });
        }

        let mut session = Self {
            items,
            order: (0..n).collect(),
            plan: plan_merges(n),
            current: None,
            completed: 0,
            estimated_total: estimated_comparisons(n),
        };

        log::debug!(
            "Battle started: {} items, {} merge steps, ~{} comparisons",
            n,
            session.plan.len(),
            session.estimated_total
        );

        session.advance();
        Ok(session)
    }

    /// The comparison awaiting a decision, if any
    pub fn pending(&self) -> Option<Matchup> {
        self.current.as_ref().and_then(MergeCursor::pending)
    }

    /// The pair of items awaiting a decision, left then right
    pub fn pending_items(&self) -> Option<(&T, &T)> {
        self.pending()
            .map(|m| (&self.items[m.left], &self.items[m.right]))
    }

    pub fn progress(&self) -> Progress {
        Progress {
            completed: self.completed,
            estimated_total: self.estimated_total,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.current.is_none() && self.plan.is_empty()
    }

    /// Record a decision for the pending comparison and advance
    pub fn resolve(&mut self, winner: Side) -> Result<Progression, BattleError> {
        let cursor = self
            .current
            .as_mut()
            .filter(|c| c.pending().is_some())
            .ok_or(BattleError::NoPendingComparison)?;

        cursor.take(winner);
        self.completed += 1;
        Ok(self.advance())
    }

    /// Resolve the pending comparison with a fair coin flip
    pub fn resolve_random<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<Progression, BattleError> {
        self.resolve(Side::random(rng))
    }

    /// Run merge steps until a decision is needed or the plan is exhausted
    fn advance(&mut self) -> Progression {
        loop {
            if let Some(matchup) = self.current.as_ref().and_then(MergeCursor::pending) {
                return Progression::Compare(matchup);
            }

            if let Some(mut cursor) = self.current.take() {
                cursor.drain();
                let end = cursor.start + cursor.merged.len();
                self.order[cursor.start..end].copy_from_slice(&cursor.merged);
            }

            match self.plan.pop_front() {
                Some(range) => self.current = Some(MergeCursor::new(range, &self.order)),
                None => {
                    log::debug!("Battle finished after {} comparisons", self.completed);
                    return Progression::Finished;
                }
            }
        }
    }

    /// Consume the session and return the items in their final order
    pub fn finish(self) -> Result<Vec<T>, BattleError> {
        if !self.is_finished() {
            return Err(BattleError::NotFinished {
                remaining: self.plan.len() + usize::from(self.current.is_some()),
            });
        }

        let mut slots: Vec<Option<T>> = self.items.into_iter().map(Some).collect();
        Ok(self
            .order
            .iter()
            .filter_map(|&i| slots[i].take())
            .collect())
    }
}

/// Drive a session to completion with a decision function.
/// Returns the ordered items and the number of decisions asked for.
pub fn sort_with<T, F>(items: Vec<T>, mut decide: F) -> Result<(Vec<T>, usize), BattleError>
where
    F: FnMut(&T, &T) -> Side,
{
    let mut session = BattleSession::start(items)?;
    while let Some((left, right)) = session.pending_items() {
        let winner = decide(left, right);
        session.resolve(winner)?;
    }
    let comparisons = session.progress().completed;
    Ok((session.finish()?, comparisons))
}
