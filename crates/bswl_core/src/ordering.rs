//! User-controlled display order of workshop items.
//!
//! The order survives between sessions (see [`OrderingStore`](crate::OrderingStore))
//! and is reconciled with every fresh scan by [`merge_ordering`]: items that
//! were never seen before go first, then the previously known items in their
//! saved order. Items that disappeared from disk are dropped for good.

use crate::error::{Error, Result};
use crate::item::WorkshopId;
use std::collections::HashSet;

/// Single-step move direction in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the front (`-1`).
    Left,
    /// Towards the back (`+1`).
    Right,
}

impl TryFrom<i32> for Direction {
    type Error = crate::error::Error;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            -1 => Ok(Direction::Left),
            1 => Ok(Direction::Right),
            other => Err(Error::InvalidDirection(other)),
        }
    }
}

/// Ordered, duplicate-free sequence of workshop ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ordering {
    ids: Vec<WorkshopId>,
}

impl Ordering {
    pub fn ids(&self) -> &[WorkshopId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorkshopId> {
        self.ids.iter()
    }

    pub fn position(&self, id: &WorkshopId) -> Option<usize> {
        self.ids.iter().position(|other| other == id)
    }

    /// Move the item at `index` one step in `direction`.
    ///
    /// Moving the first item left rotates the whole sequence left (it becomes
    /// the last item); moving the last item right rotates the whole sequence
    /// right (it becomes the first). Every other move swaps neighbours, so any
    /// item can reach any slot through repeated single steps.
    pub fn move_item(&mut self, index: usize, direction: Direction) -> Result<()> {
        let len = self.ids.len();
        if index >= len {
            return Err(Error::MoveOutOfRange { index, len });
        }

        match direction {
            Direction::Left if index == 0 => self.ids.rotate_left(1),
            Direction::Right if index == len - 1 => self.ids.rotate_right(1),
            Direction::Left => self.ids.swap(index, index - 1),
            Direction::Right => self.ids.swap(index, index + 1),
        }

        Ok(())
    }

    /// Render as the persisted form: ids joined by commas.
    pub fn to_line(&self) -> String {
        self.ids
            .iter()
            .map(WorkshopId::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl From<Vec<WorkshopId>> for Ordering {
    /// Builds an ordering from `ids`, keeping the first occurrence of duplicates.
    fn from(ids: Vec<WorkshopId>) -> Self {
        let mut seen = HashSet::new();
        let ids = ids.into_iter().filter(|id| seen.insert(id.clone())).collect();
        Self { ids }
    }
}

/// Output of [`merge_ordering`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedOrdering {
    pub ordering: Ordering,
    /// Ids absent from the saved sequence, i.e. discovered this session.
    pub new_ids: HashSet<WorkshopId>,
}

impl MergedOrdering {
    pub fn is_new(&self, id: &WorkshopId) -> bool {
        self.new_ids.contains(id)
    }
}

/// Reconcile ids found by the current scan with the previously saved order.
///
/// 1. Found ids missing from `saved`, in discovery order, flagged new.
/// 2. Saved ids that were found again, in saved order.
///
/// Saved ids that were not found are dropped. The result contains exactly the
/// found ids, each once.
pub fn merge_ordering(found: &[WorkshopId], saved: &[WorkshopId]) -> MergedOrdering {
    let saved_set: HashSet<&WorkshopId> = saved.iter().collect();
    let found_set: HashSet<&WorkshopId> = found.iter().collect();

    let mut ids = Vec::with_capacity(found.len());
    let mut placed: HashSet<&WorkshopId> = HashSet::with_capacity(found.len());
    let mut new_ids = HashSet::new();

    for id in found {
        if !saved_set.contains(id) && placed.insert(id) {
            ids.push(id.clone());
            new_ids.insert(id.clone());
        }
    }

    for id in saved {
        if found_set.contains(id) && placed.insert(id) {
            ids.push(id.clone());
        }
    }

    MergedOrdering {
        ordering: Ordering { ids },
        new_ids,
    }
}
