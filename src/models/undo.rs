//! Undo journal for speculative solution mutations.
//!
//! A [`Checkpoint`] opens a journaled region. While at least one region is
//! open, every mutating operation on a [`Solution`](super::Solution) pushes
//! the data needed to revert it. Rolling back walks the journal backwards
//! and reverts each entry, restoring the exact prior state; committing keeps
//! the changes and releases the region. Outside any region nothing is
//! recorded, so construction loops do not accumulate history.

use super::Role;

/// Marks the journal position a rollback returns to.
///
/// Checkpoints must be closed (rolled back or committed) in LIFO order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "an open checkpoint must be rolled back or committed"]
pub struct Checkpoint {
    mark: usize,
    depth: usize,
}

/// A type switch caused by admitting `(city, role)` at a location.
///
/// Kept while the relation is served so that removing it can restore the
/// type the location had before.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Admission {
    pub(crate) city: usize,
    pub(crate) role: Role,
    pub(crate) prev_type: usize,
    pub(crate) admitted_type: usize,
}

/// The inverse data of one mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum UndoEntry {
    Assign {
        city: usize,
        location: usize,
        role: Role,
        prev_type: Option<usize>,
        switched: bool,
        prev_load: f64,
        prev_cost: f64,
        prev_complete: bool,
    },
    Unassign {
        city: usize,
        location: usize,
        role: Role,
        type_id: usize,
        index: usize,
        admission: Option<(usize, Admission)>,
        prev_load: f64,
        prev_cost: f64,
        prev_complete: bool,
    },
    ChangeType {
        location: usize,
        prev_type: usize,
        prev_cost: f64,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct UndoLog {
    entries: Vec<UndoEntry>,
    depth: usize,
}

impl UndoLog {
    pub(crate) fn open(&mut self) -> Checkpoint {
        self.depth += 1;
        Checkpoint {
            mark: self.entries.len(),
            depth: self.depth,
        }
    }

    #[inline]
    pub(crate) fn is_recording(&self) -> bool {
        self.depth > 0
    }

    #[inline]
    pub(crate) fn record(&mut self, entry: UndoEntry) {
        if self.is_recording() {
            self.entries.push(entry);
        }
    }

    /// Pops the newest entry recorded after `checkpoint`, if any.
    pub(crate) fn pop_since(&mut self, checkpoint: Checkpoint) -> Option<UndoEntry> {
        if self.entries.len() > checkpoint.mark {
            self.entries.pop()
        } else {
            None
        }
    }

    pub(crate) fn close(&mut self, checkpoint: Checkpoint) {
        debug_assert_eq!(
            checkpoint.depth, self.depth,
            "checkpoints must be closed in LIFO order"
        );
        self.depth = self.depth.saturating_sub(1);
        if self.depth == 0 {
            self.entries.clear();
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn reset(&mut self) {
        self.entries.clear();
        self.depth = 0;
    }
}
