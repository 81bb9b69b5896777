use crate::{CancelToken, ResolveOptions};

use indexmap::IndexSet;
use onyx_core::{Error, Result};
use std::fmt;
use tokio::time::Instant;

/// State threaded through one top-level resolution.
///
/// Tracks the `(entity, id, resolver)` frames currently being evaluated so a
/// resolver that transitively requires itself for the same record fails
/// instead of recursing forever. Frames are pushed on entry and popped on
/// exit, success or failure, so the set is empty again once the top-level
/// call returns.
#[derive(Debug, Default)]
pub(crate) struct ResolutionContext {
    active: IndexSet<Frame>,
    deadline: Option<Instant>,
    cancel: Option<CancelToken>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct Frame {
    pub(crate) entity: String,
    pub(crate) id: String,
    pub(crate) resolver: String,
}

impl ResolutionContext {
    pub(crate) fn new(options: &ResolveOptions) -> Self {
        Self {
            active: IndexSet::new(),
            deadline: options.deadline,
            cancel: options.cancel.clone(),
        }
    }

    pub(crate) fn enter(&mut self, frame: Frame) -> Result<()> {
        if self.active.contains(&frame) {
            let path = self
                .active
                .iter()
                .chain(std::iter::once(&frame))
                .map(Frame::to_string)
                .collect();

            return Err(Error::cyclic_resolution(path));
        }

        self.active.insert(frame);
        Ok(())
    }

    pub(crate) fn exit(&mut self, frame: &Frame) {
        let popped = self.active.pop();
        debug_assert_eq!(popped.as_ref(), Some(frame));
    }

    pub(crate) fn depth(&self) -> usize {
        self.active.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub(crate) fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Called before every store round-trip.
    pub(crate) fn checkpoint(&self) -> Result<()> {
        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            return Err(Error::cancelled());
        }

        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Err(Error::deadline_exceeded());
        }

        Ok(())
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}).{}", self.entity, self.id, self.resolver)
    }
}
