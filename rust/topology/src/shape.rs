// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared, immutable shape snapshots.
//!
//! A [`Shape`] is a cheap handle over a frozen [`TopologyArena`]. Analyzers
//! hold shapes by value and never mutate them; structural edits go through
//! [`crate::rebuild::ReShape`], which always produces a new snapshot.

use std::sync::Arc;

use crate::arena::TopologyArena;

/// Handle to an immutable entity table. May be null.
///
/// A shape is null when no arena is attached or when the attached arena holds
/// no entity at all.
#[derive(Debug, Clone, Default)]
pub struct Shape {
    arena: Option<Arc<TopologyArena>>,
}

impl Shape {
    /// Returns the null shape.
    pub fn null() -> Self {
        Self { arena: None }
    }

    /// Freezes an arena into a shape snapshot.
    pub fn new(arena: TopologyArena) -> Self {
        Self {
            arena: Some(Arc::new(arena)),
        }
    }

    /// Returns `true` for the null shape or a shape without entities.
    pub fn is_null(&self) -> bool {
        self.arena.as_ref().is_none_or(|a| a.is_empty())
    }

    /// Returns the underlying entity table, or `None` for a null shape.
    pub fn arena(&self) -> Option<&TopologyArena> {
        self.arena.as_deref().filter(|a| !a.is_empty())
    }

    /// Returns `true` if both handles point at the same snapshot.
    ///
    /// Two null shapes are the same.
    pub fn is_same(&self, other: &Shape) -> bool {
        match (self.arena(), other.arena()) {
            (Some(a), Some(b)) => std::ptr::eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Returns an owned copy of the entity table for editing.
    pub fn to_arena(&self) -> TopologyArena {
        self.arena.as_deref().cloned().unwrap_or_default()
    }
}

impl From<TopologyArena> for Shape {
    fn from(arena: TopologyArena) -> Self {
        Shape::new(arena)
    }
}
