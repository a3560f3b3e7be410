// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for topology construction.

use crate::keys::{TopologyKey, TopologyType};

/// Result type alias for topology operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a shape.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A referenced entity is not in the arena (never inserted, or removed by a
    /// rebuild).
    #[error("topology entity not found: {0:?}")]
    NotFound(TopologyKey),

    /// A wire, shell or comp-solid was given no children.
    #[error("{0} must have at least one child")]
    Empty(TopologyType),

    /// The edge at `index` shares no vertex with the end reached so far.
    #[error("wire breaks before edge {index}")]
    DisconnectedWire { index: usize },
}
