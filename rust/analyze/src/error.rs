// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for shape analysis.

use serde::Serialize;

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Status an analyzer records when it cannot work on its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, thiserror::Error)]
pub enum CheckError {
    /// The input shape is null or holds no entity.
    #[error("invalid shape: input is null or empty")]
    InvalidShape,
}

/// Errors surfaced by the analysis crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Check(#[from] CheckError),

    /// Building the shape under analysis failed.
    #[error("topology error: {0}")]
    Topology(#[from] brep_topology::Error),

    /// An analysis configuration document could not be decoded.
    #[error("invalid analysis configuration: {0}")]
    Config(#[from] serde_json::Error),
}
