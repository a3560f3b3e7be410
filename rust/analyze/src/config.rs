// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Analysis configuration loaded from defaults, JSON or environment variables.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default number of faces an edge may border before it counts as non-manifold.
pub const DEFAULT_NON_MANIFOLD_FACE_LIMIT: usize = 2;

/// Analyzer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzeConfig {
    /// An edge bordering more faces than this is non-manifold.
    pub non_manifold_face_limit: usize,
    /// Log every orphan found at `trace` level.
    pub trace_entities: bool,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            non_manifold_face_limit: DEFAULT_NON_MANIFOLD_FACE_LIMIT,
            trace_entities: false,
        }
    }
}

impl AnalyzeConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables fall back to the defaults.
    pub fn from_env() -> Self {
        Self {
            non_manifold_face_limit: std::env::var("BREP_NON_MANIFOLD_FACE_LIMIT")
                .unwrap_or_else(|_| DEFAULT_NON_MANIFOLD_FACE_LIMIT.to_string())
                .parse()
                .unwrap_or(DEFAULT_NON_MANIFOLD_FACE_LIMIT),
            trace_entities: std::env::var("BREP_TRACE_ENTITIES")
                .map(|v| matches!(v.trim(), "1" | "true" | "TRUE" | "yes"))
                .unwrap_or(false),
        }
    }

    /// Decode configuration from a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
