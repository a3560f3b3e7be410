// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # B-rep Analyze
//!
//! Triage tools for boundary-representation shapes built with
//! [`brep_topology`]:
//!
//! - [`IndependentShapeCheck`] finds edges that bound no face and vertices
//!   that end no edge, and rebuilds the shape without them.
//! - [`ShapeContent`] counts entities per kind, degenerated edges and
//!   non-manifold edges.
//!
//! Both analyzers are built on [`map_shapes_and_ancestors`], which maps each
//! entity of one kind to the entities of a higher kind that contain it.
//!
//! ## Quick Start
//!
//! ```
//! use brep_analyze::IndependentShapeCheck;
//! use brep_topology::{Shape, TopologyArena};
//!
//! let mut arena = TopologyArena::new();
//! let a = arena.add_vertex(0.0, 0.0, 0.0);
//! let b = arena.add_vertex(1.0, 0.0, 0.0);
//! arena.add_edge(a, b).unwrap();
//!
//! let mut check = IndependentShapeCheck::new(Shape::new(arena));
//! check.perform();
//! assert_eq!(check.independent_edge_count(), Some(1));
//!
//! check.remove_independent_edges();
//! check.perform();
//! assert_eq!(check.independent_vertex_count(), Some(2));
//! ```

pub mod adjacency;
pub mod check;
pub mod config;
pub mod content;
pub mod error;
pub mod input;
pub mod orphans;

pub use adjacency::{map_shapes_and_ancestors, AncestorMap, AncestorQuery};
pub use check::{count_or_sentinel, CheckState, IndependentShapeCheck};
pub use config::AnalyzeConfig;
pub use content::{ContentReport, ShapeContent};
pub use error::{CheckError, Error, Result};
pub use input::ShapeInput;
pub use orphans::{
    detect_orphans, independent_edges, independent_vertices, remove_entities,
    removed_independent_edges, removed_independent_shapes, removed_independent_vertices,
    OrphanReport,
};
