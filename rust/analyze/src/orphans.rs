// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Orphan detection and removal.
//!
//! An orphan is an entity of the shape's table that no entity of the next
//! container kind uses: an edge bounding no face, a vertex ending no edge.
//! Everything here is pure; the input shape is never modified.

use serde::Serialize;

use brep_topology::{ReShape, Shape, TopologyKey};

use crate::adjacency::{map_shapes_and_ancestors, AncestorQuery};

/// Returns the entities of `query.child` type with no ancestor of
/// `query.parent` type, in table order.
pub fn detect_orphans(shape: &Shape, query: AncestorQuery) -> Vec<TopologyKey> {
    if shape.is_null() {
        return Vec::new();
    }
    map_shapes_and_ancestors(shape, query).keys_where(|count| count == 0)
}

/// Edges that bound no face.
pub fn independent_edges(shape: &Shape) -> Vec<TopologyKey> {
    detect_orphans(shape, AncestorQuery::EDGE_FACE)
}

/// Vertices that end no edge.
pub fn independent_vertices(shape: &Shape) -> Vec<TopologyKey> {
    detect_orphans(shape, AncestorQuery::VERTEX_EDGE)
}

/// Rebuilds `shape` without `keys`. An empty list hands back the same snapshot.
pub fn remove_entities(shape: &Shape, keys: &[TopologyKey]) -> Shape {
    if keys.is_empty() {
        return shape.clone();
    }
    let mut reshape = ReShape::new();
    for &key in keys {
        reshape.remove(key);
    }
    reshape.apply(shape)
}

/// Rebuilds `shape` without its independent edges.
///
/// The edges' vertices stay in the table and usually turn into independent
/// vertices of the result.
pub fn removed_independent_edges(shape: &Shape) -> Shape {
    remove_entities(shape, &independent_edges(shape))
}

/// Rebuilds `shape` without its independent vertices.
pub fn removed_independent_vertices(shape: &Shape) -> Shape {
    remove_entities(shape, &independent_vertices(shape))
}

/// Rebuilds `shape` without independent vertices, then without the
/// independent edges of that vertex-cleaned shape.
pub fn removed_independent_shapes(shape: &Shape) -> Shape {
    let cleaned = removed_independent_vertices(shape);
    removed_independent_edges(&cleaned)
}

/// Both orphan lists of one shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrphanReport {
    pub edges: Vec<TopologyKey>,
    pub vertices: Vec<TopologyKey>,
}

impl OrphanReport {
    /// Runs both detectors on `shape`.
    pub fn collect(shape: &Shape) -> Self {
        Self {
            edges: independent_edges(shape),
            vertices: independent_vertices(shape),
        }
    }

    /// Number of independent edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of independent vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` when the shape has no orphan at all.
    pub fn is_clean(&self) -> bool {
        self.edges.is_empty() && self.vertices.is_empty()
    }
}
