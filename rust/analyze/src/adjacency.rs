// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Child → ancestor maps built by walking a shape downward.
//!
//! [`map_shapes_and_ancestors`] lists, for every entity of a child type, the
//! entities of a parent type that contain it at any depth (an edge's faces are
//! found through their wires). Children nobody contains still get an entry
//! with an empty list: those are exactly the orphans the analyzers look for.

use rustc_hash::FxHashMap;
use serde::Serialize;

use brep_topology::{Shape, TopologyKey, TopologyType};

/// A (child type, parent type) pair selecting which ancestry to map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AncestorQuery {
    pub child: TopologyType,
    pub parent: TopologyType,
}

impl AncestorQuery {
    /// Edges and the faces bounded by them.
    pub const EDGE_FACE: Self = Self::new(TopologyType::Edge, TopologyType::Face);
    /// Vertices and the edges ending on them.
    pub const VERTEX_EDGE: Self = Self::new(TopologyType::Vertex, TopologyType::Edge);
    /// Edges and the wires chaining them.
    pub const EDGE_WIRE: Self = Self::new(TopologyType::Edge, TopologyType::Wire);
    /// Wires and the faces they bound.
    pub const WIRE_FACE: Self = Self::new(TopologyType::Wire, TopologyType::Face);
    /// Faces and the shells sewing them.
    pub const FACE_SHELL: Self = Self::new(TopologyType::Face, TopologyType::Shell);

    /// Pairs a child kind with the ancestor kind to look up.
    pub const fn new(child: TopologyType, parent: TopologyType) -> Self {
        Self { child, parent }
    }

    /// Returns `true` when `parent` can actually contain `child`.
    pub fn is_upward(&self) -> bool {
        self.parent > self.child
    }
}

/// Ordered map from each child entity to its ancestors of the parent type.
///
/// Keys follow the shape's table order; each ancestor list follows the table
/// order of the parents.
#[derive(Debug, Clone)]
pub struct AncestorMap {
    query: AncestorQuery,
    entries: Vec<(TopologyKey, Vec<TopologyKey>)>,
    index: FxHashMap<TopologyKey, usize>,
}

impl AncestorMap {
    fn empty(query: AncestorQuery) -> Self {
        Self {
            query,
            entries: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// The query this map answers.
    pub fn query(&self) -> AncestorQuery {
        self.query
    }

    /// Number of child entities in the map.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(child, ancestors)` in map order.
    pub fn iter(&self) -> impl Iterator<Item = (TopologyKey, &[TopologyKey])> + '_ {
        self.entries.iter().map(|(k, parents)| (*k, parents.as_slice()))
    }

    /// Iterates over the child entities in map order.
    pub fn keys(&self) -> impl Iterator<Item = TopologyKey> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    /// Ancestors of `child`, or `None` if `child` is not in the map.
    pub fn ancestors(&self, child: TopologyKey) -> Option<&[TopologyKey]> {
        self.index
            .get(&child)
            .map(|&i| self.entries[i].1.as_slice())
    }

    /// Number of ancestors of `child`, or `None` if `child` is not in the map.
    pub fn ancestor_count(&self, child: TopologyKey) -> Option<usize> {
        self.ancestors(child).map(<[TopologyKey]>::len)
    }

    /// Children whose ancestor count satisfies `keep`, in map order.
    pub fn keys_where(&self, mut keep: impl FnMut(usize) -> bool) -> Vec<TopologyKey> {
        self.entries
            .iter()
            .filter(|(_, parents)| keep(parents.len()))
            .map(|(k, _)| *k)
            .collect()
    }
}

/// Builds the ancestor map of `query` over `shape`.
///
/// Every (parent, child) incidence is recorded once, however many times the
/// child occurs under that parent. A null shape, or a query whose parent type
/// does not rank above its child type, yields no ancestors.
pub fn map_shapes_and_ancestors(shape: &Shape, query: AncestorQuery) -> AncestorMap {
    let mut map = AncestorMap::empty(query);
    let Some(arena) = shape.arena() else {
        return map;
    };

    for child in arena.keys_of_type(query.child) {
        map.index.insert(child, map.entries.len());
        map.entries.push((child, Vec::new()));
    }

    if !query.is_upward() {
        return map;
    }

    let mut incidences = 0usize;
    for parent in arena.keys_of_type(query.parent) {
        for child in arena.sub_shapes_of_type(parent, query.child) {
            if let Some(&i) = map.index.get(&child) {
                map.entries[i].1.push(parent);
                incidences += 1;
            }
        }
    }

    tracing::trace!(
        child = %query.child,
        parent = %query.parent,
        children = map.len(),
        incidences,
        "Mapped shapes and ancestors"
    );

    map
}
