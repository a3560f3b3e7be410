// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Traversal methods for navigating the topology hierarchy.
//!
//! Supports downward traversal (compound → solids → shells → faces → wires →
//! edges → vertices) and upward traversal to immediate parents via the
//! parent index.

use rustc_hash::FxHashSet;

use crate::arena::TopologyArena;
use crate::keys::*;

// =============================================================================
// Whole-table enumeration
// =============================================================================

impl TopologyArena {
    /// Returns every entity of the given type, in table order.
    pub fn keys_of_type(&self, ty: TopologyType) -> Vec<TopologyKey> {
        match ty {
            TopologyType::Vertex => self.vertices.keys().map(TopologyKey::Vertex).collect(),
            TopologyType::Edge => self.edges.keys().map(TopologyKey::Edge).collect(),
            TopologyType::Wire => self.wires.keys().map(TopologyKey::Wire).collect(),
            TopologyType::Face => self.faces.keys().map(TopologyKey::Face).collect(),
            TopologyType::Shell => self.shells.keys().map(TopologyKey::Shell).collect(),
            TopologyType::Solid => self.solids.keys().map(TopologyKey::Solid).collect(),
            TopologyType::CompSolid => {
                self.comp_solids.keys().map(TopologyKey::CompSolid).collect()
            }
            TopologyType::Compound => self.compounds.keys().map(TopologyKey::Compound).collect(),
        }
    }

    /// Returns every edge key, in table order.
    pub fn edge_keys(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.edges.keys()
    }

    /// Returns every face key, in table order.
    pub fn face_keys(&self) -> impl Iterator<Item = FaceKey> + '_ {
        self.faces.keys()
    }
}

// =============================================================================
// Downward traversal: extract sub-topologies
// =============================================================================

impl TopologyArena {
    /// Returns the immediate sub-shapes of an entity, in stored order.
    ///
    /// An entity that references the same child twice (a seam edge walked in
    /// both directions, a degenerated edge's single vertex) lists it twice.
    /// Unknown keys have no sub-shapes.
    pub fn sub_shapes(&self, key: TopologyKey) -> Vec<TopologyKey> {
        match key {
            TopologyKey::Vertex(_) => Vec::new(),
            TopologyKey::Edge(k) => self
                .edges
                .get(k)
                .map(|e| vec![TopologyKey::Vertex(e.start), TopologyKey::Vertex(e.end)])
                .unwrap_or_default(),
            TopologyKey::Wire(k) => self
                .wires
                .get(k)
                .map(|w| w.edges.iter().copied().map(TopologyKey::Edge).collect())
                .unwrap_or_default(),
            TopologyKey::Face(k) => self
                .faces
                .get(k)
                .map(|f| {
                    std::iter::once(f.outer_wire)
                        .chain(f.inner_wires.iter().copied())
                        .map(TopologyKey::Wire)
                        .collect()
                })
                .unwrap_or_default(),
            TopologyKey::Shell(k) => self
                .shells
                .get(k)
                .map(|s| s.faces.iter().copied().map(TopologyKey::Face).collect())
                .unwrap_or_default(),
            TopologyKey::Solid(k) => self
                .solids
                .get(k)
                .map(|s| {
                    std::iter::once(s.outer_shell)
                        .chain(s.inner_shells.iter().copied())
                        .map(TopologyKey::Shell)
                        .collect()
                })
                .unwrap_or_default(),
            TopologyKey::CompSolid(k) => self
                .comp_solids
                .get(k)
                .map(|cs| cs.solids.iter().copied().map(TopologyKey::Solid).collect())
                .unwrap_or_default(),
            TopologyKey::Compound(k) => self
                .compounds
                .get(k)
                .map(|c| c.children.clone())
                .unwrap_or_default(),
        }
    }

    /// Returns the distinct descendants of `key` of type `ty`, in depth-first
    /// order of first occurrence. `key` itself is never included.
    ///
    /// Branches that cannot contain `ty` (lower aggregation level) are not
    /// descended into.
    pub fn sub_shapes_of_type(&self, key: TopologyKey, ty: TopologyType) -> Vec<TopologyKey> {
        let mut found = Vec::new();
        let mut visited: FxHashSet<TopologyKey> = FxHashSet::default();
        let mut stack = vec![key];

        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            // Only compounds can hold entities of their own type
            if current != key && current.topology_type() == ty {
                found.push(current);
                if ty != TopologyType::Compound {
                    continue;
                }
            }
            // Reversed so the first child is popped first
            for child in self.sub_shapes(current).into_iter().rev() {
                if child.topology_type() >= ty && !visited.contains(&child) {
                    stack.push(child);
                }
            }
        }

        found
    }

    /// Returns the start and end vertex keys of an edge.
    pub fn edge_vertices(&self, key: EdgeKey) -> Option<(VertexKey, VertexKey)> {
        self.edges.get(key).map(|e| (e.start, e.end))
    }

    /// Returns the edge keys of a wire.
    pub fn wire_edges(&self, key: WireKey) -> Option<&[EdgeKey]> {
        self.wires.get(key).map(|w| w.edges.as_slice())
    }

    /// Returns all unique edge keys in a face.
    pub fn face_edges(&self, key: FaceKey) -> Option<FxHashSet<EdgeKey>> {
        let face = self.faces.get(key)?;
        let mut set = FxHashSet::default();
        if let Some(wire) = self.wires.get(face.outer_wire) {
            set.extend(&wire.edges);
        }
        for &iw in &face.inner_wires {
            if let Some(wire) = self.wires.get(iw) {
                set.extend(&wire.edges);
            }
        }
        Some(set)
    }

    /// Returns the face keys of a shell.
    pub fn shell_faces(&self, key: ShellKey) -> Option<&[FaceKey]> {
        self.shells.get(key).map(|s| s.faces.as_slice())
    }

    // =========================================================================
    // Upward traversal: immediate parents via the parent index
    // =========================================================================

    /// Returns every immediate parent of an entity, ordered by type: structural
    /// parents first, then grouping compounds.
    pub fn parents(&self, key: TopologyKey) -> Vec<TopologyKey> {
        let mut parents: Vec<TopologyKey> = self
            .upward
            .get(&key)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
        parents.sort_unstable();
        parents
    }

    /// Returns edges that use a given vertex.
    pub fn vertex_edges(&self, key: VertexKey) -> Vec<EdgeKey> {
        self.parents(key.into())
            .into_iter()
            .filter_map(|p| p.as_edge())
            .collect()
    }

    /// Returns wires that contain a given edge.
    pub fn edge_wires(&self, key: EdgeKey) -> Vec<WireKey> {
        self.parents(key.into())
            .into_iter()
            .filter_map(|p| match p {
                TopologyKey::Wire(w) => Some(w),
                _ => None,
            })
            .collect()
    }
}
