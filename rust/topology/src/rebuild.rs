// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Batched structural removal producing new shape snapshots.
//!
//! [`ReShape`] records which entities to remove and applies the whole batch to
//! a copy of a shape's entity table. References to removed entities are
//! stripped from their parents. A parent that cannot exist without the removed
//! child is removed too, in cascade:
//!
//! - an edge losing one of its vertices,
//! - a face losing its outer wire, a solid losing its outer shell,
//! - a wire, shell or comp-solid left without children.
//!
//! Compounds are plain groupings and survive even when emptied. Everything
//! else keeps its data and relationships untouched.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use crate::arena::TopologyArena;
use crate::keys::*;
use crate::shape::Shape;

/// A batch of removal instructions.
///
/// # Example
///
/// ```
/// use brep_topology::{ReShape, Shape, TopologyArena};
///
/// let mut arena = TopologyArena::new();
/// let v0 = arena.add_vertex(0.0, 0.0, 0.0);
/// let v1 = arena.add_vertex(1.0, 0.0, 0.0);
/// let edge = arena.add_edge(v0, v1).unwrap();
/// let shape = Shape::new(arena);
///
/// let mut reshape = ReShape::new();
/// reshape.remove(edge);
/// let rebuilt = reshape.apply(&shape);
///
/// assert_eq!(rebuilt.arena().unwrap().edge_count(), 0);
/// assert_eq!(rebuilt.arena().unwrap().vertex_count(), 2);
/// assert_eq!(shape.arena().unwrap().edge_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReShape {
    recorded: FxHashSet<TopologyKey>,
    order: Vec<TopologyKey>,
}

impl ReShape {
    /// Creates an empty instruction set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks an entity for removal. Recording the same entity twice is a no-op.
    pub fn remove(&mut self, key: impl Into<TopologyKey>) {
        let key = key.into();
        if self.recorded.insert(key) {
            self.order.push(key);
        }
    }

    /// Returns `true` if the entity is marked for removal.
    pub fn is_recorded(&self, key: impl Into<TopologyKey>) -> bool {
        self.recorded.contains(&key.into())
    }

    /// Returns the number of recorded removals.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if nothing is recorded.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Forgets every recorded removal.
    pub fn clear(&mut self) {
        self.recorded.clear();
        self.order.clear();
    }

    /// Applies the recorded removals to a copy of `shape`.
    ///
    /// The input is left untouched. Marked entities absent from the shape are
    /// ignored. A null input, or a result without entities, is a null shape.
    pub fn apply(&self, shape: &Shape) -> Shape {
        let Some(base) = shape.arena() else {
            return Shape::null();
        };
        if self.order.is_empty() {
            return shape.clone();
        }

        let mut arena = base.clone();
        let mut queue: VecDeque<TopologyKey> = self.order.iter().copied().collect();
        let mut removed = 0usize;
        let mut cascaded = 0usize;

        while let Some(key) = queue.pop_front() {
            if !arena.contains(key) {
                continue;
            }
            if self.recorded.contains(&key) {
                removed += 1;
            } else {
                cascaded += 1;
            }
            queue.extend(arena.detach(key));
        }

        tracing::debug!(
            requested = self.order.len(),
            removed,
            cascaded,
            remaining = arena.entity_count(),
            "Applied shape rebuild"
        );

        Shape::new(arena)
    }
}

impl TopologyArena {
    /// Removes one entity, strips it from its parents and returns the parents
    /// that can no longer exist without it.
    pub(crate) fn detach(&mut self, key: TopologyKey) -> Vec<TopologyKey> {
        if !self.contains(key) {
            return Vec::new();
        }

        let mut dangling = Vec::new();
        for parent in self.parents(key) {
            if parent != key && self.strip_child(parent, key) {
                dangling.push(parent);
            }
        }

        for child in self.sub_shapes(key) {
            self.unlink(child, key);
        }
        self.forget(key);
        self.remove_entity(key);

        dangling
    }

    /// Removes every reference to `child` from `parent`. Returns `true` when
    /// `parent` is left dangling.
    fn strip_child(&mut self, parent: TopologyKey, child: TopologyKey) -> bool {
        match (parent, child) {
            // An edge is meaningless without both of its vertices
            (TopologyKey::Edge(_), TopologyKey::Vertex(_)) => true,
            (TopologyKey::Wire(w), TopologyKey::Edge(e)) => match self.wires.get_mut(w) {
                Some(wire) => {
                    let (edges, orientations) = wire
                        .edges
                        .iter()
                        .zip(&wire.orientations)
                        .filter(|&(&k, _)| k != e)
                        .map(|(&k, &o)| (k, o))
                        .unzip();
                    wire.edges = edges;
                    wire.orientations = orientations;
                    wire.edges.is_empty()
                }
                None => false,
            },
            (TopologyKey::Face(f), TopologyKey::Wire(w)) => match self.faces.get_mut(f) {
                Some(face) if face.outer_wire == w => true,
                Some(face) => {
                    face.inner_wires.retain(|&k| k != w);
                    false
                }
                None => false,
            },
            (TopologyKey::Shell(s), TopologyKey::Face(f)) => match self.shells.get_mut(s) {
                Some(shell) => {
                    shell.faces.retain(|&k| k != f);
                    shell.faces.is_empty()
                }
                None => false,
            },
            (TopologyKey::Solid(s), TopologyKey::Shell(sh)) => match self.solids.get_mut(s) {
                Some(solid) if solid.outer_shell == sh => true,
                Some(solid) => {
                    solid.inner_shells.retain(|&k| k != sh);
                    false
                }
                None => false,
            },
            (TopologyKey::CompSolid(cs), TopologyKey::Solid(s)) => {
                match self.comp_solids.get_mut(cs) {
                    Some(comp_solid) => {
                        comp_solid.solids.retain(|&k| k != s);
                        comp_solid.solids.is_empty()
                    }
                    None => false,
                }
            }
            (TopologyKey::Compound(c), _) => {
                if let Some(compound) = self.compounds.get_mut(c) {
                    compound.children.retain(|&k| k != child);
                }
                false
            }
            _ => false,
        }
    }

    fn remove_entity(&mut self, key: TopologyKey) {
        match key {
            TopologyKey::Vertex(k) => {
                self.vertices.remove(k);
            }
            TopologyKey::Edge(k) => {
                self.edges.remove(k);
            }
            TopologyKey::Wire(k) => {
                self.wires.remove(k);
            }
            TopologyKey::Face(k) => {
                self.faces.remove(k);
            }
            TopologyKey::Shell(k) => {
                self.shells.remove(k);
            }
            TopologyKey::Solid(k) => {
                self.solids.remove(k);
            }
            TopologyKey::CompSolid(k) => {
                self.comp_solids.remove(k);
            }
            TopologyKey::Compound(k) => {
                self.compounds.remove(k);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construction::make_polygon;

    fn square(arena: &mut TopologyArena) -> (FaceKey, WireKey, [EdgeKey; 4], [VertexKey; 4]) {
        let v = [
            arena.add_vertex(0.0, 0.0, 0.0),
            arena.add_vertex(1.0, 0.0, 0.0),
            arena.add_vertex(1.0, 1.0, 0.0),
            arena.add_vertex(0.0, 1.0, 0.0),
        ];
        let (face, wire, edges) = make_polygon(arena, v).unwrap();
        (face, wire, edges, v)
    }

    #[test]
    fn removing_free_edge_keeps_its_vertices() {
        let mut arena = TopologyArena::new();
        let (face, _, face_edges, _) = square(&mut arena);
        let a = arena.add_vertex(5.0, 0.0, 0.0);
        let b = arena.add_vertex(6.0, 0.0, 0.0);
        let free = arena.add_edge(a, b).unwrap();
        let shape = Shape::new(arena);

        let mut reshape = ReShape::new();
        reshape.remove(free);
        let rebuilt = reshape.apply(&shape);
        let out = rebuilt.arena().unwrap();

        assert!(out.edge(free).is_none());
        assert!(out.vertex(a).is_some());
        assert!(out.vertex(b).is_some());
        assert!(out.vertex_edges(a).is_empty());
        let edges = out.face_edges(face).unwrap();
        assert_eq!(edges.len(), 4);
        assert!(face_edges.iter().all(|e| edges.contains(e)));

        // The base snapshot is untouched
        assert!(shape.arena().unwrap().edge(free).is_some());
        assert_eq!(shape.arena().unwrap().vertex_edges(a), vec![free]);
    }

    #[test]
    fn removed_edge_is_stripped_from_grouping_compound() {
        let mut arena = TopologyArena::new();
        let a = arena.add_vertex(0.0, 0.0, 0.0);
        let b = arena.add_vertex(1.0, 0.0, 0.0);
        let edge = arena.add_edge(a, b).unwrap();
        let compound = arena.add_compound(&[edge.into(), a.into()]).unwrap();
        let shape = Shape::new(arena);

        let mut reshape = ReShape::new();
        reshape.remove(edge);
        let rebuilt = reshape.apply(&shape);
        let out = rebuilt.arena().unwrap();

        assert_eq!(out.compound(compound).unwrap().children, vec![TopologyKey::Vertex(a)]);
    }

    #[test]
    fn removing_vertex_cascades_to_its_edges() {
        let mut arena = TopologyArena::new();
        let (face, wire, edges, v) = square(&mut arena);
        let shell = arena.add_shell(&[face]).unwrap();
        let shape = Shape::new(arena);

        let mut reshape = ReShape::new();
        reshape.remove(v[0]);
        let rebuilt = reshape.apply(&shape);
        let out = rebuilt.arena().unwrap();

        // v0 closes the loop through e0 and e3
        assert!(out.edge(edges[0]).is_none());
        assert!(out.edge(edges[3]).is_none());
        assert_eq!(out.wire_edges(wire).unwrap(), &[edges[1], edges[2]]);
        assert_eq!(out.wire(wire).unwrap().orientations.len(), 2);
        assert!(out.face(face).is_some());
        assert_eq!(out.shell_faces(shell).unwrap(), &[face]);
    }

    #[test]
    fn removing_outer_wire_cascades_to_face_and_shell() {
        let mut arena = TopologyArena::new();
        let (face, wire, edges, _) = square(&mut arena);
        let shell = arena.add_shell(&[face]).unwrap();
        let solid = arena.add_solid(shell).unwrap();
        let shape = Shape::new(arena);

        let mut reshape = ReShape::new();
        reshape.remove(wire);
        let rebuilt = reshape.apply(&shape);
        let out = rebuilt.arena().unwrap();

        assert!(out.face(face).is_none());
        assert!(out.shell(shell).is_none());
        assert!(out.solid(solid).is_none());
        // Edges lose their wire but stay in the table
        for e in edges {
            assert!(out.edge(e).is_some());
            assert!(out.edge_wires(e).is_empty());
        }
    }

    #[test]
    fn removing_inner_wire_keeps_face() {
        let mut arena = TopologyArena::new();
        let (_, outer, _, _) = square(&mut arena);
        let h0 = arena.add_vertex(0.2, 0.2, 0.0);
        let h1 = arena.add_vertex(0.8, 0.2, 0.0);
        let h2 = arena.add_vertex(0.5, 0.8, 0.0);
        let he0 = arena.add_edge(h0, h1).unwrap();
        let he1 = arena.add_edge(h1, h2).unwrap();
        let he2 = arena.add_edge(h2, h0).unwrap();
        let hole = arena.add_wire(&[he0, he1, he2]).unwrap();
        let face = arena.add_face_with_holes(outer, &[hole]).unwrap();
        let shape = Shape::new(arena);

        let mut reshape = ReShape::new();
        reshape.remove(hole);
        let out = reshape.apply(&shape);
        let data = out.arena().unwrap().face(face).unwrap();

        assert_eq!(data.outer_wire, outer);
        assert!(data.inner_wires.is_empty());
    }

    #[test]
    fn emptied_compound_survives() {
        let mut arena = TopologyArena::new();
        let a = arena.add_vertex(0.0, 0.0, 0.0);
        let keep = arena.add_vertex(1.0, 0.0, 0.0);
        let compound = arena.add_compound(&[a.into()]).unwrap();
        let shape = Shape::new(arena);

        let mut reshape = ReShape::new();
        reshape.remove(a);
        let rebuilt = reshape.apply(&shape);
        let out = rebuilt.arena().unwrap();

        assert!(out.compound(compound).unwrap().children.is_empty());
        assert!(out.vertex(keep).is_some());
    }

    #[test]
    fn absent_keys_are_ignored() {
        let mut arena = TopologyArena::new();
        arena.add_vertex(0.0, 0.0, 0.0);
        let mut other = arena.clone();
        let foreign = other.add_vertex(9.0, 9.0, 9.0);
        let shape = Shape::new(arena);

        let mut reshape = ReShape::new();
        reshape.remove(foreign);
        let rebuilt = reshape.apply(&shape);

        assert_eq!(rebuilt.arena().unwrap().vertex_count(), 1);
    }

    #[test]
    fn null_in_null_out() {
        let mut reshape = ReShape::new();
        let mut arena = TopologyArena::new();
        let v = arena.add_vertex(0.0, 0.0, 0.0);
        reshape.remove(v);

        assert!(reshape.apply(&Shape::null()).is_null());
    }

    #[test]
    fn removing_everything_yields_null() {
        let mut arena = TopologyArena::new();
        let v = arena.add_vertex(0.0, 0.0, 0.0);
        let shape = Shape::new(arena);

        let mut reshape = ReShape::new();
        reshape.remove(v);

        assert!(reshape.apply(&shape).is_null());
    }

    #[test]
    fn empty_batch_returns_same_snapshot() {
        let mut arena = TopologyArena::new();
        arena.add_vertex(0.0, 0.0, 0.0);
        let shape = Shape::new(arena);

        assert!(ReShape::new().apply(&shape).is_same(&shape));
    }

    #[test]
    fn recording_is_idempotent() {
        let mut arena = TopologyArena::new();
        let v = arena.add_vertex(0.0, 0.0, 0.0);

        let mut reshape = ReShape::new();
        reshape.remove(v);
        reshape.remove(TopologyKey::Vertex(v));
        assert_eq!(reshape.len(), 1);
        assert!(reshape.is_recorded(v));

        reshape.clear();
        assert!(reshape.is_empty());
        assert!(!reshape.is_recorded(v));
    }
}
