// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Construction methods for topology entities.
//!
//! Every constructor checks that the entities it references are live, inserts
//! the new entity and records it in the parent index of each child. Wires,
//! shells and comp-solids need at least one child; compounds may be empty.

use crate::arena::*;
use crate::error::{Error, Result};
use crate::keys::*;

impl TopologyArena {
    /// Creates an edge between two existing vertices.
    pub fn add_edge(&mut self, start: VertexKey, end: VertexKey) -> Result<EdgeKey> {
        self.insert_edge(start, end, false)
    }

    /// Creates a degenerated edge collapsed onto a single vertex.
    ///
    /// Such an edge has no 3D curve; it shows up on the seam of periodic
    /// surfaces, e.g. at the pole of a sphere.
    pub fn add_degenerated_edge(&mut self, vertex: VertexKey) -> Result<EdgeKey> {
        self.insert_edge(vertex, vertex, true)
    }

    fn insert_edge(
        &mut self,
        start: VertexKey,
        end: VertexKey,
        degenerated: bool,
    ) -> Result<EdgeKey> {
        self.require(&[start, end])?;
        let key = self.edges.insert(EdgeData {
            start,
            end,
            degenerated,
        });
        self.adopt(key, &[start, end]);
        Ok(key)
    }

    /// Creates a wire from an ordered chain of edges.
    ///
    /// Each edge must share a vertex with the end reached by the previous one.
    /// The same edge may appear twice, as a seam does on a closed surface.
    pub fn add_wire(&mut self, edges: &[EdgeKey]) -> Result<WireKey> {
        let orientations = self.orient_chain(edges)?;
        let key = self.wires.insert(WireData {
            edges: edges.to_vec(),
            orientations,
        });
        self.adopt(key, edges);
        Ok(key)
    }

    /// Walks the chain and returns, per edge, whether it is run start→end.
    fn orient_chain(&self, edges: &[EdgeKey]) -> Result<Vec<bool>> {
        let ends = |key: EdgeKey| {
            self.edges
                .get(key)
                .map(|e| (e.start, e.end))
                .ok_or(Error::NotFound(key.into()))
        };

        let Some((&first, rest)) = edges.split_first() else {
            return Err(Error::Empty(TopologyType::Wire));
        };
        let (start, end) = ends(first)?;
        // The first edge runs toward the vertex it shares with the second
        let forward = match rest.first() {
            Some(&next) => {
                let (a, b) = ends(next)?;
                end == a || end == b
            }
            None => true,
        };

        let mut tip = if forward { end } else { start };
        let mut orientations = Vec::with_capacity(edges.len());
        orientations.push(forward);
        for (offset, &key) in rest.iter().enumerate() {
            let (a, b) = ends(key)?;
            let along = if a == tip {
                true
            } else if b == tip {
                false
            } else {
                return Err(Error::DisconnectedWire { index: offset + 1 });
            };
            tip = if along { b } else { a };
            orientations.push(along);
        }
        Ok(orientations)
    }

    /// Creates a face from an outer boundary wire.
    pub fn add_face(&mut self, outer_wire: WireKey) -> Result<FaceKey> {
        self.add_face_with_holes(outer_wire, &[])
    }

    /// Creates a face with an outer boundary and inner boundary wires (holes).
    pub fn add_face_with_holes(
        &mut self,
        outer_wire: WireKey,
        inner_wires: &[WireKey],
    ) -> Result<FaceKey> {
        self.require(&[outer_wire])?;
        self.require(inner_wires)?;
        let key = self.faces.insert(FaceData {
            outer_wire,
            inner_wires: inner_wires.to_vec(),
        });
        self.adopt(key, &[outer_wire]);
        self.adopt(key, inner_wires);
        Ok(key)
    }

    /// Creates a shell from at least one face.
    pub fn add_shell(&mut self, faces: &[FaceKey]) -> Result<ShellKey> {
        non_empty(faces, TopologyType::Shell)?;
        self.require(faces)?;
        let key = self.shells.insert(ShellData {
            faces: faces.to_vec(),
        });
        self.adopt(key, faces);
        Ok(key)
    }

    /// Creates a solid from an outer shell.
    pub fn add_solid(&mut self, outer_shell: ShellKey) -> Result<SolidKey> {
        self.add_solid_with_voids(outer_shell, &[])
    }

    /// Creates a solid bounded by `outer_shell` with cavities bounded by
    /// `voids`.
    pub fn add_solid_with_voids(
        &mut self,
        outer_shell: ShellKey,
        voids: &[ShellKey],
    ) -> Result<SolidKey> {
        self.require(&[outer_shell])?;
        self.require(voids)?;
        let key = self.solids.insert(SolidData {
            outer_shell,
            inner_shells: voids.to_vec(),
        });
        self.adopt(key, &[outer_shell]);
        self.adopt(key, voids);
        Ok(key)
    }

    /// Creates a comp-solid from at least one solid.
    pub fn add_comp_solid(&mut self, solids: &[SolidKey]) -> Result<CompSolidKey> {
        non_empty(solids, TopologyType::CompSolid)?;
        self.require(solids)?;
        let key = self.comp_solids.insert(CompSolidData {
            solids: solids.to_vec(),
        });
        self.adopt(key, solids);
        Ok(key)
    }

    /// Creates a compound grouping arbitrary entities. An empty compound is
    /// allowed.
    pub fn add_compound(&mut self, children: &[TopologyKey]) -> Result<CompoundKey> {
        self.require(children)?;
        let key = self.compounds.insert(CompoundData {
            children: children.to_vec(),
        });
        self.adopt(key, children);
        Ok(key)
    }

    /// Appends an entity to an existing compound.
    pub fn add_to_compound(&mut self, compound: CompoundKey, child: TopologyKey) -> Result<()> {
        self.require(&[child])?;
        self.compounds
            .get_mut(compound)
            .ok_or(Error::NotFound(compound.into()))?
            .children
            .push(child);
        self.link(child, compound.into());
        Ok(())
    }

    /// Fails on the first key that is not live.
    fn require<K: Copy + Into<TopologyKey>>(&self, keys: &[K]) -> Result<()> {
        match keys.iter().copied().map(Into::<TopologyKey>::into).find(|&k| !self.contains(k)) {
            Some(missing) => Err(Error::NotFound(missing)),
            None => Ok(()),
        }
    }

    /// Records `parent` in the parent index of every child.
    fn adopt<K: Copy + Into<TopologyKey>>(
        &mut self,
        parent: impl Into<TopologyKey>,
        children: &[K],
    ) {
        let parent = parent.into();
        for &child in children {
            self.link(child.into(), parent);
        }
    }
}

fn non_empty<K>(children: &[K], ty: TopologyType) -> Result<()> {
    if children.is_empty() {
        Err(Error::Empty(ty))
    } else {
        Ok(())
    }
}

/// Builds a planar polygon face over the given corners, closing the loop from
/// the last corner back to the first.
///
/// Returns `(face, wire, edges)`; edge `i` runs from corner `i` to corner
/// `i + 1`.
pub fn make_polygon<const N: usize>(
    arena: &mut TopologyArena,
    corners: [VertexKey; N],
) -> Result<(FaceKey, WireKey, [EdgeKey; N])> {
    let mut edges = [EdgeKey::default(); N];
    for (i, edge) in edges.iter_mut().enumerate() {
        let next = if i + 1 == N { 0 } else { i + 1 };
        *edge = arena.add_edge(corners[i], corners[next])?;
    }
    let (face, wire) = make_face(arena, &edges)?;
    Ok((face, wire, edges))
}

/// Builds a face bounded by one wire over existing edges.
///
/// Edges may be shared with other faces.
pub fn make_face(arena: &mut TopologyArena, edges: &[EdgeKey]) -> Result<(FaceKey, WireKey)> {
    let wire = arena.add_wire(edges)?;
    let face = arena.add_face(wire)?;
    Ok((face, wire))
}
