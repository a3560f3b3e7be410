// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arena-based storage for B-rep topology entities.
//!
//! The [`TopologyArena`] is the entity table of a shape. Every entity
//! (vertex, edge, wire, face, shell, solid, comp-solid, compound) lives inside
//! slot maps with stable, generational keys. Entities may sit in the table
//! without being used by anything above them: a dangling edge that no wire
//! references, or a vertex left behind after its edge was deleted. Finding and
//! stripping those is the job of the analysis crate.
//!
//! A single parent index (child → immediate containers, compounds included)
//! is kept in step with every insertion and removal, so structural edits find
//! the entities referencing a key without scanning the table.

use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::SlotMap;

use crate::keys::*;

/// A point in 3D space.
#[derive(Debug, Clone)]
pub struct VertexData {
    pub point: [f64; 3],
}

/// A bounded curve between two vertices.
#[derive(Debug, Clone)]
pub struct EdgeData {
    pub start: VertexKey,
    pub end: VertexKey,
    /// `true` when the edge carries no 3D curve (a seam collapsed to a point,
    /// typically at the pole of a sphere or the apex of a cone).
    pub degenerated: bool,
}

/// An ordered chain of edges.
#[derive(Debug, Clone)]
pub struct WireData {
    pub edges: Vec<EdgeKey>,
    /// Per edge: `true` when walked start→end.
    pub orientations: Vec<bool>,
}

/// A surface patch: one outer boundary, any number of holes.
#[derive(Debug, Clone)]
pub struct FaceData {
    pub outer_wire: WireKey,
    pub inner_wires: Vec<WireKey>,
}

#[derive(Debug, Clone)]
pub struct ShellData {
    pub faces: Vec<FaceKey>,
}

/// A volume: one outer shell, any number of void shells.
#[derive(Debug, Clone)]
pub struct SolidData {
    pub outer_shell: ShellKey,
    pub inner_shells: Vec<ShellKey>,
}

/// Solids glued along shared faces.
#[derive(Debug, Clone)]
pub struct CompSolidData {
    pub solids: Vec<SolidKey>,
}

/// A free grouping; may hold entities of any kind, other compounds included.
#[derive(Debug, Clone, Default)]
pub struct CompoundData {
    pub children: Vec<TopologyKey>,
}

/// The entity table of a shape, with its parent index.
///
/// # Example
///
/// ```
/// use brep_topology::TopologyArena;
///
/// let mut arena = TopologyArena::new();
/// let v0 = arena.add_vertex(0.0, 0.0, 0.0);
/// let v1 = arena.add_vertex(1.0, 0.0, 0.0);
/// arena.add_edge(v0, v1).unwrap();
///
/// assert_eq!(arena.vertex_count(), 2);
/// assert_eq!(arena.edge_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TopologyArena {
    pub(crate) vertices: SlotMap<VertexKey, VertexData>,
    pub(crate) edges: SlotMap<EdgeKey, EdgeData>,
    pub(crate) wires: SlotMap<WireKey, WireData>,
    pub(crate) faces: SlotMap<FaceKey, FaceData>,
    pub(crate) shells: SlotMap<ShellKey, ShellData>,
    pub(crate) solids: SlotMap<SolidKey, SolidData>,
    pub(crate) comp_solids: SlotMap<CompSolidKey, CompSolidData>,
    pub(crate) compounds: SlotMap<CompoundKey, CompoundData>,

    /// child → every entity that references it one level up
    pub(crate) upward: FxHashMap<TopologyKey, FxHashSet<TopologyKey>>,
}

/// Generates the per-table lookup and count accessors.
macro_rules! table_accessors {
    ($($table:ident: $key:ty => $data:ty, $get:ident, $count:ident;)*) => {
        impl TopologyArena {
            $(
                #[doc = concat!("Returns the `", stringify!($data), "` stored under `key`.")]
                pub fn $get(&self, key: $key) -> Option<&$data> {
                    self.$table.get(key)
                }

                #[doc = concat!("Returns the number of ", stringify!($table), " in the table.")]
                pub fn $count(&self) -> usize {
                    self.$table.len()
                }
            )*
        }
    };
}

table_accessors! {
    vertices: VertexKey => VertexData, vertex, vertex_count;
    edges: EdgeKey => EdgeData, edge, edge_count;
    wires: WireKey => WireData, wire, wire_count;
    faces: FaceKey => FaceData, face, face_count;
    shells: ShellKey => ShellData, shell, shell_count;
    solids: SolidKey => SolidData, solid, solid_count;
    comp_solids: CompSolidKey => CompSolidData, comp_solid, comp_solid_count;
    compounds: CompoundKey => CompoundData, compound, compound_count;
}

impl TopologyArena {
    /// Creates a new, empty topology arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vertex at the given 3D coordinates.
    pub fn add_vertex(&mut self, x: f64, y: f64, z: f64) -> VertexKey {
        self.vertices.insert(VertexData { point: [x, y, z] })
    }

    /// Returns `true` if the edge is flagged as degenerated.
    ///
    /// Unknown keys are reported as not degenerated.
    pub fn is_degenerated(&self, key: EdgeKey) -> bool {
        self.edges.get(key).is_some_and(|e| e.degenerated)
    }

    /// Returns the number of entities of the given type.
    pub fn count_of_type(&self, ty: TopologyType) -> usize {
        match ty {
            TopologyType::Vertex => self.vertex_count(),
            TopologyType::Edge => self.edge_count(),
            TopologyType::Wire => self.wire_count(),
            TopologyType::Face => self.face_count(),
            TopologyType::Shell => self.shell_count(),
            TopologyType::Solid => self.solid_count(),
            TopologyType::CompSolid => self.comp_solid_count(),
            TopologyType::Compound => self.compound_count(),
        }
    }

    /// Returns the total number of entities of every type.
    pub fn entity_count(&self) -> usize {
        TopologyType::ALL.iter().map(|&ty| self.count_of_type(ty)).sum()
    }

    /// Returns `true` if the arena holds no entity at all.
    pub fn is_empty(&self) -> bool {
        self.entity_count() == 0
    }

    /// Returns `true` if the given topology key references a live entity.
    pub fn contains(&self, key: TopologyKey) -> bool {
        match key {
            TopologyKey::Vertex(k) => self.vertices.contains_key(k),
            TopologyKey::Edge(k) => self.edges.contains_key(k),
            TopologyKey::Wire(k) => self.wires.contains_key(k),
            TopologyKey::Face(k) => self.faces.contains_key(k),
            TopologyKey::Shell(k) => self.shells.contains_key(k),
            TopologyKey::Solid(k) => self.solids.contains_key(k),
            TopologyKey::CompSolid(k) => self.comp_solids.contains_key(k),
            TopologyKey::Compound(k) => self.compounds.contains_key(k),
        }
    }

    /// Records `parent` as a direct container of `child`.
    pub(crate) fn link(&mut self, child: TopologyKey, parent: TopologyKey) {
        self.upward.entry(child).or_default().insert(parent);
    }

    /// Drops `parent` from the containers of `child`.
    pub(crate) fn unlink(&mut self, child: TopologyKey, parent: TopologyKey) {
        if let Some(parents) = self.upward.get_mut(&child) {
            parents.remove(&parent);
        }
    }

    /// Drops the index entry of an entity leaving the table.
    pub(crate) fn forget(&mut self, key: TopologyKey) {
        self.upward.remove(&key);
    }
}
