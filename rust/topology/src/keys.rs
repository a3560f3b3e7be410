// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Topology key types for arena-based storage.
//!
//! Each entity of a shape gets a unique, type-safe key for O(1) lookup in the
//! arena. Keys are created by `slotmap::SlotMap` and remain valid even after
//! other entities are removed (generational indices), which is what lets a
//! rebuilt shape keep addressing the entities that survived the rebuild.

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// Key for a vertex (point in 3D space).
    pub struct VertexKey;

    /// Key for an edge (curve segment between two vertices).
    pub struct EdgeKey;

    /// Key for a wire (ordered chain of connected edges).
    pub struct WireKey;

    /// Key for a face (surface region bounded by wires).
    pub struct FaceKey;

    /// Key for a shell (connected set of faces).
    pub struct ShellKey;

    /// Key for a solid (volume bounded by shells).
    pub struct SolidKey;

    /// Key for a comp-solid (solids glued along shared faces).
    pub struct CompSolidKey;

    /// Key for a compound (free grouping of any entities).
    pub struct CompoundKey;
}

/// A key that can reference any topology entity.
///
/// Keys order by entity type first, following [`TopologyType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TopologyKey {
    Vertex(VertexKey),
    Edge(EdgeKey),
    Wire(WireKey),
    Face(FaceKey),
    Shell(ShellKey),
    Solid(SolidKey),
    CompSolid(CompSolidKey),
    Compound(CompoundKey),
}

impl TopologyKey {
    /// Returns the topology type of this key.
    pub fn topology_type(&self) -> TopologyType {
        match self {
            TopologyKey::Vertex(_) => TopologyType::Vertex,
            TopologyKey::Edge(_) => TopologyType::Edge,
            TopologyKey::Wire(_) => TopologyType::Wire,
            TopologyKey::Face(_) => TopologyType::Face,
            TopologyKey::Shell(_) => TopologyType::Shell,
            TopologyKey::Solid(_) => TopologyType::Solid,
            TopologyKey::CompSolid(_) => TopologyType::CompSolid,
            TopologyKey::Compound(_) => TopologyType::Compound,
        }
    }

    /// Returns the edge key if this key references an edge.
    pub fn as_edge(&self) -> Option<EdgeKey> {
        match *self {
            TopologyKey::Edge(k) => Some(k),
            _ => None,
        }
    }

    /// Returns the vertex key if this key references a vertex.
    pub fn as_vertex(&self) -> Option<VertexKey> {
        match *self {
            TopologyKey::Vertex(k) => Some(k),
            _ => None,
        }
    }

    /// Returns the face key if this key references a face.
    pub fn as_face(&self) -> Option<FaceKey> {
        match *self {
            TopologyKey::Face(k) => Some(k),
            _ => None,
        }
    }
}

/// Discriminant for topology entity types, ordered by aggregation level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TopologyType {
    Vertex = 0,
    Edge = 1,
    Wire = 2,
    Face = 3,
    Shell = 4,
    Solid = 5,
    CompSolid = 6,
    Compound = 7,
}

impl TopologyType {
    /// Every type, from the lowest aggregation level to the highest.
    pub const ALL: [TopologyType; 8] = [
        TopologyType::Vertex,
        TopologyType::Edge,
        TopologyType::Wire,
        TopologyType::Face,
        TopologyType::Shell,
        TopologyType::Solid,
        TopologyType::CompSolid,
        TopologyType::Compound,
    ];

    /// Returns the type name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            TopologyType::Vertex => "Vertex",
            TopologyType::Edge => "Edge",
            TopologyType::Wire => "Wire",
            TopologyType::Face => "Face",
            TopologyType::Shell => "Shell",
            TopologyType::Solid => "Solid",
            TopologyType::CompSolid => "CompSolid",
            TopologyType::Compound => "Compound",
        }
    }
}

impl std::fmt::Display for TopologyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Conversion impls from specific keys to TopologyKey
impl From<VertexKey> for TopologyKey {
    fn from(k: VertexKey) -> Self {
        TopologyKey::Vertex(k)
    }
}

impl From<EdgeKey> for TopologyKey {
    fn from(k: EdgeKey) -> Self {
        TopologyKey::Edge(k)
    }
}

impl From<WireKey> for TopologyKey {
    fn from(k: WireKey) -> Self {
        TopologyKey::Wire(k)
    }
}

impl From<FaceKey> for TopologyKey {
    fn from(k: FaceKey) -> Self {
        TopologyKey::Face(k)
    }
}

impl From<ShellKey> for TopologyKey {
    fn from(k: ShellKey) -> Self {
        TopologyKey::Shell(k)
    }
}

impl From<SolidKey> for TopologyKey {
    fn from(k: SolidKey) -> Self {
        TopologyKey::Solid(k)
    }
}

impl From<CompSolidKey> for TopologyKey {
    fn from(k: CompSolidKey) -> Self {
        TopologyKey::CompSolid(k)
    }
}

impl From<CompoundKey> for TopologyKey {
    fn from(k: CompoundKey) -> Self {
        TopologyKey::Compound(k)
    }
}
