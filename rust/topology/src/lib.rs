// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # B-rep Topology
//!
//! Arena-based boundary-representation topology: vertices, edges, wires,
//! faces, shells, solids, comp-solids and compounds stored in slot maps, with
//! a parent index kept in step with every edit.
//!
//! A built [`TopologyArena`] is frozen into a [`Shape`], an immutable snapshot
//! that analyzers can share freely. Structural edits never touch a snapshot:
//! [`ReShape`] applies a batch of removals to a copy and returns a new one.

pub mod arena;
pub mod construction;
pub mod error;
pub mod keys;
pub mod rebuild;
pub mod shape;
pub mod traversal;

pub use arena::TopologyArena;
pub use construction::{make_face, make_polygon};
pub use error::{Error, Result};
pub use keys::{
    CompSolidKey, CompoundKey, EdgeKey, FaceKey, ShellKey, SolidKey, TopologyKey, TopologyType,
    VertexKey, WireKey,
};
pub use rebuild::ReShape;
pub use shape::Shape;
