// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shape content statistics.
//!
//! Counts entities per kind, plus the edges worth a second look: degenerated
//! edges (no 3D curve) and non-manifold edges (shared by too many faces).

use rustc_hash::FxHashSet;
use serde::Serialize;

use brep_topology::{Shape, TopologyArena, TopologyKey, TopologyType};

use crate::adjacency::{map_shapes_and_ancestors, AncestorQuery};
use crate::config::AnalyzeConfig;
use crate::error::CheckError;
use crate::input::ShapeInput;

/// Counters computed by [`ShapeContent`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ContentReport {
    pub nb_compounds: usize,
    pub nb_comp_solids: usize,
    pub nb_solids: usize,
    pub nb_shells: usize,
    pub nb_faces: usize,
    pub nb_wires: usize,
    pub nb_edges: usize,
    pub nb_vertices: usize,
    /// Edges flagged as degenerated.
    pub nb_degenerated_edges: usize,
    /// Non-degenerated edges bordering more faces than the configured limit.
    pub nb_non_manifold_edges: usize,
    /// Faces in no shell.
    pub nb_free_faces: usize,
    /// Wires bounding no face.
    pub nb_free_wires: usize,
    /// Edges in no wire.
    pub nb_free_edges: usize,
    /// Vertices ending no edge.
    pub nb_free_vertices: usize,
}

impl ContentReport {
    /// Computes every counter for `shape`. A null shape gives all zeros.
    pub fn compute(shape: &Shape, config: &AnalyzeConfig) -> Self {
        let Some(arena) = shape.arena() else {
            return Self::default();
        };

        let [nb_free_faces, nb_free_wires, nb_free_edges, nb_free_vertices] = free_counts(arena);
        let nb_non_manifold_edges =
            count_non_manifold_edges(shape, arena, config.non_manifold_face_limit);

        Self {
            nb_compounds: arena.count_of_type(TopologyType::Compound),
            nb_comp_solids: arena.count_of_type(TopologyType::CompSolid),
            nb_solids: arena.count_of_type(TopologyType::Solid),
            nb_shells: arena.count_of_type(TopologyType::Shell),
            nb_faces: arena.count_of_type(TopologyType::Face),
            nb_wires: arena.count_of_type(TopologyType::Wire),
            nb_edges: arena.count_of_type(TopologyType::Edge),
            nb_vertices: arena.count_of_type(TopologyType::Vertex),
            nb_degenerated_edges: arena.edge_keys().filter(|&e| arena.is_degenerated(e)).count(),
            nb_non_manifold_edges,
            nb_free_faces,
            nb_free_wires,
            nb_free_edges,
            nb_free_vertices,
        }
    }
}

/// Faces, wires, edges and vertices that no entity one level up lists, from
/// one walk over the shells, faces, wires and edges.
fn free_counts(arena: &TopologyArena) -> [usize; 4] {
    const LEVELS: [TopologyType; 4] = [
        TopologyType::Face,
        TopologyType::Wire,
        TopologyType::Edge,
        TopologyType::Vertex,
    ];

    let mut used: FxHashSet<TopologyKey> = FxHashSet::default();
    for container in [
        TopologyType::Shell,
        TopologyType::Face,
        TopologyType::Wire,
        TopologyType::Edge,
    ] {
        for key in arena.keys_of_type(container) {
            used.extend(arena.sub_shapes(key));
        }
    }

    LEVELS.map(|ty| {
        arena
            .keys_of_type(ty)
            .into_iter()
            .filter(|key| !used.contains(key))
            .count()
    })
}

fn count_non_manifold_edges(shape: &Shape, arena: &TopologyArena, face_limit: usize) -> usize {
    map_shapes_and_ancestors(shape, AncestorQuery::EDGE_FACE)
        .iter()
        .filter(|(key, faces)| {
            let degenerated = key.as_edge().is_some_and(|e| arena.is_degenerated(e));
            !degenerated && faces.len() > face_limit
        })
        .count()
}

/// Read-only content analyzer over one shape.
///
/// Construction runs the analysis once; [`ShapeContent::perform`] reruns it.
#[derive(Debug, Clone)]
pub struct ShapeContent {
    input: ShapeInput,
    config: AnalyzeConfig,
    report: ContentReport,
    performed: bool,
}

impl ShapeContent {
    /// Analyzes `shape` with the default configuration.
    pub fn new(shape: Shape) -> Self {
        Self::with_config(shape, AnalyzeConfig::default())
    }

    /// Analyzes `shape` with `config`. A null shape is accepted and leaves
    /// every counter at zero.
    pub fn with_config(shape: Shape, config: AnalyzeConfig) -> Self {
        let input = ShapeInput::new(shape);
        if input.error().is_some() {
            tracing::warn!("Shape content constructed on a null shape");
        }
        let mut content = Self {
            input,
            config,
            report: ContentReport::default(),
            performed: false,
        };
        content.perform();
        content
    }

    /// Recomputes every counter from scratch.
    pub fn perform(&mut self) {
        self.clear();
        let Ok(shape) = self.input.ready() else {
            return;
        };
        self.report = ContentReport::compute(shape, &self.config);
        self.performed = true;

        tracing::debug!(
            compounds = self.report.nb_compounds,
            comp_solids = self.report.nb_comp_solids,
            degenerated_edges = self.report.nb_degenerated_edges,
            non_manifold_edges = self.report.nb_non_manifold_edges,
            "Shape content performed"
        );
    }

    /// Zeroes every counter.
    pub fn clear(&mut self) {
        self.report = ContentReport::default();
        self.performed = false;
    }

    /// Number of compounds.
    pub fn nb_compounds(&self) -> usize {
        self.report.nb_compounds
    }

    /// Number of comp-solids.
    pub fn nb_comp_solids(&self) -> usize {
        self.report.nb_comp_solids
    }

    /// Number of solids.
    pub fn nb_solids(&self) -> usize {
        self.report.nb_solids
    }

    /// Number of shells.
    pub fn nb_shells(&self) -> usize {
        self.report.nb_shells
    }

    /// Number of faces.
    pub fn nb_faces(&self) -> usize {
        self.report.nb_faces
    }

    /// Number of wires.
    pub fn nb_wires(&self) -> usize {
        self.report.nb_wires
    }

    /// Number of edges, degenerated ones included.
    pub fn nb_edges(&self) -> usize {
        self.report.nb_edges
    }

    /// Number of vertices.
    pub fn nb_vertices(&self) -> usize {
        self.report.nb_vertices
    }

    /// Number of edges without a 3D curve.
    pub fn nb_degenerated_edges(&self) -> usize {
        self.report.nb_degenerated_edges
    }

    /// Number of non-degenerated edges bordering more faces than
    /// [`AnalyzeConfig::non_manifold_face_limit`].
    pub fn nb_non_manifold_edges(&self) -> usize {
        self.report.nb_non_manifold_edges
    }

    /// Number of faces in no shell.
    pub fn nb_free_faces(&self) -> usize {
        self.report.nb_free_faces
    }

    /// Number of wires bounding no face.
    pub fn nb_free_wires(&self) -> usize {
        self.report.nb_free_wires
    }

    /// Number of edges in no wire.
    pub fn nb_free_edges(&self) -> usize {
        self.report.nb_free_edges
    }

    /// Number of vertices ending no edge.
    pub fn nb_free_vertices(&self) -> usize {
        self.report.nb_free_vertices
    }

    /// Every counter at once.
    pub fn report(&self) -> &ContentReport {
        &self.report
    }

    /// The analyzed shape.
    pub fn shape(&self) -> &Shape {
        self.input.shape()
    }

    /// `true` once the counters reflect a valid shape.
    pub fn is_done(&self) -> bool {
        self.performed && self.input.error().is_none()
    }

    /// [`CheckError::InvalidShape`] when the input was null.
    pub fn error(&self) -> Option<CheckError> {
        self.input.error()
    }
}
