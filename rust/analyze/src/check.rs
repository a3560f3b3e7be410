// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stateful wrapper around orphan detection and removal.
//!
//! [`IndependentShapeCheck`] holds one shape, remembers the last detection
//! results and can swap its shape for a rebuilt one. Detection results are
//! not refreshed by the `remove_*` methods; call [`IndependentShapeCheck::perform`]
//! again to analyze the rebuilt shape.

use serde::Serialize;

use brep_topology::{Shape, TopologyKey};

use crate::config::AnalyzeConfig;
use crate::error::CheckError;
use crate::input::ShapeInput;
use crate::orphans::{self, OrphanReport};

/// Lifecycle of an [`IndependentShapeCheck`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CheckState {
    /// Valid shape, not analyzed yet.
    Uninitialized,
    /// Constructed on a null shape. Never left.
    Error,
    /// `perform` has run on a valid shape.
    Analyzed,
}

/// Maps an optional count to the signed form where `-1` means "not computed".
pub fn count_or_sentinel(count: Option<usize>) -> i64 {
    count.map_or(-1, |n| i64::try_from(n).unwrap_or(i64::MAX))
}

/// Finds and strips edges bounding no face and vertices ending no edge.
#[derive(Debug, Clone)]
pub struct IndependentShapeCheck {
    input: ShapeInput,
    config: AnalyzeConfig,
    report: Option<OrphanReport>,
}

impl IndependentShapeCheck {
    /// Wraps `shape` with the default configuration. Nothing is detected
    /// until [`Self::perform`].
    pub fn new(shape: Shape) -> Self {
        Self::with_config(shape, AnalyzeConfig::default())
    }

    /// Wraps `shape` with `config`. A null shape puts the check in the error
    /// state.
    pub fn with_config(shape: Shape, config: AnalyzeConfig) -> Self {
        let input = ShapeInput::new(shape);
        if input.error().is_some() {
            tracing::warn!("Independent shape check constructed on a null shape");
        }
        Self {
            input,
            config,
            report: None,
        }
    }

    /// Where the check stands.
    pub fn state(&self) -> CheckState {
        match (&self.input, &self.report) {
            (ShapeInput::Invalid(_), _) => CheckState::Error,
            (ShapeInput::Ready(_), None) => CheckState::Uninitialized,
            (ShapeInput::Ready(_), Some(_)) => CheckState::Analyzed,
        }
    }

    /// Detects independent edges and vertices of the held shape.
    ///
    /// Does nothing in the error state. Running it again on the same shape
    /// gives the same lists.
    pub fn perform(&mut self) {
        let Ok(shape) = self.input.ready() else {
            return;
        };
        let report = OrphanReport::collect(shape);

        tracing::debug!(
            independent_edges = report.edge_count(),
            independent_vertices = report.vertex_count(),
            "Independent shape check performed"
        );
        if self.config.trace_entities {
            for key in report.edges.iter().chain(&report.vertices) {
                tracing::trace!(entity = ?key, "Independent entity");
            }
        }

        self.report = Some(report);
    }

    /// Independent edges found by the last `perform`, empty if none ran.
    pub fn independent_edges(&self) -> &[TopologyKey] {
        self.report.as_ref().map_or(&[][..], |r| r.edges.as_slice())
    }

    /// Independent vertices found by the last `perform`, empty if none ran.
    pub fn independent_vertices(&self) -> &[TopologyKey] {
        self.report.as_ref().map_or(&[][..], |r| r.vertices.as_slice())
    }

    /// Number of independent edges, `None` until computed.
    pub fn independent_edge_count(&self) -> Option<usize> {
        self.report.as_ref().map(OrphanReport::edge_count)
    }

    /// Number of independent vertices, `None` until computed.
    pub fn independent_vertex_count(&self) -> Option<usize> {
        self.report.as_ref().map(OrphanReport::vertex_count)
    }

    /// Both lists from the last `perform`.
    pub fn report(&self) -> Option<&OrphanReport> {
        self.report.as_ref()
    }

    /// The held shape without its independent edges. The held shape is kept.
    pub fn removed_independent_edges(&self) -> Shape {
        self.rebuilt_with(orphans::removed_independent_edges)
    }

    /// The held shape without its independent vertices. The held shape is kept.
    pub fn removed_independent_vertices(&self) -> Shape {
        self.rebuilt_with(orphans::removed_independent_vertices)
    }

    /// The held shape without independent vertices, then without the
    /// independent edges left after that. The held shape is kept.
    pub fn removed_independent_shapes(&self) -> Shape {
        self.rebuilt_with(orphans::removed_independent_shapes)
    }

    /// Replaces the held shape with [`Self::removed_independent_edges`].
    pub fn remove_independent_edges(&mut self) {
        self.replace_with(orphans::removed_independent_edges);
    }

    /// Replaces the held shape with [`Self::removed_independent_vertices`].
    pub fn remove_independent_vertices(&mut self) {
        self.replace_with(orphans::removed_independent_vertices);
    }

    /// Replaces the held shape with [`Self::removed_independent_shapes`].
    pub fn remove_independent_shapes(&mut self) {
        self.replace_with(orphans::removed_independent_shapes);
    }

    /// The held shape. Null in the error state.
    pub fn shape(&self) -> &Shape {
        self.input.shape()
    }

    /// Consumes the check and returns the held shape.
    pub fn into_shape(self) -> Shape {
        self.input.into_shape()
    }

    /// `true` once both counts are computed on a valid shape.
    pub fn is_done(&self) -> bool {
        self.input.error().is_none()
            && self.independent_edge_count().is_some()
            && self.independent_vertex_count().is_some()
    }

    /// [`CheckError::InvalidShape`] when the input was null.
    pub fn error(&self) -> Option<CheckError> {
        self.input.error()
    }

    fn rebuilt_with(&self, rebuild: fn(&Shape) -> Shape) -> Shape {
        match &self.input {
            ShapeInput::Ready(shape) => rebuild(shape),
            ShapeInput::Invalid(shape) => shape.clone(),
        }
    }

    fn replace_with(&mut self, rebuild: fn(&Shape) -> Shape) {
        // A rebuild may empty the shape; it stays Ready, detection on it is empty
        if let ShapeInput::Ready(shape) = &self.input {
            let rebuilt = rebuild(shape);
            self.input = ShapeInput::Ready(rebuilt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brep_topology::{make_polygon, TopologyArena};

    fn square_and_stray_edge() -> Shape {
        let mut arena = TopologyArena::new();
        let v0 = arena.add_vertex(0.0, 0.0, 0.0);
        let v1 = arena.add_vertex(1.0, 0.0, 0.0);
        let v2 = arena.add_vertex(1.0, 1.0, 0.0);
        let v3 = arena.add_vertex(0.0, 1.0, 0.0);
        make_polygon(&mut arena, [v0, v1, v2, v3]).unwrap();
        let a = arena.add_vertex(5.0, 0.0, 0.0);
        let b = arena.add_vertex(6.0, 0.0, 0.0);
        arena.add_edge(a, b).unwrap();
        Shape::new(arena)
    }

    #[test]
    fn lifecycle_on_valid_shape() {
        let mut check = IndependentShapeCheck::new(square_and_stray_edge());
        assert_eq!(check.state(), CheckState::Uninitialized);
        assert!(!check.is_done());
        assert_eq!(check.independent_edge_count(), None);
        assert!(check.independent_edges().is_empty());

        check.perform();
        assert_eq!(check.state(), CheckState::Analyzed);
        assert!(check.is_done());
        assert_eq!(check.independent_edge_count(), Some(1));
        assert_eq!(check.independent_vertex_count(), Some(0));
        assert_eq!(check.error(), None);
    }

    #[test]
    fn null_shape_is_a_sticky_error() {
        let mut check = IndependentShapeCheck::new(Shape::null());
        assert_eq!(check.state(), CheckState::Error);
        assert_eq!(check.error(), Some(CheckError::InvalidShape));

        check.perform();
        check.remove_independent_shapes();
        assert_eq!(check.state(), CheckState::Error);
        assert!(!check.is_done());
        assert_eq!(count_or_sentinel(check.independent_edge_count()), -1);
        assert_eq!(count_or_sentinel(check.independent_vertex_count()), -1);
        assert!(check.shape().is_null());
        assert!(check.removed_independent_edges().is_null());
    }

    #[test]
    fn pure_removal_keeps_held_shape() {
        let shape = square_and_stray_edge();
        let check = IndependentShapeCheck::new(shape.clone());

        let rebuilt = check.removed_independent_edges();
        assert!(check.shape().is_same(&shape));
        assert!(!rebuilt.is_same(&shape));
        assert_eq!(rebuilt.arena().unwrap().edge_count(), 4);
    }

    #[test]
    fn removal_replaces_shape_but_not_results() {
        let mut check = IndependentShapeCheck::new(square_and_stray_edge());
        check.perform();
        check.remove_independent_edges();

        // Results describe the shape as it was when performed
        assert_eq!(check.independent_edge_count(), Some(1));
        assert_eq!(check.shape().arena().unwrap().edge_count(), 4);

        check.perform();
        assert_eq!(check.independent_edge_count(), Some(0));
        assert_eq!(check.independent_vertex_count(), Some(2));
    }

    #[test]
    fn removing_everything_leaves_an_empty_analysis() {
        let mut arena = TopologyArena::new();
        arena.add_vertex(0.0, 0.0, 0.0);
        let mut check = IndependentShapeCheck::new(Shape::new(arena));

        check.remove_independent_vertices();
        assert!(check.shape().is_null());
        assert_eq!(check.error(), None);

        check.perform();
        assert!(check.is_done());
        assert_eq!(check.independent_vertex_count(), Some(0));
    }

    #[test]
    fn sentinel_form() {
        assert_eq!(count_or_sentinel(None), -1);
        assert_eq!(count_or_sentinel(Some(0)), 0);
        assert_eq!(count_or_sentinel(Some(7)), 7);
    }

    #[test]
    fn tracing_entities_does_not_change_results() {
        let config = AnalyzeConfig {
            trace_entities: true,
            ..AnalyzeConfig::default()
        };
        let mut check = IndependentShapeCheck::with_config(square_and_stray_edge(), config);
        check.perform();
        assert_eq!(check.report().unwrap().edge_count(), 1);
    }
}
