// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Property tests over randomly assembled shapes.
//!
//! Shapes are made of triangles over a shared vertex pool (triangles reuse the
//! edge between two vertices), capped triangles whose wire runs through a
//! degenerated edge at one corner, free edges, free degenerated edges and
//! vertices nothing uses.

use proptest::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

use brep_analyze::{
    independent_edges, independent_vertices, IndependentShapeCheck, ShapeContent,
};
use brep_topology::{make_face, EdgeKey, Shape, TopologyArena, TopologyKey};

#[derive(Debug, Clone)]
struct Recipe {
    vertices: usize,
    triangles: Vec<(usize, usize, usize)>,
    /// `(i, apex, k)`: the wire pauses on a degenerated edge at `apex`.
    capped: Vec<(usize, usize, usize)>,
    free_edges: Vec<(usize, usize)>,
    degenerated: Vec<usize>,
}

fn recipe() -> impl Strategy<Value = Recipe> {
    (3usize..10).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec((0..n, 0..n, 0..n), 0..8),
            // Apexes come from two vertices so caps pile up on one pole
            prop::collection::vec((0..n, 0..2usize, 0..n), 0..6),
            prop::collection::vec((0..n, 0..n), 0..5),
            prop::collection::vec(0..n, 0..3),
        )
            .prop_map(|(vertices, triangles, capped, free_edges, degenerated)| Recipe {
                vertices,
                triangles,
                capped,
                free_edges,
                degenerated,
            })
    })
}

fn distinct(&(i, j, k): &(usize, usize, usize)) -> bool {
    i != j && j != k && k != i
}

/// Edges between two pool vertices bordering more than two faces.
fn crowded_edges(recipe: &Recipe) -> usize {
    let mut uses: FxHashMap<(usize, usize), usize> = FxHashMap::default();
    for &(i, j, k) in recipe.triangles.iter().chain(&recipe.capped).filter(|t| distinct(t)) {
        for (a, b) in [(i, j), (j, k), (k, i)] {
            *uses.entry((a.min(b), a.max(b))).or_default() += 1;
        }
    }
    uses.values().filter(|&&n| n > 2).count()
}

/// Distinct apexes of the capped triangles that get built.
fn poles(recipe: &Recipe) -> usize {
    recipe
        .capped
        .iter()
        .filter(|t| distinct(t))
        .map(|&(_, apex, _)| apex)
        .collect::<FxHashSet<_>>()
        .len()
}

fn build(recipe: &Recipe) -> Shape {
    let mut arena = TopologyArena::new();
    let vs: Vec<_> = (0..recipe.vertices)
        .map(|i| arena.add_vertex(i as f64, (i * i) as f64, 0.0))
        .collect();

    let mut shared: FxHashMap<(usize, usize), EdgeKey> = FxHashMap::default();
    let mut edge = |arena: &mut TopologyArena, i: usize, j: usize| {
        let pair = (i.min(j), i.max(j));
        *shared
            .entry(pair)
            .or_insert_with(|| arena.add_edge(vs[pair.0], vs[pair.1]).unwrap())
    };

    for &(i, j, k) in recipe.triangles.iter().filter(|t| distinct(t)) {
        let e0 = edge(&mut arena, i, j);
        let e1 = edge(&mut arena, j, k);
        let e2 = edge(&mut arena, k, i);
        make_face(&mut arena, &[e0, e1, e2]).unwrap();
    }
    let mut apex_edges: FxHashMap<usize, EdgeKey> = FxHashMap::default();
    for &(i, apex, k) in recipe.capped.iter().filter(|t| distinct(t)) {
        let e0 = edge(&mut arena, i, apex);
        let pole = *apex_edges
            .entry(apex)
            .or_insert_with(|| arena.add_degenerated_edge(vs[apex]).unwrap());
        let e1 = edge(&mut arena, apex, k);
        let e2 = edge(&mut arena, k, i);
        make_face(&mut arena, &[e0, pole, e1, e2]).unwrap();
    }
    for &(i, j) in &recipe.free_edges {
        arena.add_edge(vs[i], vs[j]).unwrap();
    }
    for &i in &recipe.degenerated {
        arena.add_degenerated_edge(vs[i]).unwrap();
    }

    Shape::new(arena)
}

fn endpoints(shape: &Shape, edges: &[TopologyKey]) -> FxHashSet<TopologyKey> {
    let Some(arena) = shape.arena() else {
        return FxHashSet::default();
    };
    edges
        .iter()
        .filter_map(|k| k.as_edge())
        .filter_map(|e| arena.edge_vertices(e))
        .flat_map(|(a, b)| [TopologyKey::Vertex(a), TopologyKey::Vertex(b)])
        .collect()
}

proptest! {
    #[test]
    fn perform_is_idempotent(r in recipe()) {
        let mut check = IndependentShapeCheck::new(build(&r));
        check.perform();
        let first = check.report().cloned();
        check.perform();
        prop_assert_eq!(check.report().cloned(), first);
    }

    #[test]
    fn counts_match_lists(r in recipe()) {
        let mut check = IndependentShapeCheck::new(build(&r));
        check.perform();
        prop_assert_eq!(check.independent_edge_count(), Some(check.independent_edges().len()));
        prop_assert_eq!(check.independent_vertex_count(), Some(check.independent_vertices().len()));
        // Triangle edges and poles all bound a face
        prop_assert_eq!(check.independent_edges().len(), r.free_edges.len() + r.degenerated.len());
    }

    #[test]
    fn edge_removal_leaves_no_orphan_edge_and_keeps_faces(r in recipe()) {
        let shape = build(&r);
        let check = IndependentShapeCheck::new(shape.clone());
        let rebuilt = check.removed_independent_edges();

        prop_assert!(independent_edges(&rebuilt).is_empty());
        if let (Some(before), Some(after)) = (shape.arena(), rebuilt.arena()) {
            prop_assert_eq!(before.face_count(), after.face_count());
            for face in before.face_keys() {
                prop_assert_eq!(before.face_edges(face), after.face_edges(face));
            }
            prop_assert!(after.entity_count() <= before.entity_count());
        }
    }

    #[test]
    fn vertex_then_edge_removal_is_safe(r in recipe()) {
        let shape = build(&r);
        let removed_edges = independent_edges(&shape);
        let check = IndependentShapeCheck::new(shape.clone());
        let rebuilt = check.removed_independent_shapes();

        prop_assert!(independent_edges(&rebuilt).is_empty());
        let freed = endpoints(&shape, &removed_edges);
        for vertex in independent_vertices(&rebuilt) {
            prop_assert!(freed.contains(&vertex));
        }
    }

    #[test]
    fn vertex_removal_never_orphans_edges(r in recipe()) {
        let shape = build(&r);
        let check = IndependentShapeCheck::new(shape.clone());
        let rebuilt = check.removed_independent_vertices();

        prop_assert!(independent_vertices(&rebuilt).is_empty());
        prop_assert_eq!(independent_edges(&rebuilt), independent_edges(&shape));
    }

    #[test]
    fn degenerated_and_non_manifold_edges_are_disjoint(r in recipe()) {
        let content = ShapeContent::new(build(&r));
        prop_assert!(content.is_done());
        prop_assert_eq!(content.nb_degenerated_edges(), r.degenerated.len() + poles(&r));
        // A pole under three or more caps is still not non-manifold
        prop_assert_eq!(content.nb_non_manifold_edges(), crowded_edges(&r));
        prop_assert!(
            content.nb_degenerated_edges() + content.nb_non_manifold_edges() <= content.nb_edges()
        );
    }
}
