use rstest::rstest;

use crate::data_structures::{Graph, NIL};

use super::*;

fn graph_of(n: usize, edges: &[(usize, usize)]) -> Graph {
    let mut g = Graph::new(n);
    g.add_edges(edges).unwrap();
    g
}

/// Embed, check the result against the pristine input, hand both back.
fn embed_and_verify(n: usize, edges: &[(usize, usize)], mode: EmbedMode) -> (Graph, EmbedOutcome) {
    let mut g = graph_of(n, edges);
    let orig = g.clone();
    let outcome = embed(&mut g, mode).unwrap();
    verify_embed_result(&g, &orig, &outcome, mode).unwrap();
    (g, outcome)
}

fn complete(n: usize) -> Vec<(usize, usize)> {
    let mut edges = Vec::new();
    for u in 0..n {
        for v in u + 1..n {
            edges.push((u, v));
        }
    }
    edges
}

fn complete_bipartite(a: usize, b: usize) -> Vec<(usize, usize)> {
    let mut edges = Vec::new();
    for u in 0..a {
        for v in 0..b {
            edges.push((u, a + v));
        }
    }
    edges
}

#[test]
fn test_triangle_embeds_with_two_faces() {
    let (g, outcome) = embed_and_verify(3, &[(0, 1), (1, 2), (0, 2)], EmbedMode::Planar);

    assert_eq!(outcome, EmbedOutcome::Embedded);
    assert_eq!(face_count(&g).unwrap(), 2);

    // Every rotation lists exactly the two other vertices (in DFI order
    // the ids coincide with the input ids here).
    for v in 0..3 {
        let mut neighbors: Vec<usize> = g.adjacency_arcs(v).map(|a| g.neighbor(a)).collect();
        neighbors.sort_unstable();
        let expected: Vec<usize> = (0..3).filter(|&u| u != v).collect();
        assert_eq!(neighbors, expected);
    }
}

#[test]
fn test_k4_is_planar_with_four_faces() {
    let (g, outcome) = embed_and_verify(4, &complete(4), EmbedMode::Planar);

    assert_eq!(outcome, EmbedOutcome::Embedded);
    assert_eq!(face_count(&g).unwrap(), 4);
}

#[test]
fn test_k4_is_not_outerplanar() {
    let (_, outcome) = embed_and_verify(4, &complete(4), EmbedMode::Outerplanar);

    let EmbedOutcome::NonEmbeddable(obstruction) = outcome else {
        panic!("K4 must not be outerplanar");
    };
    assert_eq!(obstruction.kind, ObstructionKind::K4);
    assert_eq!(obstruction.edges.len(), 6);
}

#[test]
fn test_k5_yields_itself_as_obstruction() {
    let (_, outcome) = embed_and_verify(5, &complete(5), EmbedMode::Planar);

    let EmbedOutcome::NonEmbeddable(obstruction) = outcome else {
        panic!("K5 must not be planar");
    };
    assert_eq!(obstruction.kind, ObstructionKind::K5);
    // No subdivision needed: the obstruction is the input itself.
    assert_eq!(obstruction.edges.len(), 10);
}

#[test]
fn test_k33_yields_itself_as_obstruction() {
    let (_, outcome) = embed_and_verify(6, &complete_bipartite(3, 3), EmbedMode::Planar);

    let EmbedOutcome::NonEmbeddable(obstruction) = outcome else {
        panic!("K3,3 must not be planar");
    };
    assert_eq!(obstruction.kind, ObstructionKind::K33);
    assert_eq!(obstruction.edges.len(), 9);
}

#[test]
fn test_path_embeds_with_one_face_in_both_modes() {
    let path = [(0, 1), (1, 2), (2, 3), (3, 4)];

    let (g, outcome) = embed_and_verify(5, &path, EmbedMode::Planar);
    assert_eq!(outcome, EmbedOutcome::Embedded);
    assert_eq!(face_count(&g).unwrap(), 1);

    let (g, outcome) = embed_and_verify(5, &path, EmbedMode::Outerplanar);
    assert_eq!(outcome, EmbedOutcome::Embedded);
    assert_eq!(face_count(&g).unwrap(), 1);
}

#[test]
fn test_two_disjoint_triangles_join_into_one_structure() {
    let edges = [(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5)];
    let (g, outcome) = embed_and_verify(6, &edges, EmbedMode::Planar);

    assert_eq!(outcome, EmbedOutcome::Embedded);
    // Two faces per component.
    assert_eq!(face_count(&g).unwrap(), 4);
    // The bicomp join consumed every root copy even though the graph is
    // disconnected.
    for r in 6..12 {
        assert_eq!(g.first_arc(r), NIL);
    }
}

#[test]
fn test_cycle_is_outerplanar() {
    let (g, outcome) = embed_and_verify(
        5,
        &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)],
        EmbedMode::Outerplanar,
    );
    assert_eq!(outcome, EmbedOutcome::Embedded);
    assert_eq!(face_count(&g).unwrap(), 2);
}

#[test]
fn test_k23_is_planar_but_not_outerplanar() {
    let k23 = complete_bipartite(2, 3);

    let (_, outcome) = embed_and_verify(5, &k23, EmbedMode::Planar);
    assert_eq!(outcome, EmbedOutcome::Embedded);

    let (_, outcome) = embed_and_verify(5, &k23, EmbedMode::Outerplanar);
    let EmbedOutcome::NonEmbeddable(obstruction) = outcome else {
        panic!("K2,3 must not be outerplanar");
    };
    assert_eq!(obstruction.kind, ObstructionKind::K23);
}

#[test]
fn test_petersen_graph_contains_k33() {
    let mut edges = vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)];
    edges.extend_from_slice(&[(5, 7), (7, 9), (9, 6), (6, 8), (8, 5)]);
    edges.extend((0..5).map(|i| (i, i + 5)));

    let (_, outcome) = embed_and_verify(10, &edges, EmbedMode::Planar);
    let EmbedOutcome::NonEmbeddable(obstruction) = outcome else {
        panic!("the Petersen graph must not be planar");
    };
    // Every vertex has degree 3, so no K5 subdivision fits.
    assert_eq!(obstruction.kind, ObstructionKind::K33);
}

#[test]
fn test_octahedron_is_planar() {
    // K2,2,2: all pairs except the three diagonals.
    let edges: Vec<(usize, usize)> = complete(6)
        .into_iter()
        .filter(|&e| ![(0, 1), (2, 3), (4, 5)].contains(&e))
        .collect();

    let (g, outcome) = embed_and_verify(6, &edges, EmbedMode::Planar);
    assert_eq!(outcome, EmbedOutcome::Embedded);
    assert_eq!(face_count(&g).unwrap(), 8);
}

#[test]
fn test_icosahedron_is_planar() {
    let mut edges = Vec::new();
    for i in 1..=5 {
        edges.push((0, i));
        edges.push((i, i % 5 + 1));
        edges.push((i, i + 5));
        edges.push((i, i % 5 + 6));
        edges.push((i + 5, i % 5 + 6));
        edges.push((11, i + 5));
    }

    let (g, outcome) = embed_and_verify(12, &edges, EmbedMode::Planar);
    assert_eq!(outcome, EmbedOutcome::Embedded);
    assert_eq!(g.edge_count(), 30);
    assert_eq!(face_count(&g).unwrap(), 20);
}

#[test]
fn test_grid_is_planar() {
    let side = 4;
    let at = |r: usize, c: usize| r * side + c;
    let mut edges = Vec::new();
    for r in 0..side {
        for c in 0..side {
            if c + 1 < side {
                edges.push((at(r, c), at(r, c + 1)));
            }
            if r + 1 < side {
                edges.push((at(r, c), at(r + 1, c)));
            }
        }
    }

    let (g, outcome) = embed_and_verify(16, &edges, EmbedMode::Planar);
    assert_eq!(outcome, EmbedOutcome::Embedded);
    // 16 vertices, 24 edges: 10 faces.
    assert_eq!(face_count(&g).unwrap(), 10);
}

#[rstest]
#[case(1, true)]
#[case(2, true)]
#[case(3, true)]
#[case(4, true)]
#[case(5, false)]
#[case(6, false)]
fn test_complete_graph_planarity(#[case] n: usize, #[case] planar: bool) {
    let (_, outcome) = embed_and_verify(n, &complete(n), EmbedMode::Planar);
    assert_eq!(matches!(outcome, EmbedOutcome::Embedded), planar);
}

#[rstest]
#[case(2, 2, true)]
#[case(2, 5, true)]
#[case(3, 3, false)]
#[case(3, 4, false)]
fn test_complete_bipartite_planarity(#[case] a: usize, #[case] b: usize, #[case] planar: bool) {
    let (_, outcome) = embed_and_verify(a + b, &complete_bipartite(a, b), EmbedMode::Planar);
    assert_eq!(matches!(outcome, EmbedOutcome::Embedded), planar);
}

#[test]
fn test_embedding_is_idempotent_after_reinitialize() {
    let edges = complete(4);
    let mut g = graph_of(4, &edges);

    let first = embed(&mut g, EmbedMode::Planar).unwrap();
    g.reinitialize();
    let second = embed(&mut g, EmbedMode::Planar).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_embedding_twice_without_reinitialize_is_rejected() {
    let mut g = graph_of(3, &[(0, 1), (1, 2)]);

    embed(&mut g, EmbedMode::Planar).unwrap();
    assert!(embed(&mut g, EmbedMode::Planar).is_err());
}

#[test]
fn test_sort_back_restores_input_order() {
    let edges = [(2, 0), (0, 3), (3, 2), (1, 3)];
    let mut g = graph_of(4, &edges);
    let orig = g.clone();

    let outcome = embed(&mut g, EmbedMode::Planar).unwrap();
    assert_eq!(outcome, EmbedOutcome::Embedded);

    g.sort_vertices().unwrap();
    assert!(!g.is_sorted_by_dfi());
    verify_embed_result(&g, &orig, &outcome, EmbedMode::Planar).unwrap();

    // In input order the embedded arcs name the input neighbors directly.
    for v in 0..4 {
        let mut neighbors: Vec<usize> = g.adjacency_arcs(v).map(|a| g.neighbor(a)).collect();
        neighbors.sort_unstable();
        let mut expected: Vec<usize> = edges
            .iter()
            .filter_map(|&(a, b)| {
                if a == v {
                    Some(b)
                } else if b == v {
                    Some(a)
                } else {
                    None
                }
            })
            .collect();
        expected.sort_unstable();
        assert_eq!(neighbors, expected, "neighbors of input vertex {}", v);
    }
}

#[test]
fn test_edgeless_and_tiny_graphs() {
    let (g, outcome) = embed_and_verify(4, &[], EmbedMode::Planar);
    assert_eq!(outcome, EmbedOutcome::Embedded);
    assert_eq!(face_count(&g).unwrap(), 0);

    let (g, outcome) = embed_and_verify(2, &[(0, 1)], EmbedMode::Planar);
    assert_eq!(outcome, EmbedOutcome::Embedded);
    assert_eq!(face_count(&g).unwrap(), 1);
}

#[test]
fn test_nonplanar_with_planar_clutter_keeps_obstruction_edges_within_input() {
    // K3,3 with one subdivided edge plus a planar appendage.
    let mut edges = complete_bipartite(3, 3);
    edges.retain(|&e| e != (0, 3));
    edges.extend_from_slice(&[(0, 6), (6, 3), (6, 7), (7, 8)]);

    let (_, outcome) = embed_and_verify(9, &edges, EmbedMode::Planar);
    let EmbedOutcome::NonEmbeddable(obstruction) = outcome else {
        panic!("subdivided K3,3 must not be planar");
    };
    assert_eq!(obstruction.kind, ObstructionKind::K33);
    assert_eq!(obstruction.edges.len(), 10);
}
