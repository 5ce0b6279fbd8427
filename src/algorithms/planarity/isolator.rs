//! Obstruction isolation for non-embeddable graphs.
//!
//! The embedder proves non-embeddability; this module exhibits the
//! witness. Deleting every edge whose removal preserves non-embeddability
//! leaves an edge-minimal non-embeddable subgraph, which by Kuratowski's
//! theorem is exactly a subdivision of K5 or K3,3 (and for outerplanarity
//! a subdivision of K4 or K2,3). Each candidate deletion is decided by
//! re-running the linear-time engine on a scratch copy, which keeps the
//! isolator correct while staying entirely off the embedder's critical
//! path.

use std::collections::HashMap;

use log::debug;

use crate::data_structures::{Graph, GraphError};

use super::{run_edge_addition, CoreHooks, EmbedMode};

/// The topological obstruction families.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObstructionKind {
    K5,
    K33,
    K4,
    K23,
}

/// An isolated obstruction: a subdivision of `kind`, in input vertex ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Obstruction {
    pub kind: ObstructionKind,
    pub edges: Vec<(usize, usize)>,
}

/// Reduce a non-embeddable graph to an edge-minimal non-embeddable
/// subgraph and classify it.
pub fn isolate_obstruction(
    n: usize,
    edges: &[(usize, usize)],
    mode: EmbedMode,
) -> Result<Obstruction, GraphError> {
    if embeds(n, edges, mode)? {
        return Err(GraphError::InconsistentState(
            "obstruction isolation requested for an embeddable graph",
        ));
    }

    let mut kept = edges.to_vec();
    let mut idx = 0;
    while idx < kept.len() {
        let mut candidate = kept.clone();
        candidate.remove(idx);
        if embeds(n, &candidate, mode)? {
            // The edge is load-bearing for every remaining obstruction.
            idx += 1;
        } else {
            kept = candidate;
        }
    }
    debug!("obstruction isolated: {} of {} edges kept", kept.len(), edges.len());

    let kind = classify_subdivision(&kept).ok_or(GraphError::InconsistentState(
        "edge-minimal obstruction failed classification",
    ))?;
    let matches_mode = match mode {
        EmbedMode::Planar => matches!(kind, ObstructionKind::K5 | ObstructionKind::K33),
        EmbedMode::Outerplanar => matches!(kind, ObstructionKind::K4 | ObstructionKind::K23),
    };
    if !matches_mode {
        return Err(GraphError::InconsistentState(
            "isolated obstruction does not match the embedding mode",
        ));
    }
    Ok(Obstruction { kind, edges: kept })
}

fn embeds(n: usize, edges: &[(usize, usize)], mode: EmbedMode) -> Result<bool, GraphError> {
    let mut g = Graph::with_capacity(n, edges.len().max(1));
    g.add_edges(edges)?;
    run_edge_addition(&mut g, mode, &mut CoreHooks)
}

/// Decide which obstruction the given edge set is a subdivision of.
///
/// Degree-2 vertices are smoothed away (their two edges fuse into one,
/// multi-edges allowed); the smoothed multigraph is then matched against
/// K5, K3,3, K4 and the 3-dipole that a K2,3 subdivision smooths into.
/// Returns `None` for anything else.
pub fn classify_subdivision(edges: &[(usize, usize)]) -> Option<ObstructionKind> {
    if edges.is_empty() {
        return None;
    }

    // Compact relabeling so degrees fit in a dense table.
    let mut ids = HashMap::new();
    let mut compact = |v: usize, ids: &mut HashMap<usize, usize>| -> usize {
        let next = ids.len();
        *ids.entry(v).or_insert(next)
    };
    let mut multi: Vec<(usize, usize)> = edges
        .iter()
        .map(|&(u, v)| (compact(u, &mut ids), compact(v, &mut ids)))
        .collect();
    let k = ids.len();

    // Smooth all degree-2 vertices.
    loop {
        let mut deg = vec![0usize; k];
        for &(u, v) in &multi {
            deg[u] += 1;
            deg[v] += 1;
        }
        let Some(v) = (0..k).find(|&v| deg[v] == 2) else {
            break;
        };
        let incident: Vec<usize> = (0..multi.len())
            .filter(|&e| multi[e].0 == v || multi[e].1 == v)
            .collect();
        if incident.len() != 2 {
            // A self-loop at v; not a subdivision of anything sought.
            return None;
        }
        let other = |e: usize| {
            let (a, b) = multi[e];
            if a == v {
                b
            } else {
                a
            }
        };
        let (a, b) = (other(incident[0]), other(incident[1]));
        if a == v || b == v {
            return None;
        }
        multi.remove(incident[1]);
        multi.remove(incident[0]);
        multi.push((a, b));
    }

    let mut deg = vec![0usize; k];
    for &(u, v) in &multi {
        if u == v {
            return None;
        }
        deg[u] += 1;
        deg[v] += 1;
    }
    let branch: Vec<usize> = (0..k).filter(|&v| deg[v] > 0).collect();
    let ecount = multi.len();

    let mut normalized: Vec<(usize, usize)> = multi
        .iter()
        .map(|&(u, v)| (u.min(v), u.max(v)))
        .collect();
    normalized.sort_unstable();
    let simple = normalized.windows(2).all(|w| w[0] != w[1]);

    match (branch.len(), ecount) {
        (5, 10) if simple && branch.iter().all(|&v| deg[v] == 4) => Some(ObstructionKind::K5),
        (6, 9) if simple && branch.iter().all(|&v| deg[v] == 3) && is_bipartite(k, &multi) => {
            Some(ObstructionKind::K33)
        }
        (4, 6) if simple && branch.iter().all(|&v| deg[v] == 3) => Some(ObstructionKind::K4),
        (2, 3) if branch.iter().all(|&v| deg[v] == 3) => Some(ObstructionKind::K23),
        _ => None,
    }
}

fn is_bipartite(k: usize, edges: &[(usize, usize)]) -> bool {
    let mut adjacency = vec![Vec::new(); k];
    for &(u, v) in edges {
        adjacency[u].push(v);
        adjacency[v].push(u);
    }
    let mut color = vec![2u8; k];
    for start in 0..k {
        if color[start] != 2 || adjacency[start].is_empty() {
            continue;
        }
        color[start] = 0;
        let mut queue = vec![start];
        while let Some(u) = queue.pop() {
            for &v in &adjacency[u] {
                if color[v] == 2 {
                    color[v] = 1 - color[u];
                    queue.push(v);
                } else if color[v] == color[u] {
                    return false;
                }
            }
        }
    }
    true
}

#[cfg(test)]
mod test {
    use super::*;

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

    /// Replace each listed edge with a two-edge path through a new vertex.
    fn subdivide(edges: &[(usize, usize)], which: &[usize]) -> Vec<(usize, usize)> {
        let mut next = edges.iter().flat_map(|&(u, v)| [u, v]).max().unwrap() + 1;
        let mut result = Vec::new();
        for (idx, &(u, v)) in edges.iter().enumerate() {
            if which.contains(&idx) {
                result.push((u, next));
                result.push((next, v));
                next += 1;
            } else {
                result.push((u, v));
            }
        }
        result
    }

    #[test]
    fn test_classify_exact_obstructions() {
        assert_eq!(classify_subdivision(&complete(5)), Some(ObstructionKind::K5));
        assert_eq!(
            classify_subdivision(&complete_bipartite(3, 3)),
            Some(ObstructionKind::K33)
        );
        assert_eq!(classify_subdivision(&complete(4)), Some(ObstructionKind::K4));
        assert_eq!(
            classify_subdivision(&complete_bipartite(2, 3)),
            Some(ObstructionKind::K23)
        );
    }

    #[test]
    fn test_classify_subdivided_obstructions() {
        let k5 = subdivide(&complete(5), &[0, 3, 7]);
        assert_eq!(classify_subdivision(&k5), Some(ObstructionKind::K5));

        let k33 = subdivide(&complete_bipartite(3, 3), &[1, 2, 8]);
        assert_eq!(classify_subdivision(&k33), Some(ObstructionKind::K33));

        let k23 = subdivide(&complete_bipartite(2, 3), &[0, 5]);
        assert_eq!(classify_subdivision(&k23), Some(ObstructionKind::K23));
    }

    #[test]
    fn test_classify_rejects_non_obstructions() {
        // A cycle smooths into a self-loop.
        assert_eq!(classify_subdivision(&[(0, 1), (1, 2), (2, 0)]), None);
        // K5 minus an edge is planar and matches no obstruction shape.
        let mut k5 = complete(5);
        k5.pop();
        assert_eq!(classify_subdivision(&k5), None);
        assert_eq!(classify_subdivision(&[]), None);
    }

    #[test]
    fn test_isolate_from_k5_is_identity() {
        let obstruction = isolate_obstruction(5, &complete(5), EmbedMode::Planar).unwrap();
        assert_eq!(obstruction.kind, ObstructionKind::K5);
        assert_eq!(obstruction.edges.len(), 10);
    }

    #[test]
    fn test_isolate_from_k5_plus_planar_clutter() {
        // K5 on {0..5} plus a pendant path; only the K5 edges survive.
        let mut edges = complete(5);
        edges.extend_from_slice(&[(4, 5), (5, 6), (6, 0)]);
        let obstruction = isolate_obstruction(7, &edges, EmbedMode::Planar).unwrap();
        assert_eq!(obstruction.kind, ObstructionKind::K5);
        assert_eq!(obstruction.edges.len(), 10);
        assert!(obstruction.edges.iter().all(|&(u, v)| u < 5 && v < 5));
    }

    #[test]
    fn test_isolate_outerplanar_obstruction_from_k4() {
        let obstruction = isolate_obstruction(4, &complete(4), EmbedMode::Outerplanar).unwrap();
        assert_eq!(obstruction.kind, ObstructionKind::K4);
        assert_eq!(obstruction.edges.len(), 6);
    }

    #[test]
    fn test_isolate_rejects_embeddable_input() {
        assert!(isolate_obstruction(3, &[(0, 1), (1, 2)], EmbedMode::Planar).is_err());
    }
}
