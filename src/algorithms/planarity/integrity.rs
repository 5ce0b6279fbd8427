//! Verification of embedding results against the pristine input.

use std::collections::HashMap;
use std::fmt;

use crate::data_structures::{Graph, UnionFind, NIL};

use super::{classify_subdivision, EmbedMode, EmbedOutcome, Obstruction, ObstructionKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrityError(pub String);

impl fmt::Display for IntegrityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "integrity check failed: {}", self.0)
    }
}

impl std::error::Error for IntegrityError {}

/// Check an embedding result against the untouched original graph.
///
/// On an embedded result the adjacency lists must be structurally sound,
/// carry exactly the original edges and satisfy Euler's formula per
/// connected component. On a non-embeddable result the isolated subgraph
/// must consist of original edges and be a subdivision of an obstruction
/// admissible for the mode.
pub fn verify_embed_result(
    g: &Graph,
    orig: &Graph,
    outcome: &EmbedOutcome,
    mode: EmbedMode,
) -> Result<(), IntegrityError> {
    match outcome {
        EmbedOutcome::Embedded => verify_embedding(g, orig),
        EmbedOutcome::NonEmbeddable(obstruction) => verify_obstruction(obstruction, orig, mode),
    }
}

fn verify_embedding(g: &Graph, orig: &Graph) -> Result<(), IntegrityError> {
    let n = g.order();
    let m = g.edge_count();

    // Every root copy must have been consumed by merges or the final join.
    for r in n..2 * n {
        if g.first_arc(r) != NIL {
            return Err(IntegrityError(format!("root copy {} still holds arcs", r)));
        }
    }

    // Adjacency lists are consistent doubly linked lists of twinned arcs.
    let mut arc_count = 0;
    for v in 0..n {
        let forward: Vec<usize> = g.adjacency_arcs(v).collect();
        let mut backward = Vec::new();
        let mut j = g.last_arc(v);
        while j != NIL {
            backward.push(j);
            j = g.arcs[j].link[1];
        }
        backward.reverse();
        if forward != backward {
            return Err(IntegrityError(format!(
                "adjacency list of vertex {} differs between directions",
                v
            )));
        }
        for &a in &forward {
            if g.twin(g.twin(a)) != a || g.arc_owner(a) != v {
                return Err(IntegrityError(format!("arc {} violates the twin law", a)));
            }
        }
        arc_count += forward.len();
    }
    if arc_count != 2 * m {
        return Err(IntegrityError(format!(
            "{} arcs linked, expected {}",
            arc_count,
            2 * m
        )));
    }

    // The embedding carries exactly the original edges, modulo the vertex
    // order the result happens to be in.
    let to_input_id: Vec<usize> = (0..n)
        .map(|p| if g.is_sorted_by_dfi() { g.vertices[p].index } else { p })
        .collect();
    let mut embedded_edges = Vec::with_capacity(m);
    for a in (0..2 * m).step_by(2) {
        let u = to_input_id[g.neighbor(a ^ 1)];
        let v = to_input_id[g.neighbor(a)];
        embedded_edges.push((u.min(v), u.max(v)));
    }
    embedded_edges.sort_unstable();
    let mut original_edges = normalized(orig.edges());
    original_edges.sort_unstable();
    if embedded_edges != original_edges {
        return Err(IntegrityError(String::from(
            "embedded edge set differs from the input edge set",
        )));
    }

    // Euler's formula, componentwise: every component with at least one
    // edge contributes 2 + E - V faces to the orbit count.
    let faces = face_count(g)?;
    let expected = expected_face_total(orig);
    if faces != expected {
        return Err(IntegrityError(format!(
            "rotation system traces {} faces, Euler's formula requires {}",
            faces, expected
        )));
    }
    Ok(())
}

/// Count the faces of the rotation system by tracing arc orbits: from an
/// arc into `v`, the face continues with the arc after its twin in `v`'s
/// cyclic adjacency order.
pub fn face_count(g: &Graph) -> Result<usize, IntegrityError> {
    let total_arcs = 2 * g.edge_count();
    let mut seen = vec![false; total_arcs];
    let mut faces = 0;

    for start in 0..total_arcs {
        if seen[start] {
            continue;
        }
        faces += 1;
        let mut a = start;
        let mut steps = 0;
        loop {
            seen[a] = true;
            let twin = g.twin(a);
            let v = g.neighbor(a);
            let next = g.arcs[twin].link[0];
            a = if next == NIL { g.first_arc(v) } else { next };
            if a == start {
                break;
            }
            if a == NIL || seen[a] {
                return Err(IntegrityError(String::from(
                    "face walk does not close into a simple orbit",
                )));
            }
            steps += 1;
            if steps > total_arcs {
                return Err(IntegrityError(String::from("face walk does not terminate")));
            }
        }
    }
    Ok(faces)
}

fn expected_face_total(orig: &Graph) -> usize {
    let n = orig.order();
    let mut components = UnionFind::new(n);
    for &(u, v) in orig.edges() {
        components.union(u, v);
    }

    let mut per_component: HashMap<usize, (usize, usize)> = HashMap::new();
    let mut incident = vec![false; n];
    for &(u, v) in orig.edges() {
        incident[u] = true;
        incident[v] = true;
        per_component.entry(components.find(u)).or_default().1 += 1;
    }
    for v in 0..n {
        if incident[v] {
            per_component.entry(components.find(v)).or_default().0 += 1;
        }
    }
    per_component
        .values()
        .map(|&(vertices, edges)| 2 + edges - vertices)
        .sum()
}

fn verify_obstruction(
    obstruction: &Obstruction,
    orig: &Graph,
    mode: EmbedMode,
) -> Result<(), IntegrityError> {
    let original: Vec<(usize, usize)> = normalized(orig.edges());
    for &(u, v) in &normalized(&obstruction.edges) {
        if !original.contains(&(u, v)) {
            return Err(IntegrityError(format!(
                "obstruction edge ({}, {}) is not an input edge",
                u, v
            )));
        }
    }

    let admissible = match mode {
        EmbedMode::Planar => matches!(obstruction.kind, ObstructionKind::K5 | ObstructionKind::K33),
        EmbedMode::Outerplanar => {
            matches!(obstruction.kind, ObstructionKind::K4 | ObstructionKind::K23)
        }
    };
    if !admissible {
        return Err(IntegrityError(format!(
            "obstruction kind {:?} is not admissible for {:?}",
            obstruction.kind, mode
        )));
    }

    if classify_subdivision(&obstruction.edges) != Some(obstruction.kind) {
        return Err(IntegrityError(format!(
            "isolated subgraph is not a subdivision of {:?}",
            obstruction.kind
        )));
    }
    Ok(())
}

fn normalized(edges: &[(usize, usize)]) -> Vec<(usize, usize)> {
    edges.iter().map(|&(u, v)| (u.min(v), u.max(v))).collect()
}
