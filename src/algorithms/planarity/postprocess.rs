//! Final orientation and bicomp union of a successful embedding.

use log::debug;

use crate::data_structures::{ArcKind, Graph, GraphError, NIL};

use super::walkdown::merge_vertex;

/// Give all vertices of every remaining bicomp the orientation of their
/// bicomp root.
///
/// Embedding-time flips only inverted the root copy and toggled the sign
/// of its root edge; here the deferred flips are propagated: a DFS over
/// tree-child arcs carries the accumulated sign, and a vertex is inverted
/// exactly when the product of signs on its tree path from the root is
/// negative.
pub(crate) fn orient_vertices(g: &mut Graph) -> Result<(), GraphError> {
    debug!("orienting embedding");
    g.stack.clear();
    for r in g.n..2 * g.n {
        if g.first_arc(r) != NIL {
            orient_vertices_in_bicomp(g, r);
        }
    }
    Ok(())
}

fn orient_vertices_in_bicomp(g: &mut Graph, bicomp_root: usize) {
    g.stack.push2(bicomp_root, 0);
    while let Some((v, inverted)) = g.stack.pop2() {
        if inverted != 0 {
            g.invert_vertex(v);
        }
        let mut j = g.first_arc(v);
        while j != NIL {
            if g.arcs[j].kind == ArcKind::TreeChild {
                let sign = inverted ^ (g.arcs[j].inverted as usize);
                g.stack.push2(g.arcs[j].neighbor, sign);
                g.arcs[j].inverted = false;
            }
            j = g.arcs[j].link[0];
        }
    }
}

/// Consume every root copy that survived the embedding.
///
/// Bicomps only merge during embedding when the result is biconnected, so
/// a separable or disconnected input leaves one live root copy per
/// remaining bicomp; merging each into its parent copy yields a single
/// adjacency structure per DFS tree.
pub(crate) fn join_bicomps(g: &mut Graph) -> Result<(), GraphError> {
    debug!("joining bicomps");
    for r in g.n..2 * g.n {
        if g.first_arc(r) != NIL {
            let parent = g.vertices[r - g.n].parent;
            merge_vertex(g, parent, 0, r);
        }
    }
    Ok(())
}
