//! Back edge embedding along the external faces of pertinent bicomps.

use log::{debug, trace};

use crate::data_structures::{ArcKind, Graph, GraphError, NIL};

use super::{pertinent, vertex_activity, EmbedMode, EmbedderHooks, HookVerdict, VertexActivity};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StepResult {
    Done,
    NonEmbeddable,
}

/// Walk both external face paths emanating from `root_vertex` (a root copy
/// of step vertex `i`), embedding a back edge at every descendant the
/// Walkup marked and merging the bicomp chain leading down to it.
///
/// A side ends either back at the root or at an externally active stopping
/// vertex, which must not be enclosed: it is joined to an ancestor of `i`
/// by an unembedded edge, so enclosing it inside the bounding cycle of the
/// bicomp would trap that edge. After each side the external face is
/// short-circuited from the root to the final vertex so inactive stretches
/// are never traversed again.
pub(crate) fn walkdown(
    g: &mut Graph,
    hooks: &mut dyn EmbedderHooks,
    mode: EmbedMode,
    i: usize,
    root_vertex: usize,
) -> Result<StepResult, GraphError> {
    let n = g.n;
    debug!("walkdown i={} root={}", i, root_vertex);
    g.stack.clear();

    for root_side in 0..2 {
        let mut w = g.vertices[root_vertex].ext_face[root_side];
        let mut w_prev_link;
        if g.vertices[w].ext_face[0] == g.vertices[w].ext_face[1] {
            // A singleton bicomp acts like a cycle of two edges with both
            // endpoints oriented alike.
            w_prev_link = 1 ^ root_side;
        } else {
            w_prev_link = if g.vertices[w].ext_face[0] == root_vertex { 0 } else { 1 };
            if g.vertices[w].ext_face[w_prev_link] != root_vertex {
                return Err(GraphError::InconsistentState(
                    "external face link does not return to the bicomp root",
                ));
            }
        }

        while w != root_vertex {
            if g.vertices[w].pertinent_adjacency_info != NIL {
                // Merge the bicomp chain collected on the stack, then add
                // the back edge, forming a new proper face.
                if !g.stack.is_empty() {
                    match hooks.merge_bicomps(g, i, root_vertex, w, w_prev_link)? {
                        HookVerdict::Proceed => {}
                        HookVerdict::NonEmbeddable => return Ok(StepResult::NonEmbeddable),
                    }
                }
                hooks.embed_back_edge(g, root_side, root_vertex, w, w_prev_link)?;
                g.vertices[w].pertinent_adjacency_info = NIL;
            }

            if g.vertices[w].pertinent_bicomp_list != NIL {
                // Descend into a pertinent child bicomp; remember the cut
                // vertex and the exit side from its root.
                g.stack.push2(w, w_prev_link);
                let r = g.vertices[w].pertinent_bicomp_list + n;

                let x = g.vertices[r].ext_face[0];
                let mut x_prev_link = if g.vertices[x].ext_face[1] == r { 1 } else { 0 };
                let y = g.vertices[r].ext_face[1];
                let mut y_prev_link = if g.vertices[y].ext_face[0] == r { 0 } else { 1 };

                // A bicomp reduced to two external face vertices may carry
                // the non-root vertex with reversed orientation.
                if x == y && g.vertices[x].ext_face_inversion_flag {
                    x_prev_link = 0;
                    y_prev_link = 1;
                }

                let rout;
                if vertex_activity(g, x, i, mode) == VertexActivity::Internal {
                    w = x;
                    w_prev_link = x_prev_link;
                    rout = 0;
                } else if vertex_activity(g, y, i, mode) == VertexActivity::Internal {
                    w = y;
                    w_prev_link = y_prev_link;
                    rout = 1;
                } else if pertinent(g, x) {
                    w = x;
                    w_prev_link = x_prev_link;
                    rout = 0;
                } else if pertinent(g, y) {
                    w = y;
                    w_prev_link = y_prev_link;
                    rout = 1;
                } else {
                    // Both sides of the child bicomp are blocked by
                    // stopping vertices.
                    let mut rout_out = 0;
                    let mut w_out = w;
                    let mut w_prev_out = w_prev_link;
                    match hooks.handle_blocked_descendant_bicomp(
                        g,
                        i,
                        root_vertex,
                        r,
                        &mut rout_out,
                        &mut w_out,
                        &mut w_prev_out,
                    )? {
                        HookVerdict::NonEmbeddable => return Ok(StepResult::NonEmbeddable),
                        HookVerdict::Proceed => {
                            w = w_out;
                            w_prev_link = w_prev_out;
                            rout = rout_out;
                        }
                    }
                }
                g.stack.push2(r, rout);
            } else if vertex_activity(g, w, i, mode) == VertexActivity::Inactive {
                hooks.handle_inactive_vertex(g, root_vertex, &mut w, &mut w_prev_link)?;
            } else {
                // Externally active stopping vertex.
                break;
            }
        }

        // Short-circuit the external face past everything consumed on this
        // side.
        g.vertices[root_vertex].ext_face[root_side] = w;
        g.vertices[w].ext_face[w_prev_link] = root_vertex;

        // When only the root and w remain on the external face, record
        // whether w ended up oriented opposite to the root.
        g.vertices[w].ext_face_inversion_flag =
            g.vertices[w].ext_face[0] == g.vertices[w].ext_face[1] && w_prev_link == root_side;

        if w == root_vertex {
            break;
        }
    }

    Ok(StepResult::Done)
}

/// Walk to the next external face vertex, leaving the inactive one behind.
pub(crate) fn advance_past_inactive_vertex(g: &Graph, w: &mut usize, w_prev_link: &mut usize) {
    let x = g.vertices[*w].ext_face[1 ^ *w_prev_link];
    *w_prev_link = if g.vertices[x].ext_face[0] == *w { 0 } else { 1 };
    *w = x;
}

/// Merge every (cut vertex, child bicomp root) pair on the stack, deepest
/// first, so the chain of bicomps between the Walkdown root and the
/// pertinent descendant becomes one bicomp.
pub(crate) fn merge_bicomps(g: &mut Graph) -> Result<(), GraphError> {
    while !g.stack.is_empty() {
        let (r, rout) = g
            .stack
            .pop2()
            .ok_or(GraphError::InconsistentState("merge stack underflow"))?;
        let (z, z_prev_link) = g
            .stack
            .pop2()
            .ok_or(GraphError::InconsistentState("merge stack holds an unpaired entry"))?;

        // The external faces of the two bicomps form two corners at z; one
        // becomes part of the new proper face, the other the new external
        // face corner. Rewire z and the far end of r's surviving path.
        let ext_face_vertex = g.vertices[r].ext_face[1 ^ rout];
        g.vertices[z].ext_face[z_prev_link] = ext_face_vertex;

        if g.vertices[ext_face_vertex].ext_face[0] == g.vertices[ext_face_vertex].ext_face[1] {
            let flag = g.vertices[ext_face_vertex].ext_face_inversion_flag as usize;
            g.vertices[ext_face_vertex].ext_face[rout ^ flag] = z;
        } else {
            let side = if g.vertices[ext_face_vertex].ext_face[0] == r { 0 } else { 1 };
            g.vertices[ext_face_vertex].ext_face[side] = z;
        }

        // If the path entering z opposes the path exiting r, the bicomp
        // under r enters with the wrong rotational sense: flip the root
        // now and defer the descendants' flip to the orientation pass via
        // the sign on the root edge.
        if z_prev_link == rout {
            if g.first_arc(r) != g.last_arc(r) {
                g.invert_vertex(r);
            }
            let mut j = g.first_arc(r);
            while j != NIL {
                if g.arcs[j].kind == ArcKind::TreeChild {
                    g.arcs[j].inverted = !g.arcs[j].inverted;
                    break;
                }
                j = g.arcs[j].link[0];
            }
        }

        // r stops being pertinent to z and its child stops being
        // separated from z.
        let child = r - g.n;
        let head = g.vertices[z].pertinent_bicomp_list;
        g.vertices[z].pertinent_bicomp_list = g.bicomp_lists.delete(head, child);
        let head = g.vertices[z].separated_dfs_child_list;
        g.vertices[z].separated_dfs_child_list = g.separated_child_lists.delete(head, child);

        merge_vertex(g, z, z_prev_link, r);
    }
    Ok(())
}

/// Absorb root copy `r` into its parent copy `w`: every arc pointing at
/// `r` is re-aimed at `w` (each arc is re-aimed at most once over the
/// whole run, because afterwards it points at a vertex that is never
/// again a root copy), then the two circular adjacency lists are spliced
/// at `w`'s side `w_prev_link`.
pub(crate) fn merge_vertex(g: &mut Graph, w: usize, w_prev_link: usize, r: usize) {
    trace!("merge_vertex w={} w_in={} r={}", w, w_prev_link, r);

    let mut j = g.first_arc(r);
    while j != NIL {
        g.arcs[j ^ 1].neighbor = w;
        j = g.arcs[j].link[0];
    }

    let e_w = g.vertices[w].link[w_prev_link];
    let e_r = g.vertices[r].link[1 ^ w_prev_link];
    let e_ext = g.vertices[r].link[w_prev_link];

    if e_w != NIL {
        g.arcs[e_w].link[1 ^ w_prev_link] = e_r;
        g.arcs[e_r].link[w_prev_link] = e_w;
    } else {
        // w had no edges yet; it simply receives r's list. Happens for a
        // DFS tree root during the final bicomp join.
        g.vertices[w].link[1 ^ w_prev_link] = e_r;
        g.arcs[e_r].link[w_prev_link] = NIL;
    }
    g.vertices[w].link[w_prev_link] = e_ext;
    g.arcs[e_ext].link[1 ^ w_prev_link] = NIL;

    g.init_vertex_record(r);
}

/// Move the forward arc recorded at `w` out of the forward-arc list of the
/// step vertex and into the adjacency lists of the bicomp root and `w`,
/// then pull the two endpoints together on the external face.
pub(crate) fn embed_back_edge_to_descendant(
    g: &mut Graph,
    root_side: usize,
    root_vertex: usize,
    w: usize,
    w_prev_link: usize,
) -> Result<(), GraphError> {
    let fwd_arc = g.vertices[w].pertinent_adjacency_info;
    if fwd_arc == NIL {
        return Err(GraphError::InconsistentState(
            "no forward arc recorded at a pertinent vertex",
        ));
    }
    let back_arc = fwd_arc ^ 1;
    let parent_copy = g.vertices[root_vertex - g.n].parent;
    debug!(
        "embed back edge v={} r={} r_out={} w={} w_in={}",
        parent_copy, root_vertex, root_side, w, w_prev_link
    );

    // Unhook the forward arc from the circular forward-arc list.
    if g.vertices[parent_copy].fwd_arc_list == fwd_arc {
        let next = g.arcs[fwd_arc].link[0];
        g.vertices[parent_copy].fwd_arc_list = if next == fwd_arc { NIL } else { next };
    }
    let next = g.arcs[fwd_arc].link[0];
    let prev = g.arcs[fwd_arc].link[1];
    g.arcs[prev].link[0] = next;
    g.arcs[next].link[1] = prev;

    g.insert_arc(root_vertex, root_side, fwd_arc);
    g.insert_arc(w, w_prev_link, back_arc);
    g.arcs[back_arc].neighbor = root_vertex;

    g.vertices[root_vertex].ext_face[root_side] = w;
    g.vertices[w].ext_face[w_prev_link] = root_vertex;
    Ok(())
}
