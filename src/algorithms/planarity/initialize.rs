//! One-pass DFS initialization of the embedding state.
//!
//! A single iterative depth first search assigns DFIs, parents and edge
//! types, builds the per-vertex sorted DFS child lists and circular
//! forward-arc lists and records `least_ancestor`. The vertices are then
//! sorted into DFI order, lowpoints are computed bottom-up, and every DFS
//! tree edge is embedded as a singleton bicomp between the child and a
//! root copy of the parent.

use log::debug;

use crate::data_structures::{ArcKind, Graph, GraphError, NIL};

pub(crate) fn initialize_embedding(g: &mut Graph) -> Result<(), GraphError> {
    debug!("embedding initialization start");

    let arc_capacity = 2 * g.edge_capacity;
    if g.stack.capacity() < 2 * arc_capacity {
        return Err(GraphError::StackCapacityTooSmall {
            required: 2 * arc_capacity,
            capacity: g.stack.capacity(),
        });
    }
    g.stack.clear();

    let n = g.n;
    for v in 0..2 * n {
        g.vertices[v].visited = false;
    }

    dfs_number(g);
    g.dfs_numbered = true;
    g.sort_vertices()?;
    compute_lowpoints(g);
    embed_dfs_tree(g);

    debug!("embedding initialization end");
    Ok(())
}

/// The DFS pass. Pushes `(parent, arc)` pairs; an entry popped onto an
/// already visited vertex is skipped, because the arc it carries was
/// retyped from the descendant side while the entry waited on the stack.
fn dfs_number(g: &mut Graph) {
    let n = g.n;
    let mut dfi = 0;

    for root in 0..n {
        if g.vertices[root].visited {
            continue;
        }

        g.stack.push2(NIL, NIL);
        while let Some((uparent, e)) = g.stack.pop2() {
            let u = if uparent == NIL { root } else { g.arcs[e].neighbor };
            if g.vertices[u].visited {
                continue;
            }

            g.vertices[u].visited = true;
            g.vertices[u].index = dfi;
            g.vertices[u].parent = uparent;
            dfi += 1;

            if e != NIL {
                g.arcs[e].kind = ArcKind::TreeChild;
                g.arcs[e ^ 1].kind = ArcKind::TreeParent;

                let head = g.vertices[uparent].sorted_dfs_child_list;
                g.vertices[uparent].sorted_dfs_child_list =
                    g.sorted_child_lists.append(head, g.vertices[u].index);

                // Park the tree-child arc at the root copy that will pair
                // with u once the vertices are in DFI order.
                let r = g.vertices[u].index + n;
                g.vertices[r].link = [e, e];
            }

            let mut j = g.first_arc(u);
            while j != NIL {
                let j_next = g.arcs[j].link[0];
                let nb = g.arcs[j].neighbor;
                if !g.vertices[nb].visited {
                    g.stack.push2(u, j);
                } else if g.arcs[j].kind != ArcKind::TreeParent {
                    g.arcs[j].kind = ArcKind::Back;
                    let jtwin = j ^ 1;
                    g.arcs[jtwin].kind = ArcKind::Forward;

                    // The forward arc leaves the ancestor's adjacency list
                    // for its circular forward-arc list; appending keeps
                    // the list in ascending descendant DFI.
                    g.remove_arc(nb, jtwin);
                    append_fwd_arc(g, nb, jtwin);

                    let ancestor_dfi = g.vertices[nb].index;
                    if ancestor_dfi < g.vertices[u].least_ancestor {
                        g.vertices[u].least_ancestor = ancestor_dfi;
                    }
                }
                j = j_next;
            }
        }
    }
}

fn append_fwd_arc(g: &mut Graph, v: usize, arc: usize) {
    let head = g.vertices[v].fwd_arc_list;
    if head == NIL {
        g.vertices[v].fwd_arc_list = arc;
        g.arcs[arc].link = [arc, arc];
    } else {
        let tail = g.arcs[head].link[1];
        g.arcs[arc].link = [head, tail];
        g.arcs[head].link[1] = arc;
        g.arcs[tail].link[0] = arc;
    }
}

/// `lowpoint(v) = min(v, least_ancestor(v), min over children lowpoint)`,
/// computed in one reverse-DFI pass once the children are known.
fn compute_lowpoints(g: &mut Graph) {
    for i in (0..g.n).rev() {
        let mut least = i;

        let head = g.vertices[i].sorted_dfs_child_list;
        let mut child = head;
        while child != NIL {
            least = least.min(g.vertices[child].lowpoint);
            child = g.sorted_child_lists.next_item(head, child);
        }

        least = least.min(g.vertices[i].least_ancestor);
        g.vertices[i].lowpoint = least;
    }
}

/// Embed every tree edge as a singleton bicomp: the child keeps only its
/// tree-parent arc, re-aimed at the root copy, the root copy keeps only
/// the tree-child arc, and the two form a degenerate two-sided external
/// face. Back arcs are left unlinked; each is re-attached when its
/// forward twin is embedded.
fn embed_dfs_tree(g: &mut Graph) {
    let n = g.n;
    for c in 0..n {
        let r = c + n;
        if g.vertices[c].parent == NIL {
            g.vertices[c].link = [NIL, NIL];
        } else {
            let e = g.vertices[r].link[0];
            let etwin = e ^ 1;

            g.arcs[e].link = [NIL, NIL];
            g.arcs[etwin].neighbor = r;
            g.arcs[etwin].link = [NIL, NIL];

            g.vertices[c].link = [etwin, etwin];
            g.vertices[r].link = [e, e];

            g.vertices[r].ext_face = [c, c];
            g.vertices[c].ext_face = [r, r];
        }
    }
}

/// Build each vertex's separated DFS child list, sorted by non-decreasing
/// lowpoint, in O(n) total via one bucket pass: every vertex drops into
/// the bucket of its lowpoint value, then buckets are drained in order.
pub(crate) fn create_sorted_separated_child_lists(g: &mut Graph) {
    let n = g.n;
    g.bin.reset();
    g.buckets.fill(NIL);

    for v in 0..n {
        let l = g.vertices[v].lowpoint;
        g.buckets[l] = g.bin.append(g.buckets[l], v);
    }

    for l in 0..n {
        let head = g.buckets[l];
        let mut item = head;
        while item != NIL {
            let parent = g.vertices[item].parent;
            if parent != NIL {
                let list = g.vertices[parent].separated_dfs_child_list;
                g.vertices[parent].separated_dfs_child_list =
                    g.separated_child_lists.append(list, item);
            }
            item = g.bin.next_item(head, item);
        }
    }
}
