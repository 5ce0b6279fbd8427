//! Pertinence priming for one step of the embedder.

use log::trace;

use crate::data_structures::{Graph, NIL};

/// Record that the back edge carried by forward arc `j` must reach the
/// descendant endpoint in step `i`, and flag every bicomp on the chain
/// from that descendant up to `i` as pertinent.
///
/// Two cursors trace the external face of the current bicomp in opposite
/// directions; whichever reaches a root copy first names the next bicomp
/// root, and the climb resumes at the root's parent copy. The parallel
/// traversal bounds the cost by the side of the bicomp that the Walkdown
/// will consume, and the per-step visited markers cut the climb short as
/// soon as it meets territory a previous Walkup of the same step covered.
pub(crate) fn walkup(g: &mut Graph, i: usize, j: usize) {
    let n = g.n;
    let w = g.arcs[j].neighbor;
    trace!("walkup i={} w={}", i, w);

    g.vertices[w].pertinent_adjacency_info = j;

    let (mut zig, mut zag) = (w, w);
    let (mut zig_prev, mut zag_prev) = (1usize, 0usize);

    while zig != i {
        let mut root = NIL;
        let mut next_zig = g.vertices[zig].ext_face[1 ^ zig_prev];
        let next_zag;

        if next_zig >= n {
            // Found the bicomp root in the first direction. If either the
            // cursor or the vertex entering the root from the other side
            // is already marked, a previous Walkup in this step recorded
            // this root and all of its ancestors.
            if g.vertices[zig].visited_info == i {
                break;
            }
            root = next_zig;
            let side = if g.vertices[root].ext_face[0] == zig { 1 } else { 0 };
            next_zag = g.vertices[root].ext_face[side];
            if g.vertices[next_zag].visited_info == i {
                break;
            }
        } else {
            next_zag = g.vertices[zag].ext_face[1 ^ zag_prev];
            if next_zag >= n {
                if g.vertices[zag].visited_info == i {
                    break;
                }
                root = next_zag;
                let side = if g.vertices[root].ext_face[0] == zag { 1 } else { 0 };
                next_zig = g.vertices[root].ext_face[side];
                if g.vertices[next_zig].visited_info == i {
                    break;
                }
            } else {
                if g.vertices[zig].visited_info == i {
                    break;
                }
                if g.vertices[zag].visited_info == i {
                    break;
                }
            }
        }

        g.vertices[zig].visited_info = i;
        g.vertices[zag].visited_info = i;

        if root == NIL {
            zig_prev = if g.vertices[next_zig].ext_face[0] == zig { 0 } else { 1 };
            zig = next_zig;
            zag_prev = if g.vertices[next_zag].ext_face[0] == zag { 0 } else { 1 };
            zag = next_zag;
        } else {
            // The root copy at child + n stands for the bicomp whose root
            // edge is (parent(child), child); pertinence is recorded at
            // the parent copy. Externally active bicomps are appended and
            // the rest prepended, so the Walkdown meets enclosable
            // bicomps first.
            let child = root - n;
            let parent_copy = g.vertices[child].parent;
            let head = g.vertices[parent_copy].pertinent_bicomp_list;
            g.vertices[parent_copy].pertinent_bicomp_list = if g.vertices[child].lowpoint < i {
                g.bicomp_lists.append(head, child)
            } else {
                g.bicomp_lists.prepend(head, child)
            };

            zig = parent_copy;
            zag = parent_copy;
            zig_prev = 1;
            zag_prev = 0;
        }
    }
}
