//! Planarity and outerplanarity testing by edge addition.
//!
//! Implements the linear-time method of
//! J. M. Boyer and W. J. Myrvold, "On the Cutting Edge: Simplified O(n)
//! Planarity by Edge Addition", Journal of Graph Algorithms and
//! Applications, Vol. 8, No. 3, pp. 241-273, 2004.
//! doi: [10.7155/jgaa.00091](https://doi.org/10.7155/jgaa.00091).
//!
//! The embedder processes vertices in descending depth-first-index order.
//! In each step the Walkup establishes which descendants still need a back
//! edge to the current vertex, then the Walkdown traverses the external
//! faces of the pertinent biconnected components, merging them and adding
//! the back edges. A graph is embeddable exactly when every step embeds
//! all of its back edges; otherwise an obstruction subdivision is
//! isolated from the input.

mod initialize;
mod integrity;
mod isolator;
mod postprocess;
mod walkdown;
mod walkup;

#[cfg(test)]
mod tests;

pub use self::integrity::{face_count, verify_embed_result, IntegrityError};
pub use self::isolator::{classify_subdivision, isolate_obstruction, Obstruction, ObstructionKind};

use log::debug;

use crate::data_structures::{Graph, GraphError, NIL};

/// Which embedding surface discipline the engine enforces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmbedMode {
    /// All vertices may leave the external face.
    Planar,
    /// Every vertex must remain on the external face.
    Outerplanar,
}

/// The structural result of an embedding run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EmbedOutcome {
    /// The graph admits an embedding; the adjacency lists of the graph now
    /// form a combinatorial embedding (a realizable rotation system).
    Embedded,
    /// No embedding exists; an obstruction subdivision has been isolated.
    NonEmbeddable(Obstruction),
}

/// How a hook tells the engine to continue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HookVerdict {
    Proceed,
    NonEmbeddable,
}

/// Overridable behaviors of the embedder.
///
/// The default methods are the core planarity/outerplanarity algorithm.
/// Algorithm variants (subgraph searches, drawing extensions) install a
/// custom implementation via [embed_with] to redirect individual steps,
/// e.g. to clear a blocked descendant bicomp by a reduction instead of
/// terminating.
pub trait EmbedderHooks {
    /// Embed the back edge recorded at `w` between the bicomp root and `w`.
    fn embed_back_edge(
        &mut self,
        g: &mut Graph,
        root_side: usize,
        root_vertex: usize,
        w: usize,
        w_prev_link: usize,
    ) -> Result<(), GraphError> {
        walkdown::embed_back_edge_to_descendant(g, root_side, root_vertex, w, w_prev_link)
    }

    /// Merge the bicomps recorded on the stack down to the current vertex.
    fn merge_bicomps(
        &mut self,
        g: &mut Graph,
        _i: usize,
        _root_vertex: usize,
        _w: usize,
        _w_prev_link: usize,
    ) -> Result<HookVerdict, GraphError> {
        walkdown::merge_bicomps(g)?;
        Ok(HookVerdict::Proceed)
    }

    /// Step over a vertex that is neither pertinent nor externally active.
    fn handle_inactive_vertex(
        &mut self,
        g: &mut Graph,
        _root_vertex: usize,
        w: &mut usize,
        w_prev_link: &mut usize,
    ) -> Result<(), GraphError> {
        walkdown::advance_past_inactive_vertex(g, w, w_prev_link);
        Ok(())
    }

    /// Both external face paths of a pertinent descendant bicomp are
    /// blocked by stopping vertices. The core pushes the bicomp root for
    /// the obstruction isolator and terminates the Walkdown.
    fn handle_blocked_descendant_bicomp(
        &mut self,
        g: &mut Graph,
        _i: usize,
        _root_vertex: usize,
        r: usize,
        _rout: &mut usize,
        _w: &mut usize,
        _w_prev_link: &mut usize,
    ) -> Result<HookVerdict, GraphError> {
        g.stack.push2(r, 0);
        Ok(HookVerdict::NonEmbeddable)
    }

    /// A step ended with unembedded back edges. The core stops iterating.
    fn handle_blocked_iteration(
        &mut self,
        _g: &mut Graph,
        _i: usize,
    ) -> Result<HookVerdict, GraphError> {
        Ok(HookVerdict::NonEmbeddable)
    }

    /// Runs once after the edge addition loop. The core imposes a
    /// consistent orientation and joins the remaining bicomps when every
    /// edge was embedded.
    fn embed_postprocess(&mut self, g: &mut Graph, blocked: bool) -> Result<(), GraphError> {
        if !blocked {
            postprocess::orient_vertices(g)?;
            postprocess::join_bicomps(g)?;
        }
        Ok(())
    }
}

/// The unmodified core algorithm.
#[derive(Clone, Copy, Debug, Default)]
pub struct CoreHooks;

impl EmbedderHooks for CoreHooks {}

/// Run the embedder on `g`.
///
/// On [EmbedOutcome::Embedded] the adjacency lists of `g` hold the
/// combinatorial embedding, sorted by DFI ([Graph::sort_vertices] recovers
/// the input order). On [EmbedOutcome::NonEmbeddable] the isolated
/// obstruction is returned in input vertex ids.
pub fn embed(g: &mut Graph, mode: EmbedMode) -> Result<EmbedOutcome, GraphError> {
    embed_with(g, mode, &mut CoreHooks)
}

/// [embed] with a custom hook bundle.
pub fn embed_with(
    g: &mut Graph,
    mode: EmbedMode,
    hooks: &mut dyn EmbedderHooks,
) -> Result<EmbedOutcome, GraphError> {
    let embedded = run_edge_addition(g, mode, hooks)?;
    if embedded {
        Ok(EmbedOutcome::Embedded)
    } else {
        let obstruction = isolator::isolate_obstruction(g.order(), g.edges(), mode)?;
        Ok(EmbedOutcome::NonEmbeddable(obstruction))
    }
}

/// The edge addition loop proper: initialization, one descending pass of
/// Walkups and Walkdowns, and the orientation postprocess. Returns whether
/// every edge was embedded. Obstruction isolation is left to the caller so
/// the isolator can re-enter this function on subgraphs.
pub(crate) fn run_edge_addition(
    g: &mut Graph,
    mode: EmbedMode,
    hooks: &mut dyn EmbedderHooks,
) -> Result<bool, GraphError> {
    if g.dfs_numbered {
        return Err(GraphError::AlreadyProcessed);
    }
    debug!("edge addition start: n={} m={} mode={:?}", g.order(), g.edge_count(), mode);

    initialize::initialize_embedding(g)?;
    initialize::create_sorted_separated_child_lists(g);

    let n = g.order();
    let mut blocked = false;
    for i in (0..n).rev() {
        let mut step_nonembeddable = false;

        // Any visited_info value greater than the step vertex means
        // unvisited in that step, so one assignment re-arms the marker
        // for all future (smaller) steps.
        g.vertices[i].visited_info = n;

        // Establish pertinence for step i.
        let fwd_head = g.vertices[i].fwd_arc_list;
        let mut j = fwd_head;
        while j != NIL {
            walkup::walkup(g, i, j);
            j = g.arcs[j].link[0];
            if j == fwd_head {
                break;
            }
        }

        // Embed the back edges child subtree by child subtree.
        let child_head = g.vertices[i].sorted_dfs_child_list;
        let mut child = child_head;
        while child != NIL {
            if g.vertices[child].pertinent_bicomp_list != NIL {
                match walkdown::walkdown(g, hooks, mode, i, child + n)? {
                    walkdown::StepResult::Done => {}
                    walkdown::StepResult::NonEmbeddable => {
                        step_nonembeddable = true;
                        break;
                    }
                }
            }
            child = g.sorted_child_lists.next_item(child_head, child);
        }

        // Walkup records pertinent roots of i itself to avoid a condition
        // test; nothing consumes them, so drop them here.
        g.vertices[i].pertinent_bicomp_list = NIL;

        if g.vertices[i].fwd_arc_list != NIL || step_nonembeddable {
            match hooks.handle_blocked_iteration(g, i)? {
                HookVerdict::Proceed => {}
                HookVerdict::NonEmbeddable => {
                    blocked = true;
                    break;
                }
            }
        }
    }

    hooks.embed_postprocess(g, blocked)?;
    debug!("edge addition end: embedded={}", !blocked);
    Ok(!blocked)
}

/// Activity of a vertex in step `i`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum VertexActivity {
    /// No unembedded edge reaches `i` or above from here.
    Inactive,
    /// Pertinent and enclosable in this step.
    Internal,
    /// Connected above `i` by an unembedded edge; must stay on the
    /// external face.
    External,
}

/// A vertex is pertinent while a back edge to the step vertex remains
/// unembedded at it or below it.
pub(crate) fn pertinent(g: &Graph, w: usize) -> bool {
    g.vertices[w].pertinent_adjacency_info != NIL || g.vertices[w].pertinent_bicomp_list != NIL
}

pub(crate) fn externally_active(g: &Graph, w: usize, i: usize, mode: EmbedMode) -> bool {
    if mode == EmbedMode::Outerplanar {
        return true;
    }
    if g.vertices[w].least_ancestor < i {
        return true;
    }
    // The separated child list is sorted by lowpoint, so its head carries
    // the least lowpoint over all not-yet-merged children.
    let first_child = g.vertices[w].separated_dfs_child_list;
    first_child != NIL && g.vertices[first_child].lowpoint < i
}

pub(crate) fn vertex_activity(g: &Graph, w: usize, i: usize, mode: EmbedMode) -> VertexActivity {
    if externally_active(g, w, i, mode) {
        VertexActivity::External
    } else if pertinent(g, w) {
        VertexActivity::Internal
    } else {
        VertexActivity::Inactive
    }
}
