use crate::error::{Error, Result};
use crate::node::{NodeId, SearchNode, SearchTree};
use crate::Impartial;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

/// Default cap on expanded nodes for bounded searches.
pub const DEFAULT_MAX_EXPANSIONS: usize = 1_000_000;

/// Bounds on a single search call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLimits {
    /// Give up with `Error::ExpansionLimit` after this many expansions.
    pub max_expansions: Option<usize>,
}

impl SearchLimits {
    pub fn unbounded() -> SearchLimits {
        SearchLimits {
            max_expansions: None,
        }
    }

    pub fn with_max_expansions(max_expansions: usize) -> SearchLimits {
        SearchLimits {
            max_expansions: Some(max_expansions),
        }
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits::with_max_expansions(DEFAULT_MAX_EXPANSIONS)
    }
}

/// A* from `initial` to the nearest terminal state, every move costing 1.
///
/// Returns the states along the path, `initial` first and the terminal state
/// last, or `Ok(None)` when the frontier runs dry.
pub fn shortest_path<G, H>(
    initial: &G,
    heuristic: H,
    limits: &SearchLimits,
    cancel: Option<&AtomicBool>,
) -> Result<Option<Vec<G>>>
where
    G: Impartial,
    H: Fn(&G) -> usize,
{
    let (tree, goal) = explore(initial, heuristic, limits, cancel)?;
    Ok(goal.map(|id| tree.path_to(id)))
}

/// Runs the search and hands back every node it created, together with the
/// terminal node it stopped on.
///
/// The frontier pops the smallest `f = g + h`; equal `f` values come out in
/// insertion order, with no regard for `g` or `h` on their own. States join
/// the visited set when expanded, not when discovered, so a state may sit on
/// the frontier several times but is expanded at most once.
pub fn explore<G, H>(
    initial: &G,
    heuristic: H,
    limits: &SearchLimits,
    cancel: Option<&AtomicBool>,
) -> Result<(SearchTree<G>, Option<NodeId>)>
where
    G: Impartial,
    H: Fn(&G) -> usize,
{
    let mut tree = SearchTree::new();
    let root = tree.push(SearchNode::root(initial.clone(), heuristic(initial)));
    let mut frontier: BinaryHeap<Reverse<(usize, NodeId)>> = BinaryHeap::new();
    frontier.push(Reverse((tree.get(root).f(), root)));
    let mut visited: HashSet<G> = HashSet::new();
    let mut expanded = 0;

    log::debug!("searching from {:?}", initial);

    while let Some(Reverse((_, id))) = frontier.pop() {
        let node = tree.get(id);
        if node.state.is_terminal() {
            log::debug!(
                "reached terminal state after {} expansions, {} nodes, depth {}",
                expanded,
                tree.len(),
                node.g
            );
            return Ok((tree, Some(id)));
        }
        if visited.contains(&node.state) {
            continue;
        }
        if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            return Err(Error::Cancelled);
        }
        if let Some(limit) = limits.max_expansions {
            if expanded >= limit {
                log::debug!("expansion limit {} hit with {} nodes", limit, tree.len());
                return Err(Error::ExpansionLimit { limit });
            }
        }
        expanded += 1;

        let g = node.g + 1;
        let moves = node.state.get_moves();
        visited.insert(node.state.clone());
        for next in moves {
            if visited.contains(&next) {
                continue;
            }
            let h = heuristic(&next);
            let child = tree.push(SearchNode {
                state: next,
                g,
                h,
                parent: Some(id),
            });
            frontier.push(Reverse((g.saturating_add(h), child)));
        }
    }

    log::debug!("frontier exhausted after {} expansions", expanded);
    Ok((tree, None))
}

/// The state one move along a shortest path to a terminal state.
///
/// `None` if `initial` is already terminal or no terminal state is reachable.
/// The search is unbounded, as is appropriate for small boards.
pub fn find_next_move<G, H>(initial: &G, heuristic: H) -> Option<G>
where
    G: Impartial,
    H: Fn(&G) -> usize,
{
    if initial.is_terminal() {
        return None;
    }
    shortest_path(initial, heuristic, &SearchLimits::unbounded(), None)
        .ok()
        .flatten()
        .and_then(|path| path.into_iter().nth(1))
}
