use crate::Impartial;

/// Position of a node inside its `SearchTree`.
pub type NodeId = usize;

/// A state reached along one particular path from the root.
///
/// Equality looks at the state only; frontier ordering is done by the
/// search on `f` and never through this type.
#[derive(Debug, Clone)]
pub struct SearchNode<G> {
    pub state: G,
    pub g: usize,
    pub h: usize,
    pub parent: Option<NodeId>,
}

impl<G> SearchNode<G> {
    pub fn root(state: G, h: usize) -> SearchNode<G> {
        SearchNode {
            state,
            g: 0,
            h,
            parent: None,
        }
    }

    pub fn f(&self) -> usize {
        self.g.saturating_add(self.h)
    }
}

impl<G: PartialEq> PartialEq for SearchNode<G> {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state
    }
}

impl<G: Eq> Eq for SearchNode<G> {}

/// Arena holding every node created by one search call.
/// Parents are referenced by index, so the links always point towards the root.
#[derive(Debug, Clone)]
pub struct SearchTree<G> {
    nodes: Vec<SearchNode<G>>,
}

impl<G> SearchTree<G>
where
    G: Impartial,
{
    pub fn new() -> SearchTree<G> {
        SearchTree { nodes: Vec::new() }
    }

    pub fn push(&mut self, node: SearchNode<G>) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn get(&self, id: NodeId) -> &SearchNode<G> {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[SearchNode<G>] {
        &self.nodes
    }

    pub fn path_to(&self, id: NodeId) -> Vec<G> {
        reconstruct_path(&self.nodes, id)
    }
}

/// Follows parent links from `leaf` up to the root and returns the states
/// root first, `leaf` last.
pub fn reconstruct_path<G: Clone>(nodes: &[SearchNode<G>], leaf: NodeId) -> Vec<G> {
    let mut path = vec![];
    let mut current = Some(leaf);
    while let Some(id) = current {
        let node = &nodes[id];
        path.push(node.state.clone());
        current = node.parent;
    }
    path.reverse();
    path
}
