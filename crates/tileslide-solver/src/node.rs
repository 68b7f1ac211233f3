use std::ops::Index;

use tileslide_core::{Board, Move};

/// Index of a [`SearchNode`] inside a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the arena slot of this node.
    #[must_use]
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One state discovered by a search.
///
/// Nodes are never mutated once pushed into the arena, so parent links stay
/// valid for the arena's whole life.
#[derive(Debug, Clone)]
pub struct SearchNode {
    board: Board,
    g: u32,
    h: u32,
    parent: Option<NodeId>,
    mv: Option<Move>,
}

impl SearchNode {
    /// Creates the root node of a search.
    #[must_use]
    pub fn root(board: Board, h: u32) -> Self {
        Self {
            board,
            g: 0,
            h,
            parent: None,
            mv: None,
        }
    }

    /// Creates a node reached from `parent` by one slide.
    #[must_use]
    pub fn child(board: Board, g: u32, h: u32, parent: NodeId, mv: Move) -> Self {
        Self {
            board,
            g,
            h,
            parent: Some(parent),
            mv: Some(mv),
        }
    }

    /// Returns the board held by this node.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the number of moves from the start board.
    #[must_use]
    pub fn g(&self) -> u32 {
        self.g
    }

    /// Returns the heuristic estimate of the moves left (0 for breadth-first search).
    #[must_use]
    pub fn h(&self) -> u32 {
        self.h
    }

    /// Returns the priority `g + h`.
    #[must_use]
    pub fn f(&self) -> u32 {
        self.g + self.h
    }

    /// Returns the node this one was expanded from, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the move that produced this node, or `None` for the root.
    #[must_use]
    pub fn mv(&self) -> Option<Move> {
        self.mv
    }
}

/// Append-only storage for the nodes of one search.
#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no node has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Stores a node and returns its id.
    pub fn push(&mut self, node: SearchNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Returns the node with the given id.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&SearchNode> {
        self.nodes.get(id.0)
    }

    /// Returns the moves leading from the root to `id`, in play order.
    ///
    /// Walks parent links iteratively and reverses the collected moves, so deep
    /// paths do not grow the call stack.
    ///
    /// # Examples
    ///
    /// ```
    /// use tileslide_core::{Board, Move};
    /// use tileslide_solver::{NodeArena, SearchNode};
    ///
    /// let start: Board = "1,2,3,4,0,5,7,8,6".parse()?;
    /// let mut arena = NodeArena::new();
    /// let root = arena.push(SearchNode::root(start.clone(), 0));
    /// let first = start.apply_move(Move::Right)?;
    /// let a = arena.push(SearchNode::child(first.clone(), 1, 0, root, Move::Right));
    /// let second = first.apply_move(Move::Down)?;
    /// let b = arena.push(SearchNode::child(second, 2, 0, a, Move::Down));
    ///
    /// assert_eq!(arena.path_to(b), [Move::Right, Move::Down]);
    /// assert!(arena.path_to(root).is_empty());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn path_to(&self, id: NodeId) -> Vec<Move> {
        let mut moves = Vec::new();
        let mut current = self.get(id);
        while let Some(node) = current {
            if let Some(mv) = node.mv {
                moves.push(mv);
            }
            current = node.parent.and_then(|parent| self.get(parent));
        }
        moves.reverse();
        moves
    }
}

impl Index<NodeId> for NodeArena {
    type Output = SearchNode;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_to_follows_parent_links() {
        let start = Board::solved(3).unwrap();
        let mut arena = NodeArena::new();
        let root = arena.push(SearchNode::root(start.clone(), 0));

        let mut id = root;
        let mut board = start;
        let walk = [Move::Up, Move::Left, Move::Down, Move::Left, Move::Up];
        for (g, mv) in (1..).zip(walk) {
            board = board.apply_move(mv).unwrap();
            id = arena.push(SearchNode::child(board.clone(), g, 0, id, mv));
        }

        assert_eq!(arena.len(), walk.len() + 1);
        assert_eq!(arena.path_to(id), walk);
        assert_eq!(arena[id].g(), 5);
        assert_eq!(arena[id].parent().map(NodeId::index), Some(walk.len() - 1));
    }

    #[test]
    fn test_siblings_share_a_prefix() {
        let start = Board::solved(2).unwrap();
        let mut arena = NodeArena::new();
        let root = arena.push(SearchNode::root(start.clone(), 2));
        let up = arena.push(SearchNode::child(
            start.apply_move(Move::Up).unwrap(),
            1,
            1,
            root,
            Move::Up,
        ));
        let left = arena.push(SearchNode::child(
            start.apply_move(Move::Left).unwrap(),
            1,
            1,
            root,
            Move::Left,
        ));
        assert_eq!(arena.path_to(up), [Move::Up]);
        assert_eq!(arena.path_to(left), [Move::Left]);
        assert_eq!(arena[root].f(), 2);
        assert_eq!(arena[left].f(), 2);
        assert!(arena.get(NodeId(99)).is_none());
    }
}
