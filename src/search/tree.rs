//! Exhaustive game-tree enumeration
//!
//! The tree is rooted at a starting board; each node's children are all
//! boards one legal move away. Won nodes are never expanded. Nodes are
//! created level by level, so node indices grow with depth and the first
//! won node in index order is a shallowest win.
//!
//! # Example
//!
//! ```
//! use tower::board::{Board, Color, Run, Unit};
//! use tower::search::{GameTree, TreeLimits};
//!
//! let red = |r| Unit::new(r, Color::Red).unwrap();
//! let board = Board::from_runs(vec![
//!     Run::from_units(vec![red(7), red(6), red(5), red(4), red(1)]),
//!     Run::from_units(vec![red(3), red(2)]),
//! ]);
//!
//! let tree = GameTree::build(board, TreeLimits::default().with_max_depth(4));
//! let solution = tree.shortest_win().expect("solvable");
//! assert_eq!(solution.len(), 2);
//! ```

use tracing::debug;

use crate::board::{Board, Move};
use crate::error::Result;

use super::observer::{NoOpObserver, TreeObserver};

/// Bounds on tree expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeLimits {
    /// Maximum number of moves from the root
    pub max_depth: usize,
    /// Maximum number of nodes, root included
    pub max_nodes: Option<usize>,
}

impl TreeLimits {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }
}

impl Default for TreeLimits {
    fn default() -> Self {
        Self {
            max_depth: 4,
            max_nodes: None,
        }
    }
}

/// Summary of an expansion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Nodes created, root included
    pub nodes: usize,
    /// Deepest level that holds at least one node
    pub depth_reached: usize,
    /// Nodes whose board is won
    pub won_nodes: usize,
    /// Expansion stopped on the node budget
    pub truncated: bool,
}

/// A position in the tree.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub board: Board,
    /// Move that produced this node (`None` for the root)
    pub mv: Option<Move>,
    pub parent: Option<usize>,
    /// Moves from the root
    pub depth: usize,
    pub children: Vec<usize>,
}

/// Shortest winning line found in a tree.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Moves from the root to the won board
    pub moves: Vec<Move>,
    /// Boards along the line, root first, won board last
    pub boards: Vec<Board>,
}

impl Solution {
    /// Number of moves
    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// True when the root itself was already won
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Apply the moves to a copy of `start`. Returns `None` if any move is
    /// refused on that board.
    pub fn replay(&self, start: &Board) -> Result<Option<Board>> {
        let mut board = start.clone();
        for &mv in &self.moves {
            if !board.make_move(mv)? {
                return Ok(None);
            }
        }
        Ok(Some(board))
    }
}

/// Arena-backed game tree.
#[derive(Debug, Clone)]
pub struct GameTree {
    nodes: Vec<TreeNode>,
    stats: TreeStats,
}

impl GameTree {
    /// Expand the tree from `root` within `limits`.
    #[must_use]
    pub fn build(root: Board, limits: TreeLimits) -> Self {
        Self::build_with_observer(root, limits, &mut NoOpObserver)
    }

    /// Expand the tree, reporting progress to `observer`.
    pub fn build_with_observer(
        root: Board,
        limits: TreeLimits,
        observer: &mut impl TreeObserver,
    ) -> Self {
        let mut tree = GameTree {
            nodes: vec![TreeNode {
                board: root,
                mv: None,
                parent: None,
                depth: 0,
                children: Vec::new(),
            }],
            stats: TreeStats::default(),
        };
        let budget = limits.max_nodes.unwrap_or(usize::MAX).max(1);

        let mut frontier = vec![0usize];
        let mut depth = 0;
        'levels: while depth < limits.max_depth && !frontier.is_empty() {
            let mut next = Vec::new();
            for &parent in &frontier {
                if tree.nodes[parent].board.is_won() {
                    continue;
                }
                let moves: Vec<Move> = tree.nodes[parent].board.possible_moves().collect();
                for mv in moves {
                    if tree.nodes.len() >= budget {
                        tree.stats.truncated = true;
                        if !next.is_empty() {
                            depth += 1;
                            observer.on_level(depth, next.len());
                        }
                        break 'levels;
                    }
                    let mut board = tree.nodes[parent].board.clone();
                    if !matches!(board.make_move(mv), Ok(true)) {
                        continue;
                    }
                    let child = tree.nodes.len();
                    tree.nodes.push(TreeNode {
                        board,
                        mv: Some(mv),
                        parent: Some(parent),
                        depth: depth + 1,
                        children: Vec::new(),
                    });
                    tree.nodes[parent].children.push(child);
                    next.push(child);
                }
            }
            if next.is_empty() {
                break;
            }
            depth += 1;
            debug!(depth, nodes = next.len(), "expanded level");
            observer.on_level(depth, next.len());
            frontier = next;
        }

        tree.stats.nodes = tree.nodes.len();
        tree.stats.depth_reached = tree.nodes.iter().map(|n| n.depth).max().unwrap_or(0);
        tree.stats.won_nodes = tree.nodes.iter().filter(|n| n.board.is_won()).count();
        observer.on_finish(&tree.stats);
        tree
    }

    #[inline]
    pub fn root(&self) -> &TreeNode {
        &self.nodes[0]
    }

    #[inline]
    pub fn node(&self, index: usize) -> Option<&TreeNode> {
        self.nodes.get(index)
    }

    #[inline]
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds its root
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    pub fn stats(&self) -> &TreeStats {
        &self.stats
    }

    /// Depth of the shallowest leaf
    pub fn min_leaf_depth(&self) -> usize {
        self.leaves().map(|n| n.depth).min().unwrap_or(0)
    }

    /// Depth of the deepest leaf
    pub fn max_leaf_depth(&self) -> usize {
        self.leaves().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Depth of the shallowest won node
    pub fn min_win_depth(&self) -> Option<usize> {
        self.first_win().map(|i| self.nodes[i].depth)
    }

    /// Shortest line from the root to a won board, if the tree holds one.
    pub fn shortest_win(&self) -> Option<Solution> {
        let mut index = self.first_win()?;
        let mut moves = Vec::new();
        let mut boards = Vec::new();
        loop {
            let node = &self.nodes[index];
            boards.push(node.board.clone());
            match (node.parent, node.mv) {
                (Some(parent), Some(mv)) => {
                    moves.push(mv);
                    index = parent;
                }
                _ => break,
            }
        }
        moves.reverse();
        boards.reverse();
        Some(Solution { moves, boards })
    }

    fn leaves(&self) -> impl Iterator<Item = &TreeNode> {
        self.nodes.iter().filter(|n| n.children.is_empty())
    }

    /// Nodes are stored level by level, so the first hit is shallowest
    fn first_win(&self) -> Option<usize> {
        self.nodes.iter().position(|n| n.board.is_won())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Color, Run, Unit};
    use crate::search::observer::LevelRecorder;

    fn red(ranks: &[u8]) -> Run {
        Run::from_units(ranks.iter().map(|&r| Unit::new(r, Color::Red).unwrap()).collect())
    }

    fn two_column() -> Board {
        Board::from_runs(vec![red(&[7, 6, 5, 4, 1]), red(&[3, 2])])
    }

    fn three_column() -> Board {
        Board::from_runs(vec![red(&[7, 6, 5, 4, 1]), red(&[3, 2]), Run::new()])
    }

    #[test]
    fn test_two_column_solution() {
        let board = two_column();
        let tree = GameTree::build(board.clone(), TreeLimits::default().with_max_depth(2));
        assert_eq!(tree.min_win_depth(), Some(2));

        let solution = tree.shortest_win().unwrap();
        assert_eq!(solution.moves, vec![Move::new(0, 1, 1), Move::new(1, 0, 3)]);
        assert_eq!(solution.boards.len(), 3);
        assert_eq!(solution.boards[0], board);
        assert!(solution.boards[2].is_won());

        let replayed = solution.replay(&board).unwrap().unwrap();
        assert!(replayed.is_won());
        assert_eq!(replayed, solution.boards[2]);
    }

    #[test]
    fn test_horizon_too_short() {
        let tree = GameTree::build(two_column(), TreeLimits::default().with_max_depth(1));
        assert!(tree.shortest_win().is_none());
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.max_leaf_depth(), 1);
    }

    #[test]
    fn test_won_nodes_have_no_children() {
        let tree = GameTree::build(three_column(), TreeLimits::default().with_max_depth(5));
        for node in tree.nodes() {
            if node.board.is_won() {
                assert!(node.children.is_empty());
            }
            for &child in &node.children {
                assert_eq!(tree.nodes()[child].depth, node.depth + 1);
            }
        }
        assert!(tree.stats().won_nodes >= 2);
    }

    #[test]
    fn test_shortest_among_several_wins() {
        let tree = GameTree::build(three_column(), TreeLimits::default().with_max_depth(4));
        let solution = tree.shortest_win().unwrap();
        assert_eq!(solution.len(), 2);
        assert_eq!(solution.moves[0], Move::new(0, 1, 1));
        assert!(tree.nodes().iter().any(|n| n.board.is_won() && n.depth == 3));
    }

    #[test]
    fn test_root_already_won() {
        let board = Board::from_runs(vec![red(&[7, 6, 5, 4, 3, 2, 1]), Run::new()]);
        let tree = GameTree::build(board, TreeLimits::default());
        assert_eq!(tree.len(), 1);
        let solution = tree.shortest_win().unwrap();
        assert!(solution.is_empty());
        assert_eq!(solution.boards.len(), 1);
    }

    #[test]
    fn test_node_budget_truncates() {
        let tree = GameTree::build(
            three_column(),
            TreeLimits::default().with_max_depth(4).with_max_nodes(2),
        );
        assert_eq!(tree.len(), 2);
        assert!(tree.stats().truncated);
    }

    #[test]
    fn test_observer_sees_levels() {
        let mut recorder = LevelRecorder::default();
        let tree = GameTree::build_with_observer(
            two_column(),
            TreeLimits::default().with_max_depth(3),
            &mut recorder,
        );
        assert_eq!(recorder.levels, vec![(1, 1), (2, 1)]);
        assert_eq!(recorder.finished.as_ref(), Some(tree.stats()));
        assert_eq!(tree.stats().depth_reached, 2);
    }

    #[test]
    fn test_replay_refused_on_other_board() {
        let tree = GameTree::build(two_column(), TreeLimits::default().with_max_depth(2));
        let solution = tree.shortest_win().unwrap();
        let other = Board::from_runs(vec![red(&[7]), red(&[6])]);
        assert!(matches!(solution.replay(&other), Ok(None)));
    }
}
