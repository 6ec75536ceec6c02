//! Bounded-depth game tree and minimax move suggestion

use crate::{
    board::{Board, Cell, Player, Symbol},
    lines::all_lines,
};

/// Default look-ahead depth for [`suggest_move`]
pub const DEFAULT_DEPTH: usize = 3;

/// Index of a node in the tree arena
pub type NodeId = usize;

/// One hypothetical position in the tree
#[derive(Debug, Clone)]
pub struct Node {
    /// Board after the move sequence leading here
    pub board: Board,
    /// Heuristic score of the board from the root player's perspective
    pub score: i32,
    /// The move that produced this node, recorded for depth-1 children of
    /// the root
    pub mv: Option<Cell>,
    /// Positions reachable by one additional move
    pub children: Vec<NodeId>,
}

/// Arena-allocated game tree, rebuilt per call and discarded afterward.
///
/// Nodes are indexed by integer id; `roots` are the depth-1 children of the
/// position the tree was built from, each annotated with its originating
/// move.
#[derive(Debug, Clone)]
pub struct GameTree {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    perspective: Player,
}

impl GameTree {
    /// Build the tree of alternating moves from `board`, with `player` to
    /// move, down to `depth` plies.
    ///
    /// Every node is scored with [`evaluate_position`] from `player`'s
    /// perspective. Expansion stops at the depth limit and at terminal
    /// boards (a completed line or a full board); both are leaves.
    pub fn build(board: &Board, player: Player, depth: usize) -> Self {
        let mut tree = GameTree {
            nodes: Vec::new(),
            roots: Vec::new(),
            perspective: player,
        };
        tree.roots = tree.expand(board, player, depth, true);
        log::debug!(
            "game tree: {} nodes, {} root moves, depth {depth}",
            tree.nodes.len(),
            tree.roots.len()
        );
        tree
    }

    fn expand(
        &mut self,
        board: &Board,
        to_move: Player,
        depth: usize,
        record_moves: bool,
    ) -> Vec<NodeId> {
        if depth == 0 {
            return Vec::new();
        }

        let mut ids = Vec::new();
        for cell in board.empty_cells() {
            let mut next = board.clone();
            next.set(cell, to_move.to_symbol());

            let score = evaluate_position(&next, self.perspective);
            let children = if next.is_terminal() {
                Vec::new()
            } else {
                self.expand(&next, to_move.opponent(), depth - 1, false)
            };

            let id = self.nodes.len();
            self.nodes.push(Node {
                board: next,
                score,
                mv: record_moves.then_some(cell),
                children,
            });
            ids.push(id);
        }
        ids
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Depth-1 children of the root position
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Minimax over the subtree at `id`.
    ///
    /// Leaves (terminal boards and depth cutoffs) return their stored score;
    /// interior nodes take the max or min of their children, alternating by
    /// depth.
    pub fn minimax(&self, id: NodeId, maximizing: bool) -> i32 {
        let node = self.node(id);
        if node.children.is_empty() {
            return node.score;
        }

        let scores = node
            .children
            .iter()
            .map(|&child| self.minimax(child, !maximizing));
        if maximizing {
            scores.max().expect("children are non-empty")
        } else {
            scores.min().expect("children are non-empty")
        }
    }

    /// The best root move by minimax value.
    ///
    /// Root nodes are positions after the root player's move, so each is
    /// evaluated with the opponent minimizing next. Strict improvement keeps
    /// the first-seen move on ties.
    pub fn best_move(&self) -> Option<Cell> {
        let mut best: Option<(Cell, i32)> = None;
        for &id in &self.roots {
            let node = self.node(id);
            let Some(mv) = node.mv else {
                continue;
            };
            let score = self.minimax(id, false);
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((mv, score));
            }
        }
        best.map(|(mv, _)| mv)
    }
}

/// Score a board for `player`: the sum of [`evaluate_line`] over every row,
/// column, and both diagonals.
pub fn evaluate_position(board: &Board, player: Player) -> i32 {
    all_lines(board.size())
        .iter()
        .map(|line| {
            let symbols: Vec<Symbol> = line.cells().iter().map(|&cell| board.get(cell)).collect();
            evaluate_line(&symbols, player)
        })
        .sum()
}

/// Score one line: +100 fully the player's, -100 fully the opponent's, +/-10
/// when one empty cell away from either completion.
fn evaluate_line(line: &[Symbol], player: Player) -> i32 {
    let mine = line.iter().filter(|&&s| s == player.to_symbol()).count();
    let theirs = line
        .iter()
        .filter(|&&s| s == player.opponent().to_symbol())
        .count();
    let empty = line.iter().filter(|&&s| s == Symbol::Empty).count();

    if mine == line.len() {
        100
    } else if theirs == line.len() {
        -100
    } else if mine == line.len() - 1 && empty == 1 {
        10
    } else if theirs == line.len() - 1 && empty == 1 {
        -10
    } else {
        0
    }
}

/// Suggest a move for `player` using a depth-[`DEFAULT_DEPTH`] game tree.
pub fn suggest_move(board: &Board, player: Player) -> Option<Cell> {
    suggest_move_with_depth(board, player, DEFAULT_DEPTH)
}

/// Suggest a move for `player` with an explicit look-ahead depth.
pub fn suggest_move_with_depth(board: &Board, player: Player, depth: usize) -> Option<Cell> {
    let tree = GameTree::build(board, player, depth);
    let result = tree.best_move();
    log::debug!("suggest_move: {result:?}");
    result
}
