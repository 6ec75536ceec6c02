//! Move advisor for generalized n-by-n Tic-Tac-Toe
//!
//! This crate provides:
//! - A CSP model of the board (variables, domains, constraint lines)
//! - Seven classical CSP move-selection strategies: backtracking search,
//!   degree heuristic, forward checking, constraint propagation, AC-3 arc
//!   consistency, k-consistency, and min-conflicts local search
//! - An independent bounded-depth game tree with minimax move suggestion
//!
//! Every call consumes a [`Board`] snapshot, rebuilds all engine state from
//! scratch, and returns a single recommended [`Cell`] or `None`. Nothing
//! persists across calls and the caller's board is never mutated.

pub mod board;
pub mod csp;
pub mod error;
pub mod game_tree;
pub mod lines;
pub mod strategy;

pub use board::{Board, Cell, Player, Symbol};
pub use csp::{
    CspModel, DEFAULT_K, DEFAULT_MAX_STEPS, DomainSet, arc_consistency, backtracking_search,
    constraint_propagation, degree_heuristic, forward_checking, k_consistency, min_conflicts,
};
pub use error::{Error, Result};
pub use game_tree::{
    DEFAULT_DEPTH, GameTree, evaluate_position, suggest_move, suggest_move_with_depth,
};
pub use lines::{Line, LineKind, all_lines};
pub use strategy::Strategy;
