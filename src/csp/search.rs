//! Backtracking search and its forward-checking variant

use std::collections::HashMap;

use crate::{
    board::{Board, Cell, Player},
    csp::model::CspModel,
};

/// A partial mapping from originally-empty cells to chosen values
pub type Assignment = HashMap<Cell, Player>;

/// First empty cell not yet in the assignment, row-major order
pub fn select_unassigned_variable(board: &Board, assignment: &Assignment) -> Option<Cell> {
    board
        .empty_cells()
        .into_iter()
        .find(|cell| !assignment.contains_key(cell))
}

/// Values of a cell's current domain in the documented X-before-O order
pub fn order_domain_values(model: &CspModel, cell: Cell) -> Vec<Player> {
    model.domains[&cell].iter().collect()
}

/// A candidate value is consistent when no already-assigned cell sharing a
/// constraint line holds the same value.
///
/// Filled board cells never participate here; only cells placed into the
/// assignment during search can conflict. This is the engine's weak
/// equality-avoidance semantics, not the full game rule.
pub fn is_consistent(model: &CspModel, cell: Cell, value: Player, assignment: &Assignment) -> bool {
    for line in model.lines_through(cell) {
        for &neighbor in line.cells() {
            if neighbor != cell && assignment.get(&neighbor) == Some(&value) {
                return false;
            }
        }
    }
    true
}

/// Classic backtracking search over the empty cells.
///
/// Row-major variable order, domain-order values, no look-ahead. On finding a
/// complete assignment the recommendation is the first empty cell (row-major)
/// it covers; exhausting every branch yields `None`.
pub fn backtracking_search(board: &Board) -> Option<Cell> {
    let model = CspModel::new(board);
    let empty_count = board.empty_cells().len();
    let mut assignment = Assignment::new();

    let solved = backtrack(&model, board, empty_count, &mut assignment);
    log::debug!("backtracking_search: solved={solved}");

    if solved {
        board.empty_cells().into_iter().next()
    } else {
        None
    }
}

fn backtrack(
    model: &CspModel,
    board: &Board,
    empty_count: usize,
    assignment: &mut Assignment,
) -> bool {
    if assignment.len() == empty_count {
        return true;
    }

    let Some(var) = select_unassigned_variable(board, assignment) else {
        return false;
    };

    for value in order_domain_values(model, var) {
        if is_consistent(model, var, value, assignment) {
            assignment.insert(var, value);
            if backtrack(model, board, empty_count, assignment) {
                return true;
            }
            assignment.remove(&var);
        }
    }
    false
}

/// Backtracking with look-ahead domain pruning.
///
/// Each trial assignment removes the value from the domain of every
/// unassigned empty neighbor on a shared line; an emptied neighbor domain
/// rejects the trial immediately. Domains are snapshotted before the trial
/// and restored on backtrack so sibling branches see the original state.
pub fn forward_checking(board: &Board) -> Option<Cell> {
    let mut model = CspModel::new(board);
    let empty_count = board.empty_cells().len();
    let mut assignment = Assignment::new();

    let solved = backtrack_with_forward_check(&mut model, board, empty_count, &mut assignment);
    log::debug!("forward_checking: solved={solved}");

    if solved {
        board.empty_cells().into_iter().next()
    } else {
        None
    }
}

fn backtrack_with_forward_check(
    model: &mut CspModel,
    board: &Board,
    empty_count: usize,
    assignment: &mut Assignment,
) -> bool {
    if assignment.len() == empty_count {
        return true;
    }

    let Some(var) = select_unassigned_variable(board, assignment) else {
        return false;
    };

    for value in order_domain_values(model, var) {
        if is_consistent(model, var, value, assignment) {
            assignment.insert(var, value);
            let snapshot = model.domains.clone();

            if forward_check(model, board, assignment, var, value)
                && backtrack_with_forward_check(model, board, empty_count, assignment)
            {
                return true;
            }

            model.domains = snapshot;
            assignment.remove(&var);
        }
    }
    false
}

/// Prune `value` from every unassigned empty neighbor of `var`; false when a
/// neighbor's domain empties
fn forward_check(
    model: &mut CspModel,
    board: &Board,
    assignment: &Assignment,
    var: Cell,
    value: Player,
) -> bool {
    let neighbors: Vec<Cell> = model
        .lines_through(var)
        .flat_map(|line| line.cells().iter().copied())
        .filter(|&neighbor| {
            neighbor != var && board.is_empty_at(neighbor) && !assignment.contains_key(&neighbor)
        })
        .collect();

    for neighbor in neighbors {
        let domain = model
            .domains
            .get_mut(&neighbor)
            .expect("every cell has a domain");
        domain.remove(value);
        if domain.is_empty() {
            return false;
        }
    }
    true
}
