//! Propagation-based strategies: fixed-point narrowing, AC-3, k-consistency

use std::collections::VecDeque;

use crate::{
    board::{Board, Cell, Player},
    csp::model::CspModel,
};

/// Default subset size for [`k_consistency`]
pub const DEFAULT_K: usize = 2;

/// Fixed-point constraint propagation.
///
/// Repeatedly scans every line; when all filled cells on a line hold one
/// identical symbol, that symbol is deleted from the domain of every empty
/// cell on the line. After the fixed point the empty cell with the smallest
/// remaining domain is recommended. Never assigns values; this strategy only
/// narrows domains and is deliberately weaker than the search family.
pub fn constraint_propagation(board: &Board) -> Option<Cell> {
    let mut model = CspModel::new(board);

    let mut changed = true;
    while changed {
        changed = false;
        for line in &model.constraints {
            let Some(dominant) = uniform_filled_value(board, line.cells()) else {
                continue;
            };
            for &cell in line.cells() {
                if board.is_empty_at(cell)
                    && model
                        .domains
                        .get_mut(&cell)
                        .expect("every cell has a domain")
                        .remove(dominant)
                {
                    changed = true;
                }
            }
        }
    }

    let result = model.smallest_domain_cell(board);
    log::debug!("constraint_propagation: {result:?}");
    result
}

/// The single symbol held by every filled cell on the line, if the line has
/// at least one filled cell and no second symbol
fn uniform_filled_value(board: &Board, cells: &[Cell]) -> Option<Player> {
    let mut seen: Option<Player> = None;
    for &cell in cells {
        match board.get(cell).to_player() {
            None => {}
            Some(player) => match seen {
                None => seen = Some(player),
                Some(existing) if existing == player => {}
                Some(_) => return None,
            },
        }
    }
    seen
}

/// AC-3 style arc consistency.
///
/// Seeds a queue with both directed arcs for every pair of empty cells that
/// co-occur on a constraint line, then revises until the queue drains. Any
/// domain emptied during revision means no recommendation at all; otherwise
/// the smallest-domain empty cell is returned.
pub fn arc_consistency(board: &Board) -> Option<Cell> {
    let mut model = CspModel::new(board);

    if !enforce_arc_consistency(&mut model, board) {
        log::debug!("arc_consistency: a domain emptied, no move");
        return None;
    }

    let result = model.smallest_domain_cell(board);
    log::debug!("arc_consistency: {result:?}");
    result
}

/// Run the AC-3 work queue to exhaustion; false when any domain empties
fn enforce_arc_consistency(model: &mut CspModel, board: &Board) -> bool {
    let mut queue: VecDeque<(Cell, Cell)> = VecDeque::new();
    for line in &model.constraints {
        let cells = line.cells();
        for i in 0..cells.len() {
            for j in (i + 1)..cells.len() {
                if board.is_empty_at(cells[i]) && board.is_empty_at(cells[j]) {
                    queue.push_back((cells[i], cells[j]));
                    queue.push_back((cells[j], cells[i]));
                }
            }
        }
    }

    while let Some((x, y)) = queue.pop_front() {
        if !revise(model, x, y) {
            continue;
        }
        if model.domains[&x].is_empty() {
            return false;
        }
        let neighbors: Vec<Cell> = model
            .lines_through(x)
            .flat_map(|line| line.cells().iter().copied())
            .filter(|&z| z != x && z != y && board.is_empty_at(z))
            .collect();
        for z in neighbors {
            queue.push_back((z, x));
        }
    }

    true
}

/// Delete values of `x` with no differing support in `y`; true when the
/// domain of `x` shrank
fn revise(model: &mut CspModel, x: Cell, y: Cell) -> bool {
    let domain_y = model.domains[&y];
    let mut revised = false;

    for value_x in model.domains[&x].iter().collect::<Vec<_>>() {
        let has_support = domain_y.iter().any(|value_y| value_y != value_x);
        if !has_support {
            model
                .domains
                .get_mut(&x)
                .expect("every cell has a domain")
                .remove(value_x);
            revised = true;
        }
    }
    revised
}

/// k-consistency check with a min-domain fallback.
///
/// Enumerates every k-sized subset of the empty cells. A subset lying
/// entirely within one constraint line is inconsistent when that line carries
/// more than one filled cell and all of its filled cells hold one identical
/// symbol. A single violation anywhere aborts the whole recommendation;
/// fewer than k empty cells is trivially consistent. On success the
/// smallest-domain empty cell is returned.
pub fn k_consistency(board: &Board, k: usize) -> Option<Cell> {
    let model = CspModel::new(board);
    let variables = board.empty_cells();

    if variables.is_empty() {
        return None;
    }

    if variables.len() >= k && !subsets_consistent(board, &model, &variables, k) {
        log::debug!("k_consistency: inconsistent subset found, no move");
        return None;
    }

    let result = model.smallest_domain_cell(board);
    log::debug!("k_consistency: {result:?}");
    result
}

fn subsets_consistent(board: &Board, model: &CspModel, variables: &[Cell], k: usize) -> bool {
    let mut subset = Vec::with_capacity(k);
    subsets_consistent_from(board, model, variables, k, 0, &mut subset)
}

fn subsets_consistent_from(
    board: &Board,
    model: &CspModel,
    variables: &[Cell],
    k: usize,
    start: usize,
    subset: &mut Vec<Cell>,
) -> bool {
    if subset.len() == k {
        return subset_consistent(board, model, subset);
    }
    for i in start..variables.len() {
        subset.push(variables[i]);
        let ok = subsets_consistent_from(board, model, variables, k, i + 1, subset);
        subset.pop();
        if !ok {
            return false;
        }
    }
    true
}

/// A subset is inconsistent only through a line that contains all of it and
/// whose filled cells are multiple and identical
fn subset_consistent(board: &Board, model: &CspModel, subset: &[Cell]) -> bool {
    for line in &model.constraints {
        if !subset.iter().all(|&cell| line.contains(cell)) {
            continue;
        }
        let filled: Vec<Player> = line
            .cells()
            .iter()
            .filter_map(|&cell| board.get(cell).to_player())
            .collect();
        if filled.len() > 1 && filled.iter().all(|&p| p == filled[0]) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_filled_value() {
        let board = Board::from_string("XX./O../...").unwrap();
        let model = CspModel::new(&board);

        // row 0: two X, one empty
        let row0 = model.constraints[0].cells();
        assert_eq!(uniform_filled_value(&board, row0), Some(Player::X));

        // row 2: all empty
        let row2 = model.constraints[2].cells();
        assert_eq!(uniform_filled_value(&board, row2), None);

        // col 0: X and O mixed
        let col0 = model.constraints[3].cells();
        assert_eq!(uniform_filled_value(&board, col0), None);
    }

    #[test]
    fn test_constraint_propagation_narrows_to_blocked_cell() {
        // Row 0 strips X from (0, 2) and the O on the anti diagonal strips
        // its O; the cell ends with the smallest domain and is scanned first.
        let board = Board::from_string("XX./O../O..").unwrap();
        assert_eq!(constraint_propagation(&board), Some(Cell::new(0, 2)));
    }

    #[test]
    fn test_constraint_propagation_full_board() {
        let board = Board::from_string("XOX/XOO/OXX").unwrap();
        assert_eq!(constraint_propagation(&board), None);
    }

    #[test]
    fn test_constraint_propagation_untouched_domains_tie_row_major() {
        let board = Board::new(3);
        assert_eq!(constraint_propagation(&board), Some(Cell::new(0, 0)));
    }

    #[test]
    fn test_revise_requires_differing_support() {
        let board = Board::from_string("X../.../...").unwrap();
        let mut model = CspModel::new(&board);

        // Against a full domain every value has support.
        assert!(!revise(&mut model, Cell::new(0, 1), Cell::new(0, 2)));

        // Shrink (0, 2) to {X}: the X of (0, 1) loses its support.
        model
            .domains
            .get_mut(&Cell::new(0, 2))
            .unwrap()
            .remove(Player::O);
        assert!(revise(&mut model, Cell::new(0, 1), Cell::new(0, 2)));
        let remaining: Vec<Player> = model.domains[&Cell::new(0, 1)].iter().collect();
        assert_eq!(remaining, vec![Player::O]);
    }

    #[test]
    fn test_enforce_arc_consistency_reports_wipeout() {
        // Full domains always support each other, so a wipeout needs
        // pre-shrunk domains: two cells on row 0 both pinned to X cannot be
        // made to differ and the first revision empties one of them.
        let board = Board::from_string("X../.../...").unwrap();
        let mut model = CspModel::new(&board);
        for cell in [Cell::new(0, 1), Cell::new(0, 2)] {
            model.domains.get_mut(&cell).unwrap().remove(Player::O);
        }
        assert!(!enforce_arc_consistency(&mut model, &board));
    }

    #[test]
    fn test_arc_consistency_single_empty() {
        let board = Board::from_string("XOX/XOO/OX.").unwrap();
        assert_eq!(arc_consistency(&board), Some(Cell::new(2, 2)));
    }

    #[test]
    fn test_arc_consistency_full_board() {
        let board = Board::from_string("XOX/XOO/OXX").unwrap();
        assert_eq!(arc_consistency(&board), None);
    }

    #[test]
    fn test_arc_consistency_empty_board() {
        // Full domains always have a differing support; nothing is revised.
        let board = Board::new(3);
        assert_eq!(arc_consistency(&board), Some(Cell::new(0, 0)));
    }

    #[test]
    fn test_k_consistency_passes_clean_board() {
        let board = Board::from_string("XO./OX./...").unwrap();
        assert_eq!(k_consistency(&board, DEFAULT_K), Some(Cell::new(0, 2)));
    }

    #[test]
    fn test_k_consistency_rejects_uniform_pair_on_line() {
        // Row 0 carries two identical filled cells plus two empty cells, so
        // the 2-subset {(0, 2), (0, 3)} lies inside an inconsistent line.
        let board = Board::from_string("XX../..../..../OO..").unwrap();
        assert_eq!(k_consistency(&board, 2), None);
    }

    #[test]
    fn test_k_consistency_trivial_when_k_exceeds_empties() {
        let board = Board::from_string("XOX/XOO/OX.").unwrap();
        // only one empty cell; k = 2 is trivially consistent
        assert_eq!(k_consistency(&board, 2), Some(Cell::new(2, 2)));
    }

    #[test]
    fn test_k_consistency_full_board() {
        let board = Board::from_string("XOX/XOO/OXX").unwrap();
        assert_eq!(k_consistency(&board, DEFAULT_K), None);
    }
}
