//! Min-conflicts local search

use rand::{Rng, prelude::IndexedRandom};

use crate::{
    board::{Board, Cell, Player},
    csp::model::CspModel,
    csp::search::Assignment,
};

/// Default iteration bound for [`min_conflicts`]
pub const DEFAULT_MAX_STEPS: usize = 100;

/// Randomized min-conflicts search.
///
/// Every empty cell starts with a uniformly random value from its domain.
/// Each step recomputes per-cell conflict counts; zero conflicts everywhere
/// means success and the first empty cell (row-major) is recommended.
/// Otherwise one uniformly random conflicted cell is reassigned to its
/// minimum-conflict value (domain order, strict improvement). Exhausting
/// `max_steps` yields `None`.
///
/// This is the only non-deterministic strategy; callers inject the rng so
/// tests can seed a `StdRng` and replay outcomes.
pub fn min_conflicts<R: Rng + ?Sized>(
    board: &Board,
    max_steps: usize,
    rng: &mut R,
) -> Option<Cell> {
    let model = CspModel::new(board);
    let empty_cells = board.empty_cells();

    let mut assignment = Assignment::new();
    for &cell in &empty_cells {
        let values: Vec<Player> = model.domains[&cell].iter().collect();
        let value = values.choose(rng).copied()?;
        assignment.insert(cell, value);
    }

    for step in 0..max_steps {
        let conflicted: Vec<Cell> = empty_cells
            .iter()
            .copied()
            .filter(|&cell| count_conflicts(board, &model, cell, assignment[&cell]) > 0)
            .collect();

        if conflicted.is_empty() {
            let result = empty_cells.first().copied();
            log::debug!("min_conflicts: converged after {step} steps, {result:?}");
            return result;
        }

        let &victim = conflicted
            .choose(rng)
            .expect("conflicted cells are non-empty");

        let mut best: Option<(Player, usize)> = None;
        for value in model.domains[&victim].iter() {
            let conflicts = count_conflicts(board, &model, victim, value);
            if best.is_none_or(|(_, fewest)| conflicts < fewest) {
                best = Some((value, conflicts));
            }
        }
        if let Some((value, _)) = best {
            assignment.insert(victim, value);
        }
    }

    log::debug!("min_conflicts: no convergence within {max_steps} steps");
    None
}

/// Conflicts of holding `value` at `cell`: filled board cells with the same
/// symbol, counted once per shared constraint line
fn count_conflicts(board: &Board, model: &CspModel, cell: Cell, value: Player) -> usize {
    let target = value.to_symbol();
    model
        .lines_through(cell)
        .map(|line| {
            line.cells()
                .iter()
                .filter(|&&neighbor| neighbor != cell && board.get(neighbor) == target)
                .count()
        })
        .sum()
}
