//! CSP model construction: variables, domains, and constraint lines

use std::collections::HashMap;

use crate::{
    board::{Board, Cell, Player},
    lines::{Line, all_lines},
};

const X_BIT: u8 = 0b01;
const O_BIT: u8 = 0b10;

/// A set of candidate values for one variable.
///
/// Iteration order is fixed (X before O) so every non-randomized strategy is
/// reproducible; tie-breaks that depend on value order are a deliberate
/// policy, not an artifact of hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainSet {
    bits: u8,
}

impl DomainSet {
    /// The full domain `{X, O}`
    pub fn full() -> Self {
        DomainSet {
            bits: X_BIT | O_BIT,
        }
    }

    /// A single-value domain
    pub fn singleton(player: Player) -> Self {
        DomainSet {
            bits: Self::bit(player),
        }
    }

    fn bit(player: Player) -> u8 {
        match player {
            Player::X => X_BIT,
            Player::O => O_BIT,
        }
    }

    pub fn contains(&self, player: Player) -> bool {
        self.bits & Self::bit(player) != 0
    }

    /// Remove a value; returns whether it was present
    pub fn remove(&mut self, player: Player) -> bool {
        let bit = Self::bit(player);
        let present = self.bits & bit != 0;
        self.bits &= !bit;
        present
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Values in the documented order: X first, then O
    pub fn iter(&self) -> impl Iterator<Item = Player> + use<> {
        let set = *self;
        [Player::X, Player::O]
            .into_iter()
            .filter(move |&p| set.contains(p))
    }
}

/// Request-scoped CSP state: one domain per cell plus the constraint lines.
///
/// Rebuilt from the board snapshot at the start of every strategy call and
/// discarded at its end; nothing persists across calls.
#[derive(Debug, Clone)]
pub struct CspModel {
    pub domains: HashMap<Cell, DomainSet>,
    pub constraints: Vec<Line>,
}

impl CspModel {
    /// Build domains and constraints for a board snapshot.
    ///
    /// Empty cells get `{X, O}`; filled cells get the singleton of their
    /// current mark. Constraints cover every row, column, and both diagonals
    /// and depend only on the size.
    pub fn new(board: &Board) -> Self {
        let size = board.size();
        let mut domains = HashMap::with_capacity(size * size);

        for row in 0..size {
            for col in 0..size {
                let cell = Cell::new(row, col);
                let domain = match board.get(cell).to_player() {
                    Some(player) => DomainSet::singleton(player),
                    None => DomainSet::full(),
                };
                domains.insert(cell, domain);
            }
        }

        CspModel {
            domains,
            constraints: all_lines(size),
        }
    }

    /// Constraint lines that run through a cell
    pub fn lines_through(&self, cell: Cell) -> impl Iterator<Item = &Line> {
        self.constraints.iter().filter(move |line| line.contains(cell))
    }

    /// The empty cell with the smallest remaining domain.
    ///
    /// Row-major scan; ties keep the first cell seen. `None` when the board
    /// has no empty cells.
    pub fn smallest_domain_cell(&self, board: &Board) -> Option<Cell> {
        let mut selected: Option<(Cell, usize)> = None;
        for cell in board.empty_cells() {
            let len = self.domains[&cell].len();
            if selected.is_none_or(|(_, best)| len < best) {
                selected = Some((cell, len));
            }
        }
        selected.map(|(cell, _)| cell)
    }
}

/// Degree-heuristic strategy: pick the empty cell constrained together with
/// the most other empty cells.
///
/// Degree of a cell = sum over every line through it of the number of other
/// empty cells on that line. Strict maximum, first-seen row-major tie-break.
pub fn degree_heuristic(board: &Board) -> Option<Cell> {
    let model = CspModel::new(board);

    let mut selected: Option<(Cell, usize)> = None;
    for cell in board.empty_cells() {
        let degree: usize = model
            .lines_through(cell)
            .map(|line| {
                line.cells()
                    .iter()
                    .filter(|&&other| other != cell && board.is_empty_at(other))
                    .count()
            })
            .sum();
        if selected.is_none_or(|(_, best)| degree > best) {
            selected = Some((cell, degree));
        }
    }

    let result = selected.map(|(cell, _)| cell);
    log::debug!("degree_heuristic: {result:?}");
    result
}
