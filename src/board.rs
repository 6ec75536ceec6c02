//! Board state representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::lines::all_lines;

/// A coordinate on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Cell { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Content of a board square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    Empty,
    X,
    O,
}

impl Symbol {
    pub fn to_char(self) -> char {
        match self {
            Symbol::Empty => '.',
            Symbol::X => 'X',
            Symbol::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Symbol> {
        match c {
            '.' | ' ' => Some(Symbol::Empty),
            'X' | 'x' => Some(Symbol::X),
            'O' | 'o' | '0' => Some(Symbol::O),
            _ => None,
        }
    }

    /// The player whose mark this is, if any
    pub fn to_player(self) -> Option<Player> {
        match self {
            Symbol::X => Some(Player::X),
            Symbol::O => Some(Player::O),
            Symbol::Empty => None,
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to the symbol it places
    pub fn to_symbol(self) -> Symbol {
        match self {
            Player::X => Symbol::X,
            Player::O => Symbol::O,
        }
    }
}

/// An n-by-n board snapshot.
///
/// The board is a value: strategies receive it by reference and never mutate
/// it; hypothetical moves go through [`Board::place`], which returns a copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<Symbol>,
}

impl Board {
    /// Create an empty board
    pub fn new(size: usize) -> Self {
        Board {
            size,
            cells: vec![Symbol::Empty; size * size],
        }
    }

    /// Create a board from a string representation.
    ///
    /// Rows are separated by `/` or newlines; `.` marks an empty cell. All
    /// rows must have the same length as the row count (the board is square).
    ///
    /// # Errors
    ///
    /// Returns error if the string has no rows, a row's length differs from
    /// the number of rows, or any character is not a valid cell.
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let rows: Vec<&str> = s
            .split(['/', '\n'])
            .map(str::trim)
            .filter(|row| !row.is_empty())
            .collect();

        if rows.is_empty() {
            return Err(crate::Error::EmptyBoard {
                context: s.to_string(),
            });
        }

        let size = rows.len();
        let mut board = Board::new(size);
        for (row, row_str) in rows.iter().enumerate() {
            let chars: Vec<char> = row_str.chars().collect();
            if chars.len() != size {
                return Err(crate::Error::InvalidRowLength {
                    row,
                    got: chars.len(),
                    expected: size,
                    context: s.to_string(),
                });
            }
            for (col, &c) in chars.iter().enumerate() {
                let symbol =
                    Symbol::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                        character: c,
                        row,
                        col,
                        context: s.to_string(),
                    })?;
                board.cells[row * size + col] = symbol;
            }
        }

        Ok(board)
    }

    /// Board dimension
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get the symbol at a cell
    pub fn get(&self, cell: Cell) -> Symbol {
        self.cells[cell.row * self.size + cell.col]
    }

    /// Overwrite the symbol at a cell
    pub fn set(&mut self, cell: Cell, symbol: Symbol) {
        self.cells[cell.row * self.size + cell.col] = symbol;
    }

    /// Check if a cell is empty
    pub fn is_empty_at(&self, cell: Cell) -> bool {
        self.get(cell) == Symbol::Empty
    }

    /// Check if every cell is filled
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Symbol::Empty)
    }

    /// All empty cells in row-major order
    pub fn empty_cells(&self) -> Vec<Cell> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &symbol)| symbol == Symbol::Empty)
            .map(|(i, _)| Cell::new(i / self.size, i % self.size))
            .collect()
    }

    /// Place a player's mark and return the resulting board
    #[must_use = "place returns a new board; the original is unchanged"]
    pub fn place(&self, cell: Cell, player: Player) -> Result<Board, crate::Error> {
        if cell.row >= self.size || cell.col >= self.size {
            return Err(crate::Error::OutOfBounds {
                row: cell.row,
                col: cell.col,
                size: self.size,
            });
        }
        if !self.is_empty_at(cell) {
            return Err(crate::Error::CellOccupied {
                row: cell.row,
                col: cell.col,
            });
        }

        let mut next = self.clone();
        next.set(cell, player.to_symbol());
        Ok(next)
    }

    /// Check if a player holds a complete row, column, or diagonal
    pub fn has_won(&self, player: Player) -> bool {
        let target = player.to_symbol();
        all_lines(self.size)
            .iter()
            .any(|line| line.cells().iter().all(|&cell| self.get(cell) == target))
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        if self.has_won(Player::X) {
            Some(Player::X)
        } else if self.has_won(Player::O) {
            Some(Player::O)
        } else {
            None
        }
    }

    /// Check if the position is over (win or full board)
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// Canonical string form, rows joined with `/`
    pub fn encode(&self) -> String {
        self.cells
            .chunks(self.size)
            .map(|row| row.iter().map(|&s| s.to_char()).collect::<String>())
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.size).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for &symbol in row {
                write!(f, "{}", symbol.to_char())?;
            }
        }
        Ok(())
    }
}
