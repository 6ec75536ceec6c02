//! Constraint lines: rows, columns, and diagonals

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Cell;

/// Which line of the board a constraint covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineKind {
    Row(usize),
    Col(usize),
    MainDiagonal,
    AntiDiagonal,
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineKind::Row(i) => write!(f, "row_{i}"),
            LineKind::Col(j) => write!(f, "col_{j}"),
            LineKind::MainDiagonal => write!(f, "diag_main"),
            LineKind::AntiDiagonal => write!(f, "diag_anti"),
        }
    }
}

/// A named ordered sequence of cells evaluated together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    kind: LineKind,
    cells: Vec<Cell>,
}

impl Line {
    pub fn kind(&self) -> LineKind {
        self.kind
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }
}

/// Build every constraint line for a board of the given size.
///
/// Order is stable: rows top to bottom, columns left to right, then the main
/// and anti diagonals. Lines depend only on the size, never on contents.
pub fn all_lines(size: usize) -> Vec<Line> {
    let mut lines = Vec::with_capacity(2 * size + 2);

    for row in 0..size {
        lines.push(Line {
            kind: LineKind::Row(row),
            cells: (0..size).map(|col| Cell::new(row, col)).collect(),
        });
    }

    for col in 0..size {
        lines.push(Line {
            kind: LineKind::Col(col),
            cells: (0..size).map(|row| Cell::new(row, col)).collect(),
        });
    }

    lines.push(Line {
        kind: LineKind::MainDiagonal,
        cells: (0..size).map(|i| Cell::new(i, i)).collect(),
    });
    lines.push(Line {
        kind: LineKind::AntiDiagonal,
        cells: (0..size).map(|i| Cell::new(i, size - 1 - i)).collect(),
    });

    lines
}
