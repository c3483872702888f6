use std::fmt;

use crate::{coord::Coordinate, grid::CellState};

/// An owned, read-only copy of one generation, for anything that draws the board.
///
/// A snapshot never changes after it's taken and holds no reference back
/// into the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    rows: usize,
    cols: usize,
    generation: u64,
    cells: Box<[CellState]>,
}

impl Snapshot {
    pub(crate) fn new(rows: usize, cols: usize, generation: u64, cells: &[CellState]) -> Self {
        Self {
            rows,
            cols,
            generation,
            cells: cells.into(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// How many generations had been advanced when this snapshot was taken.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cell<C>(&self, coordinate: C) -> Option<CellState>
    where
        C: Into<Coordinate>,
    {
        let Coordinate { row, col } = coordinate.into();
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col).copied()
    }

    /// `false` for coordinates outside the grid.
    pub fn is_alive<C>(&self, coordinate: C) -> bool
    where
        C: Into<Coordinate>,
    {
        self.cell(coordinate).is_some_and(CellState::is_alive)
    }

    pub fn enumerate_cells(&self) -> impl Iterator<Item = (Coordinate, CellState)> + '_ {
        self.cells.iter().enumerate().map(|(index, cell)| {
            let coordinate = Coordinate {
                row: index / self.cols,
                col: index % self.cols,
            };
            (coordinate, *cell)
        })
    }

    pub fn alive_cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.enumerate_cells()
            .filter(|(_, cell)| cell.is_alive())
            .map(|(coordinate, _)| coordinate)
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    pub fn rows_iter(&self) -> impl Iterator<Item = &[CellState]> + '_ {
        self.cells.chunks(self.cols)
    }
}

/// One line per row, `#` for alive and `.` for dead.
impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows_iter() {
            for cell in row {
                let symbol = match cell {
                    CellState::Alive => '#',
                    CellState::Dead => '.',
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
