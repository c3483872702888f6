use std::mem;

use itertools::Itertools;
use rand::Rng;

use crate::{boundary::Boundary, coord::Coordinate, error::GridError};

/// Dense row-major storage for every cell of a fixed-size board.
///
/// Outside this crate a grid can be built and read, but cells only change
/// through [`Engine`](crate::Engine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// An all-dead grid.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        // The cell count must also fit in a single allocation.
        let len = rows
            .checked_mul(cols)
            .filter(|len| *len > 0 && *len <= isize::MAX as usize)
            .ok_or(GridError::InvalidDimension { rows, cols })?;

        Ok(Self {
            rows,
            cols,
            cells: vec![CellState::Dead; len],
        })
    }

    /// A grid where every cell is independently alive with probability `fill_probability`.
    pub fn new_random<R>(
        rows: usize,
        cols: usize,
        fill_probability: f64,
        rng: &mut R,
    ) -> Result<Self, GridError>
    where
        R: Rng + ?Sized,
    {
        let mut grid = Self::new(rows, cols)?;
        grid.fill_random(fill_probability, rng)?;
        Ok(grid)
    }

    /// A grid with exactly the listed cells alive.
    pub fn with_alive_cells<I, C>(rows: usize, cols: usize, alive: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = C>,
        C: Into<Coordinate>,
    {
        let mut grid = Self::new(rows, cols)?;
        for coordinate in alive {
            *grid.cell_mut(coordinate)? = CellState::Alive;
        }
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell<C>(&self, coordinate: C) -> Option<CellState>
    where
        C: Into<Coordinate>,
    {
        let index = self.index(coordinate.into())?;
        self.cells.get(index).copied()
    }

    pub fn enumerate_cells(&self) -> impl Iterator<Item = (Coordinate, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, cell)| (self.index_to_coordinate(index), *cell))
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    pub fn is_active(&self) -> bool {
        self.cells.iter().any(|cell| cell.is_alive())
    }

    pub(crate) fn cells(&self) -> &[CellState] {
        &self.cells
    }

    pub(crate) fn cell_mut<C>(&mut self, coordinate: C) -> Result<&mut CellState, GridError>
    where
        C: Into<Coordinate>,
    {
        let coordinate = coordinate.into();
        let (rows, cols) = (self.rows, self.cols);

        self.index(coordinate)
            .and_then(|index| self.cells.get_mut(index))
            .ok_or(GridError::OutOfBounds {
                coordinate,
                rows,
                cols,
            })
    }

    pub(crate) fn fill(&mut self, state: CellState) {
        self.cells.fill(state);
    }

    pub(crate) fn fill_random<R>(
        &mut self,
        fill_probability: f64,
        rng: &mut R,
    ) -> Result<(), GridError>
    where
        R: Rng + ?Sized,
    {
        // Also rejects NaN.
        if !(0.0..=1.0).contains(&fill_probability) {
            return Err(GridError::InvalidFillProbability(fill_probability));
        }

        for cell in &mut self.cells {
            *cell = CellState::from(rng.random_bool(fill_probability));
        }

        Ok(())
    }

    /// Live cells in the Moore neighborhood of `coordinate`, which must be on the grid.
    pub(crate) fn alive_neighbors(&self, coordinate: Coordinate, boundary: Boundary) -> usize {
        (-1isize..=1)
            .cartesian_product(-1isize..=1)
            .filter(|&offset| offset != (0, 0))
            .filter_map(|(d_row, d_col)| {
                let row = boundary.resolve(coordinate.row, d_row, self.rows)?;
                let col = boundary.resolve(coordinate.col, d_col, self.cols)?;
                self.cell((row, col))
            })
            .filter(|cell| cell.is_alive())
            .count()
    }

    /// Swaps in a fully computed next generation. `next` receives the previous cells.
    pub(crate) fn swap_cells(&mut self, next: &mut Vec<CellState>) {
        debug_assert_eq!(next.len(), self.cells.len());
        mem::swap(&mut self.cells, next);
    }

    fn index(&self, coordinate: Coordinate) -> Option<usize> {
        let Coordinate { row, col } = coordinate;

        if row >= self.rows {
            return None;
        }

        if col >= self.cols {
            return None;
        }

        Some(row * self.cols + col)
    }

    fn index_to_coordinate(&self, index: usize) -> Coordinate {
        Coordinate {
            row: index / self.cols,
            col: index % self.cols,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    Alive,

    #[default]
    Dead,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }

    pub fn toggled(self) -> Self {
        match self {
            CellState::Alive => CellState::Dead,
            CellState::Dead => CellState::Alive,
        }
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn rejects_empty_dimensions() {
        assert_eq!(
            Grid::new(0, 4),
            Err(GridError::InvalidDimension { rows: 0, cols: 4 })
        );
        assert_eq!(
            Grid::new(4, 0),
            Err(GridError::InvalidDimension { rows: 4, cols: 0 })
        );
    }

    #[test]
    fn rejects_dimensions_that_overflow() {
        assert_eq!(
            Grid::new(usize::MAX, 2),
            Err(GridError::InvalidDimension {
                rows: usize::MAX,
                cols: 2,
            })
        );
        assert!(Grid::new(usize::MAX / 2 + 1, 1).is_err());
    }

    #[test]
    fn indexes_row_major() {
        let grid = Grid::with_alive_cells(2, 3, [(1, 2)]).unwrap();

        assert_eq!(grid.cells()[5], CellState::Alive);
        assert_eq!(grid.cell((1, 2)), Some(CellState::Alive));
        assert_eq!(grid.cell((2, 0)), None);
        assert_eq!(grid.cell((0, 3)), None);

        let coordinates: Vec<_> = grid.enumerate_cells().map(|(c, _)| c).collect();
        assert_eq!(coordinates.len(), 6);
        assert_eq!(coordinates[4], Coordinate::new(1, 1));
    }

    #[test]
    fn with_alive_cells_rejects_outside_coordinates() {
        let err = Grid::with_alive_cells(3, 3, [(0, 0), (3, 1)]).unwrap_err();
        assert_eq!(
            err,
            GridError::OutOfBounds {
                coordinate: Coordinate::new(3, 1),
                rows: 3,
                cols: 3,
            }
        );
    }

    #[test]
    fn random_fill_checks_probability() {
        let mut rng = StdRng::seed_from_u64(7);

        for bad in [-0.1, 1.5, f64::NAN] {
            assert!(matches!(
                Grid::new_random(4, 4, bad, &mut rng),
                Err(GridError::InvalidFillProbability(_))
            ));
        }
    }

    #[test]
    fn random_fill_is_roughly_proportional() {
        let mut rng = StdRng::seed_from_u64(42);
        let grid = Grid::new_random(100, 100, 0.3, &mut rng).unwrap();

        let alive = grid.alive_count();
        assert!((2_500..3_500).contains(&alive), "{alive} alive cells");
    }

    #[test]
    fn corner_neighbors_depend_on_boundary() {
        // Every cell alive: the corner sees 3 neighbors when bounded, 8 when wrapped.
        let all = (0..4usize).cartesian_product(0..4usize);
        let grid = Grid::with_alive_cells(4, 4, all).unwrap();

        assert_eq!(grid.alive_neighbors(Coordinate::new(0, 0), Boundary::Bounded), 3);
        assert_eq!(grid.alive_neighbors(Coordinate::new(0, 2), Boundary::Bounded), 5);
        assert_eq!(grid.alive_neighbors(Coordinate::new(1, 1), Boundary::Bounded), 8);
        assert_eq!(grid.alive_neighbors(Coordinate::new(0, 0), Boundary::Toroidal), 8);
    }
}
