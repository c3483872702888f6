use rand::Rng;

pub use boundary::Boundary;
pub use coord::Coordinate;
pub use error::GridError;
pub use grid::{CellState, Grid};
pub use rule::{Rule, RuleParseError};
pub use snapshot::Snapshot;

pub mod boundary;
pub mod coord;
pub mod error;
pub mod grid;
pub mod rule;
pub mod snapshot;

/// Owns the authoritative grid and applies the transition rule to it.
///
/// All mutation goes through `&mut self`, so a caller holding a [`Snapshot`]
/// or a shared reference can never see a half-advanced generation. The engine
/// does no locking of its own; a driver that shares it between threads wraps
/// it in a lock and holds that lock for a whole operation.
#[derive(Debug, Clone)]
pub struct Engine {
    grid: Grid,
    rule: Rule,
    boundary: Boundary,
    generation: u64,

    // Back buffer for `advance_generation`, kept to avoid reallocating every tick.
    next_cells: Vec<CellState>,
}

impl Engine {
    pub fn new(grid: Grid) -> Self {
        let next_cells = Vec::with_capacity(grid.cells().len());

        Self {
            grid,
            rule: Rule::default(),
            boundary: Boundary::default(),
            generation: 0,
            next_cells,
        }
    }

    /// Builds a `rows` x `cols` engine with each cell alive with probability `fill_probability`.
    pub fn initialize<R>(
        rows: usize,
        cols: usize,
        fill_probability: f64,
        rng: &mut R,
    ) -> Result<Self, GridError>
    where
        R: Rng + ?Sized,
    {
        let grid = Grid::new_random(rows, cols, fill_probability, rng)?;
        Ok(Self::new(grid))
    }

    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rule = rule;
        self
    }

    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    /// Generations advanced since the board was last filled or cleared.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cell<C>(&self, coordinate: C) -> Option<CellState>
    where
        C: Into<Coordinate>,
    {
        self.grid.cell(coordinate)
    }

    pub fn alive_count(&self) -> usize {
        self.grid.alive_count()
    }

    /// Refills the existing grid at random. On error the board is left untouched.
    pub fn randomize<R>(&mut self, fill_probability: f64, rng: &mut R) -> Result<(), GridError>
    where
        R: Rng + ?Sized,
    {
        self.grid.fill_random(fill_probability, rng)?;
        self.generation = 0;
        Ok(())
    }

    /// Kills every cell in place.
    pub fn clear(&mut self) {
        self.grid.fill(CellState::Dead);
        self.generation = 0;
    }

    /// Flips one cell and returns its new state.
    pub fn toggle<C>(&mut self, coordinate: C) -> Result<CellState, GridError>
    where
        C: Into<Coordinate>,
    {
        let cell = self.grid.cell_mut(coordinate)?;
        *cell = cell.toggled();
        Ok(*cell)
    }

    pub fn set_cell<C>(&mut self, coordinate: C, state: CellState) -> Result<(), GridError>
    where
        C: Into<Coordinate>,
    {
        *self.grid.cell_mut(coordinate)? = state;
        Ok(())
    }

    /// Live cells among the 8 surrounding `coordinate`, resolved with the engine's boundary policy.
    pub fn count_alive_neighbors<C>(&self, coordinate: C) -> Result<usize, GridError>
    where
        C: Into<Coordinate>,
    {
        let coordinate = coordinate.into();

        if self.grid.cell(coordinate).is_none() {
            return Err(GridError::OutOfBounds {
                coordinate,
                rows: self.grid.rows(),
                cols: self.grid.cols(),
            });
        }

        Ok(self.grid.alive_neighbors(coordinate, self.boundary))
    }

    /// Computes every next state from the current generation, then swaps it in whole.
    pub fn advance_generation(&mut self) {
        let Self {
            grid,
            rule,
            boundary,
            generation,
            next_cells,
        } = self;

        next_cells.clear();
        next_cells.extend(grid.enumerate_cells().map(|(coordinate, cell)| {
            rule.next_state(cell, grid.alive_neighbors(coordinate, *boundary))
        }));

        grid.swap_cells(next_cells);
        *generation += 1;
    }

    pub fn is_active(&self) -> bool {
        self.grid.is_active()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.grid.rows(),
            self.grid.cols(),
            self.generation,
            self.grid.cells(),
        )
    }
}
