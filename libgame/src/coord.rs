use std::fmt;

/// A cell address on the grid, `row` counted from the top and `col` from the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl From<[usize; 2]> for Coordinate {
    fn from(value: [usize; 2]) -> Self {
        Self {
            row: value[0],
            col: value[1],
        }
    }
}

impl From<Coordinate> for [usize; 2] {
    fn from(value: Coordinate) -> Self {
        [value.row, value.col]
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_from_row_col_pairs() {
        assert_eq!(Coordinate::from((2, 5)), Coordinate::new(2, 5));
        assert_eq!(Coordinate::from([2, 5]), Coordinate::new(2, 5));
        assert_eq!(<[usize; 2]>::from(Coordinate::new(2, 5)), [2, 5]);
    }
}
