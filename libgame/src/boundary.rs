use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How neighbor lookups behave past the edge of the grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Boundary {
    /// Positions outside the grid are treated as dead cells.
    #[default]
    Bounded,

    /// The grid wraps around on both axes, so the top row neighbors the bottom row
    /// and the leftmost column neighbors the rightmost one.
    Toroidal,
}

impl Boundary {
    /// Resolves `center + delta` on an axis of length `len`.
    pub(crate) fn resolve(self, center: usize, delta: isize, len: usize) -> Option<usize> {
        match self {
            Boundary::Bounded => center.checked_add_signed(delta).filter(|pos| *pos < len),
            Boundary::Toroidal => {
                // `len` is at least 1 and `delta` is in -1..=1, so this can't underflow.
                let shifted = (center + len) as isize + delta;
                Some(shifted as usize % len)
            }
        }
    }
}
