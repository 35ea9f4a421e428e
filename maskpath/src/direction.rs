use std::{f64::consts::SQRT_2, fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::MazeError;

/// One of the eight compass directions a step on the grid can take.
///
/// Rows grow downwards, so `N` decreases the row and `E` increases the column.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    /// The half of the compass that is checked when linking cells. The other
    /// four directions are the reverses of these.
    pub const FORWARD: [Direction; 4] = [Direction::NE, Direction::E, Direction::SE, Direction::S];

    /// The direction pointing back the way this one came.
    pub fn reverse(self) -> Direction {
        match self {
            Direction::N => Direction::S,
            Direction::NE => Direction::SW,
            Direction::E => Direction::W,
            Direction::SE => Direction::NW,
            Direction::S => Direction::N,
            Direction::SW => Direction::NE,
            Direction::W => Direction::E,
            Direction::NW => Direction::SE,
        }
    }

    /// Unit `(row, col)` offset of a step in this direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::N => (-1, 0),
            Direction::NE => (-1, 1),
            Direction::E => (0, 1),
            Direction::SE => (1, 1),
            Direction::S => (1, 0),
            Direction::SW => (1, -1),
            Direction::W => (0, -1),
            Direction::NW => (-1, -1),
        }
    }

    pub fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::NE | Direction::SE | Direction::SW | Direction::NW
        )
    }

    /// Geometric length of one step: 1 orthogonally, √2 diagonally.
    pub fn length(self) -> f64 {
        if self.is_diagonal() {
            SQRT_2
        } else {
            1.0
        }
    }

    /// The direction that moves by exactly `(d_row, d_col)`, if there is one.
    pub fn from_delta(d_row: isize, d_col: isize) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|d| d.delta() == (d_row, d_col))
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Direction::N => "N",
                Direction::NE => "NE",
                Direction::E => "E",
                Direction::SE => "SE",
                Direction::S => "S",
                Direction::SW => "SW",
                Direction::W => "W",
                Direction::NW => "NW",
            }
        )
    }
}

impl FromStr for Direction {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "N" => Ok(Direction::N),
            "NE" => Ok(Direction::NE),
            "E" => Ok(Direction::E),
            "SE" => Ok(Direction::SE),
            "S" => Ok(Direction::S),
            "SW" => Ok(Direction::SW),
            "W" => Ok(Direction::W),
            "NW" => Ok(Direction::NW),
            _ => Err(MazeError::InvalidDirection(s.to_string())),
        }
    }
}
