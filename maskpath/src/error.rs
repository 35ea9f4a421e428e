//! Error types for maskpath

use thiserror::Error;

use crate::grid::Point;

/// Everything that can go wrong while building a graph or searching it
#[derive(Error, Debug)]
pub enum MazeError {
    #[error("Malformed grid: {rows}x{columns} does not match {found} cells")]
    MalformedGrid {
        rows: usize,
        columns: usize,
        found: usize,
    },

    #[error("Grid of {rows}x{columns} cells is too large")]
    TooLarge { rows: usize, columns: usize },

    #[error("Malformed grid: row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid direction: {0}")]
    InvalidDirection(String),

    #[error("Cell {0} is not in the graph")]
    CellNotInGraph(Point),

    #[error("No path from {start} to {goal}")]
    NoPath { start: Point, goal: Point },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, MazeError>;
