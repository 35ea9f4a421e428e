//! Turn a maze mask into a graph of walkable cells and find routes through it.
//!
//! ```
//! use maskpath::{astar, Graph, Grid, Point, SearchConfig};
//!
//! let grid = Grid::filled(5, 5, 1)?;
//! let graph = Graph::build(&grid);
//! let outcome = astar(&graph, Point::new(1, 1), Point::new(3, 3), &SearchConfig::default())?;
//!
//! assert_eq!(outcome.result.path.len(), 3);
//! # Ok::<(), maskpath::MazeError>(())
//! ```

pub mod bfs;
pub mod direction;
pub mod error;
pub mod find;
pub mod graph;
pub mod grid;
pub mod palette;
pub mod util;

pub use bfs::{bfs_path, reachable};
pub use direction::Direction;
pub use error::{MazeError, Result};
pub use find::{
    astar, octile, CostModel, PathFinder, PathFinderState, PathResult, SearchConfig,
    SearchOutcome, Visited, VisitedItem,
};
pub use graph::{Graph, GraphStats, Link, NodeEntry, NodeId, NodeStorage};
pub use grid::{Grid, Point, OBSTACLE};
pub use palette::{Marker, MarkerPalette};
