use std::fmt::Display;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::grid::{Grid, Point, OBSTACLE};

/// Dense index of a walkable cell, assigned in row-major order while building.
pub type NodeId = usize;

/// Walkable cells of a [`Grid`] and the 8-directional links between them.
///
/// Nodes live in an arena indexed by [`NodeId`]; a per-cell lookup table maps
/// grid coordinates to node ids so no hashing happens while searching. Every
/// link is stored in both directions: if `(b, d)` is a neighbor of `a` then
/// `(a, d.reverse())` is a neighbor of `b`. Cells on the outer ring of the
/// grid may be nodes but never take part in a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    rows: usize,
    columns: usize,
    nodes: Vec<Point>,
    lookup: Vec<Option<NodeId>>,
    adjacency: Vec<Vec<(NodeId, Direction)>>,
}

/// Size of a built graph, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub nodes: usize,
    /// Number of adjacency entries, i.e. every link counted from both ends
    pub edges: usize,
    /// Number of undirected links
    pub links: usize,
}

/// One neighbor of a cell in the exported adjacency list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub cell: Point,
    pub direction: Direction,
}

/// One cell of the exported adjacency list with all of its neighbors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeEntry {
    pub cell: Point,
    pub neighbors: Vec<Link>,
}

impl Graph {
    /// Turn every non-obstacle cell of `grid` into a node and link each node
    /// to its walkable interior neighbors.
    ///
    /// Registration of all nodes finishes before any link is made. Links are
    /// then made in a single pass probing only [`Direction::FORWARD`] from each
    /// node, adding the reverse entry at the same time.
    pub fn build(grid: &Grid) -> Self {
        let (rows, columns) = grid.dimensions();

        let mut nodes = Vec::new();
        let mut lookup = vec![None; rows * columns];

        for (point, value) in grid.iter() {
            if value != OBSTACLE {
                lookup[point.row * columns + point.col] = Some(nodes.len());
                nodes.push(point);
            }
        }

        let mut adjacency: Vec<Vec<(NodeId, Direction)>> = vec![Vec::new(); nodes.len()];

        for (source_id, &source) in nodes.iter().enumerate() {
            if !grid.is_interior(source) {
                continue;
            }

            for direction in Direction::FORWARD {
                let Some(target) = source.step(direction) else {
                    continue;
                };
                if !grid.is_interior(target) {
                    continue;
                }
                let Some(target_id) = lookup[target.row * columns + target.col] else {
                    continue;
                };

                adjacency[source_id].push((target_id, direction));
                adjacency[target_id].push((source_id, direction.reverse()));
            }
        }

        let graph = Self {
            rows,
            columns,
            nodes,
            lookup,
            adjacency,
        };

        let stats = graph.stats();
        debug!(
            "built graph for {}x{} grid: {} nodes, {} links",
            rows, columns, stats.nodes, stats.links
        );

        graph
    }

    /// `(height, width)` of the grid this graph was built from
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn stats(&self) -> GraphStats {
        let edges = self.adjacency.iter().map(Vec::len).sum::<usize>();
        GraphStats {
            nodes: self.nodes.len(),
            edges,
            links: edges / 2,
        }
    }

    pub fn node_id(&self, point: Point) -> Option<NodeId> {
        if point.row >= self.rows || point.col >= self.columns {
            return None;
        }
        self.lookup[point.row * self.columns + point.col]
    }

    pub fn contains(&self, point: Point) -> bool {
        self.node_id(point).is_some()
    }

    /// Coordinates of a node.
    ///
    /// Panics if `id` was not handed out by this graph.
    pub fn point(&self, id: NodeId) -> Point {
        self.nodes[id]
    }

    /// All nodes in registration order.
    pub fn points(&self) -> &[Point] {
        &self.nodes
    }

    /// Neighbors of a node in the order they were linked.
    pub fn neighbors(&self, id: NodeId) -> &[(NodeId, Direction)] {
        &self.adjacency[id]
    }

    /// Neighbors of the node at `point`, or `None` when `point` is not a node.
    pub fn neighbors_of(
        &self,
        point: Point,
    ) -> Option<impl Iterator<Item = (Point, Direction)> + '_> {
        let id = self.node_id(point)?;
        Some(
            self.adjacency[id]
                .iter()
                .map(|&(n, direction)| (self.nodes[n], direction)),
        )
    }

    /// Create per-node storage for values of type T, initialised to the default
    pub fn create_storage<T: Default + Clone>(&self) -> NodeStorage<T> {
        NodeStorage(vec![T::default(); self.nodes.len()])
    }

    /// The graph as a plain adjacency list keyed by cell, in row-major order.
    pub fn adjacency(&self) -> Vec<NodeEntry> {
        self.nodes
            .iter()
            .zip(&self.adjacency)
            .map(|(&cell, neighbors)| NodeEntry {
                cell,
                neighbors: neighbors
                    .iter()
                    .map(|&(n, direction)| Link {
                        cell: self.nodes[n],
                        direction,
                    })
                    .collect(),
            })
            .collect()
    }

    /// Lay per-node values out on the grid, one line per row. Cells that are
    /// not nodes are left blank, every column is as wide as the widest value.
    pub fn render_storage<T: Display>(&self, storage: &NodeStorage<T>) -> String {
        let values: Vec<String> = storage.0.iter().map(|v| v.to_string()).collect();
        let width = values.iter().map(|v| v.chars().count()).max().unwrap_or(0);

        let mut out = String::new();
        for row in 0..self.rows {
            let line: Vec<String> = (0..self.columns)
                .map(|col| match self.node_id(Point::new(row, col)) {
                    Some(id) => format!("{:>width$}", values[id]),
                    None => " ".repeat(width),
                })
                .collect();
            out.push_str(&line.join(" "));
            out.push('\n');
        }
        out
    }
}

impl Display for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (cell, neighbors) in self.nodes.iter().zip(&self.adjacency) {
            write!(f, "{}: [", cell)?;
            for (i, (n, direction)) in neighbors.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "({}, {})", self.nodes[*n], direction)?;
            }
            writeln!(f, "]")?;
        }

        Ok(())
    }
}

/// Per-node values indexed by [`NodeId`]
#[derive(Debug, Clone)]
pub struct NodeStorage<T>(Vec<T>);

impl<T> NodeStorage<T> {
    pub fn get(&self, node: NodeId) -> &T {
        &self.0[node]
    }

    pub fn get_mut(&mut self, node: NodeId) -> &mut T {
        &mut self.0[node]
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &T)> {
        self.0.iter().enumerate()
    }
}
