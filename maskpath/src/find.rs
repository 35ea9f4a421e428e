use std::{
    cmp::Ordering,
    collections::BinaryHeap,
    f64::consts::SQRT_2,
    fmt::Display,
    ops::{Deref, DerefMut},
};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::error::{MazeError, Result};
use crate::graph::{Graph, NodeId, NodeStorage};
use crate::grid::Point;

/// Extra cost of a diagonal step compared to two orthogonal ones (√2 - 2)
pub const DIAGONAL_DISCOUNT: f64 = SQRT_2 - 2.0;

/// Octile distance: the length of the shortest route between two cells on an
/// unobstructed grid where orthogonal steps cost 1 and diagonal steps √2.
pub fn octile(a: Point, b: Point) -> f64 {
    let dx = a.row.abs_diff(b.row) as f64;
    let dy = a.col.abs_diff(b.col) as f64;
    dx + dy + DIAGONAL_DISCOUNT * dx.min(dy)
}

/// How much a single step along a link costs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostModel {
    /// The octile distance between the two cells, i.e. the heuristic doubles
    /// as the step cost.
    #[default]
    Octile,
    /// The geometric length of the direction stored on the link.
    Direction,
}

impl CostModel {
    pub fn step_cost(self, from: Point, to: Point, direction: Direction) -> f64 {
        match self {
            CostModel::Octile => octile(from, to),
            CostModel::Direction => direction.length(),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub cost_model: CostModel,
}

/// The objects that we store in the priority queue
#[derive(Debug)]
struct ToVisit {
    priority: f64,
    // insertion counter, keeps equal priorities in FIFO order
    sequence: u64,
    cost: f64,
    node: NodeId,
}

impl Ord for ToVisit {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed for BinaryHeap to be a min-heap
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for ToVisit {
    fn partial_cmp(&self, other: &ToVisit) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ToVisit {
    fn eq(&self, other: &ToVisit) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ToVisit {}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisitedItem {
    /// Best known cost from the start
    pub cost: f64,
    /// Predecessor on the best known route, `None` for the start
    pub from: Option<NodeId>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Visited(Option<VisitedItem>);

impl Deref for Visited {
    type Target = Option<VisitedItem>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl DerefMut for Visited {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
impl Display for Visited {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(item) => write!(f, "{:6.2}", item.cost),
            None => write!(f, "{:6}", ""),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct PathResult {
    pub path: Vec<Point>,
    pub start: Point,
    pub goal: Point,
    pub total_cost: f64,
}

impl PathResult {
    /// Number of steps taken, one less than the number of cells.
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// The directions taken between consecutive cells of the path.
    pub fn directions(&self) -> Vec<Direction> {
        self.path
            .windows(2)
            .filter_map(|w| w[0].direction_to(w[1]))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PathFinderState {
    Computing,
    NoPathFound,
    PathFound(PathResult),
}

impl PathFinderState {
    pub fn is_done(&self) -> bool {
        !matches!(self, PathFinderState::Computing)
    }
}

/// A* search over a [`Graph`] that can be driven one frontier pop at a time.
///
/// All search state is owned by the finder, so any number of finders can run
/// over the same graph.
#[derive(Debug)]
pub struct PathFinder<'g> {
    graph: &'g Graph,
    config: SearchConfig,
    start: NodeId,
    goal: NodeId,
    visited: NodeStorage<Visited>,
    visit_list: BinaryHeap<ToVisit>,
    sequence: u64,
    state: PathFinderState,
}

impl<'g> PathFinder<'g> {
    /// Prepare a search from `start` to `goal`. Fails with
    /// [`MazeError::CellNotInGraph`] when either end is not a node.
    pub fn new(graph: &'g Graph, start: Point, goal: Point, config: SearchConfig) -> Result<Self> {
        let start_id = graph
            .node_id(start)
            .ok_or(MazeError::CellNotInGraph(start))?;
        let goal_id = graph
            .node_id(goal)
            .ok_or(MazeError::CellNotInGraph(goal))?;

        let mut visited: NodeStorage<Visited> = graph.create_storage();
        *visited.get_mut(start_id) = Visited(Some(VisitedItem {
            cost: 0.0,
            from: None,
        }));

        Ok(Self {
            graph,
            config,
            start: start_id,
            goal: goal_id,
            visited,
            visit_list: BinaryHeap::from([ToVisit {
                priority: 0.0,
                sequence: 0,
                cost: 0.0,
                node: start_id,
            }]),
            sequence: 1,
            state: PathFinderState::Computing,
        })
    }

    /// Run the search until it either reaches the goal or runs out of cells.
    pub fn finish(mut self) -> (PathFinderState, NodeStorage<Visited>) {
        loop {
            match self.step() {
                PathFinderState::Computing => {}
                s => return (s, self.visited),
            }
        }
    }

    /// Pop one entry off the frontier and expand it.
    pub fn step(&mut self) -> PathFinderState {
        if self.state.is_done() {
            return self.state.clone();
        }

        let Some(visit) = self.visit_list.pop() else {
            debug!(
                "frontier exhausted, no path from {} to {}",
                self.start(),
                self.goal()
            );
            self.state = PathFinderState::NoPathFound;
            return self.state.clone();
        };

        let current_cost = match **self.visited.get(visit.node) {
            Some(item) => item.cost,
            None => return self.state.clone(),
        };

        // a cheaper route to this node was pushed after this entry
        if visit.cost > current_cost {
            return self.state.clone();
        }

        if visit.node == self.goal {
            self.state = match self.backtrack() {
                Some(path) => {
                    info!(
                        "found path from {} to {}: {} steps, cost {:.3}",
                        self.start(),
                        self.goal(),
                        path.len() - 1,
                        current_cost
                    );
                    PathFinderState::PathFound(PathResult {
                        path,
                        start: self.start(),
                        goal: self.goal(),
                        total_cost: current_cost,
                    })
                }
                None => PathFinderState::NoPathFound,
            };
            return self.state.clone();
        }

        let graph = self.graph;
        let current = graph.point(visit.node);
        let goal = self.goal();

        for &(neighbor, direction) in graph.neighbors(visit.node) {
            let next = graph.point(neighbor);
            let new_cost = current_cost + self.config.cost_model.step_cost(current, next, direction);

            let slot = self.visited.get_mut(neighbor);
            if matches!(**slot, Some(item) if item.cost <= new_cost) {
                continue;
            }
            *slot = Visited(Some(VisitedItem {
                cost: new_cost,
                from: Some(visit.node),
            }));

            self.visit_list.push(ToVisit {
                priority: new_cost + octile(next, goal),
                sequence: self.sequence,
                cost: new_cost,
                node: neighbor,
            });
            self.sequence += 1;
        }

        self.state.clone()
    }

    /// Follow the predecessor chain from the goal back to the start.
    fn backtrack(&self) -> Option<Vec<Point>> {
        let mut path = vec![self.goal()];
        let mut current = self.goal;

        while current != self.start {
            current = (**self.visited.get(current))?.from?;
            path.push(self.graph.point(current));
        }

        path.reverse();
        Some(path)
    }

    pub fn state(&self) -> &PathFinderState {
        &self.state
    }

    pub fn get_visited(&self) -> &NodeStorage<Visited> {
        &self.visited
    }

    pub fn start(&self) -> Point {
        self.graph.point(self.start)
    }

    pub fn goal(&self) -> Point {
        self.graph.point(self.goal)
    }
}

/// A successful search: the route and the cost map it was read from.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub result: PathResult,
    pub costs: NodeStorage<Visited>,
}

impl SearchOutcome {
    /// Best known cost from the start to `point`, if the search reached it.
    pub fn cost_of(&self, graph: &Graph, point: Point) -> Option<f64> {
        let id = graph.node_id(point)?;
        (**self.costs.get(id)).map(|item| item.cost)
    }

    /// Number of cells that received a cost during the search.
    pub fn reached(&self) -> usize {
        self.costs.iter().filter(|(_, v)| v.is_some()).count()
    }
}

/// Find the cheapest route from `start` to `goal` with A*.
pub fn astar(graph: &Graph, start: Point, goal: Point, config: &SearchConfig) -> Result<SearchOutcome> {
    let (state, costs) = PathFinder::new(graph, start, goal, *config)?.finish();

    match state {
        PathFinderState::PathFound(result) => Ok(SearchOutcome { result, costs }),
        _ => Err(MazeError::NoPath { start, goal }),
    }
}
