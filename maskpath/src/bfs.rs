use std::collections::VecDeque;

use log::debug;

use crate::error::{MazeError, Result};
use crate::find::PathResult;
use crate::graph::{Graph, NodeId, NodeStorage};
use crate::grid::Point;

/// Breadth-first expansion from `start`, recording the predecessor of every
/// reached node. Stops early once `goal` is dequeued.
fn expand(graph: &Graph, start: NodeId, goal: Option<NodeId>) -> NodeStorage<Option<NodeId>> {
    let mut from: NodeStorage<Option<NodeId>> = graph.create_storage();
    let mut seen: NodeStorage<bool> = graph.create_storage();
    let mut queue = VecDeque::from([start]);
    *seen.get_mut(start) = true;

    while let Some(current) = queue.pop_front() {
        if Some(current) == goal {
            break;
        }

        for &(neighbor, _) in graph.neighbors(current) {
            if *seen.get(neighbor) {
                continue;
            }
            *seen.get_mut(neighbor) = true;
            *from.get_mut(neighbor) = Some(current);
            queue.push_back(neighbor);
        }
    }

    from
}

/// Find the route with the fewest steps between two nodes, ignoring the
/// length of diagonal steps while searching. `total_cost` of the result is
/// the geometric length of the route found.
pub fn bfs_path(graph: &Graph, start: Point, goal: Point) -> Result<PathResult> {
    let start_id = graph
        .node_id(start)
        .ok_or(MazeError::CellNotInGraph(start))?;
    let goal_id = graph
        .node_id(goal)
        .ok_or(MazeError::CellNotInGraph(goal))?;

    let from = expand(graph, start_id, Some(goal_id));

    let mut path = vec![goal];
    let mut current = goal_id;
    while current != start_id {
        current = (*from.get(current)).ok_or(MazeError::NoPath { start, goal })?;
        path.push(graph.point(current));
    }
    path.reverse();

    let mut result = PathResult {
        path,
        start,
        goal,
        total_cost: 0.0,
    };
    result.total_cost = result.directions().iter().map(|d| d.length()).sum();

    debug!(
        "bfs path from {} to {}: {} steps",
        start,
        goal,
        result.steps()
    );

    Ok(result)
}

/// Flood fill: every node connected to `start`, including `start` itself, in
/// the order they were reached.
pub fn reachable(graph: &Graph, start: Point) -> Result<Vec<Point>> {
    let start_id = graph
        .node_id(start)
        .ok_or(MazeError::CellNotInGraph(start))?;

    let from = expand(graph, start_id, None);

    let mut cells = vec![start];
    cells.extend(
        from.iter()
            .filter(|(_, f)| f.is_some())
            .map(|(id, _)| graph.point(id)),
    );

    Ok(cells)
}
