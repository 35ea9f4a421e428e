use maskpath::{
    astar, bfs_path, octile, reachable, CostModel, Graph, Grid, MazeError, Point, SearchConfig,
};
use proptest::prelude::*;
use proptest::sample::Index;

fn grid_strategy() -> impl Strategy<Value = Grid> {
    (3usize..12, 3usize..12).prop_flat_map(|(rows, columns)| {
        prop::collection::vec(prop::bool::weighted(0.7), rows * columns).prop_map(move |cells| {
            let cells = cells.into_iter().map(|walkable| u8::from(walkable) * 225).collect();
            Grid::new(rows, columns, cells).unwrap()
        })
    })
}

fn interior(grid: &Grid, a: Index, b: Index) -> (Point, Point) {
    let (rows, columns) = grid.dimensions();
    let pick = |i: Index| {
        let n = i.index((rows - 2) * (columns - 2));
        Point::new(1 + n / (columns - 2), 1 + n % (columns - 2))
    };
    (pick(a), pick(b))
}

proptest! {
    #[test]
    fn links_are_symmetric(grid in grid_strategy()) {
        let graph = Graph::build(&grid);

        for id in 0..graph.node_count() {
            for &(n, d) in graph.neighbors(id) {
                prop_assert!(graph.neighbors(n).contains(&(id, d.reverse())));
            }
        }
        prop_assert_eq!(graph.stats().edges % 2, 0);
    }

    #[test]
    fn only_walkable_cells_are_nodes(grid in grid_strategy()) {
        let graph = Graph::build(&grid);

        for (point, _) in grid.iter() {
            prop_assert_eq!(graph.contains(point), grid.is_walkable(point));
        }
    }

    #[test]
    fn border_is_never_linked(grid in grid_strategy()) {
        let graph = Graph::build(&grid);

        for &p in graph.points() {
            let neighbors: Vec<_> = graph.neighbors_of(p).unwrap().collect();
            if !grid.is_interior(p) {
                prop_assert!(neighbors.is_empty());
            }
            for (n, d) in neighbors {
                prop_assert!(grid.is_interior(n));
                prop_assert_eq!(p.step(d), Some(n));
            }
        }
    }

    #[test]
    fn open_grid_cost_is_octile(rows in 3usize..16, columns in 3usize..16, a in any::<Index>(), b in any::<Index>()) {
        let grid = Grid::filled(rows, columns, 1).unwrap();
        let graph = Graph::build(&grid);
        let (start, goal) = interior(&grid, a, b);

        for cost_model in [CostModel::Octile, CostModel::Direction] {
            let outcome = astar(&graph, start, goal, &SearchConfig { cost_model }).unwrap();
            prop_assert!((outcome.result.total_cost - octile(start, goal)).abs() < 1e-9);
        }
    }

    #[test]
    fn search_matches_flood_fill(grid in grid_strategy(), a in any::<Index>(), b in any::<Index>()) {
        let graph = Graph::build(&grid);
        let (start, goal) = interior(&grid, a, b);
        let result = astar(&graph, start, goal, &SearchConfig::default());

        if !graph.contains(start) {
            prop_assert!(matches!(result, Err(MazeError::CellNotInGraph(c)) if c == start));
            return Ok(());
        }
        if !graph.contains(goal) {
            prop_assert!(matches!(result, Err(MazeError::CellNotInGraph(c)) if c == goal));
            return Ok(());
        }

        let connected = reachable(&graph, start).unwrap().contains(&goal);
        match result {
            Ok(outcome) => {
                prop_assert!(connected);

                let path = &outcome.result.path;
                prop_assert_eq!(path.first(), Some(&start));
                prop_assert_eq!(path.last(), Some(&goal));
                for w in path.windows(2) {
                    let linked = graph.neighbors_of(w[0]).unwrap().any(|(n, _)| n == w[1]);
                    prop_assert!(linked, "{} and {} are not linked", w[0], w[1]);
                }

                // never worse than the fewest-steps route, never better than a straight line
                let bfs = bfs_path(&graph, start, goal).unwrap();
                prop_assert!(outcome.result.total_cost <= bfs.total_cost + 1e-9);
                prop_assert!(octile(start, goal) <= outcome.result.total_cost + 1e-9);
            }
            Err(MazeError::NoPath { .. }) => prop_assert!(!connected),
            Err(e) => prop_assert!(false, "unexpected error {}", e),
        }
    }
}
