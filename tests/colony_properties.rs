//! Behavioral properties of the colony search.
//!
//! Each test states the property it tries to falsify.

use antpath::colony::INITIAL_PHEROMONE;
use antpath::prelude::*;
use proptest::prelude::*;
use std::collections::HashSet;

fn open_grid(w: i32, h: i32, adjacency: Adjacency) -> GridGraph {
    GridGraph::build(w, h, &ObstacleSet::new(), adjacency).unwrap()
}

fn params(n_ants: usize, n_iter: usize) -> ColonyParams {
    ColonyParams {
        n_ants,
        n_iter,
        report_every: 0,
        ..Default::default()
    }
}

fn assert_valid_path(graph: &GridGraph, path: &AntPath, source: Cell, sink: Cell) {
    assert_eq!(path.nodes.first().copied(), Some(source));
    assert_eq!(path.nodes.last().copied(), Some(sink));

    let unique: HashSet<Cell> = path.nodes.iter().copied().collect();
    assert_eq!(unique.len(), path.nodes.len(), "path revisits a cell");

    let cost = graph.path_cost(&path.nodes).expect("every hop is an edge");
    assert!((cost - path.cost).abs() < 1e-9);
    assert_eq!(path.steps(), path.nodes.len() - 1);
}

// Falsification: a field entry differs between (u, v) and (v, u)
#[test]
fn field_is_symmetric_after_search() {
    let graph = open_grid(6, 6, Adjacency::Eight);
    let mut search = ColonySearch::new(&graph, params(20, 15), 9).unwrap();
    let outcome = search.search(Cell::new(0, 0), Cell::new(5, 4)).unwrap();

    for edge in graph.edges() {
        let forward = outcome.pheromone.get(&graph, edge.a, edge.b);
        let backward = outcome.pheromone.get(&graph, edge.b, edge.a);
        assert!(forward.is_some());
        assert_eq!(forward, backward);
    }

    let report = outcome.to_report(&graph);
    for pair in report.pheromone.chunks(2) {
        assert_eq!(pair[0].from, pair[1].to);
        assert_eq!(pair[0].to, pair[1].from);
        assert_eq!(pair[0].weight, pair[1].weight);
    }
}

// Falsification: some weight ends up zero, negative or non-finite
#[test]
fn field_stays_positive() {
    let graph = open_grid(8, 8, Adjacency::Eight);
    let p = ColonyParams {
        rho: 0.9,
        ..params(10, 40)
    };
    let mut search = ColonySearch::new(&graph, p, 77).unwrap();
    let outcome = search.search(Cell::new(0, 7), Cell::new(7, 0)).unwrap();

    assert!(outcome.pheromone.check(40).is_ok());
    assert!(outcome
        .pheromone
        .weights()
        .iter()
        .all(|&w| w.is_finite() && w > 0.0));
}

// Falsification: an unreachable sink deposits pheromone or reports a path
#[test]
fn enclosed_sink_only_evaporates() {
    let obstacles: ObstacleSet = [Cell::new(3, 3), Cell::new(3, 4), Cell::new(4, 3)]
        .into_iter()
        .collect();
    let graph = GridGraph::build(5, 5, &obstacles, Adjacency::Eight).unwrap();
    assert!(graph.neighbors(graph.node_index(Cell::new(4, 4)).unwrap()).is_empty());

    let n_iter = 7;
    let rho = 0.2;
    let p = ColonyParams {
        rho,
        ..params(25, n_iter)
    };
    let mut search = ColonySearch::new(&graph, p, 3).unwrap();
    let outcome = search.search(Cell::new(0, 0), Cell::new(4, 4)).unwrap();

    assert!(!outcome.found());
    assert!(outcome.history.iter().all(|s| s.successes == 0));
    assert!(outcome.best_cost_trace().iter().all(Option::is_none));

    let mut expected = INITIAL_PHEROMONE;
    for _ in 0..n_iter {
        expected *= 1.0 - rho;
    }
    assert!(outcome.pheromone.weights().iter().all(|&w| w == expected));
}

// Falsification: the same seed gives two different runs
#[test]
fn same_seed_same_run() {
    let graph = open_grid(7, 7, Adjacency::Eight);
    let run = |seed| {
        let mut search = ColonySearch::new(&graph, params(15, 12), seed).unwrap();
        search.search(Cell::new(0, 3), Cell::new(6, 3)).unwrap()
    };

    let a = run(1234);
    let b = run(1234);
    assert_eq!(a.pheromone, b.pheromone);
    assert_eq!(a.best, b.best);
    assert_eq!(a.history, b.history);

    let c = run(1235);
    assert_ne!(a.pheromone, c.pheromone);
}

// Falsification: a successful ant walks through a wall or repeats a cell
#[test]
fn best_path_is_simple_and_open() {
    let obstacles: ObstacleSet = (1..6).map(|y| Cell::new(4, y)).collect();
    let graph = GridGraph::build(8, 7, &obstacles, Adjacency::Eight).unwrap();
    let source = Cell::new(0, 3);
    let sink = Cell::new(7, 3);

    let mut search = ColonySearch::new(&graph, params(30, 30), 5).unwrap();
    let outcome = search.search(source, sink).unwrap();
    let best = outcome.best.as_ref().expect("wall has gaps at both ends");

    assert_valid_path(&graph, best, source, sink);
    assert!(best.nodes.iter().all(|c| !obstacles.contains(c)));
    assert!(best.cost >= source.distance_to(sink));
}

// Falsification: the colony misses a route whose every simple path is optimal
#[test]
fn ring_route_has_fixed_cost() {
    let obstacles: ObstacleSet = std::iter::once(Cell::new(1, 1)).collect();
    let graph = GridGraph::build(3, 3, &obstacles, Adjacency::Four).unwrap();

    let mut search = ColonySearch::new(&graph, params(10, 5), 21).unwrap();
    let outcome = search.search(Cell::new(0, 0), Cell::new(2, 2)).unwrap();

    assert_eq!(outcome.best_cost(), Some(4.0));
    assert!(outcome.history.iter().all(|s| s.successes == 10));
}

// Falsification: a step cap shorter than any route still yields a path
#[test]
fn step_cap_discards_long_walks() {
    let graph = open_grid(10, 1, Adjacency::Four);
    let capped = ColonyParams {
        max_steps: 8,
        ..params(10, 3)
    };
    let mut search = ColonySearch::new(&graph, capped, 1).unwrap();
    assert!(!search.search(Cell::new(0, 0), Cell::new(9, 0)).unwrap().found());

    let exact = ColonyParams {
        max_steps: 9,
        ..params(10, 3)
    };
    let mut search = ColonySearch::new(&graph, exact, 1).unwrap();
    assert_eq!(
        search.search(Cell::new(0, 0), Cell::new(9, 0)).unwrap().best_cost(),
        Some(9.0)
    );
}

#[test]
fn invalid_params_rejected_before_search() {
    let graph = open_grid(3, 3, Adjacency::Eight);
    let p = ColonyParams {
        rho: -0.1,
        ..params(5, 5)
    };
    assert!(ColonySearch::new(&graph, p, 0).is_err());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn any_found_path_is_valid(
        seed in any::<u64>(),
        w in 2i32..7,
        h in 2i32..7,
        diagonal in any::<bool>(),
    ) {
        let graph = open_grid(w, h, Adjacency::from_diagonal(diagonal));
        let source = Cell::new(0, 0);
        let sink = Cell::new(w - 1, h - 1);
        let mut search = ColonySearch::new(&graph, params(8, 6), seed).unwrap();
        let outcome = search.search(source, sink).unwrap();

        if let Some(best) = &outcome.best {
            assert_valid_path(&graph, best, source, sink);
        }
        prop_assert!(outcome.pheromone.check(0).is_ok());
        prop_assert_eq!(outcome.history.len(), 6);
    }
}
