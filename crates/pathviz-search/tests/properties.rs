use std::collections::HashSet;

use pathviz_core::{Board, CellState};
use pathviz_search::{Algorithm, Search, Status, manhattan, run, trace_path};
use proptest::prelude::*;

/// A random board with walls and distinct start and goal cells.
fn arb_board() -> impl Strategy<Value = Board> {
    (1i32..9, 2i32..9)
        .prop_flat_map(|(rows, cols)| {
            let n = (rows * cols) as usize;
            (
                Just(rows),
                Just(cols),
                prop::collection::vec(prop::bool::weighted(0.3), n),
                0..n,
                0..n - 1,
            )
        })
        .prop_map(|(rows, cols, walls, s, g)| {
            // Shift the goal index past the start so the two never collide.
            let g = if g >= s { g + 1 } else { g };
            let mut board = Board::new(rows, cols);
            for (i, pos) in board.bounds().iter().enumerate() {
                let state = if i == s {
                    CellState::Start
                } else if i == g {
                    CellState::Goal
                } else if walls[i] {
                    CellState::Wall
                } else {
                    CellState::Empty
                };
                board.set(pos, state).unwrap();
            }
            board
        })
}

fn algorithm() -> impl Strategy<Value = Algorithm> {
    prop::sample::select(Algorithm::ALL.to_vec())
}

proptest! {
    #[test]
    fn discoveries_are_unique_and_goal_is_never_frontier(board in arb_board(), algorithm in algorithm()) {
        let mut board = board;
        let (start, goal) = board.endpoints().unwrap();
        let mut search = Search::new(algorithm, start, goal);
        let mut seen = HashSet::new();
        while let Some(d) = search.step(&mut board) {
            prop_assert!(seen.insert(d.pos), "{} discovered twice", d.pos);
            prop_assert_ne!(d.pos, start);
            prop_assert_eq!(d.marked, d.pos != goal);
        }
        prop_assert_eq!(board.get(goal), Some(CellState::Goal));
        prop_assert_eq!(board.get(start), Some(CellState::Start));
        let unmarked = usize::from(seen.contains(&goal));
        prop_assert_eq!(board.count(CellState::Frontier), seen.len() - unmarked);
    }

    #[test]
    fn found_routes_are_walkable(board in arb_board(), algorithm in algorithm()) {
        let mut board = board;
        let (start, goal) = board.endpoints().unwrap();
        let mut search = Search::new(algorithm, start, goal);
        if search.finish(&mut board) == Status::Found {
            let path = trace_path(start, goal, search.records()).unwrap();
            prop_assert_eq!(path.first(), Some(&start));
            prop_assert_eq!(path.last(), Some(&goal));
            for w in path.windows(2) {
                prop_assert_eq!(manhattan(w[0], w[1]), 1);
            }
            for p in &path {
                prop_assert_ne!(board.get(*p), Some(CellState::Wall));
            }
        }
    }

    #[test]
    fn algorithms_agree_on_reachability(board in arb_board()) {
        let bfs = run(&mut board.clone(), Algorithm::Bfs).unwrap();
        let greedy = run(&mut board.clone(), Algorithm::Greedy).unwrap();
        let astar = run(&mut board.clone(), Algorithm::Astar).unwrap();
        prop_assert_eq!(bfs.found, greedy.found);
        prop_assert_eq!(bfs.found, astar.found);
        prop_assert_eq!(bfs.path_length, astar.path_length);
        prop_assert!(greedy.path_length >= bfs.path_length);
    }
}
