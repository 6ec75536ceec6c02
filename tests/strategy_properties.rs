//! Cross-strategy properties shared by the seven CSP strategies

use kibitz::{Board, Cell, Strategy, arc_consistency, degree_heuristic, k_consistency};
use rand::{SeedableRng, rngs::StdRng};

fn deterministic_strategies() -> impl Iterator<Item = Strategy> {
    Strategy::all()
        .into_iter()
        .filter(|s| !s.is_randomized())
}

#[test]
fn deterministic_strategies_return_the_single_empty_cell() {
    let boards = [
        ("XOX/XOO/OX.", Cell::new(2, 2)),
        (".OX/XOO/OXX", Cell::new(0, 0)),
        ("XO/.X", Cell::new(1, 0)),
    ];

    for (encoded, expected) in boards {
        let board = Board::from_string(encoded).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        for strategy in deterministic_strategies() {
            assert_eq!(
                strategy.recommend(&board, &mut rng),
                Some(expected),
                "strategy {strategy} on {encoded}"
            );
        }
    }
}

#[test]
fn every_strategy_returns_none_on_a_full_board() {
    let board = Board::from_string("XOX/XOO/OXX").unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    for strategy in Strategy::all() {
        assert_eq!(
            strategy.recommend(&board, &mut rng),
            None,
            "strategy {strategy}"
        );
    }
}

#[test]
fn every_recommendation_is_an_empty_cell() {
    let boards = [
        "...../...../...../...../.....",
        "X..../.O.../..X../...O./....X",
        "XO./OX./...",
        "XX../OO../..../....",
    ];

    for encoded in boards {
        let board = Board::from_string(encoded).unwrap();
        let empties = board.empty_cells();
        for strategy in Strategy::all() {
            for seed in 0..5 {
                let mut rng = StdRng::seed_from_u64(seed);
                if let Some(cell) = strategy.recommend(&board, &mut rng) {
                    assert!(
                        empties.contains(&cell),
                        "strategy {strategy} on {encoded} (seed {seed}) returned occupied {cell}"
                    );
                }
            }
        }
    }
}

#[test]
fn strategies_never_mutate_the_board() {
    let encoded = "X.O/.X./O..";
    let board = Board::from_string(encoded).unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    for strategy in Strategy::all() {
        let _ = strategy.recommend(&board, &mut rng);
        assert_eq!(board.encode(), encoded, "strategy {strategy} mutated board");
    }
}

#[test]
fn deterministic_strategies_are_reproducible() {
    let board = Board::from_string("X.O/.X./O..").unwrap();
    let mut rng = StdRng::seed_from_u64(9);
    for strategy in deterministic_strategies() {
        let first = strategy.recommend(&board, &mut rng);
        let second = strategy.recommend(&board, &mut rng);
        assert_eq!(first, second, "strategy {strategy} not reproducible");
    }
}

#[test]
fn degree_heuristic_maximizes_shared_empty_cells() {
    // 3x3 empty board: center degree 8 (four lines, two other empties each)
    // beats corners (6) and edges (4).
    assert_eq!(degree_heuristic(&Board::new(3)), Some(Cell::new(1, 1)));

    // 5x5: center sits on four full-length lines.
    assert_eq!(degree_heuristic(&Board::new(5)), Some(Cell::new(2, 2)));
}

#[test]
fn arc_consistency_selects_from_the_empty_cell_set() {
    for encoded in ["XO./OX./...", "X.O/.../O.X", "..../..../..../...."] {
        let board = Board::from_string(encoded).unwrap();
        let result = arc_consistency(&board);
        let cell = result.expect("full two-value domains never wipe out");
        assert!(board.empty_cells().contains(&cell), "board {encoded}");
    }
}

#[test]
fn k_consistency_aborts_on_a_uniform_filled_line() {
    // Row 0 holds two identical X marks and still has two empty cells, so
    // some 2-subset of empties lies entirely inside the inconsistent line.
    let board = Board::from_string("XX../..../..../....").unwrap();
    assert_eq!(k_consistency(&board, 2), None);

    // The mixed-symbol version of the same shape passes.
    let board = Board::from_string("XO../..../..../....").unwrap();
    assert!(k_consistency(&board, 2).is_some());
}

#[test]
fn min_conflicts_respects_the_step_budget_and_cell_set() {
    let board = Board::from_string("X.X/.O./X.X").unwrap();
    let empties = board.empty_cells();
    for seed in 0..30 {
        let mut rng = StdRng::seed_from_u64(seed);
        // zero budget can never converge
        assert_eq!(kibitz::min_conflicts(&board, 0, &mut rng), None);

        let mut rng = StdRng::seed_from_u64(seed);
        if let Some(cell) = kibitz::min_conflicts(&board, 100, &mut rng) {
            assert!(empties.contains(&cell), "seed {seed} returned {cell}");
        }
    }
}
