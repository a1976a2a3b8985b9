use tui_match3::core::{
    attempt_swap, find_hint, find_matches, has_match, init_grid, resolve, EngineConfig, Grid,
    ScoreBoard, ScriptedSource, SimpleRng, SwapOutcome,
};
use tui_match3::types::{Direction, Position, TileKind};

fn every_adjacent_pair(size: u8) -> Vec<(Position, Position)> {
    let mut pairs = Vec::new();
    for row in 0..size {
        for col in 0..size {
            let a = Position::new(row, col);
            for dir in [Direction::Right, Direction::Down] {
                if let Some(b) = a.step(dir).filter(|b| b.row < size && b.col < size) {
                    pairs.push((a, b));
                }
            }
        }
    }
    pairs
}

#[test]
fn fair_start_has_no_match_for_many_seeds() {
    for (kinds, size) in [(6u8, 8u8), (4, 8), (3, 5), (6, 16)] {
        let config = EngineConfig::default()
            .with_grid_size(size)
            .with_tile_kinds(kinds);
        for seed in 0..100u32 {
            let grid = init_grid(&config, &mut SimpleRng::new(seed));
            assert!(grid.is_settled(), "seed {} left an empty cell", seed);
            assert!(
                !has_match(&grid, config.min_run),
                "seed {} ({}x{}, {} kinds) starts with a match:\n{}",
                seed,
                size,
                size,
                kinds,
                grid
            );
            assert!(grid
                .cells()
                .iter()
                .flatten()
                .all(|kind| kind.index() < kinds));
        }
    }
}

#[test]
fn same_seed_same_board() {
    let config = EngineConfig::default();
    let a = init_grid(&config, &mut SimpleRng::new(2024));
    let b = init_grid(&config, &mut SimpleRng::new(2024));
    assert_eq!(a, b);
}

#[test]
fn rejected_swaps_leave_the_grid_untouched() {
    let config = EngineConfig::default();
    for seed in 0..20u32 {
        let original = init_grid(&config, &mut SimpleRng::new(seed));
        for (a, b) in every_adjacent_pair(config.grid_size) {
            let mut grid = original.clone();
            let outcome = attempt_swap(&mut grid, a, b, config.min_run);
            match outcome {
                SwapOutcome::Accepted { ref matched } => {
                    assert!(!matched.is_empty());
                    assert!(matched.contains(a) || matched.contains(b));
                    assert_eq!(grid.tile(a), original.tile(b));
                    assert_eq!(grid.tile(b), original.tile(a));
                }
                SwapOutcome::NoMatch => assert_eq!(grid, original),
                SwapOutcome::NotAdjacent => panic!("{:?} and {:?} are neighbours", a, b),
            }
        }
    }
}

#[test]
fn non_adjacent_swap_is_refused() {
    let mut grid = Grid::parse("BLLA/SBAL/ASBS/BABL").unwrap();
    let before = grid.clone();
    for (a, b) in [
        (Position::new(0, 0), Position::new(1, 1)),
        (Position::new(0, 0), Position::new(0, 2)),
        (Position::new(2, 2), Position::new(2, 2)),
    ] {
        assert_eq!(attempt_swap(&mut grid, a, b, 3), SwapOutcome::NotAdjacent);
        assert_eq!(grid, before);
    }
}

#[test]
fn swap_into_row_zero_reports_exactly_the_run() {
    let mut grid = Grid::parse("BLLA/SBAL/ASBS/BABL").unwrap();
    let outcome = attempt_swap(&mut grid, Position::new(0, 3), Position::new(1, 3), 3);
    let matched = outcome.matched().unwrap();
    assert_eq!(
        matched.as_slice(),
        &[Position::new(0, 1), Position::new(0, 2), Position::new(0, 3)]
    );
    assert_eq!(grid.to_string(), "BLLL\nSBAA\nASBS\nBABL");
}

#[test]
fn detection_is_idempotent_and_read_only() {
    let grid = Grid::parse("LLLB/SBAB/ASBB/BABL").unwrap();
    let before = grid.clone();
    let first = find_matches(&grid, 3);
    let second = find_matches(&grid, 3);
    assert_eq!(first, second);
    assert_eq!(grid, before);
    // Row 0 run plus column 3 run share no cell.
    assert_eq!(first.len(), 6);
}

#[test]
fn gravity_keeps_column_order_and_refills_from_the_top() {
    let mut grid = Grid::parse("ALBSL/.BSLB/BSLBS/.LBSL/KBSLB").unwrap();
    assert_eq!(grid.empty_count(), 2);

    assert_eq!(grid.collapse(), 2);
    let column: Vec<_> = (0..5).map(|row| grid.tile(Position::new(row, 0))).collect();
    assert_eq!(
        column,
        vec![None, None, Some(TileKind::Atom), Some(TileKind::Bolt), Some(TileKind::Link)]
    );

    let mut draws = [TileKind::Leaf, TileKind::Orb].into_iter();
    let filled = grid.refill(|| draws.next().unwrap_or(TileKind::Shield));
    assert_eq!(filled, 2);
    assert_eq!(grid.tile(Position::new(1, 0)), Some(TileKind::Leaf));
    assert_eq!(grid.tile(Position::new(0, 0)), Some(TileKind::Orb));
    assert!(grid.is_settled());
}

#[test]
fn hint_is_always_an_accepted_swap() {
    let config = EngineConfig::default().with_tile_kinds(5);
    for seed in 0..50u32 {
        let grid = init_grid(&config, &mut SimpleRng::new(seed));
        let before = grid.clone();
        match find_hint(&grid, config.min_run) {
            Some(hint) => {
                assert!(hint.from.is_adjacent(hint.to));
                let mut scratch = grid.clone();
                let outcome = attempt_swap(&mut scratch, hint.from, hint.to, config.min_run);
                assert!(outcome.is_accepted(), "seed {} hint {:?} rejected", seed, hint);
            }
            None => {
                for (a, b) in every_adjacent_pair(config.grid_size) {
                    let mut scratch = grid.clone();
                    assert!(!attempt_swap(&mut scratch, a, b, config.min_run).is_accepted());
                }
            }
        }
        assert_eq!(grid, before);
    }
}

#[test]
fn two_wave_cascade_scores_with_chain_multiplier() {
    let mut grid = Grid::parse("BSAK/SBKA/LLLB/AKSL").unwrap();
    let mut source = ScriptedSource::new([
        TileKind::Orb,
        TileKind::Orb,
        TileKind::Orb,
        TileKind::Leaf,
        TileKind::Bolt,
        TileKind::Shield,
    ]);
    let mut ledger = ScoreBoard::new();
    let config = EngineConfig::default().with_grid_size(4);

    let gains: Vec<(u32, u32)> = resolve(&mut grid, &mut source, &mut ledger, config)
        .map(|step| (step.chain_index, step.score_gained))
        .collect();

    assert_eq!(gains, vec![(1, 30), (2, 60)]);
    assert_eq!(ledger.score(), 90);
    assert_eq!(ledger.best_chain(), 2);
    assert!(!has_match(&grid, 3));
}

#[test]
fn resolution_always_ends_settled_and_match_free() {
    let config = EngineConfig::default().with_tile_kinds(4);
    for seed in 0..30u32 {
        let mut source = SimpleRng::new(seed);
        let mut grid = init_grid(&config, &mut source);
        let Some(hint) = find_hint(&grid, config.min_run) else {
            continue;
        };
        assert!(attempt_swap(&mut grid, hint.from, hint.to, config.min_run).is_accepted());

        let mut ledger = ScoreBoard::new();
        let mut last_total = 0;
        let mut expected_chain = 1;
        for step in resolve(&mut grid, &mut source, &mut ledger, config) {
            assert_eq!(step.chain_index, expected_chain);
            assert_eq!(step.total_score, last_total + step.score_gained);
            assert!(step.grid_after_gravity.is_settled());
            last_total = step.total_score;
            expected_chain += 1;
        }

        assert!(expected_chain > 1, "seed {}: accepted swap cleared nothing", seed);
        assert!(grid.is_settled());
        assert!(!has_match(&grid, config.min_run));
        assert_eq!(ledger.score(), last_total);
    }
}
