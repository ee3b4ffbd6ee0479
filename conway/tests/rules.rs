use conway::grid::NEIGHBOUR_OFFSETS;
use conway::{Cell, Dimensions, Grid, LifeError};

fn blinker() -> Grid {
    Grid::from_alive(Dimensions::of(3, 3), &[(1, 0), (1, 1), (1, 2)]).unwrap()
}

/// 3x3 grid with the centre in `centre` state and the first `n` neighbours alive.
fn centre_with_neighbours(centre: Cell, n: usize) -> Grid {
    let mut alive: Vec<(usize, usize)> = NEIGHBOUR_OFFSETS[..n]
        .iter()
        .map(|&(dr, dc)| ((1 + dr) as usize, (1 + dc) as usize))
        .collect();
    if centre.is_alive() {
        alive.push((1, 1));
    }
    Grid::from_alive(Dimensions::of(3, 3), &alive).unwrap()
}

#[test]
fn live_cell_survives_only_with_two_or_three() {
    for n in 0..=8 {
        let grid = centre_with_neighbours(Cell::Alive, n);
        assert_eq!(grid.live_neighbours(1, 1), n);
        let expected = if n == 2 || n == 3 { Cell::Alive } else { Cell::Dead };
        assert_eq!(grid.step().get(1, 1), Some(expected), "live centre, {n} neighbours");
    }
}

#[test]
fn dead_cell_is_born_only_with_three() {
    for n in 0..=8 {
        let grid = centre_with_neighbours(Cell::Dead, n);
        let expected = if n == 3 { Cell::Alive } else { Cell::Dead };
        assert_eq!(grid.step().get(1, 1), Some(expected), "dead centre, {n} neighbours");
    }
}

#[test]
fn blinker_flips_to_vertical() {
    let next = blinker().step();
    let expected = Grid::from_alive(Dimensions::of(3, 3), &[(0, 1), (1, 1), (2, 1)]).unwrap();
    assert_eq!(next, expected);
    assert_eq!(next.step(), blinker());
}

#[test]
fn step_preserves_shape_and_input() {
    let mut rng = fastrand::Rng::with_seed(42);
    for (rows, cols) in [(1, 1), (4, 9), (17, 3), (32, 32)] {
        let grid = Grid::random(Dimensions::of(rows, cols), 0.3, &mut rng).unwrap();
        let before = grid.to_string();
        let next = grid.step();
        assert_eq!((next.rows(), next.cols()), (rows, cols));
        assert_eq!(grid.to_string(), before);
    }
}

#[test]
fn edges_do_not_wrap() {
    // A wrapping grid would give (0, 0) three neighbours from the far edge
    let grid = Grid::from_alive(Dimensions::of(4, 4), &[(3, 3), (0, 3), (3, 0)]).unwrap();
    assert_eq!(grid.live_neighbours(0, 0), 0);
    assert_eq!(grid.step().population(), 0);
}

#[test]
fn empty_grids_step_to_empty_grids() {
    for (rows, cols) in [(0, 0), (0, 5), (5, 0)] {
        let grid = Grid::empty(Dimensions::of(rows, cols));
        let next = grid.step();
        assert_eq!(next, grid);
        assert_eq!(next.dims().len(), 0);
    }
}

#[test]
fn random_extremes() {
    let mut rng = fastrand::Rng::new();
    let dims = Dimensions::of(10, 10);

    let dead = Grid::random(dims, 0.0, &mut rng).unwrap();
    assert_eq!(dead.population(), 0);

    let alive = Grid::random(dims, 1.0, &mut rng).unwrap();
    assert_eq!(alive.population(), 100);
}

#[test]
fn random_rejects_bad_probability() {
    let mut rng = fastrand::Rng::new();
    let dims = Dimensions::of(2, 2);
    for p in [-0.1, 1.5, f64::NAN] {
        assert!(matches!(
            Grid::random(dims, p, &mut rng),
            Err(LifeError::InvalidProbability(_))
        ));
    }
}

#[test]
fn seeded_random_is_reproducible() {
    let dims = Dimensions::of(12, 12);
    let a = Grid::random(dims, 0.5, &mut fastrand::Rng::with_seed(9)).unwrap();
    let b = Grid::random(dims, 0.5, &mut fastrand::Rng::with_seed(9)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn toggle_flips_one_cell() {
    let grid = Grid::try_empty(5, 5).unwrap();
    let toggled = grid.toggle(2, 3).unwrap();

    assert_eq!(toggled.alive_cells().collect::<Vec<_>>(), vec![(2, 3)]);
    assert_eq!(grid.population(), 0);
    assert_eq!(toggled.toggle(2, 3).unwrap(), grid);
}

#[test]
fn toggle_out_of_bounds() {
    let grid = Grid::try_empty(5, 5).unwrap();
    assert_eq!(
        grid.toggle(5, 0),
        Err(LifeError::OutOfBounds { row: 5, col: 0, rows: 5, cols: 5 })
    );
    assert!(grid.toggle(0, 5).is_err());
}

#[test]
fn from_rows_matches_from_alive() {
    let rows = [[false, true, false], [false, true, false]];
    let grid = Grid::from_rows(&rows).unwrap();
    let expected = Grid::from_alive(Dimensions::of(2, 3), &[(0, 1), (1, 1)]).unwrap();
    assert_eq!(grid, expected);
}
