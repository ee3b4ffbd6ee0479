// grid.rs - Grid types for Conway's Game of Life

use std::fmt;
use std::sync::Arc;

use crate::error::{LifeError, Result};

/// Relative positions of the 8 Moore neighbours.
pub const NEIGHBOUR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    #[inline]
    pub fn is_alive(self) -> bool {
        matches!(self, Cell::Alive)
    }

    #[inline]
    pub fn toggled(self) -> Cell {
        match self {
            Cell::Alive => Cell::Dead,
            Cell::Dead => Cell::Alive,
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }
}

/// Applies the life rules to one cell given its live neighbour count.
#[inline]
pub fn next_state(cell: Cell, neighbours: usize) -> Cell {
    match (cell, neighbours) {
        (_, n) if !(2..=3).contains(&n) => Cell::Dead,  // Isolation or overcrowding
        (Cell::Dead, 3)                 => Cell::Alive, // Birth
        (cell, _)                       => cell,        // Survival or stays dead
    }
}

/// Validated grid shape. Either side may be zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    rows: usize,
    cols: usize,
}

impl Dimensions {
    /// Builds a shape from signed counts, as handed over by the host.
    pub fn new(rows: i64, cols: i64) -> Result<Self> {
        match (usize::try_from(rows), usize::try_from(cols)) {
            (Ok(rows), Ok(cols)) => Ok(Self { rows, cols }),
            _ => Err(LifeError::InvalidDimensions { rows, cols }),
        }
    }

    pub const fn of(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        self.contains(row, col).then(|| row * self.cols + col)
    }
}

/// A finite, immutable generation of cells.
///
/// Every transition returns a new `Grid`; the cell storage of a grid that has
/// been handed out is never written to again. Clones share storage, so passing
/// the current grid to a reader costs a reference count bump.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    dims: Dimensions,
    cells: Arc<[Cell]>,
}

impl Grid {
    pub fn empty(dims: Dimensions) -> Grid {
        Grid {
            dims,
            cells: vec![Cell::Dead; dims.len()].into(),
        }
    }

    /// `empty` for callers holding raw signed counts.
    pub fn try_empty(rows: i64, cols: i64) -> Result<Grid> {
        Dimensions::new(rows, cols).map(Grid::empty)
    }

    /// Fills each cell independently, alive with `probability`.
    pub fn random(dims: Dimensions, probability: f64, rng: &mut fastrand::Rng) -> Result<Grid> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(LifeError::InvalidProbability(probability));
        }
        // f64() is in [0, 1): probability 0 never fires, probability 1 always does
        let cells = (0..dims.len())
            .map(|_| Cell::from(rng.f64() < probability))
            .collect();
        Ok(Grid { dims, cells })
    }

    /// Builds a grid from rows of booleans. All rows must be the same length.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Grid> {
        let expected = rows.first().map_or(0, |row| row.as_ref().len());
        let mut cells = Vec::with_capacity(rows.len() * expected);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != expected {
                return Err(LifeError::RaggedRows {
                    row,
                    expected,
                    found: values.len(),
                });
            }
            cells.extend(values.iter().copied().map(Cell::from));
        }
        Ok(Grid {
            dims: Dimensions::of(rows.len(), expected),
            cells: cells.into(),
        })
    }

    /// An otherwise dead grid with the listed cells alive.
    pub fn from_alive(dims: Dimensions, alive: &[(usize, usize)]) -> Result<Grid> {
        let mut cells = vec![Cell::Dead; dims.len()];
        for &(row, col) in alive {
            let index = dims.index(row, col).ok_or(LifeError::OutOfBounds {
                row,
                col,
                rows: dims.rows,
                cols: dims.cols,
            })?;
            cells[index] = Cell::Alive;
        }
        Ok(Grid {
            dims,
            cells: cells.into(),
        })
    }

    #[inline]
    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.dims.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.dims.cols
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.dims.index(row, col).map(|index| self.cells[index])
    }

    /// False for dead cells and for coordinates off the grid.
    #[inline]
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some_and(Cell::is_alive)
    }

    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        (row < self.dims.rows).then(|| &self.cells[row * self.dims.cols..(row + 1) * self.dims.cols])
    }

    pub fn rows_iter(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        let cols = self.dims.cols;
        (0..self.dims.rows).map(move |row| &self.cells[row * cols..(row + 1) * cols])
    }

    /// Coordinates of every live cell, row by row.
    pub fn alive_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.dims.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_alive())
            .map(move |(index, _)| (index / cols, index % cols))
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Returns a copy with the cell at (row, col) flipped.
    pub fn toggle(&self, row: usize, col: usize) -> Result<Grid> {
        let index = self.dims.index(row, col).ok_or(LifeError::OutOfBounds {
            row,
            col,
            rows: self.dims.rows,
            cols: self.dims.cols,
        })?;
        let mut cells = self.cells.to_vec();
        cells[index] = cells[index].toggled();
        Ok(Grid {
            dims: self.dims,
            cells: cells.into(),
        })
    }

    /// Live cells among the 8 neighbours. Off-grid neighbours count as dead.
    pub fn live_neighbours(&self, row: usize, col: usize) -> usize {
        NEIGHBOUR_OFFSETS
            .iter()
            .filter(|&&(dr, dc)| {
                match (row.checked_add_signed(dr), col.checked_add_signed(dc)) {
                    (Some(nr), Some(nc)) => self.is_alive(nr, nc),
                    _ => false,
                }
            })
            .count()
    }

    /// Computes the next generation from this one.
    ///
    /// Every cell reads only the previous generation, so the result does not
    /// depend on visiting order. A grid without cells steps to an equal grid.
    pub fn step(&self) -> Grid {
        let Dimensions { rows, cols } = self.dims;
        let cells = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .map(|(row, col)| {
                next_state(self.cells[row * cols + col], self.live_neighbours(row, col))
            })
            .collect();
        Grid {
            dims: self.dims,
            cells,
        }
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {}x{}", self.dims.rows, self.dims.cols)?;
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows_iter() {
            for cell in row {
                f.write_str(if cell.is_alive() { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_cover_moore_neighbourhood() {
        let mut expected: Vec<_> = (-1..=1)
            .flat_map(|dr| (-1..=1).map(move |dc| (dr, dc)))
            .filter(|&offset| offset != (0, 0))
            .collect();
        let mut offsets = NEIGHBOUR_OFFSETS.to_vec();
        expected.sort();
        offsets.sort();
        assert_eq!(expected, offsets);
    }

    #[test]
    fn rule_table() {
        for n in 0..=8 {
            let survives = next_state(Cell::Alive, n);
            let born = next_state(Cell::Dead, n);
            assert_eq!(survives.is_alive(), n == 2 || n == 3, "alive with {n}");
            assert_eq!(born.is_alive(), n == 3, "dead with {n}");
        }
    }

    #[test]
    fn negative_dimensions_rejected() {
        assert_eq!(
            Dimensions::new(-1, 4),
            Err(LifeError::InvalidDimensions { rows: -1, cols: 4 })
        );
        assert!(Grid::try_empty(3, -2).is_err());
        assert_eq!(Grid::try_empty(0, 7).map(|g| g.dims().len()), Ok(0));
    }

    #[test]
    fn corner_sees_three_neighbours() {
        let full = Grid::random(Dimensions::of(3, 3), 1.0, &mut fastrand::Rng::with_seed(1)).unwrap();
        assert_eq!(full.live_neighbours(0, 0), 3);
        assert_eq!(full.live_neighbours(0, 1), 5);
        assert_eq!(full.live_neighbours(1, 1), 8);
        assert_eq!(full.live_neighbours(2, 2), 3);
    }

    #[test]
    fn ragged_rows_rejected() {
        let rows = vec![vec![true, false], vec![true]];
        assert_eq!(
            Grid::from_rows(&rows),
            Err(LifeError::RaggedRows { row: 1, expected: 2, found: 1 })
        );
    }

    #[test]
    fn alive_cells_and_population() {
        let grid = Grid::from_alive(Dimensions::of(2, 3), &[(0, 2), (1, 0)]).unwrap();
        assert_eq!(grid.alive_cells().collect::<Vec<_>>(), vec![(0, 2), (1, 0)]);
        assert_eq!(grid.population(), 2);
        assert_eq!(grid.to_string(), "..#\n#..\n");
        assert_eq!(grid.row(1).map(|r| r.len()), Some(3));
        assert!(grid.row(2).is_none());
    }

    #[test]
    fn zero_width_rows_iterate() {
        let grid = Grid::empty(Dimensions::of(4, 0));
        assert_eq!(grid.rows_iter().count(), 4);
        assert!(grid.rows_iter().all(|row| row.is_empty()));
        assert_eq!(grid.step(), grid);
    }
}
