// viewport.rs - Derives grid dimensions from the host's drawable area

use crate::error::{LifeError, Result};
use crate::grid::Dimensions;

/// Number of whole cells along one axis, rounded to nearest.
#[inline]
fn cells_along(extent: i64, cell_size: u32) -> i64 {
    (extent as f64 / f64::from(cell_size)).round() as i64
}

/// Measures how many `cell_size` squares fit in `width` x `height` pixels.
///
/// Columns come from the width and rows from the height. A zero cell size
/// cannot produce a shape and is reported as invalid dimensions.
pub fn grid_dimensions(width: i64, height: i64, cell_size: u32) -> Result<Dimensions> {
    if cell_size == 0 {
        return Err(LifeError::InvalidDimensions { rows: height, cols: width });
    }
    Dimensions::new(cells_along(height, cell_size), cells_along(width, cell_size))
}
