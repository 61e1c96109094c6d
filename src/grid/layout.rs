//! Grid shape calculation from viewport size.
//!
//! The layout engine is a pure function: given the space available for the
//! grid and the cell sizing constraints it returns a [`GridShape`]. It never
//! fails. Viewports too small for a single cell still produce a one-by-one
//! grid so there is always something to render and navigate.
//!
//! # Column Search
//!
//! Candidate column counts are tried from the most that could fit at minimum
//! width down to one. The first (largest) count whose per-cell width lands
//! inside `[min_cell_width, max_cell_width]` wins, which favors the densest
//! layout over the widest cells:
//!
//! ```text
//! width 80, min 35, spacing 2  →  candidates 2, 1
//! c = 2: (80 - 2) / 2 = 39     →  accepted
//! ```

use serde::{Deserialize, Serialize};

/// Minimum cell width in terminal columns.
pub const MIN_CELL_WIDTH: usize = 35;

/// Maximum cell width in terminal columns.
pub const MAX_CELL_WIDTH: usize = 60;

/// Cell height in terminal rows, excluding the one-row gap below each cell.
pub const DEFAULT_CELL_HEIGHT: usize = 4;

/// Horizontal space between adjacent cells.
pub const CELL_SPACING: usize = 2;

/// Sizing constraints for grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellConstraints {
    pub min_cell_width: usize,
    pub max_cell_width: usize,
    pub cell_height: usize,
    pub spacing: usize,
}

impl Default for CellConstraints {
    fn default() -> Self {
        Self {
            min_cell_width: MIN_CELL_WIDTH,
            max_cell_width: MAX_CELL_WIDTH,
            cell_height: DEFAULT_CELL_HEIGHT,
            spacing: CELL_SPACING,
        }
    }
}

/// Rows, columns and cell width of the grid for the current viewport.
///
/// `columns` and `rows` are always at least 1, so `capacity()` is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridShape {
    pub columns: usize,
    pub rows: usize,
    pub cell_width: usize,
}

impl GridShape {
    /// Number of items one screen page can show.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.columns * self.rows
    }
}

/// Computes the grid shape for a viewport.
///
/// # Parameters
///
/// * `viewport_width` - Columns available to the grid
/// * `viewport_height` - Rows available to the grid
/// * `constraints` - Cell sizing constraints
///
/// # Algorithm
///
/// - `rows = max(1, viewport_height / (cell_height + 1))`
/// - `columns`: largest `c` in `viewport_width / (min_cell_width + spacing) ..= 1`
///   whose `(viewport_width - (c - 1) * spacing) / c` lies within the width bounds
/// - otherwise one column of `max(min_cell_width, viewport_width)`
///
/// # Examples
///
/// ```
/// use secretgrid::grid::layout::{compute, CellConstraints};
///
/// let shape = compute(80, 20, &CellConstraints::default());
/// assert_eq!((shape.columns, shape.rows, shape.cell_width), (2, 4, 39));
///
/// let tiny = compute(10, 10, &CellConstraints::default());
/// assert_eq!((tiny.columns, tiny.cell_width), (1, 35));
/// ```
#[must_use]
pub fn compute(viewport_width: usize, viewport_height: usize, constraints: &CellConstraints) -> GridShape {
    let rows = (viewport_height / constraints.cell_height.saturating_add(1)).max(1);

    let stride = constraints.min_cell_width.saturating_add(constraints.spacing).max(1);
    let max_columns = (viewport_width / stride).max(1);

    let fitted = (1..=max_columns).rev().find_map(|columns| {
        let available = viewport_width.saturating_sub((columns - 1).saturating_mul(constraints.spacing));
        let per_cell = available / columns;
        (constraints.min_cell_width..=constraints.max_cell_width)
            .contains(&per_cell)
            .then_some((columns, per_cell))
    });

    let (columns, cell_width) = fitted.unwrap_or_else(|| {
        (1, constraints.min_cell_width.max(viewport_width))
    });

    let shape = GridShape {
        columns,
        rows,
        cell_width,
    };

    tracing::trace!(
        viewport_width,
        viewport_height,
        columns = shape.columns,
        rows = shape.rows,
        cell_width = shape.cell_width,
        fallback = fitted.is_none(),
        "grid shape computed"
    );

    shape
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_terminal_prefers_two_columns() {
        let shape = compute(80, 20, &CellConstraints::default());
        assert_eq!(shape.columns, 2);
        assert_eq!(shape.cell_width, 39);
        assert_eq!(shape.rows, 4);
        assert_eq!(shape.capacity(), 8);
    }

    #[test]
    fn narrow_viewport_falls_back_to_single_min_width_column() {
        let shape = compute(10, 10, &CellConstraints::default());
        assert_eq!(shape.columns, 1);
        assert_eq!(shape.cell_width, 35);
        assert!(shape.rows >= 1);
    }

    #[test]
    fn zero_viewport_yields_minimal_grid() {
        let shape = compute(0, 0, &CellConstraints::default());
        assert_eq!((shape.columns, shape.rows), (1, 1));
        assert_eq!(shape.capacity(), 1);
    }

    #[test]
    fn densest_fit_wins_over_widest_cells() {
        // 5 columns of 35 need 183 cols; at 200 the 5-column fit is (200 - 8) / 5 = 38.
        let shape = compute(200, 5, &CellConstraints::default());
        assert_eq!(shape.columns, 5);
        assert_eq!(shape.cell_width, 38);
        assert_eq!(shape.rows, 1);
    }

    #[test]
    fn single_oversized_column_uses_viewport_width() {
        // 70 / 37 = 1 candidate, whose 70-wide cell exceeds the maximum.
        let shape = compute(70, 10, &CellConstraints::default());
        assert_eq!(shape.columns, 1);
        assert_eq!(shape.cell_width, 70);
    }

    #[test]
    fn cell_width_stays_within_bounds_when_a_fit_exists() {
        let constraints = CellConstraints::default();
        for width in 74..400 {
            let shape = compute(width, 30, &constraints);
            assert!(shape.cell_width >= constraints.min_cell_width, "width {width}");
            assert!(shape.cell_width <= constraints.max_cell_width, "width {width}");
        }
    }

    #[test]
    fn zero_min_width_does_not_divide_by_zero() {
        let constraints = CellConstraints {
            min_cell_width: 0,
            max_cell_width: 10,
            cell_height: 1,
            spacing: 0,
        };
        let shape = compute(0, 0, &constraints);
        assert_eq!((shape.columns, shape.rows), (1, 1));
    }

    #[test]
    fn extreme_constraints_do_not_overflow() {
        let constraints = CellConstraints {
            min_cell_width: usize::MAX,
            max_cell_width: usize::MAX,
            cell_height: usize::MAX,
            spacing: usize::MAX,
        };
        let shape = compute(120, 40, &constraints);
        assert_eq!((shape.columns, shape.rows, shape.cell_width), (1, 1, usize::MAX));

        let spaced = CellConstraints {
            spacing: usize::MAX,
            ..CellConstraints::default()
        };
        let shape = compute(120, 40, &spaced);
        assert_eq!((shape.columns, shape.rows, shape.cell_width), (1, 8, 120));
    }
}
