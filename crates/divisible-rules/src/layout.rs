//! Formation layout: monster values -> starting grid positions.
//!
//! Column spacing is derived from the width left over after the full
//! horizontal sweep, so no monster ever needs clamping while it oscillates.

use divisible_core::constants::*;
use divisible_core::types::Position;

/// Geometry of the starting formation.
#[derive(Debug, Clone, Copy)]
pub struct LayoutParams {
    pub columns: usize,
    pub left: f64,
    pub right: f64,
    pub sweep_range: f64,
    pub top: f64,
    pub row_spacing: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            columns: FORMATION_COLUMNS,
            left: FIELD_LEFT,
            right: FIELD_RIGHT,
            sweep_range: SWEEP_RANGE,
            top: FORMATION_TOP,
            row_spacing: ROW_SPACING,
        }
    }
}

impl LayoutParams {
    /// Width available to the formation before the sweep is added.
    pub fn usable_width(&self) -> f64 {
        (self.right - self.sweep_range - self.left).max(0.0)
    }

    pub fn column_spacing(&self) -> f64 {
        if self.columns <= 1 {
            return 0.0;
        }
        self.usable_width() / (self.columns - 1) as f64
    }
}

/// Lay out values with the default geometry.
pub fn layout(values: &[u32]) -> Vec<(u32, Position)> {
    layout_with(values, &LayoutParams::default())
}

/// Sort values descending (largest on the top row) and place them on the grid.
/// A partial final row is centered under the full rows.
pub fn layout_with(values: &[u32], params: &LayoutParams) -> Vec<(u32, Position)> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let columns = params.columns.max(1);
    let spacing = params.column_spacing();

    sorted
        .chunks(columns)
        .enumerate()
        .flat_map(|(row, chunk)| {
            let missing = columns - chunk.len();
            let offset = missing as f64 * spacing / 2.0;
            let y = params.top + row as f64 * params.row_spacing;
            chunk.iter().enumerate().map(move |(col, &value)| {
                let x = params.left + offset + col as f64 * spacing;
                (value, Position::new(x, y))
            })
        })
        .collect()
}
