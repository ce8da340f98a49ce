//! Grid geometry
//!
//! Cell-grid ↔ pixel math for the GUI window: how many cells fit, where the
//! grid sits once centered, and which cell a pointer position falls on.

/// Minimum padding around the grid in pixels
pub const MIN_PADDING: f32 = 4.0;

/// Cell and viewport dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    pub cell_width: f32,
    pub cell_height: f32,
    pub width_px: f32,
    pub height_px: f32,
    /// Left edge of the first column
    pub offset_x: f32,
    /// Top edge of the first row
    pub offset_y: f32,
    pub cols: usize,
    pub rows: usize,
}

impl GridMetrics {
    pub fn new(cell_width: f32, cell_height: f32, width_px: f32, height_px: f32) -> Self {
        let cell_width = cell_width.max(1.0);
        let cell_height = cell_height.max(1.0);

        let usable_width = (width_px - MIN_PADDING * 2.0).max(0.0);
        let usable_height = (height_px - MIN_PADDING * 2.0).max(0.0);
        let cols = ((usable_width / cell_width).floor() as usize).max(1);
        let rows = ((usable_height / cell_height).floor() as usize).max(1);

        let grid_width = cols as f32 * cell_width;
        let grid_height = rows as f32 * cell_height;
        let offset_x = ((width_px - grid_width) / 2.0).floor().max(MIN_PADDING);
        let offset_y = ((height_px - grid_height) / 2.0).floor().max(MIN_PADDING);

        Self {
            cell_width,
            cell_height,
            width_px,
            height_px,
            offset_x,
            offset_y,
            cols,
            rows,
        }
    }

    /// Grid size in cells (columns, rows)
    pub fn grid_dimensions(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    /// Cell under a pixel position, or None outside the grid
    pub fn px_to_grid(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        if x < self.offset_x || y < self.offset_y {
            return None;
        }

        let col = ((x - self.offset_x) / self.cell_width) as usize;
        let row = ((y - self.offset_y) / self.cell_height) as usize;
        (col < self.cols && row < self.rows).then_some((col, row))
    }
}
