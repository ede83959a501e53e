//! Fixed grid geometry.
//!
//! Every position in the output sheet is derived from a handful of constants.
//! The canvas is `columns` cells wide and `rows` cells tall, with `padding`
//! around and between every cell; each cell holds a square icon plus a label
//! band beneath it.

pub const ICON_SIZE: u32 = 2048;
pub const GRID_COLS: u32 = 4;
pub const GRID_ROWS: u32 = 2;
pub const PADDING: u32 = 100;
pub const LABEL_HEIGHT: u32 = 120;
pub const LABEL_FONT_SIZE: u32 = 72;
/// Gap between an icon's bottom edge and the top of its caption.
pub const LABEL_GAP: u32 = 20;

/// Number of icons a grid holds.
pub const ICON_COUNT: usize = (GRID_COLS * GRID_ROWS) as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    pub icon_size: u32,
    pub columns: u32,
    pub rows: u32,
    pub padding: u32,
    pub label_height: u32,
    pub label_gap: u32,
    pub font_size: u32,
}

impl GridGeometry {
    pub const DEFAULT: GridGeometry = GridGeometry {
        icon_size: ICON_SIZE,
        columns: GRID_COLS,
        rows: GRID_ROWS,
        padding: PADDING,
        label_height: LABEL_HEIGHT,
        label_gap: LABEL_GAP,
        font_size: LABEL_FONT_SIZE,
    };

    pub fn cell_width(&self) -> u32 {
        self.icon_size
    }

    pub fn cell_height(&self) -> u32 {
        self.icon_size + self.label_height
    }

    pub fn canvas_width(&self) -> u32 {
        self.cell_width() * self.columns + self.padding * (self.columns + 1)
    }

    pub fn canvas_height(&self) -> u32 {
        self.cell_height() * self.rows + self.padding * (self.rows + 1)
    }

    pub fn canvas_size(&self) -> (u32, u32) {
        (self.canvas_width(), self.canvas_height())
    }

    pub fn cell_count(&self) -> usize {
        (self.columns * self.rows) as usize
    }

    /// Top-left corner of the icon area of cell `index` (row-major order).
    pub fn cell_origin(&self, index: usize) -> Option<(u32, u32)> {
        if index >= self.cell_count() {
            return None;
        }

        let index = index as u32;
        let row = index / self.columns;
        let col = index % self.columns;

        let x = self.padding + col * (self.cell_width() + self.padding);
        let y = self.padding + row * (self.cell_height() + self.padding);
        Some((x, y))
    }

    /// Y coordinate of the top of the caption for cell `index`.
    pub fn label_top(&self, index: usize) -> Option<u32> {
        self.cell_origin(index)
            .map(|(_, y)| y + self.icon_size + self.label_gap)
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_canvas_is_8692_by_4636() {
        assert_eq!(GridGeometry::DEFAULT.canvas_size(), (8692, 4636));
    }

    #[test]
    fn canvas_formula_holds_for_other_shapes() {
        for (icon_size, columns, rows, padding, label_height) in
            [(64, 3, 5, 7, 11), (1, 1, 1, 0, 0), (512, 8, 1, 32, 40)]
        {
            let geometry = GridGeometry {
                icon_size,
                columns,
                rows,
                padding,
                label_height,
                ..GridGeometry::DEFAULT
            };
            assert_eq!(
                geometry.canvas_width(),
                columns * icon_size + (columns + 1) * padding
            );
            assert_eq!(
                geometry.canvas_height(),
                rows * (icon_size + label_height) + (rows + 1) * padding
            );
        }
    }

    #[test]
    fn cells_are_laid_out_row_major() {
        let geometry = GridGeometry::DEFAULT;

        assert_eq!(geometry.cell_origin(0), Some((100, 100)));
        assert_eq!(geometry.cell_origin(3), Some((100 + 3 * 2148, 100)));
        assert_eq!(geometry.cell_origin(4), Some((100, 100 + 2168 + 100)));
        assert_eq!(geometry.cell_origin(7), Some((6544, 2368)));
        assert_eq!(geometry.cell_origin(8), None);
    }

    #[test]
    fn label_sits_below_icon() {
        let geometry = GridGeometry::DEFAULT;
        assert_eq!(geometry.label_top(0), Some(100 + 2048 + 20));
        assert_eq!(geometry.label_top(5), Some(2368 + 2048 + 20));
    }
}
