use thiserror::Error;

/// Side length of a cell in pixels when none is given.
pub const DEFAULT_CELL_WIDTH: u32 = 5;

/// Errors raised when a viewport can't hold a board.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cell width must be non-zero")]
    ZeroCellWidth,
    #[error("a {width}x{height} viewport holds no cells of width {cell_width}")]
    EmptyGrid {
        width: u32,
        height: u32,
        cell_width: u32,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GridSize {
    pub columns: usize,
    pub rows: usize,
}

/// Viewport and cell width a board is laid out from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    pub cell_width: u32,
}

impl Config {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cell_width: DEFAULT_CELL_WIDTH,
        }
    }

    pub fn with_cell_width(mut self, cell_width: u32) -> Self {
        self.cell_width = cell_width;
        self
    }

    /// Number of columns and rows that fill the viewport, rounded to the
    /// nearest whole cell.
    pub fn grid_size(&self) -> Result<GridSize, ConfigError> {
        if self.cell_width == 0 {
            return Err(ConfigError::ZeroCellWidth);
        }

        let cell = f64::from(self.cell_width);
        let columns = (f64::from(self.width) / cell).round() as usize;
        let rows = (f64::from(self.height) / cell).round() as usize;

        if columns == 0 || rows == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.width,
                height: self.height,
                cell_width: self.cell_width,
            });
        }

        Ok(GridSize { columns, rows })
    }
}
