use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Columns(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rows(pub usize);

impl Columns {
    pub fn count(&self) -> usize {
        self.0
    }
}

impl Rows {
    pub fn count(&self) -> usize {
        self.0
    }
}

/// Pixel grid dimensions of a raster (columns x rows).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterSize {
    pub cols: Columns,
    pub rows: Rows,
}

impl RasterSize {
    pub fn with_rows_cols(rows: Rows, cols: Columns) -> Self {
        RasterSize { cols, rows }
    }

    pub fn cell_count(&self) -> usize {
        self.cols.count() * self.rows.count()
    }
}

impl fmt::Display for RasterSize {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}x{}", self.cols.count(), self.rows.count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raster_size_display_and_count() {
        let size = RasterSize::with_rows_cols(Rows(3), Columns(5));
        assert_eq!(size.to_string(), "5x3");
        assert_eq!(size.cell_count(), 15);
    }
}
