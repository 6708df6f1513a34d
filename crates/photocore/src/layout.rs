//! Collage grid geometry: two rows of passport-size cells

use crate::config::print;
use crate::copies::CopyCount;
use crate::error::AppResult;

/// Grid geometry of one collage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollageLayout {
    pub copies: CopyCount,
    pub rows: u32,
    pub columns: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl CollageLayout {
    /// Two rows, `copies / 2` columns, one passport-size cell per copy.
    pub fn new(copies: CopyCount) -> Self {
        let rows = print::ROWS;
        let columns = copies.get() / rows;
        let cell_width = print::cell_width();
        let cell_height = print::cell_height();

        Self {
            copies,
            rows,
            columns,
            cell_width,
            cell_height,
            canvas_width: columns * cell_width,
            canvas_height: rows * cell_height,
        }
    }

    /// Same as [`CollageLayout::new`] for a raw count; unsupported counts are `InvalidInput`.
    pub fn for_count(n: u32) -> AppResult<Self> {
        Ok(Self::new(CopyCount::try_from(n)?))
    }

    /// Top-left pixel of copy `index`: left to right, then top to bottom.
    pub fn cell_origin(&self, index: u32) -> (u32, u32) {
        let column = index % self.columns;
        let row = index / self.columns;
        (column * self.cell_width, row * self.cell_height)
    }

    /// Origins of every copy in paste order
    pub fn cell_origins(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..self.copies.get()).map(move |i| self.cell_origin(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::copies::CopyCountError;
    use crate::error::AppError;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    #[test]
    fn test_canvas_size_for_every_accepted_count() {
        for copies in CopyCount::iter() {
            let layout = CollageLayout::new(copies);
            assert_eq!(layout.rows, 2);
            assert_eq!(layout.columns, copies.get() / 2);
            assert_eq!(
                (layout.canvas_width, layout.canvas_height),
                (copies.get() / 2 * 1050, 2 * 1350)
            );
        }
    }

    #[test]
    fn test_for_count_rejects_unsupported() {
        for n in [0u32, 1, 3, 5, 7, 9, 10, 16] {
            match CollageLayout::for_count(n) {
                Err(AppError::InvalidInput(CopyCountError::OutOfRange(got))) => assert_eq!(got, n),
                other => panic!("expected InvalidInput for {}, got {:?}", n, other),
            }
        }
    }

    #[test]
    fn test_cell_origins_for_four() {
        let layout = CollageLayout::new(CopyCount::Four);
        assert_eq!(layout.cell_origin(0), (0, 0));
        assert_eq!(layout.cell_origin(1), (1050, 0));
        assert_eq!(layout.cell_origin(2), (0, 1350));
        assert_eq!(layout.cell_origin(3), (1050, 1350));
    }

    #[test]
    fn test_cell_origins_cover_canvas_without_overlap() {
        let layout = CollageLayout::new(CopyCount::Eight);
        let origins: Vec<_> = layout.cell_origins().collect();
        assert_eq!(origins.len(), 8);
        assert_eq!(origins[3], (3 * 1050, 0));
        assert_eq!(origins[4], (0, 1350));
        for (x, y) in &origins {
            assert!(x + layout.cell_width <= layout.canvas_width);
            assert!(y + layout.cell_height <= layout.canvas_height);
        }
        let mut unique = origins.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), origins.len());
    }

    #[test]
    fn test_layout_is_pure() {
        for copies in CopyCount::iter() {
            assert_eq!(CollageLayout::new(copies), CollageLayout::new(copies));
        }
        assert_eq!(
            CollageLayout::for_count(6).ok(),
            CollageLayout::for_count(6).ok()
        );
    }
}
