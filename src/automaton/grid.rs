//! Grid storage and toroidal cell access.

/// Values a grid cell can hold.
///
/// `Default` is the dead/zero state. Anything else counts as alive for rules
/// that only test truthiness.
pub trait CellState: Copy + Default + PartialEq + Send + Sync + 'static {
    #[inline]
    fn is_alive(&self) -> bool {
        *self != Self::default()
    }
}

impl<T> CellState for T where T: Copy + Default + PartialEq + Send + Sync + 'static {}

/// A fixed-size 2D grid of cells, stored row-major (y changes slowest).
///
/// Dimensions never change after construction. All coordinate arithmetic in
/// the `*_wrapped` accessors is taken modulo the dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<C> {
    width: usize,
    height: usize,
    cells: Vec<C>,
}

impl<C: CellState> Grid<C> {
    /// Create a grid with every cell dead.
    pub fn new(width: usize, height: usize) -> Self {
        Grid {
            width,
            height,
            cells: vec![C::default(); width * height],
        }
    }

    /// Build a grid from row-major cell values.
    ///
    /// Returns `None` if `cells.len() != width * height`.
    pub fn from_cells(width: usize, height: usize, cells: Vec<C>) -> Option<Self> {
        if width.checked_mul(height) != Some(cells.len()) {
            return None;
        }
        Some(Grid {
            width,
            height,
            cells,
        })
    }

    /// Build a grid from rows of equal length.
    pub fn from_rows(rows: &[Vec<C>]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }
        Self::from_cells(width, height, rows.concat())
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Linear index for an in-bounds coordinate.
    #[inline]
    pub fn index_of(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Map any signed coordinate onto the torus.
    #[inline]
    pub fn wrap(&self, x: isize, y: isize) -> (usize, usize) {
        (
            x.rem_euclid(self.width as isize) as usize,
            y.rem_euclid(self.height as isize) as usize,
        )
    }

    /// Cell value, or `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<C> {
        if self.in_bounds(x, y) {
            Some(self.cells[self.index_of(x, y)])
        } else {
            None
        }
    }

    /// Cell value with wraparound on both axes.
    #[inline]
    pub fn get_wrapped(&self, x: isize, y: isize) -> C {
        let (x, y) = self.wrap(x, y);
        self.cells[self.index_of(x, y)]
    }

    /// Set a cell. Out-of-bounds coordinates are ignored and return `false`.
    pub fn set(&mut self, x: usize, y: usize, value: C) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.index_of(x, y);
        self.cells[idx] = value;
        true
    }

    /// Set a cell with wraparound on both axes.
    pub fn set_wrapped(&mut self, x: isize, y: isize, value: C) {
        let (x, y) = self.wrap(x, y);
        let idx = self.index_of(x, y);
        self.cells[idx] = value;
    }

    /// Row-major cell slice.
    #[inline]
    pub fn cells(&self) -> &[C] {
        &self.cells
    }

    #[inline]
    pub(crate) fn cells_mut(&mut self) -> &mut [C] {
        &mut self.cells
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[C]> {
        self.cells.chunks(self.width.max(1))
    }

    /// Number of alive (non-default) cells.
    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Coordinates of every alive cell, row-major order.
    pub fn alive_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_alive())
            .map(|(i, _)| (i % self.width, i / self.width))
            .collect()
    }

    /// Reset every cell to dead.
    pub fn clear(&mut self) {
        self.cells.fill(C::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_dead() {
        let grid: Grid<u8> = Grid::new(8, 6);
        assert_eq!(grid.shape(), (8, 6));
        assert_eq!(grid.cells().len(), 48);
        assert_eq!(grid.alive_count(), 0);
    }

    #[test]
    fn test_index_of() {
        let grid: Grid<u8> = Grid::new(4, 3);

        assert_eq!(grid.index_of(0, 0), 0);
        assert_eq!(grid.index_of(3, 2), 11);
        assert_eq!(grid.index_of(1, 0), 1);
        assert_eq!(grid.index_of(0, 1), 4);
    }

    #[test]
    fn test_from_cells_rejects_wrong_length() {
        assert!(Grid::from_cells(3, 3, vec![0u8; 8]).is_none());
        assert!(Grid::from_cells(3, 3, vec![0u8; 9]).is_some());
        assert!(Grid::from_cells(usize::MAX, 2, vec![0u8; 2]).is_none());
    }

    #[test]
    fn test_from_rows() {
        let grid = Grid::from_rows(&[vec![1u8, 0], vec![0, 2], vec![3, 0]]).unwrap();
        assert_eq!(grid.shape(), (2, 3));
        assert_eq!(grid.get(1, 1), Some(2));
        assert_eq!(grid.get(0, 2), Some(3));

        assert!(Grid::from_rows(&[vec![1u8, 0], vec![0]]).is_none());
    }

    #[test]
    fn test_wrap_negative_and_overflow() {
        let grid: Grid<u8> = Grid::new(5, 4);

        assert_eq!(grid.wrap(-1, -1), (4, 3));
        assert_eq!(grid.wrap(5, 4), (0, 0));
        assert_eq!(grid.wrap(-6, 9), (4, 1));
    }

    #[test]
    fn test_get_set() {
        let mut grid: Grid<u8> = Grid::new(4, 4);

        assert!(grid.set(2, 3, 255));
        assert_eq!(grid.get(2, 3), Some(255));
        assert_eq!(grid.get_wrapped(-2, -1), 255);

        // Out of bounds is ignored by the checked accessors
        assert!(!grid.set(4, 0, 1));
        assert_eq!(grid.get(4, 0), None);

        grid.set_wrapped(-1, 4, 7);
        assert_eq!(grid.get(3, 0), Some(7));
    }

    #[test]
    fn test_alive_cells() {
        let mut grid: Grid<u8> = Grid::new(3, 3);
        grid.set(2, 0, 1);
        grid.set(0, 2, 255);

        assert_eq!(grid.alive_count(), 2);
        assert_eq!(grid.alive_cells(), vec![(2, 0), (0, 2)]);

        grid.clear();
        assert_eq!(grid.alive_count(), 0);
    }

    #[test]
    fn test_rows() {
        let grid = Grid::from_cells(2, 2, vec![1u8, 2, 3, 4]).unwrap();
        let rows: Vec<&[u8]> = grid.rows().collect();
        assert_eq!(rows, vec![&[1u8, 2][..], &[3u8, 4][..]]);
    }
}
