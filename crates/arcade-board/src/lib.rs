//! Shared board model for the grid games.
//!
//! Every engine stores its cells in a [`Grid`] (or a plain flat vector for
//! the 1-D games) and leans on the scanning helpers here instead of
//! re-deriving them per game: bounds-checked access, neighbor enumeration,
//! the N-in-a-row ray scan, and the worklist flood fill.

use core::fmt;

/// Error returned when a coordinate addresses a cell outside the grid.
///
/// Validators are expected to reject out-of-bounds move descriptors before
/// a transition ever runs; seeing this error escape a validator means a
/// programming error upstream, not a recoverable game condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfBounds {
    pub row: usize,
    pub col: usize,
}

impl fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell ({}, {}) is outside the grid", self.row, self.col)
    }
}

impl std::error::Error for OutOfBounds {}

/// Neighborhood shape for [`neighbors`] and [`flood_fill`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    /// The four orthogonal neighbors.
    Orthogonal,
    /// All eight surrounding cells.
    Diagonal,
}

impl Connectivity {
    fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Connectivity::Orthogonal => &[(-1, 0), (1, 0), (0, -1), (0, 1)],
            Connectivity::Diagonal => &[
                (-1, -1),
                (-1, 0),
                (-1, 1),
                (0, -1),
                (0, 1),
                (1, -1),
                (1, 0),
                (1, 1),
            ],
        }
    }
}

/// A fixed-size rectangular grid of cells, stored row-major.
///
/// Dimensions never change after construction. Updated boards are produced
/// by cloning and mutating the clone; the grid itself never reallocates to
/// a different shape, so a cloned snapshot is always structurally valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Creates a grid with every cell set to `fill`.
    pub fn new(rows: usize, cols: usize, fill: T) -> Self {
        Grid {
            rows,
            cols,
            cells: vec![fill; rows * cols],
        }
    }
}

impl<T> Grid<T> {
    /// Creates a grid by calling `f(row, col)` for every cell.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut cells = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                cells.push(f(r, c));
            }
        }
        Grid { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Bounds-checked read.
    pub fn get(&self, row: usize, col: usize) -> Result<&T, OutOfBounds> {
        if self.in_bounds(row, col) {
            Ok(&self.cells[self.idx(row, col)])
        } else {
            Err(OutOfBounds { row, col })
        }
    }

    /// Bounds-checked mutable read.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Result<&mut T, OutOfBounds> {
        if self.in_bounds(row, col) {
            let i = self.idx(row, col);
            Ok(&mut self.cells[i])
        } else {
            Err(OutOfBounds { row, col })
        }
    }

    /// Bounds-checked write.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<(), OutOfBounds> {
        *self.get_mut(row, col)? = value;
        Ok(())
    }

    /// Iterates every cell with its coordinate.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &T)> {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, v)| ((i / cols, i % cols), v))
    }

    /// In-bounds neighbor coordinates of `(row, col)`.
    pub fn neighbors(
        &self,
        row: usize,
        col: usize,
        connectivity: Connectivity,
    ) -> impl Iterator<Item = (usize, usize)> {
        neighbors(self.rows, self.cols, row, col, connectivity)
    }
}

impl<T> std::ops::Index<(usize, usize)> for Grid<T> {
    type Output = T;

    /// Panics on out-of-bounds access. Only reach for this after the
    /// coordinate has been validated.
    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            self.in_bounds(row, col),
            "cell ({}, {}) is outside the grid",
            row,
            col
        );
        &self.cells[self.idx(row, col)]
    }
}

impl<T> std::ops::IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(
            self.in_bounds(row, col),
            "cell ({}, {}) is outside the grid",
            row,
            col
        );
        let i = self.idx(row, col);
        &mut self.cells[i]
    }
}

/// In-bounds neighbor coordinates of `(row, col)` on a `rows x cols` grid.
///
/// Pure computation over the offsets table; the returned iterator holds no
/// state beyond its position, so callers can restart it freely by calling
/// again.
pub fn neighbors(
    rows: usize,
    cols: usize,
    row: usize,
    col: usize,
    connectivity: Connectivity,
) -> impl Iterator<Item = (usize, usize)> {
    connectivity.offsets().iter().filter_map(move |&(dr, dc)| {
        let nr = row as i32 + dr;
        let nc = col as i32 + dc;
        if nr >= 0 && (nr as usize) < rows && nc >= 0 && (nc as usize) < cols {
            Some((nr as usize, nc as usize))
        } else {
            None
        }
    })
}

/// Scans the four ray directions through `(row, col)` for a straight run of
/// at least `run` cells equal to `token`.
///
/// Walks forward and backward from the anchor cell in each direction
/// (horizontal, vertical, both diagonals) and returns the coordinates of
/// the first qualifying run, ordered along the ray. The anchor cell itself
/// must hold `token`.
pub fn run_through<T: PartialEq>(
    grid: &Grid<T>,
    row: usize,
    col: usize,
    token: &T,
    run: usize,
) -> Option<Vec<(usize, usize)>> {
    if grid.get(row, col).ok()? != token {
        return None;
    }

    const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

    for (dr, dc) in DIRECTIONS {
        let mut cells = vec![(row, col)];

        // Forward along the ray.
        let mut r = row as i32 + dr;
        let mut c = col as i32 + dc;
        while r >= 0
            && (r as usize) < grid.rows()
            && c >= 0
            && (c as usize) < grid.cols()
            && &grid[(r as usize, c as usize)] == token
        {
            cells.push((r as usize, c as usize));
            r += dr;
            c += dc;
        }

        // Backward along the ray, prepended so the run stays ordered.
        let mut r = row as i32 - dr;
        let mut c = col as i32 - dc;
        while r >= 0
            && (r as usize) < grid.rows()
            && c >= 0
            && (c as usize) < grid.cols()
            && &grid[(r as usize, c as usize)] == token
        {
            cells.insert(0, (r as usize, c as usize));
            r -= dr;
            c -= dc;
        }

        if cells.len() >= run {
            return Some(cells);
        }
    }

    None
}

/// Worklist flood fill from `start`.
///
/// `visit` is called once per popped cell and does the cell's work; it
/// returns `true` to also enqueue the cell's neighbors, `false` to stop the
/// spread there (blocked, already handled, or a non-propagating cell).
/// `visit` must make repeat pops of the same cell return `false`, or the
/// fill will not terminate.
pub fn flood_fill(
    rows: usize,
    cols: usize,
    start: (usize, usize),
    connectivity: Connectivity,
    mut visit: impl FnMut(usize, usize) -> bool,
) {
    let mut stack = vec![start];
    while let Some((r, c)) = stack.pop() {
        if visit(r, c) {
            stack.extend(neighbors(rows, cols, r, c, connectivity));
        }
    }
}
