/// n×n site percolation grid backed by a disjoint-set forest
///
/// Sites are addressed by 1-indexed `(row, col)` and stored flat at
/// `(row - 1) * n + (col - 1)`. Two virtual nodes follow the real sites:
/// `n²` stands for the top boundary and `n² + 1` for the bottom boundary.
/// A site is wired to its boundary node only at the moment it opens.
///
/// Backwash: with a single forest, `is_full` asks whether a site is connected
/// to the top node. Once the grid percolates, any open cluster touching the
/// bottom row is connected to the top node through the bottom node and is
/// reported full even though no water path from the top reaches it.
/// `percolates` and `number_of_open_sites` are unaffected.
/// `PercolationGrid::without_backwash` keeps a second forest without the
/// bottom node and answers `is_full` from it instead.
use log::trace;

use crate::disjoint_set::DisjointSet;
use crate::error::{PercolationError, Result};

#[derive(Debug, Clone)]
pub struct PercolationGrid {
    n: usize,
    open: Vec<bool>,
    open_count: usize,
    sites: DisjointSet,
    top: usize,
    bottom: usize,
    // Top-only forest for backwash-free fullness queries
    fullness: Option<DisjointSet>,
}

impl PercolationGrid {
    /// Create an n×n grid with every site blocked
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(PercolationError::invalid_argument(format!(
                "Must enter a value greater than 0. You entered n = {n}."
            )));
        }
        let cells = n.checked_mul(n).ok_or_else(|| {
            PercolationError::invalid_argument(format!("Grid size n = {n} is too large"))
        })?;

        Ok(PercolationGrid {
            n,
            open: vec![false; cells],
            open_count: 0,
            sites: DisjointSet::new(cells + 2)?,
            top: cells,
            bottom: cells + 1,
            fullness: None,
        })
    }

    /// Create a grid whose `is_full` answers are free of backwash, at the cost
    /// of a second forest of n² + 1 elements
    pub fn without_backwash(n: usize) -> Result<Self> {
        let mut grid = Self::new(n)?;
        grid.fullness = Some(DisjointSet::new(grid.top + 1)?);
        Ok(grid)
    }

    /// Grid dimension n
    pub fn size(&self) -> usize {
        self.n
    }

    pub fn is_backwash_free(&self) -> bool {
        self.fullness.is_some()
    }

    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row == 0 || row > self.n || col == 0 || col > self.n {
            return Err(PercolationError::OutOfRange { row, col, n: self.n });
        }
        Ok((row - 1) * self.n + (col - 1))
    }

    fn link(&mut self, a: usize, b: usize) -> Result<()> {
        self.sites.union(a, b)?;
        if let Some(fullness) = self.fullness.as_mut() {
            // The bottom node has no counterpart in the top-only forest
            if a != self.bottom && b != self.bottom {
                fullness.union(a, b)?;
            }
        }
        Ok(())
    }

    /// Open the site at (row, col) and connect it to its open neighbours.
    /// Opening an already open site does nothing.
    pub fn open(&mut self, row: usize, col: usize) -> Result<()> {
        let site = self.index(row, col)?;
        if self.open[site] {
            return Ok(());
        }
        self.open[site] = true;
        self.open_count += 1;
        trace!("opened site ({row}, {col}), {} open", self.open_count);

        let n = self.n;
        let neighbours = [
            (row > 1).then(|| site - n),
            (row < n).then(|| site + n),
            (col > 1).then(|| site - 1),
            (col < n).then(|| site + 1),
        ];
        for neighbour in neighbours.into_iter().flatten() {
            if self.open[neighbour] {
                self.link(site, neighbour)?;
            }
        }

        // Both fire when n == 1
        if row == 1 {
            self.link(site, self.top)?;
        }
        if row == n {
            self.link(site, self.bottom)?;
        }
        Ok(())
    }

    /// Check if the site at (row, col) is open
    pub fn is_open(&self, row: usize, col: usize) -> Result<bool> {
        Ok(self.open[self.index(row, col)?])
    }

    /// Check if the site at (row, col) is open and connected to the top row.
    /// See the module docs for the backwash caveat.
    pub fn is_full(&mut self, row: usize, col: usize) -> Result<bool> {
        let site = self.index(row, col)?;
        if !self.open[site] {
            return Ok(false);
        }
        let top = self.top;
        Ok(match self.fullness.as_mut() {
            Some(fullness) => fullness.same_set(site, top),
            None => self.sites.same_set(site, top),
        })
    }

    pub fn number_of_open_sites(&self) -> usize {
        self.open_count
    }

    /// Check if an open path joins the top row to the bottom row
    pub fn percolates(&mut self) -> bool {
        let (top, bottom) = (self.top, self.bottom);
        self.sites.same_set(top, bottom)
    }
}
