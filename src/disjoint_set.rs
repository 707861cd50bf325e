/// Disjoint-set (union-find) forest over a fixed universe `0..n`
///
/// Union by size keeps every tree at most log2(n) deep, and `find` compresses
/// the visited path so later lookups are amortized near O(1).
use crate::error::{PercolationError, Result};

#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
    components: usize,
}

impl DisjointSet {
    /// Create a new DisjointSet with n singleton sets
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(PercolationError::invalid_argument(format!(
                "Must enter a value greater than 0. You entered n = {n}."
            )));
        }
        Ok(DisjointSet {
            parent: (0..n).collect(),
            size: vec![1; n],
            components: n,
        })
    }

    /// Number of elements in the universe
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Number of disjoint sets currently in the partition
    pub fn component_count(&self) -> usize {
        self.components
    }

    fn check(&self, x: usize) -> Result<()> {
        if x < self.parent.len() {
            Ok(())
        } else {
            Err(PercolationError::IndexOutOfRange {
                index: x,
                len: self.parent.len(),
            })
        }
    }

    /// Find the root of element x with full path compression
    pub fn find(&mut self, x: usize) -> Result<usize> {
        self.check(x)?;
        Ok(self.root(x))
    }

    // Caller guarantees x is in range.
    fn root(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Union the sets containing a and b
    ///
    /// Returns `true` if two distinct sets were merged, `false` if a and b
    /// were already connected.
    pub fn union(&mut self, a: usize, b: usize) -> Result<bool> {
        self.check(a)?;
        self.check(b)?;

        let root_a = self.root(a);
        let root_b = self.root(b);
        if root_a == root_b {
            return Ok(false);
        }

        // Union by size: smaller tree goes under the larger root
        let (small, large) = if self.size[root_a] < self.size[root_b] {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };
        self.parent[small] = large;
        self.size[large] += self.size[small];
        self.components -= 1;
        Ok(true)
    }

    /// Check if two elements are in the same set
    pub fn connected(&mut self, a: usize, b: usize) -> Result<bool> {
        Ok(self.find(a)? == self.find(b)?)
    }

    /// Connectivity query for indices the caller already knows are in range.
    /// Panics on an out-of-range index.
    pub(crate) fn same_set(&mut self, a: usize, b: usize) -> bool {
        self.root(a) == self.root(b)
    }

    /// Size of the set containing x
    pub fn component_size(&mut self, x: usize) -> Result<usize> {
        let root = self.find(x)?;
        Ok(self.size[root])
    }
}
