use crate::error::MazeError;

#[derive(Debug, Clone, Copy)]
struct Node {
    /// Index of the parent node. A node that is its own parent is a root.
    parent: usize,
    /// Number of nodes in the tree rooted here. Only meaningful for roots.
    size: usize,
}

/// Union-find over `0..len` with union by size.
///
/// `find_root` does not compress paths, so lookups never need `&mut self`.
/// Union by size keeps every tree at most `log2(len)` deep.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    nodes: Vec<Node>,
}

impl DisjointSet {
    /// Creates `len` singleton sets.
    pub fn new(len: usize) -> Result<Self, MazeError> {
        let mut nodes = Vec::new();
        nodes
            .try_reserve_exact(len)
            .map_err(|source| MazeError::Allocation {
                what: "disjoint set",
                len,
                source,
            })?;
        nodes.extend((0..len).map(|i| Node { parent: i, size: 1 }));
        Ok(DisjointSet { nodes })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn find_root(&self, mut x: usize) -> usize {
        while self.nodes[x].parent != x {
            x = self.nodes[x].parent;
        }
        x
    }

    pub fn is_connected(&self, a: usize, b: usize) -> bool {
        self.find_root(a) == self.find_root(b)
    }

    /// Size of the set containing `x`.
    pub fn set_size(&self, x: usize) -> usize {
        self.nodes[self.find_root(x)].size
    }

    /// Merges the sets containing `a` and `b`.
    /// Returns `false` if they were already in the same set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let mut root_a = self.find_root(a);
        let mut root_b = self.find_root(b);
        if root_a == root_b {
            return false;
        }

        // On equal sizes a's root stays the parent
        if self.nodes[root_a].size < self.nodes[root_b].size {
            std::mem::swap(&mut root_a, &mut root_b);
        }
        self.nodes[root_b].parent = root_a;
        self.nodes[root_a].size += self.nodes[root_b].size;
        true
    }
}
