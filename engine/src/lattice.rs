//! Materialized lattices with 1-ring adjacency and per-vertex payloads.

use std::num::TryFromIntError;

use icolat_geo::{LatticeGeometry, Vec3};
use smallvec::SmallVec;

/// Snapshot of a [`LatticeGeometry`]: vertices, edges and sorted 1-ring neighbours.
#[derive(Clone, Debug, PartialEq)]
pub struct Lattice<T> {
    vertices: Vec<T>,
    edges: Vec<(usize, usize)>,
    /// 1-ring neighbour indices (pentagon: 5, hexagon: 6)
    neighbors: Vec<SmallVec<[usize; 6]>>,
}

impl<T> Lattice<T> {
    /// Collect the vertex and edge sequences of `geometry`.
    ///
    /// # Panics
    /// Panics if an edge refers to a vertex the geometry does not yield.
    pub fn new<G: LatticeGeometry<Vertex = T>>(geometry: &G) -> Self {
        let vertices: Vec<T> = geometry.vertices().collect();
        let edges: Vec<(usize, usize)> = geometry.edges().collect();
        let mut neighbors: Vec<SmallVec<[usize; 6]>> = vec![SmallVec::new(); vertices.len()];
        for &(a, b) in &edges {
            neighbors[a].push(b);
            neighbors[b].push(a);
        }
        for ring in &mut neighbors {
            ring.sort_unstable();
        }
        tracing::debug!(vertices = vertices.len(), edges = edges.len(), "materialized lattice");
        Self { vertices, edges, neighbors }
    }

    /// Vertices in index order.
    pub fn vertices(&self) -> &[T] {
        &self.vertices
    }

    /// Undirected edges, each once.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Sorted neighbours of vertex `index`.
    pub fn neighbors(&self, index: usize) -> &[usize] {
        &self.neighbors[index]
    }

    /// Number of neighbours of vertex `index`.
    pub fn degree(&self, index: usize) -> usize {
        self.neighbors[index].len()
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the lattice has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl Lattice<Vec3> {
    /// Vertex positions narrowed to `f32`, ready for upload.
    pub fn vertex_buffer(&self) -> Vec<[f32; 3]> {
        self.vertices.iter().map(|v| v.to_f32_array()).collect()
    }

    /// Edges flattened to `u32` line-list indices.
    pub fn edge_index_buffer(&self) -> Result<Vec<u32>, TryFromIntError> {
        self.edges.iter().flat_map(|&(a, b)| [a, b]).map(u32::try_from).collect()
    }

    /// Raw bytes of [`Self::vertex_buffer`].
    pub fn vertex_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice::<[f32; 3], u8>(&self.vertex_buffer()).to_vec()
    }
}

/// A [`Lattice`] carrying one mutable value per vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct LatticeGrid<T, U> {
    lattice: Lattice<T>,
    values: Vec<U>,
}

impl<T, U> LatticeGrid<T, U> {
    /// Materialize `geometry` and initialize each value from its index and vertex.
    pub fn new<G: LatticeGeometry<Vertex = T>>(geometry: &G, init: impl FnMut(usize, &T) -> U) -> Self {
        Self::from_lattice(Lattice::new(geometry), init)
    }

    /// Attach values to an existing lattice.
    pub fn from_lattice(lattice: Lattice<T>, mut init: impl FnMut(usize, &T) -> U) -> Self {
        let values = lattice.vertices.iter().enumerate().map(|(i, v)| init(i, v)).collect();
        Self { lattice, values }
    }

    /// Every vertex starts with a clone of `value`.
    pub fn filled<G: LatticeGeometry<Vertex = T>>(geometry: &G, value: U) -> Self
    where
        U: Clone,
    {
        Self::new(geometry, |_, _| value.clone())
    }

    /// The underlying lattice.
    pub fn lattice(&self) -> &Lattice<T> {
        &self.lattice
    }

    /// Value at vertex `index`.
    pub fn value(&self, index: usize) -> &U {
        &self.values[index]
    }

    /// Mutable value at vertex `index`.
    pub fn value_mut(&mut self, index: usize) -> &mut U {
        &mut self.values[index]
    }

    /// Values in vertex order.
    pub fn values(&self) -> &[U] {
        &self.values
    }

    /// Mutable values in vertex order.
    pub fn values_mut(&mut self) -> &mut [U] {
        &mut self.values
    }

    /// Both endpoint values of edge `edge`, in edge order.
    pub fn edge_values_mut(&mut self, edge: usize) -> (&mut U, &mut U) {
        let (a, b) = self.lattice.edges[edge];
        assert_ne!(a, b, "edge {edge} is a loop");
        let (lo, hi) = (a.min(b), a.max(b));
        let (head, tail) = self.values.split_at_mut(hi);
        let (low, high) = (&mut head[lo], &mut tail[0]);
        if a < b {
            (low, high)
        } else {
            (high, low)
        }
    }

    /// `(vertex, value)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, &U)> + '_ {
        self.lattice.vertices.iter().zip(&self.values)
    }

    /// Unwrap into the lattice and its values.
    pub fn into_parts(self) -> (Lattice<T>, Vec<U>) {
        (self.lattice, self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icolat_geo::IcoLattice;

    #[test]
    fn edge_values_follow_edge_order() -> Result<(), icolat_geo::LatticeError> {
        let geo = IcoLattice::new(1)?;
        let mut grid = LatticeGrid::new(&geo, |i, _| i);
        let (a, b) = grid.lattice().edges()[0];
        let (va, vb) = grid.edge_values_mut(0);
        assert_eq!((*va, *vb), (a, b));
        std::mem::swap(va, vb);
        assert_eq!(*grid.value(a), b);
        Ok(())
    }
}
