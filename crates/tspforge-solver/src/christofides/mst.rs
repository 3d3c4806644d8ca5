//! Minimum spanning tree over the complete graph.

use tspforge_core::DistanceMatrix;

/// Builds a minimum spanning tree with dense Prim, `O(n²)`.
///
/// Returns `n - 1` edges `(parent, child)` in the order vertices join the
/// tree. Vertex 0 is the root; among equal keys the lowest vertex joins first
/// and keeps the earliest parent, so the tree is deterministic.
pub fn minimum_spanning_tree(matrix: &DistanceMatrix) -> Vec<(usize, usize)> {
    let n = matrix.size();
    let mut in_tree = vec![false; n];
    let mut key = vec![f64::INFINITY; n];
    let mut parent = vec![usize::MAX; n];
    let mut edges = Vec::with_capacity(n.saturating_sub(1));

    key[0] = 0.0;
    for _ in 0..n {
        let mut u = usize::MAX;
        for v in 0..n {
            if !in_tree[v] && (u == usize::MAX || key[v] < key[u]) {
                u = v;
            }
        }

        in_tree[u] = true;
        if parent[u] != usize::MAX {
            edges.push((parent[u], u));
        }

        let row = matrix.row(u);
        for v in 0..n {
            if !in_tree[v] && row[v] < key[v] {
                key[v] = row[v];
                parent[v] = u;
            }
        }
    }
    edges
}

/// Vertices with odd degree in `edges`, ascending.
pub fn odd_degree_vertices(n: usize, edges: &[(usize, usize)]) -> Vec<usize> {
    let mut degree = vec![0usize; n];
    for &(u, v) in edges {
        degree[u] += 1;
        degree[v] += 1;
    }
    (0..n).filter(|&v| degree[v] % 2 == 1).collect()
}

/// Sum of edge weights.
pub fn edge_weight(matrix: &DistanceMatrix, edges: &[(usize, usize)]) -> f64 {
    edges.iter().map(|&(u, v)| matrix.get(u, v)).sum()
}
