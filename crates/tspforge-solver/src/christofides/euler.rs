//! Eulerian circuit over the tree-plus-matching multigraph.

use smallvec::SmallVec;
use tspforge_core::{Result, Tour, TspForgeError};

/// Undirected multigraph with parallel edges.
///
/// Each adjacency entry is `(neighbour, edge id)`; the id lets a traversal
/// consume both half-edges of a parallel pair independently.
#[derive(Debug, Clone)]
pub struct Multigraph {
    adjacency: Vec<SmallVec<[(usize, usize); 4]>>,
    edge_count: usize,
}

impl Multigraph {
    pub fn new(num_vertices: usize) -> Self {
        Self {
            adjacency: vec![SmallVec::new(); num_vertices],
            edge_count: 0,
        }
    }

    /// Adds an undirected edge, keeping duplicates.
    pub fn add_edge(&mut self, u: usize, v: usize) {
        let id = self.edge_count;
        self.adjacency[u].push((v, id));
        self.adjacency[v].push((u, id));
        self.edge_count += 1;
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn degree(&self, v: usize) -> usize {
        self.adjacency[v].len()
    }

    /// Hierholzer's algorithm from `start`, iterative.
    ///
    /// Returns the closed walk as a vertex sequence of `edge_count + 1`
    /// entries beginning and ending at `start`.
    ///
    /// # Errors
    ///
    /// [`TspForgeError::Internal`] when a vertex has odd degree or some edge
    /// is unreachable from `start`.
    pub fn eulerian_circuit(&self, start: usize) -> Result<Vec<usize>> {
        if let Some(v) = (0..self.adjacency.len()).find(|&v| self.degree(v) % 2 != 0) {
            return Err(TspForgeError::Internal(format!(
                "vertex {v} has odd degree {}",
                self.degree(v)
            )));
        }

        let mut used = vec![false; self.edge_count];
        let mut cursor = vec![0usize; self.adjacency.len()];
        let mut stack = vec![start];
        let mut circuit = Vec::with_capacity(self.edge_count + 1);

        while let Some(&v) = stack.last() {
            let adjacent = &self.adjacency[v];
            while cursor[v] < adjacent.len() && used[adjacent[cursor[v]].1] {
                cursor[v] += 1;
            }
            if let Some(&(w, id)) = adjacent.get(cursor[v]) {
                used[id] = true;
                cursor[v] += 1;
                stack.push(w);
            } else {
                circuit.push(v);
                stack.pop();
            }
        }

        if circuit.len() != self.edge_count + 1 {
            return Err(TspForgeError::Internal(format!(
                "multigraph is disconnected: circuit covers {} of {} edges",
                circuit.len().saturating_sub(1),
                self.edge_count
            )));
        }
        circuit.reverse();
        Ok(circuit)
    }
}

/// Keeps the first visit of each city in `circuit`.
///
/// # Errors
///
/// [`TspForgeError::Internal`] when the walk misses a city.
pub fn shortcut(circuit: &[usize], num_cities: usize) -> Result<Tour> {
    let mut visited = vec![false; num_cities];
    let mut order = Vec::with_capacity(num_cities);
    for &city in circuit {
        if !visited[city] {
            visited[city] = true;
            order.push(city);
        }
    }
    if order.len() != num_cities {
        return Err(TspForgeError::Internal(format!(
            "Eulerian circuit visits {} of {num_cities} cities",
            order.len()
        )));
    }
    Ok(Tour::new(order))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_closed_walk(graph: &Multigraph, circuit: &[usize]) {
        assert_eq!(circuit.len(), graph.edge_count() + 1);
        assert_eq!(circuit.first(), circuit.last());
    }

    #[test]
    fn test_triangle() {
        let mut graph = Multigraph::new(3);
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        graph.add_edge(2, 0);

        let circuit = graph.eulerian_circuit(0).unwrap();
        assert_closed_walk(&graph, &circuit);
        assert_eq!(circuit, vec![0, 1, 2, 0]);
    }

    #[test]
    fn test_parallel_edges() {
        let mut graph = Multigraph::new(2);
        graph.add_edge(0, 1);
        graph.add_edge(0, 1);

        let circuit = graph.eulerian_circuit(0).unwrap();
        assert_eq!(circuit, vec![0, 1, 0]);
    }

    #[test]
    fn test_figure_eight() {
        // Two triangles sharing vertex 0
        let mut graph = Multigraph::new(5);
        for (u, v) in [(0, 1), (1, 2), (2, 0), (0, 3), (3, 4), (4, 0)] {
            graph.add_edge(u, v);
        }

        let circuit = graph.eulerian_circuit(0).unwrap();
        assert_closed_walk(&graph, &circuit);

        let mut traversed: Vec<(usize, usize)> = circuit
            .windows(2)
            .map(|w| (w[0].min(w[1]), w[0].max(w[1])))
            .collect();
        traversed.sort_unstable();
        assert_eq!(traversed, vec![(0, 1), (0, 2), (0, 3), (0, 4), (1, 2), (3, 4)]);

        let tour = shortcut(&circuit, 5).unwrap();
        assert_eq!(tour.as_slice()[0], 0);
        assert!(tour.validate(5).is_ok());
    }

    #[test]
    fn test_odd_degree_rejected() {
        let mut graph = Multigraph::new(3);
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        assert!(matches!(graph.eulerian_circuit(0), Err(TspForgeError::Internal(_))));
    }

    #[test]
    fn test_disconnected_rejected() {
        let mut graph = Multigraph::new(4);
        graph.add_edge(0, 1);
        graph.add_edge(0, 1);
        graph.add_edge(2, 3);
        graph.add_edge(2, 3);
        assert!(matches!(graph.eulerian_circuit(0), Err(TspForgeError::Internal(_))));
    }

    #[test]
    fn test_single_vertex() {
        let graph = Multigraph::new(1);
        assert_eq!(graph.eulerian_circuit(0).unwrap(), vec![0]);
        assert_eq!(shortcut(&[0], 1).unwrap().as_slice(), &[0]);
    }

    #[test]
    fn test_shortcut_skips_repeats() {
        let tour = shortcut(&[0, 1, 2, 1, 3, 0], 4).unwrap();
        assert_eq!(tour.as_slice(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_shortcut_missing_city() {
        assert!(shortcut(&[0, 1, 0], 3).is_err());
    }
}
