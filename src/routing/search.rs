//! Path searches over a filtered [`Topology`].
//!
//! Nodes are ranked by id and every adjacency list is sorted by rank, so a
//! search that explores neighbors in list order also explores them in id
//! order. That makes all results reproducible for a fixed graph:
//!
//! - [`SearchGraph::fewest_hops`] and [`SearchGraph::lowest_latency`] return
//!   the lexicographically smallest id sequence among optimal paths;
//! - [`SearchGraph::simple_paths`] yields paths in lexicographic order.

use crate::topology::Topology;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, VecDeque};

/// Index-based view of a topology used by the search algorithms.
pub struct SearchGraph<'a> {
    ids: Vec<&'a str>,
    ranks: HashMap<&'a str, usize>,
    adjacency: Vec<Vec<(usize, f64)>>,
}

impl<'a> SearchGraph<'a> {
    pub fn new(topology: &'a Topology) -> Self {
        let ids: Vec<&'a str> = topology.node_ids().collect();
        let ranks: HashMap<&'a str, usize> =
            ids.iter().enumerate().map(|(rank, id)| (*id, rank)).collect();

        // `successors` is already sorted by id, which is rank order
        let adjacency = ids
            .iter()
            .map(|id| {
                topology
                    .successors(id)
                    .into_iter()
                    .filter_map(|(next, weight)| ranks.get(next).map(|&r| (r, weight)))
                    .collect()
            })
            .collect();

        Self {
            ids,
            ranks,
            adjacency,
        }
    }

    pub fn rank(&self, id: &str) -> Option<usize> {
        self.ranks.get(id).copied()
    }

    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    /// Translate a rank path back into node ids.
    pub fn ids(&self, path: &[usize]) -> Vec<String> {
        path.iter().map(|&r| self.ids[r].to_string()).collect()
    }

    /// Breadth-first search for a path with the fewest edges.
    pub fn fewest_hops(&self, source: usize, target: usize) -> Option<Vec<usize>> {
        let mut parent: Vec<Option<usize>> = vec![None; self.ids.len()];
        let mut seen = vec![false; self.ids.len()];
        let mut queue = VecDeque::from([source]);
        seen[source] = true;

        while let Some(node) = queue.pop_front() {
            if node == target {
                return Some(unwind(&parent, target));
            }
            for &(next, _) in &self.adjacency[node] {
                if !seen[next] {
                    seen[next] = true;
                    parent[next] = Some(node);
                    queue.push_back(next);
                }
            }
        }

        None
    }

    /// Dijkstra search for the path with the lowest total latency.
    ///
    /// Returns the path and its cost. Weights are non-negative by
    /// construction.
    pub fn lowest_latency(&self, source: usize, target: usize) -> Option<(Vec<usize>, f64)> {
        let mut settled = vec![false; self.ids.len()];
        let mut best = vec![f64::INFINITY; self.ids.len()];
        let mut heap = BinaryHeap::new();

        best[source] = 0.0;
        heap.push(Frontier {
            cost: 0.0,
            path: vec![source],
        });

        while let Some(Frontier { cost, path }) = heap.pop() {
            let node = path[path.len() - 1];
            if settled[node] {
                continue;
            }
            settled[node] = true;
            if node == target {
                return Some((path, cost));
            }

            for &(next, weight) in &self.adjacency[node] {
                if settled[next] {
                    continue;
                }
                let candidate = cost + weight;
                // Equal-cost alternatives stay in the heap for the tie-break
                if candidate <= best[next] {
                    best[next] = candidate;
                    let mut extended = path.clone();
                    extended.push(next);
                    heap.push(Frontier {
                        cost: candidate,
                        path: extended,
                    });
                }
            }
        }

        None
    }

    /// All simple paths from `source` to `target` with at most `cutoff` edges.
    pub fn simple_paths(&self, source: usize, target: usize, cutoff: usize) -> Vec<Vec<usize>> {
        let mut found = Vec::new();
        if source == target || cutoff == 0 {
            return found;
        }

        let mut on_path = vec![false; self.ids.len()];
        let mut path = vec![source];
        on_path[source] = true;
        self.extend_paths(target, cutoff, &mut path, &mut on_path, &mut found);
        found
    }

    fn extend_paths(
        &self,
        target: usize,
        cutoff: usize,
        path: &mut Vec<usize>,
        on_path: &mut [bool],
        found: &mut Vec<Vec<usize>>,
    ) {
        let node = path[path.len() - 1];
        let edges_used = path.len() - 1;

        for &(next, _) in &self.adjacency[node] {
            if next == target {
                let mut complete = path.clone();
                complete.push(next);
                found.push(complete);
                continue;
            }
            if on_path[next] || edges_used + 1 >= cutoff {
                continue;
            }
            path.push(next);
            on_path[next] = true;
            self.extend_paths(target, cutoff, path, on_path, found);
            on_path[next] = false;
            path.pop();
        }
    }

    /// Enumerate simple paths with a cutoff that grows one edge at a time
    /// from `min_cutoff` to `max_cutoff`, stopping at the first cutoff that
    /// yields any path. Returns that cutoff with the paths found.
    pub fn widening_simple_paths(
        &self,
        source: usize,
        target: usize,
        min_cutoff: usize,
        max_cutoff: usize,
    ) -> Option<(usize, Vec<Vec<usize>>)> {
        (min_cutoff..=max_cutoff).find_map(|cutoff| {
            let paths = self.simple_paths(source, target, cutoff);
            tracing::trace!(cutoff, found = paths.len(), "Simple path enumeration");
            (!paths.is_empty()).then_some((cutoff, paths))
        })
    }
}

fn unwind(parent: &[Option<usize>], target: usize) -> Vec<usize> {
    let mut path = vec![target];
    let mut node = target;
    while let Some(prev) = parent[node] {
        path.push(prev);
        node = prev;
    }
    path.reverse();
    path
}

/// Dijkstra frontier entry, ordered so that `BinaryHeap` pops the lowest
/// cost first and, among equal costs, the lexicographically smallest path.
struct Frontier {
    cost: f64,
    path: Vec<usize>,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.path.cmp(&self.path))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

#[cfg(test)]
mod tests {
    use super::*;

    fn topology(links: &[(&str, &str, f64)]) -> Topology {
        let mut t = Topology::new();
        for (a, b, w) in links {
            t.add_link(a, b, *w);
        }
        t
    }

    fn ids(graph: &SearchGraph, path: Option<Vec<usize>>) -> Option<Vec<String>> {
        path.map(|p| graph.ids(&p))
    }

    #[test]
    fn test_fewest_hops_prefers_direct_edge() {
        let t = topology(&[("A", "B", 50.0), ("B", "C", 30.0), ("A", "C", 200.0)]);
        let g = SearchGraph::new(&t);
        let (a, c) = (g.rank("A").unwrap(), g.rank("C").unwrap());
        assert_eq!(ids(&g, g.fewest_hops(a, c)), Some(vec!["A".into(), "C".into()]));
    }

    #[test]
    fn test_fewest_hops_tie_break_is_lexicographic() {
        // Two 2-hop routes: via M and via B; B sorts first
        let t = topology(&[("S", "M", 1.0), ("M", "T", 1.0), ("S", "B", 9.0), ("B", "T", 9.0)]);
        let g = SearchGraph::new(&t);
        let path = g.fewest_hops(g.rank("S").unwrap(), g.rank("T").unwrap());
        assert_eq!(
            ids(&g, path),
            Some(vec!["S".into(), "B".into(), "T".into()])
        );
    }

    #[test]
    fn test_fewest_hops_unreachable() {
        let t = topology(&[("A", "B", 1.0), ("C", "D", 1.0)]);
        let g = SearchGraph::new(&t);
        assert!(g.fewest_hops(g.rank("A").unwrap(), g.rank("D").unwrap()).is_none());
    }

    #[test]
    fn test_lowest_latency_scenario() {
        let t = topology(&[("A", "B", 50.0), ("B", "C", 30.0), ("A", "C", 200.0)]);
        let g = SearchGraph::new(&t);
        let (path, cost) = g
            .lowest_latency(g.rank("A").unwrap(), g.rank("C").unwrap())
            .unwrap();
        assert_eq!(g.ids(&path), vec!["A", "B", "C"]);
        assert_eq!(cost, 80.0);
    }

    #[test]
    fn test_lowest_latency_tie_break_is_lexicographic() {
        let t = topology(&[("S", "Z", 5.0), ("Z", "T", 5.0), ("S", "C", 4.0), ("C", "T", 6.0)]);
        let g = SearchGraph::new(&t);
        let (path, cost) = g
            .lowest_latency(g.rank("S").unwrap(), g.rank("T").unwrap())
            .unwrap();
        assert_eq!(g.ids(&path), vec!["S", "C", "T"]);
        assert_eq!(cost, 10.0);
    }

    #[test]
    fn test_lowest_latency_follows_directions() {
        let t = topology(&[("A", "B", 1.0), ("C", "B", 1.0)]);
        let g = SearchGraph::new(&t);
        assert!(g
            .lowest_latency(g.rank("A").unwrap(), g.rank("C").unwrap())
            .is_none());
    }

    #[test]
    fn test_simple_paths_respect_cutoff() {
        let t = topology(&[
            ("A", "B", 1.0),
            ("B", "C", 1.0),
            ("C", "D", 1.0),
            ("A", "D", 1.0),
            ("B", "D", 1.0),
        ]);
        let g = SearchGraph::new(&t);
        let (a, d) = (g.rank("A").unwrap(), g.rank("D").unwrap());

        let one: Vec<_> = g.simple_paths(a, d, 1).iter().map(|p| g.ids(p)).collect();
        assert_eq!(one, vec![vec!["A", "D"]]);

        let three: Vec<_> = g.simple_paths(a, d, 3).iter().map(|p| g.ids(p)).collect();
        assert_eq!(
            three,
            vec![
                vec!["A", "B", "C", "D"],
                vec!["A", "B", "D"],
                vec!["A", "D"],
            ]
        );
    }

    #[test]
    fn test_simple_paths_skip_cycles() {
        let t = topology(&[("A", "B", 1.0), ("B", "A", 1.0), ("B", "C", 1.0)]);
        let g = SearchGraph::new(&t);
        let paths = g.simple_paths(g.rank("A").unwrap(), g.rank("C").unwrap(), 9);
        assert_eq!(paths.len(), 1);
        assert_eq!(g.ids(&paths[0]), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_widening_stops_at_first_cutoff_with_paths() {
        // Only path has exactly 4 edges
        let t = topology(&[("A", "B", 1.0), ("B", "C", 1.0), ("C", "D", 1.0), ("D", "E", 1.0)]);
        let g = SearchGraph::new(&t);
        let (cutoff, paths) = g
            .widening_simple_paths(g.rank("A").unwrap(), g.rank("E").unwrap(), 2, 9)
            .unwrap();
        assert_eq!(cutoff, 4);
        assert_eq!(paths.len(), 1);
    }

    #[test]
    fn test_widening_short_path_uses_minimum_cutoff() {
        let t = topology(&[("A", "B", 1.0)]);
        let g = SearchGraph::new(&t);
        let (cutoff, _) = g
            .widening_simple_paths(g.rank("A").unwrap(), g.rank("B").unwrap(), 2, 9)
            .unwrap();
        assert_eq!(cutoff, 2);
    }

    #[test]
    fn test_widening_gives_up_beyond_ceiling() {
        let links: Vec<(String, String)> = (0..10)
            .map(|i| (format!("n{:02}", i), format!("n{:02}", i + 1)))
            .collect();
        let mut t = Topology::new();
        for (a, b) in &links {
            t.add_link(a, b, 1.0);
        }
        let g = SearchGraph::new(&t);
        // n00 -> n10 needs 10 edges
        assert!(g
            .widening_simple_paths(g.rank("n00").unwrap(), g.rank("n10").unwrap(), 2, 9)
            .is_none());
    }
}
