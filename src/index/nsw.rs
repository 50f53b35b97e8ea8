use super::exact::squared;
use crate::Distance;
use std::cmp::Ordering;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Neighbor {
    dist: Distance,
    id: u32,
}
impl Eq for Neighbor {}
impl Ord for Neighbor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dist.total_cmp(&other.dist).then(self.id.cmp(&other.id))
    }
}
impl PartialOrd for Neighbor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// navigable-small-world graph for approximate nearest neighbor.
/// inserts greedily wire each vector to its `degree` nearest published
/// nodes; queries walk the graph with a candidate list of `breadth`.
/// recall is traded against memory and latency, never guaranteed 100%.
#[derive(Debug, Clone, PartialEq)]
pub struct Nsw {
    pub(crate) dimension: usize,
    pub(crate) degree: usize,
    pub(crate) breadth: usize,
    pub(crate) data: Vec<f32>,
    pub(crate) links: Vec<Vec<u32>>,
}

impl Nsw {
    pub fn build(dimension: usize, degree: usize, breadth: usize, vectors: &[Vec<f32>]) -> Self {
        let mut graph = Self {
            dimension,
            degree,
            breadth,
            data: Vec::with_capacity(vectors.len() * dimension),
            links: Vec::with_capacity(vectors.len()),
        };
        for vector in vectors {
            graph.insert(vector);
        }
        graph
    }

    pub fn count(&self) -> usize {
        self.links.len()
    }
    fn row(&self, i: u32) -> &[f32] {
        let i = i as usize;
        &self.data[i * self.dimension..(i + 1) * self.dimension]
    }

    fn insert(&mut self, vector: &[f32]) {
        let id = self.count() as u32;
        let peers = self
            .walk(vector, self.degree, self.breadth.max(self.degree))
            .into_iter()
            .map(|(_, peer)| peer)
            .collect::<Vec<_>>();
        self.data.extend_from_slice(vector);
        self.links.push(peers.clone());
        for peer in peers {
            self.links[peer as usize].push(id);
            if self.links[peer as usize].len() > self.degree {
                self.prune(peer);
            }
        }
    }

    /// keep only the `degree` nearest neighbors of an overfull node
    fn prune(&mut self, node: u32) {
        let anchor = self.row(node).to_vec();
        let mut peers = self.links[node as usize]
            .iter()
            .map(|p| Neighbor {
                dist: squared(self.row(*p), &anchor),
                id: *p,
            })
            .collect::<Vec<_>>();
        peers.sort();
        peers.truncate(self.degree);
        self.links[node as usize] = peers.into_iter().map(|n| n.id).collect();
    }

    pub fn search(&self, query: &[f32], k: usize) -> Vec<(Distance, usize)> {
        self.walk(query, k, self.breadth.max(k))
            .into_iter()
            .map(|(dist, id)| (dist, id as usize))
            .collect()
    }

    /// best-first beam search from the fixed entry node. the candidate
    /// frontier is a min-heap, the running result set a bounded max-heap.
    fn walk(&self, query: &[f32], k: usize, breadth: usize) -> Vec<(Distance, u32)> {
        if self.count() == 0 {
            return Vec::new();
        }
        let entry = Neighbor {
            dist: squared(self.row(0), query),
            id: 0,
        };
        let mut visited = vec![false; self.count()];
        visited[0] = true;
        let mut frontier = BinaryHeap::from([Reverse(entry)]);
        let mut nearest = BinaryHeap::from([entry]);
        while let Some(Reverse(candidate)) = frontier.pop() {
            if nearest.len() >= breadth {
                if let Some(worst) = nearest.peek() {
                    if candidate.dist > worst.dist {
                        break;
                    }
                }
            }
            for peer in self.links[candidate.id as usize].iter() {
                if !visited[*peer as usize] {
                    visited[*peer as usize] = true;
                    let next = Neighbor {
                        dist: squared(self.row(*peer), query),
                        id: *peer,
                    };
                    let admit = nearest.len() < breadth
                        || nearest.peek().map(|w| next.dist < w.dist).unwrap_or(true);
                    if admit {
                        frontier.push(Reverse(next));
                        nearest.push(next);
                        if nearest.len() > breadth {
                            nearest.pop();
                        }
                    }
                }
            }
        }
        let mut hits = nearest
            .into_iter()
            .map(|n| (n.dist, n.id))
            .collect::<Vec<_>>();
        hits.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        hits.truncate(k);
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Vec<Vec<f32>> {
        (0..64).map(|i| vec![(i % 8) as f32, (i / 8) as f32]).collect()
    }

    #[test]
    fn finds_itself() {
        let vectors = grid();
        let graph = Nsw::build(2, 8, 32, &vectors);
        for (i, v) in vectors.iter().enumerate().step_by(7) {
            let hits = graph.search(v, 1);
            assert_eq!(hits[0].1, i);
            assert_eq!(hits[0].0, 0.0);
        }
    }

    #[test]
    fn neighbors_are_near() {
        let graph = Nsw::build(2, 8, 32, &grid());
        let hits = graph.search(&[3.4, 3.4], 4);
        assert_eq!(hits.len(), 4);
        // true nearest is (3, 3) = id 27
        assert_eq!(hits[0].1, 27);
        assert!(hits.iter().all(|(d, _)| *d <= 2.0));
    }

    #[test]
    fn degree_is_bounded() {
        let graph = Nsw::build(2, 4, 16, &grid());
        assert!(graph.links.iter().all(|l| l.len() <= 4));
    }

    #[test]
    fn empty_graph_returns_nothing() {
        let graph = Nsw::build(2, 4, 16, &[]);
        assert!(graph.search(&[0.0, 0.0], 3).is_empty());
    }
}
