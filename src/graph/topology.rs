// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::GraphError;
use crate::graph::visitor::{GraphVisitor, OperatorId};
use crate::traits::Operator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Arena snapshot of an operator chain.
///
/// Operators are stored in visit order (the first root is index 0) and edges are
/// indices into that arena, so structural questions such as "is there a cycle" or
/// "where do paths converge" can be answered without touching the operators again.
pub struct OperatorGraph<T> {
    nodes: Vec<Arc<dyn Operator<T>>>,
    edges: Vec<Vec<usize>>,
    index: HashMap<OperatorId, usize>,
}

impl<T> OperatorGraph<T> {
    pub fn from_root(root: &Arc<dyn Operator<T>>) -> Self {
        Self::from_roots(std::slice::from_ref(root))
    }

    pub fn from_roots(roots: &[Arc<dyn Operator<T>>]) -> Self {
        let mut nodes: Vec<Arc<dyn Operator<T>>> = Vec::new();
        let mut index = HashMap::new();
        let mut visitor = GraphVisitor::new();

        for root in roots {
            visitor.visit(root, |operator| {
                index.insert(OperatorId::of(operator), nodes.len());
                nodes.push(Arc::clone(operator));
            });
        }

        let edges = nodes
            .iter()
            .map(|node| {
                node.successors()
                    .iter()
                    .filter_map(|successor| index.get(&OperatorId::of(successor)).copied())
                    .collect()
            })
            .collect();

        Self {
            nodes,
            edges,
            index,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, index: usize) -> Option<&Arc<dyn Operator<T>>> {
        self.nodes.get(index)
    }

    pub fn index_of<O: ?Sized>(&self, operator: &Arc<O>) -> Option<usize> {
        self.index.get(&OperatorId::of(operator)).copied()
    }

    pub fn contains<O: ?Sized>(&self, operator: &Arc<O>) -> bool {
        self.index_of(operator).is_some()
    }

    /// Successor indices of `index`, in the order the operator reports them.
    pub fn successors(&self, index: usize) -> &[usize] {
        self.edges.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn names(&self) -> Vec<&str> {
        self.nodes.iter().map(|node| node.name()).collect()
    }

    pub fn in_degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.nodes.len()];
        for targets in &self.edges {
            for &target in targets {
                degrees[target] += 1;
            }
        }
        degrees
    }

    /// Operators reached from more than one predecessor edge.
    pub fn fan_in_points(&self) -> Vec<usize> {
        self.in_degrees()
            .into_iter()
            .enumerate()
            .filter(|(_, degree)| *degree > 1)
            .map(|(index, _)| index)
            .collect()
    }

    /// Find one cycle, returned as operator names with the first name repeated at the end.
    ///
    /// Three-colour DFS: a gray node is on the current path, so reaching one again
    /// closes a loop. Converging paths only ever reach black nodes and are not cycles.
    pub fn find_cycle(&self) -> Option<Vec<String>> {
        let mut colors = vec![Color::White; self.nodes.len()];

        for start in 0..self.nodes.len() {
            if colors[start] != Color::White {
                continue;
            }
            if let Some(cycle) = self.dfs_cycle(start, &mut colors) {
                return Some(
                    cycle
                        .into_iter()
                        .map(|index| self.nodes[index].name().to_string())
                        .collect(),
                );
            }
        }

        None
    }

    pub fn validate_acyclic(&self) -> Result<(), GraphError> {
        match self.find_cycle() {
            Some(cycle) => Err(GraphError::CyclicChain { cycle }),
            None => Ok(()),
        }
    }

    /// Iterative three-colour DFS from `start`. Each frame is a node plus the index of
    /// its next unexplored edge; the frames double as the current path.
    fn dfs_cycle(&self, start: usize, colors: &mut [Color]) -> Option<Vec<usize>> {
        let mut frames: Vec<(usize, usize)> = vec![(start, 0)];
        colors[start] = Color::Gray;

        while let Some(frame) = frames.last_mut() {
            let (node, edge) = *frame;
            let Some(&next) = self.edges[node].get(edge) else {
                colors[node] = Color::Black;
                frames.pop();
                continue;
            };
            frame.1 += 1;

            match colors[next] {
                Color::Gray => {
                    let begin = frames.iter().position(|&(on_path, _)| on_path == next)?;
                    let mut cycle: Vec<usize> =
                        frames[begin..].iter().map(|&(on_path, _)| on_path).collect();
                    cycle.push(next);
                    return Some(cycle);
                }
                Color::White => {
                    colors[next] = Color::Gray;
                    frames.push((next, 0));
                }
                Color::Black => {}
            }
        }

        None
    }
}

impl<T> std::fmt::Debug for OperatorGraph<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperatorGraph")
            .field("operators", &self.names())
            .field("edges", &self.edges)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stubs::{deep_chain, CountingOperator, SinkOperator};

    #[test]
    fn test_linear_chain_has_no_cycle_or_fan_in() {
        let sink = SinkOperator::<u32>::new("sink");
        let root: Arc<dyn Operator<u32>> = CountingOperator::<u32>::with_next("root", vec![sink]);

        let graph = OperatorGraph::from_root(&root);
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.names(), vec!["root", "sink"]);
        assert_eq!(graph.successors(0), &[1]);
        assert!(graph.successors(1).is_empty());
        assert!(graph.fan_in_points().is_empty());
        assert!(graph.find_cycle().is_none());
    }

    #[test]
    fn test_diamond_is_fan_in_not_cycle() {
        let merge = SinkOperator::<u32>::new("merge");
        let left = CountingOperator::<u32>::with_next("left", vec![merge.clone()]);
        let right = CountingOperator::<u32>::with_next("right", vec![merge.clone()]);
        let root: Arc<dyn Operator<u32>> = CountingOperator::<u32>::with_next("root", vec![left, right]);

        let graph = OperatorGraph::from_root(&root);
        let merge_index = graph.index_of(&merge).unwrap();

        assert_eq!(graph.len(), 4);
        assert_eq!(graph.fan_in_points(), vec![merge_index]);
        assert_eq!(graph.in_degrees()[merge_index], 2);
        assert!(graph.validate_acyclic().is_ok());
    }

    #[test]
    fn test_cycle_path_is_reported() {
        let a = CountingOperator::<u32>::new("a");
        let b = CountingOperator::<u32>::new("b");
        let c = CountingOperator::<u32>::new("c");
        a.connect(b.clone());
        b.connect(c.clone());
        c.connect(b.clone());

        let root: Arc<dyn Operator<u32>> = a;
        let graph = OperatorGraph::from_root(&root);

        assert_eq!(
            graph.find_cycle(),
            Some(vec!["b".to_string(), "c".to_string(), "b".to_string()])
        );
        assert_eq!(
            graph.validate_acyclic(),
            Err(GraphError::CyclicChain {
                cycle: vec!["b".to_string(), "c".to_string(), "b".to_string()],
            })
        );
    }

    #[test]
    fn test_self_loop_is_a_cycle() {
        let looping = CountingOperator::<u32>::new("loop");
        looping.connect(looping.clone());

        let root: Arc<dyn Operator<u32>> = looping;
        let graph = OperatorGraph::from_root(&root);

        assert_eq!(graph.len(), 1);
        assert_eq!(
            graph.find_cycle(),
            Some(vec!["loop".to_string(), "loop".to_string()])
        );
    }

    #[test]
    fn test_multiple_roots_share_arena() {
        let shared = SinkOperator::<u32>::new("shared");
        let first: Arc<dyn Operator<u32>> = CountingOperator::<u32>::with_next("first", vec![shared.clone()]);
        let second: Arc<dyn Operator<u32>> = CountingOperator::<u32>::with_next("second", vec![shared.clone()]);

        let graph = OperatorGraph::from_roots(&[first, second.clone()]);
        assert_eq!(graph.len(), 3);
        assert!(graph.contains(&second));
        assert_eq!(graph.fan_in_points(), vec![graph.index_of(&shared).unwrap()]);
    }

    #[test]
    fn test_deep_linear_chain_has_no_cycle() {
        const DEPTH: usize = 100_000;

        let root = deep_chain(DEPTH);
        let graph = OperatorGraph::from_root(&root);

        assert_eq!(graph.len(), DEPTH + 1);
        assert!(graph.find_cycle().is_none());
        assert!(graph.validate_acyclic().is_ok());

        drop(graph);
        std::mem::forget(root);
    }

    #[test]
    fn test_cycle_closing_deep_chain_is_reported_in_full() {
        const DEPTH: usize = 100_000;

        let tail = CountingOperator::<u32>::new("tail");
        let mut node: Arc<dyn Operator<u32>> = tail.clone();
        for _ in 0..DEPTH {
            node = CountingOperator::<u32>::with_next("link", vec![node]);
        }
        let head = CountingOperator::<u32>::with_next("head", vec![node]);
        tail.connect(head.clone());

        let root: Arc<dyn Operator<u32>> = head;
        let cycle = OperatorGraph::from_root(&root).find_cycle().unwrap();

        assert_eq!(cycle.len(), DEPTH + 3);
        assert_eq!(cycle.first().map(String::as_str), Some("head"));
        assert_eq!(cycle[cycle.len() - 2], "tail");
        assert_eq!(cycle.last().map(String::as_str), Some("head"));
    }
}
