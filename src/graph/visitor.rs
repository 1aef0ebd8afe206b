// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashSet;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::traits::Operator;

/// Identity of an operator instance: the address of its shared allocation.
///
/// Two `Arc`s pointing at the same operator, including one typed as the concrete
/// operator and one as `dyn Operator<T>`, yield the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperatorId(usize);

impl OperatorId {
    pub fn of<O: ?Sized>(operator: &Arc<O>) -> Self {
        Self(Arc::as_ptr(operator) as *const () as usize)
    }
}

/// Cycle-safe walk over an operator chain.
///
/// Each reachable operator is handed to the callback exactly once, however many paths
/// lead to it. Successors are followed in the order the operator reports them, depth
/// first, using an explicit stack so long chains cannot overflow the call stack.
///
/// A visitor remembers what it has seen, so visiting several roots with the same
/// visitor still reaches each shared operator once.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use the_streamwood::graph::GraphVisitor;
/// use the_streamwood::traits::Operator;
///
/// struct Leaf;
///
/// impl Operator<u32> for Leaf {
///     fn name(&self) -> &str { "leaf" }
///     fn process(&self, _value: u32) -> anyhow::Result<()> { Ok(()) }
///     fn successors(&self) -> Vec<Arc<dyn Operator<u32>>> { Vec::new() }
/// }
///
/// let root: Arc<dyn Operator<u32>> = Arc::new(Leaf);
/// let mut names = Vec::new();
/// let mut visitor = GraphVisitor::new();
///
/// visitor.visit(&root, |op| names.push(op.name().to_string()));
/// visitor.visit(&root, |op| names.push(op.name().to_string()));
///
/// assert_eq!(names, vec!["leaf"]);
/// ```
pub struct GraphVisitor<T> {
    visited: HashSet<OperatorId>,
    _marker: PhantomData<fn(T)>,
}

impl<T> GraphVisitor<T> {
    pub fn new() -> Self {
        Self {
            visited: HashSet::new(),
            _marker: PhantomData,
        }
    }

    /// Walk everything reachable from `root` that this visitor has not seen yet.
    ///
    /// Returns the number of operators newly visited.
    pub fn visit<F>(&mut self, root: &Arc<dyn Operator<T>>, mut on_node: F) -> usize
    where
        F: FnMut(&Arc<dyn Operator<T>>),
    {
        let before = self.visited.len();
        let mut pending = vec![Arc::clone(root)];

        while let Some(node) = pending.pop() {
            if !self.visited.insert(OperatorId::of(&node)) {
                continue;
            }

            on_node(&node);

            // Reversed so the first successor is popped first.
            pending.extend(node.successors().into_iter().rev());
        }

        self.visited.len() - before
    }

    pub fn has_visited(&self, id: OperatorId) -> bool {
        self.visited.contains(&id)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}

impl<T> Default for GraphVisitor<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Walk every root with one shared visitor. Returns the number of distinct operators seen.
pub fn walk<T, F>(roots: &[Arc<dyn Operator<T>>], mut on_node: F) -> usize
where
    F: FnMut(&Arc<dyn Operator<T>>),
{
    let mut visitor = GraphVisitor::new();
    for root in roots {
        visitor.visit(root, &mut on_node);
    }
    visitor.visited_count()
}
