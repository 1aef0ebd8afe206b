// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::traits::Operator;

/// Named fork point inside an operator chain.
///
/// For traversal it is an ordinary operator; its name is what `Stream::branches`
/// indexes on. Processing hands a clone of the value to every successor in order and
/// stops at the first failure.
pub struct BranchOperator<T> {
    name: String,
    successors: Vec<Arc<dyn Operator<T>>>,
}

impl<T> BranchOperator<T> {
    pub fn new(name: impl Into<String>, successors: Vec<Arc<dyn Operator<T>>>) -> Self {
        Self {
            name: name.into(),
            successors,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.successors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.successors.is_empty()
    }
}

impl<T: Clone + Send + 'static> Operator<T> for BranchOperator<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn process(&self, value: T) -> anyhow::Result<()> {
        if let Some((last, rest)) = self.successors.split_last() {
            for successor in rest {
                successor.process(value.clone())?;
            }
            last.process(value)?;
        }
        Ok(())
    }

    fn successors(&self) -> Vec<Arc<dyn Operator<T>>> {
        self.successors.clone()
    }
}

impl<T> std::fmt::Debug for BranchOperator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BranchOperator")
            .field("name", &self.name)
            .field(
                "successors",
                &self.successors.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
