// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashSet;
use std::sync::Arc;

use tokio::runtime::Handle;

use crate::config::consts::DEFAULT_STREAM_NAME;
use crate::config::{CyclePolicy, StreamOptions, TelemetryBackend, TelemetryOptions};
use crate::errors::{GraphError, StreamError, StreamResult};
use crate::graph::{GraphVisitor, OperatorGraph, OperatorId};
use crate::observability::messages::graph::{
    BranchDetached, CycleDetected, DuplicateBranchName, FanInDetected,
};
use crate::observability::messages::StructuredLog;
use crate::observability::{NoopTelemetry, TracingTelemetry};
use crate::stream::{BranchOperator, Stream};
use crate::traits::{Operator, TelemetryProvider};

/// Assembles a [`Stream`] and checks the chain's shape before handing it over.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use the_streamwood::stream::{StreamBuilder, StreamStatus};
/// use the_streamwood::traits::Operator;
///
/// struct Print;
///
/// impl Operator<String> for Print {
///     fn name(&self) -> &str { "print" }
///     fn process(&self, value: String) -> anyhow::Result<()> {
///         println!("{}", value);
///         Ok(())
///     }
///     fn successors(&self) -> Vec<Arc<dyn Operator<String>>> { Vec::new() }
/// }
///
/// let stream = StreamBuilder::<String>::new("greetings")
///     .root(Arc::new(Print))
///     .build()
///     .unwrap();
///
/// stream.start();
/// stream.emit("hello".to_string()).unwrap();
/// assert_eq!(stream.status(), StreamStatus::Running);
/// ```
pub struct StreamBuilder<T> {
    name: String,
    root: Option<Arc<dyn Operator<T>>>,
    branches: Vec<Arc<BranchOperator<T>>>,
    telemetry: Option<Arc<dyn TelemetryProvider>>,
    options: StreamOptions,
    runtime: Option<Handle>,
}

impl<T: Clone + Send + 'static> StreamBuilder<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root: None,
            branches: Vec::new(),
            telemetry: None,
            options: StreamOptions::default(),
            runtime: None,
        }
    }

    pub fn root(mut self, root: Arc<dyn Operator<T>>) -> Self {
        self.root = Some(root);
        self
    }

    /// Register a branch for name lookup. It should also be a successor somewhere in
    /// the chain; `build` warns when it is not.
    pub fn branch(mut self, branch: Arc<BranchOperator<T>>) -> Self {
        self.branches.push(branch);
        self
    }

    pub fn branches<I>(mut self, branches: I) -> Self
    where
        I: IntoIterator<Item = Arc<BranchOperator<T>>>,
    {
        self.branches.extend(branches);
        self
    }

    /// Provider injected into telemetry-aware operators. Overrides `options.telemetry`.
    pub fn telemetry(mut self, provider: Arc<dyn TelemetryProvider>) -> Self {
        self.telemetry = Some(provider);
        self
    }

    pub fn options(mut self, options: StreamOptions) -> Self {
        self.options = options;
        self
    }

    pub fn runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn build(self) -> StreamResult<Stream<T>> {
        let name = match self.options.name.clone() {
            Some(name) => name,
            None if self.name.is_empty() => DEFAULT_STREAM_NAME.to_string(),
            None => self.name,
        };

        let root = self.root.ok_or_else(|| StreamError::MissingRoot {
            stream: name.clone(),
        })?;

        check_topology(&name, &root, &self.branches, self.options.cycle_policy)?;

        let telemetry = self
            .telemetry
            .unwrap_or_else(|| provider_from_options(&name, &self.options.telemetry));

        let stream = Stream::new(name, root, self.branches, telemetry);
        Ok(match self.runtime {
            Some(runtime) => stream.with_runtime(runtime),
            None => stream,
        })
    }
}

fn provider_from_options(stream: &str, options: &TelemetryOptions) -> Arc<dyn TelemetryProvider> {
    if !options.enabled {
        return Arc::new(NoopTelemetry);
    }
    match options.backend {
        TelemetryBackend::Noop => Arc::new(NoopTelemetry),
        TelemetryBackend::Tracing => Arc::new(TracingTelemetry::new(stream)),
    }
}

fn check_topology<T>(
    stream: &str,
    root: &Arc<dyn Operator<T>>,
    branches: &[Arc<BranchOperator<T>>],
    policy: CyclePolicy,
) -> Result<(), GraphError>
where
    T: Clone + Send + 'static,
{
    let mut seen_names = HashSet::new();
    for branch in branches {
        if !seen_names.insert(branch.name()) {
            DuplicateBranchName {
                stream,
                branch: branch.name(),
            }
            .log();
        }
    }

    let mut from_root = GraphVisitor::new();
    from_root.visit(root, |_| {});
    for branch in branches {
        if !from_root.has_visited(OperatorId::of(branch)) {
            BranchDetached {
                stream,
                branch: branch.name(),
            }
            .log();
        }
    }

    let mut roots = vec![Arc::clone(root)];
    for branch in branches {
        let branch: Arc<dyn Operator<T>> = branch.clone();
        roots.push(branch);
    }
    let topology = OperatorGraph::from_roots(&roots);

    let in_degrees = topology.in_degrees();
    for index in topology.fan_in_points() {
        if let Some(operator) = topology.node(index) {
            FanInDetected {
                stream,
                operator: operator.name(),
                predecessors: in_degrees[index],
            }
            .log();
        }
    }

    if policy == CyclePolicy::Allow {
        return Ok(());
    }

    if let Err(error) = topology.validate_acyclic() {
        let GraphError::CyclicChain { cycle } = &error;
        CycleDetected { stream, cycle }.log();
        if policy == CyclePolicy::Reject {
            return Err(error);
        }
    }

    Ok(())
}
