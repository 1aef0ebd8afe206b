// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use crate::errors::{StreamError, StreamResult};
use crate::graph::{walk, OperatorGraph};
use crate::observability::messages::graph::{StoresCollected, TelemetryPropagated};
use crate::observability::messages::stream::{
    EmitCancelled, EmitDispatched, EmitFailed, EmitRejected, SourceLoopNotStarted, StreamCreated,
    StreamStarted, StreamStopped,
};
use crate::observability::messages::StructuredLog;
use crate::stream::{BranchOperator, EmitHandle};
use crate::traits::{downcast_store, DataStore, Operator, TelemetryProvider};

/// Whether a stream currently accepts emissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamStatus {
    Running,
    NotRunning,
}

impl Display for StreamStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamStatus::Running => write!(f, "running"),
            StreamStatus::NotRunning => write!(f, "not running"),
        }
    }
}

/// Lifecycle-controlled facade over an operator chain.
///
/// A stream owns a root operator, a flat list of named branches that also appear
/// somewhere in the chain, and the telemetry provider injected into the chain when the
/// stream was constructed. Only the running flag changes after construction.
///
/// ## Lifecycle
///
/// `NotStarted -> Running <-> Stopped`. Stopped behaves like NotStarted for emission and
/// a stream can be restarted any number of times.
///
/// ## Concurrency
///
/// The running flag is atomic, so each `start`/`stop` call is individually consistent,
/// but a caller needing "exactly one starter wins" semantics must serialise those calls
/// itself. Emissions share the chain: operators holding mutable state are responsible
/// for their own synchronisation.
pub struct Stream<T> {
    name: String,
    root: Arc<dyn Operator<T>>,
    branches: Vec<Arc<BranchOperator<T>>>,
    telemetry: Arc<dyn TelemetryProvider>,
    running: AtomicBool,
    runtime: Option<Handle>,
}

impl<T: Clone + Send + 'static> Stream<T> {
    /// Assemble a stream and push `telemetry` into every telemetry-aware operator
    /// reachable from the root or any listed branch.
    pub fn new(
        name: impl Into<String>,
        root: Arc<dyn Operator<T>>,
        branches: Vec<Arc<BranchOperator<T>>>,
        telemetry: Arc<dyn TelemetryProvider>,
    ) -> Self {
        let stream = Self {
            name: name.into(),
            root,
            branches,
            telemetry,
            running: AtomicBool::new(false),
            runtime: None,
        };

        stream.propagate_telemetry();

        StreamCreated {
            stream: &stream.name,
            root: stream.root.name(),
            branch_count: stream.branches.len(),
        }
        .log();

        stream
    }

    /// Schedule async emissions on `runtime` instead of the caller's ambient runtime.
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Arc<dyn Operator<T>> {
        &self.root
    }

    pub fn telemetry(&self) -> &Arc<dyn TelemetryProvider> {
        &self.telemetry
    }

    /// Mark the stream as running. Calling it while running changes nothing.
    ///
    /// A source adapter at the root keeps driving its own pull loop; `start` does not
    /// kick it off.
    pub fn start(&self) {
        if self.running.swap(true, Ordering::SeqCst) {
            return;
        }

        let source = self.source_name();
        StreamStarted {
            stream: &self.name,
            source_driven: source.is_some(),
        }
        .log();

        if let Some(source_operator) = source {
            SourceLoopNotStarted {
                stream: &self.name,
                source_operator,
            }
            .log();
        }
    }

    /// Mark the stream as not running and ask a source adapter root to release its
    /// pull loop. The adapter's hook runs on every call.
    pub fn stop(&self) {
        let was_running = self.running.swap(false, Ordering::SeqCst);

        if let Some(source) = self.root.as_source() {
            source.stop();
        }

        if was_running {
            StreamStopped {
                stream: &self.name,
                source_stopped: self.source_name(),
            }
            .log();
        }
    }

    pub fn status(&self) -> StreamStatus {
        if self.is_running() {
            StreamStatus::Running
        } else {
            StreamStatus::NotRunning
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Drive `value` through the chain on the calling thread.
    pub fn emit(&self, value: T) -> StreamResult<()> {
        self.check_accepts_emission()?;

        let dispatched = EmitDispatched {
            stream: &self.name,
            root: self.root.name(),
            asynchronous: false,
        };
        let span = dispatched.span("emit");
        let _guard = span.enter();
        dispatched.log();

        self.root.process(value).map_err(|source| {
            EmitFailed {
                stream: &self.name,
                operator: self.root.name(),
                error: &source,
            }
            .log();
            StreamError::Operator {
                operator: self.root.name().to_string(),
                source,
            }
        })
    }

    /// Schedule `value` onto the blocking pool and return a handle to the work.
    ///
    /// `cancellation` is checked once, before scheduling. Cancelling it afterwards has
    /// no effect on work already dispatched.
    pub fn emit_async(
        &self,
        value: T,
        cancellation: &CancellationToken,
    ) -> StreamResult<EmitHandle> {
        self.check_accepts_emission()?;

        if cancellation.is_cancelled() {
            EmitCancelled {
                stream: &self.name,
                root: self.root.name(),
            }
            .log();
            return Err(StreamError::Cancelled {
                stream: self.name.clone(),
            });
        }

        let runtime = match &self.runtime {
            Some(runtime) => runtime.clone(),
            None => Handle::try_current().map_err(|_| {
                self.reject(StreamError::RuntimeUnavailable {
                    stream: self.name.clone(),
                })
            })?,
        };

        let dispatched = EmitDispatched {
            stream: &self.name,
            root: self.root.name(),
            asynchronous: true,
        };
        dispatched.log();
        let span = dispatched.span("emit_async");

        let root = Arc::clone(&self.root);
        let task = runtime.spawn_blocking(move || {
            let _guard = span.enter();
            root.process(value)
        });

        Ok(EmitHandle::new(
            self.name.clone(),
            self.root.name().to_string(),
            task,
        ))
    }

    /// Name-to-branch map, rebuilt on every call. A later branch shadows an earlier one
    /// with the same name.
    pub fn branches(&self) -> HashMap<String, Arc<BranchOperator<T>>> {
        let mut by_name = HashMap::with_capacity(self.branches.len());
        for branch in &self.branches {
            by_name.insert(branch.name().to_string(), Arc::clone(branch));
        }
        by_name
    }

    /// Branch registered under `name`, last registration first.
    pub fn branch(&self, name: &str) -> Option<Arc<BranchOperator<T>>> {
        self.branches
            .iter()
            .rev()
            .find(|branch| branch.name() == name)
            .cloned()
    }

    /// Every store owned by a stateful operator in the chain, each operator counted once.
    ///
    /// Walks the chain on every call; nothing is cached.
    pub fn state_stores(&self) -> Vec<Arc<dyn DataStore>> {
        let mut stores = Vec::new();
        let visited = walk(&self.roots(), |operator| {
            if let Some(stateful) = operator.as_stateful() {
                stores.extend(stateful.stores());
            }
        });

        StoresCollected {
            stream: &self.name,
            visited,
            store_count: stores.len(),
        }
        .log();

        stores
    }

    pub fn state_stores_by_type<S: DataStore + 'static>(&self) -> Vec<Arc<S>> {
        self.state_stores()
            .into_iter()
            .filter_map(downcast_store::<S>)
            .collect()
    }

    pub fn state_store_by_name<S: DataStore + 'static>(&self, name: &str) -> Option<Arc<S>> {
        self.state_stores()
            .into_iter()
            .filter(|store| store.name() == name)
            .find_map(downcast_store::<S>)
    }

    /// Arena snapshot of the chain, for cycle and fan-in analysis.
    pub fn topology(&self) -> OperatorGraph<T> {
        OperatorGraph::from_roots(&self.roots())
    }

    /// The root followed by every listed branch. Branches are normally reachable from
    /// the root already; listing them keeps detached branches covered too.
    fn roots(&self) -> Vec<Arc<dyn Operator<T>>> {
        let mut roots = Vec::with_capacity(self.branches.len() + 1);
        roots.push(Arc::clone(&self.root));
        for branch in &self.branches {
            let branch: Arc<dyn Operator<T>> = branch.clone();
            roots.push(branch);
        }
        roots
    }

    fn propagate_telemetry(&self) {
        let mut initialized = 0;
        let visited = walk(&self.roots(), |operator| {
            if let Some(aware) = operator.as_telemetry_aware() {
                aware.init_telemetry(Arc::clone(&self.telemetry));
                initialized += 1;
            }
        });

        TelemetryPropagated {
            stream: &self.name,
            provider: self.telemetry.name(),
            visited,
            initialized,
        }
        .log();
    }

    fn source_name(&self) -> Option<&str> {
        self.root.as_source().map(|_| self.root.name())
    }

    fn check_accepts_emission(&self) -> StreamResult<()> {
        if !self.is_running() {
            return Err(self.reject(StreamError::NotRunning {
                stream: self.name.clone(),
            }));
        }

        if let Some(source_operator) = self.source_name() {
            return Err(self.reject(StreamError::SourceDriven {
                stream: self.name.clone(),
                source_operator: source_operator.to_string(),
            }));
        }

        Ok(())
    }

    fn reject(&self, error: StreamError) -> StreamError {
        EmitRejected {
            stream: &self.name,
            error: &error,
        }
        .log();
        error
    }
}

impl<T> std::fmt::Debug for Stream<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stream")
            .field("name", &self.name)
            .field("root", &self.root.name())
            .field(
                "branches",
                &self.branches.iter().map(|b| b.name()).collect::<Vec<_>>(),
            )
            .field("telemetry", &self.telemetry.name())
            .field("running", &self.running.load(Ordering::SeqCst))
            .finish()
    }
}
