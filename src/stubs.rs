// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Test-only operators and stores for exercising the engine without real operator
//! implementations.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use crate::traits::{
    DataStore, Operator, SourceAdapter, Stateful, TelemetryAware, TelemetryProvider,
};

fn forward<T: Clone>(successors: &[Arc<dyn Operator<T>>], value: T) -> anyhow::Result<()> {
    for successor in successors {
        successor.process(value.clone())?;
    }
    Ok(())
}

/// Counts every value it sees and forwards it to its successors.
///
/// Successors can be attached after construction so tests can build cycles.
pub struct CountingOperator<T> {
    name: String,
    processed: AtomicUsize,
    next: RwLock<Vec<Arc<dyn Operator<T>>>>,
}

impl<T> CountingOperator<T> {
    pub fn new(name: &str) -> Arc<Self> {
        Self::with_next(name, Vec::new())
    }

    pub fn with_next(name: &str, next: Vec<Arc<dyn Operator<T>>>) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            processed: AtomicUsize::new(0),
            next: RwLock::new(next),
        })
    }

    pub fn connect(&self, successor: Arc<dyn Operator<T>>) {
        self.next.write().unwrap().push(successor);
    }

    pub fn processed(&self) -> usize {
        self.processed.load(Ordering::SeqCst)
    }
}

impl<T: Clone + Send + 'static> Operator<T> for CountingOperator<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn process(&self, value: T) -> anyhow::Result<()> {
        self.processed.fetch_add(1, Ordering::SeqCst);
        let next = self.next.read().unwrap().clone();
        forward(&next, value)
    }

    fn successors(&self) -> Vec<Arc<dyn Operator<T>>> {
        self.next.read().unwrap().clone()
    }
}

/// Terminal operator collecting values behind a mutex.
pub struct SinkOperator<T> {
    name: String,
    values: Mutex<Vec<T>>,
}

impl<T: Clone> SinkOperator<T> {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            values: Mutex::new(Vec::new()),
        })
    }

    pub fn values(&self) -> Vec<T> {
        self.values.lock().unwrap().clone()
    }
}

impl<T: Clone + Send + 'static> Operator<T> for SinkOperator<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn process(&self, value: T) -> anyhow::Result<()> {
        self.values.lock().unwrap().push(value);
        Ok(())
    }

    fn successors(&self) -> Vec<Arc<dyn Operator<T>>> {
        Vec::new()
    }
}

/// Records how often it was handed a telemetry provider.
pub struct TelemetryProbe<T> {
    name: String,
    inits: AtomicUsize,
    provider: Mutex<Option<Arc<dyn TelemetryProvider>>>,
    next: Vec<Arc<dyn Operator<T>>>,
}

impl<T> TelemetryProbe<T> {
    pub fn new(name: &str, next: Vec<Arc<dyn Operator<T>>>) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            inits: AtomicUsize::new(0),
            provider: Mutex::new(None),
            next,
        })
    }

    pub fn inits(&self) -> usize {
        self.inits.load(Ordering::SeqCst)
    }

    pub fn provider_name(&self) -> Option<String> {
        self.provider
            .lock()
            .unwrap()
            .as_ref()
            .map(|provider| provider.name().to_string())
    }
}

impl<T> TelemetryAware for TelemetryProbe<T> {
    fn init_telemetry(&self, provider: Arc<dyn TelemetryProvider>) {
        self.inits.fetch_add(1, Ordering::SeqCst);
        *self.provider.lock().unwrap() = Some(provider);
    }
}

impl<T: Clone + Send + 'static> Operator<T> for TelemetryProbe<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn process(&self, value: T) -> anyhow::Result<()> {
        if let Some(provider) = self.provider.lock().unwrap().as_ref() {
            provider.record(&self.name, "processed", 1.0);
        }
        forward(&self.next, value)
    }

    fn successors(&self) -> Vec<Arc<dyn Operator<T>>> {
        self.next.clone()
    }

    fn as_telemetry_aware(&self) -> Option<&dyn TelemetryAware> {
        Some(self)
    }
}

/// Owns a fixed set of stores and forwards values untouched.
pub struct StatefulOperator<T> {
    name: String,
    stores: Vec<Arc<dyn DataStore>>,
    next: Vec<Arc<dyn Operator<T>>>,
}

impl<T> StatefulOperator<T> {
    pub fn new(
        name: &str,
        stores: Vec<Arc<dyn DataStore>>,
        next: Vec<Arc<dyn Operator<T>>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            stores,
            next,
        })
    }
}

impl<T> Stateful for StatefulOperator<T> {
    fn stores(&self) -> Vec<Arc<dyn DataStore>> {
        self.stores.clone()
    }
}

impl<T: Clone + Send + 'static> Operator<T> for StatefulOperator<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn process(&self, value: T) -> anyhow::Result<()> {
        forward(&self.next, value)
    }

    fn successors(&self) -> Vec<Arc<dyn Operator<T>>> {
        self.next.clone()
    }

    fn as_stateful(&self) -> Option<&dyn Stateful> {
        Some(self)
    }
}

/// Key/count store.
pub struct CountStore {
    name: String,
    counts: Mutex<HashMap<String, u64>>,
}

impl CountStore {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            counts: Mutex::new(HashMap::new()),
        })
    }

    pub fn increment(&self, key: &str) {
        *self.counts.lock().unwrap().entry(key.to_string()).or_insert(0) += 1;
    }

    pub fn get(&self, key: &str) -> u64 {
        self.counts.lock().unwrap().get(key).copied().unwrap_or(0)
    }
}

impl DataStore for CountStore {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Store of a second type, for type-filtering tests.
pub struct AuditStore {
    name: String,
}

impl AuditStore {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
        })
    }
}

impl DataStore for AuditStore {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Pull-based source stand-in that counts stop requests.
pub struct SourceStub<T> {
    name: String,
    stops: AtomicUsize,
    next: Vec<Arc<dyn Operator<T>>>,
}

impl<T> SourceStub<T> {
    pub fn new(name: &str, next: Vec<Arc<dyn Operator<T>>>) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            stops: AtomicUsize::new(0),
            next,
        })
    }

    pub fn stops(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }
}

impl<T> SourceAdapter for SourceStub<T> {
    fn stop(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
    }
}

impl<T: Clone + Send + 'static> Operator<T> for SourceStub<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn process(&self, value: T) -> anyhow::Result<()> {
        forward(&self.next, value)
    }

    fn successors(&self) -> Vec<Arc<dyn Operator<T>>> {
        self.next.clone()
    }

    fn as_source(&self) -> Option<&dyn SourceAdapter> {
        Some(self)
    }
}

/// Always fails.
pub struct FailingOperator {
    name: String,
}

impl FailingOperator {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
        })
    }
}

impl<T> Operator<T> for FailingOperator {
    fn name(&self) -> &str {
        &self.name
    }

    fn process(&self, _value: T) -> anyhow::Result<()> {
        anyhow::bail!("simulated operator failure")
    }

    fn successors(&self) -> Vec<Arc<dyn Operator<T>>> {
        Vec::new()
    }
}

/// Sleeps before forwarding, to keep work in flight.
pub struct DelayOperator<T> {
    name: String,
    delay: Duration,
    next: Vec<Arc<dyn Operator<T>>>,
}

impl<T> DelayOperator<T> {
    pub fn new(name: &str, delay: Duration, next: Vec<Arc<dyn Operator<T>>>) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            delay,
            next,
        })
    }
}

impl<T: Clone + Send + 'static> Operator<T> for DelayOperator<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn process(&self, value: T) -> anyhow::Result<()> {
        std::thread::sleep(self.delay);
        forward(&self.next, value)
    }

    fn successors(&self) -> Vec<Arc<dyn Operator<T>>> {
        self.next.clone()
    }
}

/// Builds a linear chain of `depth` counting operators ending in a sink.
///
/// Dropping a deep chain recurses once per link, so callers `mem::forget` it.
pub fn deep_chain(depth: usize) -> Arc<dyn Operator<u32>> {
    let mut node: Arc<dyn Operator<u32>> = SinkOperator::<u32>::new("sink");
    for _ in 0..depth {
        node = CountingOperator::<u32>::with_next("link", vec![node]);
    }
    node
}

/// Collects the message of every event emitted while [`LogCapture::capture`] runs.
#[derive(Clone, Default)]
pub struct LogCapture {
    messages: Arc<Mutex<Vec<String>>>,
}

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capture<R>(&self, f: impl FnOnce() -> R) -> R {
        let subscriber = tracing_subscriber::registry().with(self.clone());
        tracing::subscriber::with_default(subscriber, f)
    }

    pub fn count_containing(&self, needle: &str) -> usize {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter(|message| message.contains(needle))
            .count()
    }
}

struct MessageVisitor<'a>(&'a mut Option<String>);

impl Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            *self.0 = Some(format!("{:?}", value));
        }
    }
}

impl<S: Subscriber> Layer<S> for LogCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut message = None;
        event.record(&mut MessageVisitor(&mut message));
        if let Some(message) = message {
            self.messages.lock().unwrap().push(message);
        }
    }
}
