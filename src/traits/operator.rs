// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::traits::store::DataStore;
use crate::traits::telemetry::TelemetryProvider;

/// A single processing node in a stream's operator chain.
///
/// Every operator exposes its downstream links through [`Operator::successors`], even
/// when it has none. The engine relies on that list alone to walk the chain, so an
/// operator that forwards values somewhere it does not report is invisible to telemetry
/// propagation and state-store discovery.
///
/// The optional capabilities (telemetry, owned state, pull-based source) are exposed as
/// accessor methods returning `None` by default. An operator opts in by returning
/// `Some(self)`.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use the_streamwood::traits::Operator;
///
/// struct Discard;
///
/// impl Operator<String> for Discard {
///     fn name(&self) -> &str {
///         "discard"
///     }
///
///     fn process(&self, _value: String) -> anyhow::Result<()> {
///         Ok(())
///     }
///
///     fn successors(&self) -> Vec<Arc<dyn Operator<String>>> {
///         Vec::new()
///     }
/// }
/// ```
pub trait Operator<T>: Send + Sync {
    /// Label used in logs and cycle reports. Not required to be unique.
    fn name(&self) -> &str;

    /// Perform this operator's work on `value`, including any forwarding downstream.
    fn process(&self, value: T) -> anyhow::Result<()>;

    /// Downstream operators reachable from this node.
    fn successors(&self) -> Vec<Arc<dyn Operator<T>>>;

    fn as_telemetry_aware(&self) -> Option<&dyn TelemetryAware> {
        None
    }

    fn as_stateful(&self) -> Option<&dyn Stateful> {
        None
    }

    fn as_source(&self) -> Option<&dyn SourceAdapter> {
        None
    }
}

/// Operators that accept a telemetry provider when their stream is constructed.
pub trait TelemetryAware {
    /// Called once per propagation walk that reaches this operator.
    fn init_telemetry(&self, provider: Arc<dyn TelemetryProvider>);
}

/// Operators that own state stores.
pub trait Stateful {
    fn stores(&self) -> Vec<Arc<dyn DataStore>>;
}

/// Pull-based input operators with their own polling lifecycle.
///
/// A stream rooted at a source adapter rejects manual emission. `Stream::stop` calls
/// [`SourceAdapter::stop`] so the adapter can release its pull loop; starting the loop
/// is the adapter's own business.
pub trait SourceAdapter {
    fn stop(&self);
}
