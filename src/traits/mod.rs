pub mod operator;
pub mod store;
pub mod telemetry;

pub use operator::{Operator, SourceAdapter, Stateful, TelemetryAware};
pub use store::{downcast_store, AsAnyStore, DataStore};
pub use telemetry::TelemetryProvider;
