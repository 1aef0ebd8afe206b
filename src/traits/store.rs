// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::any::Any;
use std::sync::Arc;

/// Named unit of state owned by a stateful operator.
///
/// Stores are looked up by name or by their concrete type; the type lookup goes through
/// [`AsAnyStore`], which every `Send + Sync + 'static` type gets for free.
pub trait DataStore: AsAnyStore + Send + Sync {
    fn name(&self) -> &str;

    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Upcast to `Any` so a type-erased store can be downcast back to its concrete type.
pub trait AsAnyStore {
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<S: Any + Send + Sync> AsAnyStore for S {
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// Downcast a type-erased store to `S`, returning `None` on a type mismatch.
pub fn downcast_store<S: DataStore + 'static>(store: Arc<dyn DataStore>) -> Option<Arc<S>> {
    AsAnyStore::into_any(store).downcast::<S>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        name: String,
    }

    impl DataStore for Counter {
        fn name(&self) -> &str {
            &self.name
        }
    }

    struct Journal;

    impl DataStore for Journal {
        fn name(&self) -> &str {
            "journal"
        }
    }

    #[test]
    fn downcast_matches_concrete_type() {
        let store: Arc<dyn DataStore> = Arc::new(Counter {
            name: "counts".to_string(),
        });

        let counter = downcast_store::<Counter>(store).unwrap();
        assert_eq!(counter.name(), "counts");
    }

    #[test]
    fn downcast_rejects_other_types() {
        let store: Arc<dyn DataStore> = Arc::new(Journal);
        assert!(downcast_store::<Counter>(store).is_none());
    }

    #[test]
    fn type_name_reports_concrete_type() {
        let store: Arc<dyn DataStore> = Arc::new(Journal);
        assert!(store.type_name().ends_with("Journal"));
    }
}
