//! Registration storage: the mutable pending registry a builder owns, and
//! the immutable service graph a built container wraps.
//!
//! Both map [`ServiceKey`] to a production strategy. The pending side may
//! still be waiting on autowiring (its by-class dependency lists can be
//! undecided); the graph side is fully finalized and validated.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::blueprint::{ClassBlueprint, Resolved};
use crate::key::ServiceKey;

/// Zero-argument production function for by-factory registrations.
///
/// `Arc` rather than `Box` because the built graph is shared across
/// threads and the closure is invoked through shared references.
pub type FactoryFn = Arc<dyn Fn() -> Resolved + Send + Sync>;

/// Production strategy as staged by the builder.
///
/// A by-class entry with `dependencies: None` has requested autowiring;
/// the list is decided at build time.
pub(crate) enum PendingStrategy {
    Class {
        blueprint: ClassBlueprint,
        dependencies: Option<Vec<ServiceKey>>,
    },
    Instance {
        value: Resolved,
    },
    Factory {
        produce: FactoryFn,
    },
}

impl PendingStrategy {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            PendingStrategy::Class { .. } => "class",
            PendingStrategy::Instance { .. } => "instance",
            PendingStrategy::Factory { .. } => "factory",
        }
    }
}

impl fmt::Debug for PendingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PendingStrategy").field(&self.kind()).finish()
    }
}

/// Finalized production strategy, as stored in the service graph.
///
/// Exactly one variant per registered key. Only the `Class` variant has
/// outgoing dependency edges; `Instance` and `Factory` are graph leaves.
pub(crate) enum Strategy {
    Class {
        blueprint: ClassBlueprint,
        dependencies: Vec<ServiceKey>,
        /// Whether the list came from introspection rather than an
        /// explicit declaration.
        autowired: bool,
    },
    Instance {
        value: Resolved,
    },
    Factory {
        produce: FactoryFn,
    },
}

impl Strategy {
    /// Outgoing dependency edges of this node.
    pub(crate) fn dependencies(&self) -> &[ServiceKey] {
        match self {
            Strategy::Class { dependencies, .. } => dependencies,
            Strategy::Instance { .. } | Strategy::Factory { .. } => &[],
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Strategy::Class { .. } => "class",
            Strategy::Instance { .. } => "instance",
            Strategy::Factory { .. } => "factory",
        }
    }
}

impl fmt::Debug for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Class {
                dependencies,
                autowired,
                ..
            } => f
                .debug_struct("Strategy::Class")
                .field("dependencies", &dependencies.len())
                .field("autowired", autowired)
                .finish(),
            Strategy::Instance { .. } | Strategy::Factory { .. } => {
                f.debug_tuple("Strategy").field(&self.kind()).finish()
            }
        }
    }
}

/// Mutable staging area owned by the builder.
///
/// Re-registering a key replaces the earlier strategy: last write wins,
/// silently. Never read for resolution; `build` consumes it.
#[derive(Debug, Default)]
pub(crate) struct PendingRegistry {
    entries: HashMap<ServiceKey, PendingStrategy>,
}

impl PendingRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Stages a strategy for `key`, replacing any earlier one.
    pub(crate) fn put(&mut self, key: ServiceKey, strategy: PendingStrategy) {
        if self.entries.contains_key(&key) {
            debug!(key = %key, kind = strategy.kind(), "replacing earlier registration");
        } else {
            debug!(key = %key, kind = strategy.kind(), "registered");
        }
        self.entries.insert(key, strategy);
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn into_entries(self) -> impl Iterator<Item = (ServiceKey, PendingStrategy)> {
        self.entries.into_iter()
    }
}

/// Immutable key → strategy mapping produced once by `build`.
///
/// Validation guarantees every dependency key is present and the
/// dependency relation is acyclic, which is what makes recursive
/// resolution well-founded.
#[derive(Debug)]
pub(crate) struct ServiceGraph {
    entries: HashMap<ServiceKey, Strategy>,
}

impl ServiceGraph {
    pub(crate) fn new(entries: HashMap<ServiceKey, Strategy>) -> Self {
        Self { entries }
    }

    pub(crate) fn get(&self, key: &ServiceKey) -> Option<&Strategy> {
        self.entries.get(key)
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (&ServiceKey, &Strategy)> {
        self.entries.iter()
    }

    pub(crate) fn contains(&self, key: &ServiceKey) -> bool {
        self.entries.contains_key(key)
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = &ServiceKey> {
        self.entries.keys()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
