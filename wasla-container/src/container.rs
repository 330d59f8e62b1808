//! # Builder and container
//!
//! The two halves of the crate's lifecycle:
//!
//! ```text
//! ContainerBuilder ──build()──> Container
//!   register(key)                 get::<T>()
//!     .use_class::<T>()           get_labeled::<T>(label)
//!     .use_class_with::<T>(deps)  get_by(&key)
//!     .use_instance(value)
//!     .use_factory(f)
//! ```
//!
//! `build` consumes the builder, finalizes autowired dependency lists,
//! validates arity, completeness and acyclicity, and commits an immutable
//! [`Container`]. Resolution is a plain recursive walk over that graph:
//! well-founded because the graph was proven acyclic, and lock-free
//! because nothing mutates after the commit.
//!
//! # Examples
//! ```
//! use std::sync::Arc;
//! use wasla_container::prelude::*;
//!
//! struct Config { dsn: String }
//!
//! struct Repo { config: Arc<Config> }
//!
//! impl Newable for Repo {
//!     fn arity() -> usize { 1 }
//!     fn assemble(args: &mut ArgList) -> Result<Self> {
//!         Ok(Self { config: args.take::<Config>()? })
//!     }
//! }
//!
//! impl Injectable for Repo {
//!     fn dependencies() -> Vec<ServiceKey> {
//!         vec![ServiceKey::of::<Config>()]
//!     }
//! }
//!
//! let mut builder = Container::builder();
//! builder.register_type::<Config>().use_instance(Config { dsn: "db://local".into() });
//! builder.register_type::<Repo>().use_class::<Repo>();
//!
//! let container = builder.build().expect("valid graph");
//! let repo = container.get::<Repo>().expect("registered");
//! assert_eq!(repo.config.dsn, "db://local");
//! ```

use std::any::type_name;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{info, instrument, trace};

use wasla_support::rendering::suggest_similar;

use crate::blueprint::{ArgList, ClassBlueprint, Injectable, Newable, Resolved};
use crate::error::{
    ArityMismatchError, Result, UnregisteredLookupError, WaslaError,
};
use crate::graph::GraphValidator;
use crate::key::ServiceKey;
use crate::provider::{DependencyLister, IntrospectionLister};
use crate::registry::{PendingRegistry, PendingStrategy, ServiceGraph, Strategy};

// ============================================================
// Build options
// ============================================================

/// Options for [`ContainerBuilder::build_with`].
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// When `false`, autowiring never runs: by-class registrations without
    /// an explicit dependency list get an empty one, and the arity check
    /// surfaces whatever that leaves unwired.
    pub autowire: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self { autowire: true }
    }
}

// ============================================================
// ContainerBuilder
// ============================================================

/// Mutable staging area for registrations.
///
/// Register every service, then call [`build`](ContainerBuilder::build)
/// exactly once; building consumes the builder, so a committed graph can
/// never be mutated afterwards.
///
/// Re-registering a key replaces the earlier strategy (last write wins).
pub struct ContainerBuilder {
    pending: PendingRegistry,
    lister: Option<Arc<dyn DependencyLister>>,
}

impl ContainerBuilder {
    fn new() -> Self {
        Self {
            pending: PendingRegistry::new(),
            lister: Some(Arc::new(IntrospectionLister)),
        }
    }

    /// Begins registering `key`.
    ///
    /// The returned handle must be completed with exactly one `use_*`
    /// call; dropping it without one stages nothing.
    pub fn register(&mut self, key: ServiceKey) -> RegistrationHandle<'_> {
        RegistrationHandle { key, builder: self }
    }

    /// Shorthand for `register(ServiceKey::of::<T>())`.
    pub fn register_type<T: ?Sized + 'static>(&mut self) -> RegistrationHandle<'_> {
        self.register(ServiceKey::of::<T>())
    }

    /// Replaces the dependency-list provider used for autowiring.
    ///
    /// The default is [`IntrospectionLister`].
    pub fn with_dependency_lister(mut self, lister: impl DependencyLister + 'static) -> Self {
        self.lister = Some(Arc::new(lister));
        self
    }

    /// Removes the dependency-list provider entirely.
    ///
    /// Autowiring then never triggers; every by-class registration must
    /// carry an explicit dependency list that satisfies its arity.
    pub fn without_dependency_lister(mut self) -> Self {
        self.lister = None;
        self
    }

    /// Builds with default options (autowiring enabled).
    pub fn build(self) -> Result<Container> {
        self.build_with(BuildOptions::default())
    }

    /// Finalizes, validates, and commits the service graph.
    ///
    /// Pipeline: autowire pending by-class lists (when both the global
    /// option and the registration allow it), check each list against the
    /// constructor's arity, then run the graph-wide completeness and
    /// cycle checks. Either every check passes and a [`Container`] is
    /// returned, or no container exists at all.
    ///
    /// # Errors
    /// - [`WaslaError::ArityMismatch`]
    /// - [`WaslaError::UnregisteredDependency`]
    /// - [`WaslaError::CircularDependency`]
    #[instrument(skip(self), name = "container_build")]
    pub fn build_with(self, options: BuildOptions) -> Result<Container> {
        info!(
            registered = self.pending.len(),
            autowire = options.autowire,
            "building container"
        );

        let lister = self.lister;
        let mut entries = HashMap::new();

        for (key, pending) in self.pending.into_entries() {
            let strategy = match pending {
                PendingStrategy::Class {
                    blueprint,
                    dependencies,
                } => Self::finalize_class(&key, blueprint, dependencies, &options, lister.as_deref())?,
                PendingStrategy::Instance { value } => Strategy::Instance { value },
                PendingStrategy::Factory { produce } => Strategy::Factory { produce },
            };
            entries.insert(key, strategy);
        }

        let graph = ServiceGraph::new(entries);
        GraphValidator::new(&graph).validate()?;

        info!(services = graph.len(), "container built");
        Ok(Container {
            graph: Arc::new(graph),
        })
    }

    /// Decides a by-class strategy's final dependency list and checks it
    /// against the constructor's arity.
    fn finalize_class(
        key: &ServiceKey,
        blueprint: ClassBlueprint,
        explicit: Option<Vec<ServiceKey>>,
        options: &BuildOptions,
        lister: Option<&dyn DependencyLister>,
    ) -> Result<Strategy> {
        let (dependencies, autowired) = match explicit {
            Some(list) => (list, false),
            None if options.autowire => match lister.and_then(|l| l.dependencies_of(&blueprint)) {
                Some(list) => (list, true),
                None => (Vec::new(), false),
            },
            None => (Vec::new(), false),
        };

        let required = match lister {
            Some(l) => l.dependency_count(&blueprint),
            None => blueprint.arity(),
        };
        if dependencies.len() < required {
            return Err(WaslaError::ArityMismatch(ArityMismatchError {
                key: key.clone(),
                declared: dependencies.len(),
                required,
            }));
        }

        Ok(Strategy::Class {
            blueprint,
            dependencies,
            autowired,
        })
    }
}

impl fmt::Debug for ContainerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerBuilder")
            .field("pending", &self.pending.len())
            .field("has_lister", &self.lister.is_some())
            .finish()
    }
}

// ============================================================
// RegistrationHandle
// ============================================================

/// In-flight registration for one key.
///
/// Created by [`ContainerBuilder::register`]; each `use_*` method
/// consumes the handle, so a registration is completed by exactly one
/// strategy.
#[must_use = "a registration does nothing until completed with a use_* call"]
pub struct RegistrationHandle<'b> {
    key: ServiceKey,
    builder: &'b mut ContainerBuilder,
}

impl RegistrationHandle<'_> {
    /// By-class strategy with autowired dependencies.
    ///
    /// The dependency list is decided at build time by the configured
    /// [`DependencyLister`].
    pub fn use_class<T: Injectable>(self) {
        self.put(PendingStrategy::Class {
            blueprint: ClassBlueprint::of::<T>(),
            dependencies: None,
        });
    }

    /// By-class strategy with an explicit dependency list.
    ///
    /// Autowiring is disabled for this registration; `dependencies` is
    /// used verbatim regardless of what introspection would report.
    pub fn use_class_with<T: Newable>(self, dependencies: Vec<ServiceKey>) {
        self.put(PendingStrategy::Class {
            blueprint: ClassBlueprint::manual::<T>(),
            dependencies: Some(dependencies),
        });
    }

    /// By-instance strategy: every lookup returns this exact value.
    ///
    /// The value is moved into an `Arc` once; lookups clone the `Arc`,
    /// so resolved handles are reference-equal.
    pub fn use_instance<T: Send + Sync + 'static>(self, value: T) {
        self.put(PendingStrategy::Instance {
            value: Arc::new(value) as Resolved,
        });
    }

    /// By-factory strategy: every lookup invokes `produce` afresh.
    pub fn use_factory<T, F>(self, produce: F)
    where
        T: Send + Sync + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.put(PendingStrategy::Factory {
            produce: Arc::new(move || Arc::new(produce()) as Resolved),
        });
    }

    fn put(self, strategy: PendingStrategy) {
        self.builder.pending.put(self.key, strategy);
    }
}

// ============================================================
// Container
// ============================================================

/// Immutable, validated service graph with a recursive `get`.
///
/// Cloning is cheap (shared graph). All lookups are pure reads; the
/// container is safe for concurrent use without locking.
#[derive(Clone)]
pub struct Container {
    graph: Arc<ServiceGraph>,
}

impl Container {
    /// Creates a fresh builder.
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::new()
    }

    /// Resolves the contract `T`, constructing its whole dependency tree.
    ///
    /// By-class and by-factory services are transient: every call builds
    /// a fresh value. By-instance services always return the same `Arc`.
    pub fn get<T: Send + Sync + 'static>(&self) -> Result<Arc<T>> {
        self.typed(ServiceKey::of::<T>())
    }

    /// Resolves the labeled contract `T`.
    pub fn get_labeled<T: Send + Sync + 'static>(&self, label: &'static str) -> Result<Arc<T>> {
        self.typed(ServiceKey::labeled::<T>(label))
    }

    /// Erased resolution by key — the recursive primitive `get` wraps.
    pub fn get_by(&self, key: &ServiceKey) -> Result<Resolved> {
        self.resolve_key(key)
    }

    /// Whether `key` has a registration.
    pub fn contains(&self, key: &ServiceKey) -> bool {
        self.graph.contains(key)
    }

    /// Number of registered services.
    pub fn len(&self) -> usize {
        self.graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.len() == 0
    }

    fn typed<T: Send + Sync + 'static>(&self, key: ServiceKey) -> Result<Arc<T>> {
        let resolved = self.resolve_key(&key)?;
        resolved
            .downcast::<T>()
            .map_err(|_| WaslaError::ConstructionFailed {
                key,
                reason: format!("resolved value is not a {}", type_name::<T>()),
            })
    }

    fn resolve_key(&self, key: &ServiceKey) -> Result<Resolved> {
        trace!(key = %key, "resolving");

        let strategy = self.graph.get(key).ok_or_else(|| {
            WaslaError::UnregisteredLookup(UnregisteredLookupError {
                requested: key.clone(),
                suggestions: self.suggest(key),
            })
        })?;

        match strategy {
            Strategy::Instance { value } => Ok(value.clone()),
            Strategy::Factory { produce } => Ok(produce()),
            Strategy::Class {
                blueprint,
                dependencies,
                ..
            } => {
                // Well-founded: the graph was validated acyclic.
                let mut args = Vec::with_capacity(dependencies.len());
                for dep in dependencies {
                    args.push(self.resolve_key(dep)?);
                }
                blueprint.construct(ArgList::new(key.clone(), args))
            }
        }
    }

    fn suggest(&self, key: &ServiceKey) -> Vec<ServiceKey> {
        let names: Vec<&str> = self.graph.keys().map(|k| k.type_name()).collect();
        let picks = suggest_similar(key.type_name(), &names, 3);

        self.graph
            .keys()
            .filter(|k| picks.iter().any(|p| p.as_str() == k.type_name()))
            .cloned()
            .collect()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("services", &self.graph.len())
            .finish()
    }
}

// ============================================================
// Prelude
// ============================================================

pub mod prelude {
    pub use super::{BuildOptions, Container, ContainerBuilder, RegistrationHandle};
    pub use crate::blueprint::{ArgList, ClassBlueprint, Injectable, Newable, Resolved};
    pub use crate::error::{Result, WaslaError};
    pub use crate::key::ServiceKey;
    pub use crate::provider::{DependencyLister, IntrospectionLister};
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    struct Battery;

    impl Newable for Battery {
        fn arity() -> usize {
            0
        }

        fn assemble(_args: &mut ArgList) -> Result<Self> {
            Ok(Battery)
        }
    }

    impl Injectable for Battery {
        fn dependencies() -> Vec<ServiceKey> {
            vec![]
        }
    }

    struct Motor {
        battery: Arc<Battery>,
    }

    impl Newable for Motor {
        fn arity() -> usize {
            1
        }

        fn assemble(args: &mut ArgList) -> Result<Self> {
            Ok(Self {
                battery: args.take::<Battery>()?,
            })
        }
    }

    impl Injectable for Motor {
        fn dependencies() -> Vec<ServiceKey> {
            vec![ServiceKey::of::<Battery>()]
        }
    }

    struct Drone {
        motor: Arc<Motor>,
    }

    impl Newable for Drone {
        fn arity() -> usize {
            1
        }

        fn assemble(args: &mut ArgList) -> Result<Self> {
            Ok(Self {
                motor: args.take::<Motor>()?,
            })
        }
    }

    impl Injectable for Drone {
        fn dependencies() -> Vec<ServiceKey> {
            vec![ServiceKey::of::<Motor>()]
        }
    }

    fn wired_container() -> Container {
        let mut builder = Container::builder();
        builder.register_type::<Battery>().use_class::<Battery>();
        builder.register_type::<Motor>().use_class::<Motor>();
        builder.register_type::<Drone>().use_class::<Drone>();
        builder.build().unwrap()
    }

    #[test]
    fn resolves_recursive_chain() {
        let container = wired_container();
        let drone = container.get::<Drone>().unwrap();
        // The whole subtree was constructed: Drone -> Motor -> Battery.
        let _battery: &Battery = &*drone.motor.battery;
    }

    #[test]
    fn class_lookups_are_transient() {
        let container = wired_container();
        let first = container.get::<Drone>().unwrap();
        let second = container.get::<Drone>().unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        // Dependency subtrees are constructed independently too.
        assert!(!Arc::ptr_eq(&first.motor, &second.motor));
    }

    #[test]
    fn instance_lookups_are_reference_equal() {
        let mut builder = Container::builder();
        builder.register_type::<Battery>().use_instance(Battery);
        let container = builder.build().unwrap();

        let first = container.get::<Battery>().unwrap();
        let second = container.get::<Battery>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn factory_runs_per_lookup() {
        static CALLS: AtomicU32 = AtomicU32::new(0);

        let mut builder = Container::builder();
        builder
            .register_type::<u32>()
            .use_factory(|| CALLS.fetch_add(1, Ordering::SeqCst));
        let container = builder.build().unwrap();

        assert_eq!(*container.get::<u32>().unwrap(), 0);
        assert_eq!(*container.get::<u32>().unwrap(), 1);
        assert_eq!(CALLS.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn cycle_fails_build() {
        struct Chicken;
        struct Egg;

        impl Newable for Chicken {
            fn arity() -> usize {
                1
            }
            fn assemble(args: &mut ArgList) -> Result<Self> {
                let _egg = args.take::<Egg>()?;
                Ok(Chicken)
            }
        }

        impl Newable for Egg {
            fn arity() -> usize {
                1
            }
            fn assemble(args: &mut ArgList) -> Result<Self> {
                let _chicken = args.take::<Chicken>()?;
                Ok(Egg)
            }
        }

        let mut builder = Container::builder();
        builder
            .register_type::<Chicken>()
            .use_class_with::<Chicken>(vec![ServiceKey::of::<Egg>()]);
        builder
            .register_type::<Egg>()
            .use_class_with::<Egg>(vec![ServiceKey::of::<Chicken>()]);

        let err = builder.build().unwrap_err();
        match err {
            WaslaError::CircularDependency(e) => {
                assert_eq!(e.chain.len(), 3);
                assert_eq!(e.chain.first(), e.chain.last());
            }
            other => panic!("expected CircularDependency, got {other:?}"),
        }
    }

    #[test]
    fn missing_dependency_fails_build() {
        let mut builder = Container::builder();
        builder.register_type::<Motor>().use_class::<Motor>();
        // Battery never registered.

        let err = builder.build().unwrap_err();
        match err {
            WaslaError::UnregisteredDependency(e) => {
                assert_eq!(e.dependant, ServiceKey::of::<Motor>());
                assert_eq!(e.missing, ServiceKey::of::<Battery>());
            }
            other => panic!("expected UnregisteredDependency, got {other:?}"),
        }
    }

    #[test]
    fn short_explicit_list_fails_arity() {
        let mut builder = Container::builder();
        builder.register_type::<Motor>().use_class_with::<Motor>(vec![]);

        let err = builder.build().unwrap_err();
        match err {
            WaslaError::ArityMismatch(e) => {
                assert_eq!(e.declared, 0);
                assert_eq!(e.required, 1);
            }
            other => panic!("expected ArityMismatch, got {other:?}"),
        }
    }

    #[test]
    fn long_explicit_list_is_accepted() {
        let mut builder = Container::builder();
        builder.register_type::<Battery>().use_class::<Battery>();
        builder.register_type::<u8>().use_instance(9u8);
        // Motor takes one argument; the surplus u8 is resolved and dropped.
        builder.register_type::<Motor>().use_class_with::<Motor>(vec![
            ServiceKey::of::<Battery>(),
            ServiceKey::of::<u8>(),
        ]);

        let container = builder.build().unwrap();
        assert!(container.get::<Motor>().is_ok());
    }

    #[test]
    fn explicit_list_overrides_introspection() {
        // Motor's probe says Battery, but the explicit list wires the
        // labeled registration instead.
        let mut builder = Container::builder();
        builder
            .register(ServiceKey::labeled::<Battery>("spare"))
            .use_instance(Battery);
        builder.register_type::<Motor>().use_class_with::<Motor>(vec![
            ServiceKey::labeled::<Battery>("spare"),
        ]);

        let container = builder.build().unwrap();
        assert!(container.get::<Motor>().is_ok());
        assert!(!container.contains(&ServiceKey::of::<Battery>()));
    }

    #[test]
    fn autowire_disabled_leaves_class_unwired() {
        let mut builder = Container::builder();
        builder.register_type::<Battery>().use_class::<Battery>();
        builder.register_type::<Motor>().use_class::<Motor>();

        let err = builder
            .build_with(BuildOptions { autowire: false })
            .unwrap_err();
        assert!(matches!(err, WaslaError::ArityMismatch(_)));
    }

    #[test]
    fn autowire_disabled_ok_for_nullary_classes() {
        let mut builder = Container::builder();
        builder.register_type::<Battery>().use_class::<Battery>();

        let container = builder
            .build_with(BuildOptions { autowire: false })
            .unwrap();
        assert!(container.get::<Battery>().is_ok());
    }

    #[test]
    fn works_without_lister_when_explicit() {
        let mut builder = Container::builder().without_dependency_lister();
        builder.register_type::<Battery>().use_class_with::<Battery>(vec![]);
        builder.register_type::<Motor>().use_class_with::<Motor>(vec![
            ServiceKey::of::<Battery>(),
        ]);

        let container = builder.build().unwrap();
        assert!(container.get::<Motor>().is_ok());
    }

    #[test]
    fn custom_lister_decides_autowiring() {
        struct SpareLister;

        impl DependencyLister for SpareLister {
            fn dependencies_of(&self, class: &ClassBlueprint) -> Option<Vec<ServiceKey>> {
                if class.key() == &ServiceKey::of::<Motor>() {
                    Some(vec![ServiceKey::labeled::<Battery>("spare")])
                } else {
                    class.introspect().map(|probe| probe())
                }
            }
        }

        let mut builder = Container::builder().with_dependency_lister(SpareLister);
        builder
            .register(ServiceKey::labeled::<Battery>("spare"))
            .use_instance(Battery);
        builder.register_type::<Motor>().use_class::<Motor>();

        let container = builder.build().unwrap();
        assert!(container.get::<Motor>().is_ok());
    }

    #[test]
    fn autowired_flag_tracks_list_origin() {
        let mut builder = Container::builder();
        builder.register_type::<Battery>().use_class::<Battery>();
        builder
            .register_type::<Motor>()
            .use_class_with::<Motor>(vec![ServiceKey::of::<Battery>()]);
        let container = builder.build().unwrap();

        let auto = container.graph.get(&ServiceKey::of::<Battery>()).unwrap();
        assert!(format!("{auto:?}").contains("autowired: true"));

        let explicit = container.graph.get(&ServiceKey::of::<Motor>()).unwrap();
        assert!(format!("{explicit:?}").contains("autowired: false"));
    }

    #[test]
    fn re_registration_last_write_wins() {
        let mut builder = Container::builder();
        builder.register_type::<u32>().use_instance(1u32);
        builder.register_type::<u32>().use_instance(2u32);

        let container = builder.build().unwrap();
        assert_eq!(*container.get::<u32>().unwrap(), 2);
        assert_eq!(container.len(), 1);
    }

    #[test]
    fn unregistered_lookup_at_runtime() {
        let container = Container::builder().build().unwrap();

        let err = container.get::<u32>().unwrap_err();
        match err {
            WaslaError::UnregisteredLookup(e) => {
                assert_eq!(e.requested, ServiceKey::of::<u32>());
            }
            other => panic!("expected UnregisteredLookup, got {other:?}"),
        }
    }

    #[test]
    fn lookup_miss_suggests_near_names() {
        struct InvoiceService;
        #[derive(Debug)]
        struct InvoiceServices;

        let mut builder = Container::builder();
        builder
            .register_type::<InvoiceService>()
            .use_instance(InvoiceService);
        let container = builder.build().unwrap();

        let err = container.get::<InvoiceServices>().unwrap_err();
        match err {
            WaslaError::UnregisteredLookup(e) => {
                assert_eq!(e.suggestions, vec![ServiceKey::of::<InvoiceService>()]);
            }
            other => panic!("expected UnregisteredLookup, got {other:?}"),
        }
    }

    #[test]
    fn typed_lookup_detects_shape_mismatch() {
        let mut builder = Container::builder();
        // Key says String, value is a u32.
        builder.register(ServiceKey::of::<String>()).use_instance(42u32);
        let container = builder.build().unwrap();

        let err = container.get::<String>().unwrap_err();
        assert!(matches!(err, WaslaError::ConstructionFailed { .. }));
    }

    #[test]
    fn labeled_contracts_resolve_independently() {
        let mut builder = Container::builder();
        builder
            .register(ServiceKey::labeled::<String>("primary"))
            .use_instance(String::from("db://primary"));
        builder
            .register(ServiceKey::labeled::<String>("replica"))
            .use_instance(String::from("db://replica"));

        let container = builder.build().unwrap();
        assert_eq!(
            *container.get_labeled::<String>("primary").unwrap(),
            "db://primary"
        );
        assert_eq!(
            *container.get_labeled::<String>("replica").unwrap(),
            "db://replica"
        );
    }

    #[test]
    fn dyn_trait_contract_via_arc() {
        trait Greeter: Send + Sync {
            fn hello(&self) -> &'static str;
        }

        struct English;
        impl Greeter for English {
            fn hello(&self) -> &'static str {
                "hello"
            }
        }

        let mut builder = Container::builder();
        builder
            .register_type::<Arc<dyn Greeter>>()
            .use_instance(Arc::new(English) as Arc<dyn Greeter>);

        let container = builder.build().unwrap();
        let greeter = container.get::<Arc<dyn Greeter>>().unwrap();
        assert_eq!(greeter.hello(), "hello");
    }

    #[test]
    fn dependency_order_is_positional() {
        struct Pair {
            small: Arc<u8>,
            wide: Arc<u16>,
        }

        impl Newable for Pair {
            fn arity() -> usize {
                2
            }
            fn assemble(args: &mut ArgList) -> Result<Self> {
                Ok(Self {
                    small: args.take::<u8>()?,
                    wide: args.take::<u16>()?,
                })
            }
        }

        let mut builder = Container::builder();
        builder.register_type::<u8>().use_instance(8u8);
        builder.register_type::<u16>().use_instance(16u16);
        builder.register_type::<Pair>().use_class_with::<Pair>(vec![
            ServiceKey::of::<u8>(),
            ServiceKey::of::<u16>(),
        ]);

        let container = builder.build().unwrap();
        let pair = container.get::<Pair>().unwrap();
        assert_eq!(*pair.small, 8);
        assert_eq!(*pair.wide, 16);
    }

    #[test]
    fn reordered_dependency_list_changes_positions() {
        #[derive(Debug)]
        struct Pair;

        impl Newable for Pair {
            fn arity() -> usize {
                2
            }
            fn assemble(args: &mut ArgList) -> Result<Self> {
                let _small = args.take::<u8>()?;
                let _wide = args.take::<u16>()?;
                Ok(Pair)
            }
        }

        let mut builder = Container::builder();
        builder.register_type::<u8>().use_instance(8u8);
        builder.register_type::<u16>().use_instance(16u16);
        // Declared backwards: the constructor receives u16 first and the
        // positional downcast fails at lookup time.
        builder.register_type::<Pair>().use_class_with::<Pair>(vec![
            ServiceKey::of::<u16>(),
            ServiceKey::of::<u8>(),
        ]);

        let container = builder.build().unwrap();
        let err = container.get::<Pair>().unwrap_err();
        assert!(matches!(err, WaslaError::ConstructionFailed { .. }));
    }

    #[test]
    fn container_is_shareable_across_threads() {
        let container = wired_container();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let container = container.clone();
                std::thread::spawn(move || container.get::<Drone>().is_ok())
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }

    #[test]
    fn debug_shows_service_count() {
        let container = wired_container();
        let shown = format!("{container:?}");
        assert!(shown.contains("Container"));
        assert!(shown.contains('3'));
    }
}
