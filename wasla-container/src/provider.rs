//! The dependency-list provider seam.
//!
//! Autowiring — discovering a class's dependency keys without an explicit
//! declaration — is not something the container core does itself. It asks
//! a [`DependencyLister`] at build time. The shipped implementation,
//! [`IntrospectionLister`], reads the probe an [`Injectable`] class bakes
//! into its blueprint; a host environment with richer metadata can plug
//! in its own lister instead.
//!
//! The core also works with no lister at all, provided every by-class
//! registration declares its dependencies explicitly.
//!
//! [`Injectable`]: crate::blueprint::Injectable

use crate::blueprint::ClassBlueprint;
use crate::key::ServiceKey;

/// Supplies dependency lists for constructible classes.
pub trait DependencyLister: Send + Sync {
    /// Ordered dependency keys of `class`, or `None` when the lister has
    /// no information about it.
    fn dependencies_of(&self, class: &ClassBlueprint) -> Option<Vec<ServiceKey>>;

    /// Required constructor-parameter count of `class`, used to validate
    /// explicitly supplied lists.
    fn dependency_count(&self, class: &ClassBlueprint) -> usize {
        class.arity()
    }
}

/// Default lister: reads the introspection probe carried by blueprints of
/// [`Injectable`](crate::blueprint::Injectable) classes.
#[derive(Debug, Default)]
pub struct IntrospectionLister;

impl DependencyLister for IntrospectionLister {
    fn dependencies_of(&self, class: &ClassBlueprint) -> Option<Vec<ServiceKey>> {
        class.introspect().map(|probe| probe())
    }
}
