//! Constructible classes and their type-erased blueprints.
//!
//! The container never sees concrete types at resolution time; it works
//! with a [`ClassBlueprint`] — the erased "how to construct this" record a
//! by-class registration holds. A blueprint knows the class's key, how
//! many constructor parameters it takes, and (for [`Injectable`] types) a
//! probe that reports the class's dependency keys for autowiring.

use std::any::{Any, type_name};
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use crate::error::{Result, WaslaError};
use crate::key::ServiceKey;

/// Canonical resolved value handed around by the container.
///
/// By-class and by-factory registrations wrap every fresh product in a new
/// `Arc`; by-instance registrations clone the one stored `Arc`, which is
/// what makes instance lookups reference-equal.
pub type Resolved = Arc<dyn Any + Send + Sync>;

/// Type-erased constructor: consumes the resolved arguments, produces the
/// erased instance.
pub type ConstructFn = Arc<dyn Fn(ArgList) -> Result<Resolved> + Send + Sync>;

/// Ordered, already-resolved constructor arguments.
///
/// Arguments are taken front to back, in the exact order the dependency
/// list declared them.
pub struct ArgList {
    consumer: ServiceKey,
    values: VecDeque<Resolved>,
}

impl ArgList {
    pub(crate) fn new(consumer: ServiceKey, values: Vec<Resolved>) -> Self {
        Self {
            consumer,
            values: values.into(),
        }
    }

    /// Takes the next positional argument as an `Arc<T>`.
    ///
    /// Fails with [`WaslaError::ConstructionFailed`] when the list is
    /// exhausted or the next argument is not a `T`.
    pub fn take<T: Send + Sync + 'static>(&mut self) -> Result<Arc<T>> {
        let value = self
            .values
            .pop_front()
            .ok_or_else(|| WaslaError::ConstructionFailed {
                key: self.consumer.clone(),
                reason: format!(
                    "constructor ran out of arguments while taking {}",
                    type_name::<T>()
                ),
            })?;

        value
            .downcast::<T>()
            .map_err(|_| WaslaError::ConstructionFailed {
                key: self.consumer.clone(),
                reason: format!("positional argument is not a {}", type_name::<T>()),
            })
    }

    /// Arguments not yet taken. Surplus arguments are legal and ignored.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl fmt::Debug for ArgList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgList")
            .field("consumer", &self.consumer)
            .field("remaining", &self.values.len())
            .finish()
    }
}

/// A class the container can construct.
///
/// `assemble` receives the resolved dependencies positionally; `arity` is
/// the number of arguments it takes, checked against the declared
/// dependency list at build time.
///
/// ```
/// use std::sync::Arc;
/// use wasla_container::blueprint::{ArgList, Newable};
/// use wasla_container::error::Result;
///
/// struct Dsn(String);
/// struct Pool { dsn: Arc<Dsn> }
///
/// impl Newable for Pool {
///     fn arity() -> usize { 1 }
///     fn assemble(args: &mut ArgList) -> Result<Self> {
///         Ok(Self { dsn: args.take::<Dsn>()? })
///     }
/// }
/// ```
pub trait Newable: Send + Sync + Sized + 'static {
    /// Number of constructor parameters.
    fn arity() -> usize;

    /// Builds the value from positional, already-resolved arguments.
    fn assemble(args: &mut ArgList) -> Result<Self>;
}

/// A [`Newable`] class that also publishes its own dependency keys.
///
/// This is the crate's stand-in for constructor introspection: the list
/// returned here is what autowiring picks up at build time. Its order
/// must match the order `assemble` takes its arguments in.
pub trait Injectable: Newable {
    fn dependencies() -> Vec<ServiceKey>;
}

/// Erased constructible-type reference held by a by-class registration.
#[derive(Clone)]
pub struct ClassBlueprint {
    key: ServiceKey,
    arity: usize,
    construct: ConstructFn,
    introspect: Option<fn() -> Vec<ServiceKey>>,
}

impl ClassBlueprint {
    /// Blueprint for an [`Injectable`] class, carrying its introspection
    /// probe so autowiring can discover the dependency list.
    pub fn of<T: Injectable>() -> Self {
        Self {
            key: ServiceKey::of::<T>(),
            arity: T::arity(),
            construct: Arc::new(|mut args| Ok(Arc::new(T::assemble(&mut args)?) as Resolved)),
            introspect: Some(T::dependencies as fn() -> Vec<ServiceKey>),
        }
    }

    /// Blueprint for a plain [`Newable`] class, with no introspection
    /// probe. Registrations built from this must declare their
    /// dependencies explicitly.
    pub fn manual<T: Newable>() -> Self {
        Self {
            key: ServiceKey::of::<T>(),
            arity: T::arity(),
            construct: Arc::new(|mut args| Ok(Arc::new(T::assemble(&mut args)?) as Resolved)),
            introspect: None,
        }
    }

    /// The class's own key.
    pub fn key(&self) -> &ServiceKey {
        &self.key
    }

    /// Constructor parameter count.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// The introspection probe, when the class is [`Injectable`].
    pub fn introspect(&self) -> Option<fn() -> Vec<ServiceKey>> {
        self.introspect
    }

    pub(crate) fn construct(&self, args: ArgList) -> Result<Resolved> {
        (self.construct)(args)
    }
}

impl fmt::Debug for ClassBlueprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassBlueprint")
            .field("key", &self.key)
            .field("arity", &self.arity)
            .field("introspectable", &self.introspect.is_some())
            .finish()
    }
}
