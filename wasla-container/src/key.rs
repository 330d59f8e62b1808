//! Service identification.
//!
//! A [`ServiceKey`] names a service contract inside the container. It is
//! the map key for both the pending registry and the built service graph:
//! the contract's [`TypeId`] plus an optional label, so the same Rust type
//! can back several distinct contracts.

use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};

use wasla_support::rendering::shorten_type_name;

/// Opaque handle naming a service contract.
///
/// Equality is identity of the contract: two keys are equal iff they were
/// built from the same type and carry the same label. The captured type
/// name is used only for diagnostics and never participates in equality.
///
/// Trait contracts work too, since `T` may be unsized:
///
/// ```
/// use wasla_container::key::ServiceKey;
///
/// trait Clock {}
/// let key = ServiceKey::of::<dyn Clock>();
/// assert!(key.type_name().contains("Clock"));
/// ```
#[derive(Clone)]
pub struct ServiceKey {
    type_id: TypeId,
    type_name: &'static str,
    label: Option<&'static str>,
}

impl ServiceKey {
    /// Key for the contract `T`.
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            label: None,
        }
    }

    /// Key for the contract `T` under a label.
    ///
    /// Labeled keys let one type back several contracts:
    ///
    /// ```
    /// use wasla_container::key::ServiceKey;
    ///
    /// let primary = ServiceKey::labeled::<String>("primary_dsn");
    /// let replica = ServiceKey::labeled::<String>("replica_dsn");
    /// assert_ne!(primary, replica);
    /// ```
    #[inline]
    pub fn labeled<T: ?Sized + 'static>(label: &'static str) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            label: Some(label),
        }
    }

    /// The contract's [`TypeId`].
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Fully qualified type name, for diagnostics.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The label, if this is a labeled key.
    #[inline]
    pub fn label(&self) -> Option<&'static str> {
        self.label
    }

    /// Type name with module paths stripped, as shown in error messages.
    pub fn short_name(&self) -> String {
        shorten_type_name(self.type_name)
    }
}

impl PartialEq for ServiceKey {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id && self.label == other.label
    }
}

impl Eq for ServiceKey {}

impl Hash for ServiceKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
        self.label.hash(state);
    }
}

impl fmt::Debug for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label {
            Some(label) => write!(f, "ServiceKey({}, label={label:?})", self.type_name),
            None => write!(f, "ServiceKey({})", self.type_name),
        }
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label {
            Some(label) => write!(f, "{} [{label}]", self.short_name()),
            None => write!(f, "{}", self.short_name()),
        }
    }
}
