//! Error types for registration, build validation, and resolution.
//!
//! Build-time failures ([`WaslaError::UnregisteredDependency`],
//! [`WaslaError::CircularDependency`], [`WaslaError::ArityMismatch`]) mean
//! no container is produced at all. Runtime failures can only come from
//! [`Container::get`](crate::container::Container::get) and its variants.

use std::fmt;

use wasla_support::rendering::render_chain;

use crate::key::ServiceKey;

/// Main error type for all container operations.
#[derive(Debug, thiserror::Error)]
pub enum WaslaError {
    /// A registered service lists a dependency that was never registered.
    #[error("{}", .0)]
    UnregisteredDependency(UnregisteredDependencyError),

    /// The dependency graph contains a cycle.
    #[error("{}", .0)]
    CircularDependency(CircularDependencyError),

    /// An explicit dependency list is shorter than the constructor needs.
    #[error("{}", .0)]
    ArityMismatch(ArityMismatchError),

    /// `get` was called with a key that never went through a builder.
    #[error("{}", .0)]
    UnregisteredLookup(UnregisteredLookupError),

    /// A constructor or typed lookup received a value of the wrong type.
    #[error("failed to construct {key}: {reason}")]
    ConstructionFailed { key: ServiceKey, reason: String },
}

/// A dependency referenced by a registration has no registration of its own.
///
/// Detected by the completeness pass of `build`, before any resolution
/// can happen.
#[derive(Debug)]
pub struct UnregisteredDependencyError {
    /// The service whose dependency list references the missing key.
    pub dependant: ServiceKey,
    /// The key with no registration.
    pub missing: ServiceKey,
}

impl fmt::Display for UnregisteredDependencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unregistered dependency: {} requires {}, which has no registration",
            self.dependant, self.missing,
        )?;
        write!(
            f,
            "\n  hint: register {} before calling build()",
            self.missing,
        )
    }
}

/// The dependency relation loops back on itself.
///
/// `chain` is the ordered walk through the cycle, starting and ending at
/// the repeated key, e.g. `[A, B, A]`.
#[derive(Debug)]
pub struct CircularDependencyError {
    pub chain: Vec<ServiceKey>,
}

impl fmt::Display for CircularDependencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.chain.iter().map(|k| k.to_string()).collect();
        write!(f, "circular dependency: {}", render_chain(&names))?;
        write!(
            f,
            "\n  hint: break the loop with a factory, or restructure the services"
        )
    }
}

/// The declared dependency list cannot satisfy the constructor.
///
/// Only lists *shorter* than the constructor's parameter count fail;
/// surplus entries are resolved and ignored.
#[derive(Debug)]
pub struct ArityMismatchError {
    pub key: ServiceKey,
    /// Dependencies declared (explicitly or via autowiring).
    pub declared: usize,
    /// Parameters the constructor actually takes.
    pub required: usize,
}

impl fmt::Display for ArityMismatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "dependency arity mismatch for {}: {} declared, constructor takes {}",
            self.key, self.declared, self.required,
        )?;
        write!(
            f,
            "\n  hint: pass the full dependency list to use_class_with(), or enable autowiring"
        )
    }
}

/// A lookup for a key the graph has never seen.
///
/// The graph is complete by construction, so this is only reachable when
/// the caller holds a key that never went through a builder.
#[derive(Debug)]
pub struct UnregisteredLookupError {
    pub requested: ServiceKey,
    /// Registered keys with similar names, for "did you mean?" output.
    pub suggestions: Vec<ServiceKey>,
}

impl fmt::Display for UnregisteredLookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no registration for {}", self.requested)?;
        if !self.suggestions.is_empty() {
            write!(f, "\n  did you mean:")?;
            for key in &self.suggestions {
                write!(f, "\n    - {key}")?;
            }
        }
        Ok(())
    }
}

/// Convenient result alias used across the workspace.
pub type Result<T> = std::result::Result<T, WaslaError>;
