//! # Wasla — a validated dependency-injection registry for Rust
//!
//! Declare how each service contract is produced (class, instance, or
//! factory), `build()` once to validate the whole graph — missing
//! bindings, cycles, arity — and resolve fully wired service trees from
//! the resulting immutable container.

pub use wasla_container::*;
pub use wasla_support as support;
