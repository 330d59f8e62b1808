//! # Wasla Support
//!
//! Shared diagnostics utilities for the Wasla DI workspace.
//!
//! Everything here is about making error output readable:
//! dependency-chain rendering, type-name shortening, and
//! "did you mean?" suggestions.

pub mod rendering;
