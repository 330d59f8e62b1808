//! Core registration-graph builder and resolution engine for Wasla DI.

pub mod blueprint;
pub mod container;
pub mod error;
pub mod graph;
pub mod key;
pub mod provider;
pub mod registry;

pub use container::prelude;
pub use container::{BuildOptions, Container, ContainerBuilder, RegistrationHandle};
pub use error::{Result, WaslaError};
pub use key::ServiceKey;
