//! Dependency graph validation.
//!
//! Runs once, inside `build`, over the finalized service graph:
//!
//! 1. **Completeness** — every dependency key referenced by a by-class
//!    strategy must itself be registered.
//! 2. **Acyclicity** — the dependency relation must contain no cycle.
//!
//! Instance and factory strategies are leaves; only by-class strategies
//! contribute edges. The cycle check is a depth-first traversal with
//! three-color marking (unvisited / in-progress / done), keeping the
//! current path so a detected cycle can be reported as the ordered walk
//! from the repeated key back to itself.

use std::collections::HashSet;

use tracing::{debug, instrument, warn};

use crate::error::{
    CircularDependencyError, Result, UnregisteredDependencyError, WaslaError,
};
use crate::key::ServiceKey;
use crate::registry::ServiceGraph;

pub(crate) struct GraphValidator<'g> {
    graph: &'g ServiceGraph,
    /// In-progress keys of the current DFS.
    visiting: HashSet<ServiceKey>,
    /// Keys whose entire subtree is known acyclic.
    done: HashSet<ServiceKey>,
    /// Current DFS path, for cycle reporting.
    path: Vec<ServiceKey>,
}

impl<'g> GraphValidator<'g> {
    pub(crate) fn new(graph: &'g ServiceGraph) -> Self {
        Self {
            graph,
            visiting: HashSet::new(),
            done: HashSet::new(),
            path: Vec::new(),
        }
    }

    /// Validates the whole graph.
    ///
    /// # Errors
    /// - [`WaslaError::UnregisteredDependency`] — missing binding
    /// - [`WaslaError::CircularDependency`] — dependency cycle
    #[instrument(skip(self), name = "graph_validation")]
    pub(crate) fn validate(&mut self) -> Result<()> {
        debug!(services = self.graph.len(), "validating dependency graph");
        self.check_bindings()?;
        self.check_cycles()?;
        debug!("dependency graph is valid");
        Ok(())
    }

    /// Completeness: every referenced dependency has a registration.
    fn check_bindings(&self) -> Result<()> {
        for (key, strategy) in self.graph.entries() {
            for dep in strategy.dependencies() {
                if !self.graph.contains(dep) {
                    return Err(WaslaError::UnregisteredDependency(
                        UnregisteredDependencyError {
                            dependant: key.clone(),
                            missing: dep.clone(),
                        },
                    ));
                }
            }
        }
        Ok(())
    }

    /// Acyclicity: DFS from every not-yet-finished node.
    fn check_cycles(&mut self) -> Result<()> {
        let roots: Vec<ServiceKey> = self.graph.keys().cloned().collect();
        for key in roots {
            if !self.done.contains(&key) {
                self.visit(&key)?;
            }
        }
        Ok(())
    }

    fn visit(&mut self, key: &ServiceKey) -> Result<()> {
        if self.done.contains(key) {
            return Ok(());
        }

        // Revisiting an in-progress node closes a loop.
        if self.visiting.contains(key) {
            let start = self.path.iter().position(|k| k == key).unwrap_or(0);
            let mut chain: Vec<ServiceKey> = self.path[start..].to_vec();
            chain.push(key.clone());

            warn!(cycle = ?chain, "circular dependency detected");
            return Err(WaslaError::CircularDependency(CircularDependencyError {
                chain,
            }));
        }

        self.visiting.insert(key.clone());
        self.path.push(key.clone());

        // Completeness already checked, so an absent key cannot occur here.
        let deps: Vec<ServiceKey> = self
            .graph
            .get(key)
            .map(|s| s.dependencies().to_vec())
            .unwrap_or_default();
        for dep in &deps {
            self.visit(dep)?;
        }

        self.path.pop();
        self.visiting.remove(key);
        self.done.insert(key.clone());

        Ok(())
    }
}
