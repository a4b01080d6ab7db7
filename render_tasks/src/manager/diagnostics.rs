//! Graph validation and debug dumps.

use std::fmt::Write;

use redlilium_core::profile_scope;

use super::DrawingManager;
use crate::config::DumpVerbosity;
use crate::error::GraphError;
use crate::task::TaskHandle;

impl DrawingManager {
    /// Check the edges of a single task: no self-edges, no duplicates, and
    /// every edge mirrored on the other side.
    pub fn validate_task(&self, task: TaskHandle) -> Result<(), GraphError> {
        let node = self.task(task);

        for (i, &dependency) in node.dependencies().iter().enumerate() {
            if dependency == task {
                return Err(GraphError::SelfDependency(node.id()));
            }
            if node.dependencies()[..i].contains(&dependency) {
                return Err(GraphError::DuplicateDependency {
                    dependent: node.id(),
                    dependency: self.task(dependency).id(),
                });
            }
            if !self.task(dependency).is_dependent(task) {
                return Err(GraphError::AsymmetricEdge {
                    dependent: node.id(),
                    dependency: self.task(dependency).id(),
                });
            }
        }

        for &dependent in node.dependents() {
            if !self.task(dependent).depends_on(task) {
                return Err(GraphError::AsymmetricEdge {
                    dependent: self.task(dependent).id(),
                    dependency: node.id(),
                });
            }
        }

        Ok(())
    }

    /// Check every task's edges and that the whole graph is acyclic.
    pub fn validate(&self) -> Result<(), GraphError> {
        profile_scope!("validate_task_graph");
        for handle in self.task_handles() {
            self.validate_task(handle)?;
        }
        self.execution_order().map(|_| ())
    }

    /// Render a human-readable description of a task.
    pub fn dump(&self, task: TaskHandle, print_dependencies: bool) -> String {
        let node = self.task(task);
        let mut out = String::new();

        let _ = writeln!(out, "--------------------------------------------------------------");
        let _ = writeln!(out, "{} - renderTaskID: {}", node.name(), node.id());

        if !node.targets().is_empty() {
            let _ = writeln!(out, "Targets: ");
            for (i, view) in node.targets().iter().enumerate() {
                let surface_id = self
                    .surface(view.surface)
                    .peek_backing()
                    .map_or(-1, |backing| backing.id() as i64);
                let _ = writeln!(
                    out,
                    "[{}]: proxyID: {} - surfaceID: {}",
                    i,
                    view.surface.index(),
                    surface_id
                );
            }
        }

        if print_dependencies {
            let _ = write!(out, "I rely On ({}): ", node.dependencies().len());
            for &dependency in node.dependencies() {
                let _ = write!(out, "{}, ", self.task(dependency).id());
            }
            let _ = writeln!(out);

            let _ = write!(out, "({}) Rely On Me: ", node.dependents().len());
            for &dependent in node.dependents() {
                let _ = write!(out, "{}, ", self.task(dependent).id());
            }
            let _ = writeln!(out);
        }

        out
    }

    /// Log every task at `debug` level according to the configured verbosity.
    pub fn log_graph(&self) {
        let print_dependencies = match self.config().dump_verbosity {
            DumpVerbosity::Off => return,
            DumpVerbosity::Targets => false,
            DumpVerbosity::Full => true,
        };
        if !log::log_enabled!(log::Level::Debug) {
            return;
        }
        for handle in self.task_handles() {
            log::debug!("{}", self.dump(handle, print_dependencies));
        }
    }
}
