//! Task graph configuration.

/// How much checking [`add_dependency`](crate::DrawingManager::add_dependency)
/// does before inserting an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CycleCheck {
    /// Reject only duplicate edges and two-task cycles.
    DirectEdges,
    /// Additionally walk the dependency closure so cycles of any length are rejected.
    #[default]
    Reachability,
}

/// How much [`log_graph`](crate::DrawingManager::log_graph) prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DumpVerbosity {
    /// Print nothing.
    #[default]
    Off,
    /// Print task identity and targets.
    Targets,
    /// Print targets and both edge sets.
    Full,
}

/// Options for a [`DrawingManager`](crate::DrawingManager).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskGraphConfig {
    /// Cycle detection performed on every edge insertion.
    pub cycle_check: CycleCheck,
    /// Run edge validation for the dependent after every insertion.
    pub validate_on_insert: bool,
    /// Diagnostic dump level.
    pub dump_verbosity: DumpVerbosity,
}

impl TaskGraphConfig {
    /// Default configuration: full cycle checks, validation in debug builds.
    pub fn new() -> Self {
        Self {
            cycle_check: CycleCheck::Reachability,
            validate_on_insert: cfg!(debug_assertions),
            dump_verbosity: DumpVerbosity::Off,
        }
    }

    /// Set the cycle check performed on edge insertion.
    pub fn with_cycle_check(mut self, cycle_check: CycleCheck) -> Self {
        self.cycle_check = cycle_check;
        self
    }

    /// Enable or disable validation after each edge insertion.
    pub fn with_validate_on_insert(mut self, validate: bool) -> Self {
        self.validate_on_insert = validate;
        self
    }

    /// Set the diagnostic dump level.
    pub fn with_dump_verbosity(mut self, verbosity: DumpVerbosity) -> Self {
        self.dump_verbosity = verbosity;
        self
    }
}

impl Default for TaskGraphConfig {
    fn default() -> Self {
        Self::new()
    }
}
