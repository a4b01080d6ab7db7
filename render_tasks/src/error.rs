//! Error types for the render task graph.
//!
//! Broken recording contracts (cycles, duplicate edges, mutating closed
//! tasks) panic at the call site. The errors here are conditions a caller can
//! inspect and report.

use thiserror::Error;

use crate::task::RenderTaskId;

/// Errors reported by graph validation, ordering and teardown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The graph contains a cycle; `remaining` tasks could not be ordered.
    #[error("render task graph contains a cyclic dependency ({remaining} tasks unordered)")]
    CyclicDependency { remaining: usize },
    /// A dependency edge has no matching dependent edge.
    #[error("task {dependent} depends on task {dependency} but is not listed as its dependent")]
    AsymmetricEdge {
        dependent: RenderTaskId,
        dependency: RenderTaskId,
    },
    /// The same dependency edge was recorded twice.
    #[error("task {dependent} lists task {dependency} as a dependency more than once")]
    DuplicateDependency {
        dependent: RenderTaskId,
        dependency: RenderTaskId,
    },
    /// A task depends on itself.
    #[error("task {0} depends on itself")]
    SelfDependency(RenderTaskId),
    /// A task was still owned when the graph was purged.
    #[error("task {0} was not disowned before purge")]
    TaskNotDisowned(RenderTaskId),
    /// A task was prepared before it was closed.
    #[error("task {0} must be closed before it is prepared")]
    UnclosedTask(RenderTaskId),
}

/// Errors reported by the command pool provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    /// The background reset worker has shut down.
    #[error("command pool reset worker is not running")]
    WorkerUnavailable,
    /// A pool cannot be recycled while other owners still reference it.
    #[error("command pool {0} is still referenced")]
    PoolStillReferenced(u64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GraphError::CyclicDependency { remaining: 3 };
        assert_eq!(
            err.to_string(),
            "render task graph contains a cyclic dependency (3 tasks unordered)"
        );

        let err = PoolError::PoolStillReferenced(7);
        assert_eq!(err.to_string(), "command pool 7 is still referenced");
    }
}
