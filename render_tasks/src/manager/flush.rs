//! Flushing: closing, ordering, preparing and retiring tasks.

use std::collections::BTreeSet;

use redlilium_core::profile_scope;

use super::DrawingManager;
use crate::error::GraphError;
use crate::surface::SurfaceHandle;
use crate::task::TaskHandle;

/// Per-flush record of the uploads and task preparation issued by
/// [`DrawingManager::prepare`].
#[derive(Debug, Default)]
pub struct FlushState {
    scheduled_uploads: Vec<SurfaceHandle>,
    prepared_tasks: Vec<TaskHandle>,
}

impl FlushState {
    /// Create an empty flush state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deferred textures whose upload was scheduled, in scheduling order.
    pub fn scheduled_uploads(&self) -> &[SurfaceHandle] {
        &self.scheduled_uploads
    }

    /// Tasks prepared so far, in preparation order.
    pub fn prepared_tasks(&self) -> &[TaskHandle] {
        &self.prepared_tasks
    }

    /// Schedule an upload of `surface`. Returns `false` if it was already scheduled.
    pub fn schedule_upload(&mut self, surface: SurfaceHandle) -> bool {
        if self.scheduled_uploads.contains(&surface) {
            return false;
        }
        self.scheduled_uploads.push(surface);
        true
    }

    /// Forget everything recorded, keeping allocations.
    pub fn reset(&mut self) {
        self.scheduled_uploads.clear();
        self.prepared_tasks.clear();
    }
}

impl DrawingManager {
    /// Prepare a closed task for execution: schedule uploads for deferred
    /// textures it reads that are still not instantiated.
    pub fn prepare(&mut self, task: TaskHandle, state: &mut FlushState) -> Result<(), GraphError> {
        let node = self.task(task);
        if !node.is_closed() {
            return Err(GraphError::UnclosedTask(node.id()));
        }

        for &surface in node.deferred_proxies() {
            if self.surface(surface).is_deferred() && state.schedule_upload(surface) {
                log::trace!("Scheduled upload of {:?} for {}", surface, node.id());
            }
        }
        state.prepared_tasks.push(task);
        Ok(())
    }

    /// Whether every deferred texture the task reads has been instantiated.
    pub fn deferred_proxies_are_instantiated(&self, task: TaskHandle) -> bool {
        self.task(task)
            .deferred_proxies()
            .iter()
            .all(|&surface| self.surface(surface).is_instantiated())
    }

    /// Order every task so that each comes after all of its dependencies.
    ///
    /// Among tasks that are ready at the same time, the one created first runs
    /// first.
    pub fn execution_order(&self) -> Result<Vec<TaskHandle>, GraphError> {
        let n = self.task_count();
        let mut order = Vec::with_capacity(n);

        let mut in_degree: Vec<usize> = self
            .task_handles()
            .map(|handle| self.task(handle).dependencies().len())
            .collect();

        let mut ready: BTreeSet<TaskHandle> = self
            .task_handles()
            .filter(|handle| in_degree[handle.index()] == 0)
            .collect();

        while let Some(handle) = ready.pop_first() {
            order.push(handle);
            for &dependent in self.task(handle).dependents() {
                in_degree[dependent.index()] -= 1;
                if in_degree[dependent.index()] == 0 {
                    ready.insert(dependent);
                }
            }
        }

        if order.len() != n {
            return Err(GraphError::CyclicDependency {
                remaining: n - order.len(),
            });
        }
        Ok(order)
    }

    /// Close every open task, order the graph and prepare each task in order.
    pub fn flush(&mut self, state: &mut FlushState) -> Result<Vec<TaskHandle>, GraphError> {
        profile_scope!("flush_tasks");

        {
            profile_scope!("close_tasks");
            let handles: Vec<TaskHandle> = self.task_handles().collect();
            for handle in handles {
                self.make_closed(handle);
            }
        }

        let order = {
            profile_scope!("order_tasks");
            self.execution_order()?
        };
        self.log_graph();

        {
            profile_scope!("prepare_tasks");
            for &handle in &order {
                self.prepare(handle, state)?;
            }
        }

        log::debug!(
            "Flushed {} tasks, {} uploads scheduled",
            order.len(),
            state.scheduled_uploads().len()
        );
        Ok(order)
    }

    /// Disown executed tasks.
    pub fn retire(&mut self, tasks: &[TaskHandle]) {
        for &task in tasks {
            self.disown(task);
        }
    }

    /// Drop every task. All tasks must have been disowned.
    pub fn purge(&mut self) -> Result<(), GraphError> {
        if let Some(owned) = self.tasks.iter().find(|task| !task.is_disowned()) {
            return Err(GraphError::TaskNotDisowned(owned.id()));
        }
        log::debug!("Purged {} tasks", self.tasks.len());
        self.tasks.clear();
        self.last_render_tasks.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caps::Caps;
    use crate::task::{OpsTask, RenderTaskKind};
    use crate::types::{IRect, Mipmapped, SurfaceDescriptor, SurfaceUsage, TextureFormat};

    fn ops(manager: &mut DrawingManager) -> TaskHandle {
        manager.add_task(RenderTaskKind::Ops(OpsTask::new()))
    }

    #[test]
    fn test_execution_order_respects_dependencies() {
        let mut manager = DrawingManager::new(Caps::new());
        let a = ops(&mut manager);
        let b = ops(&mut manager);
        let c = ops(&mut manager);
        manager.add_dependency(a, c);
        manager.add_dependency(b, a);

        assert_eq!(manager.execution_order().unwrap(), vec![c, a, b]);
    }

    #[test]
    fn test_execution_order_prefers_creation_order() {
        let mut manager = DrawingManager::new(Caps::new());
        let a = ops(&mut manager);
        let b = ops(&mut manager);
        let c = ops(&mut manager);
        let d = ops(&mut manager);
        manager.add_dependency(b, d);

        assert_eq!(manager.execution_order().unwrap(), vec![a, c, d, b]);
    }

    #[test]
    fn test_prepare_requires_closed_task() {
        let mut manager = DrawingManager::new(Caps::new());
        let task = ops(&mut manager);
        let mut state = FlushState::new();

        let err = manager.prepare(task, &mut state).unwrap_err();
        assert_eq!(err, GraphError::UnclosedTask(manager.task(task).id()));
    }

    #[test]
    fn test_uploads_scheduled_once() {
        let mut manager = DrawingManager::new(Caps::new());
        let texture = manager.create_deferred_texture(SurfaceDescriptor::new(
            8,
            8,
            TextureFormat::Rgba8Unorm,
            SurfaceUsage::TEXTURE,
        ));
        let first = ops(&mut manager);
        let second = ops(&mut manager);
        manager.add_surface_dependency(first, texture, Mipmapped::No);
        manager.add_surface_dependency(second, texture, Mipmapped::No);
        assert!(!manager.deferred_proxies_are_instantiated(first));

        let mut state = FlushState::new();
        let order = manager.flush(&mut state).unwrap();

        assert_eq!(order, vec![first, second]);
        assert_eq!(state.scheduled_uploads(), &[texture]);
        assert_eq!(state.prepared_tasks(), &[first, second]);

        manager.surface_mut(texture).instantiate();
        assert!(manager.deferred_proxies_are_instantiated(first));
        state.reset();
        manager.prepare(first, &mut state).unwrap();
        assert!(state.scheduled_uploads().is_empty());
    }

    #[test]
    fn test_flush_retire_purge() {
        let mut manager = DrawingManager::new(Caps::new());
        let surface = manager.create_surface(SurfaceDescriptor::render_texture(
            16,
            16,
            TextureFormat::Rgba8Unorm,
        ));
        let task = manager.new_ops_task(surface.into());
        manager.record_op(task, IRect::from_xywh(0, 0, 16, 16));

        let mut state = FlushState::new();
        let order = manager.flush(&mut state).unwrap();
        assert!(manager.task(task).is_closed());
        assert!(matches!(
            manager.purge(),
            Err(GraphError::TaskNotDisowned(_))
        ));

        manager.retire(&order);
        manager.purge().unwrap();
        assert_eq!(manager.task_count(), 0);
        assert_eq!(manager.last_render_task(surface), None);
    }
}
