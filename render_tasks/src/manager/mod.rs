//! The drawing manager: task arena, last-writer registry and graph operations.
//!
//! [`DrawingManager`] owns every [`RenderTask`] and [`SurfaceProxy`] recorded for
//! a flush and maps each surface to the task that last wrote it. Graph
//! construction is single-threaded: all mutation goes through `&mut self`.
//!
//! # Example
//!
//! ```
//! use redlilium_render_tasks::{Caps, DrawingManager, IRect, SurfaceDescriptor, TextureFormat};
//!
//! let mut manager = DrawingManager::new(Caps::new());
//! let shadow_map = manager.create_surface(
//!     SurfaceDescriptor::render_texture(512, 512, TextureFormat::Rgba8Unorm),
//! );
//! let scene = manager.create_surface(
//!     SurfaceDescriptor::render_texture(1920, 1080, TextureFormat::Rgba8Unorm),
//! );
//!
//! let shadows = manager.new_ops_task(shadow_map.into());
//! manager.record_op(shadows, IRect::from_xywh(0, 0, 512, 512));
//!
//! let main = manager.new_ops_task(scene.into());
//! manager.add_surface_dependency(main, shadow_map, Default::default());
//!
//! assert!(manager.task(shadows).is_closed());
//! assert!(manager.task(main).depends_on(shadows));
//! ```

mod dependency;
mod diagnostics;
mod flush;

pub use flush::FlushState;

use std::collections::HashMap;

use crate::caps::Caps;
use crate::config::{CycleCheck, TaskGraphConfig};
use crate::surface::{SurfaceHandle, SurfaceProxy};
use crate::task::{
    AtlasTask, CopyTask, ExpectedOutcome, OpsTask, RenderTask, RenderTaskKind, SurfaceView,
    TaskFlags, TaskHandle, TextureResolveTask, TransferFromTask,
};
use crate::types::{IRect, Mipmapped, SurfaceDescriptor, SurfaceUsage};

/// Owner of the render task graph for one recording context.
#[derive(Debug)]
pub struct DrawingManager {
    caps: Caps,
    config: TaskGraphConfig,
    tasks: Vec<RenderTask>,
    surfaces: Vec<SurfaceProxy>,
    /// Last task that wrote each surface.
    last_render_tasks: HashMap<SurfaceHandle, TaskHandle>,
}

impl DrawingManager {
    /// Create a manager with the default [`TaskGraphConfig`].
    pub fn new(caps: Caps) -> Self {
        Self::with_config(caps, TaskGraphConfig::default())
    }

    /// Create a manager with an explicit configuration.
    pub fn with_config(caps: Caps, config: TaskGraphConfig) -> Self {
        Self {
            caps,
            config,
            tasks: Vec::new(),
            surfaces: Vec::new(),
            last_render_tasks: HashMap::new(),
        }
    }

    /// Device capabilities used for resolve decisions.
    pub fn caps(&self) -> &Caps {
        &self.caps
    }

    /// Active configuration.
    pub fn config(&self) -> &TaskGraphConfig {
        &self.config
    }

    // ------------------------------------------------------------------------
    // Surfaces
    // ------------------------------------------------------------------------

    /// Create a surface proxy whose backing is allocated at flush time.
    pub fn create_surface(&mut self, descriptor: SurfaceDescriptor) -> SurfaceHandle {
        let requires_resolve = self.caps.requires_manual_msaa_resolve(&descriptor);
        self.push_surface(SurfaceProxy::new(descriptor, requires_resolve))
    }

    /// Create a texture whose contents are uploaded lazily.
    ///
    /// Tasks reading it before it is instantiated record it as a deferred proxy
    /// so [`prepare`](Self::prepare) can schedule the upload.
    pub fn create_deferred_texture(&mut self, descriptor: SurfaceDescriptor) -> SurfaceHandle {
        assert!(
            descriptor.usage.contains(SurfaceUsage::TEXTURE),
            "deferred uploads are only supported for textures"
        );
        let requires_resolve = self.caps.requires_manual_msaa_resolve(&descriptor);
        self.push_surface(SurfaceProxy::new(descriptor, requires_resolve).with_deferred_upload())
    }

    fn push_surface(&mut self, proxy: SurfaceProxy) -> SurfaceHandle {
        let handle = SurfaceHandle::new(self.surfaces.len());
        log::trace!("Created surface {:?} ({:?})", handle, proxy.label());
        self.surfaces.push(proxy);
        handle
    }

    /// Get a surface proxy.
    pub fn surface(&self, handle: SurfaceHandle) -> &SurfaceProxy {
        self.surfaces
            .get(handle.index())
            .unwrap_or_else(|| panic!("invalid surface handle {handle:?}"))
    }

    /// Get a surface proxy mutably, e.g. to instantiate it.
    pub fn surface_mut(&mut self, handle: SurfaceHandle) -> &mut SurfaceProxy {
        self.surfaces
            .get_mut(handle.index())
            .unwrap_or_else(|| panic!("invalid surface handle {handle:?}"))
    }

    /// Number of surfaces.
    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    // ------------------------------------------------------------------------
    // Last-writer registry
    // ------------------------------------------------------------------------

    /// The task that last wrote `surface`, if it is still registered.
    pub fn last_render_task(&self, surface: SurfaceHandle) -> Option<TaskHandle> {
        self.last_render_tasks.get(&surface).copied()
    }

    /// Register (or clear) the last writer of `surface`.
    pub fn set_last_render_task(&mut self, surface: SurfaceHandle, task: Option<TaskHandle>) {
        log::trace!("Last render task of {:?} -> {:?}", surface, task);
        match task {
            Some(task) => {
                self.last_render_tasks.insert(surface, task);
            }
            None => {
                self.last_render_tasks.remove(&surface);
            }
        }
    }

    // ------------------------------------------------------------------------
    // Task creation
    // ------------------------------------------------------------------------

    /// Add a task to the arena without targets or dependencies.
    pub fn add_task(&mut self, kind: RenderTaskKind) -> TaskHandle {
        let handle = TaskHandle::new(self.tasks.len());
        let task = RenderTask::new(kind);
        log::trace!("Added {} {} as {:?}", task.name(), task.id(), handle);
        self.tasks.push(task);
        handle
    }

    /// Get a task.
    pub fn task(&self, handle: TaskHandle) -> &RenderTask {
        self.tasks
            .get(handle.index())
            .unwrap_or_else(|| panic!("invalid task handle {handle:?}"))
    }

    pub(crate) fn task_mut(&mut self, handle: TaskHandle) -> &mut RenderTask {
        self.tasks
            .get_mut(handle.index())
            .unwrap_or_else(|| panic!("invalid task handle {handle:?}"))
    }

    /// Handles of every task, in creation order.
    pub fn task_handles(&self) -> impl Iterator<Item = TaskHandle> + '_ {
        (0..self.tasks.len()).map(TaskHandle::new)
    }

    /// Number of tasks.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Create a draw task targeting `view`, ordered after the previous writer.
    pub fn new_ops_task(&mut self, view: SurfaceView) -> TaskHandle {
        let task = self.add_task(RenderTaskKind::Ops(OpsTask::new()));
        self.add_ordered_target(task, view);
        task
    }

    /// Create an open atlas task rendering into `view`.
    pub fn new_atlas_task(&mut self, view: SurfaceView) -> TaskHandle {
        let size = self.surface(view.surface).descriptor().size;
        let atlas = AtlasTask::new(
            u16::try_from(size.width).unwrap_or(u16::MAX),
            u16::try_from(size.height).unwrap_or(u16::MAX),
        );
        let task = self.add_task(RenderTaskKind::Atlas(atlas));
        self.add_ordered_target(task, view);
        task
    }

    /// Create a closed task copying `src_rect` of `src` into `dst` at `dst_point`.
    pub fn new_copy_task(
        &mut self,
        src: SurfaceHandle,
        src_rect: IRect,
        dst: SurfaceView,
        dst_point: (i32, i32),
    ) -> TaskHandle {
        let task = self.add_task(RenderTaskKind::Copy(CopyTask {
            src,
            src_rect,
            dst_point,
        }));
        self.add_surface_dependency(task, src, Mipmapped::No);
        self.add_ordered_target(task, dst);
        self.make_closed(task);
        task
    }

    /// Create a closed task reading `src_rect` of `src` back into `dst_buffer`.
    pub fn new_transfer_from_task(
        &mut self,
        src: SurfaceHandle,
        src_rect: IRect,
        dst_buffer: impl Into<String>,
    ) -> TaskHandle {
        let task = self.add_task(RenderTaskKind::TransferFrom(TransferFromTask {
            src,
            src_rect,
            dst_buffer: dst_buffer.into(),
        }));
        self.add_surface_dependency(task, src, Mipmapped::No);
        self.make_closed(task);
        task
    }

    /// Create an empty, open resolve task.
    pub fn new_texture_resolve_task(&mut self) -> TaskHandle {
        self.add_task(RenderTaskKind::TextureResolve(TextureResolveTask::new()))
    }

    /// Record a draw covering `bounds` into an open ops task.
    pub fn record_op(&mut self, task: TaskHandle, bounds: IRect) {
        let node = self.task_mut(task);
        assert!(!node.is_closed(), "cannot record ops into a closed task");
        match &mut node.kind {
            RenderTaskKind::Ops(ops) => ops.add_op(bounds),
            other => panic!("record_op called on {}", other.name()),
        }
    }

    /// Reserve space for a path in an open atlas task.
    pub fn atlas_add_path(&mut self, task: TaskHandle, width: u16, height: u16) -> Option<(u16, u16)> {
        let node = self.task_mut(task);
        assert!(!node.is_closed(), "cannot add paths to a closed atlas");
        match &mut node.kind {
            RenderTaskKind::Atlas(atlas) => atlas.add_path(width, height),
            other => panic!("atlas_add_path called on {}", other.name()),
        }
    }

    /// Close the previous writer of `view` and order `task` after it, then target `view`.
    fn add_ordered_target(&mut self, task: TaskHandle, view: SurfaceView) {
        if let Some(previous) = self.last_render_task(view.surface)
            && previous != task
        {
            self.make_closed(previous);
            if !self.task(task).depends_on(previous) {
                self.add_dependency(task, previous);
            }
        }
        self.add_target(task, view);
    }

    // ------------------------------------------------------------------------
    // Graph operations
    // ------------------------------------------------------------------------

    /// Append a target to an open task and register the task as its last writer.
    pub fn add_target(&mut self, task: TaskHandle, view: SurfaceView) {
        assert!(
            view.surface.index() < self.surfaces.len(),
            "invalid surface handle {:?}",
            view.surface
        );
        assert!(!self.task(task).is_closed(), "cannot add targets to a closed task");
        self.set_last_render_task(view.surface, Some(task));
        self.task_mut(task).targets.push(view);
    }

    /// Order `task` after `depended_on`.
    ///
    /// # Panics
    ///
    /// Panics if `task` is closed, if the edge already exists in either
    /// direction, or if it would create a cycle.
    pub fn add_dependency(&mut self, task: TaskHandle, depended_on: TaskHandle) {
        assert!(task != depended_on, "task cannot depend on itself");
        assert!(
            !self.task(task).is_closed(),
            "cannot add dependencies to a closed task"
        );
        self.insert_edge(task, depended_on);
    }

    /// Insert an edge without the closed check. Used while closing a task.
    fn insert_edge(&mut self, task: TaskHandle, depended_on: TaskHandle) {
        assert!(
            !self.task(depended_on).depends_on(task),
            "dependency loop between {:?} and {:?}",
            task,
            depended_on
        );
        assert!(
            !self.task(task).depends_on(depended_on),
            "duplicate dependency of {:?} on {:?}",
            task,
            depended_on
        );
        if self.config.cycle_check == CycleCheck::Reachability {
            assert!(
                !self.reaches(depended_on, task),
                "dependency of {:?} on {:?} would create a cycle",
                task,
                depended_on
            );
        }

        log::trace!("Dependency {:?} -> {:?}", task, depended_on);
        self.task_mut(task).dependencies.push(depended_on);
        self.task_mut(depended_on).dependents.push(task);

        if self.config.validate_on_insert
            && let Err(err) = self.validate_task(task)
        {
            panic!("invalid task graph after inserting dependency: {err}");
        }
    }

    /// Import every direct dependency of `other` into `task`, skipping ones it already has.
    pub fn add_dependencies_from_other_task(&mut self, task: TaskHandle, other: TaskHandle) {
        let inherited = self.task(other).dependencies.clone();
        for dependency in inherited {
            assert!(dependency != task, "task cannot inherit a dependency on itself");
            if !self.task(task).depends_on(dependency) {
                self.add_dependency(task, dependency);
            }
        }
    }

    /// Whether `task` directly depends on `candidate`.
    pub fn depends_on(&self, task: TaskHandle, candidate: TaskHandle) -> bool {
        self.task(task).depends_on(candidate)
    }

    /// Close `task`. Repeated calls are no-ops.
    ///
    /// Runs the variant's closing hook; if it wrote the primary target, that
    /// target's MSAA buffer (when resolved manually) and mip chain (when present)
    /// are marked dirty. A pending private resolve task is attached as a
    /// dependency and closed.
    pub fn make_closed(&mut self, task: TaskHandle) {
        if self.task(task).is_closed() {
            return;
        }

        let primary = self.task(task).targets.first().copied();
        let target_bounds = primary.map(|view| self.surface(view.surface).descriptor().size.bounds());
        let outcome = self.task_mut(task).kind.on_make_closed(target_bounds);

        if let (ExpectedOutcome::TargetDirty(bounds), Some(view)) = (outcome, primary) {
            let proxy = self.surface_mut(view.surface);
            if proxy.requires_manual_msaa_resolve() {
                proxy.mark_msaa_dirty(bounds, view.origin);
            }
            if proxy.mipmapped() == Mipmapped::Yes {
                proxy.mark_mipmaps_dirty();
            }
        }

        if let Some(resolve) = self.task_mut(task).texture_resolve_task.take() {
            if !self.task(task).depends_on(resolve) {
                self.insert_edge(task, resolve);
            }
            self.make_closed(resolve);
        }

        let node = self.task_mut(task);
        node.flags.insert(TaskFlags::CLOSED);
        log::debug!("Closed {} {} ({:?})", node.name(), node.id(), outcome);
    }

    /// Close every open task that depends on `task`.
    pub fn close_those_who_depend_on_me(&mut self, task: TaskHandle) {
        let dependents = self.task(task).dependents.clone();
        for dependent in dependents {
            if !self.task(dependent).is_closed() {
                self.make_closed(dependent);
            }
        }
    }

    /// Release `task` after execution. Repeated calls are no-ops.
    ///
    /// Every surface still registered with `task` as its last writer is
    /// unregistered, so later tasks do not chain off a task that is gone.
    ///
    /// # Panics
    ///
    /// Panics if the task is not closed.
    pub fn disown(&mut self, task: TaskHandle) {
        let node = self.task(task);
        assert!(node.is_closed(), "only closed tasks can be disowned");
        if node.is_disowned() {
            return;
        }

        let targets: Vec<SurfaceHandle> = node.targets.iter().map(|view| view.surface).collect();
        self.task_mut(task).flags.insert(TaskFlags::DISOWNED);
        for surface in targets {
            if self.last_render_task(surface) == Some(task) {
                self.set_last_render_task(surface, None);
            }
        }
    }

    /// Whether the task's primary target has a live GPU surface. Tasks
    /// without targets are always instantiated.
    pub fn is_instantiated(&self, task: TaskHandle) -> bool {
        let Some(view) = self.task(task).targets.first() else {
            return true;
        };
        self.surface(view.surface)
            .peek_backing()
            .is_some_and(|backing| !backing.was_destroyed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TextureFormat;

    fn manager() -> DrawingManager {
        DrawingManager::new(Caps::new())
    }

    fn render_texture(manager: &mut DrawingManager) -> SurfaceHandle {
        manager.create_surface(SurfaceDescriptor::render_texture(
            64,
            64,
            TextureFormat::Rgba8Unorm,
        ))
    }

    #[test]
    fn test_add_dependency_is_symmetric() {
        let mut manager = manager();
        let a = manager.add_task(RenderTaskKind::Ops(OpsTask::new()));
        let b = manager.add_task(RenderTaskKind::Ops(OpsTask::new()));

        manager.add_dependency(a, b);

        assert!(manager.depends_on(a, b));
        assert!(!manager.depends_on(b, a));
        assert!(manager.task(b).is_dependent(a));
    }

    #[test]
    #[should_panic(expected = "dependency loop")]
    fn test_reverse_edge_rejected() {
        let mut manager = manager();
        let a = manager.add_task(RenderTaskKind::Ops(OpsTask::new()));
        let b = manager.add_task(RenderTaskKind::Ops(OpsTask::new()));
        manager.add_dependency(a, b);
        manager.add_dependency(b, a);
    }

    #[test]
    #[should_panic(expected = "duplicate dependency")]
    fn test_duplicate_edge_rejected() {
        let mut manager = manager();
        let a = manager.add_task(RenderTaskKind::Ops(OpsTask::new()));
        let b = manager.add_task(RenderTaskKind::Ops(OpsTask::new()));
        manager.add_dependency(a, b);
        manager.add_dependency(a, b);
    }

    #[test]
    #[should_panic(expected = "would create a cycle")]
    fn test_three_cycle_rejected() {
        let mut manager = manager();
        let a = manager.add_task(RenderTaskKind::Ops(OpsTask::new()));
        let b = manager.add_task(RenderTaskKind::Ops(OpsTask::new()));
        let c = manager.add_task(RenderTaskKind::Ops(OpsTask::new()));
        manager.add_dependency(a, b);
        manager.add_dependency(b, c);
        manager.add_dependency(c, a);
    }

    #[test]
    fn test_three_cycle_slips_through_direct_checks() {
        let config = TaskGraphConfig::new()
            .with_cycle_check(CycleCheck::DirectEdges)
            .with_validate_on_insert(false);
        let mut manager = DrawingManager::with_config(Caps::new(), config);
        let a = manager.add_task(RenderTaskKind::Ops(OpsTask::new()));
        let b = manager.add_task(RenderTaskKind::Ops(OpsTask::new()));
        let c = manager.add_task(RenderTaskKind::Ops(OpsTask::new()));
        manager.add_dependency(a, b);
        manager.add_dependency(b, c);
        manager.add_dependency(c, a);

        assert!(manager.validate().is_err());
    }

    #[test]
    #[should_panic(expected = "closed task")]
    fn test_closed_task_rejects_dependencies() {
        let mut manager = manager();
        let a = manager.add_task(RenderTaskKind::Ops(OpsTask::new()));
        let b = manager.add_task(RenderTaskKind::Ops(OpsTask::new()));
        manager.make_closed(a);
        manager.add_dependency(a, b);
    }

    #[test]
    fn test_add_dependencies_from_other_task() {
        let mut manager = manager();
        let a = manager.add_task(RenderTaskKind::Ops(OpsTask::new()));
        let b = manager.add_task(RenderTaskKind::Ops(OpsTask::new()));
        let c = manager.add_task(RenderTaskKind::Ops(OpsTask::new()));
        let other = manager.add_task(RenderTaskKind::Ops(OpsTask::new()));
        let task = manager.add_task(RenderTaskKind::Ops(OpsTask::new()));
        manager.add_dependency(other, a);
        manager.add_dependency(other, b);
        manager.add_dependency(other, c);
        manager.add_dependency(task, b);

        manager.add_dependencies_from_other_task(task, other);

        assert_eq!(manager.task(task).dependencies(), &[b, a, c]);
        assert_eq!(manager.task(b).dependents(), &[other, task]);
    }

    #[test]
    fn test_make_closed_is_idempotent_and_marks_mipmaps_dirty() {
        let mut manager = manager();
        let surface = manager.create_surface(
            SurfaceDescriptor::render_texture(64, 64, TextureFormat::Rgba8Unorm)
                .with_mip_levels(7),
        );
        let task = manager.new_ops_task(surface.into());
        manager.record_op(task, IRect::from_xywh(0, 0, 8, 8));

        manager.make_closed(task);
        assert!(manager.task(task).is_closed());
        assert!(manager.surface(surface).mipmaps_are_dirty());

        manager.surface_mut(surface).mark_mipmaps_clean();
        manager.make_closed(task);
        assert!(!manager.surface(surface).mipmaps_are_dirty());
    }

    #[test]
    fn test_empty_ops_task_leaves_target_clean() {
        let mut manager = manager();
        let surface = manager.create_surface(
            SurfaceDescriptor::render_texture(64, 64, TextureFormat::Rgba8Unorm)
                .with_mip_levels(7),
        );
        let task = manager.new_ops_task(surface.into());
        manager.make_closed(task);
        assert!(!manager.surface(surface).mipmaps_are_dirty());
    }

    #[test]
    fn test_new_ops_task_orders_after_previous_writer() {
        let mut manager = manager();
        let surface = render_texture(&mut manager);
        let first = manager.new_ops_task(surface.into());
        let second = manager.new_ops_task(surface.into());

        assert!(manager.task(first).is_closed());
        assert!(manager.depends_on(second, first));
        assert_eq!(manager.last_render_task(surface), Some(second));
    }

    #[test]
    fn test_close_those_who_depend_on_me() {
        let mut manager = manager();
        let task = manager.add_task(RenderTaskKind::Ops(OpsTask::new()));
        let d1 = manager.add_task(RenderTaskKind::Ops(OpsTask::new()));
        let d2 = manager.add_task(RenderTaskKind::Ops(OpsTask::new()));
        let d3 = manager.add_task(RenderTaskKind::Ops(OpsTask::new()));
        for dependent in [d1, d2, d3] {
            manager.add_dependency(dependent, task);
        }
        manager.make_closed(d3);

        manager.close_those_who_depend_on_me(task);

        assert!(manager.task(d1).is_closed());
        assert!(manager.task(d2).is_closed());
        assert!(manager.task(d3).is_closed());
        assert!(!manager.task(task).is_closed());
    }

    #[test]
    fn test_disown_clears_only_own_registration() {
        let mut manager = manager();
        let a_surface = render_texture(&mut manager);
        let b_surface = render_texture(&mut manager);
        let task = manager.new_ops_task(a_surface.into());
        manager.add_target(task, b_surface.into());
        manager.make_closed(task);

        let successor = manager.new_ops_task(b_surface.into());
        manager.disown(task);
        manager.disown(task);

        assert!(manager.task(task).is_disowned());
        assert_eq!(manager.last_render_task(a_surface), None);
        assert_eq!(manager.last_render_task(b_surface), Some(successor));
    }

    #[test]
    #[should_panic(expected = "only closed tasks can be disowned")]
    fn test_disown_requires_closed() {
        let mut manager = manager();
        let task = manager.add_task(RenderTaskKind::Ops(OpsTask::new()));
        manager.disown(task);
    }

    #[test]
    fn test_is_instantiated() {
        let mut manager = manager();
        let surface = render_texture(&mut manager);
        let task = manager.new_ops_task(surface.into());
        let readback =
            manager.new_transfer_from_task(surface, IRect::from_xywh(0, 0, 4, 4), "readback");

        assert!(!manager.is_instantiated(task));
        assert!(manager.is_instantiated(readback));

        manager.surface_mut(surface).instantiate();
        assert!(manager.is_instantiated(task));

        manager.surface_mut(surface).destroy_backing();
        assert!(!manager.is_instantiated(task));
    }

    #[test]
    fn test_copy_task_marks_destination_dirty() {
        let mut manager = manager();
        let src = render_texture(&mut manager);
        let dst = manager.create_surface(
            SurfaceDescriptor::render_texture(64, 64, TextureFormat::Rgba8Unorm)
                .with_mip_levels(4),
        );
        let producer = manager.new_ops_task(src.into());

        let copy = manager.new_copy_task(src, IRect::from_xywh(0, 0, 16, 16), dst.into(), (0, 0));

        assert!(manager.task(copy).is_closed());
        assert!(manager.task(producer).is_closed());
        assert!(manager.depends_on(copy, producer));
        assert!(manager.surface(dst).mipmaps_are_dirty());
        assert_eq!(manager.last_render_task(dst), Some(copy));
    }

    #[test]
    fn test_atlas_stays_open_until_closed() {
        let mut manager = manager();
        let atlas_surface = render_texture(&mut manager);
        let atlas = manager.new_atlas_task(atlas_surface.into());

        assert_eq!(manager.atlas_add_path(atlas, 16, 16), Some((0, 0)));
        assert_eq!(manager.atlas_add_path(atlas, 16, 16), Some((16, 0)));
        assert!(!manager.task(atlas).is_closed());

        let scene = render_texture(&mut manager);
        let reader = manager.new_ops_task(scene.into());
        manager.add_surface_dependency(reader, atlas_surface, Mipmapped::No);

        assert!(manager.task(atlas).is_closed());
        assert_eq!(manager.task(atlas).kind().as_atlas().unwrap().path_count(), 2);
        assert!(manager.depends_on(reader, atlas));
    }
}
