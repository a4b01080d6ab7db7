//! Surface reads: ordering against the last writer and resolve injection.

use fixedbitset::FixedBitSet;
use redlilium_core::sampler::SamplerState;

use super::DrawingManager;
use crate::surface::SurfaceHandle;
use crate::task::{RenderTaskKind, Resolve, ResolveFlags, TaskHandle};
use crate::types::Mipmapped;

impl DrawingManager {
    /// Record that `task` reads `surface`.
    ///
    /// The surface's last writer is closed and becomes a dependency of `task`.
    /// When the read needs the surface's MSAA buffer resolved or its mip chain
    /// regenerated, a resolve task is inserted between the two instead: it
    /// depends on the writer, becomes the surface's last writer, and is attached
    /// to `task` when `task` closes.
    ///
    /// A `Mipmapped::Yes` read of a surface without a mip chain is downgraded to
    /// a plain read.
    ///
    /// # Panics
    ///
    /// Panics if `task` is closed, or on a self-read that would need a resolve.
    pub fn add_surface_dependency(
        &mut self,
        task: TaskHandle,
        surface: SurfaceHandle,
        mipmapped: Mipmapped,
    ) {
        assert!(
            !self.task(task).is_closed(),
            "cannot add dependencies to a closed task"
        );

        let depended_on = self.last_render_task(surface);

        if depended_on == Some(task) {
            // Self-read. The backend inserts a texture barrier.
            let proxy = self.surface(surface);
            assert!(
                mipmapped == Mipmapped::No,
                "self-reads cannot sample mipmaps"
            );
            assert!(
                !proxy.requires_manual_msaa_resolve(),
                "self-reads of surfaces with a separate MSAA buffer are not supported"
            );
            assert!(!proxy.is_deferred(), "self-reads of deferred textures are not supported");
            return;
        }

        if let Some(previous) = depended_on {
            if self.task(task).depends_on(previous)
                || self.task(task).texture_resolve_task == Some(previous)
            {
                return;
            }
            self.make_closed(previous);
        }

        let resolve_flags = self.resolve_flags_for(surface, mipmapped);

        if !resolve_flags.is_empty() {
            let resolve = self.texture_resolve_task_for(task);
            self.resolve_add_proxy(resolve, surface, resolve_flags);

            debug_assert!(depended_on.is_none_or(|previous| self.task(previous).is_closed()));
            debug_assert_eq!(self.last_render_task(surface), Some(resolve));
            debug_assert!(
                depended_on.is_none_or(|previous| self.task(resolve).depends_on(previous))
            );
            return;
        }

        if self.surface(surface).is_deferred() {
            self.task_mut(task).deferred_proxies.push(surface);
        }

        if let Some(previous) = depended_on {
            self.add_dependency(task, previous);
        }
    }

    /// Record that `task` samples `surface` with `sampler`.
    ///
    /// The sampler's mip filter is clamped to what the device supports for the
    /// surface's format before deciding whether the read needs mipmaps.
    pub fn add_sampled_dependency(
        &mut self,
        task: TaskHandle,
        surface: SurfaceHandle,
        sampler: SamplerState,
    ) {
        let format = self.surface(surface).descriptor().format;
        let mode = self.caps().clamp_mipmap_mode(format, sampler.mipmap_mode);
        let mipmapped = if mode.uses_mipmaps() {
            Mipmapped::Yes
        } else {
            Mipmapped::No
        };
        self.add_surface_dependency(task, surface, mipmapped);
    }

    fn resolve_flags_for(&self, surface: SurfaceHandle, mipmapped: Mipmapped) -> ResolveFlags {
        let proxy = self.surface(surface);
        let mut flags = ResolveFlags::empty();

        if proxy.requires_manual_msaa_resolve() && proxy.is_msaa_dirty() {
            flags |= ResolveFlags::MSAA;
        }

        if mipmapped == Mipmapped::Yes {
            if proxy.mipmapped() == Mipmapped::No {
                log::warn!(
                    "Mipmapped read of {:?} ({:?}) which has no mip chain; reading base level",
                    surface,
                    proxy.label()
                );
            } else if proxy.mipmaps_are_dirty() {
                flags |= ResolveFlags::MIPMAPS;
            }
        }

        flags
    }

    /// The open resolve task owned by `task`, created on demand.
    ///
    /// A resolve task that another reader already closed is folded into
    /// `task`'s dependencies and replaced by a fresh one.
    fn texture_resolve_task_for(&mut self, task: TaskHandle) -> TaskHandle {
        if let Some(existing) = self.task(task).texture_resolve_task {
            if !self.task(existing).is_closed() {
                return existing;
            }
            if !self.task(task).depends_on(existing) {
                self.add_dependency(task, existing);
            }
        }

        let resolve = self.new_texture_resolve_task();
        self.task_mut(task).texture_resolve_task = Some(resolve);
        resolve
    }

    /// Schedule `flags` work for `surface` on `resolve` and make the resolve
    /// task the surface's last writer.
    fn resolve_add_proxy(&mut self, resolve: TaskHandle, surface: SurfaceHandle, flags: ResolveFlags) {
        let proxy = self.surface_mut(surface);
        let mut msaa_resolve_rect = None;
        if flags.contains(ResolveFlags::MSAA) {
            msaa_resolve_rect = proxy.msaa_dirty_rect();
            proxy.mark_msaa_resolved();
        }
        if flags.contains(ResolveFlags::MIPMAPS) {
            proxy.mark_mipmaps_clean();
        }

        match &mut self.task_mut(resolve).kind {
            RenderTaskKind::TextureResolve(task) => task.push(Resolve {
                surface,
                flags,
                msaa_resolve_rect,
            }),
            other => panic!("resolve work scheduled on {}", other.name()),
        }
        log::debug!("Resolve {:?} of {:?} on {:?}", flags, surface, resolve);

        // The surface is clean now, so this records a plain read.
        self.add_surface_dependency(resolve, surface, Mipmapped::No);
        self.add_target(resolve, surface.into());
    }

    /// Whether `to` is reachable from `from` along dependency edges.
    pub(crate) fn reaches(&self, from: TaskHandle, to: TaskHandle) -> bool {
        let mut visited = FixedBitSet::with_capacity(self.task_count());
        let mut stack = vec![from];
        while let Some(current) = stack.pop() {
            if current == to {
                return true;
            }
            if visited.put(current.index()) {
                continue;
            }
            stack.extend(
                self.task(current)
                    .dependencies()
                    .iter()
                    .copied()
                    .filter(|dep| !visited.contains(dep.index())),
            );
        }
        false
    }
}
