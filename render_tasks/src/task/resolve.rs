//! Texture resolve tasks.
//!
//! A resolve task is injected ahead of a reader when a surface it samples has
//! stale auxiliary contents: an unresolved multisample buffer, a stale mip
//! chain, or both. The dependency wiring lives in
//! [`DrawingManager::add_surface_dependency`](crate::DrawingManager::add_surface_dependency).

use bitflags::bitflags;

use crate::surface::SurfaceHandle;
use crate::types::IRect;

bitflags! {
    /// Work a resolve task performs on one surface.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ResolveFlags: u8 {
        /// Resolve the multisample buffer into the single-sample texture.
        const MSAA = 1 << 0;
        /// Regenerate the mip chain from the base level.
        const MIPMAPS = 1 << 1;
    }
}

/// One surface registered with a resolve task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolve {
    /// Surface resolved.
    pub surface: SurfaceHandle,
    /// Work performed.
    pub flags: ResolveFlags,
    /// Region of the multisample buffer resolved, when `flags` contains `MSAA`.
    pub msaa_resolve_rect: Option<IRect>,
}

/// Resolves registered surfaces before the task that owns this one runs.
#[derive(Debug, Default)]
pub struct TextureResolveTask {
    resolves: Vec<Resolve>,
}

impl TextureResolveTask {
    /// Create a resolve task with no surfaces.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, resolve: Resolve) {
        self.resolves.push(resolve);
    }

    /// Surfaces registered so far, in registration order.
    pub fn resolves(&self) -> &[Resolve] {
        &self.resolves
    }

    /// Combined work requested for `surface`.
    pub fn flags_for(&self, surface: SurfaceHandle) -> ResolveFlags {
        self.resolves
            .iter()
            .filter(|resolve| resolve.surface == surface)
            .fold(ResolveFlags::empty(), |acc, resolve| acc | resolve.flags)
    }
}
