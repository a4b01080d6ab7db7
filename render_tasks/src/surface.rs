//! Surface proxies.
//!
//! A [`SurfaceProxy`] stands in for a GPU surface that may not exist yet. Render
//! tasks target and read proxies; the backing surface is attached when the
//! proxy is instantiated at flush time. Proxies also carry the dirty state of
//! the surface's auxiliary representations (resolved MSAA contents, mip chain)
//! that the task graph uses to inject resolve tasks.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::types::{IRect, Mipmapped, SurfaceDescriptor, SurfaceOrigin};

/// Handle to a surface proxy owned by a [`DrawingManager`](crate::DrawingManager).
///
/// `SurfaceHandle` is `Copy` and cheap to pass around. It is only valid within
/// the manager that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceHandle(u32);

impl SurfaceHandle {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// The GPU surface behind an instantiated proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackingSurface {
    id: u32,
    destroyed: bool,
}

impl BackingSurface {
    fn new() -> Self {
        static NEXT_ID: AtomicU32 = AtomicU32::new(1);
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            destroyed: false,
        }
    }

    /// Unique id of the GPU surface.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Whether the GPU surface has been released (e.g. on device loss).
    pub fn was_destroyed(&self) -> bool {
        self.destroyed
    }
}

/// Deferred or instantiated handle to a GPU surface.
#[derive(Debug)]
pub struct SurfaceProxy {
    descriptor: SurfaceDescriptor,
    requires_manual_msaa_resolve: bool,
    msaa_dirty_rect: Option<IRect>,
    mipmaps_dirty: bool,
    deferred_upload: bool,
    backing: Option<BackingSurface>,
}

impl SurfaceProxy {
    pub(crate) fn new(descriptor: SurfaceDescriptor, requires_manual_msaa_resolve: bool) -> Self {
        Self {
            descriptor,
            requires_manual_msaa_resolve,
            msaa_dirty_rect: None,
            mipmaps_dirty: false,
            deferred_upload: false,
            backing: None,
        }
    }

    pub(crate) fn with_deferred_upload(mut self) -> Self {
        self.deferred_upload = true;
        self
    }

    /// The descriptor the proxy was created with.
    pub fn descriptor(&self) -> &SurfaceDescriptor {
        &self.descriptor
    }

    /// Debug label, if set.
    pub fn label(&self) -> Option<&str> {
        self.descriptor.label.as_deref()
    }

    /// Whether the surface stores a mip chain.
    pub fn mipmapped(&self) -> Mipmapped {
        self.descriptor.mipmapped()
    }

    /// Whether the surface has a separate multisample buffer that must be
    /// resolved explicitly before it is read as a texture.
    pub fn requires_manual_msaa_resolve(&self) -> bool {
        self.requires_manual_msaa_resolve
    }

    /// Whether the multisampled contents changed since the last resolve.
    pub fn is_msaa_dirty(&self) -> bool {
        self.msaa_dirty_rect.is_some()
    }

    /// Region of the multisample buffer that needs resolving, in top-left coordinates.
    pub fn msaa_dirty_rect(&self) -> Option<IRect> {
        self.msaa_dirty_rect
    }

    /// Record that `rect` (in `origin` coordinates) of the multisample buffer changed.
    pub fn mark_msaa_dirty(&mut self, rect: IRect, origin: SurfaceOrigin) {
        assert!(
            self.requires_manual_msaa_resolve,
            "only surfaces with a manual MSAA resolve track MSAA dirtiness"
        );
        let rect = match origin {
            SurfaceOrigin::TopLeft => rect,
            SurfaceOrigin::BottomLeft => {
                rect.flipped_vertically(self.descriptor.size.height as i32)
            }
        };
        self.msaa_dirty_rect = Some(match self.msaa_dirty_rect {
            Some(dirty) => dirty.union(&rect),
            None => rect,
        });
    }

    /// Record that the multisample buffer has been resolved.
    pub fn mark_msaa_resolved(&mut self) {
        self.msaa_dirty_rect = None;
    }

    /// Whether the mip chain is stale relative to the base level.
    pub fn mipmaps_are_dirty(&self) -> bool {
        self.mipmaps_dirty
    }

    /// Record that the base level changed and the mip chain is stale.
    pub fn mark_mipmaps_dirty(&mut self) {
        assert_eq!(
            self.mipmapped(),
            Mipmapped::Yes,
            "only mipmapped surfaces track mipmap dirtiness"
        );
        self.mipmaps_dirty = true;
    }

    /// Record that the mip chain has been regenerated.
    pub fn mark_mipmaps_clean(&mut self) {
        self.mipmaps_dirty = false;
    }

    /// Whether a GPU surface has been attached.
    pub fn is_instantiated(&self) -> bool {
        self.backing.is_some()
    }

    /// The attached GPU surface, if any.
    pub fn peek_backing(&self) -> Option<&BackingSurface> {
        self.backing.as_ref()
    }

    /// Whether this is a texture whose contents are uploaded lazily and have
    /// not been realized yet.
    pub fn is_deferred(&self) -> bool {
        self.deferred_upload && self.backing.is_none()
    }

    /// Attach a GPU surface. Returns the backing surface id.
    pub fn instantiate(&mut self) -> u32 {
        let backing = *self.backing.get_or_insert_with(BackingSurface::new);
        log::trace!(
            "Instantiated surface {:?} with backing {}",
            self.label(),
            backing.id
        );
        backing.id
    }

    /// Mark the attached GPU surface as destroyed.
    pub fn destroy_backing(&mut self) {
        if let Some(backing) = self.backing.as_mut() {
            backing.destroyed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TextureFormat;

    fn msaa_proxy() -> SurfaceProxy {
        let desc = SurfaceDescriptor::render_texture(100, 50, TextureFormat::Rgba8Unorm)
            .with_sample_count(4);
        SurfaceProxy::new(desc, true)
    }

    #[test]
    fn test_msaa_dirty_rect_accumulates() {
        let mut proxy = msaa_proxy();
        assert!(!proxy.is_msaa_dirty());

        proxy.mark_msaa_dirty(IRect::from_xywh(0, 0, 10, 10), SurfaceOrigin::TopLeft);
        proxy.mark_msaa_dirty(IRect::from_xywh(20, 20, 10, 10), SurfaceOrigin::TopLeft);
        assert_eq!(proxy.msaa_dirty_rect(), Some(IRect::from_ltrb(0, 0, 30, 30)));

        proxy.mark_msaa_resolved();
        assert!(!proxy.is_msaa_dirty());
    }

    #[test]
    fn test_msaa_dirty_rect_bottom_left_origin() {
        let mut proxy = msaa_proxy();
        proxy.mark_msaa_dirty(IRect::from_xywh(0, 0, 10, 10), SurfaceOrigin::BottomLeft);
        assert_eq!(proxy.msaa_dirty_rect(), Some(IRect::from_ltrb(0, 40, 10, 50)));
    }

    #[test]
    #[should_panic(expected = "only mipmapped surfaces")]
    fn test_mipmaps_dirty_requires_mip_chain() {
        let desc = SurfaceDescriptor::render_texture(8, 8, TextureFormat::Rgba8Unorm);
        SurfaceProxy::new(desc, false).mark_mipmaps_dirty();
    }

    #[test]
    fn test_deferred_until_instantiated() {
        let desc = SurfaceDescriptor::render_texture(8, 8, TextureFormat::Rgba8Unorm);
        let mut proxy = SurfaceProxy::new(desc, false).with_deferred_upload();
        assert!(proxy.is_deferred());
        assert!(!proxy.is_instantiated());

        let id = proxy.instantiate();
        assert!(!proxy.is_deferred());
        assert_eq!(proxy.instantiate(), id);

        proxy.destroy_backing();
        assert!(proxy.peek_backing().unwrap().was_destroyed());
    }
}
