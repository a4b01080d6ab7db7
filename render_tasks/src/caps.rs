//! Device capabilities consulted while building the task graph.

use redlilium_core::sampler::MipmapMode;

use crate::types::{SurfaceDescriptor, SurfaceUsage, TextureFormat};

/// How multisampled render targets become readable as textures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MsaaResolve {
    /// The backend resolves at the end of every render pass that writes the target.
    #[default]
    Automatic,
    /// A separate resolve operation must be scheduled before the texture is read.
    Manual,
}

/// Capabilities of the device the graph is being recorded for.
///
/// # Example
///
/// ```
/// use redlilium_render_tasks::{Caps, MsaaResolve};
///
/// let caps = Caps::new()
///     .with_msaa_resolve(MsaaResolve::Manual)
///     .with_mipmap_support(true);
/// assert_eq!(caps.msaa_resolve(), MsaaResolve::Manual);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Caps {
    msaa_resolve: MsaaResolve,
    mipmap_support: bool,
}

impl Caps {
    /// Capabilities of a device with automatic MSAA resolves and mipmap support.
    pub fn new() -> Self {
        Self {
            msaa_resolve: MsaaResolve::Automatic,
            mipmap_support: true,
        }
    }

    /// Set how MSAA targets are resolved.
    pub fn with_msaa_resolve(mut self, msaa_resolve: MsaaResolve) -> Self {
        self.msaa_resolve = msaa_resolve;
        self
    }

    /// Set whether mipmapped sampling is supported at all.
    pub fn with_mipmap_support(mut self, supported: bool) -> Self {
        self.mipmap_support = supported;
        self
    }

    /// How MSAA targets are resolved.
    pub fn msaa_resolve(&self) -> MsaaResolve {
        self.msaa_resolve
    }

    /// Whether mipmapped sampling is supported.
    pub fn mipmap_support(&self) -> bool {
        self.mipmap_support
    }

    /// Whether reading a surface with this descriptor as a texture first needs
    /// an explicit resolve of its multisampled contents.
    pub fn requires_manual_msaa_resolve(&self, descriptor: &SurfaceDescriptor) -> bool {
        self.msaa_resolve == MsaaResolve::Manual
            && descriptor.is_multisampled()
            && descriptor
                .usage
                .contains(SurfaceUsage::RENDER_TARGET | SurfaceUsage::TEXTURE)
    }

    /// The most expensive mip filter the device can apply to `format`.
    pub fn mipmap_filter_ceiling(&self, format: TextureFormat) -> MipmapMode {
        if !self.mipmap_support {
            MipmapMode::None
        } else if format.is_linear_filterable() {
            MipmapMode::Linear
        } else {
            MipmapMode::Nearest
        }
    }

    /// Clamp a requested mip filter to what the device supports for `format`.
    pub fn clamp_mipmap_mode(&self, format: TextureFormat, requested: MipmapMode) -> MipmapMode {
        requested.min(self.mipmap_filter_ceiling(format))
    }
}

impl Default for Caps {
    fn default() -> Self {
        Self::new()
    }
}
