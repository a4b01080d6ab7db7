//! Surface descriptors.

use bitflags::bitflags;

use super::Extent2d;
use redlilium_core::texture::TextureFormat;

bitflags! {
    /// How a surface may be used by render tasks.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SurfaceUsage: u32 {
        /// Surface can be rendered into.
        const RENDER_TARGET = 1 << 0;
        /// Surface can be sampled as a texture.
        const TEXTURE = 1 << 1;
    }
}

impl Default for SurfaceUsage {
    fn default() -> Self {
        Self::TEXTURE
    }
}

/// Whether a surface has (or a read needs) a full mip chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mipmapped {
    /// Base level only.
    #[default]
    No,
    /// Full mip chain.
    Yes,
}

/// Descriptor for creating a surface proxy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SurfaceDescriptor {
    /// Debug label for the surface.
    pub label: Option<String>,
    /// Size of the base level.
    pub size: Extent2d,
    /// Texel format.
    pub format: TextureFormat,
    /// Mip level count.
    pub mip_level_count: u32,
    /// Sample count for multisampling.
    pub sample_count: u32,
    /// Usage flags.
    pub usage: SurfaceUsage,
}

impl SurfaceDescriptor {
    /// Create a descriptor for a single-sampled, single-level surface.
    pub fn new(width: u32, height: u32, format: TextureFormat, usage: SurfaceUsage) -> Self {
        Self {
            label: None,
            size: Extent2d::new(width, height),
            format,
            mip_level_count: 1,
            sample_count: 1,
            usage,
        }
    }

    /// Shorthand for a sampled surface that can also be rendered into.
    pub fn render_texture(width: u32, height: u32, format: TextureFormat) -> Self {
        Self::new(
            width,
            height,
            format,
            SurfaceUsage::RENDER_TARGET | SurfaceUsage::TEXTURE,
        )
    }

    /// Set the debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the mip level count.
    pub fn with_mip_levels(mut self, count: u32) -> Self {
        self.mip_level_count = count;
        self
    }

    /// Set the sample count for multisampling.
    pub fn with_sample_count(mut self, count: u32) -> Self {
        self.sample_count = count;
        self
    }

    /// Whether the surface stores a mip chain.
    pub fn mipmapped(&self) -> Mipmapped {
        if self.mip_level_count > 1 {
            Mipmapped::Yes
        } else {
            Mipmapped::No
        }
    }

    /// Whether the surface is multisampled.
    pub fn is_multisampled(&self) -> bool {
        self.sample_count > 1
    }
}
