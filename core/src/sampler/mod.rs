//! Sampler filter vocabulary.
//!
//! Provides [`FilterMode`] for texel filtering and [`MipmapMode`] for filtering
//! between mip levels, shared between CPU and GPU code.

/// Texture filtering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterMode {
    /// Nearest neighbor filtering.
    #[default]
    Nearest,
    /// Linear filtering.
    Linear,
}

/// Filtering between mip levels.
///
/// Variants are ordered by cost, so a requested mode can be clamped to a
/// ceiling with [`Ord::min`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum MipmapMode {
    /// Only the base level is sampled.
    #[default]
    None,
    /// The nearest mip level is sampled.
    Nearest,
    /// Two mip levels are sampled and blended.
    Linear,
}

impl MipmapMode {
    /// Returns true if sampling with this mode reads levels beyond the base.
    pub fn uses_mipmaps(self) -> bool {
        self != Self::None
    }
}

/// Sampling parameters relevant to dependency tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SamplerState {
    /// Minification/magnification filter.
    pub filter: FilterMode,
    /// Mip level filter.
    pub mipmap_mode: MipmapMode,
}

impl SamplerState {
    /// Create a sampler state.
    pub fn new(filter: FilterMode, mipmap_mode: MipmapMode) -> Self {
        Self {
            filter,
            mipmap_mode,
        }
    }

    /// Create a trilinear sampler state.
    pub fn trilinear() -> Self {
        Self::new(FilterMode::Linear, MipmapMode::Linear)
    }

    /// Replace the mipmap mode.
    pub fn with_mipmap_mode(mut self, mipmap_mode: MipmapMode) -> Self {
        self.mipmap_mode = mipmap_mode;
        self
    }
}
