//! Texture format vocabulary.
//!
//! Provides [`TextureFormat`], shared between CPU-side code and the render
//! task graph, together with the format queries the capability checks need.

/// Texture format enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum TextureFormat {
    /// 8-bit red channel, unsigned normalized.
    R8Unorm,
    /// 8-bit red channel, unsigned integer.
    R8Uint,
    /// 8-bit RG channels, unsigned normalized.
    Rg8Unorm,
    /// 32-bit red channel, float.
    R32Float,
    /// 32-bit red channel, unsigned integer.
    R32Uint,
    /// 8-bit RGBA channels, unsigned normalized.
    #[default]
    Rgba8Unorm,
    /// 8-bit RGBA channels, sRGB.
    Rgba8UnormSrgb,
    /// 8-bit BGRA channels, unsigned normalized.
    Bgra8Unorm,
    /// 16-bit RGBA channels, float.
    Rgba16Float,
    /// 32-bit RGBA channels, float.
    Rgba32Float,
    /// 32-bit RGBA channels, unsigned integer.
    Rgba32Uint,
    /// 24-bit depth with 8-bit stencil.
    Depth24PlusStencil8,
    /// 32-bit depth, float.
    Depth32Float,
}

impl TextureFormat {
    /// Returns true if this is a depth or stencil format.
    pub fn is_depth_stencil(&self) -> bool {
        matches!(self, Self::Depth24PlusStencil8 | Self::Depth32Float)
    }

    /// Returns true if texels are read back as integers.
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::R8Uint | Self::R32Uint | Self::Rgba32Uint)
    }

    /// Returns true if the format supports linear filtering between texels.
    ///
    /// Integer, depth and 32-bit float formats only filter with nearest.
    pub fn is_linear_filterable(&self) -> bool {
        !(self.is_integer()
            || self.is_depth_stencil()
            || matches!(self, Self::R32Float | Self::Rgba32Float))
    }

    /// Returns the size in bytes per texel.
    pub fn block_size(&self) -> u32 {
        match self {
            Self::R8Unorm | Self::R8Uint => 1,
            Self::Rg8Unorm => 2,
            Self::R32Float
            | Self::R32Uint
            | Self::Rgba8Unorm
            | Self::Rgba8UnormSrgb
            | Self::Bgra8Unorm
            | Self::Depth24PlusStencil8
            | Self::Depth32Float => 4,
            Self::Rgba16Float => 8,
            Self::Rgba32Float | Self::Rgba32Uint => 16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filterability() {
        assert!(TextureFormat::Rgba8Unorm.is_linear_filterable());
        assert!(TextureFormat::Rgba16Float.is_linear_filterable());
        assert!(!TextureFormat::R32Uint.is_linear_filterable());
        assert!(!TextureFormat::Depth32Float.is_linear_filterable());
        assert!(!TextureFormat::Rgba32Float.is_linear_filterable());
    }

    #[test]
    fn test_block_size() {
        assert_eq!(TextureFormat::R8Unorm.block_size(), 1);
        assert_eq!(TextureFormat::Rgba8Unorm.block_size(), 4);
        assert_eq!(TextureFormat::Rgba32Uint.block_size(), 16);
    }
}
