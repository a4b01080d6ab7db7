//! Plain data types shared across the render task graph.

mod common;
mod surface;

pub use common::{Extent2d, IRect, SurfaceOrigin};
pub use surface::{Mipmapped, SurfaceDescriptor, SurfaceUsage};
pub use redlilium_core::texture::TextureFormat;
