//! # RedLilium Render Tasks
//!
//! Dependency graph of GPU render tasks recorded for one flush.
//!
//! ## Overview
//!
//! This crate provides:
//! - [`DrawingManager`] - Owns tasks and surfaces, tracks the last writer of
//!   every surface and orders readers after writers
//! - [`RenderTask`] - A node in the graph: draw, copy, readback, atlas or
//!   texture resolve work writing a list of targets
//! - [`TextureResolveTask`] - Injected automatically when a read needs an MSAA
//!   resolve or mipmap regeneration first
//! - [`CommandPoolProvider`] - Recycles command pools once the GPU is done
//!   with them
//!
//! ## Example
//!
//! ```
//! use redlilium_render_tasks::{
//!     Caps, DrawingManager, FlushState, IRect, Mipmapped, MsaaResolve, SurfaceDescriptor,
//!     TextureFormat,
//! };
//!
//! let caps = Caps::new().with_msaa_resolve(MsaaResolve::Manual);
//! let mut manager = DrawingManager::new(caps);
//!
//! let offscreen = manager.create_surface(
//!     SurfaceDescriptor::render_texture(256, 256, TextureFormat::Rgba8Unorm).with_sample_count(4),
//! );
//! let backbuffer = manager.create_surface(
//!     SurfaceDescriptor::render_texture(1280, 720, TextureFormat::Bgra8Unorm),
//! );
//!
//! let draw = manager.new_ops_task(offscreen.into());
//! manager.record_op(draw, IRect::from_xywh(0, 0, 256, 256));
//!
//! let composite = manager.new_ops_task(backbuffer.into());
//! manager.add_surface_dependency(composite, offscreen, Mipmapped::No);
//!
//! let mut state = FlushState::new();
//! let order = manager.flush(&mut state).unwrap();
//! assert_eq!(order.len(), 3);
//! assert_eq!(order[0], draw);
//! assert_eq!(order[2], composite);
//! ```

pub mod caps;
pub mod config;
pub mod error;
pub mod manager;
pub mod pool;
pub mod surface;
pub mod task;
pub mod types;

// Re-export main types for convenience
pub use caps::{Caps, MsaaResolve};
pub use config::{CycleCheck, DumpVerbosity, TaskGraphConfig};
pub use error::{GraphError, PoolError};
pub use manager::{DrawingManager, FlushState};
pub use pool::{CommandPool, CommandPoolProvider, Fence, FenceStatus, PoolConfig};
pub use surface::{BackingSurface, SurfaceHandle, SurfaceProxy};
pub use task::{
    AtlasTask, CopyTask, ExpectedOutcome, OpsTask, RenderTask, RenderTaskId, RenderTaskKind,
    Resolve, ResolveFlags, SurfaceView, TaskFlags, TaskHandle, TextureResolveTask,
    TransferFromTask,
};
pub use types::{
    Extent2d, IRect, Mipmapped, SurfaceDescriptor, SurfaceOrigin, SurfaceUsage, TextureFormat,
};

static_assertions::assert_impl_all!(CommandPoolProvider: Send, Sync);
static_assertions::assert_impl_all!(CommandPool: Send, Sync);
static_assertions::assert_impl_all!(TaskHandle: Copy, Send, Sync);

/// Render tasks library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the crate version.
pub fn init() {
    log::info!("RedLilium Render Tasks v{} initialized", VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_empty_manager_flushes() {
        let mut manager = DrawingManager::new(Caps::new());
        let mut state = FlushState::new();
        assert!(manager.flush(&mut state).unwrap().is_empty());
        assert_eq!(manager.purge(), Ok(()));
    }
}
