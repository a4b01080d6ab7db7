//! Shared helpers for render task integration tests.

use redlilium_render_tasks::{
    Caps, DrawingManager, IRect, MsaaResolve, SurfaceDescriptor, SurfaceHandle, TaskHandle,
    TextureFormat,
};

/// Route crate logs to the test harness output. Safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Device capability presets the tests run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    /// Multisampled surfaces resolve automatically.
    AutoResolve,
    /// Multisampled surfaces need an explicit resolve before sampling.
    ManualResolve,
}

impl Device {
    pub fn caps(self) -> Caps {
        match self {
            Device::AutoResolve => Caps::new(),
            Device::ManualResolve => Caps::new().with_msaa_resolve(MsaaResolve::Manual),
        }
    }

    pub fn manager(self) -> DrawingManager {
        init_logging();
        DrawingManager::new(self.caps())
    }
}

/// A single-sampled render texture without mipmaps.
pub fn flat_target(manager: &mut DrawingManager, size: u32) -> SurfaceHandle {
    manager.create_surface(
        SurfaceDescriptor::render_texture(size, size, TextureFormat::Rgba8Unorm)
            .with_label("flat"),
    )
}

/// A 4x multisampled render texture.
pub fn msaa_target(manager: &mut DrawingManager, size: u32) -> SurfaceHandle {
    manager.create_surface(
        SurfaceDescriptor::render_texture(size, size, TextureFormat::Rgba8Unorm)
            .with_sample_count(4)
            .with_label("msaa"),
    )
}

/// A render texture with a full mip chain.
pub fn mipmapped_target(manager: &mut DrawingManager, size: u32) -> SurfaceHandle {
    let levels = 32 - size.leading_zeros();
    manager.create_surface(
        SurfaceDescriptor::render_texture(size, size, TextureFormat::Rgba8Unorm)
            .with_mip_levels(levels)
            .with_label("mipmapped"),
    )
}

/// Open an ops task on `target` that draws over its whole area.
pub fn draw_full(manager: &mut DrawingManager, target: SurfaceHandle) -> TaskHandle {
    let size = manager.surface(target).descriptor().size;
    let task = manager.new_ops_task(target.into());
    manager.record_op(
        task,
        IRect::from_xywh(0, 0, size.width as i32, size.height as i32),
    );
    task
}
