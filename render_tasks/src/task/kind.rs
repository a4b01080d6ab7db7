//! The closed set of render task variants.

use crate::surface::SurfaceHandle;
use crate::types::IRect;

use super::{AtlasTask, TextureResolveTask};

/// What closing a task did to its primary target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedOutcome {
    /// The target's contents are unchanged.
    TargetUnaffected,
    /// The given region of the target was written.
    TargetDirty(IRect),
}

/// Variant-specific state of a render task.
#[derive(Debug)]
pub enum RenderTaskKind {
    /// Draw operations into a render target.
    Ops(OpsTask),
    /// MSAA resolves and mipmap regeneration.
    TextureResolve(TextureResolveTask),
    /// Surface-to-surface copy.
    Copy(CopyTask),
    /// Readback of a surface region into a buffer.
    TransferFrom(TransferFromTask),
    /// Paths packed into an atlas texture.
    Atlas(AtlasTask),
}

impl RenderTaskKind {
    /// Variant name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ops(_) => "OpsTask",
            Self::TextureResolve(_) => "TextureResolveTask",
            Self::Copy(_) => "CopyTask",
            Self::TransferFrom(_) => "TransferFromTask",
            Self::Atlas(_) => "AtlasTask",
        }
    }

    /// Finalize recorded work when the task closes.
    ///
    /// `target_bounds` covers the primary target, or is `None` for tasks
    /// without targets. Reported dirty regions are clipped to it.
    pub(crate) fn on_make_closed(&mut self, target_bounds: Option<IRect>) -> ExpectedOutcome {
        let written = match self {
            Self::Ops(ops) => ops.bounds(),
            Self::TextureResolve(_) | Self::TransferFrom(_) => None,
            Self::Copy(copy) => Some(copy.dst_rect()),
            Self::Atlas(atlas) => atlas.on_make_closed(),
        };
        match (written, target_bounds) {
            (Some(written), Some(bounds)) => written
                .intersect(&bounds)
                .map_or(ExpectedOutcome::TargetUnaffected, ExpectedOutcome::TargetDirty),
            _ => ExpectedOutcome::TargetUnaffected,
        }
    }

    /// The variant as a resolve task, if it is one.
    pub fn as_texture_resolve(&self) -> Option<&TextureResolveTask> {
        if let Self::TextureResolve(task) = self {
            Some(task)
        } else {
            None
        }
    }

    /// The variant as an ops task, if it is one.
    pub fn as_ops(&self) -> Option<&OpsTask> {
        if let Self::Ops(task) = self {
            Some(task)
        } else {
            None
        }
    }

    /// The variant as an atlas task, if it is one.
    pub fn as_atlas(&self) -> Option<&AtlasTask> {
        if let Self::Atlas(task) = self {
            Some(task)
        } else {
            None
        }
    }
}

// ============================================================================
// Ops
// ============================================================================

/// Draw operations recorded against a render target.
#[derive(Debug, Default)]
pub struct OpsTask {
    op_bounds: Vec<IRect>,
}

impl OpsTask {
    /// Create an empty ops task.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_op(&mut self, bounds: IRect) {
        self.op_bounds.push(bounds);
    }

    /// Number of recorded ops.
    pub fn num_ops(&self) -> usize {
        self.op_bounds.len()
    }

    /// Union of all recorded op bounds, or `None` if nothing was recorded.
    pub fn bounds(&self) -> Option<IRect> {
        self.op_bounds
            .iter()
            .copied()
            .reduce(|acc, rect| acc.union(&rect))
    }
}

// ============================================================================
// Copy
// ============================================================================

/// Copies a region of one surface into the task's target.
#[derive(Debug, Clone, Copy)]
pub struct CopyTask {
    /// Surface read.
    pub src: SurfaceHandle,
    /// Region of the source copied.
    pub src_rect: IRect,
    /// Top-left corner of the destination region.
    pub dst_point: (i32, i32),
}

impl CopyTask {
    /// Region of the target written.
    pub fn dst_rect(&self) -> IRect {
        IRect::from_xywh(
            self.dst_point.0,
            self.dst_point.1,
            self.src_rect.width(),
            self.src_rect.height(),
        )
    }
}

// ============================================================================
// Transfer from
// ============================================================================

/// Reads a surface region back into a CPU-visible buffer. Has no targets.
#[derive(Debug, Clone)]
pub struct TransferFromTask {
    /// Surface read.
    pub src: SurfaceHandle,
    /// Region read.
    pub src_rect: IRect,
    /// Label of the destination buffer.
    pub dst_buffer: String,
}
