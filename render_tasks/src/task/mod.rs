//! Render task nodes.
//!
//! A [`RenderTask`] is one schedulable unit of GPU work. It writes a list of
//! target surfaces and must execute after every task in its dependency list.
//! Tasks live in the arena of a [`DrawingManager`](crate::DrawingManager) and
//! refer to each other through [`TaskHandle`]s, so the dependents list is a
//! plain back-reference, not shared ownership.
//!
//! Every task moves through `Open -> Closed -> Disowned`. While open it accepts
//! targets and dependencies. Closing runs the variant's closing hook once and
//! freezes the task. Disowning releases its claim on the surfaces it last wrote.

mod atlas;
mod kind;
mod resolve;

pub use atlas::AtlasTask;
pub use kind::{CopyTask, ExpectedOutcome, OpsTask, RenderTaskKind, TransferFromTask};
pub use resolve::{Resolve, ResolveFlags, TextureResolveTask};

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use bitflags::bitflags;

use crate::surface::SurfaceHandle;
use crate::types::SurfaceOrigin;

/// Process-unique identity of a render task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderTaskId(u32);

impl RenderTaskId {
    /// Reserved value no task is ever given.
    pub const INVALID: RenderTaskId = RenderTaskId(0);

    /// Allocate the next id, skipping [`RenderTaskId::INVALID`] on wraparound.
    pub fn next() -> Self {
        static NEXT_ID: AtomicU32 = AtomicU32::new(1);
        loop {
            let id = RenderTaskId(NEXT_ID.fetch_add(1, Ordering::Relaxed));
            if id != Self::INVALID {
                return id;
            }
        }
    }

    /// Raw id value.
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for RenderTaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle to a task in a [`DrawingManager`](crate::DrawingManager).
///
/// `TaskHandle` is `Copy` and cheap to pass around. It is only valid within
/// the manager that created it, until the manager is purged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u32);

impl TaskHandle {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A surface as seen by a task writing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceView {
    /// The surface written.
    pub surface: SurfaceHandle,
    /// Row orientation the task renders with.
    pub origin: SurfaceOrigin,
}

impl SurfaceView {
    /// View with the default top-left origin.
    pub fn new(surface: SurfaceHandle) -> Self {
        Self {
            surface,
            origin: SurfaceOrigin::TopLeft,
        }
    }

    /// Set the row orientation.
    pub fn with_origin(mut self, origin: SurfaceOrigin) -> Self {
        self.origin = origin;
        self
    }
}

impl From<SurfaceHandle> for SurfaceView {
    fn from(surface: SurfaceHandle) -> Self {
        Self::new(surface)
    }
}

bitflags! {
    /// Lifecycle flags of a render task.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TaskFlags: u8 {
        /// No further targets or dependencies may be added.
        const CLOSED = 1 << 0;
        /// Released by the manager after execution.
        const DISOWNED = 1 << 1;
    }
}

/// A node in the render task graph.
#[derive(Debug)]
pub struct RenderTask {
    id: RenderTaskId,
    pub(crate) kind: RenderTaskKind,
    pub(crate) targets: Vec<SurfaceView>,
    pub(crate) dependencies: Vec<TaskHandle>,
    pub(crate) dependents: Vec<TaskHandle>,
    pub(crate) flags: TaskFlags,
    pub(crate) deferred_proxies: Vec<SurfaceHandle>,
    pub(crate) texture_resolve_task: Option<TaskHandle>,
}

impl RenderTask {
    pub(crate) fn new(kind: RenderTaskKind) -> Self {
        Self {
            id: RenderTaskId::next(),
            kind,
            targets: Vec::new(),
            dependencies: Vec::new(),
            dependents: Vec::new(),
            flags: TaskFlags::empty(),
            deferred_proxies: Vec::new(),
            texture_resolve_task: None,
        }
    }

    /// Unique id of the task.
    pub fn id(&self) -> RenderTaskId {
        self.id
    }

    /// Variant name used in diagnostics.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// The variant-specific state.
    pub fn kind(&self) -> &RenderTaskKind {
        &self.kind
    }

    /// Surfaces written by the task, in the order they were added.
    pub fn targets(&self) -> &[SurfaceView] {
        &self.targets
    }

    /// Number of targets.
    pub fn num_targets(&self) -> usize {
        self.targets.len()
    }

    /// Target at `index`.
    pub fn target(&self, index: usize) -> SurfaceView {
        self.targets[index]
    }

    /// Tasks this task executes after.
    pub fn dependencies(&self) -> &[TaskHandle] {
        &self.dependencies
    }

    /// Tasks that execute after this task.
    pub fn dependents(&self) -> &[TaskHandle] {
        &self.dependents
    }

    /// Whether `task` is a direct dependency. Transitive dependencies are not considered.
    pub fn depends_on(&self, task: TaskHandle) -> bool {
        self.dependencies.contains(&task)
    }

    /// Whether `task` is a direct dependent.
    pub fn is_dependent(&self, task: TaskHandle) -> bool {
        self.dependents.contains(&task)
    }

    /// Whether the task has been closed.
    pub fn is_closed(&self) -> bool {
        self.flags.contains(TaskFlags::CLOSED)
    }

    /// Whether the task has been disowned.
    pub fn is_disowned(&self) -> bool {
        self.flags.contains(TaskFlags::DISOWNED)
    }

    /// Lifecycle flags.
    pub fn flags(&self) -> TaskFlags {
        self.flags
    }

    /// Lazily uploaded textures read by this task.
    pub fn deferred_proxies(&self) -> &[SurfaceHandle] {
        &self.deferred_proxies
    }

    /// The private resolve task that will run before this task, if one was created.
    pub fn texture_resolve_task(&self) -> Option<TaskHandle> {
        self.texture_resolve_task
    }
}
