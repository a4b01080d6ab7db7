//! Command pool recycling.
//!
//! Recording threads take pools from a [`CommandPoolProvider`], record into
//! them and submit. Once the GPU has signaled a submitted pool's fence and the
//! recorder dropped its reference, [`CommandPoolProvider::check_command_buffers`]
//! hands the pool to a reset step and, after the reset completes, makes it
//! available for reuse.
//!
//! Resets run on a background worker thread when configured. The provider's
//! pool lists are behind a re-entrant lock, so an inline reset may run while
//! the caller of `check_command_buffers` still holds it.

mod sync;

pub use sync::{Fence, FenceStatus};

use std::cell::RefCell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, mpsc};
use std::thread::JoinHandle;

use parking_lot::{Mutex, ReentrantMutex};
use redlilium_core::set_thread_name;

use crate::error::PoolError;

// ============================================================================
// Configuration
// ============================================================================

/// Settings for a [`CommandPoolProvider`].
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Reset pools on a worker thread instead of the calling thread.
    pub background_reset: bool,
    /// Name given to the worker thread.
    pub worker_thread_name: String,
}

impl PoolConfig {
    pub fn new() -> Self {
        Self {
            background_reset: true,
            worker_thread_name: "command-pool-reset".to_owned(),
        }
    }

    pub fn with_background_reset(mut self, enabled: bool) -> Self {
        self.background_reset = enabled;
        self
    }

    pub fn with_worker_thread_name(mut self, name: impl Into<String>) -> Self {
        self.worker_thread_name = name.into();
        self
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Command pool
// ============================================================================

#[derive(Debug)]
struct PoolState {
    open: bool,
    commands: Vec<String>,
    fence: Option<Fence>,
    reset_count: u32,
}

/// A pool of command buffers recorded by one thread at a time.
#[derive(Debug)]
pub struct CommandPool {
    id: u64,
    state: Mutex<PoolState>,
}

impl CommandPool {
    fn new(id: u64) -> Self {
        Self {
            id,
            state: Mutex::new(PoolState {
                open: true,
                commands: Vec::new(),
                fence: None,
                reset_count: 0,
            }),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Whether the pool still accepts commands.
    pub fn is_open(&self) -> bool {
        self.state.lock().open
    }

    /// Record a command.
    ///
    /// # Panics
    ///
    /// Panics if the pool was already submitted.
    pub fn record(&self, command: impl Into<String>) {
        let mut state = self.state.lock();
        assert!(state.open, "cannot record into submitted command pool {}", self.id);
        state.commands.push(command.into());
    }

    /// Number of commands recorded since the last reset.
    pub fn recorded_commands(&self) -> usize {
        self.state.lock().commands.len()
    }

    /// Close the pool and return the fence the device signals on completion.
    ///
    /// # Panics
    ///
    /// Panics if the pool was already submitted.
    pub fn submit(&self) -> Fence {
        let mut state = self.state.lock();
        assert!(state.open, "command pool {} submitted twice", self.id);
        state.open = false;
        let fence = Fence::new_unsignaled();
        state.fence = Some(fence.clone());
        log::trace!("Submitted command pool {} ({} commands)", self.id, state.commands.len());
        fence
    }

    /// Whether the pool was submitted and the device has finished with it.
    pub fn is_finished(&self) -> bool {
        let state = self.state.lock();
        !state.open && state.fence.as_ref().is_some_and(Fence::is_signaled)
    }

    /// How many times the pool has been reset.
    pub fn reset_count(&self) -> u32 {
        self.state.lock().reset_count
    }

    fn release_resources(&self) {
        self.state.lock().commands.clear();
    }

    fn reset(&self) {
        let mut state = self.state.lock();
        state.commands.clear();
        state.fence = None;
        state.open = true;
        state.reset_count += 1;
    }
}

// ============================================================================
// Provider
// ============================================================================

#[derive(Debug, Default)]
struct PoolLists {
    active: Vec<Arc<CommandPool>>,
    available: Vec<Arc<CommandPool>>,
}

#[derive(Debug, Default)]
struct Shared {
    lists: ReentrantMutex<RefCell<PoolLists>>,
    next_id: AtomicU64,
}

impl Shared {
    fn reset(&self, pool: Arc<CommandPool>) {
        debug_assert_eq!(Arc::strong_count(&pool), 1);
        pool.reset();
        log::trace!("Reset command pool {}", pool.id());
        let lists = self.lists.lock();
        lists.borrow_mut().available.push(pool);
    }
}

enum WorkerMessage {
    Reset(Arc<CommandPool>),
    Barrier(mpsc::Sender<()>),
}

struct ResetWorker {
    sender: mpsc::Sender<WorkerMessage>,
    handle: JoinHandle<()>,
}

impl ResetWorker {
    fn spawn(shared: Arc<Shared>, name: &str) -> std::io::Result<Self> {
        let (sender, receiver) = mpsc::channel::<WorkerMessage>();
        let thread_name = name.to_owned();
        let handle = std::thread::Builder::new()
            .name(thread_name.clone())
            .spawn(move || {
                set_thread_name!(thread_name.as_str());
                while let Ok(message) = receiver.recv() {
                    match message {
                        WorkerMessage::Reset(pool) => shared.reset(pool),
                        WorkerMessage::Barrier(done) => {
                            let _ = done.send(());
                        }
                    }
                }
                log::debug!("Command pool reset worker exiting");
            })?;
        Ok(Self { sender, handle })
    }
}

/// Hands out command pools and recycles them once the GPU is done.
pub struct CommandPoolProvider {
    shared: Arc<Shared>,
    worker: Option<ResetWorker>,
}

impl CommandPoolProvider {
    /// Create a provider. If the worker thread cannot be spawned, resets run
    /// inline.
    pub fn new(config: PoolConfig) -> Self {
        let shared = Arc::new(Shared::default());
        let worker = if config.background_reset {
            match ResetWorker::spawn(Arc::clone(&shared), &config.worker_thread_name) {
                Ok(worker) => Some(worker),
                Err(err) => {
                    log::warn!("Failed to spawn command pool reset worker: {err}; resetting inline");
                    None
                }
            }
        } else {
            None
        };
        Self { shared, worker }
    }

    /// Whether resets run on a worker thread.
    pub fn has_background_worker(&self) -> bool {
        self.worker.is_some()
    }

    /// Take an available pool, or create one, and register it as active.
    pub fn find_or_create_command_pool(&self) -> Arc<CommandPool> {
        let lists = self.shared.lists.lock();
        let mut lists = lists.borrow_mut();
        let pool = match lists.available.pop() {
            Some(pool) => pool,
            None => {
                let id = self.shared.next_id.fetch_add(1, Ordering::Relaxed);
                log::debug!("Created command pool {id}");
                Arc::new(CommandPool::new(id))
            }
        };
        debug_assert_eq!(Arc::strong_count(&pool), 1);
        debug_assert!(!lists.active.iter().any(|p| Arc::ptr_eq(p, &pool)));
        lists.active.push(Arc::clone(&pool));
        pool
    }

    /// Recycle every active pool that is submitted, finished on the GPU and
    /// no longer referenced by a recorder. Returns how many were recycled.
    pub fn check_command_buffers(&self) -> usize {
        let guard = self.shared.lists.lock();
        let finished: Vec<Arc<CommandPool>> = {
            let mut lists = guard.borrow_mut();
            let mut finished = Vec::new();
            for i in (0..lists.active.len()).rev() {
                let pool = &lists.active[i];
                if !pool.is_open() && pool.is_finished() && Arc::strong_count(pool) == 1 {
                    finished.push(lists.active.swap_remove(i));
                }
            }
            finished
        };

        let count = finished.len();
        for pool in finished {
            self.background_reset(pool);
        }
        drop(guard);
        count
    }

    fn background_reset(&self, pool: Arc<CommandPool>) {
        pool.release_resources();
        match &self.worker {
            Some(worker) => {
                if let Err(mpsc::SendError(WorkerMessage::Reset(pool))) =
                    worker.sender.send(WorkerMessage::Reset(pool))
                {
                    log::warn!("Command pool reset worker is gone; resetting inline");
                    self.shared.reset(pool);
                }
            }
            None => self.shared.reset(pool),
        }
    }

    /// Block until every reset queued so far has completed.
    pub fn wait_for_background_resets(&self) -> Result<(), PoolError> {
        let Some(worker) = &self.worker else {
            return Ok(());
        };
        let (done_tx, done_rx) = mpsc::channel();
        worker
            .sender
            .send(WorkerMessage::Barrier(done_tx))
            .map_err(|_| PoolError::WorkerUnavailable)?;
        done_rx.recv().map_err(|_| PoolError::WorkerUnavailable)
    }

    /// Pools handed out and not yet recycled.
    pub fn active_count(&self) -> usize {
        self.shared.lists.lock().borrow().active.len()
    }

    /// Reset pools ready for reuse.
    pub fn available_count(&self) -> usize {
        self.shared.lists.lock().borrow().available.len()
    }

    /// Drop every pool the provider tracks.
    ///
    /// Fails without dropping anything if a recorder still holds an active pool.
    pub fn destroy_resources(&self) -> Result<(), PoolError> {
        self.wait_for_background_resets()?;
        let guard = self.shared.lists.lock();
        let mut lists = guard.borrow_mut();
        if let Some(pool) = lists.active.iter().find(|pool| Arc::strong_count(pool) > 1) {
            return Err(PoolError::PoolStillReferenced(pool.id()));
        }
        log::debug!(
            "Destroying {} active and {} available command pools",
            lists.active.len(),
            lists.available.len()
        );
        lists.active.clear();
        lists.available.clear();
        Ok(())
    }
}

impl Drop for CommandPoolProvider {
    fn drop(&mut self) {
        if let Some(ResetWorker { sender, handle }) = self.worker.take() {
            drop(sender);
            if handle.join().is_err() {
                log::error!("Command pool reset worker panicked");
            }
        }
    }
}

impl Default for CommandPoolProvider {
    fn default() -> Self {
        Self::new(PoolConfig::default())
    }
}
