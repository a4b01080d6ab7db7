//! CPU-side view of GPU completion.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Whether the GPU has finished the work a [`Fence`] guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceStatus {
    /// Work is still in flight.
    Unsignaled,
    /// Work has completed.
    Signaled,
}

/// Completion flag for one command pool submission.
///
/// Clones share the same flag: the submitter keeps one and the device (or a
/// test) signals another.
#[derive(Debug, Clone)]
pub struct Fence {
    signaled: Arc<AtomicBool>,
}

impl Fence {
    /// A fence for work that has not completed yet.
    pub fn new_unsignaled() -> Self {
        Self {
            signaled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A fence for work that is already complete.
    pub fn new_signaled() -> Self {
        Self {
            signaled: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn status(&self) -> FenceStatus {
        if self.signaled.load(Ordering::Acquire) {
            FenceStatus::Signaled
        } else {
            FenceStatus::Unsignaled
        }
    }

    /// Non-blocking completion check.
    pub fn is_signaled(&self) -> bool {
        self.status() == FenceStatus::Signaled
    }

    /// Spin until signaled or `timeout` elapses. Returns whether it was signaled.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let start = Instant::now();
        while !self.signaled.load(Ordering::Acquire) {
            if start.elapsed() >= timeout {
                return false;
            }
            std::hint::spin_loop();
        }
        true
    }

    /// Mark the guarded work complete.
    pub fn signal(&self) {
        self.signaled.store(true, Ordering::Release);
    }

    /// Return to the unsignaled state for reuse.
    pub fn reset(&self) {
        self.signaled.store(false, Ordering::Release);
    }
}

impl Default for Fence {
    fn default() -> Self {
        Self::new_unsignaled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let fence = Fence::new_unsignaled();
        let device_side = fence.clone();
        assert_eq!(fence.status(), FenceStatus::Unsignaled);

        device_side.signal();
        assert!(fence.is_signaled());

        fence.reset();
        assert!(!device_side.is_signaled());
    }

    #[test]
    fn test_wait_for_other_thread() {
        let fence = Fence::new_unsignaled();
        let device_side = fence.clone();
        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(5));
            device_side.signal();
        });

        assert!(fence.wait_timeout(Duration::from_secs(5)));
        handle.join().unwrap();
    }

    #[test]
    fn test_wait_times_out() {
        let fence = Fence::default();
        assert!(!fence.wait_timeout(Duration::from_millis(5)));
        assert!(Fence::new_signaled().wait_timeout(Duration::ZERO));
    }
}
