//! # RedLilium Engine Core
//!
//! Core crate for RedLilium Engine basic utilities: the texture format and
//! sampler vocabulary shared by CPU and GPU code, and profiling macros.

pub mod profiling;
pub mod sampler;
pub mod texture;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the core crate version.
pub fn init() {
    log::info!("RedLilium Core v{} initialized", VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
