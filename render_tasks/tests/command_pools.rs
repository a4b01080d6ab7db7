//! Integration tests for command pool recycling across recording threads.

mod common;

use std::sync::Arc;
use std::thread;

use rstest::rstest;

use redlilium_render_tasks::{CommandPoolProvider, Fence, PoolConfig};

#[rstest]
#[case::inline(false)]
#[case::background(true)]
fn test_pools_recycled_across_threads(#[case] background: bool) {
    common::init_logging();
    let provider = Arc::new(CommandPoolProvider::new(
        PoolConfig::new()
            .with_background_reset(background)
            .with_worker_thread_name("test-pool-reset"),
    ));

    let fences: Vec<Fence> = (0..4)
        .map(|i| {
            let provider = Arc::clone(&provider);
            thread::spawn(move || {
                let pool = provider.find_or_create_command_pool();
                pool.record(format!("draw {i}"));
                pool.record(format!("copy {i}"));
                pool.submit()
            })
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    assert_eq!(provider.active_count(), 4);

    fences[0].signal();
    fences[2].signal();
    assert_eq!(provider.check_command_buffers(), 2);
    provider.wait_for_background_resets().unwrap();
    assert_eq!(provider.active_count(), 2);
    assert_eq!(provider.available_count(), 2);

    for fence in &fences {
        fence.signal();
    }
    assert_eq!(provider.check_command_buffers(), 2);
    provider.wait_for_background_resets().unwrap();
    assert_eq!(provider.available_count(), 4);

    let reused = provider.find_or_create_command_pool();
    assert_eq!(reused.reset_count(), 1);
    assert!(reused.is_open());
}

#[test]
fn test_unfinished_pool_stays_active() {
    common::init_logging();
    let provider = CommandPoolProvider::new(PoolConfig::new().with_background_reset(false));
    let pool = provider.find_or_create_command_pool();
    let _fence = pool.submit();
    drop(pool);

    assert_eq!(provider.check_command_buffers(), 0);
    assert_eq!(provider.active_count(), 1);
    assert_eq!(provider.available_count(), 0);
}

#[test]
fn test_provider_drop_joins_worker() {
    common::init_logging();
    let provider = CommandPoolProvider::default();
    assert!(provider.has_background_worker());
    let pool = provider.find_or_create_command_pool();
    pool.submit().signal();
    drop(pool);
    assert_eq!(provider.check_command_buffers(), 1);
    drop(provider);
}
