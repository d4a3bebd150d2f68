//! Library lifecycle specs
//!
//! Verify the process-wide init/shutdown sequence. The lifecycle is global,
//! so the whole sequence lives in one test.

use cog_core::{init_default, is_inited, shutdown, LifecycleError};
use similar_asserts::assert_eq;

#[test]
fn init_then_shutdown_once() {
    assert!(!is_inited());
    assert_eq!(shutdown(), Err(LifecycleError::NotInitialized));

    init_default().unwrap();
    assert!(is_inited());
    assert_eq!(init_default(), Err(LifecycleError::AlreadyInitialized));

    shutdown().unwrap();
    assert!(!is_inited());
    assert_eq!(shutdown(), Err(LifecycleError::ShutDown));
    assert_eq!(init_default(), Err(LifecycleError::ShutDown));
}
