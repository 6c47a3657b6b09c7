//! A null config installs the default INFO filter.

use std::ptr;

use ext_fixtures::ext_error_t;
use ext_fixtures::logging::ext_log_init;
use log::{Level, LevelFilter, MetadataBuilder};

fn enabled(target: &str, level: Level) -> bool {
    log::logger().enabled(&MetadataBuilder::new().target(target).level(level).build())
}

#[test]
fn null_config_uses_defaults() {
    // Safety: this is the only test in the binary.
    unsafe { std::env::remove_var("RUST_LOG") };

    let mut error: *mut ext_error_t = ptr::null_mut();
    assert!(ext_log_init(ptr::null(), &mut error));
    assert!(error.is_null());

    assert_eq!(log::max_level(), LevelFilter::Info);
    assert!(enabled("ext_fixtures::quad", Level::Info));
    assert!(enabled("ext_sample", Level::Error));
    assert!(!enabled("ext_fixtures::quad", Level::Debug));
    assert!(!enabled("some_dependency", Level::Error));

    // A second call with defaults reuses the installed logger.
    assert!(ext_log_init(ptr::null(), ptr::null_mut()));
}
