//! Shared helpers for the test suites: a scripted in-memory database and a small set
//! of mapped entities.

pub mod database;
pub mod entities;

/// Route log output through the test harness.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
