//! File System Helpers

mod local;

pub use local::write_atomic;
