//! Filesystem utilities for kolmsg.
//!
//! Store and config files are always replaced atomically so an interrupted
//! write never leaves a half-written preset list behind.

pub mod atomic;

pub use atomic::atomic_write;
pub use atomic::atomic_write_file;
