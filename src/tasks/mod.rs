//! Background Tasks Module
//!
//! Tasks that run for the lifetime of the store server.
//!
//! # Tasks
//! - TTL Cleanup: Removes expired entries at configured intervals

mod cleanup;

pub use cleanup::spawn_cleanup_task;
