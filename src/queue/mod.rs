//! Two-stage dining queue
//!
//! This module provides:
//! - Queue entries and their status transitions
//! - The engine applying scans and FIFO advancement from queue to mess
//! - Statistics derived from the entry collection

pub mod engine;
pub mod entry;
pub mod stats;

pub use engine::{Counts, QueueEngine};
pub use entry::{EntryStatus, QueueEntry};
pub use stats::QueueStats;

pub const QUEUE_CAPACITY: usize = 7;
pub const MESS_CAPACITY: usize = 20;

/// Slots available in each stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    pub queue: usize,
    pub mess: usize,
}

impl Default for Capacity {
    fn default() -> Self {
        Self {
            queue: QUEUE_CAPACITY,
            mess: MESS_CAPACITY,
        }
    }
}
