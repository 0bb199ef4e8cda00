use crate::queue::{Capacity, MESS_CAPACITY, QUEUE_CAPACITY};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct QueueConfig {
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    #[serde(default = "default_mess_capacity")]
    pub mess_capacity: usize,
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
            mess_capacity: default_mess_capacity(),
            refresh_interval_secs: default_refresh_interval_secs(),
        }
    }
}

impl QueueConfig {
    pub fn capacity(&self) -> Capacity {
        Capacity {
            queue: self.queue_capacity,
            mess: self.mess_capacity,
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

fn default_queue_capacity() -> usize {
    QUEUE_CAPACITY
}

fn default_mess_capacity() -> usize {
    MESS_CAPACITY
}

fn default_refresh_interval_secs() -> u64 {
    30
}
