pub mod clock;
pub mod config;
pub mod desk;
pub mod error;
pub mod queue;
pub mod refresh;
pub mod roster;
pub mod store;

// Public API
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use desk::{Desk, ScanKind, ScanOutcome, Snapshot};
pub use error::MessError;
pub use queue::{Capacity, EntryStatus, QueueEngine, QueueEntry, QueueStats};
pub use refresh::Refresher;
pub use roster::{Person, Roster};
pub use store::{FileStore, MemoryStore, Store};
