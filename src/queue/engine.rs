//! Queue engine applying scans and advancement over the persisted entries
//!
//! Every operation reads the whole collection, computes, and writes the whole
//! collection back at most once.

use super::entry::{EntryStatus, QueueEntry};
use super::stats::{count_with_status, QueueStats};
use super::Capacity;
use crate::clock::{Clock, SystemClock};
use crate::error::{MessError, Result};
use crate::store::{Store, QUEUE_KEY};
use chrono::{DateTime, Local, TimeZone, Utc};
use tracing::{debug, info};

/// Live occupancy of both stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counts {
    pub queue_count: usize,
    pub mess_count: usize,
}

impl Counts {
    fn of(entries: &[QueueEntry]) -> Self {
        Self {
            queue_count: count_with_status(entries, EntryStatus::InQueue),
            mess_count: count_with_status(entries, EntryStatus::InMess),
        }
    }
}

pub struct QueueEngine<'a, S: Store + ?Sized> {
    store: &'a S,
    clock: Box<dyn Clock>,
    capacity: Capacity,
}

impl<'a, S: Store + ?Sized> QueueEngine<'a, S> {
    /// Engine with the default capacities and the wall clock
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            clock: Box::new(SystemClock),
            capacity: Capacity::default(),
        }
    }

    pub fn with_capacity(mut self, capacity: Capacity) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Current instant on the engine's clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// All entries in insertion order
    pub fn entries(&self) -> Result<Vec<QueueEntry>> {
        match self.store.read(QUEUE_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, entries: &[QueueEntry]) -> Result<()> {
        debug!("Saving {} queue entries", entries.len());
        self.store.write(QUEUE_KEY, &serde_json::to_string(entries)?)
    }

    /// Entries in one stage, earliest queue-entry time first
    pub fn entries_with_status(&self, status: EntryStatus) -> Result<Vec<QueueEntry>> {
        let mut entries: Vec<QueueEntry> = self
            .entries()?
            .into_iter()
            .filter(|entry| entry.status == status)
            .collect();
        entries.sort_by_key(|entry| entry.queue_entry_time);
        Ok(entries)
    }

    pub fn counts(&self) -> Result<Counts> {
        Ok(Counts::of(&self.entries()?))
    }

    pub fn queue_has_space(&self) -> Result<bool> {
        Ok(self.counts()?.queue_count < self.capacity.queue)
    }

    pub fn mess_has_space(&self) -> Result<bool> {
        Ok(self.counts()?.mess_count < self.capacity.mess)
    }

    /// Check a person in or out.
    ///
    /// With no active entry the person joins the queue, failing with
    /// [`MessError::QueueFull`] when it is at capacity. An active entry is
    /// served. Advancement runs afterwards and the entry is returned as it
    /// stands after advancement.
    pub fn scan(&self, person_id: &str) -> Result<QueueEntry> {
        let mut entries = self.entries()?;
        let now = self.clock.now();

        let index = match entries
            .iter()
            .position(|entry| entry.person_id == person_id && entry.is_active())
        {
            Some(index) => {
                let entry = &mut entries[index];
                let from = entry.status;
                entry.serve(now);
                info!(
                    "Served student {} from {} (wait {} min)",
                    person_id,
                    from,
                    entry.wait_time.unwrap_or(0)
                );
                index
            }
            None => {
                if Counts::of(&entries).queue_count >= self.capacity.queue {
                    info!("Queue full, denied student {}", person_id);
                    return Err(MessError::QueueFull {
                        capacity: self.capacity.queue,
                    });
                }
                info!("Student {} joined the queue", person_id);
                entries.push(QueueEntry::join(person_id, now));
                entries.len() - 1
            }
        };

        // Advancement only flips statuses, indices stay valid
        let moved = advance_all(&mut entries, self.capacity, now);
        if moved > 0 {
            debug!("Advanced {} students into the mess", moved);
        }
        self.save(&entries)?;

        Ok(entries.swap_remove(index))
    }

    /// Move the longest-waiting queued entry into the mess. `None` when the
    /// mess is full or nobody is queued.
    pub fn advance_one(&self) -> Result<Option<QueueEntry>> {
        let mut entries = self.entries()?;
        let now = self.clock.now();

        let Some(index) = promote_next(&mut entries, self.capacity, now) else {
            debug!("Nothing to advance");
            return Ok(None);
        };

        self.save(&entries)?;
        Ok(Some(entries[index].clone()))
    }

    /// Statistics with the peak minute in local time
    pub fn compute_stats(&self) -> Result<QueueStats> {
        self.compute_stats_in(&Local)
    }

    pub fn compute_stats_in<Tz: TimeZone>(&self, tz: &Tz) -> Result<QueueStats>
    where
        Tz::Offset: std::fmt::Display,
    {
        Ok(QueueStats::from_entries(&self.entries()?, self.capacity, tz))
    }

    /// Discard every entry. The roster is untouched.
    pub fn clear_today(&self) -> Result<()> {
        self.save(&[])?;
        info!("Cleared today's queue data");
        Ok(())
    }
}

/// Promote one entry if the mess has room; returns its index
fn promote_next(
    entries: &mut [QueueEntry],
    capacity: Capacity,
    now: DateTime<Utc>,
) -> Option<usize> {
    if Counts::of(entries).mess_count >= capacity.mess {
        return None;
    }

    // min_by_key keeps the first of equal keys, so ties fall back to insertion order
    let index = entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.status == EntryStatus::InQueue)
        .min_by_key(|(_, entry)| entry.queue_entry_time)
        .map(|(index, _)| index)?;

    entries[index].enter_mess(now);
    info!("Student {} entered the mess", entries[index].person_id);
    Some(index)
}

/// Fill the mess from the queue in FIFO order
fn advance_all(entries: &mut [QueueEntry], capacity: Capacity, now: DateTime<Utc>) -> usize {
    let mut moved = 0;
    while promote_next(entries, capacity, now).is_some() {
        moved += 1;
    }
    moved
}
