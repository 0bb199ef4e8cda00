//! Statistics derived from the entry collection. Nothing here is stored.

use super::entry::{EntryStatus, QueueEntry};
use super::Capacity;
use chrono::TimeZone;
use serde::Serialize;

const DEFAULT_PEAK_TIME: &str = "00:00";
const MIN_MINUTES_PER_PERSON: f64 = 3.0;
const WAIT_DISCOUNT: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueStats {
    pub queue_count: usize,
    pub mess_count: usize,
    pub average_wait_time: u64,
    pub total_served: usize,
    pub peak_time: String,
    pub estimated_wait_time: u64,
    pub queue_capacity: usize,
    pub mess_capacity: usize,
}

impl QueueStats {
    /// Compute every figure from `entries`, rendering the peak minute in `tz`
    pub fn from_entries<Tz: TimeZone>(entries: &[QueueEntry], capacity: Capacity, tz: &Tz) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let queue_count = count_with_status(entries, EntryStatus::InQueue);
        let mess_count = count_with_status(entries, EntryStatus::InMess);

        let served: Vec<&QueueEntry> = entries
            .iter()
            .filter(|entry| entry.status == EntryStatus::Served)
            .collect();
        let average_wait_time = average_wait_time(&served);

        let peak_time = if served.is_empty() {
            peak_time(entries.iter(), tz)
        } else {
            peak_time(served.iter().copied(), tz)
        };

        Self {
            queue_count,
            mess_count,
            average_wait_time,
            total_served: served.len(),
            peak_time,
            estimated_wait_time: estimated_wait_time(queue_count, average_wait_time),
            queue_capacity: capacity.queue,
            mess_capacity: capacity.mess,
        }
    }
}

pub fn count_with_status(entries: &[QueueEntry], status: EntryStatus) -> usize {
    entries.iter().filter(|entry| entry.status == status).count()
}

/// Mean wait over served entries, rounded to the nearest minute
pub fn average_wait_time(served: &[&QueueEntry]) -> u64 {
    if served.is_empty() {
        return 0;
    }
    let total: u64 = served.iter().map(|entry| entry.wait_time.unwrap_or(0)).sum();
    (total as f64 / served.len() as f64).round() as u64
}

/// Most frequent `HH:MM` queue-entry minute; the first one seen wins a tie
pub fn peak_time<'a, Tz: TimeZone>(
    entries: impl Iterator<Item = &'a QueueEntry>,
    tz: &Tz,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    // Insertion order matters for tie breaking
    let mut counts: Vec<(String, usize)> = Vec::new();
    for entry in entries {
        let key = entry
            .queue_entry_time
            .with_timezone(tz)
            .format("%H:%M")
            .to_string();
        match counts.iter_mut().find(|(minute, _)| *minute == key) {
            Some((_, count)) => *count += 1,
            None => counts.push((key, 1)),
        }
    }

    let mut peak = DEFAULT_PEAK_TIME.to_string();
    let mut max_count = 0;
    for (minute, count) in counts {
        if count > max_count {
            max_count = count;
            peak = minute;
        }
    }
    peak
}

/// Projected wait for a new arrival
pub fn estimated_wait_time(queue_count: usize, average_wait_time: u64) -> u64 {
    if queue_count == 0 {
        return 0;
    }
    let per_person = (average_wait_time as f64 * WAIT_DISCOUNT).max(MIN_MINUTES_PER_PERSON);
    (queue_count as f64 * per_person).round() as u64
}
