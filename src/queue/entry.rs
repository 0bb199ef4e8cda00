//! One student's pass through the queue and the mess

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    InQueue,
    InMess,
    Served,
    /// Reserved; no transition produces it
    Left,
}

impl EntryStatus {
    /// `in_queue` and `in_mess` entries occupy a slot
    pub fn is_active(self) -> bool {
        matches!(self, EntryStatus::InQueue | EntryStatus::InMess)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntryStatus::InQueue => "in_queue",
            EntryStatus::InMess => "in_mess",
            EntryStatus::Served => "served",
            EntryStatus::Left => "left",
        }
    }
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StoredEntry")]
pub struct QueueEntry {
    pub id: String,
    #[serde(rename = "studentId")]
    pub person_id: String,
    pub queue_entry_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mess_entry_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_time: Option<DateTime<Utc>>,
    /// Minutes from joining the queue to leaving the mess
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_time: Option<u64>,
    pub status: EntryStatus,
}

/// Stored layout. Older data carries `entryTime` and may lack `queueEntryTime`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredEntry {
    id: String,
    student_id: String,
    #[serde(default)]
    entry_time: Option<DateTime<Utc>>,
    #[serde(default)]
    queue_entry_time: Option<DateTime<Utc>>,
    #[serde(default)]
    mess_entry_time: Option<DateTime<Utc>>,
    #[serde(default)]
    exit_time: Option<DateTime<Utc>>,
    #[serde(default)]
    wait_time: Option<u64>,
    status: EntryStatus,
}

impl TryFrom<StoredEntry> for QueueEntry {
    type Error = String;

    fn try_from(stored: StoredEntry) -> Result<Self, Self::Error> {
        let queue_entry_time = stored
            .queue_entry_time
            .or(stored.entry_time)
            .ok_or_else(|| format!("entry {} has no queueEntryTime or entryTime", stored.id))?;

        Ok(Self {
            id: stored.id,
            person_id: stored.student_id,
            queue_entry_time,
            mess_entry_time: stored.mess_entry_time,
            exit_time: stored.exit_time,
            wait_time: stored.wait_time,
            status: stored.status,
        })
    }
}

impl QueueEntry {
    /// Fresh `in_queue` entry stamped at `now`
    pub fn join(person_id: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            person_id: person_id.to_string(),
            queue_entry_time: now,
            mess_entry_time: None,
            exit_time: None,
            wait_time: None,
            status: EntryStatus::InQueue,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Move from the queue into the mess
    pub(crate) fn enter_mess(&mut self, now: DateTime<Utc>) {
        self.status = EntryStatus::InMess;
        self.mess_entry_time = Some(now);
    }

    /// Check out. Only entries that reached the mess get a non-zero wait.
    pub(crate) fn serve(&mut self, now: DateTime<Utc>) {
        let wait_time = match self.status {
            EntryStatus::InMess => elapsed_minutes(self.queue_entry_time, now),
            _ => 0,
        };
        self.exit_time = Some(now);
        self.wait_time = Some(wait_time);
        self.status = EntryStatus::Served;
    }
}

/// Whole minutes between two instants, rounded to nearest; never negative
pub fn elapsed_minutes(from: DateTime<Utc>, to: DateTime<Utc>) -> u64 {
    let millis = (to - from).num_milliseconds().max(0);
    (millis as f64 / 60_000.0).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_elapsed_minutes_rounds() {
        assert_eq!(elapsed_minutes(t0(), t0()), 0);
        assert_eq!(elapsed_minutes(t0(), t0() + Duration::seconds(29)), 0);
        assert_eq!(elapsed_minutes(t0(), t0() + Duration::seconds(30)), 1);
        assert_eq!(elapsed_minutes(t0(), t0() + Duration::seconds(89)), 1);
        assert_eq!(elapsed_minutes(t0(), t0() + Duration::minutes(12)), 12);
        assert_eq!(elapsed_minutes(t0() + Duration::minutes(1), t0()), 0);
    }

    #[test]
    fn test_serve_from_mess() {
        let mut entry = QueueEntry::join("1", t0());
        entry.enter_mess(t0() + Duration::minutes(2));
        entry.serve(t0() + Duration::minutes(12));

        assert_eq!(entry.status, EntryStatus::Served);
        assert_eq!(entry.wait_time, Some(12));
        assert_eq!(entry.exit_time, Some(t0() + Duration::minutes(12)));
    }

    #[test]
    fn test_serve_from_queue_has_zero_wait() {
        // Skipping the mess records no wait, however long the person queued
        let mut entry = QueueEntry::join("1", t0());
        entry.serve(t0() + Duration::minutes(40));

        assert_eq!(entry.status, EntryStatus::Served);
        assert_eq!(entry.wait_time, Some(0));
        assert!(entry.mess_entry_time.is_none());
    }

    #[test]
    fn test_json_shape() {
        let entry = QueueEntry::join("7", t0());
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["studentId"], "7");
        assert_eq!(json["status"], "in_queue");
        assert_eq!(json["queueEntryTime"], "2024-03-01T12:00:00Z");
        assert!(json.get("messEntryTime").is_none());
        assert!(json.get("waitTime").is_none());

        let parsed: QueueEntry = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, entry);
    }

    #[test]
    fn test_reads_entries_with_entry_time() {
        // Both stamps present, as the browser app stored them
        let json = r#"{"id":"a","studentId":"3","entryTime":"2024-03-01T11:00:00.000Z",
            "queueEntryTime":"2024-03-01T12:00:00.000Z","status":"in_queue"}"#;
        let entry: QueueEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.queue_entry_time, t0());
        assert_eq!(entry.person_id, "3");

        // Only entryTime present
        let json = r#"{"id":"b","studentId":"4","entryTime":"2024-03-01T12:00:00.000Z",
            "exitTime":"2024-03-01T12:10:00.000Z","waitTime":0,"status":"served"}"#;
        let entry: QueueEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.queue_entry_time, t0());
        assert_eq!(entry.wait_time, Some(0));
        assert_eq!(entry.status, EntryStatus::Served);
    }

    #[test]
    fn test_entry_without_any_join_time_is_rejected() {
        let json = r#"{"id":"c","studentId":"5","status":"in_queue"}"#;
        let err = serde_json::from_str::<QueueEntry>(json).unwrap_err();
        assert!(err.to_string().contains("no queueEntryTime or entryTime"));
    }

    #[test]
    fn test_status_activity() {
        assert!(EntryStatus::InQueue.is_active());
        assert!(EntryStatus::InMess.is_active());
        assert!(!EntryStatus::Served.is_active());
        assert!(!EntryStatus::Left.is_active());
        assert_eq!(EntryStatus::InMess.to_string(), "in_mess");
    }
}
