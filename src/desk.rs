//! Scanning desk: resolves scan codes through the roster and drives the queue engine

use crate::error::{MessError, Result};
use crate::queue::{EntryStatus, QueueEngine, QueueEntry, QueueStats};
use crate::roster::{Person, Roster};
use crate::store::Store;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanKind {
    /// New entry created
    Joined,
    /// Active entry checked out
    Served,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutcome {
    pub person: Person,
    pub entry: QueueEntry,
    pub kind: ScanKind,
}

/// Backup of both collections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub students: Vec<Person>,
    pub queue: Vec<QueueEntry>,
    pub export_date: DateTime<Utc>,
}

impl Snapshot {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Default download name for an export taken on `date`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("mess-queue-data-{}.json", date.format("%Y-%m-%d"))
}

pub struct Desk<'a, S: Store + ?Sized> {
    roster: Roster<'a, S>,
    engine: QueueEngine<'a, S>,
}

impl<'a, S: Store + ?Sized> Desk<'a, S> {
    pub fn new(roster: Roster<'a, S>, engine: QueueEngine<'a, S>) -> Self {
        Self { roster, engine }
    }

    pub fn roster(&self) -> &Roster<'a, S> {
        &self.roster
    }

    pub fn engine(&self) -> &QueueEngine<'a, S> {
        &self.engine
    }

    /// Handle one scan event. Unknown codes and a full queue are denials.
    pub fn scan_code(&self, code: &str) -> Result<ScanOutcome> {
        let code = code.trim();
        let Some(person) = self.roster.find_by_code(code)? else {
            warn!("Unknown scan code: {}", code);
            return Err(MessError::NotFound {
                code: code.to_string(),
            });
        };

        let entry = self.engine.scan(&person.id)?;
        let kind = if entry.status == EntryStatus::Served {
            ScanKind::Served
        } else {
            ScanKind::Joined
        };
        info!("Scanned {} ({}): {:?}", person.name, person.roll_number, kind);

        Ok(ScanOutcome {
            person,
            entry,
            kind,
        })
    }

    pub fn advance_one(&self) -> Result<Option<QueueEntry>> {
        self.engine.advance_one()
    }

    pub fn compute_stats(&self) -> Result<QueueStats> {
        self.engine.compute_stats()
    }

    pub fn clear_today(&self) -> Result<()> {
        self.engine.clear_today()
    }

    pub fn list_people(&self) -> Result<Vec<Person>> {
        self.roster.list_people()
    }

    /// Entries of one stage paired with their person, FIFO order
    pub fn stage(&self, status: EntryStatus) -> Result<Vec<(QueueEntry, Option<Person>)>> {
        let people = self.roster.list_people()?;
        Ok(self
            .engine
            .entries_with_status(status)?
            .into_iter()
            .map(|entry| {
                let person = people.iter().find(|p| p.id == entry.person_id).cloned();
                (entry, person)
            })
            .collect())
    }

    /// Read-only copy of both collections
    pub fn export_snapshot(&self) -> Result<Snapshot> {
        let snapshot = Snapshot {
            students: self.roster.list_people()?,
            queue: self.engine.entries()?,
            export_date: self.engine.now(),
        };
        info!(
            "Exported {} students and {} entries",
            snapshot.students.len(),
            snapshot.queue.len()
        );
        Ok(snapshot)
    }
}
