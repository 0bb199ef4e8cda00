use chrono::{DateTime, Local, Utc};
use mess_queue::desk::{ScanKind, ScanOutcome};
use mess_queue::queue::{EntryStatus, QueueEntry, QueueStats};
use mess_queue::roster::Person;

/// One line describing what a scan did
pub fn format_scan_outcome(outcome: &ScanOutcome) -> String {
    let who = format!("{} ({})", outcome.person.name, outcome.person.roll_number);
    match (outcome.kind, outcome.entry.status) {
        (ScanKind::Served, _) => format!(
            "✅ {} served, waited {} min",
            who,
            outcome.entry.wait_time.unwrap_or(0)
        ),
        (ScanKind::Joined, EntryStatus::InMess) => format!("🍽️ {} entered the mess", who),
        (ScanKind::Joined, _) => format!("🕐 {} joined the queue", who),
    }
}

pub fn format_stats(stats: &QueueStats) -> String {
    [
        format!("Queue:          {}/{}", stats.queue_count, stats.queue_capacity),
        format!("Mess:           {}/{}", stats.mess_count, stats.mess_capacity),
        format!("Served:         {}", stats.total_served),
        format!("Average wait:   {} min", stats.average_wait_time),
        format!("Estimated wait: {} min", stats.estimated_wait_time),
        format!("Peak time:      {}", stats.peak_time),
    ]
    .join("\n")
}

/// Time spent so far, floored to whole minutes
pub fn format_waiting(since: DateTime<Utc>, now: DateTime<Utc>) -> String {
    match (now - since).num_minutes() {
        m if m < 1 => "Just joined".to_string(),
        1 => "1 minute".to_string(),
        m => format!("{} minutes", m),
    }
}

/// Numbered listing of one stage
pub fn format_stage(
    title: &str,
    rows: &[(QueueEntry, Option<Person>)],
    now: DateTime<Utc>,
) -> String {
    let mut lines = vec![format!("{} ({})", title, rows.len())];
    if rows.is_empty() {
        lines.push("  (empty)".to_string());
    }
    for (position, (entry, person)) in rows.iter().enumerate() {
        let since = match entry.status {
            EntryStatus::InMess => entry.mess_entry_time.unwrap_or(entry.queue_entry_time),
            _ => entry.queue_entry_time,
        };
        let who = person
            .as_ref()
            .map(|p| format!("{} ({})", p.name, p.roll_number))
            .unwrap_or_else(|| format!("unknown student {}", entry.person_id));
        lines.push(format!(
            "  {}. {}  since {}, {}",
            position + 1,
            who,
            since.with_timezone(&Local).format("%H:%M"),
            format_waiting(since, now)
        ));
    }
    lines.join("\n")
}

pub fn format_students(people: &[Person]) -> String {
    people
        .iter()
        .map(|p| format!("{:<8} {:<8} {:<12} {}", p.qr_code, p.roll_number, p.name, p.email))
        .collect::<Vec<_>>()
        .join("\n")
}
