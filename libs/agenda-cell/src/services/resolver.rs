use chrono::NaiveDate;

use crate::models::{AgendaSlot, SlotEntry, SlotState, SlotStatus};

/// Classify one template time against the active records for a day.
///
/// Exactly one of closed/open/booked holds. If duplicate records exist for
/// the same time (a data anomaly the store cannot fully rule out), any booked
/// record is authoritative over an open one.
pub fn resolve_slot(records: &[AgendaSlot], time: &str) -> SlotState {
    let matching: Vec<&AgendaSlot> = records
        .iter()
        .filter(|r| r.active && r.time == time)
        .collect();

    if let Some(booked) = matching.iter().find(|r| r.status == SlotStatus::Booked) {
        return SlotState::Booked {
            slot: (*booked).clone(),
        };
    }

    if let Some(open) = matching.first() {
        return SlotState::Open {
            slot: (*open).clone(),
        };
    }

    SlotState::Closed
}

/// Resolve every template time for a day into its display state.
pub fn resolve_day(times: &[String], records: &[AgendaSlot]) -> Vec<SlotEntry> {
    times
        .iter()
        .map(|time| SlotEntry {
            time: time.clone(),
            state: resolve_slot(records, time),
        })
        .collect()
}

/// A day carries the calendar activity marker when any active record exists
/// for it, open or booked. Visual hint only, never a gate.
pub fn day_has_activity(records: &[AgendaSlot], date: NaiveDate) -> bool {
    records.iter().any(|r| r.active && r.date == date)
}

/// Past-date lockout is calendar-day granular: anything strictly before the
/// local "today" is never actionable.
pub fn is_past_day(date: NaiveDate, today: NaiveDate) -> bool {
    date < today
}
