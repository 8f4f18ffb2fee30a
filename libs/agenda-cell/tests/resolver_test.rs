use chrono::{NaiveDate, Utc};

use agenda_cell::models::{AgendaSlot, SlotState, SlotStatus};
use agenda_cell::services::resolver::{day_has_activity, is_past_day, resolve_day, resolve_slot};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn slot(time: &str, status: SlotStatus) -> AgendaSlot {
    slot_on("2030-06-10", time, status)
}

fn slot_on(day: &str, time: &str, status: SlotStatus) -> AgendaSlot {
    let booked = status == SlotStatus::Booked;
    AgendaSlot {
        id: AgendaSlot::deterministic_id("c1", "p1", date(day), time),
        center_id: "c1".to_string(),
        professional_id: "p1".to_string(),
        date: date(day),
        time: time.to_string(),
        status,
        patient_name: if booked { "Ana Rojas".to_string() } else { String::new() },
        patient_rut: if booked { "11.111.111-1".to_string() } else { String::new() },
        patient_phone: if booked { "+56911112222".to_string() } else { String::new() },
        patient_id: None,
        active: true,
        created_at: Utc::now(),
    }
}

#[test]
fn absent_record_resolves_closed() {
    assert_eq!(resolve_slot(&[], "08:00"), SlotState::Closed);
}

#[test]
fn available_record_resolves_open() {
    let records = vec![slot("08:00", SlotStatus::Available)];
    match resolve_slot(&records, "08:00") {
        SlotState::Open { slot } => assert_eq!(slot.time, "08:00"),
        other => panic!("expected open, got {:?}", other),
    }
}

#[test]
fn booked_record_resolves_booked() {
    let records = vec![slot("08:20", SlotStatus::Booked)];
    match resolve_slot(&records, "08:20") {
        SlotState::Booked { slot } => {
            assert_eq!(slot.patient_name, "Ana Rojas");
            assert_eq!(slot.status, SlotStatus::Booked);
        }
        other => panic!("expected booked, got {:?}", other),
    }
}

#[test]
fn booked_wins_over_open_duplicates() {
    // Duplicate rows for the same triple: the booked one is authoritative
    let records = vec![
        slot("08:00", SlotStatus::Available),
        slot("08:00", SlotStatus::Booked),
    ];
    assert!(matches!(
        resolve_slot(&records, "08:00"),
        SlotState::Booked { .. }
    ));
}

#[test]
fn soft_deleted_records_are_invisible() {
    let mut inactive = slot("08:00", SlotStatus::Available);
    inactive.active = false;
    assert_eq!(resolve_slot(&[inactive.clone()], "08:00"), SlotState::Closed);
    assert!(!day_has_activity(&[inactive], date("2030-06-10")));
}

#[test]
fn every_template_time_gets_exactly_one_state() {
    let times: Vec<String> = ["09:00", "09:30"].iter().map(|s| s.to_string()).collect();
    let records = vec![slot("09:30", SlotStatus::Booked)];

    let entries = resolve_day(&times, &records);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].time, "09:00");
    assert_eq!(entries[0].state, SlotState::Closed);
    assert!(matches!(entries[1].state, SlotState::Booked { .. }));
}

#[test]
fn activity_marker_counts_open_and_booked_alike() {
    let d = date("2030-06-10");
    assert!(day_has_activity(&[slot("08:00", SlotStatus::Available)], d));
    assert!(day_has_activity(&[slot("08:00", SlotStatus::Booked)], d));
    assert!(!day_has_activity(&[], d));
    assert!(!day_has_activity(
        &[slot_on("2030-06-11", "08:00", SlotStatus::Booked)],
        d
    ));
}

#[test]
fn past_day_is_strictly_before_today() {
    let today = date("2030-06-10");
    assert!(is_past_day(date("2030-06-09"), today));
    assert!(!is_past_day(today, today));
    assert!(!is_past_day(date("2030-06-11"), today));
}
