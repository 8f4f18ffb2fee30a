use chrono::NaiveTime;

use agenda_cell::models::AgendaConfig;
use agenda_cell::services::slots::generate_slots;

fn config(start: &str, end: &str, minutes: i64) -> AgendaConfig {
    AgendaConfig {
        start: NaiveTime::parse_from_str(start, "%H:%M").unwrap(),
        end: NaiveTime::parse_from_str(end, "%H:%M").unwrap(),
        slot_minutes: minutes,
    }
}

#[test]
fn generates_end_exclusive_sequence() {
    let slots = generate_slots(&config("08:00", "09:00", 20));
    assert_eq!(slots, vec!["08:00", "08:20", "08:40"]);
}

#[test]
fn end_time_is_never_emitted_even_when_aligned() {
    let slots = generate_slots(&config("09:00", "10:00", 30));
    assert_eq!(slots, vec!["09:00", "09:30"]);
}

#[test]
fn partial_last_interval_still_emits_its_start() {
    // 25-minute steps into a 60-minute window: 08:50 starts before 09:00
    let slots = generate_slots(&config("08:00", "09:00", 25));
    assert_eq!(slots, vec!["08:00", "08:25", "08:50"]);
}

#[test]
fn default_config_covers_the_full_working_day() {
    let slots = generate_slots(&AgendaConfig::default());
    assert_eq!(slots.len(), 39); // 08:00..21:00 every 20 minutes
    assert_eq!(slots.first().map(String::as_str), Some("08:00"));
    assert_eq!(slots.last().map(String::as_str), Some("20:40"));
}

#[test]
fn generation_is_deterministic() {
    let cfg = config("10:15", "12:00", 15);
    assert_eq!(generate_slots(&cfg), generate_slots(&cfg));
}

#[test]
fn zero_or_negative_duration_yields_empty() {
    assert!(generate_slots(&config("08:00", "21:00", 0)).is_empty());
    assert!(generate_slots(&config("08:00", "21:00", -20)).is_empty());
}

#[test]
fn start_at_or_after_end_yields_empty() {
    assert!(generate_slots(&config("09:00", "09:00", 20)).is_empty());
    assert!(generate_slots(&config("18:00", "09:00", 20)).is_empty());
}

#[test]
fn window_near_midnight_terminates() {
    let slots = generate_slots(&config("23:00", "23:59", 30));
    assert_eq!(slots, vec!["23:00", "23:30"]);
}
