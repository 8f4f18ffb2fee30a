use chrono::Duration;

use crate::models::AgendaConfig;

/// Generate the canonical ordered list of slot labels for one day.
///
/// Starts at `config.start` and steps by `config.slot_minutes`, emitting
/// `HH:MM` labels strictly before `config.end`. Degenerate configurations
/// (non-positive duration, start at or after end) yield an empty list instead
/// of looping.
pub fn generate_slots(config: &AgendaConfig) -> Vec<String> {
    if config.slot_minutes <= 0 || config.start >= config.end {
        return Vec::new();
    }

    let step = Duration::minutes(config.slot_minutes);
    let mut labels = Vec::new();
    let mut current = config.start;

    while current < config.end {
        labels.push(current.format("%H:%M").to_string());

        let (next, wrapped) = current.overflowing_add_signed(step);
        if wrapped != 0 {
            // Stepped past midnight
            break;
        }
        current = next;
    }

    labels
}
