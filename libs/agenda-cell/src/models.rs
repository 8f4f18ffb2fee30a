// libs/agenda-cell/src/models.rs
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use shared_models::error::AppError;

// ==============================================================================
// CORE AGENDA MODELS
// ==============================================================================

/// One persisted agenda slot record. The absence of a record for a
/// (professional, date, time) triple is itself a state (closed), so rows only
/// exist for open or booked slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgendaSlot {
    pub id: String,
    pub center_id: String,
    pub professional_id: String,
    pub date: NaiveDate,
    pub time: String,
    pub status: SlotStatus,
    #[serde(default)]
    pub patient_name: String,
    #[serde(default)]
    pub patient_rut: String,
    #[serde(default)]
    pub patient_phone: String,
    #[serde(default)]
    pub patient_id: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl AgendaSlot {
    /// Record identity is derived from the slot triple, making creation
    /// idempotent against the store.
    pub fn deterministic_id(
        center_id: &str,
        professional_id: &str,
        date: NaiveDate,
        time: &str,
    ) -> String {
        format!("{}:{}:{}:{}", center_id, professional_id, date, time)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    Available,
    Booked,
}

impl fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotStatus::Available => write!(f, "available"),
            SlotStatus::Booked => write!(f, "booked"),
        }
    }
}

/// Resolved display state for one template time. Closed is the implicit third
/// state: no record exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SlotState {
    Closed,
    Open { slot: AgendaSlot },
    Booked { slot: AgendaSlot },
}

impl SlotState {
    pub fn is_closed(&self) -> bool {
        matches!(self, SlotState::Closed)
    }
}

/// Working-hours configuration for a professional's day template.
#[derive(Debug, Clone, PartialEq)]
pub struct AgendaConfig {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub slot_minutes: i64,
}

impl Default for AgendaConfig {
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(8, 0, 0).expect("valid time"),
            end: NaiveTime::from_hms_opt(21, 0, 0).expect("valid time"),
            slot_minutes: 20,
        }
    }
}

/// Tenant record. `suspended` puts every agenda under the center into
/// read-only mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Center {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub suspended: bool,
    #[serde(default)]
    pub agenda_start: Option<String>,
    #[serde(default)]
    pub agenda_end: Option<String>,
    #[serde(default)]
    pub slot_minutes: Option<i64>,
}

impl Center {
    /// Stored configuration with fallback to platform defaults. Malformed
    /// stored values fall back rather than failing the whole day view.
    pub fn agenda_config(&self) -> AgendaConfig {
        let defaults = AgendaConfig::default();

        let parse = |s: &Option<String>, fallback: NaiveTime| {
            s.as_deref()
                .and_then(|v| NaiveTime::parse_from_str(v, "%H:%M").ok())
                .unwrap_or(fallback)
        };

        AgendaConfig {
            start: parse(&self.agenda_start, defaults.start),
            end: parse(&self.agenda_end, defaults.end),
            slot_minutes: self.slot_minutes.unwrap_or(defaults.slot_minutes),
        }
    }
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct DayQuery {
    pub center_id: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalendarQuery {
    pub center_id: String,
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToggleSlotRequest {
    pub center_id: String,
    pub date: NaiveDate,
    pub time: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlotEntry {
    pub time: String,
    #[serde(flatten)]
    pub state: SlotState,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayView {
    pub professional_id: String,
    pub date: NaiveDate,
    pub read_only: bool,
    pub is_past: bool,
    pub slots: Vec<SlotEntry>,
}

/// Result of one toggle action. Booked slots are never mutated; the caller
/// gets the record back to show the detail modal.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ToggleOutcome {
    Opened { slot: AgendaSlot },
    Closed { removed: usize },
    BookedDetail { slot: AgendaSlot },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthCursor {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub in_month: bool,
    pub is_past: bool,
    pub has_activity: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthView {
    pub cursor: MonthCursor,
    pub prev: MonthCursor,
    pub next: MonthCursor,
    pub days: Vec<DayCell>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum AgendaError {
    #[error("No active center selected")]
    NoActiveCenter,

    #[error("Center not found")]
    CenterNotFound,

    #[error("Center is suspended, agenda is read-only")]
    ReadOnly,

    #[error("Cannot modify a past date")]
    PastDate,

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Slot was already opened by someone else")]
    SlotAlreadyOpen,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<AgendaError> for AppError {
    fn from(err: AgendaError) -> Self {
        match &err {
            AgendaError::NoActiveCenter => AppError::BadRequest(err.to_string()),
            AgendaError::CenterNotFound => AppError::NotFound(err.to_string()),
            AgendaError::ReadOnly => AppError::Forbidden(err.to_string()),
            AgendaError::PastDate => AppError::BadRequest(err.to_string()),
            AgendaError::InvalidDate(_) | AgendaError::InvalidTime(_) => {
                AppError::ValidationError(err.to_string())
            }
            AgendaError::SlotAlreadyOpen => AppError::Conflict(err.to_string()),
            AgendaError::DatabaseError(msg) => AppError::Database(msg.clone()),
        }
    }
}
