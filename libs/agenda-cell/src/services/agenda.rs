use std::collections::HashSet;

use chrono::{Local, NaiveDate, NaiveTime, Utc};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use shared_config::AppConfig;
use shared_database::StoreClient;

use crate::models::{
    AgendaError, AgendaSlot, Center, DayView, MonthCursor, MonthView, SlotState, SlotStatus,
    ToggleOutcome, ToggleSlotRequest,
};

use super::calendar::build_month_grid;
use super::resolver::{day_has_activity, is_past_day, resolve_day, resolve_slot};
use super::slots::generate_slots;

pub struct AgendaService {
    store: StoreClient,
}

impl AgendaService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: StoreClient::new(config),
        }
    }

    /// Resolve one day of a professional's agenda into the ordered slot list.
    /// Works for suspended centers too: viewing stays allowed, only mutation
    /// is gated.
    pub async fn day_view(
        &self,
        center_id: &str,
        professional_id: &str,
        date: NaiveDate,
        auth_token: &str,
    ) -> Result<DayView, AgendaError> {
        let center = self.get_center(center_id, auth_token).await?;
        let times = generate_slots(&center.agenda_config());
        let records = self
            .fetch_day_slots(center_id, professional_id, date, auth_token)
            .await?;

        debug!(
            "Resolved day {} for professional {}: {} template slots, {} records",
            date,
            professional_id,
            times.len(),
            records.len()
        );

        Ok(DayView {
            professional_id: professional_id.to_string(),
            date,
            read_only: center.suspended,
            is_past: is_past_day(date, Local::now().date_naive()),
            slots: resolve_day(&times, &records),
        })
    }

    /// The toggle protocol: one click per (professional, date, time).
    /// Closed opens, open closes, booked is protected and only surfaces its
    /// record for the detail modal.
    pub async fn toggle_slot(
        &self,
        professional_id: &str,
        request: ToggleSlotRequest,
        auth_token: &str,
    ) -> Result<ToggleOutcome, AgendaError> {
        let center = self.get_center(&request.center_id, auth_token).await?;
        if center.suspended {
            warn!(
                "Toggle refused for center {}: agenda is read-only",
                center.id
            );
            return Err(AgendaError::ReadOnly);
        }

        let today = Local::now().date_naive();
        if is_past_day(request.date, today) {
            return Err(AgendaError::PastDate);
        }

        if NaiveTime::parse_from_str(&request.time, "%H:%M").is_err() {
            return Err(AgendaError::InvalidTime(request.time.clone()));
        }

        let records = self
            .fetch_day_slots(&request.center_id, professional_id, request.date, auth_token)
            .await?;

        match resolve_slot(&records, &request.time) {
            SlotState::Booked { slot } => {
                // Never mutate a booked slot from here; cancellation is an
                // external flow.
                info!(
                    "Slot {} {} for professional {} is booked, returning detail only",
                    request.date, request.time, professional_id
                );
                Ok(ToggleOutcome::BookedDetail { slot })
            }
            SlotState::Open { .. } => {
                let removed = self
                    .delete_slot_records(professional_id, &request, auth_token)
                    .await?;
                info!(
                    "Closed slot {} {} for professional {} ({} record(s) removed)",
                    request.date, request.time, professional_id, removed
                );
                Ok(ToggleOutcome::Closed { removed })
            }
            SlotState::Closed => {
                self.purge_inactive_records(professional_id, &request, auth_token)
                    .await?;
                let slot = self
                    .create_open_slot(professional_id, &request, auth_token)
                    .await?;
                info!(
                    "Opened slot {} {} for professional {}",
                    request.date, request.time, professional_id
                );
                Ok(ToggleOutcome::Opened { slot })
            }
        }
    }

    /// Month grid with per-day activity markers for the calendar picker.
    pub async fn month_view(
        &self,
        center_id: &str,
        professional_id: &str,
        year: i32,
        month: u32,
        auth_token: &str,
    ) -> Result<MonthView, AgendaError> {
        let cursor = MonthCursor::new(year, month);
        let first = cursor
            .first_day()
            .ok_or_else(|| AgendaError::InvalidDate(format!("{}-{}", year, month)))?;
        let last = cursor
            .last_day()
            .ok_or_else(|| AgendaError::InvalidDate(format!("{}-{}", year, month)))?;

        // Center existence still gates the view
        self.get_center(center_id, auth_token).await?;

        let records = self
            .fetch_slots_in_range(center_id, professional_id, first, last, auth_token)
            .await?;

        let dates: HashSet<NaiveDate> = records.iter().map(|r| r.date).collect();
        let active_days: HashSet<NaiveDate> = dates
            .into_iter()
            .filter(|d| day_has_activity(&records, *d))
            .collect();

        let today = Local::now().date_naive();

        Ok(MonthView {
            cursor,
            prev: cursor.prev(),
            next: cursor.next(),
            days: build_month_grid(cursor, today, &active_days),
        })
    }

    // ==========================================================================
    // STORE ACCESS
    // ==========================================================================

    async fn get_center(&self, center_id: &str, auth_token: &str) -> Result<Center, AgendaError> {
        if center_id.trim().is_empty() {
            return Err(AgendaError::NoActiveCenter);
        }

        let path = format!("/rest/v1/centers?id=eq.{}", urlencoding::encode(center_id));
        let result: Vec<Value> = self
            .store
            .request(Method::GET, &path, Some(auth_token), None)
            .await
            .map_err(|e| AgendaError::DatabaseError(e.to_string()))?;

        if result.is_empty() {
            return Err(AgendaError::CenterNotFound);
        }

        serde_json::from_value(result[0].clone())
            .map_err(|e| AgendaError::DatabaseError(format!("Failed to parse center: {}", e)))
    }

    async fn fetch_day_slots(
        &self,
        center_id: &str,
        professional_id: &str,
        date: NaiveDate,
        auth_token: &str,
    ) -> Result<Vec<AgendaSlot>, AgendaError> {
        let path = format!(
            "/rest/v1/agenda_slots?center_id=eq.{}&professional_id=eq.{}&date=eq.{}&active=not.is.false&order=time.asc",
            urlencoding::encode(center_id),
            urlencoding::encode(professional_id),
            date
        );
        self.fetch_slots(&path, auth_token).await
    }

    async fn fetch_slots_in_range(
        &self,
        center_id: &str,
        professional_id: &str,
        from: NaiveDate,
        to: NaiveDate,
        auth_token: &str,
    ) -> Result<Vec<AgendaSlot>, AgendaError> {
        let path = format!(
            "/rest/v1/agenda_slots?center_id=eq.{}&professional_id=eq.{}&date=gte.{}&date=lte.{}&active=not.is.false&order=date.asc,time.asc",
            urlencoding::encode(center_id),
            urlencoding::encode(professional_id),
            from,
            to
        );
        self.fetch_slots(&path, auth_token).await
    }

    async fn fetch_slots(
        &self,
        path: &str,
        auth_token: &str,
    ) -> Result<Vec<AgendaSlot>, AgendaError> {
        let result: Vec<Value> = self
            .store
            .request(Method::GET, path, Some(auth_token), None)
            .await
            .map_err(|e| AgendaError::DatabaseError(e.to_string()))?;

        result
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<AgendaSlot>, _>>()
            .map_err(|e| AgendaError::DatabaseError(format!("Failed to parse agenda slots: {}", e)))
    }

    /// Conditional insert: the deterministic id plus ignore-duplicates means a
    /// concurrent open of the same triple cannot create a second row. Losing
    /// the race comes back as an empty representation.
    async fn create_open_slot(
        &self,
        professional_id: &str,
        request: &ToggleSlotRequest,
        auth_token: &str,
    ) -> Result<AgendaSlot, AgendaError> {
        let slot_data = json!({
            "id": AgendaSlot::deterministic_id(&request.center_id, professional_id, request.date, &request.time),
            "center_id": request.center_id,
            "professional_id": professional_id,
            "date": request.date,
            "time": request.time,
            "status": SlotStatus::Available.to_string(),
            "patient_name": "",
            "patient_rut": "",
            "patient_phone": "",
            "patient_id": null,
            "active": true,
            "created_at": Utc::now().to_rfc3339()
        });

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static(
                "resolution=ignore-duplicates,return=representation",
            ),
        );

        let result: Vec<Value> = self
            .store
            .request_with_headers(
                Method::POST,
                "/rest/v1/agenda_slots?on_conflict=id",
                Some(auth_token),
                Some(slot_data),
                Some(headers),
            )
            .await
            .map_err(|e| AgendaError::DatabaseError(e.to_string()))?;

        let Some(created) = result.into_iter().next() else {
            warn!(
                "Concurrent open detected for professional {} at {} {}",
                professional_id, request.date, request.time
            );
            return Err(AgendaError::SlotAlreadyOpen);
        };

        serde_json::from_value(created)
            .map_err(|e| AgendaError::DatabaseError(format!("Failed to parse created slot: {}", e)))
    }

    /// Hard-delete every record matching the triple. Deleting by triple, not
    /// by id, sweeps up duplicate rows left by older writers.
    async fn delete_slot_records(
        &self,
        professional_id: &str,
        request: &ToggleSlotRequest,
        auth_token: &str,
    ) -> Result<usize, AgendaError> {
        self.delete_matching(professional_id, request, "", auth_token)
            .await
    }

    /// An inactive row still occupies the deterministic id, which would make
    /// the conditional insert report a conflict on every open attempt. Sweep
    /// such rows out before inserting.
    async fn purge_inactive_records(
        &self,
        professional_id: &str,
        request: &ToggleSlotRequest,
        auth_token: &str,
    ) -> Result<usize, AgendaError> {
        self.delete_matching(professional_id, request, "&active=is.false", auth_token)
            .await
    }

    async fn delete_matching(
        &self,
        professional_id: &str,
        request: &ToggleSlotRequest,
        extra_filter: &str,
        auth_token: &str,
    ) -> Result<usize, AgendaError> {
        let path = format!(
            "/rest/v1/agenda_slots?center_id=eq.{}&professional_id=eq.{}&date=eq.{}&time=eq.{}{}",
            urlencoding::encode(&request.center_id),
            urlencoding::encode(professional_id),
            request.date,
            request.time,
            extra_filter
        );

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let removed: Vec<Value> = self
            .store
            .request_with_headers(Method::DELETE, &path, Some(auth_token), None, Some(headers))
            .await
            .map_err(|e| AgendaError::DatabaseError(e.to_string()))?;

        Ok(removed.len())
    }
}
