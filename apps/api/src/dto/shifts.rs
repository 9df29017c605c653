use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use shiftdesk_core::{AppError, AppResult};
use shiftdesk_domain::{ShiftAssignment, ShiftAssignmentInput, ShiftStatus};
use ts_rs::TS;

use crate::dto::{parse_date, parse_optional_id};

/// Incoming payload for shift create/update.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "save-shift-request.ts")]
pub struct SaveShiftRequest {
    /// Assigned employee, absent for an open shift.
    pub assigned_to: Option<String>,
    pub date: String,
    /// `HH:MM` or `HH:MM:SS`.
    pub start_time: String,
    pub end_time: String,
    pub position: String,
    /// Defaults to `scheduled`.
    pub status: Option<String>,
}

/// Query string for a user's shifts within a date range.
#[derive(Debug, Deserialize)]
pub struct ShiftRangeParams {
    pub from: String,
    pub to: String,
}

/// API representation of a shift assignment.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "shift-response.ts")]
pub struct ShiftResponse {
    pub id: String,
    pub assigned_to: Option<String>,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub position: String,
    pub status: String,
}

impl From<ShiftAssignment> for ShiftResponse {
    fn from(shift: ShiftAssignment) -> Self {
        Self {
            id: shift.id().to_string(),
            assigned_to: shift.assigned_to().map(|value| value.to_string()),
            date: shift.date().to_string(),
            start_time: shift.start_time().format("%H:%M").to_string(),
            end_time: shift.end_time().format("%H:%M").to_string(),
            position: shift.position().to_owned(),
            status: shift.status().as_str().to_owned(),
        }
    }
}

impl TryFrom<SaveShiftRequest> for ShiftAssignmentInput {
    type Error = AppError;

    fn try_from(value: SaveShiftRequest) -> Result<Self, Self::Error> {
        let status = match value.status.as_deref().map(str::trim) {
            None | Some("") => ShiftStatus::Scheduled,
            Some(status) => ShiftStatus::from_str(status)?,
        };

        Ok(Self {
            assigned_to: parse_optional_id(value.assigned_to.as_deref())?,
            date: parse_date("date", value.date.as_str())?,
            start_time: parse_time("startTime", value.start_time.as_str())?,
            end_time: parse_time("endTime", value.end_time.as_str())?,
            position: value.position,
            status,
        })
    }
}

fn parse_time(field: &str, value: &str) -> AppResult<NaiveTime> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|error| AppError::Validation(format!("invalid {field} '{value}': {error}")))
}
