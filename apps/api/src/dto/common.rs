use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;
use shiftdesk_core::{AppError, AppResult};
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "health-response.ts")]
pub struct HealthResponse {
    pub status: &'static str,
    pub storage: &'static str,
}

/// Parses an ISO `YYYY-MM-DD` calendar date.
pub(crate) fn parse_date(field: &str, value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|error| AppError::Validation(format!("invalid {field} '{value}': {error}")))
}

/// Parses an optional identifier, treating blank input as absent.
pub(crate) fn parse_optional_id<T>(value: Option<&str>) -> AppResult<Option<T>>
where
    T: FromStr<Err = AppError>,
{
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(T::from_str)
        .transpose()
}
