//! Interval arithmetic between leave windows and shift assignments.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::ShiftAssignment;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Last representable instant of a calendar day at millisecond precision.
#[must_use]
pub fn end_of_day() -> NaiveTime {
    NaiveTime::MIN + TimeDelta::milliseconds(MILLIS_PER_DAY - 1)
}

/// Full-day interval blocked by a leave.
///
/// Starts at 00:00 of the first day and ends at 23:59:59.999 of the last
/// day, so a leave ending on day D blocks the entirety of D.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeaveWindow {
    first_day: NaiveDate,
    last_day: NaiveDate,
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl LeaveWindow {
    /// Creates the window covering `first_day` through `last_day` inclusive.
    #[must_use]
    pub fn covering(first_day: NaiveDate, last_day: NaiveDate) -> Self {
        Self {
            first_day,
            last_day,
            start: first_day.and_time(NaiveTime::MIN),
            end: last_day.and_time(end_of_day()),
        }
    }

    /// Returns the first calendar day, used as the storage pre-filter bound.
    #[must_use]
    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Returns the last calendar day, used as the storage pre-filter bound.
    #[must_use]
    pub fn last_day(&self) -> NaiveDate {
        self.last_day
    }

    /// Returns the normalized start instant.
    #[must_use]
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Returns the normalized end instant.
    #[must_use]
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Returns whether `date` passes the inclusive calendar pre-filter.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.first_day <= date && date <= self.last_day
    }

    /// Strict overlap test against a concrete interval. Touching is not overlap.
    #[must_use]
    pub fn overlaps_interval(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start < self.end && end > self.start
    }

    /// Returns whether `shift` intersects this window.
    ///
    /// Shifts with a malformed interval never match.
    #[must_use]
    pub fn overlaps(&self, shift: &ShiftAssignment) -> bool {
        self.contains_date(shift.date())
            && shift
                .interval()
                .is_some_and(|(start, end)| self.overlaps_interval(start, end))
    }
}

/// Keeps the candidates that intersect `window`.
#[must_use]
pub fn overlapping_shifts(
    window: &LeaveWindow,
    candidates: impl IntoIterator<Item = ShiftAssignment>,
) -> Vec<ShiftAssignment> {
    candidates
        .into_iter()
        .filter(|shift| window.overlaps(shift))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use proptest::prelude::*;

    use super::{LeaveWindow, end_of_day, overlapping_shifts};
    use crate::{ShiftAssignment, ShiftAssignmentSnapshot, ShiftId, ShiftStatus, UserId};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, day).unwrap_or_default()
    }

    fn time(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
    }

    fn shift(day: u32, start: NaiveTime, end: NaiveTime) -> ShiftAssignment {
        ShiftAssignment::from_snapshot(ShiftAssignmentSnapshot {
            id: ShiftId::new(),
            assigned_to: Some(UserId::new()),
            date: date(day),
            start_time: start,
            end_time: end,
            position: "cashier".to_owned(),
            status: ShiftStatus::Scheduled,
        })
    }

    #[test]
    fn end_of_day_is_last_millisecond() {
        assert_eq!(
            end_of_day(),
            NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or_default()
        );
    }

    #[test]
    fn shift_on_last_leave_day_is_included() {
        let window = LeaveWindow::covering(date(20), date(22));
        assert!(window.overlaps(&shift(22, time(9, 0), time(17, 0))));
    }

    #[test]
    fn shift_after_last_leave_day_is_excluded() {
        let window = LeaveWindow::covering(date(20), date(22));
        assert!(!window.overlaps(&shift(23, time(0, 0), time(8, 0))));
    }

    #[test]
    fn touching_boundaries_are_not_overlaps() {
        let window = LeaveWindow::covering(date(20), date(20));
        let before = date(19).and_time(time(18, 0));
        let at_start = date(20).and_time(NaiveTime::MIN);
        assert!(!window.overlaps_interval(before, at_start));

        let at_end = window.end();
        let later = date(21).and_time(time(6, 0));
        assert!(!window.overlaps_interval(at_end, later));
    }

    #[test]
    fn inverted_shift_interval_never_matches() {
        let window = LeaveWindow::covering(date(20), date(22));
        assert!(!window.overlaps(&shift(21, time(17, 0), time(9, 0))));
        assert!(!window.overlaps(&shift(21, time(9, 0), time(9, 0))));
    }

    #[test]
    fn overlapping_shifts_filters_candidates() {
        let window = LeaveWindow::covering(date(20), date(22));
        let kept = overlapping_shifts(
            &window,
            vec![
                shift(19, time(9, 0), time(17, 0)),
                shift(20, time(9, 0), time(17, 0)),
                shift(21, time(22, 0), time(23, 30)),
                shift(23, time(9, 0), time(17, 0)),
            ],
        );
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|value| window.contains_date(value.date())));
    }

    #[test]
    fn empty_candidates_yield_empty_result() {
        let window = LeaveWindow::covering(date(20), date(22));
        assert!(overlapping_shifts(&window, Vec::new()).is_empty());
    }

    proptest! {
        #[test]
        fn overlap_matches_strict_interval_formula(
            leave_start in 1u32..=28,
            leave_len in 0u32..=3,
            shift_day in 1u32..=31,
            start_minute in 0u32..(24 * 60),
            duration in 1u32..(24 * 60),
        ) {
            let leave_end = (leave_start + leave_len).min(31);
            let window = LeaveWindow::covering(date(leave_start), date(leave_end));
            let end_minute = (start_minute + duration).min(24 * 60 - 1);
            prop_assume!(end_minute > start_minute);

            let candidate = shift(
                shift_day,
                time(start_minute / 60, start_minute % 60),
                time(end_minute / 60, end_minute % 60),
            );
            let shift_start = candidate.date().and_time(candidate.start_time());
            let shift_end = candidate.date().and_time(candidate.end_time());
            let expected = shift_start < window.end() && shift_end > window.start();

            prop_assert_eq!(window.overlaps(&candidate), expected);
        }
    }
}
