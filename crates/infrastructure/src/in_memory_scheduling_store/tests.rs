use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use shiftdesk_application::{LeaveListQuery, SchedulingStore};
use shiftdesk_domain::{
    LeaveCategory, LeaveId, LeaveRequest, LeaveRequestInput, LeaveStatus, ShiftAssignment,
    ShiftAssignmentInput, ShiftId, ShiftStatus, SwapId, SwapRequest, UserId,
};

use super::InMemorySchedulingStore;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, day).unwrap_or_default()
}

fn leave(user_id: UserId, created_hour: u32) -> LeaveRequest {
    let created_at = Utc
        .with_ymd_and_hms(2025, 8, 1, created_hour, 0, 0)
        .single()
        .unwrap_or_default();
    LeaveRequest::new(
        LeaveId::new(),
        user_id,
        LeaveRequestInput {
            start_date: date(20),
            end_date: date(22),
            category: LeaveCategory::Sick,
            reason: String::new(),
            accepts_swap: false,
            shift_preferences: Vec::new(),
        },
        created_at,
    )
    .unwrap_or_else(|_| unreachable!())
}

fn shift(user_id: UserId, day: u32) -> ShiftAssignment {
    ShiftAssignment::new(
        ShiftId::new(),
        ShiftAssignmentInput {
            assigned_to: Some(user_id),
            date: date(day),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or_default(),
            position: "stock".to_owned(),
            status: ShiftStatus::Scheduled,
        },
    )
    .unwrap_or_else(|_| unreachable!())
}

#[tokio::test]
async fn dropped_unit_of_work_discards_writes() {
    let store = InMemorySchedulingStore::new();
    let value = leave(UserId::new(), 8);

    {
        let mut unit_of_work = store.begin().await.unwrap_or_else(|_| unreachable!());
        assert!(unit_of_work.insert_leave(&value).await.is_ok());
    }

    let found = store.find_leave_by_id(value.id()).await;
    assert!(matches!(found, Ok(None)));
}

#[tokio::test]
async fn committed_unit_of_work_is_visible() {
    let store = InMemorySchedulingStore::new();
    let value = leave(UserId::new(), 8);

    let mut unit_of_work = store.begin().await.unwrap_or_else(|_| unreachable!());
    assert!(unit_of_work.insert_leave(&value).await.is_ok());
    assert!(unit_of_work.commit().await.is_ok());

    let found = store.find_leave_by_id(value.id()).await;
    assert!(matches!(found, Ok(Some(_))));
}

#[tokio::test]
async fn conditional_save_only_updates_pending_rows() {
    let store = InMemorySchedulingStore::new();
    let mut value = leave(UserId::new(), 8);

    let mut unit_of_work = store.begin().await.unwrap_or_else(|_| unreachable!());
    assert!(unit_of_work.insert_leave(&value).await.is_ok());
    assert!(value.cancel(Utc::now()).is_ok());
    assert!(matches!(
        unit_of_work.save_leave_if_pending(&value).await,
        Ok(true)
    ));
    assert!(matches!(
        unit_of_work.save_leave_if_pending(&value).await,
        Ok(false)
    ));
    assert!(unit_of_work.commit().await.is_ok());

    let stored = store
        .find_leave_by_id(value.id())
        .await
        .unwrap_or_default()
        .map(|leave| leave.status());
    assert_eq!(stored, Some(LeaveStatus::Cancelled));
}

#[tokio::test]
async fn delete_shifts_is_idempotent() {
    let store = InMemorySchedulingStore::new();
    let user = UserId::new();
    let first = shift(user, 20);

    let mut unit_of_work = store.begin().await.unwrap_or_else(|_| unreachable!());
    assert!(unit_of_work.save_shift(&first).await.is_ok());
    assert!(matches!(unit_of_work.delete_shifts(&[first.id()]).await, Ok(1)));
    assert!(matches!(unit_of_work.delete_shifts(&[first.id()]).await, Ok(0)));
    assert!(matches!(
        unit_of_work.reassign_shift(first.id(), user).await,
        Ok(false)
    ));
}

#[tokio::test]
async fn deleting_a_shift_drops_swaps_that_reference_it() {
    let store = InMemorySchedulingStore::new();
    let user = UserId::new();
    let source = shift(user, 20);
    let target = shift(UserId::new(), 21);
    let other = shift(UserId::new(), 22);
    let doomed = SwapRequest::new(
        SwapId::new(),
        user,
        source.id(),
        target.id(),
        String::new(),
        Utc::now(),
    )
    .unwrap_or_else(|_| unreachable!());
    let kept = SwapRequest::new(
        SwapId::new(),
        user,
        target.id(),
        other.id(),
        String::new(),
        Utc::now(),
    )
    .unwrap_or_else(|_| unreachable!());

    let mut unit_of_work = store.begin().await.unwrap_or_else(|_| unreachable!());
    for value in [&source, &target, &other] {
        assert!(unit_of_work.save_shift(value).await.is_ok());
    }
    assert!(unit_of_work.insert_swap(&doomed).await.is_ok());
    assert!(unit_of_work.insert_swap(&kept).await.is_ok());
    assert!(matches!(unit_of_work.delete_shifts(&[source.id()]).await, Ok(1)));
    assert!(unit_of_work.commit().await.is_ok());

    assert!(matches!(store.find_swap_by_id(doomed.id()).await, Ok(None)));
    assert!(matches!(store.find_swap_by_id(kept.id()).await, Ok(Some(_))));
}

#[tokio::test]
async fn shift_range_query_is_inclusive_and_user_scoped() {
    let store = InMemorySchedulingStore::new();
    let user = UserId::new();

    let mut unit_of_work = store.begin().await.unwrap_or_else(|_| unreachable!());
    for value in [shift(user, 19), shift(user, 20), shift(user, 22), shift(UserId::new(), 21)] {
        assert!(unit_of_work.save_shift(&value).await.is_ok());
    }
    assert!(unit_of_work.commit().await.is_ok());

    let found = store
        .find_shifts_by_user_and_date_range(user, date(20), date(22))
        .await
        .unwrap_or_default();
    let days: Vec<NaiveDate> = found.iter().map(ShiftAssignment::date).collect();
    assert_eq!(days, vec![date(20), date(22)]);
}

#[tokio::test]
async fn list_leaves_is_newest_first_and_paginated() {
    let store = InMemorySchedulingStore::new();
    let user = UserId::new();
    let older = leave(user, 8);
    let newer = leave(user, 9);

    let mut unit_of_work = store.begin().await.unwrap_or_else(|_| unreachable!());
    assert!(unit_of_work.insert_leave(&older).await.is_ok());
    assert!(unit_of_work.insert_leave(&newer).await.is_ok());
    assert!(unit_of_work.commit().await.is_ok());

    let first_page = store
        .list_leaves(LeaveListQuery {
            limit: 1,
            ..LeaveListQuery::default()
        })
        .await
        .unwrap_or_default();
    assert_eq!(first_page, vec![newer]);

    let second_page = store
        .list_leaves(LeaveListQuery {
            limit: 1,
            offset: 1,
            ..LeaveListQuery::default()
        })
        .await
        .unwrap_or_default();
    assert_eq!(second_page, vec![older]);
}
