use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use shiftdesk_core::{AppResult, UserIdentity};
use shiftdesk_domain::{
    LeaveCategory, LeaveId, LeaveRequest, LeaveRequestInput, LeaveStatus, ShiftAssignment,
    ShiftAssignmentInput, ShiftId, ShiftStatus, SwapId, SwapRequest, SwapStatus, UserId, UserRole,
};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::scheduling_ports::{
    AuditEvent, AuditRepository, Clock, DirectoryUser, LeaveListQuery, RoleDirectory,
    SchedulingStore, SchedulingUnitOfWork,
};

pub fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, day).unwrap_or_default()
}

pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

pub fn identity(user_id: UserId) -> UserIdentity {
    UserIdentity::new(user_id.as_uuid(), "test user")
}

pub fn leave_input(start: NaiveDate, end: NaiveDate, accepts_swap: bool) -> LeaveRequestInput {
    LeaveRequestInput {
        start_date: start,
        end_date: end,
        category: LeaveCategory::Annual,
        reason: "family visit".to_owned(),
        accepts_swap,
        shift_preferences: Vec::new(),
    }
}

pub fn pending_leave(
    user_id: UserId,
    start: NaiveDate,
    end: NaiveDate,
    accepts_swap: bool,
) -> LeaveRequest {
    LeaveRequest::new(
        LeaveId::new(),
        user_id,
        leave_input(start, end, accepts_swap),
        FixedClock::default().now(),
    )
    .unwrap_or_else(|_| unreachable!())
}

pub fn shift_input(
    user_id: Option<UserId>,
    day: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
) -> ShiftAssignmentInput {
    ShiftAssignmentInput {
        assigned_to: user_id,
        date: day,
        start_time: start,
        end_time: end,
        position: "front desk".to_owned(),
        status: ShiftStatus::Scheduled,
    }
}

pub fn shift(
    user_id: Option<UserId>,
    day: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
) -> ShiftAssignment {
    ShiftAssignment::new(ShiftId::new(), shift_input(user_id, day, start, end))
        .unwrap_or_else(|_| unreachable!())
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(
            Utc.with_ymd_and_hms(2025, 8, 1, 9, 30, 0)
                .single()
                .unwrap_or_default(),
        )
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Default)]
pub struct FakeRoleDirectory {
    users: HashMap<UserId, UserRole>,
}

impl FakeRoleDirectory {
    pub fn with_users(users: impl IntoIterator<Item = (UserId, UserRole)>) -> Self {
        Self {
            users: users.into_iter().collect(),
        }
    }
}

#[async_trait]
impl RoleDirectory for FakeRoleDirectory {
    async fn find_user(&self, user_id: UserId) -> AppResult<Option<DirectoryUser>> {
        Ok(self.users.get(&user_id).map(|role| DirectoryUser {
            user_id,
            display_name: "test user".to_owned(),
            role: *role,
        }))
    }
}

#[derive(Default)]
pub struct FakeAuditRepository {
    pub events: Mutex<Vec<AuditEvent>>,
}

#[async_trait]
impl AuditRepository for FakeAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.events.lock().await.push(event);
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeState {
    pub leaves: HashMap<LeaveId, LeaveRequest>,
    pub shifts: HashMap<ShiftId, ShiftAssignment>,
    pub swaps: HashMap<SwapId, SwapRequest>,
}

impl FakeState {
    fn shifts_in_range(
        &self,
        user_id: UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Vec<ShiftAssignment> {
        self.shifts
            .values()
            .filter(|shift| shift.assigned_to() == Some(user_id))
            .filter(|shift| from <= shift.date() && shift.date() <= to)
            .cloned()
            .collect()
    }
}

#[derive(Default)]
pub struct FakeSchedulingStore {
    state: Arc<Mutex<FakeState>>,
}

impl FakeSchedulingStore {
    pub async fn seed_leave(&self, leave: LeaveRequest) {
        self.state.lock().await.leaves.insert(leave.id(), leave);
    }

    pub async fn seed_shift(&self, shift: ShiftAssignment) {
        self.state.lock().await.shifts.insert(shift.id(), shift);
    }

    pub async fn snapshot(&self) -> FakeState {
        self.state.lock().await.clone()
    }
}

#[async_trait]
impl SchedulingStore for FakeSchedulingStore {
    async fn begin(&self) -> AppResult<Box<dyn SchedulingUnitOfWork>> {
        let guard = self.state.clone().lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(FakeUnitOfWork { guard, staged }))
    }

    async fn find_leave_by_id(&self, leave_id: LeaveId) -> AppResult<Option<LeaveRequest>> {
        Ok(self.state.lock().await.leaves.get(&leave_id).cloned())
    }

    async fn list_leaves(&self, query: LeaveListQuery) -> AppResult<Vec<LeaveRequest>> {
        let state = self.state.lock().await;
        let mut leaves: Vec<LeaveRequest> = state
            .leaves
            .values()
            .filter(|leave| query.user_id.is_none_or(|user_id| leave.user_id() == user_id))
            .filter(|leave| query.status.is_none_or(|status| leave.status() == status))
            .cloned()
            .collect();
        leaves.sort_by_key(|leave| std::cmp::Reverse(leave.created_at()));
        Ok(leaves
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .collect())
    }

    async fn find_shifts_by_user_and_date_range(
        &self,
        user_id: UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<ShiftAssignment>> {
        Ok(self.state.lock().await.shifts_in_range(user_id, from, to))
    }

    async fn find_shift_by_id(&self, shift_id: ShiftId) -> AppResult<Option<ShiftAssignment>> {
        Ok(self.state.lock().await.shifts.get(&shift_id).cloned())
    }

    async fn find_swap_by_id(&self, swap_id: SwapId) -> AppResult<Option<SwapRequest>> {
        Ok(self.state.lock().await.swaps.get(&swap_id).cloned())
    }
}

struct FakeUnitOfWork {
    guard: OwnedMutexGuard<FakeState>,
    staged: FakeState,
}

#[async_trait]
impl SchedulingUnitOfWork for FakeUnitOfWork {
    async fn find_leave_by_id(&mut self, leave_id: LeaveId) -> AppResult<Option<LeaveRequest>> {
        Ok(self.staged.leaves.get(&leave_id).cloned())
    }

    async fn insert_leave(&mut self, leave: &LeaveRequest) -> AppResult<()> {
        self.staged.leaves.insert(leave.id(), leave.clone());
        Ok(())
    }

    async fn save_leave_if_pending(&mut self, leave: &LeaveRequest) -> AppResult<bool> {
        match self.staged.leaves.get_mut(&leave.id()) {
            Some(stored) if stored.status() == LeaveStatus::Pending => {
                *stored = leave.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_leave(&mut self, leave_id: LeaveId) -> AppResult<bool> {
        Ok(self.staged.leaves.remove(&leave_id).is_some())
    }

    async fn find_shifts_by_user_and_date_range(
        &mut self,
        user_id: UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<ShiftAssignment>> {
        Ok(self.staged.shifts_in_range(user_id, from, to))
    }

    async fn find_shift_by_id(&mut self, shift_id: ShiftId) -> AppResult<Option<ShiftAssignment>> {
        Ok(self.staged.shifts.get(&shift_id).cloned())
    }

    async fn save_shift(&mut self, shift: &ShiftAssignment) -> AppResult<()> {
        self.staged.shifts.insert(shift.id(), shift.clone());
        Ok(())
    }

    async fn delete_shifts(&mut self, shift_ids: &[ShiftId]) -> AppResult<u64> {
        let removed = shift_ids
            .iter()
            .filter(|shift_id| self.staged.shifts.remove(*shift_id).is_some())
            .count();
        self.staged.swaps.retain(|_, swap| {
            !shift_ids.contains(&swap.source_shift_id())
                && !shift_ids.contains(&swap.target_shift_id())
        });
        Ok(removed as u64)
    }

    async fn reassign_shift(&mut self, shift_id: ShiftId, user_id: UserId) -> AppResult<bool> {
        match self.staged.shifts.get_mut(&shift_id) {
            Some(shift) => {
                shift.assign_to(Some(user_id));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_swap_by_id(&mut self, swap_id: SwapId) -> AppResult<Option<SwapRequest>> {
        Ok(self.staged.swaps.get(&swap_id).cloned())
    }

    async fn insert_swap(&mut self, swap: &SwapRequest) -> AppResult<()> {
        self.staged.swaps.insert(swap.id(), swap.clone());
        Ok(())
    }

    async fn save_swap_if_pending(&mut self, swap: &SwapRequest) -> AppResult<bool> {
        match self.staged.swaps.get_mut(&swap.id()) {
            Some(stored) if stored.status() == SwapStatus::Pending => {
                *stored = swap.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn commit(mut self: Box<Self>) -> AppResult<()> {
        *self.guard = std::mem::take(&mut self.staged);
        Ok(())
    }
}
