//! The typed resource API
//!
//! [`SuftApi`] is the seam between the request pipeline and its consumers:
//! the CLI programs against the trait, and its tests substitute fakes for
//! the network-backed [`SuftClient`](crate::SuftClient).

use async_trait::async_trait;
use suft_domain::{
    LoggingTime, LoggingTimeId, NewLoggingTime, PeriodId, Result, Role, Schedule, ScheduleId,
};

/// Listing options for schedules.
///
/// Defaults to `page=1`, `size=5`, `creatorApprover=creator`, the
/// combination the service is known to serve.
#[derive(Debug, Clone)]
pub struct ScheduleOptions {
    pub page: u32,
    pub size: u32,
    pub role: Role,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self { page: 1, size: 5, role: Role::Creator }
    }
}

/// Listing options for the logging-time entries of one schedule.
#[derive(Debug, Clone)]
pub struct PageOptions {
    pub page: u32,
    pub size: u32,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self { page: 1, size: 5 }
    }
}

/// Schedule and logging-time operations of the SUFT service.
///
/// Status transitions are requests, not local mutations: the returned
/// entity reflects whatever state the server accepted, and a rejected
/// transition surfaces as [`SuftError::Resource`](suft_domain::SuftError).
#[async_trait]
pub trait SuftApi: Send + Sync {
    /// List schedules visible to the authenticated employee.
    async fn schedules(&self, options: &ScheduleOptions) -> Result<Vec<Schedule>>;

    /// Create a schedule for a reporting period.
    async fn add_schedule(&self, period_id: PeriodId) -> Result<Schedule>;

    /// Fetch one schedule.
    async fn detail_schedule(&self, schedule_id: ScheduleId) -> Result<Schedule>;

    /// Ask the service to move a schedule to the to-approve state.
    async fn submit_for_approve_schedule(&self, schedule_id: ScheduleId) -> Result<Schedule>;

    /// List the logging-time entries of a schedule.
    async fn logging_time_list(
        &self,
        schedule_id: ScheduleId,
        options: &PageOptions,
    ) -> Result<Vec<LoggingTime>>;

    /// Create a logging-time entry under a schedule.
    async fn add_logging_time(
        &self,
        schedule_id: ScheduleId,
        draft: &NewLoggingTime,
    ) -> Result<LoggingTime>;

    /// Fetch one logging-time entry.
    async fn detail_logging_time(
        &self,
        schedule_id: ScheduleId,
        logging_time_id: LoggingTimeId,
    ) -> Result<LoggingTime>;

    /// Delete a logging-time entry.
    async fn delete_logging_time(
        &self,
        schedule_id: ScheduleId,
        logging_time_id: LoggingTimeId,
    ) -> Result<()>;

    /// Ask the service to approve an entry, with the approver's comment.
    async fn approve_logging_time(
        &self,
        schedule_id: ScheduleId,
        logging_time_id: LoggingTimeId,
        comment: &str,
    ) -> Result<LoggingTime>;

    /// Ask the service to decline an entry, with the approver's comment.
    async fn decline_logging_time(
        &self,
        schedule_id: ScheduleId,
        logging_time_id: LoggingTimeId,
        comment: &str,
    ) -> Result<LoggingTime>;
}
