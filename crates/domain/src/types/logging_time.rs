//! Logging-time entities
//!
//! A logging-time entry records hours worked per day of one schedule week
//! against a project and work kind, and moves through the same approval
//! states as its schedule.

use serde::{Deserialize, Serialize};

use super::ids::{LoggingTimeId, ScheduleId};
use super::schedule::Employee;
use super::status::StatusCode;

/// A work-hours entry attached to a schedule.
///
/// `schedule_id` is not part of the wire representation; the entry is always
/// fetched through its schedule and the client fills the field from the
/// request path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingTime {
    pub id: LoggingTimeId,
    #[serde(skip)]
    pub schedule_id: ScheduleId,
    /// The approver who reviewed the entry, absent until a review happened.
    #[serde(default)]
    pub admin_employee: Option<Employee>,
    #[serde(default)]
    pub comment_admin_employee: String,
    #[serde(default)]
    pub comment_employee: String,
    pub day1_time: f64,
    pub day2_time: f64,
    pub day3_time: f64,
    pub day4_time: f64,
    pub day5_time: f64,
    pub day6_time: f64,
    pub day7_time: f64,
    pub project_id: i64,
    #[serde(default)]
    pub task: String,
    pub work_kind_id: i64,
    #[serde(default)]
    pub imported_from: String,
    pub status_code: StatusCode,
}

/// Employee-writable fields for creating a logging-time entry.
///
/// `Default` yields the all-zero template the CLI hands to the editor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLoggingTime {
    pub comment_employee: String,
    pub day1_time: f64,
    pub day2_time: f64,
    pub day3_time: f64,
    pub day4_time: f64,
    pub day5_time: f64,
    pub day6_time: f64,
    pub day7_time: f64,
    pub project_id: i64,
    pub task: String,
    pub work_kind_id: i64,
}
