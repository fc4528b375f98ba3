//! Schedule entities
//!
//! A schedule is the weekly reporting container the approval workflow runs
//! over: it belongs to a [`Period`], is owned by its author, and carries an
//! approval [`StatusCode`]. Employees and periods are server-populated and
//! read-only from the client's perspective.

use serde::{Deserialize, Serialize};

use super::ids::{PeriodId, ScheduleId};
use super::status::StatusCode;

/// An employee as reported by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub middle_name: String,
}

/// A fixed reporting interval schedules are created against.
///
/// Dates stay in the wire format (`YYYY-MM-DD` strings); the client never
/// computes with them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    pub id: PeriodId,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub close_date: String,
    #[serde(default)]
    pub week_number: u32,
}

/// A weekly time-reporting schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: ScheduleId,
    pub author: Employee,
    pub period: Period,
    pub status_code: StatusCode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_decodes_from_service_payload() {
        let payload = r#"{
            "id": 1754,
            "author": {
                "id": 5,
                "email": "user@example.com",
                "firstName": "Ivan",
                "lastName": "Ivanov",
                "middleName": "Ivanovich"
            },
            "period": {
                "id": 353,
                "startDate": "2021-08-02",
                "endDate": "2021-08-08",
                "closeDate": "2021-08-09",
                "weekNumber": 31
            },
            "statusCode": "СЗ"
        }"#;

        let schedule: Schedule = serde_json::from_str(payload).unwrap();
        assert_eq!(schedule.id, ScheduleId(1754));
        assert_eq!(schedule.author.first_name, "Ivan");
        assert_eq!(schedule.period.id, PeriodId(353));
        assert_eq!(schedule.period.week_number, 31);
        assert_eq!(schedule.status_code, StatusCode::Created);
    }

    #[test]
    fn schedule_encodes_with_camel_case_names() {
        let schedule = Schedule {
            id: ScheduleId(9),
            author: Employee { id: 1, ..Employee::default() },
            period: Period { id: PeriodId(353), ..Period::default() },
            status_code: StatusCode::ToApprove,
        };

        let json = serde_json::to_value(&schedule).unwrap();
        assert_eq!(json["statusCode"], "НУ");
        assert!(json.get("status_code").is_none());
        assert_eq!(json["period"]["id"], 353);
    }
}
