//! Strongly typed resource ids
//!
//! Schedules, logging-time entries, and periods are all addressed by plain
//! integers on the wire. Distinct newtypes keep them from being swapped in
//! call signatures.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord,
            Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }
    };
}

id_type!(
    /// Server-assigned id of a schedule.
    ScheduleId
);
id_type!(
    /// Server-assigned id of a logging-time entry.
    LoggingTimeId
);
id_type!(
    /// Id of the reporting period a schedule is created against.
    PeriodId
);
