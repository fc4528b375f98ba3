//! Approval workflow status codes and client roles

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Approval state of a schedule or logging-time entry.
///
/// The service reports states with short Cyrillic codes. Only the server
/// enacts transitions; the client requests them and reflects whatever comes
/// back, so unknown and empty codes are preserved verbatim in [`Other`]
/// rather than rejected.
///
/// [`Other`]: StatusCode::Other
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCode {
    /// Freshly created, not yet submitted ("СЗ").
    #[serde(rename = "СЗ")]
    Created,
    /// Submitted and waiting for the approver ("НУ").
    #[serde(rename = "НУ")]
    ToApprove,
    /// Resubmitted after corrections ("НП").
    #[serde(rename = "НП")]
    ToApproveAgain,
    /// Accepted by the approver ("УТВ").
    #[serde(rename = "УТВ")]
    Approved,
    /// Rejected by the approver ("ОТКЛ").
    #[serde(rename = "ОТКЛ")]
    Declined,
    /// Corrected by the employee ("СК").
    #[serde(rename = "СК")]
    Corrected,
    /// Any code the client does not recognize, including the empty initial
    /// value the server reports on just-created logging-time entries.
    #[serde(untagged)]
    Other(String),
}

impl StatusCode {
    /// The wire representation of this status.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Created => "СЗ",
            Self::ToApprove => "НУ",
            Self::ToApproveAgain => "НП",
            Self::Approved => "УТВ",
            Self::Declined => "ОТКЛ",
            Self::Corrected => "СК",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether schedules are listed from the creator's or the approver's side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Creator,
    Approver,
}

impl Role {
    /// The query-parameter value for this role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Creator => "creator",
            Self::Approver => "approver",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "creator" => Ok(Self::Creator),
            "approver" => Ok(Self::Approver),
            other => Err(format!("unknown role {other:?}; expected creator or approver")),
        }
    }
}
