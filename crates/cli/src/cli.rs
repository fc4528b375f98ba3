//! Command-line interface definition for the SUFT client

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "suft",
    version = env!("CARGO_PKG_VERSION"),
    about = "Command-line client for the SUFT time-sheet approval service",
    long_about = None
)]
pub struct Cli {
    /// Override the service base URL (defaults to the production endpoint)
    #[arg(global = true, long = "base-url", env = "SUFT_BASE_URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Authenticate and store the session
    Login,

    /// Drop the stored session
    Logout,

    /// List schedules
    #[command(visible_alias = "scs")]
    Schedules {
        /// Page to fetch
        #[arg(long, short)]
        page: Option<u32>,

        /// Number of schedules per page
        #[arg(long, short)]
        size: Option<u32>,

        /// Side of the workflow to list for (creator or approver)
        #[arg(long, short)]
        role: Option<String>,
    },

    /// Show one schedule
    #[command(visible_alias = "sc")]
    Schedule {
        /// Schedule id
        #[arg(long = "schedule-id", alias = "scid")]
        schedule_id: i64,
    },

    /// Create a schedule for a reporting period
    #[command(visible_alias = "as")]
    AddSchedule {
        /// Id of the reporting period
        #[arg(long = "period-id", alias = "pid")]
        period_id: i64,
    },

    /// Submit a schedule for approval
    #[command(visible_alias = "s")]
    SubmitForApprove {
        /// Schedule id
        #[arg(long = "schedule-id", alias = "scid")]
        schedule_id: i64,
    },

    /// List the logging-time entries of a schedule
    #[command(visible_alias = "lts")]
    LoggingTimes {
        /// Schedule id
        #[arg(long = "schedule-id", alias = "scid")]
        schedule_id: i64,

        /// Page to fetch
        #[arg(long, short)]
        page: Option<u32>,

        /// Number of entries per page
        #[arg(long, short)]
        size: Option<u32>,
    },

    /// Show one logging-time entry
    #[command(visible_alias = "lt")]
    LoggingTime {
        /// Schedule id
        #[arg(long = "schedule-id", alias = "scid")]
        schedule_id: i64,

        /// Logging-time entry id
        #[arg(long = "logging-time-id", alias = "ltid")]
        logging_time_id: i64,
    },

    /// Create a logging-time entry from an editor-drafted JSON file
    #[command(visible_alias = "al")]
    AddLoggingTime {
        /// Schedule id
        #[arg(long = "schedule-id", alias = "scid")]
        schedule_id: i64,

        /// Editor to draft the entry with
        #[arg(long, short, env = "EDITOR", default_value = "vi")]
        editor: String,
    },

    /// Delete a logging-time entry
    #[command(visible_alias = "rmlt")]
    RemoveLoggingTime {
        /// Schedule id
        #[arg(long = "schedule-id", alias = "scid")]
        schedule_id: i64,

        /// Logging-time entry id
        #[arg(long = "logging-time-id", alias = "ltid")]
        logging_time_id: i64,
    },

    /// Approve a logging-time entry
    #[command(visible_alias = "aprv")]
    ApproveLoggingTime {
        /// Schedule id
        #[arg(long = "schedule-id", alias = "scid")]
        schedule_id: i64,

        /// Logging-time entry id
        #[arg(long = "logging-time-id", alias = "ltid")]
        logging_time_id: i64,

        /// Approver's comment
        #[arg(long, short)]
        comment: String,
    },

    /// Decline a logging-time entry
    #[command(visible_alias = "dcl")]
    DeclineLoggingTime {
        /// Schedule id
        #[arg(long = "schedule-id", alias = "scid")]
        schedule_id: i64,

        /// Logging-time entry id
        #[arg(long = "logging-time-id", alias = "ltid")]
        logging_time_id: i64,

        /// Approver's comment
        #[arg(long, short)]
        comment: String,
    },
}
