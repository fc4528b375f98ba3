//! Command handlers
//!
//! Resource commands run against the [`SuftApi`] trait so tests can swap in
//! a fake client; session handling and rendering live here, terminal
//! interaction stays in `main`.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use serde::Serialize;
use suft_client::{
    AuthSession, ClientConfig, PageOptions, ScheduleOptions, SuftApi, SuftClient,
};
use suft_domain::{LoggingTimeId, PeriodId, Role, ScheduleId, SuftError, Token};
use tracing::debug;

use crate::cli::Commands;
use crate::draft;
use crate::session::{SessionStore, StoredSession, NOT_LOGGED_IN};

const SESSION_EXPIRED: &str = "session expired; run `suft login` again";

/// Prompt for credentials, authenticate, and store the session.
pub async fn login(store: &SessionStore, config: &ClientConfig) -> Result<String> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let login = prompt(&mut stdin.lock(), &mut stdout, "SUFT login: ")?;
    let password = prompt(&mut stdin.lock(), &mut stdout, "SUFT password: ")?;

    let auth = AuthSession::new(config)?;
    let token = auth.authenticate(login.trim(), password.trim()).await?;
    store.save(&StoredSession::new(token))?;
    Ok("Logged in.\n".to_string())
}

/// Drop the stored session.
pub fn logout(store: &SessionStore) -> Result<String> {
    store.clear()?;
    Ok("Logged out.\n".to_string())
}

/// Open a client from the stored session, rotating the token pair first
/// when it has gone stale.
pub async fn open_client(store: &SessionStore, config: &ClientConfig) -> Result<SuftClient> {
    let mut session = store.load()?;
    if session.is_stale(Utc::now()) {
        debug!("stored session is stale, refreshing before use");
        let auth = AuthSession::new(config)?;
        match auth.refresh(&session.token.refresh_token).await {
            Ok(token) => {
                session = StoredSession::new(token);
                store.save(&session)?;
            }
            Err(err @ SuftError::Transport(_)) => return Err(err.into()),
            Err(_) => bail!(SESSION_EXPIRED),
        }
    }
    Ok(SuftClient::with_token(session.token, config.clone())?)
}

/// Write back the token pair when the gateway rotated it mid-command.
pub async fn persist_rotation(
    store: &SessionStore,
    client: &SuftClient,
    before: &Token,
) -> Result<()> {
    let current = client.token().await;
    if current != *before {
        store.save(&StoredSession::new(current))?;
    }
    Ok(())
}

/// Run one resource command and return its rendered output.
pub async fn run_resource(
    client: &dyn SuftApi,
    command: Commands,
    draft_dir: &Path,
) -> Result<String> {
    match command {
        Commands::Schedules { page, size, role } => {
            let mut options = ScheduleOptions::default();
            if let Some(page) = page {
                options.page = page;
            }
            if let Some(size) = size {
                options.size = size;
            }
            if let Some(role) = role {
                options.role = role.parse::<Role>().map_err(anyhow::Error::msg)?;
            }
            render_lines(&client.schedules(&options).await?)
        }
        Commands::Schedule { schedule_id } => {
            render(&client.detail_schedule(ScheduleId(schedule_id)).await?)
        }
        Commands::AddSchedule { period_id } => {
            render(&client.add_schedule(PeriodId(period_id)).await?)
        }
        Commands::SubmitForApprove { schedule_id } => {
            render(&client.submit_for_approve_schedule(ScheduleId(schedule_id)).await?)
        }
        Commands::LoggingTimes { schedule_id, page, size } => {
            let mut options = PageOptions::default();
            if let Some(page) = page {
                options.page = page;
            }
            if let Some(size) = size {
                options.size = size;
            }
            render_lines(&client.logging_time_list(ScheduleId(schedule_id), &options).await?)
        }
        Commands::LoggingTime { schedule_id, logging_time_id } => render(
            &client
                .detail_logging_time(ScheduleId(schedule_id), LoggingTimeId(logging_time_id))
                .await?,
        ),
        Commands::AddLoggingTime { schedule_id, editor } => {
            let draft = draft::compose(&editor, draft_dir)?;
            render(&client.add_logging_time(ScheduleId(schedule_id), &draft).await?)
        }
        Commands::RemoveLoggingTime { schedule_id, logging_time_id } => {
            client
                .delete_logging_time(ScheduleId(schedule_id), LoggingTimeId(logging_time_id))
                .await?;
            Ok("Logging-time entry deleted.\n".to_string())
        }
        Commands::ApproveLoggingTime { schedule_id, logging_time_id, comment } => render(
            &client
                .approve_logging_time(
                    ScheduleId(schedule_id),
                    LoggingTimeId(logging_time_id),
                    &comment,
                )
                .await?,
        ),
        Commands::DeclineLoggingTime { schedule_id, logging_time_id, comment } => render(
            &client
                .decline_logging_time(
                    ScheduleId(schedule_id),
                    LoggingTimeId(logging_time_id),
                    &comment,
                )
                .await?,
        ),
        Commands::Login | Commands::Logout => {
            unreachable!("session commands never reach the resource dispatcher")
        }
    }
}

fn prompt(input: &mut impl BufRead, output: &mut impl Write, label: &str) -> Result<String> {
    output.write_all(label.as_bytes())?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line).context("failed to read input")?;
    Ok(line)
}

fn render<T: Serialize>(value: &T) -> Result<String> {
    Ok(format!("{}\n", serde_json::to_string(value)?))
}

fn render_lines<T: Serialize>(values: &[T]) -> Result<String> {
    let mut out = String::new();
    for value in values {
        out.push_str(&serde_json::to_string(value)?);
        out.push('\n');
    }
    Ok(out)
}
