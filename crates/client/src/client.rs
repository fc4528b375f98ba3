//! Network-backed implementation of the resource API

use async_trait::async_trait;
use reqwest::{Method, Response, StatusCode as HttpStatus};
use serde::de::DeserializeOwned;
use suft_domain::{
    LoggingTime, LoggingTimeId, NewLoggingTime, PeriodId, Result, Schedule, ScheduleId,
    StatusCode, SuftError, Token,
};
use tracing::info;

use crate::api::{PageOptions, ScheduleOptions, SuftApi};
use crate::auth::AuthSession;
use crate::config::ClientConfig;
use crate::gateway::HttpGateway;
use crate::transport_error;

const SCHEDULES_PATH: &str = "api/v1/schedules";

/// Client for the schedule and logging-time resources.
///
/// Every operation is one [`HttpGateway::send`] plus a JSON decode; the
/// gateway handles authentication, including the single refresh-and-retry
/// on 401.
pub struct SuftClient {
    gateway: HttpGateway,
}

impl SuftClient {
    /// Authenticate with credentials and wrap the issued token pair.
    ///
    /// # Errors
    /// Propagates [`AuthSession::authenticate`] failures.
    pub async fn login(login: &str, password: &str, config: ClientConfig) -> Result<Self> {
        let auth = AuthSession::new(&config)?;
        let token = auth.authenticate(login, password).await?;
        info!(login, "authenticated against the SUFT service");
        Self::with_token(token, config)
    }

    /// Resume from a previously issued token pair.
    pub fn with_token(token: Token, config: ClientConfig) -> Result<Self> {
        Ok(Self { gateway: HttpGateway::new(token, &config)? })
    }

    /// Snapshot of the held token pair.
    ///
    /// The gateway rotates the pair in place when it recovers from a 401;
    /// callers that persist sessions should re-read it after use.
    pub async fn token(&self) -> Token {
        self.gateway.token().await
    }
}

fn logging_times_path(schedule_id: ScheduleId) -> String {
    format!("{SCHEDULES_PATH}/{schedule_id}/logging-times")
}

/// Check the exact status the operation expects and hand back the body;
/// anything else becomes a resource error carrying the server's text.
async fn read_body(response: Response, expected: HttpStatus) -> Result<String> {
    let status = response.status();
    let body = response.text().await.map_err(|err| transport_error(&err))?;
    if status != expected {
        return Err(SuftError::Resource { status: status.as_u16(), body });
    }
    Ok(body)
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|err| SuftError::Decode(err.to_string()))
}

#[async_trait]
impl SuftApi for SuftClient {
    async fn schedules(&self, options: &ScheduleOptions) -> Result<Vec<Schedule>> {
        let path = format!(
            "{SCHEDULES_PATH}?page={}&size={}&creatorApprover={}",
            options.page, options.size, options.role,
        );
        let response = self.gateway.send(Method::GET, &path, None).await?;
        decode(&read_body(response, HttpStatus::OK).await?)
    }

    async fn add_schedule(&self, period_id: PeriodId) -> Result<Schedule> {
        let body = serde_json::json!({ "periodId": period_id });
        let response = self.gateway.send(Method::POST, SCHEDULES_PATH, Some(body)).await?;
        decode(&read_body(response, HttpStatus::CREATED).await?)
    }

    async fn detail_schedule(&self, schedule_id: ScheduleId) -> Result<Schedule> {
        let path = format!("{SCHEDULES_PATH}/{schedule_id}");
        let response = self.gateway.send(Method::GET, &path, None).await?;
        decode(&read_body(response, HttpStatus::OK).await?)
    }

    async fn submit_for_approve_schedule(&self, schedule_id: ScheduleId) -> Result<Schedule> {
        let path = format!("{SCHEDULES_PATH}/{schedule_id}");
        let body = serde_json::json!({ "statusCode": StatusCode::ToApprove });
        let response = self.gateway.send(Method::PATCH, &path, Some(body)).await?;
        decode(&read_body(response, HttpStatus::OK).await?)
    }

    async fn logging_time_list(
        &self,
        schedule_id: ScheduleId,
        options: &PageOptions,
    ) -> Result<Vec<LoggingTime>> {
        let path = format!(
            "{}?page={}&size={}",
            logging_times_path(schedule_id),
            options.page,
            options.size,
        );
        let response = self.gateway.send(Method::GET, &path, None).await?;
        let mut entries: Vec<LoggingTime> = decode(&read_body(response, HttpStatus::OK).await?)?;
        for entry in &mut entries {
            entry.schedule_id = schedule_id;
        }
        Ok(entries)
    }

    async fn add_logging_time(
        &self,
        schedule_id: ScheduleId,
        draft: &NewLoggingTime,
    ) -> Result<LoggingTime> {
        let body = serde_json::to_value(draft)
            .map_err(|err| SuftError::InvalidInput(format!("unencodable draft: {err}")))?;
        let response =
            self.gateway.send(Method::POST, &logging_times_path(schedule_id), Some(body)).await?;
        let mut entry: LoggingTime = decode(&read_body(response, HttpStatus::CREATED).await?)?;
        entry.schedule_id = schedule_id;
        Ok(entry)
    }

    async fn detail_logging_time(
        &self,
        schedule_id: ScheduleId,
        logging_time_id: LoggingTimeId,
    ) -> Result<LoggingTime> {
        let path = format!("{}/{logging_time_id}", logging_times_path(schedule_id));
        let response = self.gateway.send(Method::GET, &path, None).await?;
        let mut entry: LoggingTime = decode(&read_body(response, HttpStatus::OK).await?)?;
        entry.schedule_id = schedule_id;
        Ok(entry)
    }

    async fn delete_logging_time(
        &self,
        schedule_id: ScheduleId,
        logging_time_id: LoggingTimeId,
    ) -> Result<()> {
        let path = format!("{}/{logging_time_id}", logging_times_path(schedule_id));
        let response = self.gateway.send(Method::DELETE, &path, None).await?;
        read_body(response, HttpStatus::OK).await?;
        Ok(())
    }

    async fn approve_logging_time(
        &self,
        schedule_id: ScheduleId,
        logging_time_id: LoggingTimeId,
        comment: &str,
    ) -> Result<LoggingTime> {
        self.review_logging_time(schedule_id, logging_time_id, comment, StatusCode::Approved).await
    }

    async fn decline_logging_time(
        &self,
        schedule_id: ScheduleId,
        logging_time_id: LoggingTimeId,
        comment: &str,
    ) -> Result<LoggingTime> {
        self.review_logging_time(schedule_id, logging_time_id, comment, StatusCode::Declined).await
    }
}

impl SuftClient {
    /// Shared PATCH for the two review verdicts. The service requires the
    /// approver's comment, so an empty one is rejected before any network
    /// call.
    async fn review_logging_time(
        &self,
        schedule_id: ScheduleId,
        logging_time_id: LoggingTimeId,
        comment: &str,
        verdict: StatusCode,
    ) -> Result<LoggingTime> {
        if comment.trim().is_empty() {
            return Err(SuftError::InvalidInput(
                "an approval decision requires a non-empty comment".into(),
            ));
        }

        let path = format!("{}/{logging_time_id}", logging_times_path(schedule_id));
        let body = serde_json::json!({
            "commentAdminEmployee": comment,
            "statusCode": verdict,
        });
        let response = self.gateway.send(Method::PATCH, &path, Some(body)).await?;
        let mut entry: LoggingTime = decode(&read_body(response, HttpStatus::OK).await?)?;
        entry.schedule_id = schedule_id;
        Ok(entry)
    }
}
