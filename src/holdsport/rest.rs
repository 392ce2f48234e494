//! REST API client for Holdsport

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use super::messages::*;
use crate::common::errors::{FormationError, Result};
use crate::common::traits::AttendanceSource;
use crate::common::types::{normalize_name, AttendingUser, TeamRef};
use crate::config::types::{HoldsportConfig, HoldsportCredentials};

/// Most upcoming dates returned by [`HoldsportRestClient::get_upcoming_activity_dates`]
pub const MAX_UPCOMING_DATES: usize = 10;

/// REST API client for Holdsport
#[derive(Debug, Clone)]
pub struct HoldsportRestClient {
    /// HTTP client
    client: Client,
    /// Base URL for the Holdsport API
    base_url: Url,
    /// Basic auth credentials
    credentials: Option<HoldsportCredentials>,
}

impl HoldsportRestClient {
    /// Create a new REST client (unauthenticated)
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(10))
    }

    /// Create a new REST client with custom timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FormationError::Internal(e.to_string()))?;

        // Url::join drops the last segment unless the base ends with '/'
        let base_url = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))
            .map_err(|e| FormationError::Configuration(format!("Invalid Holdsport URL: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            credentials: None,
        })
    }

    /// Build a client from configuration
    pub fn from_config(config: &HoldsportConfig) -> Result<Self> {
        let client = Self::with_timeout(
            &config.base_url,
            Duration::from_secs(config.request_timeout_seconds),
        )?;
        Ok(match config.credentials() {
            Some(credentials) => client.with_credentials(credentials),
            None => client,
        })
    }

    /// Set basic auth credentials
    pub fn with_credentials(mut self, credentials: HoldsportCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| FormationError::Internal(format!("Invalid endpoint {}: {}", path, e)))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("Fetching {}", url);

        let mut request = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(creds) = &self.credentials {
            request = request.basic_auth(&creds.username, Some(&creds.password));
        }

        let response = request.send().await?;
        Self::check_status(response).await?.json().await.map_err(Into::into)
    }

    async fn check_status(response: Response) -> Result<Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(FormationError::InvalidResponse(format!(
            "Server returned status {}: {}",
            status, body
        )))
    }

    /// Teams visible to the authenticated user
    #[instrument(skip(self))]
    pub async fn get_teams(&self) -> Result<Vec<TeamRef>> {
        let url = self.endpoint("v1/teams", &[])?;
        let teams: Vec<TeamResponse> = self.get_json(url).await?;
        Ok(teams
            .into_iter()
            .map(|t| TeamRef {
                team_id: t.id,
                name: t.name,
            })
            .collect())
    }

    /// Activities of a team, optionally restricted to one date
    #[instrument(skip(self))]
    pub async fn get_activities(
        &self,
        team_id: i64,
        date: Option<NaiveDate>,
        per_page: Option<usize>,
    ) -> Result<Vec<ActivityResponse>> {
        let mut query = Vec::new();
        if let Some(date) = date {
            query.push(("date", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(per_page) = per_page {
            query.push(("per_page", per_page.to_string()));
        }
        let url = self.endpoint(&format!("v1/teams/{}/activities", team_id), &query)?;
        self.get_json(url).await
    }

    /// Id of the activity named `activity_name` starting on `date`
    #[instrument(skip(self))]
    pub async fn get_activity_id(
        &self,
        team_id: i64,
        date: NaiveDate,
        activity_name: &str,
    ) -> Result<Option<u64>> {
        let activities = self.get_activities(team_id, Some(date), None).await?;
        Ok(activities
            .iter()
            .filter(|a| a.name == activity_name && a.start_date() == Some(date))
            .find_map(|a| a.id.filter(|id| *id != 0)))
    }

    /// Users with status "Attending", sorted by normalized name
    #[instrument(skip(self))]
    pub async fn get_users_attending_activity(
        &self,
        activity_id: u64,
    ) -> Result<Vec<AttendingUser>> {
        let url = self.endpoint(&format!("v1/activities/{}/activities_users", activity_id), &[])?;
        let entries: Vec<ActivityUserResponse> = self.get_json(url).await?;

        let mut users: Vec<AttendingUser> = entries
            .into_iter()
            .filter(ActivityUserResponse::is_attending)
            .map(|e| AttendingUser::new(e.user_id, normalize_name(&e.name)))
            .collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }

    /// All members of a team as `FIRSTNAME LASTNAME`, sorted by name
    #[instrument(skip(self))]
    pub async fn get_users_in_team(&self, team_id: i64) -> Result<Vec<AttendingUser>> {
        let url = self.endpoint(&format!("v1/teams/{}/members", team_id), &[])?;
        let members: Vec<MemberResponse> = self.get_json(url).await?;

        let mut users: Vec<AttendingUser> = members
            .into_iter()
            .map(|m| {
                let name = format!("{} {}", normalize_name(&m.firstname), normalize_name(&m.lastname));
                AttendingUser::new(m.id, name.trim().to_string())
            })
            .collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }

    /// Next `number_of_dates` dates of an activity, at most [`MAX_UPCOMING_DATES`]
    ///
    /// Widens the page until enough matching activities are found or the API
    /// runs out of activities.
    #[instrument(skip(self))]
    pub async fn get_upcoming_activity_dates(
        &self,
        team_id: i64,
        activity_name: &str,
        number_of_dates: usize,
    ) -> Result<Vec<NaiveDate>> {
        let number_of_dates = number_of_dates.min(MAX_UPCOMING_DATES);
        if number_of_dates == 0 {
            return Ok(Vec::new());
        }

        let mut per_page = number_of_dates * number_of_dates;
        loop {
            let activities = self.get_activities(team_id, None, Some(per_page)).await?;
            let exhausted = activities.len() < per_page;

            let mut dates: Vec<NaiveDate> = activities
                .iter()
                .filter(|a| a.name == activity_name)
                .filter_map(ActivityResponse::start_date)
                .take(number_of_dates)
                .collect();

            if dates.len() == number_of_dates || exhausted {
                dates.sort();
                return Ok(dates);
            }
            per_page += number_of_dates;
        }
    }

    /// Activity names seen at least `minimum_occurrences` times in the next
    /// `activities_to_query` activities, sorted
    #[instrument(skip(self))]
    pub async fn get_recurring_activity_names(
        &self,
        team_id: i64,
        activities_to_query: usize,
        minimum_occurrences: usize,
    ) -> Result<Vec<String>> {
        let activities = self
            .get_activities(team_id, None, Some(activities_to_query))
            .await?;

        let mut occurrences: HashMap<String, usize> = HashMap::new();
        for activity in activities {
            *occurrences.entry(activity.name).or_default() += 1;
        }

        let mut names: Vec<String> = occurrences
            .into_iter()
            .filter(|(_, count)| *count >= minimum_occurrences)
            .map(|(name, _)| name)
            .collect();
        names.sort();
        Ok(names)
    }
}

#[async_trait]
impl AttendanceSource for HoldsportRestClient {
    async fn find_activity(
        &self,
        team_id: i64,
        date: NaiveDate,
        activity_name: &str,
    ) -> Result<Option<u64>> {
        self.get_activity_id(team_id, date, activity_name).await
    }

    async fn attending_users(&self, activity_id: u64) -> Result<Vec<AttendingUser>> {
        self.get_users_attending_activity(activity_id).await
    }
}
