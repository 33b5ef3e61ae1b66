use std::time::Duration;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::activity::{ActivityDay, ActivityWeek};

const CONTRIBUTIONS_QUERY: &str = r#"
query ($login: String!) {
  user(login: $login) {
    contributionsCollection {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            date
            contributionCount
            color
          }
        }
      }
    }
  }
}
"#;

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    pub data: Option<GraphQlData>,
    /// GitHub may send `null` here as well as omit it.
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlData {
    pub user: Option<GithubUser>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubUser {
    pub contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsCollection {
    pub contribution_calendar: ContributionCalendar,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCalendar {
    pub total_contributions: u64,
    pub weeks: Vec<ContributionWeek>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionWeek {
    pub contribution_days: Vec<ContributionDay>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDay {
    pub date: NaiveDate,
    pub contribution_count: u32,
    #[serde(default)]
    pub color: String,
}

impl ContributionCalendar {
    pub fn into_weeks(self) -> Vec<ActivityWeek> {
        self.weeks
            .into_iter()
            .map(|week| ActivityWeek {
                days: week
                    .contribution_days
                    .into_iter()
                    .map(|d| ActivityDay {
                        date: d.date,
                        count: d.contribution_count,
                        color_hint: d.color,
                    })
                    .collect(),
            })
            .collect()
    }
}

/// Pull the calendar out of a GraphQL payload, mapping GitHub's failure modes
/// onto [`AppError`].
pub fn calendar_from_payload(
    status_ok: bool,
    payload: GraphQlResponse,
) -> AppResult<ContributionCalendar> {
    let errors = payload.errors.unwrap_or_default();
    if !status_ok || !errors.is_empty() {
        let message = errors
            .into_iter()
            .next()
            .map(|e| e.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "GitHub API error".to_string());
        return Err(AppError::Upstream(message));
    }

    payload
        .data
        .and_then(|data| data.user)
        .map(|user| user.contributions_collection.contribution_calendar)
        .ok_or_else(|| AppError::NotFound("No contribution data".into()))
}

#[derive(Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    graphql_url: String,
    token: Option<String>,
}

impl GithubClient {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.github_timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            graphql_url: config.github_graphql_url.clone(),
            token: config.github_token.clone(),
        })
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub async fn fetch_calendar(&self, login: &str) -> AppResult<ContributionCalendar> {
        let token = self.token.as_deref().ok_or(AppError::MissingCredential)?;

        let response = self
            .http
            .post(&self.graphql_url)
            .bearer_auth(token)
            .json(&serde_json::json!({
                "query": CONTRIBUTIONS_QUERY,
                "variables": { "login": login },
            }))
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(login = %login, status = %status, "GitHub GraphQL response");

        let payload: GraphQlResponse = response.json().await?;
        calendar_from_payload(status.is_success(), payload)
    }
}
