use std::time::Duration;

use reqwest::{header::HeaderMap, StatusCode};
use crate::models::SanctionRecord;

pub const DEFAULT_BASE_URL: &str = "https://api.fis-ski.com";

const RATE_LIMIT_LIMIT_HEADER: &str = "x-ratelimit-limit";
const RATE_LIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";

#[derive(Debug, thiserror::Error)]
pub enum FisError {
    #[error("FIS API rate limit exceeded for discipline {discipline}")]
    RateLimited { discipline: String },

    #[error("FIS API returned {status} for discipline {discipline}")]
    UnexpectedStatus { discipline: String, status: StatusCode },

    #[error("FIS API request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl FisError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, FisError::RateLimited { .. })
    }
}

/// Quota reported by the FIS API on every response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimitInfo {
    pub limit: Option<u32>,
    pub remaining: Option<u32>,
}

impl RateLimitInfo {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let read = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u32>().ok())
        };

        RateLimitInfo {
            limit: read(RATE_LIMIT_LIMIT_HEADER),
            remaining: read(RATE_LIMIT_REMAINING_HEADER),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }
}

/// Thin client over the FIS sanctions API.
///
/// Cloning is cheap: the underlying `reqwest::Client` shares its connection pool.
#[derive(Debug, Clone)]
pub struct FisClient {
    http: reqwest::Client,
    base_url: String,
}

impl FisClient {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, FisError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let base_url: String = base_url.into();

        Ok(FisClient {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn sanctions_url(&self, discipline: &str, season: Option<i32>) -> String {
        match season {
            Some(season) => format!("{}/sanctions/{}/{}", self.base_url, discipline, season),
            None => format!("{}/sanctions/{}", self.base_url, discipline),
        }
    }

    /// GET /sanctions/{discipline}[/{season}]
    pub async fn fetch_sanctions(
        &self,
        discipline: &str,
        season: Option<i32>,
    ) -> Result<Vec<SanctionRecord>, FisError> {
        let url = self.sanctions_url(discipline, season);

        let response = self.http.get(&url).send().await?;

        let rate_limit = RateLimitInfo::from_headers(response.headers());
        tracing::debug!(
            discipline,
            limit = ?rate_limit.limit,
            remaining = ?rate_limit.remaining,
            "FIS rate limit status"
        );
        if rate_limit.is_exhausted() {
            tracing::warn!("FIS rate limit quota exhausted after request for {}", discipline);
        }

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FisError::RateLimited {
                discipline: discipline.to_string(),
            });
        }
        if !status.is_success() {
            return Err(FisError::UnexpectedStatus {
                discipline: discipline.to_string(),
                status,
            });
        }

        let records: Vec<SanctionRecord> = response.json().await?;

        tracing::debug!("Fetched {} sanctions for {}", records.len(), discipline);

        Ok(records)
    }
}
