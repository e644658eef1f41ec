use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::LeaderboardError;

/// Longest nickname accepted from the input field
pub const MAX_NICKNAME_LEN: usize = 16;

/// Where the leaderboard service lives and whether to talk to it at all
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderboardConfig {
    pub enabled: bool,
    /// Base URL; `/submit` and `/leaderboard` are appended
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_ms: 5_000,
        }
    }
}

/// One `[name, score]` row, in the order the service returned it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry(pub String, pub i64);

impl fmt::Display for LeaderboardEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.0, self.1)
    }
}

#[derive(Debug, Serialize)]
struct SubmitRequest<'a> {
    name: &'a str,
    score: u32,
}

/// Trim a nickname and reject it if nothing is left
pub fn validate_nickname(name: &str) -> Result<&str, LeaderboardError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(LeaderboardError::EmptyNickname);
    }
    Ok(trimmed)
}

/// Blocking HTTP client for the leaderboard service
#[derive(Debug, Clone)]
pub struct LeaderboardClient {
    agent: ureq::Agent,
    base_url: String,
}

impl LeaderboardClient {
    pub fn new(config: &LeaderboardConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build();

        Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /submit` with `{name, score}`; any 2xx counts as success
    pub fn submit(&self, name: &str, score: u32) -> Result<(), LeaderboardError> {
        let name = validate_nickname(name)?;
        let url = format!("{}/submit", self.base_url);

        debug!(%url, name, score, "submitting score");
        self.agent
            .post(&url)
            .send_json(SubmitRequest { name, score })
            .inspect_err(|err| warn!(%url, %err, "score submission failed"))?;

        Ok(())
    }

    /// `GET /leaderboard`, returned exactly in server order
    pub fn fetch(&self) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        let url = format!("{}/leaderboard", self.base_url);

        debug!(%url, "fetching leaderboard");
        let response = self
            .agent
            .get(&url)
            .call()
            .inspect_err(|err| warn!(%url, %err, "leaderboard fetch failed"))?;

        let entries: Vec<LeaderboardEntry> = response.into_json()?;
        Ok(entries)
    }
}
