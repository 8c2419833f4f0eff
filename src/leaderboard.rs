//! Leaderboard service and the reachability check in front of it.

use crate::core::constants::LEADERBOARD_TIMEOUT_SECS;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::error::Error;
use std::time::Duration;

pub const UNAVAILABLE_TITLE: &str = "No Network Access";
pub const UNAVAILABLE_MESSAGE: &str = "Leaderboard is not available.";

/// One row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
}

pub trait Leaderboard {
    /// Whether the service can be reached right now.
    fn is_reachable(&self) -> bool;

    /// Best scores, highest first, at most `limit` of them.
    fn top_scores(&self, limit: usize) -> Result<Vec<ScoreEntry>, Box<dyn Error>>;
}

/// What the front end should present after a leaderboard request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaderboardView {
    Scores(Vec<ScoreEntry>),
    /// Local alert; the game state does not change.
    Unavailable {
        title: &'static str,
        message: &'static str,
    },
}

impl LeaderboardView {
    fn unavailable() -> Self {
        LeaderboardView::Unavailable {
            title: UNAVAILABLE_TITLE,
            message: UNAVAILABLE_MESSAGE,
        }
    }
}

/// Check reachability first, then fetch. Any failure becomes the alert.
pub fn present(leaderboard: &dyn Leaderboard, limit: usize) -> LeaderboardView {
    if !leaderboard.is_reachable() {
        log::info!("leaderboard unreachable");
        return LeaderboardView::unavailable();
    }
    match leaderboard.top_scores(limit) {
        Ok(scores) => LeaderboardView::Scores(scores),
        Err(e) => {
            log::warn!("leaderboard fetch failed: {}", e);
            LeaderboardView::unavailable()
        }
    }
}

/// Sort highest first and keep the top `limit`.
fn rank(mut scores: Vec<ScoreEntry>, limit: usize) -> Vec<ScoreEntry> {
    scores.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name)));
    scores.truncate(limit);
    scores
}

type Fetched = Result<Vec<ScoreEntry>, String>;

/// Leaderboard served as a JSON array of `{name, score}` over HTTP.
///
/// The reachability check is the fetch itself: any HTTP answer, error
/// statuses included, means the network is up. The answer is kept for the
/// next [`Leaderboard::top_scores`] call so presenting costs one request.
pub struct HttpLeaderboard {
    url: Option<String>,
    agent: ureq::Agent,
    fetched: RefCell<Option<Fetched>>,
}

impl HttpLeaderboard {
    /// With no URL the leaderboard is never reachable.
    pub fn new(url: Option<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(LEADERBOARD_TIMEOUT_SECS))
            .build();
        Self {
            url,
            agent,
            fetched: RefCell::new(None),
        }
    }

    /// One GET. `None` when no answer came back at all.
    fn fetch(&self, url: &str) -> Option<Fetched> {
        match self.agent.get(url).set("User-Agent", "pippin").call() {
            Ok(response) => Some(
                response
                    .into_json::<Vec<ScoreEntry>>()
                    .map_err(|e| format!("Invalid leaderboard data: {}", e)),
            ),
            Err(ureq::Error::Status(code, _)) => {
                Some(Err(format!("Leaderboard answered with status {}", code)))
            }
            Err(ureq::Error::Transport(e)) => {
                log::debug!("leaderboard unreachable: {}", e);
                None
            }
        }
    }
}

impl Leaderboard for HttpLeaderboard {
    fn is_reachable(&self) -> bool {
        let Some(url) = self.url.as_deref() else {
            return false;
        };
        let fetched = self.fetch(url);
        let reachable = fetched.is_some();
        *self.fetched.borrow_mut() = fetched;
        reachable
    }

    fn top_scores(&self, limit: usize) -> Result<Vec<ScoreEntry>, Box<dyn Error>> {
        let url = self.url.as_deref().ok_or("No leaderboard URL configured")?;

        let cached = self.fetched.borrow_mut().take();
        let fetched = match cached {
            Some(fetched) => fetched,
            None => self.fetch(url).ok_or("Leaderboard unreachable")?,
        };

        Ok(rank(fetched?, limit))
    }
}
