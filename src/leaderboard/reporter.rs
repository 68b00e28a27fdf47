//! Best-effort score reporting
//!
//! Submitting never fails from the caller's point of view: if the service
//! can't take the score it goes into the local list instead.

use super::client::LeaderboardClient;
use super::record::{ScoreRecord, top_n};
use super::view::LeaderboardView;
use crate::error::StoreError;
use crate::platform::RecordStore;

/// Locally kept scores, stored as one JSON array
pub struct LocalScores<S> {
    store: S,
}

impl<S: RecordStore> LocalScores<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Result<Vec<ScoreRecord>, StoreError> {
        match self.store.read()? {
            Some(doc) => Ok(serde_json::from_str(&doc)?),
            None => Ok(Vec::new()),
        }
    }

    /// Read the whole list, append, write the whole list back.
    ///
    /// Runs without yielding, so two submissions finishing in the same
    /// frame cannot interleave and lose an entry.
    pub fn append(&self, record: &ScoreRecord) -> Result<usize, StoreError> {
        let mut records = self.load().unwrap_or_else(|e| {
            log::warn!("Local score list unreadable, starting over: {}", e);
            Vec::new()
        });
        records.push(record.clone());
        self.store.write(&serde_json::to_string(&records)?)?;
        Ok(records.len())
    }
}

/// Where a submitted score ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Accepted by the service
    Remote,
    /// Service unreachable; kept in the local list
    StoredLocally,
    /// Neither the service nor local storage took it
    Dropped,
}

impl SubmitOutcome {
    /// Status line for the game-over dialog
    pub fn message(&self) -> &'static str {
        match self {
            SubmitOutcome::Remote => "Score submitted!",
            SubmitOutcome::StoredLocally => "Saved offline",
            SubmitOutcome::Dropped => "Error: Could not submit score",
        }
    }
}

/// A finished submission, tagged with the run it came from
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitReceipt {
    pub session_id: u64,
    pub record: ScoreRecord,
    pub outcome: SubmitOutcome,
}

impl SubmitReceipt {
    /// Late completions from earlier runs must not touch the current UI
    pub fn is_current(&self, session_id: u64) -> bool {
        self.session_id == session_id
    }
}

pub struct ScoreReporter<C, S> {
    client: C,
    local: LocalScores<S>,
}

impl<C: LeaderboardClient, S: RecordStore> ScoreReporter<C, S> {
    pub fn new(client: C, store: S) -> Self {
        Self {
            client,
            local: LocalScores::new(store),
        }
    }

    pub fn local(&self) -> &LocalScores<S> {
        &self.local
    }

    /// Send a score to the service, falling back to the local list
    pub async fn submit(&self, record: &ScoreRecord) -> SubmitOutcome {
        match self.client.post_score(record).await {
            Ok(()) => {
                log::info!("Score submitted: {} ({})", record.score, record.name);
                SubmitOutcome::Remote
            }
            Err(e) => {
                log::warn!("Failed to submit score: {}", e);
                match self.local.append(record) {
                    Ok(count) => {
                        log::info!("Score stored locally ({} entries)", count);
                        SubmitOutcome::StoredLocally
                    }
                    Err(e) => {
                        log::error!("Could not store score locally: {}", e);
                        SubmitOutcome::Dropped
                    }
                }
            }
        }
    }

    /// [`submit`](Self::submit) tagged with the session that produced the score
    pub async fn submit_for(&self, session_id: u64, record: ScoreRecord) -> SubmitReceipt {
        let outcome = self.submit(&record).await;
        SubmitReceipt {
            session_id,
            record,
            outcome,
        }
    }

    /// Top `n` scores, from the service if possible, else the local list
    pub async fn fetch_top(&self, n: usize) -> LeaderboardView {
        match self.client.fetch_scores().await {
            Ok(records) => {
                log::info!("Loaded {} scores from the leaderboard", records.len());
                LeaderboardView::Remote(top_n(records, n))
            }
            Err(e) => {
                log::warn!("Failed to load leaderboard: {}", e);
                match self.local.load() {
                    Ok(records) => LeaderboardView::Local(top_n(records, n)),
                    Err(e) => {
                        log::error!("Local scores unreadable: {}", e);
                        LeaderboardView::Local(Vec::new())
                    }
                }
            }
        }
    }
}
