//! Leaderboard: score records, name entry and best-effort reporting
//!
//! Scores go to a remote service first and to a locally persisted list when
//! the service is unreachable. Nothing here can fail a run.

pub mod client;
pub mod name_entry;
pub mod record;
pub mod reporter;
pub mod view;

pub use client::{LeaderboardClient, MemoryLeaderboard};
pub use name_entry::{NameEntry, NameEntryAction, NameKey};
pub use record::ScoreRecord;
pub use reporter::{LocalScores, ScoreReporter, SubmitOutcome, SubmitReceipt};
pub use view::LeaderboardView;

#[cfg(target_arch = "wasm32")]
pub use client::FetchClient;

/// LocalStorage key / file stem for the fallback list
pub const LOCAL_SCORES_KEY: &str = "dinoScores";
