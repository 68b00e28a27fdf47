//! Screen flow and the game-over dialog
//!
//! Menu → Playing ↔ Leaderboard. While a run is over the dialog collects a
//! name and turns it into a submission for the reporter.

use crate::leaderboard::{NameEntry, NameEntryAction, NameKey, ScoreRecord, SubmitReceipt};
use crate::sim::GameEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    Menu,
    Playing,
    Leaderboard,
}

/// Navigation input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneInput {
    /// Space / play button
    Confirm,
    /// Leaderboard button
    OpenLeaderboard,
}

impl Scene {
    pub fn next(self, input: SceneInput) -> Scene {
        match (self, input) {
            (Scene::Menu, SceneInput::Confirm) => Scene::Playing,
            (Scene::Menu, SceneInput::OpenLeaderboard) => Scene::Leaderboard,
            (Scene::Playing, SceneInput::OpenLeaderboard) => Scene::Leaderboard,
            (Scene::Leaderboard, SceneInput::Confirm) => Scene::Playing,
            (scene, _) => scene,
        }
    }
}

/// A score ready to hand to the reporter
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubmission {
    pub session_id: u64,
    pub record: ScoreRecord,
}

/// Game-over dialog state for the current run
#[derive(Debug, Default)]
pub struct GameOverDialog {
    entry: Option<NameEntry>,
    finished: Option<(u64, u32)>,
    status: Option<&'static str>,
    submitted_remotely: bool,
}

impl GameOverDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track run start/finish events
    pub fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::RunFinished { session_id, score } => {
                self.entry = Some(NameEntry::new());
                self.finished = Some((*session_id, *score));
                self.status = None;
                self.submitted_remotely = false;
            }
            GameEvent::RunStarted { .. } => *self = Self::default(),
            _ => {}
        }
    }

    pub fn is_open(&self) -> bool {
        self.entry.is_some()
    }

    /// Keys go to the name field instead of the jump key
    pub fn captures_input(&self) -> bool {
        self.entry.as_ref().is_some_and(|e| !e.is_submitted())
    }

    /// Route a key; returns a submission once the player confirms
    pub fn handle_key(&mut self, key: NameKey, timestamp: f64) -> Option<PendingSubmission> {
        let action = self.entry.as_mut()?.handle_key(key);
        self.submission(action, timestamp)
    }

    /// Submit button
    pub fn submit(&mut self, timestamp: f64) -> Option<PendingSubmission> {
        let action = self.entry.as_mut()?.submit();
        self.submission(action, timestamp)
    }

    fn submission(&mut self, action: NameEntryAction, timestamp: f64) -> Option<PendingSubmission> {
        let NameEntryAction::Submit(name) = action else {
            return None;
        };
        let (session_id, score) = self.finished?;
        self.status = Some("Submitting...");
        Some(PendingSubmission {
            session_id,
            record: ScoreRecord::new(&name, score, timestamp),
        })
    }

    /// Apply a finished submission. Stale receipts are ignored.
    pub fn apply_receipt(&mut self, receipt: &SubmitReceipt) -> bool {
        match self.finished {
            Some((session_id, _)) if receipt.is_current(session_id) => {
                self.status = Some(receipt.outcome.message());
                self.submitted_remotely =
                    receipt.outcome == crate::leaderboard::SubmitOutcome::Remote;
                true
            }
            _ => {
                log::debug!("Ignoring late receipt for run {}", receipt.session_id);
                false
            }
        }
    }

    pub fn name_display(&self) -> Option<&str> {
        self.entry.as_ref().map(|e| e.display())
    }

    pub fn status(&self) -> Option<&'static str> {
        self.status
    }

    /// "View leaderboard" is offered after a successful remote submit
    pub fn offers_leaderboard(&self) -> bool {
        self.submitted_remotely
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaderboard::SubmitOutcome;

    fn finished(dialog: &mut GameOverDialog, session_id: u64, score: u32) {
        dialog.on_event(&GameEvent::RunFinished { session_id, score });
    }

    #[test]
    fn test_scene_flow() {
        assert_eq!(Scene::Menu.next(SceneInput::Confirm), Scene::Playing);
        assert_eq!(Scene::Menu.next(SceneInput::OpenLeaderboard), Scene::Leaderboard);
        assert_eq!(Scene::Playing.next(SceneInput::Confirm), Scene::Playing);
        assert_eq!(Scene::Leaderboard.next(SceneInput::Confirm), Scene::Playing);
        assert_eq!(
            Scene::Leaderboard.next(SceneInput::OpenLeaderboard),
            Scene::Leaderboard
        );
    }

    #[test]
    fn test_dialog_produces_submission() {
        let mut dialog = GameOverDialog::new();
        assert!(!dialog.is_open());
        finished(&mut dialog, 2, 150);
        assert!(dialog.captures_input());

        assert!(dialog.handle_key(NameKey::Char('R'), 0.0).is_none());
        let pending = dialog.handle_key(NameKey::Enter, 5.0).unwrap();
        assert_eq!(pending.session_id, 2);
        assert_eq!(pending.record, ScoreRecord::new("R", 150, 5.0));
        assert!(!dialog.captures_input());
        assert!(dialog.submit(6.0).is_none());
    }

    #[test]
    fn test_empty_name_submits_anonymous() {
        let mut dialog = GameOverDialog::new();
        finished(&mut dialog, 1, 150);
        let pending = dialog.submit(0.0).unwrap();
        assert_eq!(pending.record.name, "Anonymous");
        assert_eq!(pending.record.score, 150);
    }

    #[test]
    fn test_stale_receipt_ignored() {
        let mut dialog = GameOverDialog::new();
        finished(&mut dialog, 1, 10);
        let pending = dialog.submit(0.0).unwrap();

        // Player restarted and crashed again before the first submit resolved
        dialog.on_event(&GameEvent::RunStarted { session_id: 2 });
        finished(&mut dialog, 2, 20);

        let late = SubmitReceipt {
            session_id: pending.session_id,
            record: pending.record,
            outcome: SubmitOutcome::Remote,
        };
        assert!(!dialog.apply_receipt(&late));
        assert_eq!(dialog.status(), None);
        assert!(!dialog.offers_leaderboard());
    }

    #[test]
    fn test_current_receipt_updates_status() {
        let mut dialog = GameOverDialog::new();
        finished(&mut dialog, 4, 10);
        let pending = dialog.submit(0.0).unwrap();
        let receipt = SubmitReceipt {
            session_id: 4,
            record: pending.record,
            outcome: SubmitOutcome::StoredLocally,
        };
        assert!(dialog.apply_receipt(&receipt));
        assert_eq!(dialog.status(), Some("Saved offline"));
        assert!(!dialog.offers_leaderboard());
    }
}
