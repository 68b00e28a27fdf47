//! Leaderboard screen contents

use super::record::ScoreRecord;

/// What the leaderboard screen shows
#[derive(Debug, Clone, PartialEq)]
pub enum LeaderboardView {
    /// Service answered; an empty list means nobody has played yet
    Remote(Vec<ScoreRecord>),
    /// Service unreachable; locally kept scores instead
    Local(Vec<ScoreRecord>),
}

impl LeaderboardView {
    pub fn rows(&self) -> &[ScoreRecord] {
        match self {
            LeaderboardView::Remote(rows) | LeaderboardView::Local(rows) => rows,
        }
    }

    /// Text lines for the screen, ranked rows first
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .rows()
            .iter()
            .enumerate()
            .map(|(i, r)| format!("{}. {}: {}", i + 1, r.name, r.score))
            .collect();

        match self {
            LeaderboardView::Remote(rows) if rows.is_empty() => {
                lines.push("No scores yet! Be the first!".to_string());
            }
            LeaderboardView::Local(rows) if rows.is_empty() => {
                lines.push("Could not load scores from server".to_string());
                lines.push("No local scores available".to_string());
            }
            _ => {}
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranked_lines() {
        let view = LeaderboardView::Remote(vec![
            ScoreRecord::new("T-Rex", 1500, 0.0),
            ScoreRecord::new("Raptor", 1200, 0.0),
        ]);
        assert_eq!(view.lines(), vec!["1. T-Rex: 1500", "2. Raptor: 1200"]);
    }

    #[test]
    fn test_empty_remote_differs_from_failure() {
        let empty = LeaderboardView::Remote(Vec::new()).lines();
        let failed = LeaderboardView::Local(Vec::new()).lines();
        assert_eq!(empty, vec!["No scores yet! Be the first!"]);
        assert_eq!(failed[0], "Could not load scores from server");
        assert_ne!(empty, failed);
    }
}
