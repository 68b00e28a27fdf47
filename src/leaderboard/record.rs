//! Finished-run records

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_NAME, MAX_NAME_LEN};

/// One finished run. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    pub score: u32,
    /// Unix timestamp (ms); the service may omit it
    #[serde(rename = "date", alias = "timestamp", default)]
    pub timestamp: f64,
}

impl ScoreRecord {
    /// Build a record, defaulting empty names and truncating long ones
    pub fn new(name: &str, score: u32, timestamp: f64) -> Self {
        Self {
            name: sanitize_name(name),
            score,
            timestamp,
        }
    }
}

/// Body of `POST /score`
#[derive(Debug, Serialize)]
pub struct ScoreSubmission<'a> {
    pub name: &'a str,
    pub score: u32,
}

impl<'a> From<&'a ScoreRecord> for ScoreSubmission<'a> {
    fn from(record: &'a ScoreRecord) -> Self {
        Self {
            name: &record.name,
            score: record.score,
        }
    }
}

/// At most [`MAX_NAME_LEN`] characters, [`DEFAULT_NAME`] if empty
pub fn sanitize_name(name: &str) -> String {
    let name: String = name.chars().take(MAX_NAME_LEN).collect();
    if name.is_empty() {
        DEFAULT_NAME.to_string()
    } else {
        name
    }
}

/// Highest score first; ties keep their original order
pub fn sort_descending(records: &mut [ScoreRecord]) {
    records.sort_by(|a, b| b.score.cmp(&a.score));
}

/// Top `n` records by score
pub fn top_n(mut records: Vec<ScoreRecord>, n: usize) -> Vec<ScoreRecord> {
    sort_descending(&mut records);
    records.truncate(n);
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_defaults() {
        let r = ScoreRecord::new("", 150, 0.0);
        assert_eq!(r.name, "Anonymous");
        assert_eq!(r.score, 150);
    }

    #[test]
    fn test_long_name_truncated() {
        let r = ScoreRecord::new("Tyrannosaurus Rex the Great", 1, 0.0);
        assert_eq!(r.name, "Tyrannosaurus R");
        assert_eq!(r.name.chars().count(), MAX_NAME_LEN);
    }

    #[test]
    fn test_remote_entry_without_timestamp() {
        let records: Vec<ScoreRecord> =
            serde_json::from_str(r#"[{"name":"T-Rex","score":1500}]"#).unwrap();
        assert_eq!(records[0].timestamp, 0.0);
    }

    #[test]
    fn test_local_entry_uses_date_key() {
        let json = serde_json::to_string(&ScoreRecord::new("a", 3, 12.0)).unwrap();
        assert_eq!(json, r#"{"name":"a","score":3,"date":12.0}"#);
    }

    #[test]
    fn test_submission_body() {
        let r = ScoreRecord::new("Rex", 7, 1.0);
        let body = serde_json::to_string(&ScoreSubmission::from(&r)).unwrap();
        assert_eq!(body, r#"{"name":"Rex","score":7}"#);
    }

    #[test]
    fn test_top_n() {
        let records = vec![
            ScoreRecord::new("a", 10, 0.0),
            ScoreRecord::new("b", 30, 0.0),
            ScoreRecord::new("c", 20, 0.0),
        ];
        let top = top_n(records, 2);
        assert_eq!(top.iter().map(|r| r.score).collect::<Vec<_>>(), vec![30, 20]);
    }
}
