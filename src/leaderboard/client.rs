//! Leaderboard service clients
//!
//! The reporter only needs two calls: post one score, list all scores.
//! Transport is the host's business; the browser build talks HTTP through
//! `fetch`, headless runs use an in-process board.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::record::{ScoreRecord, sort_descending};
use crate::error::ReportError;

/// Scores kept by the service
pub const MAX_REMOTE_SCORES: usize = 100;

/// Remote leaderboard (`POST /score`, `GET /scores`)
#[allow(async_fn_in_trait)]
pub trait LeaderboardClient {
    async fn post_score(&self, record: &ScoreRecord) -> Result<(), ReportError>;
    async fn fetch_scores(&self) -> Result<Vec<ScoreRecord>, ReportError>;
}

impl<T: LeaderboardClient> LeaderboardClient for Rc<T> {
    async fn post_score(&self, record: &ScoreRecord) -> Result<(), ReportError> {
        (**self).post_score(record).await
    }

    async fn fetch_scores(&self) -> Result<Vec<ScoreRecord>, ReportError> {
        (**self).fetch_scores().await
    }
}

/// In-process leaderboard with the service's rules: sorted high to low,
/// top [`MAX_REMOTE_SCORES`] kept.
#[derive(Debug, Default)]
pub struct MemoryLeaderboard {
    scores: RefCell<Vec<ScoreRecord>>,
    offline: Cell<bool>,
}

impl MemoryLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Board pre-filled with the service's starter scores
    pub fn with_starter_scores() -> Self {
        let board = Self::new();
        *board.scores.borrow_mut() = vec![
            ScoreRecord::new("T-Rex", 1500, 0.0),
            ScoreRecord::new("Raptor", 1200, 0.0),
            ScoreRecord::new("Stego", 900, 0.0),
        ];
        board
    }

    /// Make every call fail with a network error
    pub fn set_offline(&self, offline: bool) {
        self.offline.set(offline);
    }

    pub fn len(&self) -> usize {
        self.scores.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.borrow().is_empty()
    }

    fn check_online(&self) -> Result<(), ReportError> {
        if self.offline.get() {
            Err(ReportError::NetworkFailure("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

impl LeaderboardClient for MemoryLeaderboard {
    async fn post_score(&self, record: &ScoreRecord) -> Result<(), ReportError> {
        self.check_online()?;
        log::info!("Received score: {} from {}", record.score, record.name);
        let mut scores = self.scores.borrow_mut();
        scores.push(record.clone());
        sort_descending(&mut scores);
        scores.truncate(MAX_REMOTE_SCORES);
        Ok(())
    }

    async fn fetch_scores(&self) -> Result<Vec<ScoreRecord>, ReportError> {
        self.check_online()?;
        Ok(self.scores.borrow().clone())
    }
}

#[cfg(target_arch = "wasm32")]
pub use fetch::FetchClient;

#[cfg(target_arch = "wasm32")]
mod fetch {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, RequestMode, Response};

    use super::LeaderboardClient;
    use crate::error::ReportError;
    use crate::leaderboard::record::{ScoreRecord, ScoreSubmission};

    fn js_err(e: JsValue) -> ReportError {
        ReportError::NetworkFailure(format!("{:?}", e))
    }

    /// HTTP client over the browser's `fetch`
    #[derive(Debug, Clone)]
    pub struct FetchClient {
        base_url: String,
    }

    impl FetchClient {
        pub fn new(base_url: &str) -> Self {
            Self {
                base_url: base_url.trim_end_matches('/').to_string(),
            }
        }

        async fn send(
            &self,
            method: &str,
            path: &str,
            body: Option<String>,
        ) -> Result<Response, ReportError> {
            let opts = RequestInit::new();
            opts.set_method(method);
            opts.set_mode(RequestMode::Cors);
            if let Some(body) = &body {
                opts.set_body(&JsValue::from_str(body));
            }

            let url = format!("{}{}", self.base_url, path);
            let request = Request::new_with_str_and_init(&url, &opts).map_err(js_err)?;
            if body.is_some() {
                request
                    .headers()
                    .set("Content-Type", "application/json")
                    .map_err(js_err)?;
            }

            let window = web_sys::window()
                .ok_or_else(|| ReportError::NetworkFailure("no window".to_string()))?;
            let value = JsFuture::from(window.fetch_with_request(&request))
                .await
                .map_err(js_err)?;
            let response: Response = value
                .dyn_into()
                .map_err(|_| ReportError::MalformedResponse("not a Response".to_string()))?;

            if !response.ok() {
                return Err(ReportError::NetworkFailure(format!(
                    "{} {} returned HTTP {}",
                    method,
                    path,
                    response.status()
                )));
            }
            Ok(response)
        }
    }

    impl LeaderboardClient for FetchClient {
        async fn post_score(&self, record: &ScoreRecord) -> Result<(), ReportError> {
            let body = serde_json::to_string(&ScoreSubmission::from(record))?;
            self.send("POST", "/score", Some(body)).await?;
            Ok(())
        }

        async fn fetch_scores(&self) -> Result<Vec<ScoreRecord>, ReportError> {
            let response = self.send("GET", "/scores", None).await?;
            let text = JsFuture::from(response.text().map_err(js_err)?)
                .await
                .map_err(js_err)?
                .as_string()
                .ok_or_else(|| ReportError::MalformedResponse("body is not text".to_string()))?;
            Ok(serde_json::from_str(&text)?)
        }
    }
}
