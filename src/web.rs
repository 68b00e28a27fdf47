//! Browser bindings
//!
//! The JS engine owns sprites, physics and input devices. Each animation
//! frame it pushes an input snapshot in, calls `update`, applies the returned
//! events to its bodies and draws from `frame`.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::consts::{LEADERBOARD_ROWS, MAX_SUBSTEPS, SIM_DT};
use crate::leaderboard::{
    FetchClient, LOCAL_SCORES_KEY, LeaderboardView, NameKey, ScoreReporter, SubmitReceipt,
};
use crate::platform::{LocalStorageStore, now_ms};
use crate::scene::{GameOverDialog, PendingSubmission, Scene, SceneInput};
use crate::sim::{FrameView, RunSession, TickInput, tick};

type WebReporter = ScoreReporter<FetchClient, LocalStorageStore>;

/// Set up logging and panic reporting
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Dino Run starting");
}

#[wasm_bindgen]
pub struct WebGame {
    session: RunSession,
    scene: Scene,
    dialog: GameOverDialog,
    input: TickInput,
    accumulator: f32,
    reporter: Rc<WebReporter>,
    /// Filled by spawned submit tasks, drained in `update`
    receipts: Rc<RefCell<Vec<SubmitReceipt>>>,
    leaderboard: Rc<RefCell<Option<LeaderboardView>>>,
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let config = GameConfig::load();
        let reporter = ScoreReporter::new(
            FetchClient::new(&config.leaderboard_url),
            LocalStorageStore::new(LOCAL_SCORES_KEY),
        );
        WebGame {
            session: RunSession::new(config),
            scene: Scene::Menu,
            dialog: GameOverDialog::new(),
            input: TickInput::default(),
            accumulator: 0.0,
            reporter: Rc::new(reporter),
            receipts: Rc::new(RefCell::new(Vec::new())),
            leaderboard: Rc::new(RefCell::new(None)),
        }
    }

    /// Jump key state; ignored while the name field has focus
    pub fn set_jump(&mut self, held: bool) {
        self.input.jump_held = held && !self.dialog.captures_input();
    }

    pub fn set_grounded(&mut self, grounded: bool) {
        self.input.grounded = grounded;
    }

    /// Called from the engine's player/obstacle collider callback
    pub fn report_collision(&mut self) {
        self.input.collided = true;
    }

    /// Run simulation ticks for a frame; returns the frame's events as JSON
    pub fn update(&mut self, dt: f32) -> String {
        for receipt in self.receipts.borrow_mut().drain(..) {
            self.dialog.apply_receipt(&receipt);
        }

        if self.scene != Scene::Playing {
            return "[]".to_string();
        }

        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.session, &self.input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Collision is one-shot
            self.input.collided = false;
            events.extend(self.session.drain_events());
        }

        for event in &events {
            self.dialog.on_event(event);
        }

        serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
    }

    /// Render snapshot as JSON
    pub fn frame(&self) -> String {
        serde_json::to_string(&FrameView::capture(&self.session)).unwrap_or_default()
    }

    pub fn scene(&self) -> String {
        format!("{:?}", self.scene)
    }

    /// Space on the menu or leaderboard screen
    pub fn confirm(&mut self) {
        let next = self.scene.next(SceneInput::Confirm);
        if self.scene == Scene::Leaderboard && next == Scene::Playing {
            self.session.restart();
        }
        self.scene = next;
    }

    /// Leaderboard button; starts loading scores
    pub fn open_leaderboard(&mut self) {
        self.scene = self.scene.next(SceneInput::OpenLeaderboard);
        if self.scene != Scene::Leaderboard {
            return;
        }
        *self.leaderboard.borrow_mut() = None;
        let reporter = Rc::clone(&self.reporter);
        let slot = Rc::clone(&self.leaderboard);
        wasm_bindgen_futures::spawn_local(async move {
            let view = reporter.fetch_top(LEADERBOARD_ROWS).await;
            *slot.borrow_mut() = Some(view);
        });
    }

    /// Leaderboard text lines as JSON (`null` while loading)
    pub fn leaderboard_lines(&self) -> String {
        match self.leaderboard.borrow().as_ref() {
            Some(view) => serde_json::to_string(&view.lines()).unwrap_or_default(),
            None => "null".to_string(),
        }
    }

    /// Key press for the name dialog (`"Backspace"`, `"Enter"` or one character)
    pub fn name_key(&mut self, key: &str) {
        let key = match key {
            "Backspace" => NameKey::Backspace,
            "Enter" => NameKey::Enter,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => NameKey::Char(c),
                    _ => return,
                }
            }
        };
        if let Some(pending) = self.dialog.handle_key(key, now_ms()) {
            self.dispatch(pending);
        }
    }

    pub fn submit_name(&mut self) {
        if let Some(pending) = self.dialog.submit(now_ms()) {
            self.dispatch(pending);
        }
    }

    pub fn dialog_text(&self) -> Option<String> {
        self.dialog.name_display().map(str::to_string)
    }

    pub fn dialog_status(&self) -> Option<String> {
        self.dialog.status().map(str::to_string)
    }

    pub fn offers_leaderboard(&self) -> bool {
        self.dialog.offers_leaderboard()
    }
}

impl WebGame {
    /// Fire-and-forget submit; the tick loop never waits on it
    fn dispatch(&self, pending: PendingSubmission) {
        let reporter = Rc::clone(&self.reporter);
        let receipts = Rc::clone(&self.receipts);
        wasm_bindgen_futures::spawn_local(async move {
            let receipt = reporter
                .submit_for(pending.session_id, pending.record)
                .await;
            receipts.borrow_mut().push(receipt);
        });
    }
}
