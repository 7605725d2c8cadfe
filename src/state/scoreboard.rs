use chrono::{DateTime, Local};
use log::debug;
use nba_api::Game;

pub const LOADING_TEXT: &str = "Loading…";
pub const FAILED_TEXT: &str = "Failed to load scores.";
pub const EMPTY_TEXT: &str = "No games today.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Loading,
    Failed,
    Empty,
    Loaded,
}

#[derive(Debug, Default)]
pub struct ScoreboardState {
    pub status: LoadStatus,
    pub games: Vec<Game>,
    /// Index into `games` of the panel that receives Enter/Space.
    pub focused: usize,
    pub last_updated: Option<DateTime<Local>>,
    input_bound: bool,
}

impl ScoreboardState {
    /// Page-level message shown instead of the panel list.
    pub fn message(&self) -> Option<&'static str> {
        match self.status {
            LoadStatus::Loading => Some(LOADING_TEXT),
            LoadStatus::Failed => Some(FAILED_TEXT),
            LoadStatus::Empty => Some(EMPTY_TEXT),
            LoadStatus::Loaded => None,
        }
    }

    pub fn begin_load(&mut self) {
        self.status = LoadStatus::Loading;
        self.games.clear();
        self.focused = 0;
    }

    pub fn on_loaded(&mut self, games: Vec<Game>) {
        self.status = if games.is_empty() {
            LoadStatus::Empty
        } else {
            LoadStatus::Loaded
        };
        self.games = games;
        self.focused = 0;
        self.last_updated = Some(Local::now());
    }

    pub fn on_failed(&mut self) {
        self.status = LoadStatus::Failed;
        self.games.clear();
        self.focused = 0;
    }

    /// Enable panel input. Returns false when it was already enabled, so a
    /// reload never binds twice.
    pub fn bind_input(&mut self) -> bool {
        if self.input_bound {
            return false;
        }
        debug!("binding panel input");
        self.input_bound = true;
        true
    }

    pub fn input_bound(&self) -> bool {
        self.input_bound
    }

    pub fn focused_game(&self) -> Option<&Game> {
        self.games.get(self.focused)
    }

    pub fn focus(&mut self, index: usize) {
        if index < self.games.len() {
            self.focused = index;
        }
    }

    pub fn focus_next(&mut self) {
        self.focus(self.focused + 1);
    }

    pub fn focus_prev(&mut self) {
        self.focused = self.focused.saturating_sub(1);
    }
}
