use crate::boxscore::{Fragment, render_box_score};
use crate::state::cache::BoxScoreCache;
use crate::state::messages::NetworkResponse;
use crate::state::network::{SummarySource, fetch_box_score};
use crate::state::poller::PollRegistry;
use log::{debug, error};
use nba_api::{Game, Summary};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(20);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PanelState {
    #[default]
    Closed,
    Open,
}

impl PanelState {
    pub fn toggle_label(self) -> &'static str {
        match self {
            PanelState::Closed => "Box Score",
            PanelState::Open => "Collapse",
        }
    }
}

/// Everything the draw layer needs to project one game panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub state: PanelState,
    pub content: Fragment,
    /// First visible line of the detail area.
    pub scroll: u16,
}

impl Default for Panel {
    fn default() -> Self {
        Self {
            state: PanelState::Closed,
            content: Fragment::Loading,
            scroll: 0,
        }
    }
}

impl Panel {
    pub fn is_open(&self) -> bool {
        self.state == PanelState::Open
    }
}

/// Owns the open/closed state of every panel together with the box score
/// cache and the pollers that keep open panels fresh.
///
/// Fetch outcomes come back through `responses` and must be fed to
/// [`PanelController::on_summary`] by the UI loop; nothing here mutates state
/// from a background task.
pub struct PanelController<S> {
    source: S,
    responses: mpsc::Sender<NetworkResponse>,
    poll_every: Duration,
    panels: HashMap<String, Panel>,
    cache: BoxScoreCache,
    pollers: PollRegistry,
}

impl<S: SummarySource> PanelController<S> {
    pub fn new(source: S, responses: mpsc::Sender<NetworkResponse>, poll_every: Duration) -> Self {
        Self {
            source,
            responses,
            poll_every,
            panels: HashMap::new(),
            cache: BoxScoreCache::default(),
            pollers: PollRegistry::default(),
        }
    }

    /// Replace the panel set after a scoreboard load. Every poller stops and
    /// every panel starts closed; cached box scores are kept.
    pub fn reset(&mut self, games: &[Game]) {
        self.pollers.stop_all();
        self.panels = games
            .iter()
            .map(|game| (game.id.clone(), Panel::default()))
            .collect();
    }

    pub fn panel(&self, game_id: &str) -> Option<&Panel> {
        self.panels.get(game_id)
    }

    pub fn cached(&self, game_id: &str) -> Option<&Fragment> {
        self.cache.get(game_id)
    }

    pub fn is_polling(&self, game_id: &str) -> bool {
        self.pollers.is_polling(game_id)
    }

    pub fn toggle(&mut self, game: &Game) {
        let state = self.panels.get(&game.id).map(|p| p.state).unwrap_or_default();
        match state {
            PanelState::Closed => self.open(game),
            PanelState::Open => self.close(&game.id),
        }
    }

    fn open(&mut self, game: &Game) {
        debug!("opening box score for {}", game.id);
        self.pollers.stop(&game.id);

        let content = self
            .cache
            .get(&game.id)
            .cloned()
            .unwrap_or(Fragment::Loading);
        self.panels.insert(
            game.id.clone(),
            Panel {
                state: PanelState::Open,
                content,
                scroll: 0,
            },
        );

        // The cached fragment above is only a stand-in: the poller fetches
        // straight away and its outcome replaces it.
        let source = self.source.clone();
        let responses = self.responses.clone();
        let game_id = game.id.clone();
        let summary_url = game.summary_url.clone();
        self.pollers.start(&game.id, self.poll_every, move || {
            fetch_box_score(
                source.clone(),
                responses.clone(),
                game_id.clone(),
                summary_url.clone(),
            )
        });
    }

    fn close(&mut self, game_id: &str) {
        debug!("closing box score for {game_id}");
        if let Some(panel) = self.panels.get_mut(game_id) {
            panel.state = PanelState::Closed;
        }
        self.pollers.stop(game_id);
    }

    /// Apply one fetch outcome. Failures only change what the panel shows;
    /// the cache keeps the last good box score.
    pub fn on_summary(&mut self, game_id: &str, result: Result<Summary, String>) {
        let fragment = match result {
            Ok(summary) => {
                let fragment = render_box_score(&summary);
                self.cache.set(game_id, fragment.clone());
                debug!("cached box score for {game_id} ({} cached)", self.cache.len());
                fragment
            }
            Err(message) => {
                error!("Box score fetch failed for {game_id}: {message}");
                Fragment::Unavailable
            }
        };

        if let Some(panel) = self.panels.get_mut(game_id) {
            panel.content = fragment;
        }
    }

    /// Move the detail area of an open panel by `delta` lines, staying within
    /// `0..line_count`.
    pub fn scroll(&mut self, game_id: &str, delta: i32, line_count: usize) {
        let Some(panel) = self.panels.get_mut(game_id).filter(|p| p.is_open()) else {
            return;
        };
        let max = line_count.saturating_sub(1).min(u16::MAX as usize) as i32;
        panel.scroll = (i32::from(panel.scroll) + delta).clamp(0, max) as u16;
    }
}
