use crate::mouse::PanelHit;
use crate::state::panels::PanelController;
use crate::state::scoreboard::ScoreboardState;
use nba_api::client::NbaApi;

pub struct AppState {
    pub show_help: bool,
    pub show_logs: bool,
    pub scoreboard: ScoreboardState,
    pub panels: PanelController<NbaApi>,
    /// Clickable regions from the last draw, in screen order.
    pub hits: Vec<PanelHit>,
}

impl AppState {
    pub fn new(panels: PanelController<NbaApi>) -> Self {
        Self {
            show_help: false,
            show_logs: false,
            scoreboard: ScoreboardState::default(),
            panels,
            hits: Vec::new(),
        }
    }
}
