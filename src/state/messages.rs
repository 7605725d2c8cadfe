use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use nba_api::{Game, Summary};

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadScoreboard,
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    ScoreboardLoaded { games: Vec<Game> },
    ScoreboardFailed { message: String },
    /// Sent by box score pollers, one per fetch attempt.
    SummaryLoaded {
        game_id: String,
        result: Result<Summary, String>,
    },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    MouseClicked { column: u16, row: u16 },
    Resize,
    AppStarted,
}
