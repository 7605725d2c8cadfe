use crate::components::boxscore::fragment_lines;
use crate::mouse::resolve_click;
use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use crate::state::panels::PanelController;
use crate::state::scoreboard::LoadStatus;
use log::{debug, error};
use nba_api::client::NbaApi;
use nba_api::{Game, Summary};
use tui::layout::Position;

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings, panels: PanelController<NbaApi>) -> Self {
        let app = Self {
            state: AppState::new(panels),
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    /// A scoreboard request is going out: pollers stop and the page shows the
    /// loading message until the outcome arrives.
    pub fn on_scoreboard_loading(&mut self) {
        self.state.scoreboard.begin_load();
        self.state.panels.reset(&[]);
        self.state.hits.clear();
    }

    pub fn on_scoreboard_loaded(&mut self, games: Vec<Game>) {
        self.state.panels.reset(&games);
        self.state.scoreboard.on_loaded(games);
        if self.state.scoreboard.status == LoadStatus::Loaded {
            self.state.scoreboard.bind_input();
        }
    }

    pub fn on_scoreboard_failed(&mut self, message: String) {
        error!("Failed to load scoreboard: {message}");
        self.state.scoreboard.on_failed();
    }

    pub fn on_summary_loaded(&mut self, game_id: &str, result: Result<Summary, String>) {
        self.state.panels.on_summary(game_id, result);
    }

    // -----------------------------------------------------------------------
    // Panel input
    // -----------------------------------------------------------------------

    pub fn toggle_focused(&mut self) {
        if !self.state.scoreboard.input_bound() {
            return;
        }
        let AppState { scoreboard, panels, .. } = &mut self.state;
        if let Some(game) = scoreboard.focused_game() {
            panels.toggle(game);
        }
    }

    /// Left click at a screen cell, resolved against the last drawn panels.
    pub fn click(&mut self, column: u16, row: u16) {
        if !self.state.scoreboard.input_bound() {
            return;
        }
        let Some(index) = resolve_click(&self.state.hits, Position::new(column, row)) else {
            return;
        };
        debug!("click on panel {index}");
        self.state.scoreboard.focus(index);
        self.toggle_focused();
    }

    pub fn focus_next(&mut self) {
        self.state.scoreboard.focus_next();
    }

    pub fn focus_prev(&mut self) {
        self.state.scoreboard.focus_prev();
    }

    pub fn scroll_detail(&mut self, delta: i32) {
        let AppState { scoreboard, panels, .. } = &mut self.state;
        let Some(game) = scoreboard.focused_game() else {
            return;
        };
        let Some(line_count) = panels
            .panel(&game.id)
            .map(|panel| fragment_lines(&panel.content).len())
        else {
            return;
        };
        panels.scroll(&game.id, delta, line_count);
    }

    // -----------------------------------------------------------------------
    // View toggles
    // -----------------------------------------------------------------------

    pub fn toggle_help(&mut self) {
        self.state.show_help = !self.state.show_help;
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mouse::PanelHit;
    use crate::state::messages::NetworkResponse;
    use crate::state::panels::PanelState;
    use tokio::sync::mpsc;
    use tui::layout::Rect;

    fn app() -> (App, mpsc::Receiver<NetworkResponse>) {
        let settings = AppSettings {
            api_base: "http://127.0.0.1:9".to_string(),
            ..AppSettings::default()
        };
        let (tx, rx) = mpsc::channel(32);
        let api = NbaApi::with_site_base(settings.api_base.clone());
        let panels = PanelController::new(api, tx, settings.poll_interval);
        (App::new(settings, panels), rx)
    }

    fn games() -> Vec<Game> {
        ["401", "402"]
            .iter()
            .map(|id| Game {
                id: id.to_string(),
                summary_url: format!("http://127.0.0.1:9/summary?event={id}"),
                ..Game::default()
            })
            .collect()
    }

    fn panel_state(app: &App, id: &str) -> PanelState {
        app.state.panels.panel(id).map(|p| p.state).unwrap_or_default()
    }

    #[tokio::test]
    async fn input_is_ignored_until_the_first_load() {
        let (mut app, _rx) = app();
        app.state.scoreboard.games = games();

        app.toggle_focused();
        assert_eq!(panel_state(&app, "401"), PanelState::Closed);
        assert!(!app.state.panels.is_polling("401"));
    }

    #[tokio::test]
    async fn enter_toggles_the_focused_panel() {
        let (mut app, _rx) = app();
        app.on_scoreboard_loaded(games());
        assert!(app.state.scoreboard.input_bound());

        app.focus_next();
        app.toggle_focused();
        assert_eq!(panel_state(&app, "401"), PanelState::Closed);
        assert_eq!(panel_state(&app, "402"), PanelState::Open);
        assert!(app.state.panels.is_polling("402"));

        app.toggle_focused();
        assert_eq!(panel_state(&app, "402"), PanelState::Closed);
        assert!(!app.state.panels.is_polling("402"));
    }

    #[tokio::test]
    async fn click_focuses_and_toggles_once() {
        let (mut app, _rx) = app();
        app.on_scoreboard_loaded(games());
        app.state.hits = vec![
            PanelHit {
                index: 0,
                area: Rect::new(0, 0, 60, 4),
                toggle: Rect::new(1, 2, 11, 1),
                detail: None,
            },
            PanelHit {
                index: 1,
                area: Rect::new(0, 4, 60, 4),
                toggle: Rect::new(1, 6, 11, 1),
                detail: None,
            },
        ];

        app.click(3, 6);
        assert_eq!(app.state.scoreboard.focused, 1);
        assert_eq!(panel_state(&app, "402"), PanelState::Open);

        app.click(70, 70);
        assert_eq!(panel_state(&app, "402"), PanelState::Open);
    }

    #[tokio::test]
    async fn reload_stops_pollers_and_keeps_binding() {
        let (mut app, _rx) = app();
        app.on_scoreboard_loaded(games());
        app.toggle_focused();
        assert!(app.state.panels.is_polling("401"));

        app.on_scoreboard_loading();
        assert!(!app.state.panels.is_polling("401"));
        assert_eq!(app.state.scoreboard.message(), Some("Loading…"));

        app.on_scoreboard_loaded(games());
        assert!(app.state.scoreboard.input_bound());
        assert!(!app.state.scoreboard.bind_input());
        assert_eq!(panel_state(&app, "401"), PanelState::Closed);
    }

    #[tokio::test]
    async fn failed_load_shows_page_message() {
        let (mut app, _rx) = app();
        app.on_scoreboard_failed("HTTP 500".to_string());
        assert_eq!(app.state.scoreboard.message(), Some("Failed to load scores."));
        assert!(!app.state.scoreboard.input_bound());
    }
}
