use crate::app::App;
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

const PAGE_LINES: i32 = 5;

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;

    match (key_event.code, key_event.modifiers) {
        // Quit
        (Char('q'), _) | (Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Reload
        (Char('r'), _) => {
            guard.on_scoreboard_loading();
            drop(guard);
            let _ = network_requests.send(NetworkRequest::LoadScoreboard).await;
        }

        // Panel focus and activation
        (Char('j') | KeyCode::Down, _) => guard.focus_next(),
        (Char('k') | KeyCode::Up, _) => guard.focus_prev(),
        (KeyCode::Enter | Char(' '), _) => guard.toggle_focused(),
        (KeyCode::PageDown, _) => guard.scroll_detail(PAGE_LINES),
        (KeyCode::PageUp, _) => guard.scroll_detail(-PAGE_LINES),

        // Global
        (Char('?'), _) => guard.toggle_help(),
        (Char('f'), _) => guard.toggle_full_screen(),
        (Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }
}
