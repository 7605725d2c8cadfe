use crate::state::messages::{NetworkRequest, NetworkResponse};
use log::{debug, error};
use nba_api::Summary;
use nba_api::client::{ApiError, NbaApi};
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Where box score pollers get their data from.
pub trait SummarySource: Clone + Send + Sync + 'static {
    fn load_summary(&self, summary_url: &str) -> impl Future<Output = anyhow::Result<Summary>> + Send;
}

impl SummarySource for NbaApi {
    async fn load_summary(&self, summary_url: &str) -> anyhow::Result<Summary> {
        Ok(self.fetch_summary(summary_url).await?)
    }
}

/// Fetch one box score and hand the outcome to the UI loop.
pub async fn fetch_box_score<S: SummarySource>(
    source: S,
    responses: mpsc::Sender<NetworkResponse>,
    game_id: String,
    summary_url: String,
) {
    debug!("fetching box score for {game_id}");
    let result = source
        .load_summary(&summary_url)
        .await
        .map_err(|e| format!("{e:#}"));

    if let Err(e) = responses
        .send(NetworkResponse::SummaryLoaded { game_id, result })
        .await
    {
        error!("Failed to send box score response: {e}");
    }
}

/// Serves scoreboard loads and drives the header spinner while they run.
pub struct NetworkWorker {
    client: NbaApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        client: NbaApi,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client,
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let result = match request {
                NetworkRequest::LoadScoreboard => self.handle_load_scoreboard().await,
            };

            debug!("network request complete");
            self.stop_loading_animation(result.is_ok()).await;

            let response = result.unwrap_or_else(|err| NetworkResponse::ScoreboardFailed {
                message: err.to_string(),
            });

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle_load_scoreboard(&self) -> Result<NetworkResponse, ApiError> {
        debug!("loading scoreboard from {}", self.client.site_base());
        let games = self.client.fetch_scoreboard().await?;
        debug!("scoreboard has {} games", games.len());
        Ok(NetworkResponse::ScoreboardLoaded { games })
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}
