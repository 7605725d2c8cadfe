use crate::espn::{
    EspnAthleteStats, EspnCompetitor, EspnDidNotPlay, EspnEvent, EspnScore, EspnTeam,
    EspnTeamPlayers, EspnText, ScoreboardResponse, SummaryResponse,
};
use crate::{AthleteLine, Game, StatusState, Summary, Team, TeamPlayers};
use log::warn;
use reqwest::Client;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const ESPN_NBA_SITE: &str = "https://site.api.espn.com/apis/site/v2/sports/basketball/nba";
const ESPN_WEB: &str = "https://www.espn.com";

/// NBA API client backed by ESPN's public endpoints.
#[derive(Debug, Clone)]
pub struct NbaApi {
    client: Client,
    timeout: Duration,
    site_base: String,
}

impl Default for NbaApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("hoopboard/0.1 (terminal scoreboard)")
                .build()
                .unwrap_or_default(),
            timeout: Duration::from_secs(10),
            site_base: ESPN_NBA_SITE.to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl NbaApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at a different site API root, e.g. a local mirror.
    pub fn with_site_base(site_base: impl Into<String>) -> Self {
        let site_base: String = site_base.into();
        Self {
            site_base: site_base.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn site_base(&self) -> &str {
        &self.site_base
    }

    /// Fetch today's scoreboard. Events that cannot form a panel are dropped.
    pub async fn fetch_scoreboard(&self) -> ApiResult<Vec<Game>> {
        let url = format!("{}/scoreboard", self.site_base);
        let raw: ScoreboardResponse = self.get(&url).await?;
        Ok(map_scoreboard(raw, &self.site_base))
    }

    /// Fetch the box score for one game. `summary_url` comes from `Game::summary_url`.
    pub async fn fetch_summary(&self, summary_url: &str) -> ApiResult<Summary> {
        let raw: SummaryResponse = self.get(summary_url).await?;
        Ok(map_summary(raw))
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        response
            .error_for_status()
            .map_err(|e| ApiError::Api(e, url.to_owned()))?
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parsing(e, url.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Mapping: ESPN wire types → clean domain types
// ---------------------------------------------------------------------------

pub fn map_scoreboard(raw: ScoreboardResponse, site_base: &str) -> Vec<Game> {
    raw.events
        .unwrap_or_default()
        .iter()
        .filter_map(|event| map_event_to_game(event, site_base))
        .collect()
}

fn map_event_to_game(event: &EspnEvent, site_base: &str) -> Option<Game> {
    let Some(id) = event
        .id
        .clone()
        .and_then(EspnText::into_text)
        .filter(|id| !id.is_empty())
    else {
        warn!("skipping scoreboard event without an id");
        return None;
    };

    let competition = event.competitions.as_deref().and_then(|c| c.first());
    let competitors = competition
        .and_then(|c| c.competitors.as_deref())
        .unwrap_or_default();

    let Some((away, home)) = split_competitors(competitors) else {
        warn!(
            "skipping event {id}: expected two competitors, got {}",
            competitors.len()
        );
        return None;
    };

    let status_type = competition
        .and_then(|c| c.status.as_ref())
        .and_then(|s| s.status_type.as_ref());

    Some(Game {
        summary_url: format!("{site_base}/summary?event={id}"),
        game_link: format!("{ESPN_WEB}/nba/game?gameId={id}"),
        status_text: status_type
            .and_then(|t| t.detail.clone())
            .unwrap_or_default(),
        status_state: status_type
            .and_then(|t| t.state.as_deref())
            .map(StatusState::from_wire)
            .unwrap_or_default(),
        home: map_competitor(home),
        away: map_competitor(away),
        id,
    })
}

/// Pick the (away, home) pair. Competitors carrying a `homeAway` marker take
/// their role; unmarked ones fill whatever is left in list order, away first.
fn split_competitors(
    competitors: &[EspnCompetitor],
) -> Option<(&EspnCompetitor, &EspnCompetitor)> {
    if competitors.len() < 2 {
        return None;
    }

    let marked = |role: &str| {
        competitors
            .iter()
            .position(|c| c.home_away.as_deref() == Some(role))
    };
    let marked_home = marked("home");
    let marked_away = marked("away");

    let mut unmarked =
        (0..competitors.len()).filter(|i| Some(*i) != marked_home && Some(*i) != marked_away);
    let away = marked_away.or_else(|| unmarked.next())?;
    let home = marked_home.or_else(|| unmarked.next())?;

    Some((&competitors[away], &competitors[home]))
}

fn map_competitor(c: &EspnCompetitor) -> Team {
    let team = c.team.as_ref();
    let fallback = Team::default();

    Team {
        name: team
            .and_then(|t| t.display_name.clone())
            .filter(|n| !n.is_empty())
            .unwrap_or(fallback.name),
        short: team
            .and_then(|t| t.abbreviation.clone())
            .filter(|a| !a.is_empty())
            .unwrap_or(fallback.short),
        score: coerce_score(c.score.as_ref()),
        logo: team.map(resolve_logo).unwrap_or_default(),
    }
}

/// Missing, negative or non-numeric scores read as 0.
fn coerce_score(score: Option<&EspnScore>) -> u32 {
    match score {
        Some(EspnScore::Text(s)) => s.trim().parse::<u32>().unwrap_or(0),
        Some(EspnScore::Number(n)) if n.is_finite() && *n >= 0.0 => *n as u32,
        _ => 0,
    }
}

fn resolve_logo(team: &EspnTeam) -> String {
    team.logos
        .iter()
        .flatten()
        .find_map(|logo| logo.href.clone().filter(|href| !href.is_empty()))
        .or_else(|| team.logo.clone())
        .unwrap_or_default()
}

pub fn map_summary(raw: SummaryResponse) -> Summary {
    let players = raw
        .boxscore
        .and_then(|b| b.players)
        .unwrap_or_default()
        .into_iter()
        .map(map_team_players)
        .collect();

    Summary { players }
}

fn map_team_players(raw: EspnTeamPlayers) -> TeamPlayers {
    let team_name = raw
        .team
        .and_then(|t| t.display_name)
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "Team".to_string());

    // Only the first category carries the per-player lines we show.
    let category = raw.statistics.unwrap_or_default().into_iter().next();
    let (keys, athletes) = category
        .map(|cat| {
            let athletes = cat
                .athletes
                .unwrap_or_default()
                .into_iter()
                .map(map_athlete)
                .collect();
            (texts(cat.keys), athletes)
        })
        .unwrap_or_default();

    TeamPlayers {
        team_name,
        keys,
        athletes,
    }
}

fn map_athlete(raw: EspnAthleteStats) -> AthleteLine {
    let did_not_play = match raw.did_not_play {
        Some(EspnDidNotPlay::Detail { reason }) => reason,
        Some(EspnDidNotPlay::Flag(true)) => raw.reason,
        _ => None,
    }
    .filter(|reason| !reason.trim().is_empty());

    AthleteLine {
        name: raw
            .athlete
            .and_then(|a| a.display_name)
            .unwrap_or_else(|| "Player".to_string()),
        stats: texts(raw.stats),
        did_not_play,
    }
}

/// Null or unreadable entries become empty strings so positions still line
/// up with the stat keys.
fn texts(values: Option<Vec<Option<EspnText>>>) -> Vec<String> {
    values
        .unwrap_or_default()
        .into_iter()
        .map(|v| v.and_then(EspnText::into_text).unwrap_or_default())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Side;
    use serde_json::json;

    fn scoreboard(value: serde_json::Value) -> Vec<Game> {
        let raw: ScoreboardResponse = serde_json::from_value(value).unwrap();
        map_scoreboard(raw, ESPN_NBA_SITE)
    }

    fn event(competitors: serde_json::Value, state: &str) -> serde_json::Value {
        json!({
            "id": "401585",
            "competitions": [{
                "competitors": competitors,
                "status": { "type": { "detail": "Q3 4:12", "state": state } }
            }]
        })
    }

    #[test]
    fn maps_home_and_away_by_marker() {
        let games = scoreboard(json!({ "events": [event(json!([
            { "homeAway": "home", "score": "88", "team": { "displayName": "Boston Celtics", "abbreviation": "BOS" } },
            { "homeAway": "away", "score": "90", "team": { "displayName": "New York Knicks", "abbreviation": "NYK" } }
        ]), "in")] }));

        assert_eq!(games.len(), 1);
        let game = &games[0];
        assert_eq!(game.home.short, "BOS");
        assert_eq!(game.home.score, 88);
        assert_eq!(game.away.short, "NYK");
        assert_eq!(game.away.score, 90);
        assert_eq!(game.status_text, "Q3 4:12");
        assert_eq!(game.status_state, StatusState::In);
        assert!(game.is_live());
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn builds_summary_and_game_links_from_id() {
        let games = scoreboard(json!({ "events": [event(json!([
            { "homeAway": "away" }, { "homeAway": "home" }
        ]), "pre")] }));

        assert_eq!(
            games[0].summary_url,
            format!("{ESPN_NBA_SITE}/summary?event=401585")
        );
        assert_eq!(games[0].game_link, "https://www.espn.com/nba/game?gameId=401585");
    }

    #[test]
    fn missing_fields_fall_back_to_placeholders() {
        let games = scoreboard(json!({ "events": [event(json!([
            { "homeAway": "home", "score": "not a number", "team": {} },
            { "homeAway": "away" }
        ]), "pre")] }));

        let game = &games[0];
        for team in [&game.home, &game.away] {
            assert_eq!(team.name, "Team");
            assert_eq!(team.short, "--");
            assert_eq!(team.score, 0);
            assert_eq!(team.logo, "");
        }
    }

    #[test]
    fn numeric_and_negative_scores_are_coerced() {
        let games = scoreboard(json!({ "events": [event(json!([
            { "homeAway": "home", "score": 101 },
            { "homeAway": "away", "score": "-4" }
        ]), "post")] }));

        assert_eq!(games[0].home.score, 101);
        assert_eq!(games[0].away.score, 0);
        assert_eq!(games[0].winner(), Some(Side::Home));
    }

    #[test]
    fn unmarked_competitors_fill_remaining_roles_in_order() {
        let games = scoreboard(json!({ "events": [event(json!([
            { "team": { "abbreviation": "AAA" } },
            { "team": { "abbreviation": "BBB" } }
        ]), "pre")] }));
        assert_eq!(games[0].away.short, "AAA");
        assert_eq!(games[0].home.short, "BBB");

        let games = scoreboard(json!({ "events": [event(json!([
            { "homeAway": "home", "team": { "abbreviation": "AAA" } },
            { "homeAway": "home", "team": { "abbreviation": "BBB" } }
        ]), "pre")] }));
        assert_eq!(games[0].home.short, "AAA");
        assert_eq!(games[0].away.short, "BBB");
    }

    #[test]
    fn events_without_two_competitors_are_skipped() {
        let games = scoreboard(json!({ "events": [
            event(json!([{ "homeAway": "home" }]), "pre"),
            event(json!([]), "pre"),
            { "competitions": [] },
            event(json!([{ "homeAway": "home" }, { "homeAway": "away" }, { "homeAway": "away" }]), "in")
        ] }));
        assert_eq!(games.len(), 1);
    }

    #[test]
    fn logo_prefers_first_logo_with_href() {
        let games = scoreboard(json!({ "events": [event(json!([
            { "homeAway": "home", "team": {
                "logos": [{ "width": 500 }, { "href": "https://a.espncdn.com/bos.png" }],
                "logo": "https://a.espncdn.com/fallback.png"
            } },
            { "homeAway": "away", "team": { "logos": [], "logo": "https://a.espncdn.com/nyk.png" } }
        ]), "pre")] }));

        assert_eq!(games[0].home.logo, "https://a.espncdn.com/bos.png");
        assert_eq!(games[0].away.logo, "https://a.espncdn.com/nyk.png");
    }

    #[test]
    fn unknown_status_state_maps_to_unknown() {
        assert_eq!(StatusState::from_wire("pre"), StatusState::Pre);
        assert_eq!(StatusState::from_wire("post"), StatusState::Post);
        assert_eq!(StatusState::from_wire("delayed"), StatusState::Unknown);
    }

    #[test]
    fn summary_maps_first_statistics_block() {
        let raw: SummaryResponse = serde_json::from_value(json!({
            "boxscore": { "players": [{
                "team": { "displayName": "Boston Celtics" },
                "statistics": [{
                    "keys": ["minutes", "points"],
                    "athletes": [
                        { "athlete": { "displayName": "Jayson Tatum" }, "stats": ["36", "31"] },
                        { "athlete": { "displayName": "Neemias Queta" }, "stats": [], "didNotPlay": { "reason": "COACH'S DECISION" } },
                        { "athlete": { "displayName": "Xavier Tillman" }, "stats": [], "didNotPlay": true, "reason": "ILLNESS" },
                        { "stats": ["1", "0"], "didNotPlay": false }
                    ]
                }]
            }] }
        }))
        .unwrap();

        let summary = map_summary(raw);
        let team = &summary.players[0];
        assert_eq!(team.team_name, "Boston Celtics");
        assert_eq!(team.keys, vec!["minutes", "points"]);
        assert_eq!(team.athletes[0].stats, vec!["36", "31"]);
        assert_eq!(team.athletes[0].did_not_play, None);
        assert_eq!(team.athletes[1].did_not_play.as_deref(), Some("COACH'S DECISION"));
        assert_eq!(team.athletes[2].did_not_play.as_deref(), Some("ILLNESS"));
        assert_eq!(team.athletes[3].name, "Player");
        assert_eq!(team.athletes[3].did_not_play, None);
    }

    #[test]
    fn odd_stat_values_do_not_reject_the_summary() {
        let raw: SummaryResponse = serde_json::from_value(json!({
            "boxscore": { "players": [{
                "team": { "displayName": "Boston Celtics" },
                "statistics": [{
                    "keys": ["minutes", null, "points"],
                    "athletes": [
                        { "athlete": { "displayName": "Jayson Tatum" }, "stats": ["36", null, 31] },
                        { "athlete": { "displayName": "Jrue Holiday" }, "stats": [28.5, {}, "12"] }
                    ]
                }]
            }] }
        }))
        .unwrap();

        let team = &map_summary(raw).players[0];
        assert_eq!(team.keys, vec!["minutes", "", "points"]);
        assert_eq!(team.athletes[0].stats, vec!["36", "", "31"]);
        assert_eq!(team.athletes[1].stats, vec!["28.5", "", "12"]);
    }

    #[test]
    fn numeric_event_id_is_accepted() {
        let mut value = event(json!([{ "homeAway": "home" }, { "homeAway": "away" }]), "pre");
        value["id"] = json!(401585);
        let games = scoreboard(json!({ "events": [value, { "id": null }, { "id": [1] }] }));

        assert_eq!(games.len(), 1);
        assert_eq!(games[0].id, "401585");
        assert!(games[0].summary_url.ends_with("/summary?event=401585"));
    }

    #[test]
    fn summary_without_boxscore_has_no_players() {
        let raw: SummaryResponse = serde_json::from_value(json!({ "header": {} })).unwrap();
        assert!(map_summary(raw).players.is_empty());
    }

    #[tokio::test]
    async fn fetch_scoreboard_reads_events_from_server() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/scoreboard")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({ "events": [event(json!([
                    { "homeAway": "home", "score": "99" },
                    { "homeAway": "away", "score": "101" }
                ]), "post")] })
                .to_string(),
            )
            .create_async()
            .await;

        let api = NbaApi::with_site_base(server.url());
        let games = api.fetch_scoreboard().await.unwrap();

        mock.assert_async().await;
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].summary_url, format!("{}/summary?event=401585", server.url()));
        assert_eq!(games[0].winner(), Some(Side::Away));
    }

    #[tokio::test]
    async fn fetch_scoreboard_fails_on_server_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/scoreboard")
            .with_status(503)
            .create_async()
            .await;

        let api = NbaApi::with_site_base(server.url());
        let err = api.fetch_scoreboard().await.unwrap_err();
        assert!(matches!(err, ApiError::Api(_, _)));
    }

    #[tokio::test]
    async fn fetch_summary_fails_on_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/summary")
            .with_status(404)
            .create_async()
            .await;

        let api = NbaApi::with_site_base(server.url());
        let url = format!("{}/summary", server.url());
        assert!(matches!(
            api.fetch_summary(&url).await,
            Err(ApiError::Api(_, _))
        ));
    }

    #[tokio::test]
    async fn fetch_summary_reports_malformed_json() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/summary")
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let api = NbaApi::new();
        let url = format!("{}/summary", server.url());
        assert!(matches!(
            api.fetch_summary(&url).await,
            Err(ApiError::Parsing(_, _))
        ));
    }
}
