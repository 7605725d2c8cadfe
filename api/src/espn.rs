/// ESPN API raw wire types: serde shapes for deserializing ESPN responses.
/// These map to our clean domain types via the mapping functions in client.rs.
use serde::Deserialize;
use serde::de::IgnoredAny;

// ---------------------------------------------------------------------------
// Scoreboard  (site v2 API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScoreboardResponse {
    pub events: Option<Vec<EspnEvent>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnEvent {
    pub id: Option<EspnText>,
    pub competitions: Option<Vec<EspnCompetition>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnCompetition {
    pub competitors: Option<Vec<EspnCompetitor>>,
    pub status: Option<EspnStatus>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnStatus {
    #[serde(rename = "type")]
    pub status_type: Option<EspnStatusType>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnStatusType {
    pub detail: Option<String>, // "Final", "Q3 4:12", "7:30 PM ET"
    pub state: Option<String>,  // "pre" | "in" | "post"
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnCompetitor {
    #[serde(rename = "homeAway")]
    pub home_away: Option<String>, // "home" | "away"
    pub team: Option<EspnTeam>,
    pub score: Option<EspnScore>,
}

/// ESPN sends scores as strings on the scoreboard, but numbers show up on
/// some feeds. Anything else is kept only so the response still parses.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum EspnScore {
    Text(String),
    Number(f64),
    Other(IgnoredAny),
}

/// A value ESPN normally sends as a string. Numbers and booleans are kept
/// as their text; anything else is ignored.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum EspnText {
    Text(String),
    Integer(i64),
    Number(f64),
    Flag(bool),
    Other(IgnoredAny),
}

impl EspnText {
    pub fn into_text(self) -> Option<String> {
        match self {
            EspnText::Text(s) => Some(s),
            EspnText::Integer(n) => Some(n.to_string()),
            EspnText::Number(n) => Some(n.to_string()),
            EspnText::Flag(b) => Some(b.to_string()),
            EspnText::Other(_) => None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnTeam {
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    pub abbreviation: Option<String>,
    pub logo: Option<String>,
    pub logos: Option<Vec<EspnLogo>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnLogo {
    pub href: Option<String>,
}

// ---------------------------------------------------------------------------
// Game summary  (site v2 API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SummaryResponse {
    pub boxscore: Option<EspnBoxscore>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnBoxscore {
    pub players: Option<Vec<EspnTeamPlayers>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnTeamPlayers {
    pub team: Option<EspnTeam>,
    pub statistics: Option<Vec<EspnStatCategory>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnStatCategory {
    pub keys: Option<Vec<Option<EspnText>>>,
    pub athletes: Option<Vec<EspnAthleteStats>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnAthleteStats {
    pub athlete: Option<EspnAthlete>,
    pub stats: Option<Vec<Option<EspnText>>>,
    #[serde(rename = "didNotPlay")]
    pub did_not_play: Option<EspnDidNotPlay>,
    /// Sits next to a boolean `didNotPlay` on the live feed.
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum EspnDidNotPlay {
    Flag(bool),
    Detail { reason: Option<String> },
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnAthlete {
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}
