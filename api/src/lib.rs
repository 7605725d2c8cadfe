pub mod client;
pub mod espn;

// ---------------------------------------------------------------------------
// Domain types: clean model, independent of ESPN wire format
// ---------------------------------------------------------------------------

/// One scoreboard entry, ready to render as a panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Game {
    pub id: String,
    pub summary_url: String,
    pub game_link: String,
    pub status_text: String, // "Final", "Q3 4:12", "7:30 PM ET"
    pub status_state: StatusState,
    pub home: Team,
    pub away: Team,
}

impl Game {
    pub fn is_live(&self) -> bool {
        self.status_state == StatusState::In
    }

    pub fn is_final(&self) -> bool {
        self.status_state == StatusState::Post
    }

    /// Winning side of a finished game. Ties and unfinished games have none.
    pub fn winner(&self) -> Option<Side> {
        if !self.is_final() {
            return None;
        }
        match self.away.score.cmp(&self.home.score) {
            std::cmp::Ordering::Greater => Some(Side::Away),
            std::cmp::Ordering::Less => Some(Side::Home),
            std::cmp::Ordering::Equal => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Away,
    Home,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub name: String,  // "Boston Celtics"
    pub short: String, // "BOS"
    pub score: u32,
    pub logo: String, // empty when ESPN has none
}

impl Default for Team {
    fn default() -> Self {
        Self {
            name: "Team".to_string(),
            short: "--".to_string(),
            score: 0,
            logo: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusState {
    Pre,
    In,
    Post,
    #[default]
    Unknown,
}

impl StatusState {
    pub fn from_wire(state: &str) -> Self {
        match state {
            "pre" => StatusState::Pre,
            "in" => StatusState::In,
            "post" => StatusState::Post,
            _ => StatusState::Unknown,
        }
    }
}

/// Box score data for one game, as decoded from the summary endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    /// One entry per team. Empty when ESPN has no player stats yet.
    pub players: Vec<TeamPlayers>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamPlayers {
    pub team_name: String,
    /// Stat keys in ESPN's order; `AthleteLine::stats` is indexed by position here.
    pub keys: Vec<String>,
    pub athletes: Vec<AthleteLine>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AthleteLine {
    pub name: String,
    pub stats: Vec<String>,
    pub did_not_play: Option<String>, // "COACH'S DECISION"
}
