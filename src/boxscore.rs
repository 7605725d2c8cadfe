use nba_api::{AthleteLine, Summary, TeamPlayers};

pub const LOADING_TEXT: &str = "Loading box score…";
pub const UNAVAILABLE_TEXT: &str = "Box score unavailable.";
pub const NOT_AVAILABLE_TEXT: &str = "Box score not available yet.";
pub const NO_PLAYER_STATS_TEXT: &str = "No player stats yet.";

pub const PLAYER_LABEL: &str = "Player";
const MISSING_STAT: &str = "-";

#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub key: &'static str,
    pub label: &'static str,
}

/// Display order of the stat columns. ESPN's key order varies between feeds,
/// so every cell is looked up by key rather than by position.
pub const COLUMNS: [Column; 12] = [
    Column { key: "minutes", label: "MIN" },
    Column { key: "fieldGoalsMade-fieldGoalsAttempted", label: "FG" },
    Column { key: "threePointFieldGoalsMade-threePointFieldGoalsAttempted", label: "3P" },
    Column { key: "freeThrowsMade-freeThrowsAttempted", label: "FT" },
    Column { key: "points", label: "PTS" },
    Column { key: "assists", label: "AST" },
    Column { key: "rebounds", label: "REB" },
    Column { key: "steals", label: "STL" },
    Column { key: "blocks", label: "BLK" },
    Column { key: "turnovers", label: "TO" },
    Column { key: "fouls", label: "PF" },
    Column { key: "plusMinus", label: "+/-" },
];

/// What a panel's detail area currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Loading,
    Unavailable,
    NotAvailable,
    Teams(Vec<TeamSection>),
}

impl Fragment {
    /// Placeholder text, for the variants that are nothing but a message.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Fragment::Loading => Some(LOADING_TEXT),
            Fragment::Unavailable => Some(UNAVAILABLE_TEXT),
            Fragment::NotAvailable => Some(NOT_AVAILABLE_TEXT),
            Fragment::Teams(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamSection {
    Empty { team_name: String },
    Table { team_name: String, rows: Vec<Row> },
}

impl TeamSection {
    pub fn team_name(&self) -> &str {
        match self {
            TeamSection::Empty { team_name } | TeamSection::Table { team_name, .. } => team_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    /// One cell per entry of `COLUMNS`, in the same order.
    Played { name: String, cells: Vec<String> },
    DidNotPlay { name: String, reason: String },
}

pub fn render_box_score(summary: &Summary) -> Fragment {
    if summary.players.is_empty() {
        return Fragment::NotAvailable;
    }
    Fragment::Teams(summary.players.iter().map(render_team).collect())
}

fn render_team(team: &TeamPlayers) -> TeamSection {
    if team.athletes.is_empty() {
        return TeamSection::Empty {
            team_name: team.team_name.clone(),
        };
    }

    let rows = team
        .athletes
        .iter()
        .map(|athlete| render_row(athlete, &team.keys))
        .collect();

    TeamSection::Table {
        team_name: team.team_name.clone(),
        rows,
    }
}

fn render_row(athlete: &AthleteLine, keys: &[String]) -> Row {
    if let Some(reason) = &athlete.did_not_play {
        return Row::DidNotPlay {
            name: athlete.name.clone(),
            reason: reason.clone(),
        };
    }

    let cells = COLUMNS
        .iter()
        .map(|column| stat_cell(column.key, keys, &athlete.stats))
        .collect();

    Row::Played {
        name: athlete.name.clone(),
        cells,
    }
}

fn stat_cell(key: &str, keys: &[String], stats: &[String]) -> String {
    keys.iter()
        .position(|k| k == key)
        .and_then(|i| stats.get(i))
        .filter(|value| !value.is_empty())
        .cloned()
        .unwrap_or_else(|| MISSING_STAT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn athlete(name: &str, stats: &[&str]) -> AthleteLine {
        AthleteLine {
            name: name.to_string(),
            stats: strings(stats),
            did_not_play: None,
        }
    }

    fn celtics(athletes: Vec<AthleteLine>) -> TeamPlayers {
        TeamPlayers {
            team_name: "Boston Celtics".to_string(),
            keys: strings(&["points", "minutes", "rebounds", "plusMinus"]),
            athletes,
        }
    }

    #[test]
    fn missing_players_render_not_available() {
        let fragment = render_box_score(&Summary::default());
        assert_eq!(fragment, Fragment::NotAvailable);
        assert_eq!(fragment.message(), Some("Box score not available yet."));
    }

    #[test]
    fn cells_follow_column_order_not_key_order() {
        let summary = Summary {
            players: vec![celtics(vec![athlete("Jayson Tatum", &["31", "36", "8", "+12"])])],
        };

        let Fragment::Teams(sections) = render_box_score(&summary) else {
            panic!("expected team sections");
        };
        let TeamSection::Table { rows, .. } = &sections[0] else {
            panic!("expected a table");
        };
        let Row::Played { name, cells } = &rows[0] else {
            panic!("expected a stat row");
        };

        assert_eq!(name, "Jayson Tatum");
        assert_eq!(cells.len(), COLUMNS.len());
        assert_eq!(cells[0], "36"); // MIN
        assert_eq!(cells[4], "31"); // PTS
        assert_eq!(cells[6], "8"); // REB
        assert_eq!(cells[11], "+12"); // +/-
    }

    #[test]
    fn absent_keys_and_short_stat_lists_render_dashes() {
        let summary = Summary {
            players: vec![celtics(vec![
                athlete("Derrick White", &["14"]),
                athlete("Al Horford", &["6", ""]),
            ])],
        };

        let Fragment::Teams(sections) = render_box_score(&summary) else {
            panic!("expected team sections");
        };
        let TeamSection::Table { rows, .. } = &sections[0] else {
            panic!("expected a table");
        };
        for row in rows {
            let Row::Played { cells, .. } = row else {
                panic!("expected a stat row");
            };
            assert!(cells.iter().all(|c| !c.is_empty()));
            assert_eq!(cells[1], "-"); // FG is never in the key list
        }
        let Row::Played { cells, .. } = &rows[0] else {
            unreachable!()
        };
        assert_eq!(cells[0], "-"); // MIN index is past the end of the stats
        let Row::Played { cells, .. } = &rows[1] else {
            unreachable!()
        };
        assert_eq!(cells[0], "-"); // MIN value is empty
    }

    #[test]
    fn did_not_play_replaces_stats() {
        let mut benched = athlete("Neemias Queta", &[]);
        benched.did_not_play = Some("COACH'S DECISION".to_string());
        let summary = Summary {
            players: vec![celtics(vec![benched])],
        };

        let Fragment::Teams(sections) = render_box_score(&summary) else {
            panic!("expected team sections");
        };
        assert_eq!(
            sections[0],
            TeamSection::Table {
                team_name: "Boston Celtics".to_string(),
                rows: vec![Row::DidNotPlay {
                    name: "Neemias Queta".to_string(),
                    reason: "COACH'S DECISION".to_string(),
                }],
            }
        );
    }

    #[test]
    fn team_without_athletes_renders_empty_section() {
        let summary = Summary {
            players: vec![celtics(vec![]), celtics(vec![athlete("Jrue Holiday", &["10"])])],
        };

        let Fragment::Teams(sections) = render_box_score(&summary) else {
            panic!("expected team sections");
        };
        assert_eq!(sections.len(), 2);
        assert!(matches!(sections[0], TeamSection::Empty { .. }));
        assert!(matches!(sections[1], TeamSection::Table { .. }));
        assert_eq!(sections[0].team_name(), "Boston Celtics");
    }

    #[test]
    fn rendering_is_deterministic() {
        let summary = Summary {
            players: vec![celtics(vec![athlete("Jaylen Brown", &["22", "34", "5", "-3"])])],
        };
        assert_eq!(render_box_score(&summary), render_box_score(&summary));
    }
}
